//! Question definitions and visibility conditions.

use std::fmt;

use thiserror::Error;

use super::answers::{Answers, ValueKind};
use super::field::AnswerField;
use super::section::SectionId;

/// Visibility predicate over the answers aggregate.
///
/// Returning `Err` means the condition could not be evaluated against the
/// current answers; the question is then treated as hidden.
pub type Condition = fn(&Answers) -> Result<bool, ConditionError>;

/// A condition that could not make sense of the answers it was given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    #[error("Unexpected value '{value}' in '{field}'")]
    UnexpectedValue { field: &'static str, value: String },

    #[error("Condition failed: {0}")]
    Failed(String),
}

/// Input style of a question. Decides which value kind its field must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    ShortText,
    LongText,
    SingleChoice,
    MultiChoice,
    Ranking,
    Pricing,
}

impl QuestionKind {
    pub fn value_kind(&self) -> ValueKind {
        match self {
            QuestionKind::ShortText | QuestionKind::LongText | QuestionKind::SingleChoice => {
                ValueKind::Text
            }
            QuestionKind::MultiChoice | QuestionKind::Ranking => ValueKind::List,
            QuestionKind::Pricing => ValueKind::Price,
        }
    }
}

/// One entry of the interview catalog.
#[derive(Clone)]
pub struct Question {
    pub id: &'static str,
    pub field: AnswerField,
    pub section: SectionId,
    pub kind: QuestionKind,
    pub prompt: &'static str,
    pub required: bool,
    pub condition: Option<Condition>,
    pub options: &'static [&'static str],
    pub micro_prompts: &'static [&'static str],
}

impl Question {
    /// Creates an optional, unconditional question.
    pub fn new(
        id: &'static str,
        field: AnswerField,
        section: SectionId,
        kind: QuestionKind,
        prompt: &'static str,
    ) -> Self {
        Self {
            id,
            field,
            section,
            kind,
            prompt,
            required: false,
            condition: None,
            options: &[],
            micro_prompts: &[],
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    pub fn with_micro_prompts(mut self, prompts: &'static [&'static str]) -> Self {
        self.micro_prompts = prompts;
        self
    }

    /// Scoring weight: required questions count double.
    pub fn weight(&self) -> u32 {
        if self.required {
            2
        } else {
            1
        }
    }

    /// Evaluates the visibility condition against the current answers.
    ///
    /// A failing condition hides this question only; the defect is logged.
    pub fn is_visible(&self, answers: &Answers) -> bool {
        match self.condition {
            None => true,
            Some(condition) => match condition(answers) {
                Ok(visible) => visible,
                Err(err) => {
                    tracing::warn!(
                        question = self.id,
                        error = %err,
                        "Condition evaluation failed; hiding question"
                    );
                    false
                }
            },
        }
    }

    pub fn is_answered(&self, answers: &Answers) -> bool {
        self.field.is_filled(answers)
    }

    /// Required and not yet answered.
    pub fn blocks_progress(&self, answers: &Answers) -> bool {
        self.required && !self.is_answered(answers)
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("id", &self.id)
            .field("field", &self.field)
            .field("section", &self.section)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUSINESS: SectionId = SectionId::new("business");

    fn stage_question() -> Question {
        Question::new(
            "business-stage",
            AnswerField::BusinessStage,
            BUSINESS,
            QuestionKind::SingleChoice,
            "Where is the business today?",
        )
    }

    #[test]
    fn new_question_is_optional_and_unconditional() {
        let q = stage_question();
        assert!(!q.required);
        assert!(q.condition.is_none());
        assert_eq!(q.weight(), 1);
        assert!(q.is_visible(&Answers::default()));
    }

    #[test]
    fn required_questions_weigh_double() {
        assert_eq!(stage_question().required().weight(), 2);
    }

    #[test]
    fn condition_controls_visibility() {
        let q = stage_question().when(|a| Ok(a.business.name == "Acme"));
        let mut answers = Answers::default();
        assert!(!q.is_visible(&answers));
        answers.business.name = "Acme".to_string();
        assert!(q.is_visible(&answers));
    }

    #[test]
    fn failing_condition_hides_question() {
        let q = stage_question().when(|a| {
            Err(ConditionError::UnexpectedValue {
                field: "business.name",
                value: a.business.name.clone(),
            })
        });
        assert!(!q.is_visible(&Answers::default()));
    }

    #[test]
    fn blocks_progress_only_when_required_and_unanswered() {
        let mut answers = Answers::default();
        let optional = stage_question();
        let required = stage_question().required();

        assert!(!optional.blocks_progress(&answers));
        assert!(required.blocks_progress(&answers));

        answers.business.stage = "scaling".to_string();
        assert!(!required.blocks_progress(&answers));
    }

    #[test]
    fn kinds_map_to_value_kinds() {
        assert_eq!(QuestionKind::LongText.value_kind(), ValueKind::Text);
        assert_eq!(QuestionKind::Ranking.value_kind(), ValueKind::List);
        assert_eq!(QuestionKind::Pricing.value_kind(), ValueKind::Price);
    }
}
