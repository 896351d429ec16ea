//! QuestionRegistry - the immutable, ordered interview catalog.

use std::ops::Range;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::catalog;
use super::question::Question;
use super::section::{Section, SectionId, SectionMap};

static STANDARD: Lazy<Arc<QuestionRegistry>> = Lazy::new(|| {
    Arc::new(
        QuestionRegistry::new(catalog::sections(), catalog::questions())
            .expect("standard catalog must be well-formed"),
    )
});

/// Ordered catalog of questions partitioned into sections.
///
/// All lookups are pure. Index arguments are expected to come from
/// navigation over this same registry, so they are always in range.
#[derive(Debug, Clone)]
pub struct QuestionRegistry {
    questions: Vec<Question>,
    sections: SectionMap,
}

impl QuestionRegistry {
    /// Builds a registry, validating catalog structure.
    ///
    /// # Errors
    ///
    /// - `DuplicateQuestion` when two questions share an id
    /// - `InvalidFormat` when a question's kind does not match its field
    /// - any [`SectionMap::build`] error
    pub fn new(sections: Vec<Section>, questions: Vec<Question>) -> Result<Self, DomainError> {
        for (index, question) in questions.iter().enumerate() {
            if questions[..index].iter().any(|q| q.id == question.id) {
                return Err(DomainError::new(
                    ErrorCode::DuplicateQuestion,
                    format!("Question id '{}' is used twice", question.id),
                )
                .with_detail("index", index.to_string()));
            }
            if question.kind.value_kind() != question.field.kind() {
                return Err(DomainError::new(
                    ErrorCode::InvalidFormat,
                    format!(
                        "Question '{}' is {:?} but '{}' stores {} values",
                        question.id,
                        question.kind,
                        question.field,
                        question.field.kind().name()
                    ),
                ));
            }
        }

        let owners: Vec<SectionId> = questions.iter().map(|q| q.section).collect();
        let sections = SectionMap::build(sections, &owners)?;

        Ok(Self {
            questions,
            sections,
        })
    }

    /// The shipped marketing-foundation catalog.
    pub fn standard() -> Arc<QuestionRegistry> {
        Arc::clone(&STANDARD)
    }

    /// Count of all catalog entries, regardless of visibility.
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }

    /// The section owning question `index`.
    pub fn section_of(&self, index: usize) -> &Section {
        self.sections.section_of(index)
    }

    /// True iff `index` is the first question of its section.
    pub fn is_first_of_section(&self, index: usize) -> bool {
        self.sections.is_first_of_section(index)
    }

    pub fn section_span(&self, id: SectionId) -> Option<Range<usize>> {
        self.sections.span(id)
    }

    /// Order of a section in the flow.
    pub fn section_position(&self, id: SectionId) -> Option<usize> {
        self.sections.position(id)
    }

    pub fn section_map(&self) -> &SectionMap {
        &self.sections
    }

    pub fn sections(&self) -> &[Section] {
        self.sections.sections()
    }
}
