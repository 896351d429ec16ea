//! WizardState - the persisted snapshot of one onboarding session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::answers::Answers;

/// Position, completion stamp and answers, as written to the store.
///
/// `current_index` equal to the registry length means the wizard sits on the
/// review screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub current_index: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,

    /// When this snapshot was last written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<Timestamp>,

    #[serde(default)]
    pub answers: Answers,
}

impl WizardState {
    /// Once stamped, answers are read-only and the wizard is never resumed.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Nothing answered and never moved past the first question.
    pub fn is_fresh(&self) -> bool {
        self.current_index == 0 && self.completed_at.is_none() && self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_fresh() {
        let state = WizardState::default();
        assert!(state.is_fresh());
        assert!(!state.is_completed());
    }

    #[test]
    fn any_answer_makes_state_not_fresh() {
        let mut state = WizardState::default();
        state.answers.goals.primary_goal = "pipeline".to_string();
        assert!(!state.is_fresh());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut state = WizardState {
            current_index: 3,
            ..Default::default()
        };
        state.answers.customer_insights.interview_count = "1-5".to_string();

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["currentIndex"], 3);
        assert!(json.get("completedAt").is_none());
        assert_eq!(json["answers"]["customerInsights"]["interviewCount"], "1-5");
    }

    #[test]
    fn completed_state_survives_serde() {
        let state = WizardState {
            current_index: 7,
            completed_at: Some(Timestamp::now()),
            saved_at: Some(Timestamp::now()),
            answers: Answers::default(),
        };
        let json = serde_json::to_string(&state).unwrap();
        let back: WizardState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert!(back.is_completed());
    }

    #[test]
    fn missing_answers_default_on_load() {
        let state: WizardState = serde_json::from_str(r#"{"currentIndex":2}"#).unwrap();
        assert_eq!(state.current_index, 2);
        assert!(state.answers.is_empty());
    }
}
