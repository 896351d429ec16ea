//! Wizard events.
//!
//! Emitted by the controller for the rendering layer:
//! - `SectionAnnounced` - interstitial for a new section is on screen
//! - `SectionEntered` - a different section's question is now current
//! - `ValidationShake` - "next" pressed on a required, unanswered question
//! - `Saved` / `SaveFailed` - outcome of a store write
//! - `LoadFailed` - stored state unreadable, started fresh
//! - `Redirected` - a completed wizard was reopened
//! - `EnteredReview`, `Completed`, `Exited` - flow milestones

use serde::Serialize;

use crate::domain::foundation::{Percentage, Timestamp};

use super::section::SectionId;

/// Something the rendering layer may want to react to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WizardEvent {
    SectionAnnounced {
        section: SectionId,
        title: &'static str,
    },
    SectionEntered {
        section: SectionId,
        index: usize,
    },
    ValidationShake {
        question_id: &'static str,
    },
    Saved {
        current_index: usize,
    },
    /// Non-fatal; in-memory answers stay authoritative.
    SaveFailed {
        reason: String,
    },
    LoadFailed {
        reason: String,
    },
    Redirected {
        completed_at: Timestamp,
    },
    EnteredReview,
    Completed {
        clarity: Percentage,
    },
    Exited,
}

impl WizardEvent {
    /// Dotted event name, e.g. `wizard.section_announced`.
    pub fn event_type(&self) -> &'static str {
        match self {
            WizardEvent::SectionAnnounced { .. } => "wizard.section_announced",
            WizardEvent::SectionEntered { .. } => "wizard.section_entered",
            WizardEvent::ValidationShake { .. } => "wizard.validation_shake",
            WizardEvent::Saved { .. } => "wizard.saved",
            WizardEvent::SaveFailed { .. } => "wizard.save_failed",
            WizardEvent::LoadFailed { .. } => "wizard.load_failed",
            WizardEvent::Redirected { .. } => "wizard.redirected",
            WizardEvent::EnteredReview => "wizard.entered_review",
            WizardEvent::Completed { .. } => "wizard.completed",
            WizardEvent::Exited => "wizard.exited",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_is_namespaced() {
        assert_eq!(WizardEvent::Exited.event_type(), "wizard.exited");
        assert_eq!(
            WizardEvent::ValidationShake { question_id: "q1" }.event_type(),
            "wizard.validation_shake"
        );
    }

    #[test]
    fn serializes_with_type_tag() {
        let event = WizardEvent::SectionAnnounced {
            section: SectionId::new("goals"),
            title: "Where are you headed?",
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "section_announced");
        assert_eq!(json["section"], "goals");
    }
}
