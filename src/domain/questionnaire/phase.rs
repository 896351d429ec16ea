//! WizardPhase - where the user is in the onboarding flow.

use serde::Serialize;
use std::fmt;

use crate::domain::foundation::StateMachine;

use super::section::SectionId;

/// Stage of a section-transition interstitial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStage {
    /// Interstitial on screen, dwell timer running.
    Announcing,
    /// Interstitial animating out, exit timer running.
    Exiting,
}

/// Phase of the wizard.
///
/// Valid transitions:
/// - Welcome -> Question, Review, Exited
/// - Question -> Question, SectionTransition(Announcing), Review, Exited
/// - SectionTransition(Announcing) -> SectionTransition(Exiting), Exited
/// - SectionTransition(Exiting) -> Question(after origin), Review, Exited
/// - Review -> Question, Celebration, Exited
/// - Celebration -> Completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum WizardPhase {
    #[default]
    Welcome,
    Question {
        index: usize,
    },
    SectionTransition {
        from: usize,
        to: usize,
        section: SectionId,
        stage: TransitionStage,
    },
    Review,
    Celebration,
    Completed,
    Exited,
}

impl WizardPhase {
    /// The question on screen, if any.
    pub fn question_index(&self) -> Option<usize> {
        match self {
            WizardPhase::Question { index } => Some(*index),
            _ => None,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self, WizardPhase::SectionTransition { .. })
    }

    /// Answers can no longer change.
    pub fn is_frozen(&self) -> bool {
        matches!(self, WizardPhase::Celebration | WizardPhase::Completed)
    }

    pub fn is_active(&self) -> bool {
        !self.is_frozen() && !matches!(self, WizardPhase::Exited)
    }
}

impl StateMachine for WizardPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use TransitionStage::*;
        use WizardPhase::*;
        match (self, target) {
            (Completed, _) | (Exited, _) => false,
            (Celebration, Completed) => true,
            (Celebration, _) => false,
            (_, Exited) => true,
            (Welcome, Question { .. }) | (Welcome, Review) => true,
            (Question { .. }, Question { .. }) | (Question { .. }, Review) => true,
            (Question { index }, SectionTransition { from, stage: Announcing, .. }) => {
                index == from
            }
            (
                SectionTransition { from, to, section, stage: Announcing },
                SectionTransition { from: f, to: t, section: s, stage: Exiting },
            ) => from == f && to == t && section == s,
            (SectionTransition { from, stage: Exiting, .. }, Question { index }) => index > from,
            (SectionTransition { stage: Exiting, .. }, Review) => true,
            (Review, Question { .. }) | (Review, Celebration) => true,
            _ => false,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, WizardPhase::Completed | WizardPhase::Exited)
    }
}

impl fmt::Display for WizardPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardPhase::Welcome => write!(f, "Welcome"),
            WizardPhase::Question { index } => write!(f, "Question({})", index),
            WizardPhase::SectionTransition { section, stage, .. } => {
                write!(f, "SectionTransition({}, {:?})", section, stage)
            }
            WizardPhase::Review => write!(f, "Review"),
            WizardPhase::Celebration => write!(f, "Celebration"),
            WizardPhase::Completed => write!(f, "Completed"),
            WizardPhase::Exited => write!(f, "Exited"),
        }
    }
}
