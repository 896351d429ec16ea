//! WizardController errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::questionnaire::{SectionId, WizardPhase};
use crate::ports::WizardStoreError;

/// Errors surfaced by [`WizardController`](super::WizardController).
///
/// A blocked "next" is not an error; it comes back as
/// [`NavOutcome::Blocked`](super::NavOutcome::Blocked).
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Wizard is completed; answers are read-only")]
    Frozen,

    #[error("'{operation}' is not allowed during {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: WizardPhase,
    },

    #[error("Section '{0}' has not been reached yet")]
    SectionLocked(SectionId),

    #[error("Section '{0}' has no visible questions")]
    SectionEmpty(SectionId),

    #[error("Unknown section '{0}'")]
    UnknownSection(SectionId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to persist wizard state: {0}")]
    Persistence(#[from] WizardStoreError),

    #[error(transparent)]
    Domain(DomainError),
}

impl WizardError {
    /// Maps a rejected phase-machine command onto the controller's error.
    pub(crate) fn from_flow(
        err: DomainError,
        operation: &'static str,
        phase: WizardPhase,
        target: Option<SectionId>,
    ) -> Self {
        match (err.code, target) {
            (ErrorCode::InvalidStateTransition, _) => {
                WizardError::InvalidPhase { operation, phase }
            }
            (ErrorCode::SectionLocked, Some(section)) => WizardError::SectionLocked(section),
            (ErrorCode::SectionEmpty, Some(section)) => WizardError::SectionEmpty(section),
            (ErrorCode::UnknownSection, Some(section)) => WizardError::UnknownSection(section),
            _ => WizardError::Domain(err),
        }
    }
}
