//! Application layer - coordinates the questionnaire domain with its ports.

pub mod wizard;

pub use wizard::{
    CompletionRecord, NavOutcome, OpenOutcome, PendingTimers, Progress, WizardController,
    WizardError,
};
