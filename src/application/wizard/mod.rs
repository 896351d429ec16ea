//! Wizard orchestration.
//!
//! - `controller` - the session-level state machine driver
//! - `section_transition` - interstitial dwell and exit timers
//! - `debounce` - coalesced persistence writes
//! - `scheduled_task` - cancellable delayed tasks both timers build on

mod controller;
mod debounce;
mod error;
mod scheduled_task;
mod section_transition;

pub use controller::{
    CompletionRecord, NavOutcome, OpenOutcome, PendingTimers, Progress, WizardController,
};
pub use debounce::DebouncedWriter;
pub use error::WizardError;
pub use scheduled_task::{ScheduledTask, TimerSlot};
pub use section_transition::{SectionTransitionController, TransitionTimer, DWELL, EXIT};
