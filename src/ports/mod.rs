//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the question-flow engine and the outside world. Adapters implement these
//! ports.
//!
//! - `WizardStore` - durable load/save of wizard state
//! - `ProfileDeriver` - downstream profile generation on completion

mod profile_deriver;
mod wizard_store;

pub use profile_deriver::{DerivedProfiles, ProfileDerivationError, ProfileDeriver, SegmentProfile};
pub use wizard_store::{WizardStore, WizardStoreError};
