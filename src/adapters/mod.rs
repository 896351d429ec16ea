//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the engine to external systems:
//! - `storage` - Wizard state stores (in-memory, file)
//! - `profiles` - Profile derivation on completion

pub mod profiles;
pub mod storage;

pub use profiles::CohortProfileDeriver;
pub use storage::{store_from_config, FileWizardStore, InMemoryWizardStore};
