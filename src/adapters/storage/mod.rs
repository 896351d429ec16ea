//! Storage Adapters
//!
//! Implementations of the WizardStore port for persisting wizard state.
//!
//! ## Available Adapters
//!
//! - **FileWizardStore** - Stores state as JSON files on disk
//! - **InMemoryWizardStore** - Stores state in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileWizardStore, InMemoryWizardStore};
//!
//! // Production: file-based storage
//! let store = FileWizardStore::new("./data/wizards");
//!
//! // Testing: in-memory storage
//! let store = InMemoryWizardStore::new();
//! ```

mod file_wizard_store;
mod in_memory_wizard_store;

pub use file_wizard_store::FileWizardStore;
pub use in_memory_wizard_store::InMemoryWizardStore;

use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::ports::WizardStore;

/// Builds the configured store backend.
pub fn store_from_config(config: &StorageConfig) -> Arc<dyn WizardStore> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory wizard store");
            Arc::new(InMemoryWizardStore::new())
        }
        StorageBackend::File => {
            tracing::info!(data_dir = %config.data_dir.display(), "Using file wizard store");
            Arc::new(FileWizardStore::new(&config.data_dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::WizardId;
    use crate::domain::questionnaire::WizardState;
    use tempfile::TempDir;

    #[tokio::test]
    async fn file_backend_writes_under_data_dir() {
        let temp = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            data_dir: temp.path().to_path_buf(),
        };
        let store = store_from_config(&config);
        let id = WizardId::new();

        store.save_state(id, &WizardState::default()).await.unwrap();

        assert!(temp.path().join(format!("{}.json", id)).exists());
    }

    #[tokio::test]
    async fn memory_backend_round_trips() {
        let store = store_from_config(&StorageConfig::default());
        let id = WizardId::new();
        let state = WizardState {
            current_index: 2,
            ..Default::default()
        };

        store.save_state(id, &state).await.unwrap();

        assert_eq!(store.load(id).await.unwrap(), state);
    }
}
