//! Wizard Store Port - Interface for persisting wizard state.
//!
//! The store writes synchronously from the caller's point of view; debouncing
//! is the controller's job. Implementations must be safe to share across
//! tasks.

use async_trait::async_trait;

use crate::domain::foundation::WizardId;
use crate::domain::questionnaire::WizardState;

/// Errors that can occur during wizard store operations
#[derive(Debug, thiserror::Error)]
pub enum WizardStoreError {
    #[error("State not found for wizard: {0}")]
    NotFound(WizardId),

    #[error("Failed to serialize state: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize state: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Port for persisting and loading wizard state
#[async_trait]
pub trait WizardStore: Send + Sync {
    /// Save wizard state, replacing any previous snapshot
    ///
    /// # Errors
    /// Returns `WizardStoreError` if the write fails. The caller's in-memory
    /// state is unaffected.
    async fn save_state(&self, id: WizardId, state: &WizardState) -> Result<(), WizardStoreError>;

    /// Load wizard state
    ///
    /// # Returns
    /// `None` if nothing has been saved for this wizard
    async fn load_state(&self, id: WizardId) -> Result<Option<WizardState>, WizardStoreError>;

    /// Load wizard state, or a fresh empty state if none exists
    async fn load(&self, id: WizardId) -> Result<WizardState, WizardStoreError> {
        Ok(self.load_state(id).await?.unwrap_or_default())
    }

    /// Check if state exists for a wizard
    async fn exists(&self, id: WizardId) -> Result<bool, WizardStoreError>;

    /// Delete stored state for a wizard
    ///
    /// # Errors
    /// Returns `WizardStoreError::NotFound` if nothing was stored
    async fn delete(&self, id: WizardId) -> Result<(), WizardStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_store_error_not_found() {
        let id = WizardId::new();
        let err = WizardStoreError::NotFound(id);
        assert!(err.to_string().contains("State not found"));
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_wizard_store_error_serialization() {
        let err = WizardStoreError::SerializationFailed("bad utf-8".to_string());
        assert!(err.to_string().contains("serialize"));
    }

    #[test]
    fn test_wizard_store_error_unavailable() {
        let err = WizardStoreError::Unavailable("disk full".to_string());
        assert_eq!(err.to_string(), "Store unavailable: disk full");
    }
}
