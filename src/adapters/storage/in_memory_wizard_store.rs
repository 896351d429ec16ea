//! In-Memory Wizard Store Adapter
//!
//! Keeps wizard state in memory. Used by tests and development; it counts
//! writes and can be told to fail so persistence paths can be exercised.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::WizardId;
use crate::domain::questionnaire::WizardState;
use crate::ports::{WizardStore, WizardStoreError};

/// In-memory storage for wizard state
#[derive(Debug, Clone, Default)]
pub struct InMemoryWizardStore {
    states: Arc<RwLock<HashMap<WizardId, WizardState>>>,
    saves: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl InMemoryWizardStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert state directly, bypassing the save counter
    pub async fn seed(&self, id: WizardId, state: WizardState) {
        self.states.write().await.insert(id, state);
    }

    /// Number of successful `save_state` calls
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Make every subsequent read and write fail until switched off
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get the number of stored states
    pub async fn state_count(&self) -> usize {
        self.states.read().await.len()
    }

    fn check_available(&self) -> Result<(), WizardStoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(WizardStoreError::Unavailable(
                "in-memory store set to fail".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl WizardStore for InMemoryWizardStore {
    async fn save_state(&self, id: WizardId, state: &WizardState) -> Result<(), WizardStoreError> {
        self.check_available()?;
        self.states.write().await.insert(id, state.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn load_state(&self, id: WizardId) -> Result<Option<WizardState>, WizardStoreError> {
        self.check_available()?;
        Ok(self.states.read().await.get(&id).cloned())
    }

    async fn exists(&self, id: WizardId) -> Result<bool, WizardStoreError> {
        self.check_available()?;
        Ok(self.states.read().await.contains_key(&id))
    }

    async fn delete(&self, id: WizardId) -> Result<(), WizardStoreError> {
        self.check_available()?;
        self.states
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(WizardStoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(index: usize) -> WizardState {
        WizardState {
            current_index: index,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_memory_store_save_and_load() {
        let store = InMemoryWizardStore::new();
        let id = WizardId::new();

        store.save_state(id, &state_at(4)).await.unwrap();

        let loaded = store.load_state(id).await.unwrap().unwrap();
        assert_eq!(loaded.current_index, 4);
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_load_missing_returns_fresh_state() {
        let store = InMemoryWizardStore::new();
        let id = WizardId::new();

        assert!(store.load_state(id).await.unwrap().is_none());
        assert!(store.load(id).await.unwrap().is_fresh());
    }

    #[tokio::test]
    async fn test_memory_store_overwrites_previous_state() {
        let store = InMemoryWizardStore::new();
        let id = WizardId::new();

        store.save_state(id, &state_at(1)).await.unwrap();
        store.save_state(id, &state_at(2)).await.unwrap();

        assert_eq!(store.load(id).await.unwrap().current_index, 2);
        assert_eq!(store.state_count().await, 1);
        assert_eq!(store.save_count(), 2);
    }

    #[tokio::test]
    async fn test_memory_store_seed_does_not_count() {
        let store = InMemoryWizardStore::new();
        let id = WizardId::new();

        store.seed(id, state_at(3)).await;

        assert!(store.exists(id).await.unwrap());
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_memory_store_failure_injection() {
        let store = InMemoryWizardStore::new();
        let id = WizardId::new();
        store.set_failing(true);

        let result = store.save_state(id, &state_at(1)).await;
        assert!(matches!(result, Err(WizardStoreError::Unavailable(_))));
        assert_eq!(store.save_count(), 0);

        store.set_failing(false);
        store.save_state(id, &state_at(1)).await.unwrap();
        assert_eq!(store.save_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_store_delete() {
        let store = InMemoryWizardStore::new();
        let id = WizardId::new();

        store.save_state(id, &state_at(1)).await.unwrap();
        store.delete(id).await.unwrap();

        assert!(!store.exists(id).await.unwrap());
        assert!(matches!(
            store.delete(id).await,
            Err(WizardStoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_store_clones_share_state() {
        let store = InMemoryWizardStore::new();
        let id = WizardId::new();
        let writer = store.clone();

        let handle = tokio::spawn(async move {
            writer.save_state(id, &state_at(9)).await.unwrap();
        });
        handle.await.unwrap();

        assert_eq!(store.load(id).await.unwrap().current_index, 9);
        assert_eq!(store.save_count(), 1);
    }
}
