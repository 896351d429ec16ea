//! File-based Wizard Store Adapter
//!
//! Stores each wizard's state as `<wizard_id>.json` under a base directory.
//! Writes go to a temporary sibling first and are renamed into place, so a
//! crash mid-write leaves the previous snapshot intact.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::foundation::WizardId;
use crate::domain::questionnaire::WizardState;
use crate::ports::{WizardStore, WizardStoreError};

/// File-based storage for wizard state
#[derive(Debug, Clone)]
pub struct FileWizardStore {
    base_path: PathBuf,
}

impl FileWizardStore {
    /// Create a new file store rooted at `base_path`
    ///
    /// The directory is created on first write.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileWizardStore::new("./data/wizards");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn state_file_path(&self, id: WizardId) -> PathBuf {
        self.base_path.join(format!("{}.json", id))
    }

    fn temp_file_path(&self, id: WizardId) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", id))
    }

    async fn ensure_dir(&self) -> Result<(), WizardStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| WizardStoreError::IoError(e.to_string()))
    }
}

#[async_trait]
impl WizardStore for FileWizardStore {
    async fn save_state(&self, id: WizardId, state: &WizardState) -> Result<(), WizardStoreError> {
        self.ensure_dir().await?;

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| WizardStoreError::SerializationFailed(e.to_string()))?;

        let temp_path = self.temp_file_path(id);
        fs::write(&temp_path, json)
            .await
            .map_err(|e| WizardStoreError::IoError(e.to_string()))?;
        fs::rename(&temp_path, self.state_file_path(id))
            .await
            .map_err(|e| WizardStoreError::IoError(e.to_string()))?;

        tracing::debug!(wizard_id = %id, path = %self.base_path.display(), "Wizard state written");
        Ok(())
    }

    async fn load_state(&self, id: WizardId) -> Result<Option<WizardState>, WizardStoreError> {
        let json = match fs::read_to_string(self.state_file_path(id)).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(WizardStoreError::IoError(e.to_string())),
        };

        let state = serde_json::from_str(&json)
            .map_err(|e| WizardStoreError::DeserializationFailed(e.to_string()))?;
        Ok(Some(state))
    }

    async fn exists(&self, id: WizardId) -> Result<bool, WizardStoreError> {
        fs::try_exists(self.state_file_path(id))
            .await
            .map_err(|e| WizardStoreError::IoError(e.to_string()))
    }

    async fn delete(&self, id: WizardId) -> Result<(), WizardStoreError> {
        match fs::remove_file(self.state_file_path(id)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(WizardStoreError::NotFound(id))
            }
            Err(e) => Err(WizardStoreError::IoError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::questionnaire::PriceRange;
    use tempfile::TempDir;

    fn setup() -> (FileWizardStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileWizardStore::new(temp_dir.path().join("wizards"));
        (store, temp_dir)
    }

    fn sample_state() -> WizardState {
        let mut state = WizardState {
            current_index: 5,
            saved_at: Some(Timestamp::now()),
            ..Default::default()
        };
        state.answers.business.name = "Northwind".to_string();
        state.answers.business.pricing = Some(PriceRange::new("USD", 49, 199).unwrap());
        state.answers.goals.channels = vec!["seo".to_string(), "partnerships".to_string()];
        state
    }

    #[tokio::test]
    async fn test_file_store_save_and_load() {
        let (store, _temp) = setup();
        let id = WizardId::new();
        let state = sample_state();

        store.save_state(id, &state).await.unwrap();

        let loaded = store.load_state(id).await.unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[tokio::test]
    async fn test_file_store_missing_state_is_none() {
        let (store, _temp) = setup();
        let id = WizardId::new();

        assert!(store.load_state(id).await.unwrap().is_none());
        assert!(store.load(id).await.unwrap().is_fresh());
        assert!(!store.exists(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_file_store_writes_camel_case_json() {
        let (store, _temp) = setup();
        let id = WizardId::new();

        store.save_state(id, &sample_state()).await.unwrap();

        let raw = std::fs::read_to_string(store.base_path().join(format!("{}.json", id))).unwrap();
        assert!(raw.contains("\"currentIndex\": 5"));
        assert!(raw.contains("\"revenueModel\""));
        assert!(!store.base_path().join(format!(".{}.json.tmp", id)).exists());
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file_fails_to_deserialize() {
        let (store, _temp) = setup();
        let id = WizardId::new();
        std::fs::create_dir_all(store.base_path()).unwrap();
        std::fs::write(store.base_path().join(format!("{}.json", id)), "{not json").unwrap();

        let result = store.load_state(id).await;
        assert!(matches!(result, Err(WizardStoreError::DeserializationFailed(_))));
    }

    #[tokio::test]
    async fn test_file_store_overwrite_and_delete() {
        let (store, _temp) = setup();
        let id = WizardId::new();
        let mut state = sample_state();

        store.save_state(id, &state).await.unwrap();
        state.current_index = 6;
        state.completed_at = Some(Timestamp::now());
        store.save_state(id, &state).await.unwrap();

        let loaded = store.load(id).await.unwrap();
        assert_eq!(loaded.current_index, 6);
        assert!(loaded.is_completed());

        store.delete(id).await.unwrap();
        assert!(!store.exists(id).await.unwrap());
        assert!(matches!(store.delete(id).await, Err(WizardStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_file_store_keeps_wizards_apart() {
        let (store, _temp) = setup();
        let first = WizardId::new();
        let second = WizardId::new();

        store.save_state(first, &sample_state()).await.unwrap();
        store.save_state(second, &WizardState::default()).await.unwrap();

        assert_eq!(store.load(first).await.unwrap().current_index, 5);
        assert!(store.load(second).await.unwrap().is_fresh());
    }
}
