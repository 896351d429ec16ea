//! Persistence timing configuration
//!
//! Only the answer debounce is tunable. Section transition timings are fixed.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

const MIN_DEBOUNCE_MS: u64 = 100;
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Debounced write settings
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
    /// Quiet period after the last answer change before writing
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl PersistenceConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validate persistence configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS).contains(&self.debounce_ms) {
            return Err(ValidationError::InvalidDebounce {
                min: MIN_DEBOUNCE_MS,
                max: MAX_DEBOUNCE_MS,
                actual: self.debounce_ms,
            });
        }
        Ok(())
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    800
}
