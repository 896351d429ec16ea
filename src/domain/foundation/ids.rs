//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for one onboarding wizard run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WizardId(Uuid);

impl WizardId {
    /// Creates a new random WizardId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a WizardId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for WizardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WizardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WizardId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wizard_id_new_generates_unique_ids() {
        assert_ne!(WizardId::new(), WizardId::new());
    }

    #[test]
    fn wizard_id_parses_from_display() {
        let id = WizardId::new();
        let parsed: WizardId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn wizard_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<WizardId>().is_err());
    }

    #[test]
    fn wizard_id_serializes_as_bare_string() {
        let uuid = Uuid::parse_str("6f1c1f2e-8a3b-4c55-9f1d-0d2b7e0c9a11").unwrap();
        let json = serde_json::to_string(&WizardId::from_uuid(uuid)).unwrap();
        assert_eq!(json, "\"6f1c1f2e-8a3b-4c55-9f1d-0d2b7e0c9a11\"");
    }
}
