//! ProfileDeriver port - downstream segment/ICP generation from finished answers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::questionnaire::Answers;

/// One buyer segment derived from the foundation answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentProfile {
    pub name: String,
    pub role: String,
    pub pains: Vec<String>,
    /// The moment this buyer starts looking, if known.
    pub trigger: Option<String>,
}

/// Everything the deriver produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedProfiles {
    pub segments: Vec<SegmentProfile>,
}

impl DerivedProfiles {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Errors from profile derivation
#[derive(Debug, thiserror::Error)]
pub enum ProfileDerivationError {
    #[error("Not enough answers to derive profiles: {0}")]
    InsufficientAnswers(String),

    #[error("Profile derivation failed: {0}")]
    Failed(String),
}

/// Turns completed answers into buyer profiles.
///
/// Called once on completion. A failure is logged by the caller and never
/// blocks completion.
#[async_trait]
pub trait ProfileDeriver: Send + Sync {
    async fn derive(&self, answers: &Answers) -> Result<DerivedProfiles, ProfileDerivationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profiles_are_empty() {
        assert!(DerivedProfiles::default().is_empty());
    }

    #[test]
    fn insufficient_answers_message() {
        let err = ProfileDerivationError::InsufficientAnswers("no buyer roles".to_string());
        assert!(err.to_string().contains("no buyer roles"));
    }
}
