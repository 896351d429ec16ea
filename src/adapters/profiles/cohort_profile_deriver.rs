//! Rule-based profile deriver: one segment per declared buyer role.

use async_trait::async_trait;

use crate::domain::questionnaire::Answers;
use crate::ports::{DerivedProfiles, ProfileDerivationError, ProfileDeriver, SegmentProfile};

/// Derives buyer segments directly from the cohort answers.
///
/// Each buyer role becomes a segment sharing the declared pain points and
/// the customer-insights trigger event. Without roles, the primary buyer
/// type stands in as a single segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct CohortProfileDeriver;

impl CohortProfileDeriver {
    pub fn new() -> Self {
        Self
    }

    fn segment(role: &str, answers: &Answers) -> SegmentProfile {
        let size = answers.cohorts.company_size.trim();
        let name = if size.is_empty() {
            role.to_string()
        } else {
            format!("{} ({})", role, size)
        };
        let trigger = answers.customer_insights.trigger_event.trim();

        SegmentProfile {
            name,
            role: role.to_string(),
            pains: answers.cohorts.pain_points.clone(),
            trigger: (!trigger.is_empty()).then(|| trigger.to_string()),
        }
    }
}

#[async_trait]
impl ProfileDeriver for CohortProfileDeriver {
    async fn derive(&self, answers: &Answers) -> Result<DerivedProfiles, ProfileDerivationError> {
        let roles: Vec<&str> = if answers.cohorts.buyer_roles.is_empty() {
            let primary = answers.cohorts.primary_buyer.trim();
            if primary.is_empty() {
                return Err(ProfileDerivationError::InsufficientAnswers(
                    "no buyer roles or primary buyer".to_string(),
                ));
            }
            vec![primary]
        } else {
            answers.cohorts.buyer_roles.iter().map(String::as_str).collect()
        };

        let segments: Vec<SegmentProfile> = roles
            .into_iter()
            .map(|role| Self::segment(role, answers))
            .collect();

        tracing::debug!(segments = segments.len(), "Derived buyer segments");
        Ok(DerivedProfiles { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn one_segment_per_buyer_role() {
        let mut answers = Answers::default();
        answers.cohorts.primary_buyer = "b2b".to_string();
        answers.cohorts.buyer_roles = vec!["Head of Ops".to_string(), "CFO".to_string()];
        answers.cohorts.company_size = "50-200".to_string();
        answers.cohorts.pain_points = vec!["manual reconciliation".to_string()];
        answers.customer_insights.trigger_event = "failed audit".to_string();

        let profiles = CohortProfileDeriver::new().derive(&answers).await.unwrap();

        assert_eq!(profiles.segments.len(), 2);
        assert_eq!(profiles.segments[0].name, "Head of Ops (50-200)");
        assert_eq!(profiles.segments[1].role, "CFO");
        assert_eq!(profiles.segments[1].pains, vec!["manual reconciliation"]);
        assert_eq!(profiles.segments[0].trigger.as_deref(), Some("failed audit"));
    }

    #[tokio::test]
    async fn falls_back_to_primary_buyer() {
        let mut answers = Answers::default();
        answers.cohorts.primary_buyer = "b2c".to_string();

        let profiles = CohortProfileDeriver::new().derive(&answers).await.unwrap();

        assert_eq!(profiles.segments.len(), 1);
        assert_eq!(profiles.segments[0].name, "b2c");
        assert!(profiles.segments[0].trigger.is_none());
    }

    #[tokio::test]
    async fn empty_cohorts_are_insufficient() {
        let result = CohortProfileDeriver::new().derive(&Answers::default()).await;
        assert!(matches!(result, Err(ProfileDerivationError::InsufficientAnswers(_))));
    }
}
