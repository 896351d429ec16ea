//! AnswerField - typed addressing into the [`Answers`] aggregate.
//!
//! Every addressable answer has one variant here. The `answer_fields!` table
//! maps each variant to its dotted display path and to the struct field that
//! backs it, generating the getter and setter arms from a single row. Adding
//! a field to the aggregate without a row here is a compile-time gap rather
//! than a runtime "undefined path".

use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

use super::answers::{AnswerValue, Answers, FieldValue, Slot, ValueKind};

/// Generates `AnswerField` plus its path, kind, getter and setter tables.
///
/// Each row reads `Variant => "dotted.path", domain.attribute, Kind;`.
macro_rules! answer_fields {
    ($( $variant:ident => $path:literal, $domain:ident . $attr:ident, $kind:ident; )+) => {
        /// A single addressable field in the answers aggregate.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum AnswerField {
            $($variant,)+
        }

        impl AnswerField {
            /// Every field, in aggregate declaration order.
            pub const ALL: &'static [AnswerField] = &[$(AnswerField::$variant,)+];

            /// Dotted path used for display and lookup, e.g. `business.stage`.
            pub fn path(&self) -> &'static str {
                match self {
                    $(AnswerField::$variant => $path,)+
                }
            }

            /// The value kind this field stores.
            pub fn kind(&self) -> ValueKind {
                match self {
                    $(AnswerField::$variant => ValueKind::$kind,)+
                }
            }

            /// Reads the field's current value.
            pub fn get<'a>(&self, answers: &'a Answers) -> FieldValue<'a> {
                match self {
                    $(AnswerField::$variant => answers.$domain.$attr.view(),)+
                }
            }

            /// Writes a value, rejecting values of the wrong kind.
            pub fn set(
                &self,
                answers: &mut Answers,
                value: AnswerValue,
            ) -> Result<(), ValidationError> {
                match self {
                    $(AnswerField::$variant => answers.$domain.$attr.assign(value, $path),)+
                }
            }
        }
    };
}

answer_fields! {
    BusinessName => "business.name", business.name, Text;
    BusinessStage => "business.stage", business.stage, Text;
    BusinessIndustry => "business.industry", business.industry, Text;
    BusinessRevenueModel => "business.revenueModel", business.revenue_model, Text;
    BusinessPricing => "business.pricing", business.pricing, Price;

    ConfessionBiggestFear => "confession.biggestFear", confession.biggest_fear, Text;
    ConfessionPastFailures => "confession.pastFailures", confession.past_failures, List;
    ConfessionUnfairAdvantage => "confession.unfairAdvantage", confession.unfair_advantage, Text;

    CohortsPrimaryBuyer => "cohorts.primaryBuyer", cohorts.primary_buyer, Text;
    CohortsBuyerRoles => "cohorts.buyerRoles", cohorts.buyer_roles, List;
    CohortsCompanySize => "cohorts.companySize", cohorts.company_size, Text;
    CohortsPainPoints => "cohorts.painPoints", cohorts.pain_points, List;

    PositioningCategory => "positioning.category", positioning.category, Text;
    PositioningCategoryNarrative =>
        "positioning.categoryNarrative", positioning.category_narrative, Text;
    PositioningAlternatives => "positioning.alternatives", positioning.alternatives, List;
    PositioningDifferentiator => "positioning.differentiator", positioning.differentiator, Text;

    MessagingOneLiner => "messaging.oneLiner", messaging.one_liner, Text;
    MessagingValueRanking => "messaging.valueRanking", messaging.value_ranking, List;
    MessagingTone => "messaging.tone", messaging.tone, Text;
    MessagingBannedWords => "messaging.bannedWords", messaging.banned_words, List;

    GoalsPrimaryGoal => "goals.primaryGoal", goals.primary_goal, Text;
    GoalsNinetyDayTarget => "goals.ninetyDayTarget", goals.ninety_day_target, Text;
    GoalsChannels => "goals.channels", goals.channels, List;

    RealityMonthlyBudget => "reality.monthlyBudget", reality.monthly_budget, Text;
    RealityWeeklyHours => "reality.weeklyHours", reality.weekly_hours, Text;
    RealityConstraints => "reality.constraints", reality.constraints, List;

    ProofTestimonials => "proof.testimonials", proof.testimonials, List;
    ProofHeadlineMetric => "proof.headlineMetric", proof.headline_metric, Text;
    ProofCaseStudy => "proof.caseStudy", proof.case_study, Text;

    InsightsInterviewCount =>
        "customerInsights.interviewCount", customer_insights.interview_count, Text;
    InsightsTriggerEvent => "customerInsights.triggerEvent", customer_insights.trigger_event, Text;
    InsightsQuotes => "customerInsights.quotes", customer_insights.quotes, List;
}

impl AnswerField {
    /// Whether the field currently counts as answered.
    pub fn is_filled(&self, answers: &Answers) -> bool {
        self.get(answers).is_filled()
    }
}

impl Answers {
    /// Reads a field through its typed accessor.
    pub fn get(&self, field: AnswerField) -> FieldValue<'_> {
        field.get(self)
    }

    /// Writes a field through its typed accessor.
    pub fn set(&mut self, field: AnswerField, value: AnswerValue) -> Result<(), ValidationError> {
        field.set(self, value)
    }

    /// True when no field holds an answer.
    pub fn is_empty(&self) -> bool {
        AnswerField::ALL.iter().all(|f| !f.is_filled(self))
    }
}

impl fmt::Display for AnswerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for AnswerField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnswerField::ALL
            .iter()
            .find(|f| f.path() == s)
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format("field", format!("unknown answer path '{}'", s))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::questionnaire::answers::PriceRange;
    use std::collections::HashSet;

    #[test]
    fn paths_are_unique() {
        let paths: HashSet<_> = AnswerField::ALL.iter().map(|f| f.path()).collect();
        assert_eq!(paths.len(), AnswerField::ALL.len());
    }

    #[test]
    fn path_round_trips_through_from_str() {
        for field in AnswerField::ALL {
            assert_eq!(field.path().parse::<AnswerField>().unwrap(), *field);
        }
    }

    #[test]
    fn unknown_path_is_rejected() {
        assert!("business.nope".parse::<AnswerField>().is_err());
    }

    #[test]
    fn set_then_get_reads_the_backing_field() {
        let mut answers = Answers::default();
        answers
            .set(AnswerField::BusinessStage, AnswerValue::text("scaling"))
            .unwrap();
        assert_eq!(answers.business.stage, "scaling");
        assert_eq!(answers.get(AnswerField::BusinessStage).as_text(), Some("scaling"));
    }

    #[test]
    fn setter_rejects_wrong_kind() {
        let mut answers = Answers::default();
        let result = answers.set(AnswerField::GoalsChannels, AnswerValue::text("seo"));
        assert!(matches!(result, Err(ValidationError::KindMismatch { .. })));
        assert!(answers.goals.channels.is_empty());
    }

    #[test]
    fn price_field_accepts_range() {
        let mut answers = Answers::default();
        let range = PriceRange::new("USD", 99, 999).unwrap();
        answers
            .set(AnswerField::BusinessPricing, AnswerValue::Price(range.clone()))
            .unwrap();
        assert_eq!(answers.business.pricing, Some(range));
        assert!(AnswerField::BusinessPricing.is_filled(&answers));
    }

    #[test]
    fn kinds_match_backing_storage() {
        let answers = Answers::default();
        for field in AnswerField::ALL {
            let consistent = matches!(
                (field.kind(), field.get(&answers)),
                (ValueKind::Text, FieldValue::Text(_))
                    | (ValueKind::List, FieldValue::List(_))
                    | (ValueKind::Price, FieldValue::Price(_))
            );
            assert!(consistent, "kind mismatch for {}", field);
        }
    }

    #[test]
    fn fresh_answers_are_empty() {
        let mut answers = Answers::default();
        assert!(answers.is_empty());
        answers.business.name = "  ".to_string();
        assert!(answers.is_empty());
        answers.business.name = "Acme".to_string();
        assert!(!answers.is_empty());
    }
}
