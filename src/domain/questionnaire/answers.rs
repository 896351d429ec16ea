//! Answers aggregate - everything collected during the onboarding interview.
//!
//! The aggregate is a nested record keyed by domain. Individual fields are
//! addressed through [`AnswerField`](super::AnswerField), never by string path.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// The complete set of onboarding responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Answers {
    pub business: BusinessAnswers,
    pub cohorts: CohortAnswers,
    pub positioning: PositioningAnswers,
    pub messaging: MessagingAnswers,
    pub confession: ConfessionAnswers,
    pub goals: GoalAnswers,
    pub reality: RealityAnswers,
    pub proof: ProofAnswers,
    pub customer_insights: CustomerInsightAnswers,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessAnswers {
    pub name: String,
    pub stage: String,
    pub industry: String,
    pub revenue_model: String,
    pub pricing: Option<PriceRange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfessionAnswers {
    pub biggest_fear: String,
    pub past_failures: Vec<String>,
    pub unfair_advantage: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CohortAnswers {
    pub primary_buyer: String,
    pub buyer_roles: Vec<String>,
    pub company_size: String,
    pub pain_points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PositioningAnswers {
    pub category: String,
    pub category_narrative: String,
    pub alternatives: Vec<String>,
    pub differentiator: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessagingAnswers {
    pub one_liner: String,
    pub value_ranking: Vec<String>,
    pub tone: String,
    pub banned_words: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalAnswers {
    pub primary_goal: String,
    pub ninety_day_target: String,
    pub channels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RealityAnswers {
    pub monthly_budget: String,
    pub weekly_hours: String,
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProofAnswers {
    pub testimonials: Vec<String>,
    pub headline_metric: String,
    pub case_study: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerInsightAnswers {
    pub interview_count: String,
    pub trigger_event: String,
    pub quotes: Vec<String>,
}

/// Price band for the offer, entered as a single structured answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub currency: String,
    pub low: u32,
    pub high: u32,
}

impl PriceRange {
    /// Creates a price range, rejecting inverted bounds and blank currency.
    pub fn new(currency: impl Into<String>, low: u32, high: u32) -> Result<Self, ValidationError> {
        let currency = currency.into();
        if currency.trim().is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        if low > high {
            return Err(ValidationError::invalid_format(
                "price_range",
                format!("low bound {} exceeds high bound {}", low, high),
            ));
        }
        Ok(Self {
            currency,
            low,
            high,
        })
    }
}

/// The shape of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    List,
    Price,
}

impl ValueKind {
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::List => "list",
            ValueKind::Price => "price",
        }
    }
}

/// An owned value written into the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    List(Vec<String>),
    Price(PriceRange),
    /// Resets the field to its empty value regardless of kind.
    Empty,
}

impl AnswerValue {
    pub fn text(value: impl Into<String>) -> Self {
        AnswerValue::Text(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AnswerValue::List(values.into_iter().map(Into::into).collect())
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            AnswerValue::Text(_) => "text",
            AnswerValue::List(_) => "list",
            AnswerValue::Price(_) => "price",
            AnswerValue::Empty => "empty",
        }
    }
}

/// A borrowed view of one field's current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    List(&'a [String]),
    Price(Option<&'a PriceRange>),
}

impl FieldValue<'_> {
    /// Whether the value counts as answered.
    ///
    /// Lists must be non-empty, text must have non-whitespace content,
    /// structured values must be present.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.trim().is_empty(),
            FieldValue::List(items) => !items.is_empty(),
            FieldValue::Price(range) => range.is_some(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Storage slot for a single answer; one impl per value kind.
pub(crate) trait Slot {
    fn view(&self) -> FieldValue<'_>;
    fn assign(&mut self, value: AnswerValue, path: &'static str) -> Result<(), ValidationError>;
}

impl Slot for String {
    fn view(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }

    fn assign(&mut self, value: AnswerValue, path: &'static str) -> Result<(), ValidationError> {
        match value {
            AnswerValue::Text(s) => *self = s,
            AnswerValue::Empty => self.clear(),
            other => return Err(ValidationError::kind_mismatch(path, "text", other.kind_name())),
        }
        Ok(())
    }
}

impl Slot for Vec<String> {
    fn view(&self) -> FieldValue<'_> {
        FieldValue::List(self)
    }

    fn assign(&mut self, value: AnswerValue, path: &'static str) -> Result<(), ValidationError> {
        match value {
            AnswerValue::List(items) => {
                *self = items
                    .into_iter()
                    .map(|item| item.trim().to_string())
                    .filter(|item| !item.is_empty())
                    .collect();
            }
            AnswerValue::Empty => self.clear(),
            other => return Err(ValidationError::kind_mismatch(path, "list", other.kind_name())),
        }
        Ok(())
    }
}

impl Slot for Option<PriceRange> {
    fn view(&self) -> FieldValue<'_> {
        FieldValue::Price(self.as_ref())
    }

    fn assign(&mut self, value: AnswerValue, path: &'static str) -> Result<(), ValidationError> {
        match value {
            AnswerValue::Price(range) => *self = Some(range),
            AnswerValue::Empty => *self = None,
            other => return Err(ValidationError::kind_mismatch(path, "price", other.kind_name())),
        }
        Ok(())
    }
}
