//! The shipped marketing-foundation interview.
//!
//! Section order: business basics, confession, buyers, positioning,
//! messaging, goals, reality check, proof, customer insights.

use super::answers::Answers;
use super::field::AnswerField;
use super::question::{ConditionError, Question, QuestionKind};
use super::section::{Section, SectionId};

pub const BUSINESS: SectionId = SectionId::new("business");
pub const CONFESSION: SectionId = SectionId::new("confession");
pub const COHORTS: SectionId = SectionId::new("cohorts");
pub const POSITIONING: SectionId = SectionId::new("positioning");
pub const MESSAGING: SectionId = SectionId::new("messaging");
pub const GOALS: SectionId = SectionId::new("goals");
pub const REALITY: SectionId = SectionId::new("reality");
pub const PROOF: SectionId = SectionId::new("proof");
pub const CUSTOMER_INSIGHTS: SectionId = SectionId::new("customer-insights");

const STAGES: &[&str] = &["idea", "pre-revenue", "early-revenue", "scaling"];
const REVENUE_MODELS: &[&str] =
    &["subscription", "one-time", "services", "marketplace", "not-sure"];
const BUYER_TYPES: &[&str] = &["b2b", "b2c", "both"];
const CATEGORY_STANCES: &[&str] = &["existing", "adjacent", "new"];
const INTERVIEW_COUNTS: &[&str] = &["0", "1-5", "6-20", "20+"];

pub fn sections() -> Vec<Section> {
    vec![
        Section::new(
            BUSINESS.as_str(),
            "The Business",
            "Let's start with the basics",
            "What you sell and where you are today",
        ),
        Section::new(
            CONFESSION.as_str(),
            "The Confession",
            "What hasn't worked",
            "Honest answers here save months later",
        ),
        Section::new(
            COHORTS.as_str(),
            "Your Buyers",
            "Who actually pays you",
            "The people behind the purchase decision",
        ),
        Section::new(
            POSITIONING.as_str(),
            "Positioning",
            "Where you fit in the market",
            "Category, alternatives and what sets you apart",
        ),
        Section::new(
            MESSAGING.as_str(),
            "Messaging",
            "How you say it",
            "The words your buyers should remember",
        ),
        Section::new(
            GOALS.as_str(),
            "Goals",
            "What winning looks like",
            "The next ninety days, concretely",
        ),
        Section::new(
            REALITY.as_str(),
            "Reality Check",
            "What you have to work with",
            "Budget, time and hard constraints",
        ),
        Section::new(
            PROOF.as_str(),
            "Proof",
            "Why anyone should believe you",
            "Results, testimonials and stories",
        ),
        Section::new(
            CUSTOMER_INSIGHTS.as_str(),
            "Customer Insights",
            "What customers told you",
            "Moments and words straight from the source",
        ),
    ]
}

pub fn questions() -> Vec<Question> {
    use AnswerField as F;
    use QuestionKind as K;

    vec![
        // Business basics
        Question::new(
            "business-name",
            F::BusinessName,
            BUSINESS,
            K::ShortText,
            "What's the name of your business?",
        )
        .required(),
        Question::new(
            "business-stage",
            F::BusinessStage,
            BUSINESS,
            K::SingleChoice,
            "Where is the business today?",
        )
        .required()
        .with_options(STAGES),
        Question::new(
            "business-industry",
            F::BusinessIndustry,
            BUSINESS,
            K::SingleChoice,
            "Which industry are you in?",
        )
        .required()
        .with_options(&["saas", "ecommerce", "agency", "health", "education", "fintech", "other"]),
        Question::new(
            "business-revenue-model",
            F::BusinessRevenueModel,
            BUSINESS,
            K::SingleChoice,
            "How do you make money?",
        )
        .required()
        .with_options(REVENUE_MODELS),
        Question::new(
            "business-pricing",
            F::BusinessPricing,
            BUSINESS,
            K::Pricing,
            "What's your price range?",
        )
        .when(has_list_price)
        .with_micro_prompts(&[
            "Rough numbers are fine",
            "Use your most common plan as the low end",
        ]),
        // Confession
        Question::new(
            "confession-biggest-fear",
            F::ConfessionBiggestFear,
            CONFESSION,
            K::LongText,
            "What keeps you up at night about marketing?",
        )
        .with_micro_prompts(&["No one reads this but you and your strategist"]),
        Question::new(
            "confession-past-failures",
            F::ConfessionPastFailures,
            CONFESSION,
            K::MultiChoice,
            "Which channels have you tried that didn't work?",
        )
        .when(has_operating_history)
        .with_options(&["paid-ads", "cold-outreach", "content", "partnerships", "events", "seo"]),
        Question::new(
            "confession-unfair-advantage",
            F::ConfessionUnfairAdvantage,
            CONFESSION,
            K::LongText,
            "What do you have that competitors can't copy?",
        )
        .required()
        .with_micro_prompts(&["Think access, expertise, data or relationships"]),
        // Buyers
        Question::new(
            "cohorts-primary-buyer",
            F::CohortsPrimaryBuyer,
            COHORTS,
            K::SingleChoice,
            "Do you sell to businesses or consumers?",
        )
        .required()
        .with_options(BUYER_TYPES),
        Question::new(
            "cohorts-buyer-roles",
            F::CohortsBuyerRoles,
            COHORTS,
            K::MultiChoice,
            "Which roles sign off on the purchase?",
        )
        .required()
        .when(sells_to_businesses)
        .with_options(&[
            "founder",
            "marketing-lead",
            "engineering-lead",
            "operations",
            "finance",
            "procurement",
        ]),
        Question::new(
            "cohorts-company-size",
            F::CohortsCompanySize,
            COHORTS,
            K::SingleChoice,
            "How big are the companies you sell to?",
        )
        .when(sells_to_businesses)
        .with_options(&["1-10", "11-50", "51-200", "201-1000", "1000+"]),
        Question::new(
            "cohorts-pain-points",
            F::CohortsPainPoints,
            COHORTS,
            K::MultiChoice,
            "What problems push buyers to look for you?",
        )
        .required()
        .with_micro_prompts(&["Use their words, not yours"]),
        // Positioning
        Question::new(
            "positioning-category",
            F::PositioningCategory,
            POSITIONING,
            K::SingleChoice,
            "Are you entering an existing category or creating one?",
        )
        .required()
        .with_options(CATEGORY_STANCES),
        Question::new(
            "positioning-category-narrative",
            F::PositioningCategoryNarrative,
            POSITIONING,
            K::LongText,
            "Describe the new category in one paragraph",
        )
        .when(creates_category),
        Question::new(
            "positioning-alternatives",
            F::PositioningAlternatives,
            POSITIONING,
            K::MultiChoice,
            "What would buyers use if you didn't exist?",
        )
        .with_micro_prompts(&["Spreadsheets and doing nothing count"]),
        Question::new(
            "positioning-differentiator",
            F::PositioningDifferentiator,
            POSITIONING,
            K::LongText,
            "Why do buyers pick you over those alternatives?",
        )
        .required(),
        // Messaging
        Question::new(
            "messaging-one-liner",
            F::MessagingOneLiner,
            MESSAGING,
            K::ShortText,
            "Explain what you do in one sentence",
        )
        .required()
        .with_micro_prompts(&["We help [who] do [what] without [pain]"]),
        Question::new(
            "messaging-value-ranking",
            F::MessagingValueRanking,
            MESSAGING,
            K::Ranking,
            "Rank what buyers value most",
        )
        .with_options(&["speed", "price", "quality", "support", "simplicity", "integrations"]),
        Question::new(
            "messaging-tone",
            F::MessagingTone,
            MESSAGING,
            K::SingleChoice,
            "How should your brand sound?",
        )
        .with_options(&["bold", "warm", "expert", "playful", "minimal"]),
        Question::new(
            "messaging-banned-words",
            F::MessagingBannedWords,
            MESSAGING,
            K::MultiChoice,
            "Any words you never want to use?",
        ),
        // Goals
        Question::new(
            "goals-primary",
            F::GoalsPrimaryGoal,
            GOALS,
            K::SingleChoice,
            "What's the one goal for the next quarter?",
        )
        .required()
        .with_options(&["awareness", "leads", "revenue", "retention"]),
        Question::new(
            "goals-ninety-day-target",
            F::GoalsNinetyDayTarget,
            GOALS,
            K::ShortText,
            "What number would make the next 90 days a win?",
        )
        .required(),
        Question::new(
            "goals-channels",
            F::GoalsChannels,
            GOALS,
            K::MultiChoice,
            "Which channels do you want to focus on?",
        )
        .with_options(&[
            "seo",
            "paid-social",
            "paid-search",
            "email",
            "community",
            "partnerships",
            "events",
        ]),
        // Reality check
        Question::new(
            "reality-monthly-budget",
            F::RealityMonthlyBudget,
            REALITY,
            K::SingleChoice,
            "What can you spend on marketing each month?",
        )
        .required()
        .with_options(&["0", "under-1k", "1k-5k", "5k-20k", "20k+"]),
        Question::new(
            "reality-weekly-hours",
            F::RealityWeeklyHours,
            REALITY,
            K::SingleChoice,
            "How many hours a week can the team give marketing?",
        )
        .with_options(&["under-5", "5-10", "10-20", "20+"]),
        Question::new(
            "reality-constraints",
            F::RealityConstraints,
            REALITY,
            K::MultiChoice,
            "Anything we must work around?",
        )
        .with_options(&[
            "regulated-industry",
            "long-sales-cycle",
            "no-designer",
            "no-writer",
            "seasonal-demand",
        ]),
        // Proof
        Question::new(
            "proof-testimonials",
            F::ProofTestimonials,
            PROOF,
            K::MultiChoice,
            "Paste your best testimonials",
        )
        .when(has_customers),
        Question::new(
            "proof-headline-metric",
            F::ProofHeadlineMetric,
            PROOF,
            K::ShortText,
            "What result are you proudest of?",
        )
        .when(has_customers)
        .with_micro_prompts(&["A number beats an adjective"]),
        Question::new(
            "proof-case-study",
            F::ProofCaseStudy,
            PROOF,
            K::LongText,
            "Tell the story behind one of those testimonials",
        )
        .when(has_testimonials),
        // Customer insights
        Question::new(
            "insights-interview-count",
            F::InsightsInterviewCount,
            CUSTOMER_INSIGHTS,
            K::SingleChoice,
            "How many customers have you interviewed?",
        )
        .required()
        .with_options(INTERVIEW_COUNTS),
        Question::new(
            "insights-trigger-event",
            F::InsightsTriggerEvent,
            CUSTOMER_INSIGHTS,
            K::LongText,
            "What happened right before customers started looking?",
        )
        .when(has_interviews),
        Question::new(
            "insights-quotes",
            F::InsightsQuotes,
            CUSTOMER_INSIGHTS,
            K::MultiChoice,
            "Exact phrases customers used",
        )
        .when(has_interviews)
        .with_micro_prompts(&["Copy them word for word"]),
    ]
}

/// Rejects answers outside the option list so a malformed value is surfaced
/// as a condition defect instead of silently matching nothing.
fn choice<'a>(
    field: &'static str,
    value: &'a str,
    allowed: &[&'static str],
) -> Result<Option<&'a str>, ConditionError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    if allowed.iter().any(|option| *option == value) {
        Ok(Some(value))
    } else {
        Err(ConditionError::UnexpectedValue {
            field,
            value: value.to_string(),
        })
    }
}

fn has_list_price(a: &Answers) -> Result<bool, ConditionError> {
    let model = choice("business.revenueModel", &a.business.revenue_model, REVENUE_MODELS)?;
    Ok(matches!(model, Some("subscription" | "one-time" | "services")))
}

fn has_operating_history(a: &Answers) -> Result<bool, ConditionError> {
    let stage = choice("business.stage", &a.business.stage, STAGES)?;
    Ok(matches!(stage, Some(s) if s != "idea"))
}

fn has_customers(a: &Answers) -> Result<bool, ConditionError> {
    let stage = choice("business.stage", &a.business.stage, STAGES)?;
    Ok(matches!(stage, Some("early-revenue" | "scaling")))
}

fn sells_to_businesses(a: &Answers) -> Result<bool, ConditionError> {
    let buyer = choice("cohorts.primaryBuyer", &a.cohorts.primary_buyer, BUYER_TYPES)?;
    Ok(matches!(buyer, Some("b2b" | "both")))
}

fn creates_category(a: &Answers) -> Result<bool, ConditionError> {
    let stance = choice("positioning.category", &a.positioning.category, CATEGORY_STANCES)?;
    Ok(stance == Some("new"))
}

fn has_testimonials(a: &Answers) -> Result<bool, ConditionError> {
    Ok(has_customers(a)? && !a.proof.testimonials.is_empty())
}

fn has_interviews(a: &Answers) -> Result<bool, ConditionError> {
    let count = choice(
        "customerInsights.interviewCount",
        &a.customer_insights.interview_count,
        INTERVIEW_COUNTS,
    )?;
    Ok(matches!(count, Some(c) if c != "0"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pricing_shown_only_for_priced_models() {
        let mut a = Answers::default();
        assert_eq!(has_list_price(&a), Ok(false));
        a.business.revenue_model = "subscription".to_string();
        assert_eq!(has_list_price(&a), Ok(true));
        a.business.revenue_model = "marketplace".to_string();
        assert_eq!(has_list_price(&a), Ok(false));
    }

    #[test]
    fn unknown_choice_is_a_condition_defect() {
        let mut a = Answers::default();
        a.business.revenue_model = "barter".to_string();
        assert!(matches!(
            has_list_price(&a),
            Err(ConditionError::UnexpectedValue { field: "business.revenueModel", .. })
        ));
    }

    #[test]
    fn b2b_questions_follow_buyer_type() {
        let mut a = Answers::default();
        a.cohorts.primary_buyer = "b2c".to_string();
        assert_eq!(sells_to_businesses(&a), Ok(false));
        a.cohorts.primary_buyer = "both".to_string();
        assert_eq!(sells_to_businesses(&a), Ok(true));
    }

    #[test]
    fn case_study_needs_customers_and_testimonials() {
        let mut a = Answers::default();
        a.proof.testimonials = vec!["Great".to_string()];
        assert_eq!(has_testimonials(&a), Ok(false));
        a.business.stage = "scaling".to_string();
        assert_eq!(has_testimonials(&a), Ok(true));
    }

    #[test]
    fn interview_follow_ups_hidden_at_zero() {
        let mut a = Answers::default();
        a.customer_insights.interview_count = "0".to_string();
        assert_eq!(has_interviews(&a), Ok(false));
        a.customer_insights.interview_count = "6-20".to_string();
        assert_eq!(has_interviews(&a), Ok(true));
    }
}
