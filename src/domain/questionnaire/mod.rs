//! Questionnaire module - the foundation interview and its flow rules.
//!
//! - `registry` / `section` / `catalog` - the ordered, sectioned catalog
//! - `answers` / `field` - the answers aggregate and typed field access
//! - `navigation` - visible-question scanning
//! - `scoring` - clarity score and review summary
//! - `phase` / `flow` - the wizard phase machine and its pure reducer
//! - `state` / `events` - persisted snapshot and emitted events

mod answers;
pub mod catalog;
mod events;
mod field;
mod flow;
mod navigation;
mod phase;
mod question;
mod registry;
mod scoring;
mod section;
mod state;

pub use answers::{
    AnswerValue, Answers, BusinessAnswers, CohortAnswers, ConfessionAnswers,
    CustomerInsightAnswers, FieldValue, GoalAnswers, MessagingAnswers, PositioningAnswers,
    PriceRange, ProofAnswers, RealityAnswers, ValueKind,
};
pub use events::WizardEvent;
pub use field::AnswerField;
pub use flow::{committed_index, reduce, FlowCommand, FlowEffect, FlowStep};
pub use navigation::{Advance, Direction, NavTarget, NavigationEngine};
pub use phase::{TransitionStage, WizardPhase};
pub use question::{Condition, ConditionError, Question, QuestionKind};
pub use registry::QuestionRegistry;
pub use scoring::{ReviewSummary, ScoringEngine, SectionSummary};
pub use section::{Section, SectionId, SectionMap};
pub use state::WizardState;
