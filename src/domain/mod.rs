//! Domain layer containing the question-flow rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `questionnaire` - Catalog, navigation, scoring and the wizard phase machine

pub mod foundation;
pub mod questionnaire;
