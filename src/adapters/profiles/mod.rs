//! Profile Adapters
//!
//! Implementations of the ProfileDeriver port.

mod cohort_profile_deriver;

pub use cohort_profile_deriver::CohortProfileDeriver;
