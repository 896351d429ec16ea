//! Foundation Flow - onboarding interview engine for marketing foundations.
//!
//! Drives a long, conditionally-branching interview: typed answers, skip-aware
//! navigation across sections, timed section interstitials, debounced
//! persistence and a weighted clarity score for the final review.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
