//! Mentor Match - compatibility scoring and greedy mentor assignment
//!
//! This library scores every mentee against every mentor with a configurable,
//! rule-based rubric and then assigns mentees to mentors greedily, highest
//! score first, within each mentor's capacity.

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_match_score, extract_profile, Matcher, Rubric, RubricVariant};
pub use models::{AssignmentPair, PairRow, Profile, RawProfile, SurveyField};
