use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::RubricVariant;
use crate::models::domain::RawProfile;

/// Request to assign every mentee to a mentor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignRequest {
    #[validate(length(min = 1, max = 10000))]
    pub mentees: Vec<RawProfile>,
    #[validate(length(min = 1, max = 10000))]
    pub mentors: Vec<RawProfile>,
    /// Preset to use instead of the configured rubric
    #[serde(default)]
    pub rubric: Option<RubricVariant>,
}

/// Request to explain the score of a single pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub mentee: RawProfile,
    pub mentor: RawProfile,
    #[serde(default)]
    pub rubric: Option<RubricVariant>,
}
