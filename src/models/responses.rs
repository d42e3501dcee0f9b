use serde::{Deserialize, Serialize};
use crate::models::domain::PairRow;

/// Response for the assign endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignResponse {
    #[serde(rename = "runId")]
    pub run_id: String,
    pub pairs: Vec<PairRow>,
    /// Mentee indices left without a mentor
    pub exhausted: Vec<usize>,
    #[serde(rename = "totalMentees")]
    pub total_mentees: usize,
    #[serde(rename = "totalMentors")]
    pub total_mentors: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
