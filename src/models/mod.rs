// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AssignmentPair, IdentityCategory, PairRow, Profile, Rank, RawProfile, SurveyField};
pub use requests::{AssignRequest, ScoreRequest};
pub use responses::{AssignResponse, ErrorResponse, HealthResponse};
