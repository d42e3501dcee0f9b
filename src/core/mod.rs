// Core algorithm exports
pub mod assignment;
pub mod extract;
pub mod matcher;
pub mod ordinal;
pub mod rubric;
pub mod scoring;

pub use assignment::{assign, AssignmentOutcome, MatchError, MentorPool, ScoreMatrix};
pub use extract::extract_profile;
pub use matcher::{MatchRun, Matcher};
pub use rubric::{Band, Rubric, RubricVariant, Rule};
pub use scoring::{calculate_match_score, explain_match_score, ScoreBreakdown, ScoreTerm};
