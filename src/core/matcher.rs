use crate::core::{
    assignment::{assign, AssignmentOutcome, MentorPool, ScoreMatrix},
    extract::extract_profile,
    rubric::{Rubric, RubricVariant},
    scoring::{calculate_match_score, explain_match_score, ScoreBreakdown},
};
use crate::models::{PairRow, Profile, RawProfile};

/// Everything produced by one matching run
#[derive(Debug, Clone)]
pub struct MatchRun {
    pub mentees: Vec<Profile>,
    pub mentors: Vec<Profile>,
    pub matrix: ScoreMatrix,
    pub outcome: AssignmentOutcome,
}

impl MatchRun {
    /// Assigned pairs resolved to names and addresses, in mentee order
    pub fn rows(&self) -> Vec<PairRow> {
        self.outcome
            .pairs
            .iter()
            .filter_map(|pair| {
                let mentee = self.mentees.get(pair.mentee)?;
                let mentor = self.mentors.get(pair.mentor)?;

                Some(PairRow {
                    mentee_index: pair.mentee,
                    mentor_index: pair.mentor,
                    score: self.matrix.get(pair.mentor, pair.mentee).unwrap_or_default(),
                    mentor_name: mentor.full_name(),
                    mentor_email: mentor.email.clone(),
                    mentee_name: mentee.full_name(),
                    mentee_email: mentee.email.clone(),
                })
            })
            .collect()
    }
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Feature extraction
/// 2. Score matrix (one score per mentee x mentor pair)
/// 3. Greedy capacity-limited assignment
#[derive(Debug, Clone)]
pub struct Matcher {
    rubric: Rubric,
}

impl Matcher {
    pub fn new(rubric: Rubric) -> Self {
        Self { rubric }
    }

    pub fn with_variant(variant: RubricVariant) -> Self {
        Self::new(variant.rubric())
    }

    pub fn with_default_rubric() -> Self {
        Self::new(Rubric::default())
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn score(&self, mentee: &Profile, mentor: &Profile) -> i32 {
        calculate_match_score(mentee, mentor, &self.rubric)
    }

    pub fn explain(&self, mentee: &Profile, mentor: &Profile) -> ScoreBreakdown {
        explain_match_score(mentee, mentor, &self.rubric)
    }

    /// Run the full pipeline over raw survey responses
    pub fn run(&self, mentees: &[RawProfile], mentors: &[RawProfile]) -> MatchRun {
        let mentees: Vec<Profile> = mentees.iter().map(extract_profile).collect();
        let mentors: Vec<Profile> = mentors.iter().map(extract_profile).collect();

        self.match_profiles(mentees, mentors)
    }

    /// Score and assign already-extracted profiles
    pub fn match_profiles(&self, mentees: Vec<Profile>, mentors: Vec<Profile>) -> MatchRun {
        tracing::debug!(
            "Scoring {} mentees against {} mentors with {} rubric rules",
            mentees.len(),
            mentors.len(),
            self.rubric.len()
        );

        let matrix = ScoreMatrix::build(&mentees, &mentors, &self.rubric);

        let mut pool = MentorPool::from_profiles(&mentors);
        let capacity: usize = mentors.iter().map(|m| usize::from(m.capacity())).sum();
        if capacity < mentees.len() {
            tracing::warn!(
                "Mentor capacity ({}) is below mentee count ({}); some mentees will go unmatched",
                capacity,
                mentees.len()
            );
        }

        let outcome = assign(&matrix, &mut pool);

        tracing::info!(
            "Assigned {} of {} mentees ({} mentors still available)",
            outcome.pairs.len(),
            mentees.len(),
            pool.available()
        );

        MatchRun {
            mentees,
            mentors,
            matrix,
            outcome,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_rubric()
    }
}
