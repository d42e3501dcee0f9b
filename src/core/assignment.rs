use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::rubric::Rubric;
use crate::core::scoring::calculate_match_score;
use crate::models::{AssignmentPair, Profile};

/// Errors raised by the assignment engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("Mentor pool exhausted: {} mentee(s) left unassigned {mentees:?}", .mentees.len())]
    ExhaustedPool { mentees: Vec<usize> },

    #[error("Score matrix rows must all have {expected} columns, row {row} has {found}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Dense mentor-by-mentee score table, computed once before assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    mentors: usize,
    mentees: usize,
    cells: Vec<i32>,
}

impl ScoreMatrix {
    /// Score every (mentee, mentor) pair, mentee always first
    pub fn build(mentees: &[Profile], mentors: &[Profile], rubric: &Rubric) -> Self {
        let cells = mentors
            .iter()
            .flat_map(|mentor| {
                mentees
                    .iter()
                    .map(move |mentee| calculate_match_score(mentee, mentor, rubric))
            })
            .collect();

        Self {
            mentors: mentors.len(),
            mentees: mentees.len(),
            cells,
        }
    }

    /// Build from precomputed rows, one row per mentor
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, MatchError> {
        let mentors = rows.len();
        let mentees = rows.first().map_or(0, Vec::len);

        let mut cells = Vec::with_capacity(mentors * mentees);
        for (row, scores) in rows.into_iter().enumerate() {
            if scores.len() != mentees {
                return Err(MatchError::RaggedMatrix {
                    row,
                    expected: mentees,
                    found: scores.len(),
                });
            }
            cells.extend(scores);
        }

        Ok(Self { mentors, mentees, cells })
    }

    pub fn mentors(&self) -> usize {
        self.mentors
    }

    pub fn mentees(&self) -> usize {
        self.mentees
    }

    pub fn get(&self, mentor: usize, mentee: usize) -> Option<i32> {
        if mentor >= self.mentors || mentee >= self.mentees {
            return None;
        }
        self.cells.get(mentor * self.mentees + mentee).copied()
    }
}

/// Remaining capacity per mentor
///
/// A mentor whose counter reaches zero is out of the pool for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentorPool {
    remaining: Vec<u8>,
}

impl MentorPool {
    pub fn from_profiles(mentors: &[Profile]) -> Self {
        Self {
            remaining: mentors.iter().map(Profile::capacity).collect(),
        }
    }

    pub fn with_capacities(remaining: Vec<u8>) -> Self {
        Self { remaining }
    }

    pub fn remaining(&self, mentor: usize) -> u8 {
        self.remaining.get(mentor).copied().unwrap_or(0)
    }

    pub fn is_available(&self, mentor: usize) -> bool {
        self.remaining(mentor) > 0
    }

    /// Number of mentors still accepting mentees
    pub fn available(&self) -> usize {
        self.remaining.iter().filter(|&&left| left > 0).count()
    }

    fn claim(&mut self, mentor: usize) {
        if let Some(left) = self.remaining.get_mut(mentor) {
            *left = left.saturating_sub(1);
        }
    }
}

/// Result of one assignment pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    /// One pair per placed mentee, in mentee-index order
    pub pairs: Vec<AssignmentPair>,
    /// Mentees that found no mentor with capacity left
    pub exhausted: Vec<usize>,
}

impl AssignmentOutcome {
    pub fn is_complete(&self) -> bool {
        self.exhausted.is_empty()
    }

    pub fn into_complete(self) -> Result<Vec<AssignmentPair>, MatchError> {
        if self.exhausted.is_empty() {
            Ok(self.pairs)
        } else {
            Err(MatchError::ExhaustedPool {
                mentees: self.exhausted,
            })
        }
    }
}

/// Greedy assignment over a score matrix
///
/// Mentees are processed in index order; each takes the available mentor with
/// the highest score in its column, lowest mentor index winning ties. Nothing is
/// revisited once placed.
pub fn assign(matrix: &ScoreMatrix, pool: &mut MentorPool) -> AssignmentOutcome {
    let mut outcome = AssignmentOutcome {
        pairs: Vec::with_capacity(matrix.mentees()),
        exhausted: Vec::new(),
    };

    for mentee in 0..matrix.mentees() {
        match best_available_mentor(matrix, pool, mentee) {
            Some(mentor) => {
                pool.claim(mentor);
                tracing::trace!(
                    "Mentee {} -> mentor {} (capacity left: {})",
                    mentee,
                    mentor,
                    pool.remaining(mentor)
                );
                outcome.pairs.push(AssignmentPair { mentee, mentor });
            }
            None => {
                tracing::warn!("No mentor with remaining capacity for mentee {}", mentee);
                outcome.exhausted.push(mentee);
            }
        }
    }

    outcome
}

#[inline]
fn best_available_mentor(matrix: &ScoreMatrix, pool: &MentorPool, mentee: usize) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;

    for mentor in (0..matrix.mentors()).filter(|&mentor| pool.is_available(mentor)) {
        let Some(score) = matrix.get(mentor, mentee) else {
            continue;
        };
        // Strictly greater keeps the first (lowest-index) mentor on ties
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((mentor, score));
        }
    }

    best.map(|(mentor, _)| mentor)
}
