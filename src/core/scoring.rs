use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::rubric::{CategoricalField, OrdinalField, Rubric, Rule, SetField};
use crate::models::{Profile, Rank};

/// Calculate the compatibility score of a mentee with a mentor
///
/// The score is the signed sum of every rubric term. It is asymmetric: identity
/// sharing and the abstainer gates read the mentee's declared preferences only,
/// so arguments must always be passed mentee first.
pub fn calculate_match_score(mentee: &Profile, mentor: &Profile, rubric: &Rubric) -> i32 {
    rubric
        .rules
        .iter()
        .map(|rule| evaluate_rule(rule, mentee, mentor))
        .sum()
}

/// Contribution of one rubric term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreTerm {
    pub label: String,
    pub points: i32,
}

/// Per-term view of a score, in rubric order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub total: i32,
    pub terms: Vec<ScoreTerm>,
}

/// Same as [`calculate_match_score`], keeping each term's contribution
pub fn explain_match_score(mentee: &Profile, mentor: &Profile, rubric: &Rubric) -> ScoreBreakdown {
    let terms: Vec<ScoreTerm> = rubric
        .rules
        .iter()
        .map(|rule| ScoreTerm {
            label: rule.label(),
            points: evaluate_rule(rule, mentee, mentor),
        })
        .collect();

    ScoreBreakdown {
        total: terms.iter().map(|term| term.points).sum(),
        terms,
    }
}

/// Evaluate a single rule for a (mentee, mentor) pair
pub fn evaluate_rule(rule: &Rule, mentee: &Profile, mentor: &Profile) -> i32 {
    match rule {
        Rule::TimezoneGate { max_difference, penalty } => {
            let gap = mentee.timezone_offset.abs_diff(mentor.timezone_offset);
            if i64::from(gap) > i64::from(*max_difference) {
                *penalty
            } else {
                0
            }
        }

        Rule::SharedIdentity { mismatch, matched } => mentee
            .shared_identities
            .iter()
            .map(|category| {
                let wanted = mentee.identity(*category);
                if wanted.is_empty() {
                    0
                } else if wanted == mentor.identity(*category) {
                    *matched
                } else {
                    *mismatch
                }
            })
            .sum(),

        Rule::ExactMatch { field, bonus } => {
            let wanted = categorical(mentee, *field);
            if !wanted.is_empty() && wanted == categorical(mentor, *field) {
                *bonus
            } else {
                0
            }
        }

        Rule::TransferGate { penalty } => {
            if mentor.closed_to_transfers() && mentee.is_transfer_student() {
                *penalty
            } else {
                0
            }
        }

        Rule::Ordinal { field, band } => {
            band.points(ordinal(mentee, *field).distance(ordinal(mentor, *field)))
        }

        Rule::AbstainerGate { field, penalty, band } => {
            let mentee_rank = ordinal(mentee, *field);
            let mentor_rank = ordinal(mentor, *field);

            if mentee_rank.value() == Some(0) && mentor_rank.value().is_some_and(|rank| rank > 0) {
                *penalty
            } else {
                band.points(mentee_rank.distance(mentor_rank))
            }
        }

        Rule::Overlap { field, hit, miss } => {
            let theirs = set(mentor, *field);
            set(mentee, *field)
                .iter()
                .map(|item| if theirs.contains(item) { *hit } else { *miss })
                .sum()
        }

        Rule::Hometown { bonus } => {
            let state = !mentee.hometown_state.is_empty()
                && mentee.hometown_state == mentor.hometown_state;
            let country = !mentee.hometown_country.is_empty()
                && mentee.hometown_country == mentor.hometown_country;
            if state || country {
                *bonus
            } else {
                0
            }
        }
    }
}

#[inline]
fn categorical(profile: &Profile, field: CategoricalField) -> &str {
    match field {
        CategoricalField::School => &profile.school,
        CategoricalField::Major => &profile.major,
        CategoricalField::Minor => &profile.minor,
        CategoricalField::Certification => &profile.certification,
        CategoricalField::Nervousness => &profile.nervousness,
    }
}

#[inline]
fn ordinal(profile: &Profile, field: OrdinalField) -> Rank {
    match field {
        OrdinalField::SaturdayNight => profile.saturday_night,
        OrdinalField::Drinking => profile.drinking,
        OrdinalField::Marijuana => profile.marijuana,
        OrdinalField::Relationship => profile.relationship,
        OrdinalField::SummerFrequency => profile.summer_frequency,
        OrdinalField::SemesterFrequency => profile.semester_frequency,
    }
}

#[inline]
fn set(profile: &Profile, field: SetField) -> &BTreeSet<String> {
    match field {
        SetField::Hobbies => &profile.hobbies,
        SetField::PrimaryInterests => &profile.primary_interests,
        SetField::SecondaryInterests => &profile.secondary_interests,
    }
}
