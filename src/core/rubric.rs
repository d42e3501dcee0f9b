//! Compatibility rubric as data
//!
//! A rubric is an ordered table of rules, each naming the feature it reads and
//! carrying its own weights. Presets cover the rubric generations used so far;
//! custom tables can be loaded from configuration without code changes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Points for an ordinal comparison by rank distance
///
/// Distances of 2 or more, and any comparison involving an unknown rank, score `far`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub exact: i32,
    pub near: i32,
    pub far: i32,
}

impl Band {
    pub const fn new(exact: i32, near: i32, far: i32) -> Self {
        Self { exact, near, far }
    }

    #[inline]
    pub fn points(&self, distance: Option<u8>) -> i32 {
        match distance {
            Some(0) => self.exact,
            Some(1) => self.near,
            _ => self.far,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    School,
    Major,
    Minor,
    Certification,
    Nervousness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrdinalField {
    SaturdayNight,
    Drinking,
    Marijuana,
    Relationship,
    SummerFrequency,
    SemesterFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetField {
    Hobbies,
    PrimaryInterests,
    SecondaryInterests,
}

/// One row of the rubric table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    /// Flat penalty when timezone offsets differ by more than `max_difference` hours
    TimezoneGate { max_difference: i32, penalty: i32 },
    /// Per identity category the mentee opted into
    SharedIdentity { mismatch: i32, matched: i32 },
    /// Bonus when both sides gave the same non-blank answer
    ExactMatch { field: CategoricalField, bonus: i32 },
    /// Penalty when a transfer mentee meets a mentor closed to transfers
    TransferGate { penalty: i32 },
    Ordinal { field: OrdinalField, band: Band },
    /// Ordinal comparison, except an abstaining mentee paired with a mentor who
    /// partakes scores `penalty` outright
    AbstainerGate {
        field: OrdinalField,
        penalty: i32,
        band: Band,
    },
    /// Per mentee item found (`hit`) or not found (`miss`) in the mentor's set
    Overlap { field: SetField, hit: i32, miss: i32 },
    /// Bonus when hometown state or country matches
    Hometown { bonus: i32 },
}

impl Rule {
    /// Short name used in score explanations
    pub fn label(&self) -> String {
        match self {
            Rule::TimezoneGate { .. } => "timezone".to_string(),
            Rule::SharedIdentity { .. } => "shared_identity".to_string(),
            Rule::ExactMatch { field, .. } => field_name(field),
            Rule::TransferGate { .. } => "transfer".to_string(),
            Rule::Ordinal { field, .. } | Rule::AbstainerGate { field, .. } => field_name(field),
            Rule::Overlap { field, .. } => field_name(field),
            Rule::Hometown { .. } => "hometown".to_string(),
        }
    }
}

fn field_name<T: Serialize>(field: &T) -> String {
    serde_json::to_value(field)
        .ok()
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_default()
}

/// Ordered rule table evaluated as a signed sum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubric {
    pub rules: Vec<Rule>,
}

impl Rubric {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The first-generation rubric: coarse terms, hobby misses penalised,
    /// identity sharing penalty-only
    pub fn baseline() -> Self {
        let mut rules = vec![
            Rule::TimezoneGate { max_difference: 3, penalty: -30 },
            Rule::SharedIdentity { mismatch: -50, matched: 0 },
        ];
        rules.extend(academic_rules());
        rules.extend([
            Rule::ExactMatch { field: CategoricalField::Nervousness, bonus: 20 },
            Rule::Ordinal { field: OrdinalField::SummerFrequency, band: Band::new(20, 0, 0) },
            Rule::Ordinal { field: OrdinalField::SemesterFrequency, band: Band::new(20, 0, 0) },
            Rule::Ordinal { field: OrdinalField::Relationship, band: Band::new(20, 20, 0) },
            Rule::AbstainerGate {
                field: OrdinalField::Drinking,
                penalty: -40,
                band: Band::new(30, 30, 0),
            },
            Rule::Overlap { field: SetField::Hobbies, hit: 5, miss: -5 },
            Rule::Overlap { field: SetField::PrimaryInterests, hit: 6, miss: 0 },
            Rule::Overlap { field: SetField::SecondaryInterests, hit: 3, miss: 0 },
            Rule::Ordinal { field: OrdinalField::SaturdayNight, band: Band::new(0, 0, -50) },
        ]);
        Self::new(rules)
    }

    /// Reference rubric: graduated frequency terms, identity bonuses,
    /// transfer, marijuana and hometown terms
    pub fn graduated() -> Self {
        Self::new(graduated_rules(20, 0))
    }

    /// Graduated rubric with penalty-only identity sharing and hobby misses penalised
    pub fn strict() -> Self {
        Self::new(graduated_rules(0, -5))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self::graduated()
    }
}

fn academic_rules() -> [Rule; 4] {
    [
        Rule::ExactMatch { field: CategoricalField::School, bonus: 50 },
        Rule::ExactMatch { field: CategoricalField::Major, bonus: 30 },
        Rule::ExactMatch { field: CategoricalField::Minor, bonus: 10 },
        Rule::ExactMatch { field: CategoricalField::Certification, bonus: 10 },
    ]
}

fn graduated_rules(identity_match: i32, hobby_miss: i32) -> Vec<Rule> {
    let frequency = Band::new(20, 10, -10);

    let mut rules = vec![
        Rule::TimezoneGate { max_difference: 3, penalty: -50 },
        Rule::SharedIdentity { mismatch: -50, matched: identity_match },
    ];
    rules.extend(academic_rules());
    rules.extend([
        Rule::TransferGate { penalty: -50 },
        Rule::ExactMatch { field: CategoricalField::Nervousness, bonus: 20 },
        Rule::Ordinal { field: OrdinalField::SummerFrequency, band: frequency },
        Rule::Ordinal { field: OrdinalField::SemesterFrequency, band: frequency },
        Rule::Ordinal { field: OrdinalField::Relationship, band: Band::new(20, 20, 0) },
        Rule::AbstainerGate {
            field: OrdinalField::Drinking,
            penalty: -40,
            band: Band::new(30, 30, 0),
        },
        Rule::AbstainerGate {
            field: OrdinalField::Marijuana,
            penalty: -20,
            band: Band::new(15, 15, 0),
        },
        Rule::Overlap { field: SetField::Hobbies, hit: 5, miss: hobby_miss },
        Rule::Overlap { field: SetField::PrimaryInterests, hit: 6, miss: 0 },
        Rule::Overlap { field: SetField::SecondaryInterests, hit: 3, miss: 0 },
        Rule::Ordinal { field: OrdinalField::SaturdayNight, band: Band::new(10, 0, -50) },
        Rule::Hometown { bonus: 10 },
    ]);
    rules
}

/// Named rubric presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricVariant {
    Baseline,
    #[default]
    Graduated,
    Strict,
}

impl RubricVariant {
    pub fn rubric(self) -> Rubric {
        match self {
            RubricVariant::Baseline => Rubric::baseline(),
            RubricVariant::Graduated => Rubric::graduated(),
            RubricVariant::Strict => Rubric::strict(),
        }
    }
}

impl fmt::Display for RubricVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RubricVariant::Baseline => write!(f, "baseline"),
            RubricVariant::Graduated => write!(f, "graduated"),
            RubricVariant::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for RubricVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "baseline" => Ok(RubricVariant::Baseline),
            "graduated" => Ok(RubricVariant::Graduated),
            "strict" => Ok(RubricVariant::Strict),
            _ => Err(format!(
                "Unknown rubric: {}. Use baseline, graduated, or strict.",
                s
            )),
        }
    }
}
