use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Every question the matching survey asks, plus identity fields used only for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyField {
    FirstName,
    LastName,
    Email,
    Schedule,
    School,
    Major,
    Minor,
    Certification,
    Clubs,
    Affiliations,
    Sports,
    AcademicPrograms,
    Nervousness,
    Drinking,
    Marijuana,
    Hobbies,
    SaturdayNight,
    SummerFrequency,
    SemesterFrequency,
    Relationship,
    GenderIdentity,
    Ethnicity,
    SexualOrientation,
    FirstGeneration,
    Religion,
    AbilityStatus,
    DietaryRestrictions,
    SharedIdentities,
    HometownState,
    HometownCountry,
    TransferStatus,
    RepeatMentor,
}

impl SurveyField {
    pub const ALL: [SurveyField; 32] = [
        SurveyField::FirstName,
        SurveyField::LastName,
        SurveyField::Email,
        SurveyField::Schedule,
        SurveyField::School,
        SurveyField::Major,
        SurveyField::Minor,
        SurveyField::Certification,
        SurveyField::Clubs,
        SurveyField::Affiliations,
        SurveyField::Sports,
        SurveyField::AcademicPrograms,
        SurveyField::Nervousness,
        SurveyField::Drinking,
        SurveyField::Marijuana,
        SurveyField::Hobbies,
        SurveyField::SaturdayNight,
        SurveyField::SummerFrequency,
        SurveyField::SemesterFrequency,
        SurveyField::Relationship,
        SurveyField::GenderIdentity,
        SurveyField::Ethnicity,
        SurveyField::SexualOrientation,
        SurveyField::FirstGeneration,
        SurveyField::Religion,
        SurveyField::AbilityStatus,
        SurveyField::DietaryRestrictions,
        SurveyField::SharedIdentities,
        SurveyField::HometownState,
        SurveyField::HometownCountry,
        SurveyField::TransferStatus,
        SurveyField::RepeatMentor,
    ];

    /// Stable snake_case identifier used in JSON payloads and config
    pub fn key(self) -> &'static str {
        match self {
            SurveyField::FirstName => "first_name",
            SurveyField::LastName => "last_name",
            SurveyField::Email => "email",
            SurveyField::Schedule => "schedule",
            SurveyField::School => "school",
            SurveyField::Major => "major",
            SurveyField::Minor => "minor",
            SurveyField::Certification => "certification",
            SurveyField::Clubs => "clubs",
            SurveyField::Affiliations => "affiliations",
            SurveyField::Sports => "sports",
            SurveyField::AcademicPrograms => "academic_programs",
            SurveyField::Nervousness => "nervousness",
            SurveyField::Drinking => "drinking",
            SurveyField::Marijuana => "marijuana",
            SurveyField::Hobbies => "hobbies",
            SurveyField::SaturdayNight => "saturday_night",
            SurveyField::SummerFrequency => "summer_frequency",
            SurveyField::SemesterFrequency => "semester_frequency",
            SurveyField::Relationship => "relationship",
            SurveyField::GenderIdentity => "gender_identity",
            SurveyField::Ethnicity => "ethnicity",
            SurveyField::SexualOrientation => "sexual_orientation",
            SurveyField::FirstGeneration => "first_generation",
            SurveyField::Religion => "religion",
            SurveyField::AbilityStatus => "ability_status",
            SurveyField::DietaryRestrictions => "dietary_restrictions",
            SurveyField::SharedIdentities => "shared_identities",
            SurveyField::HometownState => "hometown_state",
            SurveyField::HometownCountry => "hometown_country",
            SurveyField::TransferStatus => "transfer_status",
            SurveyField::RepeatMentor => "repeat_mentor",
        }
    }

    /// Column header the survey tool exports this question under
    pub fn default_column(self) -> &'static str {
        match self {
            SurveyField::FirstName => "FirstName",
            SurveyField::LastName => "LastName",
            SurveyField::Email => "NetIDEmail",
            SurveyField::Schedule => "Q9",
            SurveyField::School => "Q11",
            SurveyField::Major => "Q12",
            SurveyField::Minor => "Q13",
            SurveyField::Certification => "Q14",
            SurveyField::Clubs => "Q15",
            SurveyField::Affiliations => "Q16",
            SurveyField::Sports => "Q17",
            SurveyField::AcademicPrograms => "Q18",
            SurveyField::Nervousness => "Q19",
            SurveyField::Drinking => "Q21",
            SurveyField::Hobbies => "Q23",
            SurveyField::SaturdayNight => "Q26",
            SurveyField::SummerFrequency => "Q33",
            SurveyField::SemesterFrequency => "Q34",
            SurveyField::Relationship => "Q35",
            SurveyField::GenderIdentity => "Q36",
            SurveyField::Ethnicity => "Q37",
            SurveyField::SexualOrientation => "Q38",
            SurveyField::FirstGeneration => "Q39",
            SurveyField::Religion => "Q40",
            SurveyField::AbilityStatus => "Q41",
            SurveyField::DietaryRestrictions => "Q42",
            SurveyField::SharedIdentities => "Q47",
            SurveyField::Marijuana => "Marijuana",
            SurveyField::HometownState => "HometownState",
            SurveyField::HometownCountry => "HometownCountry",
            SurveyField::TransferStatus => "TransferStatus",
            SurveyField::RepeatMentor => "RepeatMentor",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl fmt::Display for SurveyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One survey response before normalization, keyed by `SurveyField::key`
///
/// Missing keys read as the empty string so extraction never has to deal with absence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProfile {
    fields: BTreeMap<String, String>,
}

impl RawProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, field: SurveyField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: SurveyField, value: impl Into<String>) {
        self.fields.insert(field.key().to_string(), value.into());
    }

    /// Trimmed value of a field, `""` when absent
    pub fn get(&self, field: SurveyField) -> &str {
        self.fields
            .get(field.key())
            .map(|value| value.trim())
            .unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(SurveyField, String)> for RawProfile {
    fn from_iter<I: IntoIterator<Item = (SurveyField, String)>>(iter: I) -> Self {
        let mut raw = RawProfile::new();
        for (field, value) in iter {
            raw.set(field, value);
        }
        raw
    }
}

/// Identity categories a mentee may ask to share with their mentor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityCategory {
    AbilityStatus,
    Ethnicity,
    DietaryRestrictions,
    FirstGeneration,
    GenderIdentity,
    Religion,
    SexualOrientation,
}

impl IdentityCategory {
    pub const ALL: [IdentityCategory; 7] = [
        IdentityCategory::AbilityStatus,
        IdentityCategory::Ethnicity,
        IdentityCategory::DietaryRestrictions,
        IdentityCategory::FirstGeneration,
        IdentityCategory::GenderIdentity,
        IdentityCategory::Religion,
        IdentityCategory::SexualOrientation,
    ];

    /// Answer label shown in the survey's opt-in question
    pub fn label(self) -> &'static str {
        match self {
            IdentityCategory::AbilityStatus => "Ability Status",
            IdentityCategory::Ethnicity => "Ethnicity/Race",
            IdentityCategory::DietaryRestrictions => "Dietary Restrictions",
            IdentityCategory::FirstGeneration => "First Generation and/or Limited Income Status",
            IdentityCategory::GenderIdentity => "Gender Identity",
            IdentityCategory::Religion => "Religion",
            IdentityCategory::SexualOrientation => "Sexual Orientation",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|category| category.label() == label)
    }

    /// Survey question holding this person's value for the category
    pub fn field(self) -> SurveyField {
        match self {
            IdentityCategory::AbilityStatus => SurveyField::AbilityStatus,
            IdentityCategory::Ethnicity => SurveyField::Ethnicity,
            IdentityCategory::DietaryRestrictions => SurveyField::DietaryRestrictions,
            IdentityCategory::FirstGeneration => SurveyField::FirstGeneration,
            IdentityCategory::GenderIdentity => SurveyField::GenderIdentity,
            IdentityCategory::Religion => SurveyField::Religion,
            IdentityCategory::SexualOrientation => SurveyField::SexualOrientation,
        }
    }
}

/// Small ordinal code for an ordered answer scale
///
/// `Rank::UNKNOWN` marks text that matched nothing in the vocabulary. It is never 0,
/// and distances involving it are undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(i8);

impl Rank {
    pub const UNKNOWN: Rank = Rank(-1);

    pub const fn new(value: u8) -> Self {
        debug_assert!(value <= i8::MAX as u8);
        Rank(value as i8)
    }

    pub fn value(self) -> Option<u8> {
        u8::try_from(self.0).ok()
    }

    pub fn is_known(self) -> bool {
        self.0 >= 0
    }

    /// Absolute rank difference, `None` when either side is unknown
    pub fn distance(self, other: Rank) -> Option<u8> {
        Some(self.value()?.abs_diff(other.value()?))
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::UNKNOWN
    }
}

/// Normalized, comparable view of one mentee or mentor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "timezoneOffset")]
    pub timezone_offset: i32,
    pub school: String,
    pub major: String,
    pub minor: String,
    pub certification: String,
    #[serde(rename = "hometownState")]
    pub hometown_state: String,
    #[serde(rename = "hometownCountry")]
    pub hometown_country: String,
    pub nervousness: String,
    #[serde(rename = "transferStatus")]
    pub transfer_status: String,
    #[serde(rename = "saturdayNight")]
    pub saturday_night: Rank,
    pub drinking: Rank,
    pub marijuana: Rank,
    pub relationship: Rank,
    #[serde(rename = "summerFrequency")]
    pub summer_frequency: Rank,
    #[serde(rename = "semesterFrequency")]
    pub semester_frequency: Rank,
    pub hobbies: BTreeSet<String>,
    #[serde(rename = "primaryInterests")]
    pub primary_interests: BTreeSet<String>,
    #[serde(rename = "secondaryInterests")]
    pub secondary_interests: BTreeSet<String>,
    #[serde(rename = "sharedIdentities")]
    pub shared_identities: BTreeSet<IdentityCategory>,
    pub identities: BTreeMap<IdentityCategory, String>,
    #[serde(rename = "repeatMentor")]
    pub repeat_mentor: bool,
}

impl Profile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Value the person gave for an identity category, `""` when unanswered
    pub fn identity(&self, category: IdentityCategory) -> &str {
        self.identities
            .get(&category)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// How many mentees this person can take on as a mentor
    pub fn capacity(&self) -> u8 {
        if self.repeat_mentor {
            2
        } else {
            1
        }
    }

    pub fn is_transfer_student(&self) -> bool {
        starts_with_ignore_case(&self.transfer_status, "yes")
    }

    pub fn closed_to_transfers(&self) -> bool {
        self.transfer_status.to_lowercase().contains("not open")
    }
}

pub(crate) fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// One mentee placed with one mentor, by positional index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentPair {
    #[serde(rename = "menteeIndex")]
    pub mentee: usize,
    #[serde(rename = "mentorIndex")]
    pub mentor: usize,
}

/// Assignment pair resolved to names and contact addresses for output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRow {
    #[serde(rename = "menteeIndex")]
    pub mentee_index: usize,
    #[serde(rename = "mentorIndex")]
    pub mentor_index: usize,
    pub score: i32,
    #[serde(rename = "mentorName")]
    pub mentor_name: String,
    #[serde(rename = "mentorEmail")]
    pub mentor_email: String,
    #[serde(rename = "menteeName")]
    pub mentee_name: String,
    #[serde(rename = "menteeEmail")]
    pub mentee_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_profile_missing_is_blank() {
        let raw = RawProfile::new().with(SurveyField::School, "  Engineering ");
        assert_eq!(raw.get(SurveyField::School), "Engineering");
        assert_eq!(raw.get(SurveyField::Major), "");
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in SurveyField::ALL {
            assert_eq!(SurveyField::from_key(field.key()), Some(field));
        }
        assert_eq!(SurveyField::from_key("nope"), None);
    }

    #[test]
    fn test_rank_distance() {
        assert_eq!(Rank::new(1).distance(Rank::new(4)), Some(3));
        assert_eq!(Rank::new(2).distance(Rank::UNKNOWN), None);
        assert_eq!(Rank::UNKNOWN.distance(Rank::UNKNOWN), None);
        assert!(!Rank::default().is_known());
    }

    #[test]
    fn test_rank_accepts_full_positive_range() {
        assert_eq!(Rank::new(127).value(), Some(127));
        assert!(Rank::new(0).is_known());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_rank_rejects_values_that_would_wrap() {
        let _ = Rank::new(200);
    }

    #[test]
    fn test_capacity_and_transfer_flags() {
        let mut profile = Profile {
            transfer_status: "Yes, I transferred".to_string(),
            ..Profile::default()
        };
        assert_eq!(profile.capacity(), 1);
        assert!(profile.is_transfer_student());

        profile.repeat_mentor = true;
        profile.transfer_status = "I am not open to mentoring transfers".to_string();
        assert_eq!(profile.capacity(), 2);
        assert!(profile.closed_to_transfers());
        assert!(!profile.is_transfer_student());
    }
}
