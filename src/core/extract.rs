use std::collections::{BTreeMap, BTreeSet};

use crate::core::ordinal;
use crate::models::domain::starts_with_ignore_case;
use crate::models::{IdentityCategory, Profile, RawProfile, SurveyField};

/// Offsets outside this range are not real timezones and parse as 0
const VALID_OFFSETS: std::ops::RangeInclusive<i32> = -12..=14;

/// Separator used by multi-select survey answers
pub const LIST_DELIMITER: char = ',';

/// Opt-in answer meaning "consider nothing"
const NO_IDENTITIES: &str = "None";

/// Normalize one survey response into a comparable profile
///
/// Every feature is always populated: blanks become `""`, empty sets,
/// `Rank::UNKNOWN` or a zero timezone offset.
pub fn extract_profile(raw: &RawProfile) -> Profile {
    let identities: BTreeMap<IdentityCategory, String> = IdentityCategory::ALL
        .into_iter()
        .map(|category| (category, raw.get(category.field()).to_string()))
        .filter(|(_, value)| !value.is_empty())
        .collect();

    Profile {
        first_name: raw.get(SurveyField::FirstName).to_string(),
        last_name: raw.get(SurveyField::LastName).to_string(),
        email: raw.get(SurveyField::Email).to_string(),
        timezone_offset: parse_timezone_offset(raw.get(SurveyField::Schedule)),
        school: raw.get(SurveyField::School).to_string(),
        major: raw.get(SurveyField::Major).to_string(),
        minor: raw.get(SurveyField::Minor).to_string(),
        certification: raw.get(SurveyField::Certification).to_string(),
        hometown_state: raw.get(SurveyField::HometownState).to_string(),
        hometown_country: raw.get(SurveyField::HometownCountry).to_string(),
        nervousness: raw.get(SurveyField::Nervousness).to_string(),
        transfer_status: raw.get(SurveyField::TransferStatus).to_string(),
        saturday_night: ordinal::SATURDAY_NIGHT.rank(raw.get(SurveyField::SaturdayNight)),
        drinking: ordinal::DRINKING.rank(raw.get(SurveyField::Drinking)),
        marijuana: ordinal::MARIJUANA.rank(raw.get(SurveyField::Marijuana)),
        relationship: ordinal::RELATIONSHIP.rank(raw.get(SurveyField::Relationship)),
        summer_frequency: ordinal::SUMMER_FREQUENCY.rank(raw.get(SurveyField::SummerFrequency)),
        semester_frequency: ordinal::SEMESTER_FREQUENCY
            .rank(raw.get(SurveyField::SemesterFrequency)),
        hobbies: split_list(raw.get(SurveyField::Hobbies)),
        primary_interests: union_lists(raw, SurveyField::Clubs, SurveyField::Affiliations),
        secondary_interests: union_lists(raw, SurveyField::AcademicPrograms, SurveyField::Sports),
        shared_identities: parse_shared_identities(raw.get(SurveyField::SharedIdentities)),
        identities,
        repeat_mentor: starts_with_ignore_case(raw.get(SurveyField::RepeatMentor), "yes"),
    }
}

/// Split a multi-select answer into a set of trimmed, non-empty items
pub fn split_list(text: &str) -> BTreeSet<String> {
    text.split(LIST_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn union_lists(raw: &RawProfile, a: SurveyField, b: SurveyField) -> BTreeSet<String> {
    let mut set = split_list(raw.get(a));
    set.extend(split_list(raw.get(b)));
    set
}

/// Identity categories the respondent wants considered when matching
///
/// `None` anywhere in the answer clears the selection.
pub fn parse_shared_identities(text: &str) -> BTreeSet<IdentityCategory> {
    let labels = split_list(text);
    if labels.contains(NO_IDENTITIES) {
        return BTreeSet::new();
    }

    labels
        .iter()
        .filter_map(|label| {
            let category = IdentityCategory::from_label(label);
            if category.is_none() {
                tracing::debug!("Ignoring unknown identity label: {}", label);
            }
            category
        })
        .collect()
}

/// Hours offset from a "(GMT-5:00) Eastern Time" style scheduling answer
///
/// Reads the signed integer between `GMT` and the next `:`. A missing marker,
/// empty remainder, unparseable number or out-of-range offset all yield 0.
pub fn parse_timezone_offset(text: &str) -> i32 {
    let Some((_, rest)) = text.split_once("GMT") else {
        return 0;
    };

    let hours = rest.split(':').next().unwrap_or("").trim();
    let hours = hours.strip_prefix('+').unwrap_or(hours);
    if hours.is_empty() {
        return 0;
    }

    match hours.parse::<i32>() {
        Ok(offset) if VALID_OFFSETS.contains(&offset) => offset,
        Ok(offset) => {
            tracing::debug!("Timezone offset {} out of range in {:?}", offset, text);
            0
        }
        Err(_) => {
            tracing::debug!("Unparseable timezone offset in {:?}", text);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rank;

    #[test]
    fn test_timezone_offsets() {
        assert_eq!(parse_timezone_offset("(GMT-5:00) Eastern Time"), -5);
        assert_eq!(parse_timezone_offset("(GMT+8:00) Beijing"), 8);
        assert_eq!(parse_timezone_offset("(GMT:00) London"), 0);
        assert_eq!(parse_timezone_offset("Eastern Time"), 0);
        assert_eq!(parse_timezone_offset(""), 0);
        assert_eq!(parse_timezone_offset("GMT-abc:00"), 0);
    }

    #[test]
    fn test_out_of_range_offsets_are_zero() {
        assert_eq!(parse_timezone_offset("(GMT-12:00) Baker Island"), -12);
        assert_eq!(parse_timezone_offset("(GMT+14:00) Kiribati"), 14);
        assert_eq!(parse_timezone_offset("(GMT+15:00) Nowhere"), 0);
        assert_eq!(parse_timezone_offset("(GMT+500:00) Nowhere"), 0);
        assert_eq!(parse_timezone_offset("(GMT+2000000000:00)"), 0);
        assert_eq!(parse_timezone_offset("(GMT-2147483648:00)"), 0);
        assert_eq!(parse_timezone_offset("(GMT+99999999999:00)"), 0);
    }

    #[test]
    fn test_split_list_trims_and_drops_blanks() {
        let set = split_list(" Chess, Hiking ,, Running ");
        assert_eq!(set.len(), 3);
        assert!(set.contains("Hiking"));
        assert!(split_list("").is_empty());
    }

    #[test]
    fn test_shared_identities() {
        let set = parse_shared_identities("Religion,Gender Identity,Favorite Color");
        assert_eq!(set.len(), 2);
        assert!(set.contains(&IdentityCategory::Religion));
        assert!(set.contains(&IdentityCategory::GenderIdentity));

        assert!(parse_shared_identities("Religion,None").is_empty());
        assert!(parse_shared_identities("").is_empty());
    }

    #[test]
    fn test_extract_blank_record() {
        let profile = extract_profile(&RawProfile::new());

        assert_eq!(profile.school, "");
        assert_eq!(profile.timezone_offset, 0);
        assert_eq!(profile.drinking, Rank::UNKNOWN);
        assert_eq!(profile.saturday_night, Rank::UNKNOWN);
        assert!(profile.hobbies.is_empty());
        assert!(profile.shared_identities.is_empty());
        assert!(profile.identities.is_empty());
        assert!(!profile.repeat_mentor);
    }

    #[test]
    fn test_extract_interest_unions() {
        let raw = RawProfile::new()
            .with(SurveyField::Clubs, "Chess Club, Robotics")
            .with(SurveyField::Affiliations, "Greek Life")
            .with(SurveyField::AcademicPrograms, "Honors")
            .with(SurveyField::Sports, "Rowing")
            .with(SurveyField::RepeatMentor, "Yes")
            .with(SurveyField::Religion, "Buddhist");

        let profile = extract_profile(&raw);

        assert_eq!(profile.primary_interests.len(), 3);
        assert!(profile.primary_interests.contains("Greek Life"));
        assert_eq!(profile.secondary_interests.len(), 2);
        assert!(profile.secondary_interests.contains("Rowing"));
        assert!(profile.repeat_mentor);
        assert_eq!(profile.identity(IdentityCategory::Religion), "Buddhist");
        assert_eq!(profile.identity(IdentityCategory::Ethnicity), "");
    }
}
