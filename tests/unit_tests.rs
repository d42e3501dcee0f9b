// Unit tests for Mentor Match

use mentor_match::core::{
    extract::{extract_profile, parse_timezone_offset},
    rubric::{Rubric, RubricVariant},
    scoring::{calculate_match_score, explain_match_score},
};
use mentor_match::models::{IdentityCategory, Rank, RawProfile, SurveyField};

fn create_full_response() -> RawProfile {
    RawProfile::new()
        .with(SurveyField::FirstName, "Ana")
        .with(SurveyField::LastName, "Lopez")
        .with(SurveyField::Email, "al1@example.edu")
        .with(SurveyField::Schedule, "(GMT-5:00) Eastern Time (US & Canada)")
        .with(SurveyField::School, "College of Engineering")
        .with(SurveyField::Major, "Computer Science")
        .with(SurveyField::Minor, "Music")
        .with(SurveyField::Certification, "Entrepreneurship")
        .with(SurveyField::Clubs, "Robotics Club,Chess Club")
        .with(SurveyField::Affiliations, "Hispanic Student Association")
        .with(SurveyField::Sports, "Intramural Soccer")
        .with(SurveyField::AcademicPrograms, "Honors Program")
        .with(SurveyField::Nervousness, "3")
        .with(SurveyField::Drinking, "Yes, socially")
        .with(SurveyField::Marijuana, "No")
        .with(SurveyField::Hobbies, "Hiking,Cooking,Gaming")
        .with(SurveyField::SaturdayNight, "Watching a movie with my best friend")
        .with(SurveyField::SummerFrequency, "2-3 times over the summer")
        .with(SurveyField::SemesterFrequency, "A few times a month")
        .with(SurveyField::Relationship, "Catch up over coffee now and then")
        .with(SurveyField::SharedIdentities, "Ethnicity/Race,First Generation and/or Limited Income Status")
        .with(SurveyField::Ethnicity, "Hispanic/Latino")
        .with(SurveyField::FirstGeneration, "Yes")
        .with(SurveyField::HometownState, "Texas")
        .with(SurveyField::HometownCountry, "United States")
        .with(SurveyField::TransferStatus, "No")
}

#[test]
fn test_extract_full_response() {
    let profile = extract_profile(&create_full_response());

    assert_eq!(profile.full_name(), "Ana Lopez");
    assert_eq!(profile.timezone_offset, -5);
    assert_eq!(profile.drinking, Rank::new(1));
    assert_eq!(profile.marijuana, Rank::new(0));
    assert_eq!(profile.saturday_night, Rank::new(1));
    assert_eq!(profile.summer_frequency, Rank::new(1));
    assert_eq!(profile.semester_frequency, Rank::new(1));
    assert_eq!(profile.relationship, Rank::new(1));
    assert_eq!(profile.hobbies.len(), 3);
    assert!(profile.primary_interests.contains("Hispanic Student Association"));
    assert!(profile.secondary_interests.contains("Honors Program"));
    assert_eq!(profile.shared_identities.len(), 2);
    assert!(profile.shared_identities.contains(&IdentityCategory::FirstGeneration));
    assert_eq!(profile.capacity(), 1);
}

#[test]
fn test_unrecognised_ordinals_map_to_unknown() {
    let raw = create_full_response()
        .with(SurveyField::Drinking, "Prefer not to say")
        .with(SurveyField::SaturdayNight, "");
    let profile = extract_profile(&raw);

    assert_eq!(profile.drinking, Rank::UNKNOWN);
    assert_eq!(profile.saturday_night, Rank::UNKNOWN);
}

#[test]
fn test_timezone_without_marker_is_zero() {
    assert_eq!(parse_timezone_offset("Weekday evenings"), 0);
    assert_eq!(parse_timezone_offset("(GMT) Coordinated Universal Time"), 0);
}

#[test]
fn test_identical_profiles_score_highest() {
    let profile = extract_profile(&create_full_response());
    let rubric = Rubric::graduated();

    let breakdown = explain_match_score(&profile, &profile, &rubric);
    assert!(
        breakdown.terms.iter().all(|term| term.points >= 0),
        "No penalty should fire for identical profiles: {:?}",
        breakdown.terms
    );

    let mut other = profile.clone();
    other.school = "College of Arts".to_string();
    other.hobbies.clear();
    assert!(calculate_match_score(&profile, &other, &rubric) < breakdown.total);
}

#[test]
fn test_timezone_gap_of_five_is_penalised() {
    let mentee = extract_profile(&create_full_response());
    let mentor = extract_profile(
        &create_full_response().with(SurveyField::Schedule, "(GMT+0:00) London"),
    );
    let rubric = Rubric::graduated();

    let same = calculate_match_score(&mentee, &mentee, &rubric);
    assert_eq!(calculate_match_score(&mentee, &mentor, &rubric), same - 50);
}

#[test]
fn test_non_drinker_with_regular_drinker() {
    let mentee = extract_profile(&create_full_response().with(SurveyField::Drinking, "No"));
    let mentor = extract_profile(
        &create_full_response().with(SurveyField::Drinking, "Yes, regularly"),
    );

    let breakdown = explain_match_score(&mentee, &mentor, &Rubric::graduated());
    let drinking = breakdown
        .terms
        .iter()
        .find(|term| term.label == "drinking")
        .map(|term| term.points);

    assert_eq!(drinking, Some(-40));
}

#[test]
fn test_score_is_asymmetric() {
    let mentee = extract_profile(&create_full_response());
    let mentor = extract_profile(
        &create_full_response()
            .with(SurveyField::SharedIdentities, "None")
            .with(SurveyField::Ethnicity, "White"),
    );
    let rubric = Rubric::graduated();

    assert_ne!(
        calculate_match_score(&mentee, &mentor, &rubric),
        calculate_match_score(&mentor, &mentee, &rubric)
    );
}

#[test]
fn test_score_is_deterministic() {
    let mentee = extract_profile(&create_full_response());
    let mentor = extract_profile(&create_full_response().with(SurveyField::Major, "Physics"));

    for variant in [RubricVariant::Baseline, RubricVariant::Graduated, RubricVariant::Strict] {
        let rubric = variant.rubric();
        let first = calculate_match_score(&mentee, &mentor, &rubric);
        for _ in 0..10 {
            assert_eq!(calculate_match_score(&mentee, &mentor, &rubric), first);
        }
    }
}

#[test]
fn test_rubric_variants_weigh_differently() {
    let mentee = extract_profile(&create_full_response());
    let mentor = extract_profile(
        &create_full_response()
            .with(SurveyField::Hobbies, "Knitting")
            .with(SurveyField::Schedule, "(GMT+3:00) Moscow"),
    );

    let baseline = calculate_match_score(&mentee, &mentor, &Rubric::baseline());
    let graduated = calculate_match_score(&mentee, &mentor, &Rubric::graduated());
    let strict = calculate_match_score(&mentee, &mentor, &Rubric::strict());

    // Three hobby misses cost 15 more under the strict rubric, plus the lost identity bonus
    assert_eq!(graduated - strict, 15 + 40);
    assert_ne!(baseline, graduated);
}
