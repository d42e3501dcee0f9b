// Criterion benchmarks for Mentor Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mentor_match::core::{
    assignment::{assign, MentorPool, ScoreMatrix},
    extract::extract_profile,
    rubric::Rubric,
    scoring::calculate_match_score,
    Matcher,
};
use mentor_match::models::{Profile, RawProfile, SurveyField};

const HOBBIES: &[&str] = &["Hiking", "Cooking", "Gaming", "Reading", "Running", "Painting"];

fn create_response(id: usize) -> RawProfile {
    RawProfile::new()
        .with(SurveyField::FirstName, format!("User{}", id))
        .with(SurveyField::Schedule, format!("(GMT-{}:00) Somewhere", id % 8))
        .with(SurveyField::School, if id % 2 == 0 { "Engineering" } else { "Nursing" })
        .with(SurveyField::Hobbies, format!("{},{}", HOBBIES[id % 6], HOBBIES[(id + 3) % 6]))
        .with(SurveyField::Clubs, "Chess Club,Robotics")
        .with(SurveyField::Drinking, if id % 3 == 0 { "No" } else { "Yes, socially" })
        .with(SurveyField::SaturdayNight, "Large party")
        .with(SurveyField::SharedIdentities, "Religion")
        .with(SurveyField::RepeatMentor, if id % 4 == 0 { "Yes" } else { "No" })
}

fn create_profiles(count: usize) -> Vec<Profile> {
    (0..count).map(|i| extract_profile(&create_response(i))).collect()
}

fn bench_extract(c: &mut Criterion) {
    let raw = create_response(7);
    c.bench_function("extract_profile", |b| {
        b.iter(|| extract_profile(black_box(&raw)));
    });
}

fn bench_score(c: &mut Criterion) {
    let rubric = Rubric::graduated();
    let mentee = extract_profile(&create_response(1));
    let mentor = extract_profile(&create_response(2));

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(&mentee), black_box(&mentor), &rubric));
    });
}

fn bench_assignment(c: &mut Criterion) {
    let rubric = Rubric::graduated();
    let mut group = c.benchmark_group("assignment");

    for size in [10, 50, 100, 250].iter() {
        let mentees = create_profiles(*size);
        let mentors = create_profiles(*size);
        let matrix = ScoreMatrix::build(&mentees, &mentors, &rubric);

        group.bench_with_input(BenchmarkId::new("score_matrix", size), size, |b, _| {
            b.iter(|| ScoreMatrix::build(black_box(&mentees), black_box(&mentors), &rubric));
        });

        group.bench_with_input(BenchmarkId::new("greedy_assign", size), size, |b, _| {
            b.iter(|| {
                let mut pool = MentorPool::from_profiles(&mentors);
                assign(black_box(&matrix), &mut pool)
            });
        });
    }

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let matcher = Matcher::with_default_rubric();
    let mentees: Vec<RawProfile> = (0..100).map(create_response).collect();
    let mentors: Vec<RawProfile> = (100..200).map(create_response).collect();

    c.bench_function("pipeline_100x100", |b| {
        b.iter(|| matcher.run(black_box(&mentees), black_box(&mentors)));
    });
}

criterion_group!(
    benches,
    bench_extract,
    bench_score,
    bench_assignment,
    bench_pipeline
);

criterion_main!(benches);
