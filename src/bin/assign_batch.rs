//! Batch assignment CLI
//!
//! Reads mentee and mentor survey exports, runs the matching pipeline, writes
//! the assignment file and prints a readable listing.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mentor_match::config::{ExhaustedPolicy, Settings};
use mentor_match::core::{MatchError, Matcher, RubricVariant};
use mentor_match::logging;
use mentor_match::services::{export_pairs, render_listing, ExportError, SurveyError, SurveyReader};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "mentor-match-batch")]
#[command(about = "Assign mentees to mentors from survey exports", long_about = None)]
struct Cli {
    /// Mentee survey export (CSV)
    #[arg(long)]
    mentees: PathBuf,

    /// Mentor survey export (CSV)
    #[arg(long)]
    mentors: PathBuf,

    /// Config file path (defaults to config/default.toml + config/local.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rubric preset, overriding configuration
    #[arg(long)]
    rubric: Option<RubricVariant>,

    /// Output directory, overriding configuration
    #[arg(long)]
    out_dir: Option<String>,

    /// Embed a timestamp in the output file name
    #[arg(long)]
    timestamp: bool,

    /// Fail instead of leaving mentees unmatched when mentors run out
    #[arg(long)]
    strict_pool: bool,

    /// Don't print the pair listing
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Error)]
enum BatchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Survey(#[from] SurveyError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), BatchError> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };

    logging::init(&settings.logging);

    if let Some(dir) = cli.out_dir {
        settings.output.dir = dir;
    }
    if cli.timestamp {
        settings.output.timestamped = true;
    }
    if cli.strict_pool {
        settings.matching.on_exhausted = ExhaustedPolicy::Fail;
    }

    let reader = SurveyReader::new(&settings.survey);
    let mentees = reader.read_path(&cli.mentees)?;
    let mentors = reader.read_path(&cli.mentors)?;

    let matcher = match cli.rubric {
        Some(variant) => Matcher::with_variant(variant),
        None => Matcher::new(settings.scoring.build_rubric()),
    };

    let run = matcher.run(&mentees, &mentors);

    if !run.outcome.is_complete() {
        if settings.matching.on_exhausted == ExhaustedPolicy::Fail {
            run.outcome.clone().into_complete()?;
        }
        for &mentee in &run.outcome.exhausted {
            if let Some(profile) = run.mentees.get(mentee) {
                tracing::warn!(
                    "Left unmatched: {} <{}>",
                    profile.full_name(),
                    profile.email
                );
            }
        }
    }

    let rows = run.rows();
    let path = export_pairs(&settings.output, &rows, &chrono::Local::now())?;

    if !cli.quiet {
        print!("{}", render_listing(&rows));
        println!("\n{} pairs written to {}", rows.len(), path.display());
    }

    Ok(())
}
