use chrono::{DateTime, TimeZone};
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::OutputSettings;
use crate::models::PairRow;

/// Header row of the assignment file
pub const HEADER: [&str; 4] = ["Mentor Name", "Mentor Email", "Mentee Name", "Mentee Email"];

/// Errors that can occur while writing assignments
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write the header and one row per pair, in the order given
pub fn write_pairs<W: io::Write>(writer: W, rows: &[PairRow], delimiter: u8) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for row in rows {
        csv_writer.write_record([
            row.mentor_name.as_str(),
            row.mentor_email.as_str(),
            row.mentee_name.as_str(),
            row.mentee_email.as_str(),
        ])?;
    }

    csv_writer.flush().map_err(|source| ExportError::Io {
        path: "<writer>".to_string(),
        source,
    })
}

/// Where the assignment file goes; `stem-YYYYMMDDTHHMMSS.csv` when timestamped
pub fn output_path<Tz: TimeZone>(dir: &Path, stem: &str, timestamped: bool, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let name = if timestamped {
        format!("{}-{}.csv", stem, now.format("%Y%m%dT%H%M%S"))
    } else {
        format!("{}.csv", stem)
    };
    dir.join(name)
}

/// Write the assignment file described by `settings`, returning its path
pub fn export_pairs<Tz: TimeZone>(
    settings: &OutputSettings,
    rows: &[PairRow],
    now: &DateTime<Tz>,
) -> Result<PathBuf, ExportError>
where
    Tz::Offset: std::fmt::Display,
{
    let dir = Path::new(&settings.dir);
    let path = output_path(dir, &settings.file_stem, settings.timestamped, now);
    let io_error = |source| ExportError::Io {
        path: path.display().to_string(),
        source,
    };

    fs::create_dir_all(dir).map_err(io_error)?;
    let file = File::create(&path).map_err(io_error)?;
    write_pairs(file, rows, settings.delimiter_byte())?;

    tracing::info!("Wrote {} pairs to {}", rows.len(), path.display());
    Ok(path)
}

/// Human-readable listing of the same pairs, one line each
pub fn render_listing(rows: &[PairRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "{} <{}>  ->  {} <{}>  (score {})",
            row.mentor_name, row.mentor_email, row.mentee_name, row.mentee_email, row.score
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_row(mentee: usize, mentor: usize) -> PairRow {
        PairRow {
            mentee_index: mentee,
            mentor_index: mentor,
            score: 120,
            mentor_name: format!("Mentor {}", mentor),
            mentor_email: format!("mentor{}@example.edu", mentor),
            mentee_name: format!("Mentee {}", mentee),
            mentee_email: format!("mentee{}@example.edu", mentee),
        }
    }

    #[test]
    fn test_write_pairs_with_header() {
        let rows = vec![create_row(0, 1), create_row(1, 0)];
        let mut buffer = Vec::new();

        write_pairs(&mut buffer, &rows, b',').unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Mentor Name,Mentor Email,Mentee Name,Mentee Email");
        assert_eq!(lines[1], "Mentor 1,mentor1@example.edu,Mentee 0,mentee0@example.edu");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_space_delimiter_quotes_names() {
        let mut buffer = Vec::new();
        write_pairs(&mut buffer, &[create_row(0, 0)], b' ').unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("\"Mentor Name\" \"Mentor Email\""));
    }

    #[test]
    fn test_output_path_timestamp() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 5, 3).unwrap();
        let dir = Path::new("out");

        assert_eq!(output_path(dir, "matchings", false, &now), dir.join("matchings.csv"));
        assert_eq!(
            output_path(dir, "matchings", true, &now),
            dir.join("matchings-20261019T090503.csv")
        );
    }

    #[test]
    fn test_render_listing() {
        let listing = render_listing(&[create_row(0, 2)]);
        assert_eq!(
            listing,
            "Mentor 2 <mentor2@example.edu>  ->  Mentee 0 <mentee0@example.edu>  (score 120)\n"
        );
    }
}
