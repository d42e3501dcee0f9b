use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::config::SurveySettings;
use crate::models::{RawProfile, SurveyField};

/// Errors that can occur while reading a survey export
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("Failed to open survey export {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads survey tool CSV exports into raw profiles
///
/// Columns are located by header name. Absent columns and blank cells both read
/// as empty strings.
#[derive(Debug, Clone)]
pub struct SurveyReader {
    columns: Vec<(SurveyField, String)>,
    skip_rows: usize,
}

impl SurveyReader {
    pub fn new(settings: &SurveySettings) -> Self {
        Self {
            columns: SurveyField::ALL
                .into_iter()
                .map(|field| (field, settings.column_for(field).to_string()))
                .collect(),
            skip_rows: settings.skip_rows,
        }
    }

    pub fn read_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<RawProfile>, SurveyError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SurveyError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let profiles = self.read(file)?;
        tracing::info!("Loaded {} responses from {}", profiles.len(), path.display());
        Ok(profiles)
    }

    pub fn read<R: io::Read>(&self, reader: R) -> Result<Vec<RawProfile>, SurveyError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();

        // Resolve each field to its column position once
        let positions: Vec<(SurveyField, Option<usize>)> = self
            .columns
            .iter()
            .map(|(field, column)| {
                let position = headers.iter().position(|header| header.trim() == column.as_str());
                if position.is_none() {
                    tracing::warn!("Survey export has no {:?} column; {} will be blank", column, field);
                }
                (*field, position)
            })
            .collect();

        let mut profiles = Vec::new();
        for record in csv_reader.records().skip(self.skip_rows) {
            let record = record?;
            let raw: RawProfile = positions
                .iter()
                .map(|(field, position)| {
                    let value = position
                        .and_then(|index| record.get(index))
                        .unwrap_or("")
                        .to_string();
                    (*field, value)
                })
                .collect();
            profiles.push(raw);
        }

        Ok(profiles)
    }
}
