use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::core::{Rubric, RubricVariant, Rule};
use crate::models::SurveyField;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub survey: SurveySettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// What to do when mentors run out before mentees do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustedPolicy {
    #[default]
    LeaveUnmatched,
    Fail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default)]
    pub on_exhausted: ExhaustedPolicy,
    /// Largest mentee or mentor list accepted by one HTTP request
    #[serde(default = "default_max_population")]
    pub max_population: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            on_exhausted: ExhaustedPolicy::default(),
            max_population: default_max_population(),
        }
    }
}

fn default_max_population() -> usize { 2000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub rubric: RubricVariant,
    /// Custom rule table; replaces the preset when present
    #[serde(default)]
    pub rules: Option<Vec<Rule>>,
}

impl ScoringSettings {
    pub fn build_rubric(&self) -> Rubric {
        match &self.rules {
            Some(rules) if !rules.is_empty() => Rubric::new(rules.clone()),
            _ => self.rubric.rubric(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurveySettings {
    /// Rows after the header to discard (question text, import ids)
    #[serde(default = "default_skip_rows")]
    pub skip_rows: usize,
    /// Column header overrides keyed by survey field key
    #[serde(default)]
    pub columns: HashMap<String, String>,
}

impl Default for SurveySettings {
    fn default() -> Self {
        Self {
            skip_rows: default_skip_rows(),
            columns: HashMap::new(),
        }
    }
}

fn default_skip_rows() -> usize { 2 }

impl SurveySettings {
    /// Column header a field is read from
    pub fn column_for(&self, field: SurveyField) -> &str {
        self.columns
            .get(field.key())
            .map(String::as_str)
            .unwrap_or_else(|| field.default_column())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_dir")]
    pub dir: String,
    #[serde(default = "default_file_stem")]
    pub file_stem: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Embed a generation timestamp in the file name
    #[serde(default)]
    pub timestamped: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            file_stem: default_file_stem(),
            delimiter: default_delimiter(),
            timestamped: false,
        }
    }
}

fn default_output_dir() -> String { ".".to_string() }
fn default_file_stem() -> String { "matchings".to_string() }
fn default_delimiter() -> String { ",".to_string() }

impl OutputSettings {
    /// Single-byte delimiter for the CSV writer, `,` if misconfigured
    pub fn delimiter_byte(&self) -> u8 {
        match self.delimiter.as_bytes() {
            [byte] => *byte,
            _ => {
                tracing::warn!("Ignoring multi-byte output delimiter {:?}", self.delimiter);
                b','
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MENTOR_MATCH)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MENTOR_MATCH__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("MENTOR_MATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
