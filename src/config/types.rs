use std::collections::HashSet;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "langCodes[1]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Project settings read from `.csv2json.json`.
///
/// Every field is optional in the file; command-line options override them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSettings {
    pub csv: Option<PathBuf>,
    pub template: PathBuf,
    pub output_dir: PathBuf,

    /// Only this top-level key of the template is merged.
    pub group_key: Option<String>,

    /// Trim whitespace around every CSV cell.
    pub trim: bool,

    /// Language codes in CSV column order. The first one is the source language.
    pub lang_codes: Vec<String>,

    /// Fill untranslated leaves with the template text instead of leaving them empty.
    pub use_template_as_default: bool,

    pub scoring: ScoringConfig,
}

/// Heuristic constants of duplicate-source disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    /// Rows (CSV) or string siblings (JSON) considered on each side.
    pub context_radius: usize,
    pub overlap_weight: f64,
    pub edge_bonus: f64,
    /// Rows up to this index count as "near the start" of the CSV.
    pub start_row_threshold: usize,
    /// Rows from this index on count as "near the end" of the CSV.
    pub end_row_threshold: usize,
    pub proximity_window: usize,
    /// Below this best score the context is ignored and candidates are taken in row order.
    pub min_score: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            context_radius: 2,
            overlap_weight: 10.0,
            edge_bonus: 2.0,
            start_row_threshold: 3,
            end_row_threshold: 120,
            proximity_window: 3,
            min_score: 1.0,
        }
    }
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            csv: None,
            template: PathBuf::from("./zh.json"),
            output_dir: PathBuf::from("./"),
            group_key: None,
            trim: false,
            lang_codes: vec!["zh".to_string(), "en".to_string()],
            use_template_as_default: false,
            scoring: ScoringConfig::default(),
        }
    }
}

impl ProjectSettings {
    /// # Errors
    /// - Language list empty, blank or duplicated codes
    /// - Empty group key
    /// - Out-of-range scoring constants
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.lang_codes.is_empty() {
            errors.push(ValidationError::new(
                "langCodes",
                "At least one language code is required. Example: [\"zh\", \"en\"]",
            ));
        }

        let mut seen = HashSet::new();
        for (index, code) in self.lang_codes.iter().enumerate() {
            if code.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("langCodes[{index}]"),
                    "The language code cannot be empty",
                ));
            } else if !seen.insert(code.as_str()) {
                errors.push(ValidationError::new(
                    format!("langCodes[{index}]"),
                    format!("Duplicate language code '{code}'"),
                ));
            }
        }

        if let Some(group) = &self.group_key
            && group.is_empty()
        {
            errors.push(ValidationError::new(
                "groupKey",
                "The group key cannot be empty. Specify a top-level key, or remove this field",
            ));
        }

        if self.scoring.context_radius == 0 {
            errors.push(ValidationError::new(
                "scoring.contextRadius",
                "The context radius must be at least 1",
            ));
        }

        if !self.scoring.min_score.is_finite() || self.scoring.min_score < 0.0 {
            errors.push(ValidationError::new(
                "scoring.minScore",
                "The minimum score must be a non-negative number",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Values given on the command line. `None` / `false` keeps the file value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub csv: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub group_key: Option<String>,
    pub trim: bool,
    pub lang_codes: Option<Vec<String>>,
    pub use_template_as_default: bool,
}

impl ProjectSettings {
    /// Applies `overrides` field by field. Language codes are trimmed.
    #[must_use]
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if overrides.csv.is_some() {
            self.csv = overrides.csv;
        }
        if let Some(template) = overrides.template {
            self.template = template;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if overrides.group_key.is_some() {
            self.group_key = overrides.group_key;
        }
        if let Some(lang_codes) = overrides.lang_codes {
            self.lang_codes = lang_codes.iter().map(|code| code.trim().to_string()).collect();
        }
        self.trim |= overrides.trim;
        self.use_template_as_default |= overrides.use_template_as_default;
        self
    }
}
