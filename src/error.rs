//! Error types for a conversion run.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that abort the whole run.
///
/// Raised while loading the CSV, the template or the settings. No language can
/// be processed without them, so they propagate straight to the caller.
#[derive(Error, Debug)]
pub enum Csv2JsonError {
    /// CSV, template or output location cannot be opened.
    #[error("Cannot access '{}': {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Template is not a JSON object, or CSV is unusable.
    #[error("Malformed input '{}': {message}", path.display())]
    MalformedInput { path: PathBuf, message: String },

    /// Run parameters do not fit the inputs (e.g. unknown group key).
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Settings(#[from] ConfigError),
}

impl Csv2JsonError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::MalformedInput { path: path.into(), message: message.to_string() }
    }
}

/// Errors scoped to a single language file.
///
/// The pipeline logs these and moves on to the next language.
#[derive(Error, Debug)]
pub enum LanguageFileError {
    #[error("Failed to read language file '{}': {message}", path.display())]
    Read { path: PathBuf, message: String },

    #[error("Failed to write language file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
