//! Conversion run: load inputs once, then merge and write each language.

use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

use crate::config::{
    ProjectSettings,
    ScoringConfig,
};
use crate::error::{
    Csv2JsonError,
    LanguageFileError,
};
use crate::input::{
    load_csv_file,
    load_template,
    read_language_file,
};
use crate::merge::{
    MergeOptions,
    merge_language,
};
use crate::report::{
    LanguageReport,
    LanguageStatus,
    RunReport,
    summarize,
};
use crate::types::{
    MergeStats,
    TranslationTable,
};

/// Already-validated parameters of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub csv_path: PathBuf,
    pub template_path: PathBuf,
    pub output_dir: PathBuf,
    pub group_key: Option<String>,
    pub trim: bool,
    pub lang_codes: Vec<String>,
    pub use_template_as_default: bool,
    pub scoring: ScoringConfig,
}

impl RunOptions {
    #[must_use]
    pub fn from_settings(settings: &ProjectSettings, csv_path: PathBuf) -> Self {
        Self {
            csv_path,
            template_path: settings.template.clone(),
            output_dir: settings.output_dir.clone(),
            group_key: settings.group_key.clone(),
            trim: settings.trim,
            lang_codes: settings.lang_codes.clone(),
            use_template_as_default: settings.use_template_as_default,
            scoring: settings.scoring,
        }
    }

    /// Output file of `lang`.
    #[must_use]
    pub fn language_path(&self, lang: &str) -> PathBuf {
        self.output_dir.join(format!("{lang}.json"))
    }
}

/// Runs the conversion.
///
/// # Errors
/// Only load-phase failures (template, group key, CSV, output directory).
/// Per-language failures are logged and reported as [`LanguageStatus::Failed`].
pub async fn run(options: &RunOptions) -> Result<RunReport, Csv2JsonError> {
    let template = load_template(&options.template_path, options.group_key.as_deref()).await?;
    let index = load_csv_file(
        &options.csv_path,
        &options.lang_codes,
        options.trim,
        options.scoring.context_radius,
    )
    .await?;
    tracing::info!(records = index.record_count, "CSV loaded");

    if !tokio::fs::try_exists(&options.output_dir).await.unwrap_or(false) {
        tracing::info!(path = %options.output_dir.display(), "Creating output directory");
        tokio::fs::create_dir_all(&options.output_dir).await.map_err(|source| {
            Csv2JsonError::InputNotFound { path: options.output_dir.clone(), source }
        })?;
    }

    let merge_options = MergeOptions {
        use_template_as_default: options.use_template_as_default,
        scoring: options.scoring,
    };

    let mut languages = Vec::with_capacity(options.lang_codes.len());
    for (position, lang) in options.lang_codes.iter().enumerate() {
        let path = options.language_path(lang);

        if position == 0 && is_same_file(&path, &options.template_path).await {
            tracing::info!(lang = %lang, "Output is the template itself, skipping");
            languages.push(LanguageReport {
                lang: lang.clone(),
                path,
                status: LanguageStatus::SkippedSelfOverwrite,
                stats: MergeStats::default(),
            });
            continue;
        }

        let report = process_language(lang, path, &template, &index.table, &merge_options).await;
        languages.push(report);
    }

    let summary = summarize(&languages);
    Ok(RunReport { record_count: index.record_count, languages, summary })
}

async fn process_language(
    lang: &str,
    path: PathBuf,
    template: &Value,
    table: &TranslationTable,
    options: &MergeOptions,
) -> LanguageReport {
    let prior = match read_language_file(&path).await {
        Ok(prior) => prior,
        Err(e) => {
            tracing::warn!(lang = %lang, "{e}; creating a new file");
            None
        }
    };
    if prior.is_none() {
        tracing::debug!(lang = %lang, path = %path.display(), "Starting from an empty language tree");
    }
    if table.has_language(lang) {
        tracing::debug!(lang = %lang, sources = table.source_count(lang), "Translations available");
    } else {
        tracing::warn!(lang = %lang, "CSV supplies no translations for this language");
    }

    let outcome = merge_language(template, prior.as_ref(), lang, table, options);

    let status = if needs_write(prior.as_ref(), &outcome.tree) {
        match write_language_file(&path, &outcome.tree).await {
            Ok(()) => {
                tracing::info!(
                    lang = %lang,
                    updated = outcome.stats.updated,
                    unchanged = outcome.stats.unchanged,
                    "Language file written"
                );
                LanguageStatus::Written
            }
            Err(e) => {
                tracing::error!(lang = %lang, "{e}");
                LanguageStatus::Failed(e.to_string())
            }
        }
    } else {
        tracing::info!(lang = %lang, unchanged = outcome.stats.unchanged, "Language file up to date");
        LanguageStatus::Unchanged
    };

    LanguageReport { lang: lang.to_string(), path, status, stats: outcome.stats }
}

/// A file on disk is rewritten only when its content changes, key order
/// included; a new file only when there is something to put in it.
fn needs_write(prior: Option<&Value>, tree: &Value) -> bool {
    prior.map_or_else(
        || !tree.as_object().is_some_and(serde_json::Map::is_empty),
        |prior| !same_document(prior, tree),
    )
}

/// Structural equality that also compares object key order.
///
/// `Value`'s own `PartialEq` treats maps as unordered even with `preserve_order`.
fn same_document(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().zip(b).all(|((ka, va), (kb, vb))| ka == kb && same_document(va, vb))
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(va, vb)| same_document(va, vb))
        }
        _ => a == b,
    }
}

async fn write_language_file(path: &Path, tree: &Value) -> Result<(), LanguageFileError> {
    let content = serde_json::to_string_pretty(tree).map_err(|e| LanguageFileError::Write {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;

    tokio::fs::write(path, content)
        .await
        .map_err(|source| LanguageFileError::Write { path: path.to_path_buf(), source })
}

/// Both paths exist and resolve to the same file.
async fn is_same_file(a: &Path, b: &Path) -> bool {
    match (tokio::fs::canonicalize(a).await, tokio::fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
