//! Per-language results and run totals.

use std::path::PathBuf;

use serde::Serialize;

use crate::types::MergeStats;

/// What happened to one language file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "message")]
pub enum LanguageStatus {
    /// New tree differed from the file on disk and was written.
    Written,
    /// New tree equals the file on disk; nothing was written.
    Unchanged,
    /// Output path is the template itself.
    SkippedSelfOverwrite,
    /// Writing failed; the other languages were still processed.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageReport {
    pub lang: String,
    pub path: PathBuf,
    pub status: LanguageStatus,
    pub stats: MergeStats,
}

impl LanguageReport {
    /// Whether the language went through the merge.
    #[must_use]
    pub const fn is_processed(&self) -> bool {
        !matches!(self.status, LanguageStatus::SkippedSelfOverwrite)
    }

    #[must_use]
    pub const fn is_written(&self) -> bool {
        matches!(self.status, LanguageStatus::Written)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub updated: usize,
    pub unchanged: usize,
    pub missing: usize,
    pub languages_written_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub processed_languages: Vec<String>,
    pub totals: Totals,
}

/// Outcome of a full run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Data rows in the CSV.
    pub record_count: usize,
    pub languages: Vec<LanguageReport>,
    pub summary: RunSummary,
}

/// Adds up the per-language counts.
///
/// A skipped language contributes nothing. Only [`LanguageStatus::Written`]
/// counts towards `languages_written_count`.
#[must_use]
pub fn summarize(reports: &[LanguageReport]) -> RunSummary {
    let mut summary = RunSummary::default();

    for report in reports.iter().filter(|report| report.is_processed()) {
        summary.processed_languages.push(report.lang.clone());
        summary.totals.updated += report.stats.updated;
        summary.totals.unchanged += report.stats.unchanged;
        summary.totals.missing += report.stats.missing.len();
        if report.is_written() {
            summary.totals.languages_written_count += 1;
        }
    }

    summary
}
