//! CSV translation table parsing.

use std::path::Path;

use csv::{
    ReaderBuilder,
    StringRecord,
    Trim,
};
use thiserror::Error;

use crate::error::Csv2JsonError;
use crate::types::{
    Candidate,
    PositionContext,
    TranslationTable,
};

#[derive(Error, Debug)]
pub enum CsvIndexError {
    /// Fewer than a header row and one data row.
    #[error("CSV needs a header row and at least one data row, found {found} row(s)")]
    TooFewRows { found: usize },

    #[error("Failed to parse CSV: {0}")]
    Parse(#[from] csv::Error),
}

/// Parsed CSV content.
#[derive(Debug, Clone)]
pub struct CsvIndex {
    pub table: TranslationTable,
    /// Data rows, header excluded, empty source cells included.
    pub record_count: usize,
}

/// Builds the translation table from raw CSV text.
///
/// Column 0 holds the source text and is itself the translation for
/// `lang_codes[0]`; column `j` holds the translation for `lang_codes[j]`.
/// Rows with a blank source cell are skipped, blank translation cells are not
/// inserted. Duplicate source texts accumulate candidates in row order, each
/// with the source texts of up to `context_radius` rows on either side.
///
/// # Errors
/// - Malformed CSV (e.g. unterminated quote, invalid UTF-8)
/// - Fewer than two rows
pub fn build_index(
    csv_text: &str,
    lang_codes: &[String],
    trim: bool,
    context_radius: usize,
) -> Result<CsvIndex, CsvIndexError> {
    let text = csv_text.strip_prefix('\u{feff}').unwrap_or(csv_text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(if trim { Trim::All } else { Trim::None })
        .from_reader(text.as_bytes());

    let records = reader.records().collect::<Result<Vec<StringRecord>, _>>()?;
    if records.len() < 2 {
        return Err(CsvIndexError::TooFewRows { found: records.len() });
    }

    let rows = records.get(1..).unwrap_or_default();
    let sources: Vec<Option<&str>> = rows
        .iter()
        .map(|record| record.get(0).filter(|source| !source.trim().is_empty()))
        .collect();

    let mut table = TranslationTable::new();
    for (position, record) in rows.iter().enumerate() {
        let Some(Some(source)) = sources.get(position) else {
            continue;
        };
        let context = position_context(&sources, position, context_radius);

        for (column, lang) in lang_codes.iter().enumerate().take(record.len()) {
            let cell = if column == 0 { Some(*source) } else { record.get(column) };
            let Some(text) = cell.filter(|text| !text.trim().is_empty()) else {
                continue;
            };
            table.push(lang, source, Candidate { text: text.to_string(), context: context.clone() });
        }
    }

    tracing::debug!(rows = rows.len(), languages = lang_codes.len(), "Indexed CSV translations");

    Ok(CsvIndex { table, record_count: rows.len() })
}

/// Reads and indexes a CSV file.
///
/// # Errors
/// - `InputNotFound` if the file cannot be read
/// - `MalformedInput` if the extension is not `.csv` or the content is unusable
pub async fn load_csv_file(
    path: &Path,
    lang_codes: &[String],
    trim: bool,
    context_radius: usize,
) -> Result<CsvIndex, Csv2JsonError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|source| match source.kind() {
        std::io::ErrorKind::InvalidData => Csv2JsonError::malformed(path, "CSV is not valid UTF-8"),
        _ => Csv2JsonError::InputNotFound { path: path.to_path_buf(), source },
    })?;

    let is_csv = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(Csv2JsonError::malformed(path, "not a .csv file"));
    }

    build_index(&content, lang_codes, trim, context_radius)
        .map_err(|e| Csv2JsonError::malformed(path, e))
}

/// Non-empty source texts within `radius` data rows of `position`.
fn position_context(sources: &[Option<&str>], position: usize, radius: usize) -> PositionContext {
    let collect = |range: std::ops::Range<usize>| -> Vec<String> {
        sources
            .get(range)
            .unwrap_or_default()
            .iter()
            .flatten()
            .map(|source| (*source).to_string())
            .collect()
    };

    let end = sources.len().min(position + 1 + radius);
    PositionContext {
        before: collect(position.saturating_sub(radius)..position),
        after: collect((position + 1).min(end)..end),
        row_index: position + 1,
    }
}
