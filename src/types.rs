//! Core types used throughout the project.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// Neighbouring source texts of a CSV row.
///
/// `before` and `after` hold the non-empty column-0 texts found within the
/// context radius, nearest row last / first respectively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionContext {
    pub before: Vec<String>,
    pub after: Vec<String>,
    /// Record index in the CSV; the header is row 0.
    pub row_index: usize,
}

impl PositionContext {
    /// All adjacent texts, `before` first.
    pub fn adjacent(&self) -> impl Iterator<Item = &str> {
        self.before.iter().chain(&self.after).map(String::as_str)
    }
}

/// One CSV-supplied translation for a (language, source text) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub context: PositionContext,
}

/// Language code → source text → candidates in CSV row order.
///
/// Built once per run by [`crate::input::csv_index::build_index`] and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    languages: HashMap<String, HashMap<String, Vec<Candidate>>>,
}

impl TranslationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, lang: &str, source: &str, candidate: Candidate) {
        self.languages
            .entry(lang.to_string())
            .or_default()
            .entry(source.to_string())
            .or_default()
            .push(candidate);
    }

    /// Candidates for `source` in `lang`, or `None` when the CSV supplies none.
    #[must_use]
    pub fn candidates(&self, lang: &str, source: &str) -> Option<&[Candidate]> {
        self.languages
            .get(lang)
            .and_then(|sources| sources.get(source))
            .map(Vec::as_slice)
            .filter(|candidates| !candidates.is_empty())
    }

    /// Number of distinct source texts known for `lang`.
    #[must_use]
    pub fn source_count(&self, lang: &str) -> usize {
        self.languages.get(lang).map_or(0, HashMap::len)
    }

    #[must_use]
    pub fn has_language(&self, lang: &str) -> bool {
        self.languages.contains_key(lang)
    }
}

/// Path of keys from the tree root to a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, key: impl Into<String>) {
        self.0.push(key.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last segment, i.e. the key inside its parent object.
    #[must_use]
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// All segments but the last.
    #[must_use]
    pub fn parent(&self) -> &[String] {
        self.0.split_last().map_or(&[], |(_, parent)| parent)
    }
}

impl<S: Into<String>> FromIterator<S> for KeyPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// A leaf whose source text had no candidate for the language being merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingTranslation {
    pub path: KeyPath,
    pub source_text: String,
    /// Value substituted for the leaf, only when the template text was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Leaf counts of one language merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStats {
    pub updated: usize,
    pub unchanged: usize,
    pub missing: Vec<MissingTranslation>,
}
