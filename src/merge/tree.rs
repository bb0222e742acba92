//! Structure-preserving merge of a template into one language tree.

use std::collections::HashMap;

use serde_json::{
    Map,
    Value,
};

use super::matcher::ContextMatcher;
use crate::config::ScoringConfig;
use crate::types::{
    KeyPath,
    MergeStats,
    MissingTranslation,
    TranslationTable,
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MergeOptions {
    /// Untranslated leaves take the template text instead of keeping their prior value.
    pub use_template_as_default: bool,
    pub scoring: ScoringConfig,
}

/// New language tree plus leaf statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub tree: Value,
    pub stats: MergeStats,
}

/// Merges `template` into `existing` for `lang`.
///
/// The result always has exactly the keys of `template`, in template order,
/// and never shares structure with `existing`. A missing `existing` tree means
/// the language file is new: it is replaced by an empty mirror of the template
/// and every resolved leaf counts as updated.
///
/// Every leaf without a candidate is listed in `stats.missing`, including
/// leaves of a new file that simply stay `""`.
#[must_use]
pub fn merge_language(
    template: &Value,
    existing: Option<&Value>,
    lang: &str,
    table: &TranslationTable,
    options: &MergeOptions,
) -> MergeOutcome {
    let synthesized;
    let (prior, is_new_file) = match existing {
        Some(tree) => (tree, false),
        None => {
            synthesized = synthesize_language_tree(template, options.use_template_as_default);
            (&synthesized, true)
        }
    };

    let mut merger = TreeMerger {
        template,
        lang,
        table,
        matcher: ContextMatcher::new(options.scoring),
        use_template_as_default: options.use_template_as_default,
        is_new_file,
        occurrences: HashMap::new(),
        path: KeyPath::new(),
        stats: MergeStats::default(),
    };

    let tree = match template {
        Value::Object(map) => Value::Object(merger.merge_object(map, prior.as_object())),
        other => other.clone(),
    };

    tracing::debug!(
        lang,
        updated = merger.stats.updated,
        unchanged = merger.stats.unchanged,
        missing = merger.stats.missing.len(),
        "Merged language tree"
    );

    MergeOutcome { tree, stats: merger.stats }
}

/// Mirror of `template` used when a language file does not exist yet.
///
/// String leaves become `""`, or stay the template text when
/// `use_template_text` is set. Other values are copied.
#[must_use]
pub fn synthesize_language_tree(template: &Value, use_template_text: bool) -> Value {
    match template {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), synthesize_language_tree(value, use_template_text)))
                .collect(),
        ),
        Value::String(_) if !use_template_text => Value::String(String::new()),
        other => other.clone(),
    }
}

struct TreeMerger<'a> {
    /// Root of the (scoped) template, for sibling lookups by key path.
    template: &'a Value,
    lang: &'a str,
    table: &'a TranslationTable,
    matcher: ContextMatcher,
    use_template_as_default: bool,
    is_new_file: bool,
    /// Resolutions per source text so far in this traversal.
    occurrences: HashMap<&'a str, usize>,
    path: KeyPath,
    stats: MergeStats,
}

impl<'a> TreeMerger<'a> {
    fn merge_object(
        &mut self,
        template: &'a Map<String, Value>,
        prior: Option<&Map<String, Value>>,
    ) -> Map<String, Value> {
        let mut merged = Map::new();

        for (key, value) in template {
            self.path.push(key.as_str());
            let prior_value = prior.and_then(|p| p.get(key));

            let new_value = match value {
                Value::Object(child) => {
                    Value::Object(self.merge_object(child, prior_value.and_then(Value::as_object)))
                }
                Value::String(source) => self.merge_leaf(source, prior_value),
                other => other.clone(),
            };

            self.path.pop();
            merged.insert(key.clone(), new_value);
        }

        merged
    }

    fn merge_leaf(&mut self, source: &'a str, prior: Option<&Value>) -> Value {
        if let Some(text) = self.resolve(source) {
            self.count(prior, &text);
            return Value::String(text);
        }

        if self.use_template_as_default {
            self.stats.missing.push(MissingTranslation {
                path: self.path.clone(),
                source_text: source.to_string(),
                default_value: Some(source.to_string()),
            });
            self.count(prior, source);
            return Value::String(source.to_string());
        }

        self.stats.missing.push(MissingTranslation {
            path: self.path.clone(),
            source_text: source.to_string(),
            default_value: None,
        });
        self.stats.unchanged += 1;

        match prior {
            Some(value) if !value.is_object() => value.clone(),
            _ => Value::String(String::new()),
        }
    }

    fn resolve(&mut self, source: &'a str) -> Option<String> {
        let table = self.table;
        let candidates = table.candidates(self.lang, source)?;

        let counter = self.occurrences.entry(source).or_insert(0);
        let occurrence = *counter;
        *counter += 1;

        let resolution =
            self.matcher.select_for_path(candidates, &self.path, self.template, occurrence);
        tracing::trace!(path = %self.path, ?resolution, "Resolved source text");

        candidates.get(resolution.index()).map(|candidate| candidate.text.clone())
    }

    fn count(&mut self, prior: Option<&Value>, new_text: &str) {
        let unchanged = !self.is_new_file && prior.and_then(Value::as_str) == Some(new_text);
        if unchanged {
            self.stats.unchanged += 1;
        } else {
            self.stats.updated += 1;
        }
    }
}
