//! Sibling context of a template leaf.

use serde_json::{
    Map,
    Value,
};

use crate::types::KeyPath;

/// Values of the nearest string-valued siblings of a key inside its parent object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonContext<'a> {
    /// Preceding sibling values in document order.
    pub before: Vec<&'a str>,
    /// Following sibling values in document order.
    pub after: Vec<&'a str>,
}

impl<'a> JsonContext<'a> {
    /// Collects up to `radius` string siblings on each side of `key`.
    ///
    /// Non-string siblings are passed over, so the window reaches past nested
    /// objects and scalars to the next string.
    #[must_use]
    pub fn from_siblings(parent: &'a Map<String, Value>, key: &str, radius: usize) -> Self {
        let Some(position) = parent.keys().position(|k| k == key) else {
            return Self::default();
        };

        let mut before: Vec<&'a str> =
            parent.values().take(position).filter_map(Value::as_str).collect();
        let before = before.split_off(before.len().saturating_sub(radius));

        let after =
            parent.values().skip(position + 1).filter_map(Value::as_str).take(radius).collect();

        Self { before, after }
    }

    /// Resolves `path` inside `template` and collects the context of its last key.
    ///
    /// An unresolvable path yields an empty context.
    #[must_use]
    pub fn from_path(template: &'a Value, path: &KeyPath, radius: usize) -> Self {
        let Some(key) = path.leaf() else {
            return Self::default();
        };

        let parent = path
            .parent()
            .iter()
            .try_fold(template, |node, segment| node.as_object()?.get(segment))
            .and_then(Value::as_object);

        parent.map_or_else(Self::default, |parent| Self::from_siblings(parent, key, radius))
    }

    /// All sibling values, preceding ones first.
    pub fn values(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.before.iter().chain(&self.after).copied()
    }
}
