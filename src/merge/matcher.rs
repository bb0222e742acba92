//! Disambiguation of source texts with several translations.
//!
//! A CSV may list the same source text on several rows with different
//! translations. Each candidate remembers the source texts around its row; the
//! leaf being translated knows its sibling strings. The candidate whose
//! surroundings best match the leaf wins. When nothing matches well enough the
//! candidates are consumed in row order, one per occurrence of the text.

use std::collections::HashSet;

use serde_json::Value;

use super::context::JsonContext;
use crate::config::ScoringConfig;
use crate::types::{
    Candidate,
    KeyPath,
};

/// How a candidate was chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// At most one distinct translation exists.
    Unambiguous { index: usize },
    /// Best context score reached the threshold.
    ContextScored { index: usize, score: f64 },
    /// Context too weak; candidates are taken in row order.
    SequentialFallback { index: usize },
}

impl Resolution {
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Unambiguous { index }
            | Self::ContextScored { index, .. }
            | Self::SequentialFallback { index } => index,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContextMatcher {
    scoring: ScoringConfig,
}

impl ContextMatcher {
    #[must_use]
    pub const fn new(scoring: ScoringConfig) -> Self {
        Self { scoring }
    }

    #[must_use]
    pub const fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Picks a candidate for the leaf at `key_path` in `template`.
    ///
    /// `occurrence` is how many times this source text was already resolved
    /// during the current traversal.
    #[must_use]
    pub fn select_for_path(
        &self,
        candidates: &[Candidate],
        key_path: &KeyPath,
        template: &Value,
        occurrence: usize,
    ) -> Resolution {
        let context = JsonContext::from_path(template, key_path, self.scoring.context_radius);
        self.select(candidates, &context, occurrence)
    }

    /// Picks a candidate given the leaf's sibling context.
    ///
    /// Ties keep the earliest candidate.
    #[must_use]
    pub fn select(
        &self,
        candidates: &[Candidate],
        context: &JsonContext<'_>,
        occurrence: usize,
    ) -> Resolution {
        let Some((first, rest)) = candidates.split_first() else {
            return Resolution::Unambiguous { index: 0 };
        };
        if rest.iter().all(|candidate| candidate.text == first.text) {
            return Resolution::Unambiguous { index: 0 };
        }

        let mut best_index = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (index, candidate) in candidates.iter().enumerate() {
            let score = self.score(index, candidate, context, occurrence);
            if score > best_score {
                best_index = index;
                best_score = score;
            }
        }

        if best_score < self.scoring.min_score {
            let index = occurrence.min(candidates.len() - 1);
            tracing::trace!(occurrence, index, best_score, "Falling back to row order");
            return Resolution::SequentialFallback { index };
        }

        Resolution::ContextScored { index: best_index, score: best_score }
    }

    /// Total score of one candidate: context overlap, CSV edge bonus and
    /// closeness of its list position to `occurrence`.
    #[must_use]
    pub fn score(
        &self,
        index: usize,
        candidate: &Candidate,
        context: &JsonContext<'_>,
        occurrence: usize,
    ) -> f64 {
        self.overlap(candidate, context)
            + self.edge_bonus(candidate, context)
            + self.proximity(index, occurrence)
    }

    #[allow(clippy::cast_precision_loss)]
    fn overlap(&self, candidate: &Candidate, context: &JsonContext<'_>) -> f64 {
        let csv_side: HashSet<&str> = candidate.context.adjacent().collect();
        let json_side: HashSet<&str> = context.values().collect();

        let denominator = csv_side.len().max(json_side.len());
        if denominator == 0 {
            return 0.0;
        }

        let shared = csv_side.intersection(&json_side).count();
        shared as f64 / denominator as f64 * self.scoring.overlap_weight
    }

    fn edge_bonus(&self, candidate: &Candidate, context: &JsonContext<'_>) -> f64 {
        let row = candidate.context.row_index;
        let near_start = row <= self.scoring.start_row_threshold && context.before.is_empty();
        let near_end = row >= self.scoring.end_row_threshold && context.after.is_empty();

        if near_start || near_end { self.scoring.edge_bonus } else { 0.0 }
    }

    #[allow(clippy::cast_precision_loss)]
    fn proximity(&self, index: usize, occurrence: usize) -> f64 {
        self.scoring.proximity_window.saturating_sub(index.abs_diff(occurrence)) as f64
    }
}
