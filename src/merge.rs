//! Template-to-language tree merging.

pub mod context;
pub mod matcher;
pub mod tree;

pub use context::JsonContext;
pub use matcher::{
    ContextMatcher,
    Resolution,
};
pub use tree::{
    MergeOptions,
    MergeOutcome,
    merge_language,
    synthesize_language_tree,
};
