//! i18n-csv2json
//!
//! CSV の翻訳表を、テンプレート JSON と同じ構造の言語別 JSON ファイルにマージする

pub mod config;
pub mod error;
pub mod input;
pub mod merge;
pub mod pipeline;
pub mod report;
pub mod types;

pub use error::{
    Csv2JsonError,
    LanguageFileError,
};
pub use pipeline::{
    RunOptions,
    run,
};
pub use report::{
    RunReport,
    RunSummary,
};
