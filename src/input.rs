//! Input files of a conversion run.

pub mod csv_index;
pub mod template;

pub use csv_index::{
    CsvIndex,
    CsvIndexError,
    build_index,
    load_csv_file,
};
pub use template::{
    load_template,
    read_language_file,
    scope_to_group,
};
