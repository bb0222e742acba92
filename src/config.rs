//! Project settings and disambiguation constants.
/// `.csv2json.json` loader
mod loader;
mod manager;
/// Settings, overrides and validation
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    ProjectSettings,
    ScoringConfig,
    SettingsOverrides,
    ValidationError,
};
