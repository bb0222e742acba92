//! 設定ファイルとコマンドライン引数から実行設定を組み立てる

use std::path::{
    Path,
    PathBuf,
};

use super::loader::{
    self,
    LoadedSettings,
};
use super::{
    ConfigError,
    ProjectSettings,
    SettingsOverrides,
};

/// 実行設定を管理する
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 検証済みの現在の設定
    current_settings: ProjectSettings,

    /// 読み込んだ設定ファイル (見つからなかった場合は `None`)
    source_file: Option<PathBuf>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `config_dir` の設定ファイルを読み込む
    ///
    /// ファイルが無ければデフォルト設定を使う。失敗した場合、現在の設定は変わらない
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let (settings, source_file) = match loader::load_from_dir(config_dir)? {
            Some(LoadedSettings { file, settings }) => (settings, Some(file)),
            None => (ProjectSettings::default(), None),
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(file = ?source_file, "Settings loaded: {:?}", settings);
        self.current_settings = settings;
        self.source_file = source_file;

        Ok(())
    }

    /// コマンドライン引数で上書きする
    ///
    /// # Errors
    /// 上書き後の設定がバリデーションに失敗した場合
    pub fn apply_overrides(&mut self, overrides: SettingsOverrides) -> Result<(), ConfigError> {
        let settings = self.current_settings.clone().with_overrides(overrides);

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!("Settings after overrides: {:?}", settings);
        self.current_settings = settings;

        Ok(())
    }

    #[must_use]
    pub const fn get_settings(&self) -> &ProjectSettings {
        &self.current_settings
    }

    #[must_use]
    pub fn source_file(&self) -> Option<&Path> {
        self.source_file.as_deref()
    }
}
