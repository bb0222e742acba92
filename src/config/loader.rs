//! `.csv2json.json` の読み込み

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    ProjectSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".csv2json.json";

/// 読み込んだ設定と、その元になったファイル
#[derive(Debug, Clone, PartialEq)]
pub(super) struct LoadedSettings {
    pub(super) file: PathBuf,
    pub(super) settings: ProjectSettings,
}

/// `config_dir` 直下の設定ファイルを読み込む
///
/// ファイル内の相対パス (`csv`, `template`, `outputDir`) は `config_dir` 基準に解決する
///
/// # Returns
/// - `Ok(Some(_))`: 読み込みに成功
/// - `Ok(None)`: ファイルが存在しない
/// - `Err(ConfigError)`: 読み込みまたはパースエラー
pub(super) fn load_from_dir(config_dir: &Path) -> Result<Option<LoadedSettings>, ConfigError> {
    let file = config_dir.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&file) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %file.display(), "No configuration file");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    tracing::debug!(path = %file.display(), "Loading configuration");

    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
    let mut settings: ProjectSettings = serde_json::from_str(content)?;
    resolve_paths(&mut settings, config_dir);

    Ok(Some(LoadedSettings { file, settings }))
}

fn resolve_paths(settings: &mut ProjectSettings, base: &Path) {
    let resolve = |path: &Path| if path.is_absolute() { path.to_path_buf() } else { base.join(path) };

    settings.csv = settings.csv.as_deref().map(resolve);
    settings.template = resolve(&settings.template);
    settings.output_dir = resolve(&settings.output_dir);
}
