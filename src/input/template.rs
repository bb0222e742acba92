//! Template and per-language JSON files.

use std::path::Path;

use serde_json::{
    Map,
    Value,
};

use crate::error::{
    Csv2JsonError,
    LanguageFileError,
};

/// Reads the template and narrows it to `group_key` when one is given.
///
/// # Errors
/// - `InputNotFound` if the file cannot be read
/// - `MalformedInput` if it is not a JSON object
/// - `Configuration` if `group_key` is not a top-level key
pub async fn load_template(path: &Path, group_key: Option<&str>) -> Result<Value, Csv2JsonError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| Csv2JsonError::InputNotFound { path: path.to_path_buf(), source })?;

    let template = parse_template(&content).map_err(|e| Csv2JsonError::malformed(path, e))?;

    scope_to_group(template, group_key)
}

/// Parses template text, which must hold a JSON object.
pub fn parse_template(content: &str) -> Result<Value, String> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| format!("Failed to parse JSON: {e}"))?;

    if value.is_object() { Ok(value) } else { Err("template must be a JSON object".to_string()) }
}

/// Keeps only `{group_key: template[group_key]}`.
///
/// # Errors
/// `Configuration` if the key is absent.
pub fn scope_to_group(template: Value, group_key: Option<&str>) -> Result<Value, Csv2JsonError> {
    let Some(group) = group_key else {
        tracing::debug!("Processing template without group scoping");
        return Ok(template);
    };

    let Value::Object(mut root) = template else {
        return Err(Csv2JsonError::Configuration(format!(
            "group key \"{group}\" requires a JSON object template"
        )));
    };

    let Some(subtree) = root.remove(group) else {
        return Err(Csv2JsonError::Configuration(format!(
            "group key \"{group}\" does not exist in the template"
        )));
    };

    let mut scoped = Map::new();
    scoped.insert(group.to_string(), subtree);
    Ok(Value::Object(scoped))
}

/// Reads an existing language file.
///
/// Returns `Ok(None)` when the file does not exist yet.
///
/// # Errors
/// `Read` when the file exists but cannot be read or parsed.
pub async fn read_language_file(path: &Path) -> Result<Option<Value>, LanguageFileError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(LanguageFileError::Read { path: path.to_path_buf(), message: e.to_string() });
        }
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| LanguageFileError::Read { path: path.to_path_buf(), message: e.to_string() })
}
