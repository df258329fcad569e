//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    I18nSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".locale-fallback.json";

/// ワークスペースから設定を読み込む
///
/// `.locale-fallback.json` ファイルを探して読み込む。コメントと末尾カンマを許可する
///
/// # Arguments
/// * `workspace_root` - ワークスペースのルートパス
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
/// - `Err(ConfigError)`: ファイル読み込みまたはパースエラー
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON 構文エラー
/// - 設定値の型エラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<I18nSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "Configuration file not found");
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "Loading configuration");

    let content = std::fs::read_to_string(&config_path)?;
    let value = jsonc_parser::parse_to_serde_value(&content, &jsonc_parser::ParseOptions::default())
        .map_err(|e| ConfigError::SyntaxError(e.to_string()))?
        .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));
    let settings: I18nSettings = serde_json::from_value(value)?;

    Ok(Some(settings))
}
