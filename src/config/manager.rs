//! 設定管理を行うモジュール

use std::path::Path;

use super::{
    ConfigError,
    I18nSettings,
    loader,
};

/// 検証済みの設定を保持する
///
/// 保持している設定は常に `I18nSettings::validate` を通過している。
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    settings: I18nSettings,
}

impl ConfigManager {
    /// ワークスペースの設定ファイルを読み込む。ファイルがなければデフォルト値
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON 構文エラー・型エラー
    /// - バリデーションエラー
    pub fn load(workspace_root: &Path) -> Result<Self, ConfigError> {
        let settings = match loader::load_from_workspace(workspace_root)? {
            Some(settings) => {
                tracing::debug!(workspace_root = %workspace_root.display(), "Loaded settings file");
                settings
            }
            None => I18nSettings::default(),
        };
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        Ok(Self { settings })
    }

    /// 主ロケール・フォールバックロケールを上書きする（CLI 引数用）
    ///
    /// 上書き後の設定が無効なら何も変更しない
    ///
    /// # Errors
    /// 上書き後の設定のバリデーションエラー
    pub fn override_locales(
        &mut self,
        primary: Option<String>,
        fallback: Option<String>,
    ) -> Result<(), ConfigError> {
        if primary.is_none() && fallback.is_none() {
            return Ok(());
        }

        let mut settings = self.settings.clone();
        if let Some(primary) = primary {
            settings.primary_locale = primary;
        }
        if let Some(fallback) = fallback {
            settings.fallback_locale = fallback;
        }
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(
            primary = %settings.primary_locale,
            fallback = %settings.fallback_locale,
            "Locale overrides applied"
        );
        self.settings = settings;
        Ok(())
    }

    #[must_use]
    pub const fn settings(&self) -> &I18nSettings {
        &self.settings
    }
}
