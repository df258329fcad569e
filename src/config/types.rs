use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::LocaleId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid configuration syntax: {0}")]
    SyntaxError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Renders validation errors as a numbered list.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    pub translation_files: TranslationFilesConfig,

    pub exclude_patterns: Vec<String>,

    /// Separator between path segments in lookups and flattened keys.
    pub key_separator: String,

    /// Locale shown to the user.
    pub primary_locale: String,

    /// Locale consulted for every key the primary locale lacks.
    pub fallback_locale: String,

    pub loading: LoadingConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadingConfig {
    /// Maximum number of translation files read at once.
    /// Default: 80% of CPU cores (minimum 1).
    pub concurrency: Option<usize>,
}

impl LoadingConfig {
    /// Effective concurrency, falling back to the CPU-derived default.
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub file_pattern: String,
}

impl I18nSettings {
    /// # Errors
    /// - Invalid separator
    /// - Invalid glob pattern
    /// - Invalid or identical locales
    /// - Zero concurrency
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.translation_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/locales/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_files.file_pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_files.file_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        let primary = LocaleId::parse(&self.primary_locale);
        if let Err(e) = &primary {
            errors.push(ValidationError::new("primaryLocale", e.to_string()));
        }
        let fallback = LocaleId::parse(&self.fallback_locale);
        if let Err(e) = &fallback {
            errors.push(ValidationError::new("fallbackLocale", e.to_string()));
        }
        if let (Ok(primary), Ok(fallback)) = (&primary, &fallback)
            && primary == fallback
        {
            errors.push(ValidationError::new(
                "primaryLocale/fallbackLocale",
                format!("The fallback locale must differ from the primary locale ('{primary}')"),
            ));
        }

        if self.loading.concurrency == Some(0) {
            errors.push(ValidationError::new(
                "loading.concurrency",
                "Concurrency must be at least 1, or remove this field to use the default",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "**/{locales,languages,messages}/**/*.{json,jsonc,toml}".to_string() }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            translation_files: TranslationFilesConfig::default(),
            exclude_patterns: vec!["node_modules/**".to_string(), "target/**".to_string()],
            key_separator: ".".to_string(),
            primary_locale: "en-US".to_string(),
            fallback_locale: "zh-CN".to_string(),
            loading: LoadingConfig::default(),
        }
    }
}
