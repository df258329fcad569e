//! Application-lifetime access to the selected locale pair.

use std::path::Path;

use crate::config::{
    ConfigError,
    I18nSettings,
};
use crate::input::TranslationTree;
use crate::locale::{
    LocaleError,
    LocaleId,
    LocaleSet,
};
use crate::resolver::{
    DEFAULT_SEPARATOR,
    Resolved,
    ResolvedView,
    missing_keys,
    resolve,
};

/// Owns the loaded locales and answers lookups for one (primary, fallback) pair.
#[derive(Debug, Clone)]
pub struct Localizer {
    /// Every loaded locale
    locales: LocaleSet,
    /// Locale shown to the user
    primary: LocaleId,
    /// Locale consulted for keys the primary lacks
    fallback: LocaleId,
    /// Path separator for lookups
    separator: String,
}

impl Localizer {
    /// # Errors
    /// [`LocaleError::UnknownLocale`] if either locale is not in `locales`.
    pub fn new(
        locales: LocaleSet,
        primary: LocaleId,
        fallback: LocaleId,
    ) -> Result<Self, LocaleError> {
        for locale in [&primary, &fallback] {
            if !locales.contains(locale) {
                return Err(LocaleError::UnknownLocale(locale.clone()));
            }
        }

        let localizer =
            Self { locales, primary, fallback, separator: DEFAULT_SEPARATOR.to_string() };
        tracing::debug!(
            primary = %localizer.primary,
            fallback = %localizer.fallback,
            missing = localizer.missing_keys().len(),
            "Localizer ready"
        );
        Ok(localizer)
    }

    /// Loads the workspace's translations and selects the configured pair.
    ///
    /// # Errors
    /// - Invalid settings
    /// - Translation files that cannot be read or parsed
    /// - A configured locale without translation files
    pub async fn from_settings(
        workspace_root: &Path,
        settings: &I18nSettings,
    ) -> Result<Self, LocaleError> {
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        let primary = LocaleId::parse(&settings.primary_locale)?;
        let fallback = LocaleId::parse(&settings.fallback_locale)?;
        let locales = LocaleSet::load(workspace_root, settings).await?;

        Ok(Self::new(locales, primary, fallback)?.with_separator(&settings.key_separator))
    }

    #[must_use]
    pub fn with_separator(mut self, separator: &str) -> Self {
        separator.clone_into(&mut self.separator);
        self
    }

    /// Trees of the selected pair. Both exist, as checked on construction.
    fn trees(&self) -> (&TranslationTree, &TranslationTree) {
        let empty = TranslationTree::empty();
        (
            self.locales.get(&self.primary).unwrap_or(empty),
            self.locales.get(&self.fallback).unwrap_or(empty),
        )
    }

    #[must_use]
    pub fn view(&self) -> ResolvedView<'_> {
        let (primary, fallback) = self.trees();
        resolve(primary, fallback)
    }

    #[must_use]
    pub fn resolve_path(&self, path: &str) -> Resolved<'_> {
        self.view().get_path(path, &self.separator)
    }

    /// The translated string at `path`, if it resolves to one.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.resolve_path(path).as_str()
    }

    /// Like [`Self::lookup`], but shows the path itself when nothing resolves.
    #[must_use]
    pub fn text<'a>(&'a self, path: &'a str) -> &'a str {
        self.lookup(path).unwrap_or(path)
    }

    /// Keys the primary locale leaves to the fallback.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<String> {
        let (primary, fallback) = self.trees();
        missing_keys(primary, fallback, &self.separator)
    }

    #[must_use]
    pub fn materialize(&self) -> TranslationTree {
        self.view().materialize()
    }

    #[must_use]
    pub const fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    #[must_use]
    pub const fn primary(&self) -> &LocaleId {
        &self.primary
    }

    #[must_use]
    pub const fn fallback(&self) -> &LocaleId {
        &self.fallback
    }
}
