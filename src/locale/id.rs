//! Locale identifiers.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::LocaleError;

/// A normalized `lang[-Script][-REGION]` identifier.
///
/// `zh_CN`, `zh-cn` and `zh-CN` all normalize to `zh-CN`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocaleId(String);

impl LocaleId {
    /// # Errors
    /// Returns [`LocaleError::InvalidLocale`] when a subtag is empty, has the
    /// wrong length or characters, or trails the region.
    pub fn parse(input: &str) -> Result<Self, LocaleError> {
        let invalid = |reason| LocaleError::InvalidLocale { input: input.to_string(), reason };

        let mut subtags = input.split(['-', '_']);
        let language = subtags.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid("language subtag must be 2-3 ASCII letters"));
        }

        let mut canonical = language.to_ascii_lowercase();
        let mut rest = subtags.peekable();

        if let Some(script) = rest.next_if(|s| s.len() == 4 && s.chars().all(|c| c.is_ascii_alphabetic()))
        {
            let (head, tail) = script.split_at(1);
            canonical.push('-');
            canonical.push_str(&head.to_ascii_uppercase());
            canonical.push_str(&tail.to_ascii_lowercase());
        }

        if let Some(region) = rest.next() {
            let alpha = region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic());
            let numeric = region.len() == 3 && region.chars().all(|c| c.is_ascii_digit());
            if !alpha && !numeric {
                return Err(invalid("region subtag must be 2 letters or 3 digits"));
            }
            canonical.push('-');
            canonical.push_str(&region.to_ascii_uppercase());
        }

        if rest.next().is_some() {
            return Err(invalid("unexpected subtag after region"));
        }

        Ok(Self(canonical))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleId {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Infer the locale of a translation file, plus the namespace its contents
/// belong under.
///
/// The file stem is tried first. Only when it is not a locale id does the
/// parent directory count, and the stem then becomes the namespace.
///
/// # Examples
/// - `languages/en_US.json` -> (`en-US`, None)
/// - `languages/app/en_US.json` -> (`en-US`, None)
/// - `locales/zh-CN/NavBar.json` -> (`zh-CN`, Some("NavBar"))
/// - `locales/common.json` -> None
pub(crate) fn infer_locale(file_path: &Path) -> Option<(LocaleId, Option<String>)> {
    let stem = file_path.file_stem()?.to_string_lossy().to_string();

    if let Ok(locale) = LocaleId::parse(&stem) {
        return Some((locale, None));
    }

    let parent = file_path.parent().and_then(Path::file_name)?;
    LocaleId::parse(&parent.to_string_lossy()).ok().map(|locale| (locale, Some(stem)))
}
