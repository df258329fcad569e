//! Locale error definitions.

use std::path::PathBuf;

use thiserror::Error;

use super::LocaleId;
use crate::config::{
    ConfigError,
    MatcherError,
};
use crate::input::TreeError;

#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("Invalid locale identifier '{input}': {reason}")]
    InvalidLocale { input: String, reason: &'static str },

    #[error("Locale '{0}' is not loaded")]
    UnknownLocale(LocaleId),

    #[error("Failed to read translation file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: TreeError,
    },

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
