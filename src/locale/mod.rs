//! Locales and the translation trees loaded for them.
/// Locale identifier parsing
mod id;
/// Workspace translation file loader
mod loader;
/// Loaded locale collection
mod set;
/// Locale error types
mod types;

pub use id::LocaleId;
pub use set::LocaleSet;
pub use types::LocaleError;
