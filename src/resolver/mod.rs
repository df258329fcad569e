//! Locale fallback resolution.
//!
//! A [`ResolvedView`] answers lookups from a primary translation tree and, for
//! anything the primary lacks, from a fallback tree, recursing into nested
//! sections so partial translations merge at every level.
/// Missing-translation report
pub mod coverage;
/// Eager merge of a locale pair
pub mod merge;
/// Lazy resolved view
mod view;

pub use coverage::missing_keys;
pub use merge::materialize;
pub use view::{
    DEFAULT_SEPARATOR,
    Resolved,
    ResolvedView,
    resolve,
};
