//! Parsed translation inputs.
pub mod tree;

pub use tree::{
    NodeKind,
    SourceFormat,
    TranslationTree,
    TreeError,
    flatten,
};
