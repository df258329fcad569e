//! locale-fallback
//!
//! ネストした翻訳ツリーを、主ロケールに無いキーだけフォールバックロケールから補って引くライブラリ

pub mod config;
pub mod input;
pub mod locale;
pub mod localizer;
pub mod resolver;
pub mod session;
mod test_utils;

// よく使う型を再エクスポート
pub use localizer::Localizer;
pub use resolver::{
    Resolved,
    ResolvedView,
    resolve,
};
