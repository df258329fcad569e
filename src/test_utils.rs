//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::expect_used)]

use serde_json::Value;

use crate::input::TranslationTree;
use crate::locale::LocaleId;

/// JSON 値から TranslationTree を作成する
///
/// # Panics
/// ルートがオブジェクトでない場合
pub(crate) fn tree(value: Value) -> TranslationTree {
    TranslationTree::from_value(value).expect("test tree root must be an object")
}

/// 文字列から LocaleId を作成する
///
/// # Panics
/// 無効なロケール識別子の場合
pub(crate) fn locale(id: &str) -> LocaleId {
    LocaleId::parse(id).expect("test locale must be valid")
}
