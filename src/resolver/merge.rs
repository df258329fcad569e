//! Build-time alternative to lazy lookups: merge a locale pair once.

use super::resolve;
use crate::input::TranslationTree;

/// Fully merges `primary` over `fallback`.
///
/// Same result as [`super::ResolvedView::materialize`]; handy when the merged
/// tree is written out or handed to code that expects a plain tree.
#[must_use]
pub fn materialize(primary: &TranslationTree, fallback: &TranslationTree) -> TranslationTree {
    resolve(primary, fallback).materialize()
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::tree;

    #[googletest::test]
    fn test_materialize_navbar() {
        let primary = tree(json!({ "NavBar": { "title": "Home" } }));
        let fallback = tree(json!({ "NavBar": { "title": "首页", "subtitle": "欢迎" } }));

        let merged = materialize(&primary, &fallback);

        expect_that!(
            merged.into_value(),
            eq(&json!({ "NavBar": { "title": "Home", "subtitle": "欢迎" } }))
        );
    }

    #[googletest::test]
    fn test_materialize_primary_branch_without_fallback() {
        let primary = tree(json!({ "Auth": { "login": "Log in", "hint": null } }));
        let fallback = tree(json!({ "Auth": "登录" }));

        let merged = materialize(&primary, &fallback);

        expect_that!(merged.into_value(), eq(&json!({ "Auth": { "login": "Log in" } })));
    }

    #[googletest::test]
    fn test_materialize_empty_inputs() {
        let merged = materialize(&TranslationTree::new(), &TranslationTree::new());

        expect_that!(merged.is_empty(), eq(true));
    }
}
