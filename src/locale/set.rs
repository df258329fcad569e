//! The loaded translations of every locale.

use std::collections::BTreeMap;

use super::{
    LocaleError,
    LocaleId,
};
use crate::input::TranslationTree;
use crate::resolver::{
    ResolvedView,
    resolve,
};

/// Translation trees keyed by locale.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct LocaleSet {
    /// Trees per locale, ordered by identifier
    trees: BTreeMap<LocaleId, TranslationTree>,
}

impl LocaleSet {
    #[must_use]
    pub fn new() -> Self {
        Self { trees: BTreeMap::new() }
    }

    /// Adds `tree` to `locale`, merging with anything already loaded for it.
    ///
    /// With a namespace the tree is nested under that key first.
    pub fn insert(
        &mut self,
        locale: LocaleId,
        namespace: Option<&str>,
        tree: TranslationTree,
        origin: &str,
    ) {
        let entry = self.trees.entry(locale).or_default();
        match namespace {
            Some(namespace) => entry.insert_namespaced(namespace, tree, origin),
            None => entry.merge_from(tree, origin),
        }
    }

    #[must_use]
    pub fn get(&self, locale: &LocaleId) -> Option<&TranslationTree> {
        self.trees.get(locale)
    }

    #[must_use]
    pub fn contains(&self, locale: &LocaleId) -> bool {
        self.trees.contains_key(locale)
    }

    /// Loaded locales in sorted order.
    pub fn locales(&self) -> impl Iterator<Item = &LocaleId> {
        self.trees.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Fallback view of `primary` over `fallback`.
    ///
    /// # Errors
    /// [`LocaleError::UnknownLocale`] if either locale is not loaded.
    pub fn resolve(
        &self,
        primary: &LocaleId,
        fallback: &LocaleId,
    ) -> Result<ResolvedView<'_>, LocaleError> {
        let primary_tree =
            self.get(primary).ok_or_else(|| LocaleError::UnknownLocale(primary.clone()))?;
        let fallback_tree =
            self.get(fallback).ok_or_else(|| LocaleError::UnknownLocale(fallback.clone()))?;
        Ok(resolve(primary_tree, fallback_tree))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::test_utils::{
        locale,
        tree,
    };

    #[googletest::test]
    fn test_insert_merges_files_of_one_locale() {
        let mut set = LocaleSet::new();
        set.insert(locale("en-US"), None, tree(json!({ "NavBar": { "title": "Home" } })), "a");
        set.insert(
            locale("en-US"),
            Some("Server"),
            tree(json!({ "players": "Players" })),
            "en-US/Server.json",
        );
        set.insert(locale("zh-CN"), None, tree(json!({})), "b");

        expect_that!(set.len(), eq(2));
        expect_that!(
            set.get(&locale("en-US")).map(|t| t.clone().into_value()),
            some(eq(&json!({
                "NavBar": { "title": "Home" },
                "Server": { "players": "Players" }
            })))
        );
        let locales: Vec<String> = set.locales().map(ToString::to_string).collect();
        expect_that!(locales, elements_are![eq("en-US"), eq("zh-CN")]);
    }

    #[googletest::test]
    fn test_resolve_uses_both_locales() {
        let mut set = LocaleSet::new();
        set.insert(locale("en-US"), None, tree(json!({ "a": "A" })), "en");
        set.insert(locale("zh-CN"), None, tree(json!({ "a": "甲", "b": "乙" })), "zh");

        let view = set.resolve(&locale("en-US"), &locale("zh-CN")).unwrap();

        expect_that!(view.get("a").as_str(), some(eq("A")));
        expect_that!(view.get("b").as_str(), some(eq("乙")));
    }

    #[googletest::test]
    fn test_resolve_unknown_locale() {
        let mut set = LocaleSet::new();
        set.insert(locale("en-US"), None, tree(json!({})), "en");

        let result = set.resolve(&locale("en-US"), &locale("ja"));

        assert!(matches!(result, Err(LocaleError::UnknownLocale(id)) if id.as_str() == "ja"));
        expect_that!(set.contains(&locale("ja")), eq(false));
    }
}
