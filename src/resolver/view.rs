//! Lazy fallback lookups over a pair of translation trees.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use serde_json::{
    Map,
    Value,
};

use crate::input::TranslationTree;

/// Separator used by [`ResolvedView::lookup`].
pub const DEFAULT_SEPARATOR: &str = ".";

/// Fallback side of a primary branch that has nothing to merge with.
static EMPTY: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);

/// Builds a view that prefers `primary` and falls back to `fallback`, level by level.
///
/// Nothing is merged up front; each [`ResolvedView::get`] decides on its own key.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use locale_fallback::input::TranslationTree;
/// use locale_fallback::resolver::resolve;
///
/// let en = TranslationTree::from_value(json!({ "NavBar": { "title": "Home" } })).unwrap();
/// let zh = TranslationTree::from_value(json!({ "NavBar": { "title": "首页", "subtitle": "欢迎" } })).unwrap();
///
/// let view = resolve(&en, &zh);
/// assert_eq!(view.lookup("NavBar.title").as_str(), Some("Home"));
/// assert_eq!(view.lookup("NavBar.subtitle").as_str(), Some("欢迎"));
/// ```
#[must_use]
pub fn resolve<'a>(primary: &'a TranslationTree, fallback: &'a TranslationTree) -> ResolvedView<'a> {
    ResolvedView::new(primary.as_map(), fallback.as_map())
}

/// A read-only translation tree backed by a primary and a fallback tree.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedView<'a> {
    primary: &'a Map<String, Value>,
    fallback: &'a Map<String, Value>,
}

/// Outcome of a single lookup.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    /// Both sides (or only the primary) hold a nested tree.
    View(ResolvedView<'a>),
    /// A value taken as-is from one side. May be a fallback-only subtree.
    Value(&'a Value),
    /// Neither side defines the key.
    Missing,
}

/// Value stored under `key`, treating `null` as absent.
fn defined<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

impl<'a> ResolvedView<'a> {
    #[must_use]
    pub const fn new(primary: &'a Map<String, Value>, fallback: &'a Map<String, Value>) -> Self {
        Self { primary, fallback }
    }

    /// Resolves one key.
    ///
    /// A defined primary value always wins, falsy ones included. Only when both
    /// sides are objects does the result merge further; a primary object facing a
    /// leaf (or nothing) keeps resolving against an empty fallback.
    #[must_use]
    pub fn get(&self, key: &str) -> Resolved<'a> {
        match (defined(self.primary, key), defined(self.fallback, key)) {
            (Some(Value::Object(primary)), Some(Value::Object(fallback))) => {
                Resolved::View(Self::new(primary, fallback))
            }
            (Some(Value::Object(primary)), _) => Resolved::View(Self::new(primary, &EMPTY)),
            (Some(value), _) | (None, Some(value)) => Resolved::Value(value),
            (None, None) => Resolved::Missing,
        }
    }

    /// Resolves a `separator`-delimited path one segment at a time.
    ///
    /// An empty segment never matches.
    #[must_use]
    pub fn get_path(&self, path: &str, separator: &str) -> Resolved<'a> {
        let mut current = Resolved::View(*self);
        for segment in path.split(separator) {
            if segment.is_empty() {
                return Resolved::Missing;
            }
            current = current.get(segment);
            if current.is_missing() {
                break;
            }
        }
        current
    }

    /// [`Self::get_path`] with the `.` separator.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Resolved<'a> {
        self.get_path(path, DEFAULT_SEPARATOR)
    }

    /// Keys that resolve to something, in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<&'a str> {
        let primary = self.primary.iter().filter(|(_, v)| !v.is_null()).map(|(k, _)| k.as_str());
        let fallback = self.fallback.iter().filter(|(_, v)| !v.is_null()).map(|(k, _)| k.as_str());
        primary.chain(fallback).collect::<BTreeSet<_>>().into_iter().collect()
    }

    /// Eagerly merges the whole view into an owned tree.
    ///
    /// Every path of the result holds exactly what a lazy lookup would return.
    #[must_use]
    pub fn materialize(&self) -> TranslationTree {
        let map: Map<String, Value> = self
            .keys()
            .into_iter()
            .filter_map(|key| self.get(key).to_value().map(|value| (key.to_string(), value)))
            .collect();
        TranslationTree::from(map)
    }
}

impl<'a> Resolved<'a> {
    /// Continues the lookup one level down.
    ///
    /// A plain object value (a fallback-only subtree) is navigated directly;
    /// leaves and missing values yield [`Resolved::Missing`].
    #[must_use]
    pub fn get(&self, key: &str) -> Self {
        match self {
            Self::View(view) => view.get(key),
            Self::Value(Value::Object(map)) => ResolvedView::new(map, &EMPTY).get(key),
            Self::Value(_) | Self::Missing => Self::Missing,
        }
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// The string leaf, if this is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::Value(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    /// The borrowed value, unless this is a merged view or missing.
    #[must_use]
    pub const fn value(&self) -> Option<&'a Value> {
        match self {
            Self::Value(value) => Some(*value),
            Self::View(_) | Self::Missing => None,
        }
    }

    #[must_use]
    pub const fn as_view(&self) -> Option<ResolvedView<'a>> {
        match self {
            Self::View(view) => Some(*view),
            Self::Value(_) | Self::Missing => None,
        }
    }

    /// Owned copy of the result, materializing nested views.
    #[must_use]
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::View(view) => Some(view.materialize().into_value()),
            Self::Value(Value::Object(map)) => {
                Some(ResolvedView::new(map, &EMPTY).materialize().into_value())
            }
            Self::Value(value) => Some((*value).clone()),
            Self::Missing => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::input::flatten;
    use crate::test_utils::tree;

    fn nav_trees() -> (TranslationTree, TranslationTree) {
        let primary = tree(json!({ "NavBar": { "title": "Home" } }));
        let fallback = tree(json!({ "NavBar": { "title": "首页", "subtitle": "欢迎" } }));
        (primary, fallback)
    }

    #[googletest::test]
    fn test_primary_only_key() {
        let primary = tree(json!({ "only": "primary" }));
        let fallback = tree(json!({}));

        expect_that!(resolve(&primary, &fallback).get("only").value(), some(eq(&json!("primary"))));
    }

    #[googletest::test]
    fn test_fallback_only_key() {
        let primary = tree(json!({}));
        let fallback = tree(json!({ "only": "fallback" }));

        expect_that!(resolve(&primary, &fallback).get("only").as_str(), some(eq("fallback")));
    }

    #[googletest::test]
    fn test_key_missing_from_both() {
        let (primary, fallback) = nav_trees();
        let view = resolve(&primary, &fallback);

        expect_that!(view.get("Footer").is_missing(), eq(true));
        expect_that!(view.lookup("NavBar.missing").is_missing(), eq(true));
        expect_that!(view.lookup("NavBar.title.deeper").is_missing(), eq(true));
        expect_that!(view.lookup("Footer.a.b.c").is_missing(), eq(true));
    }

    #[googletest::test]
    fn test_nav_bar_scenario() {
        let (primary, fallback) = nav_trees();
        let view = resolve(&primary, &fallback);

        expect_that!(view.get("NavBar").get("title").as_str(), some(eq("Home")));
        expect_that!(view.get("NavBar").get("subtitle").as_str(), some(eq("欢迎")));
    }

    #[googletest::test]
    fn test_empty_primary_scenario() {
        let primary = tree(json!({}));
        let fallback = tree(json!({ "NavBar": { "title": "首页" } }));
        let view = resolve(&primary, &fallback);

        // Nothing to merge with, so the fallback subtree comes back as-is.
        expect_that!(view.get("NavBar").value(), some(eq(&json!({ "title": "首页" }))));
        expect_that!(view.get("NavBar").get("title").as_str(), some(eq("首页")));
    }

    #[rstest]
    #[case::zero(json!(0))]
    #[case::false_(json!(false))]
    #[case::empty_string(json!(""))]
    #[case::empty_list(json!([]))]
    fn test_falsy_primary_value_does_not_fall_back(#[case] value: Value) {
        let primary = tree(json!({ "a": value.clone() }));
        let fallback = tree(json!({ "a": "X" }));

        assert_eq!(resolve(&primary, &fallback).get("a").value(), Some(&value));
    }

    #[googletest::test]
    fn test_null_primary_value_falls_back() {
        let primary = tree(json!({ "a": null, "b": null }));
        let fallback = tree(json!({ "a": "X" }));
        let view = resolve(&primary, &fallback);

        expect_that!(view.get("a").as_str(), some(eq("X")));
        expect_that!(view.get("b").is_missing(), eq(true));
    }

    #[googletest::test]
    fn test_recursive_equivalence_at_depth() {
        let primary = tree(json!({
            "Server": { "Status": { "online": "Online", "players": { "one": "1 player" } } }
        }));
        let fallback = tree(json!({
            "Server": { "Status": { "offline": "离线", "players": { "other": "{n} 玩家" } } }
        }));
        let view = resolve(&primary, &fallback);

        let primary_child = tree(primary.get("Server").unwrap()["Status"].clone());
        let fallback_child = tree(fallback.get("Server").unwrap()["Status"].clone());
        let direct = resolve(&primary_child, &fallback_child);

        let nested = view.get("Server").get("Status");
        for path in ["online", "offline", "players.one", "players.other", "players.few"] {
            let via_nested = nested.as_view().unwrap().lookup(path).to_value();
            expect_that!(via_nested, eq(&direct.lookup(path).to_value()), "path {path}");
        }
        expect_that!(nested.get("players").get("other").as_str(), some(eq("{n} 玩家")));
    }

    #[googletest::test]
    fn test_primary_object_over_fallback_leaf() {
        let primary = tree(json!({ "NavBar": { "title": "Home" } }));
        let fallback = tree(json!({ "NavBar": "导航" }));
        let view = resolve(&primary, &fallback);

        let nav = view.get("NavBar");
        expect_that!(nav.as_view().is_some(), eq(true));
        expect_that!(nav.get("title").as_str(), some(eq("Home")));
        expect_that!(nav.get("subtitle").is_missing(), eq(true));
    }

    #[googletest::test]
    fn test_primary_leaf_over_fallback_object() {
        let primary = tree(json!({ "NavBar": "Navigation" }));
        let fallback = tree(json!({ "NavBar": { "title": "首页" } }));
        let view = resolve(&primary, &fallback);

        expect_that!(view.get("NavBar").as_str(), some(eq("Navigation")));
        expect_that!(view.lookup("NavBar.title").is_missing(), eq(true));
    }

    #[googletest::test]
    fn test_lists_are_leaves() {
        let primary = tree(json!({ "tags": ["survival"] }));
        let fallback = tree(json!({ "tags": ["生存", "创造"], "modes": ["a", "b"] }));
        let view = resolve(&primary, &fallback);

        expect_that!(view.get("tags").value(), some(eq(&json!(["survival"]))));
        expect_that!(view.get("modes").value(), some(eq(&json!(["a", "b"]))));
        expect_that!(view.lookup("modes.0").is_missing(), eq(true));
    }

    #[googletest::test]
    fn test_repeated_lookups_are_identical() {
        let (primary, fallback) = nav_trees();
        let view = resolve(&primary, &fallback);

        let first = view.lookup("NavBar.subtitle").to_value();
        let second = view.lookup("NavBar.subtitle").to_value();

        expect_that!(first, eq(&second));
        expect_that!(primary, eq(&nav_trees().0));
        expect_that!(fallback, eq(&nav_trees().1));
    }

    #[rstest]
    #[case::leading_separator(".NavBar")]
    #[case::trailing_separator("NavBar.")]
    #[case::double_separator("NavBar..title")]
    #[case::empty("")]
    fn test_empty_segments_never_match(#[case] path: &str) {
        let (primary, fallback) = nav_trees();

        assert!(resolve(&primary, &fallback).lookup(path).is_missing());
    }

    #[googletest::test]
    fn test_custom_separator() {
        let (primary, fallback) = nav_trees();

        expect_that!(
            resolve(&primary, &fallback).get_path("NavBar/subtitle", "/").as_str(),
            some(eq("欢迎"))
        );
    }

    #[googletest::test]
    fn test_keys_union() {
        let primary = tree(json!({ "b": 1, "gone": null }));
        let fallback = tree(json!({ "a": 2, "b": 3, "gone": null }));

        expect_that!(resolve(&primary, &fallback).keys(), elements_are![eq(&"a"), eq(&"b")]);
    }

    #[googletest::test]
    fn test_materialize_agrees_with_lazy_lookup() {
        let primary = tree(json!({
            "NavBar": { "title": "Home", "links": ["Docs"], "dropped": null },
            "Server": "Servers",
            "count": 0
        }));
        let fallback = tree(json!({
            "NavBar": { "title": "首页", "subtitle": "欢迎", "links": ["文档", "论坛"] },
            "Server": { "online": "在线" },
            "Footer": { "copyright": "©", "empty": null },
            "count": 5
        }));
        let view = resolve(&primary, &fallback);

        let merged = view.materialize();
        let merged_paths = flatten(&merged, ".");

        for (path, value) in &merged_paths {
            expect_that!(view.lookup(path).to_value(), some(eq(value)), "path {path}");
        }
        for path in flatten(&primary, ".").keys().chain(flatten(&fallback, ".").keys()) {
            expect_that!(
                view.lookup(path).to_value(),
                eq(&merged_paths.get(path).cloned()),
                "path {path}"
            );
        }
        expect_that!(
            merged.into_value(),
            eq(&json!({
                "NavBar": { "title": "Home", "subtitle": "欢迎", "links": ["Docs"] },
                "Server": "Servers",
                "Footer": { "copyright": "©" },
                "count": 0
            }))
        );
    }
}
