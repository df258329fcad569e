//! Translation tree input definitions

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Failed to parse translation data: {0}")]
    Parse(String),

    #[error("Failed to parse TOML translation data: {0}")]
    Toml(String),

    #[error("Translation data is empty")]
    Empty,

    #[error("Translation root must be an object, found {0}")]
    NotAnObject(NodeKind),
}

/// On-disk format of a translation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// `.json` and `.jsonc`. Comments and trailing commas are accepted in both.
    Json,
    Toml,
}

impl SourceFormat {
    /// Picks the format from the file extension. Anything but `.toml` is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Shape of a single node in a translation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A nested tree (JSON object).
    Composite,
    /// A string, number or boolean.
    Leaf,
    /// An array. Lists are never merged, so they resolve like leaves.
    List,
    /// `null`, which resolves as if the key were absent.
    Null,
}

impl NodeKind {
    #[must_use]
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Composite,
            Value::Array(_) => Self::List,
            Value::Null => Self::Null,
            Value::String(_) | Value::Number(_) | Value::Bool(_) => Self::Leaf,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Composite => "object",
            Self::Leaf => "leaf value",
            Self::List => "array",
            Self::Null => "null",
        };
        f.write_str(name)
    }
}

/// Shared empty tree.
static EMPTY_TREE: LazyLock<TranslationTree> = LazyLock::new(TranslationTree::new);

/// One locale's translatable strings, organized hierarchically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTree(Map<String, Value>);

impl TranslationTree {
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// A shared, always-empty tree.
    #[must_use]
    pub fn empty() -> &'static Self {
        &EMPTY_TREE
    }

    /// Parses JSON text. Comments and trailing commas are accepted.
    ///
    /// # Errors
    /// - Syntax error
    /// - Empty document
    /// - Root value is not an object
    pub fn from_json_str(text: &str) -> Result<Self, TreeError> {
        let value = jsonc_parser::parse_to_serde_value(text, &jsonc_parser::ParseOptions::default())
            .map_err(|e| TreeError::Parse(e.to_string()))?
            .ok_or(TreeError::Empty)?;

        Self::from_value(value)
    }

    /// Parses a TOML document. An empty document is an empty tree.
    ///
    /// # Errors
    /// Returns [`TreeError::Toml`] on a syntax error.
    pub fn from_toml_str(text: &str) -> Result<Self, TreeError> {
        let map: Map<String, Value> =
            toml::from_str(text).map_err(|e| TreeError::Toml(e.to_string()))?;

        Ok(Self(map))
    }

    /// # Errors
    /// See [`Self::from_json_str`] and [`Self::from_toml_str`].
    pub fn parse(text: &str, format: SourceFormat) -> Result<Self, TreeError> {
        match format {
            SourceFormat::Json => Self::from_json_str(text),
            SourceFormat::Toml => Self::from_toml_str(text),
        }
    }

    /// # Errors
    /// Returns [`TreeError::NotAnObject`] unless `value` is an object.
    pub fn from_value(value: Value) -> Result<Self, TreeError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(TreeError::NotAnObject(NodeKind::of(&other))),
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Nests `tree` under `namespace` and merges it in.
    ///
    /// Used when one locale is split across several files, e.g.
    /// `locales/en-US/NavBar.json` becomes the `NavBar` section.
    pub fn insert_namespaced(&mut self, namespace: &str, tree: Self, origin: &str) {
        let mut wrapper = Map::new();
        wrapper.insert(namespace.to_string(), tree.into_value());
        self.merge_from(Self(wrapper), origin);
    }

    /// Deep-merges `other` into this tree.
    ///
    /// Keys already present win, except `null`, which counts as absent and is
    /// replaced. Objects present on both sides are merged recursively; any
    /// other collision is logged and the incoming value dropped.
    pub fn merge_from(&mut self, other: Self, origin: &str) {
        merge_maps(&mut self.0, other.0, origin, None);
    }
}

impl From<Map<String, Value>> for TranslationTree {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Recursive worker for [`TranslationTree::merge_from`].
fn merge_maps(
    target: &mut Map<String, Value>,
    incoming: Map<String, Value>,
    origin: &str,
    prefix: Option<&str>,
) {
    for (key, value) in incoming {
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}.{key}"));
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                merge_maps(existing, nested, origin, Some(&full_key));
            }
            (Some(existing), value) if existing.is_null() => {
                *existing = value;
            }
            (Some(_), _) => {
                tracing::warn!(key = %full_key, origin, "Duplicate translation key, keeping first");
            }
            (None, value) => {
                target.insert(key, value);
            }
        }
    }
}

/// Flatten a tree into separator-joined leaf paths.
///
/// Arrays are kept whole as leaf values and `null` entries are skipped,
/// mirroring how lookups treat them.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use locale_fallback::input::tree::{TranslationTree, flatten};
///
/// let tree = TranslationTree::from_value(json!({
///     "NavBar": { "title": "Home", "links": ["a", "b"] }
/// })).unwrap();
///
/// let flattened = flatten(&tree, ".");
/// assert_eq!(flattened.get("NavBar.title"), Some(&json!("Home")));
/// assert_eq!(flattened.get("NavBar.links"), Some(&json!(["a", "b"])));
/// ```
#[must_use]
pub fn flatten(tree: &TranslationTree, separator: &str) -> BTreeMap<String, Value> {
    let mut result = BTreeMap::new();
    flatten_map(tree.as_map(), separator, None, &mut result);
    result
}

/// Recursive worker for [`flatten`].
fn flatten_map(
    map: &Map<String, Value>,
    separator: &str,
    prefix: Option<&str>,
    result: &mut BTreeMap<String, Value>,
) {
    for (key, value) in map {
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
        match value {
            Value::Object(nested) => flatten_map(nested, separator, Some(&full_key), result),
            Value::Null => {}
            leaf => {
                result.insert(full_key, leaf.clone());
            }
        }
    }
}
