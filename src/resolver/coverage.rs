//! Which keys of a primary locale are served by its fallback.

use serde_json::{
    Map,
    Value,
};

use crate::input::TranslationTree;

/// Leaf paths that only the fallback defines, sorted.
///
/// A path is reported when looking it up in the merged view would return the
/// fallback's value. Paths shadowed by a primary leaf higher up are not
/// reported: the primary value wins there and the fallback is never consulted.
#[must_use]
pub fn missing_keys(
    primary: &TranslationTree,
    fallback: &TranslationTree,
    separator: &str,
) -> Vec<String> {
    let mut missing = Vec::new();
    collect_missing(Some(primary.as_map()), fallback.as_map(), separator, None, &mut missing);
    missing.sort();
    missing
}

/// Recursive worker for [`missing_keys`].
fn collect_missing(
    primary: Option<&Map<String, Value>>,
    fallback: &Map<String, Value>,
    separator: &str,
    prefix: Option<&str>,
    missing: &mut Vec<String>,
) {
    for (key, fallback_value) in fallback {
        if fallback_value.is_null() {
            continue;
        }
        let full_key = prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
        let primary_value = primary.and_then(|map| map.get(key)).filter(|v| !v.is_null());

        match (primary_value, fallback_value) {
            (None, Value::Object(nested)) => {
                collect_missing(None, nested, separator, Some(&full_key), missing);
            }
            (None, _) => missing.push(full_key),
            (Some(Value::Object(primary_nested)), Value::Object(nested)) => {
                collect_missing(Some(primary_nested), nested, separator, Some(&full_key), missing);
            }
            (Some(_), _) => {}
        }
    }
}
