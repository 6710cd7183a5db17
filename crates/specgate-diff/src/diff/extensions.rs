//! Diff over `x-*` extension fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::{DiffConfig, ExcludeElement};
use crate::diff::value::ValueDiff;

/// ExtensionsDiff - changes to the `x-*` fields of one element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensionsDiff {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, ValueDiff>,
}

impl ExtensionsDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }
}

/// True when a flattened-capture key is an extension the config wants diffed.
fn relevant(config: &DiffConfig, key: &str) -> bool {
    if !key.starts_with("x-") {
        return false;
    }
    match &config.exclude_extensions_pattern {
        Some(pattern) => !pattern.is_match(key),
        None => true,
    }
}

/// Diff the extension maps of one element; empty diffs collapse to `None`.
pub fn get_extensions_diff(
    config: &DiffConfig,
    base: &BTreeMap<String, Value>,
    revision: &BTreeMap<String, Value>,
) -> Option<ExtensionsDiff> {
    if config.excludes(ExcludeElement::Extensions) {
        return None;
    }

    let mut result = ExtensionsDiff::default();

    for (key, base_value) in base {
        if !relevant(config, key) {
            continue;
        }
        match revision.get(key) {
            None => result.deleted.push(key.clone()),
            Some(revision_value) if revision_value != base_value => {
                result.modified.insert(
                    key.clone(),
                    ValueDiff {
                        from: base_value.clone(),
                        to: revision_value.clone(),
                    },
                );
            }
            Some(_) => {}
        }
    }

    for key in revision.keys() {
        if relevant(config, key) && !base.contains_key(key) {
            result.added.push(key.clone());
        }
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extensions(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_non_extension_keys_are_ignored() {
        let base = extensions(&[("summary", json!("a"))]);
        let revision = extensions(&[("summary", json!("b"))]);
        assert_eq!(get_extensions_diff(&DiffConfig::new(), &base, &revision), None);
    }

    #[test]
    fn test_added_deleted_modified_facets() {
        let base = extensions(&[("x-old", json!(1)), ("x-kept", json!("a"))]);
        let revision = extensions(&[("x-new", json!(2)), ("x-kept", json!("b"))]);

        let diff = get_extensions_diff(&DiffConfig::new(), &base, &revision)
            .expect("differs");
        assert_eq!(diff.added, vec!["x-new"]);
        assert_eq!(diff.deleted, vec!["x-old"]);
        assert_eq!(diff.modified["x-kept"].to, json!("b"));
    }

    #[test]
    fn test_exclusion_pattern_filters_keys() {
        let config = DiffConfig {
            exclude_extensions_pattern: Some(regex::Regex::new("^x-internal-").unwrap()),
            ..DiffConfig::new()
        };
        let base = extensions(&[("x-internal-build", json!(1))]);
        let revision = extensions(&[("x-internal-build", json!(2))]);
        assert_eq!(get_extensions_diff(&config, &base, &revision), None);
    }
}
