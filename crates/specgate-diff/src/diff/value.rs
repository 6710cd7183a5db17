//! Scalar and set diff primitives used by every tree node.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// ValueDiff - a scalar field that changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueDiff {
    /// Value in base
    pub from: Value,
    /// Value in revision
    pub to: Value,
}

/// Diff two serializable scalar values; equal values collapse to `None`.
pub fn value_diff<T: Serialize + PartialEq>(base: &T, revision: &T) -> Option<ValueDiff> {
    if base == revision {
        return None;
    }
    Some(ValueDiff {
        from: serde_json::to_value(base).unwrap_or(Value::Null),
        to: serde_json::to_value(revision).unwrap_or(Value::Null),
    })
}

/// StringsDiff - a set of strings that changed
///
/// Order-insensitive: used for tags, required lists and similar name sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StringsDiff {
    /// Names in revision but not base
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,
    /// Names in base but not revision
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,
}

impl StringsDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}

/// Diff two string lists as sets; equal sets collapse to `None`.
pub fn strings_diff(base: &[String], revision: &[String]) -> Option<StringsDiff> {
    let base_set: BTreeSet<&str> = base.iter().map(String::as_str).collect();
    let revision_set: BTreeSet<&str> = revision.iter().map(String::as_str).collect();

    let diff = StringsDiff {
        added: revision_set
            .difference(&base_set)
            .map(|s| s.to_string())
            .collect(),
        deleted: base_set
            .difference(&revision_set)
            .map(|s| s.to_string())
            .collect(),
    };

    if diff.is_empty() {
        None
    } else {
        Some(diff)
    }
}

/// Compute `(added, deleted, both)` key sets between two key iterators.
///
/// The workhorse behind every keyed collection facet in the tree.
pub fn key_delta<'a>(
    base: impl Iterator<Item = &'a str>,
    revision: impl Iterator<Item = &'a str>,
) -> (Vec<String>, Vec<String>, Vec<String>) {
    let base_set: BTreeSet<&str> = base.collect();
    let revision_set: BTreeSet<&str> = revision.collect();

    let added = revision_set
        .difference(&base_set)
        .map(|s| s.to_string())
        .collect();
    let deleted = base_set
        .difference(&revision_set)
        .map(|s| s.to_string())
        .collect();
    let both = base_set
        .intersection(&revision_set)
        .map(|s| s.to_string())
        .collect();

    (added, deleted, both)
}
