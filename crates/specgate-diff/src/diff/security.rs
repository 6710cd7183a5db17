//! Security requirement and server comparison.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use specgate_model::{SecurityRequirement, Server};

use crate::diff::value::{value_diff, ValueDiff};

/// SecurityDiff - security requirements added or removed
///
/// Requirements are compared as canonical sets: each requirement (a scheme
/// map with its scopes) is rendered to canonical JSON and matched by that
/// string, so reordering schemes or requirements is not a change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityDiff {
    /// Canonical requirements present only in revision
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,

    /// Canonical requirements present only in base
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,
}

impl SecurityDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}

fn canonical(requirement: &SecurityRequirement) -> String {
    // BTreeMap keys are ordered, so this is deterministic
    serde_json::to_string(requirement).unwrap_or_default()
}

/// Diff two effective requirement lists; empty diffs collapse to `None`.
pub(crate) fn get_security_diff(
    base: &[SecurityRequirement],
    revision: &[SecurityRequirement],
) -> Option<SecurityDiff> {
    let base_set: BTreeMap<String, ()> =
        base.iter().map(|r| (canonical(r), ())).collect();
    let revision_set: BTreeMap<String, ()> =
        revision.iter().map(|r| (canonical(r), ())).collect();

    let result = SecurityDiff {
        added: revision_set
            .keys()
            .filter(|k| !base_set.contains_key(*k))
            .cloned()
            .collect(),
        deleted: base_set
            .keys()
            .filter(|k| !revision_set.contains_key(*k))
            .cloned()
            .collect(),
    };

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

/// ServersDiff - servers added/deleted/modified by URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServersDiff {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,

    /// URL -> description change
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, ValueDiff>,
}

impl ServersDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }
}

/// Diff two server lists by URL; empty diffs collapse to `None`.
pub(crate) fn get_servers_diff(base: &[Server], revision: &[Server]) -> Option<ServersDiff> {
    let base_by_url: BTreeMap<&str, &Server> =
        base.iter().map(|s| (s.url.as_str(), s)).collect();
    let revision_by_url: BTreeMap<&str, &Server> =
        revision.iter().map(|s| (s.url.as_str(), s)).collect();

    let mut result = ServersDiff::default();

    for (url, revision_server) in &revision_by_url {
        match base_by_url.get(url) {
            None => result.added.push(url.to_string()),
            Some(base_server) => {
                if let Some(diff) =
                    value_diff(&base_server.description, &revision_server.description)
                {
                    result.modified.insert(url.to_string(), diff);
                }
            }
        }
    }
    for url in base_by_url.keys() {
        if !revision_by_url.contains_key(url) {
            result.deleted.push(url.to_string());
        }
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}
