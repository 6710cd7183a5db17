//! Path-level comparison: endpoint matching, rewriting, Added/Deleted/Modified.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use specgate_model::{PathItem, Spec};

use crate::config::DiffConfig;
use crate::diff::path_item::{get_path_diff, PathDiff};
use crate::errors::{DiffError, DiffErrorKind, Result};
use crate::sources::OperationsSourcesMap;

/// PathsDiff - the top collection facet of the tree
///
/// Facet keys are rewritten display paths: the revision's spelling for
/// added/modified entries, the base's for deleted ones. `base`/`revision`
/// hold the path items under those same keys for rule context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathsDiff {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, PathDiff>,

    /// Base path items keyed by the same display paths as the facets
    #[serde(skip)]
    pub base: BTreeMap<String, PathItem>,

    /// Revision path items keyed by the same display paths as the facets
    #[serde(skip)]
    pub revision: BTreeMap<String, PathItem>,
}

impl PathsDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }
}

/// One side's paths after rewriting, keyed by the matching key.
pub(crate) struct PathTable {
    /// normalized matching key -> (display path, item, source document)
    pub entries: BTreeMap<String, (String, PathItem, String)>,
}

/// Rewrite one path string per config: strip prefix, then add prefix.
fn rewrite(path: &str, prefix: &str, strip_prefix: &str) -> String {
    let stripped = path.strip_prefix(strip_prefix).unwrap_or(path);
    format!("{}{}", prefix, stripped)
}

/// The endpoint matching key for a display path.
///
/// When path-parameter names are excluded from matching, `{name}` segments
/// collapse to `{}` so renamed parameters still pair up.
fn matching_key(display: &str, include_path_params: bool) -> String {
    if include_path_params {
        return display.to_string();
    }
    let mut key = String::with_capacity(display.len());
    let mut in_param = false;
    for c in display.chars() {
        match c {
            '{' => {
                in_param = true;
                key.push('{');
            }
            '}' => {
                in_param = false;
                key.push('}');
            }
            _ if in_param => {}
            _ => key.push(c),
        }
    }
    key
}

/// Collect one side's rewritten paths from one or more documents.
///
/// Later documents win on collision, which is the composed-mode aggregation
/// rule: the last file defining a path owns it.
pub(crate) fn collect_paths(
    specs: &[&Spec],
    config: &DiffConfig,
    prefix: &str,
    strip_prefix: &str,
) -> PathTable {
    let mut entries = BTreeMap::new();
    for spec in specs {
        for (raw_path, item) in &spec.paths {
            let display = rewrite(raw_path, prefix, strip_prefix);
            if let Some(pattern) = &config.match_path {
                if !pattern.is_match(&display) {
                    continue;
                }
            }
            let key = matching_key(&display, config.include_path_params);
            entries.insert(key, (display, item.clone(), spec.source.clone()));
        }
    }
    PathTable { entries }
}

/// Diff two path tables, registering every operation's source as it goes.
pub(crate) fn get_paths_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base_table: &PathTable,
    revision_table: &PathTable,
    sources: &mut OperationsSourcesMap,
) -> Result<Option<PathsDiff>> {
    let mut result = PathsDiff::default();

    for (key, (display, item, source)) in &revision_table.entries {
        if !base_table.entries.contains_key(key) {
            result.added.push(display.clone());
            result.revision.insert(display.clone(), item.clone());
            for (method, _) in item.operations() {
                sources.insert_revision(display, method, source);
            }
        }
    }

    for (key, (base_display, base_item, base_source)) in &base_table.entries {
        let Some((revision_display, revision_item, revision_source)) =
            revision_table.entries.get(key)
        else {
            result.deleted.push(base_display.clone());
            result.base.insert(base_display.clone(), base_item.clone());
            for (method, _) in base_item.operations() {
                sources.insert_base(base_display, method, base_source);
            }
            continue;
        };

        // Present on both sides: keyed by the revision's spelling
        for (method, _) in base_item.operations() {
            sources.insert_base(revision_display, method, base_source);
        }
        for (method, _) in revision_item.operations() {
            sources.insert_revision(revision_display, method, revision_source);
        }

        if let Some(diff) =
            get_path_diff(config, base_spec, revision_spec, base_item, revision_item)?
        {
            result.modified.insert(revision_display.clone(), diff);
        }
        result
            .base
            .insert(revision_display.clone(), base_item.clone());
        result
            .revision
            .insert(revision_display.clone(), revision_item.clone());
    }

    if result.is_empty() {
        return Ok(None);
    }

    // A facet key must have context on the side that claims it
    for path in &result.added {
        if !result.revision.contains_key(path) {
            return Err(DiffError::new(DiffErrorKind::InternalInvariant)
                .with_op("get_paths_diff")
                .with_element(path.clone())
                .with_message("added path has no revision object"));
        }
    }
    for path in &result.deleted {
        if !result.base.contains_key(path) {
            return Err(DiffError::new(DiffErrorKind::InternalInvariant)
                .with_op("get_paths_diff")
                .with_element(path.clone())
                .with_message("deleted path has no base object"));
        }
    }

    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_strip_then_prefix() {
        assert_eq!(rewrite("/v1/pets", "/api", "/v1"), "/api/pets");
        assert_eq!(rewrite("/pets", "", "/v1"), "/pets");
    }

    #[test]
    fn test_matching_key_collapses_param_names() {
        assert_eq!(matching_key("/pets/{petId}", false), "/pets/{}");
        assert_eq!(matching_key("/pets/{petId}", true), "/pets/{petId}");
        assert_eq!(
            matching_key("/a/{x}/b/{y}", false),
            matching_key("/a/{id}/b/{name}", false)
        );
    }
}
