//! The typed diff tree and the comparison entry points.

pub mod content;
pub mod extensions;
pub mod headers;
pub mod operation;
pub mod operations;
pub mod parameters;
pub mod path_item;
pub mod paths;
pub mod request_body;
pub mod responses;
pub mod schema;
pub mod security;
pub mod value;

use serde::{Deserialize, Serialize};
use tracing::debug;

use specgate_model::Spec;

use crate::config::{DiffConfig, ExcludeElement};
use crate::diff::extensions::{get_extensions_diff, ExtensionsDiff};
use crate::diff::paths::{collect_paths, get_paths_diff, PathsDiff};
use crate::diff::security::{get_security_diff, get_servers_diff, SecurityDiff, ServersDiff};
use crate::diff::value::{value_diff, ValueDiff};
use crate::errors::Result;
use crate::sources::OperationsSourcesMap;

/// InfoDiff - changes to the document metadata block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfoDiff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff>,
}

impl InfoDiff {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.version.is_none() && self.description.is_none()
    }
}

/// Diff - the root of the typed difference tree
///
/// A `None` facet means "no change at this level"; `Diff::is_empty()` holds
/// iff the documents are semantically identical under the active config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec_version: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<InfoDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathsDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<ServersDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.spec_version.is_none()
            && self.info.is_none()
            && self.paths.is_none()
            && self.security.is_none()
            && self.servers.is_none()
            && self.extensions.is_none()
    }
}

fn get_info_diff(config: &DiffConfig, base: &Spec, revision: &Spec) -> Option<InfoDiff> {
    let mut result = InfoDiff::default();

    if !config.excludes(ExcludeElement::Title) {
        result.title = value_diff(&base.info.title, &revision.info.title);
    }
    result.version = value_diff(&base.info.version, &revision.info.version);
    if !config.excludes(ExcludeElement::Description) {
        result.description = value_diff(&base.info.description, &revision.info.description);
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

fn compare_tables(
    config: &DiffConfig,
    base: &Spec,
    revision: &Spec,
    base_specs: &[&Spec],
    revision_specs: &[&Spec],
) -> Result<(Diff, OperationsSourcesMap)> {
    let base_table = collect_paths(
        base_specs,
        config,
        &config.prefix_base,
        &config.strip_prefix_base,
    );
    let revision_table = collect_paths(
        revision_specs,
        config,
        &config.prefix_revision,
        &config.strip_prefix_revision,
    );

    let mut sources = OperationsSourcesMap::new();

    let diff = Diff {
        spec_version: value_diff(&base.openapi, &revision.openapi),
        info: get_info_diff(config, base, revision),
        paths: get_paths_diff(
            config,
            base,
            revision,
            &base_table,
            &revision_table,
            &mut sources,
        )?,
        security: get_security_diff(&base.security, &revision.security),
        servers: get_servers_diff(&base.servers, &revision.servers),
        extensions: get_extensions_diff(config, &base.extensions, &revision.extensions),
    };

    debug!(
        empty = diff.is_empty(),
        base = %base.source,
        revision = %revision.source,
        "comparison complete"
    );

    Ok((diff, sources))
}

/// Compare two documents and build the diff tree plus the source index.
///
/// Pure and deterministic: repeated invocations over the same inputs yield
/// structurally equal trees.
///
/// # Errors
///
/// `InternalInvariant` if a collection facet references a key with no
/// object on either side (never expected on loader-validated input).
pub fn compare(
    base: &Spec,
    revision: &Spec,
    config: &DiffConfig,
) -> Result<(Diff, OperationsSourcesMap)> {
    compare_tables(config, base, revision, &[base], &[revision])
}

/// Compare two document sets in composed mode.
///
/// Paths are aggregated across all documents on each side (later documents
/// win on path collision) before one comparison runs; the source index
/// records the actual file each operation came from. Document-level
/// metadata (version, info, security, servers, extensions) is taken from
/// the first document on each side.
pub fn compare_composed(
    bases: &[Spec],
    revisions: &[Spec],
    config: &DiffConfig,
) -> Result<(Diff, OperationsSourcesMap)> {
    let empty = Spec::default();
    let base_head = bases.first().unwrap_or(&empty);
    let revision_head = revisions.first().unwrap_or(&empty);

    let base_refs: Vec<&Spec> = bases.iter().collect();
    let revision_refs: Vec<&Spec> = revisions.iter().collect();

    compare_tables(config, base_head, revision_head, &base_refs, &revision_refs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use specgate_model::PathItem;

    fn spec_with_paths(paths: &[&str], source: &str) -> Spec {
        let mut spec = Spec::default();
        for path in paths {
            spec.paths.insert(
                path.to_string(),
                PathItem {
                    get: Some(Default::default()),
                    ..PathItem::default()
                },
            );
        }
        spec.source = source.to_string();
        spec
    }

    #[test]
    fn test_self_compare_is_empty() {
        let spec = spec_with_paths(&["/pets", "/owners"], "spec.yaml");
        let (diff, _) = compare(&spec, &spec, &DiffConfig::new()).expect("compares");
        assert!(diff.is_empty());
    }

    #[test]
    fn test_added_and_deleted_paths() {
        let base = spec_with_paths(&["/pets"], "base.yaml");
        let revision = spec_with_paths(&["/owners"], "revision.yaml");

        let (diff, sources) = compare(&base, &revision, &DiffConfig::new()).expect("compares");
        let paths = diff.paths.expect("paths facet");
        assert_eq!(paths.added, vec!["/owners"]);
        assert_eq!(paths.deleted, vec!["/pets"]);
        assert_eq!(sources.revision_source("/owners", "GET"), Some("revision.yaml"));
        assert_eq!(sources.base_source("/pets", "GET"), Some("base.yaml"));
    }

    #[test]
    fn test_composed_mode_records_per_file_sources() {
        let base_a = spec_with_paths(&["/pets"], "a.yaml");
        let base_b = spec_with_paths(&["/owners"], "b.yaml");
        let revision_a = spec_with_paths(&["/pets"], "c.yaml");

        let (diff, sources) = compare_composed(
            &[base_a, base_b],
            &[revision_a],
            &DiffConfig::new(),
        )
        .expect("compares");

        let paths = diff.paths.expect("paths facet");
        assert_eq!(paths.deleted, vec!["/owners"]);
        assert_eq!(sources.base_source("/owners", "GET"), Some("b.yaml"));
        assert_eq!(sources.revision_source("/pets", "GET"), Some("c.yaml"));
    }

    #[test]
    fn test_path_param_rename_matches_when_params_excluded() {
        let base = spec_with_paths(&["/pets/{id}"], "base.yaml");
        let revision = spec_with_paths(&["/pets/{petId}"], "revision.yaml");

        let (diff, _) = compare(&base, &revision, &DiffConfig::new()).expect("compares");
        assert!(diff.is_empty(), "renamed path param should match");

        let strict = DiffConfig {
            include_path_params: true,
            ..DiffConfig::new()
        };
        let (diff, _) = compare(&base, &revision, &strict).expect("compares");
        let paths = diff.paths.expect("paths facet");
        assert_eq!(paths.added, vec!["/pets/{petId}"]);
        assert_eq!(paths.deleted, vec!["/pets/{id}"]);
    }
}
