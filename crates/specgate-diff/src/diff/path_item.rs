//! Per-path-item comparison.

use serde::{Deserialize, Serialize};

use specgate_model::{PathItem, Spec};

use crate::config::{DiffConfig, ExcludeElement};
use crate::diff::extensions::{get_extensions_diff, ExtensionsDiff};
use crate::diff::operations::{get_operations_diff, OperationsDiff};
use crate::diff::value::{value_diff, ValueDiff};
use crate::errors::Result;

/// PathDiff - changes inside one path present on both sides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathDiff {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<OperationsDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,

    /// Base path item this node was computed from
    #[serde(skip)]
    pub base: PathItem,

    /// Revision path item this node was computed from
    #[serde(skip)]
    pub revision: PathItem,
}

impl PathDiff {
    pub fn is_empty(&self) -> bool {
        self.reference.is_none()
            && self.summary.is_none()
            && self.description.is_none()
            && self.operations.is_none()
            && self.extensions.is_none()
    }
}

/// Diff one path item pair; empty diffs collapse to `None`.
pub(crate) fn get_path_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &PathItem,
    revision: &PathItem,
) -> Result<Option<PathDiff>> {
    let mut result = PathDiff {
        reference: value_diff(&base.reference, &revision.reference),
        operations: get_operations_diff(config, base_spec, revision_spec, base, revision)?,
        extensions: get_extensions_diff(config, &base.extensions, &revision.extensions),
        ..PathDiff::default()
    };

    if !config.excludes(ExcludeElement::Summary) {
        result.summary = value_diff(&base.summary, &revision.summary);
    }
    if !config.excludes(ExcludeElement::Description) {
        result.description = value_diff(&base.description, &revision.description);
    }

    if result.is_empty() {
        return Ok(None);
    }

    result.base = base.clone();
    result.revision = revision.clone();
    Ok(Some(result))
}
