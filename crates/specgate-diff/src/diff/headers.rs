//! Response header comparison.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use specgate_model::{Header, Spec};

use crate::config::{DiffConfig, ExcludeElement};
use crate::diff::content::{get_content_diff, ContentDiff};
use crate::diff::schema::{get_schema_diff, SchemaDiff, SchemaTraversal};
use crate::diff::value::{key_delta, value_diff, ValueDiff};

/// HeadersDiff - headers added/deleted/modified on one response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadersDiff {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, HeaderDiff>,
}

impl HeadersDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }
}

/// HeaderDiff - changes to one header present on both sides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderDiff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentDiff>,

    /// Base header this node was computed from
    #[serde(skip)]
    pub base: Header,

    /// Revision header this node was computed from
    #[serde(skip)]
    pub revision: Header,
}

impl HeaderDiff {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.required.is_none()
            && self.deprecated.is_none()
            && self.schema.is_none()
            && self.content.is_none()
    }
}

/// Diff two header maps; empty diffs collapse to `None`.
pub(crate) fn get_headers_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &BTreeMap<String, Header>,
    revision: &BTreeMap<String, Header>,
) -> Option<HeadersDiff> {
    let (added, deleted, both) = key_delta(
        base.keys().map(String::as_str),
        revision.keys().map(String::as_str),
    );

    let mut modified = BTreeMap::new();
    for name in both {
        if let Some(diff) =
            get_header_diff(config, base_spec, revision_spec, &base[&name], &revision[&name])
        {
            modified.insert(name, diff);
        }
    }

    let result = HeadersDiff {
        added,
        deleted,
        modified,
    };
    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

fn get_header_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &Header,
    revision: &Header,
) -> Option<HeaderDiff> {
    let mut state = SchemaTraversal::new(config.circular_ref_bound());

    let mut result = HeaderDiff {
        required: value_diff(&base.required, &revision.required),
        deprecated: value_diff(&base.deprecated, &revision.deprecated),
        schema: get_schema_diff(
            config,
            &mut state,
            base_spec,
            revision_spec,
            base.schema.as_ref(),
            revision.schema.as_ref(),
        ),
        content: get_content_diff(
            config,
            base_spec,
            revision_spec,
            &base.content,
            &revision.content,
        ),
        ..HeaderDiff::default()
    };

    if !config.excludes(ExcludeElement::Description) {
        result.description = value_diff(&base.description, &revision.description);
    }

    if result.is_empty() {
        return None;
    }

    result.base = base.clone();
    result.revision = revision.clone();
    Some(result)
}
