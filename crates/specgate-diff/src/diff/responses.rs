//! Response comparison, keyed by status code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use specgate_model::{Response, Spec};

use crate::config::{DiffConfig, ExcludeElement};
use crate::diff::content::{get_content_diff, ContentDiff};
use crate::diff::headers::{get_headers_diff, HeadersDiff};
use crate::diff::value::{key_delta, value_diff, ValueDiff};
use crate::errors::{DiffError, DiffErrorKind, Result};

/// ResponsesDiff - status codes added/deleted/modified on one operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsesDiff {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, ResponseDiff>,

    /// Base responses keyed by status code
    #[serde(skip)]
    pub base: BTreeMap<String, Response>,

    /// Revision responses keyed by status code
    #[serde(skip)]
    pub revision: BTreeMap<String, Response>,
}

impl ResponsesDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }
}

/// ResponseDiff - changes to one status code present on both sides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseDiff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeadersDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentDiff>,

    /// Base response this node was computed from
    #[serde(skip)]
    pub base: Response,

    /// Revision response this node was computed from
    #[serde(skip)]
    pub revision: Response,
}

impl ResponseDiff {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.headers.is_none() && self.content.is_none()
    }
}

/// Diff two response maps; empty diffs collapse to `None`.
pub(crate) fn get_responses_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &BTreeMap<String, Response>,
    revision: &BTreeMap<String, Response>,
) -> Result<Option<ResponsesDiff>> {
    let (added, deleted, both) = key_delta(
        base.keys().map(String::as_str),
        revision.keys().map(String::as_str),
    );

    let mut modified = BTreeMap::new();
    for status in both {
        let (Some(base_response), Some(revision_response)) =
            (base.get(&status), revision.get(&status))
        else {
            return Err(DiffError::new(DiffErrorKind::InternalInvariant)
                .with_op("get_responses_diff")
                .with_element(status.clone())
                .with_message("shared status code missing from a side"));
        };
        if let Some(diff) = get_response_diff(
            config,
            base_spec,
            revision_spec,
            base_response,
            revision_response,
        ) {
            modified.insert(status, diff);
        }
    }

    let mut result = ResponsesDiff {
        added,
        deleted,
        modified,
        ..ResponsesDiff::default()
    };
    if result.is_empty() {
        return Ok(None);
    }

    result.base = base.clone();
    result.revision = revision.clone();
    Ok(Some(result))
}

fn get_response_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &Response,
    revision: &Response,
) -> Option<ResponseDiff> {
    let mut result = ResponseDiff {
        headers: get_headers_diff(config, base_spec, revision_spec, &base.headers, &revision.headers),
        content: get_content_diff(
            config,
            base_spec,
            revision_spec,
            &base.content,
            &revision.content,
        ),
        ..ResponseDiff::default()
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
