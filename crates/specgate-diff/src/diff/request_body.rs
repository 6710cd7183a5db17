//! Request body comparison.

use serde::{Deserialize, Serialize};

use specgate_model::{RequestBody, Spec};

use crate::config::{DiffConfig, ExcludeElement};
use crate::diff::content::{get_content_diff, ContentDiff};
use crate::diff::value::{value_diff, ValueDiff};

/// RequestBodyDiff - the request payload changed, appeared or disappeared
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBodyDiff {
    /// Revision declares a body where base had none
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub added: bool,

    /// Base declared a body where revision has none
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deleted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentDiff>,

    /// Base request body this node was computed from, if any
    #[serde(skip)]
    pub base: Option<RequestBody>,

    /// Revision request body this node was computed from, if any
    #[serde(skip)]
    pub revision: Option<RequestBody>,
}

impl RequestBodyDiff {
    pub fn is_empty(&self) -> bool {
        !self.added
            && !self.deleted
            && self.description.is_none()
            && self.required.is_none()
            && self.content.is_none()
    }
}

/// Diff two optional request bodies; empty diffs collapse to `None`.
pub(crate) fn get_request_body_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: Option<&RequestBody>,
    revision: Option<&RequestBody>,
) -> Option<RequestBodyDiff> {
    match (base, revision) {
        (None, None) => None,
        (None, Some(revision_body)) => Some(RequestBodyDiff {
            added: true,
            revision: Some(revision_body.clone()),
            ..RequestBodyDiff::default()
        }),
        (Some(base_body), None) => Some(RequestBodyDiff {
            deleted: true,
            base: Some(base_body.clone()),
            ..RequestBodyDiff::default()
        }),
        (Some(base_body), Some(revision_body)) => {
            let mut result = RequestBodyDiff {
                required: value_diff(&base_body.required, &revision_body.required),
                content: get_content_diff(
                    config,
                    base_spec,
                    revision_spec,
                    &base_body.content,
                    &revision_body.content,
                ),
                ..RequestBodyDiff::default()
            };

            if !config.excludes(ExcludeElement::Description) {
                result.description =
                    value_diff(&base_body.description, &revision_body.description);
            }

            if result.is_empty() {
                return None;
            }

            result.base = Some(base_body.clone());
            result.revision = Some(revision_body.clone());
            Some(result)
        }
    }
}
