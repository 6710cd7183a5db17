//! Per-operation comparison.

use serde::{Deserialize, Serialize};

use specgate_model::{Operation, Spec};

use crate::config::{DiffConfig, ExcludeElement};
use crate::diff::extensions::{get_extensions_diff, ExtensionsDiff};
use crate::diff::parameters::{get_parameters_diff, ParametersDiff};
use crate::diff::request_body::{get_request_body_diff, RequestBodyDiff};
use crate::diff::responses::{get_responses_diff, ResponsesDiff};
use crate::diff::security::{
    get_security_diff, get_servers_diff, SecurityDiff, ServersDiff,
};
use crate::diff::value::{strings_diff, value_diff, StringsDiff, ValueDiff};
use crate::errors::Result;

/// OperationDiff - changes inside one operation present on both sides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationDiff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<StringsDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ParametersDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<ResponsesDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servers: Option<ServersDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,

    /// Base operation this node was computed from
    #[serde(skip)]
    pub base: Operation,

    /// Revision operation this node was computed from
    #[serde(skip)]
    pub revision: Operation,
}

impl OperationDiff {
    pub fn is_empty(&self) -> bool {
        self.tags.is_none()
            && self.summary.is_none()
            && self.description.is_none()
            && self.operation_id.is_none()
            && self.deprecated.is_none()
            && self.parameters.is_none()
            && self.request_body.is_none()
            && self.responses.is_none()
            && self.security.is_none()
            && self.servers.is_none()
            && self.extensions.is_none()
    }
}

/// Diff one operation pair; empty diffs collapse to `None`.
pub(crate) fn get_operation_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &Operation,
    revision: &Operation,
) -> Result<Option<OperationDiff>> {
    // Operation-level security falls back to the document default
    let base_security = base
        .security
        .clone()
        .unwrap_or_else(|| base_spec.security.clone());
    let revision_security = revision
        .security
        .clone()
        .unwrap_or_else(|| revision_spec.security.clone());

    let mut result = OperationDiff {
        tags: strings_diff(&base.tags, &revision.tags),
        operation_id: value_diff(&base.operation_id, &revision.operation_id),
        deprecated: value_diff(&base.deprecated, &revision.deprecated),
        parameters: get_parameters_diff(
            config,
            base_spec,
            revision_spec,
            &base.parameters,
            &revision.parameters,
        ),
        request_body: get_request_body_diff(
            config,
            base_spec,
            revision_spec,
            base.request_body.as_ref(),
            revision.request_body.as_ref(),
        ),
        responses: get_responses_diff(
            config,
            base_spec,
            revision_spec,
            &base.responses,
            &revision.responses,
        )?,
        security: get_security_diff(&base_security, &revision_security),
        servers: get_servers_diff(&base.servers, &revision.servers),
        extensions: get_extensions_diff(config, &base.extensions, &revision.extensions),
        ..OperationDiff::default()
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_security_inherits_document_default() {
        let mut base_spec = Spec::default();
        base_spec
            .security
            .push([("apiKey".to_string(), Vec::new())].into());
        let revision_spec = Spec::default();

        // Neither operation declares security; the inherited defaults differ
        let diff = get_operation_diff(
            &DiffConfig::new(),
            &base_spec,
            &revision_spec,
            &Operation::default(),
            &Operation::default(),
        )
        .expect("no invariant break")
        .expect("inherited security differs");

        let security = diff.security.expect("security facet");
        assert_eq!(security.deleted.len(), 1);
        assert!(security.added.is_empty());
    }

    #[test]
    fn test_deprecation_flip_is_a_value_diff() {
        let base = Operation::default();
        let revision = Operation {
            deprecated: true,
            ..Operation::default()
        };

        let diff = get_operation_diff(
            &DiffConfig::new(),
            &Spec::default(),
            &Spec::default(),
            &base,
            &revision,
        )
        .expect("no invariant break")
        .expect("deprecated differs");

        let deprecated = diff.deprecated.expect("deprecated facet");
        assert_eq!(deprecated.from, serde_json::json!(false));
        assert_eq!(deprecated.to, serde_json::json!(true));
    }
}
