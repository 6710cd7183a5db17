//! The rule catalog implementation.
//!
//! Each submodule owns one concern and exposes pure `run` functions over
//! `(diff, sources, config)`. Shared walk/format helpers live here.

pub(crate) mod api_added;
pub(crate) mod api_deprecated;
pub(crate) mod api_removed;
pub(crate) mod operation_meta;
pub(crate) mod request_body;
pub(crate) mod request_parameters;
pub(crate) mod response_body;
pub(crate) mod response_status;
pub(crate) mod security;

use serde_json::Value;

use specgate_diff::{DataTypeDiff, DataTypeValue, Diff, OperationDiff, OperationsSourcesMap};
use specgate_model::Operation;

use crate::change::Change;
use crate::config::CheckConfig;
use crate::level::Level;
use crate::localize::quoted;

/// All modified operations in the tree as `(path, method, diff)`.
pub(crate) fn modified_operations<'a>(
    diff: &'a Diff,
) -> Vec<(&'a str, &'a str, &'a OperationDiff)> {
    let mut out = Vec::new();
    if let Some(paths) = &diff.paths {
        for (path, path_diff) in &paths.modified {
            if let Some(ops) = &path_diff.operations {
                for (method, op_diff) in &ops.modified {
                    out.push((path.as_str(), method.as_str(), op_diff));
                }
            }
        }
    }
    out
}

/// Build one record with localized text and endpoint attribution.
#[allow(clippy::too_many_arguments)]
pub(crate) fn change(
    config: &CheckConfig,
    id: &str,
    level: Level,
    args: &[String],
    path: &str,
    method: &str,
    operation: Option<&Operation>,
    source: Option<&str>,
) -> Change {
    Change {
        id: id.to_string(),
        level,
        text: config.translate(id, args),
        comment: String::new(),
        operation: method.to_string(),
        operation_id: operation
            .and_then(|op| op.operation_id.clone())
            .unwrap_or_default(),
        path: path.to_string(),
        source: source.unwrap_or_default().to_string(),
    }
}

/// Render one `(type, format)` half as templates expect: `'string'/'none'`.
pub(crate) fn type_format(value: &DataTypeValue) -> String {
    format!("'{}'/'{}'", value.type_name, value.format)
}

/// Both halves of a data-type change as template args.
pub(crate) fn data_type_args(diff: &DataTypeDiff) -> (String, String) {
    (type_format(&diff.from), type_format(&diff.to))
}

/// Display form of an enum value: strings unquoted, others as JSON.
pub(crate) fn enum_value_display(value: &Value) -> String {
    match value {
        Value::String(s) => quoted(s),
        other => quoted(&other.to_string()),
    }
}

/// `2xx` status codes are success statuses.
pub(crate) fn is_success_status(status: &str) -> bool {
    status.starts_with('2')
}

/// Dotted property path for nested schema records.
pub(crate) fn property_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// Whether a scalar diff flipped to `true`.
pub(crate) fn became_true(diff: &specgate_diff::ValueDiff) -> bool {
    diff.to == Value::Bool(true)
}

/// Revision-side source lookup shorthand.
pub(crate) fn revision_source<'a>(
    sources: &'a OperationsSourcesMap,
    path: &str,
    method: &str,
) -> Option<&'a str> {
    sources.revision_source(path, method)
}

/// Base-side source lookup shorthand.
pub(crate) fn base_source<'a>(
    sources: &'a OperationsSourcesMap,
    path: &str,
    method: &str,
) -> Option<&'a str> {
    sources.base_source(path, method)
}
