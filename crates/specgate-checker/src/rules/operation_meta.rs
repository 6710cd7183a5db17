//! Opt-in operation metadata rules: operation ids and tags.

use serde_json::Value;

use specgate_diff::{Diff, OperationsSourcesMap};

use crate::change::Change;
use crate::config::CheckConfig;
use crate::level::Level;
use crate::localize::quoted;

use super::{change, modified_operations, revision_source};

fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => quoted(s),
        other => quoted(&other.to_string()),
    }
}

pub(crate) fn run_operation_id(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    let mut records = Vec::new();

    for (path, method, op_diff) in modified_operations(diff) {
        let Some(operation_id) = &op_diff.operation_id else {
            continue;
        };
        let source = revision_source(sources, path, method);
        let record = if operation_id.to.is_null() {
            change(
                config,
                "api-operation-id-removed",
                Level::Warn,
                &[value_display(&operation_id.from)],
                path,
                method,
                Some(&op_diff.revision),
                source,
            )
        } else {
            change(
                config,
                "api-operation-id-changed",
                Level::Warn,
                &[
                    value_display(&operation_id.from),
                    value_display(&operation_id.to),
                ],
                path,
                method,
                Some(&op_diff.revision),
                source,
            )
        };
        records.push(record);
    }

    records
}

pub(crate) fn run_tags(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    let mut records = Vec::new();

    for (path, method, op_diff) in modified_operations(diff) {
        let Some(tags) = &op_diff.tags else {
            continue;
        };
        let source = revision_source(sources, path, method);
        for tag in &tags.deleted {
            records.push(change(
                config,
                "api-tag-removed",
                Level::Warn,
                &[quoted(tag)],
                path,
                method,
                Some(&op_diff.revision),
                source,
            ));
        }
        for tag in &tags.added {
            records.push(change(
                config,
                "api-tag-added",
                Level::Info,
                &[quoted(tag)],
                path,
                method,
                Some(&op_diff.revision),
                source,
            ));
        }
    }

    records
}
