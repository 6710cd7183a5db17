//! Request parameter rules: requiredness flips, additions, removals, type
//! and enum changes.
//!
//! A parameter becoming required, a new required parameter, a type change
//! and an enum value removal each put a new obligation on clients and are
//! breaking. Removing a parameter only drops an obligation, so it warns.

use specgate_diff::{Diff, OperationsSourcesMap};
use specgate_model::Operation;

use crate::change::Change;
use crate::config::CheckConfig;
use crate::level::Level;
use crate::localize::quoted;

use super::{
    became_true, change, data_type_args, enum_value_display, modified_operations,
    revision_source,
};

fn find_parameter<'a>(
    operation: &'a Operation,
    location: &str,
    name: &str,
) -> Option<&'a specgate_model::Parameter> {
    operation
        .parameters
        .iter()
        .find(|p| p.location.as_str() == location && p.name == name)
}

pub(crate) fn run(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    let mut records = Vec::new();

    for (path, method, op_diff) in modified_operations(diff) {
        let Some(params) = &op_diff.parameters else {
            continue;
        };
        let operation = Some(&op_diff.revision);
        let source = revision_source(sources, path, method);

        for (location, names) in &params.added {
            for name in names {
                let required = find_parameter(&op_diff.revision, location, name)
                    .map(|p| p.required)
                    .unwrap_or(false);
                let (id, level) = if required {
                    ("new-required-request-parameter", Level::Err)
                } else {
                    ("new-optional-request-parameter", Level::Info)
                };
                records.push(change(
                    config,
                    id,
                    level,
                    &[quoted(location), quoted(name)],
                    path,
                    method,
                    operation,
                    source,
                ));
            }
        }

        for (location, names) in &params.deleted {
            for name in names {
                records.push(change(
                    config,
                    "request-parameter-removed",
                    Level::Warn,
                    &[quoted(location), quoted(name)],
                    path,
                    method,
                    operation,
                    source,
                ));
            }
        }

        for (location, name, param_diff) in params.iter_modified() {
            let args = [quoted(location), quoted(name)];

            if let Some(required) = &param_diff.required {
                let (id, level) = if became_true(required) {
                    ("request-parameter-became-required", Level::Err)
                } else {
                    ("request-parameter-became-optional", Level::Info)
                };
                records.push(change(
                    config, id, level, &args, path, method, operation, source,
                ));
            }

            let Some(schema) = &param_diff.schema else {
                continue;
            };

            if let Some(data_type) = &schema.data_type {
                let (from, to) = data_type_args(data_type);
                records.push(change(
                    config,
                    "request-parameter-type-changed",
                    Level::Err,
                    &[quoted(location), quoted(name), from, to],
                    path,
                    method,
                    operation,
                    source,
                ));
            }

            if let Some(enum_diff) = &schema.enum_diff {
                for value in &enum_diff.deleted {
                    records.push(change(
                        config,
                        "request-parameter-enum-value-removed",
                        Level::Err,
                        &[quoted(location), quoted(name), enum_value_display(value)],
                        path,
                        method,
                        operation,
                        source,
                    ));
                }
            }
        }
    }

    records
}
