//! Deprecation announcements and their grace periods.
//!
//! Marking an operation deprecated requires a parseable sunset date far
//! enough out for the operation's stability level: at least
//! `beta_deprecation_days` / `stable_deprecation_days` from the reference
//! date, boundary inclusive.

use chrono::Duration;
use serde_json::Value;

use specgate_diff::{Diff, OperationsSourcesMap};

use crate::change::Change;
use crate::config::CheckConfig;
use crate::level::Level;
use crate::localize::quoted;

use super::{change, modified_operations, revision_source};

pub(crate) fn run(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    let mut records = Vec::new();

    for (path, method, op_diff) in modified_operations(diff) {
        let Some(deprecated) = &op_diff.deprecated else {
            continue;
        };
        let operation = &op_diff.revision;
        let source = revision_source(sources, path, method);

        if deprecated.to != Value::Bool(true) {
            records.push(change(
                config,
                "endpoint-reactivated",
                Level::Info,
                &[],
                path,
                method,
                Some(operation),
                source,
            ));
            continue;
        }

        let record = match operation.sunset_date() {
            None if operation.has_sunset() => {
                let raw = operation
                    .extensions
                    .get(specgate_model::operation::SUNSET_EXTENSION)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                change(
                    config,
                    "api-deprecated-sunset-parse",
                    Level::Err,
                    &[raw],
                    path,
                    method,
                    Some(operation),
                    source,
                )
            }
            None => change(
                config,
                "api-deprecated-sunset-missing",
                Level::Err,
                &[],
                path,
                method,
                Some(operation),
                source,
            ),
            Some(sunset) => {
                let days = config.deprecation_days(operation.stability());
                let earliest = config.reference_date() + Duration::days(days);
                if sunset < earliest {
                    change(
                        config,
                        "api-sunset-date-too-small",
                        Level::Err,
                        &[quoted(&sunset.to_string()), days.to_string()],
                        path,
                        method,
                        Some(operation),
                        source,
                    )
                } else {
                    change(
                        config,
                        "endpoint-deprecated",
                        Level::Info,
                        &[],
                        path,
                        method,
                        Some(operation),
                        source,
                    )
                }
            }
        };
        records.push(record);
    }

    records
}
