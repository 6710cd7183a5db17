//! Removed endpoints, deprecation and sunset aware.
//!
//! A removal is non-breaking only when the base operation was deprecated
//! with a sunset date that has passed. Removal exactly on the sunset date
//! counts as past it.

use specgate_model::Operation;

use specgate_diff::{Diff, OperationsSourcesMap};

use crate::change::Change;
use crate::config::CheckConfig;
use crate::level::Level;
use crate::localize::quoted;

use super::{base_source, change};

struct RemovalIds {
    without_deprecation: &'static str,
    before_sunset: &'static str,
    sunset_passed: &'static str,
}

const PATH_IDS: RemovalIds = RemovalIds {
    without_deprecation: "api-path-removed-without-deprecation",
    before_sunset: "api-path-removed-before-sunset",
    sunset_passed: "api-path-sunset-passed",
};

const OPERATION_IDS: RemovalIds = RemovalIds {
    without_deprecation: "api-removed-without-deprecation",
    before_sunset: "api-removed-before-sunset",
    sunset_passed: "api-sunset-passed",
};

fn removal_record(
    config: &CheckConfig,
    ids: &RemovalIds,
    operation: &Operation,
    path: &str,
    method: &str,
    source: Option<&str>,
) -> Change {
    if !operation.deprecated {
        return change(
            config,
            ids.without_deprecation,
            Level::Err,
            &[],
            path,
            method,
            Some(operation),
            source,
        );
    }
    match operation.sunset_date() {
        // Deprecated but no usable sunset date: still an unannounced removal
        None => change(
            config,
            ids.without_deprecation,
            Level::Err,
            &[],
            path,
            method,
            Some(operation),
            source,
        ),
        Some(sunset) if config.reference_date() < sunset => change(
            config,
            ids.before_sunset,
            Level::Err,
            &[quoted(&sunset.to_string())],
            path,
            method,
            Some(operation),
            source,
        ),
        Some(sunset) => change(
            config,
            ids.sunset_passed,
            Level::Info,
            &[quoted(&sunset.to_string())],
            path,
            method,
            Some(operation),
            source,
        ),
    }
}

pub(crate) fn run(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    let mut records = Vec::new();
    let Some(paths) = &diff.paths else {
        return records;
    };

    for path in &paths.deleted {
        let Some(item) = paths.base.get(path) else {
            continue;
        };
        for (method, operation) in item.operations() {
            records.push(removal_record(
                config,
                &PATH_IDS,
                operation,
                path,
                method,
                base_source(sources, path, method),
            ));
        }
    }

    for (path, path_diff) in &paths.modified {
        let Some(ops) = &path_diff.operations else {
            continue;
        };
        for method in &ops.deleted {
            let Some(operation) = ops.base.get(method) else {
                continue;
            };
            records.push(removal_record(
                config,
                &OPERATION_IDS,
                operation,
                path,
                method,
                base_source(sources, path, method),
            ));
        }
    }

    records
}
