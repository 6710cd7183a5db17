//! Response status codes added or removed.

use specgate_diff::{Diff, OperationsSourcesMap};

use crate::change::Change;
use crate::config::CheckConfig;
use crate::level::Level;
use crate::localize::quoted;

use super::{change, is_success_status, modified_operations, revision_source};

pub(crate) fn run_success_removed(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    collect_removed(diff, sources, config, true)
}

/// Opt-in: removals of non-success statuses.
pub(crate) fn run_non_success_removed(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    collect_removed(diff, sources, config, false)
}

fn collect_removed(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
    success: bool,
) -> Vec<Change> {
    let mut records = Vec::new();

    for (path, method, op_diff) in modified_operations(diff) {
        let Some(responses) = &op_diff.responses else {
            continue;
        };
        for status in &responses.deleted {
            if is_success_status(status) != success {
                continue;
            }
            let (id, level) = if success {
                ("response-success-status-removed", Level::Err)
            } else {
                ("response-non-success-status-removed", Level::Warn)
            };
            records.push(change(
                config,
                id,
                level,
                &[quoted(status)],
                path,
                method,
                Some(&op_diff.revision),
                revision_source(sources, path, method),
            ));
        }
    }

    records
}

/// Opt-in: additions of non-success statuses.
pub(crate) fn run_non_success_added(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    let mut records = Vec::new();

    for (path, method, op_diff) in modified_operations(diff) {
        let Some(responses) = &op_diff.responses else {
            continue;
        };
        for status in &responses.added {
            if is_success_status(status) {
                continue;
            }
            records.push(change(
                config,
                "response-non-success-status-added",
                Level::Info,
                &[quoted(status)],
                path,
                method,
                Some(&op_diff.revision),
                revision_source(sources, path, method),
            ));
        }
    }

    records
}
