//! New endpoints: added paths and added operations on existing paths.

use specgate_diff::{Diff, OperationsSourcesMap};

use crate::change::Change;
use crate::config::CheckConfig;
use crate::level::Level;

use super::{change, revision_source};

pub(crate) fn run(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    let mut records = Vec::new();
    let Some(paths) = &diff.paths else {
        return records;
    };

    // One record per operation under an added path
    for path in &paths.added {
        let Some(item) = paths.revision.get(path) else {
            continue;
        };
        for (method, operation) in item.operations() {
            records.push(change(
                config,
                "api-path-added",
                Level::Info,
                &[],
                path,
                method,
                Some(operation),
                revision_source(sources, path, method),
            ));
        }
    }

    // Operations added to a path that already existed
    for (path, path_diff) in &paths.modified {
        let Some(ops) = &path_diff.operations else {
            continue;
        };
        for method in &ops.added {
            records.push(change(
                config,
                "api-operation-added",
                Level::Info,
                &[],
                path,
                method,
                ops.revision.get(method),
                revision_source(sources, path, method),
            ));
        }
    }

    records
}
