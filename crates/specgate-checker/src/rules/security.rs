//! Security requirement changes, document-wide and per operation.
//!
//! Both directions are informational: adding a requirement is a gateway
//! change usually rolled out with credentials, removing one relaxes access.
//! The records exist so the changelog captures them.

use specgate_diff::{Diff, OperationsSourcesMap, SecurityDiff};

use crate::change::Change;
use crate::config::CheckConfig;
use crate::level::Level;

use super::{change, modified_operations, revision_source};

fn security_records(
    config: &CheckConfig,
    security: &SecurityDiff,
    path: &str,
    method: &str,
    operation: Option<&specgate_model::Operation>,
    source: Option<&str>,
    records: &mut Vec<Change>,
) {
    for requirement in &security.added {
        records.push(change(
            config,
            "api-security-added",
            Level::Info,
            &[requirement.clone()],
            path,
            method,
            operation,
            source,
        ));
    }
    for requirement in &security.deleted {
        records.push(change(
            config,
            "api-security-removed",
            Level::Info,
            &[requirement.clone()],
            path,
            method,
            operation,
            source,
        ));
    }
}

pub(crate) fn run(
    diff: &Diff,
    sources: &OperationsSourcesMap,
    config: &CheckConfig,
) -> Vec<Change> {
    let mut records = Vec::new();

    // Document-level default requirements have no endpoint attribution
    if let Some(security) = &diff.security {
        security_records(config, security, "", "", None, None, &mut records);
    }

    for (path, method, op_diff) in modified_operations(diff) {
        if let Some(security) = &op_diff.security {
            security_records(
                config,
                security,
                path,
                method,
                Some(&op_diff.revision),
                revision_source(sources, path, method),
                &mut records,
            );
        }
    }

    records
}
