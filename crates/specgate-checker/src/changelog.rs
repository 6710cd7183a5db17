//! Changelog decomposition.
//!
//! The driver rebuilds one atomic diff per discrete structural change, each
//! carrying full base/revision context, and classifies every atom in
//! isolation. The union of per-atom records equals the whole-tree record
//! multiset; an atom that matches no rule is returned as a coverage gap
//! rather than dropped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use specgate_diff::{
    ContentDiff, Diff, OperationDiff, OperationsDiff, OperationsSourcesMap,
    ParametersDiff, PathDiff, PathsDiff, ResponseDiff, ResponsesDiff,
};

use crate::change::{Change, Changes};
use crate::config::CheckConfig;
use crate::level::Level;
use crate::registry::check_until_level;

/// CoverageGap - an atomic diff no rule classified
///
/// Surfaced so the rule catalog can be extended; never a hard failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageGap {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operation: String,

    /// Which element of the document changed, e.g. `response 200 description`
    pub element: String,
}

struct Atom {
    diff: Diff,
    path: String,
    operation: String,
    element: String,
}

impl Atom {
    fn new(diff: Diff, path: &str, operation: &str, element: impl Into<String>) -> Self {
        Self {
            diff,
            path: path.to_string(),
            operation: operation.to_string(),
            element: element.into(),
        }
    }
}

fn paths_atom(paths: PathsDiff) -> Diff {
    Diff {
        paths: Some(paths),
        ..Diff::default()
    }
}

fn path_atom(path: &str, paths: &PathsDiff, path_diff: PathDiff) -> Diff {
    let mut wrapper = PathsDiff::default();
    if let Some(item) = paths.base.get(path) {
        wrapper.base.insert(path.to_string(), item.clone());
    }
    if let Some(item) = paths.revision.get(path) {
        wrapper.revision.insert(path.to_string(), item.clone());
    }
    wrapper.modified.insert(path.to_string(), path_diff);
    paths_atom(wrapper)
}

fn operation_atom(
    path: &str,
    method: &str,
    paths: &PathsDiff,
    path_diff: &PathDiff,
    ops: &OperationsDiff,
    op_diff: OperationDiff,
) -> Diff {
    let mut wrapper = OperationsDiff::default();
    if let Some(op) = ops.base.get(method) {
        wrapper.base.insert(method.to_string(), op.clone());
    }
    if let Some(op) = ops.revision.get(method) {
        wrapper.revision.insert(method.to_string(), op.clone());
    }
    wrapper.modified.insert(method.to_string(), op_diff);

    path_atom(
        path,
        paths,
        PathDiff {
            operations: Some(wrapper),
            base: path_diff.base.clone(),
            revision: path_diff.revision.clone(),
            ..PathDiff::default()
        },
    )
}

/// An operation-diff skeleton carrying only base/revision context.
fn op_skeleton(op_diff: &OperationDiff) -> OperationDiff {
    OperationDiff {
        base: op_diff.base.clone(),
        revision: op_diff.revision.clone(),
        ..OperationDiff::default()
    }
}

fn decompose_operation(
    path: &str,
    method: &str,
    paths: &PathsDiff,
    path_diff: &PathDiff,
    ops: &OperationsDiff,
    op_diff: &OperationDiff,
    atoms: &mut Vec<Atom>,
) {
    let mut push = |element: String, atom_op: OperationDiff| {
        atoms.push(Atom::new(
            operation_atom(path, method, paths, path_diff, ops, atom_op),
            path,
            method,
            element,
        ));
    };

    if let Some(deprecated) = &op_diff.deprecated {
        let mut atom = op_skeleton(op_diff);
        atom.deprecated = Some(deprecated.clone());
        push("deprecated".to_string(), atom);
    }
    if let Some(operation_id) = &op_diff.operation_id {
        let mut atom = op_skeleton(op_diff);
        atom.operation_id = Some(operation_id.clone());
        push("operation id".to_string(), atom);
    }
    if let Some(tags) = &op_diff.tags {
        let mut atom = op_skeleton(op_diff);
        atom.tags = Some(tags.clone());
        push("tags".to_string(), atom);
    }
    if let Some(summary) = &op_diff.summary {
        let mut atom = op_skeleton(op_diff);
        atom.summary = Some(summary.clone());
        push("summary".to_string(), atom);
    }
    if let Some(description) = &op_diff.description {
        let mut atom = op_skeleton(op_diff);
        atom.description = Some(description.clone());
        push("description".to_string(), atom);
    }

    if let Some(params) = &op_diff.parameters {
        for (location, names) in &params.added {
            for name in names {
                let mut atom = op_skeleton(op_diff);
                let mut part = ParametersDiff::default();
                part.added
                    .entry(location.clone())
                    .or_default()
                    .push(name.clone());
                atom.parameters = Some(part);
                push(format!("parameter {location}/{name} added"), atom);
            }
        }
        for (location, names) in &params.deleted {
            for name in names {
                let mut atom = op_skeleton(op_diff);
                let mut part = ParametersDiff::default();
                part.deleted
                    .entry(location.clone())
                    .or_default()
                    .push(name.clone());
                atom.parameters = Some(part);
                push(format!("parameter {location}/{name} deleted"), atom);
            }
        }
        for (location, name, param_diff) in params.iter_modified() {
            let mut atom = op_skeleton(op_diff);
            let mut part = ParametersDiff::default();
            part.modified
                .entry(location.to_string())
                .or_default()
                .insert(name.to_string(), param_diff.clone());
            atom.parameters = Some(part);
            push(format!("parameter {location}/{name} modified"), atom);
        }
    }

    if let Some(body) = &op_diff.request_body {
        let mut atom = op_skeleton(op_diff);
        atom.request_body = Some(body.clone());
        push("request body".to_string(), atom);
    }

    if let Some(responses) = &op_diff.responses {
        decompose_responses(op_diff, responses, &mut push);
    }

    if let Some(security) = &op_diff.security {
        let mut atom = op_skeleton(op_diff);
        atom.security = Some(security.clone());
        push("security".to_string(), atom);
    }
    if let Some(servers) = &op_diff.servers {
        let mut atom = op_skeleton(op_diff);
        atom.servers = Some(servers.clone());
        push("servers".to_string(), atom);
    }
    if let Some(extensions) = &op_diff.extensions {
        let mut atom = op_skeleton(op_diff);
        atom.extensions = Some(extensions.clone());
        push("extensions".to_string(), atom);
    }
}

fn decompose_responses(
    op_diff: &OperationDiff,
    responses: &ResponsesDiff,
    push: &mut impl FnMut(String, OperationDiff),
) {
    let skeleton = |part: ResponsesDiff| {
        let mut atom = op_skeleton(op_diff);
        atom.responses = Some(ResponsesDiff {
            base: responses.base.clone(),
            revision: responses.revision.clone(),
            ..part
        });
        atom
    };

    for status in &responses.added {
        push(
            format!("response {status} added"),
            skeleton(ResponsesDiff {
                added: vec![status.clone()],
                ..ResponsesDiff::default()
            }),
        );
    }
    for status in &responses.deleted {
        push(
            format!("response {status} deleted"),
            skeleton(ResponsesDiff {
                deleted: vec![status.clone()],
                ..ResponsesDiff::default()
            }),
        );
    }

    for (status, response_diff) in &responses.modified {
        let response_skeleton = || ResponseDiff {
            base: response_diff.base.clone(),
            revision: response_diff.revision.clone(),
            ..ResponseDiff::default()
        };
        let mut push_response = |element: String, part: ResponseDiff| {
            let mut wrapper = ResponsesDiff::default();
            wrapper.modified.insert(status.clone(), part);
            push(element, skeleton(wrapper));
        };

        if let Some(description) = &response_diff.description {
            let mut part = response_skeleton();
            part.description = Some(description.clone());
            push_response(format!("response {status} description"), part);
        }
        if let Some(headers) = &response_diff.headers {
            let mut part = response_skeleton();
            part.headers = Some(headers.clone());
            push_response(format!("response {status} headers"), part);
        }

        if let Some(content) = &response_diff.content {
            for media_type in &content.added {
                let mut part = response_skeleton();
                part.content = Some(ContentDiff {
                    added: vec![media_type.clone()],
                    ..ContentDiff::default()
                });
                push_response(format!("response {status} media type {media_type} added"), part);
            }
            for media_type in &content.deleted {
                let mut part = response_skeleton();
                part.content = Some(ContentDiff {
                    deleted: vec![media_type.clone()],
                    ..ContentDiff::default()
                });
                push_response(
                    format!("response {status} media type {media_type} deleted"),
                    part,
                );
            }
            for (media_type, media_diff) in &content.modified {
                let mut wrapper = ContentDiff::default();
                wrapper
                    .modified
                    .insert(media_type.clone(), media_diff.clone());
                let mut part = response_skeleton();
                part.content = Some(wrapper);
                push_response(
                    format!("response {status} media type {media_type} modified"),
                    part,
                );
            }
        }
    }
}

fn decompose(diff: &Diff) -> Vec<Atom> {
    let mut atoms = Vec::new();

    if let Some(paths) = &diff.paths {
        for path in &paths.added {
            let mut part = PathsDiff {
                added: vec![path.clone()],
                ..PathsDiff::default()
            };
            if let Some(item) = paths.revision.get(path) {
                part.revision.insert(path.clone(), item.clone());
            }
            atoms.push(Atom::new(paths_atom(part), path, "", "path added"));
        }
        for path in &paths.deleted {
            let mut part = PathsDiff {
                deleted: vec![path.clone()],
                ..PathsDiff::default()
            };
            if let Some(item) = paths.base.get(path) {
                part.base.insert(path.clone(), item.clone());
            }
            atoms.push(Atom::new(paths_atom(part), path, "", "path deleted"));
        }

        for (path, path_diff) in &paths.modified {
            let scalar = |element: &str, make: &dyn Fn(&mut PathDiff)| {
                let mut part = PathDiff {
                    base: path_diff.base.clone(),
                    revision: path_diff.revision.clone(),
                    ..PathDiff::default()
                };
                make(&mut part);
                Atom::new(path_atom(path, paths, part), path, "", element)
            };

            if let Some(reference) = &path_diff.reference {
                atoms.push(scalar("path ref", &|p| p.reference = Some(reference.clone())));
            }
            if let Some(summary) = &path_diff.summary {
                atoms.push(scalar("path summary", &|p| p.summary = Some(summary.clone())));
            }
            if let Some(description) = &path_diff.description {
                atoms.push(scalar("path description", &|p| {
                    p.description = Some(description.clone())
                }));
            }
            if let Some(extensions) = &path_diff.extensions {
                atoms.push(scalar("path extensions", &|p| {
                    p.extensions = Some(extensions.clone())
                }));
            }

            if let Some(ops) = &path_diff.operations {
                for method in &ops.added {
                    let mut part = OperationsDiff {
                        added: vec![method.clone()],
                        ..OperationsDiff::default()
                    };
                    if let Some(op) = ops.revision.get(method) {
                        part.revision.insert(method.clone(), op.clone());
                    }
                    atoms.push(Atom::new(
                        path_atom(
                            path,
                            paths,
                            PathDiff {
                                operations: Some(part),
                                base: path_diff.base.clone(),
                                revision: path_diff.revision.clone(),
                                ..PathDiff::default()
                            },
                        ),
                        path,
                        method,
                        "operation added",
                    ));
                }
                for method in &ops.deleted {
                    let mut part = OperationsDiff {
                        deleted: vec![method.clone()],
                        ..OperationsDiff::default()
                    };
                    if let Some(op) = ops.base.get(method) {
                        part.base.insert(method.clone(), op.clone());
                    }
                    atoms.push(Atom::new(
                        path_atom(
                            path,
                            paths,
                            PathDiff {
                                operations: Some(part),
                                base: path_diff.base.clone(),
                                revision: path_diff.revision.clone(),
                                ..PathDiff::default()
                            },
                        ),
                        path,
                        method,
                        "operation deleted",
                    ));
                }
                for (method, op_diff) in &ops.modified {
                    decompose_operation(path, method, paths, path_diff, ops, op_diff, &mut atoms);
                }
            }
        }
    }

    if let Some(spec_version) = &diff.spec_version {
        atoms.push(Atom::new(
            Diff {
                spec_version: Some(spec_version.clone()),
                ..Diff::default()
            },
            "",
            "",
            "document version",
        ));
    }
    if let Some(info) = &diff.info {
        atoms.push(Atom::new(
            Diff {
                info: Some(info.clone()),
                ..Diff::default()
            },
            "",
            "",
            "document info",
        ));
    }
    if let Some(security) = &diff.security {
        atoms.push(Atom::new(
            Diff {
                security: Some(security.clone()),
                ..Diff::default()
            },
            "",
            "",
            "document security",
        ));
    }
    if let Some(servers) = &diff.servers {
        atoms.push(Atom::new(
            Diff {
                servers: Some(servers.clone()),
                ..Diff::default()
            },
            "",
            "",
            "document servers",
        ));
    }
    if let Some(extensions) = &diff.extensions {
        atoms.push(Atom::new(
            Diff {
                extensions: Some(extensions.clone()),
                ..Diff::default()
            },
            "",
            "",
            "document extensions",
        ));
    }

    atoms
}

/// Classify one comparison change by change.
///
/// Returns the per-atom record sequence plus the coverage gaps: atoms the
/// active rule set produced nothing for.
pub fn changelog(
    config: &CheckConfig,
    diff: &Diff,
    sources: &OperationsSourcesMap,
) -> (Changes, Vec<CoverageGap>) {
    let mut records: Vec<Change> = Vec::new();
    let mut gaps = Vec::new();

    let atoms = decompose(diff);
    debug!(atoms = atoms.len(), "diff decomposed");

    for atom in atoms {
        let atom_records = check_until_level(config, &atom.diff, sources, Level::Info);
        if atom_records.is_empty() {
            gaps.push(CoverageGap {
                path: atom.path,
                operation: atom.operation,
                element: atom.element,
            });
        } else {
            records.extend(atom_records);
        }
    }

    (Changes::new(records), gaps)
}
