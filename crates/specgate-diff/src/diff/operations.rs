//! Method-level comparison under one path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use specgate_model::{Operation, PathItem, Spec};

use crate::config::DiffConfig;
use crate::diff::operation::{get_operation_diff, OperationDiff};
use crate::errors::Result;

/// OperationsDiff - operations added/deleted/modified under one path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationsDiff {
    /// HTTP methods present only in revision
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,

    /// HTTP methods present only in base
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, OperationDiff>,

    /// Base operations keyed by method (path-level parameters folded in)
    #[serde(skip)]
    pub base: BTreeMap<String, Operation>,

    /// Revision operations keyed by method (path-level parameters folded in)
    #[serde(skip)]
    pub revision: BTreeMap<String, Operation>,
}

impl OperationsDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }
}

/// Fold path-level parameters into an operation's own list.
///
/// An operation parameter with the same (location, name) overrides the
/// path-level declaration.
fn with_inherited_parameters(path_item: &PathItem, operation: &Operation) -> Operation {
    if path_item.parameters.is_empty() {
        return operation.clone();
    }
    let mut merged = operation.clone();
    for shared in &path_item.parameters {
        let overridden = merged
            .parameters
            .iter()
            .any(|p| p.location == shared.location && p.name == shared.name);
        if !overridden {
            merged.parameters.push(shared.clone());
        }
    }
    merged
}

/// Diff the operations of one path item pair; empty diffs collapse to `None`.
pub(crate) fn get_operations_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &PathItem,
    revision: &PathItem,
) -> Result<Option<OperationsDiff>> {
    let base_ops: BTreeMap<String, Operation> = base
        .operations()
        .into_iter()
        .map(|(method, op)| (method.to_string(), with_inherited_parameters(base, op)))
        .collect();
    let revision_ops: BTreeMap<String, Operation> = revision
        .operations()
        .into_iter()
        .map(|(method, op)| (method.to_string(), with_inherited_parameters(revision, op)))
        .collect();

    let mut result = OperationsDiff::default();

    for method in revision_ops.keys() {
        if !base_ops.contains_key(method) {
            result.added.push(method.clone());
        }
    }
    for (method, base_op) in &base_ops {
        match revision_ops.get(method) {
            None => result.deleted.push(method.clone()),
            Some(revision_op) => {
                if let Some(diff) =
                    get_operation_diff(config, base_spec, revision_spec, base_op, revision_op)?
                {
                    result.modified.insert(method.clone(), diff);
                }
            }
        }
    }

    if result.is_empty() {
        return Ok(None);
    }

    result.base = base_ops;
    result.revision = revision_ops;
    Ok(Some(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use specgate_model::{Parameter, ParameterLocation};

    #[test]
    fn test_path_level_parameters_are_inherited_not_overridden() {
        let shared = Parameter {
            name: "tenant".to_string(),
            location: ParameterLocation::Header,
            required: true,
            ..Parameter::default()
        };
        let own = Parameter {
            name: "tenant".to_string(),
            location: ParameterLocation::Header,
            required: false,
            ..Parameter::default()
        };

        let path_item = PathItem {
            parameters: vec![shared],
            ..PathItem::default()
        };

        let inherited = with_inherited_parameters(&path_item, &Operation::default());
        assert_eq!(inherited.parameters.len(), 1);
        assert!(inherited.parameters[0].required);

        let overriding = with_inherited_parameters(
            &path_item,
            &Operation {
                parameters: vec![own],
                ..Operation::default()
            },
        );
        assert_eq!(overriding.parameters.len(), 1);
        assert!(!overriding.parameters[0].required);
    }
}
