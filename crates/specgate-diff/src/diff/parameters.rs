//! Parameter comparison, grouped by (location, name).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use specgate_model::{Parameter, Spec};

use crate::config::{DiffConfig, ExcludeElement};
use crate::diff::content::{get_content_diff, ContentDiff};
use crate::diff::schema::{get_schema_diff, SchemaDiff, SchemaTraversal};
use crate::diff::value::{value_diff, ValueDiff};

/// ParametersDiff - parameters added/deleted/modified on one operation
///
/// Facets are keyed by location first, then name: the same name may exist
/// in different locations and those are distinct parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParametersDiff {
    /// location -> names present only in revision
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub added: BTreeMap<String, Vec<String>>,

    /// location -> names present only in base
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub deleted: BTreeMap<String, Vec<String>>,

    /// location -> name -> changes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, BTreeMap<String, ParameterDiff>>,
}

impl ParametersDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }

    /// Iterate all modified parameters as (location, name, diff).
    pub fn iter_modified(&self) -> impl Iterator<Item = (&str, &str, &ParameterDiff)> {
        self.modified.iter().flat_map(|(location, names)| {
            names
                .iter()
                .map(move |(name, diff)| (location.as_str(), name.as_str(), diff))
        })
    }
}

/// ParameterDiff - changes to one parameter present on both sides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterDiff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explode: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentDiff>,

    /// Base parameter this node was computed from
    #[serde(skip)]
    pub base: Parameter,

    /// Revision parameter this node was computed from
    #[serde(skip)]
    pub revision: Parameter,
}

impl ParameterDiff {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.required.is_none()
            && self.deprecated.is_none()
            && self.style.is_none()
            && self.explode.is_none()
            && self.example.is_none()
            && self.schema.is_none()
            && self.content.is_none()
    }
}

fn by_location_and_name(
    parameters: &[Parameter],
) -> BTreeMap<(String, String), &Parameter> {
    parameters
        .iter()
        .map(|p| ((p.location.to_string(), p.name.clone()), p))
        .collect()
}

/// Diff two parameter lists; empty diffs collapse to `None`.
pub(crate) fn get_parameters_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &[Parameter],
    revision: &[Parameter],
) -> Option<ParametersDiff> {
    let base_params = by_location_and_name(base);
    let revision_params = by_location_and_name(revision);

    let mut result = ParametersDiff::default();

    for ((location, name), _) in &revision_params {
        if !base_params.contains_key(&(location.clone(), name.clone())) {
            result
                .added
                .entry(location.clone())
                .or_default()
                .push(name.clone());
        }
    }

    for ((location, name), base_param) in &base_params {
        match revision_params.get(&(location.clone(), name.clone())) {
            None => result
                .deleted
                .entry(location.clone())
                .or_default()
                .push(name.clone()),
            Some(revision_param) => {
                if let Some(diff) =
                    get_parameter_diff(config, base_spec, revision_spec, base_param, revision_param)
                {
                    result
                        .modified
                        .entry(location.clone())
                        .or_default()
                        .insert(name.clone(), diff);
                }
            }
        }
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

fn get_parameter_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &Parameter,
    revision: &Parameter,
) -> Option<ParameterDiff> {
    let mut state = SchemaTraversal::new(config.circular_ref_bound());

    let mut result = ParameterDiff {
        required: value_diff(&base.required, &revision.required),
        deprecated: value_diff(&base.deprecated, &revision.deprecated),
        style: value_diff(&base.style, &revision.style),
        explode: value_diff(&base.explode, &revision.explode),
        schema: get_schema_diff(
            config,
            &mut state,
            base_spec,
            revision_spec,
            base.schema.as_ref(),
            revision.schema.as_ref(),
        ),
        content: get_content_diff(
            config,
            base_spec,
            revision_spec,
            &base.content,
            &revision.content,
        ),
        ..ParameterDiff::default()
    };

    if !config.excludes(ExcludeElement::Description) {
        result.description = value_diff(&base.description, &revision.description);
    }
    if !config.excludes(ExcludeElement::Examples) {
        result.example = value_diff(&base.example, &revision.example);
    }

    if result.is_empty() {
        return None;
    }

    result.base = base.clone();
    result.revision = revision.clone();
    Some(result)
}
