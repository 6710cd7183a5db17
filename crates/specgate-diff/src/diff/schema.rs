//! Recursive schema comparison.
//!
//! Schema graphs may be cyclic through `$ref`, so the comparator threads an
//! explicit [`SchemaTraversal`] state through every descent: a count of how
//! many times each (base, revision) reference pair is active on the current
//! path, bounded by `DiffConfig::circular_ref_bound()`. Past the bound the
//! walk reports the branch as unchanged instead of recursing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use specgate_model::{Schema, SchemaRef, Spec};

use crate::config::{DiffConfig, ExcludeElement};
use crate::diff::extensions::{get_extensions_diff, ExtensionsDiff};
use crate::diff::value::{key_delta, strings_diff, value_diff, StringsDiff, ValueDiff};

/// One half of a `(type, format)` pair; absent halves are `none`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTypeValue {
    #[serde(rename = "type")]
    pub type_name: String,
    pub format: String,
}

/// DataTypeDiff - the `(type, format)` tuple changed
///
/// Type and format are one logical data type to clients, so the engine
/// reports them as a single combined change rather than two scalar diffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataTypeDiff {
    pub from: DataTypeValue,
    pub to: DataTypeValue,
}

/// EnumDiff - permitted values added or removed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnumDiff {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<Value>,
}

impl EnumDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}

/// PropertiesDiff - named property changes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertiesDiff {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, SchemaDiff>,
}

impl PropertiesDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }
}

/// SubschemasDiff - positional changes to one composition keyword
///
/// Position matters: subschema lists are compared index by index, extra
/// revision positions are added, missing ones deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubschemasDiff {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modified: Vec<(usize, SchemaDiff)>,
}

impl SubschemasDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }
}

/// SchemaDiff - the full structural difference between two schemas
///
/// Carries cloned, resolved base/revision schemas so classification rules
/// can inspect surrounding context (e.g. the required list) for a change
/// reported deeper in the node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDiff {
    /// Revision has a schema where base had none
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub schema_added: bool,

    /// Base had a schema where revision has none
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub schema_deleted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataTypeDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<ValueDiff>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_diff: Option<EnumDiff>,

    /// Required property names added/removed, independent of whether the
    /// properties themselves were added/removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<StringsDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertiesDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaDiff>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<SchemaDiff>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<SubschemasDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<SubschemasDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<SubschemasDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<SchemaDiff>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,

    /// Resolved base schema this node was computed from (context for rules)
    #[serde(skip)]
    pub base: Schema,

    /// Resolved revision schema this node was computed from
    #[serde(skip)]
    pub revision: Schema,
}

impl SchemaDiff {
    pub fn is_empty(&self) -> bool {
        !self.schema_added
            && !self.schema_deleted
            && self.data_type.is_none()
            && self.description.is_none()
            && self.enum_diff.is_none()
            && self.required.is_none()
            && self.nullable.is_none()
            && self.deprecated.is_none()
            && self.example.is_none()
            && self.properties.is_none()
            && self.items.is_none()
            && self.additional_properties.is_none()
            && self.all_of.is_none()
            && self.one_of.is_none()
            && self.any_of.is_none()
            && self.not.is_none()
            && self.extensions.is_none()
    }
}

/// Explicit traversal state for the schema comparator.
///
/// Counts active visits per `(base identity, revision identity)` reference
/// pair along the current descent path; `enter` refuses once the bound is
/// reached. Kept separate from the call stack so the bound is testable in
/// isolation.
#[derive(Debug)]
pub struct SchemaTraversal {
    active: BTreeMap<(String, String), u32>,
    bound: u32,
}

impl SchemaTraversal {
    pub fn new(bound: u32) -> Self {
        Self {
            active: BTreeMap::new(),
            bound,
        }
    }

    /// Try to enter a reference pair; false once the bound is reached.
    fn enter(&mut self, pair: &(String, String)) -> bool {
        let count = self.active.entry(pair.clone()).or_insert(0);
        if *count >= self.bound {
            return false;
        }
        *count += 1;
        true
    }

    fn leave(&mut self, pair: &(String, String)) {
        if let Some(count) = self.active.get_mut(pair) {
            *count = count.saturating_sub(1);
        }
    }
}

/// The identity of one side of a schema position for cycle tracking.
fn ref_identity(schema_ref: Option<&SchemaRef>) -> Option<String> {
    schema_ref
        .and_then(Spec::schema_ref_name)
        .map(str::to_string)
}

/// Merge `allOf` members into a standalone schema.
///
/// Member properties fill gaps in the parent (the parent wins on conflict),
/// required lists are unioned, and scalar facets are taken from the first
/// member that declares them. `visited` guards against reference cycles
/// through `allOf` chains.
fn flatten_all_of(spec: &Spec, schema: &Schema, visited: &mut BTreeSet<String>) -> Schema {
    if schema.all_of.is_empty() {
        return schema.clone();
    }

    let mut merged = schema.clone();
    let members = std::mem::take(&mut merged.all_of);

    for member_ref in &members {
        if let Some(name) = Spec::schema_ref_name(member_ref) {
            if !visited.insert(name.to_string()) {
                continue;
            }
        }
        let Some(member) = spec.resolve_schema(member_ref) else {
            continue;
        };
        let member = flatten_all_of(spec, member, visited);

        for (name, prop) in member.properties {
            merged.properties.entry(name).or_insert(prop);
        }
        for name in member.required {
            if !merged.required.contains(&name) {
                merged.required.push(name);
            }
        }
        if merged.schema_type.is_none() {
            merged.schema_type = member.schema_type;
        }
        if merged.format.is_none() {
            merged.format = member.format;
        }
        if merged.enum_values.is_empty() {
            merged.enum_values = member.enum_values;
        }
    }

    merged.required.sort();
    merged
}

/// Canonical string form of an enum member, for set comparison.
fn enum_key(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

fn get_enum_diff(base: &[Value], revision: &[Value]) -> Option<EnumDiff> {
    let base_keys: BTreeMap<String, &Value> =
        base.iter().map(|v| (enum_key(v), v)).collect();
    let revision_keys: BTreeMap<String, &Value> =
        revision.iter().map(|v| (enum_key(v), v)).collect();

    let diff = EnumDiff {
        added: revision_keys
            .iter()
            .filter(|(k, _)| !base_keys.contains_key(*k))
            .map(|(_, v)| (*v).clone())
            .collect(),
        deleted: base_keys
            .iter()
            .filter(|(k, _)| !revision_keys.contains_key(*k))
            .map(|(_, v)| (*v).clone())
            .collect(),
    };

    if diff.is_empty() {
        None
    } else {
        Some(diff)
    }
}

fn get_data_type_diff(base: &Schema, revision: &Schema) -> Option<DataTypeDiff> {
    let (base_type, base_format) = base.data_type();
    let (revision_type, revision_format) = revision.data_type();
    if base_type == revision_type && base_format == revision_format {
        return None;
    }
    Some(DataTypeDiff {
        from: DataTypeValue {
            type_name: base_type,
            format: base_format,
        },
        to: DataTypeValue {
            type_name: revision_type,
            format: revision_format,
        },
    })
}

/// Diff two optional schema positions; empty diffs collapse to `None`.
pub fn get_schema_diff(
    config: &DiffConfig,
    state: &mut SchemaTraversal,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: Option<&SchemaRef>,
    revision: Option<&SchemaRef>,
) -> Option<SchemaDiff> {
    match (base, revision) {
        (None, None) => None,
        (None, Some(revision_ref)) => {
            let resolved = revision_spec.resolve_schema(revision_ref)?.clone();
            Some(SchemaDiff {
                schema_added: true,
                revision: resolved,
                ..SchemaDiff::default()
            })
        }
        (Some(base_ref), None) => {
            let resolved = base_spec.resolve_schema(base_ref)?.clone();
            Some(SchemaDiff {
                schema_deleted: true,
                base: resolved,
                ..SchemaDiff::default()
            })
        }
        (Some(base_ref), Some(revision_ref)) => {
            let base_id = ref_identity(Some(base_ref));
            let revision_id = ref_identity(Some(revision_ref));
            let guard = match (&base_id, &revision_id) {
                // Inline-only positions cannot recurse through themselves
                (None, None) => None,
                _ => Some((
                    base_id.unwrap_or_default(),
                    revision_id.unwrap_or_default(),
                )),
            };

            if let Some(pair) = &guard {
                if !state.enter(pair) {
                    // Bound reached: deeper drift on this cycle is unreported
                    return None;
                }
            }

            let result = compare_resolved(
                config,
                state,
                base_spec,
                revision_spec,
                base_ref,
                revision_ref,
            );

            if let Some(pair) = &guard {
                state.leave(pair);
            }

            result
        }
    }
}

fn compare_resolved(
    config: &DiffConfig,
    state: &mut SchemaTraversal,
    base_spec: &Spec,
    revision_spec: &Spec,
    base_ref: &SchemaRef,
    revision_ref: &SchemaRef,
) -> Option<SchemaDiff> {
    let base = base_spec.resolve_schema(base_ref)?;
    let revision = revision_spec.resolve_schema(revision_ref)?;

    let (base, revision) = if config.flatten_allof {
        (
            flatten_all_of(base_spec, base, &mut BTreeSet::new()),
            flatten_all_of(revision_spec, revision, &mut BTreeSet::new()),
        )
    } else {
        (base.clone(), revision.clone())
    };

    let mut result = SchemaDiff {
        data_type: get_data_type_diff(&base, &revision),
        enum_diff: get_enum_diff(&base.enum_values, &revision.enum_values),
        required: strings_diff(&base.required, &revision.required),
        nullable: value_diff(&base.nullable, &revision.nullable),
        deprecated: value_diff(&base.deprecated, &revision.deprecated),
        properties: get_properties_diff(config, state, base_spec, revision_spec, &base, &revision),
        items: get_schema_diff(
            config,
            state,
            base_spec,
            revision_spec,
            base.items.as_deref(),
            revision.items.as_deref(),
        )
        .map(Box::new),
        additional_properties: get_schema_diff(
            config,
            state,
            base_spec,
            revision_spec,
            base.additional_properties.as_deref(),
            revision.additional_properties.as_deref(),
        )
        .map(Box::new),
        not: get_schema_diff(
            config,
            state,
            base_spec,
            revision_spec,
            base.not.as_deref(),
            revision.not.as_deref(),
        )
        .map(Box::new),
        extensions: get_extensions_diff(config, &base.extensions, &revision.extensions),
        ..SchemaDiff::default()
    };

    if !config.excludes(ExcludeElement::Description) {
        result.description = value_diff(&base.description, &revision.description);
    }
    if !config.excludes(ExcludeElement::Examples) {
        result.example = value_diff(&base.example, &revision.example);
    }

    // Flattening already folded allOf members into the parent
    if !config.flatten_allof {
        result.all_of = get_subschemas_diff(
            config,
            state,
            base_spec,
            revision_spec,
            &base.all_of,
            &revision.all_of,
        );
    }
    result.one_of = get_subschemas_diff(
        config,
        state,
        base_spec,
        revision_spec,
        &base.one_of,
        &revision.one_of,
    );
    result.any_of = get_subschemas_diff(
        config,
        state,
        base_spec,
        revision_spec,
        &base.any_of,
        &revision.any_of,
    );

    if result.is_empty() {
        return None;
    }

    result.base = base;
    result.revision = revision;
    Some(result)
}

fn get_properties_diff(
    config: &DiffConfig,
    state: &mut SchemaTraversal,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &Schema,
    revision: &Schema,
) -> Option<PropertiesDiff> {
    let (added, deleted, both) = key_delta(
        base.properties.keys().map(String::as_str),
        revision.properties.keys().map(String::as_str),
    );

    let mut modified = BTreeMap::new();
    for name in both {
        if let Some(diff) = get_schema_diff(
            config,
            state,
            base_spec,
            revision_spec,
            base.properties.get(&name),
            revision.properties.get(&name),
        ) {
            modified.insert(name, diff);
        }
    }

    let diff = PropertiesDiff {
        added,
        deleted,
        modified,
    };
    if diff.is_empty() {
        None
    } else {
        Some(diff)
    }
}

fn get_subschemas_diff(
    config: &DiffConfig,
    state: &mut SchemaTraversal,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &[SchemaRef],
    revision: &[SchemaRef],
) -> Option<SubschemasDiff> {
    let mut result = SubschemasDiff::default();

    let shared = base.len().min(revision.len());
    for index in 0..shared {
        if let Some(diff) = get_schema_diff(
            config,
            state,
            base_spec,
            revision_spec,
            Some(&base[index]),
            Some(&revision[index]),
        ) {
            result.modified.push((index, diff));
        }
    }
    result.added.extend(shared..revision.len());
    result.deleted.extend(shared..base.len());

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn inline(schema: Schema) -> SchemaRef {
        SchemaRef::from(schema)
    }

    fn string_schema() -> Schema {
        Schema {
            schema_type: Some("string".to_string()),
            ..Schema::default()
        }
    }

    fn diff_schemas(base: Schema, revision: Schema) -> Option<SchemaDiff> {
        let config = DiffConfig::new();
        let mut state = SchemaTraversal::new(config.circular_ref_bound());
        get_schema_diff(
            &config,
            &mut state,
            &Spec::default(),
            &Spec::default(),
            Some(&inline(base)),
            Some(&inline(revision)),
        )
    }

    #[test]
    fn test_identical_schemas_collapse() {
        assert_eq!(diff_schemas(string_schema(), string_schema()), None);
    }

    #[test]
    fn test_type_and_format_report_as_one_change() {
        let mut revision = string_schema();
        revision.schema_type = Some("integer".to_string());
        revision.format = Some("int64".to_string());

        let diff = diff_schemas(string_schema(), revision).expect("differs");
        let data_type = diff.data_type.expect("combined tuple");
        assert_eq!(data_type.from.type_name, "string");
        assert_eq!(data_type.from.format, "none");
        assert_eq!(data_type.to.type_name, "integer");
        assert_eq!(data_type.to.format, "int64");
    }

    #[test]
    fn test_required_change_without_property_change() {
        let mut base = Schema::default();
        base.properties
            .insert("courseId".to_string(), inline(string_schema()));

        let mut revision = base.clone();
        revision.required.push("courseId".to_string());

        let diff = diff_schemas(base, revision).expect("differs");
        let required = diff.required.expect("required facet");
        assert_eq!(required.added, vec!["courseId"]);
        assert!(required.deleted.is_empty());
        assert!(diff.properties.is_none());
    }

    #[test]
    fn test_enum_values_compared_as_sets() {
        let mut base = string_schema();
        base.enum_values = vec![json!("a"), json!("b")];
        let mut revision = string_schema();
        revision.enum_values = vec![json!("b"), json!("c")];

        let diff = diff_schemas(base, revision).expect("differs");
        let enums = diff.enum_diff.expect("enum facet");
        assert_eq!(enums.added, vec![json!("c")]);
        assert_eq!(enums.deleted, vec![json!("a")]);
    }

    #[test]
    fn test_circular_references_are_bounded() {
        // Node.next -> Node, with the revision type changed: the walk must
        // terminate and still report the top-level drift.
        let make_spec = |leaf_type: &str| {
            let mut spec = Spec::default();
            let mut node = Schema {
                schema_type: Some("object".to_string()),
                ..Schema::default()
            };
            node.properties.insert(
                "value".to_string(),
                inline(Schema {
                    schema_type: Some(leaf_type.to_string()),
                    ..Schema::default()
                }),
            );
            node.properties.insert(
                "next".to_string(),
                SchemaRef::Reference {
                    reference: "#/components/schemas/Node".to_string(),
                },
            );
            spec.components.schemas.insert("Node".to_string(), node);
            spec
        };

        let base_spec = make_spec("string");
        let revision_spec = make_spec("integer");
        let node_ref = SchemaRef::Reference {
            reference: "#/components/schemas/Node".to_string(),
        };

        let config = DiffConfig {
            max_circular_refs: 2,
            ..DiffConfig::new()
        };
        let mut state = SchemaTraversal::new(config.circular_ref_bound());
        let diff = get_schema_diff(
            &config,
            &mut state,
            &base_spec,
            &revision_spec,
            Some(&node_ref),
            Some(&node_ref),
        )
        .expect("top-level drift survives the bound");

        let properties = diff.properties.expect("value property changed");
        assert!(properties.modified.contains_key("value"));
    }

    #[test]
    fn test_traversal_bound_refuses_at_limit() {
        let mut state = SchemaTraversal::new(2);
        let pair = ("A".to_string(), "A".to_string());
        assert!(state.enter(&pair));
        assert!(state.enter(&pair));
        assert!(!state.enter(&pair));
        state.leave(&pair);
        assert!(state.enter(&pair));
    }

    #[test]
    fn test_flatten_allof_merges_member_properties() {
        let mut spec = Spec::default();
        spec.components.schemas.insert(
            "Base".to_string(),
            Schema {
                required: vec!["id".to_string()],
                properties: [("id".to_string(), inline(string_schema()))].into(),
                ..Schema::default()
            },
        );

        let composed = Schema {
            all_of: vec![SchemaRef::Reference {
                reference: "#/components/schemas/Base".to_string(),
            }],
            properties: [("name".to_string(), inline(string_schema()))].into(),
            ..Schema::default()
        };

        let flat = flatten_all_of(&spec, &composed, &mut BTreeSet::new());
        assert!(flat.all_of.is_empty());
        assert!(flat.properties.contains_key("id"));
        assert!(flat.properties.contains_key("name"));
        assert_eq!(flat.required, vec!["id"]);
    }

    #[test]
    fn test_subschemas_compared_positionally() {
        let base = Schema {
            one_of: vec![inline(string_schema())],
            ..Schema::default()
        };
        let revision = Schema {
            one_of: vec![
                inline(string_schema()),
                inline(Schema {
                    schema_type: Some("integer".to_string()),
                    ..Schema::default()
                }),
            ],
            ..Schema::default()
        };

        let diff = diff_schemas(base, revision).expect("differs");
        let one_of = diff.one_of.expect("one_of facet");
        assert_eq!(one_of.added, vec![1]);
        assert!(one_of.deleted.is_empty());
        assert!(one_of.modified.is_empty());
    }
}
