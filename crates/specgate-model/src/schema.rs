use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A schema position: either an inline schema or a symbolic `$ref`.
///
/// References stay symbolic in the model so that cyclic schema graphs are
/// representable in owned data; the diff engine resolves them through the
/// owning document's components on each descent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaRef {
    Reference {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Item(Box<Schema>),
}

impl SchemaRef {
    /// The inline schema, if this is not a reference.
    pub fn as_item(&self) -> Option<&Schema> {
        match self {
            SchemaRef::Item(schema) => Some(schema),
            SchemaRef::Reference { .. } => None,
        }
    }
}

impl From<Schema> for SchemaRef {
    fn from(schema: Schema) -> Self {
        SchemaRef::Item(Box::new(schema))
    }
}

/// Schema - the structural description of a value
///
/// Composition keywords (`allOf`, `oneOf`, `anyOf`, `not`) hold ordered
/// collections of subschemas; `required` lists property names independently
/// of whether `properties` declares them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Permitted values, verbatim
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,

    /// Property names a conforming value must carry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, SchemaRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaRef>>,

    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<SchemaRef>>,

    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<SchemaRef>,

    #[serde(rename = "oneOf", default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<SchemaRef>,

    #[serde(rename = "anyOf", default, skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<SchemaRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<SchemaRef>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Unrecognized fields, including `x-*` extensions
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, Value>,
}

impl Schema {
    /// The `(type, format)` pair as the classification layer reports it:
    /// absent halves render as `none`.
    pub fn data_type(&self) -> (String, String) {
        (
            self.schema_type.clone().unwrap_or_else(|| "none".to_string()),
            self.format.clone().unwrap_or_else(|| "none".to_string()),
        )
    }
}
