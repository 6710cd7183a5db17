use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::path_item::PathItem;
use crate::schema::{Schema, SchemaRef};

/// A security requirement: scheme name mapped to the scopes it requires.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// Spec - the root of a parsed specification document
///
/// A `Spec` is the in-memory form of one interface description document:
/// the paths it serves, the reusable components they reference, and the
/// document-level security and server declarations.
///
/// `source` records where the document was loaded from. It is populated by
/// the loader and skipped during serialization; it is provenance, not
/// document content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spec {
    /// Specification format version (e.g. "3.0.3")
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub openapi: String,

    /// Document metadata (title, version, description)
    #[serde(default, skip_serializing_if = "Info::is_empty")]
    pub info: Info,

    /// Path string -> path item, in lexical order
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub paths: BTreeMap<String, PathItem>,

    /// Reusable components referenced by `$ref`
    #[serde(default, skip_serializing_if = "Components::is_empty")]
    pub components: Components,

    /// Document-level security requirements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,

    /// Document-level servers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    /// Unrecognized root fields, including `x-*` extensions
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, Value>,

    /// Originating file path or URL (loader-populated, not part of content)
    #[serde(skip)]
    pub source: String,
}

impl Spec {
    /// Resolve a schema reference against this document's components.
    ///
    /// Inline schemas resolve to themselves. Symbolic references resolve
    /// through `#/components/schemas/<name>`; any other reference shape, or
    /// an unknown name, yields `None` (the loader is responsible for having
    /// rejected dangling references).
    pub fn resolve_schema<'a>(&'a self, schema_ref: &'a SchemaRef) -> Option<&'a Schema> {
        match schema_ref {
            SchemaRef::Item(schema) => Some(schema),
            SchemaRef::Reference { reference } => {
                let name = reference.strip_prefix("#/components/schemas/")?;
                self.components.schemas.get(name)
            }
        }
    }

    /// The component name a reference points at, if it is a reference.
    ///
    /// Used as the identity half of the comparator's visited-pair set:
    /// only named schemas can participate in reference cycles.
    pub fn schema_ref_name(schema_ref: &SchemaRef) -> Option<&str> {
        match schema_ref {
            SchemaRef::Reference { reference } => {
                reference.strip_prefix("#/components/schemas/")
            }
            SchemaRef::Item(_) => None,
        }
    }
}

/// Document metadata block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Info {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.version.is_empty() && self.description.is_none()
    }
}

/// Reusable components referenced from path items via `$ref`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Named schemas, the only component kind the comparator resolves
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, Schema>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// A server the document declares, at document, path or operation level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Server {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_schema_inline() {
        let spec = Spec::default();
        let inline = SchemaRef::Item(Box::new(Schema {
            schema_type: Some("string".to_string()),
            ..Schema::default()
        }));

        let resolved = spec.resolve_schema(&inline).expect("inline resolves");
        assert_eq!(resolved.schema_type.as_deref(), Some("string"));
    }

    #[test]
    fn test_resolve_schema_by_reference() {
        let mut spec = Spec::default();
        spec.components.schemas.insert(
            "Pet".to_string(),
            Schema {
                schema_type: Some("object".to_string()),
                ..Schema::default()
            },
        );

        let reference = SchemaRef::Reference {
            reference: "#/components/schemas/Pet".to_string(),
        };
        let resolved = spec.resolve_schema(&reference).expect("named resolves");
        assert_eq!(resolved.schema_type.as_deref(), Some("object"));
        assert_eq!(Spec::schema_ref_name(&reference), Some("Pet"));
    }

    #[test]
    fn test_resolve_schema_unknown_name() {
        let spec = Spec::default();
        let reference = SchemaRef::Reference {
            reference: "#/components/schemas/Missing".to_string(),
        };
        assert!(spec.resolve_schema(&reference).is_none());
    }
}
