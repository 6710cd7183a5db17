//! Content (media type) comparison.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use specgate_model::{MediaType, Spec};

use crate::config::{DiffConfig, ExcludeElement};
use crate::diff::extensions::{get_extensions_diff, ExtensionsDiff};
use crate::diff::schema::{get_schema_diff, SchemaDiff, SchemaTraversal};
use crate::diff::value::{key_delta, value_diff, ValueDiff};

/// ContentDiff - media types added/deleted/modified on one payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentDiff {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modified: BTreeMap<String, MediaTypeDiff>,
}

impl ContentDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty() && self.modified.is_empty()
    }
}

/// MediaTypeDiff - changes to one media type present on both sides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaTypeDiff {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<ValueDiff>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ExtensionsDiff>,

    /// Base media type this node was computed from
    #[serde(skip)]
    pub base: MediaType,

    /// Revision media type this node was computed from
    #[serde(skip)]
    pub revision: MediaType,
}

impl MediaTypeDiff {
    pub fn is_empty(&self) -> bool {
        self.schema.is_none() && self.example.is_none() && self.extensions.is_none()
    }
}

/// Diff two content maps; empty diffs collapse to `None`.
pub(crate) fn get_content_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &BTreeMap<String, MediaType>,
    revision: &BTreeMap<String, MediaType>,
) -> Option<ContentDiff> {
    let (added, deleted, both) = key_delta(
        base.keys().map(String::as_str),
        revision.keys().map(String::as_str),
    );

    let mut modified = BTreeMap::new();
    for media_type in both {
        let base_media = &base[&media_type];
        let revision_media = &revision[&media_type];
        if let Some(diff) =
            get_media_type_diff(config, base_spec, revision_spec, base_media, revision_media)
        {
            modified.insert(media_type, diff);
        }
    }

    let result = ContentDiff {
        added,
        deleted,
        modified,
    };
    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}

fn get_media_type_diff(
    config: &DiffConfig,
    base_spec: &Spec,
    revision_spec: &Spec,
    base: &MediaType,
    revision: &MediaType,
) -> Option<MediaTypeDiff> {
    let mut state = SchemaTraversal::new(config.circular_ref_bound());

    let mut result = MediaTypeDiff {
        schema: get_schema_diff(
            config,
            &mut state,
            base_spec,
            revision_spec,
            base.schema.as_ref(),
            revision.schema.as_ref(),
        ),
        extensions: get_extensions_diff(config, &base.extensions, &revision.extensions),
        ..MediaTypeDiff::default()
    };

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

#[cfg(test)]
mod tests {
    use super::*;
    use specgate_model::{Schema, SchemaRef};

    #[test]
    fn test_media_type_added_and_schema_modified() {
        let json_media = MediaType {
            schema: Some(SchemaRef::from(Schema {
                schema_type: Some("string".to_string()),
                ..Schema::default()
            })),
            ..MediaType::default()
        };
        let changed_media = MediaType {
            schema: Some(SchemaRef::from(Schema {
                schema_type: Some("integer".to_string()),
                ..Schema::default()
            })),
            ..MediaType::default()
        };

        let base: BTreeMap<String, MediaType> =
            [("application/json".to_string(), json_media)].into();
        let revision: BTreeMap<String, MediaType> = [
            ("application/json".to_string(), changed_media),
            ("text/plain".to_string(), MediaType::default()),
        ]
        .into();

        let diff = get_content_diff(
            &DiffConfig::new(),
            &Spec::default(),
            &Spec::default(),
            &base,
            &revision,
        )
        .expect("differs");

        assert_eq!(diff.added, vec!["text/plain"]);
        assert!(diff.deleted.is_empty());
        let media_diff = &diff.modified["application/json"];
        assert!(media_diff.schema.as_ref().expect("schema facet").data_type.is_some());
    }
}
