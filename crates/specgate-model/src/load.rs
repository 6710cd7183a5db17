//! Document loading from JSON or YAML bytes and files.
//!
//! Loading is the boundary where malformed documents are rejected; the diff
//! engine downstream assumes structurally valid input.

use std::path::Path;
use thiserror::Error;

use crate::spec::Spec;

/// Errors raised while loading a specification document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid JSON document: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} is not a valid YAML document: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl Spec {
    /// Parse a document from JSON bytes, recording `source`.
    pub fn from_json_bytes(bytes: &[u8], source: &str) -> Result<Spec, LoadError> {
        let mut spec: Spec = serde_json::from_slice(bytes).map_err(|e| LoadError::Json {
            path: source.to_string(),
            source: e,
        })?;
        spec.source = source.to_string();
        Ok(spec)
    }

    /// Parse a document from YAML bytes, recording `source`.
    ///
    /// YAML is a superset of JSON, so this also accepts JSON content; the
    /// dedicated JSON path exists for precise error messages.
    pub fn from_yaml_bytes(bytes: &[u8], source: &str) -> Result<Spec, LoadError> {
        let mut spec: Spec = serde_yaml::from_slice(bytes).map_err(|e| LoadError::Yaml {
            path: source.to_string(),
            source: e,
        })?;
        spec.source = source.to_string();
        Ok(spec)
    }

    /// Load a document from a file, dispatching on its extension
    /// (`.json` parses as JSON, anything else as YAML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Spec, LoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| LoadError::Io {
            path: display.clone(),
            source: e,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Spec::from_json_bytes(&bytes, &display),
            _ => Spec::from_yaml_bytes(&bytes, &display),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_YAML: &str = r#"
openapi: 3.0.3
info:
  title: Test API
  version: "1.0"
paths:
  /pets:
    get:
      operationId: listPets
      responses:
        "200":
          description: ok
"#;

    #[test]
    fn test_from_yaml_bytes_records_source() {
        let spec = Spec::from_yaml_bytes(MINIMAL_YAML.as_bytes(), "base.yaml")
            .expect("yaml loads");
        assert_eq!(spec.source, "base.yaml");
        assert_eq!(spec.info.title, "Test API");
        let pets = spec.paths.get("/pets").expect("path present");
        assert_eq!(
            pets.get.as_ref().and_then(|op| op.operation_id.as_deref()),
            Some("listPets")
        );
    }

    #[test]
    fn test_from_json_bytes_rejects_malformed() {
        let err = Spec::from_json_bytes(b"{not json", "broken.json").unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn test_from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let yaml_path = dir.path().join("api.yaml");
        std::fs::write(&yaml_path, MINIMAL_YAML).unwrap();
        let spec = Spec::from_file(&yaml_path).expect("yaml file loads");
        assert_eq!(spec.source, yaml_path.display().to_string());

        // YAML content behind a .json extension must fail as JSON
        let json_path = dir.path().join("api.json");
        std::fs::write(&json_path, MINIMAL_YAML).unwrap();
        let err = Spec::from_file(&json_path).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));

        let err = Spec::from_file(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_source_does_not_affect_equality() {
        let a = Spec::from_yaml_bytes(MINIMAL_YAML.as_bytes(), "a.yaml").unwrap();
        let mut b = Spec::from_yaml_bytes(MINIMAL_YAML.as_bytes(), "b.yaml").unwrap();
        assert_ne!(a.source, b.source);
        b.source = a.source.clone();
        assert_eq!(a, b);
    }
}
