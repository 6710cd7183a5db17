//! Operation -> originating document index.

use std::collections::BTreeMap;

/// One operation's identity inside a single comparison side.
pub type OperationKey = (String, String); // (path, method)

/// OperationsSourcesMap - which document each operation came from
///
/// Built alongside the diff tree and passed read-only wherever the tree is
/// passed. In composed mode the same logical operation may originate from
/// different files on each side, so base and revision are indexed
/// separately. Keys use the same rewritten path strings as the diff tree.
#[derive(Debug, Clone, Default)]
pub struct OperationsSourcesMap {
    base: BTreeMap<OperationKey, String>,
    revision: BTreeMap<OperationKey, String>,
}

impl OperationsSourcesMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the source document of a base-side operation.
    pub fn insert_base(&mut self, path: &str, method: &str, source: &str) {
        self.base
            .insert((path.to_string(), method.to_string()), source.to_string());
    }

    /// Record the source document of a revision-side operation.
    pub fn insert_revision(&mut self, path: &str, method: &str, source: &str) {
        self.revision
            .insert((path.to_string(), method.to_string()), source.to_string());
    }

    /// The base-side source of `(path, method)`, if known.
    pub fn base_source(&self, path: &str, method: &str) -> Option<&str> {
        self.base
            .get(&(path.to_string(), method.to_string()))
            .map(String::as_str)
    }

    /// The revision-side source of `(path, method)`, if known.
    pub fn revision_source(&self, path: &str, method: &str) -> Option<&str> {
        self.revision
            .get(&(path.to_string(), method.to_string()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sides_are_indexed_independently() {
        let mut map = OperationsSourcesMap::new();
        map.insert_base("/pets", "GET", "base.yaml");
        map.insert_revision("/pets", "GET", "revision.yaml");

        assert_eq!(map.base_source("/pets", "GET"), Some("base.yaml"));
        assert_eq!(map.revision_source("/pets", "GET"), Some("revision.yaml"));
        assert_eq!(map.revision_source("/pets", "POST"), None);
    }
}
