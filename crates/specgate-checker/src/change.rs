//! Change records, the unit of classification output.

use serde::{Deserialize, Serialize};

use crate::level::Level;

/// Change - one classified, leveled, localized output record
///
/// Created exactly once per (rule, atomic diff) match and immutable after
/// creation; downstream stages only filter and reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Stable rule identifier, e.g. `response-property-type-changed`
    pub id: String,

    pub level: Level,

    /// Localized human-readable message
    pub text: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,

    /// HTTP method, empty for document-level changes
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operation: String,

    /// The operation's declared identifier, may be empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub operation_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,

    /// Originating document of the changed operation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
}

/// Changes - an ordered record sequence for one comparison
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Changes(pub Vec<Change>);

impl Changes {
    pub fn new(mut records: Vec<Change>) -> Self {
        sort_changes(&mut records);
        Changes(records)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.0.iter()
    }

    /// Whether at least one record's level is `level` or above.
    ///
    /// This predicate backs process exit-status decisions.
    pub fn has_level_or_higher(&self, level: Level) -> bool {
        self.0.iter().any(|c| c.level >= level)
    }
}

impl IntoIterator for Changes {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Deterministic record order: severity first (highest on top), then by
/// location and id so equal-severity records group by endpoint.
pub fn sort_changes(records: &mut [Change]) {
    records.sort_by(|a, b| {
        b.level
            .cmp(&a.level)
            .then_with(|| a.path.cmp(&b.path))
            .then_with(|| a.operation.cmp(&b.operation))
            .then_with(|| a.id.cmp(&b.id))
            .then_with(|| a.text.cmp(&b.text))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, level: Level, path: &str) -> Change {
        Change {
            id: id.to_string(),
            level,
            text: String::new(),
            comment: String::new(),
            operation: "GET".to_string(),
            operation_id: String::new(),
            path: path.to_string(),
            source: String::new(),
        }
    }

    #[test]
    fn test_has_level_or_higher() {
        let changes = Changes::new(vec![record("a", Level::Warn, "/x")]);
        assert!(changes.has_level_or_higher(Level::Info));
        assert!(changes.has_level_or_higher(Level::Warn));
        assert!(!changes.has_level_or_higher(Level::Err));
    }

    #[test]
    fn test_sort_is_severity_then_location() {
        let changes = Changes::new(vec![
            record("b", Level::Info, "/a"),
            record("a", Level::Err, "/z"),
            record("a", Level::Err, "/a"),
        ]);
        let ids: Vec<(&str, &str)> = changes
            .iter()
            .map(|c| (c.path.as_str(), c.level.as_str()))
            .collect();
        assert_eq!(ids, vec![("/a", "ERR"), ("/z", "ERR"), ("/a", "INFO")]);
    }
}
