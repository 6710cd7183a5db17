//! Suppression of accepted changes.
//!
//! An ignore file is YAML keyed by rule id; each entry names the endpoint
//! and optionally a fingerprint of the record text, so a suppression stops
//! matching when the message it accepted changes. WARN and ERR suppression
//! sets are applied independently: a record suppressed at one level still
//! surfaces at the other.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::change::Change;
use crate::level::Level;

/// Hex length of a record-text fingerprint.
const FINGERPRINT_LEN: usize = 16;

/// Content fingerprint of a localized record text.
///
/// Case-insensitive so cosmetic message capitalization does not invalidate
/// existing suppressions.
pub fn fingerprint(text: &str) -> String {
    let digest = Sha256::digest(text.to_lowercase().as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// One suppression entry under a rule id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreEntry {
    pub path: String,

    pub operation: String,

    /// When present, must equal `fingerprint(record.text)` to match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Why this change was accepted; carried for reporting only
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
}

impl IgnoreEntry {
    fn matches(&self, record: &Change) -> bool {
        if !self.path.eq_ignore_ascii_case(&record.path) {
            return false;
        }
        if !self.operation.eq_ignore_ascii_case(&record.operation) {
            return false;
        }
        match &self.fingerprint {
            Some(expected) => expected.eq_ignore_ascii_case(&fingerprint(&record.text)),
            None => true,
        }
    }
}

/// IgnoreList - parsed suppression file, keyed by rule id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreList(pub BTreeMap<String, Vec<IgnoreEntry>>);

/// Invalid suppression input; reported at configuration-resolution time.
#[derive(Debug, thiserror::Error)]
pub enum IgnoreError {
    #[error("failed to read ignore file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse ignore file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl IgnoreList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse an ignore file from YAML text.
    ///
    /// # Errors
    ///
    /// `IgnoreError::Yaml` when the document does not match the expected
    /// shape; never silently defaulted.
    pub fn from_yaml(text: &str) -> Result<Self, IgnoreError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load an ignore file from disk.
    ///
    /// # Errors
    ///
    /// `IgnoreError::Io` on read failure, `IgnoreError::Yaml` on parse
    /// failure.
    pub fn from_file(path: &Path) -> Result<Self, IgnoreError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    fn matches(&self, record: &Change) -> bool {
        self.0
            .get(&record.id)
            .is_some_and(|entries| entries.iter().any(|e| e.matches(record)))
    }

    /// Entries that matched no record in `records`.
    fn unmatched(&self, records: &[Change], level: Level) -> Vec<UnmatchedIgnore> {
        let mut out = Vec::new();
        for (id, entries) in &self.0 {
            for entry in entries {
                let hit = records
                    .iter()
                    .any(|r| r.level == level && r.id == *id && entry.matches(r));
                if !hit {
                    out.push(UnmatchedIgnore {
                        id: id.clone(),
                        level,
                        entry: entry.clone(),
                    });
                }
            }
        }
        out
    }
}

/// A suppression entry that never matched; configuration hygiene, not an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedIgnore {
    pub id: String,
    pub level: Level,
    pub entry: IgnoreEntry,
}

/// Apply level-scoped suppressions to a record sequence.
///
/// The WARN list only removes WARN records and the ERR list only removes
/// ERR records; INFO records are never suppressed. Returns the surviving
/// records plus the entries that matched nothing.
pub fn apply_ignores(
    records: Vec<Change>,
    warn_ignores: &IgnoreList,
    err_ignores: &IgnoreList,
) -> (Vec<Change>, Vec<UnmatchedIgnore>) {
    let mut unmatched = warn_ignores.unmatched(&records, Level::Warn);
    unmatched.extend(err_ignores.unmatched(&records, Level::Err));

    let kept = records
        .into_iter()
        .filter(|record| match record.level {
            Level::Warn => !warn_ignores.matches(record),
            Level::Err => !err_ignores.matches(record),
            Level::Info => true,
        })
        .collect();

    (kept, unmatched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, level: Level, path: &str, text: &str) -> Change {
        Change {
            id: id.to_string(),
            level,
            text: text.to_string(),
            comment: String::new(),
            operation: "GET".to_string(),
            operation_id: String::new(),
            path: path.to_string(),
            source: String::new(),
        }
    }

    fn list_for(id: &str, path: &str) -> IgnoreList {
        let mut map = BTreeMap::new();
        map.insert(
            id.to_string(),
            vec![IgnoreEntry {
                path: path.to_string(),
                operation: "GET".to_string(),
                fingerprint: None,
                reason: "accepted".to_string(),
            }],
        );
        IgnoreList(map)
    }

    #[test]
    fn test_fingerprint_is_case_insensitive_and_short() {
        let a = fingerprint("The Response Changed");
        let b = fingerprint("the response changed");
        assert_eq!(a, b);
        assert_eq!(a.len(), FINGERPRINT_LEN);
    }

    #[test]
    fn test_warn_and_err_suppressions_are_independent() {
        let warn_record = record("r", Level::Warn, "/pets", "t");
        let err_record = record("r", Level::Err, "/pets", "t");
        let list = list_for("r", "/pets");

        // Suppressing at WARN leaves the ERR record alone
        let (kept, _) = apply_ignores(
            vec![warn_record.clone(), err_record.clone()],
            &list,
            &IgnoreList::default(),
        );
        assert_eq!(kept, vec![err_record.clone()]);

        // And vice versa
        let (kept, _) = apply_ignores(
            vec![warn_record.clone(), err_record],
            &IgnoreList::default(),
            &list,
        );
        assert_eq!(kept, vec![warn_record]);
    }

    #[test]
    fn test_fingerprint_mismatch_blocks_suppression() {
        let mut list = list_for("r", "/pets");
        list.0.get_mut("r").unwrap()[0].fingerprint = Some(fingerprint("other text"));

        let (kept, unmatched) = apply_ignores(
            vec![record("r", Level::Err, "/pets", "real text")],
            &IgnoreList::default(),
            &list,
        );
        assert_eq!(kept.len(), 1, "stale fingerprints must not suppress");
        assert_eq!(unmatched.len(), 1);
    }

    #[test]
    fn test_unmatched_entries_are_reported_not_fatal() {
        let list = list_for("r", "/nowhere");
        let (kept, unmatched) =
            apply_ignores(vec![record("r", Level::Warn, "/pets", "t")], &list, &IgnoreList::default());
        assert_eq!(kept.len(), 1);
        assert_eq!(unmatched.len(), 1);
        assert_eq!(unmatched[0].entry.path, "/nowhere");
    }

    #[test]
    fn test_yaml_shape_round_trip() {
        let yaml = r#"
api-path-removed-without-deprecation:
  - path: /pets
    operation: GET
    reason: sunset announced out of band
"#;
        let list = IgnoreList::from_yaml(yaml).expect("parses");
        assert_eq!(list.0.len(), 1);
        let entries = &list.0["api-path-removed-without-deprecation"];
        assert_eq!(entries[0].operation, "GET");

        assert!(IgnoreList::from_yaml("just a string").is_err());
    }
}
