//! Severity levels for change records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Level - total severity order over change records
///
/// `Info < Warn < Err`; the derived `Ord` relies on variant order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Warn,
    Err,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Err => "ERR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected severity string; configuration errors are never defaulted.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid severity level '{0}', expected one of: info, warn, err")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, ParseLevelError> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "err" | "error" => Ok(Level::Err),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_order_is_total() {
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Err);
    }

    #[test]
    fn test_level_round_trips_through_strings() {
        for level in [Level::Info, Level::Warn, Level::Err] {
            let parsed: Level = level.as_str().parse().expect("parses back");
            assert_eq!(parsed, level);
        }
        assert!("critical".parse::<Level>().is_err(), "unknown levels are rejected");
    }
}
