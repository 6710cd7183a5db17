use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::parameter::Parameter;
use crate::schema::SchemaRef;
use crate::spec::{SecurityRequirement, Server};

/// Extension key carrying the date a deprecated resource will be removed.
pub const SUNSET_EXTENSION: &str = "x-sunset";

/// Extension key declaring the maturity of a resource (`beta` / `stable`).
pub const STABILITY_EXTENSION: &str = "x-stability-level";

/// Declared maturity of a resource, read from `x-stability-level`.
///
/// Stability determines which deprecation grace period applies before a
/// removal stops being a breaking change. Absent or unrecognized values are
/// treated as `Stable` (the longer grace period).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityLevel {
    Beta,
    Stable,
}

/// Operation - one HTTP method under one path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        rename = "operationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub operation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(
        rename = "requestBody",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<RequestBody>,

    /// Status code (or `default`) -> response
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub responses: BTreeMap<String, Response>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,

    /// Unrecognized fields, including `x-*` extensions
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, Value>,
}

impl Operation {
    /// The declared sunset date, if `x-sunset` is present and parses as an
    /// ISO `YYYY-MM-DD` date. An unparseable value yields `None`; the
    /// classification layer reports that as its own finding.
    pub fn sunset_date(&self) -> Option<NaiveDate> {
        let raw = self.extensions.get(SUNSET_EXTENSION)?.as_str()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    /// True when `x-sunset` is present, regardless of whether it parses.
    pub fn has_sunset(&self) -> bool {
        self.extensions.contains_key(SUNSET_EXTENSION)
    }

    /// Declared stability, defaulting to `Stable` when absent or unknown.
    pub fn stability(&self) -> StabilityLevel {
        match self
            .extensions
            .get(STABILITY_EXTENSION)
            .and_then(Value::as_str)
        {
            Some("beta") => StabilityLevel::Beta,
            _ => StabilityLevel::Stable,
        }
    }
}

/// RequestBody - the payload an operation accepts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    /// Media type -> payload description
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}

/// Response - one status code's declared result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Header>,

    /// Media type -> payload description
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}

/// MediaType - the schema and example payload for one content type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    /// Unrecognized fields, including `x-*` extensions
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, Value>,
}

/// Header - a response header declaration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}
