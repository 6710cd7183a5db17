//! Structural comparison of API description documents.
//!
//! [`compare`] takes a base and a revision document and produces a typed
//! [`Diff`] tree plus an [`OperationsSourcesMap`] that records which source
//! file each endpoint came from. Every node in the tree collapses to `None`
//! when nothing under it changed, so `Diff::is_empty()` is the "no change"
//! signal. [`compare_composed`] runs the same comparison over path sets
//! aggregated from several documents per side.
//!
//! The comparison is pure: no I/O, no global state, and deterministic
//! output for identical inputs.

pub mod config;
pub mod diff;
pub mod errors;
pub mod sources;

pub use config::{DiffConfig, ExcludeElement, DEFAULT_MAX_CIRCULAR_REFS};
pub use diff::content::{ContentDiff, MediaTypeDiff};
pub use diff::extensions::ExtensionsDiff;
pub use diff::headers::{HeaderDiff, HeadersDiff};
pub use diff::operation::OperationDiff;
pub use diff::operations::OperationsDiff;
pub use diff::parameters::{ParameterDiff, ParametersDiff};
pub use diff::path_item::PathDiff;
pub use diff::paths::PathsDiff;
pub use diff::request_body::RequestBodyDiff;
pub use diff::responses::{ResponseDiff, ResponsesDiff};
pub use diff::schema::{DataTypeDiff, DataTypeValue, EnumDiff, PropertiesDiff, SchemaDiff};
pub use diff::security::{SecurityDiff, ServersDiff};
pub use diff::value::{StringsDiff, ValueDiff};
pub use diff::{compare, compare_composed, Diff, InfoDiff};
pub use errors::{DiffError, DiffErrorKind, Result};
pub use sources::OperationsSourcesMap;
