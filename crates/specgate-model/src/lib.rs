//! specgate-model - Specification document object model
//!
//! This crate provides the parsed object model consumed by the diff engine:
//! - `Spec` document root with paths, components, security and servers
//! - Path items, operations, parameters, request bodies, responses, headers
//! - Schemas with composition keywords and symbolic `$ref` links
//! - JSON/YAML loading with per-document source tracking
//!
//! The model is deliberately permissive: documents are assumed to have been
//! validated upstream, and unknown fields (including `x-*` extensions) are
//! preserved for extension diffing.

pub mod load;
pub mod operation;
pub mod parameter;
pub mod path_item;
pub mod schema;
pub mod spec;

// Re-export commonly used types
pub use load::LoadError;
pub use operation::{Operation, RequestBody, Response, MediaType, Header, StabilityLevel};
pub use parameter::{Parameter, ParameterLocation};
pub use path_item::PathItem;
pub use schema::{Schema, SchemaRef};
pub use spec::{Components, Info, SecurityRequirement, Server, Spec};
