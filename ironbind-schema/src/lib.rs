//! # IronBind Schema
//!
//! In-memory model of the resource schemas consumed by the IronBind generator.
//!
//! This crate provides:
//! - Package, resource type and property definitions
//! - Value shapes (primitives, references, containers)
//! - Schema paths for error reporting
//! - Resource validation
//!
//! Parsing a schema document is left to the caller; every model type derives
//! `serde::Deserialize` so any self-describing format can produce it.

pub mod error;
pub mod path;
pub mod resource;
pub mod types;
pub mod validation;

pub use error::{SchemaError, SchemaErrorKind};
pub use path::SchemaPath;
pub use resource::{Package, PropertyDef, ResourceType};
pub use types::{PrimitiveType, ValueShape};
pub use validation::{validate_package, validate_resource};
