//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types.
//!
//! ```
//! use ironbind::prelude::*;
//! ```

// Schema types
pub use ironbind_schema::{
    Package, PrimitiveType, PropertyDef, ResourceType, SchemaError, SchemaErrorKind, SchemaPath,
    ValueShape,
};

// Rules and naming
pub use ironbind_codegen::{
    CaseEquality, Casing, Collided, CollisionResolved, Disambiguation, Identifier, IdentifierKind,
    Language, LanguageRules, Namer, RuleSet, Scope, SuffixConfig,
};

// Bindings and invocation
pub use ironbind_codegen::{
    ArgsValue, BindingBuilder, EntryKind, ParameterRole, RegisterRequest, RequestError,
    ResourceBinding, ResourceOptions,
};

// Generation
pub use ironbind_codegen::{
    CodegenError, GeneratedFile, GenerationReport, Generator, NamingConfigurationError,
};
