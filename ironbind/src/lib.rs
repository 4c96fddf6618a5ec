//! # IronBind
//!
//! Schema-driven, multi-language SDK binding generator.
//!
//! For every resource type of a package and every target language, IronBind
//! resolves naming collisions, builds a language-agnostic resource binding
//! and renders it as source code.
//!
//! ## Features
//!
//! - **Collision-free naming** - Case folding, reserved words and structural
//!   members are handled per language, and every rename is reported
//! - **Uniform construction contract** - Create and lookup-existing entry
//!   points, args containers and deferred outputs for every language
//! - **Forced lookup IDs** - The explicit lookup ID always wins over the
//!   options bag
//! - **Parallel generation** - Resource types are generated concurrently
//!   with deterministic output
//!
//! ## Quick Start
//!
//! ```
//! use ironbind::prelude::*;
//!
//! let package = Package::new("example", "0.0.1").with_resource(
//!     ResourceType::new("example::ResourceInput")
//!         .with_property(PropertyDef::new("bar", ValueShape::string()).output_only()),
//! );
//!
//! let report = ironbind::generate_package(&package)?;
//! assert!(report.is_complete());
//! assert_eq!(report.resources.len(), 3);
//! # Ok::<(), CodegenError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Resource schema model and validation
//! - [`codegen`] - Naming, bindings, emitters and the package generator

pub mod prelude;

/// Resource schema model and validation.
pub mod schema {
    pub use ironbind_schema::*;
}

/// Naming, resource bindings and source emitters.
pub mod codegen {
    pub use ironbind_codegen::*;
}

// Re-export commonly used items at the crate root
pub use ironbind_codegen::{
    BindingBuilder, CodegenError, GeneratedFile, GenerationReport, Generator, Language,
    LanguageRules, ResourceBinding, RuleSet,
};
pub use ironbind_schema::{Package, SchemaError};

/// Generates every resource type of a package for every preset language.
///
/// # Errors
/// Returns `CodegenError` if the preset rules cannot name a resource type.
/// Schema errors are reported in [`GenerationReport::failures`].
pub fn generate_package(package: &Package) -> Result<GenerationReport, CodegenError> {
    let report = Generator::new(RuleSet::defaults()).generate(package)?;
    tracing::info!(
        package = %package.name,
        files = report.resources.len(),
        failures = report.failures.len(),
        renames = report.collisions().count(),
        "package generated"
    );
    Ok(report)
}
