//! # IronBind Codegen
//!
//! Resource bindings and SDK source generation from IronBind schemas.
//!
//! This crate provides:
//! - Per-language naming rules (reserved words, case equality,
//!   disambiguation strategies)
//! - Collision-free identifier resolution within nested scopes
//! - Language-agnostic resource bindings with create and lookup entry points
//! - Options merging with forced lookup IDs
//! - C#, TypeScript and Python emitters
//! - A parallel package generator

pub mod binding;
pub mod builder;
pub mod emit;
pub mod error;
pub mod generator;
pub mod naming;
pub mod options;
pub mod request;
pub mod rules;

pub use binding::{
    ArgsContainer, ArgsField, EntryKind, EntryPoint, FieldDefault, OutputAccessor, Parameter,
    ParameterRole, PropertyBinding, ResourceBinding,
};
pub use builder::BindingBuilder;
pub use emit::{GeneratedFile, emit, output_path};
pub use error::{CodegenError, NamingConfigurationError};
pub use generator::{GeneratedResource, GenerationFailure, GenerationReport, Generator};
pub use naming::{Collided, CollisionResolved, Identifier, IdentifierKind, Namer, Scope};
pub use options::{OptionsMergePlan, ResourceOptions, merge};
pub use request::{ArgsValue, RegisterRequest, RequestError};
pub use rules::{CaseEquality, Casing, Disambiguation, Language, LanguageRules, RuleSet, SuffixConfig};

use ironbind_schema::{Package, SchemaError, SchemaErrorKind, SchemaPath};

/// Generates the source file of one resource type with the preset rules of
/// a language.
///
/// # Arguments
/// * `package` - Package declaring the resource type
/// * `token` - Type token of the resource
/// * `language` - Target language
///
/// # Errors
/// Returns `CodegenError::Schema` if the token is not declared or the
/// resource type is malformed.
///
/// # Example
/// ```
/// use ironbind_codegen::{Language, generate_resource};
/// use ironbind_schema::{Package, PropertyDef, ResourceType, ValueShape};
///
/// let package = Package::new("example", "0.0.1").with_resource(
///     ResourceType::new("example::ResourceInput")
///         .with_property(PropertyDef::new("bar", ValueShape::string()).output_only()),
/// );
/// let file = generate_resource(&package, "example::ResourceInput", Language::DotNet)?;
/// assert!(file.contents.contains("public Output<string?> Bar"));
/// # Ok::<(), ironbind_codegen::CodegenError>(())
/// ```
pub fn generate_resource(
    package: &Package,
    token: &str,
    language: Language,
) -> Result<GeneratedFile, CodegenError> {
    let resource = package.get_resource(token).ok_or_else(|| {
        SchemaError::new(
            SchemaPath::resource(token),
            SchemaErrorKind::UnknownResource {
                token: token.to_string(),
            },
        )
    })?;
    let rules = LanguageRules::preset(language);
    let binding = BindingBuilder::new(&rules).build(package, resource)?;
    Ok(emit(&binding))
}
