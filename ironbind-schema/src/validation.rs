//! Schema validation utilities.
//!
//! Validation rejects resource types the generator cannot bind
//! unambiguously. Errors carry the schema path of the offending element.

use crate::error::{SchemaError, SchemaErrorKind};
use crate::path::SchemaPath;
use crate::resource::{Package, ResourceType};
use crate::types::ValueShape;
use std::collections::{BTreeMap, HashSet};

/// Validates a whole package, stopping at the first error.
///
/// # Errors
/// Returns `SchemaError` if a token is declared twice or any resource type
/// is invalid.
pub fn validate_package(package: &Package) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for resource in &package.resources {
        if !seen.insert(resource.token.as_str()) {
            return Err(SchemaError::new(
                SchemaPath::resource(&resource.token),
                SchemaErrorKind::DuplicateResource {
                    token: resource.token.clone(),
                },
            ));
        }
        validate_resource(&package.name, resource)?;
    }
    Ok(())
}

/// Validates one resource type of the named package.
///
/// # Errors
/// Returns `SchemaError` describing the first problem found.
pub fn validate_resource(package: &str, resource: &ResourceType) -> Result<(), SchemaError> {
    let path = SchemaPath::resource(&resource.token);

    let Some((token_package, _, name)) = resource.token_parts() else {
        return Err(SchemaError::new(
            path.field("token"),
            SchemaErrorKind::MalformedToken {
                token: resource.token.clone(),
            },
        ));
    };

    if token_package != package {
        return Err(SchemaError::new(
            path.field("token"),
            SchemaErrorKind::PackageMismatch {
                expected: package.to_string(),
                found: token_package.to_string(),
            },
        ));
    }

    if !is_representable(name) {
        return Err(SchemaError::unrepresentable(path.field("token"), name));
    }
    validate_language_names(&path, &resource.language_names)?;

    let mut seen = HashSet::new();
    for property in &resource.properties {
        let prop_path = path.property(&property.name);

        if property.name.is_empty() {
            return Err(SchemaError::empty_name(prop_path));
        }
        if !is_representable(&property.name) {
            return Err(SchemaError::unrepresentable(prop_path, &property.name));
        }
        if !seen.insert(property.name.as_str()) {
            return Err(SchemaError::new(
                prop_path,
                SchemaErrorKind::DuplicateProperty {
                    name: property.name.clone(),
                },
            ));
        }

        validate_language_names(&prop_path, &property.language_names)?;
        validate_shape(&prop_path.field("shape"), &property.shape)?;
    }

    Ok(())
}

/// Returns true if the name has at least one character usable in an
/// identifier.
#[must_use]
pub fn is_representable(name: &str) -> bool {
    name.chars().any(char::is_alphanumeric)
}

fn validate_language_names(
    path: &SchemaPath,
    names: &BTreeMap<String, String>,
) -> Result<(), SchemaError> {
    for (language, name) in names {
        let entry = path.key("languageNames", language);
        if name.is_empty() {
            return Err(SchemaError::empty_name(entry));
        }
        if !is_representable(name) {
            return Err(SchemaError::unrepresentable(entry, name));
        }
    }
    Ok(())
}

fn validate_shape(path: &SchemaPath, shape: &ValueShape) -> Result<(), SchemaError> {
    match shape {
        ValueShape::Primitive(_) => Ok(()),
        ValueShape::Reference(token) if token.is_empty() => {
            Err(SchemaError::new(path.clone(), SchemaErrorKind::EmptyReference))
        }
        ValueShape::Reference(_) => Ok(()),
        ValueShape::Array(inner) | ValueShape::Map(inner) => validate_shape(path, inner),
    }
}
