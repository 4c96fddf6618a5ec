//! Package, resource type and property definitions.
//!
//! These structures are the read-only input of a generator run. They are
//! built once, either programmatically or by deserializing an already parsed
//! schema document.

use crate::types::ValueShape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A package of resource types sharing one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    /// Package name (first segment of every token).
    pub name: String,
    /// Package version, stamped into generated default options.
    pub version: String,
    /// Resource types in declaration order.
    #[serde(default)]
    pub resources: Vec<ResourceType>,
}

impl Package {
    /// Creates an empty package.
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            resources: Vec::new(),
        }
    }

    /// Adds a resource type.
    pub fn add_resource(&mut self, resource: ResourceType) {
        self.resources.push(resource);
    }

    /// Builder-style variant of [`Package::add_resource`].
    #[must_use]
    pub fn with_resource(mut self, resource: ResourceType) -> Self {
        self.add_resource(resource);
        self
    }

    /// Looks up a resource type by token.
    #[must_use]
    pub fn get_resource(&self, token: &str) -> Option<&ResourceType> {
        self.resources.iter().find(|r| r.token == token)
    }
}

/// A resource type declared by the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceType {
    /// Type token, `<package>:<module>:<Type>`.
    pub token: String,
    /// Properties in declaration order.
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
    /// Version overriding the package version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Desired class name per language tag.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub language_names: BTreeMap<String, String>,
}

impl ResourceType {
    /// Creates a resource type with no properties.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            properties: Vec::new(),
            version: None,
            description: None,
            language_names: BTreeMap::new(),
        }
    }

    /// Adds a property.
    pub fn add_property(&mut self, property: PropertyDef) {
        self.properties.push(property);
    }

    /// Builder-style variant of [`ResourceType::add_property`].
    #[must_use]
    pub fn with_property(mut self, property: PropertyDef) -> Self {
        self.add_property(property);
        self
    }

    /// Sets the version override.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the desired class name for one language.
    #[must_use]
    pub fn with_language_name(mut self, language: impl Into<String>, name: impl Into<String>) -> Self {
        self.language_names.insert(language.into(), name.into());
        self
    }

    /// Splits the token into `(package, module, type)`.
    ///
    /// Returns `None` unless the token has exactly three `:`-separated
    /// segments with a non-empty package and type. The module may be empty.
    #[must_use]
    pub fn token_parts(&self) -> Option<(&str, &str, &str)> {
        let mut parts = self.token.split(':');
        let package = parts.next()?;
        let module = parts.next()?;
        let name = parts.next()?;
        if parts.next().is_some() || package.is_empty() || name.is_empty() {
            return None;
        }
        Some((package, module, name))
    }

    /// Returns the type name (last token segment).
    #[must_use]
    pub fn name(&self) -> &str {
        self.token.rsplit(':').next().unwrap_or(&self.token)
    }

    /// Returns the desired class name for a language, falling back to the
    /// type name.
    #[must_use]
    pub fn desired_name(&self, language: &str) -> &str {
        self.language_names
            .get(language)
            .map_or_else(|| self.name(), String::as_str)
    }

    /// Iterates over properties settable at construction.
    pub fn input_properties(&self) -> impl Iterator<Item = &PropertyDef> {
        self.properties.iter().filter(|p| !p.output_only)
    }

    /// Returns true if the resource declares no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// A property of a resource type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    /// Schema name, also the wire name used for serialization.
    pub name: String,
    /// Value shape.
    pub shape: ValueShape,
    /// Whether a value must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Whether the property is only readable after the provider responds.
    #[serde(default)]
    pub output_only: bool,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Desired member name per language tag.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub language_names: BTreeMap<String, String>,
}

impl PropertyDef {
    /// Creates an optional, settable property.
    #[must_use]
    pub fn new(name: impl Into<String>, shape: ValueShape) -> Self {
        Self {
            name: name.into(),
            shape,
            required: false,
            output_only: false,
            description: None,
            language_names: BTreeMap::new(),
        }
    }

    /// Marks the property as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the property as output-only.
    #[must_use]
    pub fn output_only(mut self) -> Self {
        self.output_only = true;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the desired member name for one language.
    #[must_use]
    pub fn with_language_name(mut self, language: impl Into<String>, name: impl Into<String>) -> Self {
        self.language_names.insert(language.into(), name.into());
        self
    }

    /// Returns the desired member name for a language, falling back to the
    /// schema name.
    #[must_use]
    pub fn desired_name(&self, language: &str) -> &str {
        self.language_names
            .get(language)
            .map_or(self.name.as_str(), String::as_str)
    }
}
