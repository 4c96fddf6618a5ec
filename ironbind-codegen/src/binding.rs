//! Language-agnostic resource bindings.
//!
//! A [`ResourceBinding`] is the public contract of one generated resource
//! class: its args container, deferred outputs, the two construction entry
//! points and the options-merge step. Emitters render it verbatim.

use crate::naming::{CollisionResolved, Identifier};
use crate::options::OptionsMergePlan;
use crate::rules::Language;
use ironbind_schema::ValueShape;
use serde::Serialize;

/// A schema property bound to its resolved identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyBinding {
    /// Schema name, used on the wire.
    pub schema_name: String,
    /// Resolved member identifier.
    pub identifier: Identifier,
    /// Value shape.
    pub shape: ValueShape,
    /// Whether a value must be supplied.
    pub required: bool,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertyBinding {
    /// Returns the member spelling.
    #[must_use]
    pub fn spelling(&self) -> &str {
        &self.identifier.spelling
    }
}

/// Default of an args field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldDefault {
    /// No default; the caller must supply a value.
    Required,
    /// Defaults to absent. Emitters choose the language's spelling of it.
    Absent,
}

/// One field of an args container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgsField {
    /// The bound property.
    pub property: PropertyBinding,
    /// Default value.
    pub default: FieldDefault,
}

impl ArgsField {
    /// Returns true if the field must be supplied.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default == FieldDefault::Required
    }
}

/// The args container type: one field per settable property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgsContainer {
    /// Args type name.
    pub type_name: Identifier,
    /// Empty-args factory, if the language has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factory: Option<Identifier>,
    /// Fields in declaration order.
    pub fields: Vec<ArgsField>,
}

impl ArgsContainer {
    /// Returns true if the container has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Looks up a field by member spelling.
    #[must_use]
    pub fn field(&self, spelling: &str) -> Option<&ArgsField> {
        self.fields.iter().find(|f| f.property.spelling() == spelling)
    }

    /// Iterates over required fields.
    pub fn required_fields(&self) -> impl Iterator<Item = &ArgsField> {
        self.fields.iter().filter(|f| f.is_required())
    }
}

/// An output property accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputAccessor {
    /// The bound property.
    pub property: PropertyBinding,
    /// Whether reading the value may suspend until the provider responds.
    pub deferred: bool,
}

/// Kind of construction entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    /// Register a new resource.
    Create,
    /// Adopt an existing resource by provider ID.
    LookupExisting,
}

/// Role of an entry-point parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterRole {
    /// Unique logical name.
    Name,
    /// Args container.
    Args,
    /// Provider ID.
    Id,
    /// Options bag.
    Options,
}

/// A parameter of an entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Resolved parameter name.
    pub identifier: Identifier,
    /// Role of the parameter.
    pub role: ParameterRole,
    /// Whether the caller may omit it.
    pub optional: bool,
}

/// A construction entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    /// Kind of entry point.
    pub kind: EntryKind,
    /// Entry point name (the class name for constructors).
    pub identifier: Identifier,
    /// Parameters in order.
    pub parameters: Vec<Parameter>,
}

impl EntryPoint {
    /// Looks up a parameter by role.
    #[must_use]
    pub fn parameter(&self, role: ParameterRole) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.role == role)
    }

    /// Renders the parameter list, marking optional parameters with `?`.
    #[must_use]
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| {
                if p.optional {
                    format!("{}?", p.identifier.spelling)
                } else {
                    p.identifier.spelling.clone()
                }
            })
            .collect();
        format!("({})", params.join(", "))
    }
}

/// The emission unit for one (resource type, language) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBinding {
    /// Target language.
    pub language: Language,
    /// Package name.
    pub package: String,
    /// Type token.
    pub token: String,
    /// Resource class name.
    pub class_name: Identifier,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Args container.
    pub args: ArgsContainer,
    /// Output accessors, one per property, in declaration order.
    pub outputs: Vec<OutputAccessor>,
    /// Create entry point.
    pub create: EntryPoint,
    /// Lookup-existing entry point.
    pub lookup: EntryPoint,
    /// Options-merge step.
    pub options: OptionsMergePlan,
    /// Renames performed while naming this binding.
    pub collisions: Vec<CollisionResolved>,
}

impl ResourceBinding {
    /// Returns the class name spelling.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name.spelling
    }

    /// Returns the stamped version.
    #[must_use]
    pub fn version(&self) -> &str {
        self.options.version().unwrap_or_default()
    }

    /// Looks up an output accessor by member spelling.
    #[must_use]
    pub fn output(&self, spelling: &str) -> Option<&OutputAccessor> {
        self.outputs.iter().find(|o| o.property.spelling() == spelling)
    }

    /// Looks up an output accessor by schema name.
    #[must_use]
    pub fn output_for_schema_name(&self, schema_name: &str) -> Option<&OutputAccessor> {
        self.outputs
            .iter()
            .find(|o| o.property.schema_name == schema_name)
    }

    /// Serializes the binding to canonical JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::IdentifierKind;

    fn param(name: &str, role: ParameterRole, optional: bool) -> Parameter {
        Parameter {
            identifier: Identifier::verbatim(name, IdentifierKind::Parameter),
            role,
            optional,
        }
    }

    #[test]
    fn test_entry_point_signature() {
        let entry = EntryPoint {
            kind: EntryKind::Create,
            identifier: Identifier::verbatim("ResourceInput", IdentifierKind::Structural),
            parameters: vec![
                param("name", ParameterRole::Name, false),
                param("args", ParameterRole::Args, true),
                param("options", ParameterRole::Options, true),
            ],
        };
        assert_eq!(entry.signature(), "(name, args?, options?)");
        assert!(entry.parameter(ParameterRole::Id).is_none());
        assert!(entry.parameter(ParameterRole::Args).is_some_and(|p| p.optional));
    }

    #[test]
    fn test_args_container_lookup() {
        let property = PropertyBinding {
            schema_name: "size".to_string(),
            identifier: Identifier::verbatim("Size", IdentifierKind::Member),
            shape: ValueShape::string(),
            required: true,
            description: None,
        };
        let args = ArgsContainer {
            type_name: Identifier::verbatim("WidgetArgs", IdentifierKind::Type),
            factory: None,
            fields: vec![ArgsField {
                property,
                default: FieldDefault::Required,
            }],
        };
        assert_eq!(args.len(), 1);
        assert!(args.field("Size").is_some_and(ArgsField::is_required));
        assert_eq!(args.required_fields().count(), 1);
        assert!(args.field("size").is_none());
    }
}
