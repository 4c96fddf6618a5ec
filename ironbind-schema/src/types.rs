//! Value shapes of schema properties.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveType {
    /// UTF-8 string.
    String,
    /// Signed integer.
    Integer,
    /// Floating point number.
    Number,
    /// Boolean.
    Boolean,
    /// Untyped value.
    Any,
}

impl PrimitiveType {
    /// Returns the schema name of the primitive.
    #[must_use]
    pub const fn schema_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Any => "any",
        }
    }

    /// Parses a primitive from its schema name.
    #[must_use]
    pub fn from_schema_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "any" => Some(Self::Any),
            _ => None,
        }
    }
}

/// Shape of a property value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueShape {
    /// A primitive value.
    Primitive(PrimitiveType),
    /// A reference to another schema type by token.
    Reference(String),
    /// An ordered list of values.
    Array(Box<ValueShape>),
    /// A string-keyed map of values.
    Map(Box<ValueShape>),
}

impl ValueShape {
    /// Shorthand for a string primitive.
    #[must_use]
    pub const fn string() -> Self {
        Self::Primitive(PrimitiveType::String)
    }

    /// Wraps a shape in an array.
    #[must_use]
    pub fn array_of(element: ValueShape) -> Self {
        Self::Array(Box::new(element))
    }

    /// Wraps a shape in a map.
    #[must_use]
    pub fn map_of(value: ValueShape) -> Self {
        Self::Map(Box::new(value))
    }

    /// Returns true for array and map shapes.
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Map(_))
    }

    /// Returns the innermost non-container shape.
    #[must_use]
    pub fn element(&self) -> &ValueShape {
        match self {
            Self::Array(inner) | Self::Map(inner) => inner.element(),
            other => other,
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.schema_name()),
            Self::Reference(token) => write!(f, "ref({token})"),
            Self::Array(inner) => write!(f, "array<{inner}>"),
            Self::Map(inner) => write!(f, "map<{inner}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_schema_names() {
        for prim in [
            PrimitiveType::String,
            PrimitiveType::Integer,
            PrimitiveType::Number,
            PrimitiveType::Boolean,
            PrimitiveType::Any,
        ] {
            assert_eq!(PrimitiveType::from_schema_name(prim.schema_name()), Some(prim));
        }
        assert_eq!(PrimitiveType::from_schema_name("uint8"), None);
    }

    #[test]
    fn test_shape_display() {
        let shape = ValueShape::map_of(ValueShape::array_of(ValueShape::Reference(
            "example::Tag".to_string(),
        )));
        assert_eq!(shape.to_string(), "map<array<ref(example::Tag)>>");
    }

    #[test]
    fn test_shape_element() {
        let shape = ValueShape::array_of(ValueShape::map_of(ValueShape::string()));
        assert!(shape.is_container());
        assert_eq!(shape.element(), &ValueShape::string());
        assert!(!ValueShape::string().is_container());
    }

    #[test]
    fn test_shape_deserialize() {
        let shape: ValueShape =
            serde_json::from_str(r#"{"array":{"primitive":"integer"}}"#).expect("valid shape");
        assert_eq!(
            shape,
            ValueShape::array_of(ValueShape::Primitive(PrimitiveType::Integer))
        );
    }
}
