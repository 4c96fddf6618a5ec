//! Error types for schema validation.

use crate::path::SchemaPath;
use thiserror::Error;

/// A malformed or ambiguous resource type.
///
/// Schema errors are local to one resource type: generation of its siblings
/// continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema error at {path}: {kind}")]
pub struct SchemaError {
    /// Location of the offending element.
    pub path: SchemaPath,
    /// What is wrong with it.
    pub kind: SchemaErrorKind,
}

/// Kinds of schema errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaErrorKind {
    /// A name is empty.
    #[error("name must not be empty")]
    EmptyName,

    /// The type token does not have the `<package>:<module>:<Type>` form.
    #[error("malformed type token '{token}', expected '<package>:<module>:<Type>'")]
    MalformedToken {
        /// The offending token.
        token: String,
    },

    /// The token's package does not match the enclosing package.
    #[error("token package '{found}' does not match package '{expected}'")]
    PackageMismatch {
        /// Package name of the enclosing package.
        expected: String,
        /// Package segment found in the token.
        found: String,
    },

    /// Two properties share a schema name.
    #[error("duplicate property '{name}'")]
    DuplicateProperty {
        /// The duplicated schema name.
        name: String,
    },

    /// Two resource types share a token.
    #[error("duplicate resource type '{token}'")]
    DuplicateResource {
        /// The duplicated token.
        token: String,
    },

    /// No resource type with the token is declared.
    #[error("resource type '{token}' is not declared")]
    UnknownResource {
        /// The requested token.
        token: String,
    },

    /// A name contains no character usable in an identifier.
    #[error("name '{name}' has no representable identifier characters")]
    UnrepresentableName {
        /// The offending name.
        name: String,
    },

    /// A reference shape points to an empty token.
    #[error("reference type token must not be empty")]
    EmptyReference,

    /// Two resource types would be written to the same output file.
    #[error("output path '{path}' is already produced by '{existing}'")]
    PathConflict {
        /// The conflicting output path.
        path: String,
        /// Token of the resource that claimed the path first.
        existing: String,
    },
}

impl SchemaError {
    /// Creates a schema error at the given path.
    pub fn new(path: SchemaPath, kind: SchemaErrorKind) -> Self {
        Self { path, kind }
    }

    /// Creates an empty-name error.
    pub fn empty_name(path: SchemaPath) -> Self {
        Self::new(path, SchemaErrorKind::EmptyName)
    }

    /// Creates an unrepresentable-name error.
    pub fn unrepresentable(path: SchemaPath, name: impl Into<String>) -> Self {
        Self::new(
            path,
            SchemaErrorKind::UnrepresentableName { name: name.into() },
        )
    }

    /// Creates a path-conflict error.
    pub fn path_conflict(
        path: SchemaPath,
        output: impl Into<String>,
        existing: impl Into<String>,
    ) -> Self {
        Self::new(
            path,
            SchemaErrorKind::PathConflict {
                path: output.into(),
                existing: existing.into(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_path() {
        let err = SchemaError::new(
            SchemaPath::resource("example::Widget").property("size"),
            SchemaErrorKind::DuplicateProperty {
                name: "size".to_string(),
            },
        );
        let message = err.to_string();
        assert!(message.contains(r#"resources["example::Widget"].properties["size"]"#));
        assert!(message.contains("duplicate property 'size'"));
    }
}
