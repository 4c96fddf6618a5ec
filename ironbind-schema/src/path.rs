//! Schema paths used to locate offending schema elements in errors.

use std::fmt;

/// Location of an element within a package schema.
///
/// Renders like `resources["example::ResourceInput"].properties["bar"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SchemaPath {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Segment {
    Key { collection: &'static str, key: String },
    Field(&'static str),
}

impl SchemaPath {
    /// Creates an empty (root) path.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Path of a resource type by token.
    #[must_use]
    pub fn resource(token: &str) -> Self {
        Self::root().key("resources", token)
    }

    /// Returns a new path with a keyed collection entry appended.
    #[must_use]
    pub fn key(&self, collection: &'static str, key: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.segments.push(Segment::Key {
            collection,
            key: key.into(),
        });
        path
    }

    /// Returns a new path with a property entry appended.
    #[must_use]
    pub fn property(&self, name: impl Into<String>) -> Self {
        self.key("properties", name)
    }

    /// Returns a new path with a plain field appended.
    #[must_use]
    pub fn field(&self, name: &'static str) -> Self {
        let mut path = self.clone();
        path.segments.push(Segment::Field(name));
        path
    }

    /// Returns true if this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            match segment {
                Segment::Key { collection, key } => write!(f, "{collection}[{key:?}]")?,
                Segment::Field(name) => f.write_str(name)?,
            }
        }
        Ok(())
    }
}
