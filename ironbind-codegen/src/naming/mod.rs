//! Identifier naming: casing, scopes and collision resolution.

pub mod case;
pub mod namer;
pub mod scope;

pub use case::{normalize, split_words, to_camel_case, to_pascal_case, to_snake_case};
pub use namer::{Collided, CollisionResolved, Namer, Resolution, ResolveError};
pub use scope::{Identifier, IdentifierKind, Scope};
