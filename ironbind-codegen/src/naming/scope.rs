//! Naming scopes.
//!
//! A scope is the set of identifiers that must not collide with one another.
//! Scopes are created per resource type and language and passed explicitly;
//! nothing is registered globally.

use crate::rules::CaseEquality;
use serde::Serialize;
use std::collections::HashMap;

/// Role of an identifier in the generated binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentifierKind {
    /// Always-present infrastructure member (constructor, lookup, factory).
    Structural,
    /// Generated type name.
    Type,
    /// Schema-declared property.
    Member,
    /// Entry-point parameter.
    Parameter,
}

/// A resolved identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    /// Name the identifier was requested under.
    pub origin: String,
    /// Target-language spelling.
    pub spelling: String,
    /// Role of the identifier.
    pub kind: IdentifierKind,
    /// Whether disambiguation changed the normalized spelling.
    pub renamed: bool,
}

impl Identifier {
    /// Creates an identifier spelled exactly as its origin.
    #[must_use]
    pub fn verbatim(origin: impl Into<String>, kind: IdentifierKind) -> Self {
        let origin = origin.into();
        Self {
            spelling: origin.clone(),
            origin,
            kind,
            renamed: false,
        }
    }

    /// Returns the spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.spelling
    }
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Inherited(usize),
    Own(usize),
}

/// An ordered set of identifiers that are pairwise distinct under a
/// case-equality mode.
#[derive(Debug, Clone)]
pub struct Scope {
    label: String,
    equality: CaseEquality,
    inherited: Vec<Identifier>,
    entries: Vec<Identifier>,
    slots: HashMap<String, Slot>,
}

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub fn new(label: impl Into<String>, equality: CaseEquality) -> Self {
        Self {
            label: label.into(),
            equality,
            inherited: Vec::new(),
            entries: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Creates a nested scope that sees every identifier of this scope (and
    /// its ancestors) as taken.
    #[must_use]
    pub fn child(&self, label: impl Into<String>) -> Self {
        let mut child = Self::new(label, self.equality);
        for identifier in self.inherited.iter().chain(&self.entries) {
            let key = self.equality.key(&identifier.spelling);
            child
                .slots
                .insert(key, Slot::Inherited(child.inherited.len()));
            child.inherited.push(identifier.clone());
        }
        child
    }

    /// Returns the scope label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the equality mode.
    #[must_use]
    pub const fn equality(&self) -> CaseEquality {
        self.equality
    }

    /// Returns the identifier a spelling would collide with, if any.
    #[must_use]
    pub fn find(&self, spelling: &str) -> Option<&Identifier> {
        match self.slots.get(&self.equality.key(spelling))? {
            Slot::Inherited(i) => self.inherited.get(*i),
            Slot::Own(i) => self.entries.get(*i),
        }
    }

    /// Returns true if a spelling is taken in this scope or an ancestor.
    #[must_use]
    pub fn contains(&self, spelling: &str) -> bool {
        self.find(spelling).is_some()
    }

    /// Registers an identifier.
    ///
    /// Returns `false`, leaving the scope unchanged, if its spelling is
    /// already taken.
    pub fn register(&mut self, identifier: Identifier) -> bool {
        let key = self.equality.key(&identifier.spelling);
        if self.slots.contains_key(&key) {
            return false;
        }
        self.slots.insert(key, Slot::Own(self.entries.len()));
        self.entries.push(identifier);
        true
    }

    /// Pre-registers a structural member spelled verbatim.
    ///
    /// Returns `false` if the spelling was already taken.
    pub fn reserve(&mut self, name: &str) -> bool {
        self.register(Identifier::verbatim(name, IdentifierKind::Structural))
    }

    /// Iterates over identifiers registered directly in this scope, in
    /// registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.iter()
    }

    /// Iterates over identifiers inherited from enclosing scopes.
    pub fn inherited(&self) -> impl Iterator<Item = &Identifier> {
        self.inherited.iter()
    }

    /// Returns the number of identifiers registered directly in this scope.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered directly in this scope.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_find() {
        let mut scope = Scope::new("ResourceInput", CaseEquality::CaseSensitive);
        assert!(scope.register(Identifier::verbatim("Bar", IdentifierKind::Member)));
        assert!(scope.contains("Bar"));
        assert!(!scope.contains("bar"));
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn test_case_insensitive_collision() {
        let mut scope = Scope::new("ResourceInput", CaseEquality::CaseInsensitive);
        assert!(scope.reserve("Get"));
        assert!(scope.contains("GET"));
        assert!(!scope.reserve("get"));
        assert_eq!(scope.find("get").map(Identifier::as_str), Some("Get"));
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn test_child_sees_parent() {
        let mut parent = Scope::new("types", CaseEquality::CaseInsensitive);
        parent.register(Identifier::verbatim("ResourceInput", IdentifierKind::Type));

        let mut child = parent.child("ResourceInput members");
        assert!(child.contains("resourceinput"));
        assert!(child.is_empty());
        assert!(!child.register(Identifier::verbatim("RESOURCEINPUT", IdentifierKind::Member)));
        assert!(child.register(Identifier::verbatim("Bar", IdentifierKind::Member)));

        assert_eq!(child.inherited().count(), 1);
        assert!(!parent.contains("Bar"));
    }

    #[test]
    fn test_grandchild_sees_all_ancestors() {
        let mut root = Scope::new("root", CaseEquality::CaseSensitive);
        root.reserve("a");
        let mut mid = root.child("mid");
        mid.reserve("b");
        let leaf = mid.child("leaf");
        assert!(leaf.contains("a"));
        assert!(leaf.contains("b"));
        assert_eq!(leaf.inherited().count(), 2);
    }

    #[test]
    fn test_iteration_order() {
        let mut scope = Scope::new("s", CaseEquality::CaseSensitive);
        scope.reserve("Get");
        scope.reserve("Empty");
        scope.register(Identifier::verbatim("Bar", IdentifierKind::Member));
        let spellings: Vec<_> = scope.iter().map(Identifier::as_str).collect();
        assert_eq!(spellings, vec!["Get", "Empty", "Bar"]);
    }
}
