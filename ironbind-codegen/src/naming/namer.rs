//! Identifier resolution.
//!
//! [`Namer::resolve`] turns a desired name into a spelling that is legal in
//! the target language and free in the given scope, then registers it.
//! Resolution is deterministic, but it depends on the order in which names
//! are resolved: two schemas differing only in property order may receive
//! different disambiguated spellings.

use crate::error::NamingConfigurationError;
use crate::naming::case::normalize;
use crate::naming::scope::{Identifier, IdentifierKind, Scope};
use crate::rules::{CaseEquality, Casing, Disambiguation, LanguageRules, SuffixConfig};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use thiserror::Error;

/// What a desired spelling collided with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Collided {
    /// An identifier already in scope.
    #[serde(rename_all = "camelCase")]
    Identifier {
        /// Origin of the existing identifier.
        origin: String,
        /// Spelling of the existing identifier.
        spelling: String,
        /// Role of the existing identifier.
        identifier_kind: IdentifierKind,
    },
    /// A reserved word of the language.
    ReservedWord {
        /// The reserved word.
        word: String,
    },
}

impl fmt::Display for Collided {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier {
                origin, spelling, ..
            } => write!(f, "'{origin}' (spelled '{spelling}')"),
            Self::ReservedWord { word } => write!(f, "reserved word '{word}'"),
        }
    }
}

/// Record of a rename performed to avoid a collision.
///
/// Renames change public API names of generated SDKs, so every one of them
/// is reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionResolved {
    /// Label of the scope the collision happened in.
    pub scope: String,
    /// Desired name of the renamed identifier.
    pub original: String,
    /// Normalized spelling before disambiguation.
    pub normalized: String,
    /// What the normalized spelling collided with.
    pub collided_with: Collided,
    /// Final spelling.
    pub spelling: String,
}

impl fmt::Display for CollisionResolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: '{}' collided with {} and was renamed to '{}'",
            self.scope, self.original, self.collided_with, self.spelling
        )
    }
}

/// Result of resolving one desired name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The registered identifier.
    pub identifier: Identifier,
    /// The rename, if one was needed.
    pub collision: Option<CollisionResolved>,
}

/// Failure to resolve a desired name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The desired name has no identifier characters.
    #[error("'{name}' has no identifier characters")]
    Unrepresentable {
        /// The desired name.
        name: String,
    },

    /// The language rules cannot disambiguate.
    #[error(transparent)]
    Configuration(#[from] NamingConfigurationError),
}

/// Resolves desired names against a scope using one language's rules.
#[derive(Debug, Clone, Copy)]
pub struct Namer<'a> {
    rules: &'a LanguageRules,
}

impl<'a> Namer<'a> {
    /// Creates a namer for the given rules.
    #[must_use]
    pub const fn new(rules: &'a LanguageRules) -> Self {
        Self { rules }
    }

    /// Returns the rules in use.
    #[must_use]
    pub const fn rules(&self) -> &'a LanguageRules {
        self.rules
    }

    /// Returns the casing applied to identifiers of a kind.
    #[must_use]
    pub const fn casing(&self, kind: IdentifierKind) -> Casing {
        match kind {
            IdentifierKind::Type => self.rules.type_casing,
            IdentifierKind::Parameter => self.rules.parameter_casing,
            IdentifierKind::Member | IdentifierKind::Structural => self.rules.member_casing,
        }
    }

    /// Resolves `desired` into a collision-free identifier and registers it
    /// in `scope`.
    ///
    /// # Errors
    /// Returns `ResolveError::Unrepresentable` if the name normalizes to
    /// nothing, or `ResolveError::Configuration` if the disambiguation
    /// strategy cannot produce a free spelling.
    pub fn resolve(
        &self,
        desired: &str,
        kind: IdentifierKind,
        scope: &mut Scope,
    ) -> Result<Resolution, ResolveError> {
        let normalized =
            normalize(desired, self.casing(kind)).ok_or_else(|| ResolveError::Unrepresentable {
                name: desired.to_string(),
            })?;

        let Some(collided_with) = self.conflict(&normalized, scope) else {
            let identifier = Identifier {
                origin: desired.to_string(),
                spelling: normalized,
                kind,
                renamed: false,
            };
            scope.register(identifier.clone());
            return Ok(Resolution {
                identifier,
                collision: None,
            });
        };

        let spelling = self.disambiguate(&normalized, scope)?;
        let identifier = Identifier {
            origin: desired.to_string(),
            spelling: spelling.clone(),
            kind,
            renamed: true,
        };
        scope.register(identifier.clone());

        let collision = CollisionResolved {
            scope: scope.label().to_string(),
            original: desired.to_string(),
            normalized,
            collided_with,
            spelling,
        };
        tracing::info!(
            language = %self.rules.language,
            scope = %collision.scope,
            original = %collision.original,
            collided_with = %collision.collided_with,
            spelling = %collision.spelling,
            "identifier renamed to avoid collision"
        );

        Ok(Resolution {
            identifier,
            collision: Some(collision),
        })
    }

    /// Returns what a candidate collides with, if anything.
    fn conflict(&self, candidate: &str, scope: &Scope) -> Option<Collided> {
        if self.rules.is_reserved(candidate) {
            return Some(Collided::ReservedWord {
                word: candidate.to_string(),
            });
        }
        scope.find(candidate).map(|existing| Collided::Identifier {
            origin: existing.origin.clone(),
            spelling: existing.spelling.clone(),
            identifier_kind: existing.kind,
        })
    }

    fn disambiguate(&self, base: &str, scope: &Scope) -> Result<String, NamingConfigurationError> {
        match &self.rules.disambiguation {
            Disambiguation::NumericSuffix(suffix) => self.suffix(base, suffix, scope),
            Disambiguation::FixedRenameTable { renames, fallback } => {
                if let Some(spelling) = self.rename(base, renames, scope)? {
                    return Ok(spelling);
                }
                match fallback {
                    Some(suffix) => self.suffix(base, suffix, scope),
                    None => Err(NamingConfigurationError::missing_rename(
                        self.rules.language.tag(),
                        base,
                    )),
                }
            }
        }
    }

    /// Follows the rename table from `base` until a free spelling is found.
    ///
    /// Table keys match under the scope's case equality, so every spelling
    /// that collides with an entry is renamed the same way.
    ///
    /// Returns `None` when the chain ends without a free spelling.
    fn rename(
        &self,
        base: &str,
        renames: &BTreeMap<String, String>,
        scope: &Scope,
    ) -> Result<Option<String>, NamingConfigurationError> {
        let language = self.rules.language.tag();
        let equality = scope.equality();
        let mut visited = HashSet::from([equality.key(base)]);
        let mut current = base;

        while let Some(next) = rename_target(renames, current, equality) {
            if next.is_empty() {
                return Err(NamingConfigurationError::EmptyRename {
                    language: language.to_string(),
                    name: current.to_string(),
                });
            }
            if !visited.insert(equality.key(next)) {
                return Err(NamingConfigurationError::rename_cycle(language, next));
            }
            if self.conflict(next, scope).is_none() {
                return Ok(Some(next.clone()));
            }
            current = next;
        }
        Ok(None)
    }

    fn suffix(
        &self,
        base: &str,
        suffix: &SuffixConfig,
        scope: &Scope,
    ) -> Result<String, NamingConfigurationError> {
        suffix.validate(self.rules.language, scope.equality())?;

        // Each candidate is distinct under the scope's equality, so at most
        // one per taken spelling can collide.
        let bound = scope.len() + scope.inherited().count() + self.rules.reserved_words.len() + 1;
        let mut n = suffix.start;
        for _ in 0..bound {
            let candidate = suffix.candidate(base, n);
            if self.conflict(&candidate, scope).is_none() {
                return Ok(candidate);
            }
            match n.checked_add(1) {
                Some(next) => n = next,
                None => break,
            }
        }

        Err(NamingConfigurationError::Exhausted {
            language: self.rules.language.tag().to_string(),
            name: base.to_string(),
        })
    }
}

/// Looks up a rename, preferring an exact key over a case-equal one.
fn rename_target<'r>(
    renames: &'r BTreeMap<String, String>,
    spelling: &str,
    equality: CaseEquality,
) -> Option<&'r String> {
    renames.get(spelling).or_else(|| {
        let key = equality.key(spelling);
        renames
            .iter()
            .find(|(from, _)| equality.key(from) == key)
            .map(|(_, to)| to)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{CaseEquality, Language};

    fn pascal_rules(equality: CaseEquality) -> LanguageRules {
        LanguageRules {
            case_equality: equality,
            disambiguation: Disambiguation::NumericSuffix(SuffixConfig::default()),
            structural_member_names: vec!["Get".to_string(), "Empty".to_string()],
            ..LanguageRules::dotnet()
        }
    }

    fn member_scope(rules: &LanguageRules) -> Scope {
        let mut scope = Scope::new("ResourceInput", rules.case_equality);
        for name in &rules.structural_member_names {
            scope.reserve(name);
        }
        scope
    }

    #[test]
    fn test_resolve_without_collision() {
        let rules = pascal_rules(CaseEquality::CaseInsensitive);
        let mut scope = member_scope(&rules);
        let resolution = Namer::new(&rules)
            .resolve("bar", IdentifierKind::Member, &mut scope)
            .expect("resolves");
        assert_eq!(resolution.identifier.spelling, "Bar");
        assert_eq!(resolution.identifier.origin, "bar");
        assert!(!resolution.identifier.renamed);
        assert!(resolution.collision.is_none());
        assert!(scope.contains("Bar"));
    }

    #[test]
    fn test_resolve_case_insensitive_collision() {
        let rules = pascal_rules(CaseEquality::CaseInsensitive);
        let mut scope = member_scope(&rules);
        let namer = Namer::new(&rules);

        let first = namer
            .resolve("id", IdentifierKind::Member, &mut scope)
            .expect("resolves");
        let second = namer
            .resolve("ID", IdentifierKind::Member, &mut scope)
            .expect("resolves");

        assert_eq!(first.identifier.spelling, "Id");
        assert_eq!(second.identifier.spelling, "ID_1");
        assert!(second.identifier.renamed);

        let collision = second.collision.expect("collision recorded");
        assert_eq!(collision.original, "ID");
        assert_eq!(collision.spelling, "ID_1");
        assert_eq!(
            collision.collided_with,
            Collided::Identifier {
                origin: "id".to_string(),
                spelling: "Id".to_string(),
                identifier_kind: IdentifierKind::Member,
            }
        );
    }

    #[test]
    fn test_resolve_case_sensitive_no_collision() {
        let rules = pascal_rules(CaseEquality::CaseSensitive);
        let mut scope = member_scope(&rules);
        let namer = Namer::new(&rules);
        namer.resolve("id", IdentifierKind::Member, &mut scope).expect("resolves");
        let second = namer.resolve("ID", IdentifierKind::Member, &mut scope).expect("resolves");
        assert_eq!(second.identifier.spelling, "ID");
        assert!(second.collision.is_none());
    }

    #[test]
    fn test_resolve_structural_collision() {
        let rules = pascal_rules(CaseEquality::CaseInsensitive);
        let mut scope = member_scope(&rules);
        let resolution = Namer::new(&rules)
            .resolve("get", IdentifierKind::Member, &mut scope)
            .expect("resolves");
        assert_eq!(resolution.identifier.spelling, "Get_1");
        let collision = resolution.collision.expect("collision recorded");
        assert!(matches!(
            collision.collided_with,
            Collided::Identifier {
                identifier_kind: IdentifierKind::Structural,
                ..
            }
        ));
    }

    #[test]
    fn test_resolve_reserved_word() {
        let rules = LanguageRules::python();
        let mut scope = Scope::new("Widget", rules.case_equality);
        let resolution = Namer::new(&rules)
            .resolve("class", IdentifierKind::Member, &mut scope)
            .expect("resolves");
        assert_eq!(resolution.identifier.spelling, "class_1");
        assert_eq!(
            resolution.collision.map(|c| c.collided_with),
            Some(Collided::ReservedWord {
                word: "class".to_string()
            })
        );
    }

    #[test]
    fn test_resolve_suffix_skips_taken_candidates() {
        let rules = LanguageRules::python();
        let mut scope = Scope::new("widget", rules.case_equality);
        let namer = Namer::new(&rules);
        for desired in ["name", "name_1", "NAME"] {
            namer.resolve(desired, IdentifierKind::Member, &mut scope).expect("resolves");
        }
        let spellings: Vec<_> = scope.iter().map(Identifier::as_str).collect();
        assert_eq!(spellings, vec!["name", "name_1", "name_2"]);
    }

    #[test]
    fn test_resolve_rename_table() {
        let rules = LanguageRules::dotnet();
        let mut scope = Scope::new("Widget", rules.case_equality);
        for name in &rules.structural_member_names {
            scope.reserve(name);
        }
        let resolution = Namer::new(&rules)
            .resolve("id", IdentifierKind::Member, &mut scope)
            .expect("resolves");
        assert_eq!(resolution.identifier.spelling, "ResourceId");
    }

    #[test]
    fn test_resolve_rename_table_ignores_case() {
        let rules = LanguageRules::dotnet();
        let mut scope = Scope::new("Widget", rules.case_equality);
        for name in &rules.structural_member_names {
            scope.reserve(name);
        }
        let namer = Namer::new(&rules);
        let upper = namer
            .resolve("ID", IdentifierKind::Member, &mut scope)
            .expect("resolves");
        assert_eq!(upper.identifier.spelling, "ResourceId");
        let urn = namer
            .resolve("URN", IdentifierKind::Member, &mut scope)
            .expect("resolves");
        assert_eq!(urn.identifier.spelling, "ResourceUrn");
    }

    #[test]
    fn test_resolve_rename_table_fallback() {
        let rules = LanguageRules::dotnet();
        let mut scope = Scope::new("Widget", rules.case_equality);
        for name in &rules.structural_member_names {
            scope.reserve(name);
        }
        let namer = Namer::new(&rules);
        let first = namer.resolve("resourceId", IdentifierKind::Member, &mut scope).expect("resolves");
        let second = namer.resolve("id", IdentifierKind::Member, &mut scope).expect("resolves");
        assert_eq!(first.identifier.spelling, "ResourceId");
        assert_eq!(second.identifier.spelling, "Id_1");
    }

    #[test]
    fn test_resolve_missing_rename_is_configuration_error() {
        let rules = LanguageRules {
            disambiguation: Disambiguation::FixedRenameTable {
                renames: BTreeMap::new(),
                fallback: None,
            },
            ..pascal_rules(CaseEquality::CaseInsensitive)
        };
        let mut scope = member_scope(&rules);
        let err = Namer::new(&rules)
            .resolve("empty", IdentifierKind::Member, &mut scope)
            .expect_err("no rename available");
        assert_eq!(
            err,
            ResolveError::Configuration(NamingConfigurationError::missing_rename("dotnet", "Empty"))
        );
    }

    #[test]
    fn test_resolve_rename_cycle() {
        let rules = LanguageRules {
            disambiguation: Disambiguation::FixedRenameTable {
                renames: BTreeMap::from([
                    ("Get".to_string(), "Empty".to_string()),
                    ("Empty".to_string(), "Get".to_string()),
                ]),
                fallback: None,
            },
            ..pascal_rules(CaseEquality::CaseSensitive)
        };
        let mut scope = member_scope(&rules);
        let err = Namer::new(&rules)
            .resolve("get", IdentifierKind::Member, &mut scope)
            .expect_err("cycle");
        assert!(matches!(
            err,
            ResolveError::Configuration(NamingConfigurationError::RenameCycle { .. })
        ));
    }

    #[test]
    fn test_resolve_empty_alphabet_is_configuration_error() {
        let rules = LanguageRules {
            disambiguation: Disambiguation::NumericSuffix(SuffixConfig {
                alphabet: String::new(),
                ..SuffixConfig::default()
            }),
            ..pascal_rules(CaseEquality::CaseInsensitive)
        };
        let mut scope = member_scope(&rules);
        let err = Namer::new(&rules)
            .resolve("get", IdentifierKind::Member, &mut scope)
            .expect_err("no progress possible");
        assert_eq!(
            err,
            ResolveError::Configuration(NamingConfigurationError::EmptyAlphabet {
                language: Language::DotNet.tag().to_string()
            })
        );
    }

    #[test]
    fn test_resolve_unrepresentable() {
        let rules = LanguageRules::nodejs();
        let mut scope = Scope::new("Widget", rules.case_equality);
        let err = Namer::new(&rules)
            .resolve("--", IdentifierKind::Member, &mut scope)
            .expect_err("unrepresentable");
        assert!(matches!(err, ResolveError::Unrepresentable { .. }));
        assert!(scope.is_empty());
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let rules = pascal_rules(CaseEquality::CaseInsensitive);
        let run = || {
            let mut scope = member_scope(&rules);
            let namer = Namer::new(&rules);
            ["id", "ID", "get", "Id_1", "empty"]
                .iter()
                .map(|d| {
                    namer
                        .resolve(d, IdentifierKind::Member, &mut scope)
                        .expect("resolves")
                        .identifier
                        .spelling
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_resolution_depends_on_order() {
        let rules = pascal_rules(CaseEquality::CaseInsensitive);
        let resolve_all = |names: &[&str]| {
            let mut scope = member_scope(&rules);
            let namer = Namer::new(&rules);
            for name in names {
                namer.resolve(name, IdentifierKind::Member, &mut scope).expect("resolves");
            }
            scope.iter().skip(2).map(|i| (i.origin.clone(), i.spelling.clone())).collect::<Vec<_>>()
        };
        let forward = resolve_all(&["id", "ID"]);
        let backward = resolve_all(&["ID", "id"]);
        assert_eq!(forward[1], ("ID".to_string(), "ID_1".to_string()));
        assert_eq!(backward[1], ("id".to_string(), "Id_1".to_string()));
    }
}
