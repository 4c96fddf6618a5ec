//! Per-language naming rules.
//!
//! Rules are plain data keyed by language tag. Emitters and the namer look
//! them up; nothing dispatches over a language hierarchy.

use crate::error::NamingConfigurationError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;

/// Target language of a generated binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    /// C# for .NET.
    #[serde(rename = "dotnet")]
    DotNet,
    /// TypeScript for Node.js.
    #[serde(rename = "nodejs")]
    NodeJs,
    /// Python 3.
    #[serde(rename = "python")]
    Python,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Language; 3] = [Self::DotNet, Self::NodeJs, Self::Python];

    /// Returns the language tag used in schemas and rule sets.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::DotNet => "dotnet",
            Self::NodeJs => "nodejs",
            Self::Python => "python",
        }
    }

    /// Parses a language tag.
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "dotnet" | "csharp" | "c#" => Some(Self::DotNet),
            "nodejs" | "typescript" | "ts" => Some(Self::NodeJs),
            "python" | "py" => Some(Self::Python),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// How two spellings are compared for collisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseEquality {
    /// `Foo` and `foo` are distinct.
    #[default]
    CaseSensitive,
    /// `Foo` and `foo` collide.
    CaseInsensitive,
}

impl CaseEquality {
    /// Returns the key under which a spelling is compared.
    #[must_use]
    pub fn key(&self, spelling: &str) -> String {
        match self {
            Self::CaseSensitive => spelling.to_string(),
            Self::CaseInsensitive => spelling.to_lowercase(),
        }
    }

    /// Compares two spellings.
    #[must_use]
    pub fn same(&self, a: &str, b: &str) -> bool {
        match self {
            Self::CaseSensitive => a == b,
            Self::CaseInsensitive => a.to_lowercase() == b.to_lowercase(),
        }
    }
}

/// Identifier casing convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Casing {
    /// `PascalCase`.
    Pascal,
    /// `camelCase`.
    Camel,
    /// `snake_case`.
    Snake,
}

/// Numeric suffix disambiguation: `base + separator + render(n)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuffixConfig {
    /// Text placed between the base and the counter.
    pub separator: String,
    /// Symbols used to render the counter, least significant first in value.
    pub alphabet: String,
    /// First counter value tried.
    pub start: u64,
}

impl Default for SuffixConfig {
    fn default() -> Self {
        Self {
            separator: "_".to_string(),
            alphabet: "0123456789".to_string(),
            start: 1,
        }
    }
}

impl SuffixConfig {
    /// Largest first counter accepted for a one-symbol alphabet, whose
    /// rendering grows linearly with the counter.
    pub const MAX_UNARY_START: u64 = 1024;

    /// Renders the counter in the alphabet.
    ///
    /// A one-symbol alphabet renders in unary. Rendering is injective for a
    /// valid alphabet, so successive counters always yield new candidates.
    #[must_use]
    pub fn render(&self, mut n: u64) -> String {
        let symbols: Vec<char> = self.alphabet.chars().collect();
        match symbols.len() {
            0 => String::new(),
            1 => std::iter::repeat_n(symbols[0], n as usize).collect(),
            len => {
                let base = len as u64;
                let mut digits = Vec::new();
                loop {
                    digits.push(symbols[(n % base) as usize]);
                    n /= base;
                    if n == 0 {
                        break;
                    }
                }
                digits.iter().rev().collect()
            }
        }
    }

    /// Returns the candidate for counter `n`.
    #[must_use]
    pub fn candidate(&self, base: &str, n: u64) -> String {
        format!("{base}{}{}", self.separator, self.render(n))
    }

    /// Checks that every counter renders to a distinct spelling under the
    /// given equality.
    ///
    /// # Errors
    /// Returns `NamingConfigurationError` for an empty alphabet, one whose
    /// symbols are not distinct under `equality`, or a unary alphabet whose
    /// start exceeds [`Self::MAX_UNARY_START`].
    pub fn validate(
        &self,
        language: Language,
        equality: CaseEquality,
    ) -> Result<(), NamingConfigurationError> {
        let mut symbols = self.alphabet.chars();
        match (symbols.next(), symbols.next()) {
            (None, _) => {
                return Err(NamingConfigurationError::EmptyAlphabet {
                    language: language.tag().to_string(),
                });
            }
            (Some(_), None) if self.start > Self::MAX_UNARY_START => {
                return Err(NamingConfigurationError::UnaryStartTooLarge {
                    language: language.tag().to_string(),
                    start: self.start,
                    max: Self::MAX_UNARY_START,
                });
            }
            _ => {}
        }
        let mut seen = HashSet::new();
        for symbol in self.alphabet.chars() {
            if !seen.insert(equality.key(&symbol.to_string())) {
                return Err(NamingConfigurationError::DuplicateAlphabetSymbol {
                    language: language.tag().to_string(),
                    symbol,
                });
            }
        }
        Ok(())
    }
}

/// Strategy producing an alternate spelling for a colliding identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "camelCase")]
pub enum Disambiguation {
    /// Append an increasing counter.
    NumericSuffix(SuffixConfig),
    /// Rename known conflicts from a table, optionally falling back to a
    /// counter for anything the table does not cover.
    #[serde(rename_all = "camelCase")]
    FixedRenameTable {
        /// Colliding spelling to replacement spelling.
        renames: BTreeMap<String, String>,
        /// Counter used when the table has no entry.
        #[serde(default)]
        fallback: Option<SuffixConfig>,
    },
}

impl Default for Disambiguation {
    fn default() -> Self {
        Self::NumericSuffix(SuffixConfig::default())
    }
}

/// Parameter names of the construction entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterNames {
    /// Unique logical resource name.
    pub name: String,
    /// Args container.
    pub args: String,
    /// Options bag.
    pub options: String,
    /// External provider ID.
    pub id: String,
}

impl Default for ParameterNames {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            args: "args".to_string(),
            options: "options".to_string(),
            id: "id".to_string(),
        }
    }
}

/// Naming rules of one target language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageRules {
    /// Language the rules apply to.
    pub language: Language,
    /// Keywords and other spellings that can never be used (compared exactly).
    #[serde(default)]
    pub reserved_words: BTreeSet<String>,
    /// Equality used for scope membership.
    #[serde(default)]
    pub case_equality: CaseEquality,
    /// Collision disambiguation.
    #[serde(default)]
    pub disambiguation: Disambiguation,
    /// Members every resource class carries, pre-registered in order.
    #[serde(default)]
    pub structural_member_names: Vec<String>,
    /// Casing of type names.
    pub type_casing: Casing,
    /// Casing of member names.
    pub member_casing: Casing,
    /// Casing of parameter names.
    pub parameter_casing: Casing,
    /// Name of the static lookup-existing entry point.
    pub lookup_method: String,
    /// Name of the empty-args factory, if the language has one.
    #[serde(default)]
    pub args_factory: Option<String>,
    /// Suffix of the args container type.
    pub args_suffix: String,
    /// Desired entry-point parameter names.
    #[serde(default)]
    pub parameter_names: ParameterNames,
}

impl LanguageRules {
    /// Rules for C#.
    ///
    /// Members compare case-insensitively so generated classes stay usable
    /// from case-insensitive .NET languages.
    #[must_use]
    pub fn dotnet() -> Self {
        Self {
            language: Language::DotNet,
            reserved_words: words(DOTNET_KEYWORDS),
            case_equality: CaseEquality::CaseInsensitive,
            disambiguation: Disambiguation::FixedRenameTable {
                renames: BTreeMap::from([
                    ("Id".to_string(), "ResourceId".to_string()),
                    ("Urn".to_string(), "ResourceUrn".to_string()),
                ]),
                fallback: Some(SuffixConfig::default()),
            },
            structural_member_names: strings(&[
                "Id",
                "Urn",
                "Get",
                "Empty",
                "MakeResourceOptions",
                "GetResourceName",
                "GetResourceType",
            ]),
            type_casing: Casing::Pascal,
            member_casing: Casing::Pascal,
            parameter_casing: Casing::Camel,
            lookup_method: "Get".to_string(),
            args_factory: Some("Empty".to_string()),
            args_suffix: "Args".to_string(),
            parameter_names: ParameterNames::default(),
        }
    }

    /// Rules for TypeScript.
    #[must_use]
    pub fn nodejs() -> Self {
        Self {
            language: Language::NodeJs,
            reserved_words: words(NODEJS_KEYWORDS),
            case_equality: CaseEquality::CaseSensitive,
            disambiguation: Disambiguation::NumericSuffix(SuffixConfig::default()),
            structural_member_names: strings(&[
                "constructor",
                "get",
                "isInstance",
                "id",
                "urn",
                "makeResourceOptions",
                "__pulumiType",
            ]),
            type_casing: Casing::Pascal,
            member_casing: Casing::Camel,
            parameter_casing: Casing::Camel,
            lookup_method: "get".to_string(),
            args_factory: None,
            args_suffix: "Args".to_string(),
            parameter_names: ParameterNames {
                options: "opts".to_string(),
                ..ParameterNames::default()
            },
        }
    }

    /// Rules for Python.
    #[must_use]
    pub fn python() -> Self {
        Self {
            language: Language::Python,
            reserved_words: words(PYTHON_KEYWORDS),
            case_equality: CaseEquality::CaseSensitive,
            disambiguation: Disambiguation::NumericSuffix(SuffixConfig::default()),
            structural_member_names: strings(&[
                "get",
                "id",
                "urn",
                "_make_resource_options",
                "_internal_init",
            ]),
            type_casing: Casing::Pascal,
            member_casing: Casing::Snake,
            parameter_casing: Casing::Snake,
            lookup_method: "get".to_string(),
            args_factory: None,
            args_suffix: "Args".to_string(),
            parameter_names: ParameterNames {
                name: "resource_name".to_string(),
                options: "opts".to_string(),
                ..ParameterNames::default()
            },
        }
    }

    /// Returns the preset rules for a language.
    #[must_use]
    pub fn preset(language: Language) -> Self {
        match language {
            Language::DotNet => Self::dotnet(),
            Language::NodeJs => Self::nodejs(),
            Language::Python => Self::python(),
        }
    }

    /// Checks that the disambiguation strategy can always make progress.
    ///
    /// # Errors
    /// Returns `NamingConfigurationError` for an empty or repeating suffix
    /// alphabet or an empty rename target.
    pub fn validate(&self) -> Result<(), NamingConfigurationError> {
        match &self.disambiguation {
            Disambiguation::NumericSuffix(suffix) => {
                suffix.validate(self.language, self.case_equality)
            }
            Disambiguation::FixedRenameTable { renames, fallback } => {
                for (from, to) in renames {
                    if to.is_empty() {
                        return Err(NamingConfigurationError::EmptyRename {
                            language: self.language.tag().to_string(),
                            name: from.clone(),
                        });
                    }
                }
                match fallback {
                    Some(suffix) => suffix.validate(self.language, self.case_equality),
                    None => Ok(()),
                }
            }
        }
    }

    /// Returns true if the spelling is a reserved word.
    #[must_use]
    pub fn is_reserved(&self, spelling: &str) -> bool {
        self.reserved_words.contains(spelling)
    }
}

/// Rules for every target language of a run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: BTreeMap<Language, LanguageRules>,
}

impl RuleSet {
    /// Creates an empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rule set with the preset rules of every supported language.
    #[must_use]
    pub fn defaults() -> Self {
        Language::ALL
            .into_iter()
            .fold(Self::new(), |set, language| {
                set.with(LanguageRules::preset(language))
            })
    }

    /// Adds or replaces the rules of one language.
    pub fn insert(&mut self, rules: LanguageRules) {
        self.rules.insert(rules.language, rules);
    }

    /// Builder-style variant of [`RuleSet::insert`].
    #[must_use]
    pub fn with(mut self, rules: LanguageRules) -> Self {
        self.insert(rules);
        self
    }

    /// Looks up the rules of a language.
    ///
    /// # Errors
    /// Returns `NamingConfigurationError::UnknownLanguage` if none are
    /// configured.
    pub fn get(&self, language: Language) -> Result<&LanguageRules, NamingConfigurationError> {
        self.rules
            .get(&language)
            .ok_or_else(|| NamingConfigurationError::UnknownLanguage {
                language: language.tag().to_string(),
            })
    }

    /// Iterates over the configured languages in a stable order.
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.rules.keys().copied()
    }

    /// Iterates over all rules.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageRules> {
        self.rules.values()
    }

    /// Returns the number of configured languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no language is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Validates every language's rules.
    ///
    /// # Errors
    /// Returns the first `NamingConfigurationError` found.
    pub fn validate(&self) -> Result<(), NamingConfigurationError> {
        for (language, rules) in &self.rules {
            if *language != rules.language {
                return Err(NamingConfigurationError::Document {
                    message: format!(
                        "rules keyed as '{language}' declare language '{}'",
                        rules.language
                    ),
                });
            }
            rules.validate()?;
        }
        Ok(())
    }

    /// Loads and validates a rule set from JSON keyed by language tag.
    ///
    /// # Errors
    /// Returns `NamingConfigurationError` if the document is malformed or
    /// any rules fail validation.
    pub fn from_json(json: &str) -> Result<Self, NamingConfigurationError> {
        let set: Self = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    /// Serializes the rule set to pretty-printed JSON.
    ///
    /// # Errors
    /// Returns `NamingConfigurationError::Document` if serialization fails.
    pub fn to_json(&self) -> Result<String, NamingConfigurationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn words(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}

fn strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}

const DOTNET_KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

const NODEJS_KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "implements", "import", "in", "instanceof", "interface", "let", "new", "null", "package",
    "private", "protected", "public", "return", "static", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "self", "try", "while", "with", "yield",
];
