//! Error types for binding construction and code generation.

use ironbind_schema::SchemaError;
use thiserror::Error;

/// A per-language rule set that cannot guarantee collision-free names.
///
/// This is a generator configuration bug, never a property of a single
/// resource, so it aborts the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingConfigurationError {
    /// The suffix alphabet has no symbols.
    #[error("language '{language}': disambiguation suffix alphabet is empty")]
    EmptyAlphabet {
        /// Language tag.
        language: String,
    },

    /// The suffix alphabet repeats a symbol.
    #[error("language '{language}': disambiguation suffix alphabet repeats '{symbol}'")]
    DuplicateAlphabetSymbol {
        /// Language tag.
        language: String,
        /// The repeated symbol.
        symbol: char,
    },

    /// A collision has no rename entry and no fallback strategy.
    #[error("language '{language}': no rename configured for colliding identifier '{name}'")]
    MissingRename {
        /// Language tag.
        language: String,
        /// The colliding spelling.
        name: String,
    },

    /// Following the rename table leads back to an already tried spelling.
    #[error("language '{language}': rename table cycles through '{name}'")]
    RenameCycle {
        /// Language tag.
        language: String,
        /// The spelling seen twice.
        name: String,
    },

    /// The rename table maps a name to an empty spelling.
    #[error("language '{language}': rename of '{name}' is empty")]
    EmptyRename {
        /// Language tag.
        language: String,
        /// The renamed spelling.
        name: String,
    },

    /// A one-symbol alphabet starts counting too high to render.
    #[error("language '{language}': unary suffix start {start} exceeds {max}")]
    UnaryStartTooLarge {
        /// Language tag.
        language: String,
        /// Configured first counter value.
        start: u64,
        /// Largest accepted start.
        max: u64,
    },

    /// Disambiguation ran out of candidates.
    #[error("language '{language}': no free spelling found for '{name}'")]
    Exhausted {
        /// Language tag.
        language: String,
        /// The base spelling.
        name: String,
    },

    /// No rules are configured for a requested language.
    #[error("no naming rules configured for language '{language}'")]
    UnknownLanguage {
        /// Language tag.
        language: String,
    },

    /// The rule set document could not be decoded.
    #[error("invalid rule set document: {message}")]
    Document {
        /// Decoder message.
        message: String,
    },
}

impl NamingConfigurationError {
    /// Creates a missing-rename error.
    pub fn missing_rename(language: impl Into<String>, name: impl Into<String>) -> Self {
        Self::MissingRename {
            language: language.into(),
            name: name.into(),
        }
    }

    /// Creates a rename-cycle error.
    pub fn rename_cycle(language: impl Into<String>, name: impl Into<String>) -> Self {
        Self::RenameCycle {
            language: language.into(),
            name: name.into(),
        }
    }
}

impl From<serde_json::Error> for NamingConfigurationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Document {
            message: err.to_string(),
        }
    }
}

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Malformed input resource type; local to that resource.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Broken naming rules; fatal for the run.
    #[error("naming configuration error: {0}")]
    Naming(#[from] NamingConfigurationError),

    /// IO error while writing generated files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    /// Returns true if the error must abort the whole generator run.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::Schema(_))
    }
}
