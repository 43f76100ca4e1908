//! Error taxonomy.
//!
//! Three domain errors come out of normal use:
//!
//! - [`Error::UndefinedReference`] and [`Error::CircularReference`] from
//!   compilation (`Builder::build` / `Grammar::compile`).
//! - [`Error::UnexpectedCharacter`] from scanning.
//!
//! [`Error::ShouldNotHappen`] is the internal class: it signals a broken
//! contract between the compiler and the match engine, never bad input.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while compiling rules or scanning input.
#[derive(Debug, Error)]
pub enum Error {
    /// A reference token names a rule that is not in the rule set.
    ///
    /// `expression` is the full joined text that was being compiled.
    #[error("Undefined reference \"{reference}\" detected in regular expression \"{expression}\"")]
    UndefinedReference { reference: String, expression: String },

    /// A reference chain returned to a rule that was already being expanded.
    ///
    /// `expression` is the raw (unresolved) fragment of `reference`.
    #[error("Circular reference detected for \"{reference}\" in regular expression \"{expression}\"")]
    CircularReference { reference: String, expression: String },

    /// No rule matches at the scanner cursor.
    #[error("Unexpected character \"{character}\" on line {line} and column {column}")]
    UnexpectedCharacter { character: char, line: usize, column: usize },

    /// The match engine rejected a resolved rule body.
    #[error("invalid pattern for rule \"{reference}\": {source}")]
    InvalidPattern {
        reference: String,
        #[source]
        source: fancy_regex::Error,
    },

    /// The match engine gave up on a rule at runtime (e.g. backtrack limit).
    #[error("matching rule \"{reference}\" failed: {source}")]
    MatchFailed {
        reference: String,
        #[source]
        source: fancy_regex::Error,
    },

    /// Empty names or fragments handed to the compiler surface.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed grammar configuration.
    #[error("invalid grammar configuration: {0}")]
    Config(String),

    /// IO error while reading a grammar file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Token serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal consistency failure.
    #[error("{0}")]
    ShouldNotHappen(String),
}

impl Error {
    /// True for errors that indicate a defect rather than bad input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::ShouldNotHappen(_))
    }
}
