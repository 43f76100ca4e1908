//! Named regular-expression composition and tokenization.
//!
//! Rules are named pattern fragments that may reference each other with
//! `(?&name)`. The compiler expands those references (rejecting undefined and
//! circular ones) and assembles a single tagged alternation; the lexer then
//! walks an input string with it and yields one [`Token`] per match.
//!
//! ```
//! use relex::{Grammar, Lexer};
//!
//! let grammar = Grammar::with_rules([
//!     ("number", r"\d+"),
//!     ("plus", r"\+"),
//!     ("whitespace", r"\s+"),
//! ])
//! .unwrap();
//!
//! let tokens: Vec<_> = Lexer::new(grammar).lex("1 + 2").unwrap().collect::<Result<_, _>>().unwrap();
//! assert_eq!(tokens[0].tag(), "number");
//! assert_eq!(tokens.len(), 5);
//! ```
//!
//! Logging goes through the `log` facade; install any logger to see compile
//! and scan traces.

#[macro_use]
mod macros;
mod api;
mod compiler;
mod config;
mod error;
mod grammar;
mod lexer;

pub use api::{compile, tokenize};
pub use compiler::{Builder, CompiledPattern, CompiledRule, Modifiers, RuleSet};
pub use config::{GrammarConfig, RuleConfig};
pub use error::{Error, Result};
pub use grammar::Grammar;
pub use lexer::{Lexer, Matcher, Scanner, scan};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// --- Token ------------------------------------------------------------------

/// One match produced by the scanner.
///
/// Serializes as `{type, value, line, column, matches}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    tag: String,
    #[serde(rename = "value")]
    text: String,
    line: usize,
    column: usize,
    #[serde(rename = "matches", default)]
    captures: BTreeMap<String, String>,
}

impl Token {
    /// Build a token; `column` is the code-point offset after `text`.
    pub fn new(
        tag: impl Into<String>,
        text: impl Into<String>,
        line: usize,
        column: usize,
        captures: BTreeMap<String, String>,
    ) -> Self {
        Token { tag: tag.into(), text: text.into(), line, column, captures }
    }

    /// Name of the rule that matched.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Matched text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Line (1-based) at which the match starts.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Code-point offset immediately after the match (0-based).
    pub fn column(&self) -> usize {
        self.column
    }

    /// Named groups of the matching rule that took part in the match.
    pub fn captures(&self) -> &BTreeMap<String, String> {
        &self.captures
    }

    /// Structured view: `{type, value, line, column, matches}` as JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, {}, {}, {})", self.tag, self.text, self.line, self.column)
    }
}
