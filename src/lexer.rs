//! Tokenization.
//!
//! Turns a [`CompiledPattern`](crate::CompiledPattern) plus an input string
//! into a lazy sequence of [`Token`](crate::Token)s.
//!
//! - `matcher.rs`: binds each tagged alternative to a `fancy_regex`.
//! - `scanner.rs`: the cursor loop (`Scanner`), one token per pull.
//!
//! [`Lexer`] is the grammar-level entry point: it compiles its grammar and
//! hands back a fresh [`Scanner`] for every input. A `Scanner` cannot be
//! restarted; scanning again means asking the lexer (or `Scanner::new`) for a
//! new one.

#[path = "lexer/matcher.rs"]
mod matcher;
#[path = "lexer/scanner.rs"]
mod scanner;

pub use matcher::Matcher;
pub use scanner::{Scanner, scan};

use crate::{Grammar, Result};

/// Grammar-driven lexer.
#[derive(Debug, Clone)]
pub struct Lexer {
    grammar: Grammar,
}

impl Lexer {
    /// Wrap a grammar; it is compiled on every [`Lexer::lex`].
    pub fn new(grammar: Grammar) -> Self {
        Lexer { grammar }
    }

    /// Compile the grammar and start scanning `content`.
    pub fn lex<'c>(&mut self, content: &'c str) -> Result<Scanner<'c>> {
        let pattern = self.grammar.compile()?;
        Scanner::new(&pattern, content)
    }

    /// The grammar this lexer scans with.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }
}
