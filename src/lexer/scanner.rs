//! Cursor-driven scanning loop.
//!
//! A `Scanner` is a single-pass iterator over `Result<Token>`:
//!
//! ```text
//!            ┌──────────── match at cursor ───────────┐
//!            │  emit Token, advance line/column/offset │
//!            ▼                                         │
//!       [Scanning] ───────────────────────────────────┘
//!            │ cursor at end of input   │ no rule matches
//!            ▼                          ▼
//!         [Done]  ◀──────────── yield Err(UnexpectedCharacter)
//! ```
//!
//! Position bookkeeping:
//!
//! - `line` starts at 1 and grows by the number of `\n` in each match; a token
//!   reports the line at which it *starts*.
//! - `column` is a 0-based offset in code points. A token reports the offset
//!   immediately after its text; an error reports the offset of the offending
//!   character.
//! - `offset` is the byte cursor. Rules are matched against the whole input
//!   from there, never against a suffix.

use super::matcher::Matcher;
use crate::compiler::CompiledPattern;
use crate::{Error, Result, Token};
use log::{debug, trace};
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Done,
}

/// Lazy token sequence over one input string.
#[derive(Debug, Clone)]
pub struct Scanner<'c> {
    matcher: Matcher,
    content: &'c str,
    offset: usize,
    column: usize,
    line: usize,
    state: State,
}

impl<'c> Scanner<'c> {
    /// Scan `content` with a compiled pattern.
    pub fn new(pattern: &CompiledPattern, content: &'c str) -> Result<Self> {
        Ok(Self::with_matcher(Matcher::new(pattern)?, content))
    }

    /// Scan `content` with an already-built matcher.
    pub fn with_matcher(matcher: Matcher, content: &'c str) -> Self {
        Scanner { matcher, content, offset: 0, column: 0, line: 1, state: State::Scanning }
    }

    /// Current line (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current column (0-based, code points).
    pub fn column(&self) -> usize {
        self.column
    }

    fn step(&mut self) -> Option<Result<Token>> {
        if self.state == State::Done {
            return None;
        }

        let Some(rest) = self.content.get(self.offset..).filter(|rest| !rest.is_empty()) else {
            self.state = State::Done;
            return None;
        };

        let found = match self.matcher.match_at(self.content, self.offset) {
            Ok(found) => found,
            Err(err) => {
                self.state = State::Done;
                return Some(Err(err));
            }
        };

        let Some(found) = found else {
            self.state = State::Done;
            let character = rest.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
            debug!("[scan] no rule matches {character:?} at line {} column {}", self.line, self.column);
            return Some(Err(Error::UnexpectedCharacter { character, line: self.line, column: self.column }));
        };

        let line = self.line;
        self.line += found.text.bytes().filter(|&b| b == b'\n').count();
        self.offset += found.text.len();
        self.column += found.text.chars().count();

        trace!("[scan] {} {:?} line={} column={}", found.tag, found.text, line, self.column);

        Some(Ok(Token::new(found.tag, found.text, line, self.column, found.captures)))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

impl FusedIterator for Scanner<'_> {}

/// Scan `content` with `pattern`; shorthand for [`Scanner::new`].
pub fn scan<'c>(pattern: &CompiledPattern, content: &'c str) -> Result<Scanner<'c>> {
    Scanner::new(pattern, content)
}
