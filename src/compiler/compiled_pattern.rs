//! The compiled composite pattern.
//!
//! A `CompiledPattern` carries two views of the same compilation:
//!
//! - the wire text, `#(?|(?:body)(*MARK:name)|…)#Au`, which is the stable
//!   external contract (branch-reset alternation, start-anchored, Unicode, one
//!   tagged alternative per rule in insertion order);
//! - the per-rule resolved bodies, in the same order, which the scanner turns
//!   into matchers (see `lexer/matcher.rs`).

use std::fmt;

/// Pattern delimiter used by the wire form.
pub(crate) const DELIMITER: char = '#';

bitflags::bitflags! {
    /// Modifiers rendered after the closing delimiter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Every match attempt is anchored at the start offset (`A`).
        const ANCHORED = 1 << 0;
        /// Unicode-aware matching (`u`).
        const UNICODE  = 1 << 1;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers::ANCHORED | Modifiers::UNICODE
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Modifiers::ANCHORED) {
            f.write_str("A")?;
        }
        if self.contains(Modifiers::UNICODE) {
            f.write_str("u")?;
        }
        Ok(())
    }
}

/// One tagged alternative: rule name plus its fully resolved body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRule {
    pub name: String,
    pub body: String,
}

/// Immutable result of `Builder::build` / `Grammar::compile`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    text: String,
    modifiers: Modifiers,
    rules: Vec<CompiledRule>,
}

impl CompiledPattern {
    /// Assemble the wire text from already-resolved alternatives.
    ///
    /// `alternation` is the joined `(?:body)(*MARK:name)` text; any literal
    /// delimiter inside it is escaped.
    pub(crate) fn new(alternation: &str, modifiers: Modifiers, rules: Vec<CompiledRule>) -> Self {
        let escaped = alternation.replace(DELIMITER, "\\#");
        let text = format!("{DELIMITER}(?|{escaped}){DELIMITER}{modifiers}");
        CompiledPattern { text, modifiers, rules }
    }

    /// Wire text of the pattern.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Trailing pattern modifiers (`A`, `u`).
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Tagged alternatives in precedence order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Take the wire text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for CompiledPattern {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl PartialEq<&str> for CompiledPattern {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}
