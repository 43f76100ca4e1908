//! Named grammar facade.
//!
//! A `Grammar` is the caller-facing way to declare token rules. It delegates
//! storage, resolution and assembly to an owned [`Builder`], so a grammar and
//! a builder holding the same rules compile to the same text.

use crate::compiler::{Builder, CompiledPattern, RuleSet};
use crate::Result;

/// Ordered set of named token rules.
///
/// # Example
/// ```
/// use relex::Grammar;
///
/// let mut grammar = Grammar::new();
/// grammar.define("digit", r"\d").unwrap();
/// grammar.define("number", "(?&digit)+").unwrap();
///
/// let pattern = grammar.compile().unwrap();
/// assert_eq!(pattern.as_str(), r"#(?|(?:\d)(*MARK:digit)|(?:(?:\d)+)(*MARK:number))#Au");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    builder: Builder,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grammar seeded with `(name, fragment)` pairs, in order.
    pub fn with_rules<I, K, V>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Ok(Grammar { builder: Builder::with_rules(rules)? })
    }

    /// Grammar delegating to an existing builder.
    pub fn from_builder(builder: Builder) -> Self {
        Grammar { builder }
    }

    /// Add or redefine the rule `name`.
    pub fn define(&mut self, name: impl Into<String>, fragment: impl Into<String>) -> Result<()> {
        self.builder.add(name, fragment)
    }

    /// Compile all rules into one tagged pattern.
    pub fn compile(&mut self) -> Result<CompiledPattern> {
        self.builder.build()
    }

    pub fn rules(&self) -> &RuleSet {
        self.builder.regular_expressions()
    }

    pub fn builder(&self) -> &Builder {
        &self.builder
    }
}

impl From<RuleSet> for Grammar {
    fn from(rules: RuleSet) -> Self {
        Grammar { builder: Builder::from(rules) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn compiles_like_builder() {
        let rules = [("num", r"\d+"), ("plus", r"\+"), ("ws", r"\s+")];

        let mut builder = Builder::with_rules(rules).unwrap();
        let mut grammar = Grammar::with_rules(rules).unwrap();

        assert_eq!(grammar.compile().unwrap().as_str(), builder.build().unwrap().as_str());
    }

    #[test]
    fn redefining_leaves_recompiles_dependents() {
        let mut builder = Builder::with_rules([
            ("semver", r"(?&major)\.(?&minor)\.(?&patch)(?&pre-release)?(?&build-metadata)?"),
            ("major", "(?&number)"),
            ("minor", "(?&number)"),
            ("patch", "(?&number)"),
            ("pre-release", "(?:-(?&identifier))"),
            ("build-metadata", r"(?:\+(?&identifier))"),
            ("number", "_OVERWRITE_NUM_"),
            ("identifier", "_OVERWRITE_ID_"),
        ])
        .unwrap();

        let placeholder = builder.build().unwrap();
        assert!(placeholder.as_str().contains("_OVERWRITE_NUM_"));

        let mut grammar = Grammar::from(builder.regular_expressions().clone());
        grammar.define("number", r"\d+").unwrap();
        grammar.define("identifier", "[a-zA-Z0-9-]+").unwrap();

        let pattern = grammar.compile().unwrap();
        assert!(!pattern.as_str().contains("_OVERWRITE_"));
        assert_eq!(pattern.rules()[0].name, "semver");
        assert_eq!(
            pattern.rules()[0].body,
            r"(?:(?:\d+))\.(?:(?:\d+))\.(?:(?:\d+))(?:(?:-(?:[a-zA-Z0-9-]+)))?(?:(?:\+(?:[a-zA-Z0-9-]+)))?"
        );
    }

    #[test]
    fn circular_grammar_fails_to_compile() {
        let mut grammar = Grammar::with_rules([("A", "(?&B)|(?&C)"), ("B", "(?&A)"), ("C", "(?&A)")]).unwrap();

        let err = grammar.compile().unwrap_err();
        assert_eq!(err.to_string(), r#"Circular reference detected for "B" in regular expression "(?&A)""#);
    }

    #[test]
    fn define_rejects_empty_fragment() {
        let mut grammar = Grammar::new();
        assert!(matches!(grammar.define("x", ""), Err(Error::InvalidArgument(_))));
    }
}
