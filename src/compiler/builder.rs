//! Pattern builder: combinator primitives and final assembly.
//!
//! The primitives are plain text combinators. They never look at the rule set
//! and can be freely nested:
//!
//! ```text
//! group("ab")          -> (?:ab)
//! optional("ab")       -> (?:ab)?
//! range(1, 3, "ab")    -> [ab]{1,3}
//! mark("n", "ab")      -> (?:ab)(*MARK:n)
//! reference("digit")   -> (?&digit)
//! ```
//!
//! Note that the bounded repetitions (`exactly`, `at_least`, `at_most`,
//! `range`) wrap their operand in a character-class `option` *before*
//! applying the bound, so `exactly(2, "ab")` matches two characters out of
//! `{a, b}`, not two copies of `ab`.
//!
//! [`Builder::build`] marks every rule, expands references and returns the
//! [`CompiledPattern`].

use super::resolve::Resolver;
use super::{CompiledPattern, CompiledRule, Modifiers, RuleSet};
use crate::{Error, Result};
use log::debug;

/// Owns a [`RuleSet`] and compiles it into a [`CompiledPattern`].
#[derive(Debug, Clone, Default)]
pub struct Builder {
    rules: RuleSet,
}

impl Builder {
    /// Create a builder with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder seeded with `(name, fragment)` pairs, in order.
    pub fn with_rules<I, K, V>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut builder = Self::new();
        for (name, fragment) in rules {
            builder.add(name, fragment)?;
        }
        Ok(builder)
    }

    /// Register (or redefine) the rule `name`.
    pub fn add(&mut self, name: impl Into<String>, fragment: impl Into<String>) -> Result<()> {
        let name = name.into();
        let fragment = fragment.into();

        if name.is_empty() {
            return Err(Error::InvalidArgument("rule name must not be empty".to_string()));
        }
        if fragment.is_empty() {
            return Err(Error::InvalidArgument(format!("rule \"{name}\" has an empty pattern")));
        }

        debug!("[add] {name} => {fragment}");
        self.rules.insert(name, fragment);
        Ok(())
    }

    /// Read-only view of the registered rules (raw fragments).
    pub fn regular_expressions(&self) -> &RuleSet {
        &self.rules
    }

    /// `f1|f2|…`
    pub fn alternation<I, S>(&self, fragments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        join(fragments, "|")
    }

    /// `f1f2…`
    pub fn concatenation<I, S>(&self, fragments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        join(fragments, "")
    }

    /// `(?:f)`
    pub fn group(&self, fragment: &str) -> String {
        debug_assert!(!fragment.is_empty());
        format!("(?:{fragment})")
    }

    /// `(?:f)?`
    pub fn optional(&self, fragment: &str) -> String {
        format!("{}?", self.group(fragment))
    }

    /// `(?:f)*`
    pub fn zero_or_more(&self, fragment: &str) -> String {
        format!("{}*", self.group(fragment))
    }

    /// `(?:f)+`
    pub fn one_or_more(&self, fragment: &str) -> String {
        format!("{}+", self.group(fragment))
    }

    /// `[f1f2…]`
    pub fn option<I, S>(&self, fragments: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        format!("[{}]", self.concatenation(fragments))
    }

    /// `{spec}`
    pub fn repetition(&self, spec: &str) -> String {
        debug_assert!(!spec.is_empty());
        format!("{{{spec}}}")
    }

    /// `[f]{count}`
    pub fn exactly(&self, count: usize, fragment: &str) -> String {
        self.bounded(fragment, &count.to_string())
    }

    /// `[f]{min,}`
    pub fn at_least(&self, min: usize, fragment: &str) -> String {
        self.bounded(fragment, &format!("{min},"))
    }

    /// `[f]{,max}`
    ///
    /// The matcher reads the open lower bound as `{0,max}`.
    pub fn at_most(&self, max: usize, fragment: &str) -> String {
        self.bounded(fragment, &format!(",{max}"))
    }

    /// `[f]{min,max}`
    pub fn range(&self, min: usize, max: usize, fragment: &str) -> String {
        self.bounded(fragment, &format!("{min},{max}"))
    }

    /// `(?:f)(*MARK:name)`
    pub fn mark(&self, name: &str, fragment: &str) -> String {
        marked(name, fragment)
    }

    /// `(?&name)`
    pub fn reference(&self, name: &str) -> String {
        debug_assert!(!name.is_empty());
        format!("(?&{name})")
    }

    /// Compile every registered rule into one tagged pattern.
    ///
    /// Steps:
    /// 1. mark each rule with its name, in insertion order, and join them;
    /// 2. expand references (resolved bodies are cached in the rule set);
    /// 3. escape the delimiter and wrap in `#(?|…)#Au`.
    ///
    /// Fails with [`Error::UndefinedReference`] or [`Error::CircularReference`].
    pub fn build(&mut self) -> Result<CompiledPattern> {
        let entries: Vec<(String, String)> =
            self.rules.iter().map(|(name, fragment)| (name.to_string(), fragment.to_string())).collect();

        let joined = self.alternation(entries.iter().map(|(name, fragment)| marked(name, fragment)));

        let mut compiled = Vec::with_capacity(entries.len());
        {
            let mut resolver = Resolver::new(&mut self.rules);
            for (name, fragment) in &entries {
                let body = resolver.resolve_text(fragment).map_err(|err| match err {
                    Error::UndefinedReference { reference, .. } => {
                        Error::UndefinedReference { reference, expression: joined.clone() }
                    }
                    other => other,
                })?;
                compiled.push(CompiledRule { name: name.clone(), body });
            }
        }

        if compiled.len() != entries.len() {
            return Err(Error::ShouldNotHappen(format!("The regular expression \"{joined}\" could not be resolved")));
        }

        let alternation = self.alternation(compiled.iter().map(|rule| marked(&rule.name, &rule.body)));
        let pattern = CompiledPattern::new(&alternation, Modifiers::default(), compiled);

        debug!("[build] {} rules => {}", self.rules.len(), pattern);
        Ok(pattern)
    }

    fn bounded(&self, fragment: &str, spec: &str) -> String {
        format!("{}{}", self.option([fragment]), self.repetition(spec))
    }
}

impl From<RuleSet> for Builder {
    fn from(rules: RuleSet) -> Self {
        Builder { rules }
    }
}

fn marked(name: &str, fragment: &str) -> String {
    format!("(?:{fragment})(*MARK:{name})")
}

fn join<I, S>(fragments: I, separator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (idx, fragment) in fragments.into_iter().enumerate() {
        if idx > 0 {
            out.push_str(separator);
        }
        out.push_str(fragment.as_ref());
    }
    out
}
