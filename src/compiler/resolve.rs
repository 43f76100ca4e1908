//! Reference resolution.
//!
//! Expands `(?&name)` reference tokens into the bodies of the named rules,
//! recursively, with cycle detection.
//!
//! ## How cycles are handled
//!
//! Resolution is two-phase:
//!
//! 1. While expanding a rule, any nested reference that turns out to be
//!    circular (its name is already on the resolution stack, or its own
//!    expansion failed as circular) is replaced by a sentinel string and the
//!    remaining sibling references are still expanded.
//! 2. Once a rule's fragment is fully expanded, the presence of the sentinel
//!    anywhere in the result rejects that rule with
//!    [`Error::CircularReference`], naming the rule and its raw fragment.
//!
//! ```text
//! A -> (?&B)|(?&C)      resolve(B)
//! B -> (?&A)              push B, expand "(?&A)"
//! C -> (?&A)                push A, expand "(?&B)|(?&C)"
//!                             B on stack        -> SENTINEL
//!                             resolve(C)        -> circular -> SENTINEL
//!                           A contains SENTINEL -> circular -> SENTINEL
//!                         B contains SENTINEL   -> Err(CircularReference B)
//! ```
//!
//! The resolution stack is owned by one [`Resolver`] and lives exactly as long
//! as one compile call.

use crate::compiler::RuleSet;
use crate::{Error, Result};
use log::trace;

/// Placeholder substituted for a circular branch. Never valid pattern text.
const CIRCULAR_SENTINEL: &str = "\u{FFFF}circular-reference\u{FFFF}";

/// Resolver over a borrowed rule set for the duration of one compile call.
pub(crate) struct Resolver<'r> {
    rules: &'r mut RuleSet,
    stack: Vec<String>,
}

impl<'r> Resolver<'r> {
    pub(crate) fn new(rules: &'r mut RuleSet) -> Self {
        Resolver { rules, stack: Vec::new() }
    }

    /// Expand every reference in `text`.
    ///
    /// Circular references are not contained at this level: the first rule
    /// confirmed circular is reported.
    pub(crate) fn resolve_text(&mut self, text: &str) -> Result<String> {
        self.expand(text, false)
    }

    fn expand(&mut self, text: &str, contain_cycles: bool) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in regex!(r"\(\?&([\w-]+)\)").captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                return Err(Error::ShouldNotHappen("The reference token should always be present".to_string()));
            };

            out.push_str(&text[last..whole.start()]);
            last = whole.end();

            match self.resolve_reference(name.as_str(), text) {
                Ok(body) => {
                    out.push_str("(?:");
                    out.push_str(&body);
                    out.push(')');
                }
                Err(Error::CircularReference { reference, .. }) if contain_cycles => {
                    trace!("[resolve] contained circular branch \"{reference}\"");
                    out.push_str(CIRCULAR_SENTINEL);
                }
                Err(err) => return Err(err),
            }
        }

        out.push_str(&text[last..]);
        Ok(out)
    }

    fn resolve_reference(&mut self, name: &str, context: &str) -> Result<String> {
        let Some(fragment) = self.rules.get(name).map(str::to_string) else {
            return Err(Error::UndefinedReference { reference: name.to_string(), expression: context.to_string() });
        };

        if self.stack.iter().any(|n| n == name) {
            return Err(Error::CircularReference { reference: name.to_string(), expression: fragment });
        }

        if let Some(cached) = self.rules.resolved(name) {
            return Ok(cached.to_string());
        }

        self.stack.push(name.to_string());
        let expanded = self.expand(&fragment, true);
        self.stack.pop();
        let expanded = expanded?;

        if expanded.contains(CIRCULAR_SENTINEL) {
            return Err(Error::CircularReference { reference: name.to_string(), expression: fragment });
        }

        trace!("[resolve] \"{name}\" => {expanded}");
        self.rules.cache(name, &expanded);
        Ok(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> RuleSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn expands_nested_references_in_groups() {
        let mut rs = rules(&[("digit", r"\d"), ("number", "(?&digit)+"), ("pair", "(?&number),(?&number)")]);
        let out = Resolver::new(&mut rs).resolve_text("(?&pair)").unwrap();

        assert_eq!(out, r"(?:(?:(?:\d)+),(?:(?:\d)+))");
    }

    #[test]
    fn text_without_references_is_unchanged() {
        let mut rs = RuleSet::new();
        assert_eq!(Resolver::new(&mut rs).resolve_text(r"[a-z]+\(x\)").unwrap(), r"[a-z]+\(x\)");
    }

    #[test]
    fn caches_resolved_bodies_in_rule_set() {
        let mut rs = rules(&[("a", "x"), ("b", "(?&a)y")]);
        Resolver::new(&mut rs).resolve_text("(?&b)").unwrap();

        assert_eq!(rs.resolved("a"), Some("x"));
        assert_eq!(rs.resolved("b"), Some("(?:x)y"));
        assert_eq!(rs.get("b"), Some("(?&a)y"));
    }

    #[test]
    fn undefined_reference_names_the_missing_rule() {
        let mut rs = rules(&[("a", "(?&missing)")]);
        let err = Resolver::new(&mut rs).resolve_text("(?&a)").unwrap_err();

        match err {
            Error::UndefinedReference { reference, .. } => assert_eq!(reference, "missing"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn self_reference_is_circular() {
        let mut rs = rules(&[("a", "x(?&a)")]);
        let err = Resolver::new(&mut rs).resolve_text("(?&a)").unwrap_err();

        match err {
            Error::CircularReference { reference, expression } => {
                assert_eq!(reference, "a");
                assert_eq!(expression, "x(?&a)");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn three_cycle_reports_outermost_rule() {
        let mut rs = rules(&[("A", "(?&B)|(?&C)"), ("B", "(?&A)"), ("C", "(?&A)")]);
        let err = Resolver::new(&mut rs).resolve_text("(?&B)").unwrap_err();

        assert_eq!(err.to_string(), "Circular reference detected for \"B\" in regular expression \"(?&A)\"");
        assert!(rs.resolved("A").is_none());
    }

    #[test]
    fn stack_is_unwound_after_failure() {
        let mut rs = rules(&[("loop", "(?&loop)"), ("ok", "y")]);
        let mut resolver = Resolver::new(&mut rs);

        assert!(resolver.resolve_text("(?&loop)").is_err());
        assert_eq!(resolver.resolve_text("(?&ok)").unwrap(), "(?:y)");
    }

    #[test]
    fn hyphenated_names_resolve() {
        let mut rs = rules(&[("first-one", "a"), ("second-one", "(?&first-one)b")]);
        assert_eq!(Resolver::new(&mut rs).resolve_text("(?&second-one)").unwrap(), "(?:(?:a)b)");
    }
}
