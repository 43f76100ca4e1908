//! Engine binding for a compiled pattern.
//!
//! There is no branch-reset group and no `(*MARK:…)` verb on the Rust side,
//! so the "which alternative fired" bookkeeping is done here: every
//! alternative of the [`CompiledPattern`] becomes its own `fancy_regex`
//! (lookaround and backreferences included), and the alternatives are tried
//! in precedence order. The first non-empty match that starts exactly at the
//! cursor wins, which is how an ordered alternation behaves at one offset.
//!
//! ```text
//! CompiledPattern.rules()  ──▶  [ body_0, body_1, … ]
//!                                    │ try in order on (input, cursor)
//!                                    ▼
//!                               RuleMatch { tag, text, captures }
//! ```
//!
//! Matching always sees the whole input, so `^`, `\b` and lookbehind judge
//! the cursor by the text that precedes it.
//!
//! Zero-length matches are skipped: accepting one would never advance the
//! cursor.

use crate::compiler::CompiledPattern;
use crate::{Error, Result};
use fancy_regex::Regex;
use std::borrow::Cow;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct RuleMatcher {
    name: String,
    regex: Regex,
    /// `(group index, group name)` for every named group in the body.
    named_groups: Vec<(usize, String)>,
}

/// A successful match at the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RuleMatch<'h> {
    pub tag: &'h str,
    pub text: &'h str,
    pub captures: BTreeMap<String, String>,
}

/// Ordered matchers built from a [`CompiledPattern`].
#[derive(Debug, Clone)]
pub struct Matcher {
    rules: Vec<RuleMatcher>,
}

impl Matcher {
    /// Build one matcher per alternative.
    pub fn new(pattern: &CompiledPattern) -> Result<Self> {
        let mut rules = Vec::with_capacity(pattern.rules().len());

        for rule in pattern.rules() {
            let regex = Regex::new(&engine_body(&rule.body))
                .map_err(|source| Error::InvalidPattern { reference: rule.name.clone(), source })?;

            let named_groups = regex
                .capture_names()
                .enumerate()
                .filter_map(|(idx, name)| name.map(|n| (idx, n.to_string())))
                .collect();

            rules.push(RuleMatcher { name: rule.name.clone(), regex, named_groups });
        }

        Ok(Matcher { rules })
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Try every alternative at byte `offset` of `content`.
    pub(crate) fn match_at<'h>(&'h self, content: &'h str, offset: usize) -> Result<Option<RuleMatch<'h>>> {
        for rule in &self.rules {
            let caps = rule
                .regex
                .captures_from_pos(content, offset)
                .map_err(|source| Error::MatchFailed { reference: rule.name.clone(), source })?;

            let Some(caps) = caps else {
                continue;
            };

            let Some(whole) = caps.get(0) else {
                return Err(Error::ShouldNotHappen("The match should always have a whole-match group".to_string()));
            };

            if whole.start() != offset || whole.as_str().is_empty() {
                continue;
            }

            let captures = rule
                .named_groups
                .iter()
                .filter_map(|(idx, name)| caps.get(*idx).map(|m| (name.clone(), m.as_str().to_string())))
                .collect();

            return Ok(Some(RuleMatch { tag: rule.name.as_str(), text: whole.as_str(), captures }));
        }

        Ok(None)
    }
}

/// Spell the open lower bound `{,n}` as `{0,n}`; escaped braces are left alone.
fn engine_body(body: &str) -> Cow<'_, str> {
    regex!(r"(^|[^\\])\{,(\d+)\}").replace_all(body, "${1}{0,${2}}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Builder;

    fn matcher(rules: &[(&str, &str)]) -> Matcher {
        let pattern = Builder::with_rules(rules.iter().copied()).unwrap().build().unwrap();
        Matcher::new(&pattern).unwrap()
    }

    #[test]
    fn first_defined_rule_wins() {
        let m = matcher(&[("keyword", "if"), ("ident", "[a-z]+")]);

        let hit = m.match_at("if x", 0).unwrap().unwrap();
        assert_eq!((hit.tag, hit.text), ("keyword", "if"));

        let hit = m.match_at("iffy", 0).unwrap().unwrap();
        assert_eq!((hit.tag, hit.text), ("keyword", "if"));
    }

    #[test]
    fn matches_are_anchored_at_the_cursor() {
        let m = matcher(&[("digit", r"\d+")]);
        assert!(m.match_at("a1", 0).unwrap().is_none());

        let hit = m.match_at("a1", 1).unwrap().unwrap();
        assert_eq!(hit.text, "1");
    }

    #[test]
    fn lookaround_sees_surrounding_text() {
        let m = matcher(&[("num", r"\d+(?=px)"), ("after_dollar", r"(?<=\$)\d+")]);

        assert_eq!(m.match_at("10px", 0).unwrap().unwrap().tag, "num");
        assert!(m.match_at("10em", 0).unwrap().is_none());
        assert_eq!(m.match_at("$5", 1).unwrap().unwrap().tag, "after_dollar");
    }

    #[test]
    fn collects_named_captures_only() {
        let m = matcher(&[("assign", r"(?P<name>[a-z]+)\s*=\s*(\d+)(?P<unit>px)?")]);
        let hit = m.match_at("width = 10;", 0).unwrap().unwrap();

        assert_eq!(hit.text, "width = 10");
        assert_eq!(hit.captures.len(), 1);
        assert_eq!(hit.captures.get("name").map(String::as_str), Some("width"));
    }

    #[test]
    fn skips_empty_matches() {
        let m = matcher(&[("maybe", "a*"), ("b", "b")]);
        let hit = m.match_at("b", 0).unwrap().unwrap();
        assert_eq!(hit.tag, "b");
    }

    #[test]
    fn open_lower_bound_is_normalized() {
        let cases = vec![
            ("[ab]{,3}", "[ab]{0,3}"),
            ("x{,12}y", "x{0,12}y"),
            (r"\{,3}", r"\{,3}"),
            ("a{1,3}", "a{1,3}"),
        ];

        for (body, expected) in cases {
            assert_eq!(engine_body(body), expected, "body: {body}");
        }
    }

    #[test]
    fn rejected_body_names_the_rule() {
        let pattern = Builder::with_rules([("bad", "(unclosed")]).unwrap().build().unwrap();
        let err = Matcher::new(&pattern).unwrap_err();

        assert!(matches!(err, Error::InvalidPattern { ref reference, .. } if reference == "bad"));
    }
}
