use crate::{CompiledPattern, Grammar, Lexer, Result, Token};

/// Compile `(name, fragment)` pairs into a tagged pattern.
///
/// # Example
/// ```
/// let pattern = relex::compile([("num", r"\d"), ("plus", r"\+")]).unwrap();
/// assert_eq!(pattern.as_str(), r"#(?|(?:\d)(*MARK:num)|(?:\+)(*MARK:plus))#Au");
/// ```
pub fn compile<I, K, V>(rules: I) -> Result<CompiledPattern>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    Grammar::with_rules(rules)?.compile()
}

/// Scan `content` to completion with `(name, fragment)` rules.
///
/// Stops at the first error. Use [`Lexer::lex`] to consume tokens lazily.
pub fn tokenize<I, K, V>(rules: I, content: &str) -> Result<Vec<Token>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    Lexer::new(Grammar::with_rules(rules)?).lex(content)?.collect()
}
