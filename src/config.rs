//! Grammar definitions loaded from TOML.
//!
//! Rules are an array of tables so their order survives parsing:
//!
//! ```toml
//! [[rules]]
//! name = "number"
//! pattern = '\d+'
//!
//! [[rules]]
//! name = "sum"
//! pattern = '(?&number)\+(?&number)'
//! ```

use crate::{Error, Grammar, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One named rule as written in a grammar file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub name: String,
    pub pattern: String,
}

/// A grammar file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarConfig {
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl GrammarConfig {
    /// Parse a grammar definition from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: GrammarConfig = toml::from_str(text).map_err(|err| Error::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a grammar file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Render back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| Error::Config(err.to_string()))
    }

    /// Build a grammar with the rules in file order.
    pub fn into_grammar(self) -> Result<Grammar> {
        Grammar::with_rules(self.rules.into_iter().map(|rule| (rule.name, rule.pattern)))
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.name.as_str()) {
                return Err(Error::Config(format!("rule \"{}\" is defined more than once", rule.name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CALC: &str = r#"
[[rules]]
name = "number"
pattern = '\d+'

[[rules]]
name = "plus"
pattern = '\+'

[[rules]]
name = "sum"
pattern = '(?&number)(?&plus)(?&number)'
"#;

    #[test]
    fn loads_rules_in_file_order() {
        let config = GrammarConfig::from_toml_str(CALC).unwrap();
        let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["number", "plus", "sum"]);

        let pattern = config.into_grammar().unwrap().compile().unwrap();
        assert_eq!(
            pattern.as_str(),
            r"#(?|(?:\d+)(*MARK:number)|(?:\+)(*MARK:plus)|(?:(?:\d+)(?:\+)(?:\d+))(*MARK:sum))#Au"
        );
    }

    #[test]
    fn rejects_duplicate_names() {
        let text = "[[rules]]\nname = \"a\"\npattern = \"x\"\n[[rules]]\nname = \"a\"\npattern = \"y\"\n";
        assert!(matches!(GrammarConfig::from_toml_str(text), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(GrammarConfig::from_toml_str("[[rules]\nname="), Err(Error::Config(_))));
    }

    #[test]
    fn empty_file_is_an_empty_grammar() {
        let config = GrammarConfig::from_toml_str("").unwrap();
        assert!(config.rules.is_empty());
        assert_eq!(config.into_grammar().unwrap().compile().unwrap().as_str(), "#(?|)#Au");
    }

    #[test]
    fn reads_from_disk_and_round_trips() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CALC.as_bytes()).unwrap();

        let config = GrammarConfig::from_path(file.path()).unwrap();
        let again = GrammarConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(config, again);
    }
}
