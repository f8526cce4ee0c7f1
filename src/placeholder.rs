//! Placeholder discovery.
//! Finds `{{name}}` tokens (or whatever the configured pattern matches) in
//! template filenames and contents.

use crate::error::{Error, Result};
use regex::Regex;

/// One occurrence of a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Full matched text, delimiters included. Used as the substitution key.
    pub token: String,
    /// Text captured between the delimiters, shown to the user when prompting.
    pub name: String,
}

/// Compiled placeholder pattern.
#[derive(Debug, Clone)]
pub struct Scanner {
    regex: Regex,
}

impl Scanner {
    /// Compiles a placeholder pattern.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the pattern is empty or invalid
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::ConfigError("[variableMatchRegex] is empty".to_string()));
        }
        let regex = Regex::new(pattern).map_err(|e| {
            Error::ConfigError(format!("Invalid variable pattern '{pattern}': {e}"))
        })?;
        Ok(Self { regex })
    }

    /// Returns every placeholder occurrence in order, duplicates included.
    pub fn scan(&self, text: &str) -> Vec<Placeholder> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let token = caps.get(0)?.as_str();
                let name = caps.get(1).map_or(token, |m| m.as_str());
                Some(Placeholder { token: token.to_string(), name: name.to_string() })
            })
            .collect()
    }

    /// Whether `text` holds at least one placeholder.
    pub fn contains(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}
