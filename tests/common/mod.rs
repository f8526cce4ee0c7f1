#![allow(dead_code)]

use nebula::error::{Error, Result};
use nebula::prompt::VariableResolver;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Answers from a fixed table and remembers every name it was asked for.
#[derive(Default)]
pub struct ScriptedResolver {
    answers: HashMap<String, String>,
    pub asked: Vec<String>,
}

impl ScriptedResolver {
    pub fn new(answers: &[(&str, &str)]) -> Self {
        Self {
            answers: answers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            asked: Vec::new(),
        }
    }
}

impl VariableResolver for ScriptedResolver {
    fn resolve(&mut self, name: &str) -> Result<String> {
        self.asked.push(name.to_string());
        self.answers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::VariableResolutionFailure { name: name.to_string() })
    }
}

pub fn write_template(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}
