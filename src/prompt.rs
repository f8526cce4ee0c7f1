//! User input and interaction handling.
//! A [`VariableResolver`] turns a placeholder name into the value that
//! replaces it. The collector asks once per distinct placeholder.

use crate::error::{Error, Result};
use dialoguer::console::Term;
use dialoguer::Input;
use log::debug;
use std::fs;
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::Path;

/// Source of placeholder values.
pub trait VariableResolver {
    /// Returns the value for the placeholder `name`.
    ///
    /// # Errors
    /// * `Error::VariableResolutionFailure` if no non-empty value is available
    fn resolve(&mut self, name: &str) -> Result<String>;
}

fn prompt_text(name: &str) -> String {
    format!("Enter a value for variable [{name}]")
}

// Same stream as LineResolver::stdio.
fn prompt_term() -> Term {
    Term::stdout()
}

fn non_empty(name: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::VariableResolutionFailure { name: name.to_string() });
    }
    Ok(value.to_string())
}

/// Line-oriented resolver: writes the prompt, reads a single line.
///
/// Works on any reader/writer pair, so it serves both piped standard input
/// and tests.
pub struct LineResolver<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LineResolver<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Gives back the writer, e.g. to inspect what was prompted.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl LineResolver<StdinLock<'static>, Stdout> {
    /// Resolver bound to the process's standard streams.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> VariableResolver for LineResolver<R, W> {
    fn resolve(&mut self, name: &str) -> Result<String> {
        write!(self.writer, "{}: ", prompt_text(name))?;
        self.writer.flush()?;

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => Err(Error::VariableResolutionFailure { name: name.to_string() }),
            Ok(_) => non_empty(name, &line),
        }
    }
}

/// Terminal resolver backed by dialoguer. Prompts on stdout, like the
/// line resolver.
#[derive(Default)]
pub struct DialoguerResolver;

impl DialoguerResolver {
    pub fn new() -> Self {
        Self
    }
}

impl VariableResolver for DialoguerResolver {
    fn resolve(&mut self, name: &str) -> Result<String> {
        let input: String = Input::new()
            .with_prompt(prompt_text(name))
            .allow_empty(true)
            .interact_text_on(&prompt_term())
            .map_err(|e| {
                debug!("Prompt for [{name}] failed: {e}");
                Error::VariableResolutionFailure { name: name.to_string() }
            })?;
        non_empty(name, &input)
    }
}

/// Answers placeholders from a preset JSON object and defers every other
/// name to a fallback resolver.
pub struct PresetResolver {
    answers: serde_json::Map<String, serde_json::Value>,
    fallback: Box<dyn VariableResolver>,
}

impl PresetResolver {
    pub fn new(
        answers: serde_json::Map<String, serde_json::Value>,
        fallback: Box<dyn VariableResolver>,
    ) -> Self {
        Self { answers, fallback }
    }

    /// Reads the preset answers from a JSON file holding a single object.
    ///
    /// # Errors
    /// * `Error::IoError` if the file cannot be read
    /// * `Error::ConfigError` if it does not hold a JSON object
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        fallback: Box<dyn VariableResolver>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match serde_json::from_str(&content)? {
            serde_json::Value::Object(answers) => {
                debug!("Loaded {} preset answers from {}", answers.len(), path.display());
                Ok(Self::new(answers, fallback))
            }
            _ => Err(Error::ConfigError(format!(
                "Answers file '{}' must contain a JSON object",
                path.display()
            ))),
        }
    }
}

impl VariableResolver for PresetResolver {
    fn resolve(&mut self, name: &str) -> Result<String> {
        match self.answers.get(name) {
            Some(serde_json::Value::String(value)) => non_empty(name, value),
            Some(serde_json::Value::Null) | None => self.fallback.resolve(name),
            Some(other) => Ok(other.to_string()),
        }
    }
}
