//! Template collection.
//! Walks a template file or directory, derives each template's destination
//! from its filename and binds every placeholder it meets exactly once.

use crate::config::Config;
use crate::constants::CONFIG_FILE;
use crate::error::{Error, Result};
use crate::placeholder::Scanner;
use crate::prompt::VariableResolver;
use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::{Path, MAIN_SEPARATOR};
use walkdir::WalkDir;

/// A consumed template file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Destination parsed from the filename; may still hold placeholders.
    pub destination: String,
    /// Raw file content.
    pub content: String,
}

/// Templates keyed by destination pattern, in the order they were consumed.
pub type Templates = IndexMap<String, Template>;

/// Placeholder token (delimiters included) to its value.
pub type Bindings = IndexMap<String, String>;

/// Builds the template set and the placeholder bindings for one run.
pub struct Collector<'a> {
    config: Config,
    scanner: Scanner,
    resolver: &'a mut dyn VariableResolver,
    templates: Templates,
    bindings: Bindings,
}

impl<'a> Collector<'a> {
    /// # Errors
    /// * `Error::ConfigError` if the configured placeholder pattern is invalid
    pub fn new(config: Config, resolver: &'a mut dyn VariableResolver) -> Result<Self> {
        let scanner = Scanner::new(&config.variable_match_regex)?;
        Ok(Self {
            config,
            scanner,
            resolver,
            templates: Templates::new(),
            bindings: Bindings::new(),
        })
    }

    /// Consumes a template file or every template directly inside a directory.
    ///
    /// # Arguments
    /// * `path` - Template file or directory
    /// * `deep` - Also look for placeholders in file contents
    ///
    /// # Errors
    /// * `Error::InvalidPath` if `path` is neither a directory nor a template file
    /// * Any error from [`Collector::add_file`]
    pub fn consume<P: AsRef<Path>>(&mut self, path: P, deep: bool) -> Result<()> {
        let path = path.as_ref();
        if path.is_dir() {
            self.consume_directory(path, deep)
        } else if path.is_file() {
            if !self.is_template(path) {
                return Err(self.invalid_path(path));
            }
            self.add_file(path, deep)
        } else {
            Err(self.invalid_path(path))
        }
    }

    fn consume_directory(&mut self, dir: &Path, deep: bool) -> Result<()> {
        if dir.join(CONFIG_FILE).exists() {
            self.set_config(Config::load(dir)?)?;
        }

        let entries = WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name();
        for entry in entries {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            let path = entry.path();
            if !path.is_file() {
                debug!("Skipping {}: not a file", path.display());
                continue;
            }
            if !self.is_template(path) {
                debug!("Skipping {}: not a template", path.display());
                continue;
            }
            self.add_file(path, deep)?;
        }
        Ok(())
    }

    /// Consumes a single template file. Files without the template extension
    /// are skipped.
    ///
    /// # Errors
    /// * `Error::EmptyDestination` if the filename yields an empty destination
    /// * `Error::EmptyFile` if the file has zero length
    /// * `Error::ReadFailure` if the file cannot be read as text
    /// * `Error::VariableResolutionFailure` if a placeholder gets no value
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, deep: bool) -> Result<()> {
        let path = path.as_ref();
        if !self.is_template(path) {
            debug!("Skipping {}: not a template", path.display());
            return Ok(());
        }

        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let destination = parse_destination(file_name, &self.config.extension);
        if destination.is_empty() {
            return Err(Error::EmptyDestination { path: path.display().to_string() });
        }

        let read_failure =
            |source| Error::ReadFailure { path: path.display().to_string(), source };
        let metadata = fs::metadata(path).map_err(read_failure)?;
        if metadata.len() == 0 {
            return Err(Error::EmptyFile { path: path.display().to_string() });
        }

        self.bind_placeholders(&destination)?;

        let content = fs::read_to_string(path).map_err(read_failure)?;

        if deep {
            self.bind_placeholders(&content)?;
        }

        debug!("Consumed {} -> {}", path.display(), destination);
        self.templates
            .insert(destination.clone(), Template { destination, content });
        Ok(())
    }

    fn bind_placeholders(&mut self, text: &str) -> Result<()> {
        for placeholder in self.scanner.scan(text) {
            if self.bindings.contains_key(&placeholder.token) {
                continue;
            }
            let value = self.resolver.resolve(&placeholder.name)?;
            self.bindings.insert(placeholder.token, value);
        }
        Ok(())
    }

    fn set_config(&mut self, config: Config) -> Result<()> {
        self.scanner = Scanner::new(&config.variable_match_regex)?;
        self.config = config;
        Ok(())
    }

    fn is_template(&self, path: &Path) -> bool {
        path.extension().and_then(|e| e.to_str()) == Some(self.config.extension.as_str())
    }

    fn invalid_path(&self, path: &Path) -> Error {
        Error::InvalidPath {
            path: path.display().to_string(),
            extension: self.config.extension.clone(),
        }
    }

    pub fn templates(&self) -> &Templates {
        &self.templates
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// True until a template has been consumed.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Derives the destination pattern from a template filename.
///
/// `[src\{{name}}.rs].neb` becomes `src/{{name}}.rs` on Unix and
/// `[{{env}}].config.neb` becomes `{{env}}.config`. A name without brackets
/// only loses its extension.
pub fn parse_destination(file_name: &str, extension: &str) -> String {
    let suffix = format!(".{extension}");
    let stripped = file_name.strip_suffix(suffix.as_str()).unwrap_or(file_name);

    let unbracketed = match stripped.strip_prefix('[') {
        Some(inner) => match inner.rfind(']') {
            Some(close) => format!("{}{}", &inner[..close], &inner[close + 1..]),
            None => inner.to_string(),
        },
        None => stripped.to_string(),
    };

    unbracketed
        .chars()
        .map(|c| if c == '\\' || c == '/' { MAIN_SEPARATOR } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}
