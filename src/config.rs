//! Configuration handling for Nebula template directories.
//! A template directory may carry a `nebula.json` file overriding the
//! placeholder pattern and the template extension.

use crate::constants::{CONFIG_FILE, DEFAULT_EXTENSION, DEFAULT_VARIABLE_MATCH_REGEX};
use crate::error::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Options recognised in `nebula.json`. Keys missing from the file keep
/// their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Regular expression matching one placeholder; group 1 is the name.
    pub variable_match_regex: String,
    /// Extension identifying template files. A leading dot is dropped on load.
    pub extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variable_match_regex: DEFAULT_VARIABLE_MATCH_REGEX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl Config {
    /// Loads `nebula.json` from a template directory.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the file is missing or is not a valid options object
    /// * `Error::InvalidPath` if `dir` is not a directory
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        ensure_dir(dir)?;

        let config_path = dir.join(CONFIG_FILE);
        if !config_path.is_file() {
            return Err(Error::ConfigError(format!(
                "Configuration file {CONFIG_FILE} does not exist in '{}'",
                dir.display()
            )));
        }

        debug!("Loading configuration from {}", config_path.display());
        let content = fs::read_to_string(&config_path)?;
        let mut config: Self = serde_json::from_str(&content).map_err(|e| {
            Error::ConfigError(format!("Invalid {CONFIG_FILE}: {e}"))
        })?;

        // Path::extension() never carries the dot.
        config.extension = config.extension.trim().trim_start_matches('.').to_string();

        if config.extension.trim().is_empty() {
            return Err(Error::ConfigError("[extension] is empty".to_string()));
        }
        Ok(config)
    }

    /// Writes a configuration file holding the default options into `dir`.
    ///
    /// # Errors
    /// * `Error::InvalidPath` if `dir` is not a directory
    /// * `Error::ConfigError` if a configuration file already exists
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        ensure_dir(dir)?;

        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Err(Error::ConfigError(format!(
                "Configuration file {CONFIG_FILE} already exists"
            )));
        }

        let content = serde_json::to_string_pretty(&Self::default())?;
        fs::write(&config_path, content)?;
        debug!("Created configuration file {}", config_path.display());
        Ok(config_path)
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Error::InvalidPath {
            path: dir.display().to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        })
    }
}
