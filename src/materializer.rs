//! Propagation and suppression of collected templates.
//! Substitutes the bound placeholders into destinations and contents, then
//! writes the results to disk or deletes what an earlier run wrote.

use crate::collector::{Bindings, Templates};
use crate::error::Result;
use crate::placeholder::Scanner;
use indexmap::IndexSet;
use log::{debug, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Per-file notification emitted while materializing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Propagating(String),
    Suppressing(String),
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Propagating(dest) => write!(f, "Propagating {dest}"),
            Progress::Suppressing(dest) => write!(f, "Suppressing {dest}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Propagated,
    Suppressed,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Propagated => write!(f, "propagated"),
            Action::Suppressed => write!(f, "suppressed"),
        }
    }
}

/// Outcome of a propagate or suppress pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub action: Action,
    /// Distinct destinations written or deleted.
    pub processed: usize,
    /// Templates in the set.
    pub total: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} files {}.", self.processed, self.total, self.action)
    }
}

/// Applies bindings to a template set. Relative destinations are resolved
/// against `root`.
pub struct Materializer<'a> {
    templates: &'a Templates,
    bindings: &'a Bindings,
    scanner: &'a Scanner,
    root: PathBuf,
}

impl<'a> Materializer<'a> {
    pub fn new<P: Into<PathBuf>>(
        templates: &'a Templates,
        bindings: &'a Bindings,
        scanner: &'a Scanner,
        root: P,
    ) -> Self {
        Self { templates, bindings, scanner, root: root.into() }
    }

    /// Writes every template with all bound placeholders substituted.
    ///
    /// Destinations that still hold a placeholder after substitution are
    /// skipped. Existing files are overwritten.
    ///
    /// # Errors
    /// * `Error::IoError` if a directory cannot be created or a file written
    pub fn propagate<F: FnMut(&Progress)>(&self, mut on_progress: F) -> Result<Summary> {
        let mut propagated = IndexSet::new();

        for (pattern, template) in self.templates {
            let mut destination = pattern.clone();
            let mut content = template.content.clone();

            for (token, value) in self.bindings {
                if destination.contains(token.as_str()) {
                    destination = destination.replace(token.as_str(), value);
                }
                if content.contains(token.as_str()) {
                    content = content.replace(token.as_str(), value);
                }
            }

            if self.scanner.contains(&destination) {
                warn!("Skipping '{pattern}': destination '{destination}' is unresolved");
                continue;
            }

            if !propagated.contains(&destination) {
                on_progress(&Progress::Propagating(destination.clone()));
            }
            write_file(&self.resolve(&destination), &content)?;
            propagated.insert(destination);
        }

        Ok(Summary {
            action: Action::Propagated,
            processed: propagated.len(),
            total: self.templates.len(),
        })
    }

    /// Deletes the files at the destinations of every template.
    ///
    /// Each substitution step is checked, so a file sitting at a partially
    /// resolved destination is removed as well. Missing files are ignored.
    ///
    /// # Errors
    /// * `Error::IoError` if an existing file cannot be removed
    pub fn suppress<F: FnMut(&Progress)>(&self, mut on_progress: F) -> Result<Summary> {
        let mut suppressed = IndexSet::new();

        for pattern in self.templates.keys() {
            let mut destination = pattern.clone();
            let mut substituted = false;

            for (token, value) in self.bindings {
                if !destination.contains(token.as_str()) {
                    continue;
                }
                destination = destination.replace(token.as_str(), value);
                substituted = true;
                self.remove_once(&destination, &mut suppressed, &mut on_progress)?;
            }

            if !substituted {
                self.remove_once(&destination, &mut suppressed, &mut on_progress)?;
            }
        }

        Ok(Summary {
            action: Action::Suppressed,
            processed: suppressed.len(),
            total: self.templates.len(),
        })
    }

    fn remove_once<F: FnMut(&Progress)>(
        &self,
        destination: &str,
        suppressed: &mut IndexSet<String>,
        on_progress: &mut F,
    ) -> Result<()> {
        let path = self.resolve(destination);
        if !path.is_file() {
            return Ok(());
        }
        if !suppressed.contains(destination) {
            on_progress(&Progress::Suppressing(destination.to_string()));
        }
        debug!("Removing {}", path.display());
        fs::remove_file(&path)?;
        suppressed.insert(destination.to_string());
        Ok(())
    }

    fn resolve(&self, destination: &str) -> PathBuf {
        self.root.join(destination)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            fs::create_dir_all(parent)?;
        }
    }
    debug!("Writing {}", path.display());
    fs::write(path, content)?;
    Ok(())
}
