//! Error handling for the Nebula application.
//! Defines custom error types and results used throughout the application.

use std::io;
use thiserror::Error as ThisError;

/// Custom error types for Nebula operations.
///
/// Every variant aborts the current top-level operation; nothing in the
/// library recovers from them.
#[derive(ThisError, Debug)]
pub enum Error {
    /// The given path is neither a directory nor a template file.
    #[error("Only [.{extension}] files and directories are supported, got '{path}'.")]
    InvalidPath { path: String, extension: String },

    /// The template filename yields nothing once its markers are removed.
    #[error("Failed to parse destination name of file '{path}'.")]
    EmptyDestination { path: String },

    /// The template file has zero length.
    #[error("File '{path}' is empty.")]
    EmptyFile { path: String },

    /// The template file exists but could not be read as text.
    #[error("Failed to read file '{path}'.")]
    ReadFailure {
        path: String,
        #[source]
        source: io::Error,
    },

    /// No usable value could be obtained for a placeholder.
    #[error("Failed to assign a value to variable [{name}].")]
    VariableResolutionFailure { name: String },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors that occur while reading JSON documents
    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Renders the error followed by its source chain, one indented line per cause.
pub fn format_error_chain(err: &Error) -> String {
    let mut message = format!("error: {err}");
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(&format!("\n    {cause}"));
        source = cause.source();
    }
    message
}

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error chain to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", format_error_chain(&err));
    std::process::exit(1);
}
