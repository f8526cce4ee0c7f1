//! Nebula propagates files from templates and suppresses them again.
//! Template filenames carry their destination, and `{{variable}}`
//! placeholders in names and contents are filled in from user answers.

/// Command-line interface module for the Nebula application
pub mod cli;

/// Template discovery and placeholder binding
pub mod collector;

/// Configuration handling for template directories (nebula.json)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for the Nebula application
pub mod error;

/// Writing and deleting materialized files
pub mod materializer;

/// Placeholder pattern matching
pub mod placeholder;

/// User input and interaction handling
pub mod prompt;
