//! Common constants used throughout the Nebula application.

/// Name of the per-directory configuration file
pub const CONFIG_FILE: &str = "nebula.json";

/// Extension that marks a file as a template
pub const DEFAULT_EXTENSION: &str = "neb";

/// Matches `{{name}}`, non-greedy, across line breaks
pub const DEFAULT_VARIABLE_MATCH_REGEX: &str = r"(?s)\{\{(.*?)\}\}";

/// Printed in the banner and the CLI about text
pub const DESCRIPTION: &str = "A CLI tool to easily suppress and propagate file descendants.";
