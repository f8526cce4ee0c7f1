//! Command-line interface implementation for Nebula.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use std::path::PathBuf;

/// What to do with the templates found at the given path.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Propagates files to their destinations
    #[value(alias = "prop")]
    Propagate,
    /// Suppresses files from their destinations
    #[value(alias = "sup")]
    Suppress,
    /// Creates a new configuration file in the template directory
    Config,
}

/// Command-line arguments structure for Nebula.
#[derive(Parser, Debug)]
#[command(author, version, about = crate::constants::DESCRIPTION, long_about = None)]
pub struct Args {
    /// Template file or directory of templates
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Action to perform
    #[arg(value_enum, value_name = "ACTION")]
    pub action: Action,

    /// Only look for variables in template filenames, not in their contents
    #[arg(long)]
    pub shallow: bool,

    /// JSON file with preset variable values, keyed by variable name
    #[arg(short, long, value_name = "FILE")]
    pub answers: Option<PathBuf>,

    /// Directory relative destinations are resolved against
    /// (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Whether templates are scanned for variables in their contents too.
    /// Suppression only needs destinations, so it never scans contents.
    pub fn deep(&self) -> bool {
        self.action == Action::Propagate && !self.shallow
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
