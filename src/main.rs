//! Nebula's main application entry point and orchestration logic.
//! Handles command-line argument parsing, template collection and
//! coordinates propagation or suppression of the collected files.

use std::io::IsTerminal;

use nebula::{
    cli::{get_args, Action, Args},
    collector::Collector,
    config::Config,
    constants::DESCRIPTION,
    error::{default_error_handler, Result},
    materializer::{Materializer, Progress},
    prompt::{DialoguerResolver, LineResolver, PresetResolver, VariableResolver},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn print_banner() {
    println!("Nebula | {}\n", env!("CARGO_PKG_VERSION"));
    println!("    {DESCRIPTION}\n");
}

/// Picks the resolver chain: preset answers first, then the terminal prompt
/// or plain line reading when stdin is piped.
fn build_resolver(args: &Args) -> Result<Box<dyn VariableResolver>> {
    let interactive: Box<dyn VariableResolver> = if std::io::stdin().is_terminal() {
        Box::new(DialoguerResolver::new())
    } else {
        Box::new(LineResolver::stdio())
    };

    match &args.answers {
        Some(path) => Ok(Box::new(PresetResolver::from_file(path, interactive)?)),
        None => Ok(interactive),
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Creates the configuration file and stops, for the `config` action
/// 2. Collects templates and asks for their variables
/// 3. Propagates or suppresses the resulting destinations
fn run(args: Args) -> Result<()> {
    print_banner();

    if args.action == Action::Config {
        let created = Config::create(&args.path)?;
        println!("Created {}", created.display());
        return Ok(());
    }

    let output_root = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let mut resolver = build_resolver(&args)?;
    let mut collector = Collector::new(Config::default(), resolver.as_mut())?;
    collector.consume(&args.path, args.deep())?;

    let materializer = Materializer::new(
        collector.templates(),
        collector.bindings(),
        collector.scanner(),
        output_root,
    );

    println!();
    let print_progress = |progress: &Progress| println!("{progress}");
    let summary = match args.action {
        Action::Suppress => materializer.suppress(print_progress)?,
        _ => materializer.propagate(print_progress)?,
    };
    println!();
    println!("{summary}");
    Ok(())
}
