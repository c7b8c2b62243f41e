//! quay CLI - package-index source resolution for pip

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use quay::util::diagnostic;
use quay::IndexError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color;

    if let Err(e) = run(cli) {
        match e.downcast_ref::<IndexError>() {
            Some(index_err) => diagnostic::emit(&index_err.to_diagnostic(), color),
            None => eprintln!("error: {:#}", e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("quay=debug")
    } else {
        EnvFilter::new("quay=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let color = !cli.no_color;

    // Execute command
    match cli.command {
        Commands::Sources(args) => commands::sources::execute(args),
        Commands::PipArgs(args) => commands::pip_args::execute(args),
        Commands::Resolve(args) => commands::resolve::execute(args),
        Commands::Lint(args) => commands::lint::execute(args, color),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
