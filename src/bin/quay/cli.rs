//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// quay - resolve Pipfile index sources into pip arguments
#[derive(Parser)]
#[command(name = "quay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the merged, ordered index sources
    Sources(SourcesArgs),

    /// Print the pip arguments for the merged sources
    PipArgs(SourcesArgs),

    /// Show the indexes a single requirement is installed from
    Resolve(ResolveArgs),

    /// Check index directives in a requirements file
    Lint(LintArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Index flags shared by every resolving command.
#[derive(Args, Clone)]
pub struct IndexArgs {
    /// Primary index URL or [[source]] name
    #[arg(short = 'i', long = "index-url", value_name = "INDEX")]
    pub index: Option<String>,

    /// Extra index URL or [[source]] name (repeatable)
    #[arg(long = "extra-index-url", value_name = "INDEX")]
    pub extra_index_url: Vec<String>,

    /// Host to exempt from TLS verification (repeatable)
    #[arg(long = "trusted-host", value_name = "HOST")]
    pub trusted_host: Vec<String>,

    /// Mirror to use in place of the public PyPI index
    #[arg(long, env = "PIPENV_PYPI_MIRROR", value_name = "URL")]
    pub pypi_mirror: Option<String>,

    /// Path to the Pipfile
    #[arg(long, default_value = "Pipfile")]
    pub pipfile: PathBuf,
}

#[derive(Args)]
pub struct SourcesArgs {
    #[command(flatten)]
    pub index: IndexArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Requirement name
    pub name: String,

    /// The requirement's own index
    #[arg(long, value_name = "INDEX")]
    pub req_index: Option<String>,

    /// The requirement's own extra index (repeatable)
    #[arg(long, value_name = "INDEX")]
    pub req_extra_index: Vec<String>,

    #[command(flatten)]
    pub index: IndexArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LintArgs {
    /// Requirements file to check
    pub file: PathBuf,

    /// Reject lines that combine index directives
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
