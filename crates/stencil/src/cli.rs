//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// stencil - scaffold projects from local or hosted git templates
#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a config file (default: ~/.stencil/config.yaml)
    #[arg(short, long, global = true, env = "STENCIL_CONFIG")]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a project from a template
    Create(CreateArgs),

    /// Show how a template source is interpreted
    Inspect(InspectArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show build information and the versions of git and the package managers
    Version(VersionArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// Create command
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Template: owner/repo, github:owner/repo, a git URL, or a local directory
    pub source: String,

    /// Directory to create the project in (default: current directory)
    pub path: Option<Utf8PathBuf>,

    /// Install with yarn Plug'n'Play when a recent enough yarn is available
    #[arg(long, alias = "alternate-mode")]
    pub pnp: bool,

    /// Skip dependency installation
    #[arg(long)]
    pub skip_install: bool,
}

// Inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Template source to classify
    pub source: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Config commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show resolved configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Version command
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// Completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script into this directory instead of stdout
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,
}
