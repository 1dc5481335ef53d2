//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use slnweave::core::{Configuration, Language};

/// slnweave - Cross-reference .NET project files into one MSBuild build file
#[derive(Parser)]
#[command(name = "slnweave")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to ./slnweave.toml)
    #[arg(long, global = true, env = "SLNWEAVE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan and resolve, then report every problem found
    Check(CheckArgs),

    /// Scan and resolve, then write the MSBuild build file
    Generate(GenerateArgs),

    /// Show each project and what its references resolved to
    Tree(TreeArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Options shared by every command that scans.
#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Directory to search for project files (repeatable)
    #[arg(short, long = "source", value_name = "DIR")]
    pub sources: Vec<PathBuf>,

    /// Directory to search for precompiled libraries (repeatable)
    #[arg(short, long = "precompiled", value_name = "DIR")]
    pub precompiled: Vec<PathBuf>,

    /// Directory to leave out of the project search (repeatable)
    #[arg(short, long = "ignore", value_name = "DIR")]
    pub ignore: Vec<PathBuf>,

    /// Project language: cs or vb
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Resolve against Release outputs instead of Debug
    #[arg(short, long, conflicts_with = "configuration")]
    pub release: bool,

    /// Configuration whose outputs references resolve against: debug or release
    #[arg(long, value_name = "NAME")]
    pub configuration: Option<Configuration>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Build file to write (defaults to build.proj)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Fail if any problem was found, after writing the file
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct TreeArgs {
    #[command(flatten)]
    pub scan: ScanArgs,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
