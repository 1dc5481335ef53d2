//! slnweave CLI - cross-references .NET project files

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(2);
        }
    }
}

fn run() -> Result<i32> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("slnweave=debug")
    } else {
        EnvFilter::new("slnweave=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .without_time()
        .init();

    let global = commands::GlobalArgs {
        config: cli.config,
        color: !cli.no_color,
    };

    // Execute command
    match cli.command {
        Commands::Check(args) => commands::check::execute(args, &global),
        Commands::Generate(args) => commands::generate::execute(args, &global),
        Commands::Tree(args) => commands::tree::execute(args, &global),
        Commands::Completions(args) => commands::completions::execute(args).map(|()| 0),
    }
}
