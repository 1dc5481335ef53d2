//! Command implementations

pub mod check;
pub mod completions;
pub mod generate;
pub mod tree;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::ScanArgs;
use slnweave::core::{Configuration, Language, MsBuildReader, Report};
use slnweave::ops::{run, Analysis, RunOptions};
use slnweave::util::config::{
    global_config_path, load_config, BuildConfig, Config, ScanConfig, CONFIG_FILE_NAME,
};
use slnweave::util::diagnostic::suggestions;

/// Flags every command sees.
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub color: bool,
}

impl GlobalArgs {
    /// Color for diagnostics printed to stderr.
    pub fn stderr_color(&self) -> bool {
        self.color && std::io::stderr().is_terminal()
    }
}

/// Load configuration, global then project, with `--config` replacing the
/// project file.
pub fn load(global: &GlobalArgs) -> Result<Config> {
    let project_path = global
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    if global.config.is_some() && !project_path.exists() {
        anyhow::bail!("config file not found: {}", project_path.display());
    }
    load_config(global_config_path().as_deref(), &project_path)
}

/// Apply command-line scan flags on top of the loaded configuration.
pub fn apply_scan_args(config: &mut Config, args: ScanArgs) {
    let overrides = Config {
        scan: ScanConfig {
            source_paths: args.sources,
            precompiled_paths: args.precompiled,
            ignore_paths: args.ignore,
            language: args.language,
            pattern: None,
        },
        build: BuildConfig {
            configuration: args
                .configuration
                .or(args.release.then_some(Configuration::Release)),
            output: None,
        },
    };
    config.merge(overrides);
}

/// Warn on stderr when a run found no project files at all.
pub fn warn_if_empty(config: &Config, report: &Report) {
    if report.projects > 0 || !report.failed_projects.is_empty() {
        return;
    }
    eprintln!("warning: no project files found");
    for hint in empty_scan_hints(config) {
        eprintln!("{}", hint);
    }
}

fn empty_scan_hints(config: &Config) -> Vec<&'static str> {
    let mut hints = Vec::new();
    if config.scan.source_paths.is_empty() {
        hints.push(suggestions::NO_SOURCES);
    }
    if config.scan.pattern.is_none() && config.language() == Language::CSharp {
        hints.push(suggestions::WRONG_LANGUAGE);
    }
    hints
}

/// Scan and resolve with the effective configuration.
pub fn analyze(config: &Config) -> Result<Analysis> {
    let opts = RunOptions::from_config(config);
    tracing::debug!(
        "Scanning {} source roots for {} projects ({} configuration)",
        opts.scan.source_paths.len().max(1),
        opts.scan.language,
        opts.configuration
    );
    run(&opts, &MsBuildReader::new()).context("scan failed")
}
