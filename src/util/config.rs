//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.slnweave/config.toml` - User-wide defaults
//! - Project: `./slnweave.toml` - Repository-specific settings
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both. Relative paths in a config file are
//! relative to the directory containing that file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{Configuration, Language};
use crate::util::fs::{absolute, absolute_from, read_to_string};

/// Name of the project configuration file.
pub const CONFIG_FILE_NAME: &str = "slnweave.toml";

/// Default name of the generated build file.
pub const DEFAULT_OUTPUT: &str = "build.proj";

/// slnweave configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// What to scan
    pub scan: ScanConfig,

    /// How to resolve and what to write
    pub build: BuildConfig,
}

/// Scan settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScanConfig {
    /// Directories searched for project files
    pub source_paths: Vec<PathBuf>,

    /// Directories searched for precompiled libraries
    pub precompiled_paths: Vec<PathBuf>,

    /// Directories excluded from the project search
    pub ignore_paths: Vec<PathBuf>,

    /// Project language (cs, vb)
    pub language: Option<Language>,

    /// Project file name pattern, overriding the language's default
    pub pattern: Option<String>,
}

/// Resolution and output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build configuration whose outputs are authoritative (debug, release)
    pub configuration: Option<Configuration>,

    /// Generated build file
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file, making its paths absolute.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        let base = path.parent().unwrap_or(Path::new("."));
        let base = absolute(base)
            .with_context(|| format!("failed to resolve directory of {}", path.display()))?;
        config.rebase(&base);
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        let rebase_all =
            |paths: &mut Vec<PathBuf>| paths.iter_mut().for_each(|p| *p = absolute_from(base, p));
        rebase_all(&mut self.scan.source_paths);
        rebase_all(&mut self.scan.precompiled_paths);
        rebase_all(&mut self.scan.ignore_paths);
        if let Some(output) = self.build.output.as_mut() {
            *output = absolute_from(base, output);
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if !other.scan.source_paths.is_empty() {
            self.scan.source_paths = other.scan.source_paths;
        }
        if !other.scan.precompiled_paths.is_empty() {
            self.scan.precompiled_paths = other.scan.precompiled_paths;
        }
        if !other.scan.ignore_paths.is_empty() {
            self.scan.ignore_paths = other.scan.ignore_paths;
        }
        if other.scan.language.is_some() {
            self.scan.language = other.scan.language;
        }
        if other.scan.pattern.is_some() {
            self.scan.pattern = other.scan.pattern;
        }

        if other.build.configuration.is_some() {
            self.build.configuration = other.build.configuration;
        }
        if other.build.output.is_some() {
            self.build.output = other.build.output;
        }
    }

    pub fn language(&self) -> Language {
        self.scan.language.unwrap_or_default()
    }

    pub fn configuration(&self) -> Configuration {
        self.build.configuration.unwrap_or_default()
    }

    pub fn output(&self) -> PathBuf {
        self.build
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

/// Get the global slnweave config directory (~/.slnweave).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".slnweave"))
}

/// Get the global config path (~/.slnweave/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config
/// 2. Global config
/// 3. Defaults
///
/// A missing file is skipped; a file that exists but does not parse is an
/// error.
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load(global_path)?);
        }
    }

    if project_path.exists() {
        config.merge(Config::load(project_path)?);
    }

    Ok(config)
}
