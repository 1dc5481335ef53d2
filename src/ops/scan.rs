//! Scanning a repository into a workspace.

use std::path::{Path, PathBuf};

use crate::core::{Diagnostics, FailedProject, Language, ProjectLoader, Workspace};
use crate::resolver::find_duplicate_identities;
use crate::scan::{PathFilter, RepositoryScanner, ScanError};
use crate::util::fs::absolute;
use crate::util::Config;

/// Options for scanning.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Roots searched for project files; empty means the current directory.
    pub source_paths: Vec<PathBuf>,

    /// Roots searched for precompiled libraries.
    pub precompiled_paths: Vec<PathBuf>,

    /// Directories excluded from the project search.
    pub ignore_paths: Vec<PathBuf>,

    /// Selects the project file pattern.
    pub language: Language,

    /// Project file name pattern overriding the language's default.
    pub pattern: Option<String>,
}

impl ScanOptions {
    pub fn from_config(config: &Config) -> Self {
        ScanOptions {
            source_paths: config.scan.source_paths.clone(),
            precompiled_paths: config.scan.precompiled_paths.clone(),
            ignore_paths: config.scan.ignore_paths.clone(),
            language: config.language(),
            pattern: config.scan.pattern.clone(),
        }
    }
}

/// Scan the configured roots and load every project file found.
///
/// Project files that fail to load are kept as [`FailedProject`]s and the
/// scan moves on. Only filesystem failures while walking abort the scan.
pub fn scan_workspace(
    opts: &ScanOptions,
    loader: &dyn ProjectLoader,
    diagnostics: &mut Diagnostics,
) -> Result<Workspace, ScanError> {
    let source_paths = if opts.source_paths.is_empty() {
        vec![absolute_root(Path::new("."))?]
    } else {
        absolute_roots(&opts.source_paths)?
    };
    let precompiled_paths = absolute_roots(&opts.precompiled_paths)?;
    let ignore_paths = absolute_roots(&opts.ignore_paths)?;

    let filter = PathFilter::new(&ignore_paths);
    let scanner = match &opts.pattern {
        Some(pattern) => RepositoryScanner::with_pattern(pattern, filter)?,
        None => RepositoryScanner::new(opts.language, filter)?,
    };

    let found = scanner.scan(&source_paths, &precompiled_paths, diagnostics)?;

    let mut projects = Vec::with_capacity(found.project_paths.len());
    let mut failed = Vec::new();
    for path in found.project_paths {
        match loader.load(&path) {
            Ok(project) => {
                tracing::debug!("Loaded {} ({})", project.name(), project.guid());
                projects.push(project);
            }
            Err(e) => {
                tracing::error!("Failed to load project {}: {}", path.display(), e);
                failed.push(FailedProject::new(path, e.to_string()));
            }
        }
    }

    let duplicates = find_duplicate_identities(&projects);

    tracing::info!(
        "Loaded {} projects ({} failed)",
        projects.len(),
        failed.len()
    );

    Ok(Workspace::new(projects, failed, found.libraries, duplicates))
}

fn absolute_root(path: &Path) -> Result<PathBuf, ScanError> {
    absolute(path).map_err(|source| ScanError::Path {
        path: path.to_path_buf(),
        source,
    })
}

fn absolute_roots(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ScanError> {
    paths.iter().map(|p| absolute_root(p)).collect()
}
