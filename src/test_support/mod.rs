//! Test utilities and mocks for slnweave unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use slnweave::test_support::{guid, MockLoader};
//!
//! #[test]
//! fn test_example() {
//!     let loader = MockLoader::new()
//!         .with_project(Project::new(guid(1), "/src/A/A.csproj"))
//!         .with_failure("/src/B/B.csproj", "unexpected end of file");
//!     // Use the loader with ops::scan_workspace...
//! }
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use uuid::Uuid;

use crate::core::{LoadError, Project, ProjectGuid, ProjectLoader};

// Re-export fixtures for convenience
pub use fixtures::*;

/// A temporary directory the scanner does not treat as hidden.
///
/// `TempDir::new()` names directories `.tmpXXXX`, which the hidden-directory
/// rule would prune.
pub fn temp_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("slnweave-")
        .tempdir()
        .expect("failed to create temp dir")
}

/// A deterministic project identity.
pub fn guid(n: u128) -> ProjectGuid {
    ProjectGuid::new(Uuid::from_u128(n))
}

/// Map-backed project loader.
///
/// Paths with a registered project load successfully, paths with a
/// registered failure fail with that message, and anything else fails as
/// unreadable.
#[derive(Debug, Clone, Default)]
pub struct MockLoader {
    projects: HashMap<PathBuf, Project>,
    failures: HashMap<PathBuf, String>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project under its own path.
    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.insert(project.path().to_path_buf(), project);
        self
    }

    /// Register a parse failure for a path.
    pub fn with_failure(mut self, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        self.failures.insert(path.into(), message.into());
        self
    }
}

impl ProjectLoader for MockLoader {
    fn load(&self, path: &Path) -> Result<Project, LoadError> {
        if let Some(project) = self.projects.get(path) {
            return Ok(project.clone());
        }
        let message = self
            .failures
            .get(path)
            .cloned()
            .unwrap_or_else(|| "no such project".to_string());
        Err(LoadError::Invalid {
            path: path.to_path_buf(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_is_not_hidden() {
        let tmp = temp_dir();
        let name = tmp.path().file_name().unwrap().to_string_lossy();
        assert!(!name.starts_with('.'));
    }

    #[test]
    fn test_mock_loader() {
        let loader = MockLoader::new()
            .with_project(Project::new(guid(1), "/src/A/A.csproj"))
            .with_failure("/src/B/B.csproj", "bad xml");

        assert_eq!(loader.load(Path::new("/src/A/A.csproj")).unwrap().guid(), guid(1));
        let err = loader.load(Path::new("/src/B/B.csproj")).unwrap_err();
        assert!(err.to_string().contains("bad xml"));
        assert!(loader.load(Path::new("/src/C/C.csproj")).is_err());
    }
}
