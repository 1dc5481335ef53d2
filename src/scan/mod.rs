//! Repository scanning.
//!
//! Walks source roots for project files and library roots for precompiled
//! libraries. Any filesystem failure while walking is fatal for the run;
//! problems with individual files are left to later phases.

pub mod filter;
pub mod libraries;
pub mod scanner;

pub use filter::PathFilter;
pub use libraries::LibrarySet;
pub use scanner::{RepositoryScanner, ScanOutput, LIBRARY_PATTERN};

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A filesystem failure that aborts a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot scan {}: {source}", path.display())]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot scan {}: not a directory", path.display())]
    NotADirectory { path: PathBuf },

    #[error("failed to read {} while scanning: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid file pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("cannot resolve {}: {source}", path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    fn walk(root: &Path, source: walkdir::Error) -> Self {
        ScanError::Walk {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        }
    }
}
