//! Directory pruning rules for the project scan.

use std::collections::HashSet;
use std::path::Path;

use crate::util::PathKey;

/// Decides which directories the project scan descends into.
///
/// A directory is skipped, with its whole subtree, when its name starts with
/// `.` or when its absolute path is in the ignore set. Both checks ignore case.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    ignored: HashSet<PathKey>,
}

impl PathFilter {
    /// Create a filter from absolute paths to ignore.
    pub fn new<I, P>(ignored: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        PathFilter {
            ignored: ignored
                .into_iter()
                .map(|p| PathKey::new(p.as_ref()))
                .collect(),
        }
    }

    /// Hidden (dot-prefixed) names, used by version control and IDE metadata.
    pub fn is_hidden(dir: &Path) -> bool {
        dir.file_name()
            .map(|name| name.to_string_lossy().starts_with('.'))
            .unwrap_or(false)
    }

    pub fn is_ignored(&self, dir: &Path) -> bool {
        self.ignored.contains(&PathKey::new(dir))
    }

    /// Whether the scan should enter `dir`.
    pub fn allows(&self, dir: &Path) -> bool {
        if Self::is_hidden(dir) {
            tracing::info!("Ignoring hidden path {}", dir.display());
            return false;
        }
        if self.is_ignored(dir) {
            tracing::info!("Ignoring path {}", dir.display());
            return false;
        }
        true
    }

    pub fn ignored_count(&self) -> usize {
        self.ignored.len()
    }
}
