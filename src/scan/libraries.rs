//! The set of precompiled library files found by a scan.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::util::PathKey;

/// Deduplicated library paths, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct LibrarySet {
    paths: Vec<PathBuf>,
    keys: HashSet<PathKey>,
}

impl LibrarySet {
    pub fn new() -> Self {
        LibrarySet::default()
    }

    /// Add a library path. Returns `false` if it was already present.
    pub fn insert(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if !self.keys.insert(PathKey::new(&path)) {
            return false;
        }
        self.paths.push(path);
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.keys.contains(&PathKey::new(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for LibrarySet {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        let mut set = LibrarySet::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}
