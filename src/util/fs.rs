//! Filesystem and path utilities.
//!
//! Project files come from case-insensitive filesystems and spell their
//! paths with backslashes, so every path the engine compares goes through
//! [`PathKey`] rather than being compared as a raw `PathBuf`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Serialize, Serializer};

/// Lexically normalize a path: drop `.` components and fold `..` into
/// their parent. Symlinks are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match out.components().next_back() {
                    Some(Component::Normal(_)) => out.pop(),
                    _ => false,
                };
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Make a path absolute against the current directory, then normalize it.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(&std::env::current_dir()?.join(path)))
    }
}

/// Make a path absolute against an explicit base directory.
pub fn absolute_from(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Convert a path as written inside a project file into an absolute host path.
///
/// MSBuild paths use `\` separators and are relative to the project directory.
pub fn msbuild_path(project_dir: &Path, raw: &str) -> PathBuf {
    let raw = raw.trim();
    let host: String = if std::path::MAIN_SEPARATOR == '\\' {
        raw.to_string()
    } else {
        raw.replace('\\', "/")
    };
    absolute_from(project_dir, Path::new(&host))
}

/// Case-insensitive comparison key for an absolute path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey(String);

impl PathKey {
    pub fn new(path: &Path) -> Self {
        PathKey(normalize(path).to_string_lossy().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Path> for PathKey {
    fn from(path: &Path) -> Self {
        PathKey::new(path)
    }
}

impl From<&PathBuf> for PathKey {
    fn from(path: &PathBuf) -> Self {
        PathKey::new(path)
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for PathKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write bytes to a file, creating parent directories if needed.
pub fn write_bytes(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}
