//! Recursive discovery of project files and precompiled libraries.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::{DirEntry, WalkDir};

use crate::core::{Diagnostics, Issue, Language};
use crate::scan::{LibrarySet, PathFilter, ScanError};
use crate::util::PathKey;

/// File name pattern for precompiled libraries.
pub const LIBRARY_PATTERN: &str = "*.dll";

/// Project files whose name starts with this are editor temporaries.
const TEMPORARY_MARKER: char = '~';

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Paths found by one scan.
#[derive(Debug, Default)]
pub struct ScanOutput {
    /// Absolute project file paths, each once, in discovery order.
    pub project_paths: Vec<PathBuf>,
    /// Precompiled libraries.
    pub libraries: LibrarySet,
}

/// Walks source and library roots.
#[derive(Debug, Clone)]
pub struct RepositoryScanner {
    filter: PathFilter,
    project_pattern: Pattern,
    library_pattern: Pattern,
}

impl RepositoryScanner {
    /// Scanner for the given language's project files.
    pub fn new(language: Language, filter: PathFilter) -> Result<Self, ScanError> {
        Self::with_pattern(language.project_pattern(), filter)
    }

    /// Scanner for project files matching an explicit file name pattern.
    pub fn with_pattern(pattern: &str, filter: PathFilter) -> Result<Self, ScanError> {
        let project_pattern = Pattern::new(pattern).map_err(|source| ScanError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        let library_pattern =
            Pattern::new(LIBRARY_PATTERN).map_err(|source| ScanError::Pattern {
                pattern: LIBRARY_PATTERN.to_string(),
                source,
            })?;

        Ok(RepositoryScanner {
            filter,
            project_pattern,
            library_pattern,
        })
    }

    pub fn project_pattern(&self) -> &str {
        self.project_pattern.as_str()
    }

    /// Scan every source root for project files and every library root for
    /// precompiled libraries. All roots must be absolute.
    pub fn scan(
        &self,
        source_roots: &[PathBuf],
        library_roots: &[PathBuf],
        diagnostics: &mut Diagnostics,
    ) -> Result<ScanOutput, ScanError> {
        let mut output = ScanOutput::default();

        // Overlapping roots find the same file more than once.
        let mut seen = HashSet::new();
        for root in source_roots {
            for path in self.find_projects(root)? {
                if seen.insert(PathKey::new(&path)) {
                    output.project_paths.push(path);
                }
            }
        }
        for root in library_roots {
            self.find_libraries(root, &mut output.libraries, diagnostics)?;
        }

        tracing::info!(
            "Found {} project files and {} precompiled libraries",
            output.project_paths.len(),
            output.libraries.len()
        );

        Ok(output)
    }

    /// Project files under `root`, skipping hidden and ignored subtrees.
    ///
    /// Files in a directory come before the contents of its subdirectories.
    pub fn find_projects(&self, root: &Path) -> Result<Vec<PathBuf>, ScanError> {
        check_root(root)?;
        tracing::debug!("Searching for {} files in {}", self.project_pattern, root.display());

        let mut found = Vec::new();
        let walker = walk(root)
            .into_iter()
            .filter_entry(|entry| !entry.file_type().is_dir() || self.filter.allows(entry.path()));

        for entry in walker {
            let entry = entry.map_err(|e| ScanError::walk(root, e))?;
            if entry.file_type().is_dir() {
                tracing::debug!("Dir={}", entry.path().display());
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if name.starts_with(TEMPORARY_MARKER)
                || !self.project_pattern.matches_with(&name, MATCH_OPTIONS)
            {
                continue;
            }
            found.push(entry.into_path());
        }

        Ok(found)
    }

    /// Add every library under `root` to `libraries`.
    ///
    /// A library that is already in the set is recorded as an issue and not
    /// added again.
    pub fn find_libraries(
        &self,
        root: &Path,
        libraries: &mut LibrarySet,
        diagnostics: &mut Diagnostics,
    ) -> Result<(), ScanError> {
        check_root(root)?;
        tracing::debug!("Searching for libraries in {}", root.display());

        for entry in walk(root) {
            let entry = entry.map_err(|e| ScanError::walk(root, e))?;
            if entry.file_type().is_dir()
                || !self
                    .library_pattern
                    .matches_with(&entry.file_name().to_string_lossy(), MATCH_OPTIONS)
            {
                continue;
            }

            let path = entry.into_path();
            if libraries.contains(&path) {
                diagnostics.record(Issue::DuplicateLibrary { path });
            } else {
                tracing::debug!("Library={}", path.display());
                libraries.insert(path);
            }
        }

        Ok(())
    }
}

fn check_root(root: &Path) -> Result<(), ScanError> {
    let metadata = std::fs::metadata(root).map_err(|source| ScanError::Root {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Depth-first walk where each directory lists its files before its
/// subdirectories, siblings in name order.
fn walk(root: &Path) -> WalkDir {
    WalkDir::new(root)
        .follow_links(false)
        .sort_by(files_first)
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use crate::test_support::temp_dir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn scanner(ignored: &[PathBuf]) -> RepositoryScanner {
        RepositoryScanner::new(Language::CSharp, PathFilter::new(ignored)).unwrap()
    }

    #[test]
    fn test_find_projects_skips_hidden_ignored_and_temporary() {
        let tmp = temp_dir();
        let root = tmp.path();
        touch(&root.join("App/App.csproj"));
        touch(&root.join("App/~App.csproj"));
        touch(&root.join("App/App.vbproj"));
        touch(&root.join("Lib/Lib.CSPROJ"));
        touch(&root.join(".git/Hidden.csproj"));
        touch(&root.join("Legacy/Old/Old.csproj"));

        let found = scanner(&[root.join("legacy")]).find_projects(root).unwrap();

        assert_eq!(
            found,
            vec![root.join("App/App.csproj"), root.join("Lib/Lib.CSPROJ")]
        );
    }

    #[test]
    fn test_find_projects_lists_files_before_subdirectories() {
        let tmp = temp_dir();
        let root = tmp.path();
        touch(&root.join("b/Inner.csproj"));
        touch(&root.join("Z.csproj"));
        touch(&root.join("a/A.csproj"));

        let found = scanner(&[]).find_projects(root).unwrap();

        assert_eq!(
            found,
            vec![
                root.join("Z.csproj"),
                root.join("a/A.csproj"),
                root.join("b/Inner.csproj"),
            ]
        );
    }

    #[test]
    fn test_hidden_root_is_skipped() {
        let tmp = temp_dir();
        let root = tmp.path().join(".hidden");
        touch(&root.join("App.csproj"));

        assert!(scanner(&[]).find_projects(&root).unwrap().is_empty());
    }

    #[test]
    fn test_visual_basic_pattern() {
        let tmp = temp_dir();
        touch(&tmp.path().join("App.csproj"));
        touch(&tmp.path().join("Tool.vbproj"));

        let vb = RepositoryScanner::new(Language::VisualBasic, PathFilter::default()).unwrap();
        assert_eq!(vb.find_projects(tmp.path()).unwrap(), vec![tmp.path().join("Tool.vbproj")]);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let tmp = temp_dir();
        let err = scanner(&[]).find_projects(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ScanError::Root { .. }));
    }

    #[test]
    fn test_file_root_is_fatal() {
        let tmp = temp_dir();
        let file = tmp.path().join("App.csproj");
        touch(&file);
        let err = scanner(&[]).find_projects(&file).unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory { .. }));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = RepositoryScanner::with_pattern("[*.csproj", PathFilter::default()).unwrap_err();
        assert!(matches!(err, ScanError::Pattern { .. }));
    }

    #[test]
    fn test_overlapping_library_roots_report_duplicates() {
        let tmp = temp_dir();
        let libs = tmp.path().join("libs");
        touch(&libs.join("Acme.dll"));
        touch(&libs.join("vendor/Vendor.DLL"));
        touch(&libs.join("vendor/readme.txt"));
        touch(&libs.join(".cache/Cached.dll"));

        let mut diags = Diagnostics::new();
        let output = scanner(&[])
            .scan(&[], &[libs.clone(), libs.join("vendor")], &mut diags)
            .unwrap();

        // The library scan does not prune hidden directories.
        assert_eq!(output.libraries.len(), 3);
        assert!(output.libraries.contains(&libs.join("vendor/Vendor.DLL")));
        assert_eq!(
            diags.issues(),
            &[Issue::DuplicateLibrary {
                path: libs.join("vendor/Vendor.DLL")
            }]
        );
    }

    #[test]
    fn test_overlapping_source_roots_list_projects_once() {
        let tmp = temp_dir();
        let src = tmp.path().join("src");
        touch(&src.join("App/App.csproj"));
        touch(&src.join("Core/Core.csproj"));

        let mut diags = Diagnostics::new();
        let output = scanner(&[])
            .scan(&[src.join("App"), src.clone()], &[], &mut diags)
            .unwrap();

        assert_eq!(
            output.project_paths,
            vec![src.join("App/App.csproj"), src.join("Core/Core.csproj")]
        );
        assert!(diags.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = temp_dir();
        let root = tmp.path();
        touch(&root.join("App/App.csproj"));
        let locked = root.join("Locked");
        touch(&locked.join("Secret.csproj"));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop a privileged user.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = scanner(&[]).find_projects(root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let err = result.unwrap_err();
        assert!(matches!(err, ScanError::Walk { ref path, .. } if path == &locked));
    }

    #[test]
    fn test_scan_is_repeatable() {
        let tmp = temp_dir();
        touch(&tmp.path().join("x/X.csproj"));
        touch(&tmp.path().join("y/Y.csproj"));
        touch(&tmp.path().join("lib/Y.dll"));

        let s = scanner(&[]);
        let roots = [tmp.path().to_path_buf()];
        let libs = [tmp.path().join("lib")];
        let first = s.scan(&roots, &libs, &mut Diagnostics::new()).unwrap();
        let second = s.scan(&roots, &libs, &mut Diagnostics::new()).unwrap();

        assert_eq!(first.project_paths, second.project_paths);
        assert_eq!(
            first.libraries.iter().collect::<Vec<_>>(),
            second.libraries.iter().collect::<Vec<_>>()
        );
    }
}
