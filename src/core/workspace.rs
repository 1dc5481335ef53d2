//! Workspace - everything one scan produced.
//!
//! A Workspace is built from scratch by every scan and never updated in
//! place; rescanning means building a new one.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::core::{FailedProject, Project, ProjectGuid};
use crate::resolver::DuplicateGroup;
use crate::scan::LibrarySet;

/// Position of a project in its workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProjectIdx(pub usize);

impl fmt::Display for ProjectIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Loaded projects, load failures, and known precompiled libraries.
#[derive(Debug, Default)]
pub struct Workspace {
    projects: Vec<Project>,
    failed: Vec<FailedProject>,
    libraries: LibrarySet,
    duplicates: Vec<DuplicateGroup>,
}

impl Workspace {
    pub fn new(
        projects: Vec<Project>,
        failed: Vec<FailedProject>,
        libraries: LibrarySet,
        duplicates: Vec<DuplicateGroup>,
    ) -> Self {
        Workspace {
            projects,
            failed,
            libraries,
            duplicates,
        }
    }

    /// Successfully loaded projects, in discovery order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, idx: ProjectIdx) -> &Project {
        &self.projects[idx.0]
    }

    /// Iterate projects together with their index.
    pub fn iter(&self) -> impl Iterator<Item = (ProjectIdx, &Project)> {
        self.projects
            .iter()
            .enumerate()
            .map(|(i, p)| (ProjectIdx(i), p))
    }

    /// Find a loaded project by file path.
    pub fn find_by_path(&self, path: &Path) -> Option<ProjectIdx> {
        self.projects
            .iter()
            .position(|p| p.path() == path)
            .map(ProjectIdx)
    }

    /// All loaded projects declaring `guid`.
    pub fn find_by_guid(&self, guid: ProjectGuid) -> Vec<ProjectIdx> {
        self.iter()
            .filter(|(_, p)| p.guid() == guid)
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn failed_projects(&self) -> &[FailedProject] {
        &self.failed
    }

    pub fn libraries(&self) -> &LibrarySet {
        &self.libraries
    }

    /// Identities shared by more than one loaded project.
    pub fn duplicate_identities(&self) -> &[DuplicateGroup] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
