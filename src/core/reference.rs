//! Reference declarations.
//!
//! A reference is what a project file declares, nothing more. Whether it
//! points at a loaded project or a precompiled library is decided later by
//! the resolver and kept in a separate [`Resolution`](crate::resolver::Resolution).

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::ProjectGuid;

/// Kind of a declared reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Library,
    Project,
}

/// What a reference points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceTarget {
    /// A library file by absolute path (`<Reference><HintPath>`).
    Library(PathBuf),
    /// Another project by identity (`<ProjectReference><Project>`).
    Project(ProjectGuid),
}

/// A dependency declared by a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    name: String,
    target: ReferenceTarget,
}

impl Reference {
    pub fn library(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Reference {
            name: name.into(),
            target: ReferenceTarget::Library(path.into()),
        }
    }

    pub fn project(name: impl Into<String>, guid: ProjectGuid) -> Self {
        Reference {
            name: name.into(),
            target: ReferenceTarget::Project(guid),
        }
    }

    /// Declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &ReferenceTarget {
        &self.target
    }

    pub fn kind(&self) -> ReferenceKind {
        match self.target {
            ReferenceTarget::Library(_) => ReferenceKind::Library,
            ReferenceTarget::Project(_) => ReferenceKind::Project,
        }
    }

    /// Absolute library path, for library references.
    pub fn library_path(&self) -> Option<&Path> {
        match &self.target {
            ReferenceTarget::Library(path) => Some(path),
            ReferenceTarget::Project(_) => None,
        }
    }

    /// Referenced identity, for project references.
    pub fn project_guid(&self) -> Option<ProjectGuid> {
        match self.target {
            ReferenceTarget::Project(guid) => Some(guid),
            ReferenceTarget::Library(_) => None,
        }
    }
}
