//! Project records - one buildable unit described by a project file.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::core::{Configuration, Reference};

/// The globally unique identity a project file declares in `<ProjectGuid>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectGuid(Uuid);

impl ProjectGuid {
    pub fn new(uuid: Uuid) -> Self {
        ProjectGuid(uuid)
    }

    /// Parse a GUID as written in project files, with or without braces.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        let trimmed = s.trim();
        let bare = trimmed
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(trimmed);
        Uuid::parse_str(bare).map(ProjectGuid)
    }
}

impl fmt::Display for ProjectGuid {
    /// Formats the way Visual Studio writes GUIDs: braced, upper-case.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.hyphenated().to_string().to_uppercase())
    }
}

impl Serialize for ProjectGuid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What a project builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputKind {
    #[default]
    Library,
    Executable,
}

impl OutputKind {
    /// Parse an MSBuild `<OutputType>` value.
    pub fn from_output_type(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "exe" | "winexe" | "appcontainerexe" => OutputKind::Executable,
            _ => OutputKind::Library,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputKind::Library => "dll",
            OutputKind::Executable => "exe",
        }
    }
}

/// A successfully loaded project.
///
/// Immutable once loaded: resolution outcomes live in
/// [`Resolve`](crate::resolver::Resolve), not here.
#[derive(Debug, Clone)]
pub struct Project {
    guid: ProjectGuid,
    name: String,
    assembly_name: String,
    output_kind: OutputKind,
    path: PathBuf,
    dir: PathBuf,
    output_debug: PathBuf,
    output_release: PathBuf,
    references: Vec<Reference>,
}

impl Project {
    /// Create a project record for the file at `path`.
    ///
    /// `path` must be absolute; the display name and assembly name default
    /// to the file stem.
    pub fn new(guid: ProjectGuid, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Project {
            guid,
            assembly_name: name.clone(),
            name,
            output_kind: OutputKind::Library,
            output_debug: dir.join("bin").join("Debug"),
            output_release: dir.join("bin").join("Release"),
            path,
            dir,
            references: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_assembly_name(mut self, assembly_name: impl Into<String>) -> Self {
        self.assembly_name = assembly_name.into();
        self
    }

    pub fn with_output_kind(mut self, kind: OutputKind) -> Self {
        self.output_kind = kind;
        self
    }

    /// Set the absolute output file for a configuration.
    pub fn with_output(mut self, configuration: Configuration, output: impl Into<PathBuf>) -> Self {
        match configuration {
            Configuration::Debug => self.output_debug = output.into(),
            Configuration::Release => self.output_release = output.into(),
        }
        self
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }

    pub fn with_references(mut self, references: Vec<Reference>) -> Self {
        self.references = references;
        self
    }

    pub fn guid(&self) -> ProjectGuid {
        self.guid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assembly_name(&self) -> &str {
        &self.assembly_name
    }

    pub fn output_kind(&self) -> OutputKind {
        self.output_kind
    }

    /// Absolute path of the project file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute directory containing the project file.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute output file built for the given configuration.
    pub fn output(&self, configuration: Configuration) -> &Path {
        match configuration {
            Configuration::Debug => &self.output_debug,
            Configuration::Release => &self.output_release,
        }
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }
}

/// A project file the loader could not turn into a [`Project`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedProject {
    pub path: PathBuf,
    pub message: String,
}

impl FailedProject {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        FailedProject {
            path: path.into(),
            message: message.into(),
        }
    }
}
