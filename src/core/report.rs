//! Per-item problems found during a run, and the report handed to callers.
//!
//! Nothing in here aborts a run. Fatal filesystem failures are
//! [`ScanError`](crate::scan::ScanError)s; everything else is an [`Issue`]
//! recorded into a [`Diagnostics`] collector that is threaded through the
//! scan and resolve phases.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::core::{Configuration, FailedProject, ProjectGuid, Workspace};
use crate::util::diagnostic::Diagnostic;

/// A recoverable problem with one item of the scanned tree.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    #[error("found a duplicate of library {} in the precompiled library directories", path.display())]
    DuplicateLibrary { path: PathBuf },

    #[error(
        "project {} with {configuration} output {} has the same output as project {}",
        project.display(), output.display(), existing.display()
    )]
    DuplicateOutput {
        configuration: Configuration,
        output: PathBuf,
        project: PathBuf,
        existing: PathBuf,
    },

    #[error(
        "project {} and project {} have the same GUID {guid}",
        project.display(), existing.display()
    )]
    DuplicateIdentity {
        guid: ProjectGuid,
        project: PathBuf,
        existing: PathBuf,
    },

    #[error(
        "couldn't find the library {} referenced in project {}, or a project that builds it",
        path.display(), project.display()
    )]
    UnresolvedLibrary {
        project: PathBuf,
        reference: String,
        path: PathBuf,
    },

    #[error("couldn't find project {reference} {guid} referenced in project {}", project.display())]
    UnresolvedProject {
        project: PathBuf,
        reference: String,
        guid: ProjectGuid,
    },
}

impl Issue {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Issue::DuplicateLibrary { path } => {
                Diagnostic::warning(format!("duplicate precompiled library `{}`", path.display()))
                    .with_context("the same file was reached from more than one library directory")
                    .with_suggestion("Remove overlapping entries from the precompiled paths")
            }

            Issue::DuplicateOutput {
                configuration,
                output,
                project,
                existing,
            } => Diagnostic::error(format!(
                "two projects build `{}` ({} configuration)",
                output.display(),
                configuration
            ))
            .with_location(project)
            .with_context(format!("already built by {}", existing.display()))
            .with_suggestion("Give each project its own OutputPath or AssemblyName"),

            Issue::DuplicateIdentity {
                guid,
                project,
                existing,
            } => Diagnostic::error(format!("duplicate project GUID {}", guid))
                .with_location(project)
                .with_context(format!("also declared by {}", existing.display()))
                .with_suggestion("Generate a fresh <ProjectGuid> for one of the projects"),

            Issue::UnresolvedLibrary {
                project,
                reference,
                path,
            } => Diagnostic::error(format!("unresolved library reference `{}`", reference))
                .with_location(project)
                .with_context(format!("no project builds {}", path.display()))
                .with_context("and it is not in any precompiled library directory")
                .with_suggestion("Add the directory containing it to the precompiled paths")
                .with_suggestion("Or add the project that builds it to the source paths"),

            Issue::UnresolvedProject {
                project,
                reference,
                guid,
            } => Diagnostic::error(format!("unresolved project reference `{}`", reference))
                .with_location(project)
                .with_context(format!("no scanned project has GUID {}", guid))
                .with_suggestion("Add the referenced project's directory to the source paths"),
        }
    }
}

/// Collects issues as a run progresses.
#[derive(Debug, Default)]
pub struct Diagnostics {
    issues: Vec<Issue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { issues: Vec::new() }
    }

    /// Record an issue, mirroring it to the log.
    pub fn record(&mut self, issue: Issue) {
        match issue {
            Issue::DuplicateLibrary { .. } => tracing::warn!("{}", issue),
            _ => tracing::error!("{}", issue),
        }
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        for issue in issues {
            self.record(issue);
        }
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

/// Projects sharing one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateIdentity {
    pub guid: ProjectGuid,
    pub projects: Vec<PathBuf>,
}

/// Outcome of a completed run.
///
/// A run that produced issues still completed; [`Report::is_clean`] is for
/// callers that want to turn problems into a failure.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub configuration: Configuration,
    pub projects: usize,
    pub libraries: usize,
    pub failed_projects: Vec<FailedProject>,
    pub duplicate_identities: Vec<DuplicateIdentity>,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn new(ws: &Workspace, configuration: Configuration, diagnostics: Diagnostics) -> Self {
        let duplicate_identities = ws
            .duplicate_identities()
            .iter()
            .map(|group| DuplicateIdentity {
                guid: group.guid,
                projects: group
                    .projects
                    .iter()
                    .map(|&idx| ws.project(idx).path().to_path_buf())
                    .collect(),
            })
            .collect();

        Report {
            configuration,
            projects: ws.len(),
            libraries: ws.libraries().len(),
            failed_projects: ws.failed_projects().to_vec(),
            duplicate_identities,
            issues: diagnostics.into_issues(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed_projects.is_empty()
            && self.duplicate_identities.is_empty()
            && self.issues.is_empty()
    }

    /// Number of problems of any kind.
    pub fn problem_count(&self) -> usize {
        self.failed_projects.len() + self.duplicate_identities.len() + self.issues.len()
    }

    /// Render every problem as a terminal diagnostic.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::with_capacity(self.problem_count());

        for failed in &self.failed_projects {
            out.push(
                Diagnostic::error("failed to load project")
                    .with_location(&failed.path)
                    .with_context(failed.message.clone()),
            );
        }

        for dup in &self.duplicate_identities {
            let mut diag = Diagnostic::error(format!(
                "{} projects share GUID {}",
                dup.projects.len(),
                dup.guid
            ));
            for path in &dup.projects {
                diag = diag.with_context(path.display().to_string());
            }
            out.push(diag);
        }

        out.extend(self.issues.iter().map(Issue::to_diagnostic));
        out
    }
}
