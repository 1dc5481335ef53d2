//! Reference resolution.
//!
//! Resolution is one pass of index lookups: every reference is bound to the
//! project that builds it, marked precompiled, or reported. Only direct
//! links are established; nothing here walks the graph.

use rayon::prelude::*;
use serde::Serialize;

use crate::core::{
    Configuration, Diagnostics, Issue, Project, ProjectIdx, Reference, ReferenceTarget,
};
use crate::resolver::{IdentityIndex, OutputIndex};
use crate::scan::LibrarySet;

/// What a single reference resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "project", rename_all = "snake_case")]
pub enum Resolution {
    /// Nothing matched; an issue was recorded.
    Unresolved,
    /// Built by a loaded project.
    Project(ProjectIdx),
    /// A known precompiled library with no owning project.
    Precompiled,
}

impl Resolution {
    pub fn project(&self) -> Option<ProjectIdx> {
        match self {
            Resolution::Project(idx) => Some(*idx),
            _ => None,
        }
    }

    pub fn is_precompiled(&self) -> bool {
        matches!(self, Resolution::Precompiled)
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved)
    }
}

/// Resolution outcomes for one run, positionally aligned with the
/// workspace's projects and each project's references.
#[derive(Debug, Clone)]
pub struct Resolve {
    configuration: Configuration,
    outcomes: Vec<Vec<Resolution>>,
}

impl Resolve {
    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    /// Outcome of reference `reference` of `project`.
    pub fn get(&self, project: ProjectIdx, reference: usize) -> Option<Resolution> {
        self.outcomes
            .get(project.0)
            .and_then(|refs| refs.get(reference))
            .copied()
    }

    /// Outcomes of every reference of `project`, in declaration order.
    pub fn for_project(&self, project: ProjectIdx) -> &[Resolution] {
        self.outcomes
            .get(project.0)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every outcome as (project, reference position, resolution).
    pub fn iter(&self) -> impl Iterator<Item = (ProjectIdx, usize, Resolution)> + '_ {
        self.outcomes.iter().enumerate().flat_map(|(p, refs)| {
            refs.iter()
                .enumerate()
                .map(move |(r, resolution)| (ProjectIdx(p), r, *resolution))
        })
    }

    /// Number of outcomes matching `pred`.
    pub fn count(&self, pred: impl Fn(&Resolution) -> bool) -> usize {
        self.iter().filter(|(_, _, r)| pred(r)).count()
    }

    pub fn unresolved_count(&self) -> usize {
        self.count(|r| !r.is_resolved())
    }
}

/// Resolve every reference of every project.
///
/// Both indexes are completely built before any reference is looked up.
/// References are then resolved in parallel across projects; outcomes and
/// issues are gathered back in project order.
pub fn resolve(
    projects: &[Project],
    libraries: &LibrarySet,
    configuration: Configuration,
    diagnostics: &mut Diagnostics,
) -> Resolve {
    let outputs = OutputIndex::build(projects, configuration, diagnostics);
    let identities = IdentityIndex::build(projects, diagnostics);

    let per_project: Vec<(Vec<Resolution>, Vec<Issue>)> = projects
        .par_iter()
        .map(|project| resolve_project(project, libraries, &outputs, &identities))
        .collect();

    let mut outcomes = Vec::with_capacity(per_project.len());
    for (resolutions, issues) in per_project {
        diagnostics.extend(issues);
        outcomes.push(resolutions);
    }

    let resolve = Resolve {
        configuration,
        outcomes,
    };
    tracing::info!(
        "Resolved {} references for {} configuration ({} precompiled, {} unresolved)",
        resolve.count(|_| true),
        configuration,
        resolve.count(Resolution::is_precompiled),
        resolve.unresolved_count()
    );
    resolve
}

fn resolve_project(
    project: &Project,
    libraries: &LibrarySet,
    outputs: &OutputIndex,
    identities: &IdentityIndex,
) -> (Vec<Resolution>, Vec<Issue>) {
    let mut issues = Vec::new();
    let resolutions = project
        .references()
        .iter()
        .map(|reference| {
            resolve_reference(project, reference, libraries, outputs, identities)
                .unwrap_or_else(|issue| {
                    issues.push(issue);
                    Resolution::Unresolved
                })
        })
        .collect();
    (resolutions, issues)
}

fn resolve_reference(
    project: &Project,
    reference: &Reference,
    libraries: &LibrarySet,
    outputs: &OutputIndex,
    identities: &IdentityIndex,
) -> Result<Resolution, Issue> {
    match reference.target() {
        ReferenceTarget::Library(path) => {
            if let Some(idx) = outputs.get(path) {
                Ok(Resolution::Project(idx))
            } else if libraries.contains(path) {
                Ok(Resolution::Precompiled)
            } else {
                Err(Issue::UnresolvedLibrary {
                    project: project.path().to_path_buf(),
                    reference: reference.name().to_string(),
                    path: path.clone(),
                })
            }
        }
        ReferenceTarget::Project(guid) => match identities.get(*guid) {
            Some(idx) => Ok(Resolution::Project(idx)),
            None => Err(Issue::UnresolvedProject {
                project: project.path().to_path_buf(),
                reference: reference.name().to_string(),
                guid: *guid,
            }),
        },
    }
}
