//! Lookup indexes built once per resolution.
//!
//! Both indexes keep the first project inserted for a key and record an
//! issue for every later project that collides with it.

use std::collections::HashMap;
use std::path::Path;

use crate::core::{Configuration, Diagnostics, Issue, Project, ProjectGuid, ProjectIdx};
use crate::util::PathKey;

/// Output file of the selected configuration -> the project that builds it.
#[derive(Debug, Default)]
pub struct OutputIndex {
    configuration: Configuration,
    by_output: HashMap<PathKey, ProjectIdx>,
}

impl OutputIndex {
    pub fn build(
        projects: &[Project],
        configuration: Configuration,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut by_output: HashMap<PathKey, ProjectIdx> = HashMap::with_capacity(projects.len());

        for (i, project) in projects.iter().enumerate() {
            let output = project.output(configuration);
            match by_output.get(&PathKey::new(output)).copied() {
                Some(ProjectIdx(existing)) => {
                    diagnostics.record(Issue::DuplicateOutput {
                        configuration,
                        output: output.to_path_buf(),
                        project: project.path().to_path_buf(),
                        existing: projects[existing].path().to_path_buf(),
                    });
                }
                None => {
                    by_output.insert(PathKey::new(output), ProjectIdx(i));
                }
            }
        }

        OutputIndex {
            configuration,
            by_output,
        }
    }

    pub fn configuration(&self) -> Configuration {
        self.configuration
    }

    pub fn get(&self, output: &Path) -> Option<ProjectIdx> {
        self.by_output.get(&PathKey::new(output)).copied()
    }

    pub fn len(&self) -> usize {
        self.by_output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_output.is_empty()
    }
}

/// Project identity -> the first loaded project declaring it.
#[derive(Debug, Default)]
pub struct IdentityIndex {
    by_guid: HashMap<ProjectGuid, ProjectIdx>,
}

impl IdentityIndex {
    pub fn build(projects: &[Project], diagnostics: &mut Diagnostics) -> Self {
        let mut by_guid: HashMap<ProjectGuid, ProjectIdx> = HashMap::with_capacity(projects.len());

        for (i, project) in projects.iter().enumerate() {
            match by_guid.get(&project.guid()).copied() {
                Some(ProjectIdx(existing)) => {
                    diagnostics.record(Issue::DuplicateIdentity {
                        guid: project.guid(),
                        project: project.path().to_path_buf(),
                        existing: projects[existing].path().to_path_buf(),
                    });
                }
                None => {
                    by_guid.insert(project.guid(), ProjectIdx(i));
                }
            }
        }

        IdentityIndex { by_guid }
    }

    pub fn get(&self, guid: ProjectGuid) -> Option<ProjectIdx> {
        self.by_guid.get(&guid).copied()
    }

    pub fn len(&self) -> usize {
        self.by_guid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_guid.is_empty()
    }
}
