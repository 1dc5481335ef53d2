//! Duplicate identity detection.

use std::collections::HashMap;

use crate::core::{Project, ProjectGuid, ProjectIdx};

/// Two or more loaded projects declaring the same identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub guid: ProjectGuid,
    /// Members in load order.
    pub projects: Vec<ProjectIdx>,
}

/// Group projects by identity and return every group with more than one member.
///
/// Groups are ordered by their first member. Informational only: the
/// projects stay in the workspace and still take part in resolution.
pub fn find_duplicate_identities(projects: &[Project]) -> Vec<DuplicateGroup> {
    let mut groups: HashMap<ProjectGuid, Vec<ProjectIdx>> = HashMap::new();
    for (i, project) in projects.iter().enumerate() {
        groups.entry(project.guid()).or_default().push(ProjectIdx(i));
    }

    let mut duplicates: Vec<DuplicateGroup> = groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(guid, projects)| DuplicateGroup { guid, projects })
        .collect();
    duplicates.sort_by_key(|group| group.projects[0]);

    for group in &duplicates {
        tracing::debug!(
            "GUID {} is shared by {} projects",
            group.guid,
            group.projects.len()
        );
    }

    duplicates
}
