//! Core data structures.
//!
//! - Projects and the references they declare
//! - Build configuration and language selectors
//! - The project loader boundary
//! - The workspace produced by a scan, and the report produced by a run

pub mod project;
pub mod reader;
pub mod reference;
pub mod report;
pub mod selectors;
pub mod workspace;

pub use project::{FailedProject, OutputKind, Project, ProjectGuid};
pub use reader::{LoadError, MsBuildReader, ProjectLoader};
pub use reference::{Reference, ReferenceKind, ReferenceTarget};
pub use report::{Diagnostics, DuplicateIdentity, Issue, Report};
pub use selectors::{Configuration, Language};
pub use workspace::{ProjectIdx, Workspace};
