//! slnweave - cross-references a tree of .NET project files
//!
//! This crate scans source trees for project files and precompiled
//! libraries, resolves every declared reference to the project that builds
//! it or to a known library, and writes a consolidated MSBuild build file.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod scan;
pub mod util;

/// Test utilities and mocks for slnweave unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests.
#[cfg(test)]
pub mod test_support;

pub use core::{
    project::Project, reader::MsBuildReader, reference::Reference, report::Report,
    selectors::Configuration, selectors::Language, workspace::Workspace,
};

pub use resolver::{Resolution, Resolve};
pub use util::Config;
