//! High-level operations.
//!
//! This module contains the entry points the slnweave commands are built on.

pub mod msbuild;
pub mod resolve;
pub mod scan;

pub use msbuild::{render_build_file, write_build_file, BuildFileOptions};
pub use resolve::{resolve_workspace, run, Analysis, RunOptions};
pub use scan::{scan_workspace, ScanOptions};
