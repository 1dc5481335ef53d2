//! Reference resolution.
//!
//! Binds every declared reference to a loaded project or a precompiled
//! library. The resolver is pure: it reads the workspace, records issues
//! into the supplied collector, and returns outcomes without mutating
//! anything it was given.

pub mod duplicates;
pub mod graph;
pub mod index;
pub mod resolve;

pub use duplicates::{find_duplicate_identities, DuplicateGroup};
pub use graph::ProjectGraph;
pub use index::{IdentityIndex, OutputIndex};
pub use resolve::{resolve, Resolution, Resolve};
