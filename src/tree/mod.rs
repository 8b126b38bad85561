//! Resource tree view and the walker that mirrors it into classes.

pub mod node;
pub mod walker;

pub use node::{ResourceDirectory, ResourceFile, ResourceNode};
pub use walker::{walk, WalkOptions};
