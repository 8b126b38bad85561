//! Java source model and writer.
//!
//! A small in-memory model of one compilation unit: a root class with
//! `public static final` fields and nested `public static final` classes,
//! each with a private no-argument constructor.

pub mod literal;
pub mod node;
pub mod writer;

pub use node::{ClassNode, FieldEntry, JavaType, ValueKind};
pub use writer::JavaFile;
