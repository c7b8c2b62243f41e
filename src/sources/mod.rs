//! Collaborators that supply index sources from outside the project.

pub mod mirror;

pub use mirror::{Mirror, PypiMirror};
