//! Core data structures.
//!
//! - [`IndexSource`] - one package index (name, URL, TLS policy)
//! - [`IndexInput`] - an index as written by the user, before normalization
//! - [`TrustedHosts`] - hosts exempted from TLS verification
//! - [`Project`] - read access to a project's configured sources

pub mod errors;
pub mod project;
pub mod source;
pub mod trusted_host;

pub use errors::{ConflictingDirectivesError, IndexError};
pub use project::{PipfileSources, Project};
pub use source::{IndexInput, IndexSource, OneOrMany};
pub use trusted_host::{TrustedHost, TrustedHosts};
