//! quay - package-index source resolution for pip
//!
//! This crate merges the index sources configured for a project (the
//! `[[source]]` tables of a Pipfile), per-requirement index hints,
//! command-line flags, trusted hosts and mirror policy into one ordered,
//! deduplicated source list, and renders that list as pip arguments.
//! It also parses index directives out of requirements-file lines.

pub mod core;
pub mod ops;
pub mod sources;
pub mod util;

/// Test utilities for quay unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides in-memory projects, mirror policies and
/// Pipfile fixtures.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    errors::IndexError, project::PipfileSources, project::Project, source::IndexInput,
    source::IndexSource, trusted_host::TrustedHosts,
};

pub use crate::ops::source_list::IndexOptions;
pub use crate::sources::mirror::{Mirror, PypiMirror};
