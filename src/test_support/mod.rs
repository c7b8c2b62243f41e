//! Test utilities for quay unit tests.
//!
//! Provides in-memory projects, a configurable mirror, and Pipfile fixtures
//! so resolution logic can be tested without touching the filesystem.
//!
//! # Example
//!
//! ```rust,ignore
//! use quay::test_support::{project, urls};
//!
//! #[test]
//! fn test_example() {
//!     let project = project(&[("pypi", "https://pypi.org/simple", true)]);
//!     let sources = get_source_list(&project, &PypiMirror, &IndexOptions::new()).unwrap();
//!     assert_eq!(urls(&sources), vec!["https://pypi.org/simple"]);
//! }
//! ```

pub mod fixtures;

use crate::core::project::PipfileSources;
use crate::core::source::IndexSource;
use crate::sources::mirror::Mirror;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Build a source record.
pub fn source(name: &str, url: &str, verify_ssl: bool) -> IndexSource {
    IndexSource::new(name, url, verify_ssl)
}

/// Build an in-memory project from `(name, url, verify_ssl)` triples.
pub fn project(sources: &[(&str, &str, bool)]) -> PipfileSources {
    PipfileSources::new(
        sources
            .iter()
            .map(|(name, url, verify_ssl)| source(name, url, *verify_ssl))
            .collect(),
    )
}

/// The URLs of a source list, in order.
pub fn urls(sources: &[IndexSource]) -> Vec<&str> {
    sources.iter().map(|s| s.url.as_str()).collect()
}

/// A mirror policy that treats an arbitrary set of URLs as the default index.
#[derive(Debug, Clone, Default)]
pub struct StaticMirror {
    defaults: Vec<String>,
}

impl StaticMirror {
    /// Create a mirror policy for the given default-index URLs.
    pub fn new<I, S>(defaults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StaticMirror {
            defaults: defaults.into_iter().map(Into::into).collect(),
        }
    }
}

impl Mirror for StaticMirror {
    fn create_mirror_source(&self, mirror_url: &str) -> IndexSource {
        source("mirror", mirror_url, true)
    }

    fn is_pypi_url(&self, url: &str) -> bool {
        self.defaults.iter().any(|d| d == url)
    }
}
