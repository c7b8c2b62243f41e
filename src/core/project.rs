//! The project's configured index sources.
//!
//! The resolution code only needs read access to the `[[source]]` tables of a
//! project, so it talks to the [`Project`] trait. [`PipfileSources`] is the
//! implementation backed by a Pipfile.
//!
//! ## Example Pipfile
//!
//! ```toml
//! [[source]]
//! name = "pypi"
//! url = "https://pypi.org/simple"
//! verify_ssl = true
//!
//! [[source]]
//! name = "internal"
//! url = "http://internal.example:8080/simple"
//! verify_ssl = false
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::errors::IndexError;
use crate::core::source::IndexSource;

/// Read access to a project's configured sources.
pub trait Project {
    /// Configured sources, in Pipfile order.
    fn pipfile_sources(&self) -> &[IndexSource];

    /// Find a configured source by name, then by URL.
    fn find_source(&self, identifier: &str) -> Result<IndexSource, IndexError> {
        let sources = self.pipfile_sources();

        sources
            .iter()
            .find(|source| source.name == identifier)
            .or_else(|| sources.iter().find(|source| source.url == identifier))
            .cloned()
            .ok_or_else(|| IndexError::SourceNotFound(identifier.to_string()))
    }

    /// Derive a source name from an index URL.
    ///
    /// The host minus its last label with the remaining dots removed
    /// (`https://download.pytorch.org/whl` becomes `downloadpytorch`). URLs
    /// without a host are named `source`.
    fn src_name_from_url(&self, url: &Url) -> String {
        let host = url.host_str().unwrap_or_default();
        let base = match host.rsplit_once('.') {
            Some((name, _tld)) => name.replace('.', ""),
            None => host.to_string(),
        };

        if base.is_empty() {
            self.unique_source_name("source")
        } else {
            self.unique_source_name(&base)
        }
    }

    /// `base`, or `base` with a `-2`, `-3`, ... suffix if a configured
    /// source already has that name.
    fn unique_source_name(&self, base: &str) -> String {
        let taken = |name: &str| self.pipfile_sources().iter().any(|s| s.name == name);
        if !taken(base) {
            return base.to_string();
        }

        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// The `[[source]]` tables of a Pipfile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipfileSources {
    #[serde(default, rename = "source")]
    sources: Vec<IndexSource>,
}

impl PipfileSources {
    /// Create from an explicit list of sources.
    pub fn new(sources: Vec<IndexSource>) -> Self {
        PipfileSources { sources }
    }

    /// Load the sources of the Pipfile at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read Pipfile: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("failed to parse Pipfile: {}", path.display()))
    }

    /// Parse the `[[source]]` tables out of Pipfile content.
    ///
    /// A Pipfile without sources implies the public PyPI index. Sources
    /// without a name get one derived from their URL.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let parsed: PipfileSources = toml::from_str(content)?;

        if parsed.sources.is_empty() {
            tracing::debug!("No [[source]] tables, defaulting to PyPI");
            return Ok(PipfileSources::new(vec![IndexSource::pypi()]));
        }

        // Explicit names are all claimed before any name is derived.
        let mut project = parsed;
        for i in 0..project.sources.len() {
            if !project.sources[i].name.is_empty() {
                continue;
            }
            if let Ok(url) = Url::parse(&project.sources[i].url) {
                let name = project.src_name_from_url(&url);
                project.sources[i].name = name;
            }
        }

        Ok(project)
    }

    /// Number of configured sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Project for PipfileSources {
    fn pipfile_sources(&self) -> &[IndexSource] {
        &self.sources
    }
}
