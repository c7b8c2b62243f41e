//! Merging index inputs into one ordered source list.
//!
//! Inputs come from several layers: an explicit primary index, extra indexes,
//! the project's `[[source]]` tables, trusted hosts, and an optional PyPI
//! mirror. The merged list is ordered by first appearance and contains each
//! URL at most once.

use url::Url;

use crate::core::errors::IndexError;
use crate::core::project::Project;
use crate::core::source::{IndexInput, IndexSource, OneOrMany};
use crate::core::trusted_host::TrustedHosts;
use crate::sources::mirror::Mirror;

/// Per-operation index settings, typically from the command line.
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Primary index (`-i`)
    pub index: Option<IndexInput>,
    /// Extra indexes (`--extra-index-url`)
    pub extra_indexes: OneOrMany<IndexInput>,
    /// Hosts to treat as not verifying TLS
    pub trusted_hosts: TrustedHosts,
    /// Replacement for the public PyPI index
    pub pypi_mirror: Option<String>,
}

impl IndexOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary index.
    pub fn with_index(mut self, index: impl Into<IndexInput>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Add an extra index.
    pub fn with_extra_index(mut self, index: impl Into<IndexInput>) -> Self {
        let mut extras = std::mem::take(&mut self.extra_indexes).into_vec();
        extras.push(index.into());
        self.extra_indexes = OneOrMany::Many(extras);
        self
    }

    /// Set the trusted hosts.
    pub fn with_trusted_hosts(mut self, trusted_hosts: TrustedHosts) -> Self {
        self.trusted_hosts = trusted_hosts;
        self
    }

    /// Set the PyPI mirror URL.
    pub fn with_pypi_mirror(mut self, mirror: impl Into<String>) -> Self {
        self.pypi_mirror = Some(mirror.into());
        self
    }
}

/// Ordered, URL-unique list under construction.
#[derive(Debug, Default)]
struct SourceList {
    sources: Vec<IndexSource>,
}

impl SourceList {
    fn contains_url(&self, url: &str) -> bool {
        self.sources.iter().any(|s| s.url == url)
    }

    /// Append unless the URL is already present. A name clash with a
    /// different URL gets a numeric suffix.
    fn push(&mut self, mut source: IndexSource) -> bool {
        if self.contains_url(&source.url) {
            tracing::debug!("Skipping duplicate index {}", source.url);
            return false;
        }

        if self.sources.iter().any(|s| s.name == source.name) {
            let base = source.name.clone();
            let mut n = 2;
            while self
                .sources
                .iter()
                .any(|s| s.name == format!("{}-{}", base, n))
            {
                n += 1;
            }
            source.name = format!("{}-{}", base, n);
        }

        self.sources.push(source);
        true
    }

    fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn into_vec(self) -> Vec<IndexSource> {
        self.sources
    }
}

/// Turn an index input into a canonical source record.
///
/// Known project sources win, so names and TLS policy stay consistent with
/// the Pipfile. Unknown URLs become new records named after their host, with
/// TLS verification off when the host is trusted. A constructed record never
/// takes the name of a configured source.
pub fn normalize_index<P>(
    project: &P,
    index: &IndexInput,
    trusted_hosts: &TrustedHosts,
) -> Result<IndexSource, IndexError>
where
    P: Project + ?Sized,
{
    match project.find_source(index.identifier()) {
        Ok(known) => return Ok(known),
        Err(IndexError::SourceNotFound(_)) => {}
        Err(e) => return Err(e),
    }

    let identifier = index.identifier();
    let url = Url::parse(identifier)
        .map_err(|_| IndexError::SourceNotFound(identifier.to_string()))?;
    // Host-less URLs such as `file:///` never match a trusted host.
    let trusted = trusted_hosts.matches(&url);

    let source = match index {
        IndexInput::Url(raw) => {
            IndexSource::new(project.src_name_from_url(&url), raw.clone(), !trusted)
        }
        IndexInput::Source(given) => {
            let name = if given.name.is_empty() {
                project.src_name_from_url(&url)
            } else {
                project.unique_source_name(&given.name)
            };
            IndexSource::new(name, given.url.clone(), given.verify_ssl && !trusted)
        }
    };

    tracing::debug!("Constructed index source {}", source);
    Ok(source)
}

/// Build the ordered source list for one operation.
///
/// 1. The primary index, if given, comes first.
/// 2. Extra indexes follow. Without any extra indexes the project's sources
///    serve as the extras instead.
/// 3. An empty list falls back to the project's sources.
/// 4. With a mirror, PyPI entries are swapped for the mirror in place.
pub fn get_source_list<P, M>(
    project: &P,
    mirror: &M,
    options: &IndexOptions,
) -> Result<Vec<IndexSource>, IndexError>
where
    P: Project + ?Sized,
    M: Mirror + ?Sized,
{
    let mut sources = SourceList::default();

    if let Some(index) = &options.index {
        let source = normalize_index(project, index, &options.trusted_hosts)?;
        tracing::debug!("Primary index: {}", source);
        sources.push(source);
    }

    if options.extra_indexes.is_empty() {
        append_project_sources(project, &mut sources);
    } else {
        for extra in &options.extra_indexes {
            let source = normalize_index(project, extra, &options.trusted_hosts)?;
            sources.push(source);
        }
    }

    if sources.is_empty() {
        for source in project.pipfile_sources() {
            sources.push(source.clone());
        }
    }

    let sources = match &options.pypi_mirror {
        Some(mirror_url) => substitute_mirror(sources, mirror, mirror_url),
        None => sources,
    };

    Ok(sources.into_vec())
}

/// Use the project's configured sources as the implicit extra indexes.
fn append_project_sources<P>(project: &P, sources: &mut SourceList)
where
    P: Project + ?Sized,
{
    for source in project.pipfile_sources() {
        sources.push(source.clone());
    }
}

fn substitute_mirror<M>(sources: SourceList, mirror: &M, mirror_url: &str) -> SourceList
where
    M: Mirror + ?Sized,
{
    let mut mirrored = SourceList::default();

    for source in sources.into_vec() {
        if mirror.is_pypi_url(&source.url) {
            tracing::debug!("Substituting mirror {} for {}", mirror_url, source.url);
            mirrored.push(mirror.create_mirror_source(mirror_url));
        } else {
            mirrored.push(source);
        }
    }

    mirrored
}
