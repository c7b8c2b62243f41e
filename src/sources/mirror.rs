//! Mirror substitution for the public default index.
//!
//! When a PyPI mirror is configured, every source pointing at the public PyPI
//! simple index is replaced by a source pointing at the mirror. Other sources
//! are left alone.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::core::source::IndexSource;

/// Matches the public PyPI simple index, with or without trailing slash.
static PYPI_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://pypi(?:\.python)?\.org/simple/?$").expect("valid PyPI URL regex")
});

/// Name used for a mirror whose URL has no host.
const FALLBACK_MIRROR_NAME: &str = "pypi_mirror";

/// Knows which URLs are the public default index and what replaces them.
pub trait Mirror {
    /// Build the source that stands in for the public index.
    fn create_mirror_source(&self, mirror_url: &str) -> IndexSource;

    /// Check whether `url` is the public default index.
    fn is_pypi_url(&self, url: &str) -> bool;
}

/// The standard mirror policy for `pypi.org`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PypiMirror;

impl Mirror for PypiMirror {
    fn create_mirror_source(&self, mirror_url: &str) -> IndexSource {
        let name = Url::parse(mirror_url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| FALLBACK_MIRROR_NAME.to_string());

        IndexSource::new(name, mirror_url, mirror_url.starts_with("https://"))
    }

    fn is_pypi_url(&self, url: &str) -> bool {
        PYPI_URL_RE.is_match(url)
    }
}
