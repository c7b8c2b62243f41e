//! Index sources - WHERE pip looks for packages.
//!
//! An [`IndexSource`] mirrors a Pipfile `[[source]]` table. Sources are compared
//! by URL when merging: two records with the same URL are the same index, no
//! matter what they are called.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::errors::IndexError;

/// Name of the public default index.
pub const PYPI_SOURCE_NAME: &str = "pypi";

/// URL of the public default index.
pub const PYPI_URL: &str = "https://pypi.org/simple";

/// A package index endpoint plus trust and naming metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexSource {
    /// Source name, unique within a resolved list
    #[serde(default)]
    pub name: String,

    /// Index URL (PEP 503 simple API root)
    #[serde(default)]
    pub url: String,

    /// Whether pip should verify the index's TLS certificate
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

fn default_verify_ssl() -> bool {
    true
}

impl IndexSource {
    /// Create a new source record.
    pub fn new(name: impl Into<String>, url: impl Into<String>, verify_ssl: bool) -> Self {
        IndexSource {
            name: name.into(),
            url: url.into(),
            verify_ssl,
        }
    }

    /// The public PyPI source that an empty Pipfile implies.
    pub fn pypi() -> Self {
        IndexSource::new(PYPI_SOURCE_NAME, PYPI_URL, true)
    }

    /// Check whether this record carries a URL at all.
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Parse the URL of this source.
    pub fn parsed_url(&self) -> Result<Url, IndexError> {
        Url::parse(&self.url).map_err(|e| IndexError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })
    }

    /// The `host[:port]` value pip expects after `--trusted-host`.
    ///
    /// Only an explicit port is kept; scheme default ports are dropped by
    /// the URL parser.
    pub fn trusted_host_arg(&self) -> Result<String, IndexError> {
        let url = self.parsed_url()?;
        let host = url.host_str().ok_or_else(|| IndexError::InvalidUrl {
            url: self.url.clone(),
            reason: "URL has no host".to_string(),
        })?;

        Ok(match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        })
    }
}

impl fmt::Display for IndexSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.url)
        } else {
            write!(f, "{} ({})", self.name, self.url)
        }
    }
}

/// An index as the user wrote it: a bare string (URL or source name) or a
/// full source table.
///
/// Normalized into an [`IndexSource`] before any merging happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexInput {
    /// A URL or the name of a configured source
    Url(String),
    /// A structured `{ name, url, verify_ssl }` table
    Source(IndexSource),
}

impl IndexInput {
    /// The identifier used to look this index up among known sources.
    pub fn identifier(&self) -> &str {
        match self {
            IndexInput::Url(s) => s,
            IndexInput::Source(source) => &source.url,
        }
    }
}

impl From<&str> for IndexInput {
    fn from(s: &str) -> Self {
        IndexInput::Url(s.to_string())
    }
}

impl From<String> for IndexInput {
    fn from(s: String) -> Self {
        IndexInput::Url(s)
    }
}

impl From<IndexSource> for IndexInput {
    fn from(source: IndexSource) -> Self {
        IndexInput::Source(source)
    }
}

impl fmt::Display for IndexInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexInput::Url(s) => write!(f, "{}", s),
            IndexInput::Source(source) => write!(f, "{}", source),
        }
    }
}

/// A value that may be given either singly or as a list.
///
/// `extra_index = "https://..."` and `extra_index = ["https://...", ...]` are
/// both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    // `Many` first: a derived struct also accepts a sequence.
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Iterate over the contained values in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value).iter(),
            OneOrMany::Many(values) => values.iter(),
        }
    }

    /// Number of contained values.
    pub fn len(&self) -> usize {
        match self {
            OneOrMany::One(_) => 1,
            OneOrMany::Many(values) => values.len(),
        }
    }

    /// Check if no value is contained.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert into a list, wrapping a single value.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl<T> From<Vec<T>> for OneOrMany<T> {
    fn from(values: Vec<T>) -> Self {
        OneOrMany::Many(values)
    }
}

impl<'a, T> IntoIterator for &'a OneOrMany<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trusted_host_arg() {
        let source = IndexSource::new("x", "https://x", false);
        assert_eq!(source.trusted_host_arg().unwrap(), "x");

        let source = IndexSource::new("internal", "http://internal.example:8080/simple", false);
        assert_eq!(
            source.trusted_host_arg().unwrap(),
            "internal.example:8080"
        );
    }

    #[test]
    fn test_trusted_host_arg_drops_default_port() {
        let source = IndexSource::new("x", "https://x.example:443/simple", false);
        assert_eq!(source.trusted_host_arg().unwrap(), "x.example");
    }

    #[test]
    fn test_trusted_host_arg_invalid_url() {
        let source = IndexSource::new("bad", "not a url", false);
        assert!(matches!(
            source.trusted_host_arg(),
            Err(IndexError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_source_table_defaults() {
        let source: IndexSource = toml::from_str(r#"url = "https://a/simple""#).unwrap();
        assert_eq!(source.url, "https://a/simple");
        assert!(source.verify_ssl);
        assert!(source.name.is_empty());
    }

    #[test]
    fn test_index_input_untagged() {
        #[derive(Deserialize)]
        struct Wrapper {
            index: IndexInput,
        }

        let w: Wrapper = toml::from_str(r#"index = "internal""#).unwrap();
        assert_eq!(w.index, IndexInput::Url("internal".into()));

        let w: Wrapper =
            toml::from_str(r#"index = { name = "a", url = "https://a/simple" }"#).unwrap();
        assert_eq!(
            w.index,
            IndexInput::Source(IndexSource::new("a", "https://a/simple", true))
        );
    }

    #[test]
    fn test_one_or_many() {
        #[derive(Deserialize)]
        struct Wrapper {
            extra: OneOrMany<String>,
        }

        let w: Wrapper = toml::from_str(r#"extra = "https://b/simple""#).unwrap();
        assert_eq!(w.extra.len(), 1);
        assert_eq!(w.extra.into_vec(), vec!["https://b/simple".to_string()]);

        let w: Wrapper = toml::from_str(r#"extra = ["https://b", "https://c"]"#).unwrap();
        assert_eq!(w.extra.iter().count(), 2);

        assert!(OneOrMany::<String>::default().is_empty());
    }
}
