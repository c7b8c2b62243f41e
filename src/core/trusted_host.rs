//! Hosts exempted from TLS verification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// A trusted host, which could be a host or a host-port pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrustedHost {
    scheme: Option<String>,
    host: String,
    port: Option<u16>,
}

impl TrustedHost {
    /// Returns `true` if the [`Url`] matches this trusted host.
    ///
    /// A host without a port trusts every port on that host.
    pub fn matches(&self, url: &Url) -> bool {
        if self
            .scheme
            .as_ref()
            .is_some_and(|scheme| scheme != url.scheme())
        {
            return false;
        }

        if self
            .port
            .is_some_and(|port| url.port_or_known_default() != Some(port))
        {
            return false;
        }

        Some(self.host.as_str()) == url.host_str()
    }

    /// The host name.
    pub fn host(&self) -> &str {
        &self.host
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrustedHostError {
    #[error("missing host for `--trusted-host`: `{0}`")]
    MissingHost(String),
    #[error("invalid port for `--trusted-host`: `{0}`")]
    InvalidPort(String),
}

impl FromStr for TrustedHost {
    type Err = TrustedHostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        // Detect scheme.
        let (scheme, rest) = if let Some(rest) = s.strip_prefix("https://") {
            (Some("https".to_string()), rest)
        } else if let Some(rest) = s.strip_prefix("http://") {
            (Some("http".to_string()), rest)
        } else {
            (None, s)
        };

        // Anything after the first `/` is a path and is ignored.
        let authority = rest.split('/').next().unwrap_or_default();
        let mut parts = authority.splitn(2, ':');

        let host = parts
            .next()
            .filter(|host| !host.is_empty())
            .map(|host| host.to_ascii_lowercase())
            .ok_or_else(|| TrustedHostError::MissingHost(s.to_string()))?;

        let port = parts
            .next()
            .map(str::parse)
            .transpose()
            .map_err(|_| TrustedHostError::InvalidPort(s.to_string()))?;

        Ok(TrustedHost { scheme, host, port })
    }
}

impl fmt::Display for TrustedHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref scheme) = self.scheme {
            write!(f, "{}://", scheme)?;
        }
        write!(f, "{}", self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        Ok(())
    }
}

impl Serialize for TrustedHost {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TrustedHost {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An ordered set of trusted hosts for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedHosts(Vec<TrustedHost>);

impl TrustedHosts {
    /// Create an empty set.
    pub fn new() -> Self {
        TrustedHosts(Vec::new())
    }

    /// Parse every entry of a list of `host[:port]` strings.
    pub fn parse_all<I, S>(hosts: I) -> Result<Self, TrustedHostError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = TrustedHosts::new();
        for host in hosts {
            set.insert(host.as_ref().parse()?);
        }
        Ok(set)
    }

    /// Add a host, keeping first-insertion order. Returns `false` if it was
    /// already present.
    pub fn insert(&mut self, host: TrustedHost) -> bool {
        if self.0.contains(&host) {
            return false;
        }
        self.0.push(host);
        true
    }

    /// Check if any entry trusts the given URL.
    pub fn matches(&self, url: &Url) -> bool {
        self.0.iter().any(|host| host.matches(url))
    }

    /// Iterate over the hosts in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, TrustedHost> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<TrustedHost> for TrustedHosts {
    fn from_iter<I: IntoIterator<Item = TrustedHost>>(iter: I) -> Self {
        let mut set = TrustedHosts::new();
        set.extend(iter);
        set
    }
}

impl Extend<TrustedHost> for TrustedHosts {
    fn extend<I: IntoIterator<Item = TrustedHost>>(&mut self, iter: I) {
        for host in iter {
            self.insert(host);
        }
    }
}
