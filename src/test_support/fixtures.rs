//! Pipfile fixtures for common test scenarios.

/// A Pipfile with the public index plus an unverified internal index.
pub const PIPFILE_TWO_SOURCES: &str = r#"
[[source]]
name = "pypi"
url = "https://pypi.org/simple"
verify_ssl = true

[[source]]
name = "internal"
url = "http://internal.example:8080/simple"
verify_ssl = false

[packages]
requests = "*"
internal-lib = { version = "*", index = "internal" }

[dev-packages]
pytest = "*"
"#;

/// Fixture that renders a Pipfile from a list of sources.
#[derive(Debug, Clone, Default)]
pub struct PipfileFixture {
    sources: Vec<(String, String, bool)>,
}

impl PipfileFixture {
    /// Create an empty Pipfile fixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `[[source]]` table.
    pub fn source(mut self, name: &str, url: &str, verify_ssl: bool) -> Self {
        self.sources
            .push((name.to_string(), url.to_string(), verify_ssl));
        self
    }

    /// Render the Pipfile content.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for (name, url, verify_ssl) in &self.sources {
            out.push_str(&format!(
                "[[source]]\nname = \"{}\"\nurl = \"{}\"\nverify_ssl = {}\n\n",
                name, url, verify_ssl
            ));
        }

        out.push_str("[packages]\n");

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::{PipfileSources, Project};

    #[test]
    fn test_rendered_pipfile_parses() {
        let content = PipfileFixture::new()
            .source("pypi", "https://pypi.org/simple", true)
            .source("internal", "http://internal.example/simple", false)
            .render();

        let project = PipfileSources::from_toml_str(&content).unwrap();
        assert_eq!(project.len(), 2);
        assert!(!project.pipfile_sources()[1].verify_ssl);
    }
}
