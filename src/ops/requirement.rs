//! Per-requirement index selection.
//!
//! A Pipfile entry such as `torch = { version = "*", index = "pytorch" }`
//! pins a requirement to an index. The requirement's own hints take
//! precedence over the project's sources.

use serde::{Deserialize, Serialize};

use crate::core::errors::IndexError;
use crate::core::project::Project;
use crate::core::source::{IndexInput, IndexSource, OneOrMany};
use crate::ops::source_list::{get_source_list, IndexOptions};
use crate::sources::mirror::Mirror;

/// Index hints attached to a single requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementIndexes {
    /// Requirement name, used in diagnostics
    pub name: String,

    /// The requirement's own primary index
    #[serde(default)]
    pub index: Option<IndexInput>,

    /// The requirement's own extra indexes
    #[serde(default)]
    pub extra_indexes: OneOrMany<IndexInput>,
}

impl RequirementIndexes {
    /// A requirement without index hints.
    pub fn new(name: impl Into<String>) -> Self {
        RequirementIndexes {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Pin the requirement to an index.
    pub fn with_index(mut self, index: impl Into<IndexInput>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Add an extra index for the requirement.
    pub fn with_extra_index(mut self, index: impl Into<IndexInput>) -> Self {
        let mut extras = std::mem::take(&mut self.extra_indexes).into_vec();
        extras.push(index.into());
        self.extra_indexes = OneOrMany::Many(extras);
        self
    }

    /// Requirement hints followed by the project's sources, highest
    /// precedence first.
    fn candidates<P>(&self, project: &P) -> Vec<IndexInput>
    where
        P: Project + ?Sized,
    {
        self.index
            .iter()
            .chain(self.extra_indexes.iter())
            .cloned()
            .chain(
                project
                    .pipfile_sources()
                    .iter()
                    .cloned()
                    .map(IndexInput::Source),
            )
            .collect()
    }
}

/// The indexes one requirement is installed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedIndexes {
    /// Index pip queries first
    pub primary: IndexSource,
    /// Indexes queried afterwards, in order
    pub extras: Vec<IndexSource>,
}

impl ResolvedIndexes {
    /// Iterate over primary then extras.
    pub fn iter(&self) -> impl Iterator<Item = &IndexSource> {
        std::iter::once(&self.primary).chain(self.extras.iter())
    }

    /// Flatten back into a source list.
    pub fn into_sources(self) -> Vec<IndexSource> {
        let mut sources = Vec::with_capacity(1 + self.extras.len());
        sources.push(self.primary);
        sources.extend(self.extras);
        sources
    }
}

/// Resolve the primary and extra indexes for one requirement.
///
/// With more than one candidate, the first candidate becomes the primary
/// index and the rest the extras. With a single candidate, caller options
/// are used as given; the candidate only fills in a missing primary.
pub fn get_indexes_from_requirement<P, M>(
    requirement: &RequirementIndexes,
    project: &P,
    mirror: &M,
    options: &IndexOptions,
) -> Result<ResolvedIndexes, IndexError>
where
    P: Project + ?Sized,
    M: Mirror + ?Sized,
{
    let mut candidates = requirement.candidates(project).into_iter();

    let effective = match candidates.len() {
        0 => options.clone(),
        1 if options.index.is_some() => options.clone(),
        1 => IndexOptions {
            index: candidates.next(),
            ..options.clone()
        },
        _ => IndexOptions {
            index: candidates.next(),
            extra_indexes: OneOrMany::Many(candidates.collect()),
            ..options.clone()
        },
    };

    let mut sources = get_source_list(project, mirror, &effective)?.into_iter();
    let primary = sources.next().ok_or_else(|| IndexError::NoSources {
        requirement: requirement.name.clone(),
    })?;

    let resolved = ResolvedIndexes {
        primary,
        extras: sources.collect(),
    };
    tracing::debug!(
        "Resolved `{}` to {} with {} extra index(es)",
        requirement.name,
        resolved.primary,
        resolved.extras.len()
    );

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::project::PipfileSources;
    use crate::core::trusted_host::TrustedHosts;
    use crate::sources::mirror::PypiMirror;
    use crate::test_support::{project, urls};

    fn two_source_project() -> PipfileSources {
        project(&[
            ("pypi", "https://pypi.org/simple", true),
            ("internal", "http://internal.example/simple", false),
        ])
    }

    #[test]
    fn test_no_hints_uses_project_order() {
        let project = two_source_project();
        let requirement = RequirementIndexes::new("requests");

        let resolved =
            get_indexes_from_requirement(&requirement, &project, &PypiMirror, &IndexOptions::new())
                .unwrap();
        assert_eq!(resolved.primary, project.pipfile_sources()[0]);
        assert_eq!(resolved.extras, vec![project.pipfile_sources()[1].clone()]);
    }

    #[test]
    fn test_requirement_index_takes_precedence() {
        let project = two_source_project();
        let requirement = RequirementIndexes::new("internal-lib").with_index("internal");

        let resolved =
            get_indexes_from_requirement(&requirement, &project, &PypiMirror, &IndexOptions::new())
                .unwrap();
        assert_eq!(resolved.primary.name, "internal");
        assert_eq!(
            urls(&resolved.extras),
            vec!["https://pypi.org/simple"]
        );
    }

    #[test]
    fn test_requirement_extra_indexes_follow_primary() {
        let project = two_source_project();
        let requirement = RequirementIndexes::new("torch")
            .with_index("https://download.pytorch.org/whl/cpu")
            .with_extra_index("https://extra.example/simple");

        let resolved =
            get_indexes_from_requirement(&requirement, &project, &PypiMirror, &IndexOptions::new())
                .unwrap();
        assert_eq!(resolved.primary.url, "https://download.pytorch.org/whl/cpu");
        assert_eq!(resolved.primary.name, "downloadpytorch");
        assert_eq!(
            urls(&resolved.extras),
            vec![
                "https://extra.example/simple",
                "https://pypi.org/simple",
                "http://internal.example/simple",
            ]
        );
    }

    #[test]
    fn test_single_project_source_single_result() {
        let project = project(&[("pypi", "https://pypi.org/simple", true)]);
        let requirement = RequirementIndexes::new("requests");

        let resolved =
            get_indexes_from_requirement(&requirement, &project, &PypiMirror, &IndexOptions::new())
                .unwrap();
        assert_eq!(resolved.primary.name, "pypi");
        assert!(resolved.extras.is_empty());
    }

    #[test]
    fn test_single_candidate_keeps_caller_index() {
        let project = project(&[("pypi", "https://pypi.org/simple", true)]);
        let requirement = RequirementIndexes::new("requests");
        let options = IndexOptions::new().with_index("https://cli.example/simple");

        let resolved =
            get_indexes_from_requirement(&requirement, &project, &PypiMirror, &options).unwrap();
        assert_eq!(resolved.primary.url, "https://cli.example/simple");
        assert_eq!(urls(&resolved.extras), vec!["https://pypi.org/simple"]);
    }

    #[test]
    fn test_trusted_hosts_and_mirror_carry_through() {
        let project = two_source_project();
        let requirement =
            RequirementIndexes::new("lib").with_index("https://secure.example:8443/simple");
        let options = IndexOptions::new()
            .with_trusted_hosts(TrustedHosts::parse_all(["secure.example:8443"]).unwrap())
            .with_pypi_mirror("https://mirror.example/simple");

        let resolved =
            get_indexes_from_requirement(&requirement, &project, &PypiMirror, &options).unwrap();
        assert!(!resolved.primary.verify_ssl);
        assert_eq!(
            urls(&resolved.extras),
            vec![
                "https://mirror.example/simple",
                "http://internal.example/simple"
            ]
        );
    }

    #[test]
    fn test_repeated_resolution_is_identical() {
        let project = two_source_project();
        let requirement = RequirementIndexes::new("torch")
            .with_index("https://download.pytorch.org/whl/cpu")
            .with_extra_index("https://internal.example/simple");
        let options = IndexOptions::new()
            .with_trusted_hosts(TrustedHosts::parse_all(["internal.example"]).unwrap())
            .with_pypi_mirror("https://mirror.example/simple");

        let first =
            get_indexes_from_requirement(&requirement, &project, &PypiMirror, &options).unwrap();
        let second =
            get_indexes_from_requirement(&requirement, &project, &PypiMirror, &options).unwrap();

        assert_eq!(first, second);
        assert!(!first.extras[0].verify_ssl);
        assert!(first
            .iter()
            .any(|source| source.url == "https://mirror.example/simple"));
    }

    #[test]
    fn test_no_sources_is_an_error() {
        let project = PipfileSources::default();
        let requirement = RequirementIndexes::new("requests");

        assert!(matches!(
            get_indexes_from_requirement(&requirement, &project, &PypiMirror, &IndexOptions::new()),
            Err(IndexError::NoSources { ref requirement }) if requirement == "requests"
        ));
    }

    #[test]
    fn test_into_sources_roundtrip_order() {
        let project = two_source_project();
        let resolved = get_indexes_from_requirement(
            &RequirementIndexes::new("requests"),
            &project,
            &PypiMirror,
            &IndexOptions::new(),
        )
        .unwrap();

        let flat: Vec<_> = resolved.iter().cloned().collect();
        assert_eq!(flat, resolved.clone().into_sources());
        assert_eq!(flat, project.pipfile_sources());
    }

    #[test]
    fn test_requirement_hints_deserialize() {
        let requirement: RequirementIndexes = toml::from_str(
            r#"
name = "torch"
index = "pytorch"
extra_indexes = "https://extra.example/simple"
"#,
        )
        .unwrap();

        assert_eq!(requirement.index, Some(IndexInput::Url("pytorch".into())));
        assert_eq!(requirement.extra_indexes.len(), 1);
    }
}
