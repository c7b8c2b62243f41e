//! Command implementations

pub mod completions;
pub mod lint;
pub mod pip_args;
pub mod resolve;
pub mod sources;

use std::path::Path;

use anyhow::Result;

use crate::cli::IndexArgs;
use quay::core::source::OneOrMany;
use quay::util::config::{global_config_path, load_config, project_config_path};
use quay::{IndexInput, IndexOptions, PipfileSources, TrustedHosts};

/// Project sources and merged index options for one invocation.
pub struct IndexContext {
    pub project: PipfileSources,
    pub options: IndexOptions,
}

impl IndexContext {
    /// Load the Pipfile and config, then layer the command-line flags on top.
    pub fn load(args: &IndexArgs) -> Result<Self> {
        let project_root = args
            .pipfile
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));

        let config = load_config(
            global_config_path().as_deref(),
            &project_config_path(project_root),
        );

        let project = if args.pipfile.exists() {
            PipfileSources::load(&args.pipfile)?
        } else {
            tracing::info!(
                "No Pipfile at {}, using the default PyPI source",
                args.pipfile.display()
            );
            PipfileSources::new(vec![quay::IndexSource::pypi()])
        };

        let mut trusted_hosts = config.trusted_hosts()?;
        trusted_hosts.extend(TrustedHosts::parse_all(&args.trusted_host)?.iter().cloned());

        let options = IndexOptions {
            index: args.index.clone().map(IndexInput::Url),
            extra_indexes: OneOrMany::Many(
                args.extra_index_url
                    .iter()
                    .cloned()
                    .map(IndexInput::Url)
                    .collect(),
            ),
            trusted_hosts,
            pypi_mirror: args.pypi_mirror.clone().or(config.index.pypi_mirror),
        };

        Ok(IndexContext { project, options })
    }
}
