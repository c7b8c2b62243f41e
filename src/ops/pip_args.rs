//! Rendering a source list as pip command-line arguments.

use crate::core::errors::IndexError;
use crate::core::source::IndexSource;

/// Append `-i`, `--extra-index-url` and `--trusted-host` arguments for
/// `sources` to `pip_args`.
///
/// The first source is the primary index and must have a URL. Extra sources
/// without a URL are skipped. Every source with TLS verification off adds a
/// `--trusted-host host[:port]` pair right after its URL.
pub fn prepare_pip_source_args(
    sources: &[IndexSource],
    mut pip_args: Vec<String>,
) -> Result<Vec<String>, IndexError> {
    let Some((primary, extras)) = sources.split_first() else {
        return Ok(pip_args);
    };

    if !primary.has_url() {
        return Err(IndexError::MissingSourceUrl);
    }

    pip_args.push("-i".to_string());
    pip_args.push(primary.url.clone());
    push_trusted_host(primary, &mut pip_args)?;

    for source in extras {
        if !source.has_url() {
            tracing::debug!("Skipping extra index `{}` without a URL", source.name);
            continue;
        }
        pip_args.push("--extra-index-url".to_string());
        pip_args.push(source.url.clone());
        push_trusted_host(source, &mut pip_args)?;
    }

    Ok(pip_args)
}

/// Arguments for `sources` alone.
pub fn pip_source_args(sources: &[IndexSource]) -> Result<Vec<String>, IndexError> {
    prepare_pip_source_args(sources, Vec::new())
}

fn push_trusted_host(source: &IndexSource, pip_args: &mut Vec<String>) -> Result<(), IndexError> {
    if !source.verify_ssl {
        pip_args.push("--trusted-host".to_string());
        pip_args.push(source.trusted_host_arg()?);
    }
    Ok(())
}
