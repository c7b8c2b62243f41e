//! `quay sources` command

use anyhow::Result;

use super::IndexContext;
use crate::cli::SourcesArgs;
use quay::ops::get_source_list;
use quay::PypiMirror;

pub fn execute(args: SourcesArgs) -> Result<()> {
    let ctx = IndexContext::load(&args.index)?;
    let sources = get_source_list(&ctx.project, &PypiMirror, &ctx.options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sources)?);
        return Ok(());
    }

    for (i, source) in sources.iter().enumerate() {
        let role = if i == 0 { "primary" } else { "extra" };
        let tls = if source.verify_ssl { "" } else { "  (no TLS verify)" };
        println!("{:<8} {:<16} {}{}", role, source.name, source.url, tls);
    }

    Ok(())
}
