//! `quay pip-args` command

use anyhow::Result;

use super::IndexContext;
use crate::cli::SourcesArgs;
use quay::ops::{get_source_list, pip_source_args};
use quay::PypiMirror;

pub fn execute(args: SourcesArgs) -> Result<()> {
    let ctx = IndexContext::load(&args.index)?;
    let sources = get_source_list(&ctx.project, &PypiMirror, &ctx.options)?;
    let pip_args = pip_source_args(&sources)?;

    if args.json {
        println!("{}", serde_json::to_string(&pip_args)?);
    } else {
        for arg in &pip_args {
            println!("{}", arg);
        }
    }

    Ok(())
}
