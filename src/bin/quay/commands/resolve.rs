//! `quay resolve` command

use anyhow::Result;

use super::IndexContext;
use crate::cli::ResolveArgs;
use quay::ops::{get_indexes_from_requirement, RequirementIndexes};
use quay::PypiMirror;

pub fn execute(args: ResolveArgs) -> Result<()> {
    let ctx = IndexContext::load(&args.index)?;

    let mut requirement = RequirementIndexes::new(&args.name);
    if let Some(index) = args.req_index {
        requirement = requirement.with_index(index);
    }
    for extra in args.req_extra_index {
        requirement = requirement.with_extra_index(extra);
    }

    let resolved =
        get_indexes_from_requirement(&requirement, &ctx.project, &PypiMirror, &ctx.options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolved)?);
        return Ok(());
    }

    println!("{}:", args.name);
    println!("  index: {}", resolved.primary);
    for extra in &resolved.extras {
        println!("  extra: {}", extra);
    }

    Ok(())
}
