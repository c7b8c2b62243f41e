//! `quay lint` command
//!
//! Reports the index directives of a requirements file.

use anyhow::{bail, Context, Result};

use crate::cli::LintArgs;
use quay::ops::parse_requirements_text;
use quay::util::diagnostic;
use quay::IndexError;

pub fn execute(args: LintArgs, color: bool) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let origin = args.file.display().to_string();

    let parsed = match parse_requirements_text(&origin, &text, args.strict) {
        Ok(parsed) => parsed,
        Err(IndexError::AtLine {
            line_number,
            source,
        }) => match *source {
            IndexError::ConflictingDirectives(conflict) => {
                eprintln!("{:?}", miette::Report::new(conflict));
                bail!(
                    "{}:{}: index arguments must be on their own lines",
                    origin,
                    line_number
                );
            }
            other => {
                diagnostic::emit(
                    &other
                        .to_diagnostic()
                        .with_location(format!("{}:{}", origin, line_number)),
                    color,
                );
                bail!("{} has invalid index directives", origin);
            }
        },
        Err(e) => return Err(e.into()),
    };

    if args.json {
        let lines: Vec<_> = parsed
            .iter()
            .map(|(line, directive)| serde_json::json!({ "line": line, "directive": directive }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&lines)?);
        return Ok(());
    }

    for (line, directive) in &parsed {
        if let Some(ref index) = directive.index {
            println!("{}: index-url {}", line, index);
        }
        if let Some(ref extra) = directive.extra_index {
            println!("{}: extra-index-url {}", line, extra);
        }
        if let Some(ref host) = directive.trusted_host {
            println!("{}: trusted-host {}", line, host);
        }
    }

    tracing::info!(
        "{} line(s) checked in {}",
        text.lines().count(),
        origin
    );

    Ok(())
}
