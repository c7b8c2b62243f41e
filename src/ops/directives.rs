//! Index directives embedded in requirement-file lines.
//!
//! Recognizes `-i`/`--index-url`, `--extra-index-url` and `--trusted-host`.
//! Every other token is kept in [`IndexDirective::remainder`] so the caller
//! can validate it.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::core::errors::{ConflictingDirectivesError, IndexError};

/// A `#` at line start or after whitespace starts a comment.
static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s+)#.*$").expect("valid comment regex"));

/// Origin name used in diagnostics for a single parsed line.
const LINE_ORIGIN: &str = "<line>";

/// Index-related fields parsed from one line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexDirective {
    pub index: Option<String>,
    pub extra_index: Option<String>,
    pub trusted_host: Option<String>,
    /// Unrecognized tokens, in line order
    pub remainder: Vec<String>,
}

impl IndexDirective {
    /// How many of {index, extra index, trusted host, remainder} are present.
    pub fn directive_count(&self) -> usize {
        [
            self.index.is_some(),
            self.extra_index.is_some(),
            self.trusted_host.is_some(),
            !self.remainder.is_empty(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Check if the line carried nothing at all.
    pub fn is_empty(&self) -> bool {
        self.directive_count() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Index,
    ExtraIndex,
    TrustedHost,
}

impl Flag {
    fn from_name(name: &str) -> Option<Flag> {
        match name {
            "-i" | "--index-url" => Some(Flag::Index),
            "--extra-index-url" => Some(Flag::ExtraIndex),
            "--trusted-host" => Some(Flag::TrustedHost),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Flag::Index => "--index-url",
            Flag::ExtraIndex => "--extra-index-url",
            Flag::TrustedHost => "--trusted-host",
        }
    }

    /// Split a token into a flag and an attached value, if it is a flag.
    ///
    /// Accepts `--flag`, `--flag=value`, `-i`, `-i=value` and `-ivalue`.
    fn parse(token: &str) -> Option<(Flag, Option<&str>)> {
        if let Some(flag) = Flag::from_name(token) {
            return Some((flag, None));
        }

        if let Some((name, value)) = token.split_once('=') {
            if let Some(flag) = Flag::from_name(name) {
                return Some((flag, Some(value)));
            }
        }

        if !token.starts_with("--") {
            if let Some(value) = token.strip_prefix("-i") {
                return Some((Flag::Index, Some(value)));
            }
        }

        None
    }
}

/// Strip a trailing comment from a line.
pub fn strip_comment(line: &str) -> std::borrow::Cow<'_, str> {
    COMMENT_RE.replace(line, "")
}

/// Parse the index directives of one line.
///
/// In strict mode a line may carry only one of: an index, an extra index, a
/// trusted host, or other content.
pub fn parse_indexes(line: &str, strict: bool) -> Result<IndexDirective, IndexError> {
    parse_line(LINE_ORIGIN, line, strict)
}

fn parse_line(origin: &str, line: &str, strict: bool) -> Result<IndexDirective, IndexError> {
    let stripped = strip_comment(line);
    let mut directive = IndexDirective::default();
    let mut tokens = stripped.split_whitespace();

    while let Some(token) = tokens.next() {
        let Some((flag, attached)) = Flag::parse(token) else {
            directive.remainder.push(token.to_string());
            continue;
        };

        let value = match attached {
            Some(value) => Some(value),
            None => tokens.next(),
        };
        let value = match value {
            Some(value) if !value.is_empty() && !looks_like_option(value) => value.to_string(),
            _ => {
                return Err(IndexError::MissingDirectiveValue {
                    flag: flag.name().to_string(),
                })
            }
        };

        // Last occurrence wins, like the installer's own option parser.
        match flag {
            Flag::Index => directive.index = Some(value),
            Flag::ExtraIndex => directive.extra_index = Some(value),
            Flag::TrustedHost => directive.trusted_host = Some(value),
        }
    }

    if strict && directive.directive_count() > 1 {
        return Err(ConflictingDirectivesError::new(origin, &stripped).into());
    }

    Ok(directive)
}

fn looks_like_option(token: &str) -> bool {
    token.len() > 1 && token.starts_with('-')
}

/// Parse the index directives of every line of a requirements file.
///
/// Blank and comment-only lines are skipped. Line numbers are 1-based; the
/// first error is returned with its line number attached.
pub fn parse_requirements_text(
    origin: &str,
    text: &str,
    strict: bool,
) -> Result<Vec<(usize, IndexDirective)>, IndexError> {
    let mut parsed = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_number = idx + 1;
        let directive = parse_line(origin, line, strict).map_err(|e| e.at_line(line_number))?;
        if !directive.is_empty() {
            parsed.push((line_number, directive));
        }
    }

    Ok(parsed)
}
