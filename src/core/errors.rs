//! Index resolution error types and diagnostics.

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::core::trusted_host::TrustedHostError;
use crate::util::diagnostic::Diagnostic;

/// Error while resolving, parsing, or formatting index sources.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("[[source]] section does not contain a URL")]
    MissingSourceUrl,

    #[error("invalid index URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("source not found and not constructible: `{0}`")]
    SourceNotFound(String),

    #[error("no index sources available for `{requirement}`")]
    NoSources { requirement: String },

    #[error(transparent)]
    ConflictingDirectives(#[from] ConflictingDirectivesError),

    #[error("option `{flag}` expects one argument")]
    MissingDirectiveValue { flag: String },

    #[error("line {line_number}: {source}")]
    AtLine {
        line_number: usize,
        #[source]
        source: Box<IndexError>,
    },

    #[error(transparent)]
    TrustedHost(#[from] TrustedHostError),
}

impl IndexError {
    /// Attach a 1-based line number to this error.
    pub fn at_line(self, line_number: usize) -> Self {
        IndexError::AtLine {
            line_number,
            source: Box::new(self),
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            IndexError::MissingSourceUrl => Diagnostic::error(self.to_string())
                .with_suggestion("Add a `url = \"...\"` key to the first [[source]] table"),

            IndexError::InvalidUrl { url, reason } => {
                Diagnostic::error(format!("invalid index URL `{}`", url))
                    .with_context(reason.clone())
                    .with_suggestion("Use a full URL such as `https://pypi.org/simple`")
            }

            IndexError::SourceNotFound(identifier) => {
                Diagnostic::error(format!("could not find index `{}`", identifier))
                    .with_context("not the name or URL of any [[source]], and not a valid URL")
                    .with_suggestion("Check the [[source]] names in your Pipfile")
                    .with_suggestion("Pass a full index URL instead of a name")
            }

            IndexError::NoSources { requirement } => Diagnostic::error(format!(
                "no index sources available for `{}`",
                requirement
            ))
            .with_suggestion("Add at least one [[source]] table to your Pipfile"),

            IndexError::ConflictingDirectives(err) => {
                Diagnostic::error(err.to_string())
                    .with_context(format!("line: {}", err.line))
                    .with_suggestion(
                        "Put `-i`, `--extra-index-url` and `--trusted-host` on their own lines",
                    )
            }

            IndexError::MissingDirectiveValue { flag } => {
                Diagnostic::error(self.to_string())
                    .with_suggestion(format!("Write `{} <value>` on the line", flag))
            }

            IndexError::AtLine {
                line_number,
                source,
            } => source
                .to_diagnostic()
                .with_context(format!("at line {}", line_number)),

            IndexError::TrustedHost(err) => Diagnostic::error(err.to_string())
                .with_suggestion("Trusted hosts are written as `host` or `host:port`"),
        }
    }
}

/// More than one index directive on a single requirement-file line.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("conflicting index directives on one line")]
#[diagnostic(
    code(quay::directives::conflict),
    help("index arguments must be on their own lines")
)]
pub struct ConflictingDirectivesError {
    /// The offending line, comment stripped
    pub line: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("combined here")]
    pub span: SourceSpan,
}

impl ConflictingDirectivesError {
    /// Build an error covering the directive text of `line`.
    pub fn new(origin: impl AsRef<str>, line: &str) -> Self {
        let start = line.len() - line.trim_start().len();
        let len = line.trim().len();

        ConflictingDirectivesError {
            line: line.trim().to_string(),
            src: NamedSource::new(origin, line.to_string()),
            span: (start, len).into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_span_covers_trimmed_line() {
        let err = ConflictingDirectivesError::new("requirements.txt", "  -i a --trusted-host b");
        assert_eq!(err.span.offset(), 2);
        assert_eq!(err.span.len(), "-i a --trusted-host b".len());
        assert_eq!(err.line, "-i a --trusted-host b");
    }

    #[test]
    fn test_not_found_diagnostic() {
        let err = IndexError::SourceNotFound("internal".to_string());
        let output = err.to_diagnostic().format(false);

        assert!(output.contains("could not find index `internal`"));
        assert!(output.contains("help: consider:"));
    }

    #[test]
    fn test_at_line_diagnostic() {
        let err = IndexError::from(ConflictingDirectivesError::new("-", "-i a -i b")).at_line(7);
        assert_eq!(
            err.to_string(),
            "line 7: conflicting index directives on one line"
        );

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("at line 7"));
        assert!(output.contains("line: -i a -i b"));
    }
}
