//! Error types for report generation
//!
//! `ParseError` covers everything that can go wrong while reading a single
//! NUnit document. `ReportError` is what a whole run fails with: upfront
//! file checks, I/O, or a parse failure tagged with the offending file.

use std::path::PathBuf;

/// Failure while reading one NUnit result document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The document is not well-formed XML
    #[error("malformed XML: {0}")]
    Xml(String),

    /// The document has no root element
    #[error("malformed XML: document has no root element")]
    NoRoot,

    /// A required child element is absent
    #[error("malformed XML: <{parent}> has no <{element}> element")]
    MissingElement { parent: String, element: String },

    /// A required attribute is absent
    #[error("malformed XML: <{element}> is missing the '{attribute}' attribute")]
    MissingAttribute { element: String, attribute: String },

    /// A counter attribute is present and non-empty but not an integer
    #[error("invalid number '{value}' in attribute '{attribute}'")]
    InvalidNumeric { attribute: String, value: String },

    /// The `date` and `time` attributes do not form a valid timestamp
    #[error("invalid date/time '{value}'")]
    InvalidDate { value: String },
}

impl ParseError {
    /// True for the structural problems that make a document unusable
    /// (syntax errors and missing elements/attributes).
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            ParseError::Xml(_)
                | ParseError::NoRoot
                | ParseError::MissingElement { .. }
                | ParseError::MissingAttribute { .. }
        )
    }
}

/// Failure of a whole report run.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("File '{}' does not exist", .0.display())]
    InputNotFound(PathBuf),

    #[error("Output file '{}' already exists", .0.display())]
    OutputExists(PathBuf),

    /// Every problem found by the upfront checks, reported together
    #[error("{}", join_problems(.0))]
    Preflight(Vec<ReportError>),

    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Flatten a preflight error into its individual problems
    pub fn problems(&self) -> Vec<&ReportError> {
        match self {
            ReportError::Preflight(all) => all.iter().flat_map(|e| e.problems()).collect(),
            other => vec![other],
        }
    }
}

fn join_problems(problems: &[ReportError]) -> String {
    problems
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
