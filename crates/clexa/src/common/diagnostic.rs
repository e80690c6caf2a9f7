//! Non-fatal findings recorded while scanning
//!
//! Nothing the scanner encounters aborts an analysis. Every anomaly becomes a
//! [`Diagnostic`] carrying the line it was found on, and scanning carries on.

use super::Span;
use serde::Serialize;
use thiserror::Error;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// The kinds of anomaly an analysis can report
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// No rule matched at the cursor; the character was skipped
    #[error("invalid character '{ch}'")]
    InvalidCharacter { ch: char },

    /// `/*` seen while a block comment was already open
    #[error("nested comment")]
    NestedComment,

    /// `*/` seen with no block comment open
    #[error("*/ found before /*")]
    UnexpectedCommentEnd,

    /// A block comment was still open at end of input
    #[error("comment does not end")]
    UnterminatedComment,

    /// `{` and `}` counts differ at end of input
    #[error("unbalanced braces ({balance:+})")]
    UnbalancedBraces { balance: i64 },
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::NestedComment | DiagnosticKind::UnexpectedCommentEnd => {
                Severity::Warning
            }
            DiagnosticKind::InvalidCharacter { .. }
            | DiagnosticKind::UnterminatedComment
            | DiagnosticKind::UnbalancedBraces { .. } => Severity::Error,
        }
    }
}

/// A diagnostic anchored to a line and a byte range of the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub line: usize,
    pub span: Span,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: usize, span: Span) -> Self {
        Self {
            severity: kind.severity(),
            line,
            span,
            message: kind.to_string(),
            kind,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
