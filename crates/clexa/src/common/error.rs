//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic as CodespanDiagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use std::path::PathBuf;
use thiserror::Error;

use super::{Diagnostic, DiagnosticKind, Severity};

/// Operational failure outside the scan itself
///
/// Scanning never fails; these only come from loading input or writing reports.
#[derive(Error, Debug)]
pub enum ClexaError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("diagnostic rendering failed: {0}")]
    Render(#[from] codespan_reporting::files::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClexaError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type ClexaResult<T> = Result<T, ClexaError>;

/// Diagnostic reporter for pretty output with source snippets
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    /// Render every diagnostic to stderr
    pub fn report_all(&self, file_id: usize, diagnostics: &[Diagnostic]) -> ClexaResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let mut lock = writer.lock();
        for diagnostic in diagnostics {
            self.emit(&mut lock, file_id, diagnostic)?;
        }
        Ok(())
    }

    /// Render one diagnostic to an arbitrary sink
    pub fn emit(
        &self,
        writer: &mut dyn WriteColor,
        file_id: usize,
        diagnostic: &Diagnostic,
    ) -> ClexaResult<()> {
        let rendered = self.to_codespan(file_id, diagnostic);
        term::emit(writer, &self.config, &self.files, &rendered)?;
        Ok(())
    }

    fn to_codespan(&self, file_id: usize, diagnostic: &Diagnostic) -> CodespanDiagnostic<usize> {
        let base = match diagnostic.severity {
            Severity::Error => CodespanDiagnostic::error(),
            Severity::Warning => CodespanDiagnostic::warning(),
        };

        let headline = match diagnostic.kind {
            DiagnosticKind::InvalidCharacter { .. } => "Lexer error",
            DiagnosticKind::NestedComment
            | DiagnosticKind::UnexpectedCommentEnd
            | DiagnosticKind::UnterminatedComment => "Comment error",
            DiagnosticKind::UnbalancedBraces { .. } => "Brace error",
        };

        base.with_message(headline)
            .with_labels(vec![
                Label::primary(file_id, diagnostic.span.range()).with_message(&diagnostic.message),
            ])
            .with_notes(vec![format!("line {}", diagnostic.line)])
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
