//! Common infrastructure shared by the scanner, the tables and the reports

mod diagnostic;
mod error;
mod span;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use error::{ClexaError, ClexaResult, DiagnosticReporter};
pub use span::Span;
