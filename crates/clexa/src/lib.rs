//! clexa - lexical analyzer for C-like source text
//!
//! This library classifies source text into lexical categories and builds the
//! symbol, constant and parsed-token tables plus a comment inventory.
//!
//! ## Architecture
//!
//! The analyzer is organized into:
//! - **Lexer** (`lexer/`): Ordered rule table and the scanner that applies it
//! - **Tables** (`tables/`): Deduplicating symbol/constant/parsed table builder
//! - **Analysis** (`analysis/`): Per-run context, comment tracking, brace balance
//! - **Report** (`report/`): Structured and plain-text projections of the tables
//! - **Common** (`common/`): Shared infrastructure (diagnostics, errors, spans)

pub mod analysis;
pub mod common;
pub mod lexer;
pub mod report;
pub mod tables;

// Re-exports for convenience
pub use analysis::{analyze, Analysis, Analyzer, AnalyzerConfig};
pub use common::{ClexaError, ClexaResult, Diagnostic, DiagnosticKind, DiagnosticReporter, Severity, Span};
pub use report::{CommentsView, Report, TextReport};
pub use tables::{AttributeId, AttributePolicy};
