//! Analysis driver
//!
//! One analysis is one pass of the scanner over one buffer. All mutable state
//! lives in an [`AnalysisContext`] created for that pass; when the scanner is
//! exhausted the context is frozen into an [`Analysis`].

mod comments;

pub use comments::{CommentLog, CommentTracker};

use crate::common::{Diagnostic, DiagnosticKind, Span};
use crate::lexer::{brace_delta, Category, ScanEvent, ScanMode, Scanner, Token};
use crate::report::Report;
use crate::tables::{AttributePolicy, TableBuilder, Tables};

/// Configuration options for an analysis
#[derive(Debug, Clone, Default)]
pub struct AnalyzerConfig {
    pub attributes: AttributePolicy,
    /// Let keyword and integer matches yield to procedure and float matches
    pub defer_shadowed: bool,
    /// Inside block comments only recognize delimiters and whitespace
    pub isolate_comments: bool,
}

/// Entry point for analyzing source text
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Scan `source` to the end and build every table
    pub fn analyze(&self, source: &str) -> Analysis {
        let mut scanner = Scanner::new(source).deferring(self.config.defer_shadowed);
        let mut ctx = AnalysisContext::new(&self.config);

        while let Some(event) = scanner.next_event(ctx.mode()) {
            ctx.dispatch(event);
        }

        let analysis = ctx.finish(scanner.line(), Span::point(source.len()));
        log::debug!(
            "analyzed {} bytes: {} symbols, {} constants, {} parsed, {} diagnostics",
            source.len(),
            analysis.tables.symbols.len(),
            analysis.tables.constants.len(),
            analysis.tables.parsed.len(),
            analysis.diagnostics.len()
        );
        analysis
    }
}

/// Convenience function to analyze with the default configuration
pub fn analyze(source: &str) -> Analysis {
    Analyzer::default().analyze(source)
}

/// Mutable state of one analysis pass
pub struct AnalysisContext {
    comments: CommentTracker,
    tables: TableBuilder,
    diagnostics: Vec<Diagnostic>,
    brace_balance: i64,
    isolate_comments: bool,
}

impl AnalysisContext {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            comments: CommentTracker::new(),
            tables: TableBuilder::new(config.attributes),
            diagnostics: Vec::new(),
            brace_balance: 0,
            isolate_comments: config.isolate_comments,
        }
    }

    /// Scan mode the next event must be produced under
    pub fn mode(&self) -> ScanMode {
        if self.isolate_comments && self.comments.is_open() {
            ScanMode::Comment
        } else {
            ScanMode::Code
        }
    }

    pub fn dispatch(&mut self, event: ScanEvent<'_>) {
        match event {
            ScanEvent::Token(token) => self.dispatch_token(&token),
            ScanEvent::CommentText { text, .. } => self.comments.absorb(text),
            ScanEvent::Invalid { ch, span, line } => {
                self.report(DiagnosticKind::InvalidCharacter { ch }, line, span)
            }
        }
    }

    fn dispatch_token(&mut self, token: &Token<'_>) {
        match token.category {
            Category::BlockCommentStart => {
                if let Some(kind) = self.comments.open(token.text) {
                    self.report(kind, token.line, token.span);
                }
            }
            Category::BlockCommentEnd => {
                if let Some(kind) = self.comments.close(token.text) {
                    self.report(kind, token.line, token.span);
                }
            }
            _ if self.comments.is_open() => self.comments.absorb(token.text),
            Category::LineComment => self.comments.line_comment(token.text),
            Category::Whitespace | Category::Newline => {}
            _ => {
                self.brace_balance += brace_delta(token);
                self.tables.record(token);
            }
        }
    }

    fn report(&mut self, kind: DiagnosticKind, line: usize, span: Span) {
        self.diagnostics.push(Diagnostic::new(kind, line, span));
    }

    /// Run end-of-input checks and freeze the results
    pub fn finish(mut self, line: usize, end: Span) -> Analysis {
        let (comments, unterminated) = self.comments.finish();
        if let Some(kind) = unterminated {
            self.diagnostics.push(Diagnostic::new(kind, line, end));
        }
        if self.brace_balance != 0 {
            let kind = DiagnosticKind::UnbalancedBraces {
                balance: self.brace_balance,
            };
            self.diagnostics.push(Diagnostic::new(kind, line, end));
        }

        Analysis {
            tables: self.tables.finish(),
            comments,
            diagnostics: self.diagnostics,
            brace_balance: self.brace_balance,
        }
    }
}

/// Frozen result of an analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub tables: Tables,
    pub comments: CommentLog,
    pub diagnostics: Vec<Diagnostic>,
    pub brace_balance: i64,
}

impl Analysis {
    /// Structured projection for serializers and the text writer
    pub fn report(&self) -> Report<'_> {
        Report::new(self)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn diagnostics_of(&self, matches: impl Fn(&DiagnosticKind) -> bool) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| matches(&d.kind)).collect()
    }
}
