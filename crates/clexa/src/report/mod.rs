//! Read-only projections of a finished analysis
//!
//! [`Report`] borrows the frozen tables and is what serializers consume; the
//! [`text`] module renders it as the fixed-column plain-text report files.

pub mod text;

use serde::Serialize;

use crate::analysis::{Analysis, CommentLog};
use crate::common::Diagnostic;
use crate::tables::{ConstantEntry, ParsedEntry, SymbolEntry};

pub use text::TextReport;

/// What the comment section shows
///
/// Once a nested comment was seen the block texts are unreliable, so only the
/// line count is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommentsView<'a> {
    Nested {
        lines: usize,
    },
    Listed {
        lines: usize,
        multi_line: &'a [String],
        single_line: &'a [String],
    },
}

impl<'a> CommentsView<'a> {
    pub fn new(log: &'a CommentLog) -> Self {
        if log.nested_seen() {
            CommentsView::Nested {
                lines: log.block_lines(),
            }
        } else {
            CommentsView::Listed {
                lines: log.block_lines(),
                multi_line: log.blocks(),
                single_line: log.line_comments(),
            }
        }
    }
}

/// Structured view over the four output tables and the diagnostics
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub symbol_table: &'a [SymbolEntry],
    pub constant_table: &'a [ConstantEntry],
    pub parsed_table: &'a [ParsedEntry],
    pub comments: CommentsView<'a>,
    pub diagnostics: &'a [Diagnostic],
}

impl<'a> Report<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self {
            symbol_table: &analysis.tables.symbols,
            constant_table: &analysis.tables.constants,
            parsed_table: &analysis.tables.parsed,
            comments: CommentsView::new(&analysis.comments),
            diagnostics: &analysis.diagnostics,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_text(&self) -> TextReport {
        TextReport::render(self)
    }
}
