//! Block comment nesting and the comment inventory

use crate::common::DiagnosticKind;

const LINE_COMMENT_DELIMITER: &str = "//";

/// Tracks block comment nesting and collects comment text during a scan
#[derive(Debug, Default)]
pub struct CommentTracker {
    depth: usize,
    nested: bool,
    pending: String,
    blocks: Vec<String>,
    line_comments: Vec<String>,
    raw: Vec<String>,
    block_lines: usize,
}

impl CommentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently open block comments
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_open(&self) -> bool {
        self.depth > 0
    }

    /// Sticky: once a nested `/*` was seen this stays true
    pub fn nested_seen(&self) -> bool {
        self.nested
    }

    /// Record a `//` comment (the full matched text, delimiter included)
    pub fn line_comment(&mut self, text: &str) {
        let body = text.strip_prefix(LINE_COMMENT_DELIMITER).unwrap_or(text);
        self.line_comments.push(body.trim().to_string());
        self.raw.push(text.to_string());
    }

    /// Handle `/*`. Returns a diagnostic when the comment is nested.
    ///
    /// Every opening restarts the buffer, so a nested comment is recorded on its
    /// own when it closes.
    pub fn open(&mut self, delimiter: &str) -> Option<DiagnosticKind> {
        self.depth += 1;
        self.block_lines += 1;
        self.pending.clear();
        self.pending.push_str(delimiter);

        if self.depth == 1 {
            return None;
        }
        self.nested = true;
        Some(DiagnosticKind::NestedComment)
    }

    /// Handle `*/`. Returns a diagnostic when no comment is open.
    pub fn close(&mut self, delimiter: &str) -> Option<DiagnosticKind> {
        let unexpected = if self.depth == 0 {
            Some(DiagnosticKind::UnexpectedCommentEnd)
        } else {
            self.depth -= 1;
            None
        };

        if !self.pending.is_empty() {
            self.pending.push_str(delimiter);
            let finished = std::mem::take(&mut self.pending);
            self.raw.push(finished.clone());
            self.blocks.push(finished);
        }
        unexpected
    }

    /// Append text scanned while a block comment is open
    pub fn absorb(&mut self, text: &str) {
        self.pending.push_str(text);
    }

    /// Freeze the inventory, reporting a comment left open at end of input
    pub fn finish(self) -> (CommentLog, Option<DiagnosticKind>) {
        let unterminated = (self.depth != 0).then_some(DiagnosticKind::UnterminatedComment);
        let log = CommentLog {
            blocks: self.blocks,
            line_comments: self.line_comments,
            raw: self.raw,
            nested: self.nested,
            block_lines: self.block_lines,
        };
        (log, unterminated)
    }
}

/// Comment inventory of a finished analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentLog {
    blocks: Vec<String>,
    line_comments: Vec<String>,
    raw: Vec<String>,
    nested: bool,
    block_lines: usize,
}

impl CommentLog {
    /// Finished block comments in closing order, each from its most recent `/*`
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// `//` comment bodies without the delimiter
    pub fn line_comments(&self) -> &[String] {
        &self.line_comments
    }

    /// Every finished comment as written, in completion order
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    pub fn nested_seen(&self) -> bool {
        self.nested
    }

    /// Number of block comment openings, nested ones included
    pub fn block_lines(&self) -> usize {
        self.block_lines
    }
}
