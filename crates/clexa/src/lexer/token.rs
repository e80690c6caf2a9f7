//! Token definitions for the table-building lexer

use crate::common::Span;
use std::fmt;

/// Lexical category assigned by the rule that matched
///
/// The categories carrying a label are the ones that reach the tables. The
/// label-less ones (comments, whitespace, newline) are handled by dedicated logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Preprocessor,
    LineComment,
    BlockCommentStart,
    BlockCommentEnd,
    Keyword,
    Procedure,
    Array,
    Pointer,
    Identifier,
    Relational,
    Logical,
    Arithmetic,
    Assignment,
    Punctuator,
    Integer,
    Float,
    Char,
    String,
    Whitespace,
    Newline,
}

impl Category {
    /// Single-letter tag used in dumps
    pub fn code(self) -> Option<char> {
        let code = match self {
            Category::Preprocessor => 'd',
            Category::Keyword => 'k',
            Category::Procedure => 'j',
            Category::Array => 'a',
            Category::Pointer => 'q',
            Category::Identifier => 'i',
            Category::Relational => 'r',
            Category::Logical => 'l',
            Category::Arithmetic => 'o',
            Category::Assignment => 'e',
            Category::Punctuator => 'p',
            Category::Integer => 'c',
            Category::Float => 'f',
            Category::Char => 'z',
            Category::String => 's',
            Category::LineComment
            | Category::BlockCommentStart
            | Category::BlockCommentEnd
            | Category::Whitespace
            | Category::Newline => return None,
        };
        Some(code)
    }

    /// Human-readable name, absent for categories that never reach the tables
    pub fn label(self) -> Option<&'static str> {
        let label = match self {
            Category::Preprocessor => "Preprocessor Statement",
            Category::Keyword => "Keyword",
            Category::Procedure => "Procedure",
            Category::Array => "Array",
            Category::Pointer => "Pointer",
            Category::Identifier => "Identifier",
            Category::Relational => "Relational Op",
            Category::Logical => "Logical Op",
            Category::Arithmetic => "Arithmetic Op",
            Category::Assignment => "Assignment Op",
            Category::Punctuator => "Punctuator",
            Category::Integer => "Integer Constant",
            Category::Float => "Float Constant",
            Category::Char => "Character Constant",
            Category::String => "String Literal",
            Category::LineComment
            | Category::BlockCommentStart
            | Category::BlockCommentEnd
            | Category::Whitespace
            | Category::Newline => return None,
        };
        Some(label)
    }

    /// Whether tokens of this category are handed to the table builder
    pub fn is_recorded(self) -> bool {
        self.label().is_some()
    }

    pub fn is_comment_delimiter(self) -> bool {
        matches!(self, Category::BlockCommentStart | Category::BlockCommentEnd)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => write!(f, "{}", label),
            None => write!(f, "{:?}", self),
        }
    }
}

/// A matched lexeme with its category and the line it starts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub category: Category,
    pub text: &'a str,
    pub span: Span,
    pub line: usize,
}

impl<'a> Token<'a> {
    pub fn new(category: Category, text: &'a str, span: Span, line: usize) -> Self {
        Self {
            category,
            text,
            span,
            line,
        }
    }
}

/// One step of the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent<'a> {
    /// A rule matched at the cursor
    Token(Token<'a>),
    /// Free text consumed inside a block comment
    CommentText { text: &'a str, span: Span, line: usize },
    /// No rule matched; one character was skipped
    Invalid { ch: char, span: Span, line: usize },
}

impl ScanEvent<'_> {
    pub fn span(&self) -> Span {
        match self {
            ScanEvent::Token(token) => token.span,
            ScanEvent::CommentText { span, .. } | ScanEvent::Invalid { span, .. } => *span,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ScanEvent::Token(token) => token.line,
            ScanEvent::CommentText { line, .. } | ScanEvent::Invalid { line, .. } => *line,
        }
    }
}
