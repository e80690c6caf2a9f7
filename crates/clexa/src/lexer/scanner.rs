//! Scanner driving the ordered rule table over a source buffer

use super::rules::{MatchOptions, RuleTable};
use super::token::{Category, ScanEvent, Token};
use crate::common::Span;

/// Which rules the scanner tries at the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Full rule table
    #[default]
    Code,
    /// Inside an isolated block comment: only comment delimiters, whitespace and
    /// newlines are recognized, anything else is consumed as comment text
    Comment,
}

/// Scanner over an in-memory source buffer
///
/// Produces a finite sequence of [`ScanEvent`]s whose spans tile the input
/// exactly. Once exhausted it stays exhausted; create a new scanner to rescan.
pub struct Scanner<'a> {
    source: &'a str,
    rules: &'static RuleTable,
    pos: usize,
    line: usize,
    at_line_start: bool,
    defer: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given source code
    pub fn new(source: &'a str) -> Self {
        Self::with_rules(source, RuleTable::standard())
    }

    pub fn with_rules(source: &'a str, rules: &'static RuleTable) -> Self {
        Self {
            source,
            rules,
            pos: 0,
            line: 1,
            at_line_start: true,
            defer: false,
        }
    }

    /// Let shadowed rules win through their `defer_to` target
    pub fn deferring(mut self, defer: bool) -> Self {
        self.defer = defer;
        self
    }

    /// Current 1-based line (the line of the next event)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte offset of the cursor
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Get the source being scanned
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Advance past the next lexeme under the given mode
    pub fn next_event(&mut self, mode: ScanMode) -> Option<ScanEvent<'a>> {
        if self.is_at_end() {
            return None;
        }

        let source = self.source;
        let start = self.pos;
        let line = self.line;
        let rest = &source[start..];
        let opts = MatchOptions {
            line_start: self.at_line_start,
            in_comment: mode == ScanMode::Comment,
            defer: self.defer,
        };

        let event = match self.rules.match_at(source, start, opts) {
            Some((index, len)) => {
                let category = self.rules.rules()[index].category;
                let span = Span::new(start, start + len);
                ScanEvent::Token(Token::new(category, &rest[..len], span, line))
            }
            None if opts.in_comment => {
                let len = comment_text_len(rest);
                ScanEvent::CommentText {
                    text: &rest[..len],
                    span: Span::new(start, start + len),
                    line,
                }
            }
            None => {
                let ch = rest.chars().next()?;
                ScanEvent::Invalid {
                    ch,
                    span: Span::new(start, start + ch.len_utf8()),
                    line,
                }
            }
        };

        let span = event.span();
        self.advance(&source[span.range()]);
        self.pos = span.end;

        log::trace!("{}:{} {:?}", line, start, event);
        Some(event)
    }

    fn advance(&mut self, text: &str) {
        match text.rfind('\n') {
            Some(last) => {
                self.line += text.matches('\n').count();
                self.at_line_start = is_blank(&text[last + 1..]);
            }
            None => self.at_line_start &= is_blank(text),
        }
    }

    /// Scan the rest of the buffer in code mode, keeping only matched tokens
    pub fn tokenize_all(self) -> Vec<Token<'a>> {
        self.filter_map(|event| match event {
            ScanEvent::Token(token) => Some(token),
            _ => None,
        })
        .collect()
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = ScanEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event(ScanMode::Code)
    }
}

fn is_blank(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\r'))
}

/// Length of a free-text run inside a comment: at least one character, then up
/// to the next character that could start a delimiter or whitespace
fn comment_text_len(rest: &str) -> usize {
    let first = rest.chars().next().map_or(0, char::len_utf8);
    rest[first..]
        .find(|c: char| c == '/' || c == '*' || c.is_whitespace())
        .map_or(rest.len(), |i| first + i)
}

/// Change in brace balance caused by the token
pub fn brace_delta(token: &Token<'_>) -> i64 {
    match (token.category, token.text) {
        (Category::Punctuator, "{") => 1,
        (Category::Punctuator, "}") => -1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<(Category, &str)> {
        Scanner::new(source)
            .tokenize_all()
            .into_iter()
            .filter(|t| t.category.is_recorded())
            .map(|t| (t.category, t.text))
            .collect()
    }

    #[test]
    fn test_simple_declaration() {
        assert_eq!(
            kinds("int x = 5;\n"),
            vec![
                (Category::Keyword, "int"),
                (Category::Identifier, "x"),
                (Category::Assignment, "="),
                (Category::Integer, "5"),
                (Category::Punctuator, ";"),
            ]
        );
    }

    #[test]
    fn test_simple_function() {
        assert_eq!(
            kinds("int main() { return 0; }"),
            vec![
                (Category::Keyword, "int"),
                (Category::Identifier, "main"),
                (Category::Punctuator, "("),
                (Category::Punctuator, ")"),
                (Category::Punctuator, "{"),
                (Category::Keyword, "return"),
                (Category::Integer, "0"),
                (Category::Punctuator, ";"),
                (Category::Punctuator, "}"),
            ]
        );
    }

    #[test]
    fn test_deferring_scanner() {
        let tokens: Vec<(Category, &str)> = Scanner::new("int main() { x = 3.14; }")
            .deferring(true)
            .tokenize_all()
            .into_iter()
            .filter(|t| t.category.is_recorded())
            .map(|t| (t.category, t.text))
            .collect();
        assert_eq!(
            tokens,
            vec![
                (Category::Procedure, "int main()"),
                (Category::Punctuator, "{"),
                (Category::Identifier, "x"),
                (Category::Assignment, "="),
                (Category::Float, "3.14"),
                (Category::Punctuator, ";"),
                (Category::Punctuator, "}"),
            ]
        );
    }

    #[test]
    fn test_preprocessor_tracks_line_start() {
        let source = "#a\n  #b\nx #c\n\"s\n\" #d\n\"s\n\"\n\t#e";
        let lines: Vec<(&str, usize)> = Scanner::new(source)
            .tokenize_all()
            .into_iter()
            .filter(|t| t.category == Category::Preprocessor)
            .map(|t| (t.text, t.line))
            .collect();
        assert_eq!(lines, vec![("#a", 1), ("#b", 2), ("#e", 8)]);
    }

    #[test]
    fn test_long_line_scan() {
        let source = "a ".repeat(50_000);
        let tokens = Scanner::new(&source).tokenize_all();
        assert_eq!(tokens.len(), 100_000);
        assert!(tokens.iter().all(|t| t.line == 1));
    }

    #[test]
    fn test_line_numbers() {
        let tokens = Scanner::new("a\nb\n\n  c").tokenize_all();
        let lines: Vec<(&str, usize)> = tokens
            .iter()
            .filter(|t| t.category == Category::Identifier)
            .map(|t| (t.text, t.line))
            .collect();
        assert_eq!(lines, vec![("a", 1), ("b", 2), ("c", 4)]);
    }

    #[test]
    fn test_multiline_string_advances_line() {
        let mut scanner = Scanner::new("\"a\nb\" x");
        let first = scanner.next().unwrap();
        assert!(matches!(first, ScanEvent::Token(t) if t.category == Category::String && t.line == 1));
        assert_eq!(scanner.line(), 2);
    }

    #[test]
    fn test_invalid_character_is_skipped() {
        let events: Vec<ScanEvent<'_>> = Scanner::new("a @ b").collect();
        assert!(events.iter().any(|e| matches!(
            e,
            ScanEvent::Invalid { ch: '@', span, line: 1 } if *span == Span::new(2, 3)
        )));
        let idents = events
            .iter()
            .filter(|e| matches!(e, ScanEvent::Token(t) if t.category == Category::Identifier))
            .count();
        assert_eq!(idents, 2);
    }

    #[test]
    fn test_invalid_multibyte_character() {
        let events: Vec<ScanEvent<'_>> = Scanner::new("é").collect();
        assert_eq!(
            events,
            vec![ScanEvent::Invalid {
                ch: 'é',
                span: Span::new(0, 2),
                line: 1
            }]
        );
    }

    #[test]
    fn test_spans_tile_the_input() {
        let source = "#include <stdio.h>\nint main(void) {\n  char s[8]; /* c */ x = 'a' @ 3.5 != \"s\";\n} // end\n`";
        let mut scanner = Scanner::new(source);
        let mut expected_start = 0;
        let mut total = 0;
        while let Some(event) = scanner.next_event(ScanMode::Code) {
            let span = event.span();
            assert_eq!(span.start, expected_start);
            assert!(!span.is_empty());
            expected_start = span.end;
            total += span.len();
        }
        assert_eq!(total, source.len());
        assert!(scanner.is_at_end());
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_comment_mode_consumes_free_text() {
        let source = "it's // fine */ x";
        let mut scanner = Scanner::new(source);
        let mut text = String::new();
        let mut end = None;
        while let Some(event) = scanner.next_event(ScanMode::Comment) {
            match event {
                ScanEvent::Token(t) if t.category == Category::BlockCommentEnd => {
                    end = Some(t.span);
                    break;
                }
                ScanEvent::Token(t) => text.push_str(t.text),
                ScanEvent::CommentText { text: chunk, .. } => text.push_str(chunk),
                ScanEvent::Invalid { .. } => panic!("no invalid characters inside comments"),
            }
        }
        assert_eq!(text, "it's // fine ");
        assert_eq!(end, Some(Span::new(13, 15)));
    }

    #[test]
    fn test_comment_text_len() {
        assert_eq!(comment_text_len("abc def"), 3);
        assert_eq!(comment_text_len("**/"), 1);
        assert_eq!(comment_text_len("/x*/"), 2);
        assert_eq!(comment_text_len("tail"), 4);
    }

    #[test]
    fn test_brace_delta() {
        let tokens = Scanner::new("{ } ( x").tokenize_all();
        let deltas: Vec<i64> = tokens.iter().map(brace_delta).collect();
        assert_eq!(deltas, vec![1, 0, -1, 0, 0, 0, 0]);
    }
}
