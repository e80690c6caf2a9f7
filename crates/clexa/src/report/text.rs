//! Plain-text report files

use std::fs;
use std::path::{Path, PathBuf};

use super::{CommentsView, Report};
use crate::common::{ClexaError, ClexaResult};
use crate::tables::AttributeId;

pub const SYMBOL_TABLE_FILE: &str = "symbolTable.txt";
pub const CONSTANT_TABLE_FILE: &str = "constantTable.txt";
pub const PARSED_TABLE_FILE: &str = "parsedTable.txt";

const LEXEME_WIDTH: usize = 20;
const TYPE_WIDTH: usize = 35;
const ATTRIBUTE_WIDTH: usize = 30;

struct Row<'r> {
    lexeme: &'r str,
    label: &'r str,
    attribute: Option<AttributeId>,
    line: usize,
}

/// The four report sections rendered as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextReport {
    pub symbol_table: String,
    pub constant_table: String,
    pub parsed_table: String,
    pub comments: String,
}

impl TextReport {
    pub fn render(report: &Report<'_>) -> Self {
        let symbols = report.symbol_table.iter().map(|e| Row {
            lexeme: &e.lexeme,
            label: e.kind.label(),
            attribute: Some(e.attribute),
            line: e.line,
        });
        let constants = report.constant_table.iter().map(|e| Row {
            lexeme: &e.lexeme,
            label: e.kind.label(),
            attribute: Some(e.attribute),
            line: e.line,
        });
        let parsed = report.parsed_table.iter().map(|e| Row {
            lexeme: &e.lexeme,
            label: e.label,
            attribute: e.attribute,
            line: e.line,
        });

        Self {
            symbol_table: render_table("Symbol Table", symbols),
            constant_table: render_table("Constants Table", constants),
            parsed_table: render_table("Parsed Table", parsed),
            comments: render_comments(&report.comments),
        }
    }

    /// Write the three report files into `dir`, returning their paths
    ///
    /// The comments section is appended to the parsed table file.
    pub fn write_to(&self, dir: &Path) -> ClexaResult<Vec<PathBuf>> {
        let files = [
            (SYMBOL_TABLE_FILE, self.symbol_table.clone()),
            (CONSTANT_TABLE_FILE, self.constant_table.clone()),
            (PARSED_TABLE_FILE, format!("{}\n\n{}", self.parsed_table, self.comments)),
        ];

        let mut written = Vec::with_capacity(files.len());
        for (name, contents) in files {
            let path = dir.join(name);
            fs::write(&path, contents).map_err(|e| ClexaError::write(&path, e))?;
            written.push(path);
        }
        Ok(written)
    }
}

fn render_table<'r>(title: &str, rows: impl Iterator<Item = Row<'r>>) -> String {
    let mut out = format!("\n{}:\n", title);
    push_line(&mut out, "Lexeme", "Type", "Attribute Value", "Line Number");
    for row in rows {
        let attribute = row.attribute.map_or_else(|| "-".to_string(), |id| id.to_string());
        push_line(&mut out, row.lexeme, row.label, &attribute, &row.line.to_string());
    }
    out
}

fn push_line(out: &mut String, lexeme: &str, label: &str, attribute: &str, line: &str) {
    let text = format!(
        "{:<lw$}{:<tw$}{:<aw$}{}",
        lexeme,
        label,
        attribute,
        line,
        lw = LEXEME_WIDTH,
        tw = TYPE_WIDTH,
        aw = ATTRIBUTE_WIDTH,
    );
    out.push_str(text.trim_end());
    out.push('\n');
}

fn render_comments(view: &CommentsView<'_>) -> String {
    let mut out = String::from("\nComments:\n");
    match view {
        CommentsView::Nested { lines } => {
            out.push_str(&format!("Nested Comments ({} lines)\n", lines));
        }
        CommentsView::Listed {
            lines,
            multi_line,
            single_line,
        } => {
            out.push_str(&format!("Multi-line Comments ({} lines):\n", lines));
            out.push_str(&format!("{}\n", multi_line.join("\n")));
            out.push_str("\nSingle-line Comments:\n");
            out.push_str(&format!("{}\n", single_line.join("\n")));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_symbol_table_layout() {
        let analysis = analyze("int x = 5;\n");
        let text = analysis.report().to_text();

        let lines: Vec<&str> = text.symbol_table.lines().collect();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "Symbol Table:");
        assert!(lines[2].starts_with("Lexeme              Type"));
        assert_eq!(&lines[2][55..70], "Attribute Value");
        assert_eq!(lines[3], format!("{:<20}{:<35}{:<30}{}", "x", "Identifier", "0", "1"));
    }

    #[test]
    fn test_parsed_table_marks_missing_attribute() {
        let analysis = analyze("int x;");
        let text = analysis.report().to_text();
        let keyword_row = text.parsed_table.lines().nth(3).unwrap();
        assert_eq!(keyword_row, format!("{:<20}{:<35}{:<30}{}", "int", "Keyword", "-", "1"));
    }

    #[test]
    fn test_comment_sections() {
        let listed = analyze("/* a */\n// b\n").report().to_text();
        assert_eq!(
            listed.comments,
            "\nComments:\nMulti-line Comments (1 lines):\n/* a */\n\nSingle-line Comments:\nb\n"
        );

        let nested = analyze("/* a /* b */ */").report().to_text();
        assert_eq!(nested.comments, "\nComments:\nNested Comments (2 lines)\n");

        let spanning = analyze("/* a\nb\nc */").report().to_text();
        assert!(spanning.comments.contains("Multi-line Comments (1 lines):\n/* a\nb\nc */\n"));
    }

    #[test]
    fn test_write_to_directory() {
        let dir = std::env::temp_dir().join(format!("clexa-text-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let analysis = analyze("int x; // note\n");
        let written = analysis.report().to_text().write_to(&dir).unwrap();
        assert_eq!(written.len(), 3);

        let parsed = fs::read_to_string(dir.join(PARSED_TABLE_FILE)).unwrap();
        assert!(parsed.contains("Parsed Table:"));
        assert!(parsed.contains("Single-line Comments:\nnote"));
        assert!(fs::read_to_string(dir.join(SYMBOL_TABLE_FILE)).unwrap().contains("x"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
