use clexa::lexer::{ScanEvent, ScanMode, Scanner};
use clexa::tables::SymbolKind;
use clexa::tables::ConstantKind;
use clexa::{analyze, Analyzer, AnalyzerConfig, DiagnosticKind};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

const PROGRAM: &str = r#"#include <stdio.h>
/* Sum the first
   few squares */
int main(void) {
    int total = 0;
    int values[4];
    char *name = "sq";
    float ratio = 0.5;
    for (total = 0; total <= 10; total = total + 1) {
        values[0] = total * total; // square
    }
    return 0;
}
"#;

#[test]
fn test_program_tables() {
    let analysis = analyze(PROGRAM);
    assert!(analysis.diagnostics.is_empty(), "{:?}", analysis.diagnostics);

    let symbols: Vec<(&str, SymbolKind, u32, usize)> = analysis
        .tables
        .symbols
        .iter()
        .map(|e| (e.lexeme.as_str(), e.kind, e.attribute, e.line))
        .collect();
    assert_eq!(
        symbols,
        vec![
            ("main", SymbolKind::Identifier, 0, 4),
            ("total", SymbolKind::Identifier, 1, 5),
            ("values[4]", SymbolKind::Array, 3, 6),
            ("*name", SymbolKind::Pointer, 4, 7),
            ("ratio", SymbolKind::Identifier, 5, 8),
            ("values[0]", SymbolKind::Array, 9, 10),
            ("* total", SymbolKind::Pointer, 10, 10),
        ]
    );

    let constants: Vec<(&str, &str, u32)> = analysis
        .tables
        .constants
        .iter()
        .map(|e| (e.lexeme.as_str(), e.kind.label(), e.attribute))
        .collect();
    assert_eq!(
        constants,
        vec![("0", "int", 2), ("5", "int", 6), ("10", "int", 7), ("1", "int", 8)]
    );

    assert_eq!(analysis.comments.blocks(), ["/* Sum the first\n   few squares */"]);
    assert_eq!(analysis.comments.block_lines(), 1);
    assert_eq!(analysis.comments.line_comments(), ["square"]);
    assert_eq!(analysis.brace_balance, 0);
}

#[test]
fn test_deferred_procedure_and_float() {
    let analyzer = Analyzer::new(AnalyzerConfig {
        defer_shadowed: true,
        ..AnalyzerConfig::default()
    });
    let analysis = analyzer.analyze(PROGRAM);
    assert!(analysis.diagnostics.is_empty(), "{:?}", analysis.diagnostics);

    let procedure = analysis.tables.symbol("int main(void)").map(|e| (e.kind, e.line));
    assert_eq!(procedure, Some((SymbolKind::Procedure, 4)));
    assert!(analysis.tables.symbol("main").is_none());

    let ratio = analysis.tables.constant("0.5").map(|e| (e.kind, e.line));
    assert_eq!(ratio, Some((ConstantKind::Float, 8)));
}

#[test]
fn test_attribute_ids_follow_first_occurrence() {
    let analysis = analyze(PROGRAM);

    let mut first: HashMap<&str, Option<u32>> = HashMap::new();
    for entry in &analysis.tables.parsed {
        let seen = first.entry(entry.lexeme.as_str()).or_insert(entry.attribute);
        assert_eq!(*seen, entry.attribute, "attribute changed for {}", entry.lexeme);
    }

    let mut ids: Vec<u32> = analysis
        .tables
        .symbols
        .iter()
        .map(|e| e.attribute)
        .chain(analysis.tables.constants.iter().map(|e| e.attribute))
        .collect();
    ids.sort_unstable();
    let expected: Vec<u32> = (0..ids.len() as u32).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_parsed_lines() {
    let analysis = analyze(PROGRAM);
    let returns: Vec<usize> = analysis
        .tables
        .parsed
        .iter()
        .filter(|e| e.lexeme == "return")
        .map(|e| e.line)
        .collect();
    assert_eq!(returns, vec![12]);
    assert_eq!(analysis.tables.parsed.last().map(|e| (e.lexeme.as_str(), e.line)), Some(("}", 13)));
}

#[test]
fn test_scan_covers_every_byte() {
    let inputs = [
        PROGRAM,
        "",
        "@@@",
        "/* unterminated",
        "x */ y /* a /* b */",
        "int é = 'q'; \"multi\nline\" ~ ^ | & ! ?",
    ];
    for input in inputs {
        for mode in [ScanMode::Code, ScanMode::Comment] {
            let mut scanner = Scanner::new(input);
            let mut matched = 0;
            let mut skipped = 0;
            while let Some(event) = scanner.next_event(mode) {
                match event {
                    ScanEvent::Invalid { span, .. } => skipped += span.len(),
                    other => matched += other.span().len(),
                }
            }
            assert_eq!(matched + skipped, input.len(), "input {:?} in {:?}", input, mode);
        }
    }
}

#[test]
fn test_anomalies_do_not_stop_the_scan() {
    let analysis = analyze("} */ int a @;\n/* x /* y */\n{ {");
    let kinds: Vec<&DiagnosticKind> = analysis.diagnostics.iter().map(|d| &d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            &DiagnosticKind::UnexpectedCommentEnd,
            &DiagnosticKind::InvalidCharacter { ch: '@' },
            &DiagnosticKind::NestedComment,
            &DiagnosticKind::UnterminatedComment,
            &DiagnosticKind::UnbalancedBraces { balance: -1 },
        ]
    );
    assert!(analysis.tables.symbol("a").is_some());
    assert!(analysis.comments.nested_seen());
}
