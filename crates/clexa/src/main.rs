//! clexa - lexical analyzer for C-like source
//!
//! Usage: clexa [OPTIONS] <input>

use anyhow::Context;
use clap::{Parser as ClapParser, ValueEnum};
use clexa::lexer::{Category, Scanner};
use clexa::{Analyzer, AnalyzerConfig, AttributePolicy, DiagnosticReporter};
use std::fs;
use std::path::PathBuf;
use std::process;

/// Report format
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum Format {
    /// symbolTable.txt, constantTable.txt and parsedTable.txt
    #[default]
    Text,
    /// One JSON document with every table
    Json,
}

#[derive(ClapParser, Debug)]
#[command(name = "clexa")]
#[command(version)]
#[command(about = "Lexical analyzer producing symbol, constant and token tables for C source", long_about = None)]
struct Args {
    /// Input source file
    #[arg(required = true)]
    input: PathBuf,

    /// Output directory (text) or directory for report.json (json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Give tokens without a table entry the most recently assigned attribute id
    #[arg(long)]
    legacy_attributes: bool,

    /// Let keywords and integers yield to procedure and float matches
    #[arg(long)]
    defer_shadowed: bool,

    /// Inside block comments only recognize delimiters and whitespace
    #[arg(long)]
    isolate_comments: bool,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.input)
        .map_err(|e| clexa::ClexaError::read(&args.input, e))?;
    let filename = args.input.display().to_string();

    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file(&filename, &source);

    if args.dump_tokens {
        eprintln!("=== Tokens ===");
        for token in Scanner::new(&source).deferring(args.defer_shadowed).tokenize_all() {
            if matches!(token.category, Category::Whitespace | Category::Newline) {
                continue;
            }
            let code = token.category.code().unwrap_or('-');
            eprintln!("{:>4} {} {:<22} {:?}", token.line, code, token.category.to_string(), token.text);
        }
        eprintln!("=== End Tokens ===\n");
    }

    if args.verbose {
        eprintln!("Analyzing {} ({} bytes)", filename, source.len());
    }

    let config = AnalyzerConfig {
        attributes: if args.legacy_attributes {
            AttributePolicy::LastAssigned
        } else {
            AttributePolicy::Explicit
        },
        defer_shadowed: args.defer_shadowed,
        isolate_comments: args.isolate_comments,
    };
    let analysis = Analyzer::new(config).analyze(&source);

    reporter
        .report_all(file_id, &analysis.diagnostics)
        .context("failed to render diagnostics")?;

    let report = analysis.report();
    let output_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));

    match args.format {
        Format::Text => {
            fs::create_dir_all(&output_dir)
                .with_context(|| format!("cannot create {}", output_dir.display()))?;
            let written = report.to_text().write_to(&output_dir)?;
            if args.verbose {
                eprintln!("Reports generated in:");
                for path in &written {
                    eprintln!("- {}", path.display());
                }
            }
        }
        Format::Json => {
            let json = report.to_json().context("failed to serialize report")?;
            match &args.output {
                Some(dir) => {
                    fs::create_dir_all(dir)
                        .with_context(|| format!("cannot create {}", dir.display()))?;
                    let path = dir.join("report.json");
                    fs::write(&path, json).map_err(|e| clexa::ClexaError::write(&path, e))?;
                    if args.verbose {
                        eprintln!("Report written to {}", path.display());
                    }
                }
                None => println!("{}", json),
            }
        }
    }

    if args.verbose {
        eprintln!(
            "{} symbols, {} constants, {} tokens, {} diagnostics",
            analysis.tables.symbols.len(),
            analysis.tables.constants.len(),
            analysis.tables.parsed.len(),
            analysis.diagnostics.len()
        );
    }

    Ok(())
}
