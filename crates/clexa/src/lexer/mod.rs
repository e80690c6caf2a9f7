//! Lexer module for tokenizing C-like source text against an ordered rule table

mod rules;
mod scanner;
mod token;

pub use rules::{Guard, MatchOptions, Rule, RuleTable, RULES};
pub use scanner::{brace_delta, ScanMode, Scanner};
pub use token::{Category, ScanEvent, Token};
