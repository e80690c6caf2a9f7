//! Symbol, constant and parsed-token tables
//!
//! Rows are fixed-shape records. Symbol and constant rows share one attribute-id
//! sequence; the parsed table holds one row per recorded token, duplicates included.

mod builder;

pub use builder::TableBuilder;

use crate::lexer::Category;
use serde::Serialize;

/// Sequential id of a lexeme's first occurrence, shared by symbols and constants
pub type AttributeId = u32;

/// What a parsed row carries for tokens that never got a table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributePolicy {
    /// No attribute
    #[default]
    Explicit,
    /// The id most recently handed out, as older report consumers expect
    LastAssigned,
}

/// Kinds of symbol table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SymbolKind {
    Identifier,
    Array,
    Pointer,
    Procedure,
}

impl SymbolKind {
    pub fn from_category(category: Category) -> Option<Self> {
        match category {
            Category::Identifier => Some(SymbolKind::Identifier),
            Category::Array => Some(SymbolKind::Array),
            Category::Pointer => Some(SymbolKind::Pointer),
            Category::Procedure => Some(SymbolKind::Procedure),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SymbolKind::Identifier => "Identifier",
            SymbolKind::Array => "Array",
            SymbolKind::Pointer => "Pointer",
            SymbolKind::Procedure => "Procedure",
        }
    }
}

/// Kinds of constant table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstantKind {
    Int,
    Float,
    Char,
}

impl ConstantKind {
    pub fn from_category(category: Category) -> Option<Self> {
        match category {
            Category::Integer => Some(ConstantKind::Int),
            Category::Float => Some(ConstantKind::Float),
            Category::Char => Some(ConstantKind::Char),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConstantKind::Int => "int",
            ConstantKind::Float => "float",
            ConstantKind::Char => "char",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    pub lexeme: String,
    #[serde(rename = "label")]
    pub kind: SymbolKind,
    pub attribute: AttributeId,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantEntry {
    pub lexeme: String,
    #[serde(rename = "label")]
    pub kind: ConstantKind,
    pub attribute: AttributeId,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEntry {
    pub lexeme: String,
    pub label: &'static str,
    pub attribute: Option<AttributeId>,
    pub line: usize,
}

/// The three frozen tables of an analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub symbols: Vec<SymbolEntry>,
    pub constants: Vec<ConstantEntry>,
    pub parsed: Vec<ParsedEntry>,
}

impl Tables {
    pub fn symbol(&self, lexeme: &str) -> Option<&SymbolEntry> {
        self.symbols.iter().find(|entry| entry.lexeme == lexeme)
    }

    pub fn constant(&self, lexeme: &str) -> Option<&ConstantEntry> {
        self.constants.iter().find(|entry| entry.lexeme == lexeme)
    }
}
