//! Deduplicating table builder

use std::collections::HashMap;

use string_interner::{DefaultStringInterner, DefaultSymbol};

use super::{
    AttributeId, AttributePolicy, ConstantEntry, ConstantKind, ParsedEntry, SymbolEntry,
    SymbolKind, Tables,
};
use crate::lexer::Token;

/// Builds the symbol, constant and parsed tables from depth-zero tokens
pub struct TableBuilder {
    policy: AttributePolicy,
    interner: DefaultStringInterner,
    attributes: HashMap<DefaultSymbol, AttributeId>,
    next_attribute: AttributeId,
    tables: Tables,
}

impl TableBuilder {
    pub fn new(policy: AttributePolicy) -> Self {
        Self {
            policy,
            interner: DefaultStringInterner::new(),
            attributes: HashMap::new(),
            next_attribute: 0,
            tables: Tables::default(),
        }
    }

    /// Record one token, returning the attribute its parsed row carries
    ///
    /// Tokens whose category has no label are not table material and are ignored.
    pub fn record(&mut self, token: &Token<'_>) -> Option<AttributeId> {
        let label = token.category.label()?;

        let existing = self
            .interner
            .get(token.text)
            .and_then(|symbol| self.attributes.get(&symbol).copied());

        let attribute = match existing {
            Some(id) => Some(id),
            None => self.insert(token),
        };

        self.tables.parsed.push(ParsedEntry {
            lexeme: token.text.to_string(),
            label,
            attribute,
            line: token.line,
        });
        attribute
    }

    /// Create a symbol or constant entry for a first occurrence, if the
    /// category belongs in one of those tables
    fn insert(&mut self, token: &Token<'_>) -> Option<AttributeId> {
        if let Some(kind) = SymbolKind::from_category(token.category) {
            let attribute = self.assign(token.text);
            self.tables.symbols.push(SymbolEntry {
                lexeme: token.text.to_string(),
                kind,
                attribute,
                line: token.line,
            });
            return Some(attribute);
        }

        if let Some(kind) = ConstantKind::from_category(token.category) {
            let attribute = self.assign(token.text);
            self.tables.constants.push(ConstantEntry {
                lexeme: token.text.to_string(),
                kind,
                attribute,
                line: token.line,
            });
            return Some(attribute);
        }

        match self.policy {
            AttributePolicy::Explicit => None,
            AttributePolicy::LastAssigned => self.next_attribute.checked_sub(1),
        }
    }

    fn assign(&mut self, lexeme: &str) -> AttributeId {
        let symbol = self.interner.get_or_intern(lexeme);
        let attribute = self.next_attribute;
        self.attributes.insert(symbol, attribute);
        self.next_attribute += 1;
        attribute
    }

    /// Number of attribute ids handed out so far
    pub fn assigned(&self) -> AttributeId {
        self.next_attribute
    }

    pub fn finish(self) -> Tables {
        self.tables
    }
}
