//! Ordered rule table
//!
//! Rules are tried in declaration order and the first one that matches at the
//! cursor wins. Several patterns overlap (a keyword is also an identifier, an
//! array declarator starts with an identifier), so the order is the contract.
//!
//! A [`Guard`] restricts where a rule may apply at all. Plain first-match leaves
//! the procedure and float rules unreachable behind the keyword and integer
//! rules; matching with [`MatchOptions::defer`] set lets a rule step aside for
//! its `defer_to` target when both match at the same cursor.

use once_cell::sync::Lazy;
use regex::Regex;

use super::token::Category;

/// Context condition checked before a rule's pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    None,
    /// Character before the cursor must not be a word character
    WordStart,
    /// Only horizontal whitespace may precede the cursor on its line
    LineStart,
}

/// Cursor context supplied by the scanner for one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchOptions {
    /// Only horizontal whitespace precedes the cursor on its line
    pub line_start: bool,
    /// Only try rules that stay active inside an isolated block comment
    pub in_comment: bool,
    /// Honor `defer_to`
    pub defer: bool,
}

/// One entry of the rule table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub category: Category,
    pub pattern: &'static str,
    pub guard: Guard,
    pub defer_to: Option<Category>,
    /// Still tried while a block comment is open
    pub in_comment: bool,
}

impl Rule {
    const fn new(category: Category, pattern: &'static str) -> Self {
        Self {
            category,
            pattern,
            guard: Guard::None,
            defer_to: None,
            in_comment: false,
        }
    }

    const fn guard(mut self, guard: Guard) -> Self {
        self.guard = guard;
        self
    }

    const fn defer_to(mut self, category: Category) -> Self {
        self.defer_to = Some(category);
        self
    }

    const fn in_comment(mut self) -> Self {
        self.in_comment = true;
        self
    }
}

macro_rules! type_prefix {
    () => {
        r"(?:(?:signed|unsigned)\s+)?(?:(?:long|short)\s+)?(?:int|char|void)"
    };
}

/// The rule table, most specific first
pub const RULES: &[Rule] = &[
    Rule::new(Category::Preprocessor, r"#.*").guard(Guard::LineStart),
    Rule::new(Category::LineComment, r"//.*"),
    Rule::new(Category::BlockCommentStart, r"/\*").in_comment(),
    Rule::new(Category::BlockCommentEnd, r"\*/").in_comment(),
    Rule::new(
        Category::Keyword,
        r"(?:auto|break|case|char|const|continue|default|do|else|double|enum|extern|float|for|goto|if|int|long|register|return)\b",
    )
    .guard(Guard::WordStart)
    .defer_to(Category::Procedure),
    // Compound type specifiers: `unsigned int`, `long int`, `void`
    Rule::new(Category::Keyword, concat!(type_prefix!(), r"\b"))
        .guard(Guard::WordStart)
        .defer_to(Category::Procedure),
    Rule::new(
        Category::Procedure,
        concat!(type_prefix!(), r"\s+[A-Za-z_]\w*\s*\([^()]*\)"),
    )
    .guard(Guard::WordStart),
    Rule::new(Category::Array, r"[A-Za-z_]\w*\s*\[\s*\d*\s*\]"),
    Rule::new(Category::Pointer, r"\*\s*[A-Za-z_]\w*"),
    Rule::new(Category::Identifier, r"[A-Za-z_]\w*"),
    Rule::new(Category::Relational, r"[<>]=?|!=|=="),
    Rule::new(Category::Logical, r"[&|^~]"),
    Rule::new(Category::Arithmetic, r"[-+*/%]"),
    Rule::new(Category::Assignment, r"="),
    Rule::new(Category::Punctuator, r"[(){}\[\];,.:]").defer_to(Category::Float),
    Rule::new(Category::Integer, r"\d+").defer_to(Category::Float),
    Rule::new(Category::Float, r"[-+]?\d*\.\d+(?:[eE][-+]?\d+)?"),
    Rule::new(Category::Char, r"'(?:\\.|[^'\\\n])'"),
    Rule::new(Category::String, r#""(?:\\.|[^"\\])*""#),
    Rule::new(Category::Whitespace, r"[^\S\n]+").in_comment(),
    Rule::new(Category::Newline, r"\n").in_comment(),
];

/// A rule table with its patterns compiled
pub struct RuleTable {
    rules: &'static [Rule],
    regexes: Vec<Regex>,
}

static STANDARD: Lazy<RuleTable> = Lazy::new(|| RuleTable::compile(RULES));

impl RuleTable {
    /// The built-in C rule table, compiled once per process
    pub fn standard() -> &'static RuleTable {
        &STANDARD
    }

    fn compile(rules: &'static [Rule]) -> Self {
        let regexes = rules
            .iter()
            .map(|rule| {
                // Anchor every pattern; matching is never a search
                Regex::new(&format!("^(?:{})", rule.pattern))
                    .unwrap_or_else(|e| panic!("bad pattern for {:?}: {}", rule.category, e))
            })
            .collect();
        Self { rules, regexes }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Find the winning rule at `pos`, returning its index and match length
    pub fn match_at(&self, source: &str, pos: usize, opts: MatchOptions) -> Option<(usize, usize)> {
        let (index, len) = (0..self.rules.len())
            .filter(|&i| !opts.in_comment || self.rules[i].in_comment)
            .find_map(|i| self.try_rule(i, source, pos, opts).map(|len| (i, len)))?;

        if let Some(target) = self.rules[index].defer_to.filter(|_| opts.defer) {
            let deferred = (index + 1..self.rules.len())
                .filter(|&i| self.rules[i].category == target)
                .find_map(|i| self.try_rule(i, source, pos, opts).map(|len| (i, len)));
            if deferred.is_some() {
                return deferred;
            }
        }

        Some((index, len))
    }

    /// Every rule whose guard and pattern accept the text at `pos`, in table order
    pub fn candidates(&self, source: &str, pos: usize, opts: MatchOptions) -> Vec<Category> {
        (0..self.rules.len())
            .filter(|&i| self.try_rule(i, source, pos, opts).is_some())
            .map(|i| self.rules[i].category)
            .collect()
    }

    fn try_rule(&self, index: usize, source: &str, pos: usize, opts: MatchOptions) -> Option<usize> {
        if !guard_holds(self.rules[index].guard, source, pos, opts) {
            return None;
        }
        let found = self.regexes[index].find(&source[pos..])?;
        (!found.as_str().is_empty()).then_some(found.end())
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn guard_holds(guard: Guard, source: &str, pos: usize, opts: MatchOptions) -> bool {
    match guard {
        Guard::None => true,
        Guard::WordStart => !source[..pos].chars().next_back().is_some_and(is_word_char),
        Guard::LineStart => opts.line_start,
    }
}
