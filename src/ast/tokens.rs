use std::fmt;

use crate::{ast::BinOp, pattern};

/// What role a lexeme plays for the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexemeType {
    /// Literal or reference, becomes a leaf node
    Value,
    /// Binary infix operator
    Operator,
    ParenthesisOpen,
    ParenthesisClose,
}

/// A token class of the expression language.
///
/// Each lexeme knows how to recognise itself at the start of the remaining
/// input ([`Lexeme::scan`]). The lexer tries them in [`Lexeme::PRIORITY`]
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lexeme {
    // Grouping
    /// `(`
    ParenthesisOpen,
    /// `)`
    ParenthesisClose,

    // Values
    /// Pipeline input reference
    ///
    /// # Examples
    /// ```text
    /// $[[ inputs.environment ]]
    /// $[[inputs.job-stage]]
    /// ```
    Input,

    /// Variable reference
    ///
    /// # Examples
    /// ```text
    /// $CI_COMMIT_BRANCH
    /// $my_var
    /// ```
    Variable,

    /// String literal, single or double quoted, no escape sequences
    ///
    /// # Examples
    /// ```text
    /// "main"
    /// 'merge_request_event'
    /// ```
    String,

    /// Regular expression literal
    ///
    /// # Examples
    /// ```text
    /// /^release\/.*$/
    /// /feature/i
    /// ```
    Pattern,

    /// `null`
    Null,

    /// `true` / `false`
    Boolean,

    // Operators
    /// `==`
    Equals,
    /// `!=`
    NotEquals,
    /// `=~`
    Matches,
    /// `!~`
    NotMatches,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl Lexeme {
    /// Order in which the lexer tries lexemes at each position.
    pub const PRIORITY: [Lexeme; 14] = [
        Lexeme::ParenthesisOpen,
        Lexeme::ParenthesisClose,
        Lexeme::Input,
        Lexeme::Variable,
        Lexeme::String,
        Lexeme::Pattern,
        Lexeme::Null,
        Lexeme::Boolean,
        Lexeme::Equals,
        Lexeme::NotEquals,
        Lexeme::Matches,
        Lexeme::NotMatches,
        Lexeme::And,
        Lexeme::Or,
    ];

    pub fn lexeme_type(self) -> LexemeType {
        match self {
            Lexeme::ParenthesisOpen => LexemeType::ParenthesisOpen,
            Lexeme::ParenthesisClose => LexemeType::ParenthesisClose,
            Lexeme::Input
            | Lexeme::Variable
            | Lexeme::String
            | Lexeme::Pattern
            | Lexeme::Null
            | Lexeme::Boolean => LexemeType::Value,
            Lexeme::Equals
            | Lexeme::NotEquals
            | Lexeme::Matches
            | Lexeme::NotMatches
            | Lexeme::And
            | Lexeme::Or => LexemeType::Operator,
        }
    }

    /// The binary operator this lexeme stands for, if any
    pub fn operator(self) -> Option<BinOp> {
        match self {
            Lexeme::Equals => Some(BinOp::Equals),
            Lexeme::NotEquals => Some(BinOp::NotEquals),
            Lexeme::Matches => Some(BinOp::Matches),
            Lexeme::NotMatches => Some(BinOp::NotMatches),
            Lexeme::And => Some(BinOp::And),
            Lexeme::Or => Some(BinOp::Or),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Lexeme::ParenthesisOpen => "parenthesis_open",
            Lexeme::ParenthesisClose => "parenthesis_close",
            Lexeme::Input => "input",
            Lexeme::Variable => "variable",
            Lexeme::String => "string",
            Lexeme::Pattern => "pattern",
            Lexeme::Null => "null",
            Lexeme::Boolean => "boolean",
            Lexeme::Equals => "equals",
            Lexeme::NotEquals => "not_equals",
            Lexeme::Matches => "matches",
            Lexeme::NotMatches => "not_matches",
            Lexeme::And => "and",
            Lexeme::Or => "or",
        }
    }

    /// Length in bytes of this lexeme at the start of `input`, or `None`
    /// if it does not match there.
    pub fn scan(self, input: &str) -> Option<usize> {
        match self {
            Lexeme::ParenthesisOpen => symbol(input, "("),
            Lexeme::ParenthesisClose => symbol(input, ")"),
            Lexeme::Input => scan_input(input),
            Lexeme::Variable => scan_variable(input),
            Lexeme::String => scan_string(input),
            Lexeme::Pattern => pattern::scan_literal(input),
            Lexeme::Null => keyword(input, "null"),
            Lexeme::Boolean => keyword(input, "true").or_else(|| keyword(input, "false")),
            Lexeme::Equals => symbol(input, "=="),
            Lexeme::NotEquals => symbol(input, "!="),
            Lexeme::Matches => symbol(input, "=~"),
            Lexeme::NotMatches => symbol(input, "!~"),
            Lexeme::And => symbol(input, "&&"),
            Lexeme::Or => symbol(input, "||"),
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A matched piece of the input together with its lexeme.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Raw matched text
    pub text: String,
    pub lexeme: Lexeme,
    /// Byte offset of the match in the expression
    pub offset: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, lexeme: Lexeme, offset: usize) -> Self {
        Token {
            text: text.into(),
            lexeme,
            offset,
        }
    }
}

pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn symbol(input: &str, symbol: &str) -> Option<usize> {
    input.starts_with(symbol).then_some(symbol.len())
}

/// Keyword not directly followed by another identifier character
fn keyword(input: &str, word: &str) -> Option<usize> {
    let rest = input.strip_prefix(word)?;
    match rest.chars().next() {
        Some(ch) if is_word_char(ch) => None,
        _ => Some(word.len()),
    }
}

fn word_len(input: &str) -> usize {
    input
        .char_indices()
        .find(|&(_, ch)| !is_word_char(ch))
        .map_or(input.len(), |(i, _)| i)
}

fn scan_variable(input: &str) -> Option<usize> {
    let rest = input.strip_prefix('$')?;
    match word_len(rest) {
        0 => None,
        n => Some(1 + n),
    }
}

fn scan_string(input: &str) -> Option<usize> {
    let quote = input.chars().next().filter(|&c| c == '"' || c == '\'')?;
    let close = input[1..].find(quote)?;
    Some(close + 2)
}

fn scan_input(input: &str) -> Option<usize> {
    let rest = input.strip_prefix("$[[")?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix("inputs.")?;

    let name_len = rest
        .char_indices()
        .find(|&(_, ch)| !(is_word_char(ch) || ch == '-'))
        .map_or(rest.len(), |(i, _)| i);
    if name_len == 0 {
        return None;
    }

    let rest = rest[name_len..].trim_start();
    let rest = rest.strip_prefix("]]")?;
    Some(input.len() - rest.len())
}
