use std::collections::HashMap;

use crate::ast::Lexeme;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    // Comparison
    /// Equal (`==`)
    Equals,
    /// Not equal (`!=`)
    NotEquals,

    // Pattern matching
    /// Matches regular expression (`=~`)
    Matches,
    /// Does not match regular expression (`!~`)
    NotMatches,

    // Logical
    /// Short-circuit AND (`&&`)
    And,
    /// Short-circuit OR (`||`)
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Equals => "==",
            BinOp::NotEquals => "!=",
            BinOp::Matches => "=~",
            BinOp::NotMatches => "!~",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

/// Precedence given to an open parenthesis on the operator stack.
///
/// Lower than any operator, so ordinary reductions stop at it and only a
/// closing parenthesis removes it.
pub const PARENTHESIS_PRECEDENCE: u8 = 0;

/// Operator precedence used by the parser. Higher binds tighter.
///
/// # Examples
///
/// ```
/// use ci_expr::{BinOp, PrecedenceTable};
///
/// let table = PrecedenceTable::default();
/// assert!(table.of(BinOp::Equals) > table.of(BinOp::And));
/// assert!(table.of(BinOp::And) > table.of(BinOp::Or));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PrecedenceTable {
    table: HashMap<BinOp, u8>,
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        let table = HashMap::from([
            (BinOp::Equals, 3),
            (BinOp::NotEquals, 3),
            (BinOp::Matches, 3),
            (BinOp::NotMatches, 3),
            (BinOp::And, 2),
            (BinOp::Or, 1),
        ]);
        PrecedenceTable { table }
    }
}

impl PrecedenceTable {
    /// Overrides the precedence of one operator.
    ///
    /// Operators always rank above an open parenthesis, so values are
    /// clamped to at least 1.
    pub fn with(mut self, op: BinOp, precedence: u8) -> Self {
        self.table
            .insert(op, precedence.max(PARENTHESIS_PRECEDENCE + 1));
        self
    }

    pub fn of(&self, op: BinOp) -> u8 {
        self.table
            .get(&op)
            .copied()
            .unwrap_or(PARENTHESIS_PRECEDENCE + 1)
    }

    /// Precedence of a lexeme sitting on the parser's operator stack
    pub fn of_lexeme(&self, lexeme: Lexeme) -> u8 {
        lexeme
            .operator()
            .map_or(PARENTHESIS_PRECEDENCE, |op| self.of(op))
    }
}
