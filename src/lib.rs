pub mod ast;
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod pattern;
pub mod statement;
pub mod value;
pub mod variables;

pub use ast::{BinOp, Lexeme, LexemeType, Node, PrecedenceTable, Token};
pub use evaluator::EvalError;
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, Parser};
pub use pattern::{Pattern, PatternError};
pub use statement::{ErrorKind, Limits, Statement, StatementError};
pub use value::Value;
pub use variables::{Variables, VariablesError};
