//! One rule expression bound to one variable snapshot.
//!
//! A [`Statement`] runs the whole pipeline: lex, parse, evaluate. It is
//! cheap to build and meant to be thrown away after the rule is checked.
//! Errors are always returned; deciding whether an invalid rule fails the
//! pipeline or just does not match is up to the caller.

use thiserror::Error;

use crate::{
    ast::Node,
    evaluator::EvalError,
    lexer::{Lexer, MAX_TOKENS},
    parser::{ParseError, Parser},
    pattern::MAX_PATTERN_LENGTH,
    value::Value,
    variables::Variables,
};

/// Resource limits applied while building a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of tokens in one expression
    pub max_tokens: usize,
    /// Maximum length of a pattern source, in bytes
    pub max_pattern_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_tokens: MAX_TOKENS,
            max_pattern_length: MAX_PATTERN_LENGTH,
        }
    }
}

/// Broad category of a failure, for lint output.
///
/// `OperatorConstruction` means the parser asked for a node from a token of
/// the wrong kind; malformed input is always `Syntax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    OperatorConstruction,
    PatternSafety,
    Evaluation,
}

/// Any failure of a statement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatementError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl StatementError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatementError::Parse(ParseError::Lex(_)) => ErrorKind::Lexical,
            StatementError::Parse(ParseError::InvalidNode { .. }) => {
                ErrorKind::OperatorConstruction
            }
            StatementError::Parse(ParseError::Pattern { .. }) => ErrorKind::PatternSafety,
            StatementError::Parse(_) => ErrorKind::Syntax,
            StatementError::Eval(_) => ErrorKind::Evaluation,
        }
    }
}

/// A rule expression and the variables it is checked against.
///
/// # Examples
///
/// ```
/// use ci_expr::{Statement, Value, Variables};
///
/// let variables = Variables::new().with("CI_COMMIT_BRANCH", "main");
/// let statement = Statement::new("$CI_COMMIT_BRANCH == \"main\"", &variables);
///
/// assert_eq!(statement.evaluate().unwrap(), Value::Boolean(true));
/// assert!(statement.truthful().unwrap());
/// ```
pub struct Statement<'a> {
    expression: &'a str,
    variables: &'a Variables,
    limits: Limits,
}

impl<'a> Statement<'a> {
    pub fn new(expression: &'a str, variables: &'a Variables) -> Self {
        Self::with_limits(expression, variables, Limits::default())
    }

    pub fn with_limits(expression: &'a str, variables: &'a Variables, limits: Limits) -> Self {
        Statement {
            expression,
            variables,
            limits,
        }
    }

    pub fn expression(&self) -> &str {
        self.expression
    }

    /// Lexes and parses the expression into its root node.
    pub fn parse_tree(&self) -> Result<Node, ParseError> {
        let lexer = Lexer::new(self.expression).with_max_tokens(self.limits.max_tokens);
        Parser::new(lexer)?
            .with_max_pattern_length(self.limits.max_pattern_length)
            .parse()
    }

    /// Evaluates the expression to a value.
    pub fn evaluate(&self) -> Result<Value, StatementError> {
        let tree = self.parse_tree()?;
        let value = tree.evaluate_with_limits(self.variables, &self.limits)?;
        log::debug!("evaluated {:?} to {}", self.expression, value);
        Ok(value)
    }

    /// Whether the rule holds: the result is neither `null`, `false` nor an
    /// empty string.
    pub fn truthful(&self) -> Result<bool, StatementError> {
        Ok(self.evaluate()?.is_present())
    }

    /// Whether the expression lexes and parses, without evaluating it
    pub fn is_valid(&self) -> bool {
        self.parse_tree().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_parse_errors() {
        let kind = |err: ParseError| StatementError::Parse(err).kind();
        assert_eq!(
            kind(ParseError::MissingOperand {
                operator: "==",
                offset: 0
            }),
            ErrorKind::Syntax
        );
        assert_eq!(
            kind(ParseError::UnexpectedToken {
                offset: 3,
                text: "$B".into()
            }),
            ErrorKind::Syntax
        );
        assert_eq!(
            kind(ParseError::InvalidNode {
                offset: 0,
                text: "==".into()
            }),
            ErrorKind::OperatorConstruction
        );
    }

    #[test]
    fn test_pattern_limit_applies_to_variables() {
        let variables = Variables::new().with("A", "abcdef").with("P", "/abcdef/");
        let limits = Limits {
            max_pattern_length: 2,
            ..Limits::default()
        };
        let err = Statement::with_limits("$A =~ $P", &variables, limits)
            .evaluate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Evaluation);
        assert!(Statement::new("$A =~ $P", &variables).truthful().unwrap());
    }
}
