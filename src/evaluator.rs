use thiserror::Error;

use crate::{
    ast::{BinOp, Node},
    pattern::{Pattern, PatternError},
    statement::Limits,
    value::Value,
    variables::Variables,
};

/// Errors that can occur while evaluating a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The right side of `=~` / `!~` is not a pattern
    #[error("right operand of '{operator}' must be a pattern, got {found}")]
    NotAPattern {
        operator: &'static str,
        found: &'static str,
    },

    /// A string used as a pattern at evaluation time failed validation
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] PatternError),
}

impl Node {
    /// Evaluates the tree against `variables`.
    ///
    /// Pure: the same tree and variables always produce the same result.
    ///
    /// # Examples
    ///
    /// ```
    /// use ci_expr::{Lexer, Parser, Value, Variables};
    ///
    /// let tree = Parser::new(Lexer::new("$BRANCH =~ /^release\\//")).unwrap().parse().unwrap();
    /// let variables = Variables::new().with("BRANCH", "release/1.0");
    ///
    /// assert_eq!(tree.evaluate(&variables).unwrap(), Value::Boolean(true));
    /// ```
    pub fn evaluate(&self, variables: &Variables) -> Result<Value, EvalError> {
        self.evaluate_with_limits(variables, &Limits::default())
    }

    /// Evaluates the tree, compiling patterns held in variables under
    /// `limits.max_pattern_length`.
    pub fn evaluate_with_limits(
        &self,
        variables: &Variables,
        limits: &Limits,
    ) -> Result<Value, EvalError> {
        match self {
            Node::Boolean(b) => Ok(Value::Boolean(*b)),
            Node::Null => Ok(Value::Null),
            Node::String(s) => Ok(Value::String(s.clone())),
            Node::Pattern(p) => Ok(Value::Pattern(p.clone())),
            Node::Variable(name) => Ok(variables.get(name).cloned().unwrap_or(Value::Null)),
            Node::Input(name) => Ok(variables.input(name).cloned().unwrap_or(Value::Null)),
            Node::BinaryOp { op, left, right } => {
                eval_binary_op(*op, left, right, variables, limits)
            }
        }
    }
}

fn eval_binary_op(
    op: BinOp,
    left: &Node,
    right: &Node,
    variables: &Variables,
    limits: &Limits,
) -> Result<Value, EvalError> {
    let eval = |node: &Node| node.evaluate_with_limits(variables, limits);

    match op {
        // Short-circuit: the right side only runs when it decides the result
        BinOp::And => {
            let left_val = eval(left)?;
            if left_val.is_truthy() {
                eval(right)
            } else {
                Ok(left_val)
            }
        }
        BinOp::Or => {
            let left_val = eval(left)?;
            if left_val.is_truthy() {
                Ok(left_val)
            } else {
                eval(right)
            }
        }
        BinOp::Equals => Ok(Value::Boolean(eval(left)? == eval(right)?)),
        BinOp::NotEquals => Ok(Value::Boolean(eval(left)? != eval(right)?)),
        BinOp::Matches | BinOp::NotMatches => {
            let left_val = eval(left)?;
            let right_val = eval(right)?;
            let matched = matches(op, &left_val, right_val, limits.max_pattern_length)?;
            Ok(Value::Boolean(matched == (op == BinOp::Matches)))
        }
    }
}

/// `=~` core: left coerced to text, right must be a pattern.
///
/// A string holding a whole `/pattern/flags` literal (usually a variable)
/// is compiled as an untrusted pattern on the spot.
fn matches(
    op: BinOp,
    left: &Value,
    right: Value,
    max_pattern_length: usize,
) -> Result<bool, EvalError> {
    let pattern = match right {
        Value::Pattern(p) => p,
        Value::String(s) if s.starts_with('/') => {
            Pattern::from_literal_with_max_length(&s, max_pattern_length)?
        }
        other => {
            return Err(EvalError::NotAPattern {
                operator: op.symbol(),
                found: other.type_name(),
            });
        }
    };
    Ok(pattern.is_match(&left.as_match_text()))
}
