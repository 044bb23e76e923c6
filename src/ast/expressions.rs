use crate::{
    ast::{BinOp, Lexeme, Token},
    parser::ParseError,
    pattern::Pattern,
};

/// Abstract Syntax Tree node of a rule expression.
///
/// Leaves carry one scalar payload; operator nodes own exactly two
/// children. Every node can be evaluated against a set of variables.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // Literals
    /// Boolean literal
    Boolean(bool),

    /// Null literal
    Null,

    /// String literal, quotes removed
    ///
    /// # Example
    /// ```text
    /// "main"
    /// ```
    String(String),

    /// Compiled regular expression literal
    ///
    /// # Example
    /// ```text
    /// /^v\d+/i
    /// ```
    Pattern(Pattern),

    // References
    /// Variable reference (`$NAME`), holds the name without `$`
    Variable(String),

    /// Pipeline input reference (`$[[ inputs.NAME ]]`), holds `NAME`
    Input(String),

    // Operations
    /// Binary operation
    BinaryOp {
        op: BinOp,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    /// Builds a leaf from a value token.
    ///
    /// Pattern literals are compiled here, so an unsafe or invalid pattern
    /// fails the parse even if it would never be evaluated.
    pub fn build_value(token: &Token, max_pattern_length: usize) -> Result<Node, ParseError> {
        let text = token.text.as_str();
        let node = match token.lexeme {
            Lexeme::Boolean => Node::Boolean(text == "true"),
            Lexeme::Null => Node::Null,
            Lexeme::String => Node::String(text[1..text.len() - 1].to_string()),
            Lexeme::Pattern => {
                let pattern = Pattern::from_literal_with_max_length(text, max_pattern_length)
                    .map_err(|source| ParseError::Pattern {
                        offset: token.offset,
                        source,
                    })?;
                Node::Pattern(pattern)
            }
            Lexeme::Variable => Node::Variable(text[1..].to_string()),
            Lexeme::Input => Node::Input(input_name(text).to_string()),
            _ => {
                return Err(ParseError::InvalidNode {
                    offset: token.offset,
                    text: token.text.clone(),
                });
            }
        };
        Ok(node)
    }

    /// Builds an operator node from the operator token and both operands.
    ///
    /// A missing operand is reported against the operator, e.g. `== "x"`.
    pub fn build_operator(
        token: &Token,
        left: Option<Node>,
        right: Option<Node>,
    ) -> Result<Node, ParseError> {
        let op = token
            .lexeme
            .operator()
            .ok_or_else(|| ParseError::InvalidNode {
                offset: token.offset,
                text: token.text.clone(),
            })?;

        match (left, right) {
            (Some(left), Some(right)) => Ok(Node::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            }),
            _ => Err(ParseError::MissingOperand {
                operator: op.symbol(),
                offset: token.offset,
            }),
        }
    }

    /// Number of nodes from this one down to the deepest leaf
    pub fn depth(&self) -> usize {
        match self {
            Node::BinaryOp { left, right, .. } => 1 + left.depth().max(right.depth()),
            _ => 1,
        }
    }
}

/// `$[[ inputs.name ]]` -> `name`
fn input_name(text: &str) -> &str {
    let inner = text
        .trim_start_matches("$[[")
        .trim_end_matches("]]")
        .trim();
    inner.strip_prefix("inputs.").unwrap_or(inner)
}
