use thiserror::Error;

use crate::{
    ast::{LexemeType, Node, PrecedenceTable, Token},
    lexer::{LexError, Lexer},
    pattern::{MAX_PATTERN_LENGTH, PatternError},
};

/// Errors raised while turning tokens into a tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Tokenizing failed
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Nothing to parse
    #[error("empty expression")]
    Empty,

    /// `(` without `)` or `)` without `(`
    #[error("unmatched parenthesis at position {offset}")]
    UnmatchedParenthesis { offset: usize },

    /// An operator is missing its left or right operand
    #[error("operator '{operator}' at position {offset} is missing an operand")]
    MissingOperand {
        operator: &'static str,
        offset: usize,
    },

    /// More than one operand left with no operator joining them
    #[error("unreachable nodes in parse tree: {count} operands are not joined by an operator")]
    UnreachableNodes { count: usize },

    /// A token in a position where it cannot be used, e.g. a value right
    /// after another value or `()` with nothing inside
    #[error("unexpected token '{text}' at position {offset}")]
    UnexpectedToken { offset: usize, text: String },

    /// A node was requested from a token of the wrong kind
    #[error("cannot build a node from '{text}' at position {offset}")]
    InvalidNode { offset: usize, text: String },

    /// A `/pattern/` literal failed validation
    #[error("invalid pattern at position {offset}: {source}")]
    Pattern {
        offset: usize,
        source: PatternError,
    },
}

/// Operator-precedence parser.
///
/// Uses an operand stack and an operator stack. An operator reduces the
/// stack while the operator on top binds at least as tightly, which makes
/// every operator left-associative. `(` sits on the operator stack with the
/// lowest precedence, so only `)` removes it.
///
/// Operands and operators must alternate: a value or `(` is only accepted
/// where an operand is expected, an operator or `)` only after one.
pub struct Parser {
    tokens: Vec<Token>,
    precedence: PrecedenceTable,
    max_pattern_length: usize,
}

impl Parser {
    /// Tokenizes the lexer's input and prepares a parser over it.
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let tokens = lexer.tokens()?;
        Ok(Self::from_tokens(tokens))
    }

    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            precedence: PrecedenceTable::default(),
            max_pattern_length: MAX_PATTERN_LENGTH,
        }
    }

    pub fn with_precedence(mut self, precedence: PrecedenceTable) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn with_max_pattern_length(mut self, max_pattern_length: usize) -> Self {
        self.max_pattern_length = max_pattern_length;
        self
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Pops the operator's two operands and pushes the combined node.
    fn reduce(operator: &Token, operands: &mut Vec<Node>) -> Result<(), ParseError> {
        let right = operands.pop();
        let left = operands.pop();
        let node = Node::build_operator(operator, left, right)?;
        operands.push(node);
        Ok(())
    }

    /// Parses the tokens into a single tree.
    pub fn parse(&self) -> Result<Node, ParseError> {
        let mut operands: Vec<Node> = vec![];
        let mut operators: Vec<&Token> = vec![];
        let mut expect_operand = true;

        for token in &self.tokens {
            match token.lexeme.lexeme_type() {
                LexemeType::Value => {
                    if !expect_operand {
                        return Err(unexpected(token));
                    }
                    operands.push(Node::build_value(token, self.max_pattern_length)?);
                    expect_operand = false;
                }
                LexemeType::Operator => {
                    if expect_operand {
                        return Err(missing_operand(token));
                    }
                    let incoming = self.precedence.of_lexeme(token.lexeme);

                    while let Some(top) = operators
                        .pop_if(|top| self.precedence.of_lexeme(top.lexeme) >= incoming)
                    {
                        Self::reduce(top, &mut operands)?;
                    }
                    operators.push(token);
                    expect_operand = true;
                }
                LexemeType::ParenthesisOpen => {
                    if !expect_operand {
                        return Err(unexpected(token));
                    }
                    operators.push(token);
                }
                LexemeType::ParenthesisClose => {
                    if expect_operand {
                        return Err(match operators.last() {
                            None => ParseError::UnmatchedParenthesis {
                                offset: token.offset,
                            },
                            Some(top) if top.lexeme.lexeme_type() == LexemeType::Operator => {
                                missing_operand(top)
                            }
                            Some(_) => unexpected(token),
                        });
                    }
                    loop {
                        match operators.pop() {
                            None => {
                                return Err(ParseError::UnmatchedParenthesis {
                                    offset: token.offset,
                                });
                            }
                            Some(top)
                                if top.lexeme.lexeme_type() == LexemeType::ParenthesisOpen =>
                            {
                                break;
                            }
                            Some(top) => Self::reduce(top, &mut operands)?,
                        }
                    }
                }
            }
        }

        if expect_operand
            && let Some(top) = operators.last()
            && top.lexeme.lexeme_type() == LexemeType::Operator
        {
            return Err(missing_operand(top));
        }

        while let Some(top) = operators.pop() {
            if top.lexeme.lexeme_type() == LexemeType::ParenthesisOpen {
                return Err(ParseError::UnmatchedParenthesis { offset: top.offset });
            }
            Self::reduce(top, &mut operands)?;
        }

        match operands.len() {
            0 => Err(ParseError::Empty),
            1 => {
                let root = operands.pop().ok_or(ParseError::Empty)?;
                log::debug!("parsed expression tree of depth {}", root.depth());
                Ok(root)
            }
            count => Err(ParseError::UnreachableNodes { count }),
        }
    }
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        offset: token.offset,
        text: token.text.clone(),
    }
}

fn missing_operand(token: &Token) -> ParseError {
    ParseError::MissingOperand {
        operator: token.lexeme.operator().map_or("?", |op| op.symbol()),
        offset: token.offset,
    }
}
