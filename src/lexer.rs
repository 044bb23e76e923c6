use thiserror::Error;

use crate::ast::{Lexeme, Token};

/// Default cap on the number of tokens in one expression
pub const MAX_TOKENS: usize = 200;

/// Errors raised while tokenizing an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// No lexeme matches at this position
    #[error("unknown lexeme found at position {position}: '{found}'")]
    UnknownLexeme { position: usize, found: String },

    /// The expression is longer than the configured token cap
    #[error("too many tokens: the limit is {max}")]
    TooManyTokens { max: usize },
}

/// Splits an expression into tokens.
///
/// At each position the lexer skips whitespace, then tries every lexeme in
/// [`Lexeme::PRIORITY`] order and takes the first that matches. Every
/// successful step consumes at least one character.
pub struct Lexer {
    input: String,
    position: usize,
    max_tokens: usize,
    emitted: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.to_string(),
            position: 0,
            max_tokens: MAX_TOKENS,
            emitted: 0,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn rest(&self) -> &str {
        &self.input[self.position..]
    }

    fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let trimmed = rest.trim_start();
        self.position += rest.len() - trimmed.len();
    }

    /// Next token, or `None` at the end of the input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        if self.rest().is_empty() {
            return Ok(None);
        }

        let matched = Lexeme::PRIORITY
            .iter()
            .find_map(|&lexeme| lexeme.scan(self.rest()).map(|len| (lexeme, len)))
            .filter(|&(_, len)| len > 0);

        let Some((lexeme, len)) = matched else {
            return Err(LexError::UnknownLexeme {
                position: self.position,
                found: self.rest().chars().take(16).collect(),
            });
        };

        if self.emitted >= self.max_tokens {
            return Err(LexError::TooManyTokens {
                max: self.max_tokens,
            });
        }

        let token = Token::new(&self.rest()[..len], lexeme, self.position);
        log::trace!("token {} {:?} at {}", lexeme, token.text, self.position);

        self.position += len;
        self.emitted += 1;
        Ok(Some(token))
    }

    /// Tokenizes the whole remaining input.
    pub fn tokens(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = vec![];
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Names of the lexemes in the remaining input, in order
    pub fn lexemes(&mut self) -> Result<Vec<&'static str>, LexError> {
        Ok(self
            .tokens()?
            .iter()
            .map(|token| token.lexeme.name())
            .collect())
    }
}

#[test]
fn test_operators() {
    let mut lexer = Lexer::new("== != =~ !~ && ||");
    let lexemes: Vec<Lexeme> = lexer
        .tokens()
        .unwrap()
        .into_iter()
        .map(|t| t.lexeme)
        .collect();
    assert_eq!(
        lexemes,
        vec![
            Lexeme::Equals,
            Lexeme::NotEquals,
            Lexeme::Matches,
            Lexeme::NotMatches,
            Lexeme::And,
            Lexeme::Or,
        ]
    );
}

#[test]
fn test_offsets() {
    let mut lexer = Lexer::new("  $A  ==\t'x'");
    let tokens = lexer.tokens().unwrap();
    assert_eq!(tokens[0], Token::new("$A", Lexeme::Variable, 2));
    assert_eq!(tokens[1], Token::new("==", Lexeme::Equals, 6));
    assert_eq!(tokens[2], Token::new("'x'", Lexeme::String, 9));
}

#[test]
fn test_token_limit() {
    let mut lexer = Lexer::new("$A && $B").with_max_tokens(2);
    assert_eq!(lexer.tokens(), Err(LexError::TooManyTokens { max: 2 }));
}
