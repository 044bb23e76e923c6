//! Untrusted regular expressions written as `/pattern/flags` literals.
//!
//! Patterns come straight out of user configuration and are evaluated at
//! request time, so they are compiled with the `regex` crate: a finite
//! automaton engine whose matching time is linear in the input, with no
//! backtracking. On top of that, construction enforces a maximum source
//! length and caps on the compiled program and lazy DFA cache, so a
//! pathological literal is rejected before anything is evaluated.
//!
//! Supported flags are `i` (case-insensitive), `s` (`.` matches newline),
//! `m` (`^`/`$` match at line boundaries) and `U` (swap greediness).

use std::fmt;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Longest pattern source accepted, in bytes
pub const MAX_PATTERN_LENGTH: usize = 4096;

/// Compiled program size limit
const SIZE_LIMIT: usize = 1 << 20;

/// Lazy DFA cache size limit
const DFA_SIZE_LIMIT: usize = 2 << 20;

const FLAGS: [char; 4] = ['i', 's', 'm', 'U'];

/// Errors raised while validating or compiling a pattern.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatternError {
    /// Source longer than the configured limit
    #[error("pattern is {length} bytes long, the limit is {max}")]
    TooLong { length: usize, max: usize },

    /// Flag outside of `i`, `s`, `m`, `U`
    #[error("unsupported pattern flag '{0}'")]
    InvalidFlag(char),

    /// Text is not in `/pattern/flags` form
    #[error("'{0}' is not a /pattern/ literal")]
    NotALiteral(String),

    /// The regex engine refused the pattern (syntax, unsupported
    /// construct, or compiled size over the limit)
    #[error("invalid regular expression /{pattern}/: {message}")]
    Invalid { pattern: String, message: String },
}

/// A compiled, ReDoS-safe regular expression.
///
/// # Examples
///
/// ```
/// use ci_expr::Pattern;
///
/// let pattern = Pattern::from_literal("/^release\\//i").unwrap();
/// assert!(pattern.is_match("Release/1.0"));
/// assert!(!pattern.is_match("main"));
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles `source` with the given flags.
    pub fn new(source: &str, flags: &str) -> Result<Self, PatternError> {
        Self::with_max_length(source, flags, MAX_PATTERN_LENGTH)
    }

    /// Compiles `source` with the given flags, rejecting sources longer than
    /// `max_length` bytes.
    pub fn with_max_length(
        source: &str,
        flags: &str,
        max_length: usize,
    ) -> Result<Self, PatternError> {
        if source.len() > max_length {
            return Err(PatternError::TooLong {
                length: source.len(),
                max: max_length,
            });
        }

        let mut normalized = String::new();
        for flag in flags.chars() {
            if !FLAGS.contains(&flag) {
                return Err(PatternError::InvalidFlag(flag));
            }
            // The regex crate refuses repeated flags in an inline group
            if !normalized.contains(flag) {
                normalized.push(flag);
            }
        }

        let full = if normalized.is_empty() {
            source.to_string()
        } else {
            format!("(?{}){}", normalized, source)
        };

        let regex = RegexBuilder::new(&full)
            .size_limit(SIZE_LIMIT)
            .dfa_size_limit(DFA_SIZE_LIMIT)
            .build()
            .map_err(|e| {
                log::warn!("rejected pattern /{}/{}: {}", source, normalized, e);
                PatternError::Invalid {
                    pattern: source.to_string(),
                    message: e.to_string(),
                }
            })?;

        Ok(Pattern {
            source: source.to_string(),
            flags: normalized,
            regex,
        })
    }

    /// Parses and compiles a complete `/pattern/flags` literal.
    ///
    /// `\/` inside the body stands for a literal slash.
    pub fn from_literal(text: &str) -> Result<Self, PatternError> {
        Self::from_literal_with_max_length(text, MAX_PATTERN_LENGTH)
    }

    pub fn from_literal_with_max_length(
        text: &str,
        max_length: usize,
    ) -> Result<Self, PatternError> {
        if scan_literal(text) != Some(text.len()) {
            return Err(PatternError::NotALiteral(text.to_string()));
        }

        // Flags never contain a slash, so the last one closes the body
        let close = text
            .rfind('/')
            .ok_or_else(|| PatternError::NotALiteral(text.to_string()))?;

        let body = unescape_slashes(&text[1..close]);
        Self::with_max_length(&body, &text[close + 1..], max_length)
    }

    /// True if the pattern matches anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", escape_slashes(&self.source), self.flags)
    }
}

/// Length in bytes of the `/pattern/flags` literal at the start of `input`.
///
/// The body must be at least one character long. A backslash always
/// consumes the following character, so `\/` does not close the literal.
pub(crate) fn scan_literal(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    if bytes.first() != Some(&b'/') {
        return None;
    }

    let mut i = 1;
    loop {
        match *bytes.get(i)? {
            // Escapes whatever follows; continuation bytes of a multi-byte
            // char are never `/` or `\`
            b'\\' => i += 2,
            b'/' if i == 1 => return None,
            b'/' => break,
            _ => i += 1,
        }
    }
    i += 1;

    while let Some(b'i' | b's' | b'm' | b'U') = bytes.get(i) {
        i += 1;
    }
    Some(i)
}

fn unescape_slashes(body: &str) -> String {
    let mut result = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('/') => result.push('/'),
                Some(next) => {
                    result.push('\\');
                    result.push(next);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(ch);
        }
    }
    result
}

fn escape_slashes(source: &str) -> String {
    let mut result = String::with_capacity(source.len());
    let mut chars = source.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                result.push('\\');
                if let Some(next) = chars.next() {
                    result.push(next);
                }
            }
            '/' => result.push_str("\\/"),
            _ => result.push(ch),
        }
    }
    result
}
