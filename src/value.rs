use std::fmt;

use crate::pattern::Pattern;

/// A value produced by evaluating a rule expression.
///
/// Rule expressions only ever deal with scalars: variables hold strings,
/// literals produce strings, booleans or `null`, and regular expression
/// literals produce a compiled [`Pattern`].
///
/// # Examples
///
/// ```
/// use ci_expr::Value;
///
/// let null = Value::Null;
/// let boolean = Value::Boolean(true);
/// let string = Value::from("main");
///
/// assert!(!null.is_truthy());
/// assert!(boolean.is_truthy());
/// assert_eq!(string.as_match_text(), "main");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing variable or the `null` literal
    Null,

    /// `true` / `false`
    Boolean(bool),

    /// UTF-8 string
    String(String),

    /// Compiled, safe regular expression
    Pattern(Pattern),
}

impl Value {
    /// Truthiness used by `&&` and `||`.
    ///
    /// Only `null` and `false` are falsy; the empty string is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    /// Whether the value counts as "present" for a rule to hold.
    ///
    /// Stricter than [`Value::is_truthy`]: an empty string is not present.
    pub fn is_present(&self) -> bool {
        match self {
            Value::Null | Value::Boolean(false) => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Text a value is coerced to on the left of `=~` / `!~`.
    pub fn as_match_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::String(s) => s.clone(),
            Value::Pattern(p) => p.to_string(),
        }
    }

    /// Human-readable type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::Pattern(_) => "pattern",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Pattern(p) => write!(f, "{}", p),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Pattern> for Value {
    fn from(p: Pattern) -> Self {
        Value::Pattern(p)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
