//! Documentation content for ci-expr CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Variables,
    Patterns,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "variables" | "vars" | "inputs" => Some(Self::Variables),
            "patterns" | "pattern" | "regex" => Some(Self::Patterns),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"CI-EXPR DOCUMENTATION

ci-expr evaluates the conditions used in CI configuration, such as
`rules: - if: '$CI_COMMIT_BRANCH == "main"'`, against a set of variables
and pipeline inputs.

DOCUMENTATION CATEGORIES

  syntax            Literals, variables, inputs, and grouping
  operators         Comparison, pattern matching, and logical operators
  variables         How variables and inputs are looked up
  patterns          Regular expression literals and their flags
  errors            What can go wrong and when it is reported

QUICK REFERENCE

  true false null   Literals
  "text" 'text'     Strings (no escapes)
  /regex/flags      Pattern, flags from i s m U
  $NAME             Variable
  $[[ inputs.x ]]   Pipeline input
  == != =~ !~       Comparison and matching
  && ||             Logical, short-circuit
  ( )               Grouping

Run 'ci-expr doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Variables) => Ok(VARIABLES_DOC),
        Some(DocCategory::Patterns) => Ok(PATTERNS_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Values and Grouping

LITERALS
  true, false
    Booleans.

  null
    The null value. A missing variable is also null.

  "text" or 'text'
    Strings. The text between the quotes is taken as is; there are no
    escape sequences, so a string cannot contain its own quote character.

PATTERNS
  /regex/flags
    A regular expression, see 'ci-expr doc patterns'.

REFERENCES
  $NAME
    The value of variable NAME. Names are letters, digits and underscores.

  $[[ inputs.name ]]
    The value of pipeline input `name`. Spaces inside the brackets are
    optional.

GROUPING
  ( expression )
    Parentheses override operator precedence.

    Example:
      Query:  ($A == "x" || $B == "y") && $C == "z"

WHITESPACE
  Spaces, tabs and newlines between tokens are ignored.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

COMPARISON
  ==    Equal. Types must match: "true" == true is false, null == "" is false.
  !=    Not equal, the exact negation of ==.

PATTERN MATCHING
  =~    Left side converted to text matches the pattern on the right.
        null becomes "", booleans become "true" / "false".
  !~    The exact negation of =~.

        The right side must be a pattern literal, or a variable holding a
        whole "/regex/flags" string.

LOGICAL
  &&    If the left side is null or false, that is the result and the right
        side is not evaluated. Otherwise the result is the right side.
  ||    If the left side is neither null nor false, that is the result and
        the right side is not evaluated. Otherwise the result is the right side.

PRECEDENCE (tightest first)
  == != =~ !~
  &&
  ||

  All operators are binary and left-associative. There is no unary `!`.

    Example:
      $A == "x" && $B == "y" || $C == "z"
      is read as
      (($A == "x") && ($B == "y")) || ($C == "z")
"#;

const VARIABLES_DOC: &str = r#"VARIABLES - Lookup Rules

VARIABLES
  $NAME looks up NAME exactly first, then ignoring ASCII case. A variable
  that is not defined evaluates to null.

    Example:
      Variables: {"CI_COMMIT_BRANCH": "main"}
      Query:     $CI_COMMIT_BRANCH == "main"
      Output:    true

      Query:     $UNDEFINED == null
      Output:    true

INPUTS
  $[[ inputs.name ]] looks up `name` in the pipeline inputs, matching case
  exactly. A missing input evaluates to null.

    Example:
      Variables: {"inputs": {"environment": "prod"}}
      Query:     $[[ inputs.environment ]] == "prod"
      Output:    true

JSON VARIABLES
  With --variables, strings, booleans and null are used as is. Numbers
  become their decimal text, arrays and objects their JSON text. An
  `inputs` object inside the variables becomes the pipeline inputs.
"#;

const PATTERNS_DOC: &str = r#"PATTERNS - Regular Expressions

SYNTAX
  /regex/flags
    Write `\/` for a slash inside the pattern.

FLAGS
  i     Case-insensitive
  s     `.` also matches newline
  m     `^` and `$` match at line boundaries
  U     Swap greedy and lazy quantifiers

SAFETY
  Patterns run on a linear-time engine: matching cannot backtrack
  catastrophically. Backreferences and look-around are not supported.
  Patterns longer than 4096 bytes, or that compile to an oversized program,
  are rejected when the expression is parsed, even if they would never be
  evaluated.

    Example:
      Variables: {"BRANCH": "release/1.0"}
      Query:     $BRANCH =~ /^release\//
      Output:    true
"#;

const ERRORS_DOC: &str = r#"ERRORS

LEXICAL
  Nothing in the language starts at some position, e.g. `$A = "x"` or an
  unterminated string. Reported with the position. Expressions are also
  limited to 200 tokens.

SYNTAX
  Unmatched parentheses, an empty expression or an empty `()` group.
  Values and operators must alternate: two values with no operator
  between them (`$A $B`) and an operator missing its left or right
  operand (`== "x"`, `$A &&`) are both syntax errors.

PATTERN
  A /regex/ literal that is invalid or unsafe. Reported while parsing.

EVALUATION
  The right side of =~ or !~ is not a pattern. Reported only when that
  part of the expression is actually evaluated.

An error never turns into false: `ci-expr check` exits with status 1.
"#;
