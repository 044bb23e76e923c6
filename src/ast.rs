//! # CI Rule Expressions - Abstract Syntax Tree
//!
//! This module defines the lexemes, operators and tree nodes of the rule
//! expression language used in `rules:if:` clauses of CI configuration.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - The lexeme catalog and the tokens the lexer produces
//! - **[operators]** - Binary operators and their precedence table
//! - **[expressions]** - Tree nodes built by the parser
//!
//! ## Quick Start
//!
//! ```text
//! $CI_COMMIT_BRANCH == "main" && $CI_COMMIT_TAG =~ /^v\d+/
//! ```
//!
//! This rule holds on `main` when the commit is tagged with a version.
//!
//! ## Core Concepts
//!
//! ### Values
//!
//! - `true`, `false`, `null`
//! - `"double"` or `'single'` quoted strings, taken verbatim (no escapes)
//! - `/pattern/flags` regular expressions, flags out of `i`, `s`, `m`, `U`
//! - `$NAME` variables, missing ones evaluate to `null`
//! - `$[[ inputs.name ]]` pipeline inputs
//!
//! ### Operators
//!
//! From tightest to loosest binding:
//!
//! | Operators              | Precedence |
//! |------------------------|------------|
//! | `==` `!=` `=~` `!~`    | 3          |
//! | `&&`                   | 2          |
//! | `\|\|`                 | 1          |
//!
//! Every operator is binary and left-associative. Parentheses group.
//!
//! ## Examples
//!
//! ```text
//! $CI_PIPELINE_SOURCE == "merge_request_event"
//! ($A == "x" || $B == "y") && $C != null
//! $[[ inputs.environment ]] == "production"
//! $CI_COMMIT_REF_NAME !~ /^(feature|fix)\//i
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Node;
pub use operators::{BinOp, PrecedenceTable};
pub use tokens::{Lexeme, LexemeType, Token};
