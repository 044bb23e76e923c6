//! CLI support for ci-expr
//!
//! Provides programmatic access to the `ci-expr` command so configuration
//! linters can check rule expressions the same way the binary does.

mod check;
mod convert;
mod docs;

pub use check::{CheckOptions, CheckResult, execute_check, execute_tokens};
pub use convert::value_to_json;
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Expression could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] crate::ParseError),

    /// Expression could not be evaluated
    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    /// Variables JSON is malformed
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Variables JSON is not an object
    #[error("Invalid variables: {0}")]
    Variables(#[from] crate::VariablesError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'ci-expr docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<crate::StatementError> for CliError {
    fn from(err: crate::StatementError) -> Self {
        match err {
            crate::StatementError::Parse(e) => CliError::Parse(e),
            crate::StatementError::Eval(e) => CliError::Eval(e),
        }
    }
}
