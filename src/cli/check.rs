//! Check rule expressions against JSON variables

use super::{CliError, value_to_json};
use crate::{Lexer, Statement, Variables};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The rule expression to check
    pub expression: String,
    /// Variables as a JSON object
    pub variables: Option<String>,
    /// Pipeline inputs as a JSON object
    pub inputs: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
    /// Report whether the rule holds instead of the raw value
    pub truthy: bool,
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Expression evaluated successfully
    Success(serde_json::Value),
}

fn load_variables(options: &CheckOptions) -> Result<Variables, CliError> {
    let mut variables = match &options.variables {
        Some(json) => Variables::from_json(serde_json::from_str(json)?)?,
        None => Variables::new(),
    };

    if let Some(json) = &options.inputs {
        variables.extend_inputs_from_json(serde_json::from_str(json)?)?;
    }

    Ok(variables)
}

/// Execute a ci-expr check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let variables = load_variables(options)?;
    let statement = Statement::new(&options.expression, &variables);

    if options.syntax_only {
        statement.parse_tree()?;
        return Ok(CheckResult::SyntaxValid);
    }

    let output = if options.truthy {
        serde_json::Value::Bool(statement.truthful()?)
    } else {
        value_to_json(statement.evaluate()?)
    };
    Ok(CheckResult::Success(output))
}

/// Lexeme names of an expression, in order
pub fn execute_tokens(expression: &str) -> Result<Vec<&'static str>, CliError> {
    let mut lexer = Lexer::new(expression);
    lexer
        .lexemes()
        .map_err(|e| CliError::Parse(crate::ParseError::Lex(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(expression: &str) -> CheckOptions {
        CheckOptions {
            expression: expression.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_check_with_variables() {
        let opts = CheckOptions {
            variables: Some(r#"{"CI_COMMIT_BRANCH": "main"}"#.to_string()),
            ..options("$CI_COMMIT_BRANCH == \"main\"")
        };
        assert_eq!(execute_check(&opts).unwrap(), CheckResult::Success(json!(true)));
    }

    #[test]
    fn test_check_with_inputs() {
        let opts = CheckOptions {
            inputs: Some(r#"{"environment": "prod"}"#.to_string()),
            ..options("$[[ inputs.environment ]]")
        };
        assert_eq!(execute_check(&opts).unwrap(), CheckResult::Success(json!("prod")));
    }

    #[test]
    fn test_check_truthy() {
        let opts = CheckOptions {
            truthy: true,
            ..options("$MISSING || \"\"")
        };
        assert_eq!(execute_check(&opts).unwrap(), CheckResult::Success(json!(false)));
    }

    #[test]
    fn test_syntax_only_skips_evaluation() {
        let opts = CheckOptions {
            syntax_only: true,
            ..options("$A =~ $B")
        };
        assert_eq!(execute_check(&opts).unwrap(), CheckResult::SyntaxValid);

        let opts = CheckOptions {
            syntax_only: true,
            ..options("(($A")
        };
        assert!(matches!(execute_check(&opts), Err(CliError::Parse(_))));
    }

    #[test]
    fn test_syntax_error_during_evaluation_is_a_parse_error() {
        let err = execute_check(&options("(($A")).unwrap_err();
        assert!(matches!(err, CliError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error: "));

        let err = execute_check(&options("$A =~ 'x'")).unwrap_err();
        assert!(matches!(err, CliError::Eval(_)));
    }

    #[test]
    fn test_bad_variables_json() {
        let opts = CheckOptions {
            variables: Some("[1, 2]".to_string()),
            ..options("$A")
        };
        assert!(matches!(execute_check(&opts), Err(CliError::Variables(_))));
    }

    #[test]
    fn test_tokens() {
        assert_eq!(
            execute_tokens("($A == 'x')").unwrap(),
            vec!["parenthesis_open", "variable", "equals", "string", "parenthesis_close"]
        );
    }
}
