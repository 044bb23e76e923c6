use ci_expr::{
    EvalError, ErrorKind, Limits, Pattern, PatternError, Statement, StatementError, Value,
    Variables,
};

fn eval(expr_str: &str, variables: &Variables) -> Result<Value, StatementError> {
    Statement::new(expr_str, variables).evaluate()
}

fn eval_bool(expr_str: &str, variables: &Variables) -> bool {
    match eval(expr_str, variables) {
        Ok(Value::Boolean(b)) => b,
        other => panic!("expected boolean from {:?}, got {:?}", expr_str, other),
    }
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_literal_values() {
    let vars = Variables::new();
    assert_eq!(eval("true", &vars).unwrap(), Value::Boolean(true));
    assert_eq!(eval("false", &vars).unwrap(), Value::Boolean(false));
    assert_eq!(eval("null", &vars).unwrap(), Value::Null);
    assert_eq!(eval("\"abc\"", &vars).unwrap(), Value::from("abc"));
    assert_eq!(eval("'abc'", &vars).unwrap(), Value::from("abc"));
    assert_eq!(
        eval("/ab+c/i", &vars).unwrap(),
        Value::Pattern(Pattern::new("ab+c", "i").unwrap())
    );
}

#[test]
fn test_variable_and_input_values() {
    let vars = Variables::new().with("FOO", "foo").with_input("bar", "baz");
    assert_eq!(eval("$FOO", &vars).unwrap(), Value::from("foo"));
    assert_eq!(eval("$[[ inputs.bar ]]", &vars).unwrap(), Value::from("baz"));
    assert_eq!(eval("$MISSING", &vars).unwrap(), Value::Null);
    assert_eq!(eval("$[[ inputs.missing ]]", &vars).unwrap(), Value::Null);
}

#[test]
fn test_variable_lookup_ignores_case() {
    let vars = Variables::new().with("CI_COMMIT_BRANCH", "main");
    assert!(eval_bool("$ci_commit_branch == 'main'", &vars));
}

#[test]
fn test_inputs_are_not_variables() {
    let vars = Variables::new().with("environment", "staging").with_input("environment", "prod");
    assert!(eval_bool("$environment == 'staging'", &vars));
    assert!(eval_bool("$[[ inputs.environment ]] == 'prod'", &vars));
}

// ============================================================================
// Equality
// ============================================================================

#[test]
fn test_equality_is_type_sensitive() {
    let vars = Variables::new()
        .with("EMPTY", "")
        .with("TEXT_TRUE", "true")
        .with("FLAG", true);

    assert!(!eval_bool("$EMPTY == null", &vars));
    assert!(eval_bool("$EMPTY == ''", &vars));
    assert!(!eval_bool("$TEXT_TRUE == true", &vars));
    assert!(eval_bool("$FLAG == true", &vars));
    assert!(eval_bool("null == null", &vars));
    assert!(eval_bool("$MISSING == $ALSO_MISSING", &vars));
}

#[test]
fn test_not_equals_is_negation() {
    let vars = Variables::new().with("A", "x").with("EMPTY", "");
    for expr in ["$A", "$EMPTY", "$MISSING", "true", "null", "'x'"] {
        for other in ["'x'", "''", "null", "false"] {
            let eq = eval_bool(&format!("{} == {}", expr, other), &vars);
            let ne = eval_bool(&format!("{} != {}", expr, other), &vars);
            assert_eq!(eq, !ne, "{} vs {}", expr, other);
        }
    }
}

#[test]
fn test_patterns_compare_by_source_and_flags() {
    let vars = Variables::new();
    assert!(eval_bool("/a/i == /a/i", &vars));
    assert!(!eval_bool("/a/i == /a/", &vars));
    assert!(!eval_bool("/a/ == 'a'", &vars));
}

// ============================================================================
// Pattern Matching
// ============================================================================

#[test]
fn test_matches() {
    let vars = Variables::new().with("A", "v12").with("B", "beta");
    assert!(eval_bool("$A =~ /^v[0-9]+/", &vars));
    assert!(!eval_bool("$B =~ /^v[0-9]+/", &vars));
    assert!(eval_bool("$B =~ /ET/i", &vars));
}

#[test]
fn test_matches_coerces_left_to_text() {
    let vars = Variables::new().with("FLAG", true);
    assert!(eval_bool("$FLAG =~ /^true$/", &vars));
    assert!(eval_bool("$MISSING =~ /^$/", &vars));
    assert!(!eval_bool("$MISSING =~ /./", &vars));
    assert!(eval_bool("null !~ /./", &vars));
}

#[test]
fn test_matches_pattern_from_variable() {
    let vars = Variables::new()
        .with("BRANCH", "release/2.1")
        .with("RELEASE_PATTERN", "/^RELEASE\\//i");
    assert!(eval_bool("$BRANCH =~ $RELEASE_PATTERN", &vars));
    assert!(!eval_bool("$BRANCH !~ $RELEASE_PATTERN", &vars));
}

#[test]
fn test_matches_against_non_pattern_is_an_error() {
    let vars = Variables::new().with("A", "main").with("B", "main");

    let err = eval("$A =~ $B", &vars).unwrap_err();
    assert_eq!(
        err,
        StatementError::Eval(EvalError::NotAPattern {
            operator: "=~",
            found: "string"
        })
    );
    assert_eq!(err.kind(), ErrorKind::Evaluation);

    let err = eval("$A !~ null", &vars).unwrap_err();
    assert_eq!(
        err,
        StatementError::Eval(EvalError::NotAPattern {
            operator: "!~",
            found: "null"
        })
    );

    assert!(eval("$A =~ true", &vars).is_err());
}

#[test]
fn test_invalid_pattern_in_variable_is_an_error() {
    let vars = Variables::new().with("A", "main").with("P", "/[/");
    let err = eval("$A =~ $P", &vars).unwrap_err();
    assert!(matches!(err, StatementError::Eval(EvalError::InvalidPattern(_))));
    assert_eq!(err.kind(), ErrorKind::Evaluation);
}

// ============================================================================
// Logical Operators
// ============================================================================

#[test]
fn test_and_or_return_deciding_operand() {
    let vars = Variables::new().with("A", "a").with("B", "b").with("EMPTY", "");

    assert_eq!(eval("$A && $B", &vars).unwrap(), Value::from("b"));
    assert_eq!(eval("$MISSING && $B", &vars).unwrap(), Value::Null);
    assert_eq!(eval("false && $B", &vars).unwrap(), Value::Boolean(false));
    assert_eq!(eval("$A || $B", &vars).unwrap(), Value::from("a"));
    assert_eq!(eval("$MISSING || $B", &vars).unwrap(), Value::from("b"));
    assert_eq!(eval("null || false", &vars).unwrap(), Value::Boolean(false));

    // Empty string is truthy for && and ||
    assert_eq!(eval("$EMPTY && $B", &vars).unwrap(), Value::from("b"));
    assert_eq!(eval("$EMPTY || $B", &vars).unwrap(), Value::from(""));
}

#[test]
fn test_and_short_circuits() {
    let vars = Variables::new().with("A", "main");
    // Right side would fail with NotAPattern if it ran
    assert_eq!(
        eval("$MISSING == 'x' && $A =~ $A", &vars).unwrap(),
        Value::Boolean(false)
    );
    assert!(eval("$A == 'main' && $A =~ $A", &vars).is_err());
}

#[test]
fn test_or_short_circuits() {
    let vars = Variables::new().with("A", "main");
    assert_eq!(
        eval("$A == 'main' || $A =~ $A", &vars).unwrap(),
        Value::Boolean(true)
    );
    assert!(eval("$A == 'dev' || $A =~ $A", &vars).is_err());
}

// ============================================================================
// Statement
// ============================================================================

#[test]
fn test_truthful() {
    let vars = Variables::new().with("A", "a").with("EMPTY", "");
    assert!(Statement::new("$A", &vars).truthful().unwrap());
    assert!(Statement::new("$A == 'a'", &vars).truthful().unwrap());
    assert!(!Statement::new("$A == 'b'", &vars).truthful().unwrap());
    assert!(!Statement::new("$EMPTY", &vars).truthful().unwrap());
    assert!(!Statement::new("$MISSING", &vars).truthful().unwrap());
    assert!(Statement::new("/x/", &vars).truthful().unwrap());
}

#[test]
fn test_truthful_propagates_errors() {
    let vars = Variables::new().with("A", "a");
    assert!(Statement::new("$A =~ $A", &vars).truthful().is_err());
    assert!(Statement::new("$A ==", &vars).truthful().is_err());
}

#[test]
fn test_is_valid() {
    let vars = Variables::new();
    assert!(Statement::new("$A == 'x' && ($B =~ /y/ || $C != null)", &vars).is_valid());
    // Only parsing is checked, evaluation would fail
    assert!(Statement::new("$A =~ $B", &vars).is_valid());
    assert!(!Statement::new("$A == ", &vars).is_valid());
    assert!(!Statement::new("", &vars).is_valid());
    assert!(!Statement::new("/(/", &vars).is_valid());
}

#[test]
fn test_error_kinds() {
    let vars = Variables::new();
    let kind = |expr: &str| eval(expr, &vars).unwrap_err().kind();

    assert_eq!(kind("$A = 'x'"), ErrorKind::Lexical);
    assert_eq!(kind("(("), ErrorKind::Syntax);
    assert_eq!(kind(""), ErrorKind::Syntax);
    assert_eq!(kind("$A $B"), ErrorKind::Syntax);
    assert_eq!(kind("== 'x'"), ErrorKind::Syntax);
    assert_eq!(kind("$A &&"), ErrorKind::Syntax);
    assert_eq!(kind("$A () == $B"), ErrorKind::Syntax);
    assert_eq!(kind("$A =~ /[/"), ErrorKind::PatternSafety);
    assert_eq!(kind("$A =~ 'x'"), ErrorKind::Evaluation);
}

#[test]
fn test_custom_limits() {
    let vars = Variables::new();
    let limits = Limits {
        max_tokens: 3,
        ..Limits::default()
    };
    assert!(Statement::with_limits("$A == 'x'", &vars, limits).is_valid());
    assert_eq!(
        Statement::with_limits("$A == 'x' && true", &vars, limits)
            .evaluate()
            .unwrap_err()
            .kind(),
        ErrorKind::Lexical
    );

    let limits = Limits {
        max_pattern_length: 2,
        ..Limits::default()
    };
    assert_eq!(
        Statement::with_limits("$A =~ /abc/", &vars, limits)
            .evaluate()
            .unwrap_err()
            .kind(),
        ErrorKind::PatternSafety
    );
}

#[test]
fn test_pattern_limit_covers_variable_patterns() {
    let vars = Variables::new().with("A", "abcdef").with("P", "/abcdef/");
    let limits = Limits {
        max_pattern_length: 2,
        ..Limits::default()
    };

    let err = Statement::with_limits("$A =~ /abcdef/", &vars, limits)
        .evaluate()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PatternSafety);

    let err = Statement::with_limits("$A =~ $P", &vars, limits)
        .evaluate()
        .unwrap_err();
    assert_eq!(
        err,
        StatementError::Eval(EvalError::InvalidPattern(PatternError::TooLong {
            length: 6,
            max: 2
        }))
    );

    // Default limit accepts the same variable pattern
    assert!(eval_bool("$A =~ $P", &vars));
}

#[test]
fn test_error_messages_carry_position() {
    let vars = Variables::new();
    let err = eval("$A == 'x' ) ", &vars).unwrap_err();
    assert_eq!(err.to_string(), "unmatched parenthesis at position 10");

    let err = eval("$A =! 'x'", &vars).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown lexeme found at position 3: '=! 'x''"
    );
}

#[test]
fn test_realistic_rules() {
    let vars = Variables::new()
        .with("CI_PIPELINE_SOURCE", "merge_request_event")
        .with("CI_MERGE_REQUEST_TARGET_BRANCH_NAME", "main")
        .with("CI_COMMIT_REF_NAME", "feature/login-form")
        .with_input("deploy", "true");

    assert!(eval_bool(
        "$CI_PIPELINE_SOURCE == \"merge_request_event\" && $CI_MERGE_REQUEST_TARGET_BRANCH_NAME == \"main\"",
        &vars
    ));
    assert!(eval_bool(
        "$CI_COMMIT_REF_NAME =~ /^(feature|fix)\\// && $CI_COMMIT_TAG == null",
        &vars
    ));
    assert!(!eval_bool(
        "$CI_PIPELINE_SOURCE == \"schedule\" || $CI_COMMIT_REF_NAME !~ /^feature/",
        &vars
    ));
    assert!(eval_bool("$[[ inputs.deploy ]] == 'true'", &vars));
}
