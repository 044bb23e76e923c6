//! The read-only variable snapshot an expression is evaluated against.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::value::Value;

/// Errors raised while building variables from JSON.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VariablesError {
    #[error("variables must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Named variables plus the nested pipeline `inputs`.
///
/// Variable lookup tries the exact name first and falls back to an ASCII
/// case-insensitive match. Input lookup is exact. Maps are ordered so the
/// fallback always picks the same entry.
///
/// # Examples
///
/// ```
/// use ci_expr::{Value, Variables};
///
/// let variables = Variables::new()
///     .with("CI_COMMIT_BRANCH", "main")
///     .with_input("environment", "prod");
///
/// assert_eq!(variables.get("ci_commit_branch"), Some(&Value::from("main")));
/// assert_eq!(variables.input("environment"), Some(&Value::from("prod")));
/// assert_eq!(variables.get("MISSING"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables {
    variables: BTreeMap<String, Value>,
    inputs: BTreeMap<String, Value>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_input(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn insert_input(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.inputs.insert(name.into(), value.into());
    }

    /// Looks up a variable, exact name first, then ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name).or_else(|| {
            self.variables
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value)
        })
    }

    pub fn input(&self, name: &str) -> Option<&Value> {
        self.inputs.get(name)
    }

    /// Number of variables plus inputs
    pub fn len(&self) -> usize {
        self.variables.len() + self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.inputs.is_empty()
    }

    /// Builds variables from a JSON object.
    ///
    /// A top-level `inputs` key holding an object becomes the inputs map.
    /// Strings, booleans and `null` map directly; numbers become their
    /// decimal text and arrays or objects their compact JSON text, the same
    /// way they would be exposed as CI variables.
    pub fn from_json(json: serde_json::Value) -> Result<Self, VariablesError> {
        let object = match json {
            serde_json::Value::Object(object) => object,
            other => return Err(VariablesError::NotAnObject(json_type_name(&other))),
        };

        let mut variables = Variables::new();
        for (name, value) in object {
            match value {
                serde_json::Value::Object(inputs) if name == "inputs" => {
                    for (input, value) in inputs {
                        variables.insert_input(input, json_to_value(value));
                    }
                }
                value => variables.insert(name, json_to_value(value)),
            }
        }
        Ok(variables)
    }

    /// Adds the entries of a JSON object to the inputs map.
    pub fn extend_inputs_from_json(&mut self, json: serde_json::Value) -> Result<(), VariablesError> {
        let object = match json {
            serde_json::Value::Object(object) => object,
            other => return Err(VariablesError::NotAnObject(json_type_name(&other))),
        };
        for (input, value) in object {
            self.insert_input(input, json_to_value(value));
        }
        Ok(())
    }
}

/// Convert a scalar serde_json::Value to an expression Value
pub fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => Value::String(n.to_string()),
        serde_json::Value::String(s) => Value::String(s),
        other => Value::String(other.to_string()),
    }
}

fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exact_name_wins_over_case_insensitive() {
        let variables = Variables::new().with("foo", "lower").with("FOO", "upper");
        assert_eq!(variables.get("FOO"), Some(&Value::from("upper")));
        assert_eq!(variables.get("foo"), Some(&Value::from("lower")));
        // Fallback picks the first key in order, "FOO" < "foo"
        assert_eq!(variables.get("Foo"), Some(&Value::from("upper")));
    }

    #[test]
    fn test_inputs_are_exact() {
        let variables = Variables::new().with_input("env", "prod");
        assert_eq!(variables.input("ENV"), None);
        assert_eq!(variables.get("env"), None);
    }

    #[test]
    fn test_from_json() {
        let variables = Variables::from_json(json!({
            "BRANCH": "main",
            "DEBUG": true,
            "EMPTY": null,
            "COUNT": 3,
            "LIST": [1, 2],
            "inputs": {"environment": "prod", "replicas": 2}
        }))
        .unwrap();

        assert_eq!(variables.get("BRANCH"), Some(&Value::from("main")));
        assert_eq!(variables.get("DEBUG"), Some(&Value::Boolean(true)));
        assert_eq!(variables.get("EMPTY"), Some(&Value::Null));
        assert_eq!(variables.get("COUNT"), Some(&Value::from("3")));
        assert_eq!(variables.get("LIST"), Some(&Value::from("[1,2]")));
        assert_eq!(variables.input("environment"), Some(&Value::from("prod")));
        assert_eq!(variables.input("replicas"), Some(&Value::from("2")));
        assert_eq!(variables.get("inputs"), None);
    }

    #[test]
    fn test_from_json_requires_object() {
        assert_eq!(
            Variables::from_json(json!([1])),
            Err(VariablesError::NotAnObject("array"))
        );
    }
}
