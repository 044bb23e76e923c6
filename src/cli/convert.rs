//! Expression Value -> JSON conversion

use crate::Value;

/// Convert an expression Value to serde_json::Value
///
/// Patterns have no JSON counterpart and are printed as their
/// `/source/flags` text.
pub fn value_to_json(v: Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::String(s) => serde_json::Value::String(s),
        Value::Pattern(p) => serde_json::Value::String(p.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Pattern;

    #[test]
    fn test_value_to_json() {
        assert_eq!(value_to_json(Value::Null), serde_json::Value::Null);
        assert_eq!(value_to_json(Value::Boolean(true)), serde_json::json!(true));
        assert_eq!(value_to_json(Value::from("main")), serde_json::json!("main"));

        let pattern = Pattern::from_literal("/^v/i").unwrap();
        assert_eq!(value_to_json(Value::Pattern(pattern)), serde_json::json!("/^v/i"));
    }
}
