//! Pre-serialization of selected request fields.
//!
//! Some endpoints expect a field (usually a list of emails) to arrive as a
//! JSON-encoded string inside the request instead of as a nested value.

use std::borrow::Cow;

use serde_json::Value;

use crate::response::is_truthy;

/// Encode every listed field of `params` as JSON text.
///
/// Returns `params` borrowed and untouched when `fields` is empty or `params`
/// is not an object. Otherwise returns a shallow copy in which each listed
/// field that is present and truthy holds its JSON encoding. Falsy values
/// (`0`, `""`, `false`, `null`) are left as they are even when listed.
pub fn serialize<'a>(params: &'a Value, fields: &[&str]) -> Cow<'a, Value> {
    if fields.is_empty() {
        return Cow::Borrowed(params);
    }
    let Some(object) = params.as_object() else {
        return Cow::Borrowed(params);
    };

    let mut copy = object.clone();
    for field in fields {
        if let Some(value) = copy.get_mut(*field) {
            if is_truthy(value) {
                *value = Value::String(value.to_string());
            }
        }
    }

    Cow::Owned(Value::Object(copy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_fields_borrows_params() {
        let params = json!({"emails": ["a@example.com"]});
        let out = serialize(&params, &[]);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(*out, params);
    }

    #[test]
    fn falsy_values_are_not_encoded() {
        let params = json!({"a": 1, "b": 0, "c": "x"});
        let out = serialize(&params, &["a", "b", "c"]);

        assert_eq!(out["a"], json!("1"));
        assert_eq!(out["b"], json!(0));
        assert_eq!(out["c"], json!("\"x\""));
    }

    #[test]
    fn nested_values_become_json_text() {
        let params = json!({
            "id": 42,
            "emails": [{"email": "a@example.com", "variables": {"name": "A"}}]
        });
        let out = serialize(&params, &["emails"]);

        let encoded = out["emails"].as_str().unwrap();
        let decoded: Value = serde_json::from_str(encoded).unwrap();
        assert_eq!(decoded, params["emails"]);
        assert_eq!(out["id"], json!(42));
    }

    #[test]
    fn caller_value_is_not_mutated() {
        let params = json!({"emails": ["a@example.com"]});
        let before = params.clone();
        let _ = serialize(&params, &["emails"]);
        assert_eq!(params, before);
    }

    #[test]
    fn absent_fields_and_non_objects_pass_through() {
        let params = json!({"id": 1});
        assert_eq!(*serialize(&params, &["emails"]), params);

        let raw = json!("emails=raw");
        assert!(matches!(serialize(&raw, &["emails"]), Cow::Borrowed(_)));
    }
}
