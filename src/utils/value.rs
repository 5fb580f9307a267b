//! JSON value helpers: nil semantics and canonical rendering.
//!
//! The diff engine treats absent keys and JSON `null` as the same "nil"
//! state, and compares values structurally regardless of object key order.
//! Canonical rendering gives every value a stable string form used for set
//! membership, sorting, and primary-key normalization.

use serde_json::Value;

/// Look up a property on a container value.
///
/// Returns `None` when the container is not an object or the key is missing.
/// Non-object containers read as having every property absent, matching the
/// permissive property access of dynamic data graphs.
pub(crate) fn field<'a>(container: &'a Value, name: &str) -> Option<&'a Value> {
    container.as_object().and_then(|map| map.get(name))
}

/// True when the value is nil: absent or JSON `null`.
pub(crate) fn is_nil(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}

/// Collapse `Some(Null)` to `None` so nil compares equal to nil.
pub(crate) fn defined(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Deep equality with nil semantics: nil equals nil and nothing else.
///
/// Object comparison is key-order independent (`serde_json` map equality).
pub(crate) fn values_equal(from: Option<&Value>, to: Option<&Value>) -> bool {
    match (defined(from), defined(to)) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Render a value as a canonical JSON string with object keys sorted.
///
/// Two structurally equal values produce identical strings, regardless of
/// the key order they were parsed with.
pub(crate) fn canonical_string(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => {
            // serde_json string rendering cannot fail
            out.push_str(&Value::String(s.clone()).to_string());
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(&Value::String((*key).clone()), out);
                out.push(':');
                if let Some(v) = map.get(*key) {
                    write_canonical(v, out);
                }
            }
            out.push('}');
        }
    }
}

/// Human-readable shape label for error messages.
pub(crate) fn kind_label(value: Option<&Value>) -> &'static str {
    match value {
        None => "absent",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "a boolean",
        Some(Value::Number(_)) => "a number",
        Some(Value::String(_)) => "a string",
        Some(Value::Array(_)) => "an array",
        Some(Value::Object(_)) => "an object",
    }
}

/// String-coerce a value for primary-key normalization.
///
/// Lowercased so that identities differing only in letter case match.
pub(crate) fn key_fragment(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.to_lowercase(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string().to_lowercase(),
        Some(other) => canonical_string(other).to_lowercase(),
    }
}
