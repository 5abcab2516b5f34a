//! Canonical encoding for structural comparisons
//!
//! `const`, `enum` and `uniqueItems` all compare values through the same
//! encoding: object keys sorted, no insignificant whitespace, and integral
//! floats written as integers. Two values are structurally equal exactly when
//! their canonical encodings are byte-identical.

use serde_json::{Number, Value};
use sha2::{Digest, Sha256};

use crate::types::is_integral;

/// Encode a value canonically
pub fn canonical_string(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(n, out),
        Value::String(s) => out.push_str(&Value::String(s.clone()).to_string()),
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
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
    }
}

fn write_number(n: &Number, out: &mut String) {
    if n.is_f64() && is_integral(n) {
        if let Some(f) = n.as_f64() {
            // Within the exactly-representable range the integer form is lossless
            if f.abs() < 9_007_199_254_740_992.0 {
                out.push_str(&(f as i64).to_string());
                return;
            }
        }
    }
    out.push_str(&n.to_string());
}

/// Deep structural equality: array order matters, object key order does not
pub fn structurally_equal(a: &Value, b: &Value) -> bool {
    canonical_string(a) == canonical_string(b)
}

/// SHA256 digest of a value's canonical encoding
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Compute the fingerprint of a JSON value
    pub fn of(value: &Value) -> Self {
        Self::from_bytes(canonical_string(value).as_bytes())
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_order_independent() {
        let a: Value = serde_json::from_str(r#"{"x": 1, "y": {"b": 2, "a": 1}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"y": {"a": 1, "b": 2}, "x": 1}"#).unwrap();
        assert_eq!(canonical_string(&a), r#"{"x":1,"y":{"a":1,"b":2}}"#);
        assert!(structurally_equal(&a, &b));
        assert_eq!(Fingerprint::of(&a), Fingerprint::of(&b));
    }

    #[test]
    fn test_array_order_matters() {
        assert!(!structurally_equal(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn test_integral_float_equals_integer() {
        assert!(structurally_equal(&json!(1), &json!(1.0)));
        assert!(!structurally_equal(&json!(1), &json!(1.5)));
        assert!(!structurally_equal(&json!(1), &json!(true)));
        assert!(!structurally_equal(&json!("1"), &json!(1)));
    }

    #[test]
    fn test_strings_are_escaped() {
        assert_eq!(canonical_string(&json!("a\"b")), r#""a\"b""#);
        assert_eq!(canonical_string(&json!({"k\n": null})), r#"{"k\n":null}"#);
    }

    #[test]
    fn test_fingerprint_uses_canonical_form() {
        let fp = Fingerprint::of(&json!(null));
        assert_eq!(fp, Fingerprint::from_bytes(b"null"));
        assert_eq!(Fingerprint::of(&json!(2.0)), Fingerprint::from_bytes(b"2"));
    }
}
