//! Primitive type vocabulary
//!
//! Maps instances onto the seven JSON type names and decides whether an
//! instance satisfies a schema's `type` declaration.
//!
//! A float with no fractional part (`4.0`) is an `integer`, both when
//! describing it and when matching `"type": "integer"`. Validators that go by
//! the decoded representation report such values as `number` instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The seven categories every instance belongs to exactly one of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl JsonType {
    /// Describe an instance by its category.
    ///
    /// Floats with no fractional part count as `integer`, so `3.0` and `3`
    /// describe the same way.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::Number(n) if is_integral(n) => JsonType::Integer,
            Value::Number(_) => JsonType::Number,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonType::Null => "null",
            JsonType::Boolean => "boolean",
            JsonType::Integer => "integer",
            JsonType::Number => "number",
            JsonType::String => "string",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }

    /// Parse a type token, `None` for anything outside the vocabulary
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "null" => Some(JsonType::Null),
            "boolean" => Some(JsonType::Boolean),
            "integer" => Some(JsonType::Integer),
            "number" => Some(JsonType::Number),
            "string" => Some(JsonType::String),
            "array" => Some(JsonType::Array),
            "object" => Some(JsonType::Object),
            _ => None,
        }
    }

    /// Whether `value` satisfies this single token.
    ///
    /// `number` accepts integers too; booleans never satisfy a numeric token.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, JsonType::of(value)) {
            (JsonType::Number, JsonType::Integer) => true,
            (expected, actual) => *expected == actual,
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name an instance's category for diagnostics
pub fn describe(value: &Value) -> &'static str {
    JsonType::of(value).as_str()
}

pub(crate) fn is_integral(n: &serde_json::Number) -> bool {
    if n.is_i64() || n.is_u64() {
        return true;
    }
    n.as_f64().map(|f| f.is_finite() && f.fract() == 0.0).unwrap_or(false)
}

/// One entry of a `type` declaration
#[derive(Debug, Clone, PartialEq)]
enum TypeToken {
    Known(JsonType),
    /// Outside the vocabulary; never matches
    Unknown,
}

impl TypeToken {
    fn from_value(value: &Value) -> Self {
        value
            .as_str()
            .and_then(JsonType::from_token)
            .map(TypeToken::Known)
            .unwrap_or(TypeToken::Unknown)
    }
}

/// A parsed `type` keyword: a single token or a list of alternatives
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    tokens: Vec<TypeToken>,
    /// The keyword as written, kept for messages
    raw: Value,
}

impl TypeSpec {
    pub fn from_value(raw: &Value) -> Self {
        let tokens = match raw {
            Value::Array(items) => items.iter().map(TypeToken::from_value).collect(),
            single => vec![TypeToken::from_value(single)],
        };
        Self { tokens, raw: raw.clone() }
    }

    /// True if the value satisfies at least one token
    pub fn matches(&self, value: &Value) -> bool {
        self.tokens.iter().any(|token| match token {
            TypeToken::Known(ty) => ty.accepts(value),
            TypeToken::Unknown => false,
        })
    }

    /// Whether the declaration names `ty` among its alternatives
    pub fn includes(&self, ty: JsonType) -> bool {
        self.tokens.contains(&TypeToken::Known(ty))
    }
}

impl fmt::Display for TypeSpec {
    /// Bare name for a single string token, compact JSON otherwise
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Value::String(name) => f.write_str(name),
            other => write!(f, "{}", other),
        }
    }
}
