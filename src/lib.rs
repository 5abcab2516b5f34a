//! Contract Schemas
//!
//! Checks that boundary objects exchanged between components conform to a
//! published JSON Schema contract.
//!
//! ## Supported keywords
//!
//! `type`, `const`, `enum`, `properties`, `required`, `additionalProperties`,
//! `items`, `uniqueItems`, and local `$ref` (`#/...`). Everything else in a
//! schema is ignored.
//!
//! ## Example
//!
//! ```
//! use contract_schemas::validate;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "required": ["a"],
//!     "properties": {"a": {"type": "string"}}
//! });
//!
//! let diagnostics = validate(&json!({"a": 1}), &schema).unwrap();
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics.all()[0].to_string(), "$.a: expected type string, got integer");
//! ```

pub mod canonical;
pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod resolver;
pub mod schema;
pub mod types;
pub mod validator;

pub use config::{OutputFormat, ValidatorConfig};
pub use diagnostics::{Diagnostic, Diagnostics, InstancePath, ViolationKind};
pub use error::{Result, SchemaError};
pub use schema::SchemaNode;
pub use types::{describe, JsonType, TypeSpec};
pub use validator::{validate, Validator};
