//! Local `$ref` resolution
//!
//! Only same-document references of the form `#/seg/seg/...` are supported.
//! Each segment is a literal key looked up in the mapping reached so far,
//! starting from the root schema.

use serde_json::Value;
use tracing::trace;

use crate::error::{Result, SchemaError};

const LOCAL_PREFIX: &str = "#/";

/// Resolve a reference string against the root schema
pub fn resolve<'a>(root: &'a Value, reference: &str) -> Result<&'a Value> {
    let pointer = reference
        .strip_prefix(LOCAL_PREFIX)
        .ok_or_else(|| SchemaError::UnsupportedReferenceKind {
            reference: reference.to_string(),
        })?;

    let mut target = root;
    for segment in pointer.split('/') {
        target = target
            .as_object()
            .and_then(|map| map.get(segment))
            .ok_or_else(|| SchemaError::BrokenReference {
                reference: reference.to_string(),
                segment: segment.to_string(),
            })?;
    }

    if !target.is_object() {
        return Err(SchemaError::InvalidReferenceTarget {
            reference: reference.to_string(),
        });
    }
    Ok(target)
}

/// Follow `$ref` hops starting at `schema` until a node without `$ref`.
///
/// Every hop happens at the same instance position, so visiting a reference
/// twice means the chain never terminates.
pub fn resolve_chain<'a>(root: &'a Value, schema: &'a Value) -> Result<&'a Value> {
    let mut visited: Vec<String> = Vec::new();
    let mut current = schema;

    while let Some(reference) = current.get("$ref") {
        let reference = match reference {
            Value::String(s) => s.as_str(),
            other => {
                return Err(SchemaError::UnsupportedReferenceKind {
                    reference: other.to_string(),
                })
            }
        };

        if visited.iter().any(|seen| seen == reference) {
            visited.push(reference.to_string());
            return Err(SchemaError::CyclicReference { chain: visited });
        }
        visited.push(reference.to_string());

        trace!(reference, "following $ref");
        current = resolve(root, reference)?;
    }
    Ok(current)
}
