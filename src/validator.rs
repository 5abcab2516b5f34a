//! Validation Engine
//!
//! Walks an instance depth-first against a schema and records every violation
//! in a [`Diagnostics`] sink.
//!
//! ## Keyword order
//!
//! For each (instance, schema node) pair:
//!
//! 1. `$ref`: follow the reference and validate against the target instead.
//!    Sibling keywords of `$ref` are ignored, never merged.
//! 2. `type`: on mismatch, record it and stop with this node.
//! 3. `const`
//! 4. `enum`
//! 5. object checks (`required`, `properties`, `additionalProperties`); a
//!    non-object instance is recorded and ends this node.
//! 6. array checks (`items`, `uniqueItems`); a non-array instance is recorded.
//!
//! Object and array checks key off the node's shape, which comes from either a
//! `type` declaration or the mere presence of shape keywords.
//!
//! Reference failures are schema defects and abort the run with an `Err`.

use serde_json::Value;
use std::collections::HashSet;
use std::ops::ControlFlow;
use tracing::debug;

use crate::canonical::{structurally_equal, Fingerprint};
use crate::diagnostics::{Diagnostics, InstancePath, ViolationKind};
use crate::error::Result;
use crate::resolver;
use crate::schema::{AdditionalProperties, SchemaNode};
use crate::types::describe;

/// Outcome of one keyword check: keep going, or stop with this node
type Flow = ControlFlow<()>;

type Check<'s> =
    fn(&Validator<'s>, &SchemaNode<'s>, &Value, &InstancePath, &mut Diagnostics) -> Result<Flow>;

/// Validate `instance` against a root schema
pub fn validate(instance: &Value, schema: &Value) -> Result<Diagnostics> {
    Validator::new(schema).validate(instance)
}

/// Validator bound to one root schema document.
///
/// The root is the resolution base for every `$ref`, however deeply nested.
/// Holds no other state, so one validator can check any number of instances.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'s> {
    root: &'s Value,
}

impl<'s> Validator<'s> {
    pub fn new(root: &'s Value) -> Self {
        Self { root }
    }

    /// Validate an instance from the root, collecting all violations
    pub fn validate(&self, instance: &Value) -> Result<Diagnostics> {
        debug!(instance_type = describe(instance), "validating instance");
        let mut sink = Diagnostics::new();
        self.validate_at(instance, self.root, &InstancePath::root(), &mut sink)?;
        debug!(violations = sink.len(), "validation finished");
        Ok(sink)
    }

    /// Convenience wrapper for callers that only need a verdict
    pub fn is_valid(&self, instance: &Value) -> Result<bool> {
        Ok(self.validate(instance)?.is_empty())
    }

    /// Validate `instance` against one schema node at `path`, appending to `sink`
    pub fn validate_at(
        &self,
        instance: &Value,
        schema: &'s Value,
        path: &InstancePath,
        sink: &mut Diagnostics,
    ) -> Result<()> {
        let schema = resolver::resolve_chain(self.root, schema)?;
        let node = SchemaNode::parse(schema);

        let checks: [Check<'s>; 5] = [
            Self::check_type,
            Self::check_const,
            Self::check_enum,
            Self::check_object,
            Self::check_array,
        ];
        for check in checks {
            if check(self, &node, instance, path, sink)?.is_break() {
                break;
            }
        }
        Ok(())
    }

    fn check_type(
        &self,
        node: &SchemaNode<'s>,
        instance: &Value,
        path: &InstancePath,
        sink: &mut Diagnostics,
    ) -> Result<Flow> {
        match &node.types {
            Some(types) if !types.matches(instance) => {
                sink.record(
                    path,
                    ViolationKind::TypeMismatch,
                    format!("expected type {}, got {}", types, describe(instance)),
                );
                Ok(ControlFlow::Break(()))
            }
            _ => Ok(ControlFlow::Continue(())),
        }
    }

    fn check_const(
        &self,
        node: &SchemaNode<'s>,
        instance: &Value,
        path: &InstancePath,
        sink: &mut Diagnostics,
    ) -> Result<Flow> {
        if let Some(expected) = node.const_value {
            if !structurally_equal(instance, expected) {
                sink.record(
                    path,
                    ViolationKind::ConstMismatch,
                    format!("expected const {}, got {}", expected, instance),
                );
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn check_enum(
        &self,
        node: &SchemaNode<'s>,
        instance: &Value,
        path: &InstancePath,
        sink: &mut Diagnostics,
    ) -> Result<Flow> {
        if let Some(allowed) = node.enum_values {
            if !allowed.iter().any(|candidate| structurally_equal(instance, candidate)) {
                sink.record(
                    path,
                    ViolationKind::EnumMismatch,
                    format!("expected one of {}, got {}", render_list(allowed), instance),
                );
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn check_object(
        &self,
        node: &SchemaNode<'s>,
        instance: &Value,
        path: &InstancePath,
        sink: &mut Diagnostics,
    ) -> Result<Flow> {
        if !node.is_object_shaped() {
            return Ok(ControlFlow::Continue(()));
        }
        let Some(object) = instance.as_object() else {
            sink.record(
                path,
                ViolationKind::NotAnObject,
                format!("expected object, got {}", describe(instance)),
            );
            return Ok(ControlFlow::Break(()));
        };

        for name in &node.required {
            if !object.contains_key(*name) {
                sink.record(
                    &path.property(name),
                    ViolationKind::MissingRequired,
                    "missing required property",
                );
            }
        }

        for (key, value) in object {
            let child = path.property(key);
            match (node.property(key), node.additional_properties) {
                (Some(sub_schema), _) | (None, AdditionalProperties::Schema(sub_schema)) => {
                    self.validate_at(value, sub_schema, &child, sink)?;
                }
                (None, AdditionalProperties::Deny) => {
                    sink.record(
                        &child,
                        ViolationKind::AdditionalProperty,
                        "additional properties not allowed",
                    );
                }
                (None, AdditionalProperties::Allow) => {}
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn check_array(
        &self,
        node: &SchemaNode<'s>,
        instance: &Value,
        path: &InstancePath,
        sink: &mut Diagnostics,
    ) -> Result<Flow> {
        if !node.is_array_shaped() {
            return Ok(ControlFlow::Continue(()));
        }
        let Some(elements) = instance.as_array() else {
            sink.record(
                path,
                ViolationKind::NotAnArray,
                format!("expected array, got {}", describe(instance)),
            );
            return Ok(ControlFlow::Break(()));
        };

        if let Some(item_schema) = node.items {
            for (index, element) in elements.iter().enumerate() {
                self.validate_at(element, item_schema, &path.index(index), sink)?;
            }
        }

        if node.unique_items {
            let mut seen = HashSet::with_capacity(elements.len());
            for (index, element) in elements.iter().enumerate() {
                // Later duplicates are reported, the first occurrence is not
                if !seen.insert(Fingerprint::of(element)) {
                    sink.record(
                        &path.index(index),
                        ViolationKind::DuplicateItem,
                        "duplicate array entry violates uniqueItems",
                    );
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}

fn render_list(values: &[Value]) -> String {
    let rendered: Vec<String> = values.iter().map(Value::to_string).collect();
    format!("[{}]", rendered.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use serde_json::json;

    fn messages(diags: &Diagnostics) -> Vec<String> {
        diags.all().iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_type_mismatch_stops_node() {
        let schema = json!({"type": "string", "const": "x", "enum": ["x"]});
        let diags = validate(&json!(3), &schema).unwrap();
        assert_eq!(messages(&diags), vec!["$: expected type string, got integer"]);
    }

    #[test]
    fn test_const_and_enum_are_independent() {
        let schema = json!({"const": "a", "enum": ["b", "c"]});
        let diags = validate(&json!("z"), &schema).unwrap();
        assert_eq!(
            messages(&diags),
            vec![
                r#"$: expected const "a", got "z""#,
                r#"$: expected one of ["b","c"], got "z""#,
            ]
        );
    }

    #[test]
    fn test_const_deep_equality_ignores_key_order() {
        let schema = json!({"const": {"a": [1, 2], "b": null}});
        let instance: Value = serde_json::from_str(r#"{"b": null, "a": [1, 2]}"#).unwrap();
        assert!(validate(&instance, &schema).unwrap().is_empty());
        assert_eq!(validate(&json!({"a": [2, 1], "b": null}), &schema).unwrap().len(), 1);
    }

    #[test]
    fn test_enum_membership() {
        let schema = json!({"enum": ["success", "denied", {"code": 1}]});
        assert!(validate(&json!("denied"), &schema).unwrap().is_empty());
        assert!(validate(&json!({"code": 1}), &schema).unwrap().is_empty());
        assert_eq!(
            validate(&json!(true), &schema).unwrap().count_of(ViolationKind::EnumMismatch),
            1
        );
    }

    #[test]
    fn test_required_reported_before_property_errors() {
        let schema = json!({
            "type": "object",
            "required": ["id", "name"],
            "properties": {"name": {"type": "string"}, "tags": {"type": "array"}}
        });
        let instance = json!({"name": 7, "tags": "x"});
        let diags = validate(&instance, &schema).unwrap();
        assert_eq!(
            messages(&diags),
            vec![
                "$.id: missing required property",
                "$.name: expected type string, got integer",
                "$.tags: expected type array, got string",
            ]
        );
    }

    #[test]
    fn test_properties_follow_instance_order() {
        let schema = json!({"additionalProperties": false});
        let instance: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        let paths: Vec<String> = validate(&instance, &schema)
            .unwrap()
            .into_iter()
            .map(|d| d.path.to_string())
            .collect();
        assert_eq!(paths, vec!["$.zeta", "$.alpha"]);
    }

    #[test]
    fn test_additional_properties_schema() {
        let schema = json!({
            "properties": {"id": {"type": "string"}},
            "additionalProperties": {"type": "integer"}
        });
        let diags = validate(&json!({"id": "a", "n": 1, "m": "no"}), &schema).unwrap();
        assert_eq!(messages(&diags), vec!["$.m: expected type integer, got string"]);
    }

    #[test]
    fn test_non_object_skips_array_checks() {
        let schema = json!({"properties": {}, "items": {"type": "string"}});
        let diags = validate(&json!([1, 2]), &schema).unwrap();
        assert_eq!(messages(&diags), vec!["$: expected object, got array"]);
    }

    #[test]
    fn test_object_instance_against_mixed_shape_node() {
        let schema = json!({"properties": {"a": {"type": "string"}}, "uniqueItems": true});
        let diags = validate(&json!({"a": 1}), &schema).unwrap();
        assert_eq!(
            messages(&diags),
            vec!["$.a: expected type string, got integer", "$: expected array, got object"]
        );
    }

    #[test]
    fn test_items_recurse_with_index_paths() {
        let schema = json!({
            "type": "object",
            "properties": {
                "items": {"type": "array", "items": {"required": ["name"]}}
            }
        });
        let diags = validate(&json!({"items": [{"name": "a"}, {}, {}]}), &schema).unwrap();
        assert_eq!(
            messages(&diags),
            vec!["$.items[1].name: missing required property", "$.items[2].name: missing required property"]
        );
    }

    #[test]
    fn test_unique_items_reports_later_indices() {
        let schema = json!({"uniqueItems": true});
        let diags = validate(&json!(["a", "b", "a", "a", 1, 1.0]), &schema).unwrap();
        let paths: Vec<&str> = diags.all().iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, vec!["$[2]", "$[3]", "$[5]"]);
    }

    #[test]
    fn test_ref_siblings_are_ignored() {
        let schema = json!({
            "$defs": {"Any": {}},
            "$ref": "#/$defs/Any",
            "type": "string",
            "required": ["never"]
        });
        assert!(validate(&json!(42), &schema).unwrap().is_empty());
    }

    #[test]
    fn test_recursive_schema_is_not_a_cycle() {
        let schema = json!({
            "$defs": {
                "Node": {
                    "type": "object",
                    "properties": {
                        "value": {"type": "integer"},
                        "children": {"type": "array", "items": {"$ref": "#/$defs/Node"}}
                    }
                }
            },
            "$ref": "#/$defs/Node"
        });
        let instance = json!({
            "value": 1,
            "children": [{"value": 2, "children": [{"value": "three"}]}]
        });
        let diags = validate(&instance, &schema).unwrap();
        assert_eq!(
            messages(&diags),
            vec!["$.children[0].children[0].value: expected type integer, got string"]
        );
    }

    #[test]
    fn test_structural_error_aborts_run() {
        let schema = json!({
            "properties": {
                "a": {"type": "string"},
                "b": {"$ref": "#/$defs/Missing"}
            }
        });
        let err = validate(&json!({"a": 1, "b": 2}), &schema).unwrap_err();
        assert!(matches!(err, SchemaError::BrokenReference { .. }));
    }

    #[test]
    fn test_ref_only_resolved_when_reached() {
        let schema = json!({"properties": {"b": {"$ref": "#/nowhere"}}});
        assert!(validate(&json!({"a": 1}), &schema).unwrap().is_empty());
    }

    #[test]
    fn test_validator_reuse() {
        let schema = json!({"type": "integer"});
        let validator = Validator::new(&schema);
        assert!(validator.is_valid(&json!(5)).unwrap());
        assert!(!validator.is_valid(&json!("5")).unwrap());
    }
}
