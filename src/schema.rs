//! Typed view of a schema node
//!
//! A schema document stays a `serde_json::Value`; [`SchemaNode`] borrows one
//! mapping out of it and exposes the recognized keywords as typed fields.
//! Unrecognized keywords are ignored.

use serde_json::{Map, Value};

use crate::types::{JsonType, TypeSpec};

/// Policy for instance keys not listed under `properties`
#[derive(Debug, Clone, Copy)]
pub enum AdditionalProperties<'a> {
    /// Absent, `true`, or any value that is neither `false` nor a mapping
    Allow,
    Deny,
    /// Validate extra keys against this node
    Schema(&'a Value),
}

/// Recognized keywords of one schema mapping
#[derive(Debug, Clone)]
pub struct SchemaNode<'a> {
    pub reference: Option<&'a Value>,
    pub types: Option<TypeSpec>,
    pub const_value: Option<&'a Value>,
    pub enum_values: Option<&'a [Value]>,
    pub properties: Option<&'a Map<String, Value>>,
    pub required: Vec<&'a str>,
    pub additional_properties: AdditionalProperties<'a>,
    pub items: Option<&'a Value>,
    pub unique_items: bool,
    object_shaped: bool,
    array_shaped: bool,
}

impl<'a> SchemaNode<'a> {
    /// Read the keywords of a schema value.
    ///
    /// A value that is not a mapping yields a node with no constraints.
    pub fn parse(schema: &'a Value) -> Self {
        let Some(map) = schema.as_object() else {
            return Self::unconstrained();
        };

        let types = map.get("type").filter(|t| !t.is_null()).map(TypeSpec::from_value);
        let declares = |ty| types.as_ref().map(|t| t.includes(ty)).unwrap_or(false);

        let object_shaped = declares(JsonType::Object)
            || ["properties", "required", "additionalProperties"]
                .iter()
                .any(|k| map.contains_key(*k));
        let array_shaped =
            declares(JsonType::Array) || map.contains_key("items") || map.contains_key("uniqueItems");

        let required = map
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let additional_properties = match map.get("additionalProperties") {
            Some(Value::Bool(false)) => AdditionalProperties::Deny,
            Some(node @ Value::Object(_)) => AdditionalProperties::Schema(node),
            _ => AdditionalProperties::Allow,
        };

        Self {
            reference: map.get("$ref"),
            const_value: map.get("const"),
            enum_values: map.get("enum").and_then(Value::as_array).map(Vec::as_slice),
            properties: map.get("properties").and_then(Value::as_object),
            required,
            additional_properties,
            items: map.get("items").filter(|items| items.is_object()),
            unique_items: matches!(map.get("uniqueItems"), Some(Value::Bool(true))),
            types,
            object_shaped,
            array_shaped,
        }
    }

    fn unconstrained() -> Self {
        Self {
            reference: None,
            types: None,
            const_value: None,
            enum_values: None,
            properties: None,
            required: Vec::new(),
            additional_properties: AdditionalProperties::Allow,
            items: None,
            unique_items: false,
            object_shaped: false,
            array_shaped: false,
        }
    }

    /// Object checks apply: `type` names `object`, or an object keyword is present
    pub fn is_object_shaped(&self) -> bool {
        self.object_shaped
    }

    /// Array checks apply: `type` names `array`, or `items`/`uniqueItems` is present
    pub fn is_array_shaped(&self) -> bool {
        self.array_shaped
    }

    /// Sub-schema for a declared property
    pub fn property(&self, name: &str) -> Option<&'a Value> {
        self.properties.and_then(|props| props.get(name))
    }
}
