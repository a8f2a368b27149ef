//! Configuration schemas
//!
//! A schema node declares the expected kind for one key, nested
//! properties for object kinds, and an item schema for array kinds.
//! Unknown keys are allowed unless a node forbids additional properties.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declared kind of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// A table of declared properties
    Object,
    /// An array; element shape in `items`
    Array,
    /// A string scalar
    String,
    /// An integer scalar
    Integer,
    /// A float scalar
    Float,
    /// A boolean scalar
    Boolean,
}

/// One node of a schema tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Declared kind
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    /// Declared properties of an object node
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    /// Element schema of an array node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Whether keys beyond the declared properties are allowed
    #[serde(default = "default_true", rename = "additionalProperties")]
    pub additional_properties: bool,
}

fn default_true() -> bool {
    true
}

impl Schema {
    fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            properties: IndexMap::new(),
            items: None,
            additional_properties: true,
        }
    }

    /// An object node with the given properties
    pub fn object(properties: IndexMap<String, Schema>) -> Self {
        Self {
            properties,
            ..Self::of(SchemaType::Object)
        }
    }

    /// An array node with the given element schema
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(SchemaType::Array)
        }
    }

    /// A string node
    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    /// An integer node
    pub fn integer() -> Self {
        Self::of(SchemaType::Integer)
    }

    /// A float node
    pub fn float() -> Self {
        Self::of(SchemaType::Float)
    }

    /// A boolean node
    pub fn boolean() -> Self {
        Self::of(SchemaType::Boolean)
    }

    /// Forbid keys beyond the declared properties
    pub fn closed(mut self) -> Self {
        self.additional_properties = false;
        self
    }

    /// Load a schema from its JSON form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_from_json() {
        let schema = Schema::from_json(
            r#"{
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "name": {"type": "string"},
                    "listeners": {
                        "type": "array",
                        "items": {"type": "object", "properties": {"port": {"type": "integer"}}}
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(schema.schema_type, SchemaType::Object);
        assert!(!schema.additional_properties);
        assert_eq!(schema.properties["name"].schema_type, SchemaType::String);
        let items = schema.properties["listeners"].items.as_ref().unwrap();
        assert_eq!(items.properties["port"].schema_type, SchemaType::Integer);
    }

    #[test]
    fn test_builders() {
        let mut props = IndexMap::new();
        props.insert("debug".to_string(), Schema::boolean());
        let schema = Schema::object(props).closed();

        assert!(!schema.additional_properties);
        assert_eq!(schema.properties.len(), 1);
    }
}
