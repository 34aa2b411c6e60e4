//! In-memory model of the capability document.
//!
//! This is a deliberately small slice of the OpenAPI 3.0 vocabulary: only
//! the constructs the service actually publishes. References are explicit
//! tagged-union variants resolved by name against the components registry,
//! never by object identity, so the whole graph is inspectable and both
//! JSON and YAML renditions round-trip losslessly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityDocument {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,
    pub paths: IndexMap<String, PathItem>,
    pub components: Components,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,
    pub responses: IndexMap<String, ResponseSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    pub description: String,
}

/// A parameter attached to an operation: either a pointer into
/// `components.parameters` or an inline definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Item(Parameter),
}

impl ParameterOrRef {
    /// Pointer to a named entry in `components.parameters`.
    pub fn component(name: &str) -> Self {
        ParameterOrRef::Ref {
            reference: format!("#/components/parameters/{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub schema: SchemaNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
}

/// A schema position: either a pointer into `components.schemas` or an
/// inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaNode {
    Ref {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Inline(Box<Schema>),
}

impl SchemaNode {
    pub fn inline(schema: Schema) -> Self {
        SchemaNode::Inline(Box::new(schema))
    }

    pub fn component(name: &str) -> Self {
        SchemaNode::Ref {
            reference: format!("#/components/schemas/{}", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaNode>,
}

impl Schema {
    pub fn string() -> Self {
        Schema {
            schema_type: Some("string".to_string()),
            ..Default::default()
        }
    }

    pub fn integer() -> Self {
        Schema {
            schema_type: Some("integer".to_string()),
            ..Default::default()
        }
    }

    pub fn number() -> Self {
        Schema {
            schema_type: Some("number".to_string()),
            ..Default::default()
        }
    }

    pub fn array_of(items: Schema) -> Self {
        Schema {
            schema_type: Some("array".to_string()),
            items: Some(SchemaNode::inline(items)),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Parameter>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Schema>,
}
