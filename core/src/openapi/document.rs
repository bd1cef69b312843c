#![deny(missing_docs)]

//! # OpenAPI Document Model
//!
//! Typed OpenAPI 3.0 objects covering what the assembler emits.
//!
//! Keyed collections, object properties included, are `BTreeMap`s so the
//! serialized document is sorted and stable.
//! Absent values are skipped rather than serialized as `null`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix of references into `components.schemas`.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Media type of every request and response body.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// The root document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// OpenAPI version.
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// Path items keyed by path.
    pub paths: BTreeMap<String, PathItem>,
    /// Reusable components.
    pub components: Components,
}

/// API metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
}

/// Operations available on one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// `GET` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// `POST` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// `PUT` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// `PATCH` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// `DELETE` operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
}

/// One operation of a path item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation id.
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// Human description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Header parameters first, then query parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// JSON request body.
    #[serde(rename = "requestBody", default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by HTTP status.
    pub responses: BTreeMap<String, Response>,
}

/// Where a parameter travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// HTTP header.
    Header,
    /// URL query string.
    Query,
}

/// A header or query parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Human description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Whether the parameter must be sent.
    pub required: bool,
    /// Value schema.
    pub schema: Schema,
    /// Example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// A response header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Human description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Whether the header is always sent.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Value schema.
    pub schema: Schema,
}

/// A body with its schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Body schema.
    pub schema: Schema,
}

/// Content keyed by media type.
pub type Content = BTreeMap<String, MediaType>;

/// Builds JSON content with `schema`.
pub fn json_content(schema: Schema) -> Content {
    let mut content = Content::new();
    content.insert(JSON_MEDIA_TYPE.to_string(), MediaType { schema });
    content
}

/// A request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Body content.
    pub content: Content,
}

/// A response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Human description.
    pub description: String,
    /// Body content.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: Content,
    /// Response headers.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Header>,
}

impl Response {
    /// A response without body or headers.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: Content::new(),
            headers: BTreeMap::new(),
        }
    }
}

/// Reusable components.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    /// Schemas keyed by type name.
    pub schemas: BTreeMap<String, Schema>,
}

/// A schema object.
///
/// Exactly one of `reference` or `schema_type` is normally set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// JSON type (`string`, `integer`, `object`, ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Object properties, sorted by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    /// Array element schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Map value schema.
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<Schema>>,
    /// Required property names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Reference to a component.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Format qualifier (`date-time`, `date`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Minimum string length.
    #[serde(rename = "minLength", default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    /// Maximum string length.
    #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    /// Human description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Minimum numeric value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    /// Maximum numeric value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    /// Allowed values.
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

impl Schema {
    /// A schema of the given JSON type.
    pub fn typed(schema_type: &str) -> Self {
        Self {
            schema_type: Some(schema_type.to_string()),
            ..Self::default()
        }
    }

    /// A reference to the component named `name`.
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("{}{}", SCHEMA_REF_PREFIX, name)),
            ..Self::default()
        }
    }

    /// An array of `items`.
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::typed("array")
        }
    }

    /// A string-keyed map of `values`.
    pub fn map(values: Schema) -> Self {
        Self {
            additional_properties: Some(Box::new(values)),
            ..Self::typed("object")
        }
    }

    /// Sets the format qualifier.
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_values_are_skipped() {
        let yaml = serde_yaml::to_string(&Schema::typed("string")).unwrap();
        assert_eq!(yaml.trim(), "type: string");
    }

    #[test]
    fn test_reference() {
        let value = serde_yaml::to_value(Schema::reference("User")).unwrap();
        assert_eq!(
            value["$ref"].as_str(),
            Some("#/components/schemas/User")
        );
    }

    #[test]
    fn test_nested_collections() {
        let schema = Schema::map(Schema::array(Schema::typed("integer")));
        let value = serde_yaml::to_value(&schema).unwrap();
        assert_eq!(value["type"].as_str(), Some("object"));
        assert_eq!(
            value["additionalProperties"]["items"]["type"].as_str(),
            Some("integer")
        );
    }

    #[test]
    fn test_header_required_false_is_skipped() {
        let header = Header {
            description: String::new(),
            required: false,
            schema: Schema::typed("string"),
        };
        let value = serde_yaml::to_value(&header).unwrap();
        assert!(value.get("required").is_none());
    }
}
