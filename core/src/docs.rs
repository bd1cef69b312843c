#![deny(missing_docs)]

//! # Operation Documentation
//!
//! Externally authored metadata attached to an operation: a description,
//! one request header and one response header contract, and the error codes
//! the operation may return.

use serde::{Deserialize, Serialize};

/// Value types a header or error metadata entry may carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    /// Text.
    #[default]
    String,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    Uint,
    /// Floating point number.
    Float64,
    /// Boolean.
    Bool,
}

/// Validation rules of a key/value contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Validation {
    /// The value must be present.
    pub required: bool,
    /// Minimum string length.
    pub min_len: Option<u32>,
    /// Maximum string length.
    pub max_len: Option<u32>,
    /// Minimum numeric value.
    pub min_value: Option<i64>,
    /// Maximum numeric value.
    pub max_value: Option<i64>,
    /// Allowed values.
    #[serde(rename = "enum")]
    pub enum_values: Vec<String>,
}

/// A header or metadata entry contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyValueSpec {
    /// Header name or metadata key.
    pub key: String,
    /// Type of the value.
    pub value_type: PrimitiveType,
    /// Example value.
    pub value_example: Option<String>,
    /// Human description.
    pub description: String,
    /// Validation rules.
    pub validation: Validation,
}

impl KeyValueSpec {
    /// Creates a contract for `key` holding values of `value_type`.
    pub fn new(key: impl Into<String>, value_type: PrimitiveType) -> Self {
        Self {
            key: key.into(),
            value_type,
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the example value.
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.value_example = Some(example.into());
        self
    }

    /// Sets the validation rules.
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// True when no key is declared, i.e. the contract is absent.
    pub fn is_absent(&self) -> bool {
        self.key.is_empty()
    }
}

/// A named error an operation may return.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorSpec {
    /// Machine readable error code.
    pub code: String,
    /// Human description.
    pub description: String,
    /// HTTP status; when absent the schema config's status policy decides.
    pub status: Option<u16>,
    /// Metadata entries carried in the error's `meta` object.
    pub meta: Vec<KeyValueSpec>,
}

impl ErrorSpec {
    /// Creates an error spec.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Pins the HTTP status.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Appends a metadata entry.
    pub fn with_meta(mut self, meta: KeyValueSpec) -> Self {
        self.meta.push(meta);
        self
    }
}

/// Documentation metadata of one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spec {
    /// Human description.
    pub description: String,
    /// Request header contract (absent when the key is empty).
    pub request_headers: KeyValueSpec,
    /// Response header contract (absent when the key is empty).
    pub response_headers: KeyValueSpec,
    /// Declared errors, in declaration order.
    pub errors: Vec<ErrorSpec>,
}

impl Spec {
    /// Creates a spec with a description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Sets the request header contract.
    pub fn with_request_header(mut self, header: KeyValueSpec) -> Self {
        self.request_headers = header;
        self
    }

    /// Sets the response header contract.
    pub fn with_response_header(mut self, header: KeyValueSpec) -> Self {
        self.response_headers = header;
        self
    }

    /// Appends a declared error.
    pub fn with_error(mut self, error: ErrorSpec) -> Self {
        self.errors.push(error);
        self
    }
}
