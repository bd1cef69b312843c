//! # Operations
//!
//! The descriptors handed over by the route registry: one per externally
//! invocable operation.

use crate::docs::Spec;
use crate::shape::{ApiType, Shape};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// HTTP methods an operation may be registered under.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `GET`
    #[display("GET")]
    Get,
    /// `POST`
    #[display("POST")]
    Post,
    /// `PUT`
    #[display("PUT")]
    Put,
    /// `PATCH`
    #[display("PATCH")]
    Patch,
    /// `DELETE`
    #[display("DELETE")]
    Delete,
}

impl Method {
    /// Whether the input travels as query parameters rather than a JSON body.
    pub fn uses_query(self) -> bool {
        matches!(self, Method::Get | Method::Delete)
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!("unknown HTTP method '{}'", other)),
        }
    }
}

/// An operation: input and output types, id, method and documentation.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    /// Input shape.
    pub input: Shape,
    /// Output shape.
    pub output: Shape,
    /// Unique id; also the path (`/<id>`) and the client method name.
    pub operation_id: String,
    /// HTTP method.
    pub method: Method,
    /// Documentation metadata.
    pub spec: Spec,
}

impl OperationDescriptor {
    /// Describes an operation taking `I` and returning `O`.
    pub fn new<I: ApiType, O: ApiType>(operation_id: impl Into<String>, method: Method) -> Self {
        Self {
            input: I::shape(),
            output: O::shape(),
            operation_id: operation_id.into(),
            method,
            spec: Spec::default(),
        }
    }

    /// A `GET` operation.
    pub fn get<I: ApiType, O: ApiType>(operation_id: impl Into<String>) -> Self {
        Self::new::<I, O>(operation_id, Method::Get)
    }

    /// A `POST` operation.
    pub fn post<I: ApiType, O: ApiType>(operation_id: impl Into<String>) -> Self {
        Self::new::<I, O>(operation_id, Method::Post)
    }

    /// Attaches documentation metadata.
    pub fn with_spec(mut self, spec: Spec) -> Self {
        self.spec = spec;
        self
    }
}

/// Upper-cases the first letter (`listUsers` becomes `ListUsers`).
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
