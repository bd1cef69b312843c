#![deny(missing_docs)]

//! # Velgen Core
//!
//! Generates API clients and OpenAPI documents from statically declared
//! operations.
//!
//! Operations are described by [`OperationDescriptor`] values whose input
//! and output types implement [`ApiType`] (usually through
//! `#[derive(ApiType)]`). From them a deduplicated type graph is built once
//! and projected twice: through a language template into client source
//! code, and into an OpenAPI 3.0.0 YAML document.

// Lets `#[derive(ApiType)]` expand to `::velgen_core::...` inside this crate.
extern crate self as velgen_core;

/// Shared error types.
pub mod error;

/// Intermediate representation shared by both projections.
pub mod model;

/// Trait-based type descriptions.
pub mod shape;

/// Struct to data type extraction.
pub mod extract;

/// Operation documentation metadata.
pub mod docs;

/// Operation descriptors.
pub mod operation;

/// Type graph construction.
pub mod graph;

/// Target languages and their type mappers.
pub mod lang;

/// Template rendering.
pub mod render;

/// External formatter invocation.
pub mod postprocess;

/// OpenAPI document assembly.
pub mod openapi;

/// The generation aggregate.
pub mod generator;

/// Generation entry points.
pub mod api;

pub use api::{
    generate_client, generate_client_to_file, generate_openapi, generate_openapi_to_file,
    ClientConfig,
};
pub use docs::{ErrorSpec, KeyValueSpec, PrimitiveType, Spec, Validation};
pub use error::{AppError, AppResult};
pub use generator::{ClientDesc, Generator};
pub use graph::{OperationSchema, TypeGraph};
pub use lang::Language;
pub use model::{DataType, Field, FieldClass, TypeExpr};
pub use openapi::{SchemaConfig, StatusPolicy};
pub use operation::{Method, OperationDescriptor};
pub use render::TemplateKey;
pub use shape::{ApiType, FieldShape, Shape, StructRef};

#[cfg(feature = "derive")]
pub use velgen_derive::ApiType;
