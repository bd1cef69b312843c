#![deny(missing_docs)]

//! # Target Languages
//!
//! Each supported client language owns a file extension and a [`TypeMapper`]
//! that spells [`TypeExpr`] values in that language.
//!
//! Every mapper goes through [`Primitive::category`] first, so a given Rust
//! scalar always lands in the same family (text, number, boolean) in every
//! client and in the OpenAPI document.

pub mod go;
pub mod rust;
pub mod typescript;

use crate::error::AppError;
use crate::model::{Builtin, Primitive, TypeExpr};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Languages a client can be generated for.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Go (`net/http` client).
    #[display("go")]
    #[serde(rename = "go")]
    Go,
    /// TypeScript (`fetch` client).
    #[display("ts")]
    #[serde(rename = "ts", alias = "typescript")]
    TypeScript,
    /// Rust (`reqwest` client).
    #[display("rust")]
    #[serde(rename = "rust", alias = "rs")]
    Rust,
}

impl Language {
    /// Every supported language.
    pub const ALL: [Language; 3] = [Language::Go, Language::TypeScript, Language::Rust];

    /// Extension of the generated client file.
    pub fn extension(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::TypeScript => "ts",
            Language::Rust => "rs",
        }
    }

    /// The type mapper of this language.
    pub fn mapper(self) -> &'static dyn TypeMapper {
        match self {
            Language::Go => &go::GoMapper,
            Language::TypeScript => &typescript::TsMapper,
            Language::Rust => &rust::RustMapper,
        }
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "go" | "golang" => Ok(Language::Go),
            "ts" | "typescript" => Ok(Language::TypeScript),
            "rs" | "rust" => Ok(Language::Rust),
            _ => Err(AppError::UnsupportedLanguage(s.to_string())),
        }
    }
}

/// Spells types and identifiers in one target language.
pub trait TypeMapper: Sync {
    /// Maps a scalar.
    fn primitive(&self, primitive: Primitive) -> String;

    /// Maps an opaque builtin.
    fn builtin(&self, builtin: Builtin) -> String;

    /// Wraps a mapped type as "may be absent".
    fn optional(&self, inner: String) -> String;

    /// Wraps a mapped element type as an ordered sequence.
    fn seq(&self, inner: String) -> String;

    /// Builds a keyed map from mapped key and value types.
    fn map(&self, key: String, value: String) -> String;

    /// Identifier of a struct field named `name` serialized as `wire_name`.
    fn field_ident(&self, name: &str, wire_name: &str) -> String;

    /// Identifier of the client method for `operation_id`.
    fn method_ident(&self, operation_id: &str) -> String;

    /// Maps a struct reference.
    fn named(&self, name: &str) -> String {
        name.to_string()
    }

    /// Maps any type expression.
    fn map_type(&self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Primitive { primitive } => self.primitive(*primitive),
            TypeExpr::Builtin { builtin } => self.builtin(*builtin),
            TypeExpr::Named { name } => self.named(name),
            TypeExpr::Optional { inner } => self.optional(self.map_type(inner)),
            TypeExpr::Seq { inner } => self.seq(self.map_type(inner)),
            TypeExpr::Map { key, value } => self.map(self.map_type(key), self.map_type(value)),
        }
    }
}
