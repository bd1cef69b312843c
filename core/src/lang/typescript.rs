//! TypeScript spelling of types and identifiers.
//!
//! Objects are declared with their wire keys, so a generated interface
//! describes the JSON exactly as it travels.

use super::TypeMapper;
use crate::model::{Builtin, Category, Primitive};
use heck::ToLowerCamelCase;

/// Maps types to TypeScript.
#[derive(Debug, Clone, Copy, Default)]
pub struct TsMapper;

impl TypeMapper for TsMapper {
    fn primitive(&self, primitive: Primitive) -> String {
        match primitive.category() {
            Category::Text => "string",
            Category::Integer | Category::Float => "number",
            Category::Boolean => "boolean",
        }
        .to_string()
    }

    fn builtin(&self, _builtin: Builtin) -> String {
        "string".to_string()
    }

    fn optional(&self, inner: String) -> String {
        format!("{} | undefined", inner)
    }

    fn seq(&self, inner: String) -> String {
        if inner.contains(' ') {
            format!("({})[]", inner)
        } else {
            format!("{}[]", inner)
        }
    }

    fn map(&self, key: String, value: String) -> String {
        format!("Record<{}, {}>", key, value)
    }

    fn field_ident(&self, _name: &str, wire_name: &str) -> String {
        if is_plain_ident(wire_name) {
            wire_name.to_string()
        } else {
            format!("\"{}\"", wire_name)
        }
    }

    fn method_ident(&self, operation_id: &str) -> String {
        operation_id.to_lower_camel_case()
    }
}

fn is_plain_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
