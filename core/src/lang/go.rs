//! Go spelling of types and identifiers.

use super::TypeMapper;
use crate::model::{Builtin, Primitive};
use heck::ToUpperCamelCase;

/// Maps types to Go.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoMapper;

impl TypeMapper for GoMapper {
    fn primitive(&self, primitive: Primitive) -> String {
        match primitive {
            Primitive::String => "string",
            Primitive::Bool => "bool",
            Primitive::I8 => "int8",
            Primitive::I16 => "int16",
            Primitive::I32 => "int32",
            Primitive::I64 => "int64",
            Primitive::U8 => "uint8",
            Primitive::U16 => "uint16",
            Primitive::U32 => "uint32",
            Primitive::U64 => "uint64",
            Primitive::F32 => "float32",
            Primitive::F64 => "float64",
        }
        .to_string()
    }

    fn builtin(&self, builtin: Builtin) -> String {
        match builtin {
            Builtin::DateTime => "time.Time",
            // encoding/json only parses RFC 3339 timestamps into time.Time
            Builtin::Date => "string",
        }
        .to_string()
    }

    fn optional(&self, inner: String) -> String {
        format!("*{}", inner)
    }

    fn seq(&self, inner: String) -> String {
        format!("[]{}", inner)
    }

    fn map(&self, key: String, value: String) -> String {
        format!("map[{}]{}", key, value)
    }

    fn field_ident(&self, name: &str, _wire_name: &str) -> String {
        name.to_upper_camel_case()
    }

    fn method_ident(&self, operation_id: &str) -> String {
        operation_id.to_upper_camel_case()
    }
}
