//! # Type Extractor
//!
//! Turns one struct [`Shape`] into a [`DataType`]: a named field list with
//! each field classified and its tag metadata resolved.

use crate::error::{AppError, AppResult};
use crate::model::{DataType, Field, FieldClass, TypeExpr};
use crate::shape::{FieldShape, Shape, StructRef};

/// Extracts the data type of a struct shape.
///
/// `context` names the place the shape was reached from and only feeds
/// error messages.
///
/// # Errors
///
/// * [`AppError::InlineTypeForbidden`] when the struct has fields but no name.
/// * [`AppError::General`] when the shape is not a struct at all.
pub fn extract_data_type(shape: &Shape, context: &str) -> AppResult<DataType> {
    let sref = shape.as_struct().ok_or_else(|| {
        AppError::General(format!(
            "{}: expected a struct, got `{}`",
            context,
            shape.expr()
        ))
    })?;
    extract_struct(sref, context)
}

/// Extracts the data type of a struct description.
pub fn extract_struct(sref: &StructRef, context: &str) -> AppResult<DataType> {
    let fields: Vec<Field> = sref.fields().into_iter().map(make_field).collect();

    if fields.is_empty() {
        // Empty structs carry no name: they stand for "no body".
        return Ok(DataType::default());
    }
    if sref.name().is_empty() {
        return Err(AppError::InlineTypeForbidden {
            context: context.to_string(),
        });
    }

    Ok(DataType {
        name: sref.name().to_string(),
        fields,
    })
}

fn make_field(field: FieldShape) -> Field {
    let ty = field.shape.expr();
    let class = classify(&ty);
    Field {
        name: field.name,
        type_name: ty.to_string(),
        class,
        is_builtin: class == FieldClass::Builtin,
        ty,
        json_key: field.json_key,
        query_key: field.query_key,
    }
}

/// Classifies a type for traversal.
pub fn classify(ty: &TypeExpr) -> FieldClass {
    match ty {
        TypeExpr::Builtin { .. } => FieldClass::Builtin,
        TypeExpr::Primitive { .. } => FieldClass::Primitive,
        _ => FieldClass::Composite,
    }
}
