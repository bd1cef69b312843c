//! # Schema Assembler
//!
//! Projects the type graph and every operation's documentation into an
//! OpenAPI 3.0.0 document.
//!
//! * One path per operation (`/<operation id>`), one operation per method.
//! * Query methods (`GET`, `DELETE`) describe their query-bound input fields
//!   as parameters; the others reference the input as a JSON request body.
//! * Declared errors are grouped per HTTP status into one consolidated
//!   response each.
//! * Every graph type becomes one component schema, its properties sorted
//!   by name.
//! * Quoted scalars of the YAML text use double quotes.

pub mod document;
pub mod yaml;

use crate::docs::{ErrorSpec, KeyValueSpec, PrimitiveType, Spec, Validation};
use crate::error::AppResult;
use crate::generator::Generator;
use crate::graph::OperationSchema;
use crate::model::{Builtin, Category, DataType, Primitive, TypeExpr};
use crate::operation::Method;
use document::{
    json_content, Components, Document, Header, Info, Operation, Parameter, ParameterLocation,
    PathItem, RequestBody, Response, Schema,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// OpenAPI version written into every document.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// Status key of the success response.
pub const SUCCESS_STATUS: &str = "200";

/// Decides the HTTP status of errors declared without an explicit one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusPolicy {
    /// Status of errors with a non-empty code.
    pub default_status: u16,
    /// Status of errors with an empty code.
    pub unspecified_status: u16,
    /// Per-code statuses, taking precedence over the defaults.
    pub overrides: BTreeMap<String, u16>,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            default_status: 400,
            unspecified_status: 500,
            overrides: BTreeMap::new(),
        }
    }
}

impl StatusPolicy {
    /// Status of an error `code`.
    pub fn status_for(&self, code: &str) -> u16 {
        if let Some(status) = self.overrides.get(code) {
            return *status;
        }
        if code.is_empty() {
            self.unspecified_status
        } else {
            self.default_status
        }
    }

    /// Status of a declared error, honouring its explicit status.
    pub fn resolve(&self, error: &ErrorSpec) -> u16 {
        error.status.unwrap_or_else(|| self.status_for(&error.code))
    }
}

/// Settings of one document generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// `info.title`.
    pub title: String,
    /// `info.version`.
    pub version: String,
    /// Status mapping of declared errors.
    pub status_policy: StatusPolicy,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            title: "API".to_string(),
            version: "1.0.0".to_string(),
            status_policy: StatusPolicy::default(),
        }
    }
}

impl SchemaConfig {
    /// Creates a config with the default status policy.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            status_policy: StatusPolicy::default(),
        }
    }
}

/// Builds the document of everything `generator` knows about.
pub fn assemble(generator: &Generator, config: &SchemaConfig) -> Document {
    let mut paths: BTreeMap<String, PathItem> = BTreeMap::new();
    for op in generator.operations() {
        let item = paths.entry(format!("/{}", op.operation_id)).or_default();
        let slot = match op.method {
            Method::Get => &mut item.get,
            Method::Post => &mut item.post,
            Method::Put => &mut item.put,
            Method::Patch => &mut item.patch,
            Method::Delete => &mut item.delete,
        };
        if slot.is_some() {
            warn!(
                operation = %op.operation_id,
                method = %op.method,
                "operation replaces an earlier one"
            );
        }
        *slot = Some(operation(op, &config.status_policy));
    }

    let schemas: BTreeMap<String, Schema> = generator
        .graph()
        .iter()
        .map(|dt| (dt.name.clone(), data_type_schema(dt)))
        .collect();

    debug!(paths = paths.len(), schemas = schemas.len(), "openapi document assembled");

    Document {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title: config.title.clone(),
            version: config.version.clone(),
        },
        paths,
        components: Components { schemas },
    }
}

/// Serializes a document as YAML.
pub fn to_yaml(document: &Document) -> AppResult<String> {
    let yaml = serde_yaml::to_string(document)?;
    Ok(yaml::double_quote_scalars(&yaml))
}

fn operation(op: &OperationSchema, policy: &StatusPolicy) -> Operation {
    let mut parameters: Vec<Parameter> = header_parameter(&op.spec).into_iter().collect();
    let mut request_body = None;

    if op.method.uses_query() {
        parameters.extend(op.input.fields.iter().filter_map(|field| {
            let name = field.query_key.clone()?;
            Some(Parameter {
                name,
                location: ParameterLocation::Query,
                description: String::new(),
                required: !field.is_optional(),
                schema: type_schema(&field.ty),
                example: None,
            })
        }));
    } else if !op.input.is_empty() {
        request_body = Some(RequestBody {
            content: json_content(Schema::reference(&op.input.name)),
        });
    }

    let mut success = Response::new("Success");
    if !op.output.is_empty() {
        success.content = json_content(Schema::reference(&op.output.name));
    }
    success.headers = response_headers(&op.spec);

    let mut responses = BTreeMap::new();
    responses.insert(SUCCESS_STATUS.to_string(), success);
    for (status, response) in error_responses(&op.spec.errors, policy) {
        if responses.insert(status.clone(), response).is_some() {
            warn!(
                operation = %op.operation_id,
                %status,
                "error response replaces another response"
            );
        }
    }

    Operation {
        operation_id: op.operation_id.clone(),
        description: op.spec.description.clone(),
        parameters,
        request_body,
        responses,
    }
}

fn header_parameter(spec: &Spec) -> Option<Parameter> {
    let header = &spec.request_headers;
    if header.is_absent() {
        return None;
    }
    Some(Parameter {
        name: header.key.clone(),
        location: ParameterLocation::Header,
        description: header.description.clone(),
        required: header.validation.required,
        schema: value_schema(header.value_type, &header.validation),
        example: header.value_example.clone().filter(|e| !e.is_empty()),
    })
}

fn response_headers(spec: &Spec) -> BTreeMap<String, Header> {
    let header = &spec.response_headers;
    let mut headers = BTreeMap::new();
    if !header.is_absent() {
        headers.insert(
            header.key.clone(),
            Header {
                description: header.description.clone(),
                required: header.validation.required,
                schema: value_schema(header.value_type, &header.validation),
            },
        );
    }
    headers
}

/// One consolidated response per HTTP status, keyed by the status.
pub fn error_responses(errors: &[ErrorSpec], policy: &StatusPolicy) -> BTreeMap<String, Response> {
    let mut groups: BTreeMap<u16, Vec<&ErrorSpec>> = BTreeMap::new();
    for error in errors {
        groups.entry(policy.resolve(error)).or_default().push(error);
    }

    groups
        .into_iter()
        .map(|(status, group)| (status.to_string(), consolidated_response(&group)))
        .collect()
}

fn consolidated_response(group: &[&ErrorSpec]) -> Response {
    let codes: Vec<String> = group.iter().map(|e| e.code.clone()).collect();
    let lines: Vec<String> = group
        .iter()
        .map(|e| format!("* `{}` - {}", e.code, e.description))
        .collect();

    let mut meta = Schema::typed("object");
    for entry in group.iter().flat_map(|e| e.meta.iter()) {
        meta.properties.insert(entry.key.clone(), meta_schema(entry));
    }

    let mut properties = BTreeMap::new();
    properties.insert(
        "code".to_string(),
        Schema {
            enum_values: codes,
            ..Schema::typed("string")
        },
    );
    properties.insert("message".to_string(), Schema::typed("string"));
    properties.insert("meta".to_string(), meta);

    let body = Schema {
        properties,
        required: vec!["code".to_string()],
        ..Schema::typed("object")
    };

    Response {
        description: format!("Error codes:\n  {}", lines.join("\n  ")),
        content: json_content(body),
        headers: BTreeMap::new(),
    }
}

fn meta_schema(entry: &KeyValueSpec) -> Schema {
    let mut schema = value_schema(entry.value_type, &entry.validation);
    if !entry.description.is_empty() {
        schema.description = Some(entry.description.clone());
    }
    schema
}

/// Schema of a header or metadata value, constraints included.
pub fn value_schema(value_type: PrimitiveType, validation: &Validation) -> Schema {
    let schema_type = match value_type {
        PrimitiveType::String => "string",
        PrimitiveType::Int | PrimitiveType::Uint => "integer",
        PrimitiveType::Float64 => "number",
        PrimitiveType::Bool => "boolean",
    };
    Schema {
        min_length: validation.min_len,
        max_length: validation.max_len,
        minimum: validation.min_value,
        maximum: validation.max_value,
        enum_values: validation.enum_values.clone(),
        ..Schema::typed(schema_type)
    }
}

/// Schema of a scalar.
pub fn primitive_schema(primitive: Primitive) -> Schema {
    Schema::typed(match primitive.category() {
        Category::Text => "string",
        Category::Integer => "integer",
        Category::Float => "number",
        Category::Boolean => "boolean",
    })
}

/// Schema of a field type.
///
/// Optional values map to the schema of what they wrap; their optionality
/// only shows in the enclosing object's `required` list.
pub fn type_schema(ty: &TypeExpr) -> Schema {
    match ty {
        TypeExpr::Primitive { primitive } => primitive_schema(*primitive),
        TypeExpr::Builtin { builtin } => match builtin {
            Builtin::DateTime => Schema::typed("string").with_format("date-time"),
            Builtin::Date => Schema::typed("string").with_format("date"),
        },
        TypeExpr::Named { name } => Schema::reference(name),
        TypeExpr::Optional { inner } => type_schema(inner),
        TypeExpr::Seq { inner } => Schema::array(type_schema(inner)),
        TypeExpr::Map { value, .. } => Schema::map(type_schema(value)),
    }
}

/// Component schema of a named type.
pub fn data_type_schema(data_type: &DataType) -> Schema {
    let mut schema = Schema::typed("object");
    for field in &data_type.fields {
        let key = field.wire_name().to_string();
        if !field.is_optional() {
            schema.required.push(key.clone());
        }
        schema.properties.insert(key, type_schema(&field.ty));
    }
    schema
}
