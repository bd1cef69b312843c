//! # Template Renderer
//!
//! Renders the operation list and its type graph into client source code.
//!
//! Templates are embedded at compile time and looked up by a
//! [`TemplateKey`] (`"<language>:<variant>"`). The context handed to a
//! template already carries every type spelled in the target language, so
//! templates only lay text out.

use crate::error::{AppError, AppResult};
use crate::graph::OperationSchema;
use crate::lang::{Language, TypeMapper};
use crate::model::{Builtin, Field, TypeExpr};
use minijinja::Environment;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Name of the variant every language ships with.
pub const DEFAULT_VARIANT: &str = "default";

const TEMPLATES: &[(&str, &str)] = &[
    ("go:default", include_str!("../templates/go/default.go.j2")),
    ("ts:default", include_str!("../templates/ts/default.ts.j2")),
    ("rust:default", include_str!("../templates/rust/default.rs.j2")),
];

/// Identifies a template: a language plus a named variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateKey {
    /// Target language.
    pub language: Language,
    /// Variant name.
    pub variant: String,
}

impl TemplateKey {
    /// Creates a key.
    pub fn new(language: Language, variant: impl Into<String>) -> Self {
        Self {
            language,
            variant: variant.into(),
        }
    }
}

impl From<Language> for TemplateKey {
    fn from(language: Language) -> Self {
        Self::new(language, DEFAULT_VARIANT)
    }
}

impl fmt::Display for TemplateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.language, self.variant)
    }
}

impl FromStr for TemplateKey {
    type Err = AppError;

    /// Parses `go:default`; a bare language selects the default variant.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((lang, variant)) => Ok(Self::new(lang.parse()?, variant)),
            None => Ok(Self::from(s.parse::<Language>()?)),
        }
    }
}

/// A field as seen by templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldContext {
    /// The Rust field name.
    pub name: String,
    /// Field identifier in the target language.
    pub ident: String,
    /// Member access suffix (`.name` or `["x-name"]`).
    pub access: String,
    /// Type spelled in the target language.
    pub ty: String,
    /// Rust-like display of the declared type.
    pub type_name: String,
    /// Key on the wire.
    pub wire_name: String,
    /// Whether the key was set explicitly.
    pub has_json_tag: bool,
    /// Whether the identifier differs from the wire key.
    pub renamed: bool,
    /// Query-binding key.
    pub query_key: Option<String>,
    /// Whether the field may be absent.
    pub optional: bool,
}

/// A named type as seen by templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeContext {
    /// Type name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldContext>,
}

/// An operation as seen by templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiContext {
    /// Operation id.
    pub operation_id: String,
    /// Operation id with its first letter upper-cased.
    pub func_name: String,
    /// Client method identifier in the target language.
    pub method_ident: String,
    /// HTTP method (`GET`, `POST`, ...).
    pub method: String,
    /// Request path.
    pub path: String,
    /// Description from the operation docs.
    pub description: String,
    /// `description` split into lines, trailing whitespace removed. Templates
    /// comment each line on its own.
    pub description_lines: Vec<String>,
    /// The operation takes input.
    pub has_input: bool,
    /// The operation returns a body.
    pub has_output: bool,
    /// Input is sent as a JSON body.
    pub has_body: bool,
    /// Input is sent as query parameters.
    pub uses_query: bool,
    /// Input type name (empty when there is none).
    pub input: String,
    /// Output type name (empty when there is none).
    pub output: String,
    /// Query-bound input fields.
    pub query_fields: Vec<FieldContext>,
}

/// Everything a client template can see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientContext {
    /// Client type name.
    pub type_name: String,
    /// Package / module name.
    pub package_name: String,
    /// Target language token.
    pub language: String,
    /// Types in emission order, each exactly once.
    pub types: Vec<TypeContext>,
    /// Operations in registration order.
    pub apis: Vec<ApiContext>,
    /// Some field holds a date-time.
    pub uses_time: bool,
    /// Some operation sends a JSON body.
    pub uses_body: bool,
    /// Some operation sends query parameters.
    pub uses_query: bool,
    /// Some operation encodes or decodes JSON.
    pub uses_json: bool,
}

impl ClientContext {
    /// Builds the context of a client for `operations` in `language`.
    pub fn new(
        operations: &[OperationSchema],
        language: Language,
        type_name: &str,
        package_name: &str,
    ) -> Self {
        let mapper = language.mapper();

        let types: Vec<TypeContext> = operations
            .iter()
            .flat_map(|op| op.data_types.iter())
            .map(|dt| TypeContext {
                name: mapper.named(&dt.name),
                fields: dt.fields.iter().map(|f| field_context(mapper, f)).collect(),
            })
            .collect();

        let apis: Vec<ApiContext> = operations
            .iter()
            .map(|op| api_context(mapper, op))
            .collect();

        let uses_time = operations.iter().any(|op| {
            op.data_types
                .iter()
                .flat_map(|dt| dt.fields.iter())
                .any(|f| mentions(&f.ty, Builtin::DateTime))
        });

        Self {
            type_name: type_name.to_string(),
            package_name: package_name.to_string(),
            language: language.to_string(),
            uses_time,
            uses_body: apis.iter().any(|a| a.has_body),
            uses_query: apis.iter().any(|a| a.uses_query),
            uses_json: apis.iter().any(|a| a.has_body || a.has_output),
            types,
            apis,
        }
    }
}

fn field_context(mapper: &dyn TypeMapper, field: &Field) -> FieldContext {
    let wire_name = field.wire_name().to_string();
    let ident = mapper.field_ident(&field.name, &wire_name);
    FieldContext {
        name: field.name.clone(),
        access: if ident.starts_with('"') {
            format!("[{}]", ident)
        } else {
            format!(".{}", ident)
        },
        renamed: ident.trim_start_matches("r#") != wire_name,
        ident,
        ty: mapper.map_type(&field.ty),
        type_name: field.type_name.clone(),
        wire_name,
        has_json_tag: field.json_key.is_some(),
        query_key: field.query_key.clone(),
        optional: field.is_optional(),
    }
}

fn api_context(mapper: &dyn TypeMapper, op: &OperationSchema) -> ApiContext {
    let has_input = !op.input.is_empty();
    let query_fields: Vec<FieldContext> = if op.method.uses_query() {
        op.input
            .fields
            .iter()
            .filter(|f| f.query_key.is_some())
            .map(|f| field_context(mapper, f))
            .collect()
    } else {
        Vec::new()
    };

    ApiContext {
        operation_id: op.operation_id.clone(),
        func_name: op.func_name.clone(),
        method_ident: mapper.method_ident(&op.operation_id),
        method: op.method.to_string(),
        path: format!("/{}", op.operation_id),
        description: op.spec.description.clone(),
        description_lines: description_lines(&op.spec.description),
        has_input,
        has_output: !op.output.is_empty(),
        has_body: has_input && !op.method.uses_query(),
        uses_query: !query_fields.is_empty(),
        input: if has_input {
            mapper.named(&op.input.name)
        } else {
            String::new()
        },
        output: if op.output.is_empty() {
            String::new()
        } else {
            mapper.named(&op.output.name)
        },
        query_fields,
    }
}

fn description_lines(description: &str) -> Vec<String> {
    if description.trim().is_empty() {
        return Vec::new();
    }
    description
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}

fn mentions(ty: &TypeExpr, builtin: Builtin) -> bool {
    match ty {
        TypeExpr::Builtin { builtin: b } => *b == builtin,
        TypeExpr::Optional { inner } | TypeExpr::Seq { inner } => mentions(inner, builtin),
        TypeExpr::Map { key, value } => mentions(key, builtin) || mentions(value, builtin),
        TypeExpr::Primitive { .. } | TypeExpr::Named { .. } => false,
    }
}

/// The template registry.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Creates a renderer holding every embedded template.
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Whether a template is registered under `key`.
    pub fn has_template(&self, key: &TemplateKey) -> bool {
        self.env.get_template(&key.to_string()).is_ok()
    }

    /// Registered template keys, sorted.
    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = TEMPLATES.iter().map(|(name, _)| name.to_string()).collect();
        keys.sort();
        keys
    }

    /// Renders the template registered under `key`.
    ///
    /// # Errors
    ///
    /// [`AppError::TemplateNotFound`] for an unknown key, [`AppError::Template`]
    /// when rendering fails.
    pub fn render(&self, key: &TemplateKey, context: &ClientContext) -> AppResult<String> {
        let name = key.to_string();
        let template = self
            .env
            .get_template(&name)
            .map_err(|_| AppError::TemplateNotFound(name.clone()))?;
        Ok(template.render(context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docs::Spec;
    use crate::graph;
    use crate::operation::OperationDescriptor;
    use crate::shape::{ApiType, FieldShape, Shape, StructRef};

    struct Search;
    impl ApiType for Search {
        fn shape() -> Shape {
            Shape::Struct(StructRef::new("Search", || {
                vec![
                    FieldShape::of::<String>("term").json("term").query("q"),
                    FieldShape::of::<Option<u32>>("limit").json("limit").query("limit"),
                ]
            }))
        }
    }

    struct Hit;
    impl ApiType for Hit {
        fn shape() -> Shape {
            Shape::Struct(StructRef::new("Hit", || {
                vec![
                    FieldShape::of::<String>("title").json("title"),
                    FieldShape::of::<chrono::DateTime<chrono::Utc>>("seen_at").json("seenAt"),
                ]
            }))
        }
    }

    struct Hits;
    impl ApiType for Hits {
        fn shape() -> Shape {
            Shape::Struct(StructRef::new("Hits", || vec![FieldShape::of::<Vec<Hit>>("items")]))
        }
    }

    fn schemas() -> Vec<OperationSchema> {
        let ops = vec![
            OperationDescriptor::get::<Search, Hits>("search")
                .with_spec(Spec::new("Full text search")),
            OperationDescriptor::post::<Hit, ()>("index"),
        ];
        graph::build(&ops).unwrap().1
    }

    fn render(lang: Language) -> String {
        let ctx = ClientContext::new(&schemas(), lang, "Client", "search");
        Renderer::new().unwrap().render(&lang.into(), &ctx).unwrap()
    }

    #[test]
    fn test_template_key() {
        let key: TemplateKey = "go:default".parse().unwrap();
        assert_eq!(key, TemplateKey::from(Language::Go));
        assert_eq!(key.to_string(), "go:default");
        let key: TemplateKey = "typescript".parse().unwrap();
        assert_eq!(key.to_string(), "ts:default");
        assert!("cobol:default".parse::<TemplateKey>().is_err());
    }

    #[test]
    fn test_unknown_variant() {
        let renderer = Renderer::new().unwrap();
        let ctx = ClientContext::new(&schemas(), Language::Go, "Client", "search");
        let key = TemplateKey::new(Language::Go, "fancy");
        assert!(!renderer.has_template(&key));
        match renderer.render(&key, &ctx).unwrap_err() {
            AppError::TemplateNotFound(name) => assert_eq!(name, "go:fancy"),
            other => panic!("expected TemplateNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_registered_keys() {
        let keys = Renderer::keys();
        assert_eq!(keys, vec!["go:default", "rust:default", "ts:default"]);
    }

    #[test]
    fn test_context_flags() {
        let ctx = ClientContext::new(&schemas(), Language::Go, "Client", "search");
        let names: Vec<&str> = ctx.types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Search", "Hits", "Hit"]);
        assert!(ctx.uses_time && ctx.uses_body && ctx.uses_query && ctx.uses_json);

        let search = &ctx.apis[0];
        assert!(search.uses_query && !search.has_body);
        assert_eq!(search.query_fields.len(), 2);
        assert_eq!(search.query_fields[0].query_key.as_deref(), Some("q"));
        assert_eq!(search.method_ident, "Search");

        let index = &ctx.apis[1];
        assert!(index.has_body && !index.has_output);
        assert_eq!(index.output, "");
    }

    #[test]
    fn test_go_client() {
        let out = render(Language::Go);
        assert!(out.starts_with("// Code generated by velgen. DO NOT EDIT."));
        assert!(out.contains("package search"));
        assert!(out.contains("\"time\""));
        assert!(out.contains("SeenAt time.Time `json:\"seenAt\"`"));
        assert!(out.contains("Items []Hit `json:\"items\"`"));
        assert!(out.contains("q.Set(\"q\", fmt.Sprint(input.Term))"));
        assert!(out.contains(
            "func (c *Client) Search(ctx context.Context, input *Search) (*Hits, error)"
        ));
        assert!(out.contains("func (c *Client) Index(ctx context.Context, input *Hit) error"));
        assert_eq!(out.matches("type Hit struct").count(), 1);
    }

    #[test]
    fn test_ts_client() {
        let out = render(Language::TypeScript);
        assert!(out.contains("export interface Hit {"));
        assert!(out.contains("  seenAt: string;"));
        assert!(out.contains("  limit?: number | undefined;"));
        assert!(out.contains("async search(input: Search): Promise<Hits>"));
        assert!(out.contains("async index(input: Hit): Promise<void>"));
        assert!(out.contains("body: JSON.stringify(input)"));
    }

    #[test]
    fn test_rust_client() {
        let out = render(Language::Rust);
        assert!(out.contains("pub struct Hits {"));
        assert!(out.contains("#[serde(rename = \"seenAt\")]"));
        assert!(out.contains("pub seen_at: String,"));
        assert!(out.contains("pub async fn search(&self, input: &Search) -> Result<Hits, Error>"));
        assert!(out.contains("reqwest::Method::POST"));
    }

    fn render_ops(lang: Language, ops: &[OperationDescriptor]) -> String {
        let schemas = graph::build(ops).unwrap().1;
        let ctx = ClientContext::new(&schemas, lang, "Client", "search");
        Renderer::new().unwrap().render(&lang.into(), &ctx).unwrap()
    }

    #[test]
    fn test_multiline_description_stays_commented() {
        let ops = vec![OperationDescriptor::post::<Hit, ()>("index").with_spec(Spec::new(
            "Indexes one hit.\n\nfn main() {}  \nEnds the */ comment",
        ))];

        let go = render_ops(Language::Go, &ops);
        assert!(go.contains(concat!(
            "// Index: Indexes one hit.\n",
            "//\n",
            "// fn main() {}\n",
            "// Ends the */ comment\n",
            "func (c *Client) Index(",
        )));

        let rust = render_ops(Language::Rust, &ops);
        assert!(rust.contains(concat!(
            "    /// Indexes one hit.\n",
            "    ///\n",
            "    /// fn main() {}\n",
            "    /// Ends the */ comment\n",
            "    pub async fn index(",
        )));

        let ts = render_ops(Language::TypeScript, &ops);
        assert!(ts.contains(concat!(
            "  /**\n",
            "   * Indexes one hit.\n",
            "   *\n",
            "   * fn main() {}\n",
            "   * Ends the *\\/ comment\n",
            "   */\n",
            "  async index(",
        )));
        assert!(!ts.contains("Ends the */"));
    }

    #[test]
    fn test_description_lines() {
        assert_eq!(description_lines(""), Vec::<String>::new());
        assert_eq!(description_lines("  \n "), Vec::<String>::new());
        assert_eq!(description_lines("one\r\ntwo "), vec!["one", "two"]);
    }

    #[test]
    fn test_ts_fetch_is_bound() {
        let out = render(Language::TypeScript);
        assert!(out.contains("fetchImpl: typeof fetch = globalThis.fetch.bind(globalThis),"));
    }

    #[test]
    fn test_go_client_without_operations() {
        let out = render_ops(Language::Go, &[]);
        assert!(!out.contains("\"context\""));
        assert!(!out.contains("\"fmt\""));
        assert!(out.contains("import (\n\t\"net/http\"\n)\n"));
        assert!(out.contains("func NewClient(baseURL string) *Client {"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        for lang in Language::ALL {
            assert_eq!(render(lang), render(lang));
        }
    }
}
