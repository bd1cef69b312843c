//! Derive macro for velgen type descriptions
//!
//! This crate provides `#[derive(ApiType)]`, which describes a struct to the
//! velgen generator: its name and, for each field, the field type, the key
//! it is serialized under and an optional query-binding key.
//!
//! # Example
//!
//! ```rust,ignore
//! use velgen_core::ApiType;
//!
//! #[derive(ApiType, serde::Serialize, serde::Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! pub struct ListUsers {
//!     #[api(query = "team")]
//!     team_id: String,
//!     #[api(query)]
//!     page: Option<u32>,
//!     #[serde(skip)]
//!     cache: Vec<u8>,
//! }
//! ```

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Error, Fields, GenericParam,
    LitStr, Token,
};

/// Derive `velgen_core::shape::ApiType` for a struct
///
/// Only structs with named fields and unit structs are supported. The
/// following attributes are honoured:
///
/// - `#[serde(rename = "...")]` on a field sets its serialization key
/// - `#[serde(rename_all = "...")]` on the struct derives keys for the
///   fields without an explicit rename
/// - `#[serde(skip)]` removes the field from the description
/// - `#[api(query = "...")]` / `#[api(query)]` binds the field to a query
///   parameter (the bare form uses the serialization key)
/// - `#[api(rename = "...")]` on the struct overrides the type name
///
/// Generic structs append the names of their type arguments, so `Page<User>`
/// is described as `PageUser`. A container `#[api(rename = "...")]` is used
/// as the final name instead.
#[proc_macro_derive(ApiType, attributes(api, serde))]
pub fn derive_api_type(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match derive_api_type_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[derive(Default)]
struct ContainerAttrs {
    rename: Option<String>,
    rename_all: Option<String>,
}

#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    skip: bool,
    query: Option<Option<String>>,
}

fn derive_api_type_impl(input: DeriveInput) -> Result<proc_macro2::TokenStream, Error> {
    let ident = &input.ident;

    let data = match &input.data {
        Data::Struct(data) => data,
        _ => {
            return Err(Error::new_spanned(
                &input,
                "ApiType can only be derived for structs",
            ));
        }
    };

    let container = container_attrs(&input.attrs)?;
    let base_name = container
        .rename
        .clone()
        .unwrap_or_else(|| ident.unraw().to_string());

    let mut field_tokens = Vec::new();
    match &data.fields {
        Fields::Named(named) => {
            for field in &named.named {
                let attrs = field_attrs(&field.attrs)?;
                if attrs.skip {
                    continue;
                }
                let field_ident = field
                    .ident
                    .as_ref()
                    .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;
                let name = field_ident.unraw().to_string();

                let json_key = match (&attrs.rename, &container.rename_all) {
                    (Some(key), _) => Some(key.clone()),
                    (None, Some(rule)) => Some(
                        apply_rename_rule(rule, &name)
                            .ok_or_else(|| unknown_rule(&input.attrs, rule))?,
                    ),
                    (None, None) => None,
                };
                let wire_name = json_key.clone().unwrap_or_else(|| name.clone());

                let ty = &field.ty;
                let json = json_key.map(|key| quote!(.json(#key)));
                let query = attrs.query.map(|key| {
                    let key = key.unwrap_or_else(|| wire_name.clone());
                    quote!(.query(#key))
                });
                field_tokens.push(quote! {
                    ::velgen_core::shape::FieldShape::of::<#ty>(#name) #json #query
                });
            }
        }
        Fields::Unit => {}
        Fields::Unnamed(_) => {
            return Err(Error::new_spanned(
                &input,
                "ApiType cannot be derived for tuple structs, declare named fields",
            ));
        }
    }

    let mut generics = input.generics.clone();
    let type_params: Vec<syn::Ident> = generics
        .params
        .iter()
        .filter_map(|p| match p {
            GenericParam::Type(t) => Some(t.ident.clone()),
            _ => None,
        })
        .collect();
    if !type_params.is_empty() {
        let where_clause = generics.make_where_clause();
        for param in &type_params {
            where_clause
                .predicates
                .push(parse_quote!(#param: ::velgen_core::shape::ApiType));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let fragments: &[syn::Ident] = if container.rename.is_some() {
        &[]
    } else {
        &type_params
    };

    let fields = if field_tokens.is_empty() {
        quote!(::std::vec::Vec::new)
    } else {
        quote!(|| ::std::vec![#(#field_tokens),*])
    };

    Ok(quote! {
        impl #impl_generics ::velgen_core::shape::ApiType for #ident #ty_generics #where_clause {
            fn shape() -> ::velgen_core::shape::Shape {
                #[allow(unused_mut)]
                let mut name = ::std::string::String::from(#base_name);
                #(
                    name.push_str(
                        &<#fragments as ::velgen_core::shape::ApiType>::shape().name_fragment(),
                    );
                )*
                ::velgen_core::shape::Shape::Struct(
                    ::velgen_core::shape::StructRef::new(name, #fields),
                )
            }
        }
    })
}

fn container_attrs(attrs: &[Attribute]) -> Result<ContainerAttrs, Error> {
    let mut out = ContainerAttrs::default();
    for attr in attrs {
        if attr.path().is_ident("api") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    out.rename = Some(string_value(&meta)?);
                    Ok(())
                } else {
                    Err(meta.error("unknown api attribute, expected `rename`"))
                }
            })?;
        } else if attr.path().is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    out.rename_all = Some(serialize_name(&meta)?);
                    Ok(())
                } else {
                    skip_meta(&meta)
                }
            })?;
        }
    }
    Ok(out)
}

fn field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs, Error> {
    let mut out = FieldAttrs::default();
    for attr in attrs {
        if attr.path().is_ident("api") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("query") {
                    out.query = Some(if meta.input.peek(Token![=]) {
                        Some(string_value(&meta)?)
                    } else {
                        None
                    });
                    Ok(())
                } else {
                    Err(meta.error("unknown api attribute, expected `query`"))
                }
            })?;
        } else if attr.path().is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    out.rename = Some(serialize_name(&meta)?);
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                    Ok(())
                } else if meta.path.is_ident("flatten") {
                    Err(meta.error("#[serde(flatten)] is not supported by ApiType"))
                } else {
                    skip_meta(&meta)
                }
            })?;
        }
    }
    Ok(out)
}

fn string_value(meta: &ParseNestedMeta) -> Result<String, Error> {
    let lit: LitStr = meta.value()?.parse()?;
    Ok(lit.value())
}

/// Reads `key = "..."` or `key(serialize = "...", deserialize = "...")`,
/// keeping the serialize side.
fn serialize_name(meta: &ParseNestedMeta) -> Result<String, Error> {
    if meta.input.peek(Token![=]) {
        return string_value(meta);
    }
    let mut name = None;
    meta.parse_nested_meta(|inner| {
        if inner.path.is_ident("serialize") {
            name = Some(string_value(&inner)?);
            Ok(())
        } else {
            skip_meta(&inner)
        }
    })?;
    name.ok_or_else(|| meta.error("expected `serialize = \"...\"`"))
}

/// Consumes a serde option this derive does not interpret.
fn skip_meta(meta: &ParseNestedMeta) -> Result<(), Error> {
    if meta.input.peek(Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        let _: proc_macro2::TokenStream = content.parse()?;
    }
    Ok(())
}

fn apply_rename_rule(rule: &str, field: &str) -> Option<String> {
    let renamed = match rule {
        "lowercase" => field.to_lowercase(),
        "UPPERCASE" => field.to_uppercase(),
        "PascalCase" => field.to_upper_camel_case(),
        "camelCase" => field.to_lower_camel_case(),
        "snake_case" => field.to_snake_case(),
        "SCREAMING_SNAKE_CASE" => field.to_shouty_snake_case(),
        "kebab-case" => field.to_kebab_case(),
        "SCREAMING-KEBAB-CASE" => field.to_shouty_kebab_case(),
        _ => return None,
    };
    Some(renamed)
}

fn unknown_rule(attrs: &[Attribute], rule: &str) -> Error {
    let message = format!("unknown rename_all rule \"{}\"", rule);
    match attrs.iter().find(|a| a.path().is_ident("serde")) {
        Some(attr) => Error::new_spanned(attr, message),
        None => Error::new(proc_macro2::Span::call_site(), message),
    }
}
