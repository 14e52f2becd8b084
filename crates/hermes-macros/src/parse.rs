//! Parsing utilities for the `QueryParams` derive.
//!
//! This module parses `#[query(...)]` attributes and classifies field types.

use std::collections::HashMap;

use syn::{
    parse::ParseStream, spanned::Spanned, Attribute, Data, DeriveInput, Fields, GenericArgument,
    Ident, LitStr, Path, PathArguments, Token, Type,
};

/// Name of the helper attribute.
const ATTR: &str = "query";

/// Shape a field type binds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One of the supported types; its shape comes from `FromBoundValue`.
    Supported,
    /// Anything else.
    Unsupported,
}

/// A parsed struct field.
#[derive(Debug)]
pub struct QueryField {
    /// The field name.
    pub ident: Ident,
    /// The field type.
    pub ty: Type,
    /// External query key, if the field is tagged.
    pub query: Option<LitStr>,
    /// Type classification.
    pub kind: FieldKind,
}

impl QueryField {
    /// Returns true if the field participates in binding.
    pub fn is_bindable(&self) -> bool {
        self.kind == FieldKind::Supported
            && self.query.as_ref().is_some_and(|q| !q.value().is_empty())
    }
}

/// A parsed `#[derive(QueryParams)]` input.
#[derive(Debug)]
pub struct QueryStruct {
    /// The struct name.
    pub ident: Ident,
    /// Path to the `hermes_extract` crate.
    pub krate: Path,
    /// Fields in declaration order.
    pub fields: Vec<QueryField>,
}

impl QueryStruct {
    /// Parses a derive input.
    pub fn parse(input: &DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "QueryParams cannot be derived for generic types",
            ));
        }

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                other => {
                    return Err(syn::Error::new(
                        other.span(),
                        "QueryParams requires a struct with named fields",
                    ))
                }
            },
            _ => {
                return Err(syn::Error::new(
                    input.ident.span(),
                    "QueryParams can only be derived for structs",
                ))
            }
        };

        let krate = parse_crate_path(&input.attrs)?;

        let fields = named
            .named
            .iter()
            .map(|field| {
                let ident = field
                    .ident
                    .clone()
                    .ok_or_else(|| syn::Error::new(field.span(), "expected named field"))?;
                Ok(QueryField {
                    ident,
                    ty: field.ty.clone(),
                    query: parse_field_name(&field.attrs)?,
                    kind: classify(&field.ty),
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        check_duplicates(&fields)?;

        Ok(Self {
            ident: input.ident.clone(),
            krate,
            fields,
        })
    }
}

/// Reads `#[query(crate = "path")]`, defaulting to `::hermes_extract`.
fn parse_crate_path(attrs: &[Attribute]) -> syn::Result<Path> {
    let mut krate = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTR)) {
        let lit = attr.parse_args_with(|input: ParseStream| {
            input.parse::<Token![crate]>()?;
            input.parse::<Token![=]>()?;
            input.parse::<LitStr>()
        })?;
        krate = Some(lit.parse::<Path>()?);
    }

    Ok(krate.unwrap_or_else(|| syn::parse_quote!(::hermes_extract)))
}

/// Reads `#[query("key")]` or `#[query(name = "key")]`.
fn parse_field_name(attrs: &[Attribute]) -> syn::Result<Option<LitStr>> {
    let mut name = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident(ATTR)) {
        if name.is_some() {
            return Err(syn::Error::new(attr.span(), "duplicate #[query] attribute"));
        }

        let lit = attr.parse_args_with(|input: ParseStream| {
            if input.peek(LitStr) {
                return input.parse::<LitStr>();
            }
            let key: Ident = input.parse()?;
            if key != "name" {
                return Err(syn::Error::new(
                    key.span(),
                    format!("unknown attribute: {key}"),
                ));
            }
            input.parse::<Token![=]>()?;
            input.parse::<LitStr>()
        })?;
        name = Some(lit);
    }

    Ok(name)
}

fn check_duplicates(fields: &[QueryField]) -> syn::Result<()> {
    let mut seen: HashMap<String, &Ident> = HashMap::new();

    for field in fields {
        let Some(query) = &field.query else { continue };
        let key = query.value();
        if key.is_empty() {
            continue;
        }
        if let Some(previous) = seen.insert(key.clone(), &field.ident) {
            return Err(syn::Error::new(
                query.span(),
                format!("query key `{key}` is already bound to field `{previous}`"),
            ));
        }
    }

    Ok(())
}

/// Classifies a field type by the last segment of its path.
pub fn classify(ty: &Type) -> FieldKind {
    let Some(segment) = last_segment(ty) else {
        return FieldKind::Unsupported;
    };

    let supported = match segment.ident.to_string().as_str() {
        "String" | "i64" | "bool" => segment.arguments.is_none(),
        "DateTime" => single_type_arg(&segment.arguments)
            .and_then(last_segment)
            .is_some_and(|tz| tz.ident == "Utc"),
        "Vec" => single_type_arg(&segment.arguments)
            .and_then(last_segment)
            .is_some_and(|inner| inner.ident == "String" || inner.ident == "i64"),
        _ => false,
    };

    if supported {
        FieldKind::Supported
    } else {
        FieldKind::Unsupported
    }
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path.path.segments.last(),
        _ => None,
    }
}

fn single_type_arg(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    match (args.args.first(), args.args.len()) {
        (Some(GenericArgument::Type(ty)), 1) => Some(ty),
        _ => None,
    }
}
