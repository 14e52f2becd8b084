//! `QueryParams` derive implementation.

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::DeriveInput;

use crate::parse::{FieldKind, QueryField, QueryStruct};

/// Expands `#[derive(QueryParams)]`.
pub fn expand_query_params(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let parsed = QueryStruct::parse(&input)?;
    Ok(generate(&parsed))
}

fn generate(parsed: &QueryStruct) -> TokenStream {
    let ident = &parsed.ident;
    let type_name = ident.to_string();
    let krate = &parsed.krate;

    let descriptors = parsed.fields.iter().map(|field| field_descriptor(krate, field));

    let arms = parsed
        .fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.is_bindable())
        .map(|(index, field)| {
            let index = Literal::usize_unsuffixed(index);
            let name = &field.ident;
            let query = field.query.as_ref();
            quote! {
                #index => {
                    self.#name = value.into_field(#query)?;
                    ::core::result::Result::Ok(())
                }
            }
        });

    quote! {
        #[automatically_derived]
        impl #krate::bind::QueryParams for #ident {
            fn descriptor() -> #krate::bind::TypeDescriptor {
                const FIELDS: &[#krate::bind::FieldDescriptor] = &[#(#descriptors),*];
                #krate::bind::TypeDescriptor::new(#type_name, FIELDS)
            }

            #[allow(unused_variables)]
            fn assign(
                &mut self,
                index: usize,
                value: #krate::bind::BoundValue,
            ) -> ::core::result::Result<(), #krate::bind::BindError> {
                match index {
                    #(#arms)*
                    _ => ::core::result::Result::Err(#krate::bind::BindError::unknown_field(index)),
                }
            }
        }
    }
}

fn field_descriptor(krate: &syn::Path, field: &QueryField) -> TokenStream {
    let name = field.ident.to_string();
    let ty = &field.ty;

    let query = match &field.query {
        Some(query) => quote! { ::core::option::Option::Some(#query) },
        None => quote! { ::core::option::Option::None },
    };

    let shape = match field.kind {
        FieldKind::Supported => quote! { <#ty as #krate::bind::FromBoundValue>::SHAPE },
        FieldKind::Unsupported => {
            let type_name = quote!(#ty).to_string().replace(' ', "");
            quote! { #krate::bind::FieldShape::Unsupported(#type_name) }
        }
    };

    quote! {
        #krate::bind::FieldDescriptor::new(#name, #query, #shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_basic_struct() {
        let input = quote! {
            struct Search {
                #[query("name")]
                name: String,
                #[query("ids")]
                ids: Vec<i64>,
            }
        };

        let result = expand_query_params(input);
        assert!(result.is_ok(), "expansion failed: {:?}", result.err());

        let expanded = result.unwrap().to_string();
        assert!(expanded.contains("QueryParams for Search"));
        assert!(expanded.contains("into_field (\"ids\")"));
    }

    #[test]
    fn test_expand_unsupported_field_has_no_arm() {
        let input = quote! {
            struct Metrics {
                #[query("ratio")]
                ratio: f64,
            }
        };

        let expanded = expand_query_params(input).unwrap().to_string();
        assert!(expanded.contains("Unsupported (\"f64\")"));
        assert!(!expanded.contains("into_field"));
    }

    #[test]
    fn test_expand_custom_crate_path() {
        let input = quote! {
            #[query(crate = "::hermes::extract")]
            struct Search {
                #[query("q")]
                q: String,
            }
        };

        let expanded = expand_query_params(input).unwrap().to_string();
        assert!(expanded.contains(":: hermes :: extract :: bind :: QueryParams"));
    }

    #[test]
    fn test_expand_duplicate_key_fails() {
        let input = quote! {
            struct Search {
                #[query("q")]
                a: String,
                #[query("q")]
                b: String,
            }
        };

        assert!(expand_query_params(input).is_err());
    }
}
