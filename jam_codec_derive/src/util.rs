use darling::{FromDeriveInput, FromField, FromVariant};
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::{ContainerAttr, FieldAttr, VariantAttr};

fn to_syn_error(err: darling::Error) -> syn::Error {
    syn::Error::new(err.span(), err.to_string())
}

pub(crate) fn parse_container_attr(input: &DeriveInput) -> Result<ContainerAttr, syn::Error> {
    ContainerAttr::from_derive_input(input).map_err(to_syn_error)
}

pub(crate) fn parse_field_attrs<'a>(
    fields: impl Iterator<Item = &'a syn::Field>,
) -> Result<Vec<FieldAttr>, syn::Error> {
    fields
        .map(|field| FieldAttr::from_field(field).map_err(to_syn_error))
        .collect()
}

pub(crate) fn parse_variant_attrs<'a>(
    variants: impl Iterator<Item = &'a syn::Variant>,
) -> Result<Vec<VariantAttr>, syn::Error> {
    variants
        .map(|variant| VariantAttr::from_variant(variant).map_err(to_syn_error))
        .collect()
}

pub(crate) fn convert_to_case(
    case: &str,
    source: String,
    ctx: &DeriveInput,
) -> Result<String, syn::Error> {
    use convert_case::{Case, Casing};
    let converted = match case {
        "" => source,
        "lowercase" => source.to_lowercase(),
        "UPPERCASE" => source.to_uppercase(),
        "PascalCase" => source.to_case(Case::Pascal),
        "camelCase" => source.to_case(Case::Camel),
        "snake_case" => source.to_case(Case::Snake),
        "SCREAMING_SNAKE_CASE" => source.to_case(Case::ScreamingSnake),
        "kebab-case" => source.to_case(Case::Kebab),
        other => {
            return Err(syn::Error::new(
                ctx.ident.span(),
                format!("{} case is not implemented", other),
            ))
        }
    };
    Ok(converted)
}

/// JSON name of a field or variant: explicit `rename` wins, then the
/// container's `rename_all` casing, then the declared name.
pub(crate) fn json_name(
    declared: String,
    rename: &Option<String>,
    container: &ContainerAttr,
    ctx: &DeriveInput,
) -> Result<String, syn::Error> {
    match rename {
        Some(name) => Ok(name.clone()),
        None => match &container.rename_all {
            Some(case) => convert_to_case(case, declared, ctx),
            None => Ok(declared),
        },
    }
}

/// Existing `where` predicates extended with `bound` for every generic
/// type parameter.
pub(crate) fn where_with_bound(generics: &syn::Generics, bound: TokenStream) -> TokenStream {
    let mut predicates: Vec<TokenStream> = Vec::new();
    if let Some(clause) = &generics.where_clause {
        for predicate in &clause.predicates {
            predicates.push(quote!(#predicate));
        }
    }
    for param in generics.params.iter() {
        if let syn::GenericParam::Type(type_param) = param {
            let ident = &type_param.ident;
            predicates.push(quote!(#ident: #bound));
        }
    }
    if predicates.is_empty() {
        quote!()
    } else {
        quote!(where #(#predicates),*)
    }
}

/// The integer discriminant of every variant, following Rust's implicit
/// numbering: an explicit literal sets the value, each following variant
/// counts up from its predecessor.
pub(crate) fn variant_discriminants(data: &syn::DataEnum) -> Result<Vec<u64>, syn::Error> {
    let mut discriminants = Vec::with_capacity(data.variants.len());
    let mut next: u64 = 0;
    for variant in &data.variants {
        let value = match &variant.discriminant {
            Some((_, expr)) => match expr {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Int(lit),
                    ..
                }) => lit.base10_parse::<u64>()?,
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "discriminant must be an integer literal",
                    ))
                }
            },
            None => next,
        };
        discriminants.push(value);
        next = value + 1;
    }
    Ok(discriminants)
}
