//! Derive macros for `jam_codec`.
//!
//! `#[derive(Codable)]` and `#[derive(JsonCodable)]` cover the three
//! composite kinds:
//!
//! - a `struct` is a record: its wire form is the concatenation of the
//!   field encodings in declaration order, with no framing;
//! - an `enum` whose variants are all unit variants is an enumeration:
//!   its wire form is a varint of the variant's integer discriminant;
//! - any other `enum` is a choice: its wire form is a discriminant tag
//!   (one octet for up to 256 variants, a varint beyond that) followed
//!   by the branch encoding.
//!
//! Attributes under `#[codec(...)]`: `rename = "..."` on fields and
//! variants (JSON only), `rename_all = "..."` on the container, and
//! `default` on record fields (missing JSON key falls back to
//! `Default::default()`).

use darling::{FromDeriveInput, FromField, FromVariant};
use quote::quote;
use syn::DeriveInput;

mod record;
mod util;
mod variant;

#[derive(Debug, Clone, FromDeriveInput)]
#[darling(attributes(codec))]
struct ContainerAttr {
    #[darling(default)]
    pub rename_all: Option<String>,
}

#[derive(Debug, Clone, FromField)]
#[darling(attributes(codec))]
#[allow(dead_code)]
struct FieldAttr {
    ident: Option<syn::Ident>,
    ty: syn::Type,
    #[darling(default)]
    rename: Option<String>,
    #[darling(default)]
    default: bool,
}

#[derive(Debug, Clone, FromVariant)]
#[darling(attributes(codec))]
#[allow(dead_code)]
struct VariantAttr {
    ident: syn::Ident,
    #[darling(default)]
    rename: Option<String>,
}

#[proc_macro_derive(Codable, attributes(codec))]
pub fn derive_codable(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(item as DeriveInput);
    let impl_codable = match &input.data {
        syn::Data::Struct(data) => record::expand_codable(&input, data),
        syn::Data::Enum(data) => variant::expand_codable(&input, data),
        syn::Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "Codable cannot be derived for unions",
        )),
    };
    let impl_codable = match impl_codable {
        Ok(tokens) => tokens,
        Err(err) => return err.to_compile_error().into(),
    };
    let output = quote! {
        const _: () = {
            #impl_codable
        };
    };
    output.into()
}

#[proc_macro_derive(JsonCodable, attributes(codec))]
pub fn derive_json_codable(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(item as DeriveInput);
    let impl_json = match &input.data {
        syn::Data::Struct(data) => record::expand_json(&input, data),
        syn::Data::Enum(data) => variant::expand_json(&input, data),
        syn::Data::Union(_) => Err(syn::Error::new_spanned(
            &input.ident,
            "JsonCodable cannot be derived for unions",
        )),
    };
    let impl_json = match impl_json {
        Ok(tokens) => tokens,
        Err(err) => return err.to_compile_error().into(),
    };
    let output = quote! {
        const _: () = {
            #impl_json
        };
    };
    output.into()
}
