use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::DeriveInput;

use crate::util;

/// Record wire form: the field encodings concatenated in declaration
/// order, no framing.
pub(crate) fn expand_codable(
    input: &DeriveInput,
    data: &syn::DataStruct,
) -> Result<TokenStream, syn::Error> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause = util::where_with_bound(&input.generics, quote!(jam_codec::Codable));

    struct Shape {
        accessors: Vec<TokenStream>,
        locals: Vec<syn::Ident>,
        types: Vec<syn::Type>,
        constructor: TokenStream,
    }

    let Shape {
        accessors,
        locals,
        types,
        constructor,
    } = match &data.fields {
        syn::Fields::Named(fields) => {
            let idents: Vec<_> = fields
                .named
                .iter()
                .map(|field| field.ident.clone().expect("named field"))
                .collect();
            let locals: Vec<_> = idents
                .iter()
                .map(|ident| format_ident!("__field_{}", ident))
                .collect();
            Shape {
                accessors: idents.iter().map(|ident| quote!(self.#ident)).collect(),
                constructor: quote!(Self { #(#idents: #locals),* }),
                types: fields.named.iter().map(|field| field.ty.clone()).collect(),
                locals,
            }
        }
        syn::Fields::Unnamed(fields) => {
            let indices: Vec<syn::Index> =
                (0..fields.unnamed.len()).map(syn::Index::from).collect();
            let locals: Vec<_> = indices
                .iter()
                .map(|index| format_ident!("__field_{}", index.index))
                .collect();
            Shape {
                accessors: indices.iter().map(|index| quote!(self.#index)).collect(),
                constructor: quote!(Self( #(#locals),* )),
                types: fields.unnamed.iter().map(|field| field.ty.clone()).collect(),
                locals,
            }
        }
        syn::Fields::Unit => Shape {
            accessors: Vec::new(),
            locals: Vec::new(),
            types: Vec::new(),
            constructor: quote!(Self),
        },
    };

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics jam_codec::Codable for #ident #ty_generics #where_clause {
            fn encode_size(&self) -> usize {
                0 #( + jam_codec::Codable::encode_size(&#accessors) )*
            }

            #[allow(unused_mut, unused_variables)]
            fn encode_into(
                &self,
                buf: &mut [u8],
                offset: usize,
            ) -> ::core::result::Result<usize, jam_codec::Error> {
                let mut __cur = offset;
                #( __cur += jam_codec::Codable::encode_into(&#accessors, buf, __cur)?; )*
                Ok(__cur - offset)
            }

            #[allow(unused_mut, unused_variables)]
            fn decode_from(
                buf: &[u8],
                offset: usize,
            ) -> ::core::result::Result<(Self, usize), jam_codec::Error> {
                let mut __cur = offset;
                #(
                    let (#locals, __read): (#types, usize) =
                        jam_codec::Codable::decode_from(buf, __cur)?;
                    __cur += __read;
                )*
                Ok((#constructor, __cur - offset))
            }
        }
    })
}

/// Record JSON form: an object keyed by field name or alias; unknown keys
/// ignored, missing keys fall back to a declared default or fail.
pub(crate) fn expand_json(
    input: &DeriveInput,
    data: &syn::DataStruct,
) -> Result<TokenStream, syn::Error> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause = util::where_with_bound(&input.generics, quote!(jam_codec::JsonCodable));
    let container = util::parse_container_attr(input)?;

    let body = match &data.fields {
        syn::Fields::Named(fields) => {
            let attrs = util::parse_field_attrs(fields.named.iter())?;
            let idents: Vec<_> = fields
                .named
                .iter()
                .map(|field| field.ident.clone().expect("named field"))
                .collect();
            let types: Vec<_> = fields.named.iter().map(|field| field.ty.clone()).collect();
            let names = idents
                .iter()
                .zip(&attrs)
                .map(|(ident, attr)| {
                    util::json_name(ident.to_string(), &attr.rename, &container, input)
                })
                .collect::<Result<Vec<String>, syn::Error>>()?;
            let locals: Vec<_> = idents
                .iter()
                .map(|ident| format_ident!("__field_{}", ident))
                .collect();
            let fallbacks: Vec<TokenStream> = names
                .iter()
                .zip(&attrs)
                .map(|(name, attr)| {
                    if attr.default {
                        quote!(::core::default::Default::default())
                    } else {
                        quote!(return Err(jam_codec::Error::MissingField(#name)))
                    }
                })
                .collect();

            quote! {
                fn to_json(&self) -> jam_codec::serde_json::Value {
                    let mut __object = jam_codec::serde_json::Map::new();
                    #(
                        __object.insert(
                            #names.to_owned(),
                            jam_codec::JsonCodable::to_json(&self.#idents),
                        );
                    )*
                    jam_codec::serde_json::Value::Object(__object)
                }

                fn from_json(
                    value: &jam_codec::serde_json::Value,
                ) -> ::core::result::Result<Self, jam_codec::Error> {
                    let __object = value.as_object().ok_or(jam_codec::Error::TypeMismatch {
                        expected: "object",
                    })?;
                    #(
                        let #locals: #types = match __object.get(#names) {
                            Some(__item) => jam_codec::JsonCodable::from_json(__item)?,
                            None => #fallbacks,
                        };
                    )*
                    Ok(Self { #(#idents: #locals),* })
                }
            }
        }
        syn::Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            let ty = &fields.unnamed[0].ty;
            quote! {
                fn to_json(&self) -> jam_codec::serde_json::Value {
                    jam_codec::JsonCodable::to_json(&self.0)
                }

                fn from_json(
                    value: &jam_codec::serde_json::Value,
                ) -> ::core::result::Result<Self, jam_codec::Error> {
                    <#ty as jam_codec::JsonCodable>::from_json(value).map(Self)
                }
            }
        }
        syn::Fields::Unnamed(fields) => {
            let indices: Vec<syn::Index> =
                (0..fields.unnamed.len()).map(syn::Index::from).collect();
            let count = fields.unnamed.len();
            let types: Vec<_> = fields.unnamed.iter().map(|field| field.ty.clone()).collect();
            let positions: Vec<usize> = (0..count).collect();
            let locals: Vec<_> = positions
                .iter()
                .map(|index| format_ident!("__field_{}", index))
                .collect();

            quote! {
                fn to_json(&self) -> jam_codec::serde_json::Value {
                    jam_codec::serde_json::Value::Array(vec![
                        #( jam_codec::JsonCodable::to_json(&self.#indices) ),*
                    ])
                }

                fn from_json(
                    value: &jam_codec::serde_json::Value,
                ) -> ::core::result::Result<Self, jam_codec::Error> {
                    let __items = value.as_array().ok_or(jam_codec::Error::TypeMismatch {
                        expected: "array",
                    })?;
                    if __items.len() != #count {
                        return Err(jam_codec::Error::Range(format!(
                            "expected {} element(s), got {}",
                            #count,
                            __items.len()
                        )));
                    }
                    #(
                        let #locals: #types =
                            jam_codec::JsonCodable::from_json(&__items[#positions])?;
                    )*
                    Ok(Self( #(#locals),* ))
                }
            }
        }
        syn::Fields::Unit => quote! {
            fn to_json(&self) -> jam_codec::serde_json::Value {
                jam_codec::serde_json::Value::Null
            }

            fn from_json(
                value: &jam_codec::serde_json::Value,
            ) -> ::core::result::Result<Self, jam_codec::Error> {
                match value {
                    jam_codec::serde_json::Value::Null => Ok(Self),
                    _ => Err(jam_codec::Error::TypeMismatch { expected: "null" }),
                }
            }
        },
    };

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics jam_codec::JsonCodable for #ident #ty_generics #where_clause {
            #body
        }
    })
}
