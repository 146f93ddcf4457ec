use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::DeriveInput;

use crate::util;

fn is_enumeration(data: &syn::DataEnum) -> bool {
    data.variants
        .iter()
        .all(|variant| matches!(variant.fields, syn::Fields::Unit))
}

fn unsuffixed(value: u64) -> syn::LitInt {
    syn::LitInt::new(&value.to_string(), Span::call_site())
}

fn u8_lit(value: usize) -> syn::LitInt {
    syn::LitInt::new(&format!("{}u8", value), Span::call_site())
}

fn u64_lit(value: u64) -> syn::LitInt {
    syn::LitInt::new(&format!("{}u64", value), Span::call_site())
}

/// Per-variant shape shared by the wire and JSON expansions.
struct Branch {
    ident: syn::Ident,
    pattern: TokenStream,
    bindings: Vec<syn::Ident>,
    types: Vec<syn::Type>,
    constructor: TokenStream,
    fields: syn::Fields,
}

fn branches(data: &syn::DataEnum) -> Vec<Branch> {
    data.variants
        .iter()
        .map(|variant| {
            let ident = variant.ident.clone();
            match &variant.fields {
                syn::Fields::Unit => Branch {
                    pattern: quote!(Self::#ident),
                    bindings: Vec::new(),
                    types: Vec::new(),
                    constructor: quote!(Self::#ident),
                    fields: variant.fields.clone(),
                    ident,
                },
                syn::Fields::Unnamed(fields) => {
                    let bindings: Vec<_> = (0..fields.unnamed.len())
                        .map(|index| format_ident!("__b{}", index))
                        .collect();
                    let types = fields.unnamed.iter().map(|field| field.ty.clone()).collect();
                    Branch {
                        pattern: quote!(Self::#ident( #(#bindings),* )),
                        constructor: quote!(Self::#ident( #(#bindings),* )),
                        bindings,
                        types,
                        fields: variant.fields.clone(),
                        ident,
                    }
                }
                syn::Fields::Named(fields) => {
                    let names: Vec<_> = fields
                        .named
                        .iter()
                        .map(|field| field.ident.clone().expect("named field"))
                        .collect();
                    let bindings: Vec<_> = names
                        .iter()
                        .map(|name| format_ident!("__b_{}", name))
                        .collect();
                    let types = fields.named.iter().map(|field| field.ty.clone()).collect();
                    Branch {
                        pattern: quote!(Self::#ident { #(#names: #bindings),* }),
                        constructor: quote!(Self::#ident { #(#names: #bindings),* }),
                        bindings,
                        types,
                        fields: variant.fields.clone(),
                        ident,
                    }
                }
            }
        })
        .collect()
}

pub(crate) fn expand_codable(
    input: &DeriveInput,
    data: &syn::DataEnum,
) -> Result<TokenStream, syn::Error> {
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "cannot derive Codable for an empty enum",
        ));
    }
    if is_enumeration(data) {
        enumeration_codable(input, data)
    } else {
        choice_codable(input, data)
    }
}

/// Enumeration wire form: a varint of the variant's integer discriminant.
fn enumeration_codable(
    input: &DeriveInput,
    data: &syn::DataEnum,
) -> Result<TokenStream, syn::Error> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause = util::where_with_bound(&input.generics, quote!(jam_codec::Codable));

    let idents: Vec<_> = data.variants.iter().map(|v| v.ident.clone()).collect();
    let discriminants: Vec<syn::LitInt> = util::variant_discriminants(data)?
        .into_iter()
        .map(unsuffixed)
        .collect();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics jam_codec::Codable for #ident #ty_generics #where_clause {
            fn encode_size(&self) -> usize {
                jam_codec::varint::size(match self { #( Self::#idents => #discriminants, )* })
            }

            fn encode_into(
                &self,
                buf: &mut [u8],
                offset: usize,
            ) -> ::core::result::Result<usize, jam_codec::Error> {
                jam_codec::varint::encode_into(
                    match self { #( Self::#idents => #discriminants, )* },
                    buf,
                    offset,
                )
            }

            fn decode_from(
                buf: &[u8],
                offset: usize,
            ) -> ::core::result::Result<(Self, usize), jam_codec::Error> {
                let (__value, __read) = jam_codec::varint::decode_from(buf, offset)?;
                let __variant = match __value {
                    #( #discriminants => Self::#idents, )*
                    __other => {
                        return Err(jam_codec::Error::InvalidVariant(format!(
                            "discriminant {} at offset {}",
                            __other, offset
                        )))
                    }
                };
                Ok((__variant, __read))
            }
        }
    })
}

/// Choice wire form: a discriminant tag (one octet up to 256 branches,
/// varint beyond) followed by the branch encoding.
fn choice_codable(input: &DeriveInput, data: &syn::DataEnum) -> Result<TokenStream, syn::Error> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause = util::where_with_bound(&input.generics, quote!(jam_codec::Codable));

    let branches = branches(data);
    let wide_tag = branches.len() > 256;

    let size_arms = branches.iter().enumerate().map(|(index, branch)| {
        let pattern = &branch.pattern;
        let bindings = &branch.bindings;
        let tag_size = if wide_tag {
            let index = u64_lit(index as u64);
            quote!(jam_codec::varint::size(#index))
        } else {
            quote!(1usize)
        };
        quote! {
            #pattern => #tag_size #( + jam_codec::Codable::encode_size(#bindings) )*,
        }
    });

    let encode_arms = branches.iter().enumerate().map(|(index, branch)| {
        let pattern = &branch.pattern;
        let bindings = &branch.bindings;
        let write_tag = if wide_tag {
            let index = u64_lit(index as u64);
            quote!(__cur += jam_codec::varint::encode_into(#index, buf, __cur)?;)
        } else {
            let index = u8_lit(index);
            quote!(__cur += jam_codec::Codable::encode_into(&#index, buf, __cur)?;)
        };
        quote! {
            #pattern => {
                let mut __cur = offset;
                #write_tag
                #( __cur += jam_codec::Codable::encode_into(#bindings, buf, __cur)?; )*
                Ok(__cur - offset)
            }
        }
    });

    let read_tag = if wide_tag {
        quote! {
            let (__tag, __tag_read) = jam_codec::varint::decode_from(buf, offset)?;
        }
    } else {
        quote! {
            let (__tag, __tag_read) = <u8 as jam_codec::Codable>::decode_from(buf, offset)?;
            let __tag = __tag as u64;
        }
    };

    let decode_arms = branches.iter().enumerate().map(|(index, branch)| {
        let tag = u64_lit(index as u64);
        let bindings = &branch.bindings;
        let types = &branch.types;
        let constructor = &branch.constructor;
        quote! {
            #tag => {
                #(
                    let (#bindings, __read): (#types, usize) =
                        jam_codec::Codable::decode_from(buf, __cur)?;
                    __cur += __read;
                )*
                Ok((#constructor, __cur - offset))
            }
        }
    });

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics jam_codec::Codable for #ident #ty_generics #where_clause {
            fn encode_size(&self) -> usize {
                match self {
                    #(#size_arms)*
                }
            }

            fn encode_into(
                &self,
                buf: &mut [u8],
                offset: usize,
            ) -> ::core::result::Result<usize, jam_codec::Error> {
                match self {
                    #(#encode_arms)*
                }
            }

            fn decode_from(
                buf: &[u8],
                offset: usize,
            ) -> ::core::result::Result<(Self, usize), jam_codec::Error> {
                #read_tag
                let mut __cur = offset + __tag_read;
                match __tag {
                    #(#decode_arms)*
                    __other => Err(jam_codec::Error::InvalidVariant(format!(
                        "discriminant {} at offset {}",
                        __other, offset
                    ))),
                }
            }
        }
    })
}

pub(crate) fn expand_json(
    input: &DeriveInput,
    data: &syn::DataEnum,
) -> Result<TokenStream, syn::Error> {
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "cannot derive JsonCodable for an empty enum",
        ));
    }
    if is_enumeration(data) {
        enumeration_json(input, data)
    } else {
        choice_json(input, data)
    }
}

/// Enumeration JSON form: the variant name out; name or integer in.
fn enumeration_json(input: &DeriveInput, data: &syn::DataEnum) -> Result<TokenStream, syn::Error> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause = util::where_with_bound(&input.generics, quote!(jam_codec::JsonCodable));
    let container = util::parse_container_attr(input)?;
    let attrs = util::parse_variant_attrs(data.variants.iter())?;

    let idents: Vec<_> = data.variants.iter().map(|v| v.ident.clone()).collect();
    let names = idents
        .iter()
        .zip(&attrs)
        .map(|(ident, attr)| util::json_name(ident.to_string(), &attr.rename, &container, input))
        .collect::<Result<Vec<String>, syn::Error>>()?;
    let discriminants: Vec<syn::LitInt> = util::variant_discriminants(data)?
        .into_iter()
        .map(unsuffixed)
        .collect();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics jam_codec::JsonCodable for #ident #ty_generics #where_clause {
            fn to_json(&self) -> jam_codec::serde_json::Value {
                jam_codec::serde_json::Value::String(
                    match self { #( Self::#idents => #names, )* }.to_owned(),
                )
            }

            fn from_json(
                value: &jam_codec::serde_json::Value,
            ) -> ::core::result::Result<Self, jam_codec::Error> {
                match value {
                    jam_codec::serde_json::Value::String(__name) => match __name.as_str() {
                        #( #names => Ok(Self::#idents), )*
                        __other => Err(jam_codec::Error::InvalidVariant(format!(
                            "name `{}`",
                            __other
                        ))),
                    },
                    jam_codec::serde_json::Value::Number(_) => {
                        let __value = value.as_u64().ok_or(jam_codec::Error::TypeMismatch {
                            expected: "unsigned integer discriminant",
                        })?;
                        match __value {
                            #( #discriminants => Ok(Self::#idents), )*
                            __other => Err(jam_codec::Error::InvalidVariant(format!(
                                "discriminant {}",
                                __other
                            ))),
                        }
                    }
                    _ => Err(jam_codec::Error::TypeMismatch {
                        expected: "variant name or integer",
                    }),
                }
            }
        }
    })
}

/// Choice JSON form: a bare name string for unit branches, otherwise a
/// single-key object `{"<branchKey>": payload}`.
fn choice_json(input: &DeriveInput, data: &syn::DataEnum) -> Result<TokenStream, syn::Error> {
    let ident = &input.ident;
    let (impl_generics, ty_generics, _) = input.generics.split_for_impl();
    let where_clause = util::where_with_bound(&input.generics, quote!(jam_codec::JsonCodable));
    let container = util::parse_container_attr(input)?;
    let attrs = util::parse_variant_attrs(data.variants.iter())?;

    let branches = branches(data);
    let names = branches
        .iter()
        .zip(&attrs)
        .map(|(branch, attr)| {
            util::json_name(branch.ident.to_string(), &attr.rename, &container, input)
        })
        .collect::<Result<Vec<String>, syn::Error>>()?;

    let to_arms = branches.iter().zip(&names).map(|(branch, name)| {
        let pattern = &branch.pattern;
        let bindings = &branch.bindings;
        match &branch.fields {
            syn::Fields::Unit => quote! {
                #pattern => jam_codec::serde_json::Value::String(#name.to_owned()),
            },
            syn::Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                let binding = &bindings[0];
                quote! {
                    #pattern => {
                        let mut __object = jam_codec::serde_json::Map::new();
                        __object.insert(
                            #name.to_owned(),
                            jam_codec::JsonCodable::to_json(#binding),
                        );
                        jam_codec::serde_json::Value::Object(__object)
                    }
                }
            }
            syn::Fields::Unnamed(_) => quote! {
                #pattern => {
                    let mut __object = jam_codec::serde_json::Map::new();
                    __object.insert(
                        #name.to_owned(),
                        jam_codec::serde_json::Value::Array(vec![
                            #( jam_codec::JsonCodable::to_json(#bindings) ),*
                        ]),
                    );
                    jam_codec::serde_json::Value::Object(__object)
                }
            },
            syn::Fields::Named(fields) => {
                let field_names: Vec<String> = fields
                    .named
                    .iter()
                    .map(|field| field.ident.clone().expect("named field").to_string())
                    .collect();
                quote! {
                    #pattern => {
                        let mut __payload = jam_codec::serde_json::Map::new();
                        #(
                            __payload.insert(
                                #field_names.to_owned(),
                                jam_codec::JsonCodable::to_json(#bindings),
                            );
                        )*
                        let mut __object = jam_codec::serde_json::Map::new();
                        __object.insert(
                            #name.to_owned(),
                            jam_codec::serde_json::Value::Object(__payload),
                        );
                        jam_codec::serde_json::Value::Object(__object)
                    }
                }
            }
        }
    });

    let unit_name_arms = branches
        .iter()
        .zip(&names)
        .filter(|(branch, _)| matches!(branch.fields, syn::Fields::Unit))
        .map(|(branch, name)| {
            let constructor = &branch.constructor;
            quote! { #name => Ok(#constructor), }
        });

    let keyed_arms = branches.iter().zip(&names).map(|(branch, name)| {
        let bindings = &branch.bindings;
        let types = &branch.types;
        let constructor = &branch.constructor;
        match &branch.fields {
            syn::Fields::Unit => quote! {
                #name => match __payload {
                    jam_codec::serde_json::Value::Null => Ok(#constructor),
                    _ => Err(jam_codec::Error::TypeMismatch { expected: "null" }),
                },
            },
            syn::Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
                let ty = &types[0];
                let binding = &bindings[0];
                quote! {
                    #name => {
                        let #binding = <#ty as jam_codec::JsonCodable>::from_json(__payload)?;
                        Ok(#constructor)
                    }
                }
            }
            syn::Fields::Unnamed(fields) => {
                let count = fields.unnamed.len();
                let positions: Vec<usize> = (0..count).collect();
                quote! {
                    #name => {
                        let __items =
                            __payload.as_array().ok_or(jam_codec::Error::TypeMismatch {
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
                            let #bindings: #types =
                                jam_codec::JsonCodable::from_json(&__items[#positions])?;
                        )*
                        Ok(#constructor)
                    }
                }
            }
            syn::Fields::Named(fields) => {
                let field_names: Vec<String> = fields
                    .named
                    .iter()
                    .map(|field| field.ident.clone().expect("named field").to_string())
                    .collect();
                quote! {
                    #name => {
                        let __fields =
                            __payload.as_object().ok_or(jam_codec::Error::TypeMismatch {
                                expected: "object",
                            })?;
                        #(
                            let #bindings: #types = match __fields.get(#field_names) {
                                Some(__item) => jam_codec::JsonCodable::from_json(__item)?,
                                None => {
                                    return Err(jam_codec::Error::MissingField(#field_names))
                                }
                            };
                        )*
                        Ok(#constructor)
                    }
                }
            }
        }
    });

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics jam_codec::JsonCodable for #ident #ty_generics #where_clause {
            fn to_json(&self) -> jam_codec::serde_json::Value {
                match self {
                    #(#to_arms)*
                }
            }

            fn from_json(
                value: &jam_codec::serde_json::Value,
            ) -> ::core::result::Result<Self, jam_codec::Error> {
                match value {
                    jam_codec::serde_json::Value::String(__name) => match __name.as_str() {
                        #(#unit_name_arms)*
                        __other => Err(jam_codec::Error::InvalidVariant(format!(
                            "name `{}`",
                            __other
                        ))),
                    },
                    jam_codec::serde_json::Value::Object(__object) if __object.len() == 1 => {
                        let (__key, __payload) = match __object.iter().next() {
                            Some(__entry) => __entry,
                            None => {
                                return Err(jam_codec::Error::TypeMismatch {
                                    expected: "single-key object",
                                })
                            }
                        };
                        match __key.as_str() {
                            #(#keyed_arms)*
                            __other => Err(jam_codec::Error::InvalidVariant(format!(
                                "branch key `{}`",
                                __other
                            ))),
                        }
                    }
                    _ => Err(jam_codec::Error::TypeMismatch {
                        expected: "branch name or single-key object",
                    }),
                }
            }
        }
    })
}
