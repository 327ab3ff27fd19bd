//! Enum-specific `Vocabulary` derivation.
//!
//! This module collects the canonical string of every variant, checks the strings
//! are unique, and emits the trait impl together with the string conversions.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{DataEnum, Result};

use crate::{crate_root, variant::parse_variant_text};

pub(crate) fn derive_enum(ident: &Ident, name: &str, data: DataEnum) -> Result<TokenStream> {
    let root = crate_root();
    let mut variants: Vec<Ident> = Vec::new();
    let mut texts: Vec<String> = Vec::new();

    for variant in &data.variants {
        let text = parse_variant_text(variant)?;
        if texts.contains(&text) {
            return Err(syn::Error::new(
                variant.ident.span(),
                format!("duplicate vocabulary string `{text}`"),
            ));
        }
        variants.push(variant.ident.clone());
        texts.push(text);
    }

    Ok(quote! {
        impl #root::Vocabulary for #ident {
            const NAME: &'static str = #name;
            const ALL: &'static [Self] = &[#(Self::#variants),*];

            fn as_str(self) -> &'static str {
                match self {
                    #(Self::#variants => #texts,)*
                }
            }
        }

        impl ::core::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(#root::Vocabulary::as_str(*self))
            }
        }

        impl ::core::str::FromStr for #ident {
            type Err = #root::Error;

            fn from_str(value: &str) -> ::core::result::Result<Self, Self::Err> {
                <Self as #root::Vocabulary>::from_vocabulary(value)
            }
        }

        impl<'a> ::core::convert::TryFrom<&'a str> for #ident {
            type Error = #root::Error;

            fn try_from(value: &'a str) -> ::core::result::Result<Self, Self::Error> {
                <Self as #root::Vocabulary>::from_vocabulary(value)
            }
        }

        impl ::core::convert::TryFrom<::std::string::String> for #ident {
            type Error = #root::Error;

            fn try_from(
                value: ::std::string::String,
            ) -> ::core::result::Result<Self, Self::Error> {
                <Self as #root::Vocabulary>::from_vocabulary(&value)
            }
        }

        impl ::core::convert::From<#ident> for ::std::string::String {
            fn from(value: #ident) -> Self {
                ::std::string::String::from(#root::Vocabulary::as_str(value))
            }
        }
    })
}
