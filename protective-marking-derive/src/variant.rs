//! Variant-level attribute parsing.
//!
//! A variant maps to exactly one canonical string: the literal in
//! `#[vocabulary("...")]`, or the variant identifier when no attribute is present.

use syn::{Fields, LitStr, Meta, Result, Variant};

pub(crate) fn parse_variant_text(variant: &Variant) -> Result<String> {
    if !matches!(variant.fields, Fields::Unit) {
        return Err(syn::Error::new_spanned(
            &variant.fields,
            "`Vocabulary` variants must not carry data",
        ));
    }

    let mut text: Option<LitStr> = None;
    for attr in &variant.attrs {
        if !attr.path().is_ident("vocabulary") {
            continue;
        }
        let Meta::List(_) = &attr.meta else {
            return Err(syn::Error::new_spanned(
                &attr.meta,
                "expected `#[vocabulary(\"...\")]` on the variant",
            ));
        };
        let lit: LitStr = attr.parse_args()?;
        if lit.value().trim().is_empty() {
            return Err(syn::Error::new_spanned(
                &lit,
                "vocabulary string must not be blank",
            ));
        }
        if text.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "duplicate `#[vocabulary]` attribute on variant",
            ));
        }
        text = Some(lit);
    }

    Ok(text.map_or_else(|| variant.ident.to_string(), |lit| lit.value()))
}
