//! Derive macros for `protective-marking`.
//!
//! This crate generates the string mapping behind `#[derive(Vocabulary)]`. It:
//! - reads `#[vocabulary(...)]` container and variant attributes
//! - emits a `Vocabulary` implementation plus the string conversions built on it
//!
//! It does **not** define schemes, labels or validation rules. Those live in the
//! main `protective-marking` crate.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_enum;
mod variant;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;

/// Derives `protective_marking::Vocabulary` for a fieldless enum.
///
/// # Container Attributes
///
/// - `#[vocabulary(name = "Special Handling Instruction")]` - The human readable name of the
///   vocabulary, used in `InvalidVocabulary` errors. Defaults to the enum identifier.
///
/// # Variant Attributes
///
/// - `#[vocabulary("DELICATE-SOURCE")]` - The canonical string for the variant. Defaults to the
///   variant identifier.
///
/// Structs, unions, generic enums, variants carrying data and duplicate strings are rejected at
/// compile time.
///
/// # Additional Generated Impls
///
/// - `Display`, writing the canonical string.
/// - `FromStr`, `TryFrom<&str>` and `TryFrom<String>`, failing with
///   `protective_marking::Error::InvalidVocabulary`.
/// - `From<Enum> for String`, so the enum can be used with
///   `#[serde(into = "String", try_from = "String")]`.
#[proc_macro_derive(Vocabulary, attributes(vocabulary))]
pub fn derive_vocabulary(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the protective-marking crate root.
///
/// Handles crate renaming (e.g., `marking = { package = "protective-marking", ... }`)
/// and internal usage (when the derive is used inside the crate itself).
fn crate_root() -> TokenStream {
    match crate_name("protective-marking") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::protective_marking },
    }
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    if !generics.params.is_empty() || generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(
            &generics,
            "`Vocabulary` cannot be derived for generic enums",
        ));
    }

    let ContainerOptions { name } = parse_container_options(&attrs)?;
    let name = name.unwrap_or_else(|| ident.to_string());

    match data {
        Data::Enum(data) => derive_enum(&ident, &name, data),
        Data::Struct(s) => Err(syn::Error::new(
            s.struct_token.span(),
            "`Vocabulary` can only be derived for enums",
        )),
        Data::Union(u) => Err(syn::Error::new(
            u.union_token.span(),
            "`Vocabulary` cannot be derived for unions",
        )),
    }
}
