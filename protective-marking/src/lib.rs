//! Security classification labels with caveats, validation and merging.
//!
//! This crate models protective markings:
//! - **Classification**: a rung on a scheme's ladder, e.g. `PROTECTED` or `SECRET`.
//! - **Caveats**: code words, foreign government markings, special handling and
//!   releasability, legal only at or above the scheme's caveat floor.
//! - **Information management markers**: provenance tags such as `Legal Privilege`.
//!
//! Labels are assembled with a [`LabelBuilder`], checked by the validator, and
//! frozen into an immutable [`Label`]. Several labels can be combined with
//! [`merge`] into a builder at least as restrictive as every input.
//!
//! Key rules:
//! - Builder setters never fail; [`LabelBuilder::violations`] reports every
//!   problem at once, in a fixed order.
//! - [`LabelBuilder::build`] fails with [`Error::InvalidLabelState`] carrying the
//!   full report.
//! - A merged builder is not guaranteed to be valid.
//!
//! National variants are expressed as [`Scheme`] marker types; see
//! [`schemes::Australia`], [`schemes::NewZealand`] and
//! [`schemes::UnitedKingdom`]. Markings that only one scheme has, such as New
//! Zealand's policy and privacy endorsements, travel in the scheme's
//! [`NationalMarkings`].
//!
//! What this crate does not do:
//! - parse free-text markings
//! - persist labels (they serialize with `serde`, storage is up to you)
//!
//! The `Vocabulary` derive macro lives in `protective-marking-derive` and is
//! re-exported here.

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
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::struct_excessive_bools,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else,
    clippy::return_self_not_must_use
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use protective_marking_derive::Vocabulary;

mod builder;
mod classification;
pub mod config;
mod destinations;
mod error;
mod merge;
mod model;
mod scheme;
pub mod schemes;
pub mod slog;
mod validate;
mod vocabulary;

pub use builder::LabelBuilder;
pub use classification::Classification;
pub use destinations::{countries, DestinationList, NationOrder};
pub use error::Error;
pub use merge::{merge, merge_into, merge_pair};
pub use model::{
    InformationManagementMarker, InformationManagementType, Label, ReleasabilityCaveat,
    SecurityCaveats, SpecialHandlingCaveat,
};
pub use scheme::{HandlingInstruction, NationalMarkings, Releasability, Scheme, SchemeProfile};
pub use validate::violations;
pub use vocabulary::Vocabulary;
