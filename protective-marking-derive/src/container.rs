//! Container-level attribute parsing for `#[derive(Vocabulary)]`.
//!
//! This module handles attributes on the enum itself, not on variants.

use syn::{Attribute, LitStr, Meta, Result};

/// Options parsed from container-level `#[vocabulary(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Human readable vocabulary name, if given.
    pub(crate) name: Option<String>,
}

/// Parses container-level `#[vocabulary(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("vocabulary") {
            continue;
        }

        match &attr.meta {
            Meta::List(list) => {
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("name") {
                        let value: LitStr = meta.value()?.parse()?;
                        if value.value().trim().is_empty() {
                            return Err(syn::Error::new_spanned(
                                &value,
                                "vocabulary name must not be blank",
                            ));
                        }
                        if options.name.is_some() {
                            return Err(meta.error("duplicate vocabulary `name`"));
                        }
                        options.name = Some(value.value());
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `name`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::Path(_) | Meta::NameValue(_) => {
                return Err(syn::Error::new_spanned(
                    &attr.meta,
                    "expected `#[vocabulary(name = \"...\")]` on the enum",
                ));
            }
        }
    }

    Ok(options)
}
