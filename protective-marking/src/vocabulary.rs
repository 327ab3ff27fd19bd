//! Closed string vocabularies.
//!
//! Every enumerated value that appears on a label (releasability types, special
//! handling instructions, information management types) maps to exactly one
//! canonical string. Implement this trait with `#[derive(Vocabulary)]`.

use std::{fmt, hash::Hash};

use serde::{de::DeserializeOwned, Serialize};

use crate::Error;

/// A fieldless enum with one canonical string per variant.
///
/// ```rust
/// use protective_marking::{schemes::AusReleasability, Vocabulary};
///
/// assert_eq!(AusReleasability::Austeo.as_str(), "AUSTEO");
/// assert_eq!(AusReleasability::from_vocabulary("REL").unwrap(), AusReleasability::Rel);
/// assert!(!AusReleasability::is_vocabulary("NOFORN"));
/// ```
pub trait Vocabulary:
    Copy
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + fmt::Display
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Human readable name of the vocabulary, used in error messages.
    const NAME: &'static str;
    /// Every value, in declaration order.
    const ALL: &'static [Self];

    /// The canonical string for this value.
    fn as_str(self) -> &'static str;

    /// Looks up a value by its canonical string.
    fn from_vocabulary(value: &str) -> Result<Self, Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|candidate| candidate.as_str() == value)
            .ok_or_else(|| Error::InvalidVocabulary {
                vocabulary: Self::NAME,
                value: value.to_owned(),
            })
    }

    /// Returns true if `value` is the canonical string of some value.
    fn is_vocabulary(value: &str) -> bool {
        Self::ALL.iter().any(|candidate| candidate.as_str() == value)
    }
}
