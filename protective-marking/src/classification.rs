//! Classification levels.
//!
//! A classification is a rung on a scheme's ladder. Equality and ordering use the
//! rank only; the display name is resolved through the active configuration,
//! which selects either the production or the development name table.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    config::{self, Config},
    Error, Scheme,
};

const VOCABULARY: &str = "Classification";

/// A rung on the classification ladder of scheme `S`.
///
/// ```rust
/// use protective_marking::{schemes::Australia, Classification};
///
/// let protected = Classification::<Australia>::PROTECTED;
/// assert!(protected > Classification::<Australia>::OFFICIAL_SENSITIVE);
/// assert!(protected.permits_caveats());
/// assert_eq!(protected.production_name(), "PROTECTED");
/// ```
pub struct Classification<S> {
    rank: u8,
    scheme: PhantomData<fn() -> S>,
}

impl<S: Scheme> Classification<S> {
    pub(crate) const fn at(rank: u8) -> Self {
        Self {
            rank,
            scheme: PhantomData,
        }
    }

    /// Returns the rung at `rank`, or `None` past the top of the ladder.
    pub fn from_rank(rank: u8) -> Option<Self> {
        (usize::from(rank) < S::profile().classifications.len()).then(|| Self::at(rank))
    }

    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Every rung, lowest first.
    pub fn all() -> impl Iterator<Item = Self> {
        let len = u8::try_from(S::profile().classifications.len()).unwrap_or(u8::MAX);
        (0..len).map(Self::at)
    }

    /// The lowest rung at which caveats may be applied.
    pub fn caveat_floor() -> Self {
        Self::at(S::profile().caveat_floor)
    }

    pub fn permits_caveats(self) -> bool {
        self.rank >= S::profile().caveat_floor
    }

    /// Returns true if labels at this rung must confirm accountable material.
    pub fn requires_accountable_material(self) -> bool {
        S::profile().accountable_rung == Some(self.rank)
    }

    pub fn production_name(self) -> &'static str {
        S::profile()
            .classifications
            .get(usize::from(self.rank))
            .copied()
            .unwrap_or_default()
    }

    /// Display name under the active configuration.
    pub fn name(self) -> String {
        self.name_in(&config::current())
    }

    pub fn name_in(self, config: &Config) -> String {
        config
            .classification_names(S::profile())
            .into_iter()
            .nth(usize::from(self.rank))
            .unwrap_or_default()
    }

    /// Resolves a display name against `config`'s active name table.
    ///
    /// Names from the inactive table are rejected.
    pub fn from_name_in(name: &str, config: &Config) -> Result<Self, Error> {
        config
            .classification_names(S::profile())
            .iter()
            .position(|candidate| candidate == name)
            .and_then(|index| u8::try_from(index).ok())
            .map(Self::at)
            .ok_or_else(|| Error::InvalidVocabulary {
                vocabulary: VOCABULARY,
                value: name.to_owned(),
            })
    }

    /// Returns true if `name` is in the active name table.
    pub fn is_str(name: &str) -> bool {
        Self::from_name_in(name, &config::current()).is_ok()
    }
}

impl<S> Clone for Classification<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Classification<S> {}

impl<S> PartialEq for Classification<S> {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl<S> Eq for Classification<S> {}

impl<S> PartialOrd for Classification<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Classification<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl<S> Hash for Classification<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank.hash(state);
    }
}

impl<S: Scheme> fmt::Debug for Classification<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Classification")
            .field(&self.production_name())
            .finish()
    }
}

impl<S: Scheme> fmt::Display for Classification<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl<S: Scheme> FromStr for Classification<S> {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_name_in(name, &config::current())
    }
}

impl<S: Scheme> Serialize for Classification<S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de, S: Scheme> Deserialize<'de> for Classification<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}
