//! The seam between the generic label engine and a national marking scheme.
//!
//! A scheme is a zero-sized marker type. It exists only at the type level so the
//! same builder, validator and merge code can serve every national variant
//! without storing any runtime data.

use std::{fmt, hash::Hash};

use serde::{de::DeserializeOwned, Serialize};

use crate::{DestinationList, Label, LabelBuilder, Vocabulary};

/// Static description of a national marking scheme.
#[derive(Debug)]
pub struct SchemeProfile {
    /// Short lowercase key, used for configuration lookups (`aus`, `nzl`).
    pub key: &'static str,
    /// Trigraph of the nation that owns the scheme.
    pub home_nation: &'static str,
    /// Trigraphs sorted ahead of everything else under alliance-first ordering.
    pub alliance: &'static [&'static str],
    /// Production display names, lowest rung first.
    pub classifications: &'static [&'static str],
    /// Default development display names, parallel to `classifications`.
    pub development_classifications: &'static [&'static str],
    /// Rank of the lowest rung at which caveats may be applied.
    pub caveat_floor: u8,
    /// Rank of the rung that must be confirmed as accountable material, if any.
    pub accountable_rung: Option<u8>,
    /// Text placed between destinations when rendering a releasable-to list.
    pub destination_separator: &'static str,
}

/// Releasability types of a scheme.
///
/// Exactly one type is the releasable-to form that carries a destination list;
/// all others are eyes-only style restrictions with an empty list.
pub trait Releasability: Vocabulary {
    /// The releasable-to variant.
    const RELEASABLE_TO: Self;

    /// Restrictiveness rank. Lower is more restrictive.
    fn restriction(self) -> u8;

    fn is_releasable_to(self) -> bool {
        self == Self::RELEASABLE_TO
    }

    /// Returns true if `self` is strictly more restrictive than `other`.
    fn is_more_restrictive_than(self, other: Self) -> bool {
        self.restriction() < other.restriction()
    }
}

/// Special handling instructions of a scheme.
pub trait HandlingInstruction: Vocabulary {
    /// Returns true for the instruction that names an addressee (EXCLUSIVE-FOR).
    fn requires_addressee(self) -> bool;
}

/// Markings one scheme carries beyond the shared caveats.
///
/// Builders and labels hold one value of this type. Schemes without extra
/// markings use `()`.
pub trait NationalMarkings:
    Clone + fmt::Debug + Default + Eq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    fn is_empty(&self) -> bool;

    /// Returns true if a populated field counts as a security caveat, and so is
    /// subject to the caveat floor.
    fn has_security_caveats(&self) -> bool {
        false
    }

    /// Drops the fields that describe one document only. Called on the first
    /// label of a merge.
    fn clear_provenance(&mut self) {}
}

impl NationalMarkings for () {
    fn is_empty(&self) -> bool {
        true
    }
}

/// A national protective marking scheme.
///
/// The provided methods are the points where a scheme departs from the shared
/// rules. Each default implements the shared behaviour.
///
/// ```rust
/// use protective_marking::{schemes::Australia, Scheme};
///
/// assert_eq!(Australia::profile().home_nation, "AUS");
/// ```
pub trait Scheme:
    Copy + Eq + Ord + Hash + fmt::Debug + Default + Send + Sync + 'static
{
    type Releasability: Releasability;
    type Instruction: HandlingInstruction;
    type NationalMarkings: NationalMarkings;

    fn profile() -> &'static SchemeProfile;

    /// Appends violations of the scheme's own rules. Runs after the information
    /// management rules and before the caveat floor.
    fn check_national_markings(builder: &LabelBuilder<Self>, report: &mut Vec<String>) {
        let _ = (builder, report);
    }

    /// Appends violations for a releasable-to destination list.
    fn check_releasable_to(releasable_to: &DestinationList, report: &mut Vec<String>) {
        let home = Self::profile().home_nation;
        if !releasable_to.contains(home) {
            report.push(format!("Releasable To Lists must contain `{home}`"));
        }
        if releasable_to.len() < 2 {
            report.push("Releasable To List must have a minimum size of 2".to_owned());
        }
    }

    /// Folds `label`'s national markings into a merge. The classification has
    /// already been raised when this runs.
    fn merge_national_markings(builder: &mut LabelBuilder<Self>, label: &Label<Self>) {
        let _ = (builder, label);
    }

    /// Renders a label. The default writes the classification, the caveats and
    /// then the information management markers, separated by spaces.
    fn fmt_label(label: &Label<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        label.fmt_spaced(f)
    }
}
