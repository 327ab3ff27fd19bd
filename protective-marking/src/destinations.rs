//! Releasable-to destination lists and the nation ordering applied to them.

use std::{cmp::Ordering, collections::BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{config::ReleasabilityOrder, SchemeProfile};

/// ISO 3166-1 alpha-3 trigraphs used by the built-in schemes.
pub mod countries {
    pub const AUS: &str = "AUS";
    pub const CAN: &str = "CAN";
    pub const GBR: &str = "GBR";
    pub const NZL: &str = "NZL";
    pub const USA: &str = "USA";

    /// The five-eyes alliance, sorted.
    pub const FIVE_EYES: &[&str] = &[AUS, CAN, GBR, NZL, USA];
}

/// Comparator for destination trigraphs.
#[derive(Clone, Copy, Debug)]
pub struct NationOrder {
    order: ReleasabilityOrder,
    home: &'static str,
    alliance: &'static [&'static str],
}

impl NationOrder {
    pub fn new(
        order: ReleasabilityOrder,
        home: &'static str,
        alliance: &'static [&'static str],
    ) -> Self {
        Self {
            order,
            home,
            alliance,
        }
    }

    pub fn for_profile(order: ReleasabilityOrder, profile: &'static SchemeProfile) -> Self {
        Self::new(order, profile.home_nation, profile.alliance)
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self.order {
            ReleasabilityOrder::HomeFirst => {
                (a != self.home, a).cmp(&(b != self.home, b))
            }
            ReleasabilityOrder::AllianceFirst => {
                let outside = |nation: &str| !self.alliance.iter().any(|member| *member == nation);
                (outside(a), a).cmp(&(outside(b), b))
            }
        }
    }
}

/// A duplicate-free list of destination trigraphs, kept sorted by a [`NationOrder`].
///
/// Equality compares membership only, so two lists sorted under different orders
/// are equal when they hold the same nations.
///
/// Serializes as a plain array. Deserializing drops duplicates and sorts
/// lexicographically, since no [`NationOrder`] is at hand; call
/// [`DestinationList::sort`] to apply one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(into = "Vec<String>", from = "Vec<String>")]
pub struct DestinationList {
    nations: Vec<String>,
}

impl DestinationList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a nation, returning false if it was already present.
    pub fn insert(&mut self, nation: impl Into<String>, order: &NationOrder) -> bool {
        let nation = nation.into();
        if self.contains(&nation) {
            return false;
        }
        self.nations.push(nation);
        self.sort(order);
        true
    }

    pub fn remove(&mut self, nation: &str) -> bool {
        let before = self.nations.len();
        self.nations.retain(|existing| existing != nation);
        self.nations.len() != before
    }

    pub fn contains(&self, nation: &str) -> bool {
        self.nations.iter().any(|existing| existing == nation)
    }

    pub fn len(&self) -> usize {
        self.nations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nations.is_empty()
    }

    pub fn clear(&mut self) {
        self.nations.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.nations.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.nations
    }

    /// Keeps only nations also present in `other`.
    pub fn retain_shared(&mut self, other: &Self) {
        self.nations.retain(|nation| other.contains(nation));
    }

    pub fn sort(&mut self, order: &NationOrder) {
        self.nations.sort_by(|a, b| order.compare(a, b));
    }

    pub fn join(&self, separator: &str) -> String {
        self.nations.join(separator)
    }

    fn members(&self) -> BTreeSet<&str> {
        self.iter().collect()
    }
}

impl PartialEq for DestinationList {
    fn eq(&self, other: &Self) -> bool {
        self.members() == other.members()
    }
}

impl Eq for DestinationList {}

impl From<Vec<String>> for DestinationList {
    fn from(mut nations: Vec<String>) -> Self {
        nations.sort();
        nations.dedup();
        Self { nations }
    }
}

impl From<DestinationList> for Vec<String> {
    fn from(list: DestinationList) -> Self {
        list.nations
    }
}

#[cfg(test)]
mod tests {
    use super::{countries::*, *};

    fn alliance_first() -> NationOrder {
        NationOrder::new(ReleasabilityOrder::AllianceFirst, AUS, FIVE_EYES)
    }

    fn home_first(home: &'static str) -> NationOrder {
        NationOrder::new(ReleasabilityOrder::HomeFirst, home, FIVE_EYES)
    }

    fn list(nations: &[&str], order: &NationOrder) -> DestinationList {
        let mut list = DestinationList::new();
        for nation in nations {
            list.insert(*nation, order);
        }
        list
    }

    #[test]
    fn alliance_first_puts_five_eyes_ahead() {
        let order = alliance_first();
        let list = list(&["FRA", USA, "DEU", NZL, AUS], &order);
        assert_eq!(list.join("/"), "AUS/NZL/USA/DEU/FRA");
    }

    #[test]
    fn home_first_puts_home_then_lexicographic() {
        let order = home_first(NZL);
        let list = list(&["FRA", USA, AUS, NZL], &order);
        assert_eq!(list.join(", "), "NZL, AUS, FRA, USA");
    }

    #[test]
    fn duplicates_are_ignored() {
        let order = alliance_first();
        let mut list = DestinationList::new();
        assert!(list.insert(AUS, &order));
        assert!(!list.insert(AUS, &order));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn equality_ignores_order() {
        let a = list(&[AUS, "FRA", NZL], &alliance_first());
        let b = list(&[AUS, "FRA", NZL], &home_first(NZL));
        assert_ne!(a.as_slice(), b.as_slice());
        assert_eq!(a, b);
    }

    #[test]
    fn retain_shared_intersects() {
        let order = alliance_first();
        let mut a = list(&[AUS, NZL, GBR], &order);
        a.retain_shared(&list(&[AUS, CAN, NZL], &order));
        assert_eq!(a.join("/"), "AUS/NZL");
    }

    #[test]
    fn decoding_drops_duplicates() {
        let decoded: DestinationList =
            serde_json::from_str(r#"["NZL", "AUS", "NZL", "FRA", "AUS"]"#).unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded.join("/"), "AUS/FRA/NZL");

        let mut decoded = decoded;
        decoded.sort(&home_first(NZL));
        assert_eq!(
            serde_json::to_value(&decoded).unwrap(),
            serde_json::json!(["NZL", "AUS", "FRA"])
        );
    }

    #[test]
    fn remove_reports_presence() {
        let order = alliance_first();
        let mut list = list(&[AUS, NZL], &order);
        assert!(list.remove(NZL));
        assert!(!list.remove(NZL));
        assert!(!list.contains(NZL));
    }
}
