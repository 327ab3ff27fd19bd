//! Combining labels.
//!
//! The result is at least as restrictive as every input:
//! - the highest classification wins
//! - code words and foreign government markings are unioned
//! - the most restrictive releasability wins; two releasable-to lists intersect
//! - accountable material is kept if any input carries it
//!
//! Information management markers and special handling instructions describe the
//! provenance of one document and are not carried into the merged builder.
//! National markings merge as their scheme decides
//! ([`Scheme::merge_national_markings`]); their provenance fields are dropped too.
//!
//! The merged builder may be invalid. An intersection can leave a releasable-to
//! list with fewer than two nations, for example.

use crate::{Label, LabelBuilder, NationalMarkings, Releasability, Scheme};

/// Merges `labels` left to right. Returns `None` for an empty input.
///
/// ```rust
/// use protective_marking::{merge, schemes::Australia, LabelBuilder};
///
/// let a = LabelBuilder::<Australia>::new().protected().rel(["NZL"]).build().unwrap();
/// let b = LabelBuilder::<Australia>::new().secret().rel(["CAN"]).build().unwrap();
///
/// let merged = merge([&a, &b]).unwrap();
/// assert_eq!(merged.classification(), Some(b.classification()));
/// assert_eq!(merged.releasable_to().join("/"), "AUS");
/// assert!(!merged.is_valid());
/// ```
pub fn merge<'a, S, I>(labels: I) -> Option<LabelBuilder<S>>
where
    S: Scheme,
    I: IntoIterator<Item = &'a Label<S>>,
{
    let mut labels = labels.into_iter();
    let mut builder = seed(labels.next()?);
    for label in labels {
        merge_into(&mut builder, label);
    }
    Some(builder)
}

/// Merges two labels.
pub fn merge_pair<S: Scheme>(first: &Label<S>, second: &Label<S>) -> LabelBuilder<S> {
    let mut builder = seed(first);
    merge_into(&mut builder, second);
    builder
}

/// Merges `label` into an existing builder.
///
/// The builder's own information management markers and special handling are
/// left as they are; only `label`'s are ignored.
pub fn merge_into<S: Scheme>(builder: &mut LabelBuilder<S>, label: &Label<S>) {
    if builder
        .classification()
        .map_or(true, |existing| existing < label.classification())
    {
        builder.set_classification(label.classification());
    }
    S::merge_national_markings(builder, label);

    let Some(caveats) = label.security_caveats() else {
        return;
    };

    for code_word in caveats.code_words() {
        builder.add_code_word(code_word.as_str());
    }
    for marking in caveats.foreign_government_markings() {
        builder.add_foreign_government_marking(marking.as_str());
    }
    if caveats.accountable_material() {
        builder.set_accountable_material(true);
    }

    let Some(incoming) = caveats.releasability() else {
        return;
    };
    match builder.releasability() {
        None => {
            builder.releasability = Some(incoming.releasability());
            for nation in incoming.releasable_to().iter() {
                builder.add_releasable_to(nation);
            }
        }
        Some(existing) => {
            if incoming.releasability().is_more_restrictive_than(existing) {
                builder.set_releasability(incoming.releasability());
                if !incoming.releasability().is_releasable_to() {
                    builder.clear_releasable_to();
                }
            }
            let both_releasable_to = incoming.releasability().is_releasable_to()
                && builder.releasability().is_some_and(Releasability::is_releasable_to);
            if both_releasable_to {
                builder.releasable_to.retain_shared(incoming.releasable_to());
            }
        }
    }
}

fn seed<S: Scheme>(label: &Label<S>) -> LabelBuilder<S> {
    let mut builder = LabelBuilder::from_label(label);
    builder
        .clear_information_management_markers()
        .clear_special_handling();
    builder.national_markings.clear_provenance();
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        countries::{AUS, CAN, GBR, NZL, USA},
        schemes::{AusInstruction, AusReleasability, Australia, NewZealand},
        Classification,
    };

    type Aus = Classification<Australia>;

    fn builder() -> LabelBuilder<Australia> {
        LabelBuilder::new()
    }

    #[test]
    fn empty_input_yields_none() {
        let labels: Vec<Label<Australia>> = Vec::new();
        assert!(merge(&labels).is_none());
    }

    #[test]
    fn single_label_drops_provenance_only() {
        let label = builder()
            .secret()
            .add_code_word("AAA")
            .orcon()
            .rel([NZL])
            .legal_privilege()
            .build()
            .unwrap();
        let merged = merge([&label]).unwrap();
        assert_eq!(merged.classification(), Some(Aus::SECRET));
        assert_eq!(merged.code_words().len(), 1);
        assert_eq!(merged.releasable_to().len(), 2);
        assert!(!merged.has_special_handling());
        assert!(!merged.has_information_management_markers());
    }

    #[test]
    fn more_restrictive_releasability_wins() {
        let alpha = builder()
            .protected()
            .agao()
            .add_code_word("AAA")
            .build()
            .unwrap();
        let beta = builder()
            .secret()
            .rel([NZL])
            .add_foreign_government_marking("APPLE")
            .build()
            .unwrap();

        let merged = merge_pair(&alpha, &beta);
        assert_eq!(merged.classification(), Some(Aus::SECRET));
        assert_eq!(merged.releasability(), Some(AusReleasability::Agao));
        assert!(merged.releasable_to().is_empty());
        assert!(merged.code_words().contains("AAA"));
        assert!(merged.foreign_government_markings().contains("APPLE"));
        assert!(merged.is_valid());
    }

    #[test]
    fn eyes_only_replaces_releasable_to_in_builder() {
        let mut merged = builder();
        merged.secret().rel([NZL]);
        let austeo = builder().protected().austeo().build().unwrap();

        merge_into(&mut merged, &austeo);
        assert_eq!(merged.classification(), Some(Aus::SECRET));
        assert_eq!(merged.releasability(), Some(AusReleasability::Austeo));
        assert!(merged.releasable_to().is_empty());
    }

    #[test]
    fn releasable_to_lists_intersect() {
        let labels = [
            builder().protected().rel([NZL, GBR]).build().unwrap(),
            builder().protected().rel([NZL, CAN]).build().unwrap(),
            builder().secret().rel([USA]).build().unwrap(),
            builder().top_secret().rel([CAN, GBR, NZL, USA]).build().unwrap(),
        ];
        let merged = merge(&labels).unwrap();
        assert_eq!(merged.classification(), Some(Aus::TOP_SECRET));
        assert_eq!(merged.releasability(), Some(AusReleasability::Rel));
        assert_eq!(merged.releasable_to().join("/"), AUS);
        assert_eq!(
            merged.violations(),
            vec!["Releasable To List must have a minimum size of 2"]
        );
    }

    #[test]
    fn builder_without_releasability_adopts_incoming() {
        let mut merged = builder();
        merged.secret();
        let incoming = builder().secret().rel([CAN]).build().unwrap();

        merge_into(&mut merged, &incoming);
        assert_eq!(merged.releasability(), Some(AusReleasability::Rel));
        assert_eq!(merged.releasable_to().join("/"), "AUS/CAN");
    }

    #[test]
    fn label_without_releasability_keeps_existing() {
        let restricted = builder().secret().rel([NZL]).build().unwrap();
        let open = builder().protected().build().unwrap();
        assert_eq!(merge_pair(&restricted, &open), merge_pair(&open, &restricted));
    }

    #[test]
    fn builder_markers_survive_merge_into() {
        let mut merged = builder();
        merged.protected().legal_privilege().cabinet();
        let incoming = builder().secret().personal_privacy().orcon().build().unwrap();

        merge_into(&mut merged, &incoming);
        assert_eq!(merged.information_management_markers().len(), 1);
        assert_eq!(
            merged.special_handling_instruction(),
            Some(AusInstruction::Cabinet)
        );
    }

    #[test]
    fn merge_is_commutative_on_restrictive_fields() {
        let a = builder().protected().rel([NZL, GBR]).add_code_word("A").build().unwrap();
        let b = builder().secret().rel([NZL, CAN]).add_code_word("B").build().unwrap();
        assert_eq!(merge_pair(&a, &b), merge_pair(&b, &a));
    }

    #[test]
    fn accountable_material_is_kept() {
        let top_secret = LabelBuilder::<NewZealand>::new()
            .top_secret()
            .build()
            .unwrap();
        let restricted = LabelBuilder::<NewZealand>::new()
            .restricted()
            .build()
            .unwrap();
        let merged = merge_pair(&restricted, &top_secret);
        assert!(merged.accountable_material());
        assert!(merged.is_valid());
    }
}
