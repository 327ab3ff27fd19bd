//! Integration tests for merging labels.
//!
//! These tests verify that:
//! - the merged builder is at least as restrictive as every input
//! - an intersection that empties a releasable-to list is left for the caller to fix
//! - merged builders can be edited and built into new labels

use std::collections::BTreeSet;

use protective_marking::{
    countries::{CAN, GBR, NZL, USA},
    merge, merge_into, merge_pair,
    schemes::{uk::REL_EU, AusReleasability, Australia, NewZealand, UnitedKingdom},
    Classification, DestinationList, Label, LabelBuilder, NationalMarkings,
};

fn aus() -> LabelBuilder<Australia> {
    LabelBuilder::new()
}

type RestrictiveFields = (
    Option<Classification<Australia>>,
    BTreeSet<String>,
    BTreeSet<String>,
    Option<AusReleasability>,
    DestinationList,
);

fn restrictive_fields(builder: &LabelBuilder<Australia>) -> RestrictiveFields {
    (
        builder.classification(),
        builder.code_words(),
        builder.foreign_government_markings(),
        builder.releasability(),
        builder.releasable_to(),
    )
}

#[test]
fn test_intersection_below_two_nations_needs_editing() {
    let a = aus().protected().rel([NZL]).build().unwrap();
    let b = aus().secret().rel([CAN]).build().unwrap();

    let mut merged = merge_pair(&a, &b);
    assert_eq!(
        merged.classification(),
        Some(Classification::<Australia>::SECRET)
    );
    assert_eq!(merged.releasability(), Some(AusReleasability::Rel));
    assert_eq!(merged.releasable_to().join("/"), "AUS");
    assert_eq!(
        merged.violations(),
        vec!["Releasable To List must have a minimum size of 2"]
    );

    merged.add_releasable_to(GBR);
    let label = merged.build().unwrap();
    assert_eq!(label.to_string(), "Development SECRET REL AUS/GBR");
}

#[test]
fn test_eyes_only_beats_releasable_to() {
    let a = aus().secret().rel([USA, GBR]).build().unwrap();
    let b = aus().protected().austeo().build().unwrap();

    for merged in [merge_pair(&a, &b), merge_pair(&b, &a)] {
        assert_eq!(merged.releasability(), Some(AusReleasability::Austeo));
        assert!(merged.releasable_to().is_empty());
        assert!(merged.is_valid());
    }
}

#[test]
fn test_caveats_are_unioned() {
    let labels = [
        aus().protected().add_code_word("AAA").build().unwrap(),
        aus()
            .secret()
            .add_code_word("BBB")
            .add_foreign_government_marking("APPLE")
            .build()
            .unwrap(),
        aus().official().build().unwrap(),
    ];

    let merged = merge(&labels).unwrap();
    let label = merged.build().unwrap();
    assert_eq!(label.to_string(), "Development SECRET AAA BBB APPLE");
}

#[test]
fn test_provenance_is_not_carried() {
    let a = aus()
        .protected()
        .exclusive_for("Minister")
        .legal_privilege()
        .build()
        .unwrap();
    let b = aus().protected().personal_privacy().build().unwrap();

    let merged = merge_pair(&a, &b);
    assert!(!merged.has_special_handling());
    assert!(!merged.has_information_management_markers());
    assert_eq!(
        merged.build().unwrap().to_string(),
        "Development PROTECTED"
    );
}

#[test]
fn test_merge_into_accumulates() {
    let inputs: Vec<Label<Australia>> = vec![
        aus().protected().rel([NZL, USA, CAN]).build().unwrap(),
        aus().protected().rel([NZL, USA]).build().unwrap(),
        aus().top_secret().rel([USA, GBR]).build().unwrap(),
    ];

    let mut builder = aus();
    for label in &inputs {
        merge_into(&mut builder, label);
    }
    assert_eq!(
        builder.classification(),
        Some(Classification::<Australia>::TOP_SECRET)
    );
    assert_eq!(builder.releasable_to().join("/"), "AUS/USA");
    assert!(builder.is_valid());
}

#[test]
fn test_merge_is_order_independent_for_classification() {
    let low = aus().official().build().unwrap();
    let high = aus().secret().agao().build().unwrap();

    let forward = merge([&low, &high]).unwrap();
    let backward = merge([&high, &low]).unwrap();
    assert_eq!(forward.classification(), backward.classification());
    assert_eq!(forward.releasability(), backward.releasability());
}

// ============================================================================
// Algebraic properties
// ============================================================================

#[test]
fn test_merging_a_label_with_itself_keeps_its_caveats() {
    let labels = [
        aus()
            .secret()
            .add_code_word("AAA")
            .add_foreign_government_marking("APPLE")
            .exclusive_for("Minister")
            .rel([NZL, USA])
            .legal_privilege()
            .build()
            .unwrap(),
        aus().protected().austeo().add_code_word("BBB").build().unwrap(),
        aus().official().build().unwrap(),
    ];

    for label in &labels {
        let merged = merge_pair(label, label);
        assert_eq!(merged.classification(), Some(label.classification()));
        assert_eq!(merged.releasability(), label.to_builder().releasability());
        assert_eq!(merged.releasable_to(), label.to_builder().releasable_to());
        assert_eq!(merged.code_words(), label.to_builder().code_words());
        assert_eq!(
            merged.foreign_government_markings(),
            label.to_builder().foreign_government_markings()
        );
        assert!(merged.is_valid());

        let rebuilt = merged.build().unwrap();
        assert_eq!(
            rebuilt.security_caveats().map(|caveats| caveats.code_words()),
            label.security_caveats().map(|caveats| caveats.code_words())
        );
    }
}

#[test]
fn test_merging_the_same_nzl_label_twice_is_stable() {
    let label = LabelBuilder::<NewZealand>::new()
        .top_secret()
        .add_code_word("KIWI")
        .rel_to([GBR, USA])
        .build()
        .unwrap();

    let merged = merge([&label, &label, &label]).unwrap();
    assert_eq!(merged.build().unwrap(), label);
}

#[test]
fn test_merge_is_associative() {
    let triples = [
        [
            aus().protected().rel([NZL, GBR, CAN]).add_code_word("AAA").build().unwrap(),
            aus()
                .secret()
                .rel([NZL, GBR, USA])
                .add_foreign_government_marking("APPLE")
                .build()
                .unwrap(),
            aus().protected().rel([NZL, GBR]).add_code_word("BBB").build().unwrap(),
        ],
        [
            aus().secret().rel([USA, GBR]).build().unwrap(),
            aus().protected().agao().add_code_word("CCC").build().unwrap(),
            aus().top_secret().austeo().build().unwrap(),
        ],
    ];

    for [a, b, c] in &triples {
        let mut left = merge_pair(a, b);
        let left_inner = left.build().unwrap();
        left = merge_pair(&left_inner, c);

        let right_inner = merge_pair(b, c).build().unwrap();
        let right = merge_pair(a, &right_inner);

        assert_eq!(restrictive_fields(&left), restrictive_fields(&right));
        assert_eq!(restrictive_fields(&left), restrictive_fields(&merge([a, b, c]).unwrap()));
    }
}

#[test]
fn test_nzl_accountable_material_survives() {
    let a = LabelBuilder::<NewZealand>::new()
        .secret()
        .add_code_word("KIWI")
        .build()
        .unwrap();
    let b = LabelBuilder::<NewZealand>::new()
        .top_secret()
        .build()
        .unwrap();

    let merged = merge_pair(&a, &b);
    assert!(merged.accountable_material());
    assert_eq!(
        merged.build().unwrap().to_string(),
        "Development TOP SECRET//KIWI"
    );
}

// ============================================================================
// National markings
// ============================================================================

#[test]
fn test_nzl_dissemination_marks_are_unioned_and_endorsements_dropped() {
    let a = LabelBuilder::<NewZealand>::new()
        .sensitive()
        .budget()
        .build()
        .unwrap();
    let b = LabelBuilder::<NewZealand>::new()
        .secret()
        .add_dissemination_mark("NOFORN")
        .build()
        .unwrap();
    let c = LabelBuilder::<NewZealand>::new()
        .confidential()
        .add_dissemination_mark("ORCON")
        .build()
        .unwrap();

    let merged = merge([&a, &b, &c]).unwrap();
    assert!(!merged.has_policy_and_privacy_endorsements());
    assert_eq!(
        merged.dissemination_marks(),
        BTreeSet::from(["NOFORN".to_owned(), "ORCON".to_owned()])
    );
    assert_eq!(
        merged.build().unwrap().to_string(),
        "Development SECRET//NOFORN/ORCON"
    );
}

#[test]
fn test_uk_prefix_is_kept_and_rel_eu_needs_every_input() {
    let a = LabelBuilder::<UnitedKingdom>::new()
        .official()
        .uk_prefix_with_rel_eu()
        .personal_data()
        .build()
        .unwrap();
    let b = LabelBuilder::<UnitedKingdom>::new()
        .official_sensitive()
        .build()
        .unwrap();

    let merged = merge_pair(&a, &b);
    assert!(merged.has_uk_prefix());
    assert!(merged.sensitive_mark());
    assert!(merged.additional_instructions().is_empty());
    assert!(merged.descriptors().is_empty());
    assert_eq!(
        merged.build().unwrap().to_string(),
        "UK Development OFFICIAL-SENSITIVE"
    );

    let both = merge_pair(&a, &a);
    assert!(both.additional_instructions().contains(REL_EU));
}

#[test]
fn test_uk_sensitive_mark_is_dropped_above_official() {
    let a = LabelBuilder::<UnitedKingdom>::new()
        .official_sensitive()
        .build()
        .unwrap();
    let b = LabelBuilder::<UnitedKingdom>::new()
        .secret()
        .five_eyes_only()
        .build()
        .unwrap();

    let merged = merge_pair(&a, &b);
    assert!(!merged.sensitive_mark());
    assert!(merged.national_markings().is_empty());
    assert_eq!(
        merged.build().unwrap().to_string(),
        "Development SECRET - FIVE EYES ONLY"
    );
}

#[test]
fn test_uk_eyes_only_lists_intersect() {
    let a = LabelBuilder::<UnitedKingdom>::new()
        .secret()
        .eyes_only_nations(["UK", "USA"])
        .build()
        .unwrap();
    let b = LabelBuilder::<UnitedKingdom>::new()
        .top_secret()
        .uk_eyes_only()
        .build()
        .unwrap();

    let merged = merge_pair(&a, &b);
    assert_eq!(merged.releasable_to().join("/"), "UK");
    assert_eq!(
        merged.build().unwrap().to_string(),
        "Development TOP SECRET - UK EYES ONLY"
    );
}
