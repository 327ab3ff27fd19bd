//! Cross-field rules for a [`LabelBuilder`].
//!
//! Rule groups run in a fixed order and each appends to the same report, so a
//! caller sees every violation at once. Messages are stable and may be shown to
//! users as-is.

use crate::{
    Classification, HandlingInstruction, InformationManagementType, LabelBuilder, Releasability,
    Scheme, Vocabulary,
};

/// Returns every violation in `builder`, in rule order.
pub fn violations<S: Scheme>(builder: &LabelBuilder<S>) -> Vec<String> {
    let mut report = Vec::new();

    check_classification(builder, &mut report);
    check_information_management(builder, &mut report);
    S::check_national_markings(builder, &mut report);
    check_caveat_floor(builder, &mut report);
    check_special_handling(builder, &mut report);
    check_releasability(builder, &mut report);

    report
}

fn check_classification<S: Scheme>(builder: &LabelBuilder<S>, report: &mut Vec<String>) {
    match builder.classification {
        None => report.push("Classification must be set.".to_owned()),
        Some(classification)
            if classification.requires_accountable_material() && !builder.accountable_material =>
        {
            report.push(format!(
                "For classification '{classification}' ACCOUNTABLE MATERIAL must be true."
            ));
        }
        Some(_) => {}
    }
}

fn check_information_management<S: Scheme>(builder: &LabelBuilder<S>, report: &mut Vec<String>) {
    let types = &builder.information_management_types;
    let warnings = &builder.legislative_secrecy_warnings;
    let legislative_secrecy = types.contains(&InformationManagementType::LegislativeSecrecy);

    if types.len() > InformationManagementType::ALL.len() {
        report.push(
            "Too many Information Management Markers. Clear existing markers, and repopulate."
                .to_owned(),
        );
    }
    if legislative_secrecy && warnings.iter().all(|warning| warning.trim().is_empty()) {
        report.push("Missing Legislation Secrecy Warning for Legislative Secrecy Marker".to_owned());
    }
    if !warnings.is_empty() && !legislative_secrecy {
        report.push(format!(
            "May not have a Legislative Secrecy Warning without a {} Information Management Marker.",
            InformationManagementType::LegislativeSecrecy
        ));
    }
}

fn check_caveat_floor<S: Scheme>(builder: &LabelBuilder<S>, report: &mut Vec<String>) {
    let Some(classification) = builder.classification else {
        return;
    };
    if builder.has_security_caveats() && !classification.permits_caveats() {
        report.push(format!(
            "Attempting to add a Security Caveat when the Classification \"{classification}\" is lower than \"{}\"",
            Classification::<S>::caveat_floor()
        ));
    }
}

fn check_special_handling<S: Scheme>(builder: &LabelBuilder<S>, report: &mut Vec<String>) {
    let has_addressee = builder
        .special_handling_addressee
        .as_deref()
        .is_some_and(|addressee| !addressee.trim().is_empty());

    match builder.special_handling_instruction {
        Some(instruction) if instruction.requires_addressee() => {
            if !has_addressee {
                report.push(
                    "No Named recipient for Exclusive For Special Handling Instruction".to_owned(),
                );
            }
        }
        other => {
            if has_addressee {
                report.push(format!(
                    "May only have a Named recipient for the Exclusive For Special Handling Instruction. Not for: {}",
                    other.map_or_else(|| "none".to_owned(), |instruction| instruction.to_string())
                ));
            }
        }
    }
}

fn check_releasability<S: Scheme>(builder: &LabelBuilder<S>, report: &mut Vec<String>) {
    let releasable_to = &builder.releasable_to;

    match builder.releasability {
        Some(releasability) if releasability.is_releasable_to() => {
            S::check_releasable_to(releasable_to, report);
        }
        other => {
            if !releasable_to.is_empty() {
                report.push(format!(
                    "Cannot have a releasable to list with Releasability Type: {}",
                    other.map_or_else(|| "none".to_owned(), |releasability| releasability.to_string())
                ));
            }
        }
    }
}
