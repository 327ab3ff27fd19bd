//! United Kingdom Government Security Classifications.
//!
//! Three rungs, with caveats allowed on all of them. The UK scheme has its own
//! vocabulary around the shared caveats:
//! - the `UK` prefix and the `-SENSITIVE` mark on OFFICIAL
//! - handling instructions and descriptors, each listed after ` - `
//! - eyes-only lists written as `UK/FIVE EYES ONLY`
//! - additional instructions such as `REL-EU`, one per line after the marking
//!
//! ```text
//! UK Development OFFICIAL-SENSITIVE - RECIPIENTS ONLY - PERSONAL DATA
//! REL-EU
//! ```

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    Classification, DestinationList, HandlingInstruction, Label, LabelBuilder, NationalMarkings,
    Releasability, Scheme, SchemeProfile, Vocabulary,
};

/// The United Kingdom, as it appears in eyes-only lists.
pub const UK: &str = "UK";
/// The five-eyes alliance, as it appears in eyes-only lists.
pub const FIVE: &str = "FIVE";
/// Additional instruction permitting release to the EU. Requires the UK prefix.
pub const REL_EU: &str = "REL-EU";

pub const PERSONAL_DATA: &str = "PERSONAL DATA";
pub const LEGAL_PROFESSIONAL_PRIVILEGE: &str = "LEGAL PROFESSIONAL PRIVILEGE";
pub const LEGAL: &str = "LEGAL";
pub const MARKET_SENSITIVE: &str = "MARKET SENSITIVE";
pub const COMMERCIAL: &str = "COMMERCIAL";
pub const HR_MANAGEMENT: &str = "HR/MANAGEMENT";

const SENSITIVE_MARK: &str = "-SENSITIVE";
const USE_ONLY_PLACEHOLDER: &str = "[INSERT ORGANISATION(S) NAME] USE ONLY";

/// The United Kingdom scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitedKingdom;

pub static UNITED_KINGDOM: SchemeProfile = SchemeProfile {
    key: "uk",
    home_nation: UK,
    alliance: &[],
    classifications: &["OFFICIAL", "SECRET", "TOP SECRET"],
    development_classifications: &[
        "Development OFFICIAL",
        "Development SECRET",
        "Development TOP SECRET",
    ],
    caveat_floor: 0,
    accountable_rung: None,
    destination_separator: "/",
};

impl Scheme for UnitedKingdom {
    type Releasability = UkReleasability;
    type Instruction = UkInstruction;
    type NationalMarkings = UkMarkings;

    fn profile() -> &'static SchemeProfile {
        &UNITED_KINGDOM
    }

    fn check_national_markings(builder: &LabelBuilder<Self>, report: &mut Vec<String>) {
        let markings = &builder.national_markings;
        let official = Classification::<UnitedKingdom>::OFFICIAL;
        let classification = builder.classification;
        let is_official = classification == Some(official);
        // Set, and something other than OFFICIAL.
        let above_official = classification.filter(|classification| *classification != official);

        if markings.additional_instructions.contains(REL_EU) && !markings.uk_prefix {
            report.push(format!(
                "May not have the {REL_EU} marker if the UK Prefix is not set."
            ));
        }
        if let Some(current) = above_official.filter(|_| markings.sensitive) {
            report.push(format!(
                "The SENSITIVE mark is only permitted when the Classification is '{official}'. Current Classification is: '{current}'."
            ));
        }

        let instructions = &markings.handling_instructions;
        if instructions.contains(&UkHandlingInstruction::RecipientsOnly)
            && is_official
            && !markings.sensitive
        {
            report.push(format!(
                "{} Handling Instruction may not be used with '{official}' Classification without the SENSITIVE mark",
                UkHandlingInstruction::RecipientsOnly
            ));
        }
        if instructions.contains(&UkHandlingInstruction::ForPublicRelease) {
            let instruction = UkHandlingInstruction::ForPublicRelease;
            if let Some(current) = above_official {
                report.push(format!(
                    "May only use Handling Instruction {instruction} with '{official}' Classification. It may not be used with: '{current}'."
                ));
            } else if is_official && markings.sensitive {
                report.push(format!(
                    "May only use Handling Instruction {instruction} with '{official}' Classification without the SENSITIVE mark."
                ));
            }
        }
        if instructions.contains(&UkHandlingInstruction::UseOnly)
            && markings.use_only_organisations.is_empty()
        {
            report.push(format!(
                "When the {USE_ONLY_PLACEHOLDER} Handling Instruction is used, there must be at least one 'Use Only Organisation' defined."
            ));
        }
        if !markings.use_only_organisations.is_empty()
            && !instructions.contains(&UkHandlingInstruction::UseOnly)
        {
            report.push(format!(
                "If a list of Use Only Organisations is set, the {USE_ONLY_PLACEHOLDER} Handling Instruction is required."
            ));
        }
        if let Some(current) =
            above_official.filter(|_| instructions.contains(&UkHandlingInstruction::HmgUseOnly))
        {
            report.push(format!(
                "May only use {} Handling Instruction with '{official}' Classification. It may not be used with: '{current}'.",
                UkHandlingInstruction::HmgUseOnly
            ));
        }
        let top_secret = Classification::<UnitedKingdom>::TOP_SECRET;
        if instructions.contains(&UkHandlingInstruction::Embargoed)
            && classification == Some(top_secret)
        {
            report.push(format!(
                "May not use the {} Handling Instruction with the Classification '{top_secret}'.",
                UkHandlingInstruction::Embargoed
            ));
        }

        if let Some(current) = above_official.filter(|_| markings.descriptors.contains(LEGAL)) {
            report.push(format!(
                "May only use {LEGAL} Descriptor when the Classification is '{official}'. It may not be used with: '{current}'."
            ));
        }

        let secret = Classification::<UnitedKingdom>::SECRET;
        let eyes_only = builder.releasability.is_some() || !builder.releasable_to.is_empty();
        if let Some(current) = classification.filter(|current| eyes_only && *current < secret) {
            report.push(format!(
                "National/Eyes Only Caveats may only be added to '{secret}' and '{top_secret}' Classifications. They may not be used with '{current}'."
            ));
        }
    }

    fn check_releasable_to(releasable_to: &DestinationList, report: &mut Vec<String>) {
        if !releasable_to.contains(UK) && !releasable_to.contains(FIVE) {
            report.push(format!(
                "When Eyes Only Caveats are present, the list must contain either {UK} or {FIVE}."
            ));
        }
    }

    fn merge_national_markings(builder: &mut LabelBuilder<Self>, label: &Label<Self>) {
        let incoming = label.national_markings();
        let official = builder.classification == Some(Classification::<UnitedKingdom>::OFFICIAL);
        let markings = &mut builder.national_markings;

        markings.uk_prefix |= incoming.uk_prefix;
        markings.sensitive = official && (markings.sensitive || incoming.sensitive);
        markings
            .additional_instructions
            .retain(|instruction| incoming.additional_instructions.contains(instruction));
    }

    fn fmt_label(label: &Label<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let markings = label.national_markings();
        if markings.uk_prefix {
            write!(f, "{UK} ")?;
        }
        write!(f, "{}", label.classification())?;
        if markings.sensitive {
            f.write_str(SENSITIVE_MARK)?;
        }

        let mut instructions: Vec<String> = markings
            .handling_instructions
            .iter()
            .map(|instruction| match instruction {
                UkHandlingInstruction::UseOnly => {
                    let organisations: Vec<&str> = markings
                        .use_only_organisations
                        .iter()
                        .map(String::as_str)
                        .collect();
                    format!("{} {instruction}", organisations.join(" "))
                }
                other => other.to_string(),
            })
            .collect();
        instructions.sort();

        let mut sections = vec![
            instructions,
            markings.descriptors.iter().cloned().collect::<Vec<_>>(),
        ];
        if let Some(caveats) = label.security_caveats() {
            sections.push(
                caveats
                    .code_words()
                    .iter()
                    .chain(caveats.foreign_government_markings())
                    .cloned()
                    .collect(),
            );
            if let Some(releasability) = caveats.releasability() {
                let nations = releasability.releasable_to().join("/");
                sections.push(vec![format!("{nations} {}", releasability.releasability())]);
            }
        }
        for section in sections.iter().filter(|section| !section.is_empty()) {
            write!(f, " - {}", section.join(" "))?;
        }

        for marker in label.information_management_markers() {
            write!(f, " {marker}")?;
        }
        for instruction in &markings.additional_instructions {
            write!(f, "\n{instruction}")?;
        }
        Ok(())
    }
}

impl Classification<UnitedKingdom> {
    pub const OFFICIAL: Self = Self::at(0);
    pub const SECRET: Self = Self::at(1);
    pub const TOP_SECRET: Self = Self::at(2);
}

/// The single UK releasability type. Its destination list is the eyes-only list.
#[derive(
    Vocabulary, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[vocabulary(name = "Releasability Type")]
#[serde(into = "String", try_from = "String")]
pub enum UkReleasability {
    #[vocabulary("EYES ONLY")]
    EyesOnly,
}

impl Releasability for UkReleasability {
    const RELEASABLE_TO: Self = Self::EyesOnly;

    fn restriction(self) -> u8 {
        0
    }
}

/// UK handling instructions live in [`UkMarkings`]; the shared special handling
/// slot is unused.
#[derive(
    Vocabulary, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[vocabulary(name = "Special Handling Instruction")]
#[serde(into = "String", try_from = "String")]
pub enum UkInstruction {}

impl HandlingInstruction for UkInstruction {
    fn requires_addressee(self) -> bool {
        match self {}
    }
}

#[derive(
    Vocabulary, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[vocabulary(name = "Handling Instruction")]
#[serde(into = "String", try_from = "String")]
pub enum UkHandlingInstruction {
    #[vocabulary("RECIPIENTS ONLY")]
    RecipientsOnly,
    #[vocabulary("FOR PUBLIC RELEASE")]
    ForPublicRelease,
    /// Written after the organisations it is limited to.
    #[vocabulary("USE ONLY")]
    UseOnly,
    #[vocabulary("HMG USE ONLY")]
    HmgUseOnly,
    #[vocabulary("EMBARGOED")]
    Embargoed,
}

/// UK markings outside the shared caveats.
///
/// Handling instructions, their organisations and descriptors describe one
/// document and are dropped by a merge. The prefix is kept if any input has it,
/// and an additional instruction only if every input has it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UkMarkings {
    uk_prefix: bool,
    sensitive: bool,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    handling_instructions: BTreeSet<UkHandlingInstruction>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    use_only_organisations: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    descriptors: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    additional_instructions: BTreeSet<String>,
}

impl UkMarkings {
    pub fn uk_prefix(&self) -> bool {
        self.uk_prefix
    }

    pub fn sensitive(&self) -> bool {
        self.sensitive
    }

    pub fn handling_instructions(&self) -> &BTreeSet<UkHandlingInstruction> {
        &self.handling_instructions
    }

    pub fn use_only_organisations(&self) -> &BTreeSet<String> {
        &self.use_only_organisations
    }

    pub fn descriptors(&self) -> &BTreeSet<String> {
        &self.descriptors
    }

    pub fn additional_instructions(&self) -> &BTreeSet<String> {
        &self.additional_instructions
    }
}

impl NationalMarkings for UkMarkings {
    fn is_empty(&self) -> bool {
        !self.uk_prefix
            && !self.sensitive
            && self.handling_instructions.is_empty()
            && self.use_only_organisations.is_empty()
            && self.descriptors.is_empty()
            && self.additional_instructions.is_empty()
    }

    fn clear_provenance(&mut self) {
        self.handling_instructions.clear();
        self.use_only_organisations.clear();
        self.descriptors.clear();
    }
}

impl LabelBuilder<UnitedKingdom> {
    /// OFFICIAL, clearing the SENSITIVE mark.
    pub fn official(&mut self) -> &mut Self {
        self.set_sensitive_mark(false)
            .set_classification(Classification::<UnitedKingdom>::OFFICIAL)
    }

    pub fn official_sensitive(&mut self) -> &mut Self {
        self.set_sensitive_mark(true)
            .set_classification(Classification::<UnitedKingdom>::OFFICIAL)
    }

    pub fn secret(&mut self) -> &mut Self {
        self.set_sensitive_mark(false)
            .set_classification(Classification::<UnitedKingdom>::SECRET)
    }

    pub fn top_secret(&mut self) -> &mut Self {
        self.set_sensitive_mark(false)
            .set_classification(Classification::<UnitedKingdom>::TOP_SECRET)
    }

    pub fn sensitive_mark(&self) -> bool {
        self.national_markings.sensitive
    }

    pub fn set_sensitive_mark(&mut self, sensitive: bool) -> &mut Self {
        self.national_markings.sensitive = sensitive;
        self
    }

    // Prefix

    pub fn has_uk_prefix(&self) -> bool {
        self.national_markings.uk_prefix
    }

    pub fn set_uk_prefix(&mut self, uk_prefix: bool) -> &mut Self {
        self.national_markings.uk_prefix = uk_prefix;
        self
    }

    pub fn uk_prefix(&mut self) -> &mut Self {
        self.set_uk_prefix(true)
    }

    pub fn uk_prefix_with_rel_eu(&mut self) -> &mut Self {
        self.set_uk_prefix(true).add_rel_eu()
    }

    /// Removes the prefix and `REL-EU` along with it.
    pub fn clear_uk_prefix(&mut self) -> &mut Self {
        self.set_uk_prefix(false).remove_rel_eu()
    }

    pub fn add_rel_eu(&mut self) -> &mut Self {
        self.add_additional_instruction(REL_EU)
    }

    pub fn remove_rel_eu(&mut self) -> &mut Self {
        self.national_markings.additional_instructions.remove(REL_EU);
        self
    }

    // Handling instructions

    pub fn handling_instructions(&self) -> BTreeSet<UkHandlingInstruction> {
        self.national_markings.handling_instructions.clone()
    }

    pub fn set_handling_instructions(
        &mut self,
        instructions: impl IntoIterator<Item = UkHandlingInstruction>,
    ) -> &mut Self {
        self.national_markings.handling_instructions = instructions.into_iter().collect();
        self
    }

    pub fn add_handling_instruction(&mut self, instruction: UkHandlingInstruction) -> &mut Self {
        self.national_markings.handling_instructions.insert(instruction);
        self
    }

    /// Clears the handling instructions and the use-only organisations.
    pub fn clear_handling_instructions(&mut self) -> &mut Self {
        self.national_markings.handling_instructions.clear();
        self.clear_use_only_organisations()
    }

    pub fn use_only_organisations(&self) -> BTreeSet<String> {
        self.national_markings.use_only_organisations.clone()
    }

    pub fn set_use_only_organisations<I, O>(&mut self, organisations: I) -> &mut Self
    where
        I: IntoIterator<Item = O>,
        O: Into<String>,
    {
        self.national_markings.use_only_organisations =
            organisations.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_use_only_organisation(&mut self, organisation: impl Into<String>) -> &mut Self {
        self.national_markings
            .use_only_organisations
            .insert(organisation.into());
        self
    }

    pub fn clear_use_only_organisations(&mut self) -> &mut Self {
        self.national_markings.use_only_organisations.clear();
        self
    }

    pub fn recipients_only(&mut self) -> &mut Self {
        self.add_handling_instruction(UkHandlingInstruction::RecipientsOnly)
    }

    pub fn for_public_release(&mut self) -> &mut Self {
        self.add_handling_instruction(UkHandlingInstruction::ForPublicRelease)
    }

    /// Adds `USE ONLY`, replacing the organisations with `organisations`.
    pub fn use_only<I, O>(&mut self, organisations: I) -> &mut Self
    where
        I: IntoIterator<Item = O>,
        O: Into<String>,
    {
        self.set_use_only_organisations(organisations)
            .add_handling_instruction(UkHandlingInstruction::UseOnly)
    }

    pub fn hmg_use_only(&mut self) -> &mut Self {
        self.add_handling_instruction(UkHandlingInstruction::HmgUseOnly)
    }

    pub fn embargoed(&mut self) -> &mut Self {
        self.add_handling_instruction(UkHandlingInstruction::Embargoed)
    }

    // Descriptors

    pub fn descriptors(&self) -> BTreeSet<String> {
        self.national_markings.descriptors.clone()
    }

    pub fn set_descriptors<I, D>(&mut self, descriptors: I) -> &mut Self
    where
        I: IntoIterator<Item = D>,
        D: Into<String>,
    {
        self.national_markings.descriptors = descriptors.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_descriptor(&mut self, descriptor: impl Into<String>) -> &mut Self {
        self.national_markings.descriptors.insert(descriptor.into());
        self
    }

    pub fn clear_descriptors(&mut self) -> &mut Self {
        self.national_markings.descriptors.clear();
        self
    }

    pub fn personal_data(&mut self) -> &mut Self {
        self.add_descriptor(PERSONAL_DATA)
    }

    pub fn legal_professional_privilege(&mut self) -> &mut Self {
        self.add_descriptor(LEGAL_PROFESSIONAL_PRIVILEGE)
    }

    pub fn legal(&mut self) -> &mut Self {
        self.add_descriptor(LEGAL)
    }

    pub fn market_sensitive(&mut self) -> &mut Self {
        self.add_descriptor(MARKET_SENSITIVE)
    }

    pub fn commercial(&mut self) -> &mut Self {
        self.add_descriptor(COMMERCIAL)
    }

    pub fn hr_management(&mut self) -> &mut Self {
        self.add_descriptor(HR_MANAGEMENT)
    }

    // Eyes only

    /// Replaces the eyes-only list with `nations`. Unlike the generic
    /// releasable-to shortcut, `UK` is not added.
    pub fn eyes_only_nations<I, N>(&mut self, nations: I) -> &mut Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.releasability = Some(UkReleasability::EyesOnly);
        self.set_releasable_to(nations)
    }

    pub fn uk_eyes_only(&mut self) -> &mut Self {
        self.eyes_only_nations([UK])
    }

    pub fn five_eyes_only(&mut self) -> &mut Self {
        self.eyes_only_nations([FIVE])
    }

    // Additional instructions

    pub fn additional_instructions(&self) -> BTreeSet<String> {
        self.national_markings.additional_instructions.clone()
    }

    pub fn set_additional_instructions<I, A>(&mut self, instructions: I) -> &mut Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.national_markings.additional_instructions =
            instructions.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_additional_instruction(&mut self, instruction: impl Into<String>) -> &mut Self {
        self.national_markings
            .additional_instructions
            .insert(instruction.into());
        self
    }

    pub fn clear_additional_instructions(&mut self) -> &mut Self {
        self.national_markings.additional_instructions.clear();
        self
    }
}
