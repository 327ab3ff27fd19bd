//! Immutable label types.
//!
//! A [`Label`] is only produced by [`LabelBuilder::build`], so every value of
//! these types satisfies the validation rules. Deserialization goes through the
//! builder as well and re-validates.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::{
    Classification, DestinationList, Error, LabelBuilder, NationalMarkings, Scheme, Vocabulary,
};

/// Tags of the information management markers.
#[derive(
    Vocabulary, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[vocabulary(name = "Information Management Marker")]
#[serde(into = "String", try_from = "String")]
pub enum InformationManagementType {
    #[vocabulary("Legal Privilege")]
    LegalPrivilege,
    #[vocabulary("Legislative Secrecy")]
    LegislativeSecrecy,
    #[vocabulary("Personal Privacy")]
    PersonalPrivacy,
}

/// A provenance marker carried alongside the classification.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InformationManagementMarker {
    #[serde(rename = "Legal Privilege")]
    LegalPrivilege,
    #[serde(rename = "Legislative Secrecy")]
    LegislativeSecrecy { warnings: BTreeSet<String> },
    #[serde(rename = "Personal Privacy")]
    PersonalPrivacy,
}

impl InformationManagementMarker {
    pub fn marker_type(&self) -> InformationManagementType {
        match self {
            Self::LegalPrivilege => InformationManagementType::LegalPrivilege,
            Self::LegislativeSecrecy { .. } => InformationManagementType::LegislativeSecrecy,
            Self::PersonalPrivacy => InformationManagementType::PersonalPrivacy,
        }
    }
}

impl fmt::Display for InformationManagementMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker_type().as_str())?;
        if let Self::LegislativeSecrecy { warnings } = self {
            for warning in warnings {
                write!(f, " \"{warning}\"")?;
            }
        }
        Ok(())
    }
}

/// A special handling instruction with its addressee, if it takes one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SpecialHandlingCaveat<S: Scheme> {
    instruction: S::Instruction,
    #[serde(default)]
    addressee: Option<String>,
}

impl<S: Scheme> SpecialHandlingCaveat<S> {
    pub(crate) fn new(instruction: S::Instruction, addressee: Option<String>) -> Self {
        Self {
            instruction,
            addressee,
        }
    }

    pub fn instruction(&self) -> S::Instruction {
        self.instruction
    }

    pub fn addressee(&self) -> Option<&str> {
        self.addressee.as_deref()
    }
}

impl<S: Scheme> fmt::Display for SpecialHandlingCaveat<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instruction)?;
        if let Some(addressee) = &self.addressee {
            write!(f, " {addressee}")?;
        }
        Ok(())
    }
}

/// A releasability type with its destination list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ReleasabilityCaveat<S: Scheme> {
    releasability: S::Releasability,
    #[serde(default)]
    releasable_to: DestinationList,
}

impl<S: Scheme> ReleasabilityCaveat<S> {
    pub(crate) fn new(releasability: S::Releasability, releasable_to: DestinationList) -> Self {
        Self {
            releasability,
            releasable_to,
        }
    }

    pub fn releasability(&self) -> S::Releasability {
        self.releasability
    }

    pub fn releasable_to(&self) -> &DestinationList {
        &self.releasable_to
    }
}

impl<S: Scheme> fmt::Display for ReleasabilityCaveat<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.releasability)?;
        if !self.releasable_to.is_empty() {
            let separator = S::profile().destination_separator;
            write!(f, " {}", self.releasable_to.join(separator))?;
        }
        Ok(())
    }
}

/// The caveats of a label at or above the caveat floor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct SecurityCaveats<S: Scheme> {
    #[serde(default)]
    code_words: BTreeSet<String>,
    #[serde(default)]
    foreign_government_markings: BTreeSet<String>,
    #[serde(default)]
    special_handling: Option<SpecialHandlingCaveat<S>>,
    #[serde(default)]
    releasability: Option<ReleasabilityCaveat<S>>,
    #[serde(default)]
    accountable_material: bool,
}

impl<S: Scheme> SecurityCaveats<S> {
    pub(crate) fn new(
        code_words: BTreeSet<String>,
        foreign_government_markings: BTreeSet<String>,
        special_handling: Option<SpecialHandlingCaveat<S>>,
        releasability: Option<ReleasabilityCaveat<S>>,
        accountable_material: bool,
    ) -> Self {
        Self {
            code_words,
            foreign_government_markings,
            special_handling,
            releasability,
            accountable_material,
        }
    }

    pub fn code_words(&self) -> &BTreeSet<String> {
        &self.code_words
    }

    pub fn foreign_government_markings(&self) -> &BTreeSet<String> {
        &self.foreign_government_markings
    }

    pub fn special_handling(&self) -> Option<&SpecialHandlingCaveat<S>> {
        self.special_handling.as_ref()
    }

    pub fn releasability(&self) -> Option<&ReleasabilityCaveat<S>> {
        self.releasability.as_ref()
    }

    pub fn accountable_material(&self) -> bool {
        self.accountable_material
    }
}

impl<S: Scheme> fmt::Display for SecurityCaveats<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        if self.accountable_material {
            parts.push("ACCOUNTABLE MATERIAL".to_owned());
        }
        parts.extend(self.code_words.iter().cloned());
        parts.extend(self.foreign_government_markings.iter().cloned());
        if let Some(special_handling) = &self.special_handling {
            parts.push(special_handling.to_string());
        }
        if let Some(releasability) = &self.releasability {
            parts.push(releasability.to_string());
        }
        f.write_str(&parts.join(" "))
    }
}

/// A validated protective marking.
///
/// ```rust
/// use protective_marking::{schemes::Australia, LabelBuilder};
///
/// let label = LabelBuilder::<Australia>::new()
///     .secret()
///     .add_code_word("AAA")
///     .austeo()
///     .build()
///     .unwrap();
/// assert_eq!(label.to_string(), "Development SECRET AAA AUSTEO");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "", try_from = "UncheckedLabel<S>")]
pub struct Label<S: Scheme> {
    classification: Classification<S>,
    information_management_markers: Vec<InformationManagementMarker>,
    security_caveats: Option<SecurityCaveats<S>>,
    #[serde(skip_serializing_if = "NationalMarkings::is_empty")]
    national_markings: S::NationalMarkings,
}

impl<S: Scheme> Label<S> {
    pub(crate) fn new(
        classification: Classification<S>,
        information_management_markers: Vec<InformationManagementMarker>,
        security_caveats: Option<SecurityCaveats<S>>,
        national_markings: S::NationalMarkings,
    ) -> Self {
        Self {
            classification,
            information_management_markers,
            security_caveats,
            national_markings,
        }
    }

    pub fn classification(&self) -> Classification<S> {
        self.classification
    }

    pub fn information_management_markers(&self) -> &[InformationManagementMarker] {
        &self.information_management_markers
    }

    pub fn security_caveats(&self) -> Option<&SecurityCaveats<S>> {
        self.security_caveats.as_ref()
    }

    pub fn national_markings(&self) -> &S::NationalMarkings {
        &self.national_markings
    }

    /// A builder seeded with this label, for deriving a modified copy.
    pub fn to_builder(&self) -> LabelBuilder<S> {
        LabelBuilder::from_label(self)
    }
}

impl<S: Scheme> fmt::Display for Label<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        S::fmt_label(self, f)
    }
}

impl<S: Scheme> Label<S> {
    /// Classification, caveats and information management markers, separated
    /// by spaces.
    pub(crate) fn fmt_spaced(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.classification)?;
        if let Some(caveats) = &self.security_caveats {
            let caveats = caveats.to_string();
            if !caveats.is_empty() {
                write!(f, " {caveats}")?;
            }
        }
        for marker in &self.information_management_markers {
            write!(f, " {marker}")?;
        }
        Ok(())
    }
}

/// Wire shape of a [`Label`] before validation.
#[derive(Deserialize)]
#[serde(bound = "")]
struct UncheckedLabel<S: Scheme> {
    classification: Classification<S>,
    #[serde(default)]
    information_management_markers: Vec<InformationManagementMarker>,
    #[serde(default)]
    security_caveats: Option<SecurityCaveats<S>>,
    #[serde(default)]
    national_markings: S::NationalMarkings,
}

impl<S: Scheme> TryFrom<UncheckedLabel<S>> for Label<S> {
    type Error = Error;

    fn try_from(unchecked: UncheckedLabel<S>) -> Result<Self, Self::Error> {
        let label = Self::new(
            unchecked.classification,
            unchecked.information_management_markers,
            unchecked.security_caveats,
            unchecked.national_markings,
        );
        let builder = LabelBuilder::from_label(&label);
        if builder.information_management_types().len() != label.information_management_markers.len()
        {
            return Err(Error::InvalidLabelState {
                violations: vec![
                    "Too many Information Management Markers. Clear existing markers, and repopulate."
                        .to_owned(),
                ],
            });
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        countries::NZL,
        schemes::{Australia, NewZealand},
    };

    #[test]
    fn marker_display_quotes_warnings() {
        let marker = InformationManagementMarker::LegislativeSecrecy {
            warnings: BTreeSet::from(["Act s.12".to_owned()]),
        };
        assert_eq!(marker.to_string(), "Legislative Secrecy \"Act s.12\"");
        assert_eq!(
            InformationManagementMarker::PersonalPrivacy.to_string(),
            "Personal Privacy"
        );
    }

    #[test]
    fn label_display_orders_sections() {
        let label = LabelBuilder::<Australia>::new()
            .protected()
            .add_code_word("AAA")
            .add_foreign_government_marking("APPLE")
            .exclusive_for("Minister")
            .rel([NZL])
            .legal_privilege()
            .build()
            .unwrap();
        assert_eq!(
            label.to_string(),
            "Development PROTECTED AAA APPLE EXCLUSIVE-FOR Minister REL AUS/NZL Legal Privilege"
        );
    }

    #[test]
    fn nzl_label_uses_its_own_rendering() {
        let label = LabelBuilder::<NewZealand>::new()
            .top_secret()
            .rel_to(["GBR"])
            .build()
            .unwrap();
        assert!(label.security_caveats().unwrap().accountable_material());
        assert_eq!(label.to_string(), "Development TOP SECRET//REL TO GBR, NZL");
    }

    #[test]
    fn to_builder_seeds_every_field() {
        let label = LabelBuilder::<Australia>::new()
            .secret()
            .agao()
            .personal_privacy()
            .build()
            .unwrap();
        let builder = label.to_builder();
        assert_eq!(builder.build().unwrap(), label);
    }

    #[test]
    fn duplicate_markers_are_rejected_on_conversion() {
        let unchecked = UncheckedLabel::<Australia> {
            classification: Classification::<Australia>::PROTECTED,
            information_management_markers: vec![
                InformationManagementMarker::LegalPrivilege,
                InformationManagementMarker::LegalPrivilege,
            ],
            security_caveats: None,
            national_markings: (),
        };
        let err = Label::try_from(unchecked).unwrap_err();
        assert!(matches!(err, Error::InvalidLabelState { .. }));
    }
}
