//! Mutable staging area for a label.
//!
//! Setters never fail and impose no cross-field invariants; the validator checks
//! those when [`LabelBuilder::violations`] or [`LabelBuilder::build`] is called.
//! A few setters have side effects that keep the common paths valid:
//! - setting the releasable-to type inserts the home nation
//! - the eyes-only shortcuts clear the destination list
//! - setting a rung that requires accountable material confirms it

use std::collections::BTreeSet;

use slog::error;

use crate::{
    config, validate, Classification, DestinationList, Error, InformationManagementMarker,
    InformationManagementType, Label, NationOrder, NationalMarkings, Releasability,
    ReleasabilityCaveat, Scheme, SecurityCaveats, SpecialHandlingCaveat,
};

/// Accumulates candidate field values for a [`Label`].
///
/// ```rust
/// use protective_marking::{schemes::Australia, LabelBuilder};
///
/// let mut builder = LabelBuilder::<Australia>::new();
/// builder.official().add_code_word("AAA");
/// assert_eq!(builder.violations().len(), 1);
///
/// builder.protected();
/// let label = builder.build().unwrap();
/// assert_eq!(label.security_caveats().unwrap().code_words().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelBuilder<S: Scheme> {
    pub(crate) classification: Option<Classification<S>>,
    pub(crate) information_management_types: BTreeSet<InformationManagementType>,
    pub(crate) legislative_secrecy_warnings: BTreeSet<String>,
    pub(crate) accountable_material: bool,
    pub(crate) code_words: BTreeSet<String>,
    pub(crate) foreign_government_markings: BTreeSet<String>,
    pub(crate) special_handling_instruction: Option<S::Instruction>,
    pub(crate) special_handling_addressee: Option<String>,
    pub(crate) releasability: Option<S::Releasability>,
    pub(crate) releasable_to: DestinationList,
    pub(crate) national_markings: S::NationalMarkings,
}

impl<S: Scheme> Default for LabelBuilder<S> {
    fn default() -> Self {
        Self {
            classification: None,
            information_management_types: BTreeSet::new(),
            legislative_secrecy_warnings: BTreeSet::new(),
            accountable_material: false,
            code_words: BTreeSet::new(),
            foreign_government_markings: BTreeSet::new(),
            special_handling_instruction: None,
            special_handling_addressee: None,
            releasability: None,
            releasable_to: DestinationList::new(),
            national_markings: S::NationalMarkings::default(),
        }
    }
}

impl<S: Scheme> LabelBuilder<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a builder with every field of `label`.
    pub fn from_label(label: &Label<S>) -> Self {
        let mut builder = Self::new();
        builder.classification = Some(label.classification());
        for marker in label.information_management_markers() {
            builder
                .information_management_types
                .insert(marker.marker_type());
            if let InformationManagementMarker::LegislativeSecrecy { warnings } = marker {
                builder
                    .legislative_secrecy_warnings
                    .extend(warnings.iter().cloned());
            }
        }
        if let Some(caveats) = label.security_caveats() {
            builder.accountable_material = caveats.accountable_material();
            builder.code_words = caveats.code_words().clone();
            builder.foreign_government_markings = caveats.foreign_government_markings().clone();
            if let Some(special_handling) = caveats.special_handling() {
                builder.special_handling_instruction = Some(special_handling.instruction());
                builder.special_handling_addressee =
                    special_handling.addressee().map(ToOwned::to_owned);
            }
            if let Some(releasability) = caveats.releasability() {
                builder.releasability = Some(releasability.releasability());
                builder.set_releasable_to(releasability.releasable_to().iter());
            }
        }
        builder.national_markings = label.national_markings().clone();
        builder
    }

    pub(crate) fn nation_order() -> NationOrder {
        NationOrder::for_profile(config::releasability_order(), S::profile())
    }

    // Classification

    pub fn classification(&self) -> Option<Classification<S>> {
        self.classification
    }

    /// Sets or clears the classification.
    ///
    /// Setting a rung that requires accountable material also confirms it.
    pub fn set_classification(
        &mut self,
        classification: impl Into<Option<Classification<S>>>,
    ) -> &mut Self {
        self.classification = classification.into();
        if self
            .classification
            .is_some_and(Classification::requires_accountable_material)
        {
            self.accountable_material = true;
        }
        self
    }

    pub fn clear_classification(&mut self) -> &mut Self {
        self.classification = None;
        self
    }

    // Information management markers

    pub fn information_management_types(&self) -> BTreeSet<InformationManagementType> {
        self.information_management_types.clone()
    }

    pub fn set_information_management_types(
        &mut self,
        types: impl IntoIterator<Item = InformationManagementType>,
    ) -> &mut Self {
        self.information_management_types = types.into_iter().collect();
        self
    }

    pub fn add_information_management_type(
        &mut self,
        marker_type: InformationManagementType,
    ) -> &mut Self {
        self.information_management_types.insert(marker_type);
        self
    }

    pub fn legal_privilege(&mut self) -> &mut Self {
        self.add_information_management_type(InformationManagementType::LegalPrivilege)
    }

    pub fn personal_privacy(&mut self) -> &mut Self {
        self.add_information_management_type(InformationManagementType::PersonalPrivacy)
    }

    /// Adds the Legislative Secrecy marker, replacing any existing warnings with `warning`.
    pub fn legislative_secrecy(&mut self, warning: impl Into<String>) -> &mut Self {
        self.legislative_secrecy_warnings.clear();
        self.add_legislative_secrecy(warning)
    }

    /// Adds the Legislative Secrecy marker and appends `warning` to its warnings.
    pub fn add_legislative_secrecy(&mut self, warning: impl Into<String>) -> &mut Self {
        self.information_management_types
            .insert(InformationManagementType::LegislativeSecrecy);
        self.legislative_secrecy_warnings.insert(warning.into());
        self
    }

    pub fn legislative_secrecy_warnings(&self) -> BTreeSet<String> {
        self.legislative_secrecy_warnings.clone()
    }

    pub fn set_legislative_secrecy_warnings<I, W>(&mut self, warnings: I) -> &mut Self
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        self.legislative_secrecy_warnings = warnings.into_iter().map(Into::into).collect();
        self
    }

    /// The markers as they would appear on a built label, whether or not they are valid.
    pub fn information_management_markers(&self) -> Vec<InformationManagementMarker> {
        self.information_management_types
            .iter()
            .map(|marker_type| match marker_type {
                InformationManagementType::LegalPrivilege => {
                    InformationManagementMarker::LegalPrivilege
                }
                InformationManagementType::LegislativeSecrecy => {
                    InformationManagementMarker::LegislativeSecrecy {
                        warnings: self.legislative_secrecy_warnings.clone(),
                    }
                }
                InformationManagementType::PersonalPrivacy => {
                    InformationManagementMarker::PersonalPrivacy
                }
            })
            .collect()
    }

    pub fn has_information_management_markers(&self) -> bool {
        !self.information_management_types.is_empty()
    }

    pub fn clear_information_management_markers(&mut self) -> &mut Self {
        self.information_management_types.clear();
        self.legislative_secrecy_warnings.clear();
        self
    }

    // Accountable material

    pub fn accountable_material(&self) -> bool {
        self.accountable_material
    }

    pub fn set_accountable_material(&mut self, accountable_material: bool) -> &mut Self {
        self.accountable_material = accountable_material;
        self
    }

    // Code words

    pub fn code_words(&self) -> BTreeSet<String> {
        self.code_words.clone()
    }

    pub fn set_code_words<I, C>(&mut self, code_words: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.code_words = code_words.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_code_word(&mut self, code_word: impl Into<String>) -> &mut Self {
        self.code_words.insert(code_word.into());
        self
    }

    pub fn clear_code_words(&mut self) -> &mut Self {
        self.code_words.clear();
        self
    }

    // Foreign government markings

    pub fn foreign_government_markings(&self) -> BTreeSet<String> {
        self.foreign_government_markings.clone()
    }

    pub fn set_foreign_government_markings<I, M>(&mut self, markings: I) -> &mut Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        self.foreign_government_markings = markings.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_foreign_government_marking(&mut self, marking: impl Into<String>) -> &mut Self {
        self.foreign_government_markings.insert(marking.into());
        self
    }

    pub fn clear_foreign_government_markings(&mut self) -> &mut Self {
        self.foreign_government_markings.clear();
        self
    }

    // Special handling

    pub fn special_handling_instruction(&self) -> Option<S::Instruction> {
        self.special_handling_instruction
    }

    pub fn set_special_handling_instruction(
        &mut self,
        instruction: impl Into<Option<S::Instruction>>,
    ) -> &mut Self {
        self.special_handling_instruction = instruction.into();
        self
    }

    pub fn special_handling_addressee(&self) -> Option<String> {
        self.special_handling_addressee.clone()
    }

    /// Sets the addressee. A blank addressee clears it.
    pub fn set_special_handling_addressee(&mut self, addressee: impl Into<String>) -> &mut Self {
        let addressee = addressee.into();
        self.special_handling_addressee = (!addressee.trim().is_empty()).then_some(addressee);
        self
    }

    pub fn clear_special_handling_addressee(&mut self) -> &mut Self {
        self.special_handling_addressee = None;
        self
    }

    /// Selects `instruction` and drops any addressee.
    pub fn special_handling(&mut self, instruction: S::Instruction) -> &mut Self {
        self.special_handling_instruction = Some(instruction);
        self.special_handling_addressee = None;
        self
    }

    pub fn has_special_handling(&self) -> bool {
        self.special_handling_instruction.is_some()
    }

    pub fn clear_special_handling(&mut self) -> &mut Self {
        self.special_handling_instruction = None;
        self.special_handling_addressee = None;
        self
    }

    // Releasability

    pub fn releasability(&self) -> Option<S::Releasability> {
        self.releasability
    }

    /// Sets or clears the releasability type.
    ///
    /// Selecting the releasable-to type inserts the home nation into the
    /// destination list. Other types leave the list untouched.
    pub fn set_releasability(
        &mut self,
        releasability: impl Into<Option<S::Releasability>>,
    ) -> &mut Self {
        self.releasability = releasability.into();
        if self.releasability.is_some_and(Releasability::is_releasable_to) {
            self.releasable_to
                .insert(S::profile().home_nation, &Self::nation_order());
        }
        self
    }

    /// A copy of the destination list, sorted by the configured order.
    pub fn releasable_to(&self) -> DestinationList {
        let mut list = self.releasable_to.clone();
        list.sort(&Self::nation_order());
        list
    }

    pub fn set_releasable_to<I, N>(&mut self, nations: I) -> &mut Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.releasable_to.clear();
        let order = Self::nation_order();
        for nation in nations {
            self.releasable_to.insert(nation, &order);
        }
        self
    }

    pub fn add_releasable_to(&mut self, nation: impl Into<String>) -> &mut Self {
        self.releasable_to.insert(nation, &Self::nation_order());
        self
    }

    pub fn clear_releasable_to(&mut self) -> &mut Self {
        self.releasable_to.clear();
        self
    }

    /// Clears both the releasability type and the destination list.
    pub fn clear_releasability(&mut self) -> &mut Self {
        self.releasability = None;
        self.clear_releasable_to()
    }

    pub fn has_releasability(&self) -> bool {
        self.releasability.is_some()
    }

    /// Selects an eyes-only style releasability and empties the destination list.
    pub fn eyes_only(&mut self, releasability: S::Releasability) -> &mut Self {
        self.releasability = Some(releasability);
        self.releasable_to.clear();
        self
    }

    /// Selects the releasable-to type with the home nation plus `nations`,
    /// replacing any existing destinations.
    pub fn releasable_to_nations<I, N>(&mut self, nations: I) -> &mut Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.set_releasable_to(nations)
            .set_releasability(S::Releasability::RELEASABLE_TO)
    }

    // National markings

    pub fn national_markings(&self) -> &S::NationalMarkings {
        &self.national_markings
    }

    pub fn set_national_markings(&mut self, markings: S::NationalMarkings) -> &mut Self {
        self.national_markings = markings;
        self
    }

    pub fn clear_national_markings(&mut self) -> &mut Self {
        self.national_markings = S::NationalMarkings::default();
        self
    }

    // Whole label

    /// Returns true if any field subject to the caveat floor is populated.
    pub fn has_security_caveats(&self) -> bool {
        !self.code_words.is_empty()
            || !self.foreign_government_markings.is_empty()
            || self.special_handling_instruction.is_some()
            || self.releasability.is_some()
            || self.accountable_material
            || self.national_markings.has_security_caveats()
    }

    /// Resets every field.
    pub fn clear(&mut self) -> &mut Self {
        *self = Self::new();
        self
    }

    /// Every rule violation, in rule order. Empty when the builder is valid.
    pub fn violations(&self) -> Vec<String> {
        validate::violations(self)
    }

    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }

    /// Validates the builder and freezes it into a [`Label`].
    ///
    /// Each violation is logged at error level through the configured logger
    /// before the error is returned.
    pub fn build(&self) -> Result<Label<S>, Error> {
        let violations = self.violations();
        match self.classification {
            Some(classification) if violations.is_empty() => Ok(Label::new(
                classification,
                self.information_management_markers(),
                self.security_caveats(),
                self.national_markings.clone(),
            )),
            _ => {
                let logger = config::logger();
                for violation in &violations {
                    error!(logger, "label rejected"; "scheme" => S::profile().key, "violation" => violation);
                }
                Err(Error::InvalidLabelState { violations })
            }
        }
    }

    fn security_caveats(&self) -> Option<SecurityCaveats<S>> {
        let has_caveats = !self.code_words.is_empty()
            || !self.foreign_government_markings.is_empty()
            || self.special_handling_instruction.is_some()
            || self.releasability.is_some()
            || self.accountable_material;
        if !has_caveats {
            return None;
        }
        let addressee = self
            .special_handling_addressee
            .clone()
            .filter(|addressee| !addressee.trim().is_empty());
        let special_handling = self
            .special_handling_instruction
            .map(|instruction| SpecialHandlingCaveat::new(instruction, addressee));
        let releasability = self
            .releasability
            .map(|releasability| ReleasabilityCaveat::new(releasability, self.releasable_to()));
        Some(SecurityCaveats::new(
            self.code_words.clone(),
            self.foreign_government_markings.clone(),
            special_handling,
            releasability,
            self.accountable_material,
        ))
    }
}

impl<S: Scheme> From<&Label<S>> for LabelBuilder<S> {
    fn from(label: &Label<S>) -> Self {
        Self::from_label(label)
    }
}
