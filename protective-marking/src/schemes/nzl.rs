//! New Zealand Protective Security Requirements markings.
//!
//! A New Zealand marking has two halves around the classification:
//! - policy and privacy endorsements, written before it, legal only on the
//!   policy and privacy rungs (IN-CONFIDENCE and SENSITIVE)
//! - national security endorsements, written after it in `//` separated
//!   sections, legal only from RESTRICTED up
//!
//! ```text
//! BUDGET Development SENSITIVE
//! Development SECRET//ACCOUNTABLE MATERIAL/KIWI//NOFORN/REL TO AUS, NZL
//! ```

use std::{collections::BTreeSet, fmt};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    config,
    countries::{FIVE_EYES, NZL},
    Classification, HandlingInstruction, Label, LabelBuilder, NationalMarkings, Releasability,
    Scheme, SchemeProfile, Vocabulary,
};

/// The New Zealand scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NewZealand;

pub static NEW_ZEALAND: SchemeProfile = SchemeProfile {
    key: "nzl",
    home_nation: NZL,
    alliance: FIVE_EYES,
    classifications: &[
        "UNCLASSIFIED",
        "IN-CONFIDENCE",
        "SENSITIVE",
        "RESTRICTED",
        "CONFIDENTIAL",
        "SECRET",
        "TOP SECRET",
    ],
    development_classifications: &[
        "Development UNCLASSIFIED",
        "Development IN-CONFIDENCE",
        "Development SENSITIVE",
        "Development RESTRICTED",
        "Development CONFIDENTIAL",
        "Development SECRET",
        "Development TOP SECRET",
    ],
    caveat_floor: 3,
    accountable_rung: Some(6),
    destination_separator: ", ",
};

impl Scheme for NewZealand {
    type Releasability = NzlReleasability;
    type Instruction = NzlInstruction;
    type NationalMarkings = NzlMarkings;

    fn profile() -> &'static SchemeProfile {
        &NEW_ZEALAND
    }

    fn check_national_markings(builder: &LabelBuilder<Self>, report: &mut Vec<String>) {
        let markings = &builder.national_markings;
        let endorsements = &markings.endorsements;

        if let Some(classification) = builder.classification {
            if !classification.is_policy_and_privacy() && !endorsements.is_empty() {
                report.push(format!(
                    "May only have Policy And Privacy Endorsements for Policy And Privacy Classifications. They are not permitted on: {classification}"
                ));
            }
        }
        if endorsements.contains(&NzlEndorsement::EmbargoedForRelease)
            && markings.embargoed_for_release.is_none()
        {
            report.push(format!(
                "For Endorsement '{}', an Embargo Date Time must be set.",
                NzlEndorsement::EmbargoedForRelease
            ));
        }
        if endorsements.contains(&NzlEndorsement::ToBeReviewedOn)
            && markings.to_be_reviewed_on.is_none()
        {
            report.push(format!(
                "For Endorsement '{}', a Review Date Time must be set.",
                NzlEndorsement::ToBeReviewedOn
            ));
        }
        if endorsements.contains(&NzlEndorsement::UseOnly) && markings.use_only_departments.is_empty()
        {
            report.push(format!(
                "For Endorsement '{}', one or more Departments are required.",
                NzlEndorsement::UseOnly
            ));
        }
        if markings.embargoed_for_release.is_some()
            && !endorsements.contains(&NzlEndorsement::EmbargoedForRelease)
        {
            report.push(format!(
                "If an Embargoed For Release Date Time is set, an '{}' Endorsement is required.",
                NzlEndorsement::EmbargoedForRelease
            ));
        }
        if markings.to_be_reviewed_on.is_some()
            && !endorsements.contains(&NzlEndorsement::ToBeReviewedOn)
        {
            report.push(format!(
                "If a To Be Reviewed Date Time is set, a '{}' Endorsement is required.",
                NzlEndorsement::ToBeReviewedOn
            ));
        }
        if !markings.use_only_departments.is_empty()
            && !endorsements.contains(&NzlEndorsement::UseOnly)
        {
            report.push(format!(
                "If a List of Use Only Departments is set, a '{}' Endorsement is required.",
                NzlEndorsement::UseOnly
            ));
        }
    }

    fn merge_national_markings(builder: &mut LabelBuilder<Self>, label: &Label<Self>) {
        builder
            .national_markings
            .dissemination_marks
            .extend(label.national_markings().dissemination_marks.iter().cloned());
    }

    fn fmt_label(label: &Label<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let markings = label.national_markings();
        let date_time_format = config::date_time_format();
        for endorsement in &markings.endorsements {
            markings.fmt_endorsement(*endorsement, &date_time_format, f)?;
            f.write_str(" ")?;
        }

        write!(f, "{}", label.classification())?;

        let mut controls: Vec<String> = Vec::new();
        let mut dissemination: Vec<String> = Vec::new();
        dissemination.extend(markings.dissemination_marks.iter().cloned());
        if let Some(caveats) = label.security_caveats() {
            let top_secret = label.classification() == Classification::<NewZealand>::TOP_SECRET;
            if caveats.accountable_material() && !top_secret {
                controls.push("ACCOUNTABLE MATERIAL".to_owned());
            }
            controls.extend(caveats.code_words().iter().cloned());
            controls.extend(caveats.foreign_government_markings().iter().cloned());
            if let Some(special_handling) = caveats.special_handling() {
                dissemination.push(special_handling.to_string());
            }
            if let Some(releasability) = caveats.releasability() {
                dissemination.push(releasability.to_string());
            }
        }
        for section in [controls, dissemination] {
            if !section.is_empty() {
                write!(f, "//{}", section.join("/"))?;
            }
        }

        for marker in label.information_management_markers() {
            write!(f, " {marker}")?;
        }
        Ok(())
    }
}

impl Classification<NewZealand> {
    pub const UNCLASSIFIED: Self = Self::at(0);
    pub const IN_CONFIDENCE: Self = Self::at(1);
    pub const SENSITIVE: Self = Self::at(2);
    pub const RESTRICTED: Self = Self::at(3);
    pub const CONFIDENTIAL: Self = Self::at(4);
    pub const SECRET: Self = Self::at(5);
    pub const TOP_SECRET: Self = Self::at(6);

    /// IN-CONFIDENCE and SENSITIVE, the rungs that take policy and privacy
    /// endorsements.
    pub fn is_policy_and_privacy(self) -> bool {
        self == Self::IN_CONFIDENCE || self == Self::SENSITIVE
    }

    /// RESTRICTED and above, the rungs that take national security endorsements.
    pub fn is_national_security(self) -> bool {
        self.permits_caveats()
    }
}

/// Policy and privacy endorsements, in marking order.
#[derive(
    Vocabulary, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[vocabulary(name = "Policy And Privacy Endorsement")]
#[serde(into = "String", try_from = "String")]
pub enum NzlEndorsement {
    #[vocabulary("APPOINTMENTS")]
    Appointments,
    #[vocabulary("BUDGET")]
    Budget,
    #[vocabulary("CABINET")]
    Cabinet,
    #[vocabulary("COMMERCIAL")]
    Commercial,
    /// Written after the departments it is limited to.
    #[vocabulary("USE ONLY")]
    UseOnly,
    /// Written with its date time.
    #[vocabulary("EMBARGOED FOR RELEASE")]
    EmbargoedForRelease,
    #[vocabulary("EVALUATE")]
    Evaluate,
    #[vocabulary("HONOURS")]
    Honours,
    #[vocabulary("LEGAL PRIVILEGE")]
    LegalPrivilege,
    #[vocabulary("MEDICAL")]
    Medical,
    #[vocabulary("STAFF")]
    Staff,
    #[vocabulary("POLICY")]
    Policy,
    /// Written with its date time.
    #[vocabulary("TO BE REVIEWED ON")]
    ToBeReviewedOn,
}

/// New Zealand endorsements that have no counterpart in the shared caveats.
///
/// Dissemination marks are national security endorsements and count as
/// security caveats. Everything else is a policy and privacy endorsement and
/// describes one document only, so it is not carried through a merge.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NzlMarkings {
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    endorsements: BTreeSet<NzlEndorsement>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    use_only_departments: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    embargoed_for_release: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_be_reviewed_on: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    dissemination_marks: BTreeSet<String>,
}

impl NzlMarkings {
    pub fn endorsements(&self) -> &BTreeSet<NzlEndorsement> {
        &self.endorsements
    }

    pub fn use_only_departments(&self) -> &BTreeSet<String> {
        &self.use_only_departments
    }

    pub fn embargoed_for_release(&self) -> Option<NaiveDateTime> {
        self.embargoed_for_release
    }

    pub fn to_be_reviewed_on(&self) -> Option<NaiveDateTime> {
        self.to_be_reviewed_on
    }

    pub fn dissemination_marks(&self) -> &BTreeSet<String> {
        &self.dissemination_marks
    }

    fn fmt_endorsement(
        &self,
        endorsement: NzlEndorsement,
        date_time_format: &str,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let time = match endorsement {
            NzlEndorsement::UseOnly => {
                let departments: Vec<&str> =
                    self.use_only_departments.iter().map(String::as_str).collect();
                return write!(f, "{} {endorsement}", departments.join(", "));
            }
            NzlEndorsement::EmbargoedForRelease => self.embargoed_for_release,
            NzlEndorsement::ToBeReviewedOn => self.to_be_reviewed_on,
            _ => None,
        };
        match time {
            Some(time) => write!(f, "{endorsement} {}", time.format(date_time_format)),
            None => write!(f, "{endorsement}"),
        }
    }
}

impl NationalMarkings for NzlMarkings {
    fn is_empty(&self) -> bool {
        self.endorsements.is_empty()
            && self.use_only_departments.is_empty()
            && self.embargoed_for_release.is_none()
            && self.to_be_reviewed_on.is_none()
            && self.dissemination_marks.is_empty()
    }

    fn has_security_caveats(&self) -> bool {
        !self.dissemination_marks.is_empty()
    }

    fn clear_provenance(&mut self) {
        self.endorsements.clear();
        self.use_only_departments.clear();
        self.embargoed_for_release = None;
        self.to_be_reviewed_on = None;
    }
}

#[derive(
    Vocabulary, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[vocabulary(name = "Releasability Type")]
#[serde(into = "String", try_from = "String")]
pub enum NzlReleasability {
    #[vocabulary("NZEO")]
    Nzeo,
    #[vocabulary("REL TO")]
    RelTo,
}

impl Releasability for NzlReleasability {
    const RELEASABLE_TO: Self = Self::RelTo;

    fn restriction(self) -> u8 {
        match self {
            Self::Nzeo => 0,
            Self::RelTo => 1,
        }
    }
}

/// The New Zealand scheme defines no special handling instructions.
#[derive(
    Vocabulary, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[vocabulary(name = "Special Handling Instruction")]
#[serde(into = "String", try_from = "String")]
pub enum NzlInstruction {}

impl HandlingInstruction for NzlInstruction {
    fn requires_addressee(self) -> bool {
        match self {}
    }
}

impl LabelBuilder<NewZealand> {
    pub fn unclassified(&mut self) -> &mut Self {
        self.set_classification(Classification::<NewZealand>::UNCLASSIFIED)
    }

    pub fn in_confidence(&mut self) -> &mut Self {
        self.set_classification(Classification::<NewZealand>::IN_CONFIDENCE)
    }

    pub fn sensitive(&mut self) -> &mut Self {
        self.set_classification(Classification::<NewZealand>::SENSITIVE)
    }

    pub fn restricted(&mut self) -> &mut Self {
        self.set_classification(Classification::<NewZealand>::RESTRICTED)
    }

    pub fn confidential(&mut self) -> &mut Self {
        self.set_classification(Classification::<NewZealand>::CONFIDENTIAL)
    }

    pub fn secret(&mut self) -> &mut Self {
        self.set_classification(Classification::<NewZealand>::SECRET)
    }

    /// Also confirms accountable material.
    pub fn top_secret(&mut self) -> &mut Self {
        self.set_classification(Classification::<NewZealand>::TOP_SECRET)
    }

    pub fn confirm_accountable_material(&mut self) -> &mut Self {
        self.set_accountable_material(true)
    }

    pub fn nzeo(&mut self) -> &mut Self {
        self.eyes_only(NzlReleasability::Nzeo)
    }

    /// `REL TO` to `NZL` plus `nations`, replacing any existing destinations.
    pub fn rel_to<I, N>(&mut self, nations: I) -> &mut Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.releasable_to_nations(nations)
    }

    /// Adds a sensitive compartment. Compartments are stored as code words.
    pub fn add_compartment(&mut self, compartment: impl Into<String>) -> &mut Self {
        self.add_code_word(compartment)
    }

    // Dissemination marks

    pub fn dissemination_marks(&self) -> BTreeSet<String> {
        self.national_markings.dissemination_marks.clone()
    }

    pub fn set_dissemination_marks<I, M>(&mut self, marks: I) -> &mut Self
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        self.national_markings.dissemination_marks = marks.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_dissemination_mark(&mut self, mark: impl Into<String>) -> &mut Self {
        self.national_markings.dissemination_marks.insert(mark.into());
        self
    }

    pub fn clear_dissemination_marks(&mut self) -> &mut Self {
        self.national_markings.dissemination_marks.clear();
        self
    }

    // Policy and privacy endorsements

    pub fn policy_and_privacy_endorsements(&self) -> BTreeSet<NzlEndorsement> {
        self.national_markings.endorsements.clone()
    }

    /// Replaces the endorsements. Departments and date times are left alone.
    pub fn set_policy_and_privacy_endorsements(
        &mut self,
        endorsements: impl IntoIterator<Item = NzlEndorsement>,
    ) -> &mut Self {
        self.national_markings.endorsements = endorsements.into_iter().collect();
        self
    }

    pub fn add_policy_and_privacy_endorsement(&mut self, endorsement: NzlEndorsement) -> &mut Self {
        self.national_markings.endorsements.insert(endorsement);
        self
    }

    pub fn has_policy_and_privacy_endorsements(&self) -> bool {
        !self.national_markings.endorsements.is_empty()
    }

    /// Clears the endorsements together with their departments and date times.
    pub fn clear_policy_and_privacy_endorsements(&mut self) -> &mut Self {
        self.national_markings.clear_provenance();
        self
    }

    pub fn use_only_departments(&self) -> BTreeSet<String> {
        self.national_markings.use_only_departments.clone()
    }

    pub fn set_use_only_departments<I, D>(&mut self, departments: I) -> &mut Self
    where
        I: IntoIterator<Item = D>,
        D: Into<String>,
    {
        self.national_markings.use_only_departments =
            departments.into_iter().map(Into::into).collect();
        self
    }

    pub fn add_use_only_department(&mut self, department: impl Into<String>) -> &mut Self {
        self.national_markings
            .use_only_departments
            .insert(department.into());
        self
    }

    pub fn clear_use_only_departments(&mut self) -> &mut Self {
        self.national_markings.use_only_departments.clear();
        self
    }

    pub fn embargoed_for_release_time(&self) -> Option<NaiveDateTime> {
        self.national_markings.embargoed_for_release
    }

    pub fn set_embargoed_for_release_time(
        &mut self,
        time: impl Into<Option<NaiveDateTime>>,
    ) -> &mut Self {
        self.national_markings.embargoed_for_release = time.into();
        self
    }

    pub fn to_be_reviewed_on_time(&self) -> Option<NaiveDateTime> {
        self.national_markings.to_be_reviewed_on
    }

    pub fn set_to_be_reviewed_on_time(
        &mut self,
        time: impl Into<Option<NaiveDateTime>>,
    ) -> &mut Self {
        self.national_markings.to_be_reviewed_on = time.into();
        self
    }

    /// Adds `USE ONLY`, replacing the departments with `departments`.
    pub fn department_use_only<I, D>(&mut self, departments: I) -> &mut Self
    where
        I: IntoIterator<Item = D>,
        D: Into<String>,
    {
        self.set_use_only_departments(departments)
            .add_policy_and_privacy_endorsement(NzlEndorsement::UseOnly)
    }

    pub fn embargoed_for_release(&mut self, time: NaiveDateTime) -> &mut Self {
        self.set_embargoed_for_release_time(time)
            .add_policy_and_privacy_endorsement(NzlEndorsement::EmbargoedForRelease)
    }

    pub fn to_be_reviewed_on(&mut self, time: NaiveDateTime) -> &mut Self {
        self.set_to_be_reviewed_on_time(time)
            .add_policy_and_privacy_endorsement(NzlEndorsement::ToBeReviewedOn)
    }

    pub fn appointments(&mut self) -> &mut Self {
        self.add_policy_and_privacy_endorsement(NzlEndorsement::Appointments)
    }

    pub fn budget(&mut self) -> &mut Self {
        self.add_policy_and_privacy_endorsement(NzlEndorsement::Budget)
    }

    pub fn cabinet(&mut self) -> &mut Self {
        self.add_policy_and_privacy_endorsement(NzlEndorsement::Cabinet)
    }

    pub fn commercial(&mut self) -> &mut Self {
        self.add_policy_and_privacy_endorsement(NzlEndorsement::Commercial)
    }

    pub fn evaluate(&mut self) -> &mut Self {
        self.add_policy_and_privacy_endorsement(NzlEndorsement::Evaluate)
    }

    pub fn honours(&mut self) -> &mut Self {
        self.add_policy_and_privacy_endorsement(NzlEndorsement::Honours)
    }

    /// The `LEGAL PRIVILEGE` endorsement, not the information management marker.
    pub fn legal_privilege_endorsement(&mut self) -> &mut Self {
        self.add_policy_and_privacy_endorsement(NzlEndorsement::LegalPrivilege)
    }

    pub fn medical(&mut self) -> &mut Self {
        self.add_policy_and_privacy_endorsement(NzlEndorsement::Medical)
    }

    pub fn staff(&mut self) -> &mut Self {
        self.add_policy_and_privacy_endorsement(NzlEndorsement::Staff)
    }

    pub fn policy(&mut self) -> &mut Self {
        self.add_policy_and_privacy_endorsement(NzlEndorsement::Policy)
    }
}
