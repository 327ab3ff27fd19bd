//! Australian Protective Security Policy Framework markings.

use serde::{Deserialize, Serialize};

use crate::{
    countries::{AUS, FIVE_EYES},
    Classification, HandlingInstruction, LabelBuilder, Releasability, Scheme, SchemeProfile,
    Vocabulary,
};

/// The Australian scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Australia;

pub static AUSTRALIA: SchemeProfile = SchemeProfile {
    key: "aus",
    home_nation: AUS,
    alliance: FIVE_EYES,
    classifications: &[
        "UNOFFICIAL",
        "OFFICIAL",
        "OFFICIAL: Sensitive",
        "PROTECTED",
        "SECRET",
        "TOP SECRET",
    ],
    development_classifications: &[
        "Development UNOFFICIAL",
        "Development OFFICIAL",
        "Development OFFICIAL: Sensitive",
        "Development PROTECTED",
        "Development SECRET",
        "Development TOP SECRET",
    ],
    caveat_floor: 3,
    accountable_rung: None,
    destination_separator: "/",
};

impl Scheme for Australia {
    type Releasability = AusReleasability;
    type Instruction = AusInstruction;
    type NationalMarkings = ();

    fn profile() -> &'static SchemeProfile {
        &AUSTRALIA
    }
}

impl Classification<Australia> {
    pub const UNOFFICIAL: Self = Self::at(0);
    pub const OFFICIAL: Self = Self::at(1);
    pub const OFFICIAL_SENSITIVE: Self = Self::at(2);
    pub const PROTECTED: Self = Self::at(3);
    pub const SECRET: Self = Self::at(4);
    pub const TOP_SECRET: Self = Self::at(5);
}

/// Australian releasability types, most restrictive first.
#[derive(
    Vocabulary, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[vocabulary(name = "Releasability Type")]
#[serde(into = "String", try_from = "String")]
pub enum AusReleasability {
    /// Australian eyes only.
    #[vocabulary("AUSTEO")]
    Austeo,
    /// Australian government access only.
    #[vocabulary("AGAO")]
    Agao,
    /// Releasable to the listed nations.
    #[vocabulary("REL")]
    Rel,
}

impl Releasability for AusReleasability {
    const RELEASABLE_TO: Self = Self::Rel;

    fn restriction(self) -> u8 {
        match self {
            Self::Austeo => 0,
            Self::Agao => 1,
            Self::Rel => 2,
        }
    }
}

#[derive(
    Vocabulary, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[vocabulary(name = "Special Handling Instruction")]
#[serde(into = "String", try_from = "String")]
pub enum AusInstruction {
    #[vocabulary("DELICATE-SOURCE")]
    DelicateSource,
    #[vocabulary("ORCON")]
    Orcon,
    #[vocabulary("EXCLUSIVE-FOR")]
    ExclusiveFor,
    #[vocabulary("CABINET")]
    Cabinet,
    #[vocabulary("NATIONAL-CABINET")]
    NationalCabinet,
}

impl HandlingInstruction for AusInstruction {
    fn requires_addressee(self) -> bool {
        matches!(self, Self::ExclusiveFor)
    }
}

impl LabelBuilder<Australia> {
    pub fn unofficial(&mut self) -> &mut Self {
        self.set_classification(Classification::<Australia>::UNOFFICIAL)
    }

    pub fn official(&mut self) -> &mut Self {
        self.set_classification(Classification::<Australia>::OFFICIAL)
    }

    pub fn official_sensitive(&mut self) -> &mut Self {
        self.set_classification(Classification::<Australia>::OFFICIAL_SENSITIVE)
    }

    pub fn protected(&mut self) -> &mut Self {
        self.set_classification(Classification::<Australia>::PROTECTED)
    }

    pub fn secret(&mut self) -> &mut Self {
        self.set_classification(Classification::<Australia>::SECRET)
    }

    pub fn top_secret(&mut self) -> &mut Self {
        self.set_classification(Classification::<Australia>::TOP_SECRET)
    }

    pub fn austeo(&mut self) -> &mut Self {
        self.eyes_only(AusReleasability::Austeo)
    }

    pub fn agao(&mut self) -> &mut Self {
        self.eyes_only(AusReleasability::Agao)
    }

    /// `REL` to `AUS` plus `nations`, replacing any existing destinations.
    pub fn rel<I, N>(&mut self, nations: I) -> &mut Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.releasable_to_nations(nations)
    }

    pub fn delicate_source(&mut self) -> &mut Self {
        self.special_handling(AusInstruction::DelicateSource)
    }

    pub fn orcon(&mut self) -> &mut Self {
        self.special_handling(AusInstruction::Orcon)
    }

    /// Selects `EXCLUSIVE-FOR` with its addressee.
    ///
    /// A blank addressee is accepted here and reported by validation.
    pub fn exclusive_for(&mut self, addressee: impl Into<String>) -> &mut Self {
        self.special_handling(AusInstruction::ExclusiveFor)
            .set_special_handling_addressee(addressee)
    }

    pub fn cabinet(&mut self) -> &mut Self {
        self.special_handling(AusInstruction::Cabinet)
    }

    pub fn national_cabinet(&mut self) -> &mut Self {
        self.special_handling(AusInstruction::NationalCabinet)
    }
}
