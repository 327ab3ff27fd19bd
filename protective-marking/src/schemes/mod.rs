//! Built-in national marking schemes.

mod aus;
mod nzl;
pub mod uk;

pub use aus::{AusInstruction, AusReleasability, Australia, AUSTRALIA};
pub use nzl::{
    NewZealand, NzlEndorsement, NzlInstruction, NzlMarkings, NzlReleasability, NEW_ZEALAND,
};
pub use uk::{
    UkHandlingInstruction, UkInstruction, UkMarkings, UkReleasability, UnitedKingdom,
    UNITED_KINGDOM,
};

use crate::SchemeProfile;

/// Profiles of every built-in scheme.
pub fn profiles() -> [&'static SchemeProfile; 3] {
    [&AUSTRALIA, &NEW_ZEALAND, &UNITED_KINGDOM]
}

/// Looks up a built-in profile by its configuration key.
pub fn profile(key: &str) -> Option<&'static SchemeProfile> {
    profiles().into_iter().find(|profile| profile.key == key)
}
