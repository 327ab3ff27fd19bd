//! A downstream vocabulary with explicit marking text and a container name.

use protective_marking::Vocabulary;
use serde::{Deserialize, Serialize};

#[derive(
    Vocabulary, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[vocabulary(name = "Dissemination Control")]
#[serde(into = "String", try_from = "String")]
enum Dissemination {
    #[vocabulary("NOFORN")]
    NoForeign,
    #[vocabulary("PROPIN")]
    Proprietary,
    Limdis,
}

fn main() {
    assert_eq!(Dissemination::NAME, "Dissemination Control");
    assert_eq!(Dissemination::ALL.len(), 3);
    assert_eq!(Dissemination::NoForeign.to_string(), "NOFORN");
    assert_eq!(Dissemination::Limdis.as_str(), "Limdis");
    assert_eq!(
        "PROPIN".parse::<Dissemination>(),
        Ok(Dissemination::Proprietary)
    );
    assert!(Dissemination::is_vocabulary("NOFORN"));

    let err = Dissemination::try_from("ORCON").unwrap_err();
    assert_eq!(err.to_string(), "'ORCON' is not a valid Dissemination Control");

    let text: String = Dissemination::Proprietary.into();
    assert_eq!(text, "PROPIN");
}
