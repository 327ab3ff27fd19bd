//! Without a container name the enum identifier is used.

use protective_marking::Vocabulary;
use serde::{Deserialize, Serialize};

#[derive(
    Vocabulary, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub enum Handling {
    #[vocabulary("SENSITIVE: Cabinet")]
    Cabinet,
}

fn main() {
    assert_eq!(Handling::NAME, "Handling");
    assert_eq!(
        Handling::from_vocabulary("SENSITIVE: Cabinet").unwrap(),
        Handling::Cabinet
    );
}
