//! Errors raised by the label engine.

use thiserror::Error;

/// Errors returned by label construction and vocabulary lookups.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A string does not belong to the vocabulary it was parsed against.
    ///
    /// For classifications this includes names from the inactive name table: a
    /// production name is rejected in development mode and vice versa.
    #[error("'{value}' is not a valid {vocabulary}")]
    InvalidVocabulary {
        vocabulary: &'static str,
        value: String,
    },
    /// The builder failed validation. Every violation is listed, in rule order.
    #[error("invalid label: {}", .violations.join("; "))]
    InvalidLabelState { violations: Vec<String> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_vocabulary_names_value_and_vocabulary() {
        let err = Error::InvalidVocabulary {
            vocabulary: "Releasability Type",
            value: "NOFORN".into(),
        };
        assert_eq!(err.to_string(), "'NOFORN' is not a valid Releasability Type");
    }

    #[test]
    fn invalid_label_state_lists_every_violation() {
        let err = Error::InvalidLabelState {
            violations: vec!["first".into(), "second".into()],
        };
        assert_eq!(err.to_string(), "invalid label: first; second");
    }
}
