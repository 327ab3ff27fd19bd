//! `slog` integration for labels.
//!
//! [`Classification`] and [`Label`] implement `slog::Value` and log their
//! display string, so key-value pairs read the same as the rendered marking and
//! follow the configured name table.
//!
//! With the `json` feature, [`IntoLabelJson`] logs a label as a nested JSON
//! object through `slog`'s nested-value support.

use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{Classification, Label, Scheme};

impl<S: Scheme> SlogValue for Classification<S> {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, &self.name())
    }
}

impl<S: Scheme> SlogValue for Label<S> {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, &self.to_string())
    }
}

#[cfg(feature = "json")]
pub use json::{IntoLabelJson, LabelJson};

#[cfg(feature = "json")]
mod json {
    use serde_json::Value as JsonValue;
    use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

    use crate::{Label, Scheme};

    /// A `slog::Value` holding a label's serde form.
    ///
    /// Serialization failures are logged as a placeholder string rather than
    /// returned to `slog`.
    pub struct LabelJson {
        value: JsonValue,
    }

    impl SlogValue for LabelJson {
        fn serialize(
            &self,
            record: &Record<'_>,
            key: Key,
            serializer: &mut dyn Serializer,
        ) -> SlogResult {
            let nested = slog::Serde(self.value.clone());
            SlogValue::serialize(&nested, record, key, serializer)
        }
    }

    /// Converts a label into a `slog::Value` that logs it as structured JSON.
    ///
    /// ```ignore
    /// use protective_marking::slog::IntoLabelJson;
    ///
    /// info!(logger, "document filed"; "label" => label.into_label_json());
    /// ```
    pub trait IntoLabelJson {
        fn into_label_json(self) -> LabelJson;
    }

    impl<S: Scheme> IntoLabelJson for Label<S> {
        fn into_label_json(self) -> LabelJson {
            (&self).into_label_json()
        }
    }

    impl<S: Scheme> IntoLabelJson for &Label<S> {
        fn into_label_json(self) -> LabelJson {
            let value = serde_json::to_value(self)
                .unwrap_or_else(|_| JsonValue::String("Failed to serialize label".to_owned()));
            LabelJson { value }
        }
    }
}
