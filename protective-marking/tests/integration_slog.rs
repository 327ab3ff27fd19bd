//! Integration tests for the slog module.
//!
//! These tests verify that:
//! - classifications and labels log their display string
//! - `into_label_json()` logs the serde form as a nested value (`json` feature)

use std::{cell::RefCell, collections::HashMap, fmt::Arguments};

use protective_marking::{
    countries::NZL,
    schemes::{Australia, NewZealand},
    Classification, LabelBuilder,
};
#[cfg(feature = "json")]
use serde_json::Value as JsonValue;

// A test serializer that captures serialized key-value pairs
struct CapturingSerializer {
    captured: RefCell<HashMap<String, CapturedValue>>,
}

#[derive(Debug, Clone, PartialEq)]
enum CapturedValue {
    Str(String),
    #[cfg(feature = "json")]
    Serde(JsonValue),
}

impl CapturingSerializer {
    fn new() -> Self {
        Self {
            captured: RefCell::new(HashMap::new()),
        }
    }

    fn get(&self, key: &str) -> Option<CapturedValue> {
        self.captured.borrow().get(key).cloned()
    }
}

impl slog::Serializer for CapturingSerializer {
    fn emit_arguments(&mut self, key: slog::Key, val: &Arguments<'_>) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.to_string()));
        Ok(())
    }

    fn emit_str(&mut self, key: slog::Key, val: &str) -> slog::Result {
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Str(val.into()));
        Ok(())
    }

    #[cfg(feature = "json")]
    fn emit_serde(&mut self, key: slog::Key, val: &dyn slog::SerdeValue) -> slog::Result {
        let json = serde_json::to_value(val.as_serde()).unwrap_or(JsonValue::Null);
        self.captured
            .borrow_mut()
            .insert(key.into(), CapturedValue::Serde(json));
        Ok(())
    }
}

/// Serializes a `slog::Value` into the capturing serializer under `key`.
fn serialize_to_capture<V: slog::Value>(value: &V, key: &'static str, serializer: &mut CapturingSerializer) {
    static RS: slog::RecordStatic<'static> = slog::record_static!(slog::Level::Info, "");
    let args = format_args!("");
    let record = slog::Record::new(&RS, &args, slog::b!());
    value.serialize(&record, key, serializer).unwrap();
}

#[test]
fn test_classification_logs_display_name() {
    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(
        &Classification::<NewZealand>::IN_CONFIDENCE,
        "classification",
        &mut serializer,
    );
    assert_eq!(
        serializer.get("classification"),
        Some(CapturedValue::Str("Development IN-CONFIDENCE".into()))
    );
}

#[test]
fn test_label_logs_rendered_marking() {
    let label = LabelBuilder::<Australia>::new()
        .secret()
        .add_code_word("AAA")
        .rel([NZL])
        .build()
        .unwrap();

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&label, "label", &mut serializer);
    assert_eq!(
        serializer.get("label"),
        Some(CapturedValue::Str("Development SECRET AAA REL AUS/NZL".into()))
    );
}

#[cfg(feature = "json")]
#[test]
fn test_into_label_json_logs_nested_value() {
    use protective_marking::slog::IntoLabelJson;

    let label = LabelBuilder::<Australia>::new()
        .protected()
        .personal_privacy()
        .build()
        .unwrap();

    let mut serializer = CapturingSerializer::new();
    serialize_to_capture(&(&label).into_label_json(), "label", &mut serializer);

    let Some(CapturedValue::Serde(json)) = serializer.get("label") else {
        panic!("expected a nested value");
    };
    assert_eq!(json["classification"], "Development PROTECTED");
    assert_eq!(json["information_management_markers"][0]["type"], "Personal Privacy");
    assert!(json["security_caveats"].is_null());

    let owned = label.into_label_json();
    serialize_to_capture(&owned, "owned", &mut serializer);
    assert!(matches!(serializer.get("owned"), Some(CapturedValue::Serde(_))));
}
