//! Integration tests for the slog module.
//!
//! These tests verify that:
//! - `OrderedMultiMap` logs as its masked text through `slog::Value`
//! - `slog_masked_json()` produces masked, structured JSON
//! - Serialization failures become placeholder strings instead of errors

#![cfg(feature = "slog")]

use std::{cell::RefCell, collections::HashMap, fmt::Arguments};

use masked_multimap::{
    MaskedOutput, OrderedMultiMap, SharedMultiMap,
    slog::{SlogMasked, SlogMaskedExt},
};
use serde_json::{Value as JsonValue, json};

// A test serializer that captures serialized key-value pairs
struct CapturingSerializer {
    captured: RefCell<HashMap<String, CapturedValue>>,
}

#[derive(Debug, Clone, PartialEq)]
enum CapturedValue {
    Str(String),
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    Unit,
    None,
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

    fn capture(&self, key: slog::Key, value: CapturedValue) -> slog::Result {
        self.captured.borrow_mut().insert(key.into(), value);
        Ok(())
    }
}

impl slog::Serializer for CapturingSerializer {
    fn emit_arguments(&mut self, key: slog::Key, val: &Arguments<'_>) -> slog::Result {
        self.capture(key, CapturedValue::Str(val.to_string()))
    }

    fn emit_str(&mut self, key: slog::Key, val: &str) -> slog::Result {
        self.capture(key, CapturedValue::Str(val.into()))
    }

    fn emit_bool(&mut self, key: slog::Key, val: bool) -> slog::Result {
        self.capture(key, CapturedValue::Bool(val))
    }

    fn emit_i64(&mut self, key: slog::Key, val: i64) -> slog::Result {
        self.capture(key, CapturedValue::I64(val))
    }

    fn emit_u64(&mut self, key: slog::Key, val: u64) -> slog::Result {
        self.capture(key, CapturedValue::U64(val))
    }

    fn emit_f64(&mut self, key: slog::Key, val: f64) -> slog::Result {
        self.capture(key, CapturedValue::F64(val))
    }

    fn emit_unit(&mut self, key: slog::Key) -> slog::Result {
        self.capture(key, CapturedValue::Unit)
    }

    fn emit_none(&mut self, key: slog::Key) -> slog::Result {
        self.capture(key, CapturedValue::None)
    }

    fn emit_serde(&mut self, key: slog::Key, val: &dyn slog::SerdeValue) -> slog::Result {
        let json = serde_json::to_value(val.as_serde()).unwrap_or(JsonValue::Null);
        self.capture(key, CapturedValue::Serde(json))
    }
}

fn serialize_to_capture<V: slog::Value, S: slog::Serializer>(
    value: &V,
    key: &'static str,
    serializer: &mut S,
) {
    static RS: slog::RecordStatic<'static> = slog::record_static!(slog::Level::Info, "");
    let args = format_args!("");
    let record = slog::Record::new(&RS, &args, slog::b!());
    value.serialize(&record, key, serializer).unwrap();
}

fn login_form() -> OrderedMultiMap<&'static str, &'static str> {
    let mut form = OrderedMultiMap::with_masked_keys(["password", "client_secret"]);
    form.add("username", "marissa");
    form.add("password", "koala");
    form.add("client_secret", "s3cr3t");
    form.add("scope", "openid");
    form
}

mod marker_trait {
    use super::*;

    #[test]
    fn maps_and_outputs_implement_slog_masked() {
        fn assert_slog_masked<T: SlogMasked>() {}

        assert_slog_masked::<OrderedMultiMap<String, String>>();
        assert_slog_masked::<SharedMultiMap<String, u32>>();
        assert_slog_masked::<MaskedOutput>();
        assert_slog_masked::<masked_multimap::MaskedJson>();
    }
}

mod map_value {
    use super::*;

    #[test]
    fn logs_masked_text() {
        let form = login_form();
        let mut serializer = CapturingSerializer::new();
        serialize_to_capture(&form, "form", &mut serializer);

        assert_eq!(
            serializer.get("form"),
            Some(CapturedValue::Str(
                "{username=[marissa], password=[PROTECTED], client_secret=[PROTECTED], \
                 scope=[openid]}"
                    .to_string()
            ))
        );
    }

    #[test]
    fn logs_shared_map_text() {
        let shared = SharedMultiMap::new(login_form());
        let mut serializer = CapturingSerializer::new();
        serialize_to_capture(&shared, "form", &mut serializer);

        let Some(CapturedValue::Str(text)) = serializer.get("form") else {
            panic!("expected captured string");
        };
        assert!(text.contains("password=[PROTECTED]"));
        assert!(!text.contains("koala"));
    }

    #[test]
    fn logs_empty_map() {
        let form: OrderedMultiMap<String, String> = OrderedMultiMap::new();
        let mut serializer = CapturingSerializer::new();
        serialize_to_capture(&form, "form", &mut serializer);

        assert_eq!(
            serializer.get("form"),
            Some(CapturedValue::Str("{}".to_string()))
        );
    }
}

mod slog_masked_json {
    use super::*;

    #[test]
    fn emits_nested_masked_json() {
        let form = login_form();
        let mut serializer = CapturingSerializer::new();
        serialize_to_capture(&form.slog_masked_json(), "form", &mut serializer);

        assert_eq!(
            serializer.get("form"),
            Some(CapturedValue::Serde(json!({
                "username": ["marissa"],
                "password": "[PROTECTED]",
                "client_secret": "[PROTECTED]",
                "scope": ["openid"],
            })))
        );
    }

    #[test]
    fn nested_json_keeps_insertion_order() {
        let form = login_form();
        let mut serializer = CapturingSerializer::new();
        serialize_to_capture(&form.slog_masked_json(), "form", &mut serializer);

        let Some(CapturedValue::Serde(json)) = serializer.get("form") else {
            panic!("expected captured json");
        };
        assert_eq!(
            json.to_string(),
            r#"{"username":["marissa"],"password":"[PROTECTED]","client_secret":"[PROTECTED]","scope":["openid"]}"#
        );
    }

    #[test]
    fn masked_values_never_appear_in_json() {
        let form = login_form();
        let json = form.slog_masked_json().into_value().to_string();

        assert!(!json.contains("koala"));
        assert!(!json.contains("s3cr3t"));
    }

    #[test]
    fn non_string_keys_become_placeholder_string() {
        let mut form = OrderedMultiMap::new();
        form.add(vec![1u8, 2], "pair");

        match form.slog_masked_json().into_value() {
            JsonValue::String(message) => {
                assert!(message.starts_with("Failed to serialize masked value"));
            }
            other => panic!("expected placeholder string, got {other}"),
        }
    }
}
