//! Adapters for emitting masked maps through `slog`.
//!
//! This module connects [`OrderedMultiMap`] with `slog` by providing
//! `slog::Value` implementations that only ever emit the masked rendering.
//!
//! It is responsible for:
//! - Ensuring the logged representation is derived from the masked text or
//!   the masked JSON view, never from the raw values.
//! - Avoiding fallible logging APIs: serialization failures are represented as
//!   placeholder strings rather than propagated as errors.
//!
//! It does not configure `slog`.

use std::{fmt, hash::Hash};

use serde::Serialize;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{
    identity::MapIdentity,
    json::MaskedJson,
    map::OrderedMultiMap,
    output::{MaskedOutput, ToMaskedOutput},
    shared::SharedMultiMap,
};

/// Marker trait for types whose `slog` integration always emits masked output.
///
/// This trait is implemented only for the map, its handle and the output
/// types. It is not a blanket impl for raw types.
///
/// ```compile_fail
/// use masked_multimap::slog::SlogMasked;
///
/// fn assert_slog_masked<T: SlogMasked>() {}
///
/// assert_slog_masked::<String>();
/// ```
pub trait SlogMasked: SlogValue {}

impl<T: SlogMasked + ?Sized> SlogMasked for &T {}

fn emit_output(
    output: &MaskedOutput,
    record: &Record<'_>,
    key: Key,
    serializer: &mut dyn Serializer,
) -> SlogResult {
    match output {
        MaskedOutput::Text(text) => serializer.emit_str(key, text),
        MaskedOutput::Json(json) => {
            let nested = slog::Serde(json.clone());
            SlogValue::serialize(&nested, record, key, serializer)
        }
    }
}

impl SlogValue for MaskedOutput {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        emit_output(self, record, key, serializer)
    }
}

impl SlogMasked for MaskedOutput {}

impl SlogValue for MaskedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value().clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

impl SlogMasked for MaskedJson {}

/// Logs the map as its masked text, e.g. `{user=[alice], password=[PROTECTED]}`.
impl<K, V> SlogValue for OrderedMultiMap<K, V>
where
    K: Hash + Eq + fmt::Display + MapIdentity,
    V: fmt::Display + MapIdentity,
{
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        emit_output(&self.to_masked_output(), record, key, serializer)
    }
}

impl<K, V> SlogMasked for OrderedMultiMap<K, V>
where
    K: Hash + Eq + fmt::Display + MapIdentity,
    V: fmt::Display + MapIdentity,
{
}

impl<K, V> SlogValue for SharedMultiMap<K, V>
where
    OrderedMultiMap<K, V>: fmt::Display,
{
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        emit_output(&self.to_masked_output(), record, key, serializer)
    }
}

impl<K, V> SlogMasked for SharedMultiMap<K, V> where OrderedMultiMap<K, V>: fmt::Display {}

/// Extension trait for logging a map as structured, masked JSON.
///
/// ## Example
/// ```ignore
/// use masked_multimap::slog::SlogMaskedExt;
///
/// info!(logger, "login attempt"; "form" => form.slog_masked_json());
/// ```
pub trait SlogMaskedExt {
    /// Returns a `slog::Value` that serializes the masked view as nested JSON.
    ///
    /// If the view cannot be converted into `serde_json::Value` (for example a
    /// key that is not a string), the value is a JSON string starting with
    /// `"Failed to serialize masked value"`.
    fn slog_masked_json(&self) -> MaskedJson;
}

impl<K, V> SlogMaskedExt for OrderedMultiMap<K, V>
where
    K: Serialize + Hash + Eq + MapIdentity,
    V: Serialize + MapIdentity,
{
    fn slog_masked_json(&self) -> MaskedJson {
        self.to_masked_json()
    }
}
