//! Masked JSON output for structured logging sinks.
//!
//! [`OrderedMultiMap`] itself does not implement `Serialize`: serializing the
//! raw map would expose masked values. Instead, [`OrderedMultiMap::masked_entries`]
//! returns a view that serializes as a JSON object in key order:
//!
//! ```text
//! {"username": ["alice"], "password": "[PROTECTED]", "self": ["(this map)"]}
//! ```
//!
//! - [`MaskedEntries`]: `Serialize` view with masking applied
//! - [`MaskedJson`]: an already-masked `serde_json::Value`
//! - [`MaskedJsonRef`] / [`MaskedJsonExt`]: `ToMaskedOutput` wrapper producing JSON

use std::hash::Hash;

use serde::{
    Serialize, Serializer,
    ser::{SerializeMap, SerializeSeq},
};
use serde_json::Value as JsonValue;

use crate::{
    identity::{MapIdentity, Slot},
    map::OrderedMultiMap,
    output::{MaskedOutput, PROTECTED_PLACEHOLDER, ToMaskedOutput},
};

// =============================================================================
// MaskedEntries - Serialize view over a map
// =============================================================================

/// Serializes an [`OrderedMultiMap`] with masking and self-reference handling.
pub struct MaskedEntries<'a, K, V>(&'a OrderedMultiMap<K, V>);

impl<K, V> OrderedMultiMap<K, V> {
    /// Returns a `Serialize` view of the map with masked keys replaced by
    /// `"[PROTECTED]"`.
    pub fn masked_entries(&self) -> MaskedEntries<'_, K, V> {
        MaskedEntries(self)
    }
}

struct MaskedValues<'a, V> {
    values: &'a [V],
    this: *const (),
}

impl<V> Serialize for MaskedValues<'_, V>
where
    V: Serialize + MapIdentity,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.values.len()))?;
        for value in self.values {
            seq.serialize_element(&Slot::of(value, self.this))?;
        }
        seq.end()
    }
}

impl<K, V> Serialize for MaskedEntries<'_, K, V>
where
    K: Serialize + Hash + Eq + MapIdentity,
    V: Serialize + MapIdentity,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let map = self.0;
        let this = map.identity();
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (key, values) in map {
            let key_slot = Slot::of(key, this);
            if map.is_masked(key) {
                out.serialize_entry(&key_slot, PROTECTED_PLACEHOLDER)?;
            } else {
                out.serialize_entry(&key_slot, &MaskedValues { values, this })?;
            }
        }
        out.end()
    }
}

// =============================================================================
// MaskedJson - owned, already-masked JSON value
// =============================================================================

/// A JSON value produced from masked output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaskedJson(JsonValue);

impl MaskedJson {
    pub(crate) fn new(value: JsonValue) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_value(self) -> JsonValue {
        self.0
    }
}

impl ToMaskedOutput for MaskedJson {
    fn to_masked_output(&self) -> MaskedOutput {
        MaskedOutput::Json(self.0.clone())
    }
}

impl<K, V> OrderedMultiMap<K, V>
where
    K: Serialize + Hash + Eq + MapIdentity,
    V: Serialize + MapIdentity,
{
    /// Converts the masked view into a `serde_json::Value`.
    ///
    /// JSON object keys must be strings; if a key does not serialize to one,
    /// the returned value is a JSON string with the message
    /// `"Failed to serialize masked value: <error>"`.
    pub fn to_masked_json(&self) -> MaskedJson {
        let value = serde_json::to_value(self.masked_entries()).unwrap_or_else(|err| {
            JsonValue::String(format!("Failed to serialize masked value: {err}"))
        });
        MaskedJson::new(value)
    }
}

// =============================================================================
// MaskedJsonRef - Wrapper for masked JSON output
// =============================================================================

/// Wrapper that makes a map produce JSON at a `ToMaskedOutput` boundary.
pub struct MaskedJsonRef<'a, T: ?Sized>(&'a T);

impl<K, V> ToMaskedOutput for MaskedJsonRef<'_, OrderedMultiMap<K, V>>
where
    K: Serialize + Hash + Eq + MapIdentity,
    V: Serialize + MapIdentity,
{
    fn to_masked_output(&self) -> MaskedOutput {
        match serde_json::to_value(self.0.masked_entries()) {
            Ok(json) => MaskedOutput::Json(json),
            Err(err) => MaskedOutput::Text(format!("Failed to serialize masked value: {err}")),
        }
    }
}

/// Extension trait to obtain a masked JSON output wrapper.
pub trait MaskedJsonExt {
    /// Wraps the value for explicit masked JSON output.
    fn masked_json(&self) -> MaskedJsonRef<'_, Self>
    where
        Self: Sized;
}

impl<K, V> MaskedJsonExt for OrderedMultiMap<K, V>
where
    K: Serialize + Hash + Eq + MapIdentity,
    V: Serialize + MapIdentity,
{
    fn masked_json(&self) -> MaskedJsonRef<'_, Self> {
        MaskedJsonRef(self)
    }
}
