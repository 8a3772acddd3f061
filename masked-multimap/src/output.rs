//! Output types for logging boundaries.
//!
//! This module provides the placeholders used by masked rendering and the
//! types every logging sink consumes:
//!
//! - [`MaskedOutput`]: The output enum (Text or Json)
//! - [`ToMaskedOutput`]: Trait for types that can produce masked output

#[cfg(feature = "json")]
use serde_json::Value as JsonValue;

/// Rendered in place of the values of a masked key.
pub const PROTECTED_PLACEHOLDER: &str = "[PROTECTED]";

/// Rendered in place of a key or value that is the map being rendered.
pub const SELF_REFERENCE_PLACEHOLDER: &str = "(this map)";

/// Rendered by a [`SharedMultiMap`](crate::SharedMultiMap) whose map is
/// mutably borrowed at formatting time.
pub const MAP_IN_USE_PLACEHOLDER: &str = "(map in use)";

// =============================================================================
// MaskedOutput - Output produced at logging boundaries
// =============================================================================

/// Output produced at a logging boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MaskedOutput {
    Text(String),
    #[cfg(feature = "json")]
    Json(JsonValue),
}

impl MaskedOutput {
    /// Returns the output as a flat string.
    ///
    /// JSON output is rendered compactly.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            MaskedOutput::Text(text) => text,
            #[cfg(feature = "json")]
            MaskedOutput::Json(json) => json.to_string(),
        }
    }
}

// =============================================================================
// ToMaskedOutput - Trait for producing logging-safe output
// =============================================================================

/// Produces a logging-safe output representation.
pub trait ToMaskedOutput {
    #[must_use]
    fn to_masked_output(&self) -> MaskedOutput;
}

impl ToMaskedOutput for MaskedOutput {
    fn to_masked_output(&self) -> MaskedOutput {
        self.clone()
    }
}

impl<T: ToMaskedOutput + ?Sized> ToMaskedOutput for &T {
    fn to_masked_output(&self) -> MaskedOutput {
        (**self).to_masked_output()
    }
}
