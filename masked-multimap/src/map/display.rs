//! Masked text rendering.
//!
//! `Display` and `Debug` produce the same output, so a `{:?}` in a log line
//! cannot leak a masked value:
//!
//! ```text
//! {username=[alice], password=[PROTECTED], scope=[]}
//! ```

use std::{
    fmt::{self, Write as _},
    hash::Hash,
};

use super::OrderedMultiMap;
use crate::{
    identity::{MapIdentity, Slot},
    output::{MaskedOutput, PROTECTED_PLACEHOLDER, ToMaskedOutput},
};

impl<K, V> OrderedMultiMap<K, V>
where
    K: Hash + Eq + fmt::Display + MapIdentity,
    V: fmt::Display + MapIdentity,
{
    fn fmt_masked(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let this = self.identity();
        f.write_char('{')?;
        for (index, (key, values)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}=", Slot::of(key, this))?;

            // Masked values are never formatted.
            if self.masked_keys.contains(key) {
                f.write_str(PROTECTED_PLACEHOLDER)?;
                continue;
            }

            f.write_char('[')?;
            for (position, value) in values.iter().enumerate() {
                if position > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", Slot::of(value, this))?;
            }
            f.write_char(']')?;
        }
        f.write_char('}')
    }
}

impl<K, V> fmt::Display for OrderedMultiMap<K, V>
where
    K: Hash + Eq + fmt::Display + MapIdentity,
    V: fmt::Display + MapIdentity,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_masked(f)
    }
}

impl<K, V> fmt::Debug for OrderedMultiMap<K, V>
where
    K: Hash + Eq + fmt::Display + MapIdentity,
    V: fmt::Display + MapIdentity,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_masked(f)
    }
}

impl<K, V> ToMaskedOutput for OrderedMultiMap<K, V>
where
    K: Hash + Eq + fmt::Display + MapIdentity,
    V: fmt::Display + MapIdentity,
{
    fn to_masked_output(&self) -> MaskedOutput {
        MaskedOutput::Text(self.to_string())
    }
}
