//! Cycle-safe equality and hashing.
//!
//! An element that is the map itself is compared and hashed as the sentinel
//! [`Slot::ThisMap`]: it equals only another map's self-reference and hashes
//! like a null element. The masking set takes no part in either.

use std::hash::{Hash, Hasher};

use super::OrderedMultiMap;
use crate::{hash_code::HashCode, identity::MapIdentity, identity::Slot};

impl<K, V> OrderedMultiMap<K, V>
where
    K: MapIdentity,
    V: MapIdentity,
{
    /// Returns the 32-bit content hash of the map.
    ///
    /// For every entry the key hash is `1 + key.hash_code()` (just `1` when the
    /// key is this map) and the sequence hash starts at `1` and folds
    /// `31 * h + e`, where a self-referencing element contributes `0`. Each
    /// entry contributes `key_hash ^ sequence_hash` and contributions are
    /// summed, so the result does not depend on key order. All arithmetic wraps.
    ///
    /// ```rust
    /// use masked_multimap::OrderedMultiMap;
    ///
    /// let mut map = OrderedMultiMap::new();
    /// map.add("a", 1);
    /// // key: 1 + 97, sequence: 31 * 1 + 1
    /// assert_eq!(map.hash_code(), 98 ^ 32);
    /// ```
    pub fn hash_code(&self) -> i32
    where
        K: HashCode,
        V: HashCode,
    {
        let this = self.identity();
        self.entries.iter().fold(0i32, |total, (key, values)| {
            let key_hash = 1i32.wrapping_add(Slot::of(key, this).hash_code());
            let values_hash = values.iter().fold(1i32, |hash, value| {
                hash.wrapping_mul(31)
                    .wrapping_add(Slot::of(value, this).hash_code())
            });
            total.wrapping_add(key_hash ^ values_hash)
        })
    }

    /// Compares the entries of two maps, treating each map's self-references
    /// as the same sentinel.
    fn entries_eq(&self, other: &Self) -> bool
    where
        K: Hash + Eq,
        V: PartialEq,
    {
        if self.entries.len() != other.entries.len() {
            return false;
        }

        let this = self.identity();
        let that = other.identity();

        self.entries.iter().all(|(key, values)| {
            let theirs = if key.is_map(this) {
                other
                    .entries
                    .iter()
                    .find(|(their_key, _)| their_key.is_map(that))
                    .map(|(_, their_values)| their_values)
            } else {
                other
                    .entries
                    .get_key_value(key)
                    .filter(|(their_key, _)| !their_key.is_map(that))
                    .map(|(_, their_values)| their_values)
            };

            theirs.is_some_and(|their_values| {
                values.len() == their_values.len()
                    && values
                        .iter()
                        .zip(their_values)
                        .all(|(ours, theirs)| Slot::of(ours, this) == Slot::of(theirs, that))
            })
        })
    }
}

impl<K, V> PartialEq for OrderedMultiMap<K, V>
where
    K: Hash + Eq + MapIdentity,
    V: PartialEq + MapIdentity,
{
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.entries_eq(other)
    }
}

impl<K, V> Eq for OrderedMultiMap<K, V>
where
    K: Hash + Eq + MapIdentity,
    V: Eq + MapIdentity,
{
}

impl<K, V> Hash for OrderedMultiMap<K, V>
where
    K: Hash + Eq + HashCode + MapIdentity,
    V: HashCode + MapIdentity,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}
