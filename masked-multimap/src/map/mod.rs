//! The ordered multi-value map.
//!
//! - `mod.rs`: storage, construction, multi-value and map operations
//! - `equality`: cycle-safe `PartialEq`, `Hash` and [`OrderedMultiMap::hash_code`]
//! - `display`: masked `Display`/`Debug` rendering

mod display;
mod equality;


use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap, HashSet},
    hash::Hash,
};

use indexmap::{IndexMap, map};

// =============================================================================
// OrderedMultiMap
// =============================================================================

/// An insertion-ordered map from keys to sequences of values.
///
/// Keys keep the order in which they were first inserted; removing a key keeps
/// the relative order of the rest. Each key owns a `Vec<V>`. [`add`] never
/// creates an empty sequence, but [`put`] accepts whatever the caller supplies.
///
/// Keys registered with [`mask`] (or one of the masking constructors) have
/// their values rendered as `[PROTECTED]` in `Display`, `Debug` and every
/// logging sink. The masking set is independent of the entries: a key can be
/// masked before or after it is inserted, and masking is not part of equality
/// or hashing.
///
/// The map is not synchronised; it is meant to be filled and read by a single
/// request handler and then dropped.
///
/// [`add`]: OrderedMultiMap::add
/// [`put`]: OrderedMultiMap::put
/// [`mask`]: OrderedMultiMap::mask
#[derive(Clone)]
pub struct OrderedMultiMap<K, V> {
    entries: IndexMap<K, Vec<V>>,
    masked_keys: HashSet<K>,
}

impl<K, V> Default for OrderedMultiMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> OrderedMultiMap<K, V> {
    /// Creates an empty map with no masked keys.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            masked_keys: HashSet::new(),
        }
    }

    /// Creates an empty map with room for `capacity` keys.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            masked_keys: HashSet::new(),
        }
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry. The masking set is kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> map::Keys<'_, K, Vec<V>> {
        self.entries.keys()
    }

    /// Iterates over value sequences in key order.
    pub fn values(&self) -> map::Values<'_, K, Vec<V>> {
        self.entries.values()
    }

    /// Iterates over `(key, sequence)` pairs in insertion order.
    pub fn iter(&self) -> map::Iter<'_, K, Vec<V>> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> map::IterMut<'_, K, Vec<V>> {
        self.entries.iter_mut()
    }

    /// Iterates over the masked keys in no particular order.
    pub fn masked_keys(&self) -> impl Iterator<Item = &K> {
        self.masked_keys.iter()
    }

    /// Address of this map, used for self-reference checks.
    pub(crate) fn identity(&self) -> *const () {
        std::ptr::from_ref(self).cast()
    }
}

impl<K, V> OrderedMultiMap<K, V>
where
    K: Hash + Eq,
{
    /// Creates an empty map that masks `key`.
    #[must_use]
    pub fn with_masked_key(key: K) -> Self {
        let mut map = Self::new();
        map.masked_keys.insert(key);
        map
    }

    /// Creates an empty map that masks every key in `keys`.
    #[must_use]
    pub fn with_masked_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut map = Self::new();
        map.masked_keys.extend(keys);
        map
    }

    /// Creates a map holding the given `(key, sequence)` pairs, in iteration order.
    ///
    /// Sequences are taken as they are, empty ones included. No key is masked.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
    {
        Self {
            entries: entries.into_iter().collect(),
            masked_keys: HashSet::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Masking
    // -------------------------------------------------------------------------

    /// Masks `key` in all text output. Returns `false` if it was already masked.
    pub fn mask(&mut self, key: K) -> bool {
        self.masked_keys.insert(key)
    }

    /// Stops masking `key`. Returns `false` if it was not masked.
    pub fn unmask<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.masked_keys.remove(key)
    }

    pub fn is_masked<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.masked_keys.contains(key)
    }

    // -------------------------------------------------------------------------
    // Multi-value operations
    // -------------------------------------------------------------------------

    /// Appends `value` to the sequence of `key`, creating it if absent.
    pub fn add(&mut self, key: K, value: V) {
        self.entries.entry(key).or_default().push(value);
    }

    /// Appends every value to the sequence of `key`, in order.
    ///
    /// An absent key is only inserted when `values` yields at least one value.
    pub fn add_all<I>(&mut self, key: K, values: I)
    where
        I: IntoIterator<Item = V>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return;
        }
        self.entries.entry(key).or_default().extend(values);
    }

    /// Returns the first value of `key`.
    ///
    /// `None` when the key is absent or its sequence is empty.
    pub fn get_first<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)?.first()
    }

    /// Replaces the sequence of `key` with the single `value`.
    pub fn set(&mut self, key: K, value: V) {
        self.entries.insert(key, vec![value]);
    }

    /// Calls [`set`](OrderedMultiMap::set) for every pair, in iteration order.
    pub fn set_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in values {
            self.set(key, value);
        }
    }

    /// Returns a map from each key to the first element of its sequence.
    ///
    /// Key order is preserved. Keys whose sequence is empty are skipped.
    pub fn to_single_value_map(&self) -> IndexMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.entries
            .iter()
            .filter_map(|(key, values)| Some((key.clone(), values.first()?.clone())))
            .collect()
    }

    /// Consuming form of [`to_single_value_map`](OrderedMultiMap::to_single_value_map).
    pub fn into_single_value_map(self) -> IndexMap<K, V> {
        self.entries
            .into_iter()
            .filter_map(|(key, values)| Some((key, values.into_iter().next()?)))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Map operations
    // -------------------------------------------------------------------------

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Returns `true` if some key maps to exactly `values`.
    pub fn contains_value(&self, values: &[V]) -> bool
    where
        V: PartialEq,
    {
        self.entries
            .values()
            .any(|sequence| sequence.as_slice() == values)
    }

    /// Returns the whole sequence of `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&Vec<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut Vec<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get_mut(key)
    }

    /// Stores `values` as the sequence of `key` and returns the previous one.
    ///
    /// A replaced key keeps its position.
    pub fn put(&mut self, key: K, values: Vec<V>) -> Option<Vec<V>> {
        self.entries.insert(key, values)
    }

    /// Calls [`put`](OrderedMultiMap::put) for every pair, in iteration order.
    pub fn put_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
    {
        self.entries.extend(entries);
    }

    /// Removes `key` and returns its sequence. The order of remaining keys is kept.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<Vec<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.shift_remove(key)
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl<K: Hash + Eq, V> From<IndexMap<K, Vec<V>>> for OrderedMultiMap<K, V> {
    fn from(entries: IndexMap<K, Vec<V>>) -> Self {
        Self {
            entries,
            masked_keys: HashSet::new(),
        }
    }
}

impl<K: Hash + Eq, V, S> From<HashMap<K, Vec<V>, S>> for OrderedMultiMap<K, V> {
    fn from(entries: HashMap<K, Vec<V>, S>) -> Self {
        Self::from_entries(entries)
    }
}

impl<K: Hash + Eq, V> From<BTreeMap<K, Vec<V>>> for OrderedMultiMap<K, V> {
    fn from(entries: BTreeMap<K, Vec<V>>) -> Self {
        Self::from_entries(entries)
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for OrderedMultiMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for OrderedMultiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V> IntoIterator for OrderedMultiMap<K, V> {
    type Item = (K, Vec<V>);
    type IntoIter = map::IntoIter<K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMultiMap<K, V> {
    type Item = (&'a K, &'a Vec<V>);
    type IntoIter = map::Iter<'a, K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut OrderedMultiMap<K, V> {
    type Item = (&'a K, &'a mut Vec<V>);
    type IntoIter = map::IterMut<'a, K, Vec<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter_mut()
    }
}
