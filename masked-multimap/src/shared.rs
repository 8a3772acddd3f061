//! Shared handle that lets a map contain itself.

use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    hash::{Hash, Hasher},
    rc::Rc,
};

use crate::{
    hash_code::HashCode,
    identity::MapIdentity,
    map::OrderedMultiMap,
    output::{MAP_IN_USE_PLACEHOLDER, MaskedOutput, ToMaskedOutput},
};

// =============================================================================
// SharedMultiMap - identity handle to an OrderedMultiMap
// =============================================================================

/// A reference-counted handle to an [`OrderedMultiMap`].
///
/// Handles compare and hash by identity: two handles are equal only when they
/// point at the same map. This is what lets a handle be stored inside the map
/// it points to, as a key or as a value, while that map is mutably borrowed.
/// The map then renders that entry as `(this map)`.
///
/// Contents are never compared: two handles to distinct maps with equal
/// entries are unequal, and `hash_code` is taken from the map address.
/// Compare the maps themselves (`*a.borrow() == *b.borrow()`) when content
/// equality is wanted.
///
/// Formatting a handle renders the pointed-to map with its masking applied.
///
/// ```rust
/// use std::fmt;
///
/// use masked_multimap::{MapIdentity, OrderedMultiMap, SharedMultiMap};
///
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// enum Field {
///     Text(&'static str),
///     Form(SharedMultiMap<&'static str, Field>),
/// }
///
/// impl MapIdentity for Field {
///     fn is_map(&self, map: *const ()) -> bool {
///         matches!(self, Field::Form(form) if form.is_map(map))
///     }
/// }
///
/// impl fmt::Display for Field {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         match self {
///             Field::Text(text) => f.write_str(text),
///             Field::Form(form) => write!(f, "{form}"),
///         }
///     }
/// }
///
/// let form = SharedMultiMap::new(OrderedMultiMap::new());
/// form.borrow_mut().add("name", Field::Text("alice"));
/// form.borrow_mut().add("parent", Field::Form(form.clone()));
///
/// assert_eq!(form.to_string(), "{name=[alice], parent=[(this map)]}");
/// # form.borrow_mut().clear();
/// ```
pub struct SharedMultiMap<K, V>(Rc<RefCell<OrderedMultiMap<K, V>>>);

impl<K, V> SharedMultiMap<K, V> {
    pub fn new(map: OrderedMultiMap<K, V>) -> Self {
        Self(Rc::new(RefCell::new(map)))
    }

    /// Borrows the map.
    ///
    /// # Panics
    ///
    /// Panics if the map is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, OrderedMultiMap<K, V>> {
        self.0.borrow()
    }

    /// Mutably borrows the map.
    ///
    /// # Panics
    ///
    /// Panics if the map is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, OrderedMultiMap<K, V>> {
        self.0.borrow_mut()
    }

    /// Borrows the map, or returns `None` if it is mutably borrowed.
    pub fn try_borrow(&self) -> Option<Ref<'_, OrderedMultiMap<K, V>>> {
        self.0.try_borrow().ok()
    }

    /// Returns `true` if both handles point at the same map.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the pointed-to map, comparable with the address a map
    /// passes to [`MapIdentity::is_map`].
    fn map_address(&self) -> *const () {
        self.0.as_ptr().cast_const().cast()
    }
}

impl<K, V> Clone for SharedMultiMap<K, V> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<K, V> From<OrderedMultiMap<K, V>> for SharedMultiMap<K, V> {
    fn from(map: OrderedMultiMap<K, V>) -> Self {
        Self::new(map)
    }
}

impl<K, V> PartialEq for SharedMultiMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<K, V> Eq for SharedMultiMap<K, V> {}

impl<K, V> Hash for SharedMultiMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}

impl<K, V> HashCode for SharedMultiMap<K, V> {
    fn hash_code(&self) -> i32 {
        self.map_address().addr().hash_code()
    }
}

impl<K, V> MapIdentity for SharedMultiMap<K, V> {
    fn is_map(&self, map: *const ()) -> bool {
        std::ptr::eq(self.map_address(), map)
    }
}

impl<K, V> fmt::Display for SharedMultiMap<K, V>
where
    OrderedMultiMap<K, V>: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_borrow() {
            Some(map) => fmt::Display::fmt(&*map, f),
            None => f.write_str(MAP_IN_USE_PLACEHOLDER),
        }
    }
}

impl<K, V> fmt::Debug for SharedMultiMap<K, V>
where
    OrderedMultiMap<K, V>: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<K, V> ToMaskedOutput for SharedMultiMap<K, V>
where
    OrderedMultiMap<K, V>: fmt::Display,
{
    fn to_masked_output(&self) -> MaskedOutput {
        MaskedOutput::Text(self.to_string())
    }
}
