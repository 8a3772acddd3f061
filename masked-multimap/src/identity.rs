//! Identity checks used to detect a map that contains itself.
//!
//! Rendering, equality and hashing never recurse into an element that *is* the
//! map being processed. The check is by address, not by value: a distinct map
//! with equal contents is still rendered, compared and hashed normally.

use std::{fmt, rc::Rc, sync::Arc};

use crate::{hash_code::HashCode, output::SELF_REFERENCE_PLACEHOLDER};

// =============================================================================
// MapIdentity - "is this element a handle to that map?"
// =============================================================================

/// Reports whether a key or value refers to a particular map by identity.
///
/// `map` is the address of an [`OrderedMultiMap`](crate::OrderedMultiMap).
/// Plain data never refers to a map, so the default returns `false`; only
/// handles such as [`SharedMultiMap`](crate::SharedMultiMap), or types that
/// wrap one, override it.
///
/// Implement it for your own key and value types. For most types an empty
/// impl is enough:
///
/// ```rust
/// use masked_multimap::MapIdentity;
///
/// struct UserId(u64);
///
/// impl MapIdentity for UserId {}
/// ```
pub trait MapIdentity {
    /// Returns `true` if `self` is a handle to the map at address `map`.
    fn is_map(&self, _map: *const ()) -> bool {
        false
    }
}

macro_rules! impl_map_identity_plain {
    ($($ty:ty),* $(,)?) => {
        $(impl MapIdentity for $ty {})*
    };
}

impl_map_identity_plain!(
    (),
    bool,
    char,
    str,
    String,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
);

// Only the element itself is checked; a sequence holding a handle is not a
// self-reference.
impl<T> MapIdentity for Vec<T> {}

impl<T: MapIdentity + ?Sized> MapIdentity for &T {
    fn is_map(&self, map: *const ()) -> bool {
        (**self).is_map(map)
    }
}

impl<T: MapIdentity + ?Sized> MapIdentity for Box<T> {
    fn is_map(&self, map: *const ()) -> bool {
        (**self).is_map(map)
    }
}

impl<T: MapIdentity + ?Sized> MapIdentity for Rc<T> {
    fn is_map(&self, map: *const ()) -> bool {
        (**self).is_map(map)
    }
}

impl<T: MapIdentity + ?Sized> MapIdentity for Arc<T> {
    fn is_map(&self, map: *const ()) -> bool {
        (**self).is_map(map)
    }
}

impl<T: MapIdentity> MapIdentity for Option<T> {
    fn is_map(&self, map: *const ()) -> bool {
        self.as_ref().is_some_and(|value| value.is_map(map))
    }
}

// =============================================================================
// Slot - an element as seen from inside a particular map
// =============================================================================

/// A key or value classified against the map that holds it.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Slot<'a, T: ?Sized> {
    /// The element is the containing map itself.
    ThisMap,
    Item(&'a T),
}

impl<'a, T: MapIdentity + ?Sized> Slot<'a, T> {
    pub(crate) fn of(item: &'a T, map: *const ()) -> Self {
        if item.is_map(map) {
            Slot::ThisMap
        } else {
            Slot::Item(item)
        }
    }
}

impl<T: HashCode + ?Sized> Slot<'_, T> {
    /// Self-references contribute `0`, like a null element.
    pub(crate) fn hash_code(&self) -> i32 {
        match self {
            Slot::ThisMap => 0,
            Slot::Item(item) => item.hash_code(),
        }
    }
}

impl<T: fmt::Display + ?Sized> fmt::Display for Slot<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::ThisMap => f.write_str(SELF_REFERENCE_PLACEHOLDER),
            Slot::Item(item) => write!(f, "{item}"),
        }
    }
}

#[cfg(feature = "json")]
impl<T: serde::Serialize + ?Sized> serde::Serialize for Slot<'_, T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::ThisMap => serializer.serialize_str(SELF_REFERENCE_PLACEHOLDER),
            Slot::Item(item) => item.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Handle(*const ());

    impl MapIdentity for Handle {
        fn is_map(&self, map: *const ()) -> bool {
            std::ptr::eq(self.0, map)
        }
    }

    impl fmt::Display for Handle {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("handle")
        }
    }

    #[test]
    fn plain_values_are_never_the_map() {
        let target = 7u8;
        let map = std::ptr::from_ref(&target).cast::<()>();
        assert!(!"text".is_map(map));
        assert!(!42i32.is_map(map));
        assert!(!Some(String::from("x")).is_map(map));
        assert!(!None::<String>.is_map(map));
    }

    #[test]
    fn wrappers_delegate_to_the_inner_value() {
        let target = 7u8;
        let map = std::ptr::from_ref(&target).cast::<()>();
        assert!(Box::new(Handle(map)).is_map(map));
        assert!(Rc::new(Handle(map)).is_map(map));
        assert!(Arc::new(Handle(map)).is_map(map));
        assert!(Some(Handle(map)).is_map(map));
        assert!(!Some(Handle(std::ptr::null())).is_map(map));
    }

    #[test]
    fn slot_renders_sentinel_for_the_map() {
        let target = 7u8;
        let map = std::ptr::from_ref(&target).cast::<()>();
        assert_eq!(Slot::of(&Handle(map), map).to_string(), "(this map)");
        assert_eq!(Slot::of(&Handle(std::ptr::null()), map).to_string(), "handle");
        assert_eq!(Slot::of("value", map).to_string(), "value");
    }
}
