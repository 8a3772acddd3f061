//! Adapters for emitting masked maps through `tracing`.
//!
//! This module provides two approaches:
//!
//! - **`TracingMaskedExt`**: Logs the masked text as a display value. Works
//!   with any tracing subscriber but loses structure.
//!
//! - **`TracingValuableExt`** (requires `tracing-valuable` feature): Logs the
//!   map as a `valuable::Mappable`. Masked keys map to the string
//!   `"[PROTECTED]"`; other keys map to a list of their values.
//!
//! # Example
//!
//! ```ignore
//! use masked_multimap::tracing::{TracingMaskedExt, TracingValuableExt};
//!
//! // As display string (always available with "tracing" feature)
//! tracing::info!(form = %form.tracing_masked());
//!
//! // As structured valuable (requires "tracing-valuable" feature)
//! tracing::info!(form = form.tracing_masked_valuable().as_value());
//! ```

use std::fmt;

use tracing::field::{DisplayValue, display};

use crate::{
    identity::MapIdentity,
    map::OrderedMultiMap,
    output::{MaskedOutput, ToMaskedOutput},
    shared::SharedMultiMap,
};

/// Marker trait for types whose `tracing` integration always emits masked output.
///
/// This trait is implemented only for the map, its handle and the output
/// types. It is not a blanket impl for raw types.
pub trait TracingMasked {}

/// Extension trait for logging masked values as display strings.
pub trait TracingMaskedExt {
    /// Wraps the masked rendering for `tracing` as a display value.
    fn tracing_masked(&self) -> DisplayValue<String>;
}

impl<T> TracingMaskedExt for T
where
    T: ToMaskedOutput,
{
    fn tracing_masked(&self) -> DisplayValue<String> {
        display(self.to_masked_output().into_text())
    }
}

impl TracingMasked for MaskedOutput {}

impl<K, V> TracingMasked for OrderedMultiMap<K, V>
where
    K: std::hash::Hash + Eq + fmt::Display + MapIdentity,
    V: fmt::Display + MapIdentity,
{
}

impl<K, V> TracingMasked for SharedMultiMap<K, V> where OrderedMultiMap<K, V>: fmt::Display {}

#[cfg(feature = "json")]
impl TracingMasked for crate::json::MaskedJson {}

#[cfg(feature = "json")]
impl<T: ?Sized> TracingMasked for crate::json::MaskedJsonRef<'_, T> {}

#[cfg(feature = "tracing-valuable")]
pub use self::valuable_view::{MaskedValuable, TracingValuableExt};

#[cfg(feature = "tracing-valuable")]
mod valuable_view {
    use std::hash::Hash;

    use valuable::{Listable, Mappable, Valuable, Value, Visit};

    use super::TracingMasked;
    use crate::{
        identity::MapIdentity,
        map::OrderedMultiMap,
        output::{PROTECTED_PLACEHOLDER, SELF_REFERENCE_PLACEHOLDER},
    };

    fn slot_value<'a, T>(item: &'a T, map: *const ()) -> Value<'a>
    where
        T: Valuable + MapIdentity,
    {
        if item.is_map(map) {
            Value::String(SELF_REFERENCE_PLACEHOLDER)
        } else {
            item.as_value()
        }
    }

    /// A masked, structured view of an [`OrderedMultiMap`] for `valuable`
    /// consumers.
    pub struct MaskedValuable<'a, K, V>(&'a OrderedMultiMap<K, V>);

    impl<K, V> Valuable for MaskedValuable<'_, K, V>
    where
        K: Valuable + Hash + Eq + MapIdentity,
        V: Valuable + MapIdentity,
    {
        fn as_value(&self) -> Value<'_> {
            Value::Mappable(self)
        }

        fn visit(&self, visit: &mut dyn Visit) {
            let map = self.0;
            let this = map.identity();
            for (key, values) in map {
                let key_value = slot_value(key, this);
                if map.is_masked(key) {
                    visit.visit_entry(key_value, Value::String(PROTECTED_PLACEHOLDER));
                } else {
                    let list = MaskedList { values, this };
                    visit.visit_entry(key_value, Value::Listable(&list));
                }
            }
        }
    }

    impl<K, V> Mappable for MaskedValuable<'_, K, V>
    where
        K: Valuable + Hash + Eq + MapIdentity,
        V: Valuable + MapIdentity,
    {
        fn size_hint(&self) -> (usize, Option<usize>) {
            let len = self.0.len();
            (len, Some(len))
        }
    }

    impl<K, V> TracingMasked for MaskedValuable<'_, K, V> {}

    struct MaskedList<'a, V> {
        values: &'a [V],
        this: *const (),
    }

    impl<V> Valuable for MaskedList<'_, V>
    where
        V: Valuable + MapIdentity,
    {
        fn as_value(&self) -> Value<'_> {
            Value::Listable(self)
        }

        fn visit(&self, visit: &mut dyn Visit) {
            for value in self.values {
                visit.visit_value(slot_value(value, self.this));
            }
        }
    }

    impl<V> Listable for MaskedList<'_, V>
    where
        V: Valuable + MapIdentity,
    {
        fn size_hint(&self) -> (usize, Option<usize>) {
            let len = self.values.len();
            (len, Some(len))
        }
    }

    /// Extension trait for logging a map as structured `valuable` data.
    ///
    /// This requires the `tracing-valuable` feature and a tracing subscriber
    /// that supports the `valuable` crate.
    pub trait TracingValuableExt<K, V> {
        /// Wraps the map in a masked `valuable::Mappable` view.
        fn tracing_masked_valuable(&self) -> MaskedValuable<'_, K, V>;
    }

    impl<K, V> TracingValuableExt<K, V> for OrderedMultiMap<K, V>
    where
        K: Valuable + Hash + Eq + MapIdentity,
        V: Valuable + MapIdentity,
    {
        fn tracing_masked_valuable(&self) -> MaskedValuable<'_, K, V> {
            MaskedValuable(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracing_masked_renders_masked_text() {
        let mut form = OrderedMultiMap::with_masked_key("password");
        form.add("username", "alice");
        form.add("password", "hunter2");

        let display_value = form.tracing_masked();
        let rendered = format!("{display_value:?}");
        assert_eq!(rendered, "{username=[alice], password=[PROTECTED]}");
    }

    #[test]
    fn tracing_masked_handles_empty_map() {
        let form: OrderedMultiMap<String, String> = OrderedMultiMap::new();
        let display_value = form.tracing_masked();
        assert_eq!(format!("{display_value:?}"), "{}");
    }

    #[cfg(feature = "tracing-valuable")]
    mod valuable_tests {
        use valuable::{Valuable, Value, Visit};

        use super::*;

        /// Flattens a visited map into `key => rendering` lines.
        #[derive(Default)]
        struct Collect {
            lines: Vec<String>,
            list: Vec<String>,
        }

        impl Visit for Collect {
            fn visit_value(&mut self, value: Value<'_>) {
                match value {
                    Value::String(text) => self.list.push(text.to_string()),
                    Value::Mappable(map) => map.visit(self),
                    Value::Listable(list) => list.visit(self),
                    other => self.list.push(format!("{other:?}")),
                }
            }

            fn visit_entry(&mut self, key: Value<'_>, value: Value<'_>) {
                let key = match key {
                    Value::String(text) => text.to_string(),
                    other => format!("{other:?}"),
                };
                let rendered = match value {
                    Value::String(text) => text.to_string(),
                    Value::Listable(list) => {
                        self.list.clear();
                        list.visit(self);
                        format!("[{}]", self.list.join(", "))
                    }
                    other => format!("{other:?}"),
                };
                self.lines.push(format!("{key} => {rendered}"));
            }
        }

        #[test]
        fn valuable_view_masks_protected_keys() {
            let mut form = OrderedMultiMap::with_masked_key("password");
            form.add("username", "alice");
            form.add("password", "hunter2");
            form.add("scope", "openid");
            form.add("scope", "email");

            let view = form.tracing_masked_valuable();
            let mut collect = Collect::default();
            view.visit(&mut collect);

            assert_eq!(
                collect.lines,
                vec![
                    "username => [alice]",
                    "password => [PROTECTED]",
                    "scope => [openid, email]",
                ]
            );
        }

        enum Field {
            Text(&'static str),
            Form(SharedMultiMap<&'static str, Field>),
        }

        impl MapIdentity for Field {
            fn is_map(&self, map: *const ()) -> bool {
                matches!(self, Field::Form(form) if form.is_map(map))
            }
        }

        impl Valuable for Field {
            fn as_value(&self) -> Value<'_> {
                match self {
                    Field::Text(text) => Value::String(text),
                    Field::Form(_) => Value::String("nested"),
                }
            }

            fn visit(&self, visit: &mut dyn Visit) {
                visit.visit_value(self.as_value());
            }
        }

        #[test]
        fn valuable_view_renders_self_reference_as_sentinel() {
            let shared = SharedMultiMap::new(OrderedMultiMap::new());
            shared.borrow_mut().add("name", Field::Text("root"));
            shared.borrow_mut().add("parent", Field::Form(shared.clone()));

            let mut collect = Collect::default();
            {
                let map = shared.borrow();
                map.tracing_masked_valuable().visit(&mut collect);
            }

            assert_eq!(
                collect.lines,
                vec!["name => [root]", "parent => [(this map)]"]
            );

            shared.borrow_mut().clear();
        }
    }
}
