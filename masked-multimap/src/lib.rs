//! Insertion-ordered multi-value map with masked text output.
//!
//! [`OrderedMultiMap`] stores an ordered sequence of values per key and keeps
//! keys in insertion order. Keys can be registered as *masked*: whenever the
//! map is rendered as text (`Display`, `Debug`, or one of the logging sinks),
//! the values of a masked key are replaced by [`PROTECTED_PLACEHOLDER`] and
//! never formatted.
//!
//! A map may hold a handle to itself (see [`SharedMultiMap`]) as a key or as a
//! value. Rendering, equality and hashing recognise such entries by identity
//! and treat them as the fixed sentinel [`SELF_REFERENCE_PLACEHOLDER`] instead
//! of recursing.
//!
//! What this crate does:
//! - provides the map, its masking set and its single-value views
//! - provides a stable 32-bit content hash ([`HashCode`])
//! - provides logging integrations behind feature flags (`slog`, `tracing`,
//!   `tracing-valuable`, `json`)
//!
//! What it does not do:
//! - perform I/O or logging
//! - synchronise access: the map is meant for single-threaded, request-scoped use
//!
//! ```rust
//! use masked_multimap::OrderedMultiMap;
//!
//! let mut form = OrderedMultiMap::with_masked_key("password");
//! form.add("username", "alice");
//! form.add("password", "hunter2");
//! form.add("scope", "openid");
//! form.add("scope", "profile");
//!
//! assert_eq!(
//!     form.to_string(),
//!     "{username=[alice], password=[PROTECTED], scope=[openid, profile]}"
//! );
//! assert_eq!(form.get_first("scope"), Some(&"openid"));
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

// Module declarations
mod hash_code;
mod identity;
#[cfg(feature = "json")]
mod json;
mod map;
mod output;
mod shared;
#[cfg(feature = "slog")]
pub mod slog;
#[cfg(feature = "tracing")]
pub mod tracing;

pub use hash_code::HashCode;
pub use identity::MapIdentity;
#[cfg(feature = "json")]
pub use json::{MaskedEntries, MaskedJson, MaskedJsonExt, MaskedJsonRef};
pub use map::OrderedMultiMap;
pub use output::{
    MAP_IN_USE_PLACEHOLDER, MaskedOutput, PROTECTED_PLACEHOLDER, SELF_REFERENCE_PLACEHOLDER,
    ToMaskedOutput,
};
pub use shared::SharedMultiMap;
#[cfg(feature = "slog")]
pub use crate::slog::{SlogMasked, SlogMaskedExt};
