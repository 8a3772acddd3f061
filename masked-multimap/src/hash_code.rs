//! 32-bit content hashes with `java.lang.Object#hashCode` conventions.
//!
//! [`OrderedMultiMap::hash_code`](crate::OrderedMultiMap::hash_code) folds
//! these values with the classic map/list hashing rules, so a map holding
//! strings and integers hashes to the same `i32` as the equivalent JVM
//! collection. `None` plays the role of `null` and hashes to `0`.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

use std::{rc::Rc, sync::Arc};

/// Produces a 32-bit hash that agrees with `Eq`.
///
/// Implementations for std types follow the JVM conventions:
///
/// | Type | Hash |
/// |---|---|
/// | `str`, `String` | `s[0]*31^(n-1) + ... + s[n-1]` over UTF-16 code units |
/// | `bool` | `1231` for `true`, `1237` for `false` |
/// | `i8`, `i16`, `i32`, `u8`, `u16`, `char` | the value |
/// | `i64`, `u64`, `isize`, `usize` | `(v ^ (v >>> 32)) as i32` |
/// | `f32`, `f64` | canonical IEEE bits, folded like `i64` for `f64` |
/// | `Option<T>` | `0` for `None` |
/// | `Vec<T>`, `[T]` | `1`, then `31 * h + e` per element |
///
/// ```rust
/// use masked_multimap::HashCode;
///
/// assert_eq!("abc".hash_code(), 96354);
/// assert_eq!(true.hash_code(), 1231);
/// assert_eq!(None::<String>.hash_code(), 0);
/// ```
pub trait HashCode {
    fn hash_code(&self) -> i32;
}

impl HashCode for str {
    fn hash_code(&self) -> i32 {
        self.encode_utf16()
            .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
    }
}

impl HashCode for String {
    fn hash_code(&self) -> i32 {
        self.as_str().hash_code()
    }
}

impl HashCode for bool {
    fn hash_code(&self) -> i32 {
        if *self { 1231 } else { 1237 }
    }
}

impl HashCode for char {
    fn hash_code(&self) -> i32 {
        *self as i32
    }
}

impl HashCode for () {
    fn hash_code(&self) -> i32 {
        0
    }
}

macro_rules! impl_hash_code_widening {
    ($($ty:ty),* $(,)?) => {
        $(impl HashCode for $ty {
            fn hash_code(&self) -> i32 {
                i32::from(*self)
            }
        })*
    };
}

impl_hash_code_widening!(i8, i16, i32, u8, u16);

impl HashCode for u32 {
    fn hash_code(&self) -> i32 {
        *self as i32
    }
}

fn fold_u64(bits: u64) -> i32 {
    (bits ^ (bits >> 32)) as u32 as i32
}

impl HashCode for i64 {
    fn hash_code(&self) -> i32 {
        fold_u64(*self as u64)
    }
}

impl HashCode for u64 {
    fn hash_code(&self) -> i32 {
        fold_u64(*self)
    }
}

impl HashCode for isize {
    fn hash_code(&self) -> i32 {
        fold_u64(*self as u64)
    }
}

impl HashCode for usize {
    fn hash_code(&self) -> i32 {
        fold_u64(*self as u64)
    }
}

impl HashCode for f32 {
    fn hash_code(&self) -> i32 {
        let bits = if self.is_nan() { 0x7fc0_0000 } else { self.to_bits() };
        bits as i32
    }
}

impl HashCode for f64 {
    fn hash_code(&self) -> i32 {
        let bits = if self.is_nan() {
            0x7ff8_0000_0000_0000
        } else {
            self.to_bits()
        };
        fold_u64(bits)
    }
}

impl<T: HashCode> HashCode for Option<T> {
    fn hash_code(&self) -> i32 {
        self.as_ref().map_or(0, HashCode::hash_code)
    }
}

impl<T: HashCode> HashCode for [T] {
    fn hash_code(&self) -> i32 {
        self.iter().fold(1i32, |hash, element| {
            hash.wrapping_mul(31).wrapping_add(element.hash_code())
        })
    }
}

impl<T: HashCode> HashCode for Vec<T> {
    fn hash_code(&self) -> i32 {
        self.as_slice().hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for &T {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for Box<T> {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for Rc<T> {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

impl<T: HashCode + ?Sized> HashCode for Arc<T> {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}
