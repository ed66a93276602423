//! Canonical structural keys.
//!
//! Two values that are equal cell-for-cell produce the same key, no matter
//! where they live. Keys are plain data (no text encoding), so values that only
//! look alike when printed, like the number `1` and the string `"1"`, never
//! collide.

use crate::access::Value;
use chrono::NaiveDateTime;
use std::fmt::Debug;
use std::hash::Hash;

/// Types that can be reduced to a hashable structural key
pub trait CanonicalKey {
    type Key: Eq + Hash + Clone + Debug;

    fn canonical_key(&self) -> Self::Key;
}

/// Structural key of a single cell value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Text(String),
    /// Bit pattern of the number with `-0` folded into `0` and a single NaN
    Number(u64),
    Boolean(bool),
    Date(NaiveDateTime),
}

impl ValueKey {
    pub fn number(n: f64) -> Self {
        let n = if n == 0.0 {
            0.0
        } else if n.is_nan() {
            f64::NAN
        } else {
            n
        };
        ValueKey::Number(n.to_bits())
    }
}

impl CanonicalKey for Value {
    type Key = ValueKey;

    fn canonical_key(&self) -> ValueKey {
        match self {
            Value::Empty => ValueKey::Text(String::new()),
            Value::String(s) => ValueKey::Text(s.clone()),
            Value::Number(n) => ValueKey::number(*n),
            Value::Boolean(b) => ValueKey::Boolean(*b),
            Value::Date(d) => ValueKey::Date(*d),
        }
    }
}

impl<T: CanonicalKey + ?Sized> CanonicalKey for &T {
    type Key = T::Key;

    fn canonical_key(&self) -> T::Key {
        (**self).canonical_key()
    }
}

impl<T: CanonicalKey> CanonicalKey for [T] {
    type Key = Vec<T::Key>;

    fn canonical_key(&self) -> Self::Key {
        self.iter().map(CanonicalKey::canonical_key).collect()
    }
}

impl<T: CanonicalKey> CanonicalKey for Vec<T> {
    type Key = Vec<T::Key>;

    fn canonical_key(&self) -> Self::Key {
        self.as_slice().canonical_key()
    }
}

impl CanonicalKey for str {
    type Key = String;

    fn canonical_key(&self) -> String {
        self.to_string()
    }
}

impl CanonicalKey for String {
    type Key = String;

    fn canonical_key(&self) -> String {
        self.clone()
    }
}

impl CanonicalKey for f64 {
    type Key = ValueKey;

    fn canonical_key(&self) -> ValueKey {
        ValueKey::number(*self)
    }
}

macro_rules! identity_key {
    ($($t:ty),*) => {
        $(
            impl CanonicalKey for $t {
                type Key = $t;

                fn canonical_key(&self) -> $t {
                    *self
                }
            }
        )*
    };
}

identity_key!(bool, char, i32, i64, u32, u64, usize);
