//! # Bounded Scalars
//!
//! Self-validating wrappers around primitives with inclusive bounds carried
//! in the type: [`BoundedInt<MIN, MAX>`] and
//! [`BoundedString<MIN_LEN, MAX_LEN>`].
//!
//! ## Policy: fail-fast
//!
//! Construction from an out-of-range value returns a [`RangeError`]; there
//! is no way to obtain an out-of-range instance, so there is no `is_valid`
//! check to forget. `Default` yields the lower bound (`MIN`, or `MIN_LEN`
//! spaces), which satisfies the bound by construction. Deserialization goes
//! through the same checked constructor.
//!
//! Bounds with `MIN > MAX` are rejected at compile time, when the type is
//! first used.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RangeError;

/// An `i64` guaranteed to lie within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct BoundedInt<const MIN: i64, const MAX: i64>(i64);

impl<const MIN: i64, const MAX: i64> BoundedInt<MIN, MAX> {
    const BOUNDS_OK: () = assert!(MIN <= MAX, "BoundedInt requires MIN <= MAX");

    /// Inclusive lower bound.
    pub const LOWER: i64 = MIN;
    /// Inclusive upper bound.
    pub const UPPER: i64 = MAX;

    /// Create a bounded integer, rejecting values outside `[MIN, MAX]`.
    pub fn new(value: i64) -> Result<Self, RangeError> {
        let () = Self::BOUNDS_OK;
        if (MIN..=MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RangeError::Integer {
                value,
                min: MIN,
                max: MAX,
            })
        }
    }

    /// The wrapped value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl<const MIN: i64, const MAX: i64> Default for BoundedInt<MIN, MAX> {
    fn default() -> Self {
        let () = Self::BOUNDS_OK;
        Self(MIN)
    }
}

impl<const MIN: i64, const MAX: i64> TryFrom<i64> for BoundedInt<MIN, MAX> {
    type Error = RangeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const MIN: i64, const MAX: i64> From<BoundedInt<MIN, MAX>> for i64 {
    fn from(value: BoundedInt<MIN, MAX>) -> Self {
        value.0
    }
}

impl<const MIN: i64, const MAX: i64> fmt::Display for BoundedInt<MIN, MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `String` whose length, in characters, lies within `[MIN_LEN, MAX_LEN]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundedString<const MIN_LEN: usize, const MAX_LEN: usize>(String);

impl<const MIN_LEN: usize, const MAX_LEN: usize> BoundedString<MIN_LEN, MAX_LEN> {
    const BOUNDS_OK: () = assert!(MIN_LEN <= MAX_LEN, "BoundedString requires MIN_LEN <= MAX_LEN");

    /// Inclusive minimum length.
    pub const MIN_LENGTH: usize = MIN_LEN;
    /// Inclusive maximum length.
    pub const MAX_LENGTH: usize = MAX_LEN;

    /// Create a bounded string, rejecting lengths outside `[MIN_LEN, MAX_LEN]`.
    pub fn new(value: impl Into<String>) -> Result<Self, RangeError> {
        let () = Self::BOUNDS_OK;
        let value = value.into();
        let length = value.chars().count();
        if (MIN_LEN..=MAX_LEN).contains(&length) {
            Ok(Self(value))
        } else {
            Err(RangeError::StringLength {
                length,
                min: MIN_LEN,
                max: MAX_LEN,
            })
        }
    }

    /// Borrow the wrapped string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<const MIN_LEN: usize, const MAX_LEN: usize> Default for BoundedString<MIN_LEN, MAX_LEN> {
    /// `MIN_LEN` spaces: the shortest string the bound admits.
    fn default() -> Self {
        let () = Self::BOUNDS_OK;
        Self(" ".repeat(MIN_LEN))
    }
}

impl<const MIN_LEN: usize, const MAX_LEN: usize> TryFrom<String>
    for BoundedString<MIN_LEN, MAX_LEN>
{
    type Error = RangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const MIN_LEN: usize, const MAX_LEN: usize> From<BoundedString<MIN_LEN, MAX_LEN>> for String {
    fn from(value: BoundedString<MIN_LEN, MAX_LEN>) -> Self {
        value.0
    }
}

impl<const MIN_LEN: usize, const MAX_LEN: usize> AsRef<str> for BoundedString<MIN_LEN, MAX_LEN> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<const MIN_LEN: usize, const MAX_LEN: usize> fmt::Display for BoundedString<MIN_LEN, MAX_LEN> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Construction succeeds exactly for in-range values, and every
        /// constructed value stays in range.
        #[test]
        fn int_construction_matches_range(v in -500i64..500) {
            match BoundedInt::<0, 150>::new(v) {
                Ok(b) => prop_assert!((0..=150).contains(&b.get())),
                Err(_) => prop_assert!(!(0..=150).contains(&v)),
            }
        }

        #[test]
        fn string_construction_matches_length(s in "\\PC{0,12}") {
            let len = s.chars().count();
            prop_assert_eq!(BoundedString::<2, 8>::new(s).is_ok(), (2..=8).contains(&len));
        }
    }
}
