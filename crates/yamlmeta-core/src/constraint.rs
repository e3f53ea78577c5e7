//! # Constraint Primitives
//!
//! A [`Constraint`] is a pure predicate over a single value paired with a
//! message generator that explains *why* a value was rejected. Constraints
//! are ordinary values: the same type can be configured differently per
//! field or container (a [`Range`] with different bounds, a [`Whitelist`]
//! over a different closed set).
//!
//! ## Built-ins
//!
//! | Constraint | Accepts |
//! |---|---|
//! | [`Unconstrained`] | everything |
//! | [`Range`] | `min <= v <= max` |
//! | [`Positive`] | `v > 0` |
//! | [`NonEmpty`] | non-empty strings and lists |
//! | [`Length`] | strings/lists whose length is within `[min, max]` |
//! | [`Whitelist`] | members of a fixed set supplied at configuration time |
//!
//! All built-ins are `Send + Sync` and immutable after construction, so a
//! single instance may back any number of concurrent parse calls.

use std::fmt::{self, Display};
use std::sync::Arc;

/// A predicate plus error-message function applied to a candidate value
/// before it is admitted.
pub trait Constraint<T: ?Sized>: Send + Sync {
    /// Returns `true` if `value` satisfies the constraint.
    fn validate(&self, value: &T) -> bool;

    /// Explains why `value` is invalid. Only meaningful when
    /// [`validate`](Constraint::validate) returned `false`.
    fn describe(&self, value: &T) -> String;

    /// Validate and describe in one step.
    fn check(&self, value: &T) -> Result<(), String> {
        if self.validate(value) {
            Ok(())
        } else {
            Err(self.describe(value))
        }
    }
}

/// Accepts every value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unconstrained;

impl<T: ?Sized> Constraint<T> for Unconstrained {
    fn validate(&self, _value: &T) -> bool {
        true
    }

    fn describe(&self, _value: &T) -> String {
        "No constraint".to_string()
    }
}

/// Inclusive numeric range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T> {
    min: T,
    max: T,
}

impl<T: PartialOrd> Range<T> {
    /// Create a range. Bounds are inclusive.
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// Inclusive lower bound.
    pub fn min(&self) -> &T {
        &self.min
    }

    /// Inclusive upper bound.
    pub fn max(&self) -> &T {
        &self.max
    }
}

impl<T> Constraint<T> for Range<T>
where
    T: PartialOrd + Display + Send + Sync,
{
    fn validate(&self, value: &T) -> bool {
        *value >= self.min && *value <= self.max
    }

    fn describe(&self, value: &T) -> String {
        format!("Value {value} out of bounds [{}, {}]", self.min, self.max)
    }
}

/// Strictly positive numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Positive;

macro_rules! impl_positive {
    ($($ty:ty => $zero:expr),* $(,)?) => {
        $(
            impl Constraint<$ty> for Positive {
                fn validate(&self, value: &$ty) -> bool {
                    *value > $zero
                }

                fn describe(&self, value: &$ty) -> String {
                    format!("Value {value} must be positive")
                }
            }
        )*
    };
}

impl_positive!(i32 => 0, i64 => 0, u16 => 0, u32 => 0, u64 => 0, f32 => 0.0, f64 => 0.0);

/// Non-empty strings and collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonEmpty;

impl Constraint<str> for NonEmpty {
    fn validate(&self, value: &str) -> bool {
        !value.is_empty()
    }

    fn describe(&self, _value: &str) -> String {
        "String cannot be empty".to_string()
    }
}

impl Constraint<String> for NonEmpty {
    fn validate(&self, value: &String) -> bool {
        !value.is_empty()
    }

    fn describe(&self, _value: &String) -> String {
        "String cannot be empty".to_string()
    }
}

impl<T> Constraint<Vec<T>> for NonEmpty {
    fn validate(&self, value: &Vec<T>) -> bool {
        !value.is_empty()
    }

    fn describe(&self, _value: &Vec<T>) -> String {
        "List cannot be empty".to_string()
    }
}

/// Inclusive length bounds for strings (counted in characters) and lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    min: usize,
    max: usize,
}

impl Length {
    /// Create a length constraint. Bounds are inclusive.
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    fn admits(&self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }
}

impl Constraint<String> for Length {
    fn validate(&self, value: &String) -> bool {
        self.admits(value.chars().count())
    }

    fn describe(&self, value: &String) -> String {
        format!(
            "String length {} out of bounds [{}, {}]",
            value.chars().count(),
            self.min,
            self.max
        )
    }
}

impl<T> Constraint<Vec<T>> for Length {
    fn validate(&self, value: &Vec<T>) -> bool {
        self.admits(value.len())
    }

    fn describe(&self, value: &Vec<T>) -> String {
        format!(
            "List length {} out of bounds [{}, {}]",
            value.len(),
            self.min,
            self.max
        )
    }
}

/// Membership in a closed set fixed at configuration time.
///
/// The allowed set lives behind an `Arc` and is never mutated after
/// construction; cloning a `Whitelist` shares the same set. Membership is a
/// linear scan, which is the right trade-off for the handful of entries a
/// whitelist typically carries.
#[derive(Clone, PartialEq)]
pub struct Whitelist<T> {
    allowed: Arc<[T]>,
}

impl<T> Whitelist<T> {
    /// Build a whitelist from any collection of allowed values.
    pub fn new<I, U>(allowed: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<T>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// The allowed values, in configuration order.
    pub fn allowed(&self) -> &[T] {
        &self.allowed
    }
}

impl<T: PartialEq> Whitelist<T> {
    /// Returns `true` if `value` is in the allowed set.
    pub fn contains(&self, value: &T) -> bool {
        self.allowed.iter().any(|allowed| allowed == value)
    }
}

impl<T: Display> Whitelist<T> {
    /// Comma-separated allowed values, as used in rejection messages.
    pub fn expected(&self) -> String {
        self.allowed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<T: Display> fmt::Debug for Whitelist<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Whitelist {{{}}}", self.expected())
    }
}

impl<T> Constraint<T> for Whitelist<T>
where
    T: PartialEq + Display + Send + Sync,
{
    fn validate(&self, value: &T) -> bool {
        self.contains(value)
    }

    fn describe(&self, value: &T) -> String {
        format!("'{value}' not allowed. Valid values: {{{}}}", self.expected())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Range acceptance matches the arithmetic definition exactly.
        #[test]
        fn range_matches_bounds(min in -1000i64..1000, span in 0i64..1000, v in -3000i64..3000) {
            let max = min + span;
            let r = Range::new(min, max);
            prop_assert_eq!(r.validate(&v), v >= min && v <= max);
        }

        /// Whitelists accept every configured member and nothing else.
        #[test]
        fn whitelist_accepts_exactly_its_members(
            allowed in prop::collection::btree_set("[a-z]{1,6}", 1..6),
            probe in "[a-z]{1,6}",
        ) {
            let wl: Whitelist<String> = Whitelist::new(allowed.iter().cloned());
            for member in &allowed {
                prop_assert!(wl.validate(member));
            }
            prop_assert_eq!(wl.validate(&probe), allowed.contains(&probe));
        }
    }
}
