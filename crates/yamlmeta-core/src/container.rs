//! # Constrained Containers
//!
//! A keyed mapping ([`ConstrainedMap`]) and a sequence
//! ([`ConstrainedVector`]), each parameterized by [`Constraint`]s for keys,
//! values or elements. Every mutation is validated before it takes effect;
//! a rejected mutation leaves the container unchanged and reports a
//! [`ConstraintError`] carrying the constraint's own message.
//!
//! ## Whitelist variants
//!
//! [`WhitelistMap`] and [`WhitelistVector`] are the same containers with a
//! [`Whitelist`] as the key or element constraint. The allowed set is fixed
//! when the container is built and shared read-only for its lifetime.
//!
//! ## Iteration order
//!
//! Maps iterate in key order (`BTreeMap`). Vectors iterate in insertion
//! order.

use std::collections::BTreeMap;
use std::fmt;

use crate::constraint::{Constraint, Unconstrained, Whitelist};
use crate::error::ConstraintError;

// ---------------------------------------------------------------------------
// ConstrainedMap
// ---------------------------------------------------------------------------

/// A key-ordered map whose keys and values are checked on insertion.
#[derive(Clone)]
pub struct ConstrainedMap<K, V, KC = Unconstrained, VC = Unconstrained> {
    data: BTreeMap<K, V>,
    key_constraint: KC,
    value_constraint: VC,
}

impl<K: Ord, V, KC, VC> ConstrainedMap<K, V, KC, VC>
where
    KC: Constraint<K>,
    VC: Constraint<V>,
{
    /// Create an empty map guarded by the given constraints.
    pub fn new(key_constraint: KC, value_constraint: VC) -> Self {
        Self {
            data: BTreeMap::new(),
            key_constraint,
            value_constraint,
        }
    }

    /// Insert `value` under `key`, replacing any existing entry.
    ///
    /// The key is checked first, then the value. On failure the map is
    /// left untouched.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), ConstraintError> {
        self.key_constraint
            .check(&key)
            .map_err(ConstraintError::Key)?;
        self.value_constraint
            .check(&value)
            .map_err(ConstraintError::Value)?;
        self.data.insert(key, value);
        Ok(())
    }

    /// Remove an entry, returning its value if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.data.remove(key)
    }
}

impl<K: Ord, V, KC, VC> ConstrainedMap<K, V, KC, VC> {
    /// Look up the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.data.get(key)
    }

    /// Returns `true` if an entry exists for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.data.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, K, V> {
        self.data.iter()
    }

    /// Iterate keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.data.keys()
    }

    /// Borrow the entries as a plain map.
    pub fn as_map(&self) -> &BTreeMap<K, V> {
        &self.data
    }

    /// The key constraint this map was configured with.
    pub fn key_constraint(&self) -> &KC {
        &self.key_constraint
    }

    /// The value constraint this map was configured with.
    pub fn value_constraint(&self) -> &VC {
        &self.value_constraint
    }
}

impl<K: Ord, V, KC, VC> Default for ConstrainedMap<K, V, KC, VC>
where
    KC: Constraint<K> + Default,
    VC: Constraint<V> + Default,
{
    fn default() -> Self {
        Self::new(KC::default(), VC::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, KC, VC> fmt::Debug for ConstrainedMap<K, V, KC, VC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl<'a, K, V, KC, VC> IntoIterator for &'a ConstrainedMap<K, V, KC, VC> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::collections::btree_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// A string-keyed map whose keys must belong to a fixed set.
pub type WhitelistMap<V, VC = Unconstrained> = ConstrainedMap<String, V, Whitelist<String>, VC>;

impl<V> ConstrainedMap<String, V, Whitelist<String>, Unconstrained> {
    /// Create an empty map admitting only the keys in `allowed_keys`.
    pub fn with_allowed_keys(allowed_keys: Whitelist<String>) -> Self {
        Self::new(allowed_keys, Unconstrained)
    }
}

// ---------------------------------------------------------------------------
// ConstrainedVector
// ---------------------------------------------------------------------------

/// An append-only sequence whose elements are checked on insertion.
///
/// [`push`](Self::push) is the only mutator; admitted elements cannot be
/// removed.
///
/// ```compile_fail
/// use yamlmeta_core::{ConstrainedVector, Positive};
///
/// let mut v: ConstrainedVector<i64, Positive> = ConstrainedVector::new(Positive);
/// v.push(1).unwrap();
/// v.clear();
/// ```
#[derive(Clone)]
pub struct ConstrainedVector<T, C = Unconstrained> {
    data: Vec<T>,
    constraint: C,
}

impl<T, C: Constraint<T>> ConstrainedVector<T, C> {
    /// Create an empty vector guarded by `constraint`.
    pub fn new(constraint: C) -> Self {
        Self {
            data: Vec::new(),
            constraint,
        }
    }

    /// Append `value` if it satisfies the element constraint.
    pub fn push(&mut self, value: T) -> Result<(), ConstraintError> {
        self.constraint
            .check(&value)
            .map_err(ConstraintError::Element)?;
        self.data.push(value);
        Ok(())
    }
}

impl<T, C> ConstrainedVector<T, C> {
    /// Bounds-checked positional access.
    pub fn get(&self, index: usize) -> Result<&T, ConstraintError> {
        self.data
            .get(index)
            .ok_or(ConstraintError::IndexOutOfBounds {
                index,
                len: self.data.len(),
            })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the vector holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Borrow the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The element constraint this vector was configured with.
    pub fn constraint(&self) -> &C {
        &self.constraint
    }
}

impl<T, C: Constraint<T> + Default> Default for ConstrainedVector<T, C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<T: fmt::Debug, C> fmt::Debug for ConstrainedVector<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<'a, T, C> IntoIterator for &'a ConstrainedVector<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// A vector whose elements must belong to a fixed set.
pub type WhitelistVector<T> = ConstrainedVector<T, Whitelist<T>>;

impl<T> ConstrainedVector<T, Whitelist<T>>
where
    Whitelist<T>: Constraint<T>,
{
    /// Create an empty vector admitting only the values in `allowed`.
    pub fn with_allowed(allowed: Whitelist<T>) -> Self {
        Self::new(allowed)
    }
}
