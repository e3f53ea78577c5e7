//! # yamlmeta-core: Foundational Types for yamlmeta
//!
//! This crate holds the value-level building blocks that the schema engine
//! in `yamlmeta-schema` marshals. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Constraints are values.** A [`Constraint`] is a predicate paired with
//!    a message generator. Built-ins cover ranges, positivity, non-emptiness,
//!    lengths and whitelists. Whitelists are configured at runtime and are
//!    immutable once built.
//!
//! 2. **Bounded scalars fail fast.** [`BoundedInt`] and [`BoundedString`]
//!    reject out-of-range values at construction, so every live instance is
//!    within its bounds. Their `Default` is the lower bound.
//!
//! 3. **Containers validate on mutation.** [`ConstrainedMap`] and
//!    [`ConstrainedVector`] check every insertion before it takes effect;
//!    rejected insertions leave the container unchanged.
//!
//! 4. **Enum names live in one table.** [`EnumTable`] maps names to values
//!    and back, built once from a static association list.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `yamlmeta-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod bounded;
pub mod constraint;
pub mod container;
pub mod enum_table;
pub mod error;

// Re-export primary types for ergonomic imports.
pub use bounded::{BoundedInt, BoundedString};
pub use constraint::{Constraint, Length, NonEmpty, Positive, Range, Unconstrained, Whitelist};
pub use container::{ConstrainedMap, ConstrainedVector, WhitelistMap, WhitelistVector};
pub use enum_table::{EnumTable, NamedEnum, UNKNOWN_ENUM_NAME};
pub use error::{ConstraintError, EnumError, RangeError};
