//! # Enum Name Tables
//!
//! Bidirectional name ↔ value mapping for enumerations, built once from a
//! static association list and consulted read-only on every parse and
//! render. An enumeration opts in by implementing [`NamedEnum`], usually via
//! the [`named_enum!`](crate::named_enum) macro:
//!
//! ```
//! use yamlmeta_core::{named_enum, NamedEnum};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Environment { Development, Staging, Production }
//!
//! named_enum!(Environment {
//!     Development => "dev",
//!     Staging => "staging",
//!     Production => "prod",
//! });
//!
//! assert_eq!(Environment::from_name("prod").unwrap(), Environment::Production);
//! assert_eq!(Environment::Staging.name(), "staging");
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::EnumError;

/// Rendered in place of a name for a value missing from its table.
pub const UNKNOWN_ENUM_NAME: &str = "unknown";

/// Name ↔ value lookup tables for one enumeration.
#[derive(Debug)]
pub struct EnumTable<E: 'static> {
    type_name: &'static str,
    mapping: &'static [(E, &'static str)],
    by_name: HashMap<&'static str, E>,
    by_value: HashMap<E, &'static str>,
}

impl<E: Copy + Eq + Hash> EnumTable<E> {
    /// Build both directions from an association list.
    ///
    /// When a name or value appears more than once, the first entry wins.
    pub fn new(type_name: &'static str, mapping: &'static [(E, &'static str)]) -> Self {
        let mut by_name = HashMap::with_capacity(mapping.len());
        let mut by_value = HashMap::with_capacity(mapping.len());
        for &(value, name) in mapping {
            by_name.entry(name).or_insert(value);
            by_value.entry(value).or_insert(name);
        }
        Self {
            type_name,
            mapping,
            by_name,
            by_value,
        }
    }

    /// Short name of the enumeration, used in error messages.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The registered name of `value`, if any.
    pub fn name_of(&self, value: E) -> Option<&'static str> {
        self.by_value.get(&value).copied()
    }

    /// The value registered under `name`, if any. Names are case-sensitive.
    pub fn value_of(&self, name: &str) -> Option<E> {
        self.by_name.get(name).copied()
    }

    /// Resolve `name`, reporting the accepted names on failure.
    pub fn parse(&self, name: &str) -> Result<E, EnumError> {
        self.value_of(name).ok_or_else(|| EnumError::UnknownName {
            type_name: self.type_name,
            name: name.to_string(),
            expected: self.expected(),
        })
    }

    /// Registered names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.mapping.iter().map(|&(_, name)| name)
    }

    /// Registered values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = E> + '_ {
        self.mapping.iter().map(|&(value, _)| value)
    }

    /// Comma-separated registered names.
    pub fn expected(&self) -> String {
        self.names().collect::<Vec<_>>().join(", ")
    }
}

/// An enumeration with a registered name table.
pub trait NamedEnum: Copy + Eq + Hash + Send + Sync + 'static {
    /// The process-wide name table for this enumeration.
    fn table() -> &'static EnumTable<Self>;

    /// The registered name, or [`UNKNOWN_ENUM_NAME`] for an unregistered value.
    fn name(self) -> &'static str {
        Self::table().name_of(self).unwrap_or(UNKNOWN_ENUM_NAME)
    }

    /// Resolve a name to its value.
    fn from_name(name: &str) -> Result<Self, EnumError> {
        Self::table().parse(name)
    }

    /// All registered values in declaration order.
    fn all() -> Vec<Self> {
        Self::table().values().collect()
    }
}

/// Implement [`NamedEnum`], `Display` and `FromStr` for a fieldless enum
/// from a `Variant => "name"` list.
#[macro_export]
macro_rules! named_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $crate::NamedEnum for $ty {
            fn table() -> &'static $crate::EnumTable<Self> {
                const MAPPING: &[($ty, &str)] = &[$(($ty::$variant, $name)),+];
                static TABLE: ::std::sync::OnceLock<$crate::EnumTable<$ty>> =
                    ::std::sync::OnceLock::new();
                TABLE.get_or_init(|| $crate::EnumTable::new(stringify!($ty), MAPPING))
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::NamedEnum::name(*self))
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = $crate::EnumError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <$ty as $crate::NamedEnum>::from_name(s)
            }
        }
    };
}
