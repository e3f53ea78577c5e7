//! # Error Types
//!
//! Errors raised by the value-level types in this crate. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations and
//! carry the offending input so callers can report it without guesswork.

use thiserror::Error;

/// A bounded scalar was constructed from a value outside its bounds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// Integer value outside the inclusive `[min, max]` range.
    #[error("Value {value} out of bounds [{min}, {max}]")]
    Integer {
        /// The rejected value.
        value: i64,
        /// Inclusive lower bound.
        min: i64,
        /// Inclusive upper bound.
        max: i64,
    },

    /// String whose length is outside the inclusive `[min, max]` range.
    #[error("String length {length} out of bounds [{min}, {max}]")]
    StringLength {
        /// Length of the rejected string, in characters.
        length: usize,
        /// Inclusive minimum length.
        min: usize,
        /// Inclusive maximum length.
        max: usize,
    },
}

/// A constrained container refused a mutation or lookup.
///
/// The container is left unchanged whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    /// The key failed the map's key constraint.
    #[error("Key constraint violated: {0}")]
    Key(String),

    /// The value failed the map's value constraint.
    #[error("Value constraint violated: {0}")]
    Value(String),

    /// The element failed the vector's element constraint.
    #[error("Element constraint violated: {0}")]
    Element(String),

    /// Positional access past the end of a vector.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The vector length at the time of access.
        len: usize,
    },
}

/// A name did not match any variant of a registered enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnumError {
    /// The name is not present in the enum's name table.
    #[error("unknown {type_name} name {name:?}; expected one of {{{expected}}}")]
    UnknownName {
        /// Short type name of the enumeration.
        type_name: &'static str,
        /// The rejected name.
        name: String,
        /// Comma-separated list of accepted names.
        expected: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_names_value_and_bounds() {
        let e = RangeError::Integer {
            value: 200,
            min: 0,
            max: 150,
        };
        assert_eq!(e.to_string(), "Value 200 out of bounds [0, 150]");
    }

    #[test]
    fn string_length_error_display() {
        let e = RangeError::StringLength {
            length: 0,
            min: 1,
            max: 100,
        };
        assert_eq!(e.to_string(), "String length 0 out of bounds [1, 100]");
    }

    #[test]
    fn constraint_error_prefixes() {
        assert!(ConstraintError::Key("String cannot be empty".into())
            .to_string()
            .starts_with("Key constraint violated"));
        assert!(ConstraintError::Value("x".into())
            .to_string()
            .starts_with("Value constraint violated"));
        assert!(ConstraintError::Element("x".into())
            .to_string()
            .starts_with("Element constraint violated"));
    }

    #[test]
    fn index_error_display() {
        let e = ConstraintError::IndexOutOfBounds { index: 3, len: 1 };
        assert_eq!(e.to_string(), "index 3 out of bounds for length 1");
    }

    #[test]
    fn enum_error_lists_expected_names() {
        let e = EnumError::UnknownName {
            type_name: "LogLevel",
            name: "TRACE".into(),
            expected: "DEBUG, INFO".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("\"TRACE\""));
        assert!(msg.contains("{DEBUG, INFO}"));
    }
}
