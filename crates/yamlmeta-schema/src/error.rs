//! # Error Types
//!
//! Errors raised outside the per-field validation path: node coercion
//! failures, schema configuration errors, and document loading errors.
//! Field-level outcomes are reported as data in
//! [`ValidationResult`](crate::ValidationResult), not through these types.

use std::path::PathBuf;

use thiserror::Error;

use crate::report::ValidationResult;

/// A node could not be coerced to the requested primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The node has the wrong shape for the requested type.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Name of the requested type.
        expected: &'static str,
        /// Description of what the node actually holds.
        found: String,
    },

    /// The node is a scalar whose text does not parse as the requested type.
    #[error("cannot parse {value:?} as {expected}")]
    Unparseable {
        /// Name of the requested type.
        expected: &'static str,
        /// The scalar text.
        value: String,
    },

    /// The number parsed but does not fit the target integer type.
    #[error("{value} does not fit in {target}")]
    OutOfRange {
        /// The parsed number.
        value: String,
        /// Name of the target type.
        target: &'static str,
    },
}

/// A schema was configured incorrectly.
///
/// These are programming errors in a record's descriptor list, detected
/// when the schema is built rather than while parsing input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two descriptors in one schema share a name.
    #[error("duplicate field name {name:?} in schema for {record}")]
    DuplicateField {
        /// The record type the schema describes.
        record: &'static str,
        /// The repeated field name.
        name: &'static str,
    },

    /// A descriptor has an empty name.
    #[error("empty field name at position {position} in schema for {record}")]
    EmptyFieldName {
        /// The record type the schema describes.
        record: &'static str,
        /// Zero-based position in the descriptor list.
        position: usize,
    },
}

/// A document could not be turned into a record.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The document file could not be read.
    #[error("cannot read '{path}': {source}")]
    Read {
        /// Path to the document.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The document text is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document parsed but failed validation against the record schema.
    #[error("validation failed for {record}:\n{report}")]
    Validation {
        /// The record type that was requested.
        record: &'static str,
        /// Every field error found.
        report: ValidationResult,
    },
}
