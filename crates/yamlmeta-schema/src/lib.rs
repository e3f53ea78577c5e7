//! # yamlmeta-schema: Declarative YAML Marshalling
//!
//! Turns YAML documents into strongly-typed records and back into text,
//! driven by a per-record list of field descriptors instead of hand-written
//! parsing code.
//!
//! ## Pieces
//!
//! - [`Field`] / [`FieldDescriptor`] (`field`): one named member of a
//!   record: accessor pair, requirement, description, optional constraint.
//! - [`Schema`] / [`Record`] (`schema`): the ordered descriptor list of a
//!   record type, built once per process by [`record!`].
//! - [`SchemaAdapter`] (`adapter`): how a field type parses and renders
//!   itself. Built in for primitives, options, lists, string-keyed maps,
//!   bounded scalars and constrained containers; [`schema_enum!`] and
//!   [`record!`] add it for enumerations and nested records.
//! - `engine`: validating and best-effort parses over a [`Node`] and the
//!   YAML loading helpers.
//! - `render`: text, flat-map and JSON renderers.
//! - [`ValidationResult`] (`report`): aggregated field errors with dotted
//!   paths.
//!
//! ## Example
//!
//! ```
//! use yamlmeta_schema::{field, record, BoundedInt, BoundedString};
//!
//! #[derive(Debug, Clone, Default)]
//! struct Person {
//!     name: BoundedString<1, 100>,
//!     age: BoundedInt<0, 150>,
//! }
//!
//! record!(Person {
//!     field!(Person, name, "Full name", Required),
//!     field!(Person, age, "Age in years", Required),
//! });
//!
//! let err = yamlmeta_schema::from_yaml_str::<Person>("name: Bob\nage: 200\n").unwrap_err();
//! assert!(err.to_string().contains("age: Value 200 out of bounds [0, 150]"));
//!
//! let alice: Person = yamlmeta_schema::from_yaml_str("name: Alice\nage: 28\n").unwrap();
//! assert!(yamlmeta_schema::render::to_text(&alice).contains("age: 28"));
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `yamlmeta-core` internally.
//! - Field-level failures are data ([`ValidationResult`]), never panics or
//!   early returns; sibling fields are always processed.
//! - Schemas and enum tables are immutable after first use and safe to
//!   share across threads.

pub mod adapter;
pub mod engine;
pub mod error;
pub mod field;
pub mod node;
pub mod render;
pub mod report;
pub mod schema;

pub use adapter::SchemaAdapter;
pub use engine::{
    from_yaml_file, from_yaml_file_lenient, from_yaml_str, from_yaml_str_lenient,
    from_yaml_str_with, parse, parse_best_effort, parse_validated, parse_validated_with, ParseMode,
    ParseOptions, ParseOutcome, UnknownFields,
};
pub use error::{ConversionError, LoadError, SchemaError};
pub use field::{Field, FieldDescriptor, Requirement};
pub use node::Node;
pub use report::{ErrorKind, FieldError, ValidationResult};
pub use schema::{FieldInfo, Record, Schema};

// Core types, so records can be declared with a single dependency.
pub use yamlmeta_core::{
    named_enum, BoundedInt, BoundedString, ConstrainedMap, ConstrainedVector, Constraint,
    ConstraintError, EnumError, EnumTable, Length, NamedEnum, NonEmpty, Positive, Range, RangeError,
    Unconstrained, Whitelist, WhitelistMap, WhitelistVector,
};
