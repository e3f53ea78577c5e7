//! # yamlmeta-cli: Command-Line Interface
//!
//! Thin front end over `yamlmeta-schema` for checking documents against a
//! set of bundled demo records.
//!
//! ## Subcommands
//!
//! - `check`: parse a YAML file as one record kind, validating or
//!   leniently, and print it as text, JSON, a flat map or an error report
//! - `schema`: print the field descriptors of a record kind
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here return an exit
//!   code and never call `std::process::exit`.
//! - Handlers build their output as a string so tests can assert on it.

pub mod check;
pub mod records;
pub mod schema;
