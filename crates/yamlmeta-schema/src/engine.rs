//! # Parse Engine
//!
//! Drives a record's [`Schema`] over an input [`Node`]. Every field is
//! visited exactly once per call and errors are accumulated rather than
//! short-circuited:
//!
//! | Input | Requirement | Outcome |
//! |---|---|---|
//! | absent | `Required` | `missing required field` at the field path; field keeps its default |
//! | absent | `Optional` | field keeps its default; no error |
//! | present, converts and satisfies constraints | any | field populated |
//! | present, conversion or constraint fails | any | error at the field path; field keeps its default |
//!
//! ## Entry points
//!
//! - [`parse_validated`]: all-or-nothing. Returns the record only if no
//!   field failed; otherwise every field error.
//! - [`parse_best_effort`]: always returns a record, with defaults wherever
//!   a field was missing or invalid. Swallowed errors are logged at `debug`.
//! - [`parse`]: either of the above selected by [`ParseMode`], returning
//!   the explicit two-tier [`ParseOutcome`].
//!
//! Nested records, containers and options are handled by their
//! [`SchemaAdapter`](crate::SchemaAdapter) implementations; a nested record
//! re-enters the engine through [`parse_nested`].

use std::path::Path;

use serde_yaml::Value;
use tracing::{debug, trace};

use crate::error::LoadError;
use crate::node::Node;
use crate::report::{ErrorKind, ValidationResult};
use crate::schema::Record;

/// What to do with input keys the schema does not describe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFields {
    /// Skip them silently.
    #[default]
    Ignore,
    /// Report each one as an `UnknownField` error.
    Reject,
}

/// Per-call parse configuration. Nested records inherit the options of
/// their parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Handling of keys outside the schema.
    pub unknown_fields: UnknownFields,
}

impl ParseOptions {
    /// Options that reject unknown keys.
    pub fn strict() -> Self {
        Self {
            unknown_fields: UnknownFields::Reject,
        }
    }
}

/// Which entry point [`parse`] dispatches to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Lenient: never fails, defaults for anything missing or invalid.
    BestEffort,
    /// All-or-nothing with aggregated errors.
    #[default]
    Validated,
}

/// Result of [`parse`], tagged by the mode that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<R> {
    /// A best-effort parse. Always holds a record.
    BestEffort(R),
    /// A validating parse.
    Validated(Result<R, ValidationResult>),
}

impl<R> ParseOutcome<R> {
    /// The parsed record, if there is one.
    pub fn record(&self) -> Option<&R> {
        match self {
            Self::BestEffort(record) => Some(record),
            Self::Validated(result) => result.as_ref().ok(),
        }
    }

    /// Consume the outcome, returning the record if there is one.
    pub fn into_record(self) -> Option<R> {
        match self {
            Self::BestEffort(record) => Some(record),
            Self::Validated(result) => result.ok(),
        }
    }

    /// Errors from a failed validating parse. Empty otherwise.
    pub fn errors(&self) -> &[crate::FieldError] {
        match self {
            Self::Validated(Err(report)) => report.errors(),
            _ => &[],
        }
    }
}

/// Populate `record` from `node`, returning every field error.
///
/// Fields that fail or are absent keep whatever value `record` held on
/// entry. A null node counts as an empty mapping; any other non-mapping
/// node yields a single error at the empty (root) path.
pub fn populate<R: Record>(
    record: &mut R,
    node: Node<'_>,
    options: &ParseOptions,
) -> ValidationResult {
    let schema = R::schema();
    let mut report = ValidationResult::new();

    if node.is_null() {
        trace!(record = schema.type_name(), "null document treated as empty mapping");
    } else if !node.is_mapping() {
        report.add_error(
            "",
            ErrorKind::TypeConversion,
            format!("expected a mapping, found {}", node.describe()),
        );
        return report;
    }

    for field in schema.fields() {
        let name = field.name();
        match node.get(name) {
            None => match field.requirement() {
                crate::Requirement::Required => {
                    trace!(field = name, "missing required field");
                    report.add_error(
                        name,
                        ErrorKind::MissingRequiredField,
                        "missing required field",
                    );
                }
                crate::Requirement::Optional => {
                    trace!(field = name, "optional field absent, keeping default");
                }
            },
            Some(child) => match field.parse_into(record, child, options) {
                Ok(()) => trace!(field = name, "field populated"),
                Err(nested) => {
                    trace!(field = name, errors = nested.len(), "field rejected");
                    report.merge_nested(name, nested);
                }
            },
        }
    }

    if options.unknown_fields == UnknownFields::Reject {
        if let Value::Mapping(map) = node.value() {
            for key in map.keys().map(Node::new) {
                match key.as_string() {
                    Ok(key) if schema.contains(&key) => {}
                    Ok(key) => report.add_error(
                        key.clone(),
                        ErrorKind::UnknownField,
                        format!("unknown field {key:?} for {}", schema.type_name()),
                    ),
                    // Keys with no string form can never name a field.
                    Err(_) => report.add_error(
                        format!("<{}>", key.describe()),
                        ErrorKind::UnknownField,
                        format!("unknown {} key for {}", key.describe(), schema.type_name()),
                    ),
                }
            }
        }
    }

    report
}

/// Validating parse with default options.
pub fn parse_validated<R: Record>(node: Node<'_>) -> Result<R, ValidationResult> {
    parse_validated_with(node, &ParseOptions::default())
}

/// Validating parse: the record if every field succeeded, otherwise every
/// field error. The draft record is discarded on failure.
pub fn parse_validated_with<R: Record>(
    node: Node<'_>,
    options: &ParseOptions,
) -> Result<R, ValidationResult> {
    let mut record = R::default();
    let report = populate(&mut record, node, options);
    debug!(
        record = R::schema().type_name(),
        mode = "validated",
        errors = report.len(),
        "parsed record"
    );
    if report.is_valid() {
        Ok(record)
    } else {
        Err(report)
    }
}

/// Best-effort parse: never fails. Fields that are missing or invalid keep
/// their defaults.
pub fn parse_best_effort<R: Record>(node: Node<'_>) -> R {
    let mut record = R::default();
    let report = populate(&mut record, node, &ParseOptions::default());
    let type_name = R::schema().type_name();
    for error in report.errors() {
        debug!(
            record = type_name,
            path = %error.path,
            kind = %error.kind,
            "ignored: {}",
            error.message
        );
    }
    debug!(record = type_name, mode = "best_effort", ignored = report.len(), "parsed record");
    record
}

/// Parse in the given mode.
pub fn parse<R: Record>(node: Node<'_>, mode: ParseMode) -> ParseOutcome<R> {
    match mode {
        ParseMode::BestEffort => ParseOutcome::BestEffort(parse_best_effort(node)),
        ParseMode::Validated => ParseOutcome::Validated(parse_validated(node)),
    }
}

/// Parse a record that appears as a field value of another record.
///
/// Unlike the top-level entry points a null value is not an empty mapping
/// here: a nested record must be written out as a mapping. `record` is
/// only replaced when every nested field succeeds.
pub fn parse_nested<R: Record>(
    record: &mut R,
    node: Node<'_>,
    options: &ParseOptions,
) -> Result<(), ValidationResult> {
    if !node.is_mapping() {
        return Err(ValidationResult::single(
            ErrorKind::TypeConversion,
            format!("expected a mapping, found {}", node.describe()),
        ));
    }
    let mut draft = R::default();
    let report = populate(&mut draft, node, options);
    if report.is_valid() {
        *record = draft;
        Ok(())
    } else {
        Err(report)
    }
}

// ---------------------------------------------------------------------------
// Document loading
// ---------------------------------------------------------------------------

fn read_document(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse YAML text and run a validating parse over it.
pub fn from_yaml_str<R: Record>(text: &str) -> Result<R, LoadError> {
    from_yaml_str_with(text, &ParseOptions::default())
}

/// [`from_yaml_str`] with explicit options.
pub fn from_yaml_str_with<R: Record>(text: &str, options: &ParseOptions) -> Result<R, LoadError> {
    let doc: serde_yaml::Value = serde_yaml::from_str(text)?;
    parse_validated_with(Node::new(&doc), options).map_err(|report| LoadError::Validation {
        record: R::schema().type_name(),
        report,
    })
}

/// Parse YAML text leniently. Only malformed YAML is an error.
pub fn from_yaml_str_lenient<R: Record>(text: &str) -> Result<R, LoadError> {
    let doc: serde_yaml::Value = serde_yaml::from_str(text)?;
    Ok(parse_best_effort(Node::new(&doc)))
}

/// Read a YAML file and run a validating parse over it.
pub fn from_yaml_file<R: Record>(path: impl AsRef<Path>) -> Result<R, LoadError> {
    from_yaml_str(&read_document(path.as_ref())?)
}

/// Read a YAML file and parse it leniently.
pub fn from_yaml_file_lenient<R: Record>(path: impl AsRef<Path>) -> Result<R, LoadError> {
    from_yaml_str_lenient(&read_document(path.as_ref())?)
}
