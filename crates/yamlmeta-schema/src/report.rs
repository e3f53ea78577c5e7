//! # Validation Reports
//!
//! A [`ValidationResult`] is the aggregate produced by one validating parse:
//! an ordered list of [`FieldError`]s, each carrying the dotted path to the
//! offending field, a classification and a human-readable message.
//!
//! ## Invariant
//!
//! A result is valid iff its error list is empty. Validity is derived from
//! the list, never stored separately, so the two cannot disagree.
//!
//! ## Paths
//!
//! Paths use dotted notation for nested records (`database.port`), `[i]`
//! for sequence elements (`features[2]`) and the entry key for mapping
//! entries (`settings.timeout`). The empty path denotes the document root
//! and is displayed as `(root)`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification of a field-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field is absent from the input.
    MissingRequiredField,
    /// The input value could not be coerced to the field's type.
    TypeConversion,
    /// The value was coerced but violates a bound, whitelist or other constraint.
    ConstraintViolation,
    /// The input carries a key the schema does not describe (strict parsing only).
    UnknownField,
}

impl ErrorKind {
    /// Returns the snake_case identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::TypeConversion => "type_conversion",
            Self::ConstraintViolation => "constraint_violation",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failure at one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path to the offending field; empty for the document root.
    pub path: String,
    /// What went wrong.
    pub kind: ErrorKind,
    /// Human-readable description, including the offending value where known.
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Join a parent path and a child segment.
///
/// Index segments (`[3]`) attach without a dot; an empty segment on either
/// side yields the other side unchanged.
pub fn join_path(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else if child.is_empty() {
        parent.to_string()
    } else if child.starts_with('[') {
        format!("{parent}{child}")
    } else {
        format!("{parent}.{child}")
    }
}

/// Ordered collection of field errors from one parse call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
}

impl ValidationResult {
    /// An empty, valid result.
    pub fn new() -> Self {
        Self::default()
    }

    /// A result holding a single error at the root of whatever is being
    /// parsed. The caller folds it under the field's path.
    pub fn single(kind: ErrorKind, message: impl Into<String>) -> Self {
        let mut result = Self::new();
        result.add_error("", kind, message);
        result
    }

    /// Returns `true` if no errors were recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns `true` if no errors were recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// All errors in the order they were recorded.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Errors recorded at exactly `path`.
    pub fn errors_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |e| e.path == path)
    }

    /// Consumes self and returns the inner list.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Record an error. Marks the result invalid.
    pub fn add_error(
        &mut self,
        path: impl Into<String>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) {
        self.errors.push(FieldError {
            path: path.into(),
            kind,
            message: message.into(),
        });
    }

    /// Fold a nested result under `prefix`, rewriting each error path to
    /// `prefix.path`.
    pub fn merge_nested(&mut self, prefix: &str, other: ValidationResult) {
        self.errors.extend(other.errors.into_iter().map(|mut e| {
            e.path = join_path(prefix, &e.path);
            e
        }));
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationResult {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_valid() {
        let r = ValidationResult::new();
        assert!(r.is_valid());
        assert!(r.is_empty());
    }

    #[test]
    fn adding_an_error_invalidates() {
        let mut r = ValidationResult::new();
        r.add_error("age", ErrorKind::MissingRequiredField, "missing required field");
        assert!(!r.is_valid());
        assert_eq!(r.len(), 1);
        assert_eq!(r.errors()[0].path, "age");
    }

    #[test]
    fn join_path_rules() {
        assert_eq!(join_path("", "port"), "port");
        assert_eq!(join_path("database", ""), "database");
        assert_eq!(join_path("database", "port"), "database.port");
        assert_eq!(join_path("features", "[2]"), "features[2]");
        assert_eq!(join_path("servers", "[0].port"), "servers[0].port");
    }

    #[test]
    fn merge_nested_prefixes_paths() {
        let mut nested = ValidationResult::new();
        nested.add_error(
            "port",
            ErrorKind::ConstraintViolation,
            "Value 0 out of bounds [1, 65535]",
        );
        nested.add_error("", ErrorKind::TypeConversion, "expected mapping, found string \"x\"");

        let mut parent = ValidationResult::new();
        parent.merge_nested("database", nested);

        let paths: Vec<&str> = parent.errors().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["database.port", "database"]);
    }

    #[test]
    fn merging_valid_result_keeps_parent_valid() {
        let mut parent = ValidationResult::new();
        parent.merge_nested("database", ValidationResult::new());
        assert!(parent.is_valid());
    }

    #[test]
    fn display_marks_root() {
        let e = FieldError {
            path: String::new(),
            kind: ErrorKind::TypeConversion,
            message: "expected mapping, found sequence".into(),
        };
        assert_eq!(e.to_string(), "(root): expected mapping, found sequence");
    }

    #[test]
    fn errors_at_filters_by_exact_path() {
        let mut r = ValidationResult::new();
        r.add_error("age", ErrorKind::ConstraintViolation, "a");
        r.add_error("age.x", ErrorKind::ConstraintViolation, "b");
        assert_eq!(r.errors_at("age").count(), 1);
    }

    #[test]
    fn serializes_kind_as_snake_case() {
        let mut r = ValidationResult::new();
        r.add_error("name", ErrorKind::MissingRequiredField, "missing required field");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["errors"][0]["kind"], "missing_required_field");
        assert_eq!(json["errors"][0]["path"], "name");
    }
}
