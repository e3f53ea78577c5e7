//! # Record Schemas
//!
//! A [`Schema`] is the ordered, immutable descriptor list of one record
//! type. It is built once per process (see [`record!`](crate::record)) and
//! shared read-only by every parse and render call.
//!
//! ## Invariants
//!
//! - Descriptor order is the iteration order for parsing and rendering.
//! - Field names are non-empty and unique within one schema.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::SchemaError;
use crate::field::{FieldDescriptor, Requirement};

/// Ordered field descriptors for record type `R`.
pub struct Schema<R> {
    type_name: &'static str,
    fields: Vec<Box<dyn FieldDescriptor<R>>>,
}

impl<R> Schema<R> {
    /// Build a schema, rejecting empty or repeated field names.
    pub fn try_new(
        type_name: &'static str,
        fields: Vec<Box<dyn FieldDescriptor<R>>>,
    ) -> Result<Self, SchemaError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for (position, field) in fields.iter().enumerate() {
            let name = field.name();
            if name.is_empty() {
                return Err(SchemaError::EmptyFieldName {
                    record: type_name,
                    position,
                });
            }
            if !seen.insert(name) {
                return Err(SchemaError::DuplicateField {
                    record: type_name,
                    name,
                });
            }
        }
        Ok(Self { type_name, fields })
    }

    /// Build a schema from a static descriptor list.
    ///
    /// # Panics
    ///
    /// Panics if a field name is empty or repeated. Descriptor lists are
    /// fixed in source, so this fires the first time the record is used,
    /// in every test that touches it.
    pub fn new(type_name: &'static str, fields: Vec<Box<dyn FieldDescriptor<R>>>) -> Self {
        match Self::try_new(type_name, fields) {
            Ok(schema) => schema,
            Err(err) => panic!("{err}"),
        }
    }

    /// Name of the record type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Descriptors in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &dyn FieldDescriptor<R>> {
        self.fields.iter().map(|f| f.as_ref())
    }

    /// Look up a descriptor by name.
    pub fn field(&self, name: &str) -> Option<&dyn FieldDescriptor<R>> {
        self.fields().find(|f| f.name() == name)
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name())
    }

    /// Returns `true` if the schema has a field called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` for a schema without fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serializable summary of every field, in declaration order.
    pub fn describe(&self) -> Vec<FieldInfo> {
        self.fields()
            .map(|f| FieldInfo {
                name: f.name(),
                type_name: f.type_name(),
                requirement: f.requirement(),
                constrained: f.is_constrained(),
                description: f.description(),
            })
            .collect()
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type_name", &self.type_name)
            .field("fields", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// One row of [`Schema::describe`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub type_name: String,
    pub requirement: Requirement,
    pub constrained: bool,
    pub description: &'static str,
}

/// A type with a process-wide schema.
///
/// `Default` supplies the draft every parse starts from, so fields that
/// are absent or fail keep their default values.
pub trait Record: Default + Clone + Send + Sync + 'static {
    /// The record's schema, built on first use.
    fn schema() -> &'static Schema<Self>;
}

/// Implement [`Record`] and [`SchemaAdapter`](crate::SchemaAdapter) for a
/// struct from a list of [`field!`](crate::field) descriptors.
///
/// The adapter lets the record appear as a field of another record: it
/// parses with the nested engine, folding errors under the parent field,
/// and renders inline as `{field=value, ...}`.
///
/// ```ignore
/// record!(Person {
///     field!(Person, name, "Full name", Required),
///     field!(Person, age, "Age in years", Required),
/// });
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ident { $($field:expr),+ $(,)? }) => {
        impl $crate::Record for $ty {
            fn schema() -> &'static $crate::Schema<Self> {
                static SCHEMA: ::std::sync::OnceLock<$crate::Schema<$ty>> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    $crate::Schema::new(
                        stringify!($ty),
                        ::std::vec![$(
                            ::std::boxed::Box::new($field)
                                as ::std::boxed::Box<dyn $crate::FieldDescriptor<$ty>>
                        ),+],
                    )
                })
            }
        }

        impl $crate::SchemaAdapter for $ty {
            fn parse_node(
                &mut self,
                node: $crate::Node<'_>,
                options: &$crate::ParseOptions,
            ) -> ::std::result::Result<(), $crate::ValidationResult> {
                $crate::engine::parse_nested(self, node, options)
            }

            fn render(&self) -> ::std::string::String {
                $crate::render::to_inline(self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    #[derive(Debug, Clone, Default)]
    struct Point {
        x: i64,
        y: i64,
    }

    crate::record!(Point {
        crate::field!(Point, x, "Horizontal", Required),
        crate::field!(Point, y, "", Optional),
    });

    fn boxed(f: Field<Point, i64>) -> Box<dyn FieldDescriptor<Point>> {
        Box::new(f)
    }

    #[test]
    fn schema_preserves_declaration_order() {
        let schema = Point::schema();
        assert_eq!(schema.type_name(), "Point");
        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn schema_is_built_once() {
        assert!(std::ptr::eq(Point::schema(), Point::schema()));
    }

    #[test]
    fn field_lookup_by_name() {
        let schema = Point::schema();
        assert_eq!(schema.field("x").unwrap().description(), "Horizontal");
        assert!(schema.contains("y"));
        assert!(schema.field("z").is_none());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Schema::try_new(
            "Point",
            vec![
                boxed(crate::field!(Point, x, "", Required)),
                boxed(crate::field!(Point, y => "x", "", Required)),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateField {
                record: "Point",
                name: "x"
            }
        );
    }

    #[test]
    fn empty_names_are_rejected() {
        let err = Schema::try_new("Point", vec![boxed(crate::field!(Point, x => "", "", Required))])
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::EmptyFieldName {
                record: "Point",
                position: 0
            }
        );
    }

    #[test]
    #[should_panic(expected = "duplicate field name")]
    fn new_panics_on_duplicates() {
        let _ = Schema::new(
            "Point",
            vec![
                boxed(crate::field!(Point, x, "", Required)),
                boxed(crate::field!(Point, x, "", Optional)),
            ],
        );
    }

    #[test]
    fn describe_lists_every_field() {
        let info = Point::schema().describe();
        assert_eq!(info.len(), 2);
        assert_eq!(info[0].name, "x");
        assert_eq!(info[0].type_name, "i64");
        assert_eq!(info[0].requirement, Requirement::Required);
        assert!(!info[1].constrained);
        let json = serde_json::to_value(&info[0]).unwrap();
        assert_eq!(json["type"], "i64");
        assert_eq!(json["requirement"], "required");
    }
}
