//! # Field Descriptors
//!
//! A [`Field`] binds one named member of a record type to an accessor pair
//! and, optionally, a [`Constraint`] on the member's value. The engine and
//! renderers only see the type-erased [`FieldDescriptor`] trait, so they are
//! written once for every record.
//!
//! Descriptors are usually built with the [`field!`](crate::field) macro:
//!
//! ```ignore
//! field!(User, username, "Login name", Required).with_constraint(Length::new(1, 32))
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use yamlmeta_core::Constraint;

use crate::adapter::SchemaAdapter;
use crate::engine::ParseOptions;
use crate::node::Node;
use crate::report::{ErrorKind, ValidationResult};

/// Whether a field must appear in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// Absence is a `MissingRequiredField` error.
    Required,
    /// Absence leaves the field at its default.
    Optional,
}

impl Requirement {
    /// Returns the lowercase identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-erased view of one field of record type `R`.
pub trait FieldDescriptor<R>: Send + Sync {
    /// Key of the field in the input mapping.
    fn name(&self) -> &'static str;

    /// Human-readable description; may be empty.
    fn description(&self) -> &'static str;

    /// Whether the field must be present.
    fn requirement(&self) -> Requirement;

    /// Short name of the field's Rust type.
    fn type_name(&self) -> String;

    /// Returns `true` if a field-level constraint is attached.
    fn is_constrained(&self) -> bool;

    /// Convert `node` and, if it converts and satisfies the constraint,
    /// store it in `record`. On error `record` is untouched and the returned
    /// result holds paths relative to this field.
    fn parse_into(
        &self,
        record: &mut R,
        node: Node<'_>,
        options: &ParseOptions,
    ) -> Result<(), ValidationResult>;

    /// Flat string form of the field's current value.
    fn render(&self, record: &R) -> String;

    /// JSON form of the field's current value.
    fn to_json(&self, record: &R) -> Value;
}

/// A descriptor for member `V` of record `R`.
pub struct Field<R, V> {
    name: &'static str,
    description: &'static str,
    requirement: Requirement,
    get: fn(&R) -> &V,
    get_mut: fn(&mut R) -> &mut V,
    constraint: Option<Box<dyn Constraint<V>>>,
}

impl<R, V> Field<R, V> {
    /// Describe a field through its accessor pair.
    pub fn new(
        name: &'static str,
        description: &'static str,
        requirement: Requirement,
        get: fn(&R) -> &V,
        get_mut: fn(&mut R) -> &mut V,
    ) -> Self {
        Self {
            name,
            description,
            requirement,
            get,
            get_mut,
            constraint: None,
        }
    }

    /// Check every converted value against `constraint` before storing it.
    pub fn with_constraint<C: Constraint<V> + 'static>(mut self, constraint: C) -> Self {
        self.constraint = Some(Box::new(constraint));
        self
    }
}

impl<R, V> fmt::Debug for Field<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("requirement", &self.requirement)
            .field("constrained", &self.constraint.is_some())
            .finish()
    }
}

impl<R, V> FieldDescriptor<R> for Field<R, V>
where
    R: Send + Sync + 'static,
    V: SchemaAdapter,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn requirement(&self) -> Requirement {
        self.requirement
    }

    fn type_name(&self) -> String {
        short_type_name(std::any::type_name::<V>())
    }

    fn is_constrained(&self) -> bool {
        self.constraint.is_some()
    }

    fn parse_into(
        &self,
        record: &mut R,
        node: Node<'_>,
        options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        // Stage on a copy of the current value so configured containers keep
        // their constraints and a failed parse leaves the record untouched.
        let mut staged = (self.get)(record).clone();
        staged.parse_node(node, options)?;
        if let Some(constraint) = &self.constraint {
            constraint
                .check(&staged)
                .map_err(|message| {
                    ValidationResult::single(ErrorKind::ConstraintViolation, message)
                })?;
        }
        *(self.get_mut)(record) = staged;
        Ok(())
    }

    fn render(&self, record: &R) -> String {
        (self.get)(record).render()
    }

    fn to_json(&self, record: &R) -> Value {
        (self.get)(record).to_json()
    }
}

/// Strip module paths from a `std::any::type_name` string, keeping generic
/// arguments: `alloc::vec::Vec<alloc::string::String>` becomes
/// `Vec<String>`.
pub(crate) fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut token = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            token.push(c);
        } else {
            out.push_str(last_segment(&token));
            token.clear();
            out.push(c);
        }
    }
    out.push_str(last_segment(&token));
    out
}

fn last_segment(token: &str) -> &str {
    token.rsplit("::").next().unwrap_or(token)
}

/// Build a [`Field`] for a member of a record type.
///
/// ```ignore
/// field!(Person, age, "Age in years", Required)
/// field!(Entry, level => "log_level", "Severity", Optional)
/// ```
///
/// The first form uses the member name as the input key; the second
/// supplies the key explicitly. The last argument is a [`Requirement`]
/// variant.
#[macro_export]
macro_rules! field {
    ($rec:ty, $member:ident => $name:expr, $desc:expr, $req:ident) => {
        $crate::Field::<$rec, _>::new(
            $name,
            $desc,
            $crate::Requirement::$req,
            |record| &record.$member,
            |record| &mut record.$member,
        )
    };
    ($rec:ty, $member:ident, $desc:expr, $req:ident) => {
        $crate::field!($rec, $member => stringify!($member), $desc, $req)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamlmeta_core::{Length, Range};

    #[derive(Debug, Clone, Default)]
    struct Account {
        username: String,
        balance: i64,
        tags: Vec<String>,
    }

    fn yaml(text: &str) -> serde_yaml::Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn macro_uses_member_name_as_key() {
        let f = crate::field!(Account, username, "Login name", Required);
        assert_eq!(f.name(), "username");
        assert_eq!(f.description(), "Login name");
        assert_eq!(f.requirement(), Requirement::Required);
    }

    #[test]
    fn macro_accepts_explicit_key() {
        let f = crate::field!(Account, username => "user", "", Optional);
        assert_eq!(f.name(), "user");
        assert_eq!(f.requirement(), Requirement::Optional);
    }

    #[test]
    fn parse_into_stores_converted_value() {
        let f = crate::field!(Account, balance, "", Required);
        let doc = yaml("250");
        let mut account = Account::default();
        f.parse_into(&mut account, Node::new(&doc), &ParseOptions::default())
            .unwrap();
        assert_eq!(account.balance, 250);
        assert_eq!(f.render(&account), "250");
        assert_eq!(f.to_json(&account), Value::from(250));
    }

    #[test]
    fn constraint_failure_leaves_record_untouched() {
        let f = crate::field!(Account, username, "", Required).with_constraint(Length::new(1, 5));
        let doc = yaml("much_too_long");
        let mut account = Account {
            username: "old".into(),
            ..Account::default()
        };
        let err = f
            .parse_into(&mut account, Node::new(&doc), &ParseOptions::default())
            .unwrap_err();
        assert_eq!(err.errors()[0].kind, ErrorKind::ConstraintViolation);
        assert_eq!(err.errors()[0].message, "String length 13 out of bounds [1, 5]");
        assert_eq!(account.username, "old");
    }

    #[test]
    fn conversion_failure_leaves_record_untouched() {
        let f = crate::field!(Account, balance, "", Required).with_constraint(Range::new(0, 1000));
        let doc = yaml("lots");
        let mut account = Account::default();
        let err = f
            .parse_into(&mut account, Node::new(&doc), &ParseOptions::default())
            .unwrap_err();
        assert_eq!(err.errors()[0].kind, ErrorKind::TypeConversion);
        assert_eq!(account.balance, 0);
    }

    #[test]
    fn list_constraint_applies_to_whole_list() {
        let f = crate::field!(Account, tags, "", Optional).with_constraint(Length::new(0, 2));
        let doc = yaml("[a, b, c]");
        let mut account = Account::default();
        let err = f
            .parse_into(&mut account, Node::new(&doc), &ParseOptions::default())
            .unwrap_err();
        assert_eq!(err.errors()[0].message, "List length 3 out of bounds [0, 2]");
        assert!(account.tags.is_empty());
    }

    #[test]
    fn type_names_are_shortened() {
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(
            short_type_name("alloc::vec::Vec<alloc::string::String>"),
            "Vec<String>"
        );
        assert_eq!(
            short_type_name("yamlmeta_core::bounded::BoundedInt<0, 150>"),
            "BoundedInt<0, 150>"
        );
        assert_eq!(short_type_name("i64"), "i64");
    }

    #[test]
    fn constraint_is_reported() {
        let f = crate::field!(Account, balance, "", Required).with_constraint(Range::new(0, 1000));
        assert!(f.is_constrained());
        let plain = crate::field!(Account, balance, "", Required);
        assert!(!plain.is_constrained());
    }
}
