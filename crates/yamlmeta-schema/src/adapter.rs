//! # Schema Adapters
//!
//! [`SchemaAdapter`] is the capability a type needs to appear as a field of a
//! record: parse itself from a [`Node`], render itself to a flat string, and
//! describe itself as a JSON value. The engine is written once against this
//! trait; a field whose type has no adapter does not compile.
//!
//! ## Built-in adapters
//!
//! | Type | Input | Flat rendering | JSON |
//! |---|---|---|---|
//! | `String` | any scalar | raw | string |
//! | `bool` | boolean or yes/no/y/n/on/off | `true`/`false` | bare |
//! | `i32`, `i64`, `u16`, `u32`, `u64` | integer | decimal | bare |
//! | `f64` | number | shortest round-trip | bare |
//! | `Option<T>` | null or `T` | `null` or `T` | `null` or `T` |
//! | `Vec<T>` | sequence | `[a, b]` | string |
//! | `BTreeMap<String, V>` | mapping | `{k=v, k2=v2}` | string |
//! | [`BoundedInt`], [`BoundedString`] | as the primitive, range-checked | as the primitive | as the primitive |
//! | [`ConstrainedVector`], [`ConstrainedMap`] | as `Vec`/`BTreeMap`, each element checked | as `Vec`/`BTreeMap` | string |
//!
//! Enumerations get an adapter from [`schema_enum!`](crate::schema_enum) and
//! nested records from [`record!`](crate::record).
//!
//! ## Error paths
//!
//! An adapter reports errors at paths relative to itself: the empty path
//! for the value as a whole, `[i]` for sequence elements and the key for
//! mapping entries. The engine folds them under the field's name.

use std::collections::BTreeMap;

use serde_json::Value;
use yamlmeta_core::{
    BoundedInt, BoundedString, ConstrainedMap, ConstrainedVector, Constraint, NamedEnum,
};

use crate::engine::ParseOptions;
use crate::error::ConversionError;
use crate::node::Node;
use crate::report::{ErrorKind, ValidationResult};

/// Parse, render and JSON-describe a field value.
pub trait SchemaAdapter: Clone + Send + Sync + 'static {
    /// Replace `self` with the value held by `node`.
    ///
    /// On error `self` may be partially updated; the engine stages the
    /// parse on a copy and only commits it on success.
    fn parse_node(
        &mut self,
        node: Node<'_>,
        options: &ParseOptions,
    ) -> Result<(), ValidationResult>;

    /// Canonical flat string form.
    fn render(&self) -> String;

    /// JSON form. Defaults to the flat rendering as a JSON string, which
    /// keeps the flat-map and JSON renderers in agreement.
    fn to_json(&self) -> Value {
        Value::String(self.render())
    }
}

fn conversion(err: ConversionError) -> ValidationResult {
    ValidationResult::single(ErrorKind::TypeConversion, err.to_string())
}

fn violation(message: impl Into<String>) -> ValidationResult {
    ValidationResult::single(ErrorKind::ConstraintViolation, message)
}

/// An integer that parsed but overflows its target is a bound violation,
/// reported against the target's `[min, max]`.
fn out_of_bounds(
    err: ConversionError,
    min: impl std::fmt::Display,
    max: impl std::fmt::Display,
) -> ValidationResult {
    match err {
        ConversionError::OutOfRange { value, .. } => {
            violation(format!("Value {value} out of bounds [{min}, {max}]"))
        }
        other => conversion(other),
    }
}

// ---------------------------------------------------------------------------
// Primitives
// ---------------------------------------------------------------------------

impl SchemaAdapter for String {
    fn parse_node(
        &mut self,
        node: Node<'_>,
        _options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        *self = node.as_string().map_err(conversion)?;
        Ok(())
    }

    fn render(&self) -> String {
        self.clone()
    }
}

impl SchemaAdapter for bool {
    fn parse_node(
        &mut self,
        node: Node<'_>,
        _options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        *self = node.as_bool().map_err(conversion)?;
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl SchemaAdapter for i64 {
    fn parse_node(
        &mut self,
        node: Node<'_>,
        _options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        *self = node.as_i64().map_err(|e| out_of_bounds(e, i64::MIN, i64::MAX))?;
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl SchemaAdapter for u64 {
    fn parse_node(
        &mut self,
        node: Node<'_>,
        _options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        *self = node.as_u64().map_err(|e| out_of_bounds(e, u64::MIN, u64::MAX))?;
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

macro_rules! narrow_int_adapter {
    ($($ty:ty),*) => {
        $(
            impl SchemaAdapter for $ty {
                fn parse_node(
                    &mut self,
                    node: Node<'_>,
                    _options: &ParseOptions,
                ) -> Result<(), ValidationResult> {
                    let bounds = |e: ConversionError| out_of_bounds(e, <$ty>::MIN, <$ty>::MAX);
                    let wide = node.as_i64().map_err(bounds)?;
                    *self = <$ty>::try_from(wide).map_err(|_| {
                        bounds(ConversionError::OutOfRange {
                            value: wide.to_string(),
                            target: stringify!($ty),
                        })
                    })?;
                    Ok(())
                }

                fn render(&self) -> String {
                    self.to_string()
                }

                fn to_json(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

narrow_int_adapter!(i32, u16, u32);

impl SchemaAdapter for f64 {
    fn parse_node(
        &mut self,
        node: Node<'_>,
        _options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        *self = node.as_f64().map_err(conversion)?;
        Ok(())
    }

    fn render(&self) -> String {
        // serde_json's formatter, so the flat form matches the JSON number.
        match serde_json::Number::from_f64(*self) {
            Some(n) => n.to_string(),
            None => self.to_string(),
        }
    }

    fn to_json(&self) -> Value {
        serde_json::Number::from_f64(*self)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(self.to_string()))
    }
}

impl<T: SchemaAdapter + Default> SchemaAdapter for Option<T> {
    fn parse_node(
        &mut self,
        node: Node<'_>,
        options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        if node.is_null() {
            *self = None;
            return Ok(());
        }
        let mut inner = T::default();
        inner.parse_node(node, options)?;
        *self = Some(inner);
        Ok(())
    }

    fn render(&self) -> String {
        match self {
            Some(inner) => inner.render(),
            None => "null".to_string(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Some(inner) => inner.to_json(),
            None => Value::Null,
        }
    }
}

// ---------------------------------------------------------------------------
// Standard containers
// ---------------------------------------------------------------------------

/// Parse every element of a sequence node, collecting all element errors
/// under `[i]`. Elements that parse are handed to `accept`, whose own
/// failures are recorded the same way.
fn parse_sequence<T, F>(
    node: Node<'_>,
    options: &ParseOptions,
    mut accept: F,
) -> Result<(), ValidationResult>
where
    T: SchemaAdapter + Default,
    F: FnMut(T) -> Result<(), String>,
{
    let items = node.items().map_err(conversion)?;
    let mut report = ValidationResult::new();
    for (index, item) in items.into_iter().enumerate() {
        let mut element = T::default();
        let segment = format!("[{index}]");
        match element.parse_node(item, options) {
            Ok(()) => {
                if let Err(message) = accept(element) {
                    report.add_error(segment, ErrorKind::ConstraintViolation, message);
                }
            }
            Err(nested) => report.merge_nested(&segment, nested),
        }
    }
    if report.is_valid() {
        Ok(())
    } else {
        Err(report)
    }
}

/// Mapping counterpart of [`parse_sequence`]; entry errors are recorded
/// under the entry key.
fn parse_mapping<V, F>(
    node: Node<'_>,
    options: &ParseOptions,
    mut accept: F,
) -> Result<(), ValidationResult>
where
    V: SchemaAdapter + Default,
    F: FnMut(String, V) -> Result<(), String>,
{
    let entries = node.entries().map_err(conversion)?;
    let mut report = ValidationResult::new();
    for (key, child) in entries {
        let mut value = V::default();
        match value.parse_node(child, options) {
            Ok(()) => {
                let path = key.clone();
                if let Err(message) = accept(key, value) {
                    report.add_error(path, ErrorKind::ConstraintViolation, message);
                }
            }
            Err(nested) => report.merge_nested(&key, nested),
        }
    }
    if report.is_valid() {
        Ok(())
    } else {
        Err(report)
    }
}

fn render_list<'a, T: SchemaAdapter + 'a>(items: impl Iterator<Item = &'a T>) -> String {
    let parts: Vec<String> = items.map(SchemaAdapter::render).collect();
    format!("[{}]", parts.join(", "))
}

fn render_map<'a, V: SchemaAdapter + 'a>(
    entries: impl Iterator<Item = (&'a String, &'a V)>,
) -> String {
    let parts: Vec<String> = entries.map(|(k, v)| format!("{k}={}", v.render())).collect();
    format!("{{{}}}", parts.join(", "))
}

impl<T: SchemaAdapter + Default> SchemaAdapter for Vec<T> {
    fn parse_node(
        &mut self,
        node: Node<'_>,
        options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        self.clear();
        parse_sequence(node, options, |element: T| {
            self.push(element);
            Ok(())
        })
    }

    fn render(&self) -> String {
        render_list(self.iter())
    }
}

impl<V: SchemaAdapter + Default> SchemaAdapter for BTreeMap<String, V> {
    fn parse_node(
        &mut self,
        node: Node<'_>,
        options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        self.clear();
        parse_mapping(node, options, |key, value: V| {
            self.insert(key, value);
            Ok(())
        })
    }

    fn render(&self) -> String {
        render_map(self.iter())
    }
}

// ---------------------------------------------------------------------------
// Bounded scalars
// ---------------------------------------------------------------------------

impl<const MIN: i64, const MAX: i64> SchemaAdapter for BoundedInt<MIN, MAX> {
    fn parse_node(
        &mut self,
        node: Node<'_>,
        _options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        let raw = node.as_i64().map_err(|e| out_of_bounds(e, MIN, MAX))?;
        *self = BoundedInt::new(raw).map_err(|e| violation(e.to_string()))?;
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn to_json(&self) -> Value {
        Value::from(self.get())
    }
}

impl<const MIN_LEN: usize, const MAX_LEN: usize> SchemaAdapter for BoundedString<MIN_LEN, MAX_LEN> {
    fn parse_node(
        &mut self,
        node: Node<'_>,
        _options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        let raw = node.as_string().map_err(conversion)?;
        *self = BoundedString::new(raw).map_err(|e| violation(e.to_string()))?;
        Ok(())
    }

    fn render(&self) -> String {
        self.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// Constrained containers
// ---------------------------------------------------------------------------

impl<T, C> SchemaAdapter for ConstrainedVector<T, C>
where
    T: SchemaAdapter + Default,
    C: Constraint<T> + Clone + 'static,
{
    fn parse_node(
        &mut self,
        node: Node<'_>,
        options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        *self = ConstrainedVector::new(self.constraint().clone());
        parse_sequence(node, options, |element: T| {
            self.push(element).map_err(|e| e.to_string())
        })
    }

    fn render(&self) -> String {
        render_list(self.iter())
    }
}

impl<V, KC, VC> SchemaAdapter for ConstrainedMap<String, V, KC, VC>
where
    V: SchemaAdapter + Default,
    KC: Constraint<String> + Clone + 'static,
    VC: Constraint<V> + Clone + 'static,
{
    fn parse_node(
        &mut self,
        node: Node<'_>,
        options: &ParseOptions,
    ) -> Result<(), ValidationResult> {
        *self = ConstrainedMap::new(self.key_constraint().clone(), self.value_constraint().clone());
        parse_mapping(node, options, |key, value: V| {
            self.insert(key, value).map_err(|e| e.to_string())
        })
    }

    fn render(&self) -> String {
        render_map(self.iter())
    }
}

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Parse an enum field by name. Used by [`schema_enum!`](crate::schema_enum).
pub fn parse_enum<E: NamedEnum>(target: &mut E, node: Node<'_>) -> Result<(), ValidationResult> {
    let name = node.as_string().map_err(conversion)?;
    *target = E::from_name(&name).map_err(|e| conversion_message(e.to_string()))?;
    Ok(())
}

fn conversion_message(message: String) -> ValidationResult {
    ValidationResult::single(ErrorKind::TypeConversion, message)
}

/// Implement [`NamedEnum`], `Display`, `FromStr` and [`SchemaAdapter`] for a
/// fieldless enum from a `Variant => "name"` list.
///
/// The enum must also implement `Default`, `Debug`, `Clone`, `Copy`, `Eq`
/// and `Hash`. An unknown name is a type-conversion error in a validating
/// parse; an unmapped value renders as `"unknown"`.
#[macro_export]
macro_rules! schema_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        $crate::named_enum!($ty { $($variant => $name),+ });

        impl $crate::SchemaAdapter for $ty {
            fn parse_node(
                &mut self,
                node: $crate::Node<'_>,
                _options: &$crate::ParseOptions,
            ) -> ::std::result::Result<(), $crate::ValidationResult> {
                $crate::adapter::parse_enum(self, node)
            }

            fn render(&self) -> ::std::string::String {
                ::std::string::ToString::to_string($crate::NamedEnum::name(*self))
            }
        }
    };
}
