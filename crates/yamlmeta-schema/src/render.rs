//! # Renderers
//!
//! Three independent views of an already-populated record, all driven by
//! the same descriptor list. None of them re-runs validation.
//!
//! - [`to_text`]: one `name: value` line per field, with a trailing
//!   `# description` comment when the description is non-empty.
//! - [`to_flat_map`]: field name to flat string value, one level.
//! - [`to_json`]: a JSON object in descriptor order. Numbers and booleans
//!   are bare; everything else is a JSON string of its flat rendering, so a
//!   field's JSON string content equals its flat-map value. String content
//!   is escaped.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::schema::Record;

/// Human-readable text block, one line per field.
pub fn to_text<R: Record>(record: &R) -> String {
    let mut out = String::new();
    for field in R::schema().fields() {
        out.push_str(field.name());
        out.push_str(": ");
        out.push_str(&field.render(record));
        let description = field.description();
        if !description.is_empty() {
            out.push_str("  # ");
            out.push_str(description);
        }
        out.push('\n');
    }
    out
}

/// Field name to flat string value.
pub fn to_flat_map<R: Record>(record: &R) -> BTreeMap<String, String> {
    R::schema()
        .fields()
        .map(|field| (field.name().to_string(), field.render(record)))
        .collect()
}

/// JSON object with one member per field, in descriptor order.
pub fn to_json_value<R: Record>(record: &R) -> Value {
    let members: Map<String, Value> = R::schema()
        .fields()
        .map(|field| (field.name().to_string(), field.to_json(record)))
        .collect();
    Value::Object(members)
}

/// Pretty-printed [`to_json_value`].
pub fn to_json<R: Record>(record: &R) -> String {
    format!("{:#}", to_json_value(record))
}

/// Single-line `{name=value, ...}` form, used when a record is rendered as
/// the value of another record's field.
pub fn to_inline<R: Record>(record: &R) -> String {
    let parts: Vec<String> = R::schema()
        .fields()
        .map(|field| format!("{}={}", field.name(), field.render(record)))
        .collect();
    format!("{{{}}}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Sample {
        label: String,
        count: i64,
        ratio: f64,
        enabled: bool,
        tags: Vec<String>,
    }

    crate::record!(Sample {
        crate::field!(Sample, label, "Display label", Required),
        crate::field!(Sample, count, "", Required),
        crate::field!(Sample, ratio, "Fraction", Optional),
        crate::field!(Sample, enabled, "", Optional),
        crate::field!(Sample, tags, "", Optional),
    });

    fn sample() -> Sample {
        Sample {
            label: "say \"hi\"".into(),
            count: 3,
            ratio: 0.5,
            enabled: true,
            tags: vec!["a".into(), "b".into()],
        }
    }

    #[test]
    fn text_has_one_line_per_field() {
        let text = to_text(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "label: say \"hi\"  # Display label",
                "count: 3",
                "ratio: 0.5  # Fraction",
                "enabled: true",
                "tags: [a, b]",
            ]
        );
    }

    #[test]
    fn flat_map_has_every_field() {
        let map = to_flat_map(&sample());
        assert_eq!(map.len(), 5);
        assert_eq!(map["count"], "3");
        assert_eq!(map["tags"], "[a, b]");
    }

    #[test]
    fn json_follows_descriptor_order() {
        let json = to_json_value(&sample());
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["label", "count", "ratio", "enabled", "tags"]);
        assert_eq!(json["count"], Value::from(3));
        assert_eq!(json["enabled"], Value::Bool(true));
        assert_eq!(json["tags"], Value::String("[a, b]".into()));
    }

    #[test]
    fn json_escapes_quotes() {
        let text = to_json(&sample());
        assert!(text.contains(r#""label": "say \"hi\"""#));
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed["label"], "say \"hi\"");
    }

    #[test]
    fn flat_map_and_json_agree() {
        let record = sample();
        let map = to_flat_map(&record);
        let json = to_json_value(&record);
        for (name, flat) in &map {
            let value = &json[name.as_str()];
            let as_text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            assert_eq!(&as_text, flat, "field {name}");
        }
    }

    #[test]
    fn inline_form() {
        let record = Sample {
            label: "x".into(),
            ..Sample::default()
        };
        assert_eq!(
            to_inline(&record),
            "{label=x, count=0, ratio=0.0, enabled=false, tags=[]}"
        );
    }
}
