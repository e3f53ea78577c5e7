//! # Input Tree
//!
//! [`Node`] is the engine's read-only view of a parsed YAML document. It
//! wraps a borrowed `serde_yaml::Value` and offers exactly what the engine
//! needs: lookup by key, coercion of scalars to string/integer/float/bool,
//! shape tests, and ordered iteration of mappings and sequences.
//!
//! ## Coercion rules
//!
//! Scalars coerce by their text, the way a YAML consumer reading `port: "80"`
//! expects: a quoted `"80"` coerces to an integer, and any scalar coerces to
//! a string. Mappings, sequences and null never coerce to a scalar. YAML
//! tags are ignored and the tagged value is used.

use serde_yaml::Value;

use crate::error::ConversionError;

/// A borrowed node of a YAML document.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    value: &'a Value,
}

impl<'a> Node<'a> {
    /// Wrap a parsed YAML value.
    pub fn new(value: &'a Value) -> Self {
        Self {
            value: untag(value),
        }
    }

    /// The underlying YAML value.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Look up `key` in a mapping node. Returns `None` for absent keys and
    /// for nodes that are not mappings.
    pub fn get(&self, key: &str) -> Option<Node<'a>> {
        match self.value {
            Value::Mapping(map) => map.get(key).map(Node::new),
            _ => None,
        }
    }

    /// Returns `true` for mapping nodes.
    pub fn is_mapping(&self) -> bool {
        self.value.is_mapping()
    }

    /// Returns `true` for sequence nodes.
    pub fn is_sequence(&self) -> bool {
        self.value.is_sequence()
    }

    /// Returns `true` for an explicit or implicit null.
    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    /// Short description of the node's shape and, for scalars, its value.
    /// Used in conversion messages.
    pub fn describe(&self) -> String {
        match self.value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => format!("boolean {b}"),
            Value::Number(n) if n.is_f64() => format!("float {n}"),
            Value::Number(n) => format!("integer {n}"),
            Value::String(s) => format!("string {s:?}"),
            Value::Sequence(_) => "sequence".to_string(),
            Value::Mapping(_) => "mapping".to_string(),
            Value::Tagged(t) => Node::new(&t.value).describe(),
        }
    }

    fn mismatch(&self, expected: &'static str) -> ConversionError {
        ConversionError::TypeMismatch {
            expected,
            found: self.describe(),
        }
    }

    /// Coerce a scalar to its string form.
    pub fn as_string(&self) -> Result<String, ConversionError> {
        match self.value {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            _ => Err(self.mismatch("string")),
        }
    }

    /// Coerce a scalar to a signed 64-bit integer.
    pub fn as_i64(&self) -> Result<i64, ConversionError> {
        match self.value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(i)
                } else if n.is_u64() {
                    Err(ConversionError::OutOfRange {
                        value: n.to_string(),
                        target: "i64",
                    })
                } else {
                    Err(self.mismatch("integer"))
                }
            }
            Value::String(s) => s.trim().parse().map_err(|_| ConversionError::Unparseable {
                expected: "integer",
                value: s.clone(),
            }),
            _ => Err(self.mismatch("integer")),
        }
    }

    /// Coerce a scalar to an unsigned 64-bit integer.
    pub fn as_u64(&self) -> Result<u64, ConversionError> {
        match self.value {
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Ok(u)
                } else if n.is_i64() {
                    Err(ConversionError::OutOfRange {
                        value: n.to_string(),
                        target: "u64",
                    })
                } else {
                    Err(self.mismatch("unsigned integer"))
                }
            }
            Value::String(s) => s.trim().parse().map_err(|_| ConversionError::Unparseable {
                expected: "unsigned integer",
                value: s.clone(),
            }),
            _ => Err(self.mismatch("unsigned integer")),
        }
    }

    /// Coerce a scalar to a 64-bit float. Integers widen.
    pub fn as_f64(&self) -> Result<f64, ConversionError> {
        match self.value {
            Value::Number(n) => n.as_f64().ok_or_else(|| self.mismatch("float")),
            Value::String(s) => s.trim().parse().map_err(|_| ConversionError::Unparseable {
                expected: "float",
                value: s.clone(),
            }),
            _ => Err(self.mismatch("float")),
        }
    }

    /// Coerce a scalar to a boolean. Strings accept `true/false`, `yes/no`,
    /// `y/n` and `on/off`, case-insensitively.
    pub fn as_bool(&self) -> Result<bool, ConversionError> {
        match self.value {
            Value::Bool(b) => Ok(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "y" => Ok(true),
                "false" | "no" | "off" | "n" => Ok(false),
                _ => Err(ConversionError::Unparseable {
                    expected: "boolean",
                    value: s.clone(),
                }),
            },
            _ => Err(self.mismatch("boolean")),
        }
    }

    /// The entries of a mapping node in document order. Scalar keys are
    /// coerced to strings.
    pub fn entries(&self) -> Result<Vec<(String, Node<'a>)>, ConversionError> {
        match self.value {
            Value::Mapping(map) => map
                .iter()
                .map(|(k, v)| Ok((Node::new(k).as_string()?, Node::new(v))))
                .collect(),
            _ => Err(self.mismatch("mapping")),
        }
    }

    /// The elements of a sequence node in document order.
    pub fn items(&self) -> Result<Vec<Node<'a>>, ConversionError> {
        match self.value {
            Value::Sequence(seq) => Ok(seq.iter().map(Node::new).collect()),
            _ => Err(self.mismatch("sequence")),
        }
    }
}

fn untag(mut value: &Value) -> &Value {
    while let Value::Tagged(tagged) = value {
        value = &tagged.value;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn get_finds_keys_in_mappings_only() {
        let doc = yaml("name: Alice\nage: 28\n");
        let root = Node::new(&doc);
        assert_eq!(root.get("name").unwrap().as_string().unwrap(), "Alice");
        assert!(root.get("missing").is_none());

        let seq = yaml("- a\n- b\n");
        assert!(Node::new(&seq).get("a").is_none());
    }

    #[test]
    fn scalars_coerce_to_string() {
        let doc = yaml("a: 42\nb: true\nc: 2.5\n");
        let root = Node::new(&doc);
        assert_eq!(root.get("a").unwrap().as_string().unwrap(), "42");
        assert_eq!(root.get("b").unwrap().as_string().unwrap(), "true");
        assert_eq!(root.get("c").unwrap().as_string().unwrap(), "2.5");
    }

    #[test]
    fn quoted_numbers_coerce_to_integers() {
        let doc = yaml("timeout: \"30\"\n");
        assert_eq!(Node::new(&doc).get("timeout").unwrap().as_i64().unwrap(), 30);
    }

    #[test]
    fn integer_coercion_failures() {
        let doc = yaml("a: abc\nb: 2.5\nc: [1]\n");
        let root = Node::new(&doc);
        assert_eq!(
            root.get("a").unwrap().as_i64().unwrap_err(),
            ConversionError::Unparseable {
                expected: "integer",
                value: "abc".into()
            }
        );
        assert!(matches!(
            root.get("b").unwrap().as_i64().unwrap_err(),
            ConversionError::TypeMismatch { expected: "integer", .. }
        ));
        assert_eq!(
            root.get("c").unwrap().as_i64().unwrap_err().to_string(),
            "expected integer, found sequence"
        );
    }

    #[test]
    fn negative_number_is_not_unsigned() {
        let doc = yaml("a: -1\n");
        assert!(matches!(
            Node::new(&doc).get("a").unwrap().as_u64().unwrap_err(),
            ConversionError::OutOfRange { target: "u64", .. }
        ));
    }

    #[test]
    fn floats_accept_integers() {
        let doc = yaml("a: 30\nb: 30.5\n");
        let root = Node::new(&doc);
        assert_eq!(root.get("a").unwrap().as_f64().unwrap(), 30.0);
        assert_eq!(root.get("b").unwrap().as_f64().unwrap(), 30.5);
    }

    #[test]
    fn booleans_from_words() {
        let doc = yaml("a: true\nb: \"yes\"\nc: \"Off\"\nd: maybe\n");
        let root = Node::new(&doc);
        assert!(root.get("a").unwrap().as_bool().unwrap());
        assert!(root.get("b").unwrap().as_bool().unwrap());
        assert!(!root.get("c").unwrap().as_bool().unwrap());
        assert!(root.get("d").unwrap().as_bool().is_err());

        let doc = yaml("a: \"Y\"\nb: \"n\"\n");
        let short = Node::new(&doc);
        assert!(short.get("a").unwrap().as_bool().unwrap());
        assert!(!short.get("b").unwrap().as_bool().unwrap());
    }

    #[test]
    fn null_does_not_coerce() {
        let doc = yaml("a: ~\n");
        let node = Node::new(&doc).get("a").unwrap();
        assert!(node.is_null());
        assert_eq!(node.as_string().unwrap_err().to_string(), "expected string, found null");
    }

    #[test]
    fn entries_preserve_document_order() {
        let doc = yaml("zeta: 1\nalpha: 2\n10: 3\n");
        let keys: Vec<String> = Node::new(&doc)
            .entries()
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "10"]);
    }

    #[test]
    fn items_require_a_sequence() {
        let doc = yaml("- x\n- y\n");
        assert_eq!(Node::new(&doc).items().unwrap().len(), 2);
        let map = yaml("a: 1\n");
        assert!(Node::new(&map).items().is_err());
    }

    #[test]
    fn tags_are_ignored() {
        let doc = yaml("port: !custom 8080\n");
        assert_eq!(Node::new(&doc).get("port").unwrap().as_i64().unwrap(), 8080);
    }
}
