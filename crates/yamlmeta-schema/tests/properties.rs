//! Property tests for the engine's invariants over generated YAML trees.

use proptest::prelude::*;
use serde_json::Value as Json;
use serde_yaml::{Mapping, Value};

use yamlmeta_schema::render::{to_flat_map, to_json_value};
use yamlmeta_schema::{
    field, parse_best_effort, parse_validated, record, BoundedInt, ErrorKind, Length, Node,
    Requirement, Whitelist, WhitelistVector,
};

#[derive(Debug, Clone)]
struct Profile {
    handle: String,
    age: BoundedInt<0, 150>,
    height: f64,
    active: bool,
    tags: Vec<String>,
    regions: WhitelistVector<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            handle: String::new(),
            age: BoundedInt::default(),
            height: 0.0,
            active: false,
            tags: Vec::new(),
            regions: WhitelistVector::with_allowed(Whitelist::new(["eu", "us", "apac"])),
        }
    }
}

record!(Profile {
    field!(Profile, handle, "", Required).with_constraint(Length::new(1, 16)),
    field!(Profile, age, "", Required),
    field!(Profile, height, "", Optional),
    field!(Profile, active, "", Optional),
    field!(Profile, tags, "", Optional),
    field!(Profile, regions, "", Optional),
});

const KEYS: &[&str] = &["handle", "age", "height", "active", "tags", "regions", "other"];

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z]{0,20}".prop_map(Value::String),
        prop::sample::select(vec!["eu", "us", "apac", "mars"])
            .prop_map(|s| Value::String(s.into())),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Sequence),
            prop::collection::vec((prop::sample::select(KEYS), inner), 0..6).prop_map(|entries| {
                let mut map = Mapping::new();
                for (k, v) in entries {
                    map.insert(Value::String(k.to_string()), v);
                }
                Value::Mapping(map)
            }),
        ]
    })
}

fn profile_doc() -> impl Strategy<Value = Value> {
    (
        "[a-z]{1,16}",
        0i64..=150,
        -300.0f64..300.0,
        any::<bool>(),
        prop::collection::vec("[a-z]{1,8}", 0..4),
        prop::collection::vec(prop::sample::select(vec!["eu", "us", "apac"]), 0..3),
    )
        .prop_map(|(handle, age, height, active, tags, regions)| {
            let mut map = Mapping::new();
            map.insert("handle".into(), handle.into());
            map.insert("age".into(), age.into());
            map.insert("height".into(), height.into());
            map.insert("active".into(), active.into());
            map.insert(
                "tags".into(),
                Value::Sequence(tags.into_iter().map(Value::String).collect()),
            );
            map.insert(
                "regions".into(),
                Value::Sequence(regions.into_iter().map(|r| Value::String(r.into())).collect()),
            );
            Value::Mapping(map)
        })
}

fn out_of_range_age() -> impl Strategy<Value = (String, Value)> {
    prop_oneof![
        (i64::MIN..0i64).prop_map(|n| (n.to_string(), Value::from(n))),
        (151i64..=i64::MAX).prop_map(|n| (n.to_string(), Value::from(n))),
        ((i64::MAX as u64 + 1)..=u64::MAX).prop_map(|n| (n.to_string(), Value::from(n))),
    ]
}

proptest! {
    /// Best-effort parsing returns a record for any input tree.
    #[test]
    fn best_effort_never_fails(doc in tree()) {
        let profile: Profile = parse_best_effort(Node::new(&doc));
        prop_assert!((0..=150).contains(&profile.age.get()));
    }

    /// A successful validating parse implies every required field was
    /// present and every value is within its constraints.
    #[test]
    fn validated_success_implies_constraints(doc in tree()) {
        if let Ok(profile) = parse_validated::<Profile>(Node::new(&doc)) {
            let node = Node::new(&doc);
            for field in <Profile as yamlmeta_schema::Record>::schema().fields() {
                if field.requirement() == Requirement::Required {
                    prop_assert!(node.get(field.name()).is_some());
                }
            }
            prop_assert!((1..=16).contains(&profile.handle.chars().count()));
            prop_assert!((0..=150).contains(&profile.age.get()));
            for region in profile.regions.iter() {
                prop_assert!(["eu", "us", "apac"].contains(&region.as_str()));
            }
        }
    }

    /// A missing required field is always reported at exactly its name.
    #[test]
    fn missing_required_reported(doc in profile_doc(), drop_age in any::<bool>()) {
        let mut doc = doc;
        let dropped = if drop_age { "age" } else { "handle" };
        if let Value::Mapping(map) = &mut doc {
            map.remove(dropped);
        }
        let report = parse_validated::<Profile>(Node::new(&doc)).unwrap_err();
        prop_assert!(report
            .errors()
            .iter()
            .any(|e| e.path == dropped && e.kind == ErrorKind::MissingRequiredField));
    }

    /// Out-of-range ages name the path, the value and the bounds, including
    /// values too large for a signed 64-bit integer.
    #[test]
    fn out_of_range_message(doc in profile_doc(), age in out_of_range_age()) {
        let (text, value) = age;
        let mut doc = doc;
        if let Value::Mapping(map) = &mut doc {
            map.insert("age".into(), value);
        }
        let report = parse_validated::<Profile>(Node::new(&doc)).unwrap_err();
        prop_assert_eq!(report.len(), 1);
        prop_assert_eq!(&report.errors()[0].path, "age");
        prop_assert_eq!(report.errors()[0].kind, ErrorKind::ConstraintViolation);
        prop_assert!(report.errors()[0].message.contains(&text));
        prop_assert!(report.errors()[0].message.contains("[0, 150]"));
    }

    /// Flat-map and JSON renderers agree on every field.
    #[test]
    fn flat_map_and_json_agree(doc in profile_doc()) {
        let profile = parse_validated::<Profile>(Node::new(&doc)).unwrap();
        let flat = to_flat_map(&profile);
        let json = to_json_value(&profile);
        for (name, value) in &flat {
            let rendered = match &json[name.as_str()] {
                Json::String(s) => s.clone(),
                other => other.to_string(),
            };
            prop_assert_eq!(&rendered, value);
        }
    }

    /// Whitelist vectors accept every allowed element and reject the rest.
    #[test]
    fn whitelist_accepts_exactly_members(items in prop::collection::vec("[a-z]{1,5}", 0..10)) {
        let allowed = ["eu", "us", "apac"];
        let mut regions: WhitelistVector<String> =
            WhitelistVector::with_allowed(Whitelist::new(allowed));
        for item in &items {
            let admitted = regions.push(item.clone()).is_ok();
            prop_assert_eq!(admitted, allowed.contains(&item.as_str()));
        }
        prop_assert!(regions.iter().all(|r| allowed.contains(&r.as_str())));
    }
}
