//! Property tests for document construction and typed lookup.
//!
//! Strategies generate:
//! - random scalar values of every kind
//! - random key paths of one to three short segments
//! - random arrays, uniform or deliberately mixed
use proptest::prelude::*;
use tome_cfg::{Document, KeyPath, Kind, Lookup, TomeError, Value};

fn arb_segment() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{1,2}").unwrap()
}

fn arb_path() -> impl Strategy<Value = KeyPath> {
    prop::collection::vec(arb_segment(), 1..=3).prop_map(|s| KeyPath::new(s).unwrap())
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1e9f64..1e9f64).prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        (1970i32..2100, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
            Value::from(format!("{y:04}-{m:02}-{d:02}").parse::<tome_cfg::Datetime>().unwrap())
        }),
    ]
}

fn arb_uniform_array() -> impl Strategy<Value = Vec<Value>> {
    prop_oneof![
        prop::collection::vec(any::<i64>().prop_map(Value::from), 0..6),
        prop::collection::vec("[a-z]{0,4}".prop_map(Value::from), 0..6),
        prop::collection::vec(any::<bool>().prop_map(Value::from), 0..6),
    ]
}

fn all_getters(doc: &Document, path: &KeyPath) -> Vec<(Kind, bool)> {
    vec![
        (Kind::String, doc.get_string(path).is_ok()),
        (Kind::Integer, doc.get_integer(path).is_ok()),
        (Kind::Float, doc.get_float(path).is_ok()),
        (Kind::Boolean, doc.get_bool(path).is_ok()),
        (Kind::Datetime, doc.get_datetime(path).is_ok()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every accepted leaf resolves to exactly what was inserted there, and
    /// every rejected insertion is a duplicate that changes nothing.
    #[test]
    fn inserted_leaves_resolve_to_their_value(
        entries in prop::collection::vec((arb_path(), arb_scalar()), 1..20)
    ) {
        let mut builder = Document::builder();
        let mut accepted: Vec<(KeyPath, Value)> = Vec::new();

        for (path, value) in entries {
            match builder.insert(&path, value.clone()) {
                Ok(()) => accepted.push((path, value)),
                Err(e) => prop_assert_eq!(e, TomeError::DuplicateKey { path }),
            }
        }

        let doc = builder.finish();
        for (path, value) in &accepted {
            prop_assert_eq!(doc.resolve(path).unwrap(), Some(value));
        }
    }

    /// Inserting at an already bound path fails and keeps the first value.
    #[test]
    fn second_insert_is_rejected(path in arb_path(), first in arb_scalar(), second in arb_scalar()) {
        let mut builder = Document::builder();
        builder.insert(&path, first.clone()).unwrap();
        let before = builder.finish();

        let mut builder = Document::builder();
        builder.insert(&path, first.clone()).unwrap();
        prop_assert_eq!(
            builder.insert(&path, second),
            Err(TomeError::DuplicateKey { path: path.clone() })
        );
        let after = builder.finish();

        prop_assert_eq!(after.resolve(&path).unwrap(), Some(&first));
        prop_assert_eq!(after, before);
    }

    /// Accepted arrays are uniform; arrays mixing two kinds are refused and
    /// leave the document empty.
    #[test]
    fn arrays_must_be_uniform(
        elements in arb_uniform_array(),
        a in arb_scalar(),
        b in arb_scalar(),
    ) {
        let mut builder = Document::builder();
        builder.insert_array("list", elements.clone()).unwrap();
        let doc = builder.finish();
        let stored: &[Value] = doc.get("list").unwrap();
        if let Some(first) = stored.first() {
            prop_assert!(stored.iter().all(|v| v.kind() == first.kind()));
        }

        let mut builder = Document::builder();
        let mixed = builder.insert_array("mixed", vec![a.clone(), b.clone()]);
        if a.kind() == b.kind() {
            prop_assert!(mixed.is_ok());
        } else {
            let is_mixed_error = matches!(mixed, Err(TomeError::MixedArrayType { .. }));
            prop_assert!(is_mixed_error);
            prop_assert!(builder.finish().is_empty());
        }
    }

    /// The getter for a value's own kind succeeds; every other getter
    /// reports a type mismatch.
    #[test]
    fn getters_respect_kind(value in arb_scalar()) {
        let path = KeyPath::parse("key").unwrap();
        let mut builder = Document::builder();
        builder.insert(&path, value.clone()).unwrap();
        let doc = builder.finish();

        for (kind, ok) in all_getters(&doc, &path) {
            prop_assert_eq!(ok, kind == value.kind(), "getter for {}", kind);
        }
        prop_assert_eq!(doc.get::<Value, _>(&path).unwrap(), value.clone());

        let wrong = if value.kind() == Kind::Boolean { doc.get_integer(&path).err() } else { doc.get_bool(&path).err() };
        let is_mismatch = matches!(wrong, Some(TomeError::TypeMismatch { .. }));
        prop_assert!(is_mismatch);
    }

    /// Reads never change the document or their own answers.
    #[test]
    fn reads_are_idempotent(
        entries in prop::collection::vec((arb_path(), arb_scalar()), 1..10),
        query in arb_path(),
    ) {
        let mut builder = Document::builder();
        for (path, value) in entries {
            let _ = builder.insert(&path, value);
        }
        let doc = builder.finish();
        let snapshot = doc.clone();

        let first = (doc.resolve(&query).unwrap().cloned(), doc.get_string(&query), doc.has_key(&query));
        let second = (doc.resolve(&query).unwrap().cloned(), doc.get_string(&query), doc.has_key(&query));
        prop_assert_eq!(first, second);
        prop_assert_eq!(doc, snapshot);
    }
}
