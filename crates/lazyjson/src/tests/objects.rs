use std::sync::Arc;

use test_log::test;

use crate::{Error, ValueKind, parse};

const SEVEN_KEYS: &str = r#"{
    "key1": "value",
    "key2": 12,
    "key3": -1.5,
    "key4": true,
    "key5": null,
    "key6": [1, 2],
    "key7": {"inner": "x"}
}"#;

#[test]
fn seven_keys_of_every_kind() {
    let v = parse(SEVEN_KEYS).unwrap();
    assert_eq!(v.get("key1").unwrap().as_str(), Ok("value"));
    assert_eq!(v.get("key2").unwrap().as_i64(), Ok(12));
    assert_eq!(v.get("key3").unwrap().as_f64(), Ok(-1.5));
    assert_eq!(v.get("key4").unwrap().as_bool(), Ok(true));
    assert!(v.get("key5").unwrap().is_null());
    assert_eq!(v.get("key6").unwrap().len(), Ok(2));
    assert_eq!(
        v.get("key7").unwrap().get("inner").unwrap().as_str(),
        Ok("x")
    );
    assert_eq!(v.len(), Ok(7));
}

#[test]
fn lookup_out_of_order_uses_the_memo() {
    let v = parse(SEVEN_KEYS).unwrap();
    let object = v.as_object().unwrap();
    assert_eq!(object.get("key3").unwrap().unwrap().kind(), ValueKind::Float);
    assert_eq!(object.scanned_entries(), 3);
    assert!(object.get("key1").unwrap().is_some());
    assert_eq!(object.scanned_entries(), 3);
    assert!(object.get("key7").unwrap().is_some());
    assert_eq!(object.scanned_entries(), 7);
    assert!(!object.is_complete());
    assert_eq!(object.get("key8"), Ok(None));
    assert!(object.is_complete());
}

#[test]
fn missing_keys() {
    let v = parse(r#"{"a": 1}"#).unwrap();
    assert_eq!(v.get("b"), Err(Error::KeyNotFound("b".to_owned())));
    assert_eq!(v.get_opt("b"), Ok(None));
    assert_eq!(v.as_object().unwrap().contains_key("a"), Ok(true));
    assert_eq!(v.as_object().unwrap().contains_key("b"), Ok(false));
}

#[test]
fn escaped_keys_are_decoded() {
    let v = parse(r#"{"\\": 1, "ab": 2, "line\nbreak": 3, "😀": 4}"#).unwrap();
    assert_eq!(v.get("\\").unwrap().as_i64(), Ok(1));
    assert_eq!(v.get("ab").unwrap().as_i64(), Ok(2));
    assert_eq!(v.get("line\nbreak").unwrap().as_i64(), Ok(3));
    assert_eq!(v.get("😀").unwrap().as_i64(), Ok(4));
}

#[test]
fn first_duplicate_wins_everywhere() {
    let v = parse(r#"{"a": 1, "b": 2, "a": 3, "c": 4, "b": 5}"#).unwrap();
    let object = v.as_object().unwrap();
    assert_eq!(v.get("a").unwrap().as_i64(), Ok(1));
    assert_eq!(v.get("b").unwrap().as_i64(), Ok(2));
    assert_eq!(object.len(), Ok(3));
    assert_eq!(object.scanned_entries(), 5);

    let entries: Vec<(Arc<str>, i64)> = object
        .iter()
        .map(|e| {
            let (k, v) = e.unwrap();
            (k, v.as_i64().unwrap())
        })
        .collect();
    assert_eq!(
        entries,
        vec![(Arc::from("a"), 1), (Arc::from("b"), 2), (Arc::from("c"), 4)]
    );
}

#[test]
fn keys_and_values_in_document_order() {
    let v = parse(r#"{"z": 1, "y": 2, "x": 3}"#).unwrap();
    let object = v.as_object().unwrap();
    let keys: Vec<String> = object.keys().map(|k| k.unwrap().to_string()).collect();
    assert_eq!(keys, vec!["z", "y", "x"]);
    let values: Vec<i64> = object
        .values()
        .map(|v| v.unwrap().as_i64().unwrap())
        .collect();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn empty_objects() {
    for text in ["{}", "{ }", "{\n}"] {
        let v = parse(text).unwrap();
        assert_eq!(v.is_empty(), Ok(true), "{text:?}");
        assert_eq!(v.len(), Ok(0));
        assert_eq!(v.get_opt("a"), Ok(None));
    }
}

#[test]
fn values_containing_delimiters() {
    let v = parse(r#"{"a": "x,y:z", "b": "}", "c": ["]", "{"], "d": {"e": "\"}"}}"#).unwrap();
    assert_eq!(v.get("a").unwrap().as_str(), Ok("x,y:z"));
    assert_eq!(v.get("b").unwrap().as_str(), Ok("}"));
    assert_eq!(v.get("c").unwrap().len(), Ok(2));
    assert_eq!(v.get("d").unwrap().get("e").unwrap().as_str(), Ok("\"}"));
}
