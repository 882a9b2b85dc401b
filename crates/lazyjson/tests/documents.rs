#![expect(missing_docs)]
#![expect(clippy::needless_raw_string_hashes)]

use lazyjson::{Value, parse};
use rstest::rstest;

fn eager(text: &str) -> serde_json::Value {
    serde_json::from_str(text).unwrap()
}

fn lazy(text: &str) -> serde_json::Value {
    serde_json::to_value(parse(text).unwrap()).unwrap()
}

#[rstest]
#[case("null")]
#[case("true")]
#[case("-17")]
#[case("6.02e23")]
#[case(r#""a \"quoted\" é 😀 string""#)]
#[case("[]")]
#[case("{}")]
#[case(r#"[1, [2, [3, [4, []]]], {"k": {"k": {"k": null}}}]"#)]
#[case(r#"{"name": "lazy", "tags": ["a", "b"], "size": 1.25, "ok": false, "none": null}"#)]
#[case(r#"  {"ws" :	[ 1 ,2
, 3 ] }  "#)]
#[case(r#"[-9223372036854775808, 9223372036854775807, 0, -0.0, 1E-7]"#)]
fn agrees_with_serde_json(#[case] text: &str) {
    assert_eq!(lazy(text), eager(text));
}

#[test]
fn serialization_reports_lazy_errors() {
    let doc = parse(r#"{"ok": 1, "bad": [1, 2 3]}"#).unwrap();
    let err = serde_json::to_string(&doc).unwrap_err();
    assert!(err.to_string().contains("expected ','"), "{err}");

    let doc = parse(r#"["\x"]"#).unwrap();
    assert!(serde_json::to_string(&doc).is_err());

    // Parts that were not the problem still serialize.
    let doc = parse(r#"{"ok": 1, "bad": [1, 2 3]}"#).unwrap();
    assert_eq!(serde_json::to_string(&doc.get("ok").unwrap()).unwrap(), "1");
}

#[test]
fn repeated_keys_serialize_first_entry() {
    let doc = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
    insta::assert_snapshot!(serde_json::to_string(&doc).unwrap(), @r#"{"a":1,"b":2}"#);
}

#[test]
fn pretty_output() {
    let doc = parse(r#"{"id": 7, "tags": ["x", "y\n"], "nested": {"empty": [], "f": 0.5}}"#).unwrap();
    insta::assert_snapshot!(serde_json::to_string_pretty(&doc).unwrap(), @r#"
    {
      "id": 7,
      "tags": [
        "x",
        "y\n"
      ],
      "nested": {
        "empty": [],
        "f": 0.5
      }
    }
    "#);
}

#[test]
fn values_serialize_independently() {
    let doc = parse(r#"[{"a": [true, null]}, "s"]"#).unwrap();
    let first: Value = doc.at(0).unwrap();
    assert_eq!(
        serde_json::to_string(&first.get("a").unwrap()).unwrap(),
        "[true,null]"
    );
    assert_eq!(serde_json::to_string(&doc.at(1).unwrap()).unwrap(), r#""s""#);
}
