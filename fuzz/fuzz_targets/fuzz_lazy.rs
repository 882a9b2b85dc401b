#![no_main]

use arbitrary::Arbitrary;
use lazyjson::{MaterializeOptions, Value, parse};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value as Json};

/// A JSON tree the fuzzer can build structurally, so that most inputs get
/// past the first byte.
#[derive(Debug, Arbitrary)]
enum Tree {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Array(Vec<Tree>),
    Object(Vec<(String, Tree)>),
}

impl Tree {
    fn to_json(&self) -> Json {
        match self {
            Tree::Null => Json::Null,
            Tree::Bool(b) => Json::Bool(*b),
            Tree::Int(i) => Json::from(*i),
            Tree::Float(f) => serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number),
            Tree::Str(s) => Json::String(s.clone()),
            Tree::Array(items) => Json::Array(items.iter().map(Tree::to_json).collect()),
            Tree::Object(entries) => {
                let mut map = Map::new();
                for (k, v) in entries {
                    map.insert(k.clone(), v.to_json());
                }
                Json::Object(map)
            }
        }
    }
}

#[derive(Debug, Arbitrary)]
enum Input {
    /// Arbitrary text, mostly rejected early.
    Raw(String),
    /// A valid document, optionally cut short or with one byte replaced.
    Damaged { tree: Tree, cut: Option<u16>, poke: Option<(u16, u8)> },
    /// A valid document that must be accepted in full.
    Valid { tree: Tree, pretty: bool },
}

/// Reads every part of `value` through the lazy accessors. Errors are fine,
/// panics are not.
fn touch(value: &Value) {
    match value {
        Value::Array(a) => {
            let _ = a.len();
            for element in a.iter().flatten() {
                touch(&element);
            }
            let _ = a.at(usize::MAX);
        }
        Value::Object(o) => {
            for (key, v) in o.iter().flatten() {
                let _ = o.get(&key);
                touch(&v);
            }
        }
        Value::Integer(i) => drop(i.value()),
        Value::Float(f) => drop(f.value()),
        Value::String(s) => drop(s.as_str()),
        Value::Null | Value::Boolean(_) => {}
    }
    let _ = value.to_string();
}

fuzz_target!(|input: Input| {
    match input {
        Input::Raw(text) => {
            if let Ok(value) = parse(text) {
                touch(&value);
                let _ = value.materialize();
            }
        }
        Input::Damaged { tree, cut, poke } => {
            let mut bytes = serde_json::to_vec(&tree.to_json()).unwrap();
            if let Some((at, byte)) = poke {
                let at = usize::from(at) % bytes.len();
                bytes[at] = byte;
            }
            if let Some(cut) = cut {
                bytes.truncate(usize::from(cut) % (bytes.len() + 1));
            }
            let text = String::from_utf8_lossy(&bytes).into_owned();
            if let Ok(value) = parse(text) {
                let _ = value.materialize_parallel(MaterializeOptions {
                    parallel_threshold: 8,
                    capacity: 2,
                });
                touch(&value);
            }
        }
        Input::Valid { tree, pretty } => {
            let json = tree.to_json();
            let text = if pretty {
                serde_json::to_string_pretty(&json).unwrap()
            } else {
                serde_json::to_string(&json).unwrap()
            };
            let value = parse(text.as_str()).unwrap();
            if let Err(err) = value.materialize() {
                // Only nesting beyond the default limit may fail.
                assert!(matches!(err, lazyjson::Error::DepthLimitExceeded(_)), "{err} in {text}");
            }
        }
    }
});
