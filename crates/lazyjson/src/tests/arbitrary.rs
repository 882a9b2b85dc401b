use core::fmt;

use quickcheck::{Arbitrary, Gen};

use crate::{Result, Value};

/// Eagerly built document used as the reference side of property tests.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Doc {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Doc>),
    /// Entries in source order; may repeat keys.
    Object(Vec<(String, Doc)>),
}

impl Doc {
    /// What a lazy object exposes: the first entry of every key, in source
    /// order.
    pub(crate) fn first_keys_win(&self) -> Doc {
        match self {
            Doc::Array(items) => Doc::Array(items.iter().map(Doc::first_keys_win).collect()),
            Doc::Object(entries) => {
                let mut seen: Vec<(String, Doc)> = Vec::new();
                for (k, v) in entries {
                    if !seen.iter().any(|(s, _)| s == k) {
                        seen.push((k.clone(), v.first_keys_win()));
                    }
                }
                Doc::Object(seen)
            }
            other => other.clone(),
        }
    }

    /// Forces `value` completely into an eager [`Doc`].
    pub(crate) fn read(value: &Value) -> Result<Doc> {
        Ok(match value {
            Value::Null => Doc::Null,
            Value::Boolean(b) => Doc::Boolean(*b),
            Value::Integer(i) => Doc::Integer(i.value()?),
            Value::Float(f) => Doc::Float(f.value()?),
            Value::String(s) => Doc::String(s.as_str()?.to_owned()),
            Value::Array(a) => Doc::Array(
                a.iter()
                    .map(|e| e.and_then(|e| Doc::read(&e)))
                    .collect::<Result<_>>()?,
            ),
            Value::Object(o) => Doc::Object(
                o.iter()
                    .map(|e| e.and_then(|(k, v)| Ok((k.to_string(), Doc::read(&v)?))))
                    .collect::<Result<_>>()?,
            ),
        })
    }
}

fn quoted(s: &str) -> String {
    serde_json::to_string(s).unwrap()
}

/// Renders JSON with irregular spacing so the scanner sees some whitespace.
impl fmt::Display for Doc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Doc::Null => f.write_str("null"),
            Doc::Boolean(b) => write!(f, "{b}"),
            Doc::Integer(i) => write!(f, "{i}"),
            Doc::Float(x) => write!(f, "{x:?}"),
            Doc::String(s) => f.write_str(&quoted(s)),
            Doc::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(if i % 2 == 0 { ", " } else { ",\n" })?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Doc::Object(entries) => {
                f.write_str("{ ")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{} :{v}", quoted(k))?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl Arbitrary for Doc {
    fn arbitrary(g: &mut Gen) -> Self {
        fn scalar(g: &mut Gen) -> Doc {
            match usize::arbitrary(g) % 5 {
                0 => Doc::Null,
                1 => Doc::Boolean(bool::arbitrary(g)),
                2 => Doc::Integer(i64::arbitrary(g)),
                // Quarters are exact in binary and print with a fraction.
                3 => Doc::Float(f64::from(i32::arbitrary(g)) / 4.0),
                _ => Doc::String(String::arbitrary(g)),
            }
        }

        fn gen_doc(g: &mut Gen, depth: usize) -> Doc {
            if depth == 0 {
                return scalar(g);
            }
            match usize::arbitrary(g) % 4 {
                0 | 1 => scalar(g),
                2 => {
                    let len = usize::arbitrary(g) % 5;
                    Doc::Array((0..len).map(|_| gen_doc(g, depth - 1)).collect())
                }
                _ => {
                    let len = usize::arbitrary(g) % 5;
                    Doc::Object(
                        (0..len)
                            .map(|_| {
                                // Short keys so that repeats actually happen.
                                let key = String::arbitrary(g).chars().take(1).collect();
                                (key, gen_doc(g, depth - 1))
                            })
                            .collect(),
                    )
                }
            }
        }

        let depth = usize::arbitrary(g) % 4;
        gen_doc(g, depth)
    }
}
