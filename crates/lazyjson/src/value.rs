//! The lazy value model.
//!
//! A [`Value`] is a cheap, clonable handle. Scalars and containers point into
//! the shared document through a [`Slice`] and decode or scan it only when
//! asked; the result is cached behind the handle, so every clone of a value
//! benefits from work done through any other clone.

use core::{
    fmt,
    hash::{Hash, Hasher},
};
use std::sync::{Arc, OnceLock};

use crate::{
    array::JsonArray,
    error::{DecodeError, Error, NumberError, Result},
    number,
    object::JsonObject,
    slice::Slice,
    string,
};

/// Discriminant of a [`Value`], used in type errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

/// A JSON value whose contents are decoded on first access.
///
/// ```rust
/// use lazyjson::{Value, parse};
///
/// let doc = parse(r#"{"name": "lazy", "tags": [1, 2.5, null]}"#).unwrap();
/// assert!(doc.is_object());
/// assert_eq!(doc.get("name").unwrap().as_str().unwrap(), "lazy");
///
/// let tags = doc.get("tags").unwrap();
/// assert_eq!(tags.at(0).unwrap().as_i64().unwrap(), 1);
/// assert_eq!(tags.at(1).unwrap().as_f64().unwrap(), 2.5);
/// assert!(matches!(tags.at(2).unwrap(), Value::Null));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(JsonInteger),
    Float(JsonFloat),
    String(JsonString),
    Array(JsonArray),
    Object(JsonObject),
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[must_use]
    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Either an integer or a float.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless this is a boolean.
    pub fn as_bool(&self) -> Result<bool> {
        self.as_bool_opt().ok_or_else(|| self.mismatch(ValueKind::Boolean))
    }

    #[must_use]
    pub fn as_bool_opt(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless this is an integer.
    pub fn as_integer(&self) -> Result<&JsonInteger> {
        self.as_integer_opt().ok_or_else(|| self.mismatch(ValueKind::Integer))
    }

    #[must_use]
    pub fn as_integer_opt(&self) -> Option<&JsonInteger> {
        match self {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless this is a float.
    pub fn as_float(&self) -> Result<&JsonFloat> {
        self.as_float_opt().ok_or_else(|| self.mismatch(ValueKind::Float))
    }

    #[must_use]
    pub fn as_float_opt(&self) -> Option<&JsonFloat> {
        match self {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless this is a string.
    pub fn as_string(&self) -> Result<&JsonString> {
        self.as_string_opt().ok_or_else(|| self.mismatch(ValueKind::String))
    }

    #[must_use]
    pub fn as_string_opt(&self) -> Option<&JsonString> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless this is an array.
    pub fn as_array(&self) -> Result<&JsonArray> {
        self.as_array_opt().ok_or_else(|| self.mismatch(ValueKind::Array))
    }

    #[must_use]
    pub fn as_array_opt(&self) -> Option<&JsonArray> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless this is an object.
    pub fn as_object(&self) -> Result<&JsonObject> {
        self.as_object_opt().ok_or_else(|| self.mismatch(ValueKind::Object))
    }

    #[must_use]
    pub fn as_object_opt(&self) -> Option<&JsonObject> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Decodes an integer value.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-integers, [`Error::NumberFormat`] if
    /// the digits are malformed or overflow.
    pub fn as_i64(&self) -> Result<i64> {
        self.as_integer()?.value()
    }

    /// Decodes a float value.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-floats, [`Error::NumberFormat`] if
    /// the text is not a number.
    pub fn as_f64(&self) -> Result<f64> {
        self.as_float()?.value()
    }

    /// Decodes a string value.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] for non-strings, [`Error::StringDecode`] for
    /// bad escapes.
    pub fn as_str(&self) -> Result<&str> {
        self.as_string()?.as_str()
    }

    /// The element at `index` of an array.
    ///
    /// # Errors
    ///
    /// - [`Error::Unsupported`] if this is not an array.
    /// - [`Error::IndexOutOfRange`] if the array is shorter.
    /// - [`Error::Syntax`] if scanning up to `index` hits malformed input.
    pub fn at(&self, index: usize) -> Result<Value> {
        self.array_for("index")?.at(index)
    }

    /// Like [`Value::at`], with `Ok(None)` in place of `IndexOutOfRange`.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] if this is not an array; syntax errors.
    pub fn at_opt(&self, index: usize) -> Result<Option<Value>> {
        self.array_for("index")?.get(index)
    }

    /// The value under `key` of an object.
    ///
    /// # Errors
    ///
    /// - [`Error::Unsupported`] if this is not an object.
    /// - [`Error::KeyNotFound`] if no entry has that key.
    /// - [`Error::Syntax`] if scanning hits malformed input first.
    pub fn get(&self, key: &str) -> Result<Value> {
        self.get_opt(key)?
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))
    }

    /// Like [`Value::get`], with `Ok(None)` in place of `KeyNotFound`.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] if this is not an object; syntax errors.
    pub fn get_opt(&self, key: &str) -> Result<Option<Value>> {
        match self {
            Value::Object(o) => o.get(key),
            other => Err(Error::Unsupported {
                operation: "key lookup",
                kind: other.kind(),
            }),
        }
    }

    /// Number of elements or entries of a container.
    ///
    /// Scans the whole container.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] for scalars; syntax errors.
    pub fn len(&self) -> Result<usize> {
        match self {
            Value::Array(a) => a.len(),
            Value::Object(o) => o.len(),
            other => Err(Error::Unsupported {
                operation: "len",
                kind: other.kind(),
            }),
        }
    }

    /// # Errors
    ///
    /// [`Error::Unsupported`] for scalars; syntax errors.
    pub fn is_empty(&self) -> Result<bool> {
        match self {
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
            other => Err(Error::Unsupported {
                operation: "is_empty",
                kind: other.kind(),
            }),
        }
    }

    /// Whether both values are handles onto the same cached node.
    ///
    /// Identity, as opposed to `==` which compares source positions.
    #[must_use]
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => Arc::ptr_eq(&a.0, &b.0),
            (Value::Float(a), Value::Float(b)) => Arc::ptr_eq(&a.0, &b.0),
            (Value::String(a), Value::String(b)) => Arc::ptr_eq(&a.0, &b.0),
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Source text this value was read from, if it has one.
    #[must_use]
    pub fn raw(&self) -> Option<&Slice> {
        match self {
            Value::Null | Value::Boolean(_) => None,
            Value::Integer(i) => Some(i.raw()),
            Value::Float(f) => Some(f.raw()),
            Value::String(s) => Some(s.raw()),
            Value::Array(a) => Some(a.raw()),
            Value::Object(o) => Some(o.raw()),
        }
    }

    fn array_for(&self, operation: &'static str) -> Result<&JsonArray> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(Error::Unsupported {
                operation,
                kind: other.kind(),
            }),
        }
    }

    fn mismatch(&self, expected: ValueKind) -> Error {
        Error::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }
}

/// Prints the source text of the value: containers with their brackets,
/// strings with their quotes and escapes as written.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{}", i.raw()),
            Value::Float(x) => write!(f, "{}", x.raw()),
            Value::String(s) => write!(f, "\"{}\"", s.raw()),
            Value::Array(a) => write!(f, "[{}]", a.raw()),
            Value::Object(o) => write!(f, "{{{}}}", o.raw()),
        }
    }
}

impl From<JsonArray> for Value {
    fn from(a: JsonArray) -> Self {
        Value::Array(a)
    }
}

impl From<JsonObject> for Value {
    fn from(o: JsonObject) -> Self {
        Value::Object(o)
    }
}

/// A slice plus the memoized outcome of decoding it.
struct Lazy<T, E> {
    raw: Slice,
    decoded: OnceLock<core::result::Result<T, E>>,
}

impl<T, E> Lazy<T, E> {
    fn new(raw: Slice) -> Arc<Self> {
        Arc::new(Self {
            raw,
            decoded: OnceLock::new(),
        })
    }
}

macro_rules! slice_identity {
    ($ty:ident) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.0.raw == other.0.raw
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.raw.hash(state);
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($ty)).field(&self.0.raw.as_str()).finish()
            }
        }
    };
}

/// An integer whose digits are parsed on first access.
#[derive(Clone)]
pub struct JsonInteger(Arc<Lazy<i64, NumberError>>);

impl JsonInteger {
    #[must_use]
    pub fn new(raw: Slice) -> Self {
        Self(Lazy::new(raw))
    }

    /// # Errors
    ///
    /// [`Error::NumberFormat`] for leading zeros, stray characters, or
    /// values outside `i64`. The outcome is cached either way.
    pub fn value(&self) -> Result<i64> {
        self.0
            .decoded
            .get_or_init(|| number::decode_integer(self.0.raw.as_str()))
            .clone()
            .map_err(Error::from)
    }

    #[must_use]
    pub fn raw(&self) -> &Slice {
        &self.0.raw
    }

    /// Whether [`JsonInteger::value`] has run.
    #[must_use]
    pub fn is_decoded(&self) -> bool {
        self.0.decoded.get().is_some()
    }
}

slice_identity!(JsonInteger);

/// A float whose text is parsed on first access.
#[derive(Clone)]
pub struct JsonFloat(Arc<Lazy<f64, NumberError>>);

impl JsonFloat {
    #[must_use]
    pub fn new(raw: Slice) -> Self {
        Self(Lazy::new(raw))
    }

    /// # Errors
    ///
    /// [`Error::NumberFormat`] if the text is not a number. With
    /// [`ParseOptions::strict_floats`](crate::ParseOptions::strict_floats)
    /// the JSON grammar is enforced as well.
    pub fn value(&self) -> Result<f64> {
        self.0
            .decoded
            .get_or_init(|| {
                number::decode_float(self.0.raw.as_str(), self.0.raw.options().strict_floats)
            })
            .clone()
            .map_err(Error::from)
    }

    #[must_use]
    pub fn raw(&self) -> &Slice {
        &self.0.raw
    }

    #[must_use]
    pub fn is_decoded(&self) -> bool {
        self.0.decoded.get().is_some()
    }
}

slice_identity!(JsonFloat);

/// A string whose escapes are resolved on first access.
///
/// Strings without escapes are served straight from the document.
#[derive(Clone)]
pub struct JsonString(Arc<Lazy<Option<Box<str>>, DecodeError>>);

impl JsonString {
    /// Wraps the interior of a string literal, without its quotes.
    #[must_use]
    pub fn new(raw: Slice) -> Self {
        Self(Lazy::new(raw))
    }

    /// # Errors
    ///
    /// [`Error::StringDecode`] for invalid escapes, unpaired surrogates or
    /// raw control characters.
    pub fn as_str(&self) -> Result<&str> {
        let decoded = self
            .0
            .decoded
            .get_or_init(|| string::decode(self.0.raw.as_str()));
        match decoded {
            Ok(None) => Ok(self.0.raw.as_str()),
            Ok(Some(unescaped)) => Ok(&**unescaped),
            Err(e) => Err(e.clone().into()),
        }
    }

    /// Length of the decoded text in bytes.
    ///
    /// # Errors
    ///
    /// As [`JsonString::as_str`].
    pub fn len(&self) -> Result<usize> {
        self.as_str().map(str::len)
    }

    /// # Errors
    ///
    /// As [`JsonString::as_str`].
    pub fn is_empty(&self) -> Result<bool> {
        self.as_str().map(str::is_empty)
    }

    #[must_use]
    pub fn raw(&self) -> &Slice {
        &self.0.raw
    }

    #[must_use]
    pub fn is_decoded(&self) -> bool {
        self.0.decoded.get().is_some()
    }
}

slice_identity!(JsonString);

#[cfg(feature = "serde")]
mod ser {
    use serde::{
        Serialize, Serializer,
        ser::{Error as _, SerializeMap, SerializeSeq},
    };

    use super::{JsonArray, JsonObject, Value};

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Value::Null => serializer.serialize_unit(),
                Value::Boolean(b) => serializer.serialize_bool(*b),
                Value::Integer(i) => serializer.serialize_i64(i.value().map_err(S::Error::custom)?),
                Value::Float(x) => serializer.serialize_f64(x.value().map_err(S::Error::custom)?),
                Value::String(s) => serializer.serialize_str(s.as_str().map_err(S::Error::custom)?),
                Value::Array(a) => a.serialize(serializer),
                Value::Object(o) => o.serialize(serializer),
            }
        }
    }

    impl Serialize for JsonArray {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(None)?;
            for element in self.iter() {
                seq.serialize_element(&element.map_err(S::Error::custom)?)?;
            }
            seq.end()
        }
    }

    impl Serialize for JsonObject {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(None)?;
            for entry in self.iter() {
                let (key, value) = entry.map_err(S::Error::custom)?;
                map.serialize_entry(&*key, &value)?;
            }
            map.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn kinds_and_predicates() {
        let v = parse("[null, true, 1, 1.5, \"s\", [], {}]").unwrap();
        let kinds: Vec<_> = v
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e.unwrap().kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                ValueKind::Null,
                ValueKind::Boolean,
                ValueKind::Integer,
                ValueKind::Float,
                ValueKind::String,
                ValueKind::Array,
                ValueKind::Object
            ]
        );
        assert!(v.at(0).unwrap().is_null());
        assert!(v.at(1).unwrap().is_bool());
        assert!(v.at(2).unwrap().is_number() && v.at(2).unwrap().is_integer());
        assert!(v.at(3).unwrap().is_number() && v.at(3).unwrap().is_float());
        assert!(v.at(4).unwrap().is_string());
        assert!(v.at(5).unwrap().is_array());
        assert!(v.at(6).unwrap().is_object());
    }

    #[test]
    fn narrowing_reports_both_kinds() {
        let v = parse("\"text\"").unwrap();
        assert_eq!(
            v.as_i64(),
            Err(Error::TypeMismatch {
                expected: ValueKind::Integer,
                found: ValueKind::String
            })
        );
        assert_eq!(v.as_bool_opt(), None);
        assert!(v.as_object_opt().is_none());
        assert_eq!(v.as_str(), Ok("text"));
    }

    #[test]
    fn indexing_a_scalar_is_unsupported() {
        let v = parse("42").unwrap();
        assert_eq!(
            v.at(0),
            Err(Error::Unsupported {
                operation: "index",
                kind: ValueKind::Integer
            })
        );
        assert_eq!(
            v.get("k"),
            Err(Error::Unsupported {
                operation: "key lookup",
                kind: ValueKind::Integer
            })
        );
        assert!(v.len().is_err());
    }

    #[test]
    fn scalar_decoding_is_cached() {
        let v = parse("[12, 1.5, \"a\\nb\"]").unwrap();
        let i = v.at(0).unwrap();
        assert!(!i.as_integer().unwrap().is_decoded());
        assert_eq!(i.as_i64(), Ok(12));
        // Every handle to the element shares the cache.
        assert!(v.at(0).unwrap().as_integer().unwrap().is_decoded());

        let s = v.at(2).unwrap();
        let first = s.as_str().unwrap().as_ptr();
        assert_eq!(s.as_str().unwrap().as_ptr(), first);
        assert_eq!(s.as_str().unwrap(), "a\nb");
    }

    #[test]
    fn unescaped_strings_borrow_the_document() {
        let v = parse("[\"plain\"]").unwrap();
        let s = v.at(0).unwrap();
        let raw = s.raw().unwrap().as_str().as_ptr();
        assert_eq!(s.as_str().unwrap().as_ptr(), raw);
    }

    #[test]
    fn malformed_scalars_fail_on_access_only() {
        let v = parse("[01, 1.5.5, \"\\x\"]").unwrap();
        assert_eq!(v.len(), Ok(3));
        assert!(matches!(v.at(0).unwrap().as_i64(), Err(Error::NumberFormat(_))));
        assert!(matches!(v.at(1).unwrap().as_f64(), Err(Error::NumberFormat(_))));
        assert!(matches!(v.at(2).unwrap().as_str(), Err(Error::StringDecode(_))));
        // Failures are cached and repeat.
        assert_eq!(v.at(0).unwrap().as_i64(), v.at(0).unwrap().as_i64());
    }

    #[test]
    fn display_reproduces_source() {
        let text = r#"{"a": [1, 2.0, "x\ty"], "b": {"c": null}}"#;
        let v = parse(text).unwrap();
        assert_eq!(v.to_string(), text);
        assert_eq!(v.get("a").unwrap().to_string(), r#"[1, 2.0, "x\ty"]"#);
        assert_eq!(v.get("a").unwrap().at(2).unwrap().to_string(), r#""x\ty""#);
        assert_eq!(v.get("b").unwrap().get("c").unwrap().to_string(), "null");
    }

    #[test]
    fn equality_is_by_source_position() {
        let a = parse("[1, 1]").unwrap();
        let b = parse("[1, 1]").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.at(0).unwrap(), b.at(0).unwrap());
        // Same text, different position.
        assert_ne!(a.at(0).unwrap(), a.at(1).unwrap());
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
    }
}
