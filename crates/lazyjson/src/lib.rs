//! A lazy, on-demand JSON parser.
//!
//! [`parse`] only identifies the outermost value of a document. Containers
//! are scanned element by element as they are read, scalars are decoded the
//! first time they are asked for, and every result is cached. Values point
//! into one shared copy of the input, so reading a handful of fields from a
//! large document costs roughly the bytes in front of those fields.
//!
//! ```rust
//! use lazyjson::parse;
//!
//! let doc = parse(r#"{"id": 7, "payload": [1, 2, 3], "tail": [nonsense]}"#).unwrap();
//! assert_eq!(doc.get("id").unwrap().as_i64().unwrap(), 7);
//!
//! // `tail` was delimited but never looked into.
//! assert!(doc.get("tail").is_ok());
//! assert!(doc.materialize().is_err());
//! ```
//!
//! Errors surface where the malformed text is read: structural problems
//! when a container is scanned past them, number and string problems when
//! the scalar is decoded. A container that hit a syntax error keeps
//! returning it.

#![allow(missing_docs)]

mod array;
mod chars;
mod error;
mod escape_buffer;
mod literal_buffer;
mod materialize;
mod number;
mod object;
mod options;
mod parse;
mod scanner;
mod slice;
mod string;
mod value;

#[cfg(test)]
mod tests;

pub use array::{ArrayIter, JsonArray};
pub use error::{DecodeError, Error, NumberError, Result, SliceError, SyntaxError, SyntaxErrorKind};
pub use object::{JsonObject, ObjectIter};
pub use options::{MaterializeOptions, ParseOptions};
pub use parse::{parse, parse_with};
pub use slice::Slice;
pub use value::{JsonFloat, JsonInteger, JsonString, Value, ValueKind};
