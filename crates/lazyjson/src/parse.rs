//! Entry points: turning a text buffer into a root [`Value`].

use crate::{
    array::JsonArray,
    chars::{char_at, is_json_whitespace, skip_whitespace},
    error::{Result, SyntaxError, SyntaxErrorKind},
    object::JsonObject,
    options::ParseOptions,
    scanner::scan_value,
    slice::Slice,
    value::Value,
};

/// Parses `text` with default [`ParseOptions`].
///
/// Only the outermost value is identified. A root container is checked for
/// its closing bracket and returned unscanned; everything inside is examined
/// when it is first read.
///
/// ```rust
/// use lazyjson::parse;
///
/// let root = parse(" [1, 2, 3] ").unwrap();
/// assert_eq!(root.len().unwrap(), 3);
///
/// assert!(parse("").is_err());
/// assert!(parse("[1, 2").is_err());
/// assert!(parse("1 2").is_err());
/// ```
///
/// # Errors
///
/// [`Error::Syntax`](crate::Error::Syntax) when the input is empty, starts
/// with something that is not a JSON value, is followed by anything but
/// whitespace, or is a container without its closing bracket.
pub fn parse(text: impl Into<Box<str>>) -> Result<Value> {
    parse_with(text, ParseOptions::default())
}

/// Parses `text`; `options` apply to every value read from it.
///
/// # Errors
///
/// As [`parse`].
pub fn parse_with(text: impl Into<Box<str>>, options: ParseOptions) -> Result<Value> {
    let root = Slice::with_options(text, options);
    let bytes = root.as_bytes();
    let start = skip_whitespace(bytes, 0);
    let Some(&first) = bytes.get(start) else {
        return Err(SyntaxError::new(SyntaxErrorKind::UnexpectedEndOfInput, start).into());
    };

    if matches!(first, b'[' | b'{') {
        let (close, what) = if first == b'[' {
            (b']', "array")
        } else {
            (b'}', "object")
        };
        let last = bytes
            .iter()
            .rposition(|&b| !is_json_whitespace(b))
            .unwrap_or(start);
        if last > start && bytes[last] == close {
            let body = root.sub(start + 1, last);
            return Ok(if first == b'[' {
                Value::Array(JsonArray::new(body))
            } else {
                Value::Object(JsonObject::new(body))
            });
        }
        let (kind, at) = if let Some(pos) = bytes[start + 1..].iter().rposition(|&b| b == close) {
            let trailing = skip_whitespace(bytes, start + pos + 2);
            (
                SyntaxErrorKind::TrailingCharacters(char_at(bytes, trailing)),
                trailing,
            )
        } else if last > start && matches!(bytes[last], b']' | b'}') {
            let kind = SyntaxErrorKind::MismatchedBracket {
                open: char::from(first),
                close: char::from(bytes[last]),
            };
            (kind, last)
        } else {
            (SyntaxErrorKind::UnterminatedContainer(what), start)
        };
        return Err(SyntaxError::new(kind, at).into());
    }

    let (value, end) = scan_value(&root, start).map_err(|(kind, at)| SyntaxError::new(kind, at))?;
    let rest = skip_whitespace(bytes, end);
    if rest < bytes.len() {
        return Err(SyntaxError::new(
            SyntaxErrorKind::TrailingCharacters(char_at(bytes, rest)),
            rest,
        )
        .into());
    }
    Ok(value)
}
