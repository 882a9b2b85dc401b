//! Incremental container scanner.
//!
//! A [`Scanner`] owns the body of one array or object (the text between its
//! brackets) and a cursor into it. Each call scans forward from where the
//! previous call stopped and produces exactly one element (arrays) or one
//! key/value entry (objects). Nested containers are only delimited, by
//! counting bracket depth, and handed out as new lazy values whose own bodies
//! stay unscanned until someone looks inside.
//!
//! State machine
//! - `Initial`: an element or the end of the body may follow.
//! - `AfterSeparator`: only an element may follow (no trailing commas).
//! - `ElementFinished`: a `,` or the end of the body may follow.
//! - `InContainer`: in the middle of an object entry; neither.
//! - `Closed`: terminal, every further call reports "no more elements".
//!
//! A syntax error poisons the scanner: the error is remembered and returned
//! by every later call, the cursor never moves again.

use std::sync::Arc;

use log::{debug, trace, warn};

use crate::{
    array::JsonArray,
    chars::{char_at, ends_number, marks_float, skip_whitespace},
    error::{SyntaxError, SyntaxErrorKind},
    literal_buffer::ExpectedLiteral,
    object::JsonObject,
    slice::Slice,
    string,
    value::{JsonFloat, JsonInteger, JsonString, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    Initial,
    InContainer,
    AfterSeparator,
    ElementFinished,
    Closed,
}

impl ScanState {
    /// An element (or key) may start here without a preceding comma.
    pub fn ready_for_next_entry(self) -> bool {
        matches!(self, Self::Initial | Self::AfterSeparator)
    }

    /// The body may legally end here.
    pub fn ready_to_close(self) -> bool {
        matches!(self, Self::Initial | Self::ElementFinished)
    }
}

#[derive(Debug)]
pub(crate) struct Scanner {
    body: Slice,
    cursor: usize,
    state: ScanState,
    poisoned: Option<SyntaxError>,
}

/// Position-relative failure; converted to an absolute [`SyntaxError`] by
/// whoever knows the body's offset.
type ScanFailure = (SyntaxErrorKind, usize);

impl Scanner {
    pub fn new(body: Slice) -> Self {
        Self {
            body,
            cursor: 0,
            state: ScanState::Initial,
            poisoned: None,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state == ScanState::Closed
    }

    /// Scans the next array element.
    pub fn next_element(&mut self) -> Result<Option<Value>, SyntaxError> {
        self.guarded(|s| {
            if !s.skip_to_next_entry()? {
                return Ok(None);
            }
            s.parse_value()
        })
    }

    /// Scans the next object entry, decoding its key.
    pub fn next_entry(&mut self) -> Result<Option<(Arc<str>, Value)>, SyntaxError> {
        self.guarded(Self::parse_entry)
    }

    fn guarded<T>(
        &mut self,
        step: impl FnOnce(&mut Self) -> Result<T, SyntaxError>,
    ) -> Result<T, SyntaxError> {
        if let Some(err) = &self.poisoned {
            return Err(err.clone());
        }
        match step(self) {
            Ok(v) => Ok(v),
            Err(err) => {
                warn!(
                    "container at offset {} poisoned: {err}",
                    self.body.offset()
                );
                self.poisoned = Some(err.clone());
                Err(err)
            }
        }
    }

    fn skip_to_next_entry(&mut self) -> Result<bool, SyntaxError> {
        if self.state.ready_for_next_entry() {
            return Ok(true);
        }
        if self.state == ScanState::Closed {
            return Ok(false);
        }

        let bytes = self.body.as_bytes();
        let cursor = skip_whitespace(bytes, self.cursor);
        match bytes.get(cursor) {
            None => {
                self.cursor = cursor;
                self.close();
                Ok(false)
            }
            Some(b',') => {
                self.cursor = cursor + 1;
                self.state = ScanState::AfterSeparator;
                Ok(true)
            }
            Some(_) => Err(self.error(SyntaxErrorKind::ExpectedComma(char_at(bytes, cursor)), cursor)),
        }
    }

    fn parse_value(&mut self) -> Result<Option<Value>, SyntaxError> {
        let start = skip_whitespace(self.body.as_bytes(), self.cursor);
        if start == self.body.len() {
            self.cursor = start;
            if self.state.ready_to_close() {
                self.close();
                return Ok(None);
            }
            let kind = if self.state == ScanState::AfterSeparator {
                SyntaxErrorKind::TrailingComma
            } else {
                SyntaxErrorKind::MissingValue
            };
            return Err(self.error(kind, start));
        }

        let (value, end) = scan_value(&self.body, start).map_err(|(kind, at)| self.error(kind, at))?;
        trace!(
            "scanned {} at offset {}",
            value.kind(),
            self.body.offset() + start
        );
        self.cursor = end;
        self.state = ScanState::ElementFinished;
        Ok(Some(value))
    }

    fn parse_entry(&mut self) -> Result<Option<(Arc<str>, Value)>, SyntaxError> {
        if !self.skip_to_next_entry()? {
            return Ok(None);
        }

        let bytes = self.body.as_bytes();
        let start = skip_whitespace(bytes, self.cursor);
        match bytes.get(start) {
            Some(b'"') => {}
            Some(_) => {
                return Err(self.error(SyntaxErrorKind::ExpectedKey(char_at(bytes, start)), start));
            }
            None if self.state.ready_to_close() => {
                self.cursor = start;
                self.close();
                return Ok(None);
            }
            None => return Err(self.error(SyntaxErrorKind::TrailingComma, start)),
        }
        self.state = ScanState::InContainer;

        let key_end = find_string_end(bytes, start + 1)
            .ok_or_else(|| self.error(SyntaxErrorKind::UnterminatedString, start))?;
        let key = string::decode_owned(&self.body.as_str()[start + 1..key_end])
            .map_err(|e| self.error(SyntaxErrorKind::InvalidKey(e), start + 1))?;

        let colon = skip_whitespace(bytes, key_end + 1);
        match bytes.get(colon) {
            Some(b':') => {}
            Some(_) => {
                return Err(self.error(SyntaxErrorKind::ExpectedColon(char_at(bytes, colon)), colon));
            }
            None => return Err(self.error(SyntaxErrorKind::UnexpectedEndOfInput, colon)),
        }
        self.cursor = colon + 1;

        let value = self
            .parse_value()?
            .ok_or_else(|| self.error(SyntaxErrorKind::MissingValue, self.cursor))?;
        Ok(Some((Arc::from(key), value)))
    }

    fn close(&mut self) {
        self.state = ScanState::Closed;
        debug!(
            "container at offset {} fully scanned ({} bytes)",
            self.body.offset(),
            self.body.len()
        );
    }

    fn error(&self, kind: SyntaxErrorKind, at: usize) -> SyntaxError {
        SyntaxError::new(kind, self.body.offset() + at)
    }
}

/// Delimits and classifies the value starting at `body[start]`, which must
/// not be whitespace. Returns the value and the offset just past it.
pub(crate) fn scan_value(body: &Slice, start: usize) -> Result<(Value, usize), ScanFailure> {
    let bytes = body.as_bytes();
    let first = bytes[start];
    match first {
        b'-' | b'0'..=b'9' => {
            let mut end = start + 1;
            let mut is_float = false;
            while end < bytes.len() && !ends_number(bytes[end]) {
                if matches!(bytes[end], b']' | b'}') {
                    let stray = char::from(bytes[end]);
                    return Err((SyntaxErrorKind::UnexpectedCharacter(stray), end));
                }
                is_float |= marks_float(bytes[end]);
                end += 1;
            }
            let raw = body.sub(start, end);
            let value = if is_float {
                Value::Float(JsonFloat::new(raw))
            } else {
                Value::Integer(JsonInteger::new(raw))
            };
            Ok((value, end))
        }
        b't' | b'f' | b'n' => {
            let literal = ExpectedLiteral::from_first(first)
                .ok_or((SyntaxErrorKind::UnexpectedCharacter(char::from(first)), start))?;
            let len = literal
                .match_at(&bytes[start..])
                .ok_or((SyntaxErrorKind::InvalidLiteral(literal.text()), start))?;
            let value = match literal {
                ExpectedLiteral::Null => Value::Null,
                ExpectedLiteral::True => Value::Boolean(true),
                ExpectedLiteral::False => Value::Boolean(false),
            };
            Ok((value, start + len))
        }
        b'"' => {
            let close = find_string_end(bytes, start + 1)
                .ok_or((SyntaxErrorKind::UnterminatedString, start))?;
            let raw = body.sub(start + 1, close);
            Ok((Value::String(JsonString::new(raw)), close + 1))
        }
        b'[' | b'{' => {
            let close = find_container_end(bytes, start)?;
            let raw = body.sub(start + 1, close);
            let value = if first == b'[' {
                Value::Array(JsonArray::new(raw))
            } else {
                Value::Object(JsonObject::new(raw))
            };
            Ok((value, close + 1))
        }
        _ => Err((SyntaxErrorKind::UnexpectedCharacter(char_at(bytes, start)), start)),
    }
}

/// Offset of the `"` closing a string whose contents start at `from`.
///
/// Every backslash skips the byte after it, whatever it is; escapes are
/// validated when the string is decoded.
pub(crate) fn find_string_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => return Some(i),
            b'\\' => i += 2,
            _ => i += 1,
        }
    }
    None
}

/// Offset of the bracket closing the container opened at `open_at`.
fn find_container_end(bytes: &[u8], open_at: usize) -> Result<usize, ScanFailure> {
    let open = bytes[open_at];
    let mut depth = 1usize;
    let mut i = open_at + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'[' | b'{' => depth += 1,
            close @ (b']' | b'}') => {
                depth -= 1;
                if depth == 0 {
                    let expected = if open == b'[' { b']' } else { b'}' };
                    if close != expected {
                        return Err((
                            SyntaxErrorKind::MismatchedBracket {
                                open: char::from(open),
                                close: char::from(close),
                            },
                            i,
                        ));
                    }
                    return Ok(i);
                }
            }
            b'"' => {
                i = find_string_end(bytes, i + 1).ok_or((SyntaxErrorKind::UnterminatedString, i))?;
            }
            _ => {}
        }
        i += 1;
    }
    let what = if open == b'[' { "array" } else { "object" };
    Err((SyntaxErrorKind::UnterminatedContainer(what), open_at))
}
