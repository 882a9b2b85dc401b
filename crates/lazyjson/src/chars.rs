//! Byte classification shared by the scanner and the scalar decoders.
//!
//! Every structural character in JSON is ASCII, so the scanner works on raw
//! UTF-8 bytes: continuation bytes of multi-byte sequences never collide with
//! any of the delimiters tested here.

/// The four whitespace characters defined by RFC 8259: space, line feed,
/// carriage return and horizontal tab.
#[inline]
#[must_use]
pub(crate) const fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\r' | b'\t')
}

/// Characters below U+0020 must be escaped inside JSON strings.
#[inline]
#[must_use]
pub(crate) const fn is_control(b: u8) -> bool {
    b < 0x20
}

/// Characters that terminate a number run inside a container body.
#[inline]
#[must_use]
pub(crate) const fn ends_number(b: u8) -> bool {
    is_json_whitespace(b) || b == b','
}

/// Marks a number run as a float rather than an integer.
#[inline]
#[must_use]
pub(crate) const fn marks_float(b: u8) -> bool {
    matches!(b, b'.' | b'e' | b'E')
}

/// Index of the first non-whitespace byte at or after `from`.
#[inline]
pub(crate) fn skip_whitespace(bytes: &[u8], from: usize) -> usize {
    let mut cursor = from;
    while cursor < bytes.len() && is_json_whitespace(bytes[cursor]) {
        cursor += 1;
    }
    cursor
}

/// Renders a byte for error messages without splitting a UTF-8 sequence.
pub(crate) fn char_at(bytes: &[u8], at: usize) -> char {
    let end = bytes.len().min(at + 4);
    let tail = &bytes[at..end];
    let valid = match core::str::from_utf8(tail) {
        Ok(s) => s,
        Err(e) => core::str::from_utf8(&tail[..e.valid_up_to()]).unwrap_or_default(),
    };
    valid.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER)
}
