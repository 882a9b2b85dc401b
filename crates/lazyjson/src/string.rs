//! Unescaping of JSON string contents.

use crate::{
    chars::{char_at, is_control},
    error::DecodeError,
    escape_buffer::{UnicodeEscapeBuffer, parse_hex4},
};

/// Decodes the interior of a JSON string literal (without the quotes).
///
/// Returns `Ok(None)` when `raw` contains neither escapes nor anything that
/// must be rejected, in which case the decoded text *is* `raw` and no copy is
/// made.
pub(crate) fn decode(raw: &str) -> Result<Option<Box<str>>, DecodeError> {
    let bytes = raw.as_bytes();
    let Some(first) = bytes.iter().position(|&b| b == b'\\' || is_control(b)) else {
        return Ok(None);
    };

    let mut out = String::with_capacity(raw.len());
    let mut escapes = UnicodeEscapeBuffer::new();
    let mut run_start = 0;
    let mut cursor = first;

    while cursor < bytes.len() {
        let b = bytes[cursor];
        if is_control(b) {
            return Err(DecodeError::ControlCharacter(b));
        }
        if b != b'\\' {
            cursor += 1;
            continue;
        }

        out.push_str(&raw[run_start..cursor]);
        let Some(&escape) = bytes.get(cursor + 1) else {
            return Err(DecodeError::DanglingBackslash);
        };
        if escape != b'u' {
            escapes.finish()?;
        }
        cursor += 2;

        match escape {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{0008}'),
            b'f' => out.push('\u{000C}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let digits = bytes
                    .get(cursor..cursor + 4)
                    .ok_or(DecodeError::TruncatedUnicodeEscape(cursor - 2))?;
                if let Some(ch) = escapes.feed(parse_hex4(digits)?)? {
                    out.push(ch);
                }
                cursor += 4;
            }
            _ => {
                return Err(DecodeError::InvalidEscape(char_at(bytes, cursor - 1)));
            }
        }

        run_start = cursor;
        // A pending high surrogate must be followed directly by `\u`.
        if escapes.is_pending() && bytes.get(cursor) != Some(&b'\\') {
            escapes.finish()?;
        }
    }

    escapes.finish()?;
    out.push_str(&raw[run_start..]);
    Ok(Some(out.into_boxed_str()))
}

/// Like [`decode`], but always returns an owned string.
pub(crate) fn decode_owned(raw: &str) -> Result<String, DecodeError> {
    Ok(match decode(raw)? {
        Some(decoded) => decoded.into_string(),
        None => raw.to_owned(),
    })
}
