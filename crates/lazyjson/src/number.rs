//! Deferred number decoding.
//!
//! The scanner only decides *integer or float* by shape (presence of `.`,
//! `e` or `E`); the grammar is checked here, the first time a value is read.

use crate::{chars::char_at, error::NumberError};

/// Decodes `-?(0|[1-9][0-9]*)` into an `i64`.
///
/// Accumulation is done with checked arithmetic towards the sign of the
/// result, so both `i64::MIN` and `i64::MAX` decode and nothing ever wraps.
pub(crate) fn decode_integer(text: &str) -> Result<i64, NumberError> {
    let bytes = text.as_bytes();
    let (negative, digits) = match bytes.split_first() {
        None => return Err(NumberError::Empty),
        Some((b'-', [])) => return Err(NumberError::LoneMinus),
        Some((b'-', rest)) => (true, rest),
        Some(_) => (false, bytes),
    };

    if digits[0] == b'0' {
        if digits.len() > 1 {
            return Err(if digits[1].is_ascii_digit() {
                NumberError::LeadingZero(text.to_owned())
            } else {
                invalid_digit(text, digits[1])
            });
        }
        return Ok(0);
    }

    let mut value: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(invalid_digit(text, b));
        }
        let digit = i64::from(b - b'0');
        value = value
            .checked_mul(10)
            .and_then(|v| {
                if negative {
                    v.checked_sub(digit)
                } else {
                    v.checked_add(digit)
                }
            })
            .ok_or_else(|| NumberError::Overflow(text.to_owned()))?;
    }

    Ok(value)
}

/// Decodes a float slice.
///
/// With `strict` set, the text must match the JSON number grammar before it
/// reaches the standard `f64` parser; otherwise anything `f64::from_str`
/// accepts is returned, except the non-finite spellings (`inf`, `NaN`) which
/// JSON cannot express.
pub(crate) fn decode_float(text: &str, strict: bool) -> Result<f64, NumberError> {
    if strict && !is_json_number(text.as_bytes()) {
        return Err(NumberError::InvalidFloat(text.to_owned()));
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() || looks_numeric(text) => Ok(v),
        _ => Err(NumberError::InvalidFloat(text.to_owned())),
    }
}

/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`
pub(crate) fn is_json_number(bytes: &[u8]) -> bool {
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i += count_digits(&bytes[i..]),
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let frac = count_digits(&bytes[i..]);
        if frac == 0 {
            return false;
        }
        i += frac;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp = count_digits(&bytes[i..]);
        if exp == 0 {
            return false;
        }
        i += exp;
    }
    i == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// Overflowing exponents such as `1e999` parse to infinity; those are still
// numbers in the source text, unlike `inf`.
fn looks_numeric(text: &str) -> bool {
    text.bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E'))
}

fn invalid_digit(text: &str, b: u8) -> NumberError {
    let at = text.bytes().position(|x| x == b).unwrap_or(0);
    NumberError::InvalidDigit {
        found: char_at(text.as_bytes(), at),
        text: text.to_owned(),
    }
}
