//! Decoding of `\uXXXX` escapes.
//!
//! JSON encodes characters outside the Basic Multilingual Plane as a UTF-16
//! surrogate pair, e.g. `\uD83D\uDE00`. [`UnicodeEscapeBuffer`] turns four hex
//! digits into one UTF-16 code unit and holds on to a high surrogate until
//! its low half arrives.
//!
//! # Errors
//!
//! - A non-hexadecimal digit is rejected.
//! - A high surrogate not followed by a low surrogate, or a low surrogate on
//!   its own, is rejected: neither can be represented in a Rust `String`.

use crate::error::DecodeError;

/// Parses exactly four ASCII hex digits into a UTF-16 code unit.
pub(crate) fn parse_hex4(digits: &[u8]) -> Result<u16, DecodeError> {
    debug_assert_eq!(digits.len(), 4);
    let mut unit: u16 = 0;
    for &d in digits {
        let nibble = match d {
            b'0'..=b'9' => d - b'0',
            b'a'..=b'f' => d - b'a' + 10,
            b'A'..=b'F' => d - b'A' + 10,
            _ => return Err(DecodeError::InvalidUnicodeEscapeChar(char::from(d))),
        };
        unit = (unit << 4) | u16::from(nibble);
    }
    Ok(unit)
}

#[derive(Debug, Default)]
/// Pairs UTF-16 code units decoded from consecutive `\u` escapes.
pub(crate) struct UnicodeEscapeBuffer {
    high: Option<u16>,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self { high: None }
    }

    /// Whether a high surrogate is waiting for its low half.
    pub fn is_pending(&self) -> bool {
        self.high.is_some()
    }

    /// Feeds one code unit.
    ///
    /// - Returns `Ok(None)` after a high surrogate.
    /// - Returns `Ok(Some(ch))` for a BMP character or a completed pair.
    /// - Returns `Err` for a lone low surrogate or a high surrogate followed
    ///   by anything but a low surrogate.
    pub fn feed(&mut self, unit: u16) -> Result<Option<char>, DecodeError> {
        match (self.high.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high = Some(unit);
                Ok(None)
            }
            (None, 0xDC00..=0xDFFF) => Err(DecodeError::UnpairedSurrogate(unit)),
            (None, _) => Ok(char::from_u32(u32::from(unit))),
            (Some(high), 0xDC00..=0xDFFF) => {
                let code =
                    0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                Ok(char::from_u32(code))
            }
            (Some(high), _) => Err(DecodeError::UnpairedSurrogate(high)),
        }
    }

    /// Call when something other than a `\u` escape follows; fails if a high
    /// surrogate is still waiting.
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        match self.high.take() {
            Some(high) => Err(DecodeError::UnpairedSurrogate(high)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_decoding() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed(parse_hex4(b"0041").unwrap()), Ok(Some('A')));
        assert!(!buf.is_pending());
    }

    #[test]
    fn mixed_case_hex() {
        assert_eq!(parse_hex4(b"AbCd"), Ok(0xABCD));
        assert_eq!(parse_hex4(b"000c"), Ok(0x000C));
    }

    #[test]
    fn invalid_hex_error() {
        assert_eq!(
            parse_hex4(b"00G0"),
            Err(DecodeError::InvalidUnicodeEscapeChar('G'))
        );
    }

    #[test]
    fn surrogate_pair_combines() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed(0xD83D), Ok(None));
        assert!(buf.is_pending());
        assert_eq!(buf.feed(0xDE00), Ok(Some('😀')));
        assert_eq!(buf.finish(), Ok(()));
    }

    #[test]
    fn unpaired_surrogates_are_rejected() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed(0xDC00), Err(DecodeError::UnpairedSurrogate(0xDC00)));

        let mut buf = UnicodeEscapeBuffer::new();
        buf.feed(0xD800).unwrap();
        assert_eq!(buf.feed(0x0041), Err(DecodeError::UnpairedSurrogate(0xD800)));

        let mut buf = UnicodeEscapeBuffer::new();
        buf.feed(0xD800).unwrap();
        assert_eq!(buf.finish(), Err(DecodeError::UnpairedSurrogate(0xD800)));
    }
}
