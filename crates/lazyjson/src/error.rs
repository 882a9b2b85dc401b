use thiserror::Error;

use crate::value::ValueKind;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Every failure the lazy parser can report.
///
/// Structural failures surface while a container is scanned; number and
/// string failures surface the first time a scalar is decoded. Access
/// failures (`IndexOutOfRange`, `KeyNotFound`) are never conflated with
/// syntax errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("number format error: {0}")]
    NumberFormat(#[from] NumberError),
    #[error("string decode error: {0}")]
    StringDecode(#[from] DecodeError),
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("key {0:?} not found")]
    KeyNotFound(String),
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("{operation} is not supported on {kind}")]
    Unsupported {
        operation: &'static str,
        kind: ValueKind,
    },
    #[error("nesting depth exceeds the limit of {0}")]
    DepthLimitExceeded(usize),
}

/// A grammar violation found while delimiting values.
///
/// `offset` is the absolute byte offset into the parsed document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub offset: usize,
}

impl SyntaxError {
    pub(crate) fn new(kind: SyntaxErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    #[error("expected ',' but found '{0}'")]
    ExpectedComma(char),
    #[error("expected ':' but found '{0}'")]
    ExpectedColon(char),
    #[error("expected '\"' to start an object key but found '{0}'")]
    ExpectedKey(char),
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("invalid literal, expected `{0}`")]
    InvalidLiteral(&'static str),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated {0}")]
    UnterminatedContainer(&'static str),
    #[error("'{open}' closed by '{close}'")]
    MismatchedBracket { open: char, close: char },
    #[error("expected a value after ','")]
    TrailingComma,
    #[error("missing value for object key")]
    MissingValue,
    #[error("unexpected trailing character '{0}'")]
    TrailingCharacters(char),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("invalid escape in object key: {0}")]
    InvalidKey(DecodeError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NumberError {
    #[error("empty number")]
    Empty,
    #[error("lone '-' sign")]
    LoneMinus,
    #[error("leading zero in {0:?}")]
    LeadingZero(String),
    #[error("invalid digit '{found}' in {text:?}")]
    InvalidDigit { found: char, text: String },
    #[error("{0:?} does not fit in a 64-bit signed integer")]
    Overflow(String),
    #[error("{0:?} is not a valid JSON number")]
    InvalidFloat(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    #[error("truncated \\u escape at offset {0}")]
    TruncatedUnicodeEscape(usize),
    #[error("invalid hex digit '{0}' in \\u escape")]
    InvalidUnicodeEscapeChar(char),
    #[error("unpaired surrogate \\u{0:04X}")]
    UnpairedSurrogate(u16),
    #[error("unescaped control character U+{0:04X}")]
    ControlCharacter(u8),
    #[error("dangling backslash at end of string")]
    DanglingBackslash,
}

/// Out-of-range access on a [`Slice`](crate::Slice).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("range {start}..{end} out of bounds for slice of length {len}")]
pub struct SliceError {
    pub start: usize,
    pub end: usize,
    pub len: usize,
}

impl From<SliceError> for Error {
    fn from(e: SliceError) -> Self {
        Error::IndexOutOfRange {
            index: e.end.max(e.start),
            len: e.len,
        }
    }
}
