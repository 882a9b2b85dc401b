//! Matching of the `true`, `false` and `null` keywords.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpectedLiteral {
    Null,
    True,
    False,
}

impl ExpectedLiteral {
    /// The keyword announced by its first byte, if any.
    pub fn from_first(first: u8) -> Option<Self> {
        match first {
            b'n' => Some(Self::Null),
            b't' => Some(Self::True),
            b'f' => Some(Self::False),
            _ => None,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::True => "true",
            Self::False => "false",
        }
    }

    /// Whether `bytes` continues with the whole keyword; returns its length.
    pub fn match_at(self, bytes: &[u8]) -> Option<usize> {
        let text = self.text().as_bytes();
        bytes.starts_with(text).then_some(text.len())
    }
}
