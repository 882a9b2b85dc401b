//! Zero-copy views into a parsed document.
//!
//! A [`Slice`] is a `(start, end)` window over a shared, immutable
//! [`Document`]. Every value produced by the parser holds one; sub-slicing
//! only adjusts the bounds and bumps the document's reference count.

use core::{
    fmt,
    hash::{Hash, Hasher},
};
use std::sync::Arc;

use crate::{ParseOptions, error::SliceError};

/// The backing buffer of a parse plus the options it was parsed with.
///
/// Owned once for the lifetime of every value that points into it and never
/// mutated after construction.
#[derive(Debug)]
pub(crate) struct Document {
    text: Box<str>,
    options: ParseOptions,
}

impl Document {
    pub(crate) fn new(text: impl Into<Box<str>>, options: ParseOptions) -> Arc<Self> {
        Arc::new(Self {
            text: text.into(),
            options,
        })
    }
}

/// An immutable view of `document[start..end]`.
///
/// Two slices are equal when they view the same text (the same buffer, or
/// buffers with identical content) through the same bounds.
#[derive(Clone)]
pub struct Slice {
    document: Arc<Document>,
    start: usize,
    end: usize,
}

impl Slice {
    /// Creates a slice covering all of `text`, parsed with default options.
    ///
    /// ```rust
    /// use lazyjson::Slice;
    ///
    /// let s = Slice::new("hello");
    /// assert_eq!(s.len(), 5);
    /// assert_eq!(s.slice(1, 3).unwrap().as_str(), "el");
    /// ```
    #[must_use]
    pub fn new(text: impl Into<Box<str>>) -> Self {
        Self::with_options(text, ParseOptions::default())
    }

    /// Creates a slice covering all of `text`, decoded according to
    /// `options`.
    #[must_use]
    pub fn with_options(text: impl Into<Box<str>>, options: ParseOptions) -> Self {
        Self::whole(Document::new(text, options))
    }

    pub(crate) fn whole(document: Arc<Document>) -> Self {
        let end = document.text.len();
        Self {
            document,
            start: 0,
            end,
        }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The byte at `index`, relative to the start of this slice.
    ///
    /// # Errors
    ///
    /// [`SliceError`] if `index >= self.len()`.
    pub fn get(&self, index: usize) -> Result<u8, SliceError> {
        self.as_bytes().get(index).copied().ok_or_else(|| SliceError {
            start: index,
            end: index.saturating_add(1),
            len: self.len(),
        })
    }

    /// A new view of `self[start..end]` sharing the same document.
    ///
    /// # Errors
    ///
    /// [`SliceError`] if `start > end`, `end > self.len()`, or either bound
    /// splits a UTF-8 character.
    pub fn slice(&self, start: usize, end: usize) -> Result<Slice, SliceError> {
        self.check(start, end)?;
        Ok(self.sub(start, end))
    }

    /// Copies `self[start..end]` into an owned string.
    ///
    /// # Errors
    ///
    /// [`SliceError`] if the range is out of bounds or does not fall on
    /// UTF-8 character boundaries.
    pub fn substring(&self, start: usize, end: usize) -> Result<String, SliceError> {
        self.check(start, end)?;
        Ok(self.as_str()[start..end].to_owned())
    }

    /// The viewed text, without copying.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Bounds always sit on character boundaries, see `check`.
        self.document.text.get(self.start..self.end).unwrap_or_default()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.document.text.as_bytes()[self.start..self.end]
    }

    /// Absolute offset of this slice within the whole document.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.start
    }

    /// Whether both slices point into the same document allocation.
    #[must_use]
    pub fn same_document(&self, other: &Slice) -> bool {
        Arc::ptr_eq(&self.document, &other.document)
    }

    pub(crate) fn options(&self) -> &ParseOptions {
        &self.document.options
    }

    /// Unchecked sub-slice; callers guarantee `start <= end <= len`.
    pub(crate) fn sub(&self, start: usize, end: usize) -> Slice {
        debug_assert!(start <= end && end <= self.len());
        Slice {
            document: Arc::clone(&self.document),
            start: self.start + start,
            end: self.start + end,
        }
    }

    fn check(&self, start: usize, end: usize) -> Result<(), SliceError> {
        let text = self.as_str();
        if start > end
            || end > self.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            return Err(SliceError {
                start,
                end,
                len: self.len(),
            });
        }
        Ok(())
    }
}

impl PartialEq for Slice {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && (Arc::ptr_eq(&self.document, &other.document)
                || self.document.text == other.document.text)
    }
}

impl Eq for Slice {}

impl Hash for Slice {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Consistent with `eq`: equal slices share bounds and document length.
        self.start.hash(state);
        self.end.hash(state);
        self.document.text.len().hash(state);
    }
}

impl fmt::Debug for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slice({}..{}, {:?})", self.start, self.end, self.as_str())
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Slice {
    fn from(text: &str) -> Self {
        Slice::new(text)
    }
}

impl From<String> for Slice {
    fn from(text: String) -> Self {
        Slice::new(text)
    }
}
