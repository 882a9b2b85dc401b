use core::{
    fmt,
    hash::{Hash, Hasher},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    error::{Error, Result},
    scanner::Scanner,
    slice::Slice,
    value::Value,
};

/// A JSON array scanned only as far as it has been read.
///
/// Elements are appended to an internal memo as the scanner reaches them,
/// so asking for element `n` scans at most up to `n`, and asking again
/// costs nothing. Clones share the memo.
///
/// ```rust
/// use lazyjson::parse;
///
/// let doc = parse("[10, 20, 30, 40]").unwrap();
/// let array = doc.as_array().unwrap();
/// assert_eq!(array.at(1).unwrap().as_i64().unwrap(), 20);
/// assert_eq!(array.scanned_len(), 2);
/// assert!(!array.is_complete());
///
/// assert_eq!(array.len().unwrap(), 4);
/// assert!(array.is_complete());
/// ```
#[derive(Clone)]
pub struct JsonArray(Arc<ArrayNode>);

struct ArrayNode {
    raw: Slice,
    state: Mutex<ArrayState>,
}

struct ArrayState {
    scanner: Scanner,
    items: Vec<Value>,
}

impl ArrayState {
    /// Scans one more element; `false` once the array is exhausted.
    fn advance(&mut self) -> Result<bool> {
        match self.scanner.next_element()? {
            Some(value) => {
                self.items.push(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn element(&mut self, index: usize) -> Result<Option<Value>> {
        while self.items.len() <= index {
            if !self.advance()? {
                return Ok(None);
            }
        }
        Ok(Some(self.items[index].clone()))
    }

    fn fill(&mut self) -> Result<usize> {
        while self.advance()? {}
        Ok(self.items.len())
    }
}

impl JsonArray {
    /// Wraps the text between an array's brackets. Nothing is scanned yet.
    #[must_use]
    pub fn new(raw: Slice) -> Self {
        let scanner = Scanner::new(raw.clone());
        Self(Arc::new(ArrayNode {
            raw,
            state: Mutex::new(ArrayState {
                scanner,
                items: Vec::new(),
            }),
        }))
    }

    fn state(&self) -> MutexGuard<'_, ArrayState> {
        self.0.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of elements; scans the rest of the array.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] if the array is malformed.
    pub fn len(&self) -> Result<usize> {
        self.state().fill()
    }

    /// Scans at most one element.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] if the array is malformed before its first element.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.state().element(0)?.is_none())
    }

    /// The element at `index`, or `None` past the end.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] if malformed input precedes `index`.
    pub fn get(&self, index: usize) -> Result<Option<Value>> {
        self.state().element(index)
    }

    /// The element at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`] past the end, [`Error::Syntax`] if
    /// malformed input precedes `index`.
    pub fn at(&self, index: usize) -> Result<Value> {
        let mut state = self.state();
        match state.element(index)? {
            Some(value) => Ok(value),
            None => Err(Error::IndexOutOfRange {
                index,
                len: state.items.len(),
            }),
        }
    }

    /// Index of the first element equal to `needle`, scanning only as far
    /// as needed.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`] if malformed input is reached before a match.
    pub fn position(&self, needle: &Value) -> Result<Option<usize>> {
        let mut state = self.state();
        let mut index = 0;
        loop {
            if index == state.items.len() && !state.advance()? {
                return Ok(None);
            }
            if state.items[index] == *needle {
                return Ok(Some(index));
            }
            index += 1;
        }
    }

    /// # Errors
    ///
    /// As [`JsonArray::position`].
    pub fn contains(&self, needle: &Value) -> Result<bool> {
        Ok(self.position(needle)?.is_some())
    }

    /// Iterates the elements, sharing the memo with random access.
    #[must_use]
    pub fn iter(&self) -> ArrayIter {
        ArrayIter {
            array: self.clone(),
            next: 0,
            done: false,
        }
    }

    /// Number of elements scanned so far, without scanning.
    #[must_use]
    pub fn scanned_len(&self) -> usize {
        self.state().items.len()
    }

    /// Whether the scanner has reached the closing bracket.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state().scanner.is_closed()
    }

    /// The text between the brackets.
    #[must_use]
    pub fn raw(&self) -> &Slice {
        &self.0.raw
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &JsonArray) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for JsonArray {
    fn eq(&self, other: &Self) -> bool {
        self.0.raw == other.0.raw
    }
}

impl Eq for JsonArray {}

impl Hash for JsonArray {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.raw.hash(state);
    }
}

impl fmt::Debug for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonArray")
            .field("raw", &self.0.raw.as_str())
            .field("scanned", &self.scanned_len())
            .finish()
    }
}

impl IntoIterator for &JsonArray {
    type Item = Result<Value>;
    type IntoIter = ArrayIter;

    fn into_iter(self) -> ArrayIter {
        self.iter()
    }
}

/// Iterator over a [`JsonArray`].
///
/// Yields `Err` at most once: a malformed array ends the iteration.
#[derive(Debug)]
pub struct ArrayIter {
    array: JsonArray,
    next: usize,
    done: bool,
}

impl Iterator for ArrayIter {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.array.get(self.next) {
            Ok(Some(value)) => {
                self.next += 1;
                Some(Ok(value))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl core::iter::FusedIterator for ArrayIter {}
