use core::{
    fmt,
    hash::{Hash, Hasher},
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use indexmap::{IndexMap, map::Entry};
use log::trace;

use crate::{error::Result, scanner::Scanner, slice::Slice, value::Value};

/// A JSON object scanned only as far as it has been read.
///
/// A lookup scans entries until the key turns up and remembers everything it
/// passed on the way. When a key appears more than once the first occurrence
/// wins in lookups, in iteration and in [`JsonObject::len`]. The later values
/// are kept aside so that [`Value::materialize`] still checks them.
///
/// ```rust
/// use lazyjson::parse;
///
/// let doc = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
/// let object = doc.as_object().unwrap();
/// assert_eq!(object.get("a").unwrap().unwrap().as_i64().unwrap(), 1);
/// assert_eq!(object.scanned_entries(), 1);
///
/// assert_eq!(object.len().unwrap(), 2);
/// assert_eq!(object.scanned_entries(), 3);
/// ```
#[derive(Clone)]
pub struct JsonObject(Arc<ObjectNode>);

struct ObjectNode {
    raw: Slice,
    state: Mutex<ObjectState>,
}

struct ObjectState {
    scanner: Scanner,
    entries: IndexMap<Arc<str>, Value>,
    /// Values of repeated keys, hidden from lookups but still validated.
    shadowed: Vec<Value>,
    scanned: usize,
}

impl ObjectState {
    /// Scans one more entry; `false` once the object is exhausted.
    fn advance(&mut self) -> Result<bool> {
        let Some((key, value)) = self.scanner.next_entry()? else {
            return Ok(false);
        };
        self.scanned += 1;
        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(slot) => {
                trace!("shadowing duplicate key {:?}", slot.key());
                self.shadowed.push(value);
            }
        }
        Ok(true)
    }

    fn lookup(&mut self, key: &str) -> Result<Option<Value>> {
        loop {
            if let Some(value) = self.entries.get(key) {
                return Ok(Some(value.clone()));
            }
            if !self.advance()? {
                return Ok(None);
            }
        }
    }

    fn entry(&mut self, index: usize) -> Result<Option<(Arc<str>, Value)>> {
        while self.entries.len() <= index {
            if !self.advance()? {
                return Ok(None);
            }
        }
        Ok(self
            .entries
            .get_index(index)
            .map(|(k, v)| (Arc::clone(k), v.clone())))
    }

    fn fill(&mut self) -> Result<usize> {
        while self.advance()? {}
        Ok(self.entries.len())
    }
}

impl JsonObject {
    /// Wraps the text between an object's braces. Nothing is scanned yet.
    #[must_use]
    pub fn new(raw: Slice) -> Self {
        let scanner = Scanner::new(raw.clone());
        Self(Arc::new(ObjectNode {
            raw,
            state: Mutex::new(ObjectState {
                scanner,
                entries: IndexMap::new(),
                shadowed: Vec::new(),
                scanned: 0,
            }),
        }))
    }

    fn state(&self) -> MutexGuard<'_, ObjectState> {
        self.0.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of distinct keys; scans the rest of the object.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`](crate::Error::Syntax) if the object is malformed.
    pub fn len(&self) -> Result<usize> {
        self.state().fill()
    }

    /// Scans at most one entry.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`](crate::Error::Syntax) if the object is malformed
    /// before its first entry.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.state().entry(0)?.is_none())
    }

    /// The value of the first entry named `key`.
    ///
    /// Keys already seen are answered from the memo; otherwise entries are
    /// scanned until `key` is found or the object ends.
    ///
    /// # Errors
    ///
    /// [`Error::Syntax`](crate::Error::Syntax) if malformed input is reached
    /// before `key`.
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        self.state().lookup(key)
    }

    /// # Errors
    ///
    /// As [`JsonObject::get`].
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Iterates entries in document order, skipping repeated keys.
    #[must_use]
    pub fn iter(&self) -> ObjectIter {
        ObjectIter {
            object: self.clone(),
            next: 0,
            done: false,
        }
    }

    /// Distinct keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = Result<Arc<str>>> {
        self.iter().map(|entry| entry.map(|(key, _)| key))
    }

    /// Values of the distinct keys in document order.
    pub fn values(&self) -> impl Iterator<Item = Result<Value>> {
        self.iter().map(|entry| entry.map(|(_, value)| value))
    }

    /// Every value in the object, including those of repeated keys: the
    /// distinct keys' values first, then the shadowed ones in document order.
    pub(crate) fn all_values(&self) -> Result<Vec<Value>> {
        let mut state = self.state();
        state.fill()?;
        Ok(state
            .entries
            .values()
            .chain(&state.shadowed)
            .cloned()
            .collect())
    }

    /// Entries scanned so far, counting repeated keys.
    #[must_use]
    pub fn scanned_entries(&self) -> usize {
        self.state().scanned
    }

    /// Whether the scanner has reached the closing brace.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state().scanner.is_closed()
    }

    /// The text between the braces.
    #[must_use]
    pub fn raw(&self) -> &Slice {
        &self.0.raw
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &JsonObject) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        self.0.raw == other.0.raw
    }
}

impl Eq for JsonObject {}

impl Hash for JsonObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.raw.hash(state);
    }
}

impl fmt::Debug for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonObject")
            .field("raw", &self.0.raw.as_str())
            .field("scanned", &self.scanned_entries())
            .finish()
    }
}

impl IntoIterator for &JsonObject {
    type Item = Result<(Arc<str>, Value)>;
    type IntoIter = ObjectIter;

    fn into_iter(self) -> ObjectIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`JsonObject`].
///
/// Yields `Err` at most once: a malformed object ends the iteration.
#[derive(Debug)]
pub struct ObjectIter {
    object: JsonObject,
    next: usize,
    done: bool,
}

impl Iterator for ObjectIter {
    type Item = Result<(Arc<str>, Value)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.object.state().entry(self.next) {
            Ok(Some(entry)) => {
                self.next += 1;
                Some(Ok(entry))
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

impl core::iter::FusedIterator for ObjectIter {}
