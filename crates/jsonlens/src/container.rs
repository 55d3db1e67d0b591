//! Lazy containers: partially materialized arrays and objects.
//!
//! A handle addresses its entry storage inside the shared document state;
//! access operations resume the suspended parse exactly far enough to
//! answer, and entries materialized once are never parsed again.

use alloc::{rc::Rc, string::String};
use core::fmt;

use crate::{
    engine::{ContainerId, Document},
    error::{BoundsError, Error, SyntaxError},
    span::Span,
    string::LazyStr,
    value::Value,
};

/// A lazily materialized JSON array.
///
/// Elements are parsed on demand: indexing and iteration resume the
/// suspended parse until the requested element exists or the closing
/// bracket has been consumed. Cloning shares the same backing entries.
///
/// # Examples
///
/// ```rust
/// use jsonlens::parse;
///
/// let root = parse("[10, 20, 30]").unwrap();
/// let items = root.as_array().unwrap();
/// assert_eq!(items.get(1).unwrap().as_number().unwrap().as_i64(), Ok(20));
/// assert_eq!(items.known_len(), (2, false));
/// ```
#[derive(Clone)]
pub struct Array {
    doc: Rc<Document>,
    id: ContainerId,
}

impl Array {
    pub(crate) fn new(doc: Rc<Document>, id: ContainerId) -> Self {
        Self { doc, id }
    }

    fn try_at(&self, index: usize) -> Result<Option<Value>, SyntaxError> {
        let mut state = self.doc.inner.borrow_mut();
        state.materialize(self.id, index.saturating_add(1))?;
        Ok(state
            .container(self.id)
            .elements()
            .get(index)
            .map(|raw| Value::from_raw(&self.doc, raw)))
    }

    /// Returns the element at `index`, parsing forward as needed.
    ///
    /// Repeated access to an already materialized index is O(1) and does
    /// not touch the engine.
    ///
    /// # Errors
    ///
    /// [`Error::Bounds`] if the array is complete and `index` is out of
    /// range; [`Error::Syntax`] if resumption hits a grammar violation.
    pub fn get(&self, index: usize) -> Result<Value, Error> {
        match self.try_at(index)? {
            Some(value) => Ok(value),
            None => {
                let (len, _) = self.known_len();
                Err(BoundsError::Index(index, len).into())
            }
        }
    }

    /// Elements materialized so far, and whether that count is final.
    ///
    /// Never advances the parse; use [`len`](Self::len) for the forced
    /// count.
    #[must_use]
    pub fn known_len(&self) -> (usize, bool) {
        let state = self.doc.inner.borrow();
        let container = state.container(self.id);
        (container.entries.len(), container.complete)
    }

    /// Total number of elements, draining the rest of the array.
    ///
    /// # Errors
    ///
    /// Propagates any [`SyntaxError`] hit while draining.
    pub fn len(&self) -> Result<usize, SyntaxError> {
        let mut state = self.doc.inner.borrow_mut();
        state.materialize_all(self.id)?;
        Ok(state.container(self.id).entries.len())
    }

    /// Returns `true` if the array has no elements.
    ///
    /// Parses at most one element.
    ///
    /// # Errors
    ///
    /// Propagates any [`SyntaxError`] hit while parsing.
    pub fn is_empty(&self) -> Result<bool, SyntaxError> {
        Ok(self.try_at(0)?.is_none())
    }

    /// Returns `true` once the closing bracket has been consumed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.doc.inner.borrow().container(self.id).complete
    }

    /// The byte range of the array's raw text, `[` through `]`.
    ///
    /// The closing offset is only known once the array has been fully
    /// parsed, so this drains it.
    ///
    /// # Errors
    ///
    /// Propagates any [`SyntaxError`] hit while draining.
    pub fn raw_span(&self) -> Result<Span, SyntaxError> {
        let mut state = self.doc.inner.borrow_mut();
        state.materialize_all(self.id)?;
        let container = state.container(self.id);
        let (start, end) = (container.open_offset, container.close_offset);
        Ok(Span::new(Rc::clone(state.buffer()), start, end))
    }

    /// Iterates elements in source order, parsing as it goes.
    ///
    /// Iteration is restartable: each call starts from the first element
    /// and re-uses already materialized entries.
    #[must_use]
    pub fn iter(&self) -> Iter {
        Iter {
            array: self.clone(),
            index: 0,
            done: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn engine_steps(&self) -> u64 {
        self.doc.steps()
    }
}

impl IntoIterator for &Array {
    type Item = Result<Value, SyntaxError>;
    type IntoIter = Iter;

    fn into_iter(self) -> Iter {
        self.iter()
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (len, complete) = self.known_len();
        if complete {
            write!(f, "Array({len} elements)")
        } else {
            write!(f, "Array({len}+ elements, suspended)")
        }
    }
}

/// Lazy iterator over array elements.
///
/// Yields `Err` once and then fuses if resumption hits a grammar
/// violation.
pub struct Iter {
    array: Array,
    index: usize,
    done: bool,
}

impl Iterator for Iter {
    type Item = Result<Value, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.array.try_at(self.index) {
            Ok(Some(value)) => {
                self.index += 1;
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

/// A lazily materialized JSON object.
///
/// Members are materialized in source order; duplicate keys are preserved.
/// Key lookup decodes candidate keys for comparison.
///
/// # Examples
///
/// ```rust
/// use jsonlens::parse;
///
/// let root = parse(r#"{"host": "db1", "port": 5432}"#).unwrap();
/// let config = root.as_object().unwrap();
/// let host = config.get("host").unwrap();
/// assert_eq!(host.as_string().unwrap().text(), "db1");
/// ```
#[derive(Clone)]
pub struct Object {
    doc: Rc<Document>,
    id: ContainerId,
}

impl Object {
    pub(crate) fn new(doc: Rc<Document>, id: ContainerId) -> Self {
        Self { doc, id }
    }

    fn try_pair(&self, index: usize) -> Result<Option<(LazyStr, Value)>, SyntaxError> {
        let mut state = self.doc.inner.borrow_mut();
        state.materialize(self.id, index.saturating_add(1))?;
        Ok(state
            .container(self.id)
            .members()
            .get(index)
            .map(|(key, raw)| (key.clone(), Value::from_raw(&self.doc, raw))))
    }

    /// Looks up `key`, decoding candidate keys for comparison.
    ///
    /// When duplicate keys exist the last occurrence wins, so lookup
    /// materializes the whole object.
    ///
    /// # Errors
    ///
    /// [`Error::Bounds`] if the key is absent; [`Error::Syntax`] if
    /// resumption hits a grammar violation.
    pub fn get(&self, key: &str) -> Result<Value, Error> {
        let mut state = self.doc.inner.borrow_mut();
        state.materialize_all(self.id)?;
        let container = state.container(self.id);
        for (candidate, raw) in container.members().iter().rev() {
            if candidate.text() == key {
                return Ok(Value::from_raw(&self.doc, raw));
            }
        }
        Err(BoundsError::Key(key.into()).into())
    }

    /// Returns whether `key` is present.
    ///
    /// Stops at the first match, so a hit may leave the object only
    /// partially materialized.
    ///
    /// # Errors
    ///
    /// Propagates any [`SyntaxError`] hit while parsing.
    pub fn has(&self, key: &str) -> Result<bool, SyntaxError> {
        let mut index = 0;
        loop {
            match self.try_pair(index)? {
                Some((candidate, _)) if candidate.text() == key => return Ok(true),
                Some(_) => index += 1,
                None => return Ok(false),
            }
        }
    }

    /// Members materialized so far, and whether that count is final.
    ///
    /// Never advances the parse.
    #[must_use]
    pub fn known_len(&self) -> (usize, bool) {
        let state = self.doc.inner.borrow();
        let container = state.container(self.id);
        (container.entries.len(), container.complete)
    }

    /// Total number of members, draining the rest of the object.
    ///
    /// # Errors
    ///
    /// Propagates any [`SyntaxError`] hit while draining.
    pub fn len(&self) -> Result<usize, SyntaxError> {
        let mut state = self.doc.inner.borrow_mut();
        state.materialize_all(self.id)?;
        Ok(state.container(self.id).entries.len())
    }

    /// Returns `true` if the object has no members.
    ///
    /// Parses at most one member.
    ///
    /// # Errors
    ///
    /// Propagates any [`SyntaxError`] hit while parsing.
    pub fn is_empty(&self) -> Result<bool, SyntaxError> {
        Ok(self.try_pair(0)?.is_none())
    }

    /// Returns `true` once the closing brace has been consumed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.doc.inner.borrow().container(self.id).complete
    }

    /// The byte range of the object's raw text, `{` through `}`.
    ///
    /// Drains the object; see [`Array::raw_span`].
    ///
    /// # Errors
    ///
    /// Propagates any [`SyntaxError`] hit while draining.
    pub fn raw_span(&self) -> Result<Span, SyntaxError> {
        let mut state = self.doc.inner.borrow_mut();
        state.materialize_all(self.id)?;
        let container = state.container(self.id);
        let (start, end) = (container.open_offset, container.close_offset);
        Ok(Span::new(Rc::clone(state.buffer()), start, end))
    }

    /// Iterates decoded key text in source order, duplicates included.
    #[must_use]
    pub fn keys(&self) -> Keys {
        Keys {
            object: self.clone(),
            index: 0,
            done: false,
        }
    }

    /// Iterates key/value pairs in source order, duplicates included.
    ///
    /// Restartable like [`Array::iter`].
    #[must_use]
    pub fn pairs(&self) -> Pairs {
        Pairs {
            object: self.clone(),
            index: 0,
            done: false,
        }
    }

    #[cfg(test)]
    pub(crate) fn engine_steps(&self) -> u64 {
        self.doc.steps()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (len, complete) = self.known_len();
        if complete {
            write!(f, "Object({len} members)")
        } else {
            write!(f, "Object({len}+ members, suspended)")
        }
    }
}

/// Lazy iterator over decoded object keys.
pub struct Keys {
    object: Object,
    index: usize,
    done: bool,
}

impl Iterator for Keys {
    type Item = Result<String, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.object.try_pair(self.index) {
            Ok(Some((key, _))) => {
                self.index += 1;
                Some(Ok(key.text().into_owned()))
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

/// Lazy iterator over object key/value pairs.
pub struct Pairs {
    object: Object,
    index: usize,
    done: bool,
}

impl Iterator for Pairs {
    type Item = Result<(LazyStr, Value), SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.object.try_pair(self.index) {
            Ok(Some(pair)) => {
                self.index += 1;
                Some(Ok(pair))
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
