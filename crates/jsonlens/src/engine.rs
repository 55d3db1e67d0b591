//! The resumable parse engine and per-document state.
//!
//! Suspension is an explicit state machine, not a paused execution context:
//! the document state holds the input buffer, the cursor, an arena of
//! container states, and the stack of currently open containers. One
//! [`DocState::step`] advances the innermost open container by exactly one
//! fragment: its next entry, or its closing delimiter.
//!
//! Invariants the access layer relies on:
//!
//! - A container is incomplete if and only if it sits on the open stack, so
//!   stepping on behalf of any incomplete container eventually appends to
//!   it or closes it (children deeper on the stack drain first).
//! - The cursor only moves forward across yield points; each input byte is
//!   scanned once.
//! - Values stored in the arena name child containers by id, never by
//!   handle, so handle → document is the only `Rc` edge and dropping every
//!   handle frees the document.
//! - A structural error poisons the document: resumption re-raises it,
//!   while entries materialized before the error stay readable.

use alloc::{rc::Rc, vec::Vec};
use core::cell::RefCell;

use crate::{
    error::{SyntaxError, SyntaxErrorKind},
    number::LazyNumber,
    options::ParseOptions,
    scanner::{self, Literal},
    span::Span,
    string::LazyStr,
    value::Value,
};

/// Index of a container state in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ContainerId(usize);

/// Which delimiter pair a container uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContainerKind {
    Array,
    Object,
}

/// A parsed value as stored in the arena. Scalars are complete at creation;
/// child containers are named by id.
#[derive(Debug, Clone)]
pub(crate) enum RawValue {
    Null(Span),
    Bool(bool, Span),
    Number(LazyNumber),
    String(LazyStr),
    Container(ContainerKind, ContainerId),
}

/// Materialized entries of one container.
#[derive(Debug)]
pub(crate) enum Entries {
    Elements(Vec<RawValue>),
    Members(Vec<(LazyStr, RawValue)>),
}

impl Entries {
    pub(crate) fn len(&self) -> usize {
        match self {
            Entries::Elements(items) => items.len(),
            Entries::Members(pairs) => pairs.len(),
        }
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Arena slot for one array or object.
#[derive(Debug)]
pub(crate) struct ContainerState {
    pub(crate) entries: Entries,
    pub(crate) complete: bool,
    pub(crate) open_offset: usize,
    /// One past the closing delimiter; valid once `complete`.
    pub(crate) close_offset: usize,
}

impl ContainerState {
    pub(crate) fn elements(&self) -> &[RawValue] {
        match &self.entries {
            Entries::Elements(items) => items,
            Entries::Members(_) => &[],
        }
    }

    pub(crate) fn members(&self) -> &[(LazyStr, RawValue)] {
        match &self.entries {
            Entries::Members(pairs) => pairs,
            Entries::Elements(_) => &[],
        }
    }
}

/// Shared per-document parse state. Handles hold `Rc<Document>`.
#[derive(Debug)]
pub(crate) struct Document {
    pub(crate) inner: RefCell<DocState>,
}

#[cfg(test)]
impl Document {
    /// Fragments parsed so far, for laziness assertions.
    pub(crate) fn steps(&self) -> u64 {
        self.inner.borrow().steps
    }
}

#[derive(Debug)]
pub(crate) struct DocState {
    buf: Rc<[u8]>,
    pos: usize,
    opts: ParseOptions,
    containers: Vec<ContainerState>,
    /// Ids of incomplete containers, innermost last.
    open: Vec<ContainerId>,
    /// Set once a structural error surfaces; resumption re-raises it.
    failed: Option<SyntaxError>,
    #[cfg(test)]
    steps: u64,
}

impl DocState {
    fn new(buf: Rc<[u8]>, opts: ParseOptions) -> Self {
        Self {
            buf,
            pos: 0,
            opts,
            containers: Vec::new(),
            open: Vec::new(),
            failed: None,
            #[cfg(test)]
            steps: 0,
        }
    }

    pub(crate) fn buffer(&self) -> &Rc<[u8]> {
        &self.buf
    }

    pub(crate) fn container(&self, id: ContainerId) -> &ContainerState {
        &self.containers[id.0]
    }

    /// Resumes parsing until `id` holds at least `want` entries or its
    /// closing delimiter has been consumed.
    pub(crate) fn materialize(&mut self, id: ContainerId, want: usize) -> Result<(), SyntaxError> {
        loop {
            let state = &self.containers[id.0];
            if state.entries.len() >= want || state.complete {
                return Ok(());
            }
            if let Some(err) = self.failed {
                return Err(err);
            }
            if self.open.is_empty() {
                return Ok(());
            }
            self.step()?;
        }
    }

    /// Drains `id` to completion.
    pub(crate) fn materialize_all(&mut self, id: ContainerId) -> Result<(), SyntaxError> {
        self.materialize(id, usize::MAX)
    }

    /// Advances the innermost open container by one fragment.
    fn step(&mut self) -> Result<(), SyntaxError> {
        match self.step_inner() {
            Err(err) => {
                self.failed = Some(err);
                Err(err)
            }
            ok => ok,
        }
    }

    fn step_inner(&mut self) -> Result<(), SyntaxError> {
        let Some(&id) = self.open.last() else {
            debug_assert!(false, "step with no open container");
            return Ok(());
        };
        #[cfg(test)]
        {
            self.steps += 1;
        }

        let kind = match &self.containers[id.0].entries {
            Entries::Elements(_) => ContainerKind::Array,
            Entries::Members(_) => ContainerKind::Object,
        };
        let close = match kind {
            ContainerKind::Array => b']',
            ContainerKind::Object => b'}',
        };

        self.pos = scanner::skip_whitespace(&self.buf, self.pos);
        let Some(&next) = self.buf.get(self.pos) else {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnterminatedContainer,
                self.pos,
            ));
        };
        if next == close {
            return self.close_innermost(id);
        }
        if !self.containers[id.0].entries.is_empty() {
            if next != b',' {
                return Err(SyntaxError::new(SyntaxErrorKind::UnexpectedToken, self.pos));
            }
            self.pos += 1;
            self.pos = scanner::skip_whitespace(&self.buf, self.pos);
            match self.buf.get(self.pos) {
                None => {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::UnterminatedContainer,
                        self.pos,
                    ));
                }
                Some(&b) if b == close => {
                    return Err(SyntaxError::new(SyntaxErrorKind::TrailingComma, self.pos));
                }
                Some(_) => {}
            }
        }

        match kind {
            ContainerKind::Array => {
                let value = self.parse_value()?;
                let Entries::Elements(items) = &mut self.containers[id.0].entries else {
                    debug_assert!(false, "array frame over object entries");
                    return Ok(());
                };
                items.push(value);
            }
            ContainerKind::Object => {
                let (key, value) = self.parse_member()?;
                let Entries::Members(pairs) = &mut self.containers[id.0].entries else {
                    debug_assert!(false, "object frame over array entries");
                    return Ok(());
                };
                pairs.push((key, value));
            }
        }
        Ok(())
    }

    /// Consumes the closing delimiter of the innermost container. When the
    /// root closes, the rest of the buffer must be whitespace.
    fn close_innermost(&mut self, id: ContainerId) -> Result<(), SyntaxError> {
        self.pos += 1;
        let state = &mut self.containers[id.0];
        state.complete = true;
        state.close_offset = self.pos;
        self.open.pop();
        if self.open.is_empty() {
            self.pos = scanner::skip_whitespace(&self.buf, self.pos);
            if self.pos < self.buf.len() {
                return Err(SyntaxError::new(SyntaxErrorKind::TrailingGarbage, self.pos));
            }
        }
        Ok(())
    }

    /// Parses one value at the cursor. Scalars are parsed completely; a
    /// container consumes only its opening delimiter and is pushed onto the
    /// open stack.
    fn parse_value(&mut self) -> Result<RawValue, SyntaxError> {
        let Some(&next) = self.buf.get(self.pos) else {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedEndOfInput,
                self.pos,
            ));
        };
        match next {
            b'"' => {
                let (end, has_escapes) = scanner::scan_string(&self.buf, self.pos, &self.opts)?;
                let span = self.take_span(end);
                Ok(RawValue::String(LazyStr::new(
                    span,
                    has_escapes,
                    self.opts.cache_conversions,
                )))
            }
            b'-' | b'0'..=b'9' => {
                let (end, int_like) = scanner::scan_number(&self.buf, self.pos)?;
                let span = self.take_span(end);
                Ok(RawValue::Number(LazyNumber::new(
                    span,
                    int_like,
                    self.opts.cache_conversions,
                )))
            }
            b'n' | b't' | b'f' => {
                let (end, literal) = scanner::scan_literal(&self.buf, self.pos)?;
                let span = self.take_span(end);
                Ok(match literal {
                    Literal::Null => RawValue::Null(span),
                    Literal::Bool(value) => RawValue::Bool(value, span),
                })
            }
            b'[' => Ok(self.open_container(ContainerKind::Array)),
            b'{' => Ok(self.open_container(ContainerKind::Object)),
            _ => Err(SyntaxError::new(SyntaxErrorKind::UnexpectedToken, self.pos)),
        }
    }

    /// Parses one `"key": value` member of the innermost object.
    fn parse_member(&mut self) -> Result<(LazyStr, RawValue), SyntaxError> {
        match self.buf.get(self.pos) {
            Some(&b'"') => {}
            Some(_) => {
                return Err(SyntaxError::new(SyntaxErrorKind::UnexpectedToken, self.pos));
            }
            None => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnexpectedEndOfInput,
                    self.pos,
                ));
            }
        }
        let (end, has_escapes) = scanner::scan_string(&self.buf, self.pos, &self.opts)?;
        let key = LazyStr::new(self.take_span(end), has_escapes, self.opts.cache_conversions);

        self.pos = scanner::skip_whitespace(&self.buf, self.pos);
        match self.buf.get(self.pos) {
            Some(&b':') => self.pos += 1,
            Some(_) => {
                return Err(SyntaxError::new(SyntaxErrorKind::UnexpectedToken, self.pos));
            }
            None => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::UnexpectedEndOfInput,
                    self.pos,
                ));
            }
        }
        self.pos = scanner::skip_whitespace(&self.buf, self.pos);
        let value = self.parse_value()?;
        Ok((key, value))
    }

    /// Creates a new incomplete container at the cursor and opens it.
    fn open_container(&mut self, kind: ContainerKind) -> RawValue {
        let id = ContainerId(self.containers.len());
        let entries = match kind {
            ContainerKind::Array => Entries::Elements(Vec::new()),
            ContainerKind::Object => Entries::Members(Vec::new()),
        };
        self.containers.push(ContainerState {
            entries,
            complete: false,
            open_offset: self.pos,
            close_offset: 0,
        });
        self.pos += 1;
        self.open.push(id);
        RawValue::Container(kind, id)
    }

    /// Span from the cursor to `end`, advancing the cursor.
    fn take_span(&mut self, end: usize) -> Span {
        let span = Span::new(Rc::clone(&self.buf), self.pos, end);
        self.pos = end;
        span
    }
}

/// Parses a JSON document from text with default options.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if the input does not begin with a value, or,
/// for a scalar document, if anything but whitespace follows it. For a
/// composite document only the opening delimiter is read here; structural
/// errors deeper in the input surface from the access that reaches them.
///
/// # Examples
///
/// ```rust
/// use jsonlens::parse;
///
/// let value = parse("[true, false]").unwrap();
/// assert!(value.is_array());
/// ```
pub fn parse(text: &str) -> Result<Value, SyntaxError> {
    parse_with(text.as_bytes(), ParseOptions::default())
}

/// Parses a JSON document from bytes with default options.
///
/// # Errors
///
/// As [`parse`].
pub fn parse_bytes(bytes: &[u8]) -> Result<Value, SyntaxError> {
    parse_with(bytes, ParseOptions::default())
}

/// Parses a JSON document with explicit options.
///
/// Accepts anything convertible into a shared byte buffer (`&[u8]`,
/// `Vec<u8>`, `Box<[u8]>`, an existing `Rc<[u8]>`); handing over an owned
/// buffer avoids the copy.
///
/// # Errors
///
/// As [`parse`].
pub fn parse_with(
    buffer: impl Into<Rc<[u8]>>,
    options: ParseOptions,
) -> Result<Value, SyntaxError> {
    let buf: Rc<[u8]> = buffer.into();
    let mut state = DocState::new(Rc::clone(&buf), options);

    state.pos = scanner::skip_whitespace(&buf, 0);
    if state.pos >= buf.len() {
        return Err(SyntaxError::new(
            SyntaxErrorKind::UnexpectedEndOfInput,
            state.pos,
        ));
    }
    let root = state.parse_value()?;
    if !matches!(root, RawValue::Container(..)) {
        // A scalar root is complete already; the document must end here.
        state.pos = scanner::skip_whitespace(&buf, state.pos);
        if state.pos < buf.len() {
            return Err(SyntaxError::new(
                SyntaxErrorKind::TrailingGarbage,
                state.pos,
            ));
        }
    }
    let doc = Rc::new(Document {
        inner: RefCell::new(state),
    });
    Ok(Value::from_raw(&doc, &root))
}
