//! The JSON value union.

use alloc::rc::Rc;

use crate::{
    container::{Array, Object},
    engine::{ContainerKind, Document, RawValue},
    error::SyntaxError,
    number::LazyNumber,
    span::Span,
    string::LazyStr,
};

/// A JSON value as defined by [RFC 8259], with deferred content.
///
/// Every value knows the byte range it came from. Scalars are complete at
/// creation; arrays and objects begin incomplete and materialize through
/// access. The tag set is fixed by the JSON grammar, so consumers match
/// on it exhaustively.
///
/// # Examples
///
/// ```rust
/// use jsonlens::{Value, parse};
///
/// let value = parse(r#"[null, true, 1, "a", {}]"#).unwrap();
/// match value {
///     Value::Array(items) => assert_eq!(items.len().unwrap(), 5),
///     _ => unreachable!(),
/// }
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug)]
pub enum Value {
    /// `null`, with the span of the literal.
    Null(Span),
    /// `true` or `false`, with the span of the literal.
    Bool(bool, Span),
    /// A numeric literal, uninterpreted until converted.
    Number(LazyNumber),
    /// A string literal, undecoded until read.
    String(LazyStr),
    /// A lazily materialized array.
    Array(Array),
    /// A lazily materialized object.
    Object(Object),
}

impl Value {
    pub(crate) fn from_raw(doc: &Rc<Document>, raw: &RawValue) -> Self {
        match raw {
            RawValue::Null(span) => Value::Null(span.clone()),
            RawValue::Bool(value, span) => Value::Bool(*value, span.clone()),
            RawValue::Number(number) => Value::Number(number.clone()),
            RawValue::String(string) => Value::String(string.clone()),
            RawValue::Container(ContainerKind::Array, id) => {
                Value::Array(Array::new(Rc::clone(doc), *id))
            }
            RawValue::Container(ContainerKind::Object, id) => {
                Value::Object(Object::new(Rc::clone(doc), *id))
            }
        }
    }

    /// Returns `true` if the value is `null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(..))
    }

    /// Returns `true` if the value is a boolean.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(..))
    }

    /// Returns `true` if the value is a number.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(..))
    }

    /// Returns `true` if the value is a string.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(..))
    }

    /// Returns `true` if the value is an array.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(..))
    }

    /// Returns `true` if the value is an object.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(..))
    }

    /// The boolean, if this is a boolean.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonlens::parse;
    ///
    /// assert_eq!(parse("true").unwrap().as_bool(), Some(true));
    /// assert_eq!(parse("null").unwrap().as_bool(), None);
    /// ```
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value, _) => Some(*value),
            _ => None,
        }
    }

    /// The number view, if this is a number.
    #[must_use]
    pub fn as_number(&self) -> Option<&LazyNumber> {
        match self {
            Value::Number(number) => Some(number),
            _ => None,
        }
    }

    /// The string view, if this is a string.
    #[must_use]
    pub fn as_string(&self) -> Option<&LazyStr> {
        match self {
            Value::String(string) => Some(string),
            _ => None,
        }
    }

    /// The array handle, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// The object handle, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// The byte range of this value's raw text within the input: the
    /// zero-copy path for passing content through unexamined.
    ///
    /// Scalar spans are known at creation and returned as-is. For arrays
    /// and objects the closing delimiter's position is only known once the
    /// container has been fully parsed, so this forces materialization.
    ///
    /// # Errors
    ///
    /// Propagates any [`SyntaxError`] hit while draining a container.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jsonlens::parse;
    ///
    /// let value = parse(r#"  {"a": [1, 2]}  "#).unwrap();
    /// let span = value.raw_span().unwrap();
    /// assert_eq!(span.as_bytes(), br#"{"a": [1, 2]}"#);
    /// ```
    pub fn raw_span(&self) -> Result<Span, SyntaxError> {
        match self {
            Value::Null(span) | Value::Bool(_, span) => Ok(span.clone()),
            Value::Number(number) => Ok(number.span().clone()),
            Value::String(string) => Ok(string.span().clone()),
            Value::Array(array) => array.raw_span(),
            Value::Object(object) => object.raw_span(),
        }
    }
}
