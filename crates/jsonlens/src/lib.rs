//! A lazy, incremental JSON value reader.
//!
//! `jsonlens` parses a JSON document into thin handles over byte ranges of
//! the original input instead of eagerly building a tree of native values.
//! Descending into arrays and objects, decoding string escapes, and
//! converting numbers all happen on demand, the first time a caller asks.
//! Reading two fields out of a huge document costs time proportional to
//! where those fields sit in the input, not to the document's total size,
//! and malformed content in fields nobody reads never rejects the document.
//!
//! # Examples
//!
//! ```rust
//! use jsonlens::parse;
//!
//! let root = parse(r#"{"name": "svc", "ports": [80, 443]}"#).unwrap();
//! let root = root.as_object().unwrap();
//!
//! let ports = root.get("ports").unwrap();
//! let ports = ports.as_array().unwrap();
//! let port = ports.get(1).unwrap();
//! assert_eq!(port.as_number().unwrap().as_i64().unwrap(), 443);
//! ```
//!
//! Containers report how much of them has been materialized without forcing
//! further parsing:
//!
//! ```rust
//! use jsonlens::parse;
//!
//! let root = parse("[1, 2, 3]").unwrap();
//! let items = root.as_array().unwrap();
//! assert_eq!(items.known_len(), (0, false));
//!
//! items.get(0).unwrap();
//! assert_eq!(items.known_len(), (1, false));
//! assert_eq!(items.len().unwrap(), 3);
//! assert_eq!(items.known_len(), (3, true));
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod container;
mod engine;
mod error;
mod number;
mod options;
mod scanner;
mod span;
mod string;
mod value;

#[cfg(test)]
mod tests;

pub use container::{Array, Iter, Keys, Object, Pairs};
pub use engine::{parse, parse_bytes, parse_with};
pub use error::{BoundsError, Error, NumericError, SyntaxError, SyntaxErrorKind};
pub use number::LazyNumber;
pub use options::ParseOptions;
pub use span::Span;
pub use string::LazyStr;
pub use value::Value;
