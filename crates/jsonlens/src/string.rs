//! Lazily decoded string values.

use alloc::{borrow::Cow, rc::Rc, string::String};
use core::{cell::OnceCell, fmt};

use bstr::{BStr, ByteSlice};

use crate::{scanner, span::Span};

/// A JSON string value referencing its raw source text.
///
/// The span covers the literal including both quote characters. Content is
/// decoded on demand by [`text`](Self::text); the raw bytes are always
/// available through [`raw`](Self::raw), never fail, and are the path for
/// copying content through unexamined.
///
/// # Examples
///
/// ```rust
/// use jsonlens::parse;
///
/// let value = parse(r#""a\nb""#).unwrap();
/// let s = value.as_string().unwrap();
/// assert_eq!(s.text(), "a\nb");
/// assert_eq!(s.raw(), br#""a\nb""#);
/// ```
#[derive(Clone)]
pub struct LazyStr {
    span: Span,
    has_escapes: bool,
    memo: Option<Rc<OnceCell<String>>>,
}

impl LazyStr {
    pub(crate) fn new(span: Span, has_escapes: bool, cached: bool) -> Self {
        Self {
            span,
            has_escapes,
            memo: cached.then(|| Rc::new(OnceCell::new())),
        }
    }

    /// Raw bytes of the literal, quotes included. Never fails.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        self.span.as_bytes()
    }

    /// The byte range of the literal within the input buffer.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    fn content(&self) -> &[u8] {
        let bytes = self.span.as_bytes();
        &bytes[1..bytes.len() - 1]
    }

    /// Decodes the string content, resolving escape sequences.
    ///
    /// Decoding never fails. Escapes that do not name a character (bad hex
    /// after `\u`, lone surrogate halves, a truncated escape) decode to
    /// U+FFFD; unknown single-character escapes decode to the escaped
    /// character itself; invalid UTF-8 decodes lossily. Escape-free valid
    /// UTF-8 content borrows straight from the input buffer.
    ///
    /// With conversion caching enabled, the first decode is stored on the
    /// value (shared across clones) and returned thereafter.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        if let Some(memo) = &self.memo {
            let decoded = memo
                .get_or_init(|| decode_content(self.content(), self.has_escapes).into_owned());
            return Cow::Borrowed(decoded.as_str());
        }
        decode_content(self.content(), self.has_escapes)
    }

    #[cfg(test)]
    pub(crate) fn is_cached(&self) -> bool {
        self.memo.as_ref().is_some_and(|m| m.get().is_some())
    }
}

impl fmt::Debug for LazyStr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LazyStr({:?})", BStr::new(self.raw()))
    }
}

/// Decodes raw string content (the bytes between the quotes).
fn decode_content(content: &[u8], has_escapes: bool) -> Cow<'_, str> {
    if !has_escapes {
        return content.to_str_lossy();
    }
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(idx) = rest.find_byte(b'\\') {
        out.push_str(&rest[..idx].to_str_lossy());
        rest = &rest[idx..];
        let consumed = decode_escape(rest, &mut out);
        rest = &rest[consumed..];
    }
    out.push_str(&rest.to_str_lossy());
    Cow::Owned(out)
}

/// Decodes one escape sequence at the head of `bytes` (which starts at the
/// backslash), appending the result to `out` and returning how many bytes
/// were consumed.
fn decode_escape(bytes: &[u8], out: &mut String) -> usize {
    match bytes.get(1) {
        // A trailing backslash cannot survive structural scanning, but the
        // decoder stays total regardless.
        None => {
            out.push(char::REPLACEMENT_CHARACTER);
            1
        }
        Some(&b'"') => {
            out.push('"');
            2
        }
        Some(&b'\\') => {
            out.push('\\');
            2
        }
        Some(&b'/') => {
            out.push('/');
            2
        }
        Some(&b'b') => {
            out.push('\u{0008}');
            2
        }
        Some(&b'f') => {
            out.push('\u{000C}');
            2
        }
        Some(&b'n') => {
            out.push('\n');
            2
        }
        Some(&b'r') => {
            out.push('\r');
            2
        }
        Some(&b't') => {
            out.push('\t');
            2
        }
        Some(&b'u') => decode_unicode_escape(bytes, out),
        Some(&other) if other.is_ascii() => {
            // Unknown escape: keep the escaped character.
            out.push(other as char);
            2
        }
        // Backslash before a multi-byte character: drop the backslash and
        // let the following UTF-8 run decode normally.
        Some(_) => 1,
    }
}

/// Decodes a `\uXXXX` escape (with surrogate-pair combining) at the head of
/// `bytes`, returning the bytes consumed.
fn decode_unicode_escape(bytes: &[u8], out: &mut String) -> usize {
    let Some(unit) = scanner::hex_escape_value(bytes, 2) else {
        // Bad or missing hex digits: emit U+FFFD and rescan them as
        // ordinary content.
        out.push(char::REPLACEMENT_CHARACTER);
        return 2;
    };
    if let Some(c) = char::from_u32(unit) {
        out.push(c);
        return 6;
    }
    // `unit` is a surrogate half. A high half followed directly by a low
    // half combines into one scalar value.
    if (0xD800..0xDC00).contains(&unit)
        && bytes.get(6) == Some(&b'\\')
        && bytes.get(7) == Some(&b'u')
    {
        if let Some(low) = scanner::hex_escape_value(bytes, 8) {
            if (0xDC00..0xE000).contains(&low) {
                let combined = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                if let Some(c) = char::from_u32(combined) {
                    out.push(c);
                    return 12;
                }
            }
        }
    }
    out.push(char::REPLACEMENT_CHARACTER);
    6
}
