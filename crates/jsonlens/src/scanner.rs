//! Byte-level token scanning over the resident input buffer.
//!
//! The scanner locates token boundaries without interpreting content: it
//! finds the terminating quote of a string (tracking escape starts only far
//! enough to not be fooled by `\"`), the maximal extent of a numeric
//! literal, and whole `null`/`true`/`false` literals. Escape *legality* is
//! checked only in validating mode; structural properties (termination,
//! control bytes, the numeric grammar) are enforced unconditionally,
//! because structural scanning must stay unambiguous even when content is
//! never decoded.

use crate::{
    error::{SyntaxError, SyntaxErrorKind},
    options::ParseOptions,
};

/// A matched keyword literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Null,
    Bool(bool),
}

/// Advances past the four JSON whitespace bytes.
pub(crate) fn skip_whitespace(buf: &[u8], mut pos: usize) -> usize {
    while pos < buf.len() && matches!(buf[pos], b' ' | b'\t' | b'\n' | b'\r') {
        pos += 1;
    }
    pos
}

/// Scans a string literal whose opening quote sits at `start`.
///
/// Returns the offset one past the closing quote and whether the content
/// contains any backslash escape. Bare control bytes are always an error;
/// escape legality is checked only when `opts.validate` is set.
pub(crate) fn scan_string(
    buf: &[u8],
    start: usize,
    opts: &ParseOptions,
) -> Result<(usize, bool), SyntaxError> {
    debug_assert_eq!(buf.get(start), Some(&b'"'));
    let mut pos = start + 1;
    let mut has_escapes = false;
    while pos < buf.len() {
        match buf[pos] {
            b'"' => return Ok((pos + 1, has_escapes)),
            b'\\' => {
                has_escapes = true;
                if opts.validate {
                    pos = check_escape(buf, pos, opts)?;
                } else {
                    // Skip the escaped byte so an escaped quote cannot
                    // terminate the scan.
                    pos += 2;
                }
            }
            b if b < 0x20 => {
                return Err(SyntaxError::new(
                    SyntaxErrorKind::ControlCharacterInString,
                    pos,
                ));
            }
            _ => pos += 1,
        }
    }
    Err(SyntaxError::new(SyntaxErrorKind::UnterminatedString, start))
}

/// Validating-mode escape check. `pos` sits at the backslash; returns the
/// offset one past the full escape sequence.
fn check_escape(buf: &[u8], pos: usize, opts: &ParseOptions) -> Result<usize, SyntaxError> {
    let Some(&escape) = buf.get(pos + 1) else {
        return Err(SyntaxError::new(SyntaxErrorKind::UnterminatedString, pos));
    };
    match escape {
        b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => Ok(pos + 2),
        b'u' => {
            let Some(unit) = hex_escape_value(buf, pos + 2) else {
                return Err(SyntaxError::new(SyntaxErrorKind::InvalidUnicodeEscape, pos));
            };
            if opts.reject_unpaired_surrogates {
                if (0xD800..0xDC00).contains(&unit) {
                    // A high half must be immediately followed by a low half.
                    let next = pos + 6;
                    if buf.get(next) == Some(&b'\\') && buf.get(next + 1) == Some(&b'u') {
                        let Some(low) = hex_escape_value(buf, next + 2) else {
                            return Err(SyntaxError::new(
                                SyntaxErrorKind::InvalidUnicodeEscape,
                                next,
                            ));
                        };
                        if (0xDC00..0xE000).contains(&low) {
                            return Ok(next + 6);
                        }
                    }
                    return Err(SyntaxError::new(SyntaxErrorKind::UnpairedSurrogate, pos));
                }
                if (0xDC00..0xE000).contains(&unit) {
                    return Err(SyntaxError::new(SyntaxErrorKind::UnpairedSurrogate, pos));
                }
            }
            Ok(pos + 6)
        }
        _ => Err(SyntaxError::new(SyntaxErrorKind::InvalidEscape, pos)),
    }
}

/// Reads the four hex digits of a `\u` escape starting at `pos`, returning
/// the UTF-16 code unit value, or `None` if the digits are missing or not
/// hexadecimal.
pub(crate) fn hex_escape_value(buf: &[u8], pos: usize) -> Option<u32> {
    let digits = buf.get(pos..pos + 4)?;
    let mut unit = 0u32;
    for &b in digits {
        unit = unit * 16 + (b as char).to_digit(16)?;
    }
    Some(unit)
}

/// Scans a numeric literal starting at `start`.
///
/// Enforces the full JSON numeric grammar (optional minus, no leading
/// zeros, digits after a decimal point or exponent marker). Returns the
/// offset one past the literal and whether the lexeme is integral (no
/// fraction and no exponent).
pub(crate) fn scan_number(buf: &[u8], start: usize) -> Result<(usize, bool), SyntaxError> {
    let mut pos = start;
    if buf.get(pos) == Some(&b'-') {
        pos += 1;
    }
    match buf.get(pos) {
        Some(&b'0') => {
            pos += 1;
            if buf.get(pos).is_some_and(u8::is_ascii_digit) {
                return Err(SyntaxError::new(SyntaxErrorKind::InvalidNumberFormat, pos));
            }
        }
        Some(&(b'1'..=b'9')) => {
            pos += 1;
            while buf.get(pos).is_some_and(u8::is_ascii_digit) {
                pos += 1;
            }
        }
        _ => {
            return Err(SyntaxError::new(
                SyntaxErrorKind::InvalidNumberFormat,
                pos.min(buf.len()),
            ));
        }
    }

    let mut int_like = true;
    if buf.get(pos) == Some(&b'.') {
        int_like = false;
        pos += 1;
        if !buf.get(pos).is_some_and(u8::is_ascii_digit) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::InvalidNumberFormat,
                pos.min(buf.len()),
            ));
        }
        while buf.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
    }
    if matches!(buf.get(pos), Some(&(b'e' | b'E'))) {
        int_like = false;
        pos += 1;
        if matches!(buf.get(pos), Some(&(b'+' | b'-'))) {
            pos += 1;
        }
        if !buf.get(pos).is_some_and(u8::is_ascii_digit) {
            return Err(SyntaxError::new(
                SyntaxErrorKind::InvalidNumberFormat,
                pos.min(buf.len()),
            ));
        }
        while buf.get(pos).is_some_and(u8::is_ascii_digit) {
            pos += 1;
        }
    }
    Ok((pos, int_like))
}

/// Matches a whole `null`, `true`, or `false` literal at `start`.
pub(crate) fn scan_literal(buf: &[u8], start: usize) -> Result<(usize, Literal), SyntaxError> {
    let (text, literal): (&[u8], Literal) = match buf.get(start) {
        Some(&b'n') => (b"null", Literal::Null),
        Some(&b't') => (b"true", Literal::Bool(true)),
        Some(&b'f') => (b"false", Literal::Bool(false)),
        _ => return Err(SyntaxError::new(SyntaxErrorKind::UnexpectedToken, start)),
    };
    let end = start + text.len();
    if buf.get(start..end) == Some(text) {
        Ok((end, literal))
    } else {
        Err(SyntaxError::new(SyntaxErrorKind::UnexpectedToken, start))
    }
}

#[cfg(test)]
mod tests {
    use super::{Literal, scan_literal, scan_number, scan_string, skip_whitespace};
    use crate::{error::SyntaxErrorKind, options::ParseOptions};

    fn lenient() -> ParseOptions {
        ParseOptions::default()
    }

    fn validating() -> ParseOptions {
        ParseOptions {
            validate: true,
            ..ParseOptions::default()
        }
    }

    #[test]
    fn whitespace_is_the_json_four() {
        assert_eq!(skip_whitespace(b" \t\r\nx", 0), 4);
        // U+00A0 and friends are not whitespace here.
        assert_eq!(skip_whitespace("\u{a0}1".as_bytes(), 0), 0);
    }

    #[test]
    fn string_termination() {
        assert_eq!(scan_string(br#""abc" "#, 0, &lenient()).unwrap(), (5, false));
        assert_eq!(
            scan_string(br#""a\"b""#, 0, &lenient()).unwrap(),
            (6, true)
        );
        let err = scan_string(br#""abc"#, 0, &lenient()).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnterminatedString);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn control_bytes_are_always_rejected() {
        let err = scan_string(b"\"a\x01b\"", 0, &lenient()).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::ControlCharacterInString);
        assert_eq!(err.offset, 2);
    }

    #[test]
    fn lenient_scan_ignores_escape_content() {
        assert_eq!(
            scan_string(br#""\q\uZZZZ""#, 0, &lenient()).unwrap(),
            (10, true)
        );
    }

    #[test]
    fn validating_scan_checks_escapes() {
        let err = scan_string(br#""\q""#, 0, &validating()).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::InvalidEscape);
        assert_eq!(err.offset, 1);

        let err = scan_string(br#""\uZZZZ""#, 0, &validating()).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::InvalidUnicodeEscape);

        // Surrogates pass unless pairing checks are requested.
        scan_string(br#""\uD800""#, 0, &validating()).unwrap();
        let strict = ParseOptions {
            validate: true,
            reject_unpaired_surrogates: true,
            ..ParseOptions::default()
        };
        let err = scan_string(br#""\uD800""#, 0, &strict).unwrap_err();
        assert_eq!(err.kind, SyntaxErrorKind::UnpairedSurrogate);
        scan_string(r#""😀""#.as_bytes(), 0, &strict).unwrap();
    }

    #[test]
    fn number_grammar() {
        assert_eq!(scan_number(b"0", 0).unwrap(), (1, true));
        assert_eq!(scan_number(b"-12,", 0).unwrap(), (3, true));
        assert_eq!(scan_number(b"3.25", 0).unwrap(), (4, false));
        assert_eq!(scan_number(b"1e10", 0).unwrap(), (4, false));
        assert_eq!(scan_number(b"-0.5E-3]", 0).unwrap(), (7, false));

        for bad in [&b"01"[..], b"-", b"1.", b".5", b"1e", b"1e+"] {
            let err = scan_number(bad, 0).unwrap_err();
            assert_eq!(err.kind, SyntaxErrorKind::InvalidNumberFormat, "{bad:?}");
        }
    }

    #[test]
    fn literals() {
        assert_eq!(scan_literal(b"null", 0).unwrap(), (4, Literal::Null));
        assert_eq!(scan_literal(b"true,", 0).unwrap(), (4, Literal::Bool(true)));
        assert_eq!(
            scan_literal(b"false", 0).unwrap(),
            (5, Literal::Bool(false))
        );
        assert!(scan_literal(b"nul", 0).is_err());
        assert!(scan_literal(b"tru3", 0).is_err());
    }
}
