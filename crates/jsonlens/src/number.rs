//! Lazily converted numeric values.

use alloc::rc::Rc;
use core::{cell::OnceCell, fmt, str};

use crate::{error::NumericError, span::Span};

/// A JSON number value referencing its raw literal text.
///
/// No interpretation happens at parse time; the span holds the sign,
/// digits, fraction, and exponent exactly as written. Conversion is
/// per-target: [`as_f64`](Self::as_f64) always succeeds for a literal the
/// scanner admitted, while the integer conversions accept integral lexemes
/// only and report range failures.
///
/// # Examples
///
/// ```rust
/// use jsonlens::parse;
///
/// let value = parse("6.25e1").unwrap();
/// let n = value.as_number().unwrap();
/// assert_eq!(n.raw(), b"6.25e1");
/// assert!(!n.is_integer_lexeme());
/// assert!(n.as_i64().is_err());
/// assert!((n.as_f64() - 62.5).abs() < f64::EPSILON);
/// ```
#[derive(Clone)]
pub struct LazyNumber {
    span: Span,
    int_like: bool,
    memo: Option<Rc<NumberMemo>>,
}

#[derive(Debug, Default)]
struct NumberMemo {
    int: OnceCell<i64>,
    uint: OnceCell<u64>,
    float: OnceCell<f64>,
}

impl LazyNumber {
    pub(crate) fn new(span: Span, int_like: bool, cached: bool) -> Self {
        Self {
            span,
            int_like,
            memo: cached.then(|| Rc::new(NumberMemo::default())),
        }
    }

    /// Raw bytes of the literal. Never fails.
    #[must_use]
    pub fn raw(&self) -> &[u8] {
        self.span.as_bytes()
    }

    /// The byte range of the literal within the input buffer.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Returns `true` when the literal has neither a fraction nor an
    /// exponent.
    #[must_use]
    pub fn is_integer_lexeme(&self) -> bool {
        self.int_like
    }

    fn lexeme(&self) -> &str {
        // The scanner admits ASCII bytes only.
        str::from_utf8(self.span.as_bytes()).unwrap_or("")
    }

    /// Converts the literal to `f64`.
    ///
    /// Never fails for a literal the scanner admitted; magnitudes beyond
    /// `f64` range saturate to infinity.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        if let Some(memo) = &self.memo {
            return *memo.float.get_or_init(|| parse_f64(self.lexeme()));
        }
        parse_f64(self.lexeme())
    }

    /// Converts the literal to `i64`.
    ///
    /// # Errors
    ///
    /// [`NumericError::NotAnInteger`] if the literal has a fraction or
    /// exponent, [`NumericError::OutOfRange`] if it does not fit.
    pub fn as_i64(&self) -> Result<i64, NumericError> {
        if !self.int_like {
            return Err(NumericError::NotAnInteger);
        }
        if let Some(memo) = &self.memo {
            if let Some(&v) = memo.int.get() {
                return Ok(v);
            }
        }
        let v = self
            .lexeme()
            .parse::<i64>()
            .map_err(|_| NumericError::OutOfRange)?;
        if let Some(memo) = &self.memo {
            let _ = memo.int.set(v);
        }
        Ok(v)
    }

    /// Converts the literal to `u64`.
    ///
    /// # Errors
    ///
    /// [`NumericError::NotAnInteger`] if the literal has a fraction or
    /// exponent, [`NumericError::OutOfRange`] if it is negative or does not
    /// fit.
    pub fn as_u64(&self) -> Result<u64, NumericError> {
        if !self.int_like {
            return Err(NumericError::NotAnInteger);
        }
        if let Some(memo) = &self.memo {
            if let Some(&v) = memo.uint.get() {
                return Ok(v);
            }
        }
        let v = self
            .lexeme()
            .parse::<u64>()
            .map_err(|_| NumericError::OutOfRange)?;
        if let Some(memo) = &self.memo {
            let _ = memo.uint.set(v);
        }
        Ok(v)
    }
}

fn parse_f64(lexeme: &str) -> f64 {
    lexeme.parse().unwrap_or(f64::NAN)
}

impl fmt::Debug for LazyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LazyNumber({})", self.lexeme())
    }
}
