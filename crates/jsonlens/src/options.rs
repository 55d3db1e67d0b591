//! Per-parse configuration.

/// Configuration for a single parse.
///
/// Options are fixed at [`parse_with`](crate::parse_with) time and threaded
/// into the engine; there is no ambient or global configuration.
///
/// # Examples
///
/// ```rust
/// use jsonlens::{ParseOptions, parse_with};
///
/// let value = parse_with(
///     br#"{"strict": true}"#.as_slice(),
///     ParseOptions {
///         validate: true,
///         ..Default::default()
///     },
/// )
/// .unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Whether the scanner checks escape-sequence legality while locating
    /// string boundaries.
    ///
    /// Structural scanning is always strict: unterminated strings, bare
    /// control characters, malformed numbers, and mismatched delimiters are
    /// errors in either mode. With `validate` off, the *content* of escape
    /// sequences is not inspected; a malformed escape such as `\q` or
    /// `\uZZZZ` is tolerated at parse time and surfaces only as a lossy
    /// decode result when the string is read. With `validate` on, such
    /// escapes raise a [`SyntaxError`](crate::SyntaxError) during scanning.
    ///
    /// Disabling validation is the cheaper mode for input already known to
    /// be well-formed JSON from a trusted producer.
    ///
    /// # Default
    ///
    /// `false`
    pub validate: bool,

    /// Whether lone UTF-16 surrogate escapes are rejected during scanning.
    ///
    /// Only consulted when [`validate`](Self::validate) is set. When
    /// enabled, a `\uD800`–`\uDBFF` escape not followed by a low surrogate
    /// (or a low surrogate on its own) raises
    /// [`SyntaxErrorKind::UnpairedSurrogate`](crate::SyntaxErrorKind).
    /// When disabled, lone surrogates decode to U+FFFD.
    ///
    /// # Default
    ///
    /// `false`
    pub reject_unpaired_surrogates: bool,

    /// Whether successful scalar conversions are memoized on the value.
    ///
    /// When enabled, the first successful string decode or numeric
    /// conversion of a given scalar is cached (shared across clones of the
    /// value), and repeat conversions return the cached result. Off by
    /// default to keep per-value overhead minimal for large documents where
    /// most values are visited once.
    ///
    /// # Default
    ///
    /// `false`
    pub cache_conversions: bool,
}
