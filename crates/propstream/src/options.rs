/// Configuration options for loading `.properties` text.
///
/// # Examples
///
/// ```rust
/// use propstream::{DecodeMode, ParserOptions, Properties};
///
/// let options = ParserOptions {
///     decode_mode: DecodeMode::Strict,
///     ..Default::default()
/// };
/// let mut props = Properties::with_options(options);
/// props.load_str("greeting = hello").unwrap();
/// assert_eq!(props.get("greeting"), Some("hello"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// How decoded keys and values that are not valid UTF-16 are turned into
    /// Rust strings.
    ///
    /// # Default
    ///
    /// [`DecodeMode::ReplaceInvalid`]
    pub decode_mode: DecodeMode,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on syntax errors instead of returning them.
    ///
    /// Enabled only in test builds to produce backtraces on parse failures.
    pub panic_on_error: bool,
}

/// Handling of unpaired surrogates produced by `\uXXXX` escapes.
///
/// A `\uD83D\uDE00` pair always decodes to a single scalar value. A lone
/// `\uD800` has no `String` representation, so it must be replaced or
/// rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Substitute U+FFFD for every unpaired surrogate.
    #[default]
    ReplaceInvalid,
    /// Fail the load with [`SyntaxError::UnpairedSurrogate`](crate::SyntaxError::UnpairedSurrogate).
    Strict,
}
