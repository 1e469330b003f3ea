//! A streaming parser for `.properties` configuration text.
//!
//! The format is line-oriented: `#` and `!` start comments, keys are split
//! from values by `=`, `:` or whitespace, a trailing backslash continues a
//! line, and `\uXXXX`, `\t`, `\n`, `\r`, `\f` escapes are decoded.
//!
//! ```rust
//! use propstream::parse_bytes_to_map;
//!
//! let map = parse_bytes_to_map(b"# comment\nkey1 = value1\nkey2:value2\\\n  continued\n").unwrap();
//! assert_eq!(map["key1"], "value1");
//! assert_eq!(map["key2"], "value2continued");
//! ```
//!
//! Byte input is always read as ISO-8859-1, one byte per character. Use a
//! character source ([`StrSource`], [`Utf8Source`] or your own [`CharRead`])
//! for text in any other encoding.

pub mod chunk_utils;
mod entry;
mod error;
mod escape;
mod line_buffer;
mod line_reader;
mod options;
mod properties;
mod sink;
mod source;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

pub use entry::{Entries, Entry, load_into};
pub use error::{ErrorSource, ParserError, SyntaxError};
pub use line_reader::LineReader;
pub use options::{DecodeMode, ParserOptions};
pub use properties::Properties;
pub use sink::PropertySink;
pub use source::{CharRead, Source, StrSource, Utf8Source};

/// Parses ISO-8859-1 bytes into a map.
///
/// # Errors
/// Malformed escapes.
pub fn parse_bytes_to_map(bytes: &[u8]) -> Result<HashMap<String, String>, ParserError> {
    let mut map = HashMap::new();
    load_into(&mut map, LineReader::from_bytes(bytes), ParserOptions::default())?;
    Ok(map)
}

/// Parses a string into a map.
///
/// # Errors
/// Malformed escapes.
pub fn parse_str_to_map(text: &str) -> Result<HashMap<String, String>, ParserError> {
    let mut map = HashMap::new();
    load_into(
        &mut map,
        LineReader::from_chars(StrSource::new(text)),
        ParserOptions::default(),
    )?;
    Ok(map)
}
