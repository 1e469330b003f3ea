//! Logical line assembly.
//!
//! Overview
//! - [`LineReader`] pulls code units from its [`Source`] one at a time and
//!   hands back one *logical line* per [`LineReader::read_line`] call.
//! - Comments (`#` or `!` as the first non-whitespace unit) and blank lines
//!   never reach the caller.
//! - Leading space, tab and form feed are trimmed.
//! - A physical line ending in an odd number of backslashes continues on the
//!   next physical line; the backslash is dropped and the continuation's
//!   leading whitespace is trimmed.
//! - CR, LF and CRLF all end a physical line.
//!
//! The returned line still holds every escape sequence verbatim; decoding is
//! the job of the entry parser.

use std::io::Read;

use crate::{
    CharRead, ParserError,
    error::ErrorSource,
    line_buffer::LineBuffer,
    source::{Input, Source},
};

pub(crate) const CR: u16 = b'\r' as u16;
pub(crate) const LF: u16 = b'\n' as u16;
pub(crate) const BACKSLASH: u16 = b'\\' as u16;

/// Space, tab or form feed. Line terminators are not whitespace here.
#[inline]
pub(crate) fn is_whitespace(unit: u16) -> bool {
    matches!(unit, 0x20 | 0x09 | 0x0C)
}

#[inline]
fn is_terminator(unit: u16) -> bool {
    unit == CR || unit == LF
}

#[inline]
fn is_comment_start(unit: u16) -> bool {
    unit == u16::from(b'#') || unit == u16::from(b'!')
}

/// Splits a source into logical lines.
///
/// # Examples
///
/// ```rust
/// use propstream::LineReader;
///
/// let mut reader = LineReader::from_bytes(&b"# skipped\n  a = 1 \\\n    2\n"[..]);
/// let len = reader.read_line().unwrap().unwrap();
/// assert_eq!(String::from_utf16_lossy(reader.line(len)), "a = 1 2");
/// assert_eq!(reader.read_line().unwrap(), None);
/// ```
pub struct LineReader<'a> {
    input: Input<'a>,
    buffer: LineBuffer,
    /// Physical line terminators consumed so far. CRLF counts once.
    terminators: usize,
    last_was_cr: bool,
    /// Physical line (1-based) where the last returned logical line began.
    start_line: usize,
}

impl<'a> LineReader<'a> {
    /// Binds `source` for the lifetime of the reader.
    #[must_use]
    pub fn new(source: Source<'a>) -> Self {
        Self::from_input(Input::new(source))
    }

    /// Reader over raw bytes decoded as ISO-8859-1.
    #[must_use]
    pub fn from_bytes(reader: impl Read + 'a) -> Self {
        Self::new(Source::bytes(reader))
    }

    /// Reader over UTF-16 code units.
    #[must_use]
    pub fn from_chars(reader: impl CharRead + 'a) -> Self {
        Self::new(Source::chars(reader))
    }

    /// Builds a reader from whichever source is present. The byte source
    /// wins when both are.
    ///
    /// # Errors
    /// [`ErrorSource::MissingSource`] when both are `None`. Nothing is read
    /// in that case.
    pub fn from_parts(
        bytes: Option<Box<dyn Read + 'a>>,
        chars: Option<Box<dyn CharRead + 'a>>,
    ) -> Result<Self, ParserError> {
        match (bytes, chars) {
            (Some(bytes), _) => Ok(Self::new(Source::Bytes(bytes))),
            (None, Some(chars)) => Ok(Self::new(Source::Chars(chars))),
            (None, None) => Err(ParserError::new(ErrorSource::MissingSource, 0)),
        }
    }

    pub(crate) fn from_input(input: Input<'a>) -> Self {
        Self {
            input,
            buffer: LineBuffer::new(),
            terminators: 0,
            last_was_cr: false,
            start_line: 0,
        }
    }

    /// The first `len` units of the line buffer, as returned by the last
    /// [`read_line`](Self::read_line).
    ///
    /// # Panics
    /// If `len` is larger than the buffer.
    #[must_use]
    pub fn line(&self, len: usize) -> &[u16] {
        self.buffer.as_slice(len)
    }

    /// Physical line (1-based) on which the last returned logical line began.
    #[must_use]
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Physical line the reader is currently positioned on.
    #[must_use]
    pub fn current_line(&self) -> usize {
        self.terminators + 1
    }

    fn next_unit(&mut self) -> Result<Option<u16>, ParserError> {
        let unit = self
            .input
            .next_unit()
            .map_err(|e| ParserError::new(e, self.current_line()))?;
        if let Some(unit) = unit {
            if unit == CR || (unit == LF && !self.last_was_cr) {
                self.terminators += 1;
            }
            self.last_was_cr = unit == CR;
        }
        Ok(unit)
    }

    fn has_more(&mut self) -> Result<bool, ParserError> {
        self.input
            .has_more()
            .map_err(|e| ParserError::new(e, self.current_line()))
    }

    /// Reads the next logical line into the internal buffer.
    ///
    /// Returns `Ok(None)` once the source is exhausted, or `Ok(Some(len))`
    /// where `len` units of [`line`](Self::line) hold the logical line.
    ///
    /// # Errors
    /// Only I/O errors from the source.
    pub fn read_line(&mut self) -> Result<Option<usize>, ParserError> {
        let mut len = 0;
        let mut is_new_line = true;
        let mut skip_whitespace = true;
        let mut is_comment_line = false;
        let mut appended_line_begin = false;
        let mut preceding_backslash = false;
        let mut skip_lf = false;

        loop {
            let Some(c) = self.next_unit()? else {
                if len == 0 || is_comment_line {
                    return Ok(None);
                }
                if preceding_backslash {
                    len -= 1;
                }
                return Ok(Some(len));
            };

            if skip_lf {
                skip_lf = false;
                if c == LF {
                    continue;
                }
            }

            if skip_whitespace {
                if is_whitespace(c) {
                    continue;
                }
                if !appended_line_begin && is_terminator(c) {
                    continue;
                }
                skip_whitespace = false;
                appended_line_begin = false;
            }

            if is_new_line {
                is_new_line = false;
                self.start_line = self.current_line();
                if is_comment_start(c) {
                    is_comment_line = true;
                    continue;
                }
            }

            if !is_terminator(c) {
                if is_comment_line {
                    continue;
                }
                len = self.buffer.put(len, c);
                // flip on backslash, so `\\` cancels out
                preceding_backslash = c == BACKSLASH && !preceding_backslash;
                continue;
            }

            // reached EOL
            if is_comment_line || len == 0 {
                is_comment_line = false;
                is_new_line = true;
                skip_whitespace = true;
                preceding_backslash = false;
                len = 0;
                continue;
            }

            if !self.has_more()? {
                if preceding_backslash {
                    len -= 1;
                }
                return Ok(Some(len));
            }

            if !preceding_backslash {
                return Ok(Some(len));
            }

            len -= 1;
            // trim the leading whitespace of the continuation
            skip_whitespace = true;
            appended_line_begin = true;
            preceding_backslash = false;
            if c == CR {
                skip_lf = true;
            }
        }
    }
}

impl core::fmt::Debug for LineReader<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LineReader")
            .field("capacity", &self.buffer.capacity())
            .field("line", &self.current_line())
            .finish_non_exhaustive()
    }
}
