//! Key/value splitting and the entry stream.

use crate::{
    LineReader, ParserError, ParserOptions, PropertySink,
    escape::{decode_units, load_convert},
    line_reader::{BACKSLASH, is_whitespace},
};

/// One decoded `key = value` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    /// Decoded key.
    pub key: String,
    /// Decoded value, empty when the line had none.
    pub value: String,
}

/// Where the key ends and the value begins inside one logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Split {
    pub(crate) key_len: usize,
    pub(crate) value_start: usize,
}

#[inline]
fn is_separator(unit: u16) -> bool {
    unit == u16::from(b'=') || unit == u16::from(b':')
}

/// Locates the key/value boundary.
///
/// The key ends at the first unescaped `=`, `:` or whitespace. Whitespace
/// after it is skipped, along with at most one `=` or `:` when the key was
/// ended by whitespace.
pub(crate) fn split_line(line: &[u16]) -> Split {
    let limit = line.len();
    let mut key_len = 0;
    let mut value_start = limit;
    let mut has_separator = false;
    let mut preceding_backslash = false;

    while key_len < limit {
        let c = line[key_len];
        // need to check if escaped
        if is_separator(c) && !preceding_backslash {
            value_start = key_len + 1;
            has_separator = true;
            break;
        } else if is_whitespace(c) && !preceding_backslash {
            value_start = key_len + 1;
            break;
        }
        preceding_backslash = c == BACKSLASH && !preceding_backslash;
        key_len += 1;
    }

    while value_start < limit {
        let c = line[value_start];
        if !is_whitespace(c) {
            if !has_separator && is_separator(c) {
                has_separator = true;
            } else {
                break;
            }
        }
        value_start += 1;
    }

    Split {
        key_len,
        value_start,
    }
}

impl Entry {
    /// Splits and decodes one logical line. `scratch` is reused between
    /// calls to avoid reallocating.
    pub(crate) fn decode(
        line: &[u16],
        options: ParserOptions,
        scratch: &mut Vec<u16>,
    ) -> Result<Self, crate::SyntaxError> {
        let split = split_line(line);

        scratch.clear();
        load_convert(&line[..split.key_len], scratch)?;
        let key = decode_units(scratch, options.decode_mode)?;

        scratch.clear();
        load_convert(&line[split.value_start..], scratch)?;
        let value = decode_units(scratch, options.decode_mode)?;

        Ok(Self { key, value })
    }
}

/// Decoded entries of a [`LineReader`], in source order.
///
/// Iteration stops after the first error.
///
/// # Examples
///
/// ```rust
/// use propstream::{Entries, LineReader, ParserOptions};
///
/// let reader = LineReader::from_bytes(&b"a=1\nb:2\n"[..]);
/// let keys: Vec<_> = Entries::new(reader, ParserOptions::default())
///     .map(|entry| entry.unwrap().key)
///     .collect();
/// assert_eq!(keys, ["a", "b"]);
/// ```
#[derive(Debug)]
pub struct Entries<'a> {
    reader: LineReader<'a>,
    options: ParserOptions,
    scratch: Vec<u16>,
    done: bool,
}

impl<'a> Entries<'a> {
    /// Iterates the entries of `reader`.
    #[must_use]
    pub fn new(reader: LineReader<'a>, options: ParserOptions) -> Self {
        Self {
            reader,
            options,
            scratch: Vec::new(),
            done: false,
        }
    }

    /// Gives the reader back, positioned after the last consumed line.
    #[must_use]
    pub fn into_reader(self) -> LineReader<'a> {
        self.reader
    }

    fn next_entry(&mut self) -> Result<Option<Entry>, ParserError> {
        loop {
            let Some(len) = self.reader.read_line()? else {
                return Ok(None);
            };
            if len == 0 {
                continue;
            }
            let line = self.reader.line(len);
            log::trace!(
                "line {}: {:?}",
                self.reader.start_line(),
                String::from_utf16_lossy(line)
            );
            return Entry::decode(line, self.options, &mut self.scratch)
                .map(Some)
                .map_err(|e| {
                    #[cfg(any(test, feature = "fuzzing"))]
                    if self.options.panic_on_error {
                        panic!("{e} at line {}", self.reader.start_line());
                    }
                    ParserError::new(e, self.reader.start_line())
                });
        }
    }
}

impl Iterator for Entries<'_> {
    type Item = Result<Entry, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.next_entry().transpose();
        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }
        next
    }
}

impl core::iter::FusedIterator for Entries<'_> {}

/// Reads every entry of `reader` into `sink`, returning how many entries
/// were stored.
///
/// Entries stored before an error stay in `sink`.
///
/// # Errors
/// The first I/O or syntax error.
pub fn load_into<S: PropertySink + ?Sized>(
    sink: &mut S,
    reader: LineReader<'_>,
    options: ParserOptions,
) -> Result<usize, ParserError> {
    log::debug!("loading properties with {options:?}");
    let mut count = 0;
    for entry in Entries::new(reader, options) {
        let Entry { key, value } = entry?;
        sink.put(key, value);
        count += 1;
    }
    log::debug!("loaded {count} properties");
    Ok(count)
}
