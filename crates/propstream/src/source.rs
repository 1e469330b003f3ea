//! Raw input for the line reader.
//!
//! A [`Source`] is either a byte stream, where every byte is one Latin-1
//! code point, or a character stream that already yields UTF-16 code units.
//! The variant is fixed when the [`LineReader`](crate::LineReader) is built.

use std::{io, io::Read, str::EncodeUtf16};

use bstr::ByteSlice;

/// Units pulled from a source per refill.
pub(crate) const CHUNK_CAPACITY: usize = 8192;

/// A stream of UTF-16 code units.
///
/// This is the character-stream counterpart of [`std::io::Read`].
pub trait CharRead {
    /// Fill `buf` with up to `buf.len()` code units.
    ///
    /// # Return values
    /// 1. `Ok(0)` signals end-of-input (for a non-empty `buf`).
    /// 2. `Ok(n)` hands `n` units to the parser.
    /// 3. `Err` is passed as is to the caller.
    ///
    /// # Errors
    /// Presumably I/O errors.
    fn read_units(&mut self, buf: &mut [u16]) -> io::Result<usize>;
}

impl<T: CharRead + ?Sized> CharRead for &mut T {
    fn read_units(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        (**self).read_units(buf)
    }
}

impl<T: CharRead + ?Sized> CharRead for Box<T> {
    fn read_units(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        (**self).read_units(buf)
    }
}

/// Reading from a slice advances it, like `Read for &[u8]`.
impl CharRead for &[u16] {
    fn read_units(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        let n = buf.len().min(self.len());
        let (head, tail) = self.split_at(n);
        buf[..n].copy_from_slice(head);
        *self = tail;
        Ok(n)
    }
}

/// Character source over a string slice.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    units: EncodeUtf16<'a>,
}

impl<'a> StrSource<'a> {
    /// Wraps `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            units: text.encode_utf16(),
        }
    }
}

impl CharRead for StrSource<'_> {
    fn read_units(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        Ok(fill_from(&mut self.units, buf))
    }
}

/// Character source over UTF-8 bytes.
///
/// Invalid sequences decode to U+FFFD, as `bstr` does for
/// [`ByteSlice::chars`]. Use this when a file is known to be UTF-8; the plain
/// byte source always treats input as Latin-1.
#[derive(Debug, Clone)]
pub struct Utf8Source<'a> {
    chars: bstr::Chars<'a>,
    // Low half of a surrogate pair that did not fit the last buffer.
    pending: Option<u16>,
}

impl<'a> Utf8Source<'a> {
    /// Wraps `bytes`.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            chars: bytes.chars(),
            pending: None,
        }
    }
}

impl CharRead for Utf8Source<'_> {
    fn read_units(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        let mut n = 0;
        if !buf.is_empty() {
            if let Some(unit) = self.pending.take() {
                buf[n] = unit;
                n += 1;
            }
        }
        while n < buf.len() {
            let Some(ch) = self.chars.next() else {
                break;
            };
            let mut pair = [0u16; 2];
            let encoded = ch.encode_utf16(&mut pair);
            buf[n] = encoded[0];
            n += 1;
            if let Some(&low) = encoded.get(1) {
                if n < buf.len() {
                    buf[n] = low;
                    n += 1;
                } else {
                    self.pending = Some(low);
                }
            }
        }
        Ok(n)
    }
}

fn fill_from(units: &mut impl Iterator<Item = u16>, buf: &mut [u16]) -> usize {
    let mut n = 0;
    for (slot, unit) in buf.iter_mut().zip(units) {
        *slot = unit;
        n += 1;
    }
    n
}

/// The input bound to one [`LineReader`](crate::LineReader).
pub enum Source<'a> {
    /// Raw bytes, each zero-extended to a code point (ISO-8859-1). Never
    /// decoded as UTF-8.
    Bytes(Box<dyn Read + 'a>),
    /// UTF-16 code units, used as they are.
    Chars(Box<dyn CharRead + 'a>),
}

impl<'a> Source<'a> {
    /// Byte source.
    pub fn bytes(reader: impl Read + 'a) -> Self {
        Self::Bytes(Box::new(reader))
    }

    /// Character source.
    pub fn chars(reader: impl CharRead + 'a) -> Self {
        Self::Chars(Box::new(reader))
    }
}

impl core::fmt::Debug for Source<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bytes(_) => f.write_str("Source::Bytes"),
            Self::Chars(_) => f.write_str("Source::Chars"),
        }
    }
}

/// A source together with its chunk buffer and the unread window
/// `offset..limit`.
pub(crate) struct Input<'a> {
    kind: InputKind<'a>,
    offset: usize,
    limit: usize,
}

enum InputKind<'a> {
    Bytes {
        reader: Box<dyn Read + 'a>,
        buf: Box<[u8]>,
    },
    Chars {
        reader: Box<dyn CharRead + 'a>,
        buf: Box<[u16]>,
    },
}

impl<'a> Input<'a> {
    pub(crate) fn new(source: Source<'a>) -> Self {
        Self::with_capacity(source, CHUNK_CAPACITY)
    }

    pub(crate) fn with_capacity(source: Source<'a>, capacity: usize) -> Self {
        let kind = match source {
            Source::Bytes(reader) => InputKind::Bytes {
                reader,
                buf: vec![0; capacity].into_boxed_slice(),
            },
            Source::Chars(reader) => InputKind::Chars {
                reader,
                buf: vec![0; capacity].into_boxed_slice(),
            },
        };
        Self {
            kind,
            offset: 0,
            limit: 0,
        }
    }

    /// Next code unit, refilling the chunk when it runs dry. `None` at
    /// end-of-input.
    #[inline]
    pub(crate) fn next_unit(&mut self) -> io::Result<Option<u16>> {
        if !self.has_more()? {
            return Ok(None);
        }
        let unit = match &self.kind {
            // Equivalent to an ISO-8859-1 decoder.
            InputKind::Bytes { buf, .. } => u16::from(buf[self.offset]),
            InputKind::Chars { buf, .. } => buf[self.offset],
        };
        self.offset += 1;
        Ok(Some(unit))
    }

    /// Returns `true` if at least one unit is waiting, refilling the chunk if
    /// the current one is exhausted.
    pub(crate) fn has_more(&mut self) -> io::Result<bool> {
        if self.offset < self.limit {
            return Ok(true);
        }
        self.limit = self.refill()?;
        self.offset = 0;
        Ok(self.limit > 0)
    }

    fn refill(&mut self) -> io::Result<usize> {
        loop {
            let read = match &mut self.kind {
                InputKind::Bytes { reader, buf } => reader.read(buf),
                InputKind::Chars { reader, buf } => reader.read_units(buf),
            };
            match read {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                other => return other,
            }
        }
    }
}
