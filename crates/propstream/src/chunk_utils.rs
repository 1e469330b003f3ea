//! Helpers for feeding input in pieces.
//!
//! Real sources rarely hand over a whole document in one read. These types
//! replay a payload through reads of chosen sizes so that chunk boundaries
//! can be placed anywhere, including between a CR and its LF or inside an
//! escape sequence.

use std::io::{self, Read};

use crate::CharRead;

/// Split `payload` into approximately equal-sized chunks.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks<T>(payload: &[T], parts: usize) -> Vec<&[T]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Read sizes replayed in a cycle. Zero sizes are bumped to one so a
/// chunked source never reports a false end-of-input.
#[derive(Debug, Clone)]
struct Sizes {
    sizes: Vec<usize>,
    next: usize,
}

impl Sizes {
    fn new(sizes: &[usize]) -> Self {
        let mut sizes: Vec<usize> = sizes.iter().map(|&s| s.max(1)).collect();
        if sizes.is_empty() {
            sizes.push(usize::MAX);
        }
        Self { sizes, next: 0 }
    }

    fn take(&mut self) -> usize {
        let size = self.sizes[self.next % self.sizes.len()];
        self.next += 1;
        size
    }
}

/// A byte source that returns at most `sizes[i]` bytes on its `i`-th read,
/// cycling through `sizes`.
#[derive(Debug, Clone)]
pub struct ChunkedReader<'a> {
    data: &'a [u8],
    sizes: Sizes,
}

impl<'a> ChunkedReader<'a> {
    /// Replays `data` through reads bounded by `sizes`. An empty `sizes`
    /// hands everything over in one read.
    #[must_use]
    pub fn new(data: &'a [u8], sizes: &[usize]) -> Self {
        Self {
            data,
            sizes: Sizes::new(sizes),
        }
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.sizes.take().min(buf.len()).min(self.data.len());
        let (head, tail) = self.data.split_at(n);
        buf[..n].copy_from_slice(head);
        self.data = tail;
        Ok(n)
    }
}

/// The [`CharRead`] counterpart of [`ChunkedReader`].
#[derive(Debug, Clone)]
pub struct ChunkedUnits {
    data: Vec<u16>,
    pos: usize,
    sizes: Sizes,
}

impl ChunkedUnits {
    /// Replays the UTF-16 encoding of `text` through reads bounded by
    /// `sizes`.
    #[must_use]
    pub fn new(text: &str, sizes: &[usize]) -> Self {
        Self {
            data: text.encode_utf16().collect(),
            pos: 0,
            sizes: Sizes::new(sizes),
        }
    }
}

impl CharRead for ChunkedUnits {
    fn read_units(&mut self, buf: &mut [u16]) -> io::Result<usize> {
        let n = self
            .sizes
            .take()
            .min(buf.len())
            .min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}
