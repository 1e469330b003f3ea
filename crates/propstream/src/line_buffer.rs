//! Reusable storage for one logical line.
//!
//! The buffer holds UTF-16 code units. Its length is tracked by the caller
//! (`LineReader`), so the content past the last returned length is stale and
//! must not be read.

/// Capacity a fresh buffer starts with, in code units.
pub(crate) const INITIAL_CAPACITY: usize = 1024;

/// Upper bound for growth. Doubling past this clamps instead of overflowing.
const MAX_CAPACITY: usize = isize::MAX as usize / size_of::<u16>();

#[derive(Debug)]
pub(crate) struct LineBuffer {
    data: Box<[u16]>,
}

impl LineBuffer {
    pub(crate) fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity].into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Stores `unit` at `len`, growing when the slot does not exist yet.
    /// Returns the new length.
    #[inline]
    pub(crate) fn put(&mut self, len: usize, unit: u16) -> usize {
        if len == self.data.len() {
            self.grow();
        }
        self.data[len] = unit;
        len + 1
    }

    /// Doubles the capacity, clamping at [`MAX_CAPACITY`]. Existing content is
    /// copied over before returning.
    fn grow(&mut self) {
        let old = self.data.len();
        let new = next_capacity(old);
        log::trace!("growing line buffer from {old} to {new} units");
        let mut data = vec![0; new].into_boxed_slice();
        data[..old].copy_from_slice(&self.data);
        self.data = data;
    }

    #[inline]
    pub(crate) fn as_slice(&self, len: usize) -> &[u16] {
        &self.data[..len]
    }
}

fn next_capacity(current: usize) -> usize {
    current
        .checked_mul(2)
        .map_or(MAX_CAPACITY, |doubled| doubled.min(MAX_CAPACITY))
        .max(1)
}
