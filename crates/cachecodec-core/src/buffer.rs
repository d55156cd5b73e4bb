//! Shared, reference-counted byte buffers.
//!
//! [`SharedBuffer`] is the borrowed-buffer side of the I/O boundary: cheap
//! to clone and slice, never mutated in place while shared. Converting it
//! to owned [`Bytes`](crate::Bytes) always copies, and wrapping owned bytes
//! in a buffer never does.

use std::ops::Range;
use std::sync::Arc;

/// A reference-counted, sliceable byte buffer.
///
/// Holds an `Arc<Vec<u8>>` plus a `(start, len)` view. Clones and slices
/// share storage. [`SharedBuffer::make_mut`] detaches the view from other
/// handles before handing out a mutable slice.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    data: Arc<Vec<u8>>,
    start: usize,
    len: usize,
}

impl SharedBuffer {
    /// Wraps `vec` without copying it.
    #[must_use]
    pub fn from_vec(vec: Vec<u8>) -> Self {
        let len = vec.len();
        Self { data: Arc::new(vec), start: 0, len }
    }

    /// Creates a buffer holding a copy of `bytes`.
    #[must_use]
    pub fn copy_from_slice(bytes: &[u8]) -> Self {
        Self::from_vec(bytes.to_vec())
    }

    /// Returns a zero-copy view of `range` within this buffer.
    ///
    /// Returns `None` if the range is out of bounds or reversed.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Option<Self> {
        if range.start > range.end || range.end > self.len {
            return None;
        }
        Some(Self {
            data: Arc::clone(&self.data),
            start: self.start + range.start,
            len: range.end - range.start,
        })
    }

    /// Returns the current view as a byte slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.start..self.start + self.len]
    }

    /// Returns the length of the current view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when no other handle shares this buffer's storage.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.data) == 1
    }

    /// Copies the current view into a new owned vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    /// Returns a mutable slice of the view, copying it first if shared.
    ///
    /// Writes through the returned slice are never visible to other
    /// handles or to bytes previously copied out of this buffer.
    pub fn make_mut(&mut self) -> &mut [u8] {
        if Arc::get_mut(&mut self.data).is_none() {
            self.data = Arc::new(self.as_slice().to_vec());
            self.start = 0;
        }
        let (start, end) = (self.start, self.start + self.len);
        &mut Arc::make_mut(&mut self.data)[start..end]
    }
}

impl PartialEq for SharedBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for SharedBuffer {}

impl From<Vec<u8>> for SharedBuffer {
    fn from(vec: Vec<u8>) -> Self {
        Self::from_vec(vec)
    }
}

impl From<&[u8]> for SharedBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::copy_from_slice(bytes)
    }
}

impl AsRef<[u8]> for SharedBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
