//! Transformers whose representation side is a byte sequence.

use crate::error::CodecResult;
use crate::transformer::Transformer;

/// Owned byte sequence exchanged at every serializer boundary.
pub type Bytes = Vec<u8>;

/// A [`Transformer`] from `T` to [`Bytes`].
///
/// Every `Transformer<T, Bytes>` is a serializer; this trait only gives
/// the two directions their cache-facing names.
///
/// # Round-trip law
///
/// If `to(v)` succeeds with bytes `b`, then `from(b)` succeeds and returns
/// a value equal to `v`.
pub trait Serializer<T>: Transformer<T, Bytes> {
    /// Encodes `value` into bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be represented.
    fn to(&self, value: T) -> CodecResult<Bytes> {
        self.forward(value)
    }

    /// Decodes a value from `bytes`.
    ///
    /// # Errors
    ///
    /// Returns a decode error if `bytes` is malformed or truncated.
    fn from(&self, bytes: Bytes) -> CodecResult<T> {
        self.backward(bytes)
    }
}

impl<T, S> Serializer<T> for S where S: Transformer<T, Bytes> + ?Sized {}
