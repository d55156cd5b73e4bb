//! Byte-level helpers shared by the protocol implementations.

use crate::error::{EnvelopeError, EnvelopeResult};

/// Maximum encoded width of a 32-bit varint.
pub(crate) const MAX_VARINT32_LEN: usize = 5;
/// Maximum encoded width of a 64-bit varint.
pub(crate) const MAX_VARINT64_LEN: usize = 10;

/// Bounds-checked read position over an input slice.
#[derive(Debug)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub(crate) fn take(&mut self, len: usize) -> EnvelopeResult<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(EnvelopeError::UnexpectedEof { needed: len, available });
        }
        let start = self.position;
        self.position += len;
        Ok(&self.bytes[start..self.position])
    }

    pub(crate) fn read_u8(&mut self) -> EnvelopeResult<u8> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> EnvelopeResult<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }

    /// Reads an unsigned LEB128 varint of at most `max_len` bytes.
    pub(crate) fn read_varint(&mut self, max_len: usize) -> EnvelopeResult<u64> {
        let mut result = 0u64;
        for index in 0..max_len {
            let byte = self.read_u8()?;
            let bits = u64::from(byte & 0x7F);
            let shift = 7 * index;
            if (bits << shift) >> shift != bits {
                return Err(EnvelopeError::VarintOverflow(max_len));
            }
            result |= bits << shift;
            if byte & 0x80 == 0 {
                return Ok(result);
            }
        }
        Err(EnvelopeError::VarintOverflow(max_len))
    }

    pub(crate) fn finish(&self) -> EnvelopeResult<()> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(EnvelopeError::TrailingBytes(remaining)),
        }
    }
}

/// Appends `value` as an unsigned LEB128 varint.
pub(crate) fn write_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

/// Maps signed integers onto unsigned ones so small magnitudes stay small.
pub(crate) const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
pub(crate) const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Validates a decoded length against the protocol's limit.
pub(crate) fn check_length(len: u64, limit: usize) -> EnvelopeResult<usize> {
    match usize::try_from(len) {
        Ok(len) if len <= limit => Ok(len),
        _ => Err(EnvelopeError::LengthLimitExceeded { len, limit }),
    }
}

/// Rejects a binary field the matching reader would refuse.
pub(crate) fn check_write_length(len: usize, limit: usize) -> EnvelopeResult<()> {
    if len > limit {
        return Err(EnvelopeError::Encoding(format!(
            "binary field of {len} bytes exceeds the limit of {limit}"
        )));
    }
    Ok(())
}
