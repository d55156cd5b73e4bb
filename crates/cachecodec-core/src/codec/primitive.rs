//! Serializers for scalar values.
//!
//! # Format
//!
//! - `()`: empty byte sequence
//! - `i32`: 4 bytes, big-endian
//! - `i64`: 8 bytes, big-endian
//! - `String`: UTF-8 bytes, no length prefix
//! - `Timestamp`: nanoseconds since the epoch as an `i64`
//! - `Bytes` / `SharedBuffer`: the raw bytes
//!
//! Fixed-width decoders accept exactly their width: shorter input is a
//! buffer underrun, longer input is trailing bytes.

use crate::buffer::SharedBuffer;
use crate::error::{CodecResult, DecodeError};
use crate::serializer::Bytes;
use crate::time::Timestamp;
use crate::transformer::{AndThen, Fallible, Identity, Pure};

use super::reader::ByteReader;

/// Serializer for the unit type.
pub type UnitSerializer = Fallible<(), Bytes>;
/// Serializer for big-endian `i32`.
pub type I32Serializer = Fallible<i32, Bytes>;
/// Serializer for big-endian `i64`.
pub type I64Serializer = Fallible<i64, Bytes>;
/// Serializer for UTF-8 text.
pub type Utf8Serializer = Fallible<String, Bytes>;
/// Serializer for timestamps.
pub type TimestampSerializer = AndThen<Pure<Timestamp, i64>, I64Serializer, i64>;

/// `()` as an empty byte sequence.
pub const UNIT: UnitSerializer = Fallible::new(unit_to_bytes, unit_from_bytes);

/// `i32` as 4 big-endian bytes.
pub const I32: I32Serializer = Fallible::new(i32_to_bytes, i32_from_bytes);

/// `i64` as 8 big-endian bytes.
pub const I64: I64Serializer = Fallible::new(i64_to_bytes, i64_from_bytes);

/// `String` as its UTF-8 bytes.
pub const UTF8: Utf8Serializer = Fallible::new(utf8_to_bytes, utf8_from_bytes);

/// Owned bytes, unchanged.
pub const BYTES: Identity<Bytes> = Identity::new();

/// A shared buffer as owned bytes.
///
/// `to` copies the buffer's view; `from` wraps the bytes without copying.
pub const SHARED_BUFFER: Pure<SharedBuffer, Bytes> = Pure::new(buffer_to_bytes, SharedBuffer::from_vec);

/// A timestamp and its nanosecond count.
pub const TIMESTAMP_NANOS: Pure<Timestamp, i64> = Pure::new(Timestamp::as_nanos, Timestamp::from_nanos);

/// A timestamp as 8 big-endian bytes of nanoseconds since the epoch.
pub const TIMESTAMP: TimestampSerializer = AndThen::new(TIMESTAMP_NANOS, I64);

#[allow(clippy::unnecessary_wraps)]
fn unit_to_bytes((): ()) -> CodecResult<Bytes> {
    Ok(Vec::new())
}

fn unit_from_bytes(bytes: Bytes) -> CodecResult<()> {
    Ok(ByteReader::new(&bytes).finish()?)
}

#[allow(clippy::unnecessary_wraps)]
fn i32_to_bytes(value: i32) -> CodecResult<Bytes> {
    Ok(value.to_be_bytes().to_vec())
}

fn i32_from_bytes(bytes: Bytes) -> CodecResult<i32> {
    let mut reader = ByteReader::new(&bytes);
    let value = reader.read_i32()?;
    reader.finish()?;
    Ok(value)
}

#[allow(clippy::unnecessary_wraps)]
fn i64_to_bytes(value: i64) -> CodecResult<Bytes> {
    Ok(value.to_be_bytes().to_vec())
}

fn i64_from_bytes(bytes: Bytes) -> CodecResult<i64> {
    let mut reader = ByteReader::new(&bytes);
    let value = reader.read_i64()?;
    reader.finish()?;
    Ok(value)
}

#[allow(clippy::unnecessary_wraps)]
fn utf8_to_bytes(value: String) -> CodecResult<Bytes> {
    Ok(value.into_bytes())
}

fn utf8_from_bytes(bytes: Bytes) -> CodecResult<String> {
    String::from_utf8(bytes).map_err(|e| DecodeError::InvalidUtf8(e.to_string()).into())
}

// Takes the buffer by value to fit `Pure`, but only ever reads from it.
#[allow(clippy::needless_pass_by_value)]
fn buffer_to_bytes(buffer: SharedBuffer) -> Bytes {
    buffer.to_vec()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use crate::serializer::Serializer;

    #[test]
    fn unit_is_empty() {
        assert!(UNIT.to(()).unwrap().is_empty());
        UNIT.from(Vec::new()).unwrap();
        assert_eq!(
            UNIT.from(vec![0]).unwrap_err(),
            CodecError::Decode(DecodeError::TrailingBytes { remaining: 1 })
        );
    }

    #[test]
    fn i32_is_four_bytes_big_endian() {
        assert_eq!(I32.to(1).unwrap(), vec![0, 0, 0, 1]);
        assert_eq!(I32.to(-2).unwrap(), vec![0xFF, 0xFF, 0xFF, 0xFE]);
        for value in [0, 1, -1, i32::MIN, i32::MAX] {
            assert_eq!(I32.from(I32.to(value).unwrap()).unwrap(), value);
        }
    }

    #[test]
    fn i64_is_eight_bytes_big_endian() {
        assert_eq!(I64.to(258).unwrap(), vec![0, 0, 0, 0, 0, 0, 1, 2]);
        for value in [0, 1, -1, i64::MIN, i64::MAX] {
            assert_eq!(I64.from(I64.to(value).unwrap()).unwrap(), value);
        }
    }

    #[test]
    fn truncated_integers_underrun() {
        for len in 0..4 {
            let err = I32.from(vec![0; len]).unwrap_err();
            assert_eq!(
                err,
                CodecError::Decode(DecodeError::BufferUnderrun { needed: 4, available: len })
            );
        }
        for len in 0..8 {
            let err = I64.from(vec![0; len]).unwrap_err();
            assert_eq!(
                err,
                CodecError::Decode(DecodeError::BufferUnderrun { needed: 8, available: len })
            );
        }
    }

    #[test]
    fn oversized_integers_are_rejected() {
        let err = I32.from(vec![0; 5]).unwrap_err();
        assert_eq!(err, CodecError::Decode(DecodeError::TrailingBytes { remaining: 1 }));
    }

    #[test]
    fn utf8_has_no_length_prefix() {
        let bytes = UTF8.to("ok".to_owned()).unwrap();
        assert_eq!(bytes, b"ok".to_vec());
        assert_eq!(UTF8.from(bytes).unwrap(), "ok");
        assert_eq!(UTF8.to(String::new()).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let err = UTF8.from(vec![0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, CodecError::Decode(DecodeError::InvalidUtf8(_))));
    }

    #[test]
    fn timestamp_is_eight_bytes_of_nanos() {
        let ts = Timestamp::from_nanos(1_000_000_007);
        let bytes = TIMESTAMP.to(ts).unwrap();
        assert_eq!(bytes, 1_000_000_007i64.to_be_bytes().to_vec());
        assert_eq!(TIMESTAMP.from(bytes).unwrap(), ts);
    }

    #[test]
    fn truncated_timestamp_fails_in_integer_stage() {
        let err = TIMESTAMP.from(vec![0; 4]).unwrap_err();
        assert_eq!(err.stage_path(), vec![1]);
        assert_eq!(err.as_decode(), Some(&DecodeError::BufferUnderrun { needed: 8, available: 4 }));
    }

    #[test]
    fn shared_buffer_copies_on_read_and_wraps_on_write() {
        let buffer = SharedBuffer::from_vec(vec![1, 2, 3, 4]).slice(1..3).unwrap();
        let bytes = SHARED_BUFFER.to(buffer.clone()).unwrap();
        assert_eq!(bytes, vec![2, 3]);

        let wrapped = SHARED_BUFFER.from(vec![9, 8]).unwrap();
        assert!(wrapped.is_unique());
        assert_eq!(wrapped.as_slice(), &[9, 8]);
    }

    #[test]
    fn bytes_pass_through() {
        assert_eq!(BYTES.to(vec![1, 2]).unwrap(), vec![1, 2]);
        assert_eq!(BYTES.from(vec![]).unwrap(), Vec::<u8>::new());
    }
}
