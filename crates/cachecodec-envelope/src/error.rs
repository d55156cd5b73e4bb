//! Error types for the envelope codec.

use thiserror::Error;

use crate::protocol::FieldType;

/// Errors that can occur while encoding or decoding an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// The input ended in the middle of a value.
    #[error("unexpected end of input: needed {needed} bytes, {available} available")]
    UnexpectedEof {
        /// Bytes the reader needed.
        needed: usize,
        /// Bytes that were left.
        available: usize,
    },

    /// A field header carried a type code this codec does not know.
    #[error("unknown field type code: {0:#04x}")]
    UnknownFieldType(u8),

    /// A known field id arrived with the wrong wire type.
    #[error("field {id} has type {actual:?}, expected {expected:?}")]
    FieldTypeMismatch {
        /// The field id.
        id: i16,
        /// The type the struct declares for it.
        expected: FieldType,
        /// The type found on the wire.
        actual: FieldType,
    },

    /// A required field was absent.
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),

    /// A length prefix was negative.
    #[error("negative length: {0}")]
    NegativeLength(i64),

    /// A length prefix exceeded the configured limit.
    #[error("length {len} exceeds the limit of {limit}")]
    LengthLimitExceeded {
        /// The length found on the wire.
        len: u64,
        /// The configured maximum.
        limit: usize,
    },

    /// A varint ran past the maximum width for its type.
    #[error("varint longer than {0} bytes")]
    VarintOverflow(usize),

    /// A well-formed varint held a value outside the target integer type.
    #[error("value {value} does not fit in {target}")]
    IntegerOutOfRange {
        /// The decoded value.
        value: i64,
        /// The integer type the field declares.
        target: &'static str,
    },

    /// A field id did not fit in an `i16`.
    #[error("field id {0} is out of range")]
    FieldIdOutOfRange(i64),

    /// Bytes were left after the envelope ended.
    #[error("trailing bytes: {0} bytes left after the envelope")]
    TrailingBytes(usize),

    /// A value could not be represented on the wire.
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Result type for envelope operations.
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;
