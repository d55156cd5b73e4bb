//! Wire protocol abstraction for structured envelopes.
//!
//! A protocol is chosen by passing a [`ProtocolFactory`] to
//! [`StructCodec::encode`](crate::StructCodec::encode) and
//! [`StructCodec::decode`](crate::StructCodec::decode). Struct
//! implementations only talk to the [`ProtocolWriter`] and
//! [`ProtocolReader`] traits, so the same struct code works with every
//! protocol.

use crate::error::EnvelopeResult;

/// Wire types a field may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// Length-delimited bytes.
    Binary,
}

/// Identifies the next field in a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldHeader {
    /// The field's wire type.
    pub field_type: FieldType,
    /// The field's id within its struct.
    pub id: i16,
}

/// Writes struct fields in one wire discipline.
pub trait ProtocolWriter {
    /// Marks the start of a struct.
    fn write_struct_begin(&mut self);

    /// Marks the end of a struct.
    fn write_struct_end(&mut self);

    /// Writes the header of the next field.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be represented.
    fn write_field_begin(&mut self, header: FieldHeader) -> EnvelopeResult<()>;

    /// Writes the marker that ends a struct's field list.
    fn write_field_stop(&mut self);

    /// Writes an `i32` field value.
    fn write_i32(&mut self, value: i32);

    /// Writes an `i64` field value.
    fn write_i64(&mut self, value: i64);

    /// Writes a binary field value.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is too long for the length prefix.
    fn write_binary(&mut self, value: &[u8]) -> EnvelopeResult<()>;

    /// Returns the bytes written so far.
    fn finish(self) -> Vec<u8>;
}

/// Reads struct fields in one wire discipline.
pub trait ProtocolReader {
    /// Consumes the start of a struct.
    fn read_struct_begin(&mut self);

    /// Consumes the end of a struct.
    fn read_struct_end(&mut self);

    /// Reads the next field header, or `None` at the end of the struct.
    ///
    /// # Errors
    ///
    /// Returns an error on truncated input or an unknown field type.
    fn read_field_begin(&mut self) -> EnvelopeResult<Option<FieldHeader>>;

    /// Reads an `i32` field value.
    ///
    /// # Errors
    ///
    /// Returns an error on truncated or malformed input.
    fn read_i32(&mut self) -> EnvelopeResult<i32>;

    /// Reads an `i64` field value.
    ///
    /// # Errors
    ///
    /// Returns an error on truncated or malformed input.
    fn read_i64(&mut self) -> EnvelopeResult<i64>;

    /// Reads a binary field value.
    ///
    /// # Errors
    ///
    /// Returns an error on truncated input or a bad length prefix.
    fn read_binary(&mut self) -> EnvelopeResult<Vec<u8>>;

    /// Reads and discards a value of `field_type`.
    ///
    /// # Errors
    ///
    /// Returns an error on truncated or malformed input.
    fn skip(&mut self, field_type: FieldType) -> EnvelopeResult<()> {
        match field_type {
            FieldType::I32 => self.read_i32().map(drop),
            FieldType::I64 => self.read_i64().map(drop),
            FieldType::Binary => self.read_binary().map(drop),
        }
    }

    /// Checks that the input was consumed completely.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::TrailingBytes`](crate::EnvelopeError::TrailingBytes)
    /// if input is left over.
    fn finish(self) -> EnvelopeResult<()>;
}

/// Selects a wire discipline by creating its writers and readers.
///
/// Factories are immutable and shared across threads.
pub trait ProtocolFactory: Send + Sync {
    /// The writer type for this protocol.
    type Writer: ProtocolWriter;

    /// The reader type for this protocol.
    type Reader<'a>: ProtocolReader;

    /// Short name of the protocol, for logs.
    fn name(&self) -> &'static str;

    /// Creates an empty writer.
    fn writer(&self) -> Self::Writer;

    /// Creates a reader over `bytes`.
    fn reader<'a>(&self, bytes: &'a [u8]) -> Self::Reader<'a>;
}

impl<P: ProtocolFactory> ProtocolFactory for &P {
    type Writer = P::Writer;
    type Reader<'a> = P::Reader<'a>;

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn writer(&self) -> Self::Writer {
        (**self).writer()
    }

    fn reader<'a>(&self, bytes: &'a [u8]) -> Self::Reader<'a> {
        (**self).reader(bytes)
    }
}
