//! The binary protocol: fixed-width, big-endian fields.
//!
//! # Format
//!
//! - Field header: 1 byte type code + 2 bytes field id (big-endian `i16`)
//! - Field stop: `0x00`
//! - `i32`: 4 bytes big-endian
//! - `i64`: 8 bytes big-endian
//! - Binary: 4 bytes big-endian `i32` length + bytes
//!
//! Type codes: `i32` = 8, `i64` = 10, binary = 11.

use serde::{Deserialize, Serialize};

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::protocol::{FieldHeader, FieldType, ProtocolFactory, ProtocolReader, ProtocolWriter};
use crate::wire::{check_length, check_write_length, Cursor};
use crate::DEFAULT_MAX_BINARY_LEN;

/// Type codes used by the binary protocol.
mod codes {
    pub const STOP: u8 = 0x00;
    pub const I32: u8 = 0x08;
    pub const I64: u8 = 0x0A;
    pub const BINARY: u8 = 0x0B;
}

const fn type_code(field_type: FieldType) -> u8 {
    match field_type {
        FieldType::I32 => codes::I32,
        FieldType::I64 => codes::I64,
        FieldType::Binary => codes::BINARY,
    }
}

/// Selects the binary protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryProtocol {
    /// Longest binary field a reader will accept (default: 64MiB).
    pub max_binary_len: usize,
}

impl BinaryProtocol {
    /// The binary protocol with default limits.
    #[must_use]
    pub const fn new() -> Self {
        Self { max_binary_len: DEFAULT_MAX_BINARY_LEN }
    }

    /// Sets the longest binary field a reader will accept.
    #[must_use]
    pub const fn with_max_binary_len(mut self, max_binary_len: usize) -> Self {
        self.max_binary_len = max_binary_len;
        self
    }
}

impl Default for BinaryProtocol {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolFactory for BinaryProtocol {
    type Writer = BinaryWriter;
    type Reader<'a> = BinaryReader<'a>;

    fn name(&self) -> &'static str {
        "binary"
    }

    fn writer(&self) -> BinaryWriter {
        BinaryWriter { buf: Vec::new(), max_binary_len: self.max_binary_len }
    }

    fn reader<'a>(&self, bytes: &'a [u8]) -> BinaryReader<'a> {
        BinaryReader { cursor: Cursor::new(bytes), max_binary_len: self.max_binary_len }
    }
}

/// Writer for the binary protocol.
#[derive(Debug)]
pub struct BinaryWriter {
    buf: Vec<u8>,
    max_binary_len: usize,
}

impl ProtocolWriter for BinaryWriter {
    fn write_struct_begin(&mut self) {}

    fn write_struct_end(&mut self) {}

    fn write_field_begin(&mut self, header: FieldHeader) -> EnvelopeResult<()> {
        self.buf.push(type_code(header.field_type));
        self.buf.extend_from_slice(&header.id.to_be_bytes());
        Ok(())
    }

    fn write_field_stop(&mut self) {
        self.buf.push(codes::STOP);
    }

    fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    fn write_binary(&mut self, value: &[u8]) -> EnvelopeResult<()> {
        check_write_length(value.len(), self.max_binary_len)?;
        let len = i32::try_from(value.len())
            .map_err(|_| EnvelopeError::Encoding("binary field too long".to_owned()))?;
        self.buf.extend_from_slice(&len.to_be_bytes());
        self.buf.extend_from_slice(value);
        Ok(())
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Reader for the binary protocol.
#[derive(Debug)]
pub struct BinaryReader<'a> {
    cursor: Cursor<'a>,
    max_binary_len: usize,
}

impl ProtocolReader for BinaryReader<'_> {
    fn read_struct_begin(&mut self) {}

    fn read_struct_end(&mut self) {}

    fn read_field_begin(&mut self) -> EnvelopeResult<Option<FieldHeader>> {
        let field_type = match self.cursor.read_u8()? {
            codes::STOP => return Ok(None),
            codes::I32 => FieldType::I32,
            codes::I64 => FieldType::I64,
            codes::BINARY => FieldType::Binary,
            other => return Err(EnvelopeError::UnknownFieldType(other)),
        };
        let id = i16::from_be_bytes(self.cursor.read_array()?);
        Ok(Some(FieldHeader { field_type, id }))
    }

    fn read_i32(&mut self) -> EnvelopeResult<i32> {
        self.cursor.read_array().map(i32::from_be_bytes)
    }

    fn read_i64(&mut self) -> EnvelopeResult<i64> {
        self.cursor.read_array().map(i64::from_be_bytes)
    }

    fn read_binary(&mut self) -> EnvelopeResult<Vec<u8>> {
        let len = self.read_i32()?;
        let len = u64::try_from(len).map_err(|_| EnvelopeError::NegativeLength(i64::from(len)))?;
        let len = check_length(len, self.max_binary_len)?;
        Ok(self.cursor.take(len)?.to_vec())
    }

    fn finish(self) -> EnvelopeResult<()> {
        self.cursor.finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn field_layout() {
        let mut writer = BinaryProtocol::new().writer();
        writer.write_struct_begin();
        writer.write_field_begin(FieldHeader { field_type: FieldType::Binary, id: 1 }).unwrap();
        writer.write_binary(b"ok").unwrap();
        writer.write_field_begin(FieldHeader { field_type: FieldType::I64, id: 2 }).unwrap();
        writer.write_i64(-1);
        writer.write_field_stop();
        writer.write_struct_end();

        let mut expected = vec![0x0B, 0x00, 0x01, 0x00, 0x00, 0x00, 0x02, b'o', b'k'];
        expected.extend_from_slice(&[0x0A, 0x00, 0x02]);
        expected.extend_from_slice(&[0xFF; 8]);
        expected.push(0x00);
        assert_eq!(writer.finish(), expected);
    }

    #[test]
    fn reads_what_it_writes() {
        let protocol = BinaryProtocol::new();
        let mut writer = protocol.writer();
        writer.write_field_begin(FieldHeader { field_type: FieldType::I32, id: 7 }).unwrap();
        writer.write_i32(i32::MIN);
        writer.write_field_stop();
        let bytes = writer.finish();

        let mut reader = protocol.reader(&bytes);
        let header = reader.read_field_begin().unwrap().unwrap();
        assert_eq!(header, FieldHeader { field_type: FieldType::I32, id: 7 });
        assert_eq!(reader.read_i32().unwrap(), i32::MIN);
        assert_eq!(reader.read_field_begin().unwrap(), None);
        reader.finish().unwrap();
    }

    #[test]
    fn negative_length_is_rejected() {
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF];
        let mut reader = BinaryProtocol::new().reader(&bytes);
        assert_eq!(reader.read_binary().unwrap_err(), EnvelopeError::NegativeLength(-1));
    }

    #[test]
    fn length_limit_is_enforced_before_reading() {
        let bytes = [0x00, 0x00, 0x00, 0x10];
        let mut reader = BinaryProtocol::new().with_max_binary_len(8).reader(&bytes);
        assert_eq!(
            reader.read_binary().unwrap_err(),
            EnvelopeError::LengthLimitExceeded { len: 16, limit: 8 }
        );
    }

    #[test]
    fn length_limit_is_enforced_when_writing() {
        let protocol = BinaryProtocol::new().with_max_binary_len(8);
        let mut writer = protocol.writer();
        assert!(matches!(writer.write_binary(&[0; 9]), Err(EnvelopeError::Encoding(_))));

        let mut writer = protocol.writer();
        writer.write_binary(&[7; 8]).unwrap();
        let bytes = writer.finish();
        assert_eq!(protocol.reader(&bytes).read_binary().unwrap(), vec![7; 8]);
    }

    #[test]
    fn unknown_type_code() {
        let bytes = [0x0F, 0x00, 0x01];
        let mut reader = BinaryProtocol::new().reader(&bytes);
        assert_eq!(reader.read_field_begin().unwrap_err(), EnvelopeError::UnknownFieldType(0x0F));
    }
}
