//! The compact protocol: varint integers and delta-encoded field ids.
//!
//! # Format
//!
//! - Field header: `(delta << 4) | type` when the id is 1..=15 above the
//!   previous field's id, otherwise `type` followed by the id as a zigzag
//!   varint
//! - Field stop: `0x00`
//! - `i32` / `i64`: zigzag varint
//! - Binary: unsigned varint length + bytes
//!
//! Type codes: `i32` = 5, `i64` = 6, binary = 8. Field ids are tracked per
//! struct, so nested structs start counting from zero again.

use serde::{Deserialize, Serialize};

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::protocol::{FieldHeader, FieldType, ProtocolFactory, ProtocolReader, ProtocolWriter};
use crate::wire::{
    check_length, check_write_length, write_varint, zigzag_decode, zigzag_encode, Cursor,
    MAX_VARINT32_LEN, MAX_VARINT64_LEN,
};
use crate::DEFAULT_MAX_BINARY_LEN;

/// Type codes used by the compact protocol.
mod codes {
    pub const STOP: u8 = 0x00;
    pub const I32: u8 = 0x05;
    pub const I64: u8 = 0x06;
    pub const BINARY: u8 = 0x08;
}

const fn type_code(field_type: FieldType) -> u8 {
    match field_type {
        FieldType::I32 => codes::I32,
        FieldType::I64 => codes::I64,
        FieldType::Binary => codes::BINARY,
    }
}

/// Selects the compact protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactProtocol {
    /// Longest binary field a reader will accept (default: 64MiB).
    pub max_binary_len: usize,
}

impl CompactProtocol {
    /// The compact protocol with default limits.
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

impl Default for CompactProtocol {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolFactory for CompactProtocol {
    type Writer = CompactWriter;
    type Reader<'a> = CompactReader<'a>;

    fn name(&self) -> &'static str {
        "compact"
    }

    fn writer(&self) -> CompactWriter {
        CompactWriter {
            buf: Vec::new(),
            max_binary_len: self.max_binary_len,
            last_field_id: 0,
            enclosing_ids: Vec::new(),
        }
    }

    fn reader<'a>(&self, bytes: &'a [u8]) -> CompactReader<'a> {
        CompactReader {
            cursor: Cursor::new(bytes),
            max_binary_len: self.max_binary_len,
            last_field_id: 0,
            enclosing_ids: Vec::new(),
        }
    }
}

/// Writer for the compact protocol.
#[derive(Debug)]
pub struct CompactWriter {
    buf: Vec<u8>,
    max_binary_len: usize,
    last_field_id: i16,
    enclosing_ids: Vec<i16>,
}

impl ProtocolWriter for CompactWriter {
    fn write_struct_begin(&mut self) {
        self.enclosing_ids.push(self.last_field_id);
        self.last_field_id = 0;
    }

    fn write_struct_end(&mut self) {
        self.last_field_id = self.enclosing_ids.pop().unwrap_or(0);
    }

    fn write_field_begin(&mut self, header: FieldHeader) -> EnvelopeResult<()> {
        let code = type_code(header.field_type);
        let delta = i32::from(header.id) - i32::from(self.last_field_id);
        if (1..=15).contains(&delta) {
            self.buf.push(((delta as u8) << 4) | code);
        } else {
            self.buf.push(code);
            write_varint(&mut self.buf, zigzag_encode(i64::from(header.id)));
        }
        self.last_field_id = header.id;
        Ok(())
    }

    fn write_field_stop(&mut self) {
        self.buf.push(codes::STOP);
    }

    fn write_i32(&mut self, value: i32) {
        write_varint(&mut self.buf, zigzag_encode(i64::from(value)));
    }

    fn write_i64(&mut self, value: i64) {
        write_varint(&mut self.buf, zigzag_encode(value));
    }

    fn write_binary(&mut self, value: &[u8]) -> EnvelopeResult<()> {
        check_write_length(value.len(), self.max_binary_len)?;
        write_varint(&mut self.buf, value.len() as u64);
        self.buf.extend_from_slice(value);
        Ok(())
    }

    fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Reader for the compact protocol.
#[derive(Debug)]
pub struct CompactReader<'a> {
    cursor: Cursor<'a>,
    max_binary_len: usize,
    last_field_id: i16,
    enclosing_ids: Vec<i16>,
}

impl ProtocolReader for CompactReader<'_> {
    fn read_struct_begin(&mut self) {
        self.enclosing_ids.push(self.last_field_id);
        self.last_field_id = 0;
    }

    fn read_struct_end(&mut self) {
        self.last_field_id = self.enclosing_ids.pop().unwrap_or(0);
    }

    fn read_field_begin(&mut self) -> EnvelopeResult<Option<FieldHeader>> {
        let byte = self.cursor.read_u8()?;
        if byte == codes::STOP {
            return Ok(None);
        }
        let field_type = match byte & 0x0F {
            codes::I32 => FieldType::I32,
            codes::I64 => FieldType::I64,
            codes::BINARY => FieldType::Binary,
            other => return Err(EnvelopeError::UnknownFieldType(other)),
        };
        let delta = byte >> 4;
        let id = if delta == 0 {
            let raw = zigzag_decode(self.cursor.read_varint(MAX_VARINT32_LEN)?);
            i16::try_from(raw).map_err(|_| EnvelopeError::FieldIdOutOfRange(raw))?
        } else {
            let id = i64::from(self.last_field_id) + i64::from(delta);
            i16::try_from(id).map_err(|_| EnvelopeError::FieldIdOutOfRange(id))?
        };
        self.last_field_id = id;
        Ok(Some(FieldHeader { field_type, id }))
    }

    fn read_i32(&mut self) -> EnvelopeResult<i32> {
        let raw = zigzag_decode(self.cursor.read_varint(MAX_VARINT32_LEN)?);
        i32::try_from(raw).map_err(|_| EnvelopeError::IntegerOutOfRange { value: raw, target: "i32" })
    }

    fn read_i64(&mut self) -> EnvelopeResult<i64> {
        Ok(zigzag_decode(self.cursor.read_varint(MAX_VARINT64_LEN)?))
    }

    fn read_binary(&mut self) -> EnvelopeResult<Vec<u8>> {
        let len = self.cursor.read_varint(MAX_VARINT32_LEN)?;
        let len = check_length(len, self.max_binary_len)?;
        Ok(self.cursor.take(len)?.to_vec())
    }

    fn finish(self) -> EnvelopeResult<()> {
        self.cursor.finish()
    }
}
