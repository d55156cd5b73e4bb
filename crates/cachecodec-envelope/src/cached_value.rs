//! The generic envelope stored for every cached entry.
//!
//! # Fields
//!
//! | id | name              | type   | required |
//! |----|-------------------|--------|----------|
//! | 1  | `value`           | binary | yes      |
//! | 2  | `cached_at_nanos` | i64    | no       |
//!
//! Unknown fields of a known wire type are skipped when reading.

use tracing::debug;

use crate::codec::StructCodec;
use crate::error::{EnvelopeError, EnvelopeResult};
use crate::protocol::{FieldHeader, FieldType, ProtocolReader, ProtocolWriter};

/// Field ids of [`CachedValue`].
mod fields {
    pub const VALUE: i16 = 1;
    pub const CACHED_AT_NANOS: i16 = 2;
}

/// A cached payload plus the metadata stored alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CachedValue {
    /// The serialized inner value.
    pub value: Vec<u8>,
    /// When the entry was cached, in nanoseconds since the Unix epoch.
    pub cached_at_nanos: Option<i64>,
}

impl CachedValue {
    /// Creates an envelope around `value` with no metadata.
    #[must_use]
    pub fn new(value: Vec<u8>) -> Self {
        Self { value, cached_at_nanos: None }
    }

    /// Sets the time the entry was cached.
    #[must_use]
    pub fn with_cached_at_nanos(mut self, nanos: i64) -> Self {
        self.cached_at_nanos = Some(nanos);
        self
    }
}

fn expect_type(header: FieldHeader, expected: FieldType) -> EnvelopeResult<()> {
    if header.field_type == expected {
        Ok(())
    } else {
        Err(EnvelopeError::FieldTypeMismatch {
            id: header.id,
            expected,
            actual: header.field_type,
        })
    }
}

impl StructCodec for CachedValue {
    fn write<W: ProtocolWriter>(&self, writer: &mut W) -> EnvelopeResult<()> {
        writer.write_struct_begin();

        writer.write_field_begin(FieldHeader { field_type: FieldType::Binary, id: fields::VALUE })?;
        writer.write_binary(&self.value)?;

        if let Some(nanos) = self.cached_at_nanos {
            writer.write_field_begin(FieldHeader {
                field_type: FieldType::I64,
                id: fields::CACHED_AT_NANOS,
            })?;
            writer.write_i64(nanos);
        }

        writer.write_field_stop();
        writer.write_struct_end();
        Ok(())
    }

    fn read<R: ProtocolReader>(reader: &mut R) -> EnvelopeResult<Self> {
        reader.read_struct_begin();

        let mut value = None;
        let mut cached_at_nanos = None;
        while let Some(header) = reader.read_field_begin()? {
            match header.id {
                fields::VALUE => {
                    expect_type(header, FieldType::Binary)?;
                    value = Some(reader.read_binary()?);
                }
                fields::CACHED_AT_NANOS => {
                    expect_type(header, FieldType::I64)?;
                    cached_at_nanos = Some(reader.read_i64()?);
                }
                id => {
                    debug!(field_id = id, field_type = ?header.field_type, "skipping unknown envelope field");
                    reader.skip(header.field_type)?;
                }
            }
        }

        reader.read_struct_end();
        Ok(Self { value: value.ok_or(EnvelopeError::MissingField("value"))?, cached_at_nanos })
    }
}
