//! Concrete serializers for primitives and sequences.
//!
//! All multi-byte integers, counts and lengths are big-endian.
//! Every serializer here is a `const` item, so none of them need to be
//! built at runtime.

mod primitive;
mod reader;
mod sequence;

pub use primitive::{
    I32Serializer, I64Serializer, TimestampSerializer, UnitSerializer, Utf8Serializer, BYTES, I32,
    I64, SHARED_BUFFER, TIMESTAMP, TIMESTAMP_NANOS, UNIT, UTF8,
};
pub use reader::ByteReader;
pub use sequence::{
    ElementLayout, SequenceSerializer, HEADER_SIZE, I32_SEQUENCE, I64_SEQUENCE, UTF8_SEQUENCE,
};
