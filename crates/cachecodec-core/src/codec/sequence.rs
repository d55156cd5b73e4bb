//! Serializers for ordered sequences of homogeneous elements.
//!
//! # Format
//!
//! Every sequence starts with a 4-byte big-endian element count.
//!
//! - Fixed-width elements follow as `count * width` bytes, concatenated
//!   in order.
//! - Variable-width elements follow as `count` blocks of a 4-byte
//!   big-endian length plus that many payload bytes.
//!
//! Order is preserved exactly and duplicates are kept.

use crate::config::DecodeLimits;
use crate::error::{CodecError, CodecResult, DecodeError};
use crate::serializer::Bytes;
use crate::transformer::Transformer;

use super::primitive::{I32Serializer, I64Serializer, Utf8Serializer, I32, I64, UTF8};
use super::reader::ByteReader;

/// Size of the count header and of each variable-width length header.
pub const HEADER_SIZE: usize = 4;

/// Sequence of `i32` as 4-byte elements.
pub const I32_SEQUENCE: SequenceSerializer<I32Serializer> = SequenceSerializer::fixed(I32, 4);

/// Sequence of `i64` as 8-byte elements.
pub const I64_SEQUENCE: SequenceSerializer<I64Serializer> = SequenceSerializer::fixed(I64, 8);

/// Sequence of UTF-8 strings as length-prefixed elements.
pub const UTF8_SEQUENCE: SequenceSerializer<Utf8Serializer> = SequenceSerializer::variable(UTF8);

/// How elements are delimited within a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementLayout {
    /// Every element encodes to exactly this many bytes.
    Fixed(usize),
    /// Each element carries its own length header.
    Variable,
}

/// Serializes a `Vec<T>` using a serializer for `T`.
#[derive(Debug, Clone, Copy)]
pub struct SequenceSerializer<S> {
    element: S,
    layout: ElementLayout,
    limits: DecodeLimits,
}

impl<S> SequenceSerializer<S> {
    /// Elements always encode to `width` bytes and carry no length header.
    #[must_use]
    pub const fn fixed(element: S, width: usize) -> Self {
        Self { element, layout: ElementLayout::Fixed(width), limits: DecodeLimits::DEFAULT }
    }

    /// Elements are individually length-prefixed.
    #[must_use]
    pub const fn variable(element: S) -> Self {
        Self { element, layout: ElementLayout::Variable, limits: DecodeLimits::DEFAULT }
    }

    /// Replaces the decode limits.
    #[must_use]
    pub fn with_limits(mut self, limits: DecodeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The serializer used for each element.
    pub fn element(&self) -> &S {
        &self.element
    }

    /// How elements are delimited.
    pub fn layout(&self) -> ElementLayout {
        self.layout
    }

    /// The limits applied in both directions.
    pub fn limits(&self) -> DecodeLimits {
        self.limits
    }

    /// Rejects counts that the limits or the remaining input rule out.
    fn check_count(&self, count: u32, remaining: usize) -> Result<(), DecodeError> {
        if count > self.limits.max_elements {
            return Err(DecodeError::MalformedCount(format!(
                "{count} elements exceeds the limit of {}",
                self.limits.max_elements
            )));
        }
        let min_element_size = match self.layout {
            ElementLayout::Fixed(width) => width,
            ElementLayout::Variable => HEADER_SIZE,
        };
        let count = usize::try_from(count).map_err(|_| {
            DecodeError::MalformedCount("element count exceeds platform capacity".to_owned())
        })?;
        if count.saturating_mul(min_element_size) > remaining {
            return Err(DecodeError::MalformedCount(format!(
                "{count} elements cannot fit in {remaining} bytes"
            )));
        }
        Ok(())
    }

    /// Reads the next element's bytes according to the layout.
    fn next_element<'a>(&self, reader: &mut ByteReader<'a>) -> Result<&'a [u8], DecodeError> {
        match self.layout {
            ElementLayout::Fixed(width) => reader.take(width),
            ElementLayout::Variable => {
                let len = reader.read_u32()?;
                if len > self.limits.max_element_len {
                    return Err(DecodeError::MalformedCount(format!(
                        "element length {len} exceeds the limit of {}",
                        self.limits.max_element_len
                    )));
                }
                let len = usize::try_from(len).map_err(|_| {
                    DecodeError::MalformedCount(
                        "element length exceeds platform capacity".to_owned(),
                    )
                })?;
                reader.take(len)
            }
        }
    }
}

impl<T, S> Transformer<Vec<T>, Bytes> for SequenceSerializer<S>
where
    S: Transformer<T, Bytes>,
{
    fn forward(&self, values: Vec<T>) -> CodecResult<Bytes> {
        let count = u32::try_from(values.len())
            .ok()
            .filter(|&count| count <= self.limits.max_elements)
            .ok_or_else(|| {
                CodecError::encode(format!(
                    "{} elements exceeds the limit of {}",
                    values.len(),
                    self.limits.max_elements
                ))
            })?;

        let mut buf = match self.layout {
            ElementLayout::Fixed(width) => {
                Vec::with_capacity(HEADER_SIZE + values.len().saturating_mul(width))
            }
            ElementLayout::Variable => Vec::with_capacity(HEADER_SIZE),
        };
        buf.extend_from_slice(&count.to_be_bytes());

        for (index, value) in values.into_iter().enumerate() {
            let bytes = self.element.forward(value)?;
            match self.layout {
                ElementLayout::Fixed(width) => {
                    if bytes.len() != width {
                        return Err(CodecError::encode(format!(
                            "element {index} encoded to {} bytes, expected {width}",
                            bytes.len()
                        )));
                    }
                }
                ElementLayout::Variable => {
                    let len = u32::try_from(bytes.len())
                        .ok()
                        .filter(|&len| len <= self.limits.max_element_len)
                        .ok_or_else(|| {
                            CodecError::encode(format!(
                                "element {index} is {} bytes, over the limit of {}",
                                bytes.len(),
                                self.limits.max_element_len
                            ))
                        })?;
                    buf.extend_from_slice(&len.to_be_bytes());
                }
            }
            buf.extend_from_slice(&bytes);
        }

        Ok(buf)
    }

    fn backward(&self, bytes: Bytes) -> CodecResult<Vec<T>> {
        let mut reader = ByteReader::new(&bytes);
        let count = reader.read_u32()?;
        self.check_count(count, reader.remaining())?;

        // Zero-width elements make `count` independent of the input length,
        // so the reservation is capped by the bytes actually present.
        let mut values = Vec::with_capacity((count as usize).min(reader.remaining()));
        for _ in 0..count {
            let element = self.next_element(&mut reader)?;
            values.push(self.element.backward(element.to_vec())?);
        }
        reader.finish()?;

        Ok(values)
    }
}
