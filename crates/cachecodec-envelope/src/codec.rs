//! Structs that know how to write and read themselves field by field.

use crate::error::EnvelopeResult;
use crate::protocol::{ProtocolFactory, ProtocolReader, ProtocolWriter};

/// A struct encoded through a pluggable wire protocol.
///
/// Implementations describe their fields once, in [`write`](Self::write)
/// and [`read`](Self::read); [`encode`](Self::encode) and
/// [`decode`](Self::decode) pick the protocol.
pub trait StructCodec: Sized {
    /// Writes this struct, including its begin/end and stop markers.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be represented.
    fn write<W: ProtocolWriter>(&self, writer: &mut W) -> EnvelopeResult<()>;

    /// Reads a struct previously written by [`write`](Self::write).
    ///
    /// # Errors
    ///
    /// Returns an error on malformed input or a missing required field.
    fn read<R: ProtocolReader>(reader: &mut R) -> EnvelopeResult<Self>;

    /// Encodes this struct with `protocol`.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be represented.
    fn encode<P: ProtocolFactory>(&self, protocol: &P) -> EnvelopeResult<Vec<u8>> {
        let mut writer = protocol.writer();
        self.write(&mut writer)?;
        Ok(writer.finish())
    }

    /// Decodes a struct from `bytes` with `protocol`.
    ///
    /// The whole input must be consumed.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed or truncated input, or trailing bytes.
    fn decode<P: ProtocolFactory>(bytes: &[u8], protocol: &P) -> EnvelopeResult<Self> {
        let mut reader = protocol.reader(bytes);
        let value = Self::read(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }
}
