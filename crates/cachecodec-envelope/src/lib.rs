//! # cachecodec-envelope
//!
//! Field-tagged struct encoding for cache envelopes.
//!
//! A struct describes its fields once through [`StructCodec`] and can then
//! be written with any [`ProtocolFactory`]. Two protocols are provided:
//!
//! - [`BinaryProtocol`] - fixed-width big-endian fields
//! - [`CompactProtocol`] - zigzag varints and delta-encoded field ids
//!
//! Readers skip fields they do not know, so envelopes written by a newer
//! schema stay readable.
//!
//! ```
//! use cachecodec_envelope::{CachedValue, CompactProtocol, StructCodec};
//!
//! let envelope = CachedValue::new(b"hello".to_vec()).with_cached_at_nanos(1);
//! let bytes = envelope.encode(&CompactProtocol::new())?;
//! assert_eq!(CachedValue::decode(&bytes, &CompactProtocol::new())?, envelope);
//! # Ok::<(), cachecodec_envelope::EnvelopeError>(())
//! ```

#![deny(clippy::unwrap_used)]

pub mod binary;
pub mod cached_value;
pub mod codec;
pub mod compact;
pub mod error;
pub mod protocol;
mod wire;


pub use binary::{BinaryProtocol, BinaryReader, BinaryWriter};
pub use cached_value::CachedValue;
pub use codec::StructCodec;
pub use compact::{CompactProtocol, CompactReader, CompactWriter};
pub use error::{EnvelopeError, EnvelopeResult};
pub use protocol::{FieldHeader, FieldType, ProtocolFactory, ProtocolReader, ProtocolWriter};

/// Default upper bound on a single binary field (64 MiB).
pub const DEFAULT_MAX_BINARY_LEN: usize = 64 * 1024 * 1024;
