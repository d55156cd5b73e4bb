//! `cachecodec` - binary serialization for distributed cache values
//!
//! Typed values become byte sequences through small, reversible
//! [`Transformer`]s chained into [`Serializer`]s. Cached entries are
//! wrapped in a generic envelope by a [`CachedSerializer`], so any entry
//! can be decoded later given the right value serializer.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//!
//! use cachecodec::codec::{I32_SEQUENCE, UTF8};
//! use cachecodec::{Cached, CachedSerializer, Serializer, Timestamp};
//!
//! // Plain serializers
//! let bytes = I32_SEQUENCE.to(vec![1, 2, 3])?;
//! assert_eq!(I32_SEQUENCE.from(bytes)?, vec![1, 2, 3]);
//!
//! // Envelopes
//! let serializer = CachedSerializer::binary(UTF8);
//! let cached = Cached::new("ok".to_owned(), Arc::clone(serializer.value_serializer()))
//!     .with_cached_at(Timestamp::now());
//! let bytes = serializer.to(cached)?;
//! let decoded: Cached<String, _> = serializer.from(bytes)?;
//! assert_eq!(decoded.value(), "ok");
//! # Ok::<(), cachecodec::CodecError>(())
//! ```
//!
//! # Crates
//!
//! - `cachecodec-core` - transformers, serializers, primitive and sequence codecs
//! - `cachecodec-envelope` - the envelope record and its wire protocols
//!
//! Both are re-exported here; [`prelude`] holds the names most callers need.

// Deny unwrap in library code to ensure proper error handling
#![deny(clippy::unwrap_used)]

pub mod cached;

#[cfg(test)]
mod proptest_tests;

// Re-export core types
pub use cachecodec_core::{
    codec, AndThen, Bytes, CodecError, CodecResult, DecodeError, DecodeLimits, Direction,
    Fallible, Identity, Inverse, Pure, Serializer, SharedBuffer, Timestamp, Transformer,
};

// Re-export envelope types
pub use cachecodec_envelope::{
    BinaryProtocol, CachedValue, CompactProtocol, EnvelopeError, ProtocolFactory, StructCodec,
};

pub use cached::{BinaryCachedSerializer, Cached, CachedSerializer, CompactCachedSerializer};

/// The names most callers need, for glob import.
pub mod prelude {
    pub use crate::cached::{Cached, CachedSerializer};
    pub use cachecodec_core::codec::{
        SequenceSerializer, BYTES, I32, I32_SEQUENCE, I64, I64_SEQUENCE, SHARED_BUFFER, TIMESTAMP,
        UNIT, UTF8, UTF8_SEQUENCE,
    };
    pub use cachecodec_core::{Bytes, CodecError, CodecResult, Serializer, Timestamp, Transformer};
    pub use cachecodec_envelope::{BinaryProtocol, CompactProtocol};
}
