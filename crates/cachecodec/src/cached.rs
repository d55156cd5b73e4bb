//! Cached values wrapped in a generic envelope.
//!
//! A [`CachedSerializer`] turns a value into its payload bytes with a
//! value serializer, stores the payload in a [`CachedValue`] envelope and
//! encodes the envelope with a wire protocol. Decoding reverses the three
//! steps; any failure along the way is returned as is.

use std::fmt;
use std::sync::Arc;

use cachecodec_core::{Bytes, CodecError, CodecResult, DecodeError, Serializer, Timestamp, Transformer};
use cachecodec_envelope::{
    BinaryProtocol, CachedValue, CompactProtocol, EnvelopeError, ProtocolFactory, StructCodec,
};
use tracing::{debug, trace};

/// A value paired with the serializer that encodes it.
///
/// Built just before wrapping a value into an envelope, or returned when
/// unwrapping one.
pub struct Cached<T, S: ?Sized> {
    value: T,
    serializer: Arc<S>,
    cached_at: Option<Timestamp>,
}

impl<T, S: ?Sized> Cached<T, S> {
    /// Pairs `value` with its serializer.
    pub fn new(value: T, serializer: Arc<S>) -> Self {
        Self { value, serializer, cached_at: None }
    }

    /// Records when the value was cached.
    #[must_use]
    pub fn with_cached_at(mut self, cached_at: Timestamp) -> Self {
        self.cached_at = Some(cached_at);
        self
    }

    /// Returns the wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Consumes the pair and returns the value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns the serializer that encodes the value.
    pub fn serializer(&self) -> &Arc<S> {
        &self.serializer
    }

    /// Returns when the value was cached, if recorded.
    pub fn cached_at(&self) -> Option<Timestamp> {
        self.cached_at
    }
}

impl<T, S> Cached<T, S>
where
    S: Serializer<T> + ?Sized,
{
    /// Encodes the value with its own serializer, without an envelope.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if the value cannot be encoded.
    pub fn into_payload(self) -> CodecResult<Bytes> {
        self.serializer.to(self.value)
    }
}

impl<T: Clone, S: ?Sized> Clone for Cached<T, S> {
    fn clone(&self) -> Self {
        Self { value: self.value.clone(), serializer: Arc::clone(&self.serializer), cached_at: self.cached_at }
    }
}

impl<T: fmt::Debug, S: ?Sized> fmt::Debug for Cached<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cached")
            .field("value", &self.value)
            .field("cached_at", &self.cached_at)
            .finish_non_exhaustive()
    }
}

/// Serializes [`Cached`] values through a [`CachedValue`] envelope.
///
/// `S` encodes the inner value and `P` selects the envelope's wire
/// protocol. Both are immutable, so one instance can be shared across
/// threads.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use cachecodec::codec::I32_SEQUENCE;
/// use cachecodec::{Cached, CachedSerializer, Serializer};
///
/// let serializer = CachedSerializer::compact(I32_SEQUENCE);
/// let cached = Cached::new(vec![1, 2, 3], Arc::clone(serializer.value_serializer()));
///
/// let bytes = serializer.to(cached)?;
/// let decoded: Cached<Vec<i32>, _> = serializer.from(bytes)?;
/// assert_eq!(decoded.value(), &vec![1, 2, 3]);
/// # Ok::<(), cachecodec::CodecError>(())
/// ```
pub struct CachedSerializer<S: ?Sized, P> {
    value_serializer: Arc<S>,
    protocol: P,
}

/// A [`CachedSerializer`] using the binary protocol.
pub type BinaryCachedSerializer<S> = CachedSerializer<S, BinaryProtocol>;

/// A [`CachedSerializer`] using the compact protocol.
pub type CompactCachedSerializer<S> = CachedSerializer<S, CompactProtocol>;

impl<S: ?Sized, P: ProtocolFactory> CachedSerializer<S, P> {
    /// Creates a serializer from a shared value serializer and a protocol.
    pub fn new(value_serializer: Arc<S>, protocol: P) -> Self {
        Self { value_serializer, protocol }
    }

    /// Returns the inner value serializer.
    pub fn value_serializer(&self) -> &Arc<S> {
        &self.value_serializer
    }

    /// Returns the envelope protocol.
    pub fn protocol(&self) -> &P {
        &self.protocol
    }
}

impl<S> CachedSerializer<S, BinaryProtocol> {
    /// Envelopes encoded with the binary protocol.
    pub fn binary(value_serializer: S) -> Self {
        Self { value_serializer: Arc::new(value_serializer), protocol: BinaryProtocol::new() }
    }
}

impl<S> CachedSerializer<S, CompactProtocol> {
    /// Envelopes encoded with the compact protocol.
    pub fn compact(value_serializer: S) -> Self {
        Self { value_serializer: Arc::new(value_serializer), protocol: CompactProtocol::new() }
    }
}

impl<S: ?Sized, P: Clone> Clone for CachedSerializer<S, P> {
    fn clone(&self) -> Self {
        Self { value_serializer: Arc::clone(&self.value_serializer), protocol: self.protocol.clone() }
    }
}

impl<S: ?Sized, P: fmt::Debug> fmt::Debug for CachedSerializer<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedSerializer").field("protocol", &self.protocol).finish_non_exhaustive()
    }
}

fn envelope_encode_error(err: EnvelopeError) -> CodecError {
    CodecError::encode(err.to_string())
}

fn envelope_decode_error(err: EnvelopeError) -> CodecError {
    DecodeError::Envelope(err.to_string()).into()
}

impl<T, S, P> Transformer<Cached<T, S>, Bytes> for CachedSerializer<S, P>
where
    S: Serializer<T> + ?Sized,
    P: ProtocolFactory,
{
    fn forward(&self, cached: Cached<T, S>) -> CodecResult<Bytes> {
        let payload = self.value_serializer.to(cached.value)?;
        let envelope = CachedValue {
            value: payload,
            cached_at_nanos: cached.cached_at.map(Timestamp::as_nanos),
        };
        envelope.encode(&self.protocol).map_err(envelope_encode_error)
    }

    fn backward(&self, bytes: Bytes) -> CodecResult<Cached<T, S>> {
        let envelope = CachedValue::decode(&bytes, &self.protocol).map_err(|err| {
            debug!(protocol = self.protocol.name(), error = %err, "failed to decode cache envelope");
            envelope_decode_error(err)
        })?;

        let payload_len = envelope.value.len();
        let value: T = self.value_serializer.from(envelope.value).map_err(|err| {
            debug!(protocol = self.protocol.name(), payload_len, error = %err, "failed to decode cached value");
            err
        })?;

        trace!(protocol = self.protocol.name(), envelope_len = bytes.len(), payload_len, "decoded cached value");
        Ok(Cached {
            value,
            serializer: Arc::clone(&self.value_serializer),
            cached_at: envelope.cached_at_nanos.map(Timestamp::from_nanos),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cachecodec_core::codec::{I32_SEQUENCE, I64, UTF8};

    #[test]
    fn binary_roundtrip_keeps_value_and_timestamp() {
        let serializer = CachedSerializer::binary(UTF8);
        let cached = Cached::new("hello".to_owned(), Arc::clone(serializer.value_serializer()))
            .with_cached_at(Timestamp::from_nanos(1_700_000_000_000_000_000));

        let bytes = serializer.to(cached).unwrap();
        let decoded: Cached<String, _> = serializer.from(bytes).unwrap();
        assert_eq!(decoded.value(), "hello");
        assert_eq!(decoded.cached_at(), Some(Timestamp::from_nanos(1_700_000_000_000_000_000)));
    }

    #[test]
    fn decoded_value_carries_the_same_serializer() {
        let serializer = CachedSerializer::compact(I32_SEQUENCE);
        let cached = Cached::new(vec![1, 2, 3], Arc::clone(serializer.value_serializer()));
        let bytes = serializer.to(cached).unwrap();

        let decoded: Cached<Vec<i32>, _> = serializer.from(bytes).unwrap();
        assert!(Arc::ptr_eq(decoded.serializer(), serializer.value_serializer()));
        assert_eq!(decoded.into_payload().unwrap(), I32_SEQUENCE.to(vec![1, 2, 3]).unwrap());
    }

    #[test]
    fn payload_is_the_value_serializer_output() {
        let serializer = CachedSerializer::binary(I64);
        let cached = Cached::new(7i64, Arc::clone(serializer.value_serializer()));
        let bytes = serializer.to(cached).unwrap();

        let envelope = CachedValue::decode(&bytes, &BinaryProtocol::new()).unwrap();
        assert_eq!(envelope.value, 7i64.to_be_bytes().to_vec());
        assert_eq!(envelope.cached_at_nanos, None);
    }

    #[test]
    fn malformed_envelope_is_a_decode_error() {
        let serializer = CachedSerializer::binary(I64);
        let result: CodecResult<Cached<i64, _>> = serializer.from(vec![0xFF, 0x00]);
        let err = result.unwrap_err();
        assert!(matches!(err, CodecError::Decode(DecodeError::Envelope(_))));
    }

    #[test]
    fn inner_decode_error_is_surfaced_verbatim() {
        let serializer = CachedSerializer::compact(I64);
        let envelope = CachedValue::new(vec![1, 2, 3]);
        let bytes = envelope.encode(&CompactProtocol::new()).unwrap();

        let result: CodecResult<Cached<i64, _>> = serializer.from(bytes);
        assert_eq!(
            result.unwrap_err(),
            CodecError::Decode(DecodeError::BufferUnderrun { needed: 8, available: 3 })
        );
    }

    #[test]
    fn payload_over_protocol_limit_is_an_encode_error() {
        for serializer in [
            CachedSerializer::new(Arc::new(UTF8), BinaryProtocol::new().with_max_binary_len(4)),
            CachedSerializer::new(Arc::new(UTF8), BinaryProtocol::new().with_max_binary_len(5)),
        ] {
            let cached = Cached::new("hello!".to_owned(), Arc::clone(serializer.value_serializer()));
            assert!(serializer.to(cached).unwrap_err().is_encode());
        }

        let compact = CachedSerializer::new(Arc::new(UTF8), CompactProtocol::new().with_max_binary_len(4));
        let cached = Cached::new("hello".to_owned(), Arc::clone(compact.value_serializer()));
        assert!(compact.to(cached).unwrap_err().is_encode());

        let cached = Cached::new("hi".to_owned(), Arc::clone(compact.value_serializer()));
        let bytes = compact.to(cached).unwrap();
        let decoded: Cached<String, _> = compact.from(bytes).unwrap();
        assert_eq!(decoded.value(), "hi");
    }

    #[test]
    fn protocols_are_not_interchangeable() {
        let binary = CachedSerializer::binary(UTF8);
        let compact = CachedSerializer::compact(UTF8);
        let cached = Cached::new("ok".to_owned(), Arc::clone(binary.value_serializer()));

        let bytes = binary.to(cached).unwrap();
        let result: CodecResult<Cached<String, _>> = compact.from(bytes);
        assert!(result.unwrap_err().is_decode());
    }

    #[test]
    fn works_with_trait_object_serializers() {
        let value_serializer: Arc<dyn Transformer<String, Bytes>> = Arc::new(UTF8);
        let serializer = CachedSerializer::new(value_serializer, CompactProtocol::new());
        let cached = Cached::new("dyn".to_owned(), Arc::clone(serializer.value_serializer()));

        let bytes = serializer.to(cached).unwrap();
        let decoded: Cached<String, dyn Transformer<String, Bytes>> = serializer.from(bytes).unwrap();
        assert_eq!(decoded.into_value(), "dyn");
    }
}
