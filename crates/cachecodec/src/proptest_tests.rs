//! Property-based tests for cached envelopes.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;

use proptest::prelude::*;

use crate::codec::{SequenceSerializer, I64_SEQUENCE, UTF8, UTF8_SEQUENCE};
use crate::{
    BinaryProtocol, Cached, CachedSerializer, CodecResult, CompactProtocol, DecodeLimits,
    ProtocolFactory, Serializer, Timestamp,
};

fn arb_cached_at() -> impl Strategy<Value = Option<Timestamp>> {
    prop::option::of(any::<i64>().prop_map(Timestamp::from_nanos))
}

fn assert_roundtrip<P: ProtocolFactory>(
    protocol: P,
    values: Vec<String>,
    cached_at: Option<Timestamp>,
) -> Result<(), TestCaseError> {
    let serializer = CachedSerializer::new(Arc::new(UTF8_SEQUENCE), protocol);
    let mut cached = Cached::new(values.clone(), Arc::clone(serializer.value_serializer()));
    if let Some(at) = cached_at {
        cached = cached.with_cached_at(at);
    }

    let bytes = serializer.to(cached).expect("encoding should succeed");
    let decoded: Cached<Vec<String>, _> = serializer.from(bytes).expect("decoding should succeed");
    prop_assert_eq!(decoded.cached_at(), cached_at);
    prop_assert_eq!(decoded.into_value(), values);
    Ok(())
}

proptest! {
    #[test]
    fn binary_envelope_roundtrip(
        values in prop::collection::vec(".{0,16}", 0..16),
        cached_at in arb_cached_at(),
    ) {
        assert_roundtrip(BinaryProtocol::new(), values, cached_at)?;
    }

    #[test]
    fn compact_envelope_roundtrip(
        values in prop::collection::vec(".{0,16}", 0..16),
        cached_at in arb_cached_at(),
    ) {
        assert_roundtrip(CompactProtocol::new(), values, cached_at)?;
    }

    /// Whatever encodes under a set of limits also decodes under them.
    #[test]
    fn encoded_values_decode_under_the_same_limits(
        values in prop::collection::vec(any::<i64>(), 0..32),
        max_elements in 0u32..32,
        max_binary_len in 0usize..300,
    ) {
        let limits = DecodeLimits::default().with_max_elements(max_elements);
        let serializer = CachedSerializer::new(
            Arc::new(I64_SEQUENCE.with_limits(limits)),
            CompactProtocol::new().with_max_binary_len(max_binary_len),
        );
        let cached = Cached::new(values.clone(), Arc::clone(serializer.value_serializer()));

        match serializer.to(cached) {
            Ok(bytes) => {
                let decoded: Cached<Vec<i64>, _> = serializer.from(bytes).expect("decoding should succeed");
                prop_assert_eq!(decoded.into_value(), values);
            }
            Err(err) => prop_assert!(err.is_encode()),
        }
    }

    /// Arbitrary bytes should not crash, only return errors.
    #[test]
    fn arbitrary_bytes_dont_crash(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let nested = CachedSerializer::binary(SequenceSerializer::variable(UTF8_SEQUENCE));
        let _: CodecResult<Cached<Vec<Vec<String>>, _>> = nested.from(bytes.clone());
        let compact = CachedSerializer::compact(UTF8);
        let _: CodecResult<Cached<String, _>> = compact.from(bytes);
    }
}
