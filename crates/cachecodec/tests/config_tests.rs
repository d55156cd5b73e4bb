//! Integration tests for loading codec configuration from JSON.

use cachecodec::codec::{SequenceSerializer, I32, I32_SEQUENCE};
use cachecodec::{
    BinaryProtocol, CodecError, CodecResult, CompactProtocol, DecodeError, DecodeLimits, Serializer,
};
use serde_json::json;

#[test]
fn test_decode_limits_from_json() {
    let limits: DecodeLimits =
        serde_json::from_value(json!({ "max_elements": 2, "max_element_len": 128 })).unwrap();
    assert_eq!(limits, DecodeLimits::default().with_max_elements(2).with_max_element_len(128));
}

#[test]
fn test_decode_limits_default_when_empty() {
    let limits: DecodeLimits = serde_json::from_str("{}").unwrap();
    assert_eq!(limits, DecodeLimits::default());
}

#[test]
fn test_decode_limits_roundtrip_through_json() {
    let limits = DecodeLimits::default().with_max_elements(10);
    let text = serde_json::to_string(&limits).unwrap();
    let parsed: DecodeLimits = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, limits);
}

#[test]
fn test_configured_limits_are_enforced() {
    let limits: DecodeLimits = serde_json::from_value(json!({ "max_elements": 2 })).unwrap();
    let limited = SequenceSerializer::fixed(I32, 4).with_limits(limits);

    let bytes = I32_SEQUENCE.to(vec![1, 2, 3]).unwrap();
    let result: CodecResult<Vec<i32>> = limited.from(bytes);
    assert!(matches!(result.unwrap_err(), CodecError::Decode(DecodeError::MalformedCount(_))));
}

#[test]
fn test_protocols_from_json() {
    let binary: BinaryProtocol = serde_json::from_value(json!({ "max_binary_len": 1024 })).unwrap();
    assert_eq!(binary, BinaryProtocol::new().with_max_binary_len(1024));

    let compact: CompactProtocol = serde_json::from_str("{}").unwrap();
    assert_eq!(compact, CompactProtocol::default());
}
