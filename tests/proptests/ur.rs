//! Property tests for the UR codec

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use seedtool::codec::{Resource, ResourceCodec, UrCodec};

#[quickcheck]
fn round_trip_any_payload(payload: Vec<u8>, max_part_length: u8) -> TestResult {
    if max_part_length == 0 {
        return TestResult::discard();
    }
    let resource = Resource::new("crypto-seed", payload.clone()).unwrap();
    let parts = UrCodec.encode(&resource, usize::from(max_part_length));

    let expected_parts = payload.len().div_ceil(usize::from(max_part_length)).max(1);
    if parts.len() != expected_parts {
        return TestResult::failed();
    }

    let decoded = UrCodec.decode(&parts).unwrap();
    TestResult::from_bool(decoded.ur_type() == "crypto-seed" && decoded.payload() == payload)
}

#[quickcheck]
fn decoding_ignores_case_and_order(payload: Vec<u8>) -> TestResult {
    if payload.len() < 2 {
        return TestResult::discard();
    }
    let resource = Resource::new("crypto-bip39", payload.clone()).unwrap();
    let parts: Vec<String> = UrCodec
        .encode(&resource, 1)
        .into_iter()
        .rev()
        .map(|part| part.to_uppercase())
        .collect();

    let decoded = UrCodec.decode(&parts).unwrap();
    TestResult::from_bool(decoded.payload() == payload)
}

#[quickcheck]
fn missing_part_is_rejected(payload: Vec<u8>, drop: usize) -> TestResult {
    if payload.len() < 2 {
        return TestResult::discard();
    }
    let resource = Resource::new("crypto-seed", payload).unwrap();
    let mut parts = UrCodec.encode(&resource, 1);
    parts.remove(drop % parts.len());

    TestResult::from_bool(UrCodec.decode(&parts).is_err())
}
