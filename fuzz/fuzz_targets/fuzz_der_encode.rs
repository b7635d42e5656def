//! Fuzz target for the DER/PEM public key encoder.
//!
//! This fuzzer feeds arbitrary modulus/exponent magnitudes through
//! rsa_public_key_to_pem and checks the structural PEM invariants hold
//! for every input.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_der_encode -- -max_total_time=600

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lectern_keys::rsa_public_key_to_pem;

/// Arbitrary key components
#[derive(Arbitrary, Debug)]
struct KeyInput {
    modulus: Vec<u8>,
    exponent: Vec<u8>,
}

fuzz_target!(|input: KeyInput| {
    // Skip very large magnitudes to keep iterations fast
    if input.modulus.len() > 4096 || input.exponent.len() > 64 {
        return;
    }

    let pem = rsa_public_key_to_pem(&input.modulus, &input.exponent);

    assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----\n"));
    assert!(pem.ends_with("-----END PUBLIC KEY-----\n"));
    for line in pem.lines() {
        assert!(!line.is_empty());
        assert!(line.len() <= 64);
    }

    // Encoding is deterministic
    assert_eq!(pem, rsa_public_key_to_pem(&input.modulus, &input.exponent));
});
