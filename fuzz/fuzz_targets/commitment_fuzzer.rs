//! Fuzz target for seed commitments
//!
//! # Invariants
//!
//! - Commitment is 64 lowercase hex characters
//! - A revealed seed always verifies against its own commitment
//! - Verification ignores hex case
//! - The two keyings never collide for a non-empty seed

#![no_main]

use fairdraw_core::{CommitmentForm, Engine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|seed: &str| {
    let canonical = Engine::sha256();
    let seed_keyed = Engine::sha256().with_commitment_form(CommitmentForm::KeyedBySeed);

    let hash = canonical.commit_seed(seed).expect("HMAC-SHA256 never fails");
    assert_eq!(hash.len(), 64);
    assert!(hash.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));

    assert!(canonical.verify_commitment(seed, &hash).expect("verify"));
    assert!(canonical.verify_commitment(seed, &hash.to_ascii_uppercase()).expect("verify"));

    // Both keyings reduce to HMAC("", "") for the empty seed
    if !seed.is_empty() {
        let other = seed_keyed.commit_seed(seed).expect("HMAC-SHA256 never fails");
        assert_ne!(hash, other);
    }
});
