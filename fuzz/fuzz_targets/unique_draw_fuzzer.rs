//! Fuzz target for unique selection
//!
//! Prevent biased, duplicated, or out-of-range draws for arbitrary inputs
//!
//! # Strategy
//!
//! - Bounds: Arbitrary `i64` pairs, including inverted and extreme ranges
//! - Counts: Zero, in-range, and oversized requests
//! - Seeds: Arbitrary UTF-8 server and client seeds
//!
//! # Invariants
//!
//! - Valid input yields exactly `count` values, all in `[lower, upper]`
//! - Values are pairwise distinct
//! - Inverted draws are ascending and direct draws are not reordered
//! - Identical inputs yield identical draws
//! - Invalid input MUST return an error, never panic
//! - Errors from valid HMAC are never fatal

#![no_main]

use std::collections::HashSet;

use arbitrary::Arbitrary;
use fairdraw_core::{DrawError, Engine};
use libfuzzer_sys::fuzz_target;

/// Largest range the target will fully materialize.
const MAX_FUZZ_SIZE: i128 = 4096;

#[derive(Debug, Clone, Arbitrary)]
struct DrawInput {
    count: u16,
    lower: i64,
    span: i64,
    nonce: u64,
    server_seed: String,
    client_seed: String,
}

fuzz_target!(|input: DrawInput| {
    let engine = Engine::sha256();
    let upper = input.lower.saturating_add(input.span);
    let count = u64::from(input.count);

    let size = i128::from(upper) - i128::from(input.lower) + 1;
    if size > MAX_FUZZ_SIZE {
        // Wide ranges: only check that the outcome is a clean result
        let _ = engine.generate_number(
            input.lower..=upper,
            &input.server_seed,
            input.nonce,
            &input.client_seed,
        );
        return;
    }

    let result = engine.generate_unique_numbers_traced(
        count,
        input.lower..=upper,
        &input.server_seed,
        input.nonce,
        &input.client_seed,
    );

    let draw = match result {
        Ok(draw) => draw,
        Err(error) => {
            assert!(!error.is_fatal(), "HMAC-SHA256 never fails: {error}");
            match error {
                DrawError::InvalidBounds { lower, upper } => assert!(upper < lower),
                DrawError::InvalidRange { count: requested, available } => {
                    assert!(requested == 0 || requested > available);
                },
                other => panic!("unexpected error for narrow range: {other}"),
            }
            return;
        },
    };

    assert_eq!(draw.values.len() as u64, count);
    assert!(draw.values.iter().all(|value| (input.lower..=upper).contains(value)));

    let distinct: HashSet<_> = draw.values.iter().collect();
    assert_eq!(distinct.len(), draw.values.len(), "duplicate value in draw");

    if draw.stats.inverted {
        assert!(draw.values.windows(2).all(|pair| pair[0] < pair[1]));
    }

    let replay = engine
        .generate_unique_numbers_traced(
            count,
            input.lower..=upper,
            &input.server_seed,
            input.nonce,
            &input.client_seed,
        )
        .expect("replay of a valid draw");
    assert_eq!(replay, draw);
});
