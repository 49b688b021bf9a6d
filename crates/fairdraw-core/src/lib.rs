//! Fairdraw Core
//!
//! Deterministic, verifiable draws for games of chance. A service and a user
//! who do not trust each other agree on a `(server seed, client seed, nonce)`
//! triple; this crate turns it into integers inside an inclusive range, the
//! same integers on every run and on every conforming implementation.
//!
//! # Architecture
//!
//! ```text
//! Engine<H: Hmac256>
//!   ├─ games            (dice, wheel, mines, cases adapters)
//!   ├─ selector         (unique draws, complement inversion)
//!   │    └─ sampler     (4-byte rejection sampling)
//!   │         └─ stream (lazily extended HMAC block stream)
//!   └─ commitment       (seed commitment, from fairdraw-crypto)
//! ```
//!
//! # Invariants
//!
//! - Determinism: identical inputs always produce identical outputs
//! - Validity: a draw of `count` returns exactly `count` distinct integers,
//!   all inside the requested range
//! - No degradation: if the keyed hash is unavailable the draw fails; it never
//!   falls back to a non-cryptographic source

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod engine;
mod error;
pub mod games;
pub mod sampler;
pub mod selector;
pub mod stream;

pub use engine::Engine;
pub use error::DrawError;
pub use fairdraw_crypto::{CommitmentForm, CryptoError, Digest, Hmac256, HmacSha256};
pub use games::{CaseOpen, DiceRoll, MinesLayout, Outcome, Round, WheelSpin};
pub use selector::{Draw, DrawStats};
pub use stream::DigestStream;
