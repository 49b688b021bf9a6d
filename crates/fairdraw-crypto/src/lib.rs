//! Fairdraw Cryptographic Primitives
//!
//! This crate provides the keyed hash capability that the Fairdraw draw
//! engine is built on, plus the seed commitment used to prove a server seed
//! was fixed before play.
//!
//! # Design
//!
//! All functions in this crate are pure: identical inputs produce identical
//! outputs on any conforming implementation. The keyed hash is reached only
//! through the [`Hmac256`] capability, which callers resolve once and inject
//! into whatever needs it. There is no runtime probing and no fallback to a
//! weaker primitive: if the capability cannot produce a digest, the call
//! fails with [`CryptoError::Unavailable`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commitment;
pub mod hmac;

pub use commitment::{CommitmentForm, commit_seed, derive_salt, verify_commitment};
pub use hmac::{CryptoError, DIGEST_SIZE, Digest, Hmac256, HmacSha256};
