//! Seed commitments.
//!
//! A commitment binds the service to a server seed before play. The service
//! publishes `commit_seed(seed)` up front and reveals `seed` afterwards; any
//! auditor can then recompute the commitment and compare.
//!
//! The commitment mixes the seed with a salt derived from the seed itself:
//! the seed is split into consecutive two-character chunks (the last chunk
//! may hold a single character) and the chunks are joined in reverse order.
//!
//! # Forms
//!
//! Two keyings exist in the wild and they are NOT interchangeable, because a
//! keyed hash depends on which argument is the key. [`CommitmentForm`] makes
//! the choice explicit. [`CommitmentForm::KeyedBySeedAndSalt`] is canonical.

use crate::hmac::{CryptoError, Hmac256};

/// How the seed and salt are fed to the keyed hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitmentForm {
    /// Key is `seed ‖ salt`, message is empty. Canonical.
    #[default]
    KeyedBySeedAndSalt,

    /// Key is `seed`, message is `seed ‖ salt`.
    KeyedBySeed,
}

/// Derives the self-salt of `seed`.
///
/// Chunks are counted in Unicode scalar values, so multi-byte characters are
/// never split. An empty seed yields an empty salt.
pub fn derive_salt(seed: &str) -> String {
    let chars: Vec<char> = seed.chars().collect();
    chars.chunks(2).rev().flatten().collect()
}

/// Computes the lowercase hex commitment of `seed`.
///
/// # Errors
///
/// Returns [`CryptoError::Unavailable`] if the keyed hash cannot run.
pub fn commit_seed<H: Hmac256 + ?Sized>(
    hmac: &H,
    form: CommitmentForm,
    seed: &str,
) -> Result<String, CryptoError> {
    let salted = format!("{seed}{}", derive_salt(seed));

    let digest = match form {
        CommitmentForm::KeyedBySeedAndSalt => hmac.hmac256(salted.as_bytes(), b"")?,
        CommitmentForm::KeyedBySeed => hmac.hmac256(seed.as_bytes(), salted.as_bytes())?,
    };

    Ok(hex::encode(digest))
}

/// Checks a revealed seed against a previously published commitment.
///
/// Hex case in `published` is ignored.
///
/// # Errors
///
/// Returns [`CryptoError::Unavailable`] if the keyed hash cannot run.
pub fn verify_commitment<H: Hmac256 + ?Sized>(
    hmac: &H,
    form: CommitmentForm,
    seed: &str,
    published: &str,
) -> Result<bool, CryptoError> {
    let expected = commit_seed(hmac, form, seed)?;
    Ok(expected.eq_ignore_ascii_case(published.trim()))
}
