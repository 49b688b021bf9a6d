//! Draw engine entry point.

use std::ops::RangeInclusive;

use fairdraw_crypto::{CommitmentForm, CryptoError, Hmac256, HmacSha256, commitment};

use crate::{
    error::DrawError,
    selector::{self, Draw},
};

/// Verifiable draw engine.
///
/// Holds the injected keyed hash capability and the commitment form. The
/// engine itself is stateless: every call builds its own stream and discards
/// it, so one engine may serve any number of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct Engine<H = HmacSha256> {
    hmac: H,
    commitment_form: CommitmentForm,
}

impl Engine<HmacSha256> {
    /// Create an engine backed by HMAC-SHA256 and the canonical commitment.
    #[must_use]
    pub fn sha256() -> Self {
        Self::new(HmacSha256::new())
    }
}

impl<H: Hmac256> Engine<H> {
    /// Create an engine around an injected keyed hash capability.
    pub fn new(hmac: H) -> Self {
        Self { hmac, commitment_form: CommitmentForm::default() }
    }

    /// Use `form` for seed commitments.
    #[must_use]
    pub fn with_commitment_form(mut self, form: CommitmentForm) -> Self {
        self.commitment_form = form;
        self
    }

    /// Commitment form in use.
    pub fn commitment_form(&self) -> CommitmentForm {
        self.commitment_form
    }

    /// Injected keyed hash capability.
    pub fn hmac(&self) -> &H {
        &self.hmac
    }

    /// Selects `count` distinct integers from `range`.
    ///
    /// See [`selector::select_unique`] for ordering and errors.
    pub fn generate_unique_numbers(
        &self,
        count: u64,
        range: RangeInclusive<i64>,
        server_seed: &str,
        nonce: u64,
        client_seed: &str,
    ) -> Result<Vec<i64>, DrawError> {
        self.generate_unique_numbers_traced(count, range, server_seed, nonce, client_seed)
            .map(|draw| draw.values)
    }

    /// Like [`Engine::generate_unique_numbers`], also reporting stream usage.
    pub fn generate_unique_numbers_traced(
        &self,
        count: u64,
        range: RangeInclusive<i64>,
        server_seed: &str,
        nonce: u64,
        client_seed: &str,
    ) -> Result<Draw, DrawError> {
        selector::select_unique(&self.hmac, count, range, server_seed, nonce, client_seed)
    }

    /// Selects a single integer from `range`.
    pub fn generate_number(
        &self,
        range: RangeInclusive<i64>,
        server_seed: &str,
        nonce: u64,
        client_seed: &str,
    ) -> Result<i64, DrawError> {
        selector::select_one(&self.hmac, range, server_seed, nonce, client_seed)
    }

    /// Computes the lowercase hex commitment of `seed`.
    pub fn commit_seed(&self, seed: &str) -> Result<String, CryptoError> {
        commitment::commit_seed(&self.hmac, self.commitment_form, seed)
    }

    /// Checks a revealed seed against a published commitment.
    pub fn verify_commitment(&self, seed: &str, published: &str) -> Result<bool, CryptoError> {
        commitment::verify_commitment(&self.hmac, self.commitment_form, seed, published)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_uses_canonical_commitment() {
        let engine: Engine = Engine::default();
        assert_eq!(engine.commitment_form(), CommitmentForm::KeyedBySeedAndSalt);
        assert_eq!(
            engine.commit_seed("ab12").unwrap(),
            "09b7ecc0e2433ff3b41196c656e21ff6f6aa2a38080810c4b53228af2d13c6a8"
        );
    }

    #[test]
    fn commitment_form_is_configurable() {
        let engine = Engine::sha256().with_commitment_form(CommitmentForm::KeyedBySeed);
        assert_eq!(
            engine.commit_seed("ab12").unwrap(),
            "5adec9a63380928b02d61dd865b8d735e0e29b747f7400b28810cad4500cc589"
        );
        assert!(engine.verify_commitment("ab12", &engine.commit_seed("ab12").unwrap()).unwrap());
    }

    #[test]
    fn single_number_equals_unique_draw_of_one() {
        let engine = Engine::sha256();
        for nonce in 0..50 {
            let one = engine.generate_number(0..=10_000, "abc", nonce, "x").unwrap();
            let unique = engine.generate_unique_numbers(1, 0..=10_000, "abc", nonce, "x").unwrap();
            assert_eq!(unique, vec![one]);
        }
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(Engine::sha256());
        let handles: Vec<_> = (0..4)
            .map(|nonce| {
                let engine = std::sync::Arc::clone(&engine);
                std::thread::spawn(move || engine.generate_number(1..=6, "s", nonce, "c").unwrap())
            })
            .collect();

        for (nonce, handle) in handles.into_iter().enumerate() {
            let expected = engine.generate_number(1..=6, "s", nonce as u64, "c").unwrap();
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
