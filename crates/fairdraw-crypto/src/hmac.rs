//! Keyed hash capability.
//!
//! The [`Hmac256`] trait decouples the draw engine from the concrete hash
//! implementation. Production code injects [`HmacSha256`]; tests inject
//! doubles that count or refuse calls.
//!
//! # Invariants
//!
//! - Determinism: the same `(key, message)` always yields the same digest
//! - Purity: implementations perform no I/O and keep no observable state
//! - No degradation: an implementation that cannot compute a real keyed hash
//!   MUST return [`CryptoError::Unavailable`], never a substitute digest

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

/// Length in bytes of every digest produced by an [`Hmac256`].
pub const DIGEST_SIZE: usize = 32;

/// A single 256-bit keyed hash output.
pub type Digest = [u8; DIGEST_SIZE];

/// Errors from the keyed hash capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// No usable keyed hash primitive could produce a digest.
    #[error("keyed hash primitive unavailable: {reason}")]
    Unavailable {
        /// Description of why the primitive failed.
        reason: String,
    },
}

/// Capability computing a 256-bit keyed hash of a message.
///
/// Resolved once outside the engine and injected at construction time.
pub trait Hmac256: Send + Sync {
    /// Computes the keyed hash of `message` under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Unavailable`] if the primitive cannot run.
    fn hmac256(&self, key: &[u8], message: &[u8]) -> Result<Digest, CryptoError>;
}

impl<H: Hmac256 + ?Sized> Hmac256 for &H {
    fn hmac256(&self, key: &[u8], message: &[u8]) -> Result<Digest, CryptoError> {
        (**self).hmac256(key, message)
    }
}

/// HMAC-SHA256, the production keyed hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256;

impl HmacSha256 {
    /// Create the HMAC-SHA256 capability.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Hmac256 for HmacSha256 {
    fn hmac256(&self, key: &[u8], message: &[u8]) -> Result<Digest, CryptoError> {
        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(key)
            .map_err(|e| CryptoError::Unavailable { reason: e.to_string() })?;
        mac.update(message);

        let mut digest = [0u8; DIGEST_SIZE];
        digest.copy_from_slice(&mac.finalize().into_bytes());
        Ok(digest)
    }
}
