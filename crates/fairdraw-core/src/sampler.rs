//! Unbiased sampling from the digest stream.
//!
//! Each candidate is the next 4 stream bytes read as a big-endian `u32`.
//! Candidates at or above the largest multiple of `range` that fits in
//! `2^32` are rejected, so the accepted `candidate % range` is exactly
//! uniform over `[0, range)`. All limit arithmetic is done in `u64`.

use fairdraw_crypto::{CryptoError, Hmac256};

use crate::stream::DigestStream;

/// Size of the candidate space, `2^32`.
pub const SAMPLE_SPACE: u64 = 1 << 32;

/// Largest multiple of `range` not exceeding `2^32`.
///
/// Candidates below this limit are accepted.
pub fn acceptance_limit(range: u64) -> u64 {
    (SAMPLE_SPACE / range) * range
}

/// Rejection sampler over `[0, range)`.
#[derive(Debug, Clone)]
pub struct UnbiasedSampler {
    range: u64,
    limit: u64,
    rejections: u64,
}

impl UnbiasedSampler {
    /// Create a sampler for `[0, range)`.
    ///
    /// Returns `None` unless `1 <= range <= 2^32`.
    pub fn new(range: u64) -> Option<Self> {
        if range == 0 || range > SAMPLE_SPACE {
            return None;
        }
        Some(Self { range, limit: acceptance_limit(range), rejections: 0 })
    }

    /// Draws the next accepted value from `stream`.
    ///
    /// Rejected candidates consume their 4 bytes and are otherwise invisible.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Unavailable`] if the stream cannot be extended.
    pub fn draw<H: Hmac256 + ?Sized>(
        &mut self,
        stream: &mut DigestStream<'_, H>,
    ) -> Result<u64, CryptoError> {
        loop {
            let candidate = u64::from(stream.next_u32()?);
            if candidate < self.limit {
                return Ok(candidate % self.range);
            }
            self.rejections += 1;
        }
    }

    /// Sampled range size.
    pub fn range(&self) -> u64 {
        self.range
    }

    /// Candidates rejected so far.
    pub fn rejections(&self) -> u64 {
        self.rejections
    }
}
