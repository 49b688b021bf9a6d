//! Draw error types.

use fairdraw_crypto::CryptoError;
use thiserror::Error;

/// Errors from draw operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// Upper bound is below the lower bound.
    #[error("invalid bounds: upper {upper} is below lower {lower}")]
    InvalidBounds {
        /// Requested lower bound.
        lower: i64,
        /// Requested upper bound.
        upper: i64,
    },

    /// Requested count is zero or exceeds the integers available in range.
    #[error("invalid range: cannot draw {count} unique values from {available}")]
    InvalidRange {
        /// Number of values requested.
        count: u64,
        /// Number of integers in the range.
        available: u64,
    },

    /// Range holds more integers than the 32-bit sampler can address.
    #[error("range too wide: {size} integers exceeds 2^32")]
    RangeTooWide {
        /// Number of integers in the range.
        size: u128,
    },

    /// Drawn value does not fit the game's result type.
    #[error("drawn value {value} is not representable in the result type")]
    Unrepresentable {
        /// Value returned by the selector.
        value: i64,
    },

    /// Keyed hash primitive failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl DrawError {
    /// Returns true if this error is fatal (unrecoverable).
    ///
    /// Input errors are the caller's to fix and retry. A missing keyed hash
    /// means no fair draw is possible at all, and an unrepresentable value
    /// means the selector left its range.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Crypto(_) | Self::Unrepresentable { .. } => true,

            Self::InvalidBounds { .. } | Self::InvalidRange { .. } | Self::RangeTooWide { .. } => {
                false
            },
        }
    }
}
