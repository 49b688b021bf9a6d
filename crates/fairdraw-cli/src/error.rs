//! CLI error types.

use fairdraw_core::{CryptoError, DrawError};
use thiserror::Error;

/// Errors from running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Draw failed.
    #[error("draw error: {0}")]
    Draw(#[from] DrawError),

    /// Commitment failed.
    #[error("commitment error: {0}")]
    Crypto(#[from] CryptoError),

    /// OS entropy could not be read.
    #[error("entropy unavailable: {reason}")]
    Entropy {
        /// Description of the entropy failure.
        reason: String,
    },

    /// JSON encoding failed.
    #[error("encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
