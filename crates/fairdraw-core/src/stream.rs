//! Lazily extended keyed hash stream.
//!
//! The stream for a round is the concatenation of
//! `HMAC(server_seed, block_message(i))` for `i = 0, 1, 2, ...`, where block
//! `0` hashes the base message `"{client_seed}:{nonce}"` and block `i >= 1`
//! hashes `"{client_seed}:{nonce}:{i}"`.
//!
//! # Invariants
//!
//! - Blocks are generated strictly in index order, and only once the buffered
//!   bytes cannot satisfy a read
//! - Bytes are consumed strictly sequentially, 4 at a time; the global
//!   consumption order is part of the observable contract

use fairdraw_crypto::{CryptoError, Digest, Hmac256};

/// Builds the base message mixed into every block: `"{client_seed}:{nonce}"`.
pub fn base_message(client_seed: &str, nonce: u64) -> String {
    format!("{client_seed}:{nonce}")
}

/// Builds the message hashed for block `index`.
pub fn block_message(base: &str, index: u64) -> String {
    if index == 0 { base.to_string() } else { format!("{base}:{index}") }
}

/// Computes digest block `index` of the stream keyed by `key`.
///
/// # Errors
///
/// Returns [`CryptoError::Unavailable`] if the keyed hash cannot run.
pub fn block_digest<H: Hmac256 + ?Sized>(
    hmac: &H,
    key: &[u8],
    base: &str,
    index: u64,
) -> Result<Digest, CryptoError> {
    hmac.hmac256(key, block_message(base, index).as_bytes())
}

/// Cursor over the digest stream of a single round.
///
/// Holds only the bytes not yet consumed; fully consumed blocks are dropped
/// when the next block is appended.
pub struct DigestStream<'a, H: Hmac256 + ?Sized> {
    hmac: &'a H,
    key: &'a [u8],
    base: String,
    /// Unconsumed tail of the materialized stream.
    buffer: Vec<u8>,
    /// Read position inside `buffer`.
    position: usize,
    /// Total bytes consumed since the start of the stream.
    consumed: u64,
    next_block: u64,
}

impl<'a, H: Hmac256 + ?Sized> DigestStream<'a, H> {
    /// Create a stream keyed by `key` over the given base message.
    ///
    /// No digest is computed until the first read.
    pub fn new(hmac: &'a H, key: &'a [u8], base: String) -> Self {
        Self { hmac, key, base, buffer: Vec::new(), position: 0, consumed: 0, next_block: 0 }
    }

    /// Create the stream for a round: keyed by the server seed over
    /// `"{client_seed}:{nonce}"`.
    pub fn for_round(hmac: &'a H, server_seed: &'a str, client_seed: &str, nonce: u64) -> Self {
        Self::new(hmac, server_seed.as_bytes(), base_message(client_seed, nonce))
    }

    /// Reads the next 4 bytes as a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Unavailable`] if extending the stream fails.
    pub fn next_u32(&mut self) -> Result<u32, CryptoError> {
        let mut bytes = [0u8; 4];
        self.read_exact(&mut bytes)?;
        Ok(u32::from_be_bytes(bytes))
    }

    /// Fills `out` with the next `out.len()` bytes of the stream.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Unavailable`] if extending the stream fails.
    pub fn read_exact(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        while self.buffer.len() - self.position < out.len() {
            self.extend()?;
        }

        let end = self.position + out.len();
        out.copy_from_slice(&self.buffer[self.position..end]);
        self.position = end;
        self.consumed += out.len() as u64;
        Ok(())
    }

    /// Total bytes consumed so far.
    pub fn bytes_consumed(&self) -> u64 {
        self.consumed
    }

    /// Number of digest blocks generated so far.
    pub fn blocks_generated(&self) -> u64 {
        self.next_block
    }

    fn extend(&mut self) -> Result<(), CryptoError> {
        let digest = block_digest(self.hmac, self.key, &self.base, self.next_block)?;

        self.buffer.drain(..self.position);
        self.position = 0;
        self.buffer.extend_from_slice(&digest);

        tracing::trace!(block = self.next_block, buffered = self.buffer.len(), "extended stream");
        self.next_block += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use fairdraw_crypto::HmacSha256;

    use super::*;

    #[test]
    fn block_messages_append_index_after_first() {
        let base = base_message("client", 7);
        assert_eq!(base, "client:7");
        assert_eq!(block_message(&base, 0), "client:7");
        assert_eq!(block_message(&base, 1), "client:7:1");
        assert_eq!(block_message(&base, 12), "client:7:12");
    }

    #[test]
    fn nothing_is_hashed_before_first_read() {
        let hmac = HmacSha256::new();
        let stream = DigestStream::for_round(&hmac, "server", "client", 0);
        assert_eq!(stream.blocks_generated(), 0);
        assert_eq!(stream.bytes_consumed(), 0);
    }

    #[test]
    fn stream_concatenates_blocks_in_order() {
        let hmac = HmacSha256::new();
        let base = base_message("client", 3);
        let mut expected = Vec::new();
        for index in 0..3 {
            expected.extend_from_slice(&block_digest(&hmac, b"server", &base, index).unwrap());
        }

        let mut stream = DigestStream::for_round(&hmac, "server", "client", 3);
        let mut actual = vec![0u8; expected.len()];
        stream.read_exact(&mut actual).unwrap();

        assert_eq!(actual, expected);
        assert_eq!(stream.blocks_generated(), 3);
        assert_eq!(stream.bytes_consumed(), 96);
    }

    #[test]
    fn extends_only_when_buffer_is_exhausted() {
        let hmac = HmacSha256::new();
        let mut stream = DigestStream::for_round(&hmac, "server", "client", 0);

        for _ in 0..8 {
            stream.next_u32().unwrap();
        }
        assert_eq!(stream.blocks_generated(), 1);

        stream.next_u32().unwrap();
        assert_eq!(stream.blocks_generated(), 2);
        assert_eq!(stream.bytes_consumed(), 36);
    }

    #[test]
    fn reads_straddling_a_block_boundary() {
        let hmac = HmacSha256::new();
        let base = base_message("c", 1);
        let first = block_digest(&hmac, b"s", &base, 0).unwrap();
        let second = block_digest(&hmac, b"s", &base, 1).unwrap();

        let mut stream = DigestStream::for_round(&hmac, "s", "c", 1);
        let mut head = [0u8; 30];
        stream.read_exact(&mut head).unwrap();

        let value = stream.next_u32().unwrap();
        assert_eq!(value, u32::from_be_bytes([first[30], first[31], second[0], second[1]]));
    }
}
