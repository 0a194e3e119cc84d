//! Binary snapshots of an [`Md5`] context for suspending and resuming a hash.
//!
//! Layout (integers big-endian):
//!
//! ```text
//! 0   magic "md5\x01"
//! 4   A, B, C, D          4 x u32
//! 20  block buffer        64 bytes, zero past the buffered length
//! 84  total byte count    u64
//! 92
//! ```
//!
//! The buffered length is not stored; it is recovered as the byte count modulo
//! the block size.

use log::{debug, trace};

use super::{Md5, MD5_BLOCK_SIZE};
use crate::error::{Error, Result};

/// Tag at the front of every state record.
pub const MARSHALED_MAGIC: &[u8; 4] = b"md5\x01";

/// Exact size of a state record in bytes.
pub const MARSHALED_SIZE: usize = MARSHALED_MAGIC.len() + 4 * 4 + MD5_BLOCK_SIZE + 8;

impl Md5 {
    /// Serializes the context into a fixed-size state record.
    pub fn marshal(&self) -> [u8; MARSHALED_SIZE] {
        let mut record = [0u8; MARSHALED_SIZE];
        let (magic, rest) = record.split_at_mut(MARSHALED_MAGIC.len());
        magic.copy_from_slice(MARSHALED_MAGIC);

        let (words, rest) = rest.split_at_mut(4 * 4);
        for (chunk, word) in words.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }

        // Only the live prefix is copied; the rest of the buffer stays zero.
        let (buffer, len) = rest.split_at_mut(MD5_BLOCK_SIZE);
        buffer[..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
        len.copy_from_slice(&self.len.to_be_bytes());

        record
    }

    /// Rebuilds a context from a record produced by [`Md5::marshal`].
    pub fn unmarshal(record: &[u8]) -> Result<Self> {
        let mut hasher = Self::new();
        hasher.restore(record)?;
        Ok(hasher)
    }

    /// Overwrites this context with the state held in `record`.
    ///
    /// On error `self` is left unchanged.
    pub fn restore(&mut self, record: &[u8]) -> Result<()> {
        let magic_len = MARSHALED_MAGIC.len();
        if record.len() < magic_len || &record[..magic_len] != MARSHALED_MAGIC {
            debug!("rejecting md5 state record: bad identifier");
            return Err(Error::InvalidFormat);
        }
        if record.len() != MARSHALED_SIZE {
            debug!(
                "rejecting md5 state record: {} bytes, expected {}",
                record.len(),
                MARSHALED_SIZE
            );
            return Err(Error::InvalidLength {
                expected: MARSHALED_SIZE,
                actual: record.len(),
            });
        }

        let mut rest = &record[magic_len..];
        for word in self.state.iter_mut() {
            let (head, tail) = rest.split_at(4);
            *word = u32::from_be_bytes([head[0], head[1], head[2], head[3]]);
            rest = tail;
        }

        let (buffer, len) = rest.split_at(MD5_BLOCK_SIZE);
        self.buffer.copy_from_slice(buffer);

        let mut len_bytes = [0u8; 8];
        len_bytes.copy_from_slice(len);
        self.len = u64::from_be_bytes(len_bytes);
        self.buffer_len = (self.len % MD5_BLOCK_SIZE as u64) as usize;

        trace!(
            "restored md5 state: {} bytes written, {} buffered",
            self.len,
            self.buffer_len
        );
        Ok(())
    }
}

impl TryFrom<&[u8]> for Md5 {
    type Error = Error;

    fn try_from(record: &[u8]) -> Result<Self> {
        Self::unmarshal(record)
    }
}
