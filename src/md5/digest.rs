use std::fmt;
use std::io;

use super::block::{process_block, process_blocks};
use super::{INIT_STATE, MD5_BLOCK_SIZE, MD5_OUTPUT_SIZE};

/// A streaming MD5 context.
///
/// Bytes go in through [`Md5::write`] in any number of pieces. [`Md5::sum`]
/// finalizes a private copy, so the context can keep accepting input after a
/// digest has been taken.
#[derive(Clone)]
pub struct Md5 {
    /// State (A, B, C, D), each 32 bits.
    pub(super) state: [u32; 4],
    /// Bytes not yet forming a whole block.
    pub(super) buffer: [u8; MD5_BLOCK_SIZE],
    /// Number of valid bytes in `buffer`, always below `MD5_BLOCK_SIZE` between calls.
    pub(super) buffer_len: usize,
    /// Total bytes ever written, modulo 2^64.
    pub(super) len: u64,
}

impl Md5 {
    /// Creates a new MD5 context.
    pub fn new() -> Self {
        Self {
            state: INIT_STATE,
            buffer: [0u8; MD5_BLOCK_SIZE],
            buffer_len: 0,
            len: 0,
        }
    }

    /// Returns the context to the "nothing written" state.
    pub fn reset(&mut self) {
        self.state = INIT_STATE;
        self.buffer_len = 0;
        self.len = 0;
    }

    /// Total number of bytes written since creation or the last reset.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True if nothing has been written since creation or the last reset.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Feeds `data` into the hash and returns how many bytes were accepted,
    /// which is always `data.len()`.
    pub fn write(&mut self, data: &[u8]) -> usize {
        let accepted = data.len();
        self.len = self.len.wrapping_add(accepted as u64);

        let mut rest = data;
        if self.buffer_len > 0 {
            let n = rest.len().min(MD5_BLOCK_SIZE - self.buffer_len);
            self.buffer[self.buffer_len..self.buffer_len + n].copy_from_slice(&rest[..n]);
            self.buffer_len += n;
            if self.buffer_len == MD5_BLOCK_SIZE {
                process_block(&mut self.state, &self.buffer);
                self.buffer_len = 0;
            }
            rest = &rest[n..];
        }

        if rest.len() >= MD5_BLOCK_SIZE {
            // Whole blocks are compressed straight from the input.
            let n = rest.len() & !(MD5_BLOCK_SIZE - 1);
            process_blocks(&mut self.state, &rest[..n]);
            rest = &rest[n..];
        }

        if !rest.is_empty() {
            self.buffer[..rest.len()].copy_from_slice(rest);
            self.buffer_len = rest.len();
        }

        accepted
    }

    /// Returns the digest of everything written so far.
    ///
    /// `self` is not modified: the padding is applied to a copy, so further
    /// writes continue the same message.
    pub fn sum(&self) -> [u8; MD5_OUTPUT_SIZE] {
        let mut copy = self.clone();
        copy.finalize()
    }

    /// Pads the message and extracts the digest. Only ever called on a copy.
    fn finalize(&mut self) -> [u8; MD5_OUTPUT_SIZE] {
        // 1 byte end marker :: 0-63 zero bytes :: 8 byte bit length
        let mut tail = [0u8; 1 + 63 + 8];
        tail[0] = 0x80;
        let pad = (55u64.wrapping_sub(self.len) % MD5_BLOCK_SIZE as u64) as usize;
        let bit_len = self.len << 3;
        tail[1 + pad..1 + pad + 8].copy_from_slice(&bit_len.to_le_bytes());
        self.write(&tail[..1 + pad + 8]);

        assert_eq!(self.buffer_len, 0, "md5 padding left a partial block in the buffer");

        let mut output = [0u8; MD5_OUTPUT_SIZE];
        for (chunk, word) in output.chunks_exact_mut(4).zip(self.state) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        output
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

// Buffered message bytes stay out of debug output.
impl fmt::Debug for Md5 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5")
            .field("len", &self.len)
            .field("buffer_len", &self.buffer_len)
            .finish_non_exhaustive()
    }
}

impl io::Write for Md5 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Md5::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn digest_of(data: &[u8]) -> [u8; MD5_OUTPUT_SIZE] {
        let mut hasher = Md5::new();
        hasher.write(data);
        hasher.sum()
    }

    // Known test vectors from RFC 1321

    #[test]
    fn test_md5_empty() {
        assert_eq!(hex::encode(digest_of(b"")), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_md5_abc() {
        assert_eq!(hex::encode(digest_of(b"abc")), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_md5_rfc1321_suite() {
        let vectors: [(&[u8], &str); 5] = [
            (b"a", "0cc175b9c0f1b6a831c399e269772661"),
            (b"message digest", "f96b697d7cb7938d525a2f31aaf161d0"),
            (b"abcdefghijklmnopqrstuvwxyz", "c3fcd3d76192e4007dfb496cca67e13b"),
            (
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
                "d174ab98d277d9f5a5611c2c9f419d9f",
            ),
            (
                b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
                "57edf4a22be3c955ac49da2e2107b67a",
            ),
        ];
        for (input, expected) in vectors {
            assert_eq!(hex::encode(digest_of(input)), expected);
        }
    }

    #[test]
    fn test_split_write_matches_single_write() {
        let mut split = Md5::new();
        split.write(b"12345");
        split.write(b"67890");
        assert_eq!(split.sum(), digest_of(b"1234567890"));
    }

    #[test]
    fn test_write_returns_input_length() {
        let mut hasher = Md5::new();
        assert_eq!(hasher.write(b""), 0);
        assert_eq!(hasher.write(&[7u8; 200]), 200);
        assert_eq!(hasher.len(), 200);
        assert_eq!(hasher.buffer_len, 200 % MD5_BLOCK_SIZE);
    }

    #[test]
    fn test_random_chunking_is_invariant() {
        let mut rng = StdRng::seed_from_u64(0x6d64_35);
        for _ in 0..50 {
            let len = rng.gen_range(0..600);
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let expected = digest_of(&data);

            let mut hasher = Md5::new();
            let mut rest = &data[..];
            while !rest.is_empty() {
                let n = rng.gen_range(0..=rest.len().min(150));
                hasher.write(&rest[..n]);
                rest = &rest[n..];
                assert!(hasher.buffer_len < MD5_BLOCK_SIZE);
            }
            assert_eq!(hasher.sum(), expected);
        }
    }

    #[test]
    fn test_sum_does_not_disturb_state() {
        let mut hasher = Md5::new();
        hasher.write(b"hello ");
        let first = hasher.sum();
        assert_eq!(hasher.sum(), first);
        assert_eq!(first, digest_of(b"hello "));

        hasher.write(b"world");
        assert_eq!(hasher.sum(), digest_of(b"hello world"));
    }

    #[test]
    fn test_padding_boundaries() {
        // Lengths around the 56-byte point where the length field spills into a second block.
        for len in [55usize, 56, 57, 63, 64, 65, 119, 120, 128] {
            let data = vec![b'x'; len];
            let mut byte_at_a_time = Md5::new();
            for b in &data {
                byte_at_a_time.write(std::slice::from_ref(b));
            }
            assert_eq!(byte_at_a_time.sum(), digest_of(&data), "length {len}");
        }
    }

    #[test]
    fn test_reset_matches_fresh_context() {
        let mut hasher = Md5::new();
        hasher.write(b"some bytes that will be discarded");
        hasher.reset();
        assert!(hasher.is_empty());
        assert_eq!(hasher.sum(), Md5::new().sum());
        assert_eq!(hex::encode(hasher.sum()), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_io_write_and_copy() {
        use std::io::Write;

        let mut hasher = Md5::new();
        let mut reader: &[u8] = b"The quick brown fox jumps over the lazy dog";
        let copied = io::copy(&mut reader, &mut hasher).unwrap();
        assert_eq!(copied, 43);
        hasher.flush().unwrap();
        assert_eq!(hex::encode(hasher.sum()), "9e107d9d372bb6826bd81d3542a419d6");
    }

    #[test]
    fn test_debug_hides_buffer() {
        let mut hasher = Md5::new();
        hasher.write(b"secret");
        let rendered = format!("{hasher:?}");
        assert!(rendered.contains("len: 6"));
        assert!(!rendered.contains("buffer:"));
    }
}
