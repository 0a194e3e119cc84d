//! The MD5 compression function (RFC 1321, section 3.4).

use super::MD5_BLOCK_SIZE;

/// The sine table constants (K) in MD5 (32 bits).
/// K[i] = floor(2^32 * abs(sin(i+1))) for i=0..63
#[rustfmt::skip]
const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
    0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
    0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
    0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
    0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
    0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
    0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
    0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
    0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// Left rotation applied at each step, four distinct amounts per round.
#[rustfmt::skip]
const S: [u32; 64] = [
    // Round 1
    7, 12, 17, 22,  7, 12, 17, 22,  7, 12, 17, 22,  7, 12, 17, 22,
    // Round 2
    5, 9, 14, 20,   5, 9, 14, 20,   5, 9, 14, 20,   5, 9, 14, 20,
    // Round 3
    4, 11, 16, 23,  4, 11, 16, 23,  4, 11, 16, 23,  4, 11, 16, 23,
    // Round 4
    6, 10, 15, 21,  6, 10, 15, 21,  6, 10, 15, 21,  6, 10, 15, 21,
];

/// Runs one 64-byte block through the compression function, folding the
/// result into `state`.
///
/// `block.len()` must equal [`MD5_BLOCK_SIZE`].
pub(crate) fn process_block(state: &mut [u32; 4], block: &[u8]) {
    debug_assert_eq!(block.len(), MD5_BLOCK_SIZE);
    let mut w = [0u32; 16];
    for (word, bytes) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }

    let [mut a, mut b, mut c, mut d] = *state;

    for i in 0..64 {
        let (f, g) = match i {
            // F
            0..=15 => ((b & c) | (!b & d), i),
            // G
            16..=31 => ((b & d) | (c & !d), (5 * i + 1) % 16),
            // H
            32..=47 => (b ^ c ^ d, (3 * i + 5) % 16),
            // I
            _ => (c ^ (b | !d), (7 * i) % 16),
        };

        let temp = a.wrapping_add(f).wrapping_add(w[g]).wrapping_add(K[i]);

        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(temp.rotate_left(S[i]));
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}

/// Compresses every whole block of `data` in order.
///
/// `data.len()` must be a multiple of [`MD5_BLOCK_SIZE`].
pub(crate) fn process_blocks(state: &mut [u32; 4], data: &[u8]) {
    debug_assert_eq!(data.len() % MD5_BLOCK_SIZE, 0);
    for block in data.chunks_exact(MD5_BLOCK_SIZE) {
        process_block(state, block);
    }
}
