//! MD5 (RFC 1321) with resumable state.
//!
//! DISCLAIMER: MD5 is broken. Collisions can be produced on commodity hardware.
//! Use it for checksums and legacy interoperability only, never for signatures,
//! passwords or anything else that needs collision or preimage resistance.
//!
//! # Examples
//!
//! ```rust
//! use md5_resume::md5::Md5;
//!
//! let mut hasher = Md5::new();
//! hasher.write(b"12345");
//!
//! // Suspend: the record can be stored anywhere and restored later.
//! let record = hasher.marshal();
//! let mut resumed = Md5::unmarshal(&record).unwrap();
//! resumed.write(b"67890");
//!
//! assert_eq!(resumed.sum(), md5_resume::md5_digest(b"1234567890"));
//! ```

mod block;
mod digest;
mod state;

pub use digest::Md5;
pub use state::{MARSHALED_MAGIC, MARSHALED_SIZE};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The size of the MD5 digest in bytes (128 bits = 16 bytes).
pub const MD5_OUTPUT_SIZE: usize = 16;

/// The MD5 block size in bytes.
pub const MD5_BLOCK_SIZE: usize = 64;

/// The initial values for (A, B, C, D) from the MD5 specification.
const INIT_STATE: [u32; 4] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476];

/// Convenience function to compute an MD5 digest in a single shot.
pub fn md5_digest(data: &[u8]) -> [u8; MD5_OUTPUT_SIZE] {
    let mut hasher = Md5::new();
    hasher.write(data);
    hasher.sum()
}

/// Digests many independent messages, returning results in input order.
///
/// With the `parallel` feature the messages are spread over the rayon pool.
pub fn sum_all<T>(messages: &[T]) -> Vec<[u8; MD5_OUTPUT_SIZE]>
where
    T: AsRef<[u8]> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        messages.par_iter().map(|m| md5_digest(m.as_ref())).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        messages.iter().map(|m| md5_digest(m.as_ref())).collect()
    }
}
