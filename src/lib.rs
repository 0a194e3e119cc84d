//! Streaming MD5 whose intermediate state can be saved to a compact binary
//! record and resumed later, possibly in another process.
//!
//! MD5 is cryptographically broken; see the [`md5`] module docs.

pub mod error;
pub mod md5;
pub mod registry;

pub use error::{Error, Result};
pub use md5::{md5_digest, sum_all, Md5, MD5_BLOCK_SIZE, MD5_OUTPUT_SIZE};
pub use registry::{register_md5, HashId, HashRegistry, StreamingHash};
