//! Error types shared across the crate.

use thiserror::Error;

use crate::registry::HashId;

/// Errors returned by state restoration and registry lookups.
///
/// Hashing itself never fails; only decoding a saved state record or asking a
/// registry for an algorithm can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The record does not start with the expected magic tag, or is too short to hold it.
    #[error("invalid hash state identifier")]
    InvalidFormat,

    /// The record carries the right tag but has the wrong total size.
    #[error("invalid hash state size: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// No constructor was registered for the requested algorithm.
    #[error("hash algorithm {0} is not registered")]
    Unregistered(HashId),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
