//! Explicit algorithm registry.
//!
//! A host application that wants to look hashers up by identifier builds a
//! [`HashRegistry`] at startup and registers what it needs, e.g. with
//! [`register_md5`]. Nothing is registered implicitly.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::error::{Error, Result};
use crate::md5::{Md5, MD5_BLOCK_SIZE, MD5_OUTPUT_SIZE};

/// Symbolic identifiers for hash algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashId {
    Md5,
}

impl HashId {
    /// Lowercase algorithm name.
    pub fn name(self) -> &'static str {
        match self {
            HashId::Md5 => "md5",
        }
    }
}

impl fmt::Display for HashId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Object-safe view of a streaming hasher.
pub trait StreamingHash: Send {
    /// Feeds bytes in; returns the number accepted.
    fn write(&mut self, data: &[u8]) -> usize;

    /// Digest of everything written so far, without consuming the state.
    fn sum(&self) -> Vec<u8>;

    fn reset(&mut self);

    fn output_size(&self) -> usize;

    fn block_size(&self) -> usize;

    fn box_clone(&self) -> Box<dyn StreamingHash>;

    /// Snapshot of the internal state that [`StreamingHash::restore`] accepts.
    fn marshal(&self) -> Vec<u8>;

    /// Replaces the internal state with a snapshot from [`StreamingHash::marshal`].
    fn restore(&mut self, record: &[u8]) -> Result<()>;
}

impl StreamingHash for Md5 {
    fn write(&mut self, data: &[u8]) -> usize {
        Md5::write(self, data)
    }

    fn sum(&self) -> Vec<u8> {
        Md5::sum(self).to_vec()
    }

    fn reset(&mut self) {
        Md5::reset(self)
    }

    fn output_size(&self) -> usize {
        MD5_OUTPUT_SIZE
    }

    fn block_size(&self) -> usize {
        MD5_BLOCK_SIZE
    }

    fn box_clone(&self) -> Box<dyn StreamingHash> {
        Box::new(self.clone())
    }

    fn marshal(&self) -> Vec<u8> {
        Md5::marshal(self).to_vec()
    }

    fn restore(&mut self, record: &[u8]) -> Result<()> {
        Md5::restore(self, record)
    }
}

impl Clone for Box<dyn StreamingHash> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

/// Constructor stored in a registry.
pub type HashConstructor = fn() -> Box<dyn StreamingHash>;

/// Maps algorithm identifiers to constructors.
#[derive(Debug, Default, Clone)]
pub struct HashRegistry {
    constructors: HashMap<HashId, HashConstructor>,
}

impl HashRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Associates `id` with `constructor`, returning the constructor it replaces, if any.
    pub fn register(
        &mut self,
        id: HashId,
        constructor: HashConstructor,
    ) -> Option<HashConstructor> {
        let previous = self.constructors.insert(id, constructor);
        if previous.is_some() {
            debug!("replaced hash algorithm {id}");
        } else {
            debug!("registered hash algorithm {id}");
        }
        previous
    }

    pub fn is_registered(&self, id: HashId) -> bool {
        self.constructors.contains_key(&id)
    }

    /// Builds a fresh hasher for `id`.
    pub fn new_hasher(&self, id: HashId) -> Result<Box<dyn StreamingHash>> {
        self.constructors
            .get(&id)
            .map(|construct| construct())
            .ok_or(Error::Unregistered(id))
    }
}

fn new_md5() -> Box<dyn StreamingHash> {
    Box::new(Md5::new())
}

/// Registers MD5 under [`HashId::Md5`].
pub fn register_md5(registry: &mut HashRegistry) {
    registry.register(HashId::Md5, new_md5);
}
