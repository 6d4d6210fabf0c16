//! One lock per shard
//!
//! [`SharedShard`] puts a [`ShardStore`] behind a `parking_lot::RwLock` so a
//! server can dispatch fetches and pushes for the same shard from several
//! threads. Fetches and snapshot writes share the read lock; pushes and
//! snapshot reads take the write lock.

use crate::error::Result;
use crate::store::ShardStore;
use distmat_core::KeyCollection;
use distmat_wire::WireFormat;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::io::{Read, Write};
use std::sync::Arc;

/// Cloneable, thread-safe handle to a single shard
#[derive(Debug, Clone)]
pub struct SharedShard {
    inner: Arc<RwLock<ShardStore>>,
}

impl SharedShard {
    /// Wrap a store
    pub fn new(store: ShardStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Fetch under the read lock
    pub fn fetch(&self, format: &WireFormat, requested: &KeyCollection) -> Result<Vec<u8>> {
        self.inner.read().fetch(format, requested)
    }

    /// Push under the write lock
    pub fn push(&self, format: &WireFormat, buf: &[u8]) -> Result<usize> {
        self.inner.write().push(format, buf)
    }

    /// Snapshot every row under the read lock
    pub fn write_all<W: Write>(&self, sink: &mut W) -> Result<()> {
        self.inner.read().write_all(sink)
    }

    /// Restore every row under the write lock
    pub fn read_all<R: Read>(&self, source: &mut R) -> Result<()> {
        self.inner.write().read_all(source)
    }

    /// Stream rows `from..=to` under the read lock
    pub fn write_range<W: Write>(&self, sink: &mut W, from: usize, to: usize) -> Result<()> {
        self.inner.read().write_range(sink, from, to)
    }

    /// Overwrite rows `from..=to` under the write lock
    pub fn read_range<R: Read>(&self, source: &mut R, from: usize, to: usize) -> Result<()> {
        self.inner.write().read_range(source, from, to)
    }

    /// Direct read access for iteration or inspection
    pub fn read(&self) -> RwLockReadGuard<'_, ShardStore> {
        self.inner.read()
    }

    /// Direct write access for seeding or in-place edits
    pub fn write(&self) -> RwLockWriteGuard<'_, ShardStore> {
        self.inner.write()
    }
}

impl From<ShardStore> for SharedShard {
    fn from(store: ShardStore) -> Self {
        SharedShard::new(store)
    }
}
