//! # Distmat
//!
//! Shard-local storage for a distributed parameter matrix.
//!
//! A shard owns a subset of matrix rows, either a contiguous key range or a
//! fixed-stride hash partition, and answers two remote operations:
//!
//! - **fetch** (pull): serialize the owned subset of a requested key set
//! - **push**: add the rows of an incoming buffer into local rows in place
//!
//! Rows travel in one of two layouts chosen by a [`WireFormat`]: dense (every
//! column) or sparse (non-zero columns tagged with their index).
//!
//! ## Quick Start
//!
//! ```
//! use distmat::prelude::*;
//!
//! let mut shard = ShardStore::init(KeyCollection::range(100, 3), 2)?;
//! shard.row_mut(101)?.copy_from_slice(&[1.5, -2.0]);
//!
//! let format = WireFormat::sparse(KeySize::Long);
//! let buf = shard.fetch(&format, &KeyCollection::list(vec![101, 500]))?;
//!
//! let mut mirror = ShardStore::init(KeyCollection::range(100, 3), 2)?;
//! mirror.push(&format, &buf)?;
//! assert_eq!(mirror.row(101)?, &[1.5, -2.0]);
//! # Ok::<(), distmat::Error>(())
//! ```
//!
//! ## Crates
//!
//! - `distmat-core` - keys, key collections, addressable key spaces
//! - `distmat-wire` - wire-format descriptor and record codec
//! - `distmat-storage` - the shard store, snapshots, shared handle, config

#![warn(missing_docs)]

pub mod prelude;

// Re-export main entry points
pub use distmat_storage::{Result, SeedMode, ShardConfig, ShardError as Error, ShardStore, SharedShard};

// Re-export key and wire types
pub use distmat_core::{Key, KeyCollection, KeyHash, KeyList, KeyRange, KeySpace};
pub use distmat_wire::{
    Endian, KeySize, Layout, Record, Records, RowBody, WireError, WireFormat, WireReader, WireWriter,
};
