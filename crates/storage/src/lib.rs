//! Storage layer for distributed matrix shards
//!
//! This crate implements the local side of a row-addressable matrix:
//! - ShardStore: dense row arena keyed by a range or hash key space
//! - Fetch/push wire protocol over dense and sparse layouts
//! - Raw snapshot and row-range transfer
//! - SharedShard: one lock per shard for concurrent dispatch
//! - ShardConfig / SeedMode: JSON-loadable shard description

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
mod protocol;
pub mod shared;
mod snapshot;
pub mod store;

pub use config::{SeedMode, ShardConfig};
pub use error::{Result, ShardError};
pub use shared::SharedShard;
pub use store::ShardStore;
