//! Convenient imports for Distmat.
//!
//! ```
//! use distmat::prelude::*;
//!
//! let shard = ShardStore::init(KeyCollection::hash(0, 4, 16), 8)?;
//! assert_eq!(shard.row_count(), 16);
//! # Ok::<(), distmat::Error>(())
//! ```

// Shard store
pub use crate::{SeedMode, ShardConfig, ShardStore, SharedShard};

// Error handling
pub use crate::{Error, Result};

// Keys
pub use crate::{Key, KeyCollection, KeySpace};

// Wire format
pub use crate::{Endian, KeySize, Layout, WireFormat};
