//! Core types for distributed matrix shards
//!
//! This crate defines the key model shared by the wire codec and the shard store:
//! - [`Key`]: a global row key
//! - [`KeyRange`]: a contiguous interval of keys
//! - [`KeyHash`]: a fixed-stride set of keys
//! - [`KeyList`]: an explicit, sorted set of keys
//! - [`KeyCollection`]: the tagged union over all of the above, plus `All`
//! - [`KeySpace`]: the addressable subset (`Range` or `Hash`) a shard owns
//!
//! Only `Range` and `Hash` collections can serve as a shard's key space, since
//! they are the only variants with a closed-form key/local-index mapping.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod keys;
pub mod space;

pub use keys::{Key, KeyCollection, KeyHash, KeyList, KeyRange, Keys};
pub use space::KeySpace;
