//! Shard store errors
//!
//! Every variant is a local invariant violation surfaced to the caller as
//! soon as it is detected. Nothing here is retried.

use distmat_core::Key;
use distmat_wire::WireError;
use thiserror::Error;

/// All shard store errors
#[derive(Debug, Error)]
pub enum ShardError {
    /// Key space has no closed-form key/index mapping
    #[error("invalid key space: {kind} collections cannot back a shard")]
    InvalidKeySpace {
        /// Variant name of the rejected collection
        kind: &'static str,
    },

    /// Row width must be at least one column
    #[error("invalid row width: {0}")]
    InvalidRowWidth(usize),

    /// Row storage would not fit in memory
    #[error("shard of {rows} rows x {row_width} columns exceeds addressable memory")]
    CapacityOverflow {
        /// Requested rows
        rows: u64,
        /// Requested row width
        row_width: usize,
    },

    /// Key is not owned by this shard
    #[error("key {key} is not owned by this shard")]
    UnauthorizedKey {
        /// Offending key
        key: Key,
    },

    /// Sparse entry addresses a column outside the row
    #[error("column {column} out of range for row width {row_width} (key {key})")]
    ColumnOutOfRange {
        /// Row the entry targets
        key: Key,
        /// Decoded column index
        column: i32,
        /// Row width of this shard
        row_width: usize,
    },

    /// Local index interval reaches past the last row
    #[error("row range [{from}, {to}] out of bounds for {row_count} rows")]
    RangeOutOfBounds {
        /// First local index
        from: usize,
        /// Last local index, inclusive
        to: usize,
        /// Rows held by this shard
        row_count: usize,
    },

    /// Malformed or unencodable wire buffer
    #[error("wire error: {0}")]
    Wire(#[from] WireError),

    /// I/O error during snapshot transfer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for shard store operations
pub type Result<T> = std::result::Result<T, ShardError>;

impl ShardError {
    /// Check if the error points at a malformed incoming buffer
    pub fn is_malformed_buffer(&self) -> bool {
        matches!(
            self,
            ShardError::ColumnOutOfRange { .. }
                | ShardError::Wire(WireError::Truncated { .. })
                | ShardError::Wire(WireError::NegativeCount { .. })
        )
    }

    /// Check if the error points at a request routed to the wrong shard
    pub fn is_routing_error(&self) -> bool {
        matches!(self, ShardError::UnauthorizedKey { .. })
    }
}

impl From<serde_json::Error> for ShardError {
    fn from(e: serde_json::Error) -> Self {
        ShardError::Config(e.to_string())
    }
}
