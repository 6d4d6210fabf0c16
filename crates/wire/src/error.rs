//! Wire codec errors

use distmat_core::Key;
use thiserror::Error;

/// Errors raised while encoding or decoding row buffers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// Buffer ended in the middle of a field
    #[error("truncated buffer at offset {offset}: need {needed} bytes, have {remaining}")]
    Truncated {
        /// Offset of the field being read
        offset: usize,
        /// Bytes the field requires
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// Key does not fit the descriptor's key width
    #[error("key {key} does not fit in a {key_size}-byte key")]
    KeyOverflow {
        /// Offending key
        key: Key,
        /// Key width in bytes
        key_size: usize,
    },

    /// Sparse record announced a negative entry count
    #[error("negative sparse entry count {count} at offset {offset}")]
    NegativeCount {
        /// Offset of the count field
        offset: usize,
        /// Decoded count
        count: i32,
    },
}
