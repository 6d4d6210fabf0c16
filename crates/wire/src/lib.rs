//! Wire encoding for distributed matrix rows
//!
//! This crate implements the byte-level contract for moving shard rows across
//! the network. A [`WireFormat`] picks the key width, the row layout and the
//! byte order; encoder and decoder must agree on all three.
//!
//! ## Record Layouts
//!
//! | Layout | Per-row encoding |
//! |--------|------------------|
//! | Dense | `key` + `row_width × f32` |
//! | Sparse | `key` + `count: i32` + `count × (column: i32, value: f32)` |
//!
//! Records are concatenated with no outer framing; a buffer ends exactly where
//! its last record ends.
//!
//! ## Examples
//!
//! ```
//! use distmat_wire::{KeySize, WireFormat, WireWriter, Records};
//!
//! let format = WireFormat::dense(KeySize::Long);
//! let row = [1.5f32, -2.0];
//! let mut buf = vec![0u8; format.record_len(&row)];
//! WireWriter::new(format, &mut buf).put_record(101, &row).unwrap();
//!
//! let record = Records::new(format, &buf, 2).next().unwrap().unwrap();
//! assert_eq!(record.key, 101);
//! assert_eq!(record.body.entries().collect::<Vec<_>>(), vec![(0, 1.5), (1, -2.0)]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod format;
pub mod record;

// Re-export main types
pub use codec::{WireReader, WireWriter};
pub use error::WireError;
pub use format::{
    count_nonzero, Endian, KeySize, Layout, WireFormat, COUNT_SIZE, INDEX_SIZE,
    SPARSE_ENTRY_SIZE, VALUE_SIZE,
};
pub use record::{Entries, Record, Records, RowBody};
