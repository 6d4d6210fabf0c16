//! Wire-format descriptor
//!
//! Describes how keys and row bodies are laid out in a buffer. The descriptor
//! is a small `Copy` value handed to both sides of a transfer.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};

/// Size of one encoded value (f32)
pub const VALUE_SIZE: usize = 4;

/// Size of one encoded column index (i32)
pub const INDEX_SIZE: usize = 4;

/// Size of the sparse per-row entry count (i32)
pub const COUNT_SIZE: usize = 4;

/// Size of one sparse `(column, value)` entry
pub const SPARSE_ENTRY_SIZE: usize = INDEX_SIZE + VALUE_SIZE;

/// Encoded key width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySize {
    /// 4-byte signed key
    Int,
    /// 8-byte signed key
    #[default]
    Long,
}

impl KeySize {
    /// Width in bytes
    pub fn bytes(&self) -> usize {
        match self {
            KeySize::Int => 4,
            KeySize::Long => 8,
        }
    }
}

/// Row body layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Every column, in column order
    #[default]
    Dense,
    /// Non-zero columns only, each tagged with its column index
    Sparse,
}

/// Byte order of every fixed-width field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endian {
    /// Network order
    #[default]
    Big,
    /// Little-endian
    Little,
}

impl Endian {
    pub(crate) fn read_i32(self, buf: &[u8]) -> i32 {
        match self {
            Endian::Big => BigEndian::read_i32(buf),
            Endian::Little => LittleEndian::read_i32(buf),
        }
    }

    pub(crate) fn read_i64(self, buf: &[u8]) -> i64 {
        match self {
            Endian::Big => BigEndian::read_i64(buf),
            Endian::Little => LittleEndian::read_i64(buf),
        }
    }

    pub(crate) fn read_f32(self, buf: &[u8]) -> f32 {
        match self {
            Endian::Big => BigEndian::read_f32(buf),
            Endian::Little => LittleEndian::read_f32(buf),
        }
    }

    pub(crate) fn write_i32(self, buf: &mut [u8], v: i32) {
        match self {
            Endian::Big => BigEndian::write_i32(buf, v),
            Endian::Little => LittleEndian::write_i32(buf, v),
        }
    }

    pub(crate) fn write_i64(self, buf: &mut [u8], v: i64) {
        match self {
            Endian::Big => BigEndian::write_i64(buf, v),
            Endian::Little => LittleEndian::write_i64(buf, v),
        }
    }

    pub(crate) fn write_f32(self, buf: &mut [u8], v: f32) {
        match self {
            Endian::Big => BigEndian::write_f32(buf, v),
            Endian::Little => LittleEndian::write_f32(buf, v),
        }
    }
}

/// Wire-format descriptor: key width, row layout, byte order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct WireFormat {
    /// Encoded key width
    pub key_size: KeySize,
    /// Row body layout
    pub layout: Layout,
    /// Byte order of keys, counts, indices and values
    #[serde(default)]
    pub endian: Endian,
}

impl WireFormat {
    /// Dense layout, big-endian
    pub fn dense(key_size: KeySize) -> Self {
        Self {
            key_size,
            layout: Layout::Dense,
            endian: Endian::Big,
        }
    }

    /// Sparse layout, big-endian
    pub fn sparse(key_size: KeySize) -> Self {
        Self {
            key_size,
            layout: Layout::Sparse,
            endian: Endian::Big,
        }
    }

    /// Same descriptor with a different byte order
    pub fn with_endian(mut self, endian: Endian) -> Self {
        self.endian = endian;
        self
    }

    /// Key width in bytes
    #[inline]
    pub fn key_bytes(&self) -> usize {
        self.key_size.bytes()
    }

    /// Whether rows are sent in full
    #[inline]
    pub fn is_dense(&self) -> bool {
        self.layout == Layout::Dense
    }

    /// Encoded length of a dense record for `row_width` columns
    #[inline]
    pub fn dense_record_len(&self, row_width: usize) -> usize {
        self.key_bytes() + row_width * VALUE_SIZE
    }

    /// Encoded length of a sparse record carrying `nnz` entries
    #[inline]
    pub fn sparse_record_len(&self, nnz: usize) -> usize {
        self.key_bytes() + COUNT_SIZE + nnz * SPARSE_ENTRY_SIZE
    }

    /// Encoded length of the record for `row` under this layout
    pub fn record_len(&self, row: &[f32]) -> usize {
        match self.layout {
            Layout::Dense => self.dense_record_len(row.len()),
            Layout::Sparse => self.sparse_record_len(count_nonzero(row)),
        }
    }
}

/// Number of entries a sparse record carries for `row`
///
/// Negative zero compares equal to zero and is not sent; NaN is.
#[inline]
pub fn count_nonzero(row: &[f32]) -> usize {
    row.iter().filter(|v| **v != 0.0).count()
}
