//! Zero-copy record decoding
//!
//! [`Records`] walks a pull/push buffer one record at a time. Row bodies are
//! borrowed from the buffer and decoded lazily through [`RowBody::entries`],
//! so a buffer can be validated in one pass and applied in a second without
//! copying values out.

use crate::codec::WireReader;
use crate::error::WireError;
use crate::format::{Endian, Layout, WireFormat, INDEX_SIZE, SPARSE_ENTRY_SIZE, VALUE_SIZE};
use distmat_core::Key;

/// One decoded record
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Offset of the record's key in the buffer
    pub offset: usize,
    /// Global row key
    pub key: Key,
    /// Row body, still encoded
    pub body: RowBody<'a>,
}

/// Encoded row body borrowed from a buffer
#[derive(Debug, Clone, Copy)]
pub enum RowBody<'a> {
    /// `row_width` consecutive values
    Dense {
        /// Raw value bytes
        bytes: &'a [u8],
        /// Byte order
        endian: Endian,
    },
    /// `(column, value)` pairs
    Sparse {
        /// Raw entry bytes, count prefix excluded
        bytes: &'a [u8],
        /// Byte order
        endian: Endian,
    },
}

impl<'a> RowBody<'a> {
    /// Number of `(column, value)` entries in the body
    pub fn len(&self) -> usize {
        match self {
            RowBody::Dense { bytes, .. } => bytes.len() / VALUE_SIZE,
            RowBody::Sparse { bytes, .. } => bytes.len() / SPARSE_ENTRY_SIZE,
        }
    }

    /// Check if the body carries no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode entries in wire order
    ///
    /// Dense bodies yield consecutive column indices starting at 0. Sparse
    /// column indices are yielded as sent, unvalidated.
    pub fn entries(&self) -> Entries<'a> {
        let (bytes, endian, sparse) = match *self {
            RowBody::Dense { bytes, endian } => (bytes, endian, false),
            RowBody::Sparse { bytes, endian } => (bytes, endian, true),
        };
        Entries {
            bytes,
            endian,
            sparse,
            pos: 0,
            len: self.len(),
        }
    }
}

/// Iterator over `(column, value)` entries of a [`RowBody`]
#[derive(Debug, Clone)]
pub struct Entries<'a> {
    bytes: &'a [u8],
    endian: Endian,
    sparse: bool,
    pos: usize,
    len: usize,
}

impl Iterator for Entries<'_> {
    type Item = (i32, f32);

    fn next(&mut self) -> Option<(i32, f32)> {
        if self.pos >= self.len {
            return None;
        }
        let i = self.pos;
        self.pos += 1;
        if self.sparse {
            let at = i * SPARSE_ENTRY_SIZE;
            let col = self.endian.read_i32(&self.bytes[at..at + INDEX_SIZE]);
            let value = self
                .endian
                .read_f32(&self.bytes[at + INDEX_SIZE..at + SPARSE_ENTRY_SIZE]);
            Some((col, value))
        } else {
            let at = i * VALUE_SIZE;
            let value = self.endian.read_f32(&self.bytes[at..at + VALUE_SIZE]);
            Some((i as i32, value))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.pos;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Entries<'_> {}

/// Iterator over the records of a buffer
///
/// Yields `Err` once on the first malformed record and then stops.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    reader: WireReader<'a>,
    row_width: usize,
    failed: bool,
}

impl<'a> Records<'a> {
    /// Decode `buf` for rows of `row_width` columns
    pub fn new(format: WireFormat, buf: &'a [u8], row_width: usize) -> Self {
        Self {
            reader: WireReader::new(format, buf),
            row_width,
            failed: false,
        }
    }

    fn read_record(&mut self) -> Result<Record<'a>, WireError> {
        let offset = self.reader.offset();
        let endian = self.reader.format().endian;
        let key = self.reader.get_key()?;
        let body = match self.reader.format().layout {
            Layout::Dense => RowBody::Dense {
                bytes: self.reader.take(self.row_width * VALUE_SIZE)?,
                endian,
            },
            Layout::Sparse => {
                let count_at = self.reader.offset();
                let count = self.reader.get_i32()?;
                if count < 0 {
                    return Err(WireError::NegativeCount {
                        offset: count_at,
                        count,
                    });
                }
                RowBody::Sparse {
                    bytes: self.reader.take(count as usize * SPARSE_ENTRY_SIZE)?,
                    endian,
                }
            }
        };
        Ok(Record { offset, key, body })
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<Record<'a>, WireError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.reader.is_exhausted() {
            return None;
        }
        let record = self.read_record();
        if record.is_err() {
            self.failed = true;
        }
        Some(record)
    }
}
