//! Offset-tracking buffer writer and reader
//!
//! [`WireWriter`] fills a buffer that was sized up front from
//! [`WireFormat::record_len`]; running past its end is a sizing bug and
//! panics. [`WireReader`] consumes untrusted input and reports short buffers
//! as [`WireError::Truncated`].

use crate::error::WireError;
use crate::format::{KeySize, Layout, WireFormat, COUNT_SIZE, INDEX_SIZE, VALUE_SIZE};
use distmat_core::Key;

/// Sequential writer over a pre-sized buffer
pub struct WireWriter<'a> {
    format: WireFormat,
    buf: &'a mut [u8],
    offset: usize,
}

impl<'a> WireWriter<'a> {
    /// Start writing at offset 0
    pub fn new(format: WireFormat, buf: &'a mut [u8]) -> Self {
        Self {
            format,
            buf,
            offset: 0,
        }
    }

    /// Bytes written so far
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn slot(&mut self, len: usize) -> &mut [u8] {
        let start = self.offset;
        self.offset += len;
        &mut self.buf[start..start + len]
    }

    /// Write a key in the descriptor's key width
    pub fn put_key(&mut self, key: Key) -> Result<(), WireError> {
        let endian = self.format.endian;
        match self.format.key_size {
            KeySize::Int => {
                let narrow = i32::try_from(key).map_err(|_| WireError::KeyOverflow {
                    key,
                    key_size: KeySize::Int.bytes(),
                })?;
                endian.write_i32(self.slot(4), narrow);
            }
            KeySize::Long => endian.write_i64(self.slot(8), key),
        }
        Ok(())
    }

    /// Write a 4-byte integer
    pub fn put_i32(&mut self, v: i32) {
        let endian = self.format.endian;
        endian.write_i32(self.slot(INDEX_SIZE), v);
    }

    /// Write a 4-byte float
    pub fn put_f32(&mut self, v: f32) {
        let endian = self.format.endian;
        endian.write_f32(self.slot(VALUE_SIZE), v);
    }

    /// Skip a count field and return its offset for [`patch_count`]
    ///
    /// [`patch_count`]: WireWriter::patch_count
    pub fn reserve_count(&mut self) -> usize {
        let at = self.offset;
        self.offset += COUNT_SIZE;
        at
    }

    /// Backfill a count field reserved earlier
    pub fn patch_count(&mut self, at: usize, count: i32) {
        self.format
            .endian
            .write_i32(&mut self.buf[at..at + COUNT_SIZE], count);
    }

    /// Write one full record (key plus row body) under the descriptor's layout
    ///
    /// Returns the number of values written: the row width for dense records,
    /// the non-zero count for sparse ones.
    pub fn put_record(&mut self, key: Key, row: &[f32]) -> Result<usize, WireError> {
        self.put_key(key)?;
        match self.format.layout {
            Layout::Dense => {
                for v in row {
                    self.put_f32(*v);
                }
                Ok(row.len())
            }
            Layout::Sparse => {
                let at = self.reserve_count();
                let mut written = 0usize;
                for (col, v) in row.iter().enumerate() {
                    if *v != 0.0 {
                        self.put_i32(col as i32);
                        self.put_f32(*v);
                        written += 1;
                    }
                }
                self.patch_count(at, written as i32);
                Ok(written)
            }
        }
    }
}

/// Sequential reader over an untrusted buffer
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    format: WireFormat,
    buf: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    /// Start reading at offset 0
    pub fn new(format: WireFormat, buf: &'a [u8]) -> Self {
        Self {
            format,
            buf,
            offset: 0,
        }
    }

    /// Descriptor in use
    pub fn format(&self) -> WireFormat {
        self.format
    }

    /// Bytes consumed so far
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left to consume
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Whether the whole buffer has been consumed
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.buf.len()
    }

    /// Consume `len` raw bytes
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(WireError::Truncated {
                offset: self.offset,
                needed: len,
                remaining,
            });
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.buf[start..start + len])
    }

    /// Read a key in the descriptor's key width
    pub fn get_key(&mut self) -> Result<Key, WireError> {
        let endian = self.format.endian;
        match self.format.key_size {
            KeySize::Int => Ok(endian.read_i32(self.take(4)?) as Key),
            KeySize::Long => Ok(endian.read_i64(self.take(8)?)),
        }
    }

    /// Read a 4-byte integer
    pub fn get_i32(&mut self) -> Result<i32, WireError> {
        let endian = self.format.endian;
        Ok(endian.read_i32(self.take(INDEX_SIZE)?))
    }

    /// Read a 4-byte float
    pub fn get_f32(&mut self) -> Result<f32, WireError> {
        let endian = self.format.endian;
        Ok(endian.read_f32(self.take(VALUE_SIZE)?))
    }
}
