//! Raw row snapshots
//!
//! Rows are streamed as consecutive big-endian f32 values in local index
//! order, `row_width` values per row, with no keys and no length prefix. The
//! reader must already know the shard's shape; framing belongs to whoever
//! owns the stream (checkpoint headers, migration handshakes).
//!
//! Range transfers take an inclusive local index interval `[from, to]`;
//! `from > to` transfers nothing.

use crate::error::{Result, ShardError};
use crate::store::ShardStore;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Read, Write};
use std::ops::Range;
use tracing::debug;

impl ShardStore {
    /// Stream every row to `sink`
    pub fn write_all<W: Write>(&self, sink: &mut W) -> Result<()> {
        for v in &self.rows {
            sink.write_f32::<BigEndian>(*v)?;
        }
        debug!(rows = self.row_count, "Wrote shard snapshot");
        Ok(())
    }

    /// Replace every row with values read from `source`
    ///
    /// Rows are only replaced once the whole snapshot has been read.
    pub fn read_all<R: Read>(&mut self, source: &mut R) -> Result<()> {
        let mut values = vec![0.0f32; self.rows.len()];
        source.read_f32_into::<BigEndian>(&mut values)?;
        self.rows = values;
        debug!(rows = self.row_count, "Read shard snapshot");
        Ok(())
    }

    /// Stream rows `from..=to` to `sink`
    ///
    /// # Errors
    /// - `RangeOutOfBounds` if `to` is past the last row (and `from <= to`)
    pub fn write_range<W: Write>(&self, sink: &mut W, from: usize, to: usize) -> Result<()> {
        let span = self.span(from, to)?;
        for v in &self.rows[span] {
            sink.write_f32::<BigEndian>(*v)?;
        }
        Ok(())
    }

    /// Overwrite rows `from..=to` with values read from `source`
    ///
    /// Rows outside the interval are untouched. Rows inside it are only
    /// replaced once the whole interval has been read.
    ///
    /// # Errors
    /// - `RangeOutOfBounds` if `to` is past the last row (and `from <= to`)
    pub fn read_range<R: Read>(&mut self, source: &mut R, from: usize, to: usize) -> Result<()> {
        let span = self.span(from, to)?;
        let mut values = vec![0.0f32; span.len()];
        source.read_f32_into::<BigEndian>(&mut values)?;
        self.rows[span].copy_from_slice(&values);
        Ok(())
    }

    /// Value range covering local rows `from..=to`
    fn span(&self, from: usize, to: usize) -> Result<Range<usize>> {
        if from > to {
            return Ok(0..0);
        }
        if to >= self.row_count {
            return Err(ShardError::RangeOutOfBounds {
                from,
                to,
                row_count: self.row_count,
            });
        }
        Ok(from * self.row_width..(to + 1) * self.row_width)
    }
}
