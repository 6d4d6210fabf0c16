//! Pull/push wire protocol
//!
//! # Fetch
//!
//! Serves the owned subset of a requested key set. Keys outside the shard are
//! dropped from the response. The buffer is built in two passes over the
//! served rows: a count pass that sizes it exactly, then a write pass.
//!
//! # Push
//!
//! Adds every record of an incoming buffer into the matching local row. The
//! buffer is fully validated (truncation, ownership, column bounds) before the
//! first row is touched, so a rejected push leaves the shard unchanged.

use crate::error::{Result, ShardError};
use crate::store::ShardStore;
use distmat_core::KeyCollection;
use distmat_wire::{Record, Records, RowBody, WireFormat, WireWriter};
use tracing::{debug, warn};

impl ShardStore {
    /// Serialize the owned rows among `requested` into a wire buffer
    ///
    /// Records appear in ascending key order.
    ///
    /// # Errors
    /// - `Wire(KeyOverflow)` if a served key does not fit the format's key width
    pub fn fetch(&self, format: &WireFormat, requested: &KeyCollection) -> Result<Vec<u8>> {
        let keys = self.space.intersect(requested);

        // Count pass
        let len: usize = keys
            .iter()
            .map(|key| format.record_len(self.row_at(self.index_of(key))))
            .sum();

        // Write pass
        let mut buf = vec![0u8; len];
        let mut writer = WireWriter::new(*format, &mut buf);
        for key in keys.iter() {
            writer.put_record(key, self.row_at(self.index_of(key)))?;
        }
        assert_eq!(writer.offset(), len, "fetch buffer size mismatch");

        debug!(
            requested = %requested,
            served = keys.size().unwrap_or(0),
            layout = ?format.layout,
            bytes = len,
            "Served fetch"
        );
        Ok(buf)
    }

    /// Add every record of `buf` into the local rows
    ///
    /// Returns the number of records applied.
    ///
    /// # Errors
    /// - `Wire(Truncated | NegativeCount)` if the buffer is malformed
    /// - `UnauthorizedKey` if a record targets a key this shard does not own
    /// - `ColumnOutOfRange` if a sparse entry addresses a column outside the row
    pub fn push(&mut self, format: &WireFormat, buf: &[u8]) -> Result<usize> {
        let records = match self.validate_push(format, buf) {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, bytes = buf.len(), "Rejected push");
                return Err(e);
            }
        };

        for record in Records::new(*format, buf, self.row_width) {
            let record = record?;
            let index = self.index_of(record.key);
            let row = self.row_at_mut(index);
            for (column, value) in record.body.entries() {
                row[column as usize] += value;
            }
        }

        debug!(records, layout = ?format.layout, bytes = buf.len(), "Applied push");
        Ok(records)
    }

    fn validate_push(&self, format: &WireFormat, buf: &[u8]) -> Result<usize> {
        let mut records = 0usize;
        for record in Records::new(*format, buf, self.row_width) {
            self.validate_record(&record?)?;
            records += 1;
        }
        Ok(records)
    }

    fn validate_record(&self, record: &Record<'_>) -> Result<()> {
        if !self.owns(record.key) {
            return Err(ShardError::UnauthorizedKey { key: record.key });
        }
        if let RowBody::Sparse { .. } = record.body {
            for (column, _) in record.body.entries() {
                if column < 0 || column as usize >= self.row_width {
                    return Err(ShardError::ColumnOutOfRange {
                        key: record.key,
                        column,
                        row_width: self.row_width,
                    });
                }
            }
        }
        Ok(())
    }
}
