//! Shared helpers for shard tests

#![allow(dead_code)]

pub use distmat::prelude::*;
pub use distmat::{Records, WireError, WireReader, WireWriter};

/// Range shard `[first, first + rows)` with zeroed rows
pub fn range_shard(first: Key, rows: u64, width: usize) -> ShardStore {
    ShardStore::init(KeyCollection::range(first, rows), width).unwrap()
}

/// Hash shard `{min + i * stride}` with zeroed rows
pub fn hash_shard(min: Key, stride: u64, rows: u64, width: usize) -> ShardStore {
    ShardStore::init(KeyCollection::hash(min, stride, rows), width).unwrap()
}

/// Fill every row with `key * 100 + column`, zeroing columns where `(key + column) % 3 == 0`
pub fn fill_pattern(shard: &mut ShardStore) {
    for (key, row) in shard.iter_mut() {
        for (c, v) in row.iter_mut().enumerate() {
            *v = if (key + c as Key) % 3 == 0 {
                0.0
            } else {
                key as f32 * 100.0 + c as f32
            };
        }
    }
}

/// Encode rows with `format`, sizing the buffer exactly
pub fn encode(format: WireFormat, rows: &[(Key, Vec<f32>)]) -> Vec<u8> {
    let len = rows.iter().map(|(_, r)| format.record_len(r)).sum();
    let mut buf = vec![0u8; len];
    let mut w = WireWriter::new(format, &mut buf);
    for (k, r) in rows {
        w.put_record(*k, r).unwrap();
    }
    buf
}

/// Encode one sparse record with explicit entries
pub fn sparse_record(format: WireFormat, key: Key, entries: &[(i32, f32)]) -> Vec<u8> {
    let mut buf = vec![0u8; format.sparse_record_len(entries.len())];
    let mut w = WireWriter::new(format, &mut buf);
    w.put_key(key).unwrap();
    w.put_i32(entries.len() as i32);
    for (c, v) in entries {
        w.put_i32(*c);
        w.put_f32(*v);
    }
    buf
}

/// Decode a buffer into `(key, entries)` pairs
pub fn decode(format: WireFormat, buf: &[u8], width: usize) -> Vec<(Key, Vec<(i32, f32)>)> {
    Records::new(format, buf, width)
        .map(|r| {
            let r = r.unwrap();
            (r.key, r.body.entries().collect())
        })
        .collect()
}

/// Every layout / key width / byte order combination
pub fn all_formats() -> Vec<WireFormat> {
    let mut formats = Vec::new();
    for key_size in [KeySize::Int, KeySize::Long] {
        for endian in [Endian::Big, Endian::Little] {
            formats.push(WireFormat::dense(key_size).with_endian(endian));
            formats.push(WireFormat::sparse(key_size).with_endian(endian));
        }
    }
    formats
}

/// Install a test-writer tracing subscriber once
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
