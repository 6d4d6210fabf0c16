//! Snapshot Transfer Tests
//!
//! Raw, unframed row streams for checkpoints and range migration.

use crate::common::*;
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use tempfile::TempDir;

#[test]
fn full_snapshot_through_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("shard.snap");

    let mut src = hash_shard(0, 3, 50, 8);
    src.seed(SeedMode::SeededRandom(99));
    {
        let mut out = BufWriter::new(File::create(&path).unwrap());
        src.write_all(&mut out).unwrap();
    }
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 50 * 8 * 4);

    let mut restored = hash_shard(0, 3, 50, 8);
    restored
        .read_all(&mut BufReader::new(File::open(&path).unwrap()))
        .unwrap();
    assert_eq!(restored, src);
}

#[test]
fn snapshot_has_no_framing() {
    let mut shard = range_shard(7, 2, 1);
    shard.row_mut(7).unwrap()[0] = 1.0;
    shard.row_mut(8).unwrap()[0] = -1.0;
    let mut out = Vec::new();
    shard.write_all(&mut out).unwrap();

    let mut expected = Vec::new();
    expected.extend_from_slice(&1.0f32.to_be_bytes());
    expected.extend_from_slice(&(-1.0f32).to_be_bytes());
    assert_eq!(out, expected);
}

#[test]
fn range_migration_between_shards() {
    let mut src = range_shard(0, 10, 4);
    fill_pattern(&mut src);

    let mut stream = Vec::new();
    src.write_range(&mut stream, 3, 6).unwrap();
    assert_eq!(stream.len(), 4 * 4 * 4);

    let mut dst = range_shard(0, 10, 4);
    dst.seed(SeedMode::Constant(-7.0));
    dst.read_range(&mut Cursor::new(stream), 3, 6).unwrap();

    for i in 0..10 {
        let key = dst.key_of(i);
        if (3..=6).contains(&i) {
            assert_eq!(dst.row(key).unwrap(), src.row(key).unwrap());
        } else {
            assert!(dst.row(key).unwrap().iter().all(|v| *v == -7.0));
        }
    }
}

#[test]
fn inverted_range_transfers_nothing() {
    let src = range_shard(0, 4, 2);
    let mut stream = Vec::new();
    src.write_range(&mut stream, 3, 0).unwrap();
    assert!(stream.is_empty());
}

#[test]
fn range_past_last_row_is_rejected() {
    let mut shard = range_shard(0, 4, 2);
    let err = shard
        .read_range(&mut Cursor::new(vec![0u8; 64]), 2, 4)
        .unwrap_err();
    assert!(matches!(err, Error::RangeOutOfBounds { row_count: 4, .. }));
}

#[test]
fn short_range_stream_leaves_rows() {
    let mut shard = range_shard(0, 4, 2);
    shard.seed(SeedMode::Constant(3.0));
    let err = shard
        .read_range(&mut Cursor::new(vec![0u8; 12]), 0, 1)
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(shard.iter().all(|(_, row)| row == [3.0, 3.0]));
}
