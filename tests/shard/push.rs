//! Push Tests
//!
//! Push adds into local rows, never overwrites, and rejects a bad buffer
//! before touching any row.

use crate::common::*;
use proptest::prelude::*;

// ============================================================================
// Worked example
// ============================================================================

#[test]
fn dense_then_sparse_updates() {
    init_tracing();
    let mut shard = range_shard(100, 3, 2);
    let dense = WireFormat::dense(KeySize::Long);
    let sparse = WireFormat::sparse(KeySize::Long);

    shard
        .push(&dense, &encode(dense, &[(101, vec![1.5, -2.0])]))
        .unwrap();
    assert_eq!(shard.row(101).unwrap(), &[1.5, -2.0]);

    let buf = shard.fetch(&dense, &KeyCollection::list(vec![101])).unwrap();
    assert_eq!(decode(dense, &buf, 2), vec![(101, vec![(0, 1.5), (1, -2.0)])]);

    let buf = shard.fetch(&sparse, &KeyCollection::list(vec![101])).unwrap();
    assert_eq!(decode(sparse, &buf, 2), vec![(101, vec![(0, 1.5), (1, -2.0)])]);

    shard
        .push(&sparse, &sparse_record(sparse, 101, &[(0, 0.5)]))
        .unwrap();
    assert_eq!(shard.row(101).unwrap(), &[2.0, -2.0]);
    assert_eq!(shard.row(100).unwrap(), &[0.0, 0.0]);
    assert_eq!(shard.row(102).unwrap(), &[0.0, 0.0]);
}

// ============================================================================
// Additivity
// ============================================================================

#[test]
fn same_buffer_twice_adds_twice() {
    let mut shard = hash_shard(0, 3, 4, 3);
    shard.seed(SeedMode::Constant(1.0));
    let f = WireFormat::dense(KeySize::Int);
    let update = encode(f, &[(3, vec![0.5, -1.0, 2.0]), (9, vec![1.0, 1.0, 1.0])]);

    assert_eq!(shard.push(&f, &update).unwrap(), 2);
    assert_eq!(shard.push(&f, &update).unwrap(), 2);

    assert_eq!(shard.row(3).unwrap(), &[2.0, -1.0, 5.0]);
    assert_eq!(shard.row(9).unwrap(), &[3.0, 3.0, 3.0]);
    assert_eq!(shard.row(0).unwrap(), &[1.0, 1.0, 1.0]);
}

#[test]
fn sparse_push_touches_only_listed_columns() {
    let mut shard = range_shard(0, 2, 4);
    shard.seed(SeedMode::Constant(10.0));
    let f = WireFormat::sparse(KeySize::Long);
    shard
        .push(&f, &sparse_record(f, 1, &[(3, 1.0), (1, -10.0)]))
        .unwrap();
    assert_eq!(shard.row(1).unwrap(), &[10.0, 0.0, 10.0, 11.0]);
}

proptest! {
    #[test]
    fn double_push_is_original_plus_twice_update(
        original in proptest::collection::vec(-100i32..100, 4),
        update in proptest::collection::vec(-100i32..100, 4),
    ) {
        // small integers keep f32 sums exact
        let original: Vec<f32> = original.into_iter().map(|v| v as f32).collect();
        let update: Vec<f32> = update.into_iter().map(|v| v as f32).collect();

        for f in all_formats() {
            let mut shard = range_shard(5, 1, 4);
            shard.row_mut(5).unwrap().copy_from_slice(&original);
            let buf = encode(f, &[(5, update.clone())]);
            shard.push(&f, &buf).unwrap();
            shard.push(&f, &buf).unwrap();
            let expected: Vec<f32> = original.iter().zip(&update).map(|(o, u)| o + 2.0 * u).collect();
            prop_assert_eq!(shard.row(5).unwrap(), expected.as_slice());
        }
    }
}

// ============================================================================
// Rejection
// ============================================================================

#[test]
fn unowned_key_is_unauthorized() {
    let mut shard = hash_shard(0, 2, 4, 1); // 0, 2, 4, 6
    let f = WireFormat::dense(KeySize::Long);
    let buf = encode(f, &[(2, vec![1.0]), (3, vec![1.0])]);
    let err = shard.push(&f, &buf).unwrap_err();
    assert!(err.is_routing_error());
    assert!(matches!(err, Error::UnauthorizedKey { key: 3 }));
    assert_eq!(shard.row(2).unwrap(), &[0.0]);
}

#[test]
fn column_past_row_width_is_rejected() {
    let mut shard = range_shard(0, 1, 3);
    let f = WireFormat::sparse(KeySize::Int);
    let err = shard
        .push(&f, &sparse_record(f, 0, &[(1, 1.0), (3, 1.0)]))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ColumnOutOfRange {
            key: 0,
            column: 3,
            row_width: 3
        }
    ));
    assert_eq!(shard.row(0).unwrap(), &[0.0, 0.0, 0.0]);
}

#[test]
fn truncated_buffers_are_decode_errors() {
    let f = WireFormat::sparse(KeySize::Long);
    let full = sparse_record(f, 0, &[(0, 1.0), (1, 2.0)]);
    for cut in 1..full.len() {
        let mut shard = range_shard(0, 1, 2);
        let err = shard.push(&f, &full[..cut]).unwrap_err();
        assert!(err.is_malformed_buffer(), "cut at {}: {}", cut, err);
        assert_eq!(shard.row(0).unwrap(), &[0.0, 0.0]);
    }
}

#[test]
fn negative_sparse_count_is_rejected() {
    let f = WireFormat::sparse(KeySize::Int);
    let mut buf = vec![0u8; 8];
    let mut w = WireWriter::new(f, &mut buf);
    w.put_key(0).unwrap();
    w.put_i32(-2);
    let mut shard = range_shard(0, 1, 2);
    let err = shard.push(&f, &buf).unwrap_err();
    assert!(matches!(
        err,
        Error::Wire(WireError::NegativeCount { count: -2, .. })
    ));
}
