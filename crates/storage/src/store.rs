//! ShardStore: row storage for one matrix shard
//!
//! ## Design
//!
//! A shard owns a [`KeySpace`] and a flat, row-major arena of
//! `row_count × row_width` f32 values. Local index `i` addresses
//! `rows[i * row_width..(i + 1) * row_width]`; the key space maps global keys
//! to and from local indices.
//!
//! The wire protocol lives in `protocol.rs` and snapshot transfer in
//! `snapshot.rs`; both are further `impl ShardStore` blocks over the same arena.
//!
//! ## Thread Safety
//!
//! ShardStore has no interior locking. Push mutates rows in place and fetch
//! reads them in place, so concurrent callers share it through
//! [`SharedShard`](crate::SharedShard).

use crate::config::{SeedMode, ShardConfig};
use crate::error::{Result, ShardError};
use distmat_core::{Key, KeyCollection, KeySpace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Local partition of a distributed row-addressable matrix
#[derive(Debug, Clone, PartialEq)]
pub struct ShardStore {
    pub(crate) space: KeySpace,
    pub(crate) row_width: usize,
    pub(crate) row_count: usize,
    pub(crate) rows: Vec<f32>,
}

impl ShardStore {
    /// Allocate zero-filled rows for every key in `keys`
    ///
    /// # Errors
    /// - `InvalidKeySpace` if `keys` is not a range or a non-degenerate hash
    /// - `InvalidRowWidth` if `row_width` is 0
    /// - `CapacityOverflow` if the arena size overflows `usize`
    pub fn init(keys: impl Into<KeyCollection>, row_width: usize) -> Result<Self> {
        let keys = keys.into();
        let space = KeySpace::from_collection(&keys)
            .ok_or(ShardError::InvalidKeySpace { kind: keys.kind() })?;
        if row_width == 0 {
            return Err(ShardError::InvalidRowWidth(row_width));
        }

        let rows = space.len();
        let overflow = ShardError::CapacityOverflow { rows, row_width };
        let row_count = usize::try_from(rows).map_err(|_| overflow)?;
        let len = row_count
            .checked_mul(row_width)
            .ok_or(ShardError::CapacityOverflow { rows, row_width })?;

        Ok(Self {
            space,
            row_width,
            row_count,
            rows: vec![0.0; len],
        })
    }

    /// Build and seed a store from a configuration
    pub fn from_config(config: &ShardConfig) -> Result<Self> {
        let mut store = Self::init(config.keys.clone(), config.row_width)?;
        store.seed(config.seed);
        Ok(store)
    }

    /// Key space owned by this shard
    pub fn key_space(&self) -> &KeySpace {
        &self.space
    }

    /// Columns per row
    #[inline]
    pub fn row_width(&self) -> usize {
        self.row_width
    }

    /// Number of local rows
    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Whether `key` is owned by this shard
    #[inline]
    pub fn owns(&self, key: Key) -> bool {
        self.space.contains(key)
    }

    // ========================================================================
    // Seeding
    // ========================================================================

    /// Fill every entry according to `mode`
    pub fn seed(&mut self, mode: SeedMode) {
        match mode {
            SeedMode::Zero => self.seed_constant(0.0),
            SeedMode::Constant(v) => self.seed_constant(v),
            SeedMode::Random => self.seed_random(),
            SeedMode::SeededRandom(seed) => {
                self.seed_random_with(&mut StdRng::seed_from_u64(seed))
            }
        }
        info!(
            mode = mode.name(),
            rows = self.row_count,
            row_width = self.row_width,
            "Seeded shard"
        );
    }

    /// Set every entry to `value`
    pub fn seed_constant(&mut self, value: f32) {
        self.rows.fill(value);
    }

    /// Fill every entry with an independent draw from the thread-local RNG
    pub fn seed_random(&mut self) {
        self.seed_random_with(&mut rand::thread_rng());
    }

    /// Fill every entry with `(u / 100 - 0.5) / row_width`, `u` uniform in `0..100`
    ///
    /// Values land in `[-0.5 / row_width, 0.49 / row_width]` on a 100-step grid.
    pub fn seed_random_with<R: Rng>(&mut self, rng: &mut R) {
        let scale = self.row_width as f32;
        for v in self.rows.iter_mut() {
            let step: u32 = rng.gen_range(0..100);
            *v = (step as f32 / 100.0 - 0.5) / scale;
        }
    }

    // ========================================================================
    // Key / index mapping
    // ========================================================================

    /// Local index of an owned key
    ///
    /// Membership is not checked; see [`owns`](ShardStore::owns).
    #[inline]
    pub fn index_of(&self, key: Key) -> usize {
        self.space.index_of(key)
    }

    /// Global key of local row `index`
    #[inline]
    pub fn key_of(&self, index: usize) -> Key {
        self.space.key_of(index)
    }

    #[inline]
    pub(crate) fn row_at(&self, index: usize) -> &[f32] {
        let start = index * self.row_width;
        &self.rows[start..start + self.row_width]
    }

    #[inline]
    pub(crate) fn row_at_mut(&mut self, index: usize) -> &mut [f32] {
        let start = index * self.row_width;
        &mut self.rows[start..start + self.row_width]
    }

    /// Row stored under `key`
    ///
    /// # Errors
    /// - `UnauthorizedKey` if the key is not owned by this shard
    pub fn row(&self, key: Key) -> Result<&[f32]> {
        if !self.owns(key) {
            return Err(ShardError::UnauthorizedKey { key });
        }
        Ok(self.row_at(self.index_of(key)))
    }

    /// Mutable row stored under `key`
    ///
    /// # Errors
    /// - `UnauthorizedKey` if the key is not owned by this shard
    pub fn row_mut(&mut self, key: Key) -> Result<&mut [f32]> {
        if !self.owns(key) {
            return Err(ShardError::UnauthorizedKey { key });
        }
        let index = self.index_of(key);
        Ok(self.row_at_mut(index))
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// `(key, row)` pairs in ascending local index order
    ///
    /// Each call starts a fresh pass.
    pub fn iter(&self) -> impl Iterator<Item = (Key, &[f32])> + '_ {
        let space = self.space;
        self.rows
            .chunks_exact(self.row_width)
            .enumerate()
            .map(move |(i, row)| (space.key_of(i), row))
    }

    /// `(key, row)` pairs with mutable rows, ascending local index order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Key, &mut [f32])> + '_ {
        let space = self.space;
        self.rows
            .chunks_exact_mut(self.row_width)
            .enumerate()
            .map(move |(i, row)| (space.key_of(i), row))
    }
}
