//! Addressable key spaces
//!
//! A [`KeySpace`] is the set of keys a shard stores rows for. Each variant has
//! a closed-form mapping between a global key and a local row index:
//!
//! | Variant | `index_of(key)` | `key_of(index)` |
//! |---------|-----------------|-----------------|
//! | Range | `key - first` | `first + index` |
//! | Hash | `(key - min_key) / stride` | `min_key + index * stride` |
//!
//! For owned keys the two functions are mutual inverses. Neither checks
//! membership; callers test [`KeySpace::contains`] before indexing.

use crate::keys::{Key, KeyCollection, KeyHash, KeyRange, Keys};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key space of a shard: contiguous range or fixed-stride hash set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySpace {
    /// Contiguous interval
    Range(KeyRange),
    /// Fixed-stride set, `stride > 0`
    Hash(KeyHash),
}

impl KeySpace {
    /// Extract an addressable key space from a collection
    ///
    /// Returns `None` for `List`, `All`, and a `Hash` with zero stride.
    pub fn from_collection(keys: &KeyCollection) -> Option<Self> {
        match keys {
            KeyCollection::Range(r) => Some(KeySpace::Range(*r)),
            KeyCollection::Hash(h) if h.stride > 0 => Some(KeySpace::Hash(*h)),
            _ => None,
        }
    }

    /// Number of keys, which is also the number of local rows
    pub fn len(&self) -> u64 {
        match self {
            KeySpace::Range(r) => r.count,
            KeySpace::Hash(h) => h.count,
        }
    }

    /// Check if the key space holds no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership test
    #[inline]
    pub fn contains(&self, key: Key) -> bool {
        match self {
            KeySpace::Range(r) => r.contains(key),
            KeySpace::Hash(h) => h.contains(key),
        }
    }

    /// Local row index of an owned `key`
    #[inline]
    pub fn index_of(&self, key: Key) -> usize {
        match self {
            KeySpace::Range(r) => key.wrapping_sub(r.first) as usize,
            KeySpace::Hash(h) => (key.wrapping_sub(h.min_key) as u64 / h.stride) as usize,
        }
    }

    /// Global key of the row at local `index`
    #[inline]
    pub fn key_of(&self, index: usize) -> Key {
        match self {
            KeySpace::Range(r) => r.first.wrapping_add(index as Key),
            KeySpace::Hash(h) => h
                .min_key
                .wrapping_add((index as u64).wrapping_mul(h.stride) as Key),
        }
    }

    /// Owned keys in ascending order (which is local index order)
    pub fn iter(&self) -> Keys<'static> {
        let (base, stride, count) = match self {
            KeySpace::Range(r) => (r.first, 1, r.count),
            KeySpace::Hash(h) => (h.min_key, h.stride, h.count),
        };
        Keys::Strided {
            base,
            stride,
            next: 0,
            count,
        }
    }

    /// Owned keys that also appear in `requested`, ascending
    pub fn intersect(&self, requested: &KeyCollection) -> KeyCollection {
        KeyCollection::from(*self).intersect(requested)
    }
}

impl From<KeySpace> for KeyCollection {
    fn from(space: KeySpace) -> Self {
        match space {
            KeySpace::Range(r) => KeyCollection::Range(r),
            KeySpace::Hash(h) => KeyCollection::Hash(h),
        }
    }
}

impl fmt::Display for KeySpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", KeyCollection::from(*self))
    }
}
