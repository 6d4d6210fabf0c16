//! Row keys and key collections
//!
//! A shard owns a [`KeyCollection`] and answers requests expressed as another
//! [`KeyCollection`]. All variants iterate in ascending key order, so the
//! intersection of a shard's keys with a request is ascending as well.
//!
//! Only `Range` and `Hash` collections map keys to local indices; see
//! [`KeySpace`](crate::KeySpace).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Global row key
pub type Key = i64;

/// Contiguous key interval `[first, first + count)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyRange {
    /// First key in the range
    pub first: Key,
    /// Number of keys in the range
    pub count: u64,
}

impl KeyRange {
    /// Create a range of `count` keys starting at `first`
    pub fn new(first: Key, count: u64) -> Self {
        Self { first, count }
    }

    /// Check whether `key` falls inside the range
    ///
    /// Offsets are taken modulo 2^64, matching [`KeyCollection::iter`], so a
    /// range wider than `Key::MAX` still holds every key it enumerates.
    pub fn contains(&self, key: Key) -> bool {
        (key.wrapping_sub(self.first) as u64) < self.count
    }

    /// Last key of the range, `None` when empty or when it runs past `Key::MAX`
    pub fn last(&self) -> Option<Key> {
        if self.count == 0 {
            return None;
        }
        self.first.checked_add_unsigned(self.count - 1)
    }

    /// One past the last key, `None` when the range runs past `Key::MAX`
    fn end(&self) -> Option<i128> {
        let end = i128::from(self.first) + i128::from(self.count);
        (end <= i128::from(Key::MAX) + 1).then_some(end)
    }

    /// Keys shared with `other`, as a range
    ///
    /// `None` when either range runs past `Key::MAX` and wraps around.
    pub fn overlap(&self, other: &KeyRange) -> Option<KeyRange> {
        let lo = self.first.max(other.first);
        let hi = self.end()?.min(other.end()?);
        let count = (hi - i128::from(lo)).max(0) as u64;
        Some(KeyRange::new(lo, count))
    }
}

/// Fixed-stride key set `{min_key + i * stride : i in [0, count)}`
///
/// This is the shape of a hash partition: every `stride`-th key starting at
/// `min_key` lands on the same shard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyHash {
    /// Smallest key owned
    pub min_key: Key,
    /// Distance between consecutive owned keys, must be > 0
    pub stride: u64,
    /// Number of keys owned
    pub count: u64,
}

impl KeyHash {
    /// Create a strided key set
    pub fn new(min_key: Key, stride: u64, count: u64) -> Self {
        Self {
            min_key,
            stride,
            count,
        }
    }

    /// Check whether `key` belongs to the set
    pub fn contains(&self, key: Key) -> bool {
        if self.stride == 0 {
            return false;
        }
        let offset = key.wrapping_sub(self.min_key) as u64;
        offset % self.stride == 0 && offset / self.stride < self.count
    }
}

/// Explicit set of keys, kept sorted and free of duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Key>", into = "Vec<Key>")]
pub struct KeyList {
    keys: Vec<Key>,
}

impl KeyList {
    /// Build a list from any key iterator; order and duplicates are normalized
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        let mut keys: Vec<Key> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        Self { keys }
    }

    /// Check membership (binary search)
    pub fn contains(&self, key: Key) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in ascending order
    pub fn as_slice(&self) -> &[Key] {
        &self.keys
    }
}

impl From<Vec<Key>> for KeyList {
    fn from(keys: Vec<Key>) -> Self {
        KeyList::new(keys)
    }
}

impl From<KeyList> for Vec<Key> {
    fn from(list: KeyList) -> Self {
        list.keys
    }
}

impl FromIterator<Key> for KeyList {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        KeyList::new(iter)
    }
}

/// A set of global row keys
///
/// Used both as a shard's key space (`Range` or `Hash` only) and as the key
/// set of a fetch request (any variant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCollection {
    /// Contiguous interval
    Range(KeyRange),
    /// Fixed-stride set
    Hash(KeyHash),
    /// Explicit keys
    List(KeyList),
    /// Every key; only meaningful as a request
    All,
}

impl KeyCollection {
    /// Shorthand for a `Range` collection
    pub fn range(first: Key, count: u64) -> Self {
        KeyCollection::Range(KeyRange::new(first, count))
    }

    /// Shorthand for a `Hash` collection
    pub fn hash(min_key: Key, stride: u64, count: u64) -> Self {
        KeyCollection::Hash(KeyHash::new(min_key, stride, count))
    }

    /// Shorthand for a `List` collection
    pub fn list(keys: impl IntoIterator<Item = Key>) -> Self {
        KeyCollection::List(KeyList::new(keys))
    }

    /// Variant name for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            KeyCollection::Range(_) => "range",
            KeyCollection::Hash(_) => "hash",
            KeyCollection::List(_) => "list",
            KeyCollection::All => "all",
        }
    }

    /// Membership test
    pub fn contains(&self, key: Key) -> bool {
        match self {
            KeyCollection::Range(r) => r.contains(key),
            KeyCollection::Hash(h) => h.contains(key),
            KeyCollection::List(l) => l.contains(key),
            KeyCollection::All => true,
        }
    }

    /// Number of keys, `None` for the unbounded `All`
    pub fn size(&self) -> Option<u64> {
        match self {
            KeyCollection::Range(r) => Some(r.count),
            KeyCollection::Hash(h) if h.stride == 0 => Some(0),
            KeyCollection::Hash(h) => Some(h.count),
            KeyCollection::List(l) => Some(l.len() as u64),
            KeyCollection::All => None,
        }
    }

    /// Check if the collection holds no keys
    pub fn is_empty(&self) -> bool {
        self.size() == Some(0)
    }

    /// Iterate keys in ascending order
    ///
    /// `All` has no finite enumeration and yields nothing.
    pub fn iter(&self) -> Keys<'_> {
        match self {
            KeyCollection::Range(r) => Keys::Strided {
                base: r.first,
                stride: 1,
                next: 0,
                count: r.count,
            },
            KeyCollection::Hash(h) => Keys::Strided {
                base: h.min_key,
                stride: h.stride,
                next: 0,
                count: if h.stride == 0 { 0 } else { h.count },
            },
            KeyCollection::List(l) => Keys::Listed(l.as_slice().iter()),
            KeyCollection::All => Keys::Strided {
                base: 0,
                stride: 1,
                next: 0,
                count: 0,
            },
        }
    }

    /// Keys present in both collections, ascending
    ///
    /// Two non-wrapping ranges overlap in a range. Otherwise walks the smaller
    /// finite side and probes the other for membership.
    pub fn intersect(&self, other: &KeyCollection) -> KeyCollection {
        if let (KeyCollection::Range(a), KeyCollection::Range(b)) = (self, other) {
            if let Some(both) = a.overlap(b) {
                return KeyCollection::Range(both);
            }
        }
        let (walk, probe) = match (self.size(), other.size()) {
            (None, None) => return KeyCollection::All,
            (None, Some(_)) => return other.clone(),
            (Some(_), None) => return self.clone(),
            (Some(a), Some(b)) if a <= b => (self, other),
            _ => (other, self),
        };
        KeyCollection::List(walk.iter().filter(|k| probe.contains(*k)).collect())
    }
}

impl From<KeyRange> for KeyCollection {
    fn from(range: KeyRange) -> Self {
        KeyCollection::Range(range)
    }
}

impl From<KeyHash> for KeyCollection {
    fn from(hash: KeyHash) -> Self {
        KeyCollection::Hash(hash)
    }
}

impl From<KeyList> for KeyCollection {
    fn from(list: KeyList) -> Self {
        KeyCollection::List(list)
    }
}

impl fmt::Display for KeyCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCollection::Range(r) => write!(f, "range[{}; {}]", r.first, r.count),
            KeyCollection::Hash(h) => {
                write!(f, "hash[{} + i*{}; {}]", h.min_key, h.stride, h.count)
            }
            KeyCollection::List(l) => write!(f, "list[{} keys]", l.len()),
            KeyCollection::All => write!(f, "all"),
        }
    }
}

/// Ascending key iterator returned by [`KeyCollection::iter`]
#[derive(Debug, Clone)]
pub enum Keys<'a> {
    /// Arithmetic progression (ranges and hashes)
    Strided {
        /// Key at position 0
        base: Key,
        /// Step between keys
        stride: u64,
        /// Next position to yield
        next: u64,
        /// Total positions
        count: u64,
    },
    /// Explicit sorted keys
    Listed(std::slice::Iter<'a, Key>),
}

impl Iterator for Keys<'_> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        match self {
            Keys::Strided {
                base,
                stride,
                next,
                count,
            } => {
                if *next >= *count {
                    return None;
                }
                let key = base.wrapping_add(next.wrapping_mul(*stride) as Key);
                *next += 1;
                Some(key)
            }
            Keys::Listed(it) => it.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self {
            Keys::Strided { next, count, .. } => (*count - *next) as usize,
            Keys::Listed(it) => it.len(),
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Keys<'_> {}
