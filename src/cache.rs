//! Bounded, insertion-ordered key/value store with FIFO eviction.
//!
//! Lookups scan linearly; at the capacities this crate is configured with
//! (tens of entries) that is cheaper than maintaining a side index.
//! Key uniqueness is the caller's job: check with [`FixedCapacityCache::lookup`]
//! before inserting.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Default capacity for both the search and the details cache.
pub const DEFAULT_CAPACITY: NonZeroUsize = NonZeroUsize::new(10).unwrap();

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    key: String,
    value: V,
}

#[derive(Debug, Clone)]
pub struct FixedCapacityCache<V> {
    capacity: NonZeroUsize,
    entries: VecDeque<CacheEntry<V>>,
}

impl<V> Default for FixedCapacityCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V> FixedCapacityCache<V> {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.get()),
        }
    }

    /// Returns the value of the oldest entry stored under `key`.
    pub fn lookup(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Appends an entry, first evicting the oldest one when the cache is full.
    ///
    /// Returns the evicted key, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<String> {
        let evicted = if self.is_full() {
            self.entries.pop_front().map(|entry| entry.key)
        } else {
            None
        };
        self.entries.push_back(CacheEntry {
            key: key.into(),
            value,
        });
        evicted
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity.get()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Keys in insertion order, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.key.as_str())
    }
}
