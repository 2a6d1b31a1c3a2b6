//! Thread-safe LRU cache handle
//!
//! A single mutex guards the whole [`LruCache`] (map and recency list) for
//! the duration of each operation. Statistics live outside the lock.

use std::hash::Hash;
use std::sync::Arc;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::Result;
use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Cloneable, thread-safe handle to a bounded LRU cache
///
/// Clones share the same entries and statistics.
pub struct SharedLruCache<K, V> {
    /// LRU cache guarded by one lock
    cache: Arc<Mutex<LruCache<K, V>>>,

    /// Cache statistics
    stats: Arc<CacheStats>,

    /// Cache capacity
    capacity: usize,
}

impl<K, V> Clone for SharedLruCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            stats: Arc::clone(&self.stats),
            capacity: self.capacity,
        }
    }
}

impl<K, V> SharedLruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new shared cache with the given capacity
    ///
    /// # Errors
    /// Returns [`crate::Error::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let cache = LruCache::new(capacity)?;

        Ok(Self {
            cache: Arc::new(Mutex::new(cache)),
            stats: Arc::new(CacheStats::new()),
            capacity,
        })
    }

    /// Get a copy of a value, marking it most recently used
    pub fn get(&self, key: &K) -> Option<V> {
        let value = self.cache.lock().get(key).cloned();
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    /// Get a copy of a value without touching recency or statistics
    pub fn peek(&self, key: &K) -> Option<V> {
        self.cache.lock().peek(key).cloned()
    }

    /// Insert or overwrite a value, returning the evicted entry if any
    pub fn put(&self, key: K, value: V) -> Option<(K, V)> {
        let (evicted, len) = {
            let mut cache = self.cache.lock();
            let evicted = cache.put(key, value);
            (evicted, cache.len())
        };

        self.stats.record_insert();
        if evicted.is_some() {
            self.stats.record_eviction();
            debug!(len, capacity = self.capacity, "evicted least recently used entry");
        }

        evicted
    }

    /// Remove a key, returning its value
    pub fn remove(&self, key: &K) -> Option<V> {
        self.cache.lock().remove(key)
    }

    /// Check whether a key is cached without touching recency
    pub fn contains(&self, key: &K) -> bool {
        self.cache.lock().contains(key)
    }

    /// Snapshot of the keys, most recently used first
    pub fn keys(&self) -> Vec<K> {
        self.cache.lock().keys().cloned().collect()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry and reset statistics
    pub fn clear(&self) {
        self.cache.lock().clear();
        self.stats.reset();
    }
}
