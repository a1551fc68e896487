//! Thread-safe cache façade with eviction notifications

use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Callback invoked with each entry that leaves the cache, whether through
/// eviction or explicit removal. Never called for overwrites.
pub type OnEvicted<K, V> = Arc<dyn Fn(K, V) + Send + Sync>;

/// Thread-safe LRU cache.
///
/// Reads share the lock; writes are exclusive. The eviction callback runs
/// after the lock has been released, so it may call back into the cache
/// without deadlocking.
pub struct Cache<K, V> {
    /// Recency-ordered store, guarded by a single reader/writer lock
    inner: RwLock<LruCache<K, V>>,

    /// Single notification slot; setting it replaces the previous callback
    on_evicted: RwLock<Option<OnEvicted<K, V>>>,

    /// Traffic counters
    stats: CacheStats,
}

impl<K, V> Cache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a cache from a configuration.
    ///
    /// # Errors
    /// Returns [`Error::NegativeMaxEntries`] if `max_entries` is negative.
    pub fn new(config: CacheConfig) -> Result<Self> {
        if config.max_entries < 0 {
            return Err(Error::NegativeMaxEntries(config.max_entries));
        }

        Ok(Self::with_capacity(config.max_entries as usize))
    }

    /// Create a cache bounded to `capacity` entries; 0 means unlimited.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(LruCache::new(capacity)),
            on_evicted: RwLock::new(None),
            stats: CacheStats::new(),
        }
    }

    /// Set the callback invoked with evicted and removed entries,
    /// replacing any previous callback.
    pub fn set_on_evicted<F>(&self, callback: F)
    where
        F: Fn(K, V) + Send + Sync + 'static,
    {
        *self.on_evicted.write() = Some(Arc::new(callback));
    }

    /// Get the value of a key, promoting it to most recently used.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.write();
        if let Some(value) = inner.get(key) {
            self.stats.record_hit();
            return Some(value.clone());
        }

        self.stats.record_miss();
        None
    }

    /// Get the value of a key without updating its recency.
    ///
    /// Peeks count as neither hits nor misses.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.read().peek(key).cloned()
    }

    /// Check if a key is in the cache. Does not update recency.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Put an item into the cache.
    ///
    /// If the key is already present its value is replaced in place and its
    /// recency is left unchanged. If the insert pushes the cache over
    /// capacity, the least recently used entry is evicted and handed to the
    /// eviction callback once the lock has been released.
    pub fn put(&self, key: K, value: V) {
        let evicted = {
            let mut inner = self.inner.write();
            inner.put(key, value)
        };
        self.stats.record_insert();

        if let Some((key, value)) = evicted {
            self.stats.record_eviction();
            self.notify(key, value);
        }
    }

    /// Remove an item from the cache. Returns whether the key was present.
    ///
    /// A removed entry is reported to the eviction callback, outside the
    /// lock, just like an eviction.
    pub fn remove(&self, key: &K) -> bool {
        let removed = {
            let mut inner = self.inner.write();
            inner.remove(key)
        };

        match removed {
            Some((key, value)) => {
                self.stats.record_removal();
                self.notify(key, value);
                true
            }
            None => false,
        }
    }

    /// All keys, from least to most recently used.
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().keys()
    }

    /// All values, from least to most recently used. Positions correspond
    /// to [`keys`](Self::keys).
    pub fn values(&self) -> Vec<V> {
        self.inner.read().values()
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Configured entry limit; 0 means unlimited.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Drop all entries and reset statistics.
    ///
    /// Entries dropped by `clear` are not reported to the eviction callback.
    pub fn clear(&self) {
        self.inner.write().clear();
        self.stats.reset();
    }

    /// Get cache statistics.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Invoke the eviction callback with an entry that left the cache.
    /// The callback handle is cloned out of its slot first, so the slot
    /// lock is not held while the callback runs.
    fn notify(&self, key: K, value: V) {
        let callback = self.on_evicted.read().as_ref().cloned();
        if let Some(callback) = callback {
            callback(key, value);
        }
    }
}
