//! Cache configuration

/// Configuration for [`Cache`](crate::Cache).
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Maximum number of entries before eviction. `0` (the default) means
    /// no limit. Negative values are rejected by
    /// [`Cache::new`](crate::Cache::new).
    pub max_entries: i64,
}

impl CacheConfig {
    /// Configuration with no entry limit.
    pub fn new() -> Self {
        Self { max_entries: 0 }
    }

    /// Set max entries before eviction.
    pub fn with_max_entries(mut self, max_entries: i64) -> Self {
        self.max_entries = max_entries;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new()
    }
}
