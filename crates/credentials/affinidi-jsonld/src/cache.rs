//! Bounded in-memory [`Cache`] for contexts and documents.

use std::sync::Arc;
use std::time::Duration;

use crate::engine::{Cache, Handle};

/// Thread-safe, size-bounded cache backed by [`moka::sync::Cache`].
///
/// Cloning is cheap and clones share the same storage.
///
/// ```rust
/// use affinidi_jsonld::cache::MemoryCache;
/// use affinidi_jsonld::engine::ContextCache;
///
/// let contexts: ContextCache = MemoryCache::default().into_handle();
/// ```
#[derive(Clone)]
pub struct MemoryCache<V> {
    inner: moka::sync::Cache<String, V>,
}

impl<V> MemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Capacity engines use for their own context cache.
    pub const DEFAULT_CAPACITY: u64 = 256;

    pub fn new(capacity: u64) -> Self {
        Self {
            inner: moka::sync::Cache::new(capacity),
        }
    }

    /// Entries expire `ttl` after insertion.
    pub fn with_ttl(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: moka::sync::Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Approximate number of entries; pending maintenance is run first.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Wrap into a shareable handle for [`EngineOptions`](crate::EngineOptions).
    pub fn into_handle(self) -> Handle<dyn Cache<V>> {
        let shared: Arc<dyn Cache<V>> = Arc::new(self);
        Handle::new(shared)
    }
}

impl<V> Default for MemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl<V> Cache<V> for MemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &str) -> Option<V> {
        self.inner.get(key)
    }

    fn insert(&self, key: String, value: V) {
        self.inner.insert(key, value);
    }
}
