//! Page store backed by `cached::TimedSizedCache`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use cached::{Cached, TimedSizedCache};
use serde_json::Value;

use crate::cache::QueryKey;
use crate::pagination::PageResult;

/// A cached page as seen by readers.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub page: Arc<PageResult<Value>>,
    /// False once the freshness window elapsed or the kind was invalidated.
    pub fresh: bool,
}

#[derive(Debug, Clone)]
struct StoredPage {
    page: Arc<PageResult<Value>>,
    fetched_at: Instant,
    epoch: u64,
}

/// In-memory page store with size limit and TTL.
pub(crate) struct PageStore {
    store: Mutex<TimedSizedCache<QueryKey, StoredPage>>,
    stale_time: Duration,
}

impl PageStore {
    pub(crate) fn new(max_entries: usize, ttl: Duration, stale_time: Duration) -> Self {
        let store = TimedSizedCache::with_size_and_lifespan(max_entries.max(1), ttl);
        Self {
            store: Mutex::new(store),
            stale_time,
        }
    }

    // A panic while holding the lock cannot leave a half-written entry behind.
    fn lock(&self) -> MutexGuard<'_, TimedSizedCache<QueryKey, StoredPage>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up `key`; the entry is fresh only if it was stored under
    /// `current_epoch` and within the freshness window.
    pub(crate) fn get(&self, key: &QueryKey, current_epoch: u64) -> Option<CacheEntry> {
        let mut store = self.lock();
        store.cache_get(key).map(|stored| CacheEntry {
            page: Arc::clone(&stored.page),
            fresh: stored.epoch == current_epoch && stored.fetched_at.elapsed() < self.stale_time,
        })
    }

    pub(crate) fn set(&self, key: QueryKey, page: Arc<PageResult<Value>>, epoch: u64) {
        let mut store = self.lock();
        store.cache_set(
            key,
            StoredPage {
                page,
                fetched_at: Instant::now(),
                epoch,
            },
        );
    }

    pub(crate) fn clear(&self) {
        self.lock().cache_clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().cache_size()
    }
}
