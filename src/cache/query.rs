//! Deduplicating, invalidatable page fetches.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use serde_json::Value;
use tracing::debug;

use crate::cache::memory::PageStore;
use crate::cache::{CacheEntry, QueryKey};
use crate::config::QueryConfig;
use crate::external::{DataSource, SourceError};
use crate::models::ResourceKind;
use crate::pagination::PageResult;

type PageFuture = Shared<BoxFuture<'static, Result<Arc<PageResult<Value>>, SourceError>>>;

struct InFlight {
    id: u64,
    epoch: u64,
    future: PageFuture,
}

struct Inner {
    source: Arc<dyn DataSource>,
    store: PageStore,
    in_flight: DashMap<QueryKey, InFlight>,
    epochs: DashMap<ResourceKind, u64>,
    next_id: AtomicU64,
}

/// Cache of list pages in front of a [`DataSource`].
///
/// Cheap to clone; clones share the same store, so every screen listing the
/// same key observes the same page without extra network calls.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Inner>,
}

impl QueryClient {
    pub fn new(source: Arc<dyn DataSource>, config: &QueryConfig) -> Self {
        Self::with_limits(
            source,
            config.max_entries,
            Duration::from_secs(config.ttl_seconds),
            config.stale_time(),
        )
    }

    pub fn with_limits(
        source: Arc<dyn DataSource>,
        max_entries: usize,
        ttl: Duration,
        stale_time: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                store: PageStore::new(max_entries, ttl, stale_time),
                in_flight: DashMap::new(),
                epochs: DashMap::new(),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    pub fn source(&self) -> &Arc<dyn DataSource> {
        &self.inner.source
    }

    /// Invalidation count of `kind`; it only grows.
    pub fn epoch(&self, kind: ResourceKind) -> u64 {
        self.inner.epochs.get(&kind).map(|e| *e).unwrap_or(0)
    }

    /// Cached page for `key`, fresh or not, without touching the network.
    pub fn peek(&self, key: &QueryKey) -> Option<CacheEntry> {
        self.inner.store.get(key, self.epoch(key.kind))
    }

    /// Fetch `key` from the data source.
    ///
    /// Joins a request already in flight for the same key unless the kind was
    /// invalidated since it started. The result is stored only if no
    /// invalidation happened while it was running.
    pub async fn fetch(&self, key: &QueryKey) -> Result<Arc<PageResult<Value>>, SourceError> {
        self.fetch_with_epoch(key).await.1
    }

    /// [`fetch`](Self::fetch) that also returns the epoch the request ran
    /// under, so callers can tell answers from before an invalidation apart.
    pub async fn fetch_with_epoch(
        &self,
        key: &QueryKey,
    ) -> (u64, Result<Arc<PageResult<Value>>, SourceError>) {
        let epoch = self.epoch(key.kind);
        let (id, future) = self.join_or_start(key, epoch);

        let result = future.await;
        self.inner.in_flight.remove_if(key, |_, f| f.id == id);

        match &result {
            Ok(page) if self.epoch(key.kind) == epoch => {
                self.inner
                    .store
                    .set(key.clone(), Arc::clone(page), epoch);
            }
            Ok(_) => debug!(key = %key, "Discarding page fetched before invalidation"),
            Err(e) => debug!(key = %key, error = %e, "Page fetch failed"),
        }
        (epoch, result)
    }

    fn join_or_start(&self, key: &QueryKey, epoch: u64) -> (u64, PageFuture) {
        match self.inner.in_flight.entry(key.clone()) {
            Entry::Occupied(entry) if entry.get().epoch == epoch => {
                debug!(key = %key, "Joining in-flight fetch");
                (entry.get().id, entry.get().future.clone())
            }
            entry => {
                debug!(key = %key, "Cache miss, fetching");
                let flight = self.start(key.clone(), epoch);
                let handle = (flight.id, flight.future.clone());
                match entry {
                    Entry::Occupied(mut occupied) => {
                        occupied.insert(flight);
                    }
                    Entry::Vacant(vacant) => {
                        vacant.insert(flight);
                    }
                }
                handle
            }
        }
    }

    fn start(&self, key: QueryKey, epoch: u64) -> InFlight {
        let source = Arc::clone(&self.inner.source);
        let future = async move {
            source
                .list_resource(key.kind, key.page, key.size, &key.sort)
                .await
                .map(Arc::new)
        }
        .boxed()
        .shared();
        InFlight {
            id: self.inner.next_id.fetch_add(1, Ordering::Relaxed),
            epoch,
            future,
        }
    }

    /// Fresh cached page if there is one, otherwise [`fetch`](Self::fetch).
    pub async fn query(&self, key: &QueryKey) -> Result<Arc<PageResult<Value>>, SourceError> {
        if let Some(entry) = self.peek(key)
            && entry.fresh
        {
            debug!(key = %key, "Cache hit");
            return Ok(entry.page);
        }
        self.fetch(key).await
    }

    /// Mark every cached page of `kind` stale and detach its in-flight fetches.
    pub fn invalidate(&self, kind: ResourceKind) {
        *self.inner.epochs.entry(kind).or_insert(0) += 1;
        self.inner.in_flight.retain(|key, _| key.kind != kind);
        debug!(kind = %kind, "Invalidated cached pages");
    }

    /// Drop every cached page and detach every in-flight fetch.
    pub fn clear(&self) {
        for kind in ResourceKind::ALL {
            *self.inner.epochs.entry(kind).or_insert(0) += 1;
        }
        self.inner.in_flight.clear();
        self.inner.store.clear();
    }

    pub fn cached_pages(&self) -> usize {
        self.inner.store.len()
    }
}
