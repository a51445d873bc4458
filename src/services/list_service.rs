//! Paginated list view-model.
//!
//! One [`ListViewModel`] backs one list screen. It owns the screen's
//! [`PaginationState`], reads pages through the shared [`QueryClient`] and
//! publishes a [`ListView`] for rendering.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use tokio::sync::watch;
use tracing::debug;

use crate::cache::{QueryClient, QueryKey};
use crate::error::AppResult;
use crate::models::ResourceKind;
use crate::pagination::{PageButton, PageResult, PaginationState, generate_page_buttons};

/// What the list screen shows.
#[derive(Debug, Clone)]
pub enum ListView {
    /// No data yet for the current key
    Loading,
    /// The last fetch failed; earlier rows are not shown
    Error(String),
    Ready(Arc<PageResult<Value>>),
}

impl ListView {
    pub fn page(&self) -> Option<&Arc<PageResult<Value>>> {
        match self {
            ListView::Ready(page) => Some(page),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListView::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListView::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// View-model of one list screen.
///
/// Cheap to clone; clones drive the same screen. Every response is checked
/// against the current key and the cache epoch before it is published, so a
/// slow answer for a page the user already left, or one read before a write
/// landed, never overwrites the newer one.
#[derive(Clone)]
pub struct ListViewModel {
    kind: ResourceKind,
    client: QueryClient,
    state: Arc<Mutex<PaginationState>>,
    view: Arc<watch::Sender<ListView>>,
    /// Cache epoch of the last published view; guarded by `state`.
    shown_epoch: Arc<AtomicU64>,
}

impl ListViewModel {
    pub fn new(kind: ResourceKind, client: QueryClient, initial: PaginationState) -> Self {
        let (view, _) = watch::channel(ListView::Loading);
        Self {
            kind,
            client,
            state: Arc::new(Mutex::new(initial)),
            view: Arc::new(view),
            shown_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    fn lock_state(&self) -> MutexGuard<'_, PaginationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> PaginationState {
        self.lock_state().clone()
    }

    pub fn view(&self) -> ListView {
        self.view.borrow().clone()
    }

    /// Receiver that observes every published view.
    pub fn subscribe(&self) -> watch::Receiver<ListView> {
        self.view.subscribe()
    }

    /// Page buttons for the current page, empty unless a page is shown.
    pub fn buttons(&self) -> Vec<PageButton> {
        let current = self.lock_state().page;
        match self.view().page() {
            Some(page) => generate_page_buttons(current, page.total_pages),
            None => Vec::new(),
        }
    }

    /// First read when the screen mounts.
    pub async fn load(&self) -> ListView {
        let key = self.current_key();
        self.show(key, false).await
    }

    /// Move to `page`. Out-of-range pages are the caller's to avoid.
    pub async fn set_page(&self, page: u32) -> ListView {
        let key = self.replace(|state| state.with_page(page));
        self.show(key, false).await
    }

    /// Change the page size; the page resets to 0.
    pub async fn set_page_size(&self, size: u32) -> AppResult<ListView> {
        let key = self.update(|state| state.with_size(size))?;
        Ok(self.show(key, false).await)
    }

    /// Change the sort descriptor; the page resets to 0.
    pub async fn set_sort(&self, sort: &str) -> ListView {
        let key = self.replace(|state| state.with_sort(sort));
        self.show(key, false).await
    }

    /// Re-read the current key from the data source, keeping the shown rows
    /// until the answer arrives.
    pub async fn refetch(&self) -> ListView {
        let key = self.current_key();
        self.show(key, true).await
    }

    /// No-op on the last page or while nothing is shown.
    pub async fn next_page(&self) -> ListView {
        match self.view().page() {
            Some(page) if !page.last => {
                let next = self.lock_state().page.saturating_add(1);
                self.set_page(next).await
            }
            _ => self.view(),
        }
    }

    /// No-op on the first page or while nothing is shown.
    pub async fn prev_page(&self) -> ListView {
        match self.view().page() {
            Some(page) if !page.first => {
                let prev = self.lock_state().page.saturating_sub(1);
                self.set_page(prev).await
            }
            _ => self.view(),
        }
    }

    fn current_key(&self) -> QueryKey {
        QueryKey::new(self.kind, &self.lock_state())
    }

    fn replace(&self, f: impl FnOnce(&PaginationState) -> PaginationState) -> QueryKey {
        let mut state = self.lock_state();
        *state = f(&state);
        QueryKey::new(self.kind, &state)
    }

    fn update(
        &self,
        f: impl FnOnce(&PaginationState) -> AppResult<PaginationState>,
    ) -> AppResult<QueryKey> {
        let mut state = self.lock_state();
        *state = f(&state)?;
        Ok(QueryKey::new(self.kind, &state))
    }

    /// Publish `view` only if `key` is still the screen's key and `epoch` is
    /// not older than the epoch of what is already shown.
    fn publish_if_current(&self, key: &QueryKey, epoch: u64, view: ListView) -> bool {
        let state = self.lock_state();
        if QueryKey::new(self.kind, &state) != *key
            || epoch < self.shown_epoch.load(Ordering::Relaxed)
        {
            return false;
        }
        self.shown_epoch.store(epoch, Ordering::Relaxed);
        self.view.send_replace(view);
        true
    }

    async fn show(&self, key: QueryKey, force: bool) -> ListView {
        if !force {
            let epoch = self.client.epoch(key.kind);
            match self.client.peek(&key) {
                Some(entry) => {
                    // stale-while-revalidate: show the cached rows right away
                    self.publish_if_current(&key, epoch, ListView::Ready(entry.page));
                    if entry.fresh {
                        return self.view();
                    }
                }
                None => {
                    self.publish_if_current(&key, epoch, ListView::Loading);
                }
            }
        }

        let (epoch, result) = self.client.fetch_with_epoch(&key).await;
        let view = match result {
            Ok(page) => ListView::Ready(page),
            Err(e) => ListView::Error(e.message().to_string()),
        };
        if !self.publish_if_current(&key, epoch, view) {
            debug!(key = %key, epoch, "Discarding response for a superseded page or epoch");
        }
        self.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::DataSource;
    use crate::testing::FakeSource;
    use std::time::Duration;

    fn setup(rows: usize, stale_time: Duration) -> (Arc<FakeSource>, ListViewModel) {
        let source = Arc::new(FakeSource::with_rows(ResourceKind::Vacancies, rows));
        let client =
            QueryClient::with_limits(source.clone(), 100, Duration::from_secs(300), stale_time);
        let list = ListViewModel::new(ResourceKind::Vacancies, client, PaginationState::default());
        (source, list)
    }

    fn number(view: &ListView) -> u32 {
        view.page().expect("ready view").number
    }

    #[tokio::test]
    async fn test_starts_loading_then_ready() {
        let (source, list) = setup(25, Duration::ZERO);
        assert!(list.view().is_loading());
        assert!(list.buttons().is_empty());

        let view = list.load().await;
        let page = view.page().unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.number_of_elements, 10);
        assert!(page.first && !page.last);
        assert_eq!(source.list_calls(), 1);
        assert_eq!(
            list.buttons().iter().map(|b| b.index()).collect::<Vec<_>>(),
            vec![Some(0), Some(1), Some(2)]
        );
    }

    #[tokio::test]
    async fn test_set_page_size_always_resets_page() {
        let (_, list) = setup(120, Duration::ZERO);
        for (page, size) in [(0, 5), (3, 20), (11, 50), (7, 10)] {
            list.set_page(page).await;
            assert_eq!(list.state().page, page);
            list.set_page_size(size).await.unwrap();
            assert_eq!(list.state().page, 0);
            assert_eq!(list.state().size, size);
        }
        assert!(list.set_page_size(0).await.is_err());
        assert_eq!(list.state().size, 10);
    }

    #[tokio::test]
    async fn test_slow_response_for_left_page_is_discarded() {
        let (source, list) = setup(50, Duration::ZERO);
        let gate = source.gate(1);

        let slow = tokio::spawn({
            let list = list.clone();
            async move { list.set_page(1).await }
        });
        source.wait_for_calls(1).await;

        let view = list.set_page(2).await;
        assert_eq!(number(&view), 2);

        gate.add_permits(1);
        slow.await.unwrap();
        assert_eq!(number(&list.view()), 2);
        assert_eq!(list.state().page, 2);
    }

    #[tokio::test]
    async fn test_answer_from_before_invalidation_is_discarded() {
        let (source, list) = setup(5, Duration::from_secs(60));
        list.load().await;

        let gate = source.gate_next_call();
        let early = tokio::spawn({
            let list = list.clone();
            async move { list.refetch().await }
        });
        source.wait_for_calls(2).await;

        source
            .delete_resource(ResourceKind::Vacancies, "1")
            .await
            .unwrap();
        list.client.invalidate(ResourceKind::Vacancies);
        let view = list.refetch().await;
        assert_eq!(view.page().unwrap().total_elements, 4);

        gate.add_permits(1);
        early.await.unwrap();
        assert_eq!(list.view().page().unwrap().total_elements, 4);
    }

    #[tokio::test]
    async fn test_answer_from_before_invalidation_shown_when_nothing_newer() {
        let (source, list) = setup(5, Duration::from_secs(60));
        list.load().await;
        source.delete_resource(ResourceKind::Vacancies, "5").await.unwrap();

        let gate = source.gate_next_call();
        let refetch = tokio::spawn({
            let list = list.clone();
            async move { list.refetch().await }
        });
        source.wait_for_calls(2).await;
        list.client.invalidate(ResourceKind::Vacancies);

        gate.add_permits(1);
        let view = refetch.await.unwrap();
        assert_eq!(view.page().unwrap().total_elements, 4);
    }

    #[tokio::test]
    async fn test_cached_page_shown_while_revalidating() {
        let (source, list) = setup(50, Duration::ZERO);
        list.load().await;
        list.set_page(1).await;

        let gate = source.gate(0);
        let mut rx = list.subscribe();
        rx.borrow_and_update();
        let back = tokio::spawn({
            let list = list.clone();
            async move { list.set_page(0).await }
        });

        rx.changed().await.unwrap();
        // the old rows for page 0 come back immediately, not a spinner
        assert_eq!(number(&rx.borrow_and_update()), 0);

        gate.add_permits(1);
        back.await.unwrap();
        assert_eq!(source.list_calls(), 3);
    }

    #[tokio::test]
    async fn test_fresh_cache_hit_skips_network() {
        let (source, list) = setup(50, Duration::from_secs(60));
        list.load().await;
        list.set_page(1).await;
        list.set_page(0).await;
        assert_eq!(source.list_calls(), 2);
        assert_eq!(number(&list.view()), 0);
    }

    #[tokio::test]
    async fn test_failure_discards_rows_and_navigation_recovers() {
        let (source, list) = setup(30, Duration::ZERO);
        list.load().await;

        source.fail_lists("Service unavailable");
        let view = list.set_page(1).await;
        assert_eq!(view.error(), Some("Service unavailable"));
        assert!(list.buttons().is_empty());

        source.recover();
        let view = list.set_page(1).await;
        assert_eq!(number(&view), 1);
    }

    #[tokio::test]
    async fn test_refetch_hits_network_and_keeps_position() {
        let (source, list) = setup(30, Duration::from_secs(60));
        list.set_page(2).await;
        list.refetch().await;
        assert_eq!(source.list_calls(), 2);
        assert_eq!(list.state().page, 2);
        assert_eq!(number(&list.view()), 2);
    }

    #[tokio::test]
    async fn test_prev_next_are_guarded_by_first_and_last() {
        let (_, list) = setup(15, Duration::ZERO);
        // nothing shown yet
        list.next_page().await;
        assert_eq!(list.state().page, 0);

        list.load().await;
        list.prev_page().await;
        assert_eq!(list.state().page, 0);

        list.next_page().await;
        assert_eq!(list.state().page, 1);
        list.next_page().await;
        assert_eq!(list.state().page, 1);

        list.prev_page().await;
        assert_eq!(list.state().page, 0);
    }

    #[tokio::test]
    async fn test_set_sort_resets_page() {
        let (source, list) = setup(30, Duration::ZERO);
        list.set_page(2).await;
        list.set_sort("title,asc").await;
        assert_eq!(list.state().page, 0);
        assert_eq!(list.state().sort, "title,asc");
        assert_eq!(source.last_sort().as_deref(), Some("title,asc"));
    }

    #[tokio::test]
    async fn test_empty_list_is_ready_without_buttons() {
        let (_, list) = setup(0, Duration::ZERO);
        let view = list.load().await;
        assert!(view.page().unwrap().is_empty());
        assert!(list.buttons().is_empty());
    }
}
