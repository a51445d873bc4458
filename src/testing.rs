//! In-memory collaborators shared by unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Semaphore;

use crate::error::{AppError, AppResult};
use crate::external::{DataSource, SourceError};
use crate::models::ResourceKind;
use crate::pagination::PageResult;
use crate::services::{ConfirmResult, Confirmer, Notification, NotificationLevel, Notifier};

/// Data source holding rows in memory, with per-page and per-call gates to
/// control the order in which concurrent list requests complete.
///
/// A list request reads its rows when it is made, so a gated request answers
/// with the data as it was before any write that happened while it waited.
#[derive(Default)]
pub(crate) struct FakeSource {
    rows: Mutex<HashMap<ResourceKind, Vec<Value>>>,
    next_id: AtomicU64,
    list_calls: AtomicUsize,
    mutation_calls: AtomicUsize,
    last_sort: Mutex<Option<String>>,
    gates: Mutex<HashMap<u32, Arc<Semaphore>>>,
    call_gates: Mutex<VecDeque<Arc<Semaphore>>>,
    list_error: Mutex<Option<String>>,
    mutation_error: Mutex<Option<String>>,
}

impl FakeSource {
    /// `count` rows of `kind` with ids `1..=count`.
    pub(crate) fn with_rows(kind: ResourceKind, count: usize) -> Self {
        let source = Self::default();
        let rows = (1..=count as u64)
            .map(|id| json!({"id": id, "name": format!("row {id}")}))
            .collect();
        source.rows.lock().unwrap().insert(kind, rows);
        source.next_id.store(count as u64 + 1, Ordering::SeqCst);
        source
    }

    /// List requests for `page` wait for a permit until the returned
    /// semaphore is given one.
    pub(crate) fn gate(&self, page: u32) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.gates.lock().unwrap().insert(page, gate.clone());
        gate
    }

    /// The next list request, whatever its page, waits for a permit on the
    /// returned semaphore. Queued gates are taken in call order.
    pub(crate) fn gate_next_call(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.call_gates.lock().unwrap().push_back(gate.clone());
        gate
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn mutation_calls(&self) -> usize {
        self.mutation_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_sort(&self) -> Option<String> {
        self.last_sort.lock().unwrap().clone()
    }

    pub(crate) async fn wait_for_calls(&self, calls: usize) {
        while self.list_calls() < calls {
            tokio::task::yield_now().await;
        }
    }

    pub(crate) fn fail_lists(&self, message: &str) {
        *self.list_error.lock().unwrap() = Some(message.to_string());
    }

    pub(crate) fn fail_mutations(&self, message: &str) {
        *self.mutation_error.lock().unwrap() = Some(message.to_string());
    }

    pub(crate) fn recover(&self) {
        *self.list_error.lock().unwrap() = None;
        *self.mutation_error.lock().unwrap() = None;
    }

    fn check_mutation(&self) -> Result<(), SourceError> {
        self.mutation_calls.fetch_add(1, Ordering::SeqCst);
        match self.mutation_error.lock().unwrap().clone() {
            Some(message) => Err(SourceError::Http {
                status: 409,
                message,
            }),
            None => Ok(()),
        }
    }

    fn not_found(kind: ResourceKind, id: &str) -> SourceError {
        SourceError::Http {
            status: 404,
            message: format!("{} #{id} not found", kind.label()),
        }
    }
}

fn id_of(row: &Value) -> String {
    row["id"].to_string()
}

#[async_trait]
impl DataSource for FakeSource {
    async fn list_resource(
        &self,
        kind: ResourceKind,
        page: u32,
        size: u32,
        sort: &str,
    ) -> Result<PageResult<Value>, SourceError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_sort.lock().unwrap() = Some(sort.to_string());

        let all = self
            .rows
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default();
        let content = all
            .iter()
            .skip(page as usize * size as usize)
            .take(size as usize)
            .cloned()
            .collect();
        let answer = PageResult::new(content, page, size, all.len() as u64);

        let gate = self
            .call_gates
            .lock()
            .unwrap()
            .pop_front()
            .or_else(|| self.gates.lock().unwrap().get(&page).cloned());
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }

        if let Some(message) = self.list_error.lock().unwrap().clone() {
            return Err(SourceError::Http {
                status: 503,
                message,
            });
        }
        Ok(answer)
    }

    async fn create_resource(
        &self,
        kind: ResourceKind,
        mut payload: Value,
    ) -> Result<Value, SourceError> {
        self.check_mutation()?;
        payload["id"] = json!(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.rows
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .push(payload.clone());
        Ok(payload)
    }

    async fn update_resource(
        &self,
        kind: ResourceKind,
        id: &str,
        payload: Value,
    ) -> Result<Value, SourceError> {
        self.check_mutation()?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .entry(kind)
            .or_default()
            .iter_mut()
            .find(|row| id_of(row) == id)
            .ok_or_else(|| Self::not_found(kind, id))?;
        if let (Some(target), Value::Object(fields)) = (row.as_object_mut(), payload) {
            target.extend(fields);
        }
        Ok(row.clone())
    }

    async fn delete_resource(&self, kind: ResourceKind, id: &str) -> Result<(), SourceError> {
        self.check_mutation()?;
        let mut rows = self.rows.lock().unwrap();
        let rows = rows.entry(kind).or_default();
        let before = rows.len();
        rows.retain(|row| id_of(row) != id);
        if rows.len() == before {
            return Err(Self::not_found(kind, id));
        }
        Ok(())
    }
}

/// Notifier that remembers what it was asked to show.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub(crate) fn failing() -> Self {
        let notifier = Self::default();
        notifier.fail.store(true, Ordering::SeqCst);
        notifier
    }

    pub(crate) fn seen(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub(crate) fn titles(&self) -> Vec<String> {
        self.seen().into_iter().map(|n| n.title).collect()
    }

    pub(crate) fn levels(&self) -> Vec<NotificationLevel> {
        self.seen().into_iter().map(|n| n.level).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notification: &Notification) -> AppResult<()> {
        self.seen.lock().unwrap().push(notification.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Internal {
                source: anyhow::anyhow!("notification channel down"),
            });
        }
        Ok(())
    }

    fn name(&self) -> String {
        "recording".to_string()
    }
}

/// Confirmer with a fixed answer that counts how often it was asked.
pub(crate) struct ScriptedConfirmer {
    answer: bool,
    asked: AtomicUsize,
}

impl ScriptedConfirmer {
    pub(crate) fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }

    pub(crate) fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, _prompt: &str) -> ConfirmResult {
        self.asked.fetch_add(1, Ordering::SeqCst);
        ConfirmResult {
            is_confirmed: self.answer,
        }
    }
}
