//! Create, update and delete with cache invalidation.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::QueryClient;
use crate::error::AppError;
use crate::external::{DataSource, SourceError};
use crate::models::{FormMode, ResourceForm, ResourceKind};
use crate::services::{Confirmer, ListViewModel, Notification, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationVerb {
    Create,
    Update,
    Delete,
}

impl MutationVerb {
    pub fn past_tense(&self) -> &'static str {
        match self {
            MutationVerb::Create => "created",
            MutationVerb::Update => "updated",
            MutationVerb::Delete => "deleted",
        }
    }

    pub fn infinitive(&self) -> &'static str {
        match self {
            MutationVerb::Create => "create",
            MutationVerb::Update => "update",
            MutationVerb::Delete => "delete",
        }
    }

    /// Destructive actions need confirmation first.
    pub fn is_destructive(&self) -> bool {
        matches!(self, MutationVerb::Delete)
    }
}

/// What a mutation does, used for confirmation and notification texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub kind: ResourceKind,
    pub verb: MutationVerb,
    pub id: Option<String>,
}

impl MutationRequest {
    pub fn create(kind: ResourceKind) -> Self {
        Self {
            kind,
            verb: MutationVerb::Create,
            id: None,
        }
    }

    pub fn update(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            verb: MutationVerb::Update,
            id: Some(id.into()),
        }
    }

    pub fn delete(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            verb: MutationVerb::Delete,
            id: Some(id.into()),
        }
    }

    /// e.g. "vacancy #12"
    fn subject(&self) -> String {
        let label = self.kind.label().to_lowercase();
        match &self.id {
            Some(id) => format!("{label} #{id}"),
            None => label,
        }
    }

    pub fn confirm_prompt(&self) -> String {
        format!(
            "{} {}? This cannot be undone.",
            capitalize(self.verb.infinitive()),
            self.subject()
        )
    }

    pub fn success_title(&self) -> String {
        format!("{} {}", capitalize(&self.subject()), self.verb.past_tense())
    }

    pub fn failure_title(&self) -> String {
        format!("Could not {} {}", self.verb.infinitive(), self.subject())
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<T> {
    Completed(T),
    /// The operator declined the confirmation
    Cancelled,
    Failed(String),
}

impl<T> MutationOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, MutationOutcome::Completed(_))
    }
}

/// Runs mutations against the data source.
///
/// On success the kind's cached pages are invalidated, a success notification
/// is shown and the owning list is refetched. On failure only an error
/// notification is shown; the list keeps its rows.
#[derive(Clone)]
pub struct MutationRunner {
    source: Arc<dyn DataSource>,
    client: QueryClient,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
}

impl MutationRunner {
    pub fn new(
        source: Arc<dyn DataSource>,
        client: QueryClient,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            source,
            client,
            notifier,
            confirmer,
        }
    }

    async fn notify(&self, notification: Notification) {
        if let Err(e) = self.notifier.notify(&notification).await {
            warn!(notifier = %self.notifier.name(), error = %e, "Failed to deliver notification");
        }
    }

    /// Run `action` for `request`, then invalidate and refetch `list` on success.
    pub async fn run<T, F, Fut>(
        &self,
        list: Option<&ListViewModel>,
        request: &MutationRequest,
        action: F,
    ) -> MutationOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        if request.verb.is_destructive() {
            let answer = self.confirmer.confirm(&request.confirm_prompt()).await;
            if !answer.is_confirmed {
                debug!(kind = %request.kind, id = ?request.id, "Mutation cancelled");
                return MutationOutcome::Cancelled;
            }
        }

        match action().await {
            Ok(value) => {
                info!(
                    kind = %request.kind,
                    id = ?request.id,
                    verb = request.verb.infinitive(),
                    "Mutation succeeded"
                );
                self.client.invalidate(request.kind);
                self.notify(Notification::success(request.success_title(), ""))
                    .await;
                if let Some(list) = list {
                    list.refetch().await;
                }
                MutationOutcome::Completed(value)
            }
            Err(e) => {
                info!(kind = %request.kind, id = ?request.id, error = %e, "Mutation failed");
                let message = e.message().to_string();
                self.notify(Notification::error(request.failure_title(), &message))
                    .await;
                MutationOutcome::Failed(message)
            }
        }
    }

    /// Reject an invalid form before any request is made.
    async fn reject(&self, request: &MutationRequest, error: AppError) -> MutationOutcome<Value> {
        let message = error.user_message();
        debug!(kind = %request.kind, error = %message, "Form rejected");
        self.notify(Notification::error(request.failure_title(), &message))
            .await;
        MutationOutcome::Failed(message)
    }

    pub async fn create(
        &self,
        list: Option<&ListViewModel>,
        form: &ResourceForm,
    ) -> MutationOutcome<Value> {
        let request = MutationRequest::create(form.kind());
        let payload = match form
            .validate(FormMode::Create)
            .and_then(|()| form.to_payload())
        {
            Ok(payload) => payload,
            Err(e) => return self.reject(&request, e).await,
        };
        self.run(list, &request, || {
            self.source.create_resource(request.kind, payload)
        })
        .await
    }

    pub async fn update(
        &self,
        list: Option<&ListViewModel>,
        id: &str,
        form: &ResourceForm,
    ) -> MutationOutcome<Value> {
        let request = MutationRequest::update(form.kind(), id);
        let payload = match form
            .validate(FormMode::Update)
            .and_then(|()| form.to_payload())
        {
            Ok(payload) => payload,
            Err(e) => return self.reject(&request, e).await,
        };
        self.run(list, &request, || {
            self.source.update_resource(request.kind, id, payload)
        })
        .await
    }

    pub async fn delete(
        &self,
        list: Option<&ListViewModel>,
        kind: ResourceKind,
        id: &str,
    ) -> MutationOutcome<()> {
        let request = MutationRequest::delete(kind, id);
        self.run(list, &request, || self.source.delete_resource(kind, id))
            .await
    }
}
