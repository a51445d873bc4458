//! Service layer: the list view-model, the mutation runner and their
//! injected collaborators.

mod confirm;
mod list_service;
mod mutation_service;
pub mod notifications;

pub use confirm::{AutoConfirm, ConfirmResult, Confirmer, PromptConfirmer, is_affirmative};
pub use list_service::{ListView, ListViewModel};
pub use mutation_service::{MutationOutcome, MutationRequest, MutationRunner, MutationVerb};
pub use notifications::{Notification, NotificationLevel, Notifier};

use std::sync::Arc;

use crate::cache::QueryClient;
use crate::config::Settings;
use crate::external::{DataSource, RestDataSource, build_http_client};
use crate::models::ResourceKind;
use crate::pagination::PaginationState;

/// Aggregates the shared services of one client session.
///
/// Cloning is cheap since every part is reference counted.
#[derive(Clone)]
pub struct Services {
    pub source: Arc<dyn DataSource>,
    pub queries: QueryClient,
    pub mutations: MutationRunner,
    initial: PaginationState,
}

impl Services {
    pub fn new(
        source: Arc<dyn DataSource>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
        settings: &Settings,
    ) -> Self {
        let queries = QueryClient::new(source.clone(), &settings.query);
        let mutations = MutationRunner::new(source.clone(), queries.clone(), notifier, confirmer);
        Self {
            source,
            queries,
            mutations,
            initial: PaginationState::from_config(&settings.pagination),
        }
    }

    /// Wire the REST backend and the configured notification channels.
    pub fn from_settings(
        settings: &Settings,
        confirmer: Arc<dyn Confirmer>,
    ) -> crate::error::AppResult<Self> {
        let client = build_http_client(&settings.api)?;
        let source = Arc::new(RestDataSource::with_client(
            client.clone(),
            &settings.api.base_url,
        ));
        let notifier = notifications::build_notifier(&settings.notifications, client);
        Ok(Self::new(source, notifier, confirmer, settings))
    }

    /// A list screen for `kind` starting at the configured defaults.
    pub fn list(&self, kind: ResourceKind) -> ListViewModel {
        ListViewModel::new(kind, self.queries.clone(), self.initial.clone())
    }

    pub fn list_at(&self, kind: ResourceKind, state: PaginationState) -> ListViewModel {
        ListViewModel::new(kind, self.queries.clone(), state)
    }
}
