//! List command handler
//!
//! Fetches one page of a resource and prints it.

use std::io::Write;

use super::{initial_state, render_list};
use crate::cli::PageArgs;
use crate::config::PaginationConfig;
use crate::error::{AppError, AppResult};
use crate::models::ResourceKind;
use crate::services::{ListView, Services};

/// Handler for the list command
pub struct ListCommandHandler {
    services: Services,
    pagination: PaginationConfig,
}

impl ListCommandHandler {
    pub fn new(services: Services, pagination: PaginationConfig) -> Self {
        Self {
            services,
            pagination,
        }
    }

    /// Print page `page` (1-based) of `kind`.
    ///
    /// # Errors
    /// Returns `LoadFailed` after printing the error screen when the backend
    /// rejects the request.
    pub async fn execute(
        &self,
        kind: ResourceKind,
        page: Option<u32>,
        paging: &PageArgs,
        out: &mut impl Write,
    ) -> AppResult<()> {
        let mut state = initial_state(&self.pagination, paging)?;
        if let Some(page) = page {
            state = state.with_page(page.saturating_sub(1));
        }

        let list = self.services.list_at(kind, state);
        let view = list.load().await;
        write!(out, "{}", render_list(&list, &self.pagination))?;

        match view {
            ListView::Error(message) => Err(AppError::LoadFailed {
                resource: kind.title().to_lowercase(),
                message,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::testing::{FakeSource, RecordingNotifier, ScriptedConfirmer};
    use std::sync::Arc;

    fn handler(source: Arc<FakeSource>) -> ListCommandHandler {
        let settings = Settings::default();
        let services = Services::new(
            source,
            Arc::new(RecordingNotifier::default()),
            Arc::new(ScriptedConfirmer::new(true)),
            &settings,
        );
        ListCommandHandler::new(services, settings.pagination)
    }

    #[tokio::test]
    async fn test_list_prints_requested_page() {
        let source = Arc::new(FakeSource::with_rows(ResourceKind::Categories, 25));
        let paging = PageArgs {
            size: Some(10),
            sort: None,
        };
        let mut out = Vec::new();
        handler(source.clone())
            .execute(ResourceKind::Categories, Some(3), &paging, &mut out)
            .await
            .unwrap();

        let screen = String::from_utf8(out).unwrap();
        assert!(screen.starts_with("Categories\n\n"));
        assert!(screen.contains("Showing 21-25 of 25"));
        assert!(screen.contains("[3]"));
        assert_eq!(source.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_list_forwards_sort() {
        let source = Arc::new(FakeSource::with_rows(ResourceKind::Users, 3));
        let paging = PageArgs {
            size: None,
            sort: Some("username,asc".to_string()),
        };
        let mut out = Vec::new();
        handler(source.clone())
            .execute(ResourceKind::Users, None, &paging, &mut out)
            .await
            .unwrap();
        assert_eq!(source.last_sort().as_deref(), Some("username,asc"));
    }

    #[tokio::test]
    async fn test_list_error_prints_banner_and_fails() {
        let source = Arc::new(FakeSource::with_rows(ResourceKind::Blogs, 3));
        source.fail_lists("Service unavailable");
        let mut out = Vec::new();
        let err = handler(source)
            .execute(ResourceKind::Blogs, None, &PageArgs::default(), &mut out)
            .await
            .unwrap_err();

        let screen = String::from_utf8(out).unwrap();
        assert!(screen.contains("! Error: Service unavailable"));
        assert_eq!(
            err.to_string(),
            "Could not load blogs: Service unavailable"
        );
    }
}
