use async_trait::async_trait;
use tracing::{info, warn};

use super::provider::{Notification, NotificationLevel, Notifier};
use crate::error::AppResult;

/// Records every notification as a structured log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, notification: &Notification) -> AppResult<()> {
        let Notification {
            level, title, body, ..
        } = notification;
        match level {
            NotificationLevel::Error => warn!(%level, %title, %body, "Notification"),
            _ => info!(%level, %title, %body, "Notification"),
        }
        Ok(())
    }

    fn name(&self) -> String {
        "tracing".to_string()
    }
}
