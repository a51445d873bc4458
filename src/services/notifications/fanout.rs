use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::provider::{Notification, Notifier};
use crate::error::AppResult;

/// Delivers each notification to every inner notifier.
///
/// All channels are attempted even when one fails; the first failure is
/// returned afterwards.
pub struct FanoutNotifier {
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new(notifiers: Vec<Arc<dyn Notifier>>) -> Self {
        Self { notifiers }
    }
}

#[async_trait]
impl Notifier for FanoutNotifier {
    async fn notify(&self, notification: &Notification) -> AppResult<()> {
        let mut first_error = None;
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(notification).await {
                warn!(notifier = %notifier.name(), error = %e, "Notification delivery failed");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn name(&self) -> String {
        let names: Vec<String> = self.notifiers.iter().map(|n| n.name()).collect();
        format!("fanout[{}]", names.join(","))
    }
}
