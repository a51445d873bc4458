//! Toast-style notifications with pluggable providers.
//!
//! The core trait [`Notifier`] is injected into the mutation runner, so any
//! channel (terminal, webhook, log) can surface success and error messages.

mod console_provider;
mod fanout;
mod provider;
mod tracing_provider;
mod webhook_provider;

pub use console_provider::ConsoleNotifier;
pub use fanout::FanoutNotifier;
pub use provider::{Notification, NotificationLevel, Notifier};
pub use tracing_provider::TracingNotifier;
pub use webhook_provider::WebhookNotifier;

use std::sync::Arc;

use crate::config::NotificationConfig;

/// Build the notifier described by `[notifications]`.
///
/// Every notification is always logged; the console and webhook channels are
/// added when configured.
pub fn build_notifier(config: &NotificationConfig, client: reqwest::Client) -> Arc<dyn Notifier> {
    let mut notifiers: Vec<Arc<dyn Notifier>> = vec![Arc::new(TracingNotifier)];
    if config.console {
        notifiers.push(Arc::new(ConsoleNotifier::detect()));
    }
    if let Some(webhook) = &config.webhook {
        notifiers.push(Arc::new(WebhookNotifier::new(client, webhook.clone())));
    }
    Arc::new(FanoutNotifier::new(notifiers))
}
