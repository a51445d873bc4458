use std::io::{IsTerminal, Write};

use async_trait::async_trait;

use super::provider::{Notification, NotificationLevel, Notifier};
use crate::error::AppResult;

/// Prints notifications as one-line toasts on stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleNotifier {
    colored: bool,
}

impl ConsoleNotifier {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// Colored output only when stderr is a terminal.
    pub fn detect() -> Self {
        Self::new(std::io::stderr().is_terminal())
    }

    pub fn format(&self, notification: &Notification) -> String {
        let (marker, color) = match notification.level {
            NotificationLevel::Success => ("[ok]", "32"),
            NotificationLevel::Error => ("[error]", "31"),
            NotificationLevel::Info => ("[info]", "36"),
        };
        let marker = if self.colored {
            format!("\x1b[{color}m{marker}\x1b[0m")
        } else {
            marker.to_string()
        };
        if notification.body.is_empty() {
            format!("{marker} {}", notification.title)
        } else {
            format!("{marker} {}: {}", notification.title, notification.body)
        }
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, notification: &Notification) -> AppResult<()> {
        let line = self.format(notification);
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{line}")?;
        Ok(())
    }

    fn name(&self) -> String {
        "console".to_string()
    }
}
