//! Check command handler
//!
//! Validates the loaded configuration and prints what the client would use,
//! without contacting the backend.

use std::io::Write;

use crate::config::Environment;
use crate::config::settings::Settings;
use crate::error::AppResult;

/// Handler for the check command
pub struct CheckCommandHandler {
    config: Settings,
    environment: Environment,
}

impl CheckCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// # Errors
    /// Returns a configuration error if any section fails validation
    pub fn execute(&self, out: &mut impl Write) -> AppResult<()> {
        self.config.validate()?;
        self.config.logger.clone().into_logger_config()?;

        let api = &self.config.api;
        let pagination = &self.config.pagination;
        let query = &self.config.query;
        let notifications = &self.config.notifications;

        writeln!(out, "✓ Configuration is valid ({})", self.environment)?;
        writeln!(
            out,
            "✓ Backend: {} (timeout {}s, connect {}s)",
            api.base_url, api.request_timeout, api.connect_timeout
        )?;
        writeln!(
            out,
            "✓ Pages: {} rows sorted by {}, sizes {:?}",
            pagination.default_size, pagination.default_sort, pagination.allowed_sizes
        )?;
        writeln!(
            out,
            "✓ Cache: {} pages, fresh for {}s, evicted after {}s",
            query.max_entries, query.stale_seconds, query.ttl_seconds
        )?;

        let mut channels = vec!["log"];
        if notifications.console {
            channels.push("console");
        }
        if notifications.webhook.is_some() {
            channels.push("webhook");
        }
        writeln!(out, "✓ Notifications: {}", channels.join(", "))?;
        writeln!(out, "✓ Log level: {}", self.config.logger.level)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_prints_summary() {
        let mut out = Vec::new();
        CheckCommandHandler::new(Settings::default(), Environment::Test)
            .execute(&mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("✓ Configuration is valid (test)\n"));
        assert!(text.contains("✓ Backend: http://localhost:8080/api/v1"));
        assert!(text.contains("sizes [5, 10, 20, 50]"));
        assert!(text.contains("✓ Notifications: log, console\n"));
    }

    #[test]
    fn test_check_rejects_invalid_settings() {
        let mut config = Settings::default();
        config.pagination.default_size = 7;
        let result = CheckCommandHandler::new(config, Environment::Development)
            .execute(&mut Vec::new());
        assert!(result.is_err());
    }
}
