//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{
    ApiConfig, FileSettings, LoggerSettings, NotificationConfig, PaginationConfig, QueryConfig,
    Settings,
};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ApiConfig {
    /// Validate REST backend configuration
    ///
    /// # Validation Rules
    /// - Base URL must parse and use http or https
    /// - Timeouts must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::validation(
                "api.base_url",
                format!("Invalid base URL '{}': {}", self.base_url, e),
            )
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::validation(
                "api.base_url",
                format!("Unsupported scheme '{}'. Use http or https.", url.scheme()),
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "api.request_timeout",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout == 0 {
            return Err(ConfigError::validation(
                "api.connect_timeout",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl PaginationConfig {
    /// Validate list screen defaults
    ///
    /// # Validation Rules
    /// - At least one allowed size, none of them 0
    /// - The default size must be one of the allowed sizes
    /// - The default sort must not be blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allowed_sizes.is_empty() {
            return Err(ConfigError::validation(
                "pagination.allowed_sizes",
                "At least one page size must be allowed.",
            ));
        }

        if self.allowed_sizes.contains(&0) {
            return Err(ConfigError::validation(
                "pagination.allowed_sizes",
                "Page sizes must be greater than 0.",
            ));
        }

        if !self.is_allowed_size(self.default_size) {
            return Err(ConfigError::validation(
                "pagination.default_size",
                format!(
                    "Default page size {} is not one of the allowed sizes {:?}.",
                    self.default_size, self.allowed_sizes
                ),
            ));
        }

        if self.default_sort.trim().is_empty() {
            return Err(ConfigError::validation(
                "pagination.default_sort",
                "Default sort descriptor must not be empty.",
            ));
        }

        Ok(())
    }
}

impl QueryConfig {
    /// Validate page cache configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == 0 {
            return Err(ConfigError::validation(
                "query.max_entries",
                "The page cache must hold at least one entry.",
            ));
        }

        if self.ttl_seconds == 0 {
            return Err(ConfigError::validation(
                "query.ttl_seconds",
                "Cache TTL must be greater than 0 seconds.",
            ));
        }

        if self.stale_seconds > self.ttl_seconds {
            return Err(ConfigError::validation(
                "query.stale_seconds",
                format!(
                    "Stale time ({}s) cannot exceed the cache TTL ({}s).",
                    self.stale_seconds, self.ttl_seconds
                ),
            ));
        }

        Ok(())
    }
}

impl NotificationConfig {
    /// Validate notification channels
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(webhook) = &self.webhook {
            let url = Url::parse(&webhook.url).map_err(|_| {
                ConfigError::validation("notifications.webhook.url", "Invalid URL format")
            })?;

            if url.scheme() != "https" {
                return Err(ConfigError::validation(
                    "notifications.webhook.url",
                    "Only HTTPS URLs are allowed",
                ));
            }

            if webhook.timeout_seconds == 0 {
                return Err(ConfigError::validation(
                    "notifications.webhook.timeout_seconds",
                    "Webhook timeout must be greater than 0 seconds.",
                ));
            }
        }

        Ok(())
    }
}

impl FileSettings {
    /// Validate file settings
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        self.file.validate()
    }
}

impl Settings {
    /// Validate every section, stopping at the first error
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.pagination.validate()?;
        self.query.validate()?;
        self.notifications.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
