use std::time::Duration;

use crate::config::ApiConfig;
use crate::external::SourceError;

/// Build the HTTP client shared by every request to the backend.
///
/// Connections are pooled, so the client is built once per process and
/// cloned into each consumer.
pub fn build_http_client(config: &ApiConfig) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(config.request_timeout())
        .connect_timeout(config.connect_timeout())
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .gzip(true)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| SourceError::Transport {
            message: format!("failed to build HTTP client: {e}"),
        })
}
