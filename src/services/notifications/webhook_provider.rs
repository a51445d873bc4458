//! Webhook notifier.
//!
//! Mirrors every notification to a configured URL as a JSON POST, using the
//! shared backend HTTP client for connection pooling.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::provider::{Notification, Notifier};
use crate::config::WebhookConfig;
use crate::error::AppResult;
use crate::external::SourceError;

pub struct WebhookNotifier {
    client: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookNotifier {
    pub fn new(client: reqwest::Client, config: WebhookConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> AppResult<()> {
        let start = Instant::now();

        let mut request = self
            .client
            .post(&self.config.url)
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .json(&json!({
                "level": notification.level,
                "title": notification.title,
                "body": notification.body,
                "timestamp": notification.timestamp,
            }));

        for (key, value) in &self.config.headers {
            request = request.header(key, value);
        }

        let response = request.send().await.map_err(|e| SourceError::Transport {
            message: e.to_string(),
        })?;
        let status = response.status();
        debug!(
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Webhook notification sent"
        );

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Http {
                status: status.as_u16(),
                message,
            }
            .into());
        }
        Ok(())
    }

    fn name(&self) -> String {
        "webhook".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(url: String) -> WebhookConfig {
        WebhookConfig {
            url,
            headers: HashMap::from([("X-Token".to_string(), "secret".to_string())]),
            timeout_seconds: 5,
        }
    }

    #[tokio::test]
    async fn test_posts_notification_with_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(header("X-Token", "secret"))
            .and(body_partial_json(json!({
                "level": "success",
                "title": "Candidate created"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let notifier =
            WebhookNotifier::new(reqwest::Client::new(), config(format!("{}/hook", server.uri())));
        notifier
            .notify(&Notification::success("Candidate created", "Ann Lee"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_rejected_delivery_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let notifier = WebhookNotifier::new(reqwest::Client::new(), config(server.uri()));
        let err = notifier
            .notify(&Notification::error("Could not delete", "boom"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Source(SourceError::Http { status: 503, .. })
        ));
    }
}
