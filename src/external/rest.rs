use async_trait::async_trait;
use reqwest::{Response, Url};
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::external::{DataSource, SourceError, build_http_client};
use crate::models::ResourceKind;
use crate::pagination::PageResult;

/// [`DataSource`] over the recruitment REST API.
///
/// Every kind lives under `{base_url}/{kind.path()}`, with single rows
/// addressed as `{base_url}/{kind.path()}/{id}`.
#[derive(Debug, Clone)]
pub struct RestDataSource {
    client: reqwest::Client,
    base_url: String,
}

impl RestDataSource {
    pub fn new(config: &ApiConfig) -> Result<Self, SourceError> {
        Ok(Self::with_client(build_http_client(config)?, &config.base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, kind: ResourceKind, id: Option<&str>) -> Result<Url, SourceError> {
        let raw = match id {
            Some(id) => format!("{}/{}/{}", self.base_url, kind.path(), id),
            None => format!("{}/{}", self.base_url, kind.path()),
        };
        Url::parse(&raw).map_err(|e| SourceError::Transport {
            message: format!("invalid URL '{raw}': {e}"),
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, SourceError> {
        let response = request.send().await.map_err(|e| SourceError::Transport {
            message: e.to_string(),
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_string()
            });

        Err(SourceError::Http {
            status: status.as_u16(),
            message,
        })
    }

    /// Decode a JSON body; an empty body decodes to `null`.
    async fn json_body(response: Response) -> Result<Value, SourceError> {
        let bytes = response.bytes().await.map_err(|e| SourceError::Transport {
            message: e.to_string(),
        })?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| SourceError::Decode {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl DataSource for RestDataSource {
    async fn list_resource(
        &self,
        kind: ResourceKind,
        page: u32,
        size: u32,
        sort: &str,
    ) -> Result<PageResult<Value>, SourceError> {
        let mut url = self.url(kind, None)?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("size", &size.to_string())
            .append_pair("sort", sort);

        debug!(kind = %kind, page, size, sort, "Listing resource");
        let response = self.send(self.client.get(url)).await?;
        let body = Self::json_body(response).await?;
        serde_json::from_value(body).map_err(|e| SourceError::Decode {
            message: format!("{kind} page: {e}"),
        })
    }

    async fn create_resource(
        &self,
        kind: ResourceKind,
        payload: Value,
    ) -> Result<Value, SourceError> {
        debug!(kind = %kind, "Creating resource");
        let url = self.url(kind, None)?;
        let response = self.send(self.client.post(url).json(&payload)).await?;
        Self::json_body(response).await
    }

    async fn update_resource(
        &self,
        kind: ResourceKind,
        id: &str,
        payload: Value,
    ) -> Result<Value, SourceError> {
        debug!(kind = %kind, id, "Updating resource");
        let url = self.url(kind, Some(id))?;
        let response = self.send(self.client.put(url).json(&payload)).await?;
        Self::json_body(response).await
    }

    async fn delete_resource(&self, kind: ResourceKind, id: &str) -> Result<(), SourceError> {
        debug!(kind = %kind, id, "Deleting resource");
        let url = self.url(kind, Some(id))?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
