use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::models::ResourceKind;
use crate::pagination::PageResult;

/// Failure reported by a [`DataSource`].
///
/// Cloneable so a single failed fetch can be handed to every caller sharing it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The backend answered with a non-success status
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },

    /// The request never produced a response
    #[error("Request failed: {message}")]
    Transport { message: String },

    /// The response body could not be decoded
    #[error("Invalid response: {message}")]
    Decode { message: String },
}

impl SourceError {
    /// Human-readable message without the status decoration.
    pub fn message(&self) -> &str {
        match self {
            SourceError::Http { message, .. }
            | SourceError::Transport { message }
            | SourceError::Decode { message } => message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Remote store of every resource kind.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn list_resource(
        &self,
        kind: ResourceKind,
        page: u32,
        size: u32,
        sort: &str,
    ) -> Result<PageResult<Value>, SourceError>;

    async fn create_resource(
        &self,
        kind: ResourceKind,
        payload: Value,
    ) -> Result<Value, SourceError>;

    async fn update_resource(
        &self,
        kind: ResourceKind,
        id: &str,
        payload: Value,
    ) -> Result<Value, SourceError>;

    async fn delete_resource(&self, kind: ResourceKind, id: &str) -> Result<(), SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_strips_status() {
        let err = SourceError::Http {
            status: 404,
            message: "Vacancy not found".to_string(),
        };
        assert_eq!(err.message(), "Vacancy not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Vacancy not found (HTTP 404)");

        let err = SourceError::Transport {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.status(), None);
    }
}
