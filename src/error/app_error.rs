use crate::config::error::ConfigError;
use crate::external::SourceError;
use thiserror::Error;

/// A single field-level validation failure reported by a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Application-wide error type that represents all possible errors in the system.
///
/// Every variant carries a human-readable message so that it can be surfaced
/// to the operator as a notification or an error banner.
#[derive(Error, Debug)]
pub enum AppError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Form validation error collecting every failing field
    #[error("Form validation failed: {}", summarize(.errors))]
    InvalidForm { errors: Vec<ValidationFieldError> },

    /// Bad request error with descriptive message
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// The REST backend rejected or failed a request
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A list page could not be loaded
    #[error("Could not load {resource}: {message}")]
    LoadFailed { resource: String, message: String },

    /// A mutation failed; the operator was already notified
    #[error("{message}")]
    MutationFailed { message: String },

    /// Configuration error with key information
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// True when a notification already told the operator about this error.
    pub fn is_reported(&self) -> bool {
        matches!(self, AppError::MutationFailed { .. })
    }

    /// Message suitable for a notification body.
    ///
    /// Unlike `to_string()`, data source failures are reported with the
    /// backend's own message and internal errors include their cause.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Source(err) => err.message().to_string(),
            AppError::Internal { source } => format!("Internal error: {source:#}"),
            AppError::Configuration { key, source } => {
                format!("Configuration error ({key}): {source:#}")
            }
            other => other.to_string(),
        }
    }
}

fn summarize(errors: &[ValidationFieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::Internal {
            source: anyhow::Error::new(error),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "config".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::new(error),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = if field == "__all__" {
                    "form".to_string()
                } else {
                    field.to_string()
                };
                errs.iter().map(move |e| ValidationFieldError {
                    field: field.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        // HashMap iteration order is unspecified
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::InvalidForm { errors: fields }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        AppError::BadRequest {
            message: format!("Invalid JSON payload: {error}"),
        }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
