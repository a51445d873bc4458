//! Errors raised while loading or validating configuration

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file selected with `--config` or `RECRUIT_CONFIG_FILE` is missing
    #[error("Required configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Configuration paths are handed to the `config` crate as strings
    #[error("Configuration path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// The merged layers do not deserialize into `Settings`
    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(#[source] config::ConfigError),

    /// A setting holds a value the client cannot work with
    #[error("Invalid {field}: {message}")]
    ValidationError {
        /// Dotted key of the offending setting, e.g. `api.base_url`
        field: String,
        message: String,
    },

    /// `RECRUIT_APP_ENV` or `--env` names no known environment
    #[error("Unknown environment '{0}'. Valid values are: development, test, production")]
    UnknownEnvironment(String),

    /// `RECRUIT_CONFIG_DIR` and `RECRUIT_CONFIG_FILE` were both set
    #[error("{0}")]
    MutualExclusivityError(String),

    /// Reading a layer failed inside the `config` crate
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn mutual_exclusivity(message: impl Into<String>) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }
}
