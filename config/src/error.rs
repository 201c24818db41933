//! Errors raised while assembling the service configuration.

use crate::file_loader::ConfigFileError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    File(#[from] ConfigFileError),

    #[error("Invalid value for {key}: {reason}")]
    Env { key: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
