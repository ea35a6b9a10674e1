use thiserror::Error;
use validator::ValidationErrors;

use crate::host::HostError;

/// Errors that can occur while handling a plugin message.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid input provided by the UI.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A host capability failed.
    #[error("host error: {0}")]
    Host(#[from] HostError),
    /// Reading from or writing to the UI channel failed.
    #[error("ui channel failed")]
    Channel(#[source] std::io::Error),
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::InvalidInput(format!("validation failed: {err}"))
    }
}
