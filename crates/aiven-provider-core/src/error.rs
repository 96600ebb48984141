//! Provider error types

use thiserror::Error;

/// Provider errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("invalid resource identifier: {0}")]
    InvalidResourceId(String),

    #[error("{key:?}: invalid duration: {reason}")]
    InvalidDuration { key: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Resource type not registered: {0}")]
    UnknownResourceType(String),

    #[error("Operation not supported: {0}")]
    UnsupportedOperation(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ProviderError>;

/// Error returned by a remote API call.
///
/// The client adapter decides which shape a failure takes: responses that
/// carried an HTTP status become [`RemoteError::Api`], everything else
/// (transport failures, undecodable bodies) becomes [`RemoteError::Other`].
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RemoteError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if it came from an API response.
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Api { status, .. } => Some(*status),
            RemoteError::Other(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
