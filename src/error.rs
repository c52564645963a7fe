//! Error taxonomy for the secret ACL controller.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::MISSING_ERROR_CODES;

/// Error reported by the remote secrets API.
///
/// `Display` renders the remote message verbatim so the host can surface it to
/// the end user unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable classification, e.g. `INVALID_REQUEST` or `NOT_FOUND`.
    pub error_code: String,
    /// Human-readable message from the service.
    pub message: String,
    /// HTTP status of the response, when the error came over the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ApiError {
    #[must_use]
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            status_code: None,
        }
    }

    #[must_use]
    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// True when the classification says the addressed resource does not exist.
    ///
    /// Only the error code counts; a bare 404 status is not enough.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        MISSING_ERROR_CODES.contains(&self.error_code.as_str())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Error)]
pub enum AclError {
    #[error("invalid value for '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("missing required attribute '{field}'")]
    MissingAttribute { field: String },

    #[error("invalid ID: {id}: {reason}")]
    MalformedId { id: String, reason: String },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid client configuration: {reason}")]
    Config { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AclError {
    /// Returns the remote error if this failure came from the secrets API.
    #[must_use]
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// True for a remote "resource does not exist" classification.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_missing)
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for AclError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AclError>;
