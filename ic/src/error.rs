//! Intercom client error types

use thiserror::Error;

/// Errors that can occur talking to Intercom
#[derive(Debug, Error)]
pub enum IntercomError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IntercomError {
    /// HTTP status if the API answered with an error
    pub fn status(&self) -> Option<u16> {
        match self {
            IntercomError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if Intercom rejected the credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}
