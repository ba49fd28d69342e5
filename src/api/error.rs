//! Error taxonomy for the photos API client.
//!
//! Every variant is terminal: the client never retries, callers decide
//! whether to try again.

use thiserror::Error;

/// Why a request never produced a usable HTTP response.
#[derive(Debug, Error)]
pub enum TransportCause {
    /// Connection, TLS, timeout or body-read failure.
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Server answered outside the 2xx range.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
}

/// Errors returned by [`PhotosApi`](super::PhotosApi) operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request URL or parameters could not be encoded.
    #[error("Failed to build request: {reason}")]
    FailedToBuildRequest { reason: String },

    /// Transport failure or non-2xx status.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportCause),

    /// 2xx response with an empty body.
    #[error("No data received")]
    NoData,

    /// Body did not match the expected schema.
    #[error("Decoding error: {0}")]
    Decoding(#[from] serde_json::Error),

    /// Provider answered with a `stat: fail` envelope.
    #[error("Remote error {code}: {message}")]
    Remote { code: i64, message: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(TransportCause::Request(err))
    }
}

impl ApiError {
    /// Text suitable for an error view state.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::FailedToBuildRequest { .. } => "Failed to build request.".to_string(),
            ApiError::Transport(cause) => cause.to_string(),
            ApiError::NoData => "No data received from the server.".to_string(),
            ApiError::Decoding(_) => "Failed to decode data from server.".to_string(),
            ApiError::Remote { message, .. } => message.clone(),
        }
    }

    /// Stable error kind for structured logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::FailedToBuildRequest { .. } => "failed_to_build_request",
            ApiError::Transport(_) => "transport_error",
            ApiError::NoData => "no_data",
            ApiError::Decoding(_) => "decoding_error",
            ApiError::Remote { .. } => "remote_error",
        }
    }
}
