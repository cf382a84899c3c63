//! Error types for investatrack-client

use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorCode {
    /// Backend unreachable or connection dropped
    Transport,
    /// Backend answered with a non-2xx status
    Status,
    /// Body did not match the expected shape
    Decode,
    /// Request could not be built
    InvalidRequest,
}

impl std::fmt::Display for ClientErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientErrorCode::Transport => write!(f, "TRANSPORT"),
            ClientErrorCode::Status => write!(f, "STATUS"),
            ClientErrorCode::Decode => write!(f, "DECODE"),
            ClientErrorCode::InvalidRequest => write!(f, "INVALID_REQUEST"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn code(&self) -> ClientErrorCode {
        match self {
            ClientError::Transport(_) => ClientErrorCode::Transport,
            ClientError::Status { .. } => ClientErrorCode::Status,
            ClientError::Decode(_) => ClientErrorCode::Decode,
            ClientError::InvalidRequest(_) => ClientErrorCode::InvalidRequest,
        }
    }

    /// Build a status error from a response body, preferring the backend's
    /// `{"error": "..."}` message when present.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    "empty body".to_string()
                } else {
                    trimmed.chars().take(200).collect()
                }
            });
        ClientError::Status { status, message }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else if e.is_builder() {
            ClientError::InvalidRequest(e.to_string())
        } else if let Some(status) = e.status() {
            ClientError::Status { status: status.as_u16(), message: e.to_string() }
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_prefers_error_field() {
        let err = ClientError::from_status(400, r#"{"error":"Invalid transaction data: Insufficient shares"}"#);
        assert_eq!(err.code(), ClientErrorCode::Status);
        assert_eq!(err.to_string(), "backend returned 400: Invalid transaction data: Insufficient shares");
    }

    #[test]
    fn test_from_status_plain_body() {
        match ClientError::from_status(500, "  ") {
            ClientError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "empty body");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
