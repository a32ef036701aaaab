//! Error types for the Cadence backend client.

use cadence_core::CadenceError;
use thiserror::Error;

/// Errors that can occur when talking to the backend.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid backend URL
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Missing or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to parse backend response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Backend is offline or unreachable
    #[error("Backend unreachable: {0}")]
    ServerUnreachable(String),
}

impl ClientError {
    /// Whether the backend refused the request for the caller's credentials
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::ServerError { status: 401 | 403, .. })
    }
}

impl From<::config::ConfigError> for ClientError {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<ClientError> for CadenceError {
    fn from(err: ClientError) -> Self {
        match err {
            e if e.is_permission_denied() => CadenceError::PermissionDenied(e.to_string()),
            ClientError::ServerUnreachable(msg) => CadenceError::Network(msg),
            ClientError::Request(e) => CadenceError::Network(e.to_string()),
            e @ ClientError::ServerError { .. } => CadenceError::Storage(e.to_string()),
            ClientError::ParseError(msg) => CadenceError::Storage(msg),
            e @ (ClientError::InvalidUrl(_) | ClientError::Config(_)) => {
                CadenceError::InvalidInput(e.to_string())
            }
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_map_to_permission_denied() {
        for status in [401, 403] {
            let err = ClientError::ServerError {
                status,
                message: "row-level security".to_string(),
            };
            assert!(matches!(
                CadenceError::from(err),
                CadenceError::PermissionDenied(_)
            ));
        }
    }

    #[test]
    fn test_other_failures_map_by_kind() {
        let unreachable = ClientError::ServerUnreachable("refused".to_string());
        assert!(matches!(
            CadenceError::from(unreachable),
            CadenceError::Network(msg) if msg == "refused"
        ));

        let server = ClientError::ServerError {
            status: 500,
            message: "boom".to_string(),
        };
        match CadenceError::from(server) {
            CadenceError::Storage(msg) => assert!(msg.contains("500")),
            other => panic!("unexpected: {:?}", other),
        }

        let url = ClientError::InvalidUrl("empty".to_string());
        assert!(matches!(
            CadenceError::from(url),
            CadenceError::InvalidInput(_)
        ));
    }
}
