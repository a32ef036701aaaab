/// Core error types for Cadence
use thiserror::Error;

/// Result type alias using `CadenceError`
pub type Result<T> = std::result::Result<T, CadenceError>;

/// Error type shared across collaborator boundaries
#[derive(Error, Debug)]
pub enum CadenceError {
    /// Backend storage/persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Backend rejected the request (row-level security, auth)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl CadenceError {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let err = CadenceError::not_found("Playlist", "pl-1");
        assert_eq!(err.to_string(), "Playlist not found: pl-1");
    }

    #[test]
    fn serde_errors_convert() {
        let err: CadenceError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, CadenceError::Serialization(_)));
    }
}
