//! Error types for playback management

use thiserror::Error;

/// Playback errors
///
/// Controller operations themselves never fail; these cover setup only.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
