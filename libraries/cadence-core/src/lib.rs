//! Cadence Core
//!
//! Shared types, traits, and error handling for the Cadence player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `PlaylistId`
//! - **Collaborator Traits**: `RadioSource`, `PlaylistStore`
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::{PlaylistId, Track};
//!
//! let track = Track::new("song-1", "Night Drive", "The Midnight").with_genre("synthwave");
//! let playlist = PlaylistId::new("pl-42");
//!
//! assert!(track.is_playable());
//! assert_eq!(playlist.as_str(), "pl-42");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CadenceError, Result};
pub use traits::{PlaylistStore, RadioSource};
pub use types::{PlaylistId, Track, TrackId};
