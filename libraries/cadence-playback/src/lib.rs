//! Cadence - Playback Control
//!
//! The app-wide player: what is playing, what comes next, and when to stop.
//!
//! This crate provides:
//! - Active list traversal (circular next/previous)
//! - Side queue ("play next", FIFO, consumed before the active list)
//! - Radio mode (extends the active list with a fetched track at the end)
//! - Sleep timer (one countdown at a time, emits an event on expiry)
//! - Playlist write-back when tracks are removed during playback
//! - Event bus for UI synchronization
//!
//! # Architecture
//!
//! `cadence-playback` knows nothing about audio output or the backend:
//! - Radio candidates come from a [`RadioSource`](cadence_core::RadioSource)
//! - Playlist deletes go to a [`PlaylistStore`](cadence_core::PlaylistStore)
//! - The audio element listens for [`PlayerEvent`]s
//!
//! Collaborator failures degrade gracefully and are only logged.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use async_trait::async_trait;
//! use cadence_core::{PlaylistId, PlaylistStore, RadioSource, Result, Track, TrackId};
//! use cadence_playback::{PlaybackConfig, PlaybackController};
//! use std::collections::HashSet;
//! use std::sync::Arc;
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl RadioSource for Offline {
//!     async fn fetch_radio_candidate(&self, _: &Track, _: &HashSet<TrackId>) -> Result<Option<Track>> {
//!         Ok(None)
//!     }
//! }
//!
//! #[async_trait]
//! impl PlaylistStore for Offline {
//!     async fn delete_playlist_entry(&self, _: &PlaylistId, _: &TrackId) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let player =
//!     PlaybackController::new(PlaybackConfig::default(), Arc::new(Offline), Arc::new(Offline))
//!         .unwrap();
//!
//! let a = Track::new("a", "Intro", "Band");
//! let b = Track::new("b", "Outro", "Band");
//! player.start(a.clone(), vec![a.clone(), b.clone()], None);
//!
//! assert_eq!(player.advance(None).await, Some(b));
//! assert_eq!(player.advance(None).await, Some(a)); // wraps around
//! # });
//! ```

mod controller;
mod error;
mod events;
mod session;
mod sleep_timer;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use events::{EventBus, PlayerEvent};
pub use session::PlaybackSession;
pub use types::PlaybackConfig;
