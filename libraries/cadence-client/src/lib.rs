//! Cadence Backend Client
//!
//! HTTP client for the hosted backend that stores songs and playlists.
//!
//! # Features
//!
//! - **Songs**: top songs by genre, by artist, most played
//! - **Playlists**: delete entries when tracks are removed during playback
//! - **Radio**: genre, then artist, then popularity based continuation
//!
//! [`BaasClient`] implements both collaborator traits the playback
//! controller needs.
//!
//! # Example
//!
//! ```ignore
//! use cadence_client::{BaasClient, BaasConfig};
//! use cadence_playback::{PlaybackConfig, PlaybackController};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // cadence.toml and/or CADENCE_URL, CADENCE_API_KEY
//!     let client = Arc::new(BaasClient::new(BaasConfig::load()?)?);
//!
//!     let player = PlaybackController::new(
//!         PlaybackConfig::default(),
//!         client.clone(),
//!         client.clone(),
//!     )?;
//!
//!     let top = client.songs().most_played(20).await?;
//!     if let Some(first) = top.first() {
//!         player.start(first.clone(), top.clone(), None);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod playlists;
mod radio;
mod songs;
mod types;

pub use client::BaasClient;
pub use config::BaasConfig;
pub use error::{ClientError, Result};
pub use playlists::PlaylistsClient;
pub use radio::RadioPicker;
pub use songs::SongsClient;
pub use types::SongRow;
