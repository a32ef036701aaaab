//! Collaborator traits consumed by the playback core
//!
//! Both capabilities are backed by the hosted backend in production
//! (see `cadence-client`) and by stubs in tests.

use crate::error::Result;
use crate::types::{PlaylistId, Track, TrackId};
use async_trait::async_trait;
use std::collections::HashSet;

/// Source of radio-mode continuation candidates
///
/// Given the track that just reached the end of its playback context,
/// return at most one follow-up track whose id is not in `exclude`.
/// Implementations prefer, in order: same genre among the most played,
/// then a fuzzy artist-name match, then globally popular tracks.
#[async_trait]
pub trait RadioSource: Send + Sync {
    /// Fetch a single continuation candidate
    ///
    /// `Ok(None)` means nothing suitable was found.
    async fn fetch_radio_candidate(
        &self,
        current: &Track,
        exclude: &HashSet<TrackId>,
    ) -> Result<Option<Track>>;
}

/// Persistence for playlist membership
#[async_trait]
pub trait PlaylistStore: Send + Sync {
    /// Remove one track from a persisted playlist
    async fn delete_playlist_entry(&self, playlist_id: &PlaylistId, track_id: &TrackId)
        -> Result<()>;
}
