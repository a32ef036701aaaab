//! Radio continuation backed by the songs table
//!
//! Candidate pools are tried in order of similarity to the track that just
//! played: same genre, then same artist, then the most played songs overall.
//! Within a pool one eligible song is chosen uniformly at random.

use crate::client::BaasClient;
use async_trait::async_trait;
use cadence_core::{RadioSource, Track, TrackId};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Random selection from a candidate pool
#[derive(Debug)]
pub struct RadioPicker {
    rng: Mutex<StdRng>,
}

impl RadioPicker {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic picker for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Choose one playable track not in `exclude`, if any.
    pub fn pick(&self, pool: Vec<Track>, exclude: &HashSet<TrackId>) -> Option<Track> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        pool.into_iter()
            .filter(|t| t.is_playable() && !exclude.contains(&t.id))
            .choose(&mut *rng)
    }
}

impl Default for RadioPicker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RadioSource for BaasClient {
    async fn fetch_radio_candidate(
        &self,
        current: &Track,
        exclude: &HashSet<TrackId>,
    ) -> cadence_core::Result<Option<Track>> {
        let songs = self.songs();
        let limit = self.radio_pool_size();

        if let Some(genre) = current.genre.as_deref() {
            let pool = songs.top_by_genre(genre, limit).await?;
            if let Some(track) = self.picker().pick(pool, exclude) {
                debug!(track_id = %track.id, genre, "Radio pick by genre");
                return Ok(Some(track));
            }
        }

        if !current.artist.trim().is_empty() {
            let pool = songs.by_artist(&current.artist, limit).await?;
            if let Some(track) = self.picker().pick(pool, exclude) {
                debug!(track_id = %track.id, artist = %current.artist, "Radio pick by artist");
                return Ok(Some(track));
            }
        }

        let pool = songs.most_played(limit).await?;
        let track = self.picker().pick(pool, exclude);
        debug!(track_id = ?track.as_ref().map(|t| &t.id), "Radio pick from most played");
        Ok(track)
    }
}
