/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// A song as seen by the player
///
/// Fetched from the backend and never mutated by the playback core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist display name
    pub artist: String,

    /// Genre tag
    #[serde(default)]
    pub genre: Option<String>,

    /// Cover art reference (storage URL or bucket path)
    #[serde(default)]
    pub cover_url: Option<String>,

    /// Archived tracks are hidden from playback contexts
    #[serde(default)]
    pub archived: bool,
}

impl Track {
    /// Create a new, non-archived track with minimal metadata
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(id),
            title: title.into(),
            artist: artist.into(),
            genre: None,
            cover_url: None,
            archived: false,
        }
    }

    /// Builder-style genre setter
    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    /// Builder-style archived flag setter
    #[must_use]
    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    /// Whether the track may appear in a playback context
    pub fn is_playable(&self) -> bool {
        !self.archived
    }
}
