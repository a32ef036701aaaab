//! Row types returned by the backend REST API.

use cadence_core::Track;
use serde::{Deserialize, Serialize};

/// Columns requested for every songs query
pub(crate) const SONG_COLUMNS: &str = "id,title,artist_name,genre,cover_url,is_archived,play_count";

/// A row of the `songs` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongRow {
    pub id: String,
    pub title: String,
    pub artist_name: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub is_archived: bool,
    /// Total plays across all users
    #[serde(default)]
    pub play_count: u64,
}

impl From<SongRow> for Track {
    fn from(row: SongRow) -> Self {
        let mut track = Track::new(row.id, row.title, row.artist_name).archived(row.is_archived);
        track.genre = row.genre.filter(|g| !g.trim().is_empty());
        track.cover_url = row.cover_url;
        track
    }
}
