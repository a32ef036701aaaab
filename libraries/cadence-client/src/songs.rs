//! Songs queries.
//!
//! Archived songs are filtered server-side on every query.

use crate::client::BaasClient;
use crate::error::{ClientError, Result};
use crate::types::{SongRow, SONG_COLUMNS};
use cadence_core::Track;
use reqwest::Method;
use tracing::debug;

/// Read access to the `songs` table.
pub struct SongsClient<'a> {
    client: &'a BaasClient,
}

impl<'a> SongsClient<'a> {
    pub(crate) fn new(client: &'a BaasClient) -> Self {
        Self { client }
    }

    /// Most played songs of a genre.
    pub async fn top_by_genre(&self, genre: &str, limit: usize) -> Result<Vec<Track>> {
        self.query(&[("genre", format!("eq.{}", genre))], limit).await
    }

    /// Most played songs whose artist name contains `artist` (case-insensitive).
    ///
    /// Pattern characters in the name match literally.
    pub async fn by_artist(&self, artist: &str, limit: usize) -> Result<Vec<Track>> {
        let pattern = format!("ilike.*{}*", escape_like(artist.trim()));
        self.query(&[("artist_name", pattern)], limit).await
    }

    /// Most played songs overall.
    pub async fn most_played(&self, limit: usize) -> Result<Vec<Track>> {
        self.query(&[], limit).await
    }

    async fn query(&self, filters: &[(&str, String)], limit: usize) -> Result<Vec<Track>> {
        let mut params: Vec<(&str, String)> = vec![
            ("select", SONG_COLUMNS.to_string()),
            ("is_archived", "eq.false".to_string()),
        ];
        params.extend(filters.iter().cloned());
        params.push(("order", "play_count.desc".to_string()));
        params.push(("limit", limit.to_string()));

        let request = self.client.table(Method::GET, "songs").query(&params);
        let response = self.client.send(request).await?;

        let rows: Vec<SongRow> = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse songs response: {}", e))
        })?;

        debug!(count = rows.len(), filters = ?filters, "Fetched songs");

        Ok(rows.into_iter().map(Track::from).collect())
    }
}

/// Backslash-escape the characters `ilike` treats as wildcards
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_' | '*') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
