//! Playlist mutations.

use crate::client::BaasClient;
use crate::error::Result;
use async_trait::async_trait;
use cadence_core::{PlaylistId, PlaylistStore, TrackId};
use reqwest::Method;
use tracing::debug;

/// Write access to the `playlist_songs` join table.
pub struct PlaylistsClient<'a> {
    client: &'a BaasClient,
}

impl<'a> PlaylistsClient<'a> {
    pub(crate) fn new(client: &'a BaasClient) -> Self {
        Self { client }
    }

    /// Delete every entry of `track_id` in `playlist_id`.
    ///
    /// Deleting an entry that does not exist succeeds.
    pub async fn delete_entry(&self, playlist_id: &PlaylistId, track_id: &TrackId) -> Result<()> {
        let request = self
            .client
            .table(Method::DELETE, "playlist_songs")
            .query(&[
                ("playlist_id", format!("eq.{}", playlist_id)),
                ("song_id", format!("eq.{}", track_id)),
            ]);

        self.client.send(request).await?;

        debug!(playlist_id = %playlist_id, track_id = %track_id, "Deleted playlist entry");
        Ok(())
    }
}

#[async_trait]
impl PlaylistStore for BaasClient {
    async fn delete_playlist_entry(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> cadence_core::Result<()> {
        self.playlists()
            .delete_entry(playlist_id, track_id)
            .await
            .map_err(Into::into)
    }
}
