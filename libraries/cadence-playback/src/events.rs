//! Player Events
//!
//! Process-wide notifications for UI surfaces observing the player.
//! Events are fire-and-forget:
//! - Sleep timer expiry (the audio element pauses itself on this)
//! - Player close
//! - Playlist write-back outcome
//! - Track and queue changes

use cadence_core::{PlaylistId, TrackId};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PlayerEvent {
    /// Sleep timer countdown reached zero
    SleepTimerEnded,

    /// `close()` ran; playback surfaces should hide
    PlayerClosed,

    /// A track was removed from the persisted playlist backing the active list
    PlaylistEntryRemoved {
        playlist_id: PlaylistId,
        track_id: TrackId,
    },

    /// The persisted playlist could not be updated
    ///
    /// The local removal is kept; observers may resynchronize.
    PlaylistWriteBackFailed {
        playlist_id: PlaylistId,
        track_id: TrackId,
        message: String,
    },

    /// Current track changed
    TrackChanged {
        /// New current track, `None` when playback was cleared
        track_id: Option<TrackId>,
        previous_track_id: Option<TrackId>,
    },

    /// Side queue changed
    QueueChanged {
        /// New queue length
        length: usize,
    },
}

/// Broadcast bus for [`PlayerEvent`]s
///
/// Cloning shares the underlying channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PlayerEvent>,
}

impl EventBus {
    /// Create a bus buffering `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to all events emitted from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.sender.subscribe()
    }

    /// Emit an event to current subscribers
    pub fn emit(&self, event: PlayerEvent) {
        // No receivers is fine
        if let Err(broadcast::error::SendError(event)) = self.sender.send(event) {
            trace!(?event, "No subscribers for player event");
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
