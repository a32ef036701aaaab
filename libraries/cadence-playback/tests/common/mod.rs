//! Shared helpers for controller tests

use async_trait::async_trait;
use cadence_core::{CadenceError, PlaylistId, PlaylistStore, RadioSource, Result, Track, TrackId};
use cadence_playback::{PlaybackConfig, PlaybackController, PlayerEvent};
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex, Once};
use tokio::sync::{broadcast, Notify};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

pub fn create_test_track(id: &str) -> Track {
    Track::new(id, format!("Track {}", id), "Test Artist")
}

pub fn ids(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.id.as_str()).collect()
}

pub fn current_id(player: &PlaybackController) -> Option<String> {
    player.current().map(|t| t.id.as_str().to_string())
}

/// One scripted radio reply
pub enum RadioReply {
    Track(Track),
    Nothing,
    Fail,
}

/// Radio source replaying scripted answers, optionally held until released
#[derive(Default)]
pub struct ScriptedRadio {
    replies: Mutex<VecDeque<RadioReply>>,
    requests: Mutex<Vec<(TrackId, HashSet<TrackId>)>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedRadio {
    pub fn new(replies: Vec<RadioReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            ..Default::default()
        }
    }

    /// Every lookup waits for `gate.notify_one()` before answering
    pub fn gated(replies: Vec<RadioReply>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(replies)
        }
    }

    pub fn requests(&self) -> Vec<(TrackId, HashSet<TrackId>)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RadioSource for ScriptedRadio {
    async fn fetch_radio_candidate(
        &self,
        current: &Track,
        exclude: &HashSet<TrackId>,
    ) -> Result<Option<Track>> {
        self.requests
            .lock()
            .unwrap()
            .push((current.id.clone(), exclude.clone()));

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(RadioReply::Track(track)) => Ok(Some(track)),
            Some(RadioReply::Fail) => Err(CadenceError::network("connection reset")),
            Some(RadioReply::Nothing) | None => Ok(None),
        }
    }
}

/// Playlist store that accepts every delete
pub struct NoopStore;

#[async_trait]
impl PlaylistStore for NoopStore {
    async fn delete_playlist_entry(&self, _: &PlaylistId, _: &TrackId) -> Result<()> {
        Ok(())
    }
}

pub fn controller_with(
    radio: Arc<dyn RadioSource>,
    playlists: Arc<dyn PlaylistStore>,
) -> PlaybackController {
    init_tracing();
    PlaybackController::new(PlaybackConfig::default(), radio, playlists)
        .expect("default config is valid")
}

pub fn controller() -> PlaybackController {
    controller_with(Arc::new(ScriptedRadio::default()), Arc::new(NoopStore))
}

/// Drain everything currently buffered on a receiver
pub fn drain(rx: &mut broadcast::Receiver<PlayerEvent>) -> Vec<PlayerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
