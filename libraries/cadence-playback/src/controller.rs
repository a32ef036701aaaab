//! Playback controller - core orchestration
//!
//! Coordinates the session, side queue, radio continuation, sleep timer,
//! and playlist write-back.

use crate::{
    error::Result,
    events::{EventBus, PlayerEvent},
    session::PlaybackSession,
    sleep_timer::{SleepTimer, Tick},
    types::PlaybackConfig,
};
use cadence_core::{PlaylistId, PlaylistStore, RadioSource, Track, TrackId};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Countdown resolution; `sleep_timer_remaining` is in these units
const SLEEP_TIMER_TICK: Duration = Duration::from_secs(1);

/// Mutable state behind the controller lock
#[derive(Debug, Default)]
struct State {
    session: PlaybackSession,

    /// Bumped whenever the current track or active list changes.
    /// Async results captured under an older epoch are discarded.
    epoch: u64,

    sleep_timer: Option<SleepTimer>,
    timer_generation: u64,
}

impl State {
    fn touch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn cancel_sleep_timer(&mut self) {
        if let Some(timer) = self.sleep_timer.take() {
            timer.cancel();
        }
        self.timer_generation = self.timer_generation.wrapping_add(1);
        self.session.set_sleep_timer_remaining(None);
    }
}

/// Radio lookup captured under the lock, performed after releasing it
struct PendingRadio {
    epoch: u64,
    current: Track,
    exclude: HashSet<TrackId>,
}

struct Shared {
    state: Mutex<State>,
    radio: Arc<dyn RadioSource>,
    playlists: Arc<dyn PlaylistStore>,
    events: EventBus,
    config: PlaybackConfig,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Commit a change of current track and notify observers
    fn finish_transition(
        &self,
        mut state: MutexGuard<'_, State>,
        previous: Option<TrackId>,
    ) -> Option<Track> {
        state.touch();
        let current = state.session.current().cloned();
        drop(state);

        let track_id = current.as_ref().map(|t| t.id.clone());
        if track_id != previous {
            debug!(
                track_id = ?track_id,
                previous_track_id = ?previous,
                "Current track changed"
            );
            self.events.emit(PlayerEvent::TrackChanged {
                track_id,
                previous_track_id: previous,
            });
        }

        current
    }

    async fn fetch_radio_candidate(
        &self,
        current: &Track,
        exclude: &HashSet<TrackId>,
    ) -> Option<Track> {
        let timeout = self.config.radio_lookup_timeout();
        let lookup = self.radio.fetch_radio_candidate(current, exclude);

        match tokio::time::timeout(timeout, lookup).await {
            Ok(Ok(Some(track))) if track.is_playable() && !exclude.contains(&track.id) => {
                debug!(track_id = %track.id, after = %current.id, "Radio candidate found");
                Some(track)
            }
            Ok(Ok(Some(track))) => {
                warn!(
                    track_id = %track.id,
                    "Ignoring radio candidate that is archived or already in the session"
                );
                None
            }
            Ok(Ok(None)) => {
                debug!(after = %current.id, "No radio candidate");
                None
            }
            Ok(Err(e)) => {
                warn!(error = %e, after = %current.id, "Radio lookup failed");
                None
            }
            Err(_) => {
                warn!(?timeout, after = %current.id, "Radio lookup timed out");
                None
            }
        }
    }

    /// One sleep timer tick; stale generations stop immediately
    fn sleep_tick(&self, generation: u64) -> Tick {
        let mut state = self.lock();
        if state.timer_generation != generation || state.sleep_timer.is_none() {
            return Tick::Done;
        }

        let remaining = state
            .session
            .sleep_timer_remaining()
            .unwrap_or(0)
            .saturating_sub(1);

        if remaining > 0 {
            state.session.set_sleep_timer_remaining(Some(remaining));
            return Tick::Continue;
        }

        // Dropping our own handle detaches; the task returns right after.
        state.sleep_timer = None;
        state.session.set_sleep_timer_remaining(None);
        drop(state);

        info!("Sleep timer ended");
        self.events.emit(PlayerEvent::SleepTimerEnded);
        Tick::Done
    }
}

/// Single source of truth for what is playing and what comes next
///
/// The controller is a handle: clones share one session. Create it once
/// at application start and pass it to every surface that plays music.
///
/// Operations are synchronous state mutations, except [`advance`], which
/// may await a radio lookup. Collaborator failures are logged and never
/// returned to callers.
///
/// Spawning operations (sleep timer, playlist write-back) need a tokio
/// runtime; without one they log a warning and skip the async part.
///
/// [`advance`]: PlaybackController::advance
#[derive(Clone)]
pub struct PlaybackController {
    inner: Arc<Shared>,
}

impl PlaybackController {
    /// Create a controller with an empty, hidden session
    pub fn new(
        config: PlaybackConfig,
        radio: Arc<dyn RadioSource>,
        playlists: Arc<dyn PlaylistStore>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            inner: Arc::new(Shared {
                state: Mutex::new(State::default()),
                radio,
                playlists,
                events: EventBus::new(config.event_capacity),
                config,
            }),
        })
    }

    // ===== Playback Control =====

    /// Start playing `track` within a playback context
    ///
    /// `list` is the context (album, search results, playlist); empty means
    /// just `track`. Archived entries are dropped and `track` is prepended
    /// if missing, even when archived itself. Pass `playlist_id` when the
    /// context is a persisted playlist so removals are written back.
    pub fn start(&self, track: Track, list: Vec<Track>, playlist_id: Option<PlaylistId>) {
        if !track.is_playable() {
            debug!(track_id = %track.id, "Starting an archived track");
        }

        let mut state = self.inner.lock();
        let previous = state.session.current_id().cloned();
        state.session.start(track, list, playlist_id);

        info!(
            track_id = ?state.session.current_id(),
            context_len = state.session.active_list().len(),
            playlist_id = ?state.session.playlist_id(),
            "Playback started"
        );

        self.inner.finish_transition(state, previous);
    }

    /// Move to the next track
    ///
    /// Order of precedence:
    /// 1. `override_track`, when the caller already resolved what comes next
    /// 2. The head of the side queue
    /// 3. A radio candidate, if radio mode is on and the context is exhausted
    /// 4. The next entry of the active list, wrapping to the start
    ///
    /// A radio result is dropped if the session changed while it was
    /// being fetched. If the same track is still current, the step to the
    /// next entry happens anyway. Returns the new current track.
    pub async fn advance(&self, override_track: Option<Track>) -> Option<Track> {
        let pending = {
            let mut state = self.inner.lock();
            let previous = state.session.current_id().cloned();

            if let Some(track) = override_track {
                state.session.set_current(track);
                return self.inner.finish_transition(state, previous);
            }

            if let Some(track) = state.session.pop_queued() {
                let length = state.session.side_queue().len();
                state.session.set_current(track);
                let current = self.inner.finish_transition(state, previous);
                self.inner.events.emit(PlayerEvent::QueueChanged { length });
                return current;
            }

            let radio_due = state.session.radio_mode() && state.session.is_at_end();
            let current = state.session.current().cloned();
            match current {
                Some(current) if radio_due => PendingRadio {
                    epoch: state.epoch,
                    current,
                    exclude: state.session.known_ids(),
                },
                _ => {
                    state.session.step_forward();
                    return self.inner.finish_transition(state, previous);
                }
            }
        };

        let candidate = self
            .inner
            .fetch_radio_candidate(&pending.current, &pending.exclude)
            .await;

        let mut state = self.inner.lock();
        let previous = state.session.current_id().cloned();

        let candidate = if state.epoch == pending.epoch {
            candidate
        } else if previous.as_ref() == Some(&pending.current.id) {
            debug!(
                after = %pending.current.id,
                "Active list changed during radio lookup, stepping instead"
            );
            None
        } else {
            debug!(
                after = %pending.current.id,
                "Session changed during radio lookup, discarding result"
            );
            return state.session.current().cloned();
        };

        let extended = match candidate {
            Some(track) => state.session.append_and_play(track),
            None => false,
        };
        if !extended {
            state.session.step_forward();
        }

        self.inner.finish_transition(state, previous)
    }

    /// Move to the previous track, wrapping to the end
    ///
    /// Radio mode never applies backwards.
    pub fn retreat(&self, override_track: Option<Track>) -> Option<Track> {
        let mut state = self.inner.lock();
        let previous = state.session.current_id().cloned();

        match override_track {
            Some(track) => state.session.set_current(track),
            None => {
                state.session.step_backward();
            }
        }

        self.inner.finish_transition(state, previous)
    }

    /// Tear down playback and return to the empty session
    pub fn close(&self) {
        let mut state = self.inner.lock();
        let previous = state.session.current_id().cloned();
        state.cancel_sleep_timer();
        state.session.reset();
        self.inner.finish_transition(state, previous);

        info!("Player closed");
        self.inner.events.emit(PlayerEvent::PlayerClosed);
    }

    // ===== Side Queue =====

    /// Add a track to play next
    ///
    /// On an idle session the track starts playing right away instead.
    pub fn enqueue(&self, track: Track) {
        let mut state = self.inner.lock();
        let previous = state.session.current_id().cloned();
        let track_id = track.id.clone();

        if state.session.enqueue(track) {
            debug!(track_id = %track_id, "Idle player, playing enqueued track");
            self.inner.finish_transition(state, previous);
            return;
        }

        let length = state.session.side_queue().len();
        drop(state);

        debug!(track_id = %track_id, length, "Track enqueued");
        self.inner.events.emit(PlayerEvent::QueueChanged { length });
    }

    /// Remove the side-queue entry at `index`
    pub fn dequeue(&self, index: usize) -> Option<Track> {
        let mut state = self.inner.lock();
        let removed = state.session.dequeue(index)?;
        let length = state.session.side_queue().len();
        drop(state);

        self.inner.events.emit(PlayerEvent::QueueChanged { length });
        Some(removed)
    }

    /// Empty the side queue
    pub fn clear_queue(&self) {
        self.inner.lock().session.clear_queue();
        self.inner.events.emit(PlayerEvent::QueueChanged { length: 0 });
    }

    // ===== Active List =====

    /// Remove a track from the playback context
    ///
    /// The local removal is immediate. When the context is a persisted
    /// playlist, the entry is also deleted there in the background:
    /// success emits [`PlayerEvent::PlaylistEntryRemoved`], failure is
    /// logged and emits [`PlayerEvent::PlaylistWriteBackFailed`] without
    /// restoring the local entry.
    ///
    /// Returns the handle of the background delete, if one was started.
    pub fn remove_from_active_list(&self, track_id: &TrackId) -> Option<JoinHandle<()>> {
        let mut state = self.inner.lock();
        let previous = state.session.current_id().cloned();
        let removal = state.session.remove_from_active(track_id);
        let playlist_id = state.session.playlist_id().cloned();

        if removal.removed {
            debug!(
                track_id = %track_id,
                was_current = removal.was_current,
                "Removed from active list"
            );
            self.inner.finish_transition(state, previous);
        } else {
            drop(state);
        }

        let playlist_id = playlist_id?;
        let Ok(runtime) = Handle::try_current() else {
            warn!(
                playlist_id = %playlist_id,
                track_id = %track_id,
                "No tokio runtime, playlist entry not deleted"
            );
            return None;
        };

        let playlists = Arc::clone(&self.inner.playlists);
        let events = self.inner.events.clone();
        Some(runtime.spawn(write_back_removal(
            playlists,
            events,
            playlist_id,
            track_id.clone(),
        )))
    }

    // ===== Radio & Sleep Timer =====

    /// Toggle radio mode; applies from the next [`advance`](Self::advance)
    pub fn set_radio_mode(&self, enabled: bool) {
        self.inner.lock().session.set_radio_mode(enabled);
        debug!(enabled, "Radio mode set");
    }

    /// Start a countdown of `minutes`, replacing any running one
    ///
    /// Zero cancels. On expiry [`PlayerEvent::SleepTimerEnded`] is emitted;
    /// pausing audio is up to whoever listens for it.
    pub fn set_sleep_timer(&self, minutes: u32) {
        let mut state = self.inner.lock();
        state.cancel_sleep_timer();

        if minutes == 0 {
            debug!("Sleep timer cleared");
            return;
        }

        let generation = state.timer_generation;
        let weak: Weak<Shared> = Arc::downgrade(&self.inner);
        let timer = SleepTimer::spawn(SLEEP_TIMER_TICK, move || {
            weak.upgrade()
                .map_or(Tick::Done, |shared| shared.sleep_tick(generation))
        });

        if let Some(timer) = timer {
            let seconds = minutes.saturating_mul(60);
            state.sleep_timer = Some(timer);
            state.session.set_sleep_timer_remaining(Some(seconds));
            info!(seconds, "Sleep timer started");
        }
    }

    /// Cancel the running countdown, if any
    pub fn clear_sleep_timer(&self) {
        self.set_sleep_timer(0);
    }

    // ===== State Queries =====

    /// Copy of the whole session, for rendering
    pub fn snapshot(&self) -> PlaybackSession {
        self.inner.lock().session.clone()
    }

    pub fn current(&self) -> Option<Track> {
        self.inner.lock().session.current().cloned()
    }

    pub fn active_list(&self) -> Vec<Track> {
        self.inner.lock().session.active_list().to_vec()
    }

    pub fn queue(&self) -> Vec<Track> {
        self.inner.lock().session.side_queue().iter().cloned().collect()
    }

    pub fn queue_len(&self) -> usize {
        self.inner.lock().session.side_queue().len()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.lock().session.is_visible()
    }

    pub fn playlist_id(&self) -> Option<PlaylistId> {
        self.inner.lock().session.playlist_id().cloned()
    }

    pub fn radio_mode(&self) -> bool {
        self.inner.lock().session.radio_mode()
    }

    pub fn sleep_timer_remaining(&self) -> Option<u32> {
        self.inner.lock().session.sleep_timer_remaining()
    }

    // ===== Events =====

    /// Subscribe to player events
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.inner.events.subscribe()
    }

    /// The bus events are emitted on, for bridging to other surfaces
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }
}

impl fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("session", &self.inner.lock().session)
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

/// Delete a playlist entry and report the outcome on the bus
async fn write_back_removal(
    playlists: Arc<dyn PlaylistStore>,
    events: EventBus,
    playlist_id: PlaylistId,
    track_id: TrackId,
) {
    match playlists
        .delete_playlist_entry(&playlist_id, &track_id)
        .await
    {
        Ok(()) => {
            debug!(playlist_id = %playlist_id, track_id = %track_id, "Playlist entry deleted");
            events.emit(PlayerEvent::PlaylistEntryRemoved {
                playlist_id,
                track_id,
            });
        }
        Err(e) => {
            // Local state is not rolled back
            warn!(
                error = %e,
                playlist_id = %playlist_id,
                track_id = %track_id,
                "Failed to delete playlist entry"
            );
            events.emit(PlayerEvent::PlaylistWriteBackFailed {
                playlist_id,
                track_id,
                message: e.to_string(),
            });
        }
    }
}
