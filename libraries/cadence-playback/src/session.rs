//! Playback session state
//!
//! Two-tier structure, like a streaming client's "up next" view:
//! - Side queue: user-requested tracks that play next (FIFO)
//! - Active list: the playback context (album, search results, playlist)

use cadence_core::{PlaylistId, Track, TrackId};
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Everything the player knows about what is playing and what comes next
///
/// Structure:
/// ```text
/// Currently Playing: Track A
/// ─────────────────────────────
/// Side Queue (play next):
///   - Track X (user added)
/// ─────────────────────────────
/// Active List (circular):
///   - Track A  <- anchor
///   - Track B
///   - Track C
/// ```
///
/// The anchor is the last active-list member that was current. Tracks
/// played from the side queue are not members, so traversal resumes from
/// the anchor once the queue drains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSession {
    current: Option<Track>,
    active_list: Vec<Track>,
    side_queue: VecDeque<Track>,
    visible: bool,
    playlist_id: Option<PlaylistId>,
    radio_mode: bool,
    sleep_timer_remaining: Option<u32>,
    anchor: Option<TrackId>,
}

/// Outcome of removing a track from the active list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Removal {
    pub removed: bool,
    pub was_current: bool,
}

impl PlaybackSession {
    /// Create an empty, hidden session
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn current_id(&self) -> Option<&TrackId> {
        self.current.as_ref().map(|t| &t.id)
    }

    pub fn active_list(&self) -> &[Track] {
        &self.active_list
    }

    pub fn side_queue(&self) -> &VecDeque<Track> {
        &self.side_queue
    }

    /// Whether a player surface is shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Persisted playlist backing the active list, if any
    pub fn playlist_id(&self) -> Option<&PlaylistId> {
        self.playlist_id.as_ref()
    }

    pub fn radio_mode(&self) -> bool {
        self.radio_mode
    }

    /// Seconds left on the sleep timer, `None` when no timer runs
    pub fn sleep_timer_remaining(&self) -> Option<u32> {
        self.sleep_timer_remaining
    }

    /// True when nothing is playing
    pub fn is_idle(&self) -> bool {
        self.current.is_none()
    }

    /// Whether `id` is a member of the active list
    pub fn contains(&self, id: &TrackId) -> bool {
        self.active_list.iter().any(|t| &t.id == id)
    }

    /// Position used for next/previous resolution
    ///
    /// The current track's index when it is a member, otherwise the
    /// anchor's index. `None` if neither is in the active list.
    pub fn position(&self) -> Option<usize> {
        let index_of = |id: &TrackId| self.active_list.iter().position(|t| &t.id == id);

        self.current_id()
            .and_then(index_of)
            .or_else(|| self.anchor.as_ref().and_then(index_of))
    }

    /// Whether forward traversal has reached the end of the context
    pub fn is_at_end(&self) -> bool {
        match self.position() {
            _ if self.active_list.is_empty() => true,
            Some(index) => index + 1 == self.active_list.len(),
            None => false,
        }
    }

    /// Ids a radio candidate must not duplicate
    pub fn known_ids(&self) -> HashSet<TrackId> {
        self.active_list
            .iter()
            .chain(self.side_queue.iter())
            .chain(self.current.iter())
            .map(|t| t.id.clone())
            .collect()
    }

    // ===== Mutations =====

    /// Replace the playback context and make `track` current
    ///
    /// Archived entries are dropped, duplicates keep their first
    /// occurrence, and `track` is prepended if the list lacks it.
    pub(crate) fn start(&mut self, track: Track, list: Vec<Track>, playlist_id: Option<PlaylistId>) {
        let mut seen = HashSet::new();
        let mut active: Vec<Track> = list
            .into_iter()
            .filter(|t| t.is_playable())
            .filter(|t| seen.insert(t.id.clone()))
            .collect();

        if !seen.contains(&track.id) {
            active.insert(0, track.clone());
        }

        self.active_list = active;
        self.playlist_id = playlist_id;
        self.visible = true;
        self.set_current(track);
    }

    /// Make `track` current, moving the anchor when it is a member
    pub(crate) fn set_current(&mut self, track: Track) {
        if self.contains(&track.id) {
            self.anchor = Some(track.id.clone());
        }
        self.current = Some(track);
    }

    /// Move to the next active-list entry, wrapping at the end
    ///
    /// Returns false when the active list is empty.
    pub(crate) fn step_forward(&mut self) -> bool {
        let len = self.active_list.len();
        if len == 0 {
            return false;
        }
        let next = self.position().map_or(0, |index| (index + 1) % len);
        self.set_current(self.active_list[next].clone());
        true
    }

    /// Move to the previous active-list entry, wrapping at the start
    pub(crate) fn step_backward(&mut self) -> bool {
        let len = self.active_list.len();
        if len == 0 {
            return false;
        }
        let previous = self.position().map_or(0, |index| (index + len - 1) % len);
        self.set_current(self.active_list[previous].clone());
        true
    }

    /// Append a radio candidate to the active list and play it
    ///
    /// Rejects archived tracks and tracks already in the list or queue.
    pub(crate) fn append_and_play(&mut self, track: Track) -> bool {
        let queued = self.side_queue.iter().any(|t| t.id == track.id);
        if !track.is_playable() || queued || self.contains(&track.id) {
            return false;
        }
        self.active_list.push(track.clone());
        self.set_current(track);
        true
    }

    /// Remove a track from the active list
    ///
    /// When the current track goes, the new head takes over, or the
    /// session empties and hides if nothing is left.
    pub(crate) fn remove_from_active(&mut self, id: &TrackId) -> Removal {
        let Some(index) = self.active_list.iter().position(|t| &t.id == id) else {
            return Removal {
                removed: false,
                was_current: false,
            };
        };
        self.active_list.remove(index);

        if self.anchor.as_ref() == Some(id) {
            self.anchor = None;
        }

        let was_current = self.current_id() == Some(id);
        if was_current {
            match self.active_list.first().cloned() {
                Some(head) => self.set_current(head),
                None => {
                    self.current = None;
                    self.visible = false;
                }
            }
        }

        Removal {
            removed: true,
            was_current,
        }
    }

    /// Add to the side queue; an idle session plays the track immediately
    ///
    /// Returns true when the track was promoted to current.
    pub(crate) fn enqueue(&mut self, track: Track) -> bool {
        if self.current.is_none() {
            self.set_current(track);
            self.visible = true;
            true
        } else {
            self.side_queue.push_back(track);
            false
        }
    }

    pub(crate) fn pop_queued(&mut self) -> Option<Track> {
        self.side_queue.pop_front()
    }

    pub(crate) fn dequeue(&mut self, index: usize) -> Option<Track> {
        self.side_queue.remove(index)
    }

    pub(crate) fn clear_queue(&mut self) {
        self.side_queue.clear();
    }

    pub(crate) fn set_radio_mode(&mut self, enabled: bool) {
        self.radio_mode = enabled;
    }

    pub(crate) fn set_sleep_timer_remaining(&mut self, remaining: Option<u32>) {
        self.sleep_timer_remaining = remaining;
    }

    /// Back to the empty application-start state
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
