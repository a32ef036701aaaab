//! Radio continuation tests
//!
//! Radio only kicks in at the end of the active list, never overrides the
//! side queue, and never lets a slow lookup clobber a newer session.

mod common;

use cadence_core::TrackId;
use common::*;
use std::sync::Arc;
use tokio::sync::Notify;

fn two_track_context() -> Vec<cadence_core::Track> {
    vec![create_test_track("a"), create_test_track("b")]
}

#[tokio::test]
async fn test_radio_extends_exhausted_context() {
    let radio = Arc::new(ScriptedRadio::new(vec![RadioReply::Track(
        create_test_track("r").with_genre("jazz"),
    )]));
    let player = controller_with(radio.clone(), Arc::new(NoopStore));
    player.start(create_test_track("b"), two_track_context(), None);
    player.set_radio_mode(true);

    let next = player.advance(None).await.unwrap();

    assert_eq!(next.id.as_str(), "r");
    assert_eq!(ids(&player.active_list()), vec!["a", "b", "r"]);

    let requests = radio.requests();
    assert_eq!(requests.len(), 1);
    let (after, exclude) = &requests[0];
    assert_eq!(after, &TrackId::new("b"));
    assert!(exclude.contains(&TrackId::new("a")));
    assert!(exclude.contains(&TrackId::new("b")));
}

#[tokio::test]
async fn test_radio_not_consulted_mid_context() {
    let radio = Arc::new(ScriptedRadio::new(vec![RadioReply::Track(
        create_test_track("r"),
    )]));
    let player = controller_with(radio.clone(), Arc::new(NoopStore));
    player.start(create_test_track("a"), two_track_context(), None);
    player.set_radio_mode(true);

    assert_eq!(current_id_after_advance(&player).await, "b");
    assert!(radio.requests().is_empty());
}

#[tokio::test]
async fn test_queue_wins_over_radio() {
    let radio = Arc::new(ScriptedRadio::new(vec![RadioReply::Track(
        create_test_track("r"),
    )]));
    let player = controller_with(radio.clone(), Arc::new(NoopStore));
    player.start(create_test_track("b"), two_track_context(), None);
    player.set_radio_mode(true);
    player.enqueue(create_test_track("q"));

    assert_eq!(current_id_after_advance(&player).await, "q");
    assert!(radio.requests().is_empty());
}

#[tokio::test]
async fn test_radio_off_wraps_around() {
    let radio = Arc::new(ScriptedRadio::new(vec![RadioReply::Track(
        create_test_track("r"),
    )]));
    let player = controller_with(radio.clone(), Arc::new(NoopStore));
    player.start(create_test_track("b"), two_track_context(), None);

    assert_eq!(current_id_after_advance(&player).await, "a");
    assert!(radio.requests().is_empty());
}

#[tokio::test]
async fn test_no_candidate_falls_back_to_wrap() {
    let radio = Arc::new(ScriptedRadio::new(vec![RadioReply::Nothing]));
    let player = controller_with(radio, Arc::new(NoopStore));
    player.start(create_test_track("b"), two_track_context(), None);
    player.set_radio_mode(true);

    assert_eq!(current_id_after_advance(&player).await, "a");
    assert_eq!(ids(&player.active_list()), vec!["a", "b"]);
}

#[tokio::test]
async fn test_lookup_failure_falls_back_to_wrap() {
    let radio = Arc::new(ScriptedRadio::new(vec![RadioReply::Fail]));
    let player = controller_with(radio, Arc::new(NoopStore));
    player.start(create_test_track("b"), two_track_context(), None);
    player.set_radio_mode(true);

    assert_eq!(current_id_after_advance(&player).await, "a");
    assert_eq!(ids(&player.active_list()), vec!["a", "b"]);
}

#[tokio::test]
async fn test_duplicate_or_archived_candidates_are_rejected() {
    let radio = Arc::new(ScriptedRadio::new(vec![
        RadioReply::Track(create_test_track("a")),
        RadioReply::Track(create_test_track("x").archived(true)),
    ]));
    let player = controller_with(radio, Arc::new(NoopStore));
    player.start(create_test_track("b"), two_track_context(), None);
    player.set_radio_mode(true);

    // "a" is already in the context
    assert_eq!(current_id_after_advance(&player).await, "a");

    player.advance(None).await;
    assert_eq!(current_id_after_advance(&player).await, "a");
    assert_eq!(ids(&player.active_list()), vec!["a", "b"]);
}

#[tokio::test]
async fn test_single_track_context_uses_radio() {
    let radio = Arc::new(ScriptedRadio::new(vec![
        RadioReply::Track(create_test_track("r1")),
        RadioReply::Track(create_test_track("r2")),
    ]));
    let player = controller_with(radio, Arc::new(NoopStore));
    player.start(create_test_track("only"), vec![], None);
    player.set_radio_mode(true);

    assert_eq!(current_id_after_advance(&player).await, "r1");
    assert_eq!(current_id_after_advance(&player).await, "r2");
    assert_eq!(ids(&player.active_list()), vec!["only", "r1", "r2"]);
}

#[tokio::test(start_paused = true)]
async fn test_slow_lookup_times_out() {
    // Gate is never released
    let gate = Arc::new(Notify::new());
    let radio = Arc::new(ScriptedRadio::gated(
        vec![RadioReply::Track(create_test_track("late"))],
        gate,
    ));
    let player = controller_with(radio, Arc::new(NoopStore));
    player.start(create_test_track("b"), two_track_context(), None);
    player.set_radio_mode(true);

    assert_eq!(current_id_after_advance(&player).await, "a");
    assert_eq!(ids(&player.active_list()), vec!["a", "b"]);
}

#[tokio::test]
async fn test_stale_radio_result_is_discarded() {
    let gate = Arc::new(Notify::new());
    let radio = Arc::new(ScriptedRadio::gated(
        vec![RadioReply::Track(create_test_track("late"))],
        Arc::clone(&gate),
    ));
    let player = controller_with(radio.clone(), Arc::new(NoopStore));
    player.start(create_test_track("b"), two_track_context(), None);
    player.set_radio_mode(true);

    let background = player.clone();
    let pending = tokio::spawn(async move { background.advance(None).await });

    while radio.requests().is_empty() {
        tokio::task::yield_now().await;
    }

    // User picks something else while the lookup is in flight
    let album = vec![create_test_track("x"), create_test_track("y")];
    player.start(create_test_track("x"), album, None);
    gate.notify_one();

    let result = pending.await.unwrap();
    assert_eq!(result.map(|t| t.id), Some(TrackId::new("x")));
    assert_eq!(ids(&player.active_list()), vec!["x", "y"]);
    assert_eq!(current_id(&player).as_deref(), Some("x"));
}

#[tokio::test]
async fn test_unrelated_removal_during_lookup_still_advances() {
    let gate = Arc::new(Notify::new());
    let radio = Arc::new(ScriptedRadio::gated(
        vec![RadioReply::Track(create_test_track("late"))],
        Arc::clone(&gate),
    ));
    let player = controller_with(radio.clone(), Arc::new(NoopStore));
    let album = vec![
        create_test_track("a"),
        create_test_track("b"),
        create_test_track("c"),
    ];
    player.start(create_test_track("c"), album, None);
    player.set_radio_mode(true);

    let background = player.clone();
    let pending = tokio::spawn(async move { background.advance(None).await });

    while radio.requests().is_empty() {
        tokio::task::yield_now().await;
    }

    player.remove_from_active_list(&TrackId::new("b"));
    gate.notify_one();

    // The candidate was fetched for the old list, but "next" still happens
    let result = pending.await.unwrap();
    assert_eq!(result.map(|t| t.id), Some(TrackId::new("a")));
    assert_eq!(ids(&player.active_list()), vec!["a", "c"]);
}

#[tokio::test]
async fn test_queue_change_does_not_invalidate_lookup() {
    let gate = Arc::new(Notify::new());
    let radio = Arc::new(ScriptedRadio::gated(
        vec![RadioReply::Track(create_test_track("r"))],
        Arc::clone(&gate),
    ));
    let player = controller_with(radio.clone(), Arc::new(NoopStore));
    player.start(create_test_track("b"), two_track_context(), None);
    player.set_radio_mode(true);

    let background = player.clone();
    let pending = tokio::spawn(async move { background.advance(None).await });

    while radio.requests().is_empty() {
        tokio::task::yield_now().await;
    }

    player.enqueue(create_test_track("q"));
    gate.notify_one();

    let result = pending.await.unwrap();
    assert_eq!(result.map(|t| t.id), Some(TrackId::new("r")));
    assert_eq!(ids(&player.queue()), vec!["q"]);
}

async fn current_id_after_advance(player: &cadence_playback::PlaybackController) -> String {
    player
        .advance(None)
        .await
        .map(|t| t.id.as_str().to_string())
        .unwrap_or_default()
}
