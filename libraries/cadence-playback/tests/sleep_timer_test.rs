//! Sleep timer behaviour under a paused tokio clock

mod common;

use cadence_playback::PlayerEvent;
use common::*;
use std::time::Duration;

fn ended(events: &[PlayerEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, PlayerEvent::SleepTimerEnded))
        .count()
}

#[tokio::test(start_paused = true)]
async fn test_countdown_starts_at_minutes_in_seconds() {
    let player = controller();
    player.set_sleep_timer(5);

    assert_eq!(player.sleep_timer_remaining(), Some(300));
}

#[tokio::test(start_paused = true)]
async fn test_replacing_timer_keeps_single_countdown() {
    let player = controller();
    player.set_sleep_timer(5);
    player.set_sleep_timer(10);
    assert_eq!(player.sleep_timer_remaining(), Some(600));

    tokio::time::sleep(Duration::from_secs(3)).await;

    // Two countdowns would have consumed twice as fast
    let remaining = player.sleep_timer_remaining().unwrap();
    assert!(
        (597..=598).contains(&remaining),
        "unexpected remaining: {}",
        remaining
    );
}

#[tokio::test(start_paused = true)]
async fn test_expiry_emits_event_once() {
    let player = controller();
    player.start(create_test_track("a"), vec![], None);
    let mut rx = player.subscribe();

    player.set_sleep_timer(1);
    tokio::time::sleep(Duration::from_secs(61)).await;

    assert_eq!(ended(&drain(&mut rx)), 1);
    assert!(player.sleep_timer_remaining().is_none());

    // Pausing is up to the listener; the session itself is untouched
    assert_eq!(current_id(&player).as_deref(), Some("a"));
    assert!(player.is_visible());

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(ended(&drain(&mut rx)), 0);
}

#[tokio::test(start_paused = true)]
async fn test_clear_cancels_countdown() {
    let player = controller();
    let mut rx = player.subscribe();

    player.set_sleep_timer(1);
    tokio::time::sleep(Duration::from_secs(10)).await;
    player.clear_sleep_timer();
    assert!(player.sleep_timer_remaining().is_none());

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(ended(&drain(&mut rx)), 0);
}

#[tokio::test(start_paused = true)]
async fn test_zero_minutes_cancels() {
    let player = controller();
    player.set_sleep_timer(2);
    player.set_sleep_timer(0);

    assert!(player.sleep_timer_remaining().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_close_cancels_countdown() {
    let player = controller();
    player.start(create_test_track("a"), vec![], None);
    let mut rx = player.subscribe();

    player.set_sleep_timer(1);
    player.close();
    tokio::time::sleep(Duration::from_secs(120)).await;

    let events = drain(&mut rx);
    assert_eq!(ended(&events), 0);
    assert_eq!(events.last(), Some(&PlayerEvent::PlayerClosed));
}

#[test]
fn test_timer_without_runtime_is_skipped() {
    let player = controller();
    player.set_sleep_timer(5);

    assert!(player.sleep_timer_remaining().is_none());
}
