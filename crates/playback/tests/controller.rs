//! Controller behaviour against recording mocks.
//!
//! Run with: cargo test -p playback --test controller

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

mod common;

use common::{card_of, card_with, controller, display, EngineCall, MockEngine};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use platform::config::{MOUNT_POINT, NO_TRACKS_TEXT};
use platform::mocks::{DisplayCall, MockStorage};
use playback::{
    Command, ControllerError, EngineError, EngineEvent, PlaybackController, PlaybackState,
    StreamId,
};

// ── init / rescan ────────────────────────────────────────────────────────────

#[tokio::test]
async fn init_shows_first_track_and_parks_cursor_at_zero() {
    let display = display();
    let mut ctl = controller(card_with(&["a.mp3", "b.mp3"]), &display);

    assert_eq!(ctl.init().await, 2);

    assert_eq!(ctl.cursor(), Some(0));
    assert_eq!(ctl.state(), PlaybackState::Stopped);
    assert!(ctl.engine().calls.is_empty());
    assert_eq!(display.lock().await.calls(), &[DisplayCall::Filename("a.mp3".into())]);
}

#[tokio::test]
async fn init_with_no_tracks_shows_placeholder() {
    let display = display();
    let mut ctl = controller(card_with(&[]), &display);

    assert_eq!(ctl.init().await, 0);

    assert_eq!(ctl.cursor(), None);
    assert_eq!(display.lock().await.filename(), Some(NO_TRACKS_TEXT));
}

#[tokio::test]
async fn init_with_unmounted_root_degrades_to_empty() {
    let display = display();
    let mut ctl = controller(MockStorage::new(), &display);

    assert_eq!(ctl.init().await, 0);

    assert!(ctl.catalog().is_empty());
    assert_eq!(display.lock().await.filename(), Some(NO_TRACKS_TEXT));
}

#[tokio::test]
async fn rescan_resets_cursor_to_first_track() {
    let display = display();
    let mut ctl = controller(card_with(&["a.mp3", "b.mp3", "c.mp3"]), &display);
    ctl.init().await;
    ctl.play(2).await.unwrap();

    assert_eq!(ctl.execute(Command::Rescan).await, Ok(()));

    assert_eq!(ctl.cursor(), Some(0));
    assert_eq!(ctl.catalog().len(), 3);
    assert_eq!(display.lock().await.filename(), Some("a.mp3"));
}

#[tokio::test]
async fn rescan_while_playing_starts_first_track_when_stream_ends() {
    let display = display();
    let mut ctl = controller(card_with(&["a.mp3", "b.mp3", "c.mp3"]), &display);
    ctl.init().await;
    ctl.play(2).await.unwrap();
    let stream = ctl.stream().unwrap();

    ctl.rescan().await;
    // The old stream keeps playing until it ends.
    assert_eq!(ctl.engine().plays(), ["c.mp3"]);

    ctl.handle_event(EngineEvent::Idle(stream)).await.unwrap();
    assert_eq!(ctl.cursor(), Some(0));
    assert_eq!(ctl.engine().plays(), ["c.mp3", "a.mp3"]);

    // Later track ends step forward as usual.
    let stream = ctl.stream().unwrap();
    ctl.handle_event(EngineEvent::Idle(stream)).await.unwrap();
    assert_eq!(ctl.cursor(), Some(1));
    assert_eq!(ctl.engine().plays(), ["c.mp3", "a.mp3", "b.mp3"]);
}

#[tokio::test]
async fn rescan_while_stopped_leaves_idle_stepping_unchanged() {
    let display = display();
    let mut ctl = controller(card_with(&["a.mp3", "b.mp3"]), &display);
    ctl.init().await;
    ctl.rescan().await;

    ctl.play(0).await.unwrap();
    let stream = ctl.stream().unwrap();
    ctl.handle_event(EngineEvent::Idle(stream)).await.unwrap();

    assert_eq!(ctl.cursor(), Some(1));
    assert_eq!(ctl.engine().plays(), ["a.mp3", "b.mp3"]);
}

// ── play ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn play_opens_track_and_updates_display() {
    let display = display();
    let mut ctl = controller(card_with(&["a.mp3", "b.mp3"]), &display);
    ctl.init().await;
    display.lock().await.clear();

    ctl.play(1).await.unwrap();

    assert_eq!(ctl.cursor(), Some(1));
    assert_eq!(ctl.state(), PlaybackState::Playing);
    assert_eq!(ctl.engine().plays(), ["b.mp3"]);
    assert_eq!(ctl.storage().opened(), ["/sdcard/b.mp3"]);
    assert_eq!(
        display.lock().await.calls(),
        &[DisplayCall::Filename("b.mp3".into()), DisplayCall::PlayIcon(true)]
    );
}

#[tokio::test]
async fn play_out_of_range_is_a_no_op() {
    let display = display();
    let mut ctl = controller(card_with(&["a.mp3", "b.mp3", "c.mp3"]), &display);
    ctl.init().await;
    ctl.play(1).await.unwrap();
    display.lock().await.clear();

    for index in [3, 4, usize::MAX] {
        assert_eq!(
            ctl.play(index).await,
            Err(ControllerError::OutOfRange { index, len: 3 })
        );
    }

    assert_eq!(ctl.cursor(), Some(1));
    assert_eq!(ctl.state(), PlaybackState::Playing);
    assert_eq!(ctl.engine().calls.len(), 1);
    assert!(display.lock().await.calls().is_empty());
}

#[tokio::test]
async fn open_failure_moves_cursor_but_abandons_command() {
    let display = display();
    let mut storage = card_with(&["a.mp3", "b.mp3", "c.mp3"]);
    storage.fail_open("/sdcard/b.mp3");
    let mut ctl = controller(storage, &display);
    ctl.init().await;
    ctl.play(0).await.unwrap();
    display.lock().await.clear();

    assert_eq!(ctl.next().await, Err(ControllerError::Open));

    // Cursor stays on the bad track; nothing was retried or skipped.
    assert_eq!(ctl.cursor(), Some(1));
    assert_eq!(ctl.engine().plays(), ["a.mp3"]);
    assert!(display.lock().await.calls().is_empty());

    // Only an explicit next() gets past it.
    ctl.next().await.unwrap();
    assert_eq!(ctl.cursor(), Some(2));
    assert_eq!(ctl.engine().plays(), ["a.mp3", "c.mp3"]);
}

#[tokio::test]
async fn engine_refusal_is_reported_without_display_update() {
    let display = display();
    let engine = MockEngine {
        refuse: true,
        ..MockEngine::default()
    };
    let mut ctl = PlaybackController::new(card_with(&["a.mp3", "b.mp3"]), engine, &display, MOUNT_POINT);
    ctl.init().await;
    display.lock().await.clear();

    assert_eq!(
        ctl.play(1).await,
        Err(ControllerError::Engine(EngineError::Rejected))
    );
    assert_eq!(ctl.cursor(), Some(1));
    assert_eq!(ctl.state(), PlaybackState::Stopped);
    assert!(display.lock().await.calls().is_empty());
}

// ── navigation ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn next_walks_and_wraps_the_catalog() {
    let display = display();
    let mut ctl = controller(card_with(&["a.mp3", "b.mp3", "c.mp3"]), &display);
    ctl.init().await;

    for (cursor, name) in [(1, "b.mp3"), (2, "c.mp3"), (0, "a.mp3")] {
        ctl.next().await.unwrap();
        assert_eq!(ctl.cursor(), Some(cursor));
        assert_eq!(display.lock().await.filename(), Some(name));
    }
    assert_eq!(ctl.engine().plays(), ["b.mp3", "c.mp3", "a.mp3"]);
}

#[tokio::test]
async fn previous_from_first_wraps_to_last() {
    let display = display();
    let mut ctl = controller(card_with(&["a.mp3", "b.mp3", "c.mp3"]), &display);
    ctl.init().await;

    ctl.previous().await.unwrap();

    assert_eq!(ctl.cursor(), Some(2));
    assert_eq!(display.lock().await.filename(), Some("c.mp3"));
}

#[tokio::test]
async fn transport_on_empty_catalog_does_nothing() {
    let display = display();
    let mut ctl = controller(card_with(&[]), &display);
    ctl.init().await;
    display.lock().await.clear();

    assert_eq!(ctl.play(0).await, Err(ControllerError::EmptyCatalog));
    assert_eq!(ctl.next().await, Err(ControllerError::EmptyCatalog));
    assert_eq!(ctl.previous().await, Err(ControllerError::EmptyCatalog));
    assert_eq!(ctl.pause().await, Err(ControllerError::EmptyCatalog));
    assert_eq!(ctl.resume().await, Err(ControllerError::EmptyCatalog));
    assert_eq!(ctl.toggle_play_pause().await, Err(ControllerError::EmptyCatalog));
    // No stream was ever started, so any event is stale.
    assert_eq!(ctl.handle_event(EngineEvent::Idle(StreamId(1))).await, Ok(()));

    assert_eq!(ctl.cursor(), None);
    assert!(ctl.engine().calls.is_empty());
    assert!(ctl.storage().opened().is_empty());
    assert!(display.lock().await.calls().is_empty());
}

// ── toggle ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn toggle_follows_engine_state() {
    let display = display();
    let mut ctl = controller(card_with(&["a.mp3", "b.mp3"]), &display);
    ctl.init().await;

    // Stopped: plays the cursor.
    ctl.toggle_play_pause().await.unwrap();
    assert_eq!(ctl.engine().plays(), ["a.mp3"]);

    // Playing: pauses.
    ctl.toggle_play_pause().await.unwrap();
    assert_eq!(ctl.engine().calls.last(), Some(&EngineCall::Pause));

    // Paused: resumes.
    ctl.toggle_play_pause().await.unwrap();
    assert_eq!(ctl.engine().calls.last(), Some(&EngineCall::Resume));
    assert_eq!(ctl.cursor(), Some(0));
}

// ── engine events ────────────────────────────────────────────────────────────

#[tokio::test]
async fn paused_event_shows_play_glyph() {
    let display = display();
    let mut ctl = controller(card_with(&["a.mp3"]), &display);
    ctl.init().await;
    ctl.play(0).await.unwrap();
    ctl.pause().await.unwrap();

    // The pause command alone leaves the display alone.
    assert_eq!(display.lock().await.play_icon(), Some(true));

    let stream = ctl.stream().unwrap();
    ctl.handle_event(EngineEvent::Paused(stream)).await.unwrap();
    assert_eq!(ctl.state(), PlaybackState::Paused);
    assert_eq!(display.lock().await.play_icon(), Some(false));
}

#[tokio::test]
async fn playing_event_only_updates_state() {
    let display = display();
    let mut ctl = controller(card_with(&["a.mp3"]), &display);
    ctl.init().await;
    ctl.play(0).await.unwrap();
    let stream = ctl.stream().unwrap();
    ctl.handle_event(EngineEvent::Paused(stream)).await.unwrap();
    display.lock().await.clear();

    ctl.handle_event(EngineEvent::Playing(stream)).await.unwrap();

    assert_eq!(ctl.state(), PlaybackState::Playing);
    assert!(display.lock().await.calls().is_empty());
    assert_eq!(ctl.engine().calls.len(), 1);
}

#[tokio::test]
async fn events_for_superseded_stream_are_ignored() {
    let display = display();
    let mut ctl = controller(card_with(&["a.mp3", "b.mp3", "c.mp3"]), &display);
    ctl.init().await;
    ctl.play(0).await.unwrap();
    let old = ctl.stream().unwrap();
    ctl.next().await.unwrap();
    display.lock().await.clear();

    ctl.handle_event(EngineEvent::Paused(old)).await.unwrap();
    ctl.handle_event(EngineEvent::Idle(old)).await.unwrap();

    assert_eq!(ctl.cursor(), Some(1));
    assert_eq!(ctl.state(), PlaybackState::Playing);
    assert_eq!(ctl.engine().plays(), ["a.mp3", "b.mp3"]);
    assert!(display.lock().await.calls().is_empty());
}

#[tokio::test]
async fn idle_event_on_single_track_restarts_it() {
    let display = display();
    let mut ctl = controller(card_with(&["only.mp3"]), &display);
    ctl.init().await;
    ctl.play(0).await.unwrap();
    let stream = ctl.stream().unwrap();

    ctl.handle_event(EngineEvent::Idle(stream)).await.unwrap();

    assert_eq!(ctl.cursor(), Some(0));
    assert_eq!(ctl.engine().plays(), ["only.mp3", "only.mp3"]);
    assert_eq!(ctl.state(), PlaybackState::Playing);
}

#[tokio::test]
async fn idle_event_advances_to_next_track() {
    let display = display();
    let mut ctl = controller(card_of(4), &display);
    ctl.init().await;
    ctl.play(3).await.unwrap();
    let stream = ctl.stream().unwrap();

    ctl.handle_event(EngineEvent::Idle(stream)).await.unwrap();

    assert_eq!(ctl.cursor(), Some(0));
    assert_eq!(ctl.engine().plays(), ["3.mp3", "0.mp3"]);
}

// ── run loop ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn run_loop_serializes_commands_and_events() {
    use embassy_futures::select::{select, Either};

    let display = display();
    let mut ctl = controller(card_with(&["a.mp3", "b.mp3", "c.mp3"]), &display);
    ctl.init().await;

    let commands: Channel<NoopRawMutex, Command, 4> = Channel::new();
    let events: Channel<NoopRawMutex, EngineEvent, 4> = Channel::new();

    let driver = async {
        commands.send(Command::Next).await;
        // The mock engine numbers streams from 1.
        events.send(EngineEvent::Idle(StreamId(1))).await;
        for _ in 0..8 {
            embassy_futures::yield_now().await;
        }
    };

    match select(ctl.run(commands.receiver(), events.receiver()), driver).await {
        Either::First(never) => match never {},
        Either::Second(()) => {}
    }

    assert_eq!(ctl.cursor(), Some(2));
    assert_eq!(ctl.engine().plays(), ["b.mp3", "c.mp3"]);
    assert_eq!(display.lock().await.filename(), Some("c.mp3"));
}

#[tokio::test]
async fn queued_idle_behind_next_does_not_skip_a_track() {
    use embassy_futures::select::{select, Either};

    let display = display();
    let mut ctl = controller(card_with(&["a.mp3", "b.mp3", "c.mp3"]), &display);
    ctl.init().await;
    ctl.play(0).await.unwrap();
    let finished = ctl.stream().unwrap();

    let commands: Channel<NoopRawMutex, Command, 4> = Channel::new();
    let events: Channel<NoopRawMutex, EngineEvent, 4> = Channel::new();
    // a.mp3 ran out while the user pressed next: both are queued.
    events.try_send(EngineEvent::Idle(finished)).unwrap();
    commands.try_send(Command::Next).unwrap();

    let settle = async {
        for _ in 0..8 {
            embassy_futures::yield_now().await;
        }
    };
    match select(ctl.run(commands.receiver(), events.receiver()), settle).await {
        Either::First(never) => match never {},
        Either::Second(()) => {}
    }

    assert_eq!(ctl.cursor(), Some(1));
    assert_eq!(ctl.engine().plays(), ["a.mp3", "b.mp3"]);
    assert_eq!(display.lock().await.filename(), Some("b.mp3"));
}
