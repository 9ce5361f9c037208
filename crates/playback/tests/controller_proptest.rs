//! Property-based tests for cursor navigation.
//!
//! Each case drives a real controller over an in-memory card with
//! `embassy_futures::block_on`; every mock future completes immediately.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

mod common;

use common::{card_of, controller, display};
use embassy_futures::block_on;
use playback::{next_index, previous_index, EngineEvent, PlaybackState};
use proptest::prelude::*;

proptest! {
    /// N calls to next() from any cursor come back to that cursor.
    #[test]
    fn next_n_times_is_cyclic(n in 1usize..12, start_seed in any::<usize>()) {
        let start = start_seed % n;
        let display = display();
        let mut ctl = controller(card_of(n), &display);
        block_on(async {
            ctl.init().await;
            ctl.play(start).await.unwrap();
            for _ in 0..n {
                ctl.next().await.unwrap();
            }
        });
        prop_assert_eq!(ctl.cursor(), Some(start));
    }

    /// previous() after next() leaves the cursor where it was.
    #[test]
    fn previous_undoes_next(n in 1usize..12, start_seed in any::<usize>()) {
        let start = start_seed % n;
        let display = display();
        let mut ctl = controller(card_of(n), &display);
        block_on(async {
            ctl.init().await;
            ctl.play(start).await.unwrap();
            ctl.next().await.unwrap();
            ctl.previous().await.unwrap();
        });
        prop_assert_eq!(ctl.cursor(), Some(start));
    }

    /// play(index) outside the catalog changes nothing.
    #[test]
    fn out_of_range_play_is_ignored(n in 1usize..12, past in 0usize..1000, start_seed in any::<usize>()) {
        let start = start_seed % n;
        let display = display();
        let mut ctl = controller(card_of(n), &display);
        let (before_state, before_calls) = block_on(async {
            ctl.init().await;
            ctl.play(start).await.unwrap();
            (ctl.state(), ctl.engine().calls.len())
        });
        let index = n.saturating_add(past);
        let result = block_on(ctl.play(index));
        prop_assert!(result.is_err());
        prop_assert_eq!(ctl.cursor(), Some(start));
        prop_assert_eq!(ctl.state(), before_state);
        prop_assert_eq!(ctl.engine().calls.len(), before_calls);
    }

    /// An Idle event plays exactly one track, one step further on.
    #[test]
    fn idle_advances_exactly_once(n in 1usize..12, start_seed in any::<usize>()) {
        let start = start_seed % n;
        let display = display();
        let mut ctl = controller(card_of(n), &display);
        block_on(async {
            ctl.init().await;
            ctl.play(start).await.unwrap();
        });
        let plays_before = ctl.engine().plays().len();
        let stream = ctl.stream().unwrap();

        block_on(ctl.handle_event(EngineEvent::Idle(stream))).unwrap();

        let expected = (start + 1) % n;
        prop_assert_eq!(ctl.cursor(), Some(expected));
        prop_assert_eq!(ctl.engine().plays().len(), plays_before + 1);
        let expected_name = format!("{expected}.mp3");
        prop_assert_eq!(ctl.engine().plays().last().copied(), Some(expected_name.as_str()));
        prop_assert_eq!(ctl.state(), PlaybackState::Playing);
    }

    /// The free index helpers agree with modular arithmetic.
    #[test]
    fn index_helpers_match_modular_arithmetic(n in 1usize..10_000, seed in any::<usize>()) {
        let cursor = seed % n;
        prop_assert_eq!(next_index(cursor, n), (cursor + 1) % n);
        prop_assert_eq!(previous_index(cursor, n), (cursor + n - 1) % n);
    }
}
