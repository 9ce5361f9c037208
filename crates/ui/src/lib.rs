//! Application UI layer: now-playing screen state, control routing, rendering.
//!
//! This crate is `no_std` by default; it only uses `core`, `heapless` and
//! `embedded-graphics`. The screen holds no playback logic: it displays what
//! the controller tells it and turns touches into commands.

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod control;
pub mod now_playing;
pub mod render;

pub use control::{Control, ControlRouter};
pub use now_playing::NowPlayingScreen;
pub use render::render;
