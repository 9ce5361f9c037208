//! Playback control: track cursor, transport commands, engine event handling.
//!
//! The controller owns the catalog and the cursor. Decoding itself happens in
//! an external engine reached through [`DecodeEngine`]; the controller only
//! issues commands to it and mirrors the state it reports back as
//! [`EngineEvent`]s.
#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod command;
pub mod controller;
pub mod engine;
pub mod state;

pub use command::Command;
pub use controller::{next_index, previous_index, ControllerError, PlaybackController};
pub use engine::{DecodeEngine, EngineConfig, EngineError};
pub use state::{EngineEvent, PlaybackState, StreamId};
