//! Hardware Abstraction Layer (HAL) for the Pocket Player handheld.
//!
//! This crate provides trait-based abstractions for every peripheral the
//! playback controller touches, so the feature crates can be developed and
//! tested without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate: boot, engine, emulator)
//!         ↓
//! Feature Layers (playback, library, ui)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Board support (I2S channel, codec, SD card, LCD, LED strip)
//! ```
//!
//! # Boundaries
//!
//! - [`AudioSink`] - the three audio capabilities (write, reconfigure, mute)
//!   plus the direct volume path used by the slider
//! - [`I2sTx`] / [`CodecVolume`] - raw hardware the sink adapter binds to
//! - [`Storage`] - mounted filesystem access (open + directory listing)
//! - [`PlayerDisplay`] - the two now-playing notifications
//! - [`InputEvent`] - touch widget events flowing back from the display
//! - [`LedStrip`] - the ambient light channel
//!
//! # Features
//!
//! - `std`: host support (`storage_local`, recording mocks)
//! - `defmt`: `defmt::Format` derives for hardware logging

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)] // hardware accessors; callers decide
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod audio;
pub mod audio_types;
pub mod config;
pub mod display;
pub mod input;
pub mod led;
pub mod storage;

#[cfg(any(test, feature = "std"))]
pub mod storage_local;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main high-level traits
pub use audio::{
    AudioSink, ClockConfig, CodecVolume, I2sTx, SinkError, SlotConfig, StreamFormat, TxError,
};
pub use audio_types::{BitDepth, ChannelMode, OutOfRangeError, SampleRateHz, VolumePercent};
pub use display::PlayerDisplay;
pub use input::{InputEvent, Widget};
pub use led::{LedStrip, Rgb};
pub use storage::{DirEntry, EntryKind, File, Storage, Visit};
