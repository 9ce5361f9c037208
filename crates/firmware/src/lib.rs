//! Pocket Player firmware
//!
//! Application layer of the handheld player: binds the platform traits to
//! concrete hardware (or the desktop emulator), runs the bring-up sequence
//! and wires the playback controller, decode engine, touch controls and
//! ambient light together.
//!
//! # Architecture
//!
//! ```text
//! Application Layer (main.rs, boot)
//!         ↓
//! Playback controller / UI (playback, ui crates)
//!         ↓
//! Adapters (audio::SinkAdapter, engine, ambient)
//!         ↓
//! Platform HAL traits (platform crate)
//! ```
//!
//! # Features
//!
//! - `emulator` - Build for desktop testing (tokio, tracing-subscriber, clap)
//! - `std` - Enable standard library (for emulator and testing)
//! - `defmt` - defmt derives for hardware logging
//!
//! # Emulator Target
//!
//! ```bash
//! MUSIC_PATH=~/Music cargo run -p firmware --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Critical correctness: deny these
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
// Logging discipline
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(async_fn_in_trait)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unused_async)]

pub mod ambient;
pub mod audio;
pub mod boot;
pub mod engine;

#[cfg(feature = "emulator")]
pub mod emulator;

pub use ambient::{hsv_to_rgb, rainbow_frame, run_ambient};
pub use audio::SinkAdapter;
pub use boot::{bring_up, Board, BootError, BootStage, BOOT_SEQUENCE_STEPS};
pub use engine::{EngineCore, SimulatedEngine};
