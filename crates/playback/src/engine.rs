//! Decode engine boundary.
//!
//! The engine turns an open file into samples pushed through the audio sink
//! and reports its state changes as [`EngineEvent`](crate::EngineEvent)s on
//! its own task. Starting a new track implicitly supersedes the current one;
//! the engine stops the old stream before starting the new one.

use platform::config::{ENGINE_CORE, ENGINE_PRIORITY};

use crate::state::{PlaybackState, StreamId};

/// Errors returned by engine commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// The command is not valid in the engine's current state.
    #[error("engine rejected the command")]
    Rejected,
    /// The engine task is not running.
    #[error("engine unavailable")]
    Unavailable,
}

/// Scheduling hints handed to the engine at construction.
///
/// Opaque to the controller; only the engine's host task reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Task priority.
    pub priority: u8,
    /// Core the engine task is pinned to.
    pub core: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            priority: ENGINE_PRIORITY,
            core: ENGINE_CORE,
        }
    }
}

/// External decode/playback engine.
///
/// `F` is the open file handle type the engine consumes.
pub trait DecodeEngine<F> {
    /// Start decoding `file`, replacing any active track.
    ///
    /// Returns the id every later event about this stream carries.
    fn play(&mut self, file: F) -> impl core::future::Future<Output = Result<StreamId, EngineError>>;

    /// Pause output.
    fn pause(&mut self) -> impl core::future::Future<Output = Result<(), EngineError>>;

    /// Resume paused output.
    fn resume(&mut self) -> impl core::future::Future<Output = Result<(), EngineError>>;

    /// The engine's own view of its state.
    fn state(&self) -> PlaybackState;
}
