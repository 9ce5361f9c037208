//! Playback state as reported by the decode engine.

/// Current playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaybackState {
    /// Nothing is being decoded.
    #[default]
    Stopped,
    /// A track is actively decoding and streaming to the sink.
    Playing,
    /// Playback is suspended; the engine keeps its position.
    Paused,
}

impl PlaybackState {
    /// State after the engine reports `event`.
    ///
    /// Events are authoritative: the result depends only on the event, never
    /// on the state the controller believed it was in.
    #[must_use]
    pub fn observe(self, event: EngineEvent) -> Self {
        match event {
            EngineEvent::Playing(_) => Self::Playing,
            EngineEvent::Paused(_) => Self::Paused,
            EngineEvent::Idle(_) => Self::Stopped,
        }
    }

    /// Short label for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

/// Identifies the stream started by one engine `play` call.
///
/// Every [`EngineEvent`] names the stream it describes, so an event that was
/// queued before a newer `play` can be told apart from the current stream's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamId(pub u32);

impl StreamId {
    /// Raw counter value.
    pub fn get(self) -> u32 {
        self.0
    }

    /// The id handed out after this one. Wraps at `u32::MAX`.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Status events emitted by the decode engine on its own task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineEvent {
    /// Output has started (or resumed).
    Playing(StreamId),
    /// Output was paused.
    Paused(StreamId),
    /// The track finished or the engine stopped.
    Idle(StreamId),
}

impl EngineEvent {
    /// The stream this event describes.
    pub fn stream(self) -> StreamId {
        match self {
            Self::Playing(id) | Self::Paused(id) | Self::Idle(id) => id,
        }
    }

    /// Short label for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Playing(_) => "playing",
            Self::Paused(_) => "paused",
            Self::Idle(_) => "idle",
        }
    }
}
