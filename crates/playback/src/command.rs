//! Commands accepted by the controller's run loop.

/// A transport command, usually produced by a UI control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Play the catalog entry at this index.
    Play(usize),
    /// Pause the engine.
    Pause,
    /// Resume the engine.
    Resume,
    /// Pause if playing, resume if paused, otherwise play the cursor.
    TogglePlayPause,
    /// Advance the cursor cyclically and play.
    Next,
    /// Step the cursor back cyclically and play.
    Previous,
    /// Rebuild the catalog from storage.
    Rescan,
}

impl Command {
    /// Short label for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Play(_) => "play",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::TogglePlayPause => "toggle",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::Rescan => "rescan",
        }
    }
}
