//! Input event abstraction
//!
//! Events produced by the touch screen's widgets. They carry no playback
//! logic; the UI crate turns them into controller commands.

/// Input events from on-screen widgets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// A transport button was clicked
    Clicked(Widget),
    /// The volume slider moved to a new value (0-100 on the slider scale)
    VolumeChanged(u8),
}

/// On-screen transport buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Widget {
    /// Previous track
    Previous,
    /// Play/Pause toggle
    PlayPause,
    /// Next track
    Next,
}
