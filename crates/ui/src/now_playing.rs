//! Now-playing screen state: filename label, play glyph, volume slider.


use heapless::String;
use platform::config::{DEFAULT_VOLUME, MAX_PATH_BYTES, STARTING_TEXT};
use platform::{PlayerDisplay, VolumePercent};

/// Label buffer size. A filename never exceeds a full path.
pub const LABEL_CAPACITY: usize = MAX_PATH_BYTES;

/// State for the now-playing screen.
#[derive(Debug, Clone)]
pub struct NowPlayingScreen {
    label: String<LABEL_CAPACITY>,
    playing: bool,
    volume: VolumePercent,
    dirty: bool,
}

impl NowPlayingScreen {
    /// Current label text.
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// `true` when the pause glyph is showing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Volume slider position.
    pub fn volume(&self) -> VolumePercent {
        self.volume
    }

    /// Move the volume slider.
    pub fn set_volume(&mut self, volume: VolumePercent) {
        if self.volume != volume {
            self.volume = volume;
            self.dirty = true;
        }
    }

    /// Returns whether anything changed since the last call, and clears it.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }
}

impl Default for NowPlayingScreen {
    fn default() -> Self {
        let mut label = String::new();
        let _ = label.push_str(STARTING_TEXT);
        Self {
            label,
            playing: false,
            volume: VolumePercent::new(DEFAULT_VOLUME),
            dirty: true,
        }
    }
}

impl PlayerDisplay for NowPlayingScreen {
    fn set_filename(&mut self, name: &str) {
        if self.label.as_str() == name {
            return;
        }
        self.label.clear();
        for c in name.chars() {
            if self.label.push(c).is_err() {
                break;
            }
        }
        self.dirty = true;
    }

    fn set_play_icon(&mut self, playing: bool) {
        if self.playing != playing {
            self.playing = playing;
            self.dirty = true;
        }
    }
}
