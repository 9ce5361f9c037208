//! Display abstraction layer
//!
//! The playback controller only ever pushes two notifications to the
//! display. Implementations are called with the display lock held, so they
//! must not block or re-acquire that lock.

/// Now-playing notifications from the playback controller.
pub trait PlayerDisplay {
    /// Replace the current filename label.
    fn set_filename(&mut self, name: &str);

    /// Show the pause glyph (`true`, something is playing) or the play glyph.
    fn set_play_icon(&mut self, playing: bool);
}

impl<T: PlayerDisplay + ?Sized> PlayerDisplay for &mut T {
    fn set_filename(&mut self, name: &str) {
        (**self).set_filename(name);
    }

    fn set_play_icon(&mut self, playing: bool) {
        (**self).set_play_icon(playing);
    }
}
