//! Emulator Display Driver
//!
//! Keeps the now-playing screen and an in-memory Gray4 framebuffer of the
//! panel. Every change is re-rendered immediately and reported through
//! `tracing`, which is the emulator's view of the screen.

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::{DrawTarget, GrayColor, OriginDimensions, Pixel, Size};
use platform::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use platform::{PlayerDisplay, VolumePercent};
use ui::NowPlayingScreen;

/// In-memory 4-bit greyscale framebuffer, one byte per pixel.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Framebuffer {
    /// A blank `width` x `height` framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        let len = usize::try_from(width.saturating_mul(height)).unwrap_or(0);
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok().filter(|x| *x < self.width)?;
        let y = u32::try_from(y).ok().filter(|y| *y < self.height)?;
        let offset = y.checked_mul(self.width)?.checked_add(x)?;
        usize::try_from(offset).ok()
    }

    /// Luma at `(x, y)`, `None` outside the panel.
    pub fn luma(&self, x: i32, y: i32) -> Option<u8> {
        self.offset(x, y).and_then(|i| self.pixels.get(i).copied())
    }

    /// Number of pixels that are not black.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|luma| **luma != 0).count()
    }
}

impl DrawTarget for Framebuffer {
    type Color = Gray4;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(slot) = self.offset(point.x, point.y).and_then(|i| self.pixels.get_mut(i)) {
                *slot = color.luma();
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Emulated panel showing the now-playing screen.
#[allow(clippy::module_name_repetitions)]
pub struct EmulatorDisplay {
    screen: NowPlayingScreen,
    framebuffer: Framebuffer,
    refreshes: u32,
}

impl EmulatorDisplay {
    /// Panel at the board's resolution with the starting screen.
    pub fn new() -> Self {
        Self {
            screen: NowPlayingScreen::default(),
            framebuffer: Framebuffer::new(DISPLAY_WIDTH, DISPLAY_HEIGHT),
            refreshes: 0,
        }
    }

    /// Screen state.
    pub fn screen(&self) -> &NowPlayingScreen {
        &self.screen
    }

    /// Last rendered frame.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Number of redraws so far.
    pub fn refreshes(&self) -> u32 {
        self.refreshes
    }

    /// Move the volume slider.
    pub fn set_volume(&mut self, volume: VolumePercent) {
        self.screen.set_volume(volume);
        self.refresh();
    }

    /// Redraw if the screen changed since the last refresh.
    pub fn refresh(&mut self) {
        if !self.screen.take_dirty() {
            return;
        }
        match ui::render(&self.screen, &mut self.framebuffer) {
            Ok(()) => {}
            Err(never) => match never {},
        }
        self.refreshes = self.refreshes.saturating_add(1);
        tracing::info!(
            label = self.screen.label(),
            icon = if self.screen.is_playing() { "pause" } else { "play" },
            volume = self.screen.volume().get(),
            "screen"
        );
    }
}

impl Default for EmulatorDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerDisplay for EmulatorDisplay {
    fn set_filename(&mut self, name: &str) {
        self.screen.set_filename(name);
        self.refresh();
    }

    fn set_play_icon(&mut self, playing: bool) {
        self.screen.set_play_icon(playing);
        self.refresh();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_framebuffer_ignores_out_of_bounds() {
        let mut fb = Framebuffer::new(4, 4);
        fb.draw_iter([
            Pixel(embedded_graphics::prelude::Point::new(1, 1), Gray4::WHITE),
            Pixel(embedded_graphics::prelude::Point::new(-1, 0), Gray4::WHITE),
            Pixel(embedded_graphics::prelude::Point::new(4, 0), Gray4::WHITE),
        ])
        .unwrap();
        assert_eq!(fb.lit_pixels(), 1);
        assert_eq!(fb.luma(1, 1), Some(15));
        assert_eq!(fb.luma(4, 0), None);
    }

    #[test]
    fn test_redraws_only_on_change() {
        let mut display = EmulatorDisplay::new();
        display.refresh();
        assert_eq!(display.refreshes(), 1);
        assert!(display.framebuffer().lit_pixels() > 0);

        display.set_filename("a.mp3");
        display.set_filename("a.mp3");
        assert_eq!(display.refreshes(), 2);

        display.set_play_icon(true);
        assert_eq!(display.refreshes(), 3);
        assert!(display.screen().is_playing());
        assert_eq!(display.screen().label(), "a.mp3");
    }
}
