//! Emulated WS2812 strip. Frames are kept in memory and traced.

use platform::{LedStrip, Rgb};

/// In-memory LED strip.
#[derive(Debug)]
pub struct EmulatorLedStrip {
    pending: Vec<Rgb>,
    latched: Vec<Rgb>,
    latches: u64,
}

impl EmulatorLedStrip {
    /// Strip of `len` LEDs, all off.
    pub fn new(len: usize) -> Self {
        Self {
            pending: vec![Rgb::OFF; len],
            latched: vec![Rgb::OFF; len],
            latches: 0,
        }
    }

    /// Colours currently shown.
    pub fn latched(&self) -> &[Rgb] {
        &self.latched
    }

    /// Number of latches so far.
    pub fn latches(&self) -> u64 {
        self.latches
    }
}

impl LedStrip for EmulatorLedStrip {
    type Error = core::convert::Infallible;

    fn len(&self) -> usize {
        self.pending.len()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error> {
        // Out-of-range writes are dropped, as the hardware shift register would.
        if let Some(pixel) = self.pending.get_mut(index) {
            *pixel = color;
        }
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), Self::Error> {
        self.latched.clone_from(&self.pending);
        self.latches = self.latches.wrapping_add(1);
        if let Some(first) = self.latched.first() {
            tracing::trace!(r = first.r, g = first.g, b = first.b, frame = self.latches, "led strip");
        }
        Ok(())
    }

    async fn clear(&mut self) -> Result<(), Self::Error> {
        self.pending.fill(Rgb::OFF);
        self.refresh().await
    }
}
