//! Addressable LED strip abstraction

/// 8-bit RGB colour for one LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb {
    /// All channels off.
    pub const OFF: Self = Self { r: 0, g: 0, b: 0 };

    /// Construct from channel values.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Addressable LED strip (WS2812-class).
///
/// Pixels are buffered by `set_pixel` and only latched by `refresh`.
pub trait LedStrip {
    /// Error type
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Number of LEDs on the strip.
    fn len(&self) -> usize;

    /// `true` if the strip has no LEDs.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Buffer a colour for LED `index`.
    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error>;

    /// Latch the buffered colours onto the strip.
    fn refresh(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Turn every LED off and latch.
    fn clear(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;
}
