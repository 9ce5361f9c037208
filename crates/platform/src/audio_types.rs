//! Audio domain newtypes for compile-time safety.
//!
//! These zero-cost abstractions prevent common errors:
//! - `VolumePercent`: clamps 0–100, the codec's volume scale
//! - `SampleRateHz`: validates 8000–768000 Hz range
//! - `BitDepth` / `ChannelMode`: the only slot layouts the I2S peripheral accepts

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("value {value} outside {min}..={max}")]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── VolumePercent ────────────────────────────────────────────────────────────

/// Volume as a percentage, clamped to 0–100.
///
/// Wraps a `u8` with the invariant `0 <= value <= 100`.
/// Construct with [`VolumePercent::new`] (clamping) or
/// [`VolumePercent::try_new`] (fallible, strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct VolumePercent(u8);

impl VolumePercent {
    /// Silent output. The codec maps level 0 to its mute setting.
    pub const MUTE: Self = Self(0);

    /// Create a `VolumePercent`, clamping values above 100 to 100.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        if value > 100 {
            Self(100)
        } else {
            Self(value)
        }
    }

    /// Create a `VolumePercent`, returning an error if `value > 100`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > 100`.
    pub fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
        if value > 100 {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: 100,
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the inner volume value (0–100).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// `true` for level 0.
    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 == 0
    }
}

// ── SampleRateHz ─────────────────────────────────────────────────────────────

/// Sample rate in Hz, validated to the range the I2S clock tree can derive.
///
/// Valid range: 8000–768000 Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SampleRateHz(u32);

impl SampleRateHz {
    /// Minimum supported sample rate: 8000 Hz (telephony).
    pub const MIN_HZ: u32 = 8_000;

    /// Maximum supported sample rate: 768000 Hz.
    pub const MAX_HZ: u32 = 768_000;

    /// 16 kHz, the rate the codec is brought up with.
    pub const HZ_16000: Self = Self(16_000);

    /// Create a `SampleRateHz`, returning an error if out of 8000–768000 Hz.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `hz < 8000` or `hz > 768000`.
    pub fn new(hz: u32) -> Result<Self, OutOfRangeError> {
        if !(Self::MIN_HZ..=Self::MAX_HZ).contains(&hz) {
            Err(OutOfRangeError {
                value: hz,
                min: Self::MIN_HZ,
                max: Self::MAX_HZ,
            })
        } else {
            Ok(Self(hz))
        }
    }

    /// Return the sample rate in Hz.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

// ── Slot layout ──────────────────────────────────────────────────────────────

/// Data bit width of one I2S slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitDepth {
    /// 8-bit samples.
    Bits8,
    /// 16-bit samples (CD quality, codec default).
    Bits16,
    /// 24-bit samples.
    Bits24,
    /// 32-bit samples.
    Bits32,
}

impl BitDepth {
    /// Map a bits-per-sample count reported by a decoder.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] for anything other than 8, 16, 24 or 32.
    pub fn from_bits(bits: u32) -> Result<Self, OutOfRangeError> {
        match bits {
            8 => Ok(Self::Bits8),
            16 => Ok(Self::Bits16),
            24 => Ok(Self::Bits24),
            32 => Ok(Self::Bits32),
            other => Err(OutOfRangeError {
                value: other,
                min: 8,
                max: 32,
            }),
        }
    }

    /// Bits per sample.
    #[must_use]
    pub fn bits(self) -> u32 {
        match self {
            Self::Bits8 => 8,
            Self::Bits16 => 16,
            Self::Bits24 => 24,
            Self::Bits32 => 32,
        }
    }

    /// Bytes one sample occupies in the transmit buffer.
    ///
    /// 24-bit samples are carried in 32-bit containers.
    #[must_use]
    pub fn container_bytes(self) -> u32 {
        match self {
            Self::Bits8 => 1,
            Self::Bits16 => 2,
            Self::Bits24 | Self::Bits32 => 4,
        }
    }
}

/// Number of active slots in each I2S frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelMode {
    /// One channel duplicated to both slots.
    Mono,
    /// Two independent channels.
    Stereo,
}

impl ChannelMode {
    /// Channel count.
    #[must_use]
    pub fn count(self) -> u32 {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }
}
