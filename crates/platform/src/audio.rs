//! Audio output abstraction
//!
//! Two layers live here:
//!
//! - [`I2sTx`] and [`CodecVolume`]: the raw transmit channel and the codec's
//!   volume register, implemented per board.
//! - [`AudioSink`]: the capability surface the decode engine drives. The
//!   firmware's sink adapter is the only implementor and the only code that
//!   touches the two hardware traits.

use embassy_time::Duration;

use crate::audio_types::{BitDepth, ChannelMode, SampleRateHz, VolumePercent};

/// PCM stream layout the sink is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    /// Frame rate.
    pub sample_rate: SampleRateHz,
    /// Bits per sample.
    pub bit_depth: BitDepth,
    /// Active slots per frame.
    pub channels: ChannelMode,
}

impl StreamFormat {
    /// Bytes consumed per second of audio at this format.
    #[must_use]
    pub fn bytes_per_second(&self) -> u32 {
        self.sample_rate
            .get()
            .saturating_mul(self.bit_depth.container_bytes())
            .saturating_mul(self.channels.count())
    }

    /// Slot layout for this stream (Philips I2S framing).
    #[must_use]
    pub fn slot_config(&self) -> SlotConfig {
        SlotConfig {
            bit_depth: self.bit_depth,
            channels: self.channels,
        }
    }

    /// Clock configuration for this stream with the given MCLK multiple.
    #[must_use]
    pub fn clock_config(&self, mclk_multiple: u32) -> ClockConfig {
        ClockConfig {
            sample_rate: self.sample_rate,
            mclk_multiple,
        }
    }
}

impl Default for StreamFormat {
    /// 16 kHz, 16-bit, stereo: the format the codec is brought up with.
    fn default() -> Self {
        Self {
            sample_rate: SampleRateHz::HZ_16000,
            bit_depth: BitDepth::Bits16,
            channels: ChannelMode::Stereo,
        }
    }
}

/// Standard Philips slot configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotConfig {
    /// Data width per slot.
    pub bit_depth: BitDepth,
    /// Mono or stereo framing.
    pub channels: ChannelMode,
}

/// Standard clock configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    /// Frame clock.
    pub sample_rate: SampleRateHz,
    /// MCLK as a multiple of the frame clock.
    pub mclk_multiple: u32,
}

impl ClockConfig {
    /// Master clock frequency in Hz.
    ///
    /// Saturates rather than overflowing for out-of-range multiples.
    #[must_use]
    pub fn mclk_hz(&self) -> u32 {
        self.sample_rate.get().saturating_mul(self.mclk_multiple)
    }
}

/// Failure of a single transmit call on the raw I2S channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxError<E> {
    /// The timeout expired. `written` bytes were queued before it did.
    Timeout {
        /// Bytes accepted before the deadline.
        written: usize,
    },
    /// The peripheral reported an error.
    Hardware(E),
}

/// Errors surfaced by [`AudioSink`].
///
/// A timed-out write and a hardware fault are separate variants so the
/// engine can treat underrun differently from a dead peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// Write timed out after accepting `written` bytes.
    #[error("write timed out after {written} bytes")]
    Timeout {
        /// Bytes accepted before the deadline.
        written: usize,
    },
    /// The transmit channel reported a hardware fault.
    #[error("audio hardware fault")]
    Fault,
    /// Slot/clock reconfiguration failed. The channel state is indeterminate.
    #[error("audio reconfiguration failed")]
    Reconfigure,
    /// The codec rejected a volume or mute change.
    #[error("codec volume update failed")]
    Volume,
}

/// Raw I2S transmit channel.
pub trait I2sTx {
    /// Error type
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Enable the channel.
    fn enable(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Disable the channel. Slot and clock changes require a disabled channel.
    fn disable(&mut self) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Apply a new slot configuration.
    fn reconfig_slot(
        &mut self,
        slot: SlotConfig,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Apply a new clock configuration.
    fn reconfig_clock(
        &mut self,
        clock: ClockConfig,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;

    /// Queue `buf` for transmission, waiting at most `timeout`.
    fn write(
        &mut self,
        buf: &[u8],
        timeout: Duration,
    ) -> impl core::future::Future<Output = Result<usize, TxError<Self::Error>>>;
}

/// Codec output level control.
pub trait CodecVolume {
    /// Error type
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Set the output level. Level 0 is silent.
    fn set_volume(
        &mut self,
        volume: VolumePercent,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;
}

/// The audio capabilities handed to the decode engine.
pub trait AudioSink {
    /// Write PCM bytes, bounded by `timeout`. Returns bytes written.
    fn write(
        &mut self,
        buf: &[u8],
        timeout: Duration,
    ) -> impl core::future::Future<Output = Result<usize, SinkError>>;

    /// Disable output, apply the new format, re-enable.
    fn reconfigure(
        &mut self,
        format: StreamFormat,
    ) -> impl core::future::Future<Output = Result<(), SinkError>>;

    /// Mute sets the level to zero; unmute restores the default level.
    fn set_mute(&mut self, muted: bool) -> impl core::future::Future<Output = Result<(), SinkError>>;

    /// Set the output level directly (volume slider path).
    fn set_volume(
        &mut self,
        volume: VolumePercent,
    ) -> impl core::future::Future<Output = Result<(), SinkError>>;
}
