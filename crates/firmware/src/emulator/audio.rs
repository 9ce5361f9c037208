//! Emulated I2S channel and codec.
//!
//! Nothing reaches a sound card. Writes are paced at the configured byte rate
//! so the decode engine runs at the speed it would on hardware, and tracks
//! end after their real duration.

use embassy_time::Duration;
use platform::config::DEFAULT_VOLUME;
use platform::{ClockConfig, CodecVolume, I2sTx, SlotConfig, StreamFormat, TxError, VolumePercent};

/// Error from the emulated channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmulatorAudioError {
    /// `write` was called on a disabled channel.
    #[error("i2s channel is disabled")]
    Disabled,
    /// Slot or clock registers were written while the channel was enabled.
    #[error("i2s channel must be disabled to reconfigure")]
    Busy,
}

/// Real-time paced I2S channel.
#[derive(Debug)]
pub struct EmulatorI2s {
    enabled: bool,
    format: StreamFormat,
    bytes_written: u64,
}

impl EmulatorI2s {
    /// A disabled channel in the default format.
    pub fn new() -> Self {
        Self {
            enabled: false,
            format: StreamFormat::default(),
            bytes_written: 0,
        }
    }

    /// Format the channel is currently clocked for.
    pub fn format(&self) -> StreamFormat {
        self.format
    }

    /// Total bytes accepted.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Wall time `len` bytes take at the current format.
    fn playout_time(&self, len: usize) -> std::time::Duration {
        let rate = u64::from(self.format.bytes_per_second());
        let micros = u64::try_from(len)
            .unwrap_or(u64::MAX)
            .saturating_mul(1_000_000)
            .checked_div(rate)
            .unwrap_or(0);
        std::time::Duration::from_micros(micros)
    }

    /// Bytes that play out within `timeout`.
    fn budget(&self, timeout: Duration) -> usize {
        let bytes = u64::from(self.format.bytes_per_second())
            .saturating_mul(timeout.as_micros())
            .checked_div(1_000_000)
            .unwrap_or(0);
        usize::try_from(bytes).unwrap_or(usize::MAX)
    }
}

impl Default for EmulatorI2s {
    fn default() -> Self {
        Self::new()
    }
}

impl I2sTx for EmulatorI2s {
    type Error = EmulatorAudioError;

    async fn enable(&mut self) -> Result<(), Self::Error> {
        self.enabled = true;
        Ok(())
    }

    async fn disable(&mut self) -> Result<(), Self::Error> {
        self.enabled = false;
        Ok(())
    }

    async fn reconfig_slot(&mut self, slot: SlotConfig) -> Result<(), Self::Error> {
        if self.enabled {
            return Err(EmulatorAudioError::Busy);
        }
        self.format.bit_depth = slot.bit_depth;
        self.format.channels = slot.channels;
        Ok(())
    }

    async fn reconfig_clock(&mut self, clock: ClockConfig) -> Result<(), Self::Error> {
        if self.enabled {
            return Err(EmulatorAudioError::Busy);
        }
        self.format.sample_rate = clock.sample_rate;
        tracing::debug!(
            rate = clock.sample_rate.get(),
            mclk = clock.mclk_hz(),
            "emulator i2s clock"
        );
        Ok(())
    }

    async fn write(&mut self, buf: &[u8], timeout: Duration) -> Result<usize, TxError<Self::Error>> {
        if !self.enabled {
            return Err(TxError::Hardware(EmulatorAudioError::Disabled));
        }
        let accepted = buf.len().min(self.budget(timeout));
        tokio::time::sleep(self.playout_time(accepted)).await;
        self.bytes_written = self
            .bytes_written
            .saturating_add(u64::try_from(accepted).unwrap_or(u64::MAX));
        if accepted < buf.len() {
            return Err(TxError::Timeout { written: accepted });
        }
        Ok(accepted)
    }
}

/// Codec volume register kept in memory.
#[derive(Debug)]
pub struct EmulatorCodec {
    level: VolumePercent,
}

impl EmulatorCodec {
    /// Codec at the default level.
    pub fn new() -> Self {
        Self {
            level: VolumePercent::new(DEFAULT_VOLUME),
        }
    }

    /// Current level.
    pub fn level(&self) -> VolumePercent {
        self.level
    }
}

impl Default for EmulatorCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecVolume for EmulatorCodec {
    type Error = core::convert::Infallible;

    async fn set_volume(&mut self, volume: VolumePercent) -> Result<(), Self::Error> {
        if self.level != volume {
            tracing::info!(level = volume.get(), "volume");
        }
        self.level = volume;
        Ok(())
    }
}
