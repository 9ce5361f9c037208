//! [`AudioSink`] over a raw I2S channel and a codec volume control.
//!
//! Reconfiguration order is fixed by the peripheral: slot and clock registers
//! are only writable while the channel is disabled.
//!
//! | Step | Call |
//! |---|---|
//! | 1 | `disable()` |
//! | 2 | `reconfig_slot(format.slot_config())` |
//! | 3 | `reconfig_clock(format.clock_config(MCLK_MULTIPLE))` |
//! | 4 | `enable()` |
//!
//! A failed step aborts the sequence and is reported once; there is no retry.
//! The engine owns recovery policy.

use embassy_time::Duration;
use platform::config::{DEFAULT_VOLUME, MCLK_MULTIPLE};
use platform::{AudioSink, CodecVolume, I2sTx, SinkError, StreamFormat, TxError, VolumePercent};

/// Audio sink adapter.
///
/// Holds the board's I2S channel and codec for its whole lifetime. Construction
/// and teardown of the hardware itself belong to bring-up.
pub struct SinkAdapter<I, C> {
    i2s: I,
    codec: C,
    format: Option<StreamFormat>,
}

impl<I, C> SinkAdapter<I, C>
where
    I: I2sTx,
    C: CodecVolume,
{
    /// Wrap an I2S channel and codec. Nothing is written to the hardware.
    pub fn new(i2s: I, codec: C) -> Self {
        Self {
            i2s,
            codec,
            format: None,
        }
    }

    /// Bring-up: set the default level and apply `format`.
    pub async fn init(&mut self, format: StreamFormat) -> Result<(), SinkError> {
        self.apply_volume(VolumePercent::new(DEFAULT_VOLUME)).await?;
        self.reconfigure(format).await
    }

    /// Format applied by the last successful [`reconfigure`](AudioSink::reconfigure).
    pub fn format(&self) -> Option<StreamFormat> {
        self.format
    }

    /// The I2S channel.
    pub fn i2s(&self) -> &I {
        &self.i2s
    }

    /// The codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    async fn apply_volume(&mut self, volume: VolumePercent) -> Result<(), SinkError> {
        self.codec.set_volume(volume).await.map_err(|e| {
            tracing::error!(level = volume.get(), error = %e, "codec volume update failed");
            SinkError::Volume
        })
    }

    async fn apply_format(&mut self, format: StreamFormat) -> Result<(), I::Error> {
        self.i2s.disable().await?;
        self.i2s.reconfig_slot(format.slot_config()).await?;
        self.i2s.reconfig_clock(format.clock_config(MCLK_MULTIPLE)).await?;
        self.i2s.enable().await
    }
}

impl<I, C> AudioSink for SinkAdapter<I, C>
where
    I: I2sTx,
    C: CodecVolume,
{
    async fn write(&mut self, buf: &[u8], timeout: Duration) -> Result<usize, SinkError> {
        match self.i2s.write(buf, timeout).await {
            Ok(written) => Ok(written),
            Err(TxError::Timeout { written }) => Err(SinkError::Timeout { written }),
            Err(TxError::Hardware(e)) => {
                tracing::error!(error = %e, "i2s write fault");
                Err(SinkError::Fault)
            }
        }
    }

    async fn reconfigure(&mut self, format: StreamFormat) -> Result<(), SinkError> {
        tracing::debug!(
            rate = format.sample_rate.get(),
            bits = format.bit_depth.bits(),
            channels = format.channels.count(),
            "reconfiguring i2s"
        );
        if let Err(e) = self.apply_format(format).await {
            tracing::error!(error = %e, "i2s reconfiguration failed");
            self.format = None;
            return Err(SinkError::Reconfigure);
        }
        self.format = Some(format);
        Ok(())
    }

    async fn set_mute(&mut self, muted: bool) -> Result<(), SinkError> {
        // No pre-mute level is kept: unmute always restores the default.
        let level = if muted {
            VolumePercent::MUTE
        } else {
            VolumePercent::new(DEFAULT_VOLUME)
        };
        self.apply_volume(level).await
    }

    async fn set_volume(&mut self, volume: VolumePercent) -> Result<(), SinkError> {
        if volume.is_muted() {
            return self.set_mute(true).await;
        }
        self.apply_volume(volume).await
    }
}
