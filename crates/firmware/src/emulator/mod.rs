//! Desktop emulator board.
//!
//! Stands in for the handheld on a workstation: a host directory is mounted
//! as the card, audio writes are paced in real time and discarded, the LED
//! strip and screen are kept in memory and reported through `tracing`, and
//! touches come from a line-oriented console on stdin.

pub mod audio;
pub mod console;
pub mod display;
pub mod led;

use std::path::{Path, PathBuf};

use embedded_hal_async::delay::DelayNs;
use platform::storage_local::LocalFileStorage;
use platform::{AudioSink, LedStrip, SinkError, StreamFormat, VolumePercent};

use crate::audio::SinkAdapter;
use crate::boot::Board;

pub use audio::{EmulatorCodec, EmulatorI2s};
pub use console::{parse_line, run_console, ConsoleAction};
pub use display::{EmulatorDisplay, Framebuffer};
pub use led::EmulatorLedStrip;

/// The emulator's audio sink.
pub type EmulatorSink = SinkAdapter<EmulatorI2s, EmulatorCodec>;

/// Bring-up failures on the emulator board.
#[derive(Debug, thiserror::Error)]
pub enum EmulatorError {
    /// The host directory standing in for the card does not exist.
    #[error("music root {} is not a directory", .0.display())]
    MissingMusicRoot(PathBuf),
    /// The music root is not valid UTF-8 and cannot be mounted.
    #[error("music root {} is not valid UTF-8", .0.display())]
    NonUtf8MusicRoot(PathBuf),
    /// The sink rejected the bring-up format or level.
    #[error("audio bring-up: {0}")]
    Audio(#[from] SinkError),
}

/// Peripherals handed to the application once bring-up is done.
pub struct Peripherals {
    /// Card storage.
    pub storage: LocalFileStorage,
    /// Audio sink, configured with the default format and level.
    pub sink: EmulatorSink,
    /// LED strip, cleared.
    pub strip: EmulatorLedStrip,
    /// Screen, showing the starting text.
    pub display: EmulatorDisplay,
}

/// Emulated handheld.
pub struct EmulatorBoard {
    music_root: PathBuf,
    volume: VolumePercent,
    storage: Option<LocalFileStorage>,
    sink: EmulatorSink,
    strip: EmulatorLedStrip,
    display: EmulatorDisplay,
}

impl EmulatorBoard {
    /// Board with `music_root` as the card and `volume` as the start level.
    pub fn new(music_root: &Path, volume: VolumePercent) -> Self {
        Self {
            music_root: music_root.to_path_buf(),
            volume,
            storage: None,
            sink: SinkAdapter::new(EmulatorI2s::new(), EmulatorCodec::new()),
            strip: EmulatorLedStrip::new(platform::config::LED_COUNT),
            display: EmulatorDisplay::new(),
        }
    }

    /// Hand the brought-up peripherals to the application.
    ///
    /// Storage falls back to an unmounted root if bring-up was skipped; the
    /// controller then starts with an empty catalog.
    pub fn into_parts(self) -> Peripherals {
        let storage = self.storage.unwrap_or_else(|| {
            LocalFileStorage::new(&self.music_root.to_string_lossy())
        });
        Peripherals {
            storage,
            sink: self.sink,
            strip: self.strip,
            display: self.display,
        }
    }
}

impl Board for EmulatorBoard {
    type Error = EmulatorError;

    async fn init_display(&mut self) -> Result<(), Self::Error> {
        self.display.refresh();
        Ok(())
    }

    async fn init_touch(&mut self) -> Result<(), Self::Error> {
        tracing::info!("touch: console on stdin (n, p, t, v <0-100>, r, q)");
        Ok(())
    }

    async fn mount_storage(&mut self) -> Result<(), Self::Error> {
        if !self.music_root.is_dir() {
            return Err(EmulatorError::MissingMusicRoot(self.music_root.clone()));
        }
        let root = self
            .music_root
            .to_str()
            .ok_or_else(|| EmulatorError::NonUtf8MusicRoot(self.music_root.clone()))?;
        let storage = LocalFileStorage::new(root);
        tracing::info!(host = root, mount = storage.mount_point(), "card mounted");
        self.storage = Some(storage);
        Ok(())
    }

    async fn init_audio(&mut self) -> Result<(), Self::Error> {
        self.sink.init(StreamFormat::default()).await?;
        if self.volume != self.sink.codec().level() {
            self.sink.set_volume(self.volume).await?;
        }
        self.display.set_volume(self.volume);
        Ok(())
    }

    async fn init_ambient_light(&mut self) -> Result<(), Self::Error> {
        match self.strip.clear().await {
            Ok(()) => Ok(()),
            Err(never) => match never {},
        }
    }

    async fn init_toolkit(&mut self) -> Result<(), Self::Error> {
        self.display.refresh();
        Ok(())
    }
}

/// [`DelayNs`] on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl DelayNs for TokioDelay {
    async fn delay_ns(&mut self, ns: u32) {
        tokio::time::sleep(std::time::Duration::from_nanos(u64::from(ns))).await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::boot::{bring_up, BootStage};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_bring_up_mounts_host_directory() {
        let tmp = TempDir::new().unwrap();
        let mut board = EmulatorBoard::new(tmp.path(), VolumePercent::new(40));
        bring_up(&mut board).await.unwrap();

        let parts = board.into_parts();
        assert_eq!(parts.storage.mount_point(), "/sdcard");
        assert_eq!(parts.sink.format(), Some(StreamFormat::default()));
        assert_eq!(parts.sink.codec().level(), VolumePercent::new(40));
        assert_eq!(parts.display.screen().volume(), VolumePercent::new(40));
    }

    #[tokio::test]
    async fn test_missing_music_root_is_fatal_at_storage() {
        let tmp = TempDir::new().unwrap();
        let mut board = EmulatorBoard::new(&tmp.path().join("absent"), VolumePercent::new(70));
        let err = bring_up(&mut board).await.unwrap_err();
        assert_eq!(err.stage, BootStage::Storage);
    }
}
