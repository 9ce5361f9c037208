//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]
#![allow(clippy::arithmetic_side_effects)] // test doubles count calls freely

use embassy_time::Duration;
use embedded_graphics::{pixelcolor::Gray4, prelude::*};

use crate::*;

// ── Storage ──────────────────────────────────────────────────────────────────

/// Error returned by [`MockStorage`] and [`MockFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MockStorageError {
    /// Path does not exist
    #[error("not found")]
    NotFound,
    /// Failure injected with [`MockStorage::fail_open`] or
    /// [`MockStorage::fail_listing_after`]
    #[error("injected failure")]
    Injected,
}

/// In-memory filesystem.
///
/// Directory listings are returned in insertion order, which stands in for
/// the card's enumeration order.
#[derive(Debug, Default)]
pub struct MockStorage {
    dirs: Vec<String>,
    entries: Vec<(String, String, EntryKind)>,
    files: Vec<(String, Vec<u8>)>,
    failing: Vec<String>,
    opened: Vec<String>,
    list_fail_after: Option<usize>,
}

impl MockStorage {
    /// Empty filesystem with no directories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filesystem with an empty directory at `path`.
    pub fn with_dir(path: &str) -> Self {
        let mut storage = Self::new();
        storage.add_dir(path);
        storage
    }

    /// Create a directory.
    pub fn add_dir(&mut self, path: &str) {
        if !self.dirs.iter().any(|d| d == path) {
            self.dirs.push(path.to_owned());
        }
    }

    /// Add a regular file `name` under `dir` with `contents`.
    pub fn add_file(&mut self, dir: &str, name: &str, contents: &[u8]) {
        self.add_dir(dir);
        self.entries
            .push((dir.to_owned(), name.to_owned(), EntryKind::File));
        self.files
            .push((format!("{}/{name}", dir.trim_end_matches('/')), contents.to_vec()));
    }

    /// Add a listing entry of any kind without backing contents.
    pub fn add_entry(&mut self, dir: &str, name: &str, kind: EntryKind) {
        self.add_dir(dir);
        self.entries.push((dir.to_owned(), name.to_owned(), kind));
    }

    /// Make every later `open_file(path)` fail.
    pub fn fail_open(&mut self, path: &str) {
        self.failing.push(path.to_owned());
    }

    /// Make `list_dir` report `entries` entries and then fail, as a card
    /// with a corrupt directory block would.
    pub fn fail_listing_after(&mut self, entries: usize) {
        self.list_fail_after = Some(entries);
    }

    /// Let `open_file(path)` succeed again.
    pub fn heal(&mut self, path: &str) {
        self.failing.retain(|p| p != path);
    }

    /// Remove every entry and file under `dir`, keeping the directory.
    pub fn clear_dir(&mut self, dir: &str) {
        let prefix = format!("{}/", dir.trim_end_matches('/'));
        self.entries.retain(|(d, _, _)| d != dir);
        self.files.retain(|(p, _)| !p.starts_with(&prefix));
    }

    /// Every path passed to `open_file`, successful or not, in call order.
    pub fn opened(&self) -> &[String] {
        &self.opened
    }
}

impl Storage for MockStorage {
    type Error = MockStorageError;
    type File = MockFile;

    async fn open_file(&mut self, path: &str) -> Result<Self::File, Self::Error> {
        self.opened.push(path.to_owned());
        if self.failing.iter().any(|p| p == path) {
            return Err(MockStorageError::Injected);
        }
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, data)| MockFile::new(data.clone()))
            .ok_or(MockStorageError::NotFound)
    }

    async fn exists(&mut self, path: &str) -> Result<bool, Self::Error> {
        Ok(self.dirs.iter().any(|d| d == path) || self.files.iter().any(|(p, _)| p == path))
    }

    async fn list_dir<V>(&mut self, path: &str, mut visit: V) -> Result<(), Self::Error>
    where
        V: FnMut(DirEntry<'_>) -> Visit,
    {
        if !self.dirs.iter().any(|d| d == path) {
            return Err(MockStorageError::NotFound);
        }
        let mut reported = 0usize;
        for (dir, name, kind) in &self.entries {
            if dir != path {
                continue;
            }
            if self.list_fail_after == Some(reported) {
                return Err(MockStorageError::Injected);
            }
            reported += 1;
            if visit(DirEntry { name, kind: *kind }) == Visit::Stop {
                break;
            }
        }
        Ok(())
    }
}

/// In-memory file handle.
#[derive(Debug, Clone)]
pub struct MockFile {
    data: Vec<u8>,
    pos: usize,
}

impl MockFile {
    /// File with the given contents, positioned at the start.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Full file contents, independent of the read offset.
    pub fn contents(&self) -> &[u8] {
        &self.data
    }
}

impl File for MockFile {
    type Error = MockStorageError;

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = self.data.get(self.pos..).unwrap_or_default();
        let n = remaining.len().min(buf.len());
        if let (Some(dst), Some(src)) = (buf.get_mut(..n), remaining.get(..n)) {
            dst.copy_from_slice(src);
        }
        self.pos += n;
        Ok(n)
    }

    async fn seek(&mut self, pos: u64) -> Result<u64, Self::Error> {
        self.pos = usize::try_from(pos).unwrap_or(usize::MAX).min(self.data.len());
        Ok(self.pos as u64)
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

// ── Audio ────────────────────────────────────────────────────────────────────

/// Error produced by the audio mocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("mock hardware error")]
pub struct MockHwError;

/// One call observed by [`MockI2s`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2sOp {
    /// `enable()`
    Enable,
    /// `disable()`
    Disable,
    /// `reconfig_slot()`
    Slot(SlotConfig),
    /// `reconfig_clock()`
    Clock(ClockConfig),
    /// `write()` with the requested length
    Write(usize),
}

/// Which [`MockI2s`] call should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2sStep {
    /// `enable()`
    Enable,
    /// `disable()`
    Disable,
    /// `reconfig_slot()`
    Slot,
    /// `reconfig_clock()`
    Clock,
    /// `write()`
    Write,
}

/// Recording I2S channel.
#[derive(Debug, Default)]
pub struct MockI2s {
    ops: Vec<I2sOp>,
    fail_on: Option<I2sStep>,
    accept_limit: Option<usize>,
    enabled: bool,
    bytes_written: usize,
}

impl MockI2s {
    /// Channel that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `step` return a hardware error from now on.
    pub fn fail_on(&mut self, step: I2sStep) {
        self.fail_on = Some(step);
    }

    /// Accept at most `limit` bytes per write, then report a timeout.
    pub fn time_out_after(&mut self, limit: usize) {
        self.accept_limit = Some(limit);
    }

    /// Calls observed so far.
    pub fn ops(&self) -> &[I2sOp] {
        &self.ops
    }

    /// Whether the channel is currently enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Total bytes accepted by `write`.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    fn check(&self, step: I2sStep) -> Result<(), MockHwError> {
        if self.fail_on == Some(step) {
            Err(MockHwError)
        } else {
            Ok(())
        }
    }
}

impl I2sTx for MockI2s {
    type Error = MockHwError;

    async fn enable(&mut self) -> Result<(), Self::Error> {
        self.ops.push(I2sOp::Enable);
        self.check(I2sStep::Enable)?;
        self.enabled = true;
        Ok(())
    }

    async fn disable(&mut self) -> Result<(), Self::Error> {
        self.ops.push(I2sOp::Disable);
        self.check(I2sStep::Disable)?;
        self.enabled = false;
        Ok(())
    }

    async fn reconfig_slot(&mut self, slot: SlotConfig) -> Result<(), Self::Error> {
        self.ops.push(I2sOp::Slot(slot));
        self.check(I2sStep::Slot)
    }

    async fn reconfig_clock(&mut self, clock: ClockConfig) -> Result<(), Self::Error> {
        self.ops.push(I2sOp::Clock(clock));
        self.check(I2sStep::Clock)
    }

    async fn write(&mut self, buf: &[u8], _timeout: Duration) -> Result<usize, TxError<Self::Error>> {
        self.ops.push(I2sOp::Write(buf.len()));
        self.check(I2sStep::Write).map_err(TxError::Hardware)?;
        match self.accept_limit {
            Some(limit) if buf.len() > limit => {
                self.bytes_written += limit;
                Err(TxError::Timeout { written: limit })
            }
            _ => {
                self.bytes_written += buf.len();
                Ok(buf.len())
            }
        }
    }
}

/// Recording codec volume control.
#[derive(Debug, Default)]
pub struct MockCodec {
    history: Vec<VolumePercent>,
    fail: bool,
}

impl MockCodec {
    /// Codec that accepts every level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later `set_volume` fail.
    pub fn fail(&mut self) {
        self.fail = true;
    }

    /// Levels applied so far, oldest first.
    pub fn history(&self) -> &[VolumePercent] {
        &self.history
    }

    /// Most recent level.
    pub fn volume(&self) -> Option<VolumePercent> {
        self.history.last().copied()
    }
}

impl CodecVolume for MockCodec {
    type Error = MockHwError;

    async fn set_volume(&mut self, volume: VolumePercent) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockHwError);
        }
        self.history.push(volume);
        Ok(())
    }
}

/// Recording [`AudioSink`] for tests above the adapter layer.
#[derive(Debug, Default)]
pub struct MockSink {
    /// Every chunk length written.
    pub writes: Vec<usize>,
    /// Every format applied.
    pub formats: Vec<StreamFormat>,
    /// Every mute change.
    pub mutes: Vec<bool>,
    /// Every direct volume change.
    pub volumes: Vec<VolumePercent>,
}

impl MockSink {
    /// Sink that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes written.
    pub fn bytes_written(&self) -> usize {
        self.writes.iter().sum()
    }
}

impl AudioSink for MockSink {
    async fn write(&mut self, buf: &[u8], _timeout: Duration) -> Result<usize, SinkError> {
        self.writes.push(buf.len());
        Ok(buf.len())
    }

    async fn reconfigure(&mut self, format: StreamFormat) -> Result<(), SinkError> {
        self.formats.push(format);
        Ok(())
    }

    async fn set_mute(&mut self, muted: bool) -> Result<(), SinkError> {
        self.mutes.push(muted);
        Ok(())
    }

    async fn set_volume(&mut self, volume: VolumePercent) -> Result<(), SinkError> {
        self.volumes.push(volume);
        Ok(())
    }
}

// ── Display ──────────────────────────────────────────────────────────────────

/// One notification observed by [`RecordingDisplay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCall {
    /// `set_filename`
    Filename(String),
    /// `set_play_icon`
    PlayIcon(bool),
}

/// [`PlayerDisplay`] that records every notification.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    calls: Vec<DisplayCall>,
}

impl RecordingDisplay {
    /// Display with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications so far, oldest first.
    pub fn calls(&self) -> &[DisplayCall] {
        &self.calls
    }

    /// Most recent filename shown.
    pub fn filename(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|c| match c {
            DisplayCall::Filename(name) => Some(name.as_str()),
            DisplayCall::PlayIcon(_) => None,
        })
    }

    /// Most recent play icon state.
    pub fn play_icon(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            DisplayCall::PlayIcon(playing) => Some(*playing),
            DisplayCall::Filename(_) => None,
        })
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl PlayerDisplay for RecordingDisplay {
    fn set_filename(&mut self, name: &str) {
        self.calls.push(DisplayCall::Filename(name.to_owned()));
    }

    fn set_play_icon(&mut self, playing: bool) {
        self.calls.push(DisplayCall::PlayIcon(playing));
    }
}

/// Gray4 framebuffer for rendering tests.
///
/// Pixels outside the frame are dropped, like a clipped panel.
pub struct MockDisplay {
    width: u32,
    height: u32,
    pixels: Vec<Gray4>,
}

impl MockDisplay {
    /// Create a blank (black) framebuffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Gray4::BLACK; (width as usize) * (height as usize)],
        }
    }

    /// Colour at `(x, y)`, `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Gray4> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get((y as usize) * (self.width as usize) + (x as usize))
            .copied()
    }

    /// Number of pixels that are not black.
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| **p != Gray4::BLACK).count()
    }

    /// Number of non-black pixels inside the given rectangle.
    pub fn lit_pixels_in(&self, x0: u32, y0: u32, w: u32, h: u32) -> usize {
        let mut count = 0;
        for y in y0..(y0 + h).min(self.height) {
            for x in x0..(x0 + w).min(self.width) {
                if self.pixel(x, y).is_some_and(|p| p != Gray4::BLACK) {
                    count += 1;
                }
            }
        }
        count
    }
}

impl DrawTarget for MockDisplay {
    type Color = Gray4;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x < self.width && y < self.height {
                let index = (y as usize) * (self.width as usize) + (x as usize);
                if let Some(slot) = self.pixels.get_mut(index) {
                    *slot = color;
                }
            }
        }
        Ok(())
    }
}

impl OriginDimensions for MockDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

// ── LED strip ────────────────────────────────────────────────────────────────

/// Recording LED strip.
#[derive(Debug)]
pub struct MockLedStrip {
    pixels: Vec<Rgb>,
    frames: Vec<Vec<Rgb>>,
}

impl MockLedStrip {
    /// Strip with `len` LEDs, all off.
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![Rgb::OFF; len],
            frames: Vec::new(),
        }
    }

    /// Every latched frame, oldest first.
    pub fn frames(&self) -> &[Vec<Rgb>] {
        &self.frames
    }

    /// Number of `refresh`/`clear` latches.
    pub fn refresh_count(&self) -> usize {
        self.frames.len()
    }
}

impl LedStrip for MockLedStrip {
    type Error = MockHwError;

    fn len(&self) -> usize {
        self.pixels.len()
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<(), Self::Error> {
        let slot = self.pixels.get_mut(index).ok_or(MockHwError)?;
        *slot = color;
        Ok(())
    }

    async fn refresh(&mut self) -> Result<(), Self::Error> {
        self.frames.push(self.pixels.clone());
        Ok(())
    }

    async fn clear(&mut self) -> Result<(), Self::Error> {
        self.pixels.fill(Rgb::OFF);
        self.frames.push(self.pixels.clone());
        Ok(())
    }
}
