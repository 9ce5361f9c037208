//! Shared test doubles for controller tests.

#![allow(dead_code)]

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use platform::config::MOUNT_POINT;
use platform::mocks::{MockFile, MockStorage, RecordingDisplay};
use playback::{DecodeEngine, EngineError, PlaybackController, PlaybackState, StreamId};

/// One command observed by [`MockEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    /// `play` with the file's contents (tests store the name there).
    Play(String),
    Pause,
    Resume,
}

/// Engine that records commands and follows a simple state machine.
#[derive(Debug, Default)]
pub struct MockEngine {
    pub calls: Vec<EngineCall>,
    pub state: PlaybackState,
    pub refuse: bool,
    /// Id handed out by the last successful `play`.
    pub stream: StreamId,
}

impl MockEngine {
    pub fn plays(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EngineCall::Play(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DecodeEngine<MockFile> for MockEngine {
    async fn play(&mut self, file: MockFile) -> Result<StreamId, EngineError> {
        if self.refuse {
            return Err(EngineError::Rejected);
        }
        let name = String::from_utf8_lossy(file.contents()).into_owned();
        self.calls.push(EngineCall::Play(name));
        self.state = PlaybackState::Playing;
        self.stream = self.stream.next();
        Ok(self.stream)
    }

    async fn pause(&mut self) -> Result<(), EngineError> {
        self.calls.push(EngineCall::Pause);
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
        Ok(())
    }

    async fn resume(&mut self) -> Result<(), EngineError> {
        self.calls.push(EngineCall::Resume);
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
        Ok(())
    }

    fn state(&self) -> PlaybackState {
        self.state
    }
}

pub type Display = Mutex<NoopRawMutex, RecordingDisplay>;
pub type Controller<'d> =
    PlaybackController<'d, NoopRawMutex, MockStorage, MockEngine, RecordingDisplay>;

/// Card with one file per name; each file's contents is its name.
pub fn card_with(names: &[&str]) -> MockStorage {
    let mut storage = MockStorage::with_dir(MOUNT_POINT);
    for name in names {
        storage.add_file(MOUNT_POINT, name, name.as_bytes());
    }
    storage
}

/// Card with `n` tracks named `0.mp3`, `1.mp3`, ...
pub fn card_of(n: usize) -> MockStorage {
    let names: Vec<String> = (0..n).map(|i| format!("{i}.mp3")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    card_with(&refs)
}

pub fn display() -> Display {
    Mutex::new(RecordingDisplay::new())
}

pub fn controller<'d>(storage: MockStorage, display: &'d Display) -> Controller<'d> {
    PlaybackController::new(storage, MockEngine::default(), display, MOUNT_POINT)
}
