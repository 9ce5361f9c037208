//! Playback controller.
//!
//! Owns the track catalog, the cursor and the mirrored playback state. All
//! mutation funnels through `&mut self`, so a single task owns the cursor and
//! no extra locking is needed for it. The display is shared with the UI task
//! and is only touched inside a scoped lock.
//!
//! | Input | Effect |
//! |---|---|
//! | `play(i)` | cursor = i, open track, engine play, filename + pause glyph |
//! | `pause()` / `resume()` | forwarded to the engine, UI waits for its event |
//! | `next()` / `previous()` | cyclic step, then `play` |
//! | event `Playing` | log only |
//! | event `Paused` | play glyph |
//! | event `Idle` | cyclic step, then `play` |
//!
//! Events name the stream they describe. Anything not about the stream the
//! controller started last is stale and ignored.

use core::convert::Infallible;

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_sync::mutex::Mutex;
use library::{ScanError, Scanner, TrackCatalog};
use platform::config::{MAX_TRACKS, NO_TRACKS_TEXT};
use platform::{PlayerDisplay, Storage};

use crate::command::Command;
use crate::engine::{DecodeEngine, EngineError};
use crate::state::{EngineEvent, PlaybackState, StreamId};

/// Why a transport command did nothing.
///
/// Every variant is non-fatal. Callers that only care about side effects can
/// ignore the result; the failure has already been logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// The catalog has no tracks.
    #[error("catalog is empty")]
    EmptyCatalog,
    /// The requested index is past the end of the catalog.
    #[error("track {index} out of range for catalog of {len}")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Catalog length.
        len: usize,
    },
    /// The selected track could not be opened.
    #[error("failed to open track")]
    Open,
    /// The engine refused the command.
    #[error("engine: {0}")]
    Engine(EngineError),
}

/// Index after `cursor` in a catalog of `len`, wrapping to 0.
///
/// Returns 0 for an empty catalog.
pub fn next_index(cursor: usize, len: usize) -> usize {
    cursor
        .checked_add(1)
        .and_then(|next| next.checked_rem(len))
        .unwrap_or(0)
}

/// Index before `cursor` in a catalog of `len`, wrapping to the last entry.
///
/// Returns 0 for an empty catalog.
pub fn previous_index(cursor: usize, len: usize) -> usize {
    let last = len.saturating_sub(1);
    match cursor.checked_sub(1) {
        Some(prev) => prev.min(last),
        None => last,
    }
}

/// The playback controller.
///
/// - `M`: raw mutex guarding the shared display
/// - `S`: storage the catalog is scanned from and tracks are opened on
/// - `E`: decode engine consuming `S::File`
/// - `D`: display receiving now-playing notifications
pub struct PlaybackController<'d, M, S, E, D>
where
    M: RawMutex,
    S: Storage,
    E: DecodeEngine<S::File>,
    D: PlayerDisplay,
{
    storage: S,
    engine: E,
    display: &'d Mutex<M, D>,
    root: &'d str,
    catalog: TrackCatalog,
    cursor: Option<usize>,
    state: PlaybackState,
    stream: Option<StreamId>,
    replay_cursor: bool,
}

impl<'d, M, S, E, D> PlaybackController<'d, M, S, E, D>
where
    M: RawMutex,
    S: Storage,
    E: DecodeEngine<S::File>,
    D: PlayerDisplay,
{
    /// Create a controller with an empty catalog. Call [`init`](Self::init)
    /// before issuing commands.
    pub fn new(storage: S, engine: E, display: &'d Mutex<M, D>, root: &'d str) -> Self {
        Self {
            storage,
            engine,
            display,
            root,
            catalog: TrackCatalog::new(),
            cursor: None,
            state: PlaybackState::Stopped,
            stream: None,
            replay_cursor: false,
        }
    }

    /// Scan the catalog and put the initial text on the display.
    ///
    /// An unreadable root is not fatal: the controller starts with an empty
    /// catalog and the display says so. Returns the number of tracks found.
    pub async fn init(&mut self) -> usize {
        tracing::info!(root = self.root, capacity = MAX_TRACKS, "initializing playback controller");
        self.rescan().await
    }

    /// Rebuild the catalog wholesale and reset the cursor.
    ///
    /// The cursor moves to the first track, or becomes inactive when nothing
    /// was found. The label shows the first track's name or the no-tracks
    /// text. Returns the number of tracks found.
    ///
    /// A stream that is already playing is left running. When it ends, the
    /// `Idle` plays the new first track instead of stepping past it.
    pub async fn rescan(&mut self) -> usize {
        self.catalog = match Scanner::scan::<_, MAX_TRACKS>(&mut self.storage, self.root).await {
            Ok(report) => report.catalog,
            Err(ScanError::Unavailable) => {
                tracing::warn!(root = self.root, "catalog unavailable, starting empty");
                TrackCatalog::new()
            }
        };
        self.cursor = if self.catalog.is_empty() { None } else { Some(0) };
        self.replay_cursor = self.cursor.is_some() && self.state != PlaybackState::Stopped;

        let label = self.catalog.name(0).unwrap_or(NO_TRACKS_TEXT);
        self.display.lock().await.set_filename(label);

        tracing::info!(tracks = self.catalog.len(), "catalog ready");
        self.catalog.len()
    }

    /// Select the track at `index` and start it.
    ///
    /// A no-op when the catalog is empty or `index` is out of range. The
    /// cursor moves to `index` before the file is opened; if opening fails
    /// the command is abandoned there, with no retry and no skip.
    pub async fn play(&mut self, index: usize) -> Result<(), ControllerError> {
        let len = self.catalog.len();
        if len == 0 {
            tracing::debug!("play ignored: catalog empty");
            return Err(ControllerError::EmptyCatalog);
        }
        let Some(track) = self.catalog.get(index) else {
            tracing::debug!(index, len, "play ignored: index out of range");
            return Err(ControllerError::OutOfRange { index, len });
        };

        self.cursor = Some(index);

        let file = match self.storage.open_file(track.path()).await {
            Ok(file) => file,
            Err(e) => {
                tracing::error!(path = track.path(), error = %e, "failed to open track");
                return Err(ControllerError::Open);
            }
        };

        let stream = match self.engine.play(file).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::error!(path = track.path(), error = %e, "engine refused track");
                return Err(ControllerError::Engine(e));
            }
        };
        self.stream = Some(stream);
        self.replay_cursor = false;
        self.state = PlaybackState::Playing;
        tracing::info!(index, path = track.path(), stream = stream.get(), "now playing");

        {
            let mut display = self.display.lock().await;
            display.set_filename(track.name());
            display.set_play_icon(true);
        }
        Ok(())
    }

    /// Advance the cursor cyclically and play.
    pub async fn next(&mut self) -> Result<(), ControllerError> {
        let len = self.catalog.len();
        if len == 0 {
            return Err(ControllerError::EmptyCatalog);
        }
        let target = next_index(self.cursor.unwrap_or(0), len);
        self.play(target).await
    }

    /// Step the cursor back cyclically and play.
    pub async fn previous(&mut self) -> Result<(), ControllerError> {
        let len = self.catalog.len();
        if len == 0 {
            return Err(ControllerError::EmptyCatalog);
        }
        let target = previous_index(self.cursor.unwrap_or(0), len);
        self.play(target).await
    }

    /// Ask the engine to pause. The display follows the engine's event.
    pub async fn pause(&mut self) -> Result<(), ControllerError> {
        if self.catalog.is_empty() {
            return Err(ControllerError::EmptyCatalog);
        }
        self.engine.pause().await.map_err(|e| {
            tracing::error!(error = %e, "pause failed");
            ControllerError::Engine(e)
        })
    }

    /// Ask the engine to resume.
    pub async fn resume(&mut self) -> Result<(), ControllerError> {
        if self.catalog.is_empty() {
            return Err(ControllerError::EmptyCatalog);
        }
        self.engine.resume().await.map_err(|e| {
            tracing::error!(error = %e, "resume failed");
            ControllerError::Engine(e)
        })
    }

    /// Pause when playing, resume when paused, otherwise play the cursor.
    ///
    /// Decided on the engine's own state, not the mirrored one.
    pub async fn toggle_play_pause(&mut self) -> Result<(), ControllerError> {
        if self.catalog.is_empty() {
            return Err(ControllerError::EmptyCatalog);
        }
        match self.engine.state() {
            PlaybackState::Playing => self.pause().await,
            PlaybackState::Paused => self.resume().await,
            PlaybackState::Stopped => self.play(self.cursor.unwrap_or(0)).await,
        }
    }

    /// React to a status event from the engine.
    ///
    /// Events about any stream other than the one started last are dropped:
    /// an `Idle` queued behind a user's `next` must not advance a second time.
    pub async fn handle_event(&mut self, event: EngineEvent) -> Result<(), ControllerError> {
        let stream = event.stream();
        if self.stream != Some(stream) {
            tracing::debug!(event = event.as_str(), stream = stream.get(), "stale engine event ignored");
            return Ok(());
        }
        tracing::debug!(event = event.as_str(), stream = stream.get(), "engine event");
        self.state = self.state.observe(event);
        match event {
            EngineEvent::Playing(_) => Ok(()),
            EngineEvent::Paused(_) => {
                self.display.lock().await.set_play_icon(false);
                Ok(())
            }
            EngineEvent::Idle(_) if self.replay_cursor => {
                self.replay_cursor = false;
                self.play(self.cursor.unwrap_or(0)).await
            }
            EngineEvent::Idle(_) => self.next().await,
        }
    }

    /// Run one command.
    pub async fn execute(&mut self, command: Command) -> Result<(), ControllerError> {
        tracing::debug!(command = command.as_str(), "command");
        match command {
            Command::Play(index) => self.play(index).await,
            Command::Pause => self.pause().await,
            Command::Resume => self.resume().await,
            Command::TogglePlayPause => self.toggle_play_pause().await,
            Command::Next => self.next().await,
            Command::Previous => self.previous().await,
            Command::Rescan => {
                self.rescan().await;
                Ok(())
            }
        }
    }

    /// Serve commands and engine events forever, one at a time.
    ///
    /// This is the only place the controller is driven from once the system
    /// is up, which keeps cursor mutation single-owner.
    pub async fn run<CM, const C: usize, const V: usize>(
        &mut self,
        commands: Receiver<'_, CM, Command, C>,
        events: Receiver<'_, CM, EngineEvent, V>,
    ) -> Infallible
    where
        CM: RawMutex,
    {
        loop {
            let result = match select(commands.receive(), events.receive()).await {
                Either::First(command) => self.execute(command).await,
                Either::Second(event) => self.handle_event(event).await,
            };
            if let Err(e) = result {
                tracing::debug!(error = %e, "command had no effect");
            }
        }
    }

    /// Current cursor, `None` while the catalog is empty.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Playback state as last reported by the engine.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Stream started by the last successful `play`, if any.
    pub fn stream(&self) -> Option<StreamId> {
        self.stream
    }

    /// The current catalog.
    pub fn catalog(&self) -> &TrackCatalog {
        &self.catalog
    }

    /// The engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
