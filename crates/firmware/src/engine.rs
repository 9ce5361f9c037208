//! Simulated decode engine.
//!
//! Stands in for the board's MP3 decoder: the open file's bytes are streamed
//! to the sink unchanged, as PCM in the engine's output format. The engine is
//! split in two halves that share an [`EngineCore`]:
//!
//! - [`SimulatedEngine`], the command handle the playback controller owns
//!   (implements [`DecodeEngine`]). Commands only update shared state and
//!   wake the pump; they never touch the sink.
//! - [`EngineCore::run`], the pump, running on the engine's own task. It
//!   owns the open file, pushes chunks to the sink and emits
//!   [`EngineEvent`]s back to the controller.
//!
//! Starting a track hands out a fresh [`StreamId`] and every event the pump
//! sends carries the id of the stream it describes. The pump drops the
//! stream it holds as soon as a newer one is started, and an end-of-file
//! from a superseded stream never produces `Idle`.

use core::cell::RefCell;
use core::convert::Infallible;

use embassy_futures::yield_now;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::channel::Sender;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::Duration;
use platform::config::SINK_WRITE_TIMEOUT_MS;
use platform::{AudioSink, File, SinkError, StreamFormat};
use playback::{DecodeEngine, EngineConfig, EngineError, EngineEvent, PlaybackState, StreamId};

/// Bytes pulled from the file and pushed to the sink per step.
pub const CHUNK_BYTES: usize = 1024;

struct Slot<F> {
    state: PlaybackState,
    incoming: Option<F>,
    stream: StreamId,
}

/// State shared between the engine handle and its pump.
pub struct EngineCore<M: RawMutex, F> {
    slot: BlockingMutex<M, RefCell<Slot<F>>>,
    wake: Signal<M, ()>,
    config: EngineConfig,
}

impl<M: RawMutex, F: File> EngineCore<M, F> {
    /// Create an idle engine with the given scheduling hints.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            slot: BlockingMutex::new(RefCell::new(Slot {
                state: PlaybackState::Stopped,
                incoming: None,
                stream: StreamId::default(),
            })),
            wake: Signal::new(),
            config,
        }
    }

    /// Scheduling hints the engine was constructed with.
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// The engine's own playback state.
    pub fn state(&self) -> PlaybackState {
        self.slot.lock(|slot| slot.borrow().state)
    }

    /// Id of the most recently started stream.
    pub fn stream(&self) -> StreamId {
        self.slot.lock(|slot| slot.borrow().stream)
    }

    fn start(&self, file: F) -> StreamId {
        let stream = self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            slot.stream = slot.stream.next();
            slot.incoming = Some(file);
            slot.state = PlaybackState::Playing;
            slot.stream
        });
        self.wake.signal(());
        stream
    }

    fn transition(&self, from: PlaybackState, to: PlaybackState) -> Result<(), EngineError> {
        let moved = self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.state == from {
                slot.state = to;
                true
            } else {
                false
            }
        });
        if !moved {
            return Err(EngineError::Rejected);
        }
        self.wake.signal(());
        Ok(())
    }

    /// Mark `stream` finished. `false` if a newer track has started since.
    fn finish(&self, stream: StreamId) -> bool {
        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.stream == stream && slot.incoming.is_none() {
                slot.state = PlaybackState::Stopped;
                true
            } else {
                false
            }
        })
    }

    fn poll(&self) -> (PlaybackState, Option<(StreamId, F)>) {
        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            let stream = slot.stream;
            let incoming = slot.incoming.take().map(|file| (stream, file));
            (slot.state, incoming)
        })
    }

    /// The engine pump. Runs forever on the engine's task.
    ///
    /// Each new track reconfigures the sink to `format` before the first
    /// chunk. A write timeout drops the rest of that chunk and carries on; a
    /// sink fault or failed reconfigure stops the track without `Idle`, so a
    /// dead output does not spin through the catalog. A read error ends the
    /// track like end-of-file.
    pub async fn run<SM, A, const N: usize>(
        &self,
        sink: &Mutex<SM, A>,
        events: Sender<'_, M, EngineEvent, N>,
        format: StreamFormat,
    ) -> Infallible
    where
        SM: RawMutex,
        A: AudioSink,
    {
        let timeout = Duration::from_millis(SINK_WRITE_TIMEOUT_MS);
        let mut chunk = [0u8; CHUNK_BYTES];
        let mut current: Option<(StreamId, F)> = None;
        let mut announced = PlaybackState::Stopped;

        tracing::info!(
            priority = self.config.priority,
            core = self.config.core,
            "decode engine started"
        );
        loop {
            let (state, incoming) = self.poll();

            if let Some((stream, file)) = incoming {
                tracing::debug!(stream = stream.get(), size = file.size(), "engine: new stream");
                current = None;
                announced = PlaybackState::Stopped;
                if let Err(e) = sink.lock().await.reconfigure(format).await {
                    tracing::error!(error = %e, "engine: output reconfigure failed");
                    self.finish(stream);
                    continue;
                }
                current = Some((stream, file));
            }

            let Some((stream, file)) = current.as_mut() else {
                self.wake.wait().await;
                continue;
            };
            let stream = *stream;

            if state != announced {
                let event = match state {
                    PlaybackState::Playing => Some(EngineEvent::Playing(stream)),
                    PlaybackState::Paused => Some(EngineEvent::Paused(stream)),
                    PlaybackState::Stopped => None,
                };
                if let Some(event) = event {
                    events.send(event).await;
                }
                announced = state;
            }
            if state != PlaybackState::Playing {
                self.wake.wait().await;
                continue;
            }

            let read = match file.read(&mut chunk).await {
                Ok(read) => read,
                Err(e) => {
                    tracing::warn!(error = %e, "engine: read failed, ending track");
                    0
                }
            };
            if read == 0 {
                current = None;
                announced = PlaybackState::Stopped;
                if self.finish(stream) {
                    tracing::debug!(stream = stream.get(), "engine: end of stream");
                    events.send(EngineEvent::Idle(stream)).await;
                }
                continue;
            }

            let pcm = chunk.get(..read).unwrap_or_default();
            match sink.lock().await.write(pcm, timeout).await {
                Ok(_) => {}
                Err(SinkError::Timeout { written }) => {
                    tracing::warn!(written, requested = read, "engine: output underrun");
                }
                Err(e) => {
                    tracing::error!(error = %e, "engine: output failed, stopping track");
                    current = None;
                    announced = PlaybackState::Stopped;
                    self.finish(stream);
                }
            }
            yield_now().await;
        }
    }
}

/// Command handle for an [`EngineCore`], owned by the playback controller.
pub struct SimulatedEngine<'a, M: RawMutex, F> {
    core: &'a EngineCore<M, F>,
}

impl<'a, M: RawMutex, F: File> SimulatedEngine<'a, M, F> {
    /// Create a handle on `core`.
    pub fn new(core: &'a EngineCore<M, F>) -> Self {
        Self { core }
    }
}

impl<M: RawMutex, F: File> DecodeEngine<F> for SimulatedEngine<'_, M, F> {
    async fn play(&mut self, file: F) -> Result<StreamId, EngineError> {
        let stream = self.core.start(file);
        tracing::debug!(stream = stream.get(), "engine: play");
        Ok(stream)
    }

    async fn pause(&mut self) -> Result<(), EngineError> {
        self.core
            .transition(PlaybackState::Playing, PlaybackState::Paused)
    }

    async fn resume(&mut self) -> Result<(), EngineError> {
        self.core
            .transition(PlaybackState::Paused, PlaybackState::Playing)
    }

    fn state(&self) -> PlaybackState {
        self.core.state()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use embassy_futures::select::{select, Either};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;
    use platform::mocks::{MockFile, MockSink};

    type Core = EngineCore<NoopRawMutex, MockFile>;
    type Events = Channel<NoopRawMutex, EngineEvent, 8>;

    fn track(len: usize) -> MockFile {
        MockFile::new(vec![0x55; len])
    }

    #[tokio::test]
    async fn test_commands_follow_state() {
        let core = Core::new(EngineConfig::default());
        let mut engine = SimulatedEngine::new(&core);

        assert_eq!(engine.pause().await, Err(EngineError::Rejected));
        assert_eq!(engine.resume().await, Err(EngineError::Rejected));

        let first = engine.play(track(4)).await.unwrap();
        assert_eq!(engine.state(), PlaybackState::Playing);
        assert_eq!(core.stream(), first);
        assert_ne!(engine.play(track(4)).await.unwrap(), first);

        engine.pause().await.unwrap();
        assert_eq!(engine.state(), PlaybackState::Paused);
        assert_eq!(engine.pause().await, Err(EngineError::Rejected));
        engine.resume().await.unwrap();
        assert_eq!(engine.state(), PlaybackState::Playing);
    }

    #[tokio::test]
    async fn test_track_streams_to_sink_then_idles() {
        let core = Core::new(EngineConfig::default());
        let events = Events::new();
        let sink = Mutex::<NoopRawMutex, _>::new(MockSink::new());
        let mut engine = SimulatedEngine::new(&core);
        let id = engine.play(track(CHUNK_BYTES * 2 + 10)).await.unwrap();

        let observe = async {
            let first = events.receive().await;
            let second = events.receive().await;
            (first, second)
        };
        let seen = match select(
            core.run(&sink, events.sender(), StreamFormat::default()),
            observe,
        )
        .await
        {
            Either::First(never) => match never {},
            Either::Second(seen) => seen,
        };

        assert_eq!(seen, (EngineEvent::Playing(id), EngineEvent::Idle(id)));
        let sink = sink.lock().await;
        assert_eq!(sink.writes, [CHUNK_BYTES, CHUNK_BYTES, 10]);
        assert_eq!(sink.formats, [StreamFormat::default()]);
        assert_eq!(core.state(), PlaybackState::Stopped);
    }

    #[tokio::test]
    async fn test_new_track_supersedes_without_idle() {
        let core = Core::new(EngineConfig::default());
        let events = Events::new();
        let sink = Mutex::<NoopRawMutex, _>::new(MockSink::new());
        let mut engine = SimulatedEngine::new(&core);
        let old = engine.play(track(CHUNK_BYTES * 64)).await.unwrap();

        let script = async {
            let mut seen = std::vec::Vec::new();
            seen.push(events.receive().await);
            let new = engine.play(track(8)).await.unwrap();
            seen.push(events.receive().await);
            seen.push(events.receive().await);
            (new, seen)
        };
        let (new, seen) = match select(
            core.run(&sink, events.sender(), StreamFormat::default()),
            script,
        )
        .await
        {
            Either::First(never) => match never {},
            Either::Second(result) => result,
        };

        assert_eq!(
            seen,
            [EngineEvent::Playing(old), EngineEvent::Playing(new), EngineEvent::Idle(new)]
        );
        let sink = sink.lock().await;
        assert_eq!(sink.formats.len(), 2);
        assert!(sink.bytes_written() < CHUNK_BYTES * 64);
        assert_eq!(sink.writes.last(), Some(&8));
        assert!(events.try_receive().is_err());
    }

    #[tokio::test]
    async fn test_pause_holds_output_until_resume() {
        let core = Core::new(EngineConfig::default());
        let events = Events::new();
        let sink = Mutex::<NoopRawMutex, _>::new(MockSink::new());
        let mut engine = SimulatedEngine::new(&core);
        let id = engine.play(track(CHUNK_BYTES * 8)).await.unwrap();

        let script = async {
            assert_eq!(events.receive().await, EngineEvent::Playing(id));
            engine.pause().await.unwrap();
            assert_eq!(events.receive().await, EngineEvent::Paused(id));
            let held = sink.lock().await.bytes_written();
            for _ in 0..16 {
                tokio::task::yield_now().await;
            }
            assert_eq!(sink.lock().await.bytes_written(), held);

            engine.resume().await.unwrap();
            assert_eq!(events.receive().await, EngineEvent::Playing(id));
            assert_eq!(events.receive().await, EngineEvent::Idle(id));
        };
        match select(core.run(&sink, events.sender(), StreamFormat::default()), script).await {
            Either::First(never) => match never {},
            Either::Second(()) => {}
        }
        assert_eq!(sink.lock().await.bytes_written(), CHUNK_BYTES * 8);
    }
}
