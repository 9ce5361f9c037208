//! Audio subsystem: the sink adapter between the decode engine and the board.
//!
//! # Dependency Injection
//!
//! The engine targets the [`platform::AudioSink`] trait. The adapter binds it
//! to whichever I2S channel and codec the board provides:
//!
//! ```rust,ignore
//! // Hardware:
//! let sink = SinkAdapter::new(i2s_tx, codec);
//! // Emulator:
//! let sink = SinkAdapter::new(EmulatorI2s::new(), EmulatorCodec::new());
//! // Tests:
//! let sink = SinkAdapter::new(MockI2s::new(), MockCodec::new());
//! ```
//!
//! No other code touches the I2S channel or the codec volume register.

pub mod sink;

pub use sink::SinkAdapter;
