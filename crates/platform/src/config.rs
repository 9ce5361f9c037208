//! Application configuration and constants
//!
//! Central configuration values used across the workspace. Board-specific
//! values (mount point, codec defaults, LED count) live here so feature
//! crates never hardcode them.

/// The application name
pub const APP_NAME: &str = "Pocket Player";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Storage ──────────────────────────────────────────────────────────────────

/// Mount point of the removable card. Only this directory is scanned.
pub const MOUNT_POINT: &str = "/sdcard";

/// Maximum number of tracks the catalog holds. Further entries are dropped.
pub const MAX_TRACKS: usize = 50;

/// Path buffer size on the board, terminator included.
pub const MAX_PATH_LEN: usize = 256;

/// Longest composed path (root + '/' + name) accepted into the catalog.
pub const MAX_PATH_BYTES: usize = MAX_PATH_LEN - 1;

/// Supported audio extension, compared case-insensitively.
pub const SUPPORTED_EXTENSION: &str = "mp3";

// ── Audio ────────────────────────────────────────────────────────────────────

/// Codec level at power-on and after unmute.
pub const DEFAULT_VOLUME: u8 = 70;

/// MCLK as a multiple of the frame clock.
pub const MCLK_MULTIPLE: u32 = 384;

/// Upper bound for one sink write.
pub const SINK_WRITE_TIMEOUT_MS: u64 = 200;

/// Decode engine task priority hint.
pub const ENGINE_PRIORITY: u8 = 5;

/// Decode engine core affinity hint.
pub const ENGINE_CORE: u8 = 0;

// ── Display ──────────────────────────────────────────────────────────────────

/// LCD width in pixels (landscape).
pub const DISPLAY_WIDTH: u32 = 480;

/// LCD height in pixels (landscape).
pub const DISPLAY_HEIGHT: u32 = 320;

/// Label text before the catalog has been scanned.
pub const STARTING_TEXT: &str = "Starting...";

/// Label text when the scan found nothing playable.
pub const NO_TRACKS_TEXT: &str = "No MP3 files found!";

// ── Ambient light ────────────────────────────────────────────────────────────

/// Number of LEDs on the ambient strip.
pub const LED_COUNT: usize = 8;

/// Ambient animation frame period.
pub const LED_FRAME_MS: u64 = 20;
