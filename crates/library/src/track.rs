//! Track: core data type representing a single playable file.

use heapless::String;
use platform::config::MAX_PATH_BYTES;

/// Absolute path buffer sized to the board's path limit.
pub type TrackPath = String<MAX_PATH_BYTES>;

/// The composed path does not fit in [`TrackPath`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("path of {len} bytes exceeds the {max}-byte limit")]
pub struct PathTooLong {
    /// Length the path would have had.
    pub len: usize,
    /// Largest accepted length.
    pub max: usize,
}

/// A single track in the catalog.
///
/// Only the absolute path is stored; the display name is the path's final
/// segment and is derived on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    path: TrackPath,
}

impl Track {
    /// Build a track from an absolute path.
    ///
    /// Unlike truncating, an over-long path is rejected so a track never
    /// points at a different file than the one scanned.
    pub fn from_path(path: &str) -> Result<Self, PathTooLong> {
        let mut buf = TrackPath::new();
        buf.push_str(path).map_err(|_| PathTooLong {
            len: path.len(),
            max: MAX_PATH_BYTES,
        })?;
        Ok(Self { path: buf })
    }

    /// Absolute path on the card.
    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    /// Display name: everything after the last `/`.
    pub fn name(&self) -> &str {
        display_name(self.path.as_str())
    }
}

/// Final path segment of `path`, or the whole string if it has no `/`.
pub fn display_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}
