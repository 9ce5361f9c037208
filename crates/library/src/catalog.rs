//! Catalog: fixed-capacity, ordered list of scanned tracks.
//!
//! Order is the order tracks were pushed (card enumeration order). The
//! catalog is only ever rebuilt wholesale; there is no removal or reorder.

use crate::track::Track;
use heapless::Vec;
use platform::config::MAX_TRACKS;

/// Error type for catalog operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The catalog has reached its compile-time capacity.
    #[error("catalog is full")]
    Full,
}

/// A fixed-capacity, ordered catalog of [`Track`] entries.
#[derive(Debug, Clone)]
pub struct Catalog<const N: usize> {
    tracks: Vec<Track, N>,
}

/// Catalog sized for the board.
pub type TrackCatalog = Catalog<MAX_TRACKS>;

impl<const N: usize> Catalog<N> {
    /// Create an empty catalog.
    pub const fn new() -> Self {
        Catalog { tracks: Vec::new() }
    }

    /// Append `track`.
    ///
    /// Returns `Err(CatalogError::Full)` when capacity `N` is exhausted.
    pub fn push(&mut self, track: Track) -> Result<(), CatalogError> {
        self.tracks.push(track).map_err(|_| CatalogError::Full)
    }

    /// Track at zero-based `index`, or `None`.
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Display name of the track at `index`, or `None`.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.get(index).map(Track::name)
    }

    /// Number of tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Returns `true` when there are no tracks.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Returns `true` when no more tracks fit.
    pub fn is_full(&self) -> bool {
        self.tracks.len() >= N
    }

    /// Maximum number of tracks.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Tracks in catalog order.
    pub fn iter(&self) -> core::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Remove all tracks.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

impl<const N: usize> Default for Catalog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const N: usize> IntoIterator for &'a Catalog<N> {
    type Item = &'a Track;
    type IntoIter = core::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
