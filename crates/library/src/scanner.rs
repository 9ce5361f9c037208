//! Scanner: lists the card root and collects supported audio files.
//!
//! The scan is deliberately shallow: only regular files directly under the
//! root are considered, in the order the filesystem reports them. No sorting
//! happens here; callers must not assume lexicographic order.

use core::fmt::Write as _;

use platform::config::{MAX_PATH_BYTES, SUPPORTED_EXTENSION};
use platform::storage::{DirEntry, EntryKind, Storage, Visit};

use crate::catalog::Catalog;
use crate::track::{PathTooLong, Track, TrackPath};

/// Error type for a catalog scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    /// The root directory could not be opened, or failed before reporting a
    /// single entry. Not fatal: the player runs with an empty catalog.
    #[error("catalog root unavailable")]
    Unavailable,
}

/// Outcome of a successful scan.
#[derive(Debug, Clone, Default)]
pub struct ScanReport<const N: usize> {
    /// Accepted tracks in enumeration order.
    pub catalog: Catalog<N>,
    /// Matching files dropped because the composed path was too long.
    pub skipped: usize,
    /// Entries that were not supported regular files.
    pub ignored: usize,
    /// The listing failed part-way. The catalog holds what was found before.
    pub truncated: bool,
}

/// Stateless helper for directory scanning and extension filtering.
pub struct Scanner;

impl Scanner {
    /// Returns `true` when `name` ends in the supported extension.
    ///
    /// The extension is whatever follows the last `.`, compared
    /// case-insensitively. Names without a `.` are never supported.
    pub fn is_supported_file(name: &str) -> bool {
        name.rsplit_once('.')
            .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(SUPPORTED_EXTENSION))
    }

    /// Join `root` and `name` with a single `/`.
    ///
    /// Fails when the result would exceed the board's path limit.
    pub fn compose_path(root: &str, name: &str) -> Result<TrackPath, PathTooLong> {
        let root = root.trim_end_matches('/');
        let len = root.len().saturating_add(1).saturating_add(name.len());
        let mut path = TrackPath::new();
        write!(path, "{root}/{name}").map_err(|_| PathTooLong {
            len,
            max: MAX_PATH_BYTES,
        })?;
        Ok(path)
    }

    /// Scan `root` on `storage` into a catalog of capacity `N`.
    ///
    /// Enumeration stops as soon as the catalog is full; later entries are
    /// dropped without error. Over-long paths are skipped with a warning and
    /// the scan continues. A listing that fails after reporting entries keeps
    /// the partial catalog and marks the report truncated.
    pub async fn scan<S, const N: usize>(
        storage: &mut S,
        root: &str,
    ) -> Result<ScanReport<N>, ScanError>
    where
        S: Storage,
    {
        let mut report = ScanReport::<N>::default();
        let mut seen = 0usize;

        let listed = storage
            .list_dir(root, |entry| {
                seen = seen.saturating_add(1);
                Self::visit(&mut report, root, entry)
            })
            .await;

        if let Err(e) = listed {
            if seen == 0 {
                tracing::warn!(root, error = %e, "failed to open catalog root");
                return Err(ScanError::Unavailable);
            }
            tracing::warn!(
                root,
                error = %e,
                entries = seen,
                "catalog listing failed part-way, keeping partial catalog"
            );
            report.truncated = true;
        }

        tracing::info!(
            root,
            tracks = report.catalog.len(),
            skipped = report.skipped,
            ignored = report.ignored,
            truncated = report.truncated,
            "catalog scan complete"
        );
        Ok(report)
    }

    fn visit<const N: usize>(report: &mut ScanReport<N>, root: &str, entry: DirEntry<'_>) -> Visit {
        if report.catalog.is_full() {
            return Visit::Stop;
        }
        if entry.kind != EntryKind::File || !Self::is_supported_file(entry.name) {
            report.ignored = report.ignored.saturating_add(1);
            return Visit::Continue;
        }

        let track = Self::compose_path(root, entry.name)
            .and_then(|path| Track::from_path(path.as_str()));
        match track {
            Ok(track) => {
                tracing::debug!(path = track.path(), "found track");
                if report.catalog.push(track).is_err() {
                    return Visit::Stop;
                }
            }
            Err(e) => {
                tracing::warn!(name = entry.name, len = e.len, "path too long, skipping");
                report.skipped = report.skipped.saturating_add(1);
            }
        }

        if report.catalog.is_full() {
            Visit::Stop
        } else {
            Visit::Continue
        }
    }
}
