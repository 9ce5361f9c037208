//! Local filesystem Storage implementation for the desktop emulator.
//!
//! `LocalFileStorage` implements `platform::Storage` using `std::fs`.
//! Used when the `std` feature is enabled (emulator builds only).
//!
//! Board paths are absolute and start at the card's mount point
//! (`/sdcard/song.mp3`). The emulator maps that mount point onto a host
//! directory, so the controller and scanner see the same paths they would
//! on hardware.

use std::fs;
use std::io::{Read, Seek, SeekFrom};
use std::path::PathBuf;

use crate::config::MOUNT_POINT;
use crate::storage::{DirEntry, EntryKind, File, Storage, Visit};

/// Error type for local filesystem operations.
#[derive(Debug)]
pub struct LocalStorageError(pub std::io::Error);

impl core::fmt::Display for LocalStorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "local storage error: {}", self.0)
    }
}

impl std::error::Error for LocalStorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// An open file on the local filesystem.
pub struct LocalFile {
    inner: fs::File,
    size: u64,
}

impl File for LocalFile {
    type Error = LocalStorageError;

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Read::read(&mut self.inner, buf).map_err(LocalStorageError)
    }

    async fn seek(&mut self, pos: u64) -> Result<u64, Self::Error> {
        Seek::seek(&mut self.inner, SeekFrom::Start(pos)).map_err(LocalStorageError)
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// A `platform::Storage` implementation backed by `std::fs`.
///
/// # Example
/// ```rust,ignore
/// # async fn example() {
/// use platform::storage_local::LocalFileStorage;
/// use platform::Storage;
/// let mut storage = LocalFileStorage::new("/home/user/music");
/// let file = storage.open_file("/sdcard/track01.mp3").await.unwrap();
/// # }
/// ```
pub struct LocalFileStorage {
    host_root: PathBuf,
    mount_point: String,
}

impl LocalFileStorage {
    /// Mount `host_root` at the board's card mount point.
    #[must_use]
    pub fn new(host_root: &str) -> Self {
        Self::mounted(host_root, MOUNT_POINT)
    }

    /// Mount `host_root` at an arbitrary `mount_point`.
    #[must_use]
    pub fn mounted(host_root: &str, mount_point: &str) -> Self {
        Self {
            host_root: PathBuf::from(host_root),
            mount_point: mount_point.trim_end_matches('/').to_owned(),
        }
    }

    /// Create from the `MUSIC_PATH` environment variable.
    ///
    /// Returns `None` if `MUSIC_PATH` is not set or is not valid UTF-8.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var("MUSIC_PATH").ok().map(|p| Self::new(&p))
    }

    /// The board path the host directory is mounted at.
    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    /// Map a board path to a host path.
    ///
    /// Paths under the mount point are rebased onto the host root; any other
    /// path is treated as relative to the host root.
    fn resolve(&self, path: &str) -> PathBuf {
        let rest = path
            .strip_prefix(self.mount_point.as_str())
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .unwrap_or(path)
            .trim_start_matches('/');
        if rest.is_empty() {
            self.host_root.clone()
        } else {
            self.host_root.join(rest)
        }
    }
}

impl Storage for LocalFileStorage {
    type Error = LocalStorageError;
    type File = LocalFile;

    async fn open_file(&mut self, path: &str) -> Result<Self::File, Self::Error> {
        let full = self.resolve(path);
        let file = fs::File::open(&full).map_err(LocalStorageError)?;
        let meta = file.metadata().map_err(LocalStorageError)?;
        if meta.is_dir() {
            return Err(LocalStorageError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "is a directory",
            )));
        }
        Ok(LocalFile { inner: file, size: meta.len() })
    }

    async fn exists(&mut self, path: &str) -> Result<bool, Self::Error> {
        Ok(self.resolve(path).exists())
    }

    async fn list_dir<V>(&mut self, path: &str, mut visit: V) -> Result<(), Self::Error>
    where
        V: FnMut(DirEntry<'_>) -> Visit,
    {
        let dir = fs::read_dir(self.resolve(path)).map_err(LocalStorageError)?;
        for entry in dir {
            // A failed read ends the listing; entries already reported stand.
            let Ok(entry) = entry else {
                break;
            };
            let kind = match entry.file_type() {
                Ok(t) if t.is_file() => EntryKind::File,
                Ok(t) if t.is_dir() => EntryKind::Directory,
                _ => EntryKind::Other,
            };
            let name = entry.file_name();
            // Names that are not UTF-8 cannot be addressed through this API.
            let Some(name) = name.to_str() else {
                continue;
            };
            if visit(DirEntry { name, kind }) == Visit::Stop {
                break;
            }
        }
        Ok(())
    }
}
