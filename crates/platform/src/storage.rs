//! Storage abstraction for file systems

/// Storage trait for file system access
pub trait Storage {
    /// Error type
    type Error: core::fmt::Debug + core::fmt::Display;
    /// File type
    type File: File;

    /// Open file for reading
    fn open_file(
        &mut self,
        path: &str,
    ) -> impl core::future::Future<Output = Result<Self::File, Self::Error>>;

    /// Check if path exists
    fn exists(
        &mut self,
        path: &str,
    ) -> impl core::future::Future<Output = Result<bool, Self::Error>>;

    /// Enumerate the entries directly under `path`, in filesystem order.
    ///
    /// `visit` is called once per entry and may return [`Visit::Stop`] to end
    /// enumeration early. `.` and `..` are never reported. An error returned
    /// after some entries were visited means the listing was cut short.
    fn list_dir<V>(
        &mut self,
        path: &str,
        visit: V,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>
    where
        V: FnMut(DirEntry<'_>) -> Visit;
}

/// File trait for reading files
pub trait File {
    /// Error type
    type Error: core::fmt::Debug + core::fmt::Display;

    /// Read from current position
    fn read(
        &mut self,
        buf: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, Self::Error>>;

    /// Seek to position
    fn seek(&mut self, pos: u64) -> impl core::future::Future<Output = Result<u64, Self::Error>>;

    /// Get file size
    fn size(&self) -> u64;
}

/// Kind of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Anything else (symlink, device, unknown)
    Other,
}

/// One entry reported by [`Storage::list_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirEntry<'a> {
    /// Entry name without any directory component.
    pub name: &'a str,
    /// Entry kind.
    pub kind: EntryKind,
}

/// Visitor verdict for [`Storage::list_dir`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Keep enumerating.
    Continue,
    /// Stop after this entry.
    Stop,
}
