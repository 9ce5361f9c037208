//! Music library: track descriptors, the bounded catalog, and the card scan.
//!
//! # Modules
//!
//! - [`track`]: `Track` record (absolute path + display name)
//! - [`catalog`]: `Catalog<N>` fixed-capacity, ordered track list
//! - [`scanner`]: non-recursive directory scan and extension filtering

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod scanner;
pub mod track;

// Top-level re-exports for convenience
pub use catalog::{Catalog, CatalogError, TrackCatalog};
pub use scanner::{ScanError, ScanReport, Scanner};
pub use track::{PathTooLong, Track, TrackPath};
