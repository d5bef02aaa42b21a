//! Wave Core
//!
//! Catalog types, identifiers, and lookup traits shared by every Wave crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Identifiers**: `ItemId`, `CollectionId`, `CreatorId` (arena handles)
//! - **Domain Types**: `AudioItem`, `Collection`, `Creator`
//! - **Catalog**: an append-only arena that owns every item by value
//! - **Lookup Trait**: `CatalogLookup`, the read-only view the playback engine uses
//! - **Error Handling**: `CatalogError` and `Result`
//!
//! Nothing outside the catalog holds an `AudioItem`; everything else keeps ids
//! and resolves them through an explicitly passed `CatalogLookup`.
//!
//! # Example
//!
//! ```rust
//! use wave_core::{Catalog, CatalogLookup, CollectionKind, CreatorRole, SongInfo};
//! use std::time::Duration;
//!
//! let mut catalog = Catalog::new();
//! let artist = catalog.add_creator("Alice", CreatorRole::Artist).unwrap();
//! let song = catalog
//!     .add_song("Intro", artist, Duration::from_secs(120), SongInfo::new("Debut", "pop"))
//!     .unwrap();
//! let album = catalog
//!     .add_collection("Debut", artist, CollectionKind::Album, vec![song])
//!     .unwrap();
//!
//! assert_eq!(catalog.resolve_collection(album).unwrap().track_count(), 1);
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogLookup};
pub use error::{CatalogError, Result};
pub use types::{
    AudioItem, Collection, CollectionId, CollectionKind, Creator, CreatorId, CreatorRole,
    EpisodeInfo, ItemId, ItemKind, SongInfo,
};
