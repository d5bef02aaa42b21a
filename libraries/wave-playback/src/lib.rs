//! Wave - Playback Simulation
//!
//! Deterministic, virtual-time playback engine. One [`Player`] per user.
//!
//! This crate provides:
//! - Source loading (single song, playlist, album, podcast)
//! - Pause/resume, repeat modes per source kind
//! - Seeded shuffle that keeps the playing track in place
//! - Podcast episode skipping and explicit next/previous navigation
//! - Virtual clock advancement across track boundaries
//! - Listening history (full and partial plays) and premium segment marks
//!
//! # Architecture
//!
//! `wave-playback` never reads a real clock and never logs:
//! - Time moves only through [`Player::advance_time`]
//! - The catalog is passed in through [`wave_core::CatalogLookup`]
//! - State transitions are reported as [`PlaybackEvent`]s, drained by the caller
//!
//! # Example: Playlist with Repeat All
//!
//! ```rust
//! use wave_core::{Catalog, CollectionKind, CreatorRole, SongInfo};
//! use wave_playback::{LibraryEntry, Player, RepeatMode};
//! use std::time::Duration;
//!
//! let mut catalog = Catalog::new();
//! let artist = catalog.add_creator("Band", CreatorRole::Artist).unwrap();
//! let first = catalog
//!     .add_song("First", artist, Duration::from_secs(100), SongInfo::new("LP", "rock"))
//!     .unwrap();
//! let second = catalog
//!     .add_song("Second", artist, Duration::from_secs(50), SongInfo::new("LP", "rock"))
//!     .unwrap();
//! let playlist = catalog
//!     .add_collection("Mix", artist, CollectionKind::Playlist, vec![first, second])
//!     .unwrap();
//!
//! let mut player = Player::new();
//! player.load(&catalog, LibraryEntry::Playlist(playlist)).unwrap();
//! player.play_pause().unwrap();
//! assert_eq!(player.repeat_cycle().unwrap(), RepeatMode::All);
//!
//! player.advance_time(Duration::from_secs(170)).unwrap();
//!
//! assert_eq!(player.history().len(), 2);
//! assert_eq!(player.current_item(&catalog).unwrap().id, first);
//! assert_eq!(player.remaining(), Duration::from_secs(80));
//! ```

#![forbid(unsafe_code)]

mod clock;
mod error;
pub mod events;
mod history;
mod player;
mod shuffle;
mod source;
pub mod types;

// Public exports
pub use clock::{PlaybackClock, Tick};
pub use error::{PlayerError, Result};
pub use events::PlaybackEvent;
pub use history::{Completion, HistoryEntry, HistoryLedger};
pub use player::Player;
pub use shuffle::ShuffleEngine;
pub use source::{CollectionCursor, Source, SourcePayload, TrackSlot};
pub use types::{LibraryEntry, PlayerStatus, RepeatMode, SourceKind};
