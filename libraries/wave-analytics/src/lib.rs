//! Wave Analytics
//!
//! Read-only consumers of listening history:
//! - **Wrapped**: top artists, genres, songs, albums and episodes per user,
//!   plus artist and host summaries across all users
//! - **Monetization**: premium credit distribution and the artist ranking
//!
//! Both take the catalog through [`wave_core::CatalogLookup`] and history as
//! plain slices of [`wave_playback::HistoryEntry`].

#![forbid(unsafe_code)]

pub mod error;
pub mod monetization;
pub mod wrapped;

pub use error::{AnalyticsError, Result};
pub use monetization::{ArtistRanking, ArtistRevenue, Ranking, RevenueLedger, NO_PROFITABLE_SONG};
pub use wrapped::{ArtistWrapped, HostWrapped, TopList, UserWrapped, Wrapped};

/// Default length of every ranked list
pub const DEFAULT_TOP_LIMIT: usize = 5;

/// Default credit paid out per premium window
pub const DEFAULT_PREMIUM_CREDIT: f64 = 1_000_000.0;
