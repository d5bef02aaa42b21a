//! Audio item domain types (songs and episodes)

use super::{CreatorId, ItemId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A playable audio file
///
/// Owned by the catalog. Identity is immutable once inserted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioItem {
    /// Arena identifier
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Artist (songs) or host (episodes)
    pub owner: CreatorId,

    /// Total length, at least one second
    pub duration: Duration,

    /// Kind-specific metadata
    pub kind: ItemKind,
}

impl AudioItem {
    /// Whether this item is a song
    pub fn is_song(&self) -> bool {
        matches!(self.kind, ItemKind::Song(_))
    }

    /// Whether this item is a podcast episode
    pub fn is_episode(&self) -> bool {
        matches!(self.kind, ItemKind::Episode(_))
    }

    /// Song metadata, if this is a song
    pub fn song(&self) -> Option<&SongInfo> {
        match &self.kind {
            ItemKind::Song(info) => Some(info),
            ItemKind::Episode(_) => None,
        }
    }
}

/// Song or episode payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Song(SongInfo),
    Episode(EpisodeInfo),
}

/// Song metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInfo {
    pub album: String,
    pub genre: String,
    pub release_year: Option<u32>,
}

impl SongInfo {
    /// Create song metadata without a release year
    pub fn new(album: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            album: album.into(),
            genre: genre.into(),
            release_year: None,
        }
    }
}

/// Podcast episode metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EpisodeInfo {
    pub description: String,
}
