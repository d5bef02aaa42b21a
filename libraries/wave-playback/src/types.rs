//! Core types for the playback engine

use serde::{Deserialize, Serialize};
use std::fmt;
use wave_core::{CollectionId, CollectionKind, ItemId};

/// Repeat mode
///
/// Cycled per source kind by [`Player::repeat_cycle`](crate::Player::repeat_cycle):
///
/// | Source kind | Cycle |
/// |-------------|-------|
/// | single track, podcast | `None -> Once -> Infinite -> None` |
/// | playlist, album | `None -> All -> Once -> CurrentTrack -> None` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when the source ends
    #[default]
    #[serde(rename = "No Repeat")]
    None,

    /// Replay the current track one more time, then fall back to `None`
    #[serde(rename = "Repeat Once")]
    Once,

    /// Loop the whole collection
    #[serde(rename = "Repeat All")]
    All,

    /// Loop forever (single track), or hold the last track once the end is reached
    #[serde(rename = "Repeat Infinite")]
    Infinite,

    /// Keep replaying the track under focus
    #[serde(rename = "Repeat Current Song")]
    CurrentTrack,
}

impl RepeatMode {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "no repeat",
            Self::Once => "repeat once",
            Self::All => "repeat all",
            Self::Infinite => "repeat infinite",
            Self::CurrentTrack => "repeat current song",
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of the loaded source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// A lone song
    #[serde(rename = "song")]
    SingleTrack,
    Playlist,
    Album,
    Podcast,
}

impl SourceKind {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleTrack => "song",
            Self::Playlist => "playlist",
            Self::Album => "album",
            Self::Podcast => "podcast",
        }
    }

    /// Playlists and albums support shuffle
    pub fn is_shufflable(&self) -> bool {
        matches!(self, Self::Playlist | Self::Album)
    }
}

impl From<CollectionKind> for SourceKind {
    fn from(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Playlist => Self::Playlist,
            CollectionKind::Album => Self::Album,
            CollectionKind::Podcast => Self::Podcast,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Selected library entry handed to [`Player::load`](crate::Player::load)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum LibraryEntry {
    Song(ItemId),
    Playlist(CollectionId),
    Album(CollectionId),
    Podcast(CollectionId),
}

impl LibraryEntry {
    /// Source kind this entry loads as
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Song(_) => SourceKind::SingleTrack,
            Self::Playlist(_) => SourceKind::Playlist,
            Self::Album(_) => SourceKind::Album,
            Self::Podcast(_) => SourceKind::Podcast,
        }
    }
}

/// Snapshot of the player for status output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatus {
    /// Current item name (empty when nothing is loaded)
    pub name: String,

    /// Seconds left in the current item
    #[serde(rename = "remainedTime")]
    pub remaining_secs: u64,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// Shuffle flag
    pub shuffle: bool,

    /// Pause flag
    pub paused: bool,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self {
            name: String::new(),
            remaining_secs: 0,
            repeat: RepeatMode::None,
            shuffle: false,
            paused: true,
        }
    }
}
