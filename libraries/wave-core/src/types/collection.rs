//! Playable collections (playlists, albums, podcasts)

use super::{CollectionId, CreatorId, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collection flavour
///
/// Playlists and albums share shuffle/repeat behaviour; podcasts navigate
/// episode by episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Playlist,
    Album,
    Podcast,
}

impl CollectionKind {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Playlist => "playlist",
            Self::Album => "album",
            Self::Podcast => "podcast",
        }
    }

    /// Whether the collection holds songs (as opposed to episodes)
    pub fn holds_songs(&self) -> bool {
        !matches!(self, Self::Podcast)
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered sequence of audio item references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    pub owner: CreatorId,
    pub kind: CollectionKind,
    pub items: Vec<ItemId>,
}

impl Collection {
    /// Number of tracks (or episodes)
    pub fn track_count(&self) -> usize {
        self.items.len()
    }

    /// Item at `index` in natural order
    pub fn track_at(&self, index: usize) -> Option<ItemId> {
        self.items.get(index).copied()
    }

    /// Whether the collection references `item`
    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(items: &[u32]) -> Collection {
        Collection {
            id: CollectionId::new(0),
            name: "Mix".to_string(),
            owner: CreatorId::new(0),
            kind: CollectionKind::Playlist,
            items: items.iter().copied().map(ItemId::new).collect(),
        }
    }

    #[test]
    fn track_at_follows_natural_order() {
        let mix = collection(&[4, 2, 9]);
        assert_eq!(mix.track_count(), 3);
        assert_eq!(mix.track_at(1), Some(ItemId::new(2)));
        assert_eq!(mix.track_at(3), None);
    }

    #[test]
    fn contains_checks_identity() {
        let mix = collection(&[4, 2]);
        assert!(mix.contains(ItemId::new(4)));
        assert!(!mix.contains(ItemId::new(5)));
    }

    #[test]
    fn podcasts_hold_episodes() {
        assert!(CollectionKind::Album.holds_songs());
        assert!(CollectionKind::Playlist.holds_songs());
        assert!(!CollectionKind::Podcast.holds_songs());
    }
}
