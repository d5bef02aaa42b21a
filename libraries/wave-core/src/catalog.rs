//! Catalog arena and lookup trait
//!
//! The catalog owns every creator, audio item, and collection by value and
//! hands out dense ids. It is append-only: ids never dangle.

use crate::error::{CatalogError, Result};
use crate::types::{
    AudioItem, Collection, CollectionId, CollectionKind, Creator, CreatorId, CreatorRole,
    EpisodeInfo, ItemId, ItemKind, SongInfo,
};
use std::time::Duration;

/// Read-only catalog view used by the playback engine and analytics
///
/// Implementors resolve ids to the entities they own. Lookups never fail loudly;
/// callers decide how to report a missing id.
pub trait CatalogLookup {
    /// Resolve a song or episode
    fn resolve_item(&self, id: ItemId) -> Option<&AudioItem>;

    /// Resolve a playlist, album, or podcast
    fn resolve_collection(&self, id: CollectionId) -> Option<&Collection>;

    /// Resolve an artist, host, or listener
    fn resolve_creator(&self, id: CreatorId) -> Option<&Creator>;

    /// Name of a creator, or an empty string for unknown ids
    fn creator_name(&self, id: CreatorId) -> &str {
        self.resolve_creator(id).map_or("", |c| c.name.as_str())
    }
}

/// In-memory catalog arena
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    creators: Vec<Creator>,
    items: Vec<AudioItem>,
    collections: Vec<Collection>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Creators =====

    /// Register a creator; names are unique across roles
    pub fn add_creator(&mut self, name: impl Into<String>, role: CreatorRole) -> Result<CreatorId> {
        let name = name.into();
        if self.find_creator(&name).is_some() {
            return Err(CatalogError::duplicate("creator", name));
        }

        let id = CreatorId::new(self.creators.len() as u32);
        tracing::debug!(%id, %name, ?role, "Registered creator");
        self.creators.push(Creator { id, name, role });
        Ok(id)
    }

    /// Find a creator by username
    pub fn find_creator(&self, name: &str) -> Option<&Creator> {
        self.creators.iter().find(|c| c.name == name)
    }

    /// All creators in registration order
    pub fn creators(&self) -> &[Creator] {
        &self.creators
    }

    // ===== Items =====

    /// Add a song owned by an artist
    pub fn add_song(
        &mut self,
        name: impl Into<String>,
        artist: CreatorId,
        duration: Duration,
        info: SongInfo,
    ) -> Result<ItemId> {
        self.add_item(name.into(), artist, CreatorRole::Artist, duration, ItemKind::Song(info))
    }

    /// Add a podcast episode owned by a host
    pub fn add_episode(
        &mut self,
        name: impl Into<String>,
        host: CreatorId,
        duration: Duration,
        info: EpisodeInfo,
    ) -> Result<ItemId> {
        self.add_item(name.into(), host, CreatorRole::Host, duration, ItemKind::Episode(info))
    }

    fn add_item(
        &mut self,
        name: String,
        owner: CreatorId,
        required: CreatorRole,
        duration: Duration,
        kind: ItemKind,
    ) -> Result<ItemId> {
        let creator = self
            .resolve_creator(owner)
            .ok_or(CatalogError::CreatorNotFound(owner))?;
        if creator.role != required {
            return Err(CatalogError::RoleMismatch(format!(
                "{} cannot publish {}",
                creator.name, name
            )));
        }
        // Whole-second resolution; anything shorter would never advance the clock
        if duration.as_secs() == 0 {
            return Err(CatalogError::ZeroDuration(name));
        }

        let id = ItemId::new(self.items.len() as u32);
        tracing::debug!(%id, %name, secs = duration.as_secs(), "Added audio item");
        self.items.push(AudioItem {
            id,
            name,
            owner,
            duration,
            kind,
        });
        Ok(id)
    }

    /// Find the first song with the given name
    pub fn find_song(&self, name: &str) -> Option<&AudioItem> {
        self.items.iter().find(|i| i.is_song() && i.name == name)
    }

    /// All items in insertion order
    pub fn items(&self) -> &[AudioItem] {
        &self.items
    }

    // ===== Collections =====

    /// Add a playlist, album, or podcast
    ///
    /// Albums need an artist owner, podcasts a host; playlists may belong to
    /// anyone. Every item must exist and match the collection kind. Empty
    /// collections are allowed (loading them is rejected later).
    pub fn add_collection(
        &mut self,
        name: impl Into<String>,
        owner: CreatorId,
        kind: CollectionKind,
        items: Vec<ItemId>,
    ) -> Result<CollectionId> {
        let name = name.into();
        let creator = self
            .resolve_creator(owner)
            .ok_or(CatalogError::CreatorNotFound(owner))?;

        let allowed = match kind {
            CollectionKind::Playlist => true,
            CollectionKind::Album => creator.role == CreatorRole::Artist,
            CollectionKind::Podcast => creator.role == CreatorRole::Host,
        };
        if !allowed {
            return Err(CatalogError::RoleMismatch(format!(
                "{} cannot own {} {}",
                creator.name, kind, name
            )));
        }

        if self
            .collections
            .iter()
            .any(|c| c.kind == kind && c.owner == owner && c.name == name)
        {
            return Err(CatalogError::duplicate(kind.as_str(), name));
        }

        for &item_id in &items {
            let item = self
                .resolve_item(item_id)
                .ok_or(CatalogError::ItemNotFound(item_id))?;
            if item.is_song() != kind.holds_songs() {
                return Err(CatalogError::KindMismatch {
                    item: item.name.clone(),
                    kind,
                });
            }
        }

        let id = CollectionId::new(self.collections.len() as u32);
        tracing::debug!(%id, %name, %kind, tracks = items.len(), "Added collection");
        self.collections.push(Collection {
            id,
            name,
            owner,
            kind,
            items,
        });
        Ok(id)
    }

    /// Find a collection of the given kind by name
    pub fn find_collection(&self, kind: CollectionKind, name: &str) -> Option<&Collection> {
        self.collections
            .iter()
            .find(|c| c.kind == kind && c.name == name)
    }

    /// All collections in insertion order
    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }
}

impl CatalogLookup for Catalog {
    fn resolve_item(&self, id: ItemId) -> Option<&AudioItem> {
        self.items.get(id.index())
    }

    fn resolve_collection(&self, id: CollectionId) -> Option<&Collection> {
        self.collections.get(id.index())
    }

    fn resolve_creator(&self, id: CreatorId) -> Option<&Creator> {
        self.creators.get(id.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    fn catalog_with_artist() -> (Catalog, CreatorId) {
        let mut catalog = Catalog::new();
        let artist = catalog.add_creator("Band", CreatorRole::Artist).unwrap();
        (catalog, artist)
    }

    #[test]
    fn ids_are_dense_and_resolvable() {
        let (mut catalog, artist) = catalog_with_artist();
        let a = catalog
            .add_song("A", artist, secs(10), SongInfo::new("X", "rock"))
            .unwrap();
        let b = catalog
            .add_song("B", artist, secs(20), SongInfo::new("X", "rock"))
            .unwrap();

        assert_eq!(a.get(), 0);
        assert_eq!(b.get(), 1);
        assert_eq!(catalog.resolve_item(b).unwrap().duration, secs(20));
        assert_eq!(catalog.creator_name(artist), "Band");
    }

    #[test]
    fn duplicate_creator_rejected() {
        let (mut catalog, _) = catalog_with_artist();
        let err = catalog.add_creator("Band", CreatorRole::Host).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { .. }));
    }

    #[test]
    fn zero_duration_rejected() {
        let (mut catalog, artist) = catalog_with_artist();
        let err = catalog
            .add_song("Silence", artist, Duration::from_millis(400), SongInfo::default())
            .unwrap_err();
        assert_eq!(err, CatalogError::ZeroDuration("Silence".to_string()));
    }

    #[test]
    fn listener_cannot_publish_songs() {
        let mut catalog = Catalog::new();
        let user = catalog.add_creator("alice", CreatorRole::Listener).unwrap();
        let err = catalog
            .add_song("Demo", user, secs(5), SongInfo::default())
            .unwrap_err();
        assert!(matches!(err, CatalogError::RoleMismatch(_)));
    }

    #[test]
    fn album_rejects_episodes() {
        let mut catalog = Catalog::new();
        let artist = catalog.add_creator("Band", CreatorRole::Artist).unwrap();
        let host = catalog.add_creator("Host", CreatorRole::Host).unwrap();
        let episode = catalog
            .add_episode("Ep 1", host, secs(30), EpisodeInfo::default())
            .unwrap();

        let err = catalog
            .add_collection("LP", artist, CollectionKind::Album, vec![episode])
            .unwrap_err();
        assert!(matches!(err, CatalogError::KindMismatch { .. }));
    }

    #[test]
    fn listener_may_own_playlists() {
        let (mut catalog, artist) = catalog_with_artist();
        let song = catalog
            .add_song("A", artist, secs(10), SongInfo::default())
            .unwrap();
        let user = catalog.add_creator("alice", CreatorRole::Listener).unwrap();

        let id = catalog
            .add_collection("Faves", user, CollectionKind::Playlist, vec![song, song])
            .unwrap();
        let playlist = catalog.resolve_collection(id).unwrap();
        assert_eq!(playlist.track_count(), 2);
        assert_eq!(
            catalog.find_collection(CollectionKind::Playlist, "Faves").unwrap().id,
            id
        );
    }

    #[test]
    fn unknown_item_in_collection_rejected() {
        let (mut catalog, artist) = catalog_with_artist();
        let err = catalog
            .add_collection("LP", artist, CollectionKind::Album, vec![ItemId::new(9)])
            .unwrap_err();
        assert_eq!(err, CatalogError::ItemNotFound(ItemId::new(9)));
    }
}
