//! Library fixture
//!
//! JSON description of users, creators and content, turned into a
//! [`Catalog`] before any command runs.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use wave_core::{
    Catalog, CatalogError, CollectionKind, CreatorId, CreatorRole, EpisodeInfo, ItemId, SongInfo,
};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LibraryInput {
    pub users: Vec<UserInput>,
    pub artists: Vec<String>,
    pub hosts: Vec<String>,
    pub songs: Vec<SongInput>,
    pub albums: Vec<AlbumInput>,
    pub podcasts: Vec<PodcastInput>,
    pub playlists: Vec<PlaylistInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserInput {
    pub username: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub city: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInput {
    pub name: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    /// Seconds
    pub duration: u64,
    #[serde(default)]
    pub release_year: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AlbumInput {
    pub name: String,
    pub artist: String,
    pub songs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PodcastInput {
    pub name: String,
    pub owner: String,
    pub episodes: Vec<EpisodeInput>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EpisodeInput {
    pub name: String,
    /// Seconds
    pub duration: u64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaylistInput {
    pub name: String,
    pub owner: String,
    pub songs: Vec<String>,
}

/// Built catalog plus the listeners that get a player
#[derive(Debug, Clone)]
pub struct Library {
    pub catalog: Catalog,

    /// Listener names in fixture order
    pub users: Vec<String>,
}

impl LibraryInput {
    /// Read a fixture from a JSON file
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Build the catalog
    ///
    /// Creators first, then songs and episodes, then albums and playlists that
    /// reference songs by name.
    pub fn build(&self) -> Result<Library> {
        let mut catalog = Catalog::new();

        for user in &self.users {
            catalog.add_creator(user.username.as_str(), CreatorRole::Listener)?;
        }
        for artist in &self.artists {
            catalog.add_creator(artist.as_str(), CreatorRole::Artist)?;
        }
        for host in &self.hosts {
            catalog.add_creator(host.as_str(), CreatorRole::Host)?;
        }

        for song in &self.songs {
            let artist = creator_id(&catalog, &song.artist)?;
            let info = SongInfo {
                album: song.album.clone(),
                genre: song.genre.clone(),
                release_year: song.release_year,
            };
            catalog.add_song(
                song.name.as_str(),
                artist,
                Duration::from_secs(song.duration),
                info,
            )?;
        }

        for podcast in &self.podcasts {
            let host = creator_id(&catalog, &podcast.owner)?;
            let episodes = podcast
                .episodes
                .iter()
                .map(|episode| {
                    catalog.add_episode(
                        episode.name.as_str(),
                        host,
                        Duration::from_secs(episode.duration),
                        EpisodeInfo {
                            description: episode.description.clone(),
                        },
                    )
                })
                .collect::<wave_core::Result<Vec<_>>>()?;
            catalog.add_collection(podcast.name.as_str(), host, CollectionKind::Podcast, episodes)?;
        }

        for album in &self.albums {
            let artist = creator_id(&catalog, &album.artist)?;
            let songs = song_ids(&catalog, &album.songs, Some(artist))?;
            catalog.add_collection(album.name.as_str(), artist, CollectionKind::Album, songs)?;
        }

        for playlist in &self.playlists {
            let owner = creator_id(&catalog, &playlist.owner)?;
            let songs = song_ids(&catalog, &playlist.songs, None)?;
            catalog.add_collection(
                playlist.name.as_str(),
                owner,
                CollectionKind::Playlist,
                songs,
            )?;
        }

        tracing::info!(
            users = self.users.len(),
            items = catalog.items().len(),
            collections = catalog.collections().len(),
            "Library built"
        );

        Ok(Library {
            catalog,
            users: self.users.iter().map(|u| u.username.clone()).collect(),
        })
    }
}

fn creator_id(catalog: &Catalog, name: &str) -> Result<CreatorId> {
    catalog
        .find_creator(name)
        .map(|creator| creator.id)
        .ok_or_else(|| CatalogError::name_not_found("creator", name).into())
}

/// Resolve song names, restricted to one artist's songs when `artist` is set
fn song_ids(catalog: &Catalog, names: &[String], artist: Option<CreatorId>) -> Result<Vec<ItemId>> {
    names
        .iter()
        .map(|name| {
            catalog
                .items()
                .iter()
                .find(|item| {
                    item.is_song()
                        && item.name == *name
                        && artist.map_or(true, |artist| item.owner == artist)
                })
                .map(|song| song.id)
                .ok_or_else(|| CatalogError::name_not_found("song", name.as_str()).into())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimulatorError;
    use wave_core::CatalogLookup;

    fn sample() -> LibraryInput {
        serde_json::from_str(
            r#"{
                "users": [{"username": "alice", "age": 20, "city": "Oslo"}],
                "artists": ["Band"],
                "hosts": ["Host"],
                "songs": [
                    {"name": "One", "artist": "Band", "album": "LP", "genre": "rock",
                     "duration": 120, "releaseYear": 2001},
                    {"name": "Two", "artist": "Band", "album": "LP", "genre": "rock",
                     "duration": 90}
                ],
                "albums": [{"name": "LP", "artist": "Band", "songs": ["One", "Two"]}],
                "podcasts": [{"name": "Show", "owner": "Host",
                              "episodes": [{"name": "Ep1", "duration": 600}]}],
                "playlists": [{"name": "Faves", "owner": "alice", "songs": ["Two"]}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn builds_full_catalog() {
        let library = sample().build().unwrap();
        let catalog = &library.catalog;

        assert_eq!(library.users, vec!["alice".to_string()]);
        assert_eq!(catalog.items().len(), 3);
        assert_eq!(catalog.collections().len(), 3);

        let album = catalog.find_collection(CollectionKind::Album, "LP").unwrap();
        assert_eq!(album.track_count(), 2);
        let song = catalog.resolve_item(album.items[0]).unwrap();
        assert_eq!(song.song().unwrap().release_year, Some(2001));
    }

    #[test]
    fn unknown_song_reference_fails() {
        let mut input = sample();
        input.playlists[0].songs.push("Missing".to_string());
        assert!(matches!(
            input.build(),
            Err(SimulatorError::Catalog(CatalogError::NameNotFound { .. }))
        ));
    }

    #[test]
    fn album_only_takes_its_artists_songs() {
        let mut input = sample();
        input.artists.push("Other".to_string());
        input.albums.push(AlbumInput {
            name: "Covers".to_string(),
            artist: "Other".to_string(),
            songs: vec!["One".to_string()],
        });
        assert!(input.build().is_err());
    }

    #[test]
    fn zero_duration_fails() {
        let mut input = sample();
        input.songs[0].duration = 0;
        assert!(matches!(input.build(), Err(SimulatorError::Catalog(_))));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let input: LibraryInput = serde_json::from_str(r#"{"artists": ["Solo"]}"#).unwrap();
        let library = input.build().unwrap();
        assert!(library.users.is_empty());
        assert_eq!(library.catalog.creators().len(), 1);
    }
}
