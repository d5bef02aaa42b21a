//! Wrapped statistics
//!
//! Year-in-review style summaries computed from listening history: per user,
//! per artist (across all users) and per host (across all users).

use crate::error::{AnalyticsError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{BTreeSet, HashMap};
use wave_core::{AudioItem, CatalogLookup, CreatorId, ItemKind};
use wave_playback::HistoryEntry;

/// Ranked `(name, count)` pairs, highest count first, ties by name
///
/// Serializes as an ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopList(Vec<(String, u64)>);

impl TopList {
    pub fn entries(&self) -> &[(String, u64)] {
        &self.0
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TopList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

/// Occurrence counter keyed by name
#[derive(Debug, Default)]
struct Tally(HashMap<String, u64>);

impl Tally {
    fn add(&mut self, name: &str) {
        *self.0.entry(name.to_string()).or_default() += 1;
    }

    fn top(self, limit: usize) -> TopList {
        let mut ranked: Vec<(String, u64)> = self.0.into_iter().collect();
        ranked.sort_by(|(a_name, a), (b_name, b)| b.cmp(a).then_with(|| a_name.cmp(b_name)));
        ranked.truncate(limit);
        TopList(ranked)
    }
}

/// One user's summary
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWrapped {
    pub top_artists: TopList,
    pub top_genres: TopList,
    pub top_songs: TopList,
    pub top_albums: TopList,
    pub top_episodes: TopList,
}

/// One artist's summary across every listener
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistWrapped {
    pub top_albums: TopList,
    pub top_songs: TopList,
    pub top_fans: Vec<String>,
    pub listeners: usize,
}

/// One host's summary across every listener
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostWrapped {
    pub top_episodes: TopList,
    pub listeners: usize,
}

/// Computes wrapped summaries against a catalog
pub struct Wrapped<'c, C> {
    catalog: &'c C,
    limit: usize,
}

impl<'c, C: CatalogLookup> Wrapped<'c, C> {
    /// `limit` caps every ranked list
    pub fn new(catalog: &'c C, limit: usize) -> Self {
        Self { catalog, limit }
    }

    fn item(&self, entry: &HistoryEntry) -> Result<&'c AudioItem> {
        self.catalog
            .resolve_item(entry.item)
            .ok_or(AnalyticsError::UnknownItem(entry.item))
    }

    /// Summarize one user's history; `None` when there is nothing to show
    pub fn user(&self, history: &[HistoryEntry]) -> Result<Option<UserWrapped>> {
        if history.is_empty() {
            return Ok(None);
        }

        let mut artists = Tally::default();
        let mut genres = Tally::default();
        let mut songs = Tally::default();
        let mut albums = Tally::default();
        let mut episodes = Tally::default();

        for entry in history {
            let item = self.item(entry)?;
            match &item.kind {
                ItemKind::Song(info) => {
                    artists.add(self.catalog.creator_name(item.owner));
                    genres.add(&info.genre);
                    songs.add(&item.name);
                    albums.add(&info.album);
                }
                ItemKind::Episode(_) => episodes.add(&item.name),
            }
        }

        Ok(Some(UserWrapped {
            top_artists: artists.top(self.limit),
            top_genres: genres.top(self.limit),
            top_songs: songs.top(self.limit),
            top_albums: albums.top(self.limit),
            top_episodes: episodes.top(self.limit),
        }))
    }

    /// Summarize an artist over `(username, history)` pairs
    ///
    /// `None` when no user ever played one of the artist's songs.
    pub fn artist<'h>(
        &self,
        artist: CreatorId,
        users: impl IntoIterator<Item = (&'h str, &'h [HistoryEntry])>,
    ) -> Result<Option<ArtistWrapped>> {
        self.catalog
            .resolve_creator(artist)
            .ok_or(AnalyticsError::UnknownCreator(artist))?;

        let mut albums = Tally::default();
        let mut songs = Tally::default();
        let mut fans = Tally::default();
        let mut listeners = BTreeSet::new();

        for (username, history) in users {
            for entry in history.iter().filter(|e| e.owner == artist) {
                let item = self.item(entry)?;
                let Some(info) = item.song() else {
                    continue;
                };
                listeners.insert(username);
                albums.add(&info.album);
                songs.add(&item.name);
                fans.add(username);
            }
        }

        if listeners.is_empty() {
            return Ok(None);
        }

        Ok(Some(ArtistWrapped {
            top_albums: albums.top(self.limit),
            top_songs: songs.top(self.limit),
            top_fans: fans.top(self.limit).names().map(str::to_string).collect(),
            listeners: listeners.len(),
        }))
    }

    /// Summarize a host over `(username, history)` pairs
    ///
    /// `None` when no user ever played one of the host's episodes.
    pub fn host<'h>(
        &self,
        host: CreatorId,
        users: impl IntoIterator<Item = (&'h str, &'h [HistoryEntry])>,
    ) -> Result<Option<HostWrapped>> {
        self.catalog
            .resolve_creator(host)
            .ok_or(AnalyticsError::UnknownCreator(host))?;

        let mut episodes = Tally::default();
        let mut listeners = BTreeSet::new();

        for (username, history) in users {
            for entry in history.iter().filter(|e| e.owner == host) {
                let item = self.item(entry)?;
                if item.is_episode() {
                    listeners.insert(username);
                    episodes.add(&item.name);
                }
            }
        }

        if listeners.is_empty() {
            return Ok(None);
        }

        Ok(Some(HostWrapped {
            top_episodes: episodes.top(self.limit),
            listeners: listeners.len(),
        }))
    }
}
