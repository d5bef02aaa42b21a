//! Artist revenue from premium subscriptions
//!
//! Each premium window (the stretch of a user's history between subscribing
//! and cancelling, or the end of the run) pays a fixed credit, shared evenly by
//! the distinct songs played to completion in that window.

use crate::error::{AnalyticsError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use wave_core::{CatalogLookup, CreatorId, ItemId};
use wave_playback::HistoryEntry;

/// Placeholder for artists no premium listener has paid for yet
pub const NO_PROFITABLE_SONG: &str = "N/A";

/// Accumulated revenue for one artist
#[derive(Debug, Clone, Default)]
pub struct ArtistRevenue {
    song_revenue: f64,
    per_song: HashMap<ItemId, f64>,
}

impl ArtistRevenue {
    pub fn song_revenue(&self) -> f64 {
        self.song_revenue
    }

    pub fn song(&self, item: ItemId) -> f64 {
        self.per_song.get(&item).copied().unwrap_or_default()
    }

    fn credit(&mut self, item: ItemId, amount: f64) {
        self.song_revenue += amount;
        *self.per_song.entry(item).or_default() += amount;
    }
}

/// One row of the final ranking
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRanking {
    #[serde(skip)]
    pub artist: String,

    /// Rounded to two decimals
    pub song_revenue: f64,

    /// 1-based rank
    pub ranking: usize,

    pub most_profitable_song: String,
}

/// Ranked artists, serialized as an object keyed by artist name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking(Vec<ArtistRanking>);

impl Ranking {
    pub fn rows(&self) -> &[ArtistRanking] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Ranking {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for row in &self.0 {
            map.serialize_entry(&row.artist, row)?;
        }
        map.end()
    }
}

/// Revenue per artist
#[derive(Debug, Clone, Default)]
pub struct RevenueLedger {
    artists: HashMap<CreatorId, ArtistRevenue>,
}

impl RevenueLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an artist with zero revenue (no-op if already known)
    pub fn touch(&mut self, artist: CreatorId) {
        self.artists.entry(artist).or_default();
    }

    pub fn artist(&self, artist: CreatorId) -> Option<&ArtistRevenue> {
        self.artists.get(&artist)
    }

    pub fn len(&self) -> usize {
        self.artists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artists.is_empty()
    }

    /// Pay `credit` for one premium window
    ///
    /// Only fully played songs count, each distinct song once. Returns the
    /// number of songs credited; an empty window pays nothing.
    pub fn distribute_premium(
        &mut self,
        catalog: &impl CatalogLookup,
        window: &[HistoryEntry],
        credit: f64,
    ) -> Result<usize> {
        let mut songs = BTreeSet::new();
        for entry in window.iter().filter(|e| e.is_full()) {
            let item = catalog
                .resolve_item(entry.item)
                .ok_or(AnalyticsError::UnknownItem(entry.item))?;
            if item.is_song() {
                songs.insert((item.id, item.owner));
            }
        }

        if songs.is_empty() {
            tracing::debug!(entries = window.len(), "Premium window without full song plays");
            return Ok(0);
        }

        let share = credit / songs.len() as f64;
        for &(item, artist) in &songs {
            self.artists.entry(artist).or_default().credit(item, share);
        }

        tracing::debug!(songs = songs.len(), share, "Distributed premium credit");
        Ok(songs.len())
    }

    /// Artists by revenue (descending), ties by name
    pub fn ranking(&self, catalog: &impl CatalogLookup) -> Result<Ranking> {
        let mut rows = self
            .artists
            .iter()
            .map(|(&artist, revenue)| {
                let name = catalog
                    .resolve_creator(artist)
                    .ok_or(AnalyticsError::UnknownCreator(artist))?
                    .name
                    .clone();
                Ok((name, revenue))
            })
            .collect::<Result<Vec<_>>>()?;

        rows.sort_by(|(a_name, a), (b_name, b)| {
            b.song_revenue
                .total_cmp(&a.song_revenue)
                .then_with(|| a_name.cmp(b_name))
        });

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, (artist, revenue))| {
                Ok(ArtistRanking {
                    artist,
                    song_revenue: round_cents(revenue.song_revenue),
                    ranking: i + 1,
                    most_profitable_song: most_profitable_song(catalog, revenue)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Ranking(rows))
    }
}

fn most_profitable_song(catalog: &impl CatalogLookup, revenue: &ArtistRevenue) -> Result<String> {
    let mut best: Option<(&str, f64)> = None;
    for (&item, &amount) in &revenue.per_song {
        let name = catalog
            .resolve_item(item)
            .ok_or(AnalyticsError::UnknownItem(item))?
            .name
            .as_str();
        let better = match best {
            None => true,
            Some((best_name, best_amount)) => match amount.total_cmp(&best_amount) {
                Ordering::Greater => true,
                Ordering::Equal => name < best_name,
                Ordering::Less => false,
            },
        };
        if better {
            best = Some((name, amount));
        }
    }

    Ok(best.map_or_else(|| NO_PROFITABLE_SONG.to_string(), |(name, _)| name.to_string()))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
