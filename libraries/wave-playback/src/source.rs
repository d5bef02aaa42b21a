//! Loaded audio source
//!
//! A [`Source`] wraps whatever the user loaded (a lone song, or a playlist,
//! album or podcast) together with its play order, cursor position and clock.
//! Item data is snapshotted into [`TrackSlot`]s at load so that ticking time
//! never needs the catalog.

use crate::clock::PlaybackClock;
use crate::error::{PlayerError, Result};
use crate::shuffle::ShuffleEngine;
use crate::types::{LibraryEntry, SourceKind};
use std::time::Duration;
use wave_core::{AudioItem, CatalogLookup, CollectionId, CollectionKind, CreatorId, ItemId};

/// Id snapshot of one playable item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSlot {
    pub item: ItemId,
    pub owner: CreatorId,
    pub duration: Duration,
}

impl From<&AudioItem> for TrackSlot {
    fn from(item: &AudioItem) -> Self {
        Self {
            item: item.id,
            owner: item.owner,
            duration: item.duration,
        }
    }
}

/// Cursor over a loaded collection
#[derive(Debug, Clone)]
pub struct CollectionCursor {
    collection: CollectionId,
    kind: CollectionKind,

    /// Tracks in natural order
    slots: Vec<TrackSlot>,

    /// Indices into `slots`; identity unless shuffled
    play_order: Vec<usize>,

    /// Index into `play_order`
    position: usize,
}

impl CollectionCursor {
    fn new(collection: CollectionId, kind: CollectionKind, slots: Vec<TrackSlot>) -> Self {
        let play_order = ShuffleEngine::identity(slots.len());
        Self {
            collection,
            kind,
            slots,
            play_order,
            position: 0,
        }
    }

    pub fn collection(&self) -> CollectionId {
        self.collection
    }

    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    pub fn slots(&self) -> &[TrackSlot] {
        &self.slots
    }

    pub fn play_order(&self) -> &[usize] {
        &self.play_order
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn track_count(&self) -> usize {
        self.slots.len()
    }

    /// Natural index of the track under the cursor
    pub fn current_index(&self) -> usize {
        self.play_order[self.position]
    }

    pub fn current(&self) -> &TrackSlot {
        &self.slots[self.current_index()]
    }

    /// Cursor sits on the last entry of the play order
    pub fn is_last(&self) -> bool {
        self.position + 1 >= self.play_order.len()
    }

    pub fn is_first(&self) -> bool {
        self.position == 0
    }

    fn shuffle(&mut self, seed: i64) {
        let pivot = self.current_index();
        self.play_order = ShuffleEngine::permute(seed, self.slots.len(), pivot, self.position);
    }

    fn unshuffle(&mut self) {
        self.position = self.current_index();
        self.play_order = ShuffleEngine::identity(self.slots.len());
    }
}

/// Source payload, by kind
#[derive(Debug, Clone)]
pub enum SourcePayload {
    Single { slot: TrackSlot },
    Collection(CollectionCursor),
}

/// The loaded source and its clock
#[derive(Debug, Clone)]
pub struct Source {
    payload: SourcePayload,
    clock: PlaybackClock,
}

impl Source {
    /// Resolve a library entry into a ready-to-play source
    ///
    /// Validation happens entirely up front; nothing is built unless every check
    /// passes.
    pub fn open(catalog: &impl CatalogLookup, entry: LibraryEntry) -> Result<Self> {
        let (id, wanted) = match entry {
            LibraryEntry::Song(id) => {
                let item = catalog.resolve_item(id).ok_or(PlayerError::IndexOutOfRange {
                    entity: "song",
                    index: id.get(),
                })?;
                if !item.is_song() {
                    return Err(PlayerError::InvalidSourceKind {
                        operation: "load",
                        kind: SourceKind::SingleTrack,
                    });
                }
                return Ok(Self::single(TrackSlot::from(item)));
            }
            LibraryEntry::Playlist(id) => (id, CollectionKind::Playlist),
            LibraryEntry::Album(id) => (id, CollectionKind::Album),
            LibraryEntry::Podcast(id) => (id, CollectionKind::Podcast),
        };

        let collection = catalog
            .resolve_collection(id)
            .ok_or(PlayerError::IndexOutOfRange {
                entity: wanted.as_str(),
                index: id.get(),
            })?;

        if collection.kind != wanted {
            return Err(PlayerError::InvalidSourceKind {
                operation: "load",
                kind: SourceKind::from(wanted),
            });
        }

        if collection.is_empty() {
            return Err(PlayerError::EmptyCollection);
        }

        let slots = collection
            .items
            .iter()
            .map(|&item| {
                catalog
                    .resolve_item(item)
                    .map(TrackSlot::from)
                    .ok_or(PlayerError::IndexOutOfRange {
                        entity: "item",
                        index: item.get(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::collection(CollectionCursor::new(
            collection.id,
            collection.kind,
            slots,
        )))
    }

    fn single(slot: TrackSlot) -> Self {
        Self {
            clock: PlaybackClock::new(slot.duration),
            payload: SourcePayload::Single { slot },
        }
    }

    fn collection(cursor: CollectionCursor) -> Self {
        Self {
            clock: PlaybackClock::new(cursor.current().duration),
            payload: SourcePayload::Collection(cursor),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match &self.payload {
            SourcePayload::Single { .. } => SourceKind::SingleTrack,
            SourcePayload::Collection(cursor) => SourceKind::from(cursor.kind),
        }
    }

    pub fn payload(&self) -> &SourcePayload {
        &self.payload
    }

    /// Collection cursor, `None` for a single track
    pub fn cursor(&self) -> Option<&CollectionCursor> {
        match &self.payload {
            SourcePayload::Single { .. } => None,
            SourcePayload::Collection(cursor) => Some(cursor),
        }
    }

    /// Item under the cursor
    pub fn current(&self) -> &TrackSlot {
        match &self.payload {
            SourcePayload::Single { slot } => slot,
            SourcePayload::Collection(cursor) => cursor.current(),
        }
    }

    /// Index into the play order (always 0 for a single track)
    pub fn position(&self) -> usize {
        self.cursor().map_or(0, CollectionCursor::position)
    }

    pub fn play_order(&self) -> &[usize] {
        match &self.payload {
            SourcePayload::Single { .. } => &[0],
            SourcePayload::Collection(cursor) => cursor.play_order(),
        }
    }

    /// Number of entries in the play order
    pub fn len(&self) -> usize {
        self.play_order().len()
    }

    pub fn is_empty(&self) -> bool {
        self.play_order().is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.cursor().map_or(true, CollectionCursor::is_last)
    }

    pub fn is_first(&self) -> bool {
        self.position() == 0
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub(crate) fn clock_mut(&mut self) -> &mut PlaybackClock {
        &mut self.clock
    }

    pub fn remaining(&self) -> Duration {
        self.clock.remaining()
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    // ===== Cursor movement =====

    /// Move to `position` in the play order and start that track from the top
    ///
    /// Out-of-range positions are ignored. No-op for a single track beyond
    /// rewinding.
    pub(crate) fn move_to(&mut self, position: usize) {
        if let SourcePayload::Collection(cursor) = &mut self.payload {
            if position < cursor.play_order.len() {
                cursor.position = position;
            }
        }
        let duration = self.current().duration;
        self.clock.restart(duration);
    }

    /// Step forward in the play order, returning false at the end
    pub(crate) fn step_forward(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.move_to(self.position() + 1);
        true
    }

    /// Step back in the play order, returning false at the start
    pub(crate) fn step_back(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.move_to(self.position() - 1);
        true
    }

    /// Restart the current track
    pub(crate) fn rewind(&mut self) {
        self.clock.rewind();
    }

    // ===== Shuffle =====

    /// Reorder with `seed`, keeping the playing track at the current position
    pub(crate) fn shuffle(&mut self, seed: i64) {
        if let SourcePayload::Collection(cursor) = &mut self.payload {
            cursor.shuffle(seed);
        }
    }

    /// Restore natural order and jump the cursor to the playing track
    pub(crate) fn unshuffle(&mut self) {
        if let SourcePayload::Collection(cursor) = &mut self.payload {
            cursor.unshuffle();
        }
    }
}
