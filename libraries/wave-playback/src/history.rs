//! Listening history ledger
//!
//! Append-only record of consumed items, read by analytics and revenue
//! distribution.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::time::Duration;
use wave_core::{CreatorId, ItemId};

/// How much of an item was consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completion {
    /// Played to the end
    Full,

    /// Left early (skip, explicit next, or replaced by a new load)
    Partial,
}

/// One consumed item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Ledger-wide sequence number, monotonically increasing
    pub ordinal: u64,

    /// Song or episode
    pub item: ItemId,

    /// Artist or host
    pub owner: CreatorId,

    /// Time spent on the item
    pub listened: Duration,

    pub completion: Completion,
}

impl HistoryEntry {
    pub fn is_full(&self) -> bool {
        self.completion == Completion::Full
    }
}

/// Append-only history
#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    /// Entries (oldest first)
    entries: Vec<HistoryEntry>,

    /// Ordinal for the next entry; survives `clear`
    next_ordinal: u64,
}

impl HistoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its ordinal
    pub fn push(
        &mut self,
        item: ItemId,
        owner: CreatorId,
        listened: Duration,
        completion: Completion,
    ) -> u64 {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;
        self.entries.push(HistoryEntry {
            ordinal,
            item,
            owner,
            listened,
            completion,
        });
        ordinal
    }

    /// All entries (oldest first)
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries in `range`, clamped to the ledger length
    pub fn window(&self, range: Range<usize>) -> &[HistoryEntry] {
        let end = range.end.min(self.entries.len());
        let start = range.start.min(end);
        &self.entries[start..end]
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries; ordinals keep counting
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
