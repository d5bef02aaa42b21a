//! Playback Events
//!
//! The player queues an event at each state transition. Callers drain the
//! queue after every operation (see [`Player::drain_events`](crate::Player::drain_events))
//! and decide what to log or forward. Events are emitted at:
//! - Source loads
//! - Track boundaries (finished naturally, or moved away from)
//! - Playback stopping at the end of a source
//! - Repeat/shuffle mode changes

use crate::history::Completion;
use crate::types::{RepeatMode, SourceKind};
use serde::{Deserialize, Serialize};
use wave_core::ItemId;

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// A new source replaced the previous one
    SourceLoaded {
        kind: SourceKind,
        /// First item of the new source
        item: ItemId,
    },

    /// Item left the ledger as a history entry
    TrackFinished {
        item: ItemId,
        completion: Completion,
    },

    /// Current item changed
    TrackChanged {
        /// ID of the new (current) item
        item: ItemId,
        /// ID of the item that was playing before
        previous: ItemId,
    },

    /// Playback ran out of tracks and paused at `item`
    PlaybackStopped { item: ItemId },

    /// Repeat mode changed, by the user or after a one-shot replay
    RepeatChanged { mode: RepeatMode },

    /// Shuffle toggled
    ShuffleChanged { enabled: bool },
}

impl PlaybackEvent {
    /// Short name for log lines
    pub fn name(&self) -> &'static str {
        match self {
            Self::SourceLoaded { .. } => "source_loaded",
            Self::TrackFinished { .. } => "track_finished",
            Self::TrackChanged { .. } => "track_changed",
            Self::PlaybackStopped { .. } => "playback_stopped",
            Self::RepeatChanged { .. } => "repeat_changed",
            Self::ShuffleChanged { .. } => "shuffle_changed",
        }
    }
}
