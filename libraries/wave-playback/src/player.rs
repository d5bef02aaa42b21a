//! Player - core orchestration
//!
//! Coordinates the loaded source, repeat/shuffle modes, pause state, history
//! recording and premium segment marks for one user.

use crate::{
    clock::Tick,
    error::{PlayerError, Result},
    events::PlaybackEvent,
    history::{Completion, HistoryEntry, HistoryLedger},
    source::{Source, TrackSlot},
    types::{LibraryEntry, PlayerStatus, RepeatMode, SourceKind},
};
use std::ops::Range;
use std::time::Duration;
use wave_core::{AudioItem, CatalogLookup};

/// Elapsed time after which `prev` restarts the current item instead of
/// stepping back
const RESTART_THRESHOLD: Duration = Duration::from_secs(1);

/// What happens once the current item has played to its end
enum Continuation {
    /// Keep playing (a new or replayed item is under the cursor)
    Play,

    /// Source exhausted
    Stop,
}

/// Virtual player for one user
///
/// Time only moves through [`advance_time`](Self::advance_time); every other
/// operation is instantaneous.
#[derive(Debug, Clone)]
pub struct Player {
    /// Loaded source (None until the first successful load)
    source: Option<Source>,

    paused: bool,
    repeat: RepeatMode,
    shuffle: bool,

    /// Consumed items
    history: HistoryLedger,

    /// History lengths at which each premium segment began
    premium_starts: Vec<usize>,

    /// Whether the latest premium segment is still open
    premium_open: bool,

    /// Events waiting to be drained by the caller
    pending_events: Vec<PlaybackEvent>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Create an idle player with nothing loaded
    pub fn new() -> Self {
        Self {
            source: None,
            paused: true,
            repeat: RepeatMode::None,
            shuffle: false,
            history: HistoryLedger::new(),
            premium_starts: Vec::new(),
            premium_open: false,
            pending_events: Vec::new(),
        }
    }

    // ===== Loading =====

    /// Load a library entry, replacing the current source
    ///
    /// On failure the previous source is left exactly as it was. On success the
    /// previous in-progress item (if any of it was heard) is recorded as a
    /// partial play, and the new source starts paused at its first track with
    /// repeat and shuffle off.
    pub fn load(&mut self, catalog: &impl CatalogLookup, entry: LibraryEntry) -> Result<()> {
        let source = Source::open(catalog, entry)?;

        self.flush_current();

        let kind = source.kind();
        let item = source.current().item;
        self.source = Some(source);
        self.paused = true;
        self.repeat = RepeatMode::None;
        self.shuffle = false;

        self.pending_events
            .push(PlaybackEvent::SourceLoaded { kind, item });
        Ok(())
    }

    /// Record the interrupted item of the outgoing source
    fn flush_current(&mut self) {
        let Some(source) = self.source.as_ref() else {
            return;
        };
        let slot = *source.current();
        let elapsed = source.elapsed();
        if !elapsed.is_zero() {
            self.record(slot, elapsed, Completion::Partial);
        }
    }

    // ===== Playback Control =====

    /// Toggle pause, returning the new paused flag
    pub fn play_pause(&mut self) -> Result<bool> {
        self.active_source()?;
        self.paused = !self.paused;
        Ok(self.paused)
    }

    /// Explicitly move on to the next item
    ///
    /// The current item is recorded as a partial play. Playback stops (paused
    /// and rewound) when there is nothing to move on to under the current
    /// repeat mode.
    pub fn next(&mut self) -> Result<()> {
        let source = self.active_source()?;
        let slot = *source.current();
        let elapsed = source.elapsed();
        let single = source.kind() == SourceKind::SingleTrack;
        let at_end = source.is_last();

        self.record(slot, elapsed, Completion::Partial);

        let continuation = match self.repeat {
            RepeatMode::CurrentTrack => {
                self.source_mut()?.rewind();
                Continuation::Play
            }
            RepeatMode::None if single => Continuation::Stop,
            _ if single => {
                self.source_mut()?.rewind();
                Continuation::Play
            }
            _ if !at_end => {
                self.source_mut()?.step_forward();
                Continuation::Play
            }
            RepeatMode::All | RepeatMode::Infinite => {
                self.source_mut()?.move_to(0);
                Continuation::Play
            }
            RepeatMode::None | RepeatMode::Once => Continuation::Stop,
        };

        match continuation {
            Continuation::Play => self.emit_track_changed(slot),
            Continuation::Stop => self.stop()?,
        }
        Ok(())
    }

    /// Explicitly go back
    ///
    /// Restarts the current item when at least a second of it was heard;
    /// otherwise steps back one position (restarting at the first). Never
    /// records history.
    pub fn prev(&mut self) -> Result<()> {
        let source = self.source_mut()?;
        let previous = *source.current();

        if source.elapsed() >= RESTART_THRESHOLD || !source.step_back() {
            source.rewind();
        }

        self.emit_track_changed(previous);
        Ok(())
    }

    /// Jump to the next episode of a podcast
    ///
    /// Returns false (and changes nothing) at the last episode.
    pub fn skip_next(&mut self) -> Result<bool> {
        self.skip("forward", true)
    }

    /// Jump to the previous episode of a podcast
    ///
    /// Returns false (and changes nothing) at the first episode.
    pub fn skip_prev(&mut self) -> Result<bool> {
        self.skip("backward", false)
    }

    fn skip(&mut self, operation: &'static str, forward: bool) -> Result<bool> {
        let source = self.active_source()?;
        if source.kind() != SourceKind::Podcast {
            return Err(PlayerError::InvalidSourceKind {
                operation,
                kind: source.kind(),
            });
        }

        let at_boundary = if forward {
            source.is_last()
        } else {
            source.is_first()
        };
        if at_boundary {
            return Ok(false);
        }

        let slot = *source.current();
        let elapsed = source.elapsed();
        self.record(slot, elapsed, Completion::Partial);

        let source = self.source_mut()?;
        if forward {
            source.step_forward();
        } else {
            source.step_back();
        }
        self.emit_track_changed(slot);
        Ok(true)
    }

    // ===== Shuffle & Repeat =====

    /// Advance the repeat mode along the cycle for the loaded source kind
    pub fn repeat_cycle(&mut self) -> Result<RepeatMode> {
        let kind = self.active_source()?.kind();

        let next = match kind {
            SourceKind::SingleTrack | SourceKind::Podcast => match self.repeat {
                RepeatMode::None => RepeatMode::Once,
                RepeatMode::Once => RepeatMode::Infinite,
                _ => RepeatMode::None,
            },
            SourceKind::Playlist | SourceKind::Album => match self.repeat {
                RepeatMode::None => RepeatMode::All,
                RepeatMode::All => RepeatMode::Once,
                RepeatMode::Once => RepeatMode::CurrentTrack,
                _ => RepeatMode::None,
            },
        };

        self.set_repeat(next);
        Ok(next)
    }

    /// Toggle shuffle on a playlist or album, returning the new flag
    ///
    /// Turning shuffle on reorders around the playing track, which keeps its
    /// position and remaining time. Turning it off restores natural order with
    /// the cursor on the playing track.
    pub fn shuffle_toggle(&mut self, seed: i64) -> Result<bool> {
        let kind = self.active_source()?.kind();
        if !kind.is_shufflable() {
            return Err(PlayerError::InvalidSourceKind {
                operation: "shuffle",
                kind,
            });
        }

        let enable = !self.shuffle;
        let source = self.source_mut()?;
        if enable {
            source.shuffle(seed);
        } else {
            source.unshuffle();
        }
        self.shuffle = enable;

        self.pending_events
            .push(PlaybackEvent::ShuffleChanged { enabled: enable });
        Ok(enable)
    }

    fn set_repeat(&mut self, mode: RepeatMode) {
        self.repeat = mode;
        self.pending_events
            .push(PlaybackEvent::RepeatChanged { mode });
    }

    // ===== Time =====

    /// Let `delta` of virtual time pass
    ///
    /// Paused players and zero deltas are left untouched. Items that reach their
    /// end are recorded as full plays and the next item is chosen from the
    /// repeat mode; when nothing is left the player pauses on the rewound last
    /// item and the rest of `delta` is dropped.
    pub fn advance_time(&mut self, delta: Duration) -> Result<()> {
        self.active_source()?;
        if self.paused || delta.is_zero() {
            return Ok(());
        }

        let mut budget = delta;
        loop {
            let source = self.source_mut()?;
            if source.clock_mut().consume(&mut budget) == Tick::Within {
                break;
            }

            let slot = *source.current();
            self.record(slot, slot.duration, Completion::Full);

            match self.continue_after_finish()? {
                Continuation::Play if budget.is_zero() => break,
                Continuation::Play => {}
                Continuation::Stop => {
                    self.stop()?;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Choose what plays after the current item ended naturally
    fn continue_after_finish(&mut self) -> Result<Continuation> {
        let repeat = self.repeat;
        let source = self.source_mut()?;
        let finished = *source.current();
        let single = source.kind() == SourceKind::SingleTrack;
        // A single track is always at the end of its order
        let at_end = source.is_last();

        match repeat {
            RepeatMode::None if at_end => return Ok(Continuation::Stop),
            RepeatMode::None => {
                source.step_forward();
            }
            RepeatMode::Once => {
                source.rewind();
                self.set_repeat(RepeatMode::None);
            }
            RepeatMode::CurrentTrack if single => {
                source.rewind();
                self.set_repeat(RepeatMode::None);
            }
            RepeatMode::CurrentTrack => source.rewind(),
            RepeatMode::Infinite if at_end => source.rewind(),
            RepeatMode::Infinite => {
                source.step_forward();
            }
            RepeatMode::All if at_end => source.move_to(0),
            RepeatMode::All => {
                source.step_forward();
            }
        }

        self.emit_track_changed(finished);
        Ok(Continuation::Play)
    }

    /// Pause on the rewound current item
    fn stop(&mut self) -> Result<()> {
        let source = self.source_mut()?;
        source.rewind();
        let item = source.current().item;
        self.paused = true;
        self.pending_events
            .push(PlaybackEvent::PlaybackStopped { item });
        Ok(())
    }

    // ===== State Queries =====

    /// Loaded source, if any
    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    pub fn source_kind(&self) -> Option<SourceKind> {
        self.source.as_ref().map(Source::kind)
    }

    /// Item under the cursor
    pub fn current_item<'c>(&self, catalog: &'c impl CatalogLookup) -> Option<&'c AudioItem> {
        let source = self.source.as_ref()?;
        catalog.resolve_item(source.current().item)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    pub fn is_shuffled(&self) -> bool {
        self.shuffle
    }

    /// Time left in the current item (zero with nothing loaded)
    pub fn remaining(&self) -> Duration {
        self.source
            .as_ref()
            .map_or(Duration::ZERO, Source::remaining)
    }

    /// Serializable snapshot for status output
    pub fn status(&self, catalog: &impl CatalogLookup) -> PlayerStatus {
        PlayerStatus {
            name: self
                .current_item(catalog)
                .map(|item| item.name.clone())
                .unwrap_or_default(),
            remaining_secs: self.remaining().as_secs(),
            repeat: self.repeat,
            shuffle: self.shuffle,
            paused: self.paused,
        }
    }

    // ===== History =====

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Drop the history
    ///
    /// Closed premium segments point into the dropped entries and are
    /// forgotten. An open segment restarts at the head of the empty ledger.
    pub fn clear_history(&mut self) {
        self.premium_starts.clear();
        if self.premium_open {
            self.premium_starts.push(0);
        }
        self.history.clear();
    }

    fn record(&mut self, slot: TrackSlot, listened: Duration, completion: Completion) {
        self.history
            .push(slot.item, slot.owner, listened, completion);
        self.pending_events.push(PlaybackEvent::TrackFinished {
            item: slot.item,
            completion,
        });
    }

    /// Entries appended since `window` began
    pub fn history_window(&self, window: Range<usize>) -> &[HistoryEntry] {
        self.history.window(window)
    }

    // ===== Premium Segments =====

    /// Open a premium segment at the current end of history
    ///
    /// Returns false if a segment is already open.
    pub fn begin_premium_segment(&mut self) -> bool {
        if self.premium_open {
            return false;
        }
        self.premium_starts.push(self.history.len());
        self.premium_open = true;
        true
    }

    /// Close the open premium segment and return the history range it covers
    pub fn end_premium_segment(&mut self) -> Option<Range<usize>> {
        let window = self.open_premium_window()?;
        self.premium_open = false;
        Some(window)
    }

    /// History range of the open premium segment
    pub fn open_premium_window(&self) -> Option<Range<usize>> {
        if !self.premium_open {
            return None;
        }
        let start = *self.premium_starts.last()?;
        Some(start..self.history.len())
    }

    pub fn is_premium(&self) -> bool {
        self.premium_open
    }

    pub fn premium_segment_starts(&self) -> &[usize] {
        &self.premium_starts
    }

    // ===== Events =====

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Queue a track change unless the cursor is still on `previous`
    fn emit_track_changed(&mut self, previous: TrackSlot) {
        let Some(item) = self.source.as_ref().map(|source| source.current().item) else {
            return;
        };
        if item != previous.item {
            self.pending_events.push(PlaybackEvent::TrackChanged {
                item,
                previous: previous.item,
            });
        }
    }

    // ===== Helpers =====

    fn active_source(&self) -> Result<&Source> {
        self.source.as_ref().ok_or(PlayerError::NoActiveSource)
    }

    fn source_mut(&mut self) -> Result<&mut Source> {
        self.source.as_mut().ok_or(PlayerError::NoActiveSource)
    }
}
