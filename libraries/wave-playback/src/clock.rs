//! Virtual playback clock
//!
//! Tracks how much of the current item is left and reports when a time budget
//! crosses the item's end. No wall clock is ever consulted.

use std::time::Duration;

/// Outcome of feeding time into the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Budget exhausted before the item ended
    Within,

    /// The item ended; the budget holds whatever is left over
    Finished,
}

/// Remaining/elapsed time for the current item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackClock {
    duration: Duration,
    remaining: Duration,
}

impl PlaybackClock {
    /// Start a clock at the beginning of an item
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            remaining: duration,
        }
    }

    /// Time left in the current item
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Full length of the current item
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Time already played of the current item
    pub fn elapsed(&self) -> Duration {
        self.duration.saturating_sub(self.remaining)
    }

    /// Switch to a new item, starting at its beginning
    pub fn restart(&mut self, duration: Duration) {
        self.duration = duration;
        self.remaining = duration;
    }

    /// Go back to the beginning of the current item
    pub fn rewind(&mut self) {
        self.remaining = self.duration;
    }

    /// Spend up to `budget` on the current item
    ///
    /// Strictly more time left than budget: the item keeps playing. Otherwise the
    /// item finishes and `budget` is reduced by what was left of it.
    pub fn consume(&mut self, budget: &mut Duration) -> Tick {
        if self.remaining > *budget {
            self.remaining -= *budget;
            *budget = Duration::ZERO;
            Tick::Within
        } else {
            *budget -= self.remaining;
            self.remaining = Duration::ZERO;
            Tick::Finished
        }
    }
}
