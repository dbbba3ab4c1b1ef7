//! Wall-clock timestamps for `created_at` / `updated_at`.
//!
//! The store never reads the clock directly; it goes through
//! [`MonotonicStamper`] so that consecutive stamps are strictly increasing
//! even when two mutations land inside the same millisecond.

use chrono::{DateTime, TimeDelta, Utc};
use std::fmt;

/// A UTC instant with millisecond resolution in practice.
pub type Timestamp = DateTime<Utc>;

/// Instant `ms` milliseconds after the Unix epoch (the epoch itself when out
/// of range).
pub fn from_millis(ms: i64) -> Timestamp {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

/// Calendar date (UTC) as `YYYY-MM-DD`.
pub fn date_string(at: Timestamp) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Source of "now".
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Reads the host clock (`Date.now()` in the browser via `wasmbind`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock frozen at a fixed instant. Useful for deterministic tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Wraps a [`Clock`] and hands out strictly increasing stamps.
pub struct MonotonicStamper {
    clock: Box<dyn Clock>,
    last: Option<Timestamp>,
}

impl MonotonicStamper {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self { clock, last: None }
    }

    /// Next stamp: the clock reading, bumped past the previous stamp if the
    /// clock has not advanced (or went backwards).
    pub fn stamp(&mut self) -> Timestamp {
        let now = self.clock.now();
        let next = match self.last {
            Some(last) if now <= last => last + TimeDelta::milliseconds(1),
            _ => now,
        };
        self.last = Some(next);
        next
    }
}

impl Default for MonotonicStamper {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

impl fmt::Debug for MonotonicStamper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonotonicStamper")
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}
