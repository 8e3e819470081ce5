//! The half-open `[start, end)` interval every stage of the finder works with.

use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{FinderError, Result};

/// A non-empty span of time, closed at `start` and open at `end`.
///
/// The `start < end` invariant is checked on construction (including
/// deserialization), so downstream code never sees zero or negative lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Unchecked wire shape, validated into a [`TimeInterval`].
#[derive(Deserialize)]
struct RawInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawInterval> for TimeInterval {
    type Error = FinderError;

    fn try_from(raw: RawInterval) -> Result<Self> {
        TimeInterval::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    /// Build an interval, rejecting `start >= end` with [`FinderError::InvalidInterval`].
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start >= end {
            return Err(FinderError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whole minutes between `start` and `end`; partial minutes are truncated.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Weekday of the start instant (UTC).
    pub fn day_of_week(&self) -> Weekday {
        self.start.weekday()
    }

    /// True when the two intervals share at least one instant.
    /// Touching intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Push `end` out to `new_end` if that is later. Never shrinks, so the
    /// invariant holds.
    pub(crate) fn extend_to(&mut self, new_end: DateTime<Utc>) {
        self.end = self.end.max(new_end);
    }

    /// True when `instant` lies in `[start, end)`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}
