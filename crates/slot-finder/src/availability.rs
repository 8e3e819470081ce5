//! Per-person calendars and their reduction to a single group busy set.
//!
//! Each person's commitments arrive as a separate calendar. For finding common free
//! time only the union matters: one person's conflict removes the slot for everyone.
//! The union therefore drops ownership before the interval algebra runs.
//! [`group_busy_blocks`] can optionally report how many people sit behind each
//! merged block.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constraints::SearchConstraints;
use crate::error::Result;
use crate::finder::{self, FreeSlot};
use crate::interval::TimeInterval;
use crate::interval_set::{clip, merge_overlapping};

/// A busy interval tagged with the person it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    pub person_id: String,
    #[serde(flatten)]
    pub interval: TimeInterval,
}

impl BusyInterval {
    /// # Errors
    /// Returns [`crate::FinderError::InvalidInterval`] if `start >= end`.
    pub fn new(
        person_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self {
            person_id: person_id.into(),
            interval: TimeInterval::new(start, end)?,
        })
    }

    pub fn into_interval(self) -> TimeInterval {
        self.interval
    }
}

impl From<BusyInterval> for TimeInterval {
    fn from(busy: BusyInterval) -> Self {
        busy.interval
    }
}

/// One person's commitments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonCalendar {
    /// Opaque identifier for the person (e.g., a user id or email).
    pub person_id: String,
    /// Concrete busy intervals; recurring events must already be expanded.
    #[serde(default)]
    pub busy: Vec<TimeInterval>,
}

impl PersonCalendar {
    pub fn new(person_id: impl Into<String>, busy: Vec<TimeInterval>) -> Self {
        Self {
            person_id: person_id.into(),
            busy,
        }
    }

    /// Tag every interval with this calendar's owner.
    pub fn busy_intervals(&self) -> impl Iterator<Item = BusyInterval> + '_ {
        self.busy.iter().map(|interval| BusyInterval {
            person_id: self.person_id.clone(),
            interval: *interval,
        })
    }
}

/// Controls how much about the group leaks through [`group_busy_blocks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacyLevel {
    /// Report how many people are busy in each block.
    Full,
    /// Report only busy time ranges; `person_count` is 0 on every block.
    #[default]
    Opaque,
}

/// A merged group busy block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyBlock {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Distinct people with at least one commitment overlapping the block.
    /// Always 0 under [`PrivacyLevel::Opaque`].
    pub person_count: usize,
}

/// Union every calendar into one flat list of intervals, dropping ownership.
pub fn flatten_busy(calendars: &[PersonCalendar]) -> Vec<TimeInterval> {
    calendars
        .iter()
        .flat_map(|c| c.busy.iter().copied())
        .collect()
}

/// Find the slots in which every person in `calendars` is free.
///
/// Equivalent to [`finder::find_free_slots`] over [`flatten_busy`].
pub fn find_group_free_slots(
    calendars: &[PersonCalendar],
    constraints: &SearchConstraints,
) -> Result<Vec<FreeSlot>> {
    finder::find_free_slots(&flatten_busy(calendars), constraints)
}

/// Merged group busy time within the search range.
///
/// Working hours and the weekday filter are not applied. Blocks cover the whole
/// search range so callers can see what a day looked like outside working hours too.
///
/// # Errors
/// Fails if `constraints` are invalid.
pub fn group_busy_blocks(
    calendars: &[PersonCalendar],
    constraints: &SearchConstraints,
    privacy: PrivacyLevel,
) -> Result<Vec<BusyBlock>> {
    constraints.validate()?;
    let range = constraints.search_range()?;

    let clipped: Vec<TimeInterval> = flatten_busy(calendars)
        .iter()
        .filter_map(|b| clip(b, &range))
        .collect();

    let blocks = merge_overlapping(&clipped)
        .into_iter()
        .map(|block| BusyBlock {
            start: block.start(),
            end: block.end(),
            person_count: match privacy {
                PrivacyLevel::Full => count_people(calendars, &block),
                PrivacyLevel::Opaque => 0,
            },
        })
        .collect();

    Ok(blocks)
}

/// Distinct people with a commitment overlapping `block`.
fn count_people(calendars: &[PersonCalendar], block: &TimeInterval) -> usize {
    let mut people: Vec<&str> = calendars
        .iter()
        .filter(|c| c.busy.iter().any(|b| b.overlaps(block)))
        .map(|c| c.person_id.as_str())
        .collect();
    people.sort_unstable();
    people.dedup();
    people.len()
}
