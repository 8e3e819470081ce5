//! Group free-slot search.
//!
//! Busy intervals from every targeted person are merged once into a single group
//! busy set. Each allowed day window then has that set subtracted, short gaps are
//! dropped, and the survivors are returned in chronological order.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::constraints::SearchConstraints;
use crate::error::Result;
use crate::interval::TimeInterval;
use crate::interval_set::{merge_overlapping, subtract};

/// A free time slot shared by the whole group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
    pub day_of_week: Weekday,
}

impl From<TimeInterval> for FreeSlot {
    fn from(interval: TimeInterval) -> Self {
        Self {
            start: interval.start(),
            end: interval.end(),
            duration_minutes: interval.duration_minutes(),
            day_of_week: interval.day_of_week(),
        }
    }
}

/// Find every window in which no busy interval applies, within the constraints.
///
/// `busy` is the flat union of all targeted people's commitments; ownership does
/// not matter because one person's conflict blocks the slot for everyone. Busy
/// intervals may lie partly or wholly outside the search range.
///
/// Slots never cross midnight, since each day is searched separately. Within a day,
/// adjacent free time always comes back as a single slot. An empty result means no
/// free time was found and is not an error.
///
/// # Errors
/// Fails with the matching [`crate::FinderError`] when the constraints are invalid;
/// nothing is computed in that case.
pub fn find_free_slots(
    busy: &[TimeInterval],
    constraints: &SearchConstraints,
) -> Result<Vec<FreeSlot>> {
    constraints.validate()?;

    let merged = merge_overlapping(busy);
    debug!(
        busy = busy.len(),
        merged = merged.len(),
        search_start = %constraints.search_start,
        search_end = %constraints.search_end,
        "merged group busy intervals"
    );

    let mut slots = Vec::new();
    let mut days_searched = 0usize;

    for date in constraints.dates() {
        let Some(window) = constraints.day_window(date) else {
            trace!(%date, "day skipped");
            continue;
        };
        days_searched += 1;

        // Only busy blocks that can touch this window matter; merged is sorted.
        let first = merged.partition_point(|b| b.end() <= window.start());
        let last = merged.partition_point(|b| b.start() < window.end());
        let relevant = &merged[first..last];

        let before = slots.len();
        slots.extend(
            subtract(&window, relevant)
                .into_iter()
                .filter(|gap| gap.duration_minutes() >= constraints.min_duration_minutes)
                .map(FreeSlot::from),
        );
        trace!(
            %date,
            window_start = %window.start(),
            window_end = %window.end(),
            slots = slots.len() - before,
            "day searched"
        );
    }

    debug!(days_searched, slots = slots.len(), "free-slot search complete");
    Ok(slots)
}

/// The earliest slot of at least `min_duration_minutes`, if any.
///
/// Delegates to [`find_free_slots`].
pub fn find_first_free_slot(
    busy: &[TimeInterval],
    constraints: &SearchConstraints,
) -> Result<Option<FreeSlot>> {
    Ok(find_free_slots(busy, constraints)?.into_iter().next())
}

/// Sum of the durations of `slots`, in minutes.
pub fn total_free_minutes(slots: &[FreeSlot]) -> i64 {
    slots.iter().map(|s| s.duration_minutes).sum()
}
