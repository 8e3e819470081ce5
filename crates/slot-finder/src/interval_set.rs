//! Merge and subtract primitives over [`TimeInterval`] sequences.
//!
//! Nothing here knows about calendars, people, or working hours.

use crate::interval::TimeInterval;

/// Merge overlapping or touching intervals.
///
/// Input may be unsorted. Output is sorted by start, with no two intervals
/// overlapping or touching: `[09:00, 10:00)` and `[10:00, 11:00)` become `[09:00, 11:00)`.
pub fn merge_overlapping(intervals: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut sorted: Vec<TimeInterval> = intervals.to_vec();
    sorted.sort_by_key(|i| (i.start(), i.end()));

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    for interval in sorted {
        if let Some(last) = merged.last_mut() {
            if interval.start() <= last.end() {
                // Overlapping or touching: extend the current block.
                last.extend_to(interval.end());
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

/// Clip `interval` to `window`, or `None` when they do not overlap.
pub fn clip(interval: &TimeInterval, window: &TimeInterval) -> Option<TimeInterval> {
    if !interval.overlaps(window) {
        return None;
    }
    TimeInterval::new(
        interval.start().max(window.start()),
        interval.end().min(window.end()),
    )
    .ok()
}

/// Free segments of `window` once `busy` is removed.
///
/// `busy` must already be merged (sorted, non-overlapping), for example by
/// [`merge_overlapping`]. Elements may extend past the window or lie wholly
/// outside it; they are clipped or ignored respectively.
pub fn subtract(window: &TimeInterval, busy: &[TimeInterval]) -> Vec<TimeInterval> {
    let mut free = Vec::new();
    let mut cursor = window.start();

    for blocked in busy.iter().filter_map(|b| clip(b, window)) {
        // Rejected (no gap) when the cursor already sits at or past the block.
        if let Ok(gap) = TimeInterval::new(cursor, blocked.start()) {
            free.push(gap);
        }
        cursor = cursor.max(blocked.end());
    }

    // Trailing gap after the last busy period.
    if let Ok(tail) = TimeInterval::new(cursor, window.end()) {
        free.push(tail);
    }

    free
}
