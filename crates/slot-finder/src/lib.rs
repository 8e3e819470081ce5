//! # slot-finder
//!
//! Computes the time windows in which every member of a group is free at once.
//!
//! Callers hand over busy intervals that have already been resolved for the people
//! they care about, plus a search range and constraints. The finder unions all busy
//! time, subtracts it from each allowed day window and returns the remaining free
//! segments in chronological order. Recurrence expansion is not done here: recurring
//! commitments must arrive as concrete intervals.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
//! use slot_finder::{find_free_slots, SearchConstraints, TimeInterval};
//!
//! let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
//! let busy = vec![TimeInterval::new(
//!     Utc.with_ymd_and_hms(2025, 1, 6, 9, 0, 0).unwrap(),
//!     Utc.with_ymd_and_hms(2025, 1, 6, 10, 0, 0).unwrap(),
//! )
//! .unwrap()];
//!
//! let constraints = SearchConstraints::new(day, day, 30).with_working_hours(
//!     NaiveTime::from_hms_opt(9, 0, 0),
//!     NaiveTime::from_hms_opt(18, 0, 0),
//! );
//!
//! let slots = find_free_slots(&busy, &constraints).unwrap();
//! assert_eq!(slots.len(), 1);
//! assert_eq!(slots[0].duration_minutes, 480);
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — `TimeInterval`, the validated half-open `[start, end)` value type
//! - [`interval_set`] — merge-overlapping and subtract-from-window primitives
//! - [`constraints`] — `SearchConstraints` (date range, minimum duration, working hours, weekdays)
//! - [`finder`] — the group free-slot search itself
//! - [`availability`] — per-person calendars, union into group busy blocks
//! - [`error`] — Error types

pub mod availability;
pub mod constraints;
pub mod error;
pub mod finder;
pub mod interval;
pub mod interval_set;

pub use availability::{
    find_group_free_slots, flatten_busy, group_busy_blocks, BusyBlock, BusyInterval,
    PersonCalendar, PrivacyLevel,
};
pub use constraints::{DaysOfWeek, SearchConstraints};
pub use error::FinderError;
pub use finder::{find_first_free_slot, find_free_slots, total_free_minutes, FreeSlot};
pub use interval::TimeInterval;
pub use interval_set::{merge_overlapping, subtract};
