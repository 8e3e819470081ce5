//! Search constraints: the date range, minimum slot length, daily working hours
//! and weekday allow-list that shape a free-slot search.
//!
//! Constraints are an immutable value passed into each call. There is no ambient
//! configuration, so concurrent searches with different settings cannot interfere.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{FinderError, Result};
use crate::interval::TimeInterval;

/// A non-empty set of ISO weekday numbers (1 = Monday .. 7 = Sunday).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DaysOfWeek(BTreeSet<u8>);

impl DaysOfWeek {
    /// Build a filter from weekday numbers. Duplicates are collapsed.
    ///
    /// # Errors
    /// Returns [`FinderError::InvalidDaysOfWeek`] if the set is empty or contains a
    /// number outside `1..=7`.
    pub fn new<I: IntoIterator<Item = u8>>(days: I) -> Result<Self> {
        let set: BTreeSet<u8> = days.into_iter().collect();
        if set.is_empty() {
            return Err(FinderError::InvalidDaysOfWeek(
                "filter must name at least one weekday".to_string(),
            ));
        }
        if let Some(bad) = set.iter().find(|d| !(1..=7).contains(*d)) {
            return Err(FinderError::InvalidDaysOfWeek(format!(
                "weekday number {} is outside 1 (Monday) ..= 7 (Sunday)",
                bad
            )));
        }
        Ok(Self(set))
    }

    /// Monday through Friday.
    pub fn weekdays() -> Self {
        Self((1..=5).collect())
    }

    pub fn contains(&self, day: Weekday) -> bool {
        // number_from_monday() is always 1..=7.
        self.0.contains(&(day.number_from_monday() as u8))
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.iter().copied()
    }
}

impl TryFrom<Vec<u8>> for DaysOfWeek {
    type Error = FinderError;

    fn try_from(days: Vec<u8>) -> Result<Self> {
        DaysOfWeek::new(days)
    }
}

impl From<DaysOfWeek> for Vec<u8> {
    fn from(days: DaysOfWeek) -> Self {
        days.0.into_iter().collect()
    }
}

/// Everything a free-slot search needs besides the busy data.
///
/// `search_start` and `search_end` are inclusive calendar dates. A missing
/// working-hours bound leaves that side of the day open (midnight / end of day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConstraints {
    pub search_start: NaiveDate,
    pub search_end: NaiveDate,
    pub min_duration_minutes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours_start: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours_end: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<DaysOfWeek>,
}

impl SearchConstraints {
    /// Constraints with no working hours and no weekday filter.
    pub fn new(search_start: NaiveDate, search_end: NaiveDate, min_duration_minutes: i64) -> Self {
        Self {
            search_start,
            search_end,
            min_duration_minutes,
            working_hours_start: None,
            working_hours_end: None,
            days_of_week: None,
        }
    }

    pub fn with_working_hours(mut self, start: Option<NaiveTime>, end: Option<NaiveTime>) -> Self {
        self.working_hours_start = start;
        self.working_hours_end = end;
        self
    }

    pub fn with_days_of_week(mut self, days: DaysOfWeek) -> Self {
        self.days_of_week = Some(days);
        self
    }

    /// Check the constraints.
    ///
    /// # Errors
    /// - [`FinderError::InvalidRange`] if `search_start > search_end`
    /// - [`FinderError::InvalidDuration`] if `min_duration_minutes < 1`
    /// - [`FinderError::InvalidWorkingHours`] if both bounds are set and `start >= end`
    pub fn validate(&self) -> Result<()> {
        if self.search_start > self.search_end {
            return Err(FinderError::InvalidRange {
                start: self.search_start,
                end: self.search_end,
            });
        }
        if self.min_duration_minutes < 1 {
            return Err(FinderError::InvalidDuration(self.min_duration_minutes));
        }
        if let (Some(start), Some(end)) = (self.working_hours_start, self.working_hours_end) {
            if start >= end {
                return Err(FinderError::InvalidWorkingHours { start, end });
            }
        }
        Ok(())
    }

    /// The whole search range as timestamps: `[search_start@00:00, (search_end + 1)@00:00)`.
    ///
    /// Assumes the constraints have been validated.
    pub fn search_range(&self) -> Result<TimeInterval> {
        TimeInterval::new(start_of_day(self.search_start), end_of_day(self.search_end))
    }

    /// Every date from `search_start` to `search_end`, inclusive.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.search_start
            .iter_days()
            .take_while(move |d| *d <= self.search_end)
    }

    /// Whether `date` passes the weekday filter. Always true without a filter.
    pub fn allows(&self, date: NaiveDate) -> bool {
        self.days_of_week
            .as_ref()
            .is_none_or(|days| days.contains(date.weekday()))
    }

    /// The searchable part of `date`: working hours (or the whole day), clipped to
    /// the search range. `None` when the weekday is filtered out or nothing remains.
    pub fn day_window(&self, date: NaiveDate) -> Option<TimeInterval> {
        if !self.allows(date) {
            return None;
        }

        let day_start = match self.working_hours_start {
            Some(t) => date.and_time(t).and_utc(),
            None => start_of_day(date),
        };
        let day_end = match self.working_hours_end {
            Some(t) => date.and_time(t).and_utc(),
            None => end_of_day(date),
        };

        let start = day_start.max(start_of_day(self.search_start));
        let end = day_end.min(end_of_day(self.search_end));
        TimeInterval::new(start, end).ok()
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Midnight at the start of the following day, standing in for `24:00`.
fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.succ_opt()
        .map(start_of_day)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
