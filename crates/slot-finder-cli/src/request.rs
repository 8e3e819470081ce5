//! The JSON request accepted by `slotfind`, and how command-line flags override it.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use slot_finder::{DaysOfWeek, PersonCalendar, SearchConstraints, TimeInterval};

/// Request document. Every constraint field may be left out when the matching flag
/// is given instead. Flat `busy` intervals and per-person `people` calendars are
/// unioned.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FindRequest {
    pub search_start: Option<NaiveDate>,
    pub search_end: Option<NaiveDate>,
    pub min_duration_minutes: Option<i64>,
    pub working_hours_start: Option<NaiveTime>,
    pub working_hours_end: Option<NaiveTime>,
    pub days_of_week: Option<DaysOfWeek>,
    #[serde(default)]
    pub busy: Vec<TimeInterval>,
    #[serde(default)]
    pub people: Vec<PersonCalendar>,
}

/// Constraint overrides parsed from the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub min_duration: Option<i64>,
    pub working_hours: Option<(Option<NaiveTime>, Option<NaiveTime>)>,
    pub days: Option<DaysOfWeek>,
}

impl FindRequest {
    /// Parse a request document. Blank input is treated as an empty request.
    pub fn parse(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json).context("Failed to parse request JSON")
    }

    /// Apply command-line overrides and produce the search constraints.
    /// The search end defaults to the search start.
    pub fn constraints(&self, overrides: &Overrides) -> Result<SearchConstraints> {
        let search_start = overrides
            .start
            .or(self.search_start)
            .ok_or_else(|| anyhow!("Missing search start date (set search_start or --start)"))?;
        let search_end = overrides.end.or(self.search_end).unwrap_or(search_start);
        let min_duration = overrides
            .min_duration
            .or(self.min_duration_minutes)
            .ok_or_else(|| {
                anyhow!("Missing minimum duration (set min_duration_minutes or --min-duration)")
            })?;
        let (wh_start, wh_end) = overrides
            .working_hours
            .unwrap_or((self.working_hours_start, self.working_hours_end));

        let mut constraints = SearchConstraints::new(search_start, search_end, min_duration)
            .with_working_hours(wh_start, wh_end);
        if let Some(days) = overrides.days.clone().or_else(|| self.days_of_week.clone()) {
            constraints = constraints.with_days_of_week(days);
        }
        Ok(constraints)
    }

    /// Flat busy intervals and every person's calendar, ownership dropped.
    pub fn all_busy(&self) -> Vec<TimeInterval> {
        let mut all = self.busy.clone();
        all.extend(slot_finder::flatten_busy(&self.people));
        all
    }

    /// Everyone's calendars, with flat `busy` intervals under an `unassigned` entry.
    pub fn calendars(&self) -> Vec<PersonCalendar> {
        let mut calendars = self.people.clone();
        if !self.busy.is_empty() {
            calendars.push(PersonCalendar::new("unassigned", self.busy.clone()));
        }
        calendars
    }
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time(raw: &str) -> Result<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .with_context(|| format!("Invalid time '{}': expected HH:MM", raw))
}

/// Parse `HH:MM-HH:MM`. Either side may be empty for an open bound (`-17:00`, `09:00-`).
pub fn parse_working_hours(raw: &str) -> Result<(Option<NaiveTime>, Option<NaiveTime>)> {
    let (start, end) = raw
        .split_once('-')
        .with_context(|| format!("Invalid working hours '{}': expected HH:MM-HH:MM", raw))?;
    let bound = |s: &str| -> Result<Option<NaiveTime>> {
        if s.trim().is_empty() {
            Ok(None)
        } else {
            parse_time(s).map(Some)
        }
    };
    Ok((bound(start)?, bound(end)?))
}

/// Parse `1,2,3` (1 = Monday .. 7 = Sunday), or the shorthand `weekdays`.
pub fn parse_days(raw: &str) -> Result<DaysOfWeek> {
    if raw.trim().eq_ignore_ascii_case("weekdays") {
        return Ok(DaysOfWeek::weekdays());
    }
    let mut days = Vec::new();
    for part in raw.split(',') {
        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        let day: u8 = trimmed
            .parse()
            .with_context(|| format!("Invalid weekday number '{}'", trimmed))?;
        days.push(day);
    }
    if days.is_empty() {
        bail!("Empty weekday list");
    }
    Ok(DaysOfWeek::new(days)?)
}
