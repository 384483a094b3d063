//! Departure-time model.
//!
//! Every traffic model in the workspace takes the query instant explicitly
//! as a [`DepartureTime`] instead of reading the wall clock, so predictions
//! are reproducible and tests can pin a weekday rush hour or a quiet
//! Sunday morning.  Only the application boundary calls
//! [`DepartureTime::now`].
//!
//! The wrapped value is *local civil time*: congestion curves are indexed by
//! the hour a driver sees on their dashboard clock, not by UTC.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Accepted textual form: `2026-03-02T08:15`.
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A local date and time at which a trip starts (or is queried).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct DepartureTime(pub NaiveDateTime);

impl DepartureTime {
    /// Current local time.
    pub fn now() -> Self {
        DepartureTime(Local::now().naive_local())
    }

    /// Build from calendar components; seconds are zero.
    pub fn from_ymd_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .map(DepartureTime)
            .ok_or_else(|| {
                CoreError::Time(format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}"))
            })
    }

    #[inline]
    pub fn hour(self) -> u32 {
        self.0.hour()
    }

    #[inline]
    pub fn minute(self) -> u32 {
        self.0.minute()
    }

    #[inline]
    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    #[inline]
    pub fn is_weekend(self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    #[inline]
    pub fn is_friday(self) -> bool {
        self.weekday() == Weekday::Fri
    }

    /// Hour of day with the minutes as a fraction, e.g. 7:45 → 7.75.
    #[inline]
    pub fn fractional_hour(self) -> f64 {
        self.hour() as f64 + self.minute() as f64 / 60.0
    }

    /// The instant `minutes` later (or earlier, if negative).  Saturates at
    /// the ends of the representable calendar.
    pub fn plus_minutes(self, minutes: i64) -> Self {
        TimeDelta::try_minutes(minutes)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(DepartureTime)
            .unwrap_or_else(|| {
                DepartureTime(if minutes < 0 { NaiveDateTime::MIN } else { NaiveDateTime::MAX })
            })
    }
}

impl fmt::Display for DepartureTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%a %Y-%m-%d %H:%M"))
    }
}

impl FromStr for DepartureTime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), PARSE_FORMAT)
            .map(DepartureTime)
            .map_err(|_| CoreError::Time(s.to_owned()))
    }
}
