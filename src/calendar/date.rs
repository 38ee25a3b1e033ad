use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("Failed to parse date '{0}'")]
    ParseError(String),
}

/// A single local calendar day.
///
/// Ordering follows the day's midnight instant, which for a Gregorian day is
/// the same as ordering by `(year, month, day)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "NaiveDate", into = "NaiveDate")]
pub struct CalendarDate {
    date: NaiveDate,
}

impl CalendarDate {
    /// `month` is 1-based. Fails instead of rolling over, so February 30th
    /// is an error rather than March 1st.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    pub fn from_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self::from(instant.date_naive())
    }

    pub fn today() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn naive(&self) -> NaiveDate {
        self.date
    }

    /// Midnight of this day in `tz`. Falls forward to the first valid
    /// instant of the day when midnight is skipped by a DST transition.
    pub fn midnight_in<Tz: TimeZone>(&self, tz: &Tz) -> DateTime<Tz> {
        let midnight = self.date.and_time(NaiveTime::MIN);
        if let Some(instant) = tz.from_local_datetime(&midnight).earliest() {
            return instant;
        }
        (1..24)
            .filter_map(|hour| {
                let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
                tz.from_local_datetime(&self.date.and_time(time)).earliest()
            })
            .next()
            .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
    }

    pub fn local_midnight(&self) -> DateTime<Local> {
        self.midnight_in(&Local)
    }

    /// Shifts by `days`, saturating at the earliest or latest representable
    /// date.
    pub fn add_days(&self, days: i64) -> Self {
        let magnitude = Days::new(days.unsigned_abs());
        let shifted = if days >= 0 {
            self.date.checked_add_days(magnitude)
        } else {
            self.date.checked_sub_days(magnitude)
        };
        Self::from(shifted.unwrap_or_else(|| saturated(days >= 0)))
    }

    pub fn add_weeks(&self, weeks: i64) -> Self {
        self.add_days(weeks.saturating_mul(7))
    }

    /// Shifts by whole months, pinning the day to the end of a shorter
    /// target month (Jan 31 + 1 month = Feb 28/29). Saturates like
    /// [`CalendarDate::add_days`].
    pub fn add_months(&self, months: i64) -> Self {
        let total = (self.year() as i64 * 12 + (self.month() as i64 - 1)).saturating_add(months);
        let month = total.rem_euclid(12) as u32 + 1;
        let date = i32::try_from(total.div_euclid(12)).ok().and_then(|year| {
            let day = self.day().min(super::span::days_in_month(year, month));
            NaiveDate::from_ymd_opt(year, month, day)
        });
        Self::from(date.unwrap_or_else(|| saturated(months >= 0)))
    }

    /// Signed whole-day distance from `self` to `other`.
    pub fn days_until(&self, other: &CalendarDate) -> i64 {
        (other.date - self.date).num_days()
    }
}

fn saturated(forward: bool) -> NaiveDate {
    if forward {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self { date }
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.date
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    /// Accepts `YYYY-MM-DD` and `YYYY/MM/DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y/%m/%d"))
            .map(Self::from)
            .map_err(|_| DateError::ParseError(s.to_string()))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date.format("%Y-%m-%d"))
    }
}
