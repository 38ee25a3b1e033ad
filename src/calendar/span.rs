use chrono::{Datelike, Weekday};

use super::date::CalendarDate;
use super::select_type::SelectType;

pub const DAYS_IN_WEEK: u32 = 7;
pub const MONTHS_IN_YEAR: u32 = 12;

/// Inclusive global window outside of which no day can be selected.
/// `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateBounds {
    pub start: Option<CalendarDate>,
    pub end: Option<CalendarDate>,
}

impl DateBounds {
    pub fn new(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn is_before_start(&self, date: &CalendarDate) -> bool {
        self.start.is_some_and(|start| *date < start)
    }

    pub fn is_after_end(&self, date: &CalendarDate) -> bool {
        self.end.is_some_and(|end| *date > end)
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        !self.is_before_start(date) && !self.is_after_end(date)
    }

    pub fn clamp(&self, date: CalendarDate) -> CalendarDate {
        match (self.start, self.end) {
            (Some(start), _) if date < start => start,
            (_, Some(end)) if date > end => end,
            _ => date,
        }
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Zero-based column of `date` in a week row that begins on `first_day`.
pub fn column_in_week(date: &CalendarDate, first_day: Weekday) -> u32 {
    let weekday = date.naive().weekday().num_days_from_monday();
    (weekday + DAYS_IN_WEEK - first_day.num_days_from_monday()) % DAYS_IN_WEEK
}

pub fn week_start(date: &CalendarDate, first_day: Weekday) -> CalendarDate {
    date.add_days(-(column_in_week(date, first_day) as i64))
}

pub fn week_end(date: &CalendarDate, first_day: Weekday) -> CalendarDate {
    week_start(date, first_day).add_days(DAYS_IN_WEEK as i64 - 1)
}

pub fn month_start(date: &CalendarDate) -> CalendarDate {
    date.add_days(1 - date.day() as i64)
}

pub fn month_end(date: &CalendarDate) -> CalendarDate {
    let last = days_in_month(date.year(), date.month());
    date.add_days(last as i64 - date.day() as i64)
}

/// Start of the span a click on `date` opens under `select_type`, clamped to
/// the global bounds.
pub fn snap_start(
    date: &CalendarDate,
    select_type: &SelectType,
    bounds: &DateBounds,
    first_day: Weekday,
) -> CalendarDate {
    let natural = match select_type {
        SelectType::OneDay | SelectType::DayRange { .. } => *date,
        SelectType::WeekRange { .. } => week_start(date, first_day),
        SelectType::MonthRange { .. } => month_start(date),
    };
    bounds.clamp(natural)
}

/// End of the span a click on `date` closes under `select_type`, clamped to
/// the global bounds.
pub fn snap_end(
    date: &CalendarDate,
    select_type: &SelectType,
    bounds: &DateBounds,
    first_day: Weekday,
) -> CalendarDate {
    let natural = match select_type {
        SelectType::OneDay | SelectType::DayRange { .. } => *date,
        SelectType::WeekRange { .. } => week_end(date, first_day),
        SelectType::MonthRange { .. } => month_end(date),
    };
    bounds.clamp(natural)
}

/// Inclusive day span: the 10th through the 14th is five days.
pub fn day_span(a: &CalendarDate, b: &CalendarDate) -> u32 {
    a.days_until(b).unsigned_abs() as u32 + 1
}

pub fn day_limit_exceeded(limit: u32, a: &CalendarDate, b: &CalendarDate) -> bool {
    day_span(a, b) > limit
}

/// Dates reachable from `anchor` while staying within `limit` weeks,
/// counting the anchor's own week.
pub fn week_limit_window(
    limit: u32,
    anchor: &CalendarDate,
    first_day: Weekday,
) -> (CalendarDate, CalendarDate) {
    let reach = limit.saturating_sub(1) as i64;
    (
        week_start(&anchor.add_weeks(-reach), first_day),
        week_end(&anchor.add_weeks(reach), first_day),
    )
}

pub fn week_limit_exceeded(
    limit: u32,
    anchor: &CalendarDate,
    candidate: &CalendarDate,
    first_day: Weekday,
) -> bool {
    let (first, last) = week_limit_window(limit, anchor, first_day);
    *candidate < first || *candidate > last
}

/// Dates reachable from `anchor` while staying within `limit` months,
/// counting the anchor's own month.
pub fn month_limit_window(limit: u32, anchor: &CalendarDate) -> (CalendarDate, CalendarDate) {
    let reach = limit.saturating_sub(1) as i64;
    (
        month_start(&anchor.add_months(-reach)),
        month_end(&anchor.add_months(reach)),
    )
}

pub fn month_limit_exceeded(limit: u32, anchor: &CalendarDate, candidate: &CalendarDate) -> bool {
    let (first, last) = month_limit_window(limit, anchor);
    *candidate < first || *candidate > last
}
