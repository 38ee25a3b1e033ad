use crate::calendar::span::MONTHS_IN_YEAR;
use crate::calendar::{CalendarDate, DateBounds};

/// Months since January of year 0.
fn absolute_month(year: i32, month: u32) -> i64 {
    year as i64 * MONTHS_IN_YEAR as i64 + month as i64 - 1
}

/// Absolute month that position 0 maps to: the start bound's month, or
/// January of year 0 when the start is open.
fn origin(bounds: &DateBounds) -> i64 {
    bounds
        .start
        .map(|start| absolute_month(start.year(), start.month()))
        .unwrap_or(0)
}

/// Number of scrollable months, or `None` when the end is open.
pub fn month_count(bounds: &DateBounds) -> Option<usize> {
    let end = bounds.end?;
    let count = absolute_month(end.year(), end.month()) - origin(bounds) + 1;
    Some(count.max(0) as usize)
}

pub fn month_at(position: usize, bounds: &DateBounds) -> Option<(i32, u32)> {
    if month_count(bounds).is_some_and(|count| position >= count) {
        return None;
    }
    let absolute = origin(bounds) + position as i64;
    let year = i32::try_from(absolute.div_euclid(MONTHS_IN_YEAR as i64)).ok()?;
    let month = absolute.rem_euclid(MONTHS_IN_YEAR as i64) as u32 + 1;
    Some((year, month))
}

/// Position of the month holding `date`, or `None` if the date is outside
/// the bounds.
pub fn position_of_date(date: &CalendarDate, bounds: &DateBounds) -> Option<usize> {
    if !bounds.contains(date) {
        return None;
    }
    let position = absolute_month(date.year(), date.month()) - origin(bounds);
    usize::try_from(position).ok()
}
