use chrono::Weekday;

use crate::calendar::span::{snap_end, snap_start};
use crate::calendar::{CalendarDate, DateBounds, SelectType, SelectedDates};

/// Next selection after an accepted tap on `clicked`.
///
/// Callers must have checked selectability first; this only decides shape
/// and ordering. Range modes open a new selection on the first tap, close it
/// on the second, and start over on the third. The result never has
/// `start > end`.
pub fn transition(
    prev: &SelectedDates,
    clicked: CalendarDate,
    select_type: &SelectType,
    bounds: &DateBounds,
    week_start: Weekday,
) -> SelectedDates {
    let start_of = |date: &CalendarDate| snap_start(date, select_type, bounds, week_start);
    let end_of = |date: &CalendarDate| snap_end(date, select_type, bounds, week_start);

    match select_type {
        SelectType::OneDay => {
            if prev.start == Some(clicked) && prev.end == Some(clicked) {
                SelectedDates::empty()
            } else {
                SelectedDates::single(clicked)
            }
        }
        SelectType::DayRange { .. } | SelectType::WeekRange { .. } | SelectType::MonthRange { .. } => {
            match prev.in_progress() {
                Some(anchor) if clicked < anchor => {
                    SelectedDates::range(start_of(&clicked), end_of(&anchor))
                }
                Some(anchor) => SelectedDates::range(anchor, end_of(&clicked)),
                None => SelectedDates::anchored(start_of(&clicked)),
            }
        }
    }
}
