use chrono::Weekday;
use serde::Serialize;

use crate::calendar::span::{DAYS_IN_WEEK, column_in_week, days_in_month};
use crate::calendar::CalendarDate;
use crate::selection::{DayState, ViewState, classify};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub week_start: String,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Week {
    pub days: Vec<DayCell>,
}

/// One grid slot. Slots before the 1st and after the last day of the month
/// are blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub date: Option<CalendarDate>,
    pub state: Option<DayState>,
}

impl DayCell {
    pub fn blank() -> Self {
        Self { date: None, state: None }
    }

    pub fn day(date: CalendarDate, state: DayState) -> Self {
        Self {
            date: Some(date),
            state: Some(state),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.date.is_none()
    }
}

impl MonthLayout {
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    pub fn cell(&self, date: &CalendarDate) -> Option<&DayCell> {
        self.cells().find(|cell| cell.date.as_ref() == Some(date))
    }

    pub fn state_of(&self, date: &CalendarDate) -> Option<DayState> {
        self.cell(date).and_then(|cell| cell.state)
    }
}

/// Classifies every day of `year`/`month` against `state` and lays the days
/// out in week rows starting on `state.week_start()`.
pub fn calculate_layout(
    year: i32,
    month: u32,
    state: &ViewState,
    today: &CalendarDate,
    has_dot: impl Fn(&CalendarDate) -> bool,
) -> MonthLayout {
    let week_start = state.week_start();
    let Ok(first_day) = CalendarDate::new(year, month, 1) else {
        return empty_layout(year, month, week_start);
    };

    let mut weeks = Vec::new();
    let mut current_week = Week { days: Vec::new() };

    for _ in 0..column_in_week(&first_day, week_start) {
        current_week.days.push(DayCell::blank());
    }

    for offset in 0..days_in_month(year, month) {
        let date = first_day.add_days(offset as i64);
        let column = column_in_week(&date, week_start);
        let day_state = classify(&date, state, today, column, has_dot(&date));
        current_week.days.push(DayCell::day(date, day_state));

        if column == DAYS_IN_WEEK - 1 {
            weeks.push(current_week);
            current_week = Week { days: Vec::new() };
        }
    }

    if !current_week.days.is_empty() {
        while current_week.days.len() < DAYS_IN_WEEK as usize {
            current_week.days.push(DayCell::blank());
        }
        weeks.push(current_week);
    }

    MonthLayout {
        year,
        month,
        week_start: week_start.to_string(),
        weeks,
    }
}

fn empty_layout(year: i32, month: u32, week_start: Weekday) -> MonthLayout {
    MonthLayout {
        year,
        month,
        week_start: week_start.to_string(),
        weeks: Vec::new(),
    }
}
