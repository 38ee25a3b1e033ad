use serde::Serialize;

use crate::calendar::span::{DAYS_IN_WEEK, snap_end};
use crate::calendar::{CalendarDate, SelectType, SelectedDates};
use crate::selection::selectable::is_selectable;
use crate::selection::view_state::ViewState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Sunday,
    Weekday,
    Saturday,
}

impl DayType {
    /// First grid column reads as Sunday and the last as Saturday, whatever
    /// weekday the row actually starts on.
    pub fn from_column(column: u32) -> Self {
        match column {
            0 => Self::Sunday,
            c if c == DAYS_IN_WEEK - 1 => Self::Saturday,
            _ => Self::Weekday,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Range {
    OneDay,
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DayState {
    Disabled { day_type: DayType, today: bool, dot: bool },
    Normal { day_type: DayType, today: bool, dot: bool },
    Selected { range: Range, day_type: DayType, today: bool, dot: bool },
}

impl DayState {
    pub fn day_type(&self) -> DayType {
        match self {
            Self::Disabled { day_type, .. }
            | Self::Normal { day_type, .. }
            | Self::Selected { day_type, .. } => *day_type,
        }
    }

    pub fn is_today(&self) -> bool {
        match self {
            Self::Disabled { today, .. } | Self::Normal { today, .. } | Self::Selected { today, .. } => {
                *today
            }
        }
    }

    pub fn has_dot(&self) -> bool {
        match self {
            Self::Disabled { dot, .. } | Self::Normal { dot, .. } | Self::Selected { dot, .. } => *dot,
        }
    }

    pub fn range(&self) -> Option<Range> {
        match self {
            Self::Selected { range, .. } => Some(*range),
            _ => None,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled { .. })
    }
}

/// Span to highlight for the current selection. While a range waits for its
/// second tap, day mode shows only the anchor and week/month modes preview
/// the anchor's whole week or month.
///
/// # Panics
///
/// A one-day selection with a start and no end cannot come out of the
/// transition engine or pass validation; meeting one here is a bug.
pub fn effective_range(state: &ViewState) -> Option<(CalendarDate, CalendarDate)> {
    let selected = state.selected_dates();
    match (selected.start, selected.end) {
        (Some(start), Some(end)) => Some((start, end)),
        (Some(start), None) => match state.select_type() {
            SelectType::OneDay => {
                panic!("one-day selection has start {start} without an end")
            }
            SelectType::DayRange { .. } => Some((start, start)),
            select_type @ (SelectType::WeekRange { .. } | SelectType::MonthRange { .. }) => {
                let end = snap_end(&start, &select_type, &state.bounds(), state.week_start());
                Some((start, end))
            }
        },
        (None, _) => None,
    }
}

/// Display state for `date` sitting in grid column `column`.
pub fn classify(
    date: &CalendarDate,
    state: &ViewState,
    today: &CalendarDate,
    column: u32,
    dot: bool,
) -> DayState {
    let day_type = DayType::from_column(column);
    let today = state.today_selected() && date == today;

    if !is_selectable(date, state) {
        return DayState::Disabled { day_type, today, dot };
    }

    let Some((range_start, range_end)) = effective_range(state) else {
        return DayState::Normal { day_type, today, dot };
    };

    let range = if *date == range_start && *date == range_end {
        Range::OneDay
    } else if *date == range_start {
        Range::Start
    } else if *date == range_end {
        Range::End
    } else if SelectedDates::range(range_start, range_end).contains(date) {
        Range::Middle
    } else {
        return DayState::Normal { day_type, today, dot };
    };

    DayState::Selected { range, day_type, today, dot }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::span::column_in_week;
    use crate::calendar::{DateBounds, SelectedDates};
    use chrono::Weekday;
    use pretty_assertions::assert_eq;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn state_of(select_type: SelectType, selected: SelectedDates) -> ViewState {
        ViewState::new(select_type)
            .with_start_date(Some(date(2024, 1, 3)))
            .replace_selection(selected)
    }

    fn classify_on(state: &ViewState, d: CalendarDate) -> DayState {
        let column = column_in_week(&d, state.week_start());
        classify(&d, state, &date(2000, 1, 1), column, false)
    }

    #[test]
    fn day_range_scenario() {
        let state = state_of(
            SelectType::day_range(None),
            SelectedDates::range(date(2024, 1, 10), date(2024, 1, 15)),
        );

        assert_eq!(classify_on(&state, date(2024, 1, 10)).range(), Some(Range::Start));
        assert_eq!(classify_on(&state, date(2024, 1, 12)).range(), Some(Range::Middle));
        assert_eq!(classify_on(&state, date(2024, 1, 15)).range(), Some(Range::End));
        assert_eq!(
            classify_on(&state, date(2024, 1, 20)),
            DayState::Normal { day_type: DayType::Saturday, today: false, dot: false }
        );
        assert_eq!(
            classify_on(&state, date(2024, 1, 2)),
            DayState::Disabled { day_type: DayType::Weekday, today: false, dot: false }
        );
    }

    #[test]
    fn single_day_range_is_one_day() {
        let state = state_of(SelectType::OneDay, SelectedDates::single(date(2024, 1, 10)));

        assert_eq!(classify_on(&state, date(2024, 1, 10)).range(), Some(Range::OneDay));
        assert_eq!(classify_on(&state, date(2024, 1, 11)).range(), None);
    }

    #[test]
    fn day_range_anchor_previews_only_itself() {
        let state = state_of(SelectType::day_range(None), SelectedDates::anchored(date(2024, 1, 10)));

        assert_eq!(classify_on(&state, date(2024, 1, 10)).range(), Some(Range::OneDay));
        assert_eq!(classify_on(&state, date(2024, 1, 11)).range(), None);
    }

    #[test]
    fn week_range_anchor_previews_whole_week() {
        let state = state_of(SelectType::week_range(None), SelectedDates::anchored(date(2024, 1, 7)));

        assert_eq!(classify_on(&state, date(2024, 1, 7)).range(), Some(Range::Start));
        assert_eq!(classify_on(&state, date(2024, 1, 10)).range(), Some(Range::Middle));
        assert_eq!(classify_on(&state, date(2024, 1, 13)).range(), Some(Range::End));
        assert_eq!(classify_on(&state, date(2024, 1, 14)).range(), None);
    }

    #[test]
    fn week_preview_is_clamped_to_end_bound() {
        let state = ViewState::new(SelectType::week_range(None))
            .with_end_date(Some(date(2024, 1, 10)))
            .replace_selection(SelectedDates::anchored(date(2024, 1, 7)));

        assert_eq!(classify_on(&state, date(2024, 1, 10)).range(), Some(Range::End));
        assert!(classify_on(&state, date(2024, 1, 11)).is_disabled());
    }

    #[test]
    fn month_range_anchor_previews_whole_month() {
        let state = state_of(SelectType::month_range(None), SelectedDates::anchored(date(2024, 2, 1)));

        assert_eq!(classify_on(&state, date(2024, 2, 1)).range(), Some(Range::Start));
        assert_eq!(classify_on(&state, date(2024, 2, 15)).range(), Some(Range::Middle));
        assert_eq!(classify_on(&state, date(2024, 2, 29)).range(), Some(Range::End));
        assert_eq!(classify_on(&state, date(2024, 3, 1)).range(), None);
    }

    #[test]
    fn limit_exceeded_days_render_disabled() {
        let state = state_of(SelectType::day_range(Some(5)), SelectedDates::anchored(date(2024, 1, 10)));

        assert!(classify_on(&state, date(2024, 1, 16)).is_disabled());
        assert!(!classify_on(&state, date(2024, 1, 14)).is_disabled());
    }

    #[test]
    fn today_flag_requires_today_selected() {
        let today = date(2024, 1, 10);
        let plain = ViewState::new(SelectType::OneDay).with_today_selected(false);
        let marked = plain.with_today_selected(true);

        assert!(!classify(&today, &plain, &today, 3, false).is_today());
        assert!(classify(&today, &marked, &today, 3, false).is_today());
        assert!(!classify(&date(2024, 1, 11), &marked, &today, 4, false).is_today());
    }

    #[test]
    fn dot_passes_through_every_state() {
        let state = state_of(SelectType::OneDay, SelectedDates::single(date(2024, 1, 10)));
        let today = date(2000, 1, 1);

        assert!(classify(&date(2024, 1, 1), &state, &today, 1, true).has_dot());
        assert!(classify(&date(2024, 1, 9), &state, &today, 2, true).has_dot());
        assert!(classify(&date(2024, 1, 10), &state, &today, 3, true).has_dot());
    }

    #[test]
    fn day_type_follows_column() {
        assert_eq!(DayType::from_column(0), DayType::Sunday);
        assert_eq!(DayType::from_column(3), DayType::Weekday);
        assert_eq!(DayType::from_column(6), DayType::Saturday);
    }

    #[test]
    fn monday_first_grid_uses_columns_for_day_type() {
        let state = ViewState::default().with_week_start(Weekday::Mon);

        assert_eq!(classify_on(&state, date(2024, 1, 8)).day_type(), DayType::Sunday);
        assert_eq!(classify_on(&state, date(2024, 1, 14)).day_type(), DayType::Saturday);
    }

    #[test]
    #[should_panic(expected = "without an end")]
    fn one_day_with_dangling_start_panics() {
        let state = ViewState::new(SelectType::OneDay)
            .replace_selection(SelectedDates::anchored(date(2024, 1, 10)));

        classify(&date(2024, 1, 10), &state, &date(2024, 1, 1), 3, false);
    }

    #[test]
    fn no_selection_is_normal() {
        let state = ViewState::new(SelectType::day_range(None))
            .with_bounds(DateBounds::unbounded());

        assert_eq!(
            classify_on(&state, date(2024, 1, 10)),
            DayState::Normal { day_type: DayType::Weekday, today: false, dot: false }
        );
    }
}
