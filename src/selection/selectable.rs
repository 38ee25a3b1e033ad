use chrono::Weekday;
use thiserror::Error;

use crate::calendar::span::{
    day_limit_exceeded, month_limit_exceeded, snap_end, snap_start, week_limit_exceeded,
};
use crate::calendar::{CalendarDate, DateBounds, SelectType, SelectedDates};
use crate::selection::view_state::ViewState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Selected start {date} is outside the selectable range")]
    StartOutOfBounds { date: CalendarDate },
    #[error("Selected end {date} is outside the selectable range")]
    EndOutOfBounds { date: CalendarDate },
    #[error("Selection has an end date without a start date")]
    EndWithoutStart,
    #[error("Selection start {start} is after its end {end}")]
    Reversed { start: CalendarDate, end: CalendarDate },
    #[error("Selection {start}..{end} exceeds the {select_type} limit of {limit}")]
    LimitExceeded {
        start: CalendarDate,
        end: CalendarDate,
        select_type: &'static str,
        limit: u32,
    },
    #[error("One-day selection must start and end on the same day")]
    InvalidOneDay,
}

/// Why a day can or cannot take a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selectability {
    Selectable,
    BeforeStartDate { bound: CalendarDate },
    AfterEndDate { bound: CalendarDate },
    LimitExceeded { anchor: CalendarDate, limit: u32 },
}

impl Selectability {
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Selectable)
    }
}

pub fn check_selectable(date: &CalendarDate, state: &ViewState) -> Selectability {
    let bounds = state.bounds();
    if let Some(bound) = bounds.start.filter(|start| date < start) {
        return Selectability::BeforeStartDate { bound };
    }
    if let Some(bound) = bounds.end.filter(|end| date > end) {
        return Selectability::AfterEndDate { bound };
    }

    if let Some(anchor) = state.selected_dates().in_progress() {
        let select_type = state.select_type();
        if let Some(limit) =
            limit_exceeded_by(&select_type, &anchor, date, &bounds, state.week_start())
        {
            return Selectability::LimitExceeded { anchor, limit };
        }
    }

    Selectability::Selectable
}

pub fn is_selectable(date: &CalendarDate, state: &ViewState) -> bool {
    check_selectable(date, state).is_selectable()
}

/// Returns the limit that closing a range at `candidate` would break.
///
/// Week and month modes test the snapped endpoint: the start of the
/// candidate's week or month when it precedes the anchor, its end otherwise.
pub fn limit_exceeded_by(
    select_type: &SelectType,
    anchor: &CalendarDate,
    candidate: &CalendarDate,
    bounds: &DateBounds,
    week_start: Weekday,
) -> Option<u32> {
    let limit = select_type.limit()?;
    let endpoint = if candidate < anchor {
        snap_start(candidate, select_type, bounds, week_start)
    } else {
        snap_end(candidate, select_type, bounds, week_start)
    };

    let exceeded = match select_type {
        SelectType::OneDay => false,
        SelectType::DayRange { .. } => day_limit_exceeded(limit, anchor, &endpoint),
        SelectType::WeekRange { .. } => week_limit_exceeded(limit, anchor, &endpoint, week_start),
        SelectType::MonthRange { .. } => month_limit_exceeded(limit, anchor, &endpoint),
    };
    exceeded.then_some(limit)
}

pub fn validate_selected_dates(
    state: &ViewState,
    selected: &SelectedDates,
) -> Result<(), SelectionError> {
    let bounds = state.bounds();
    let (start, end) = match (selected.start, selected.end) {
        (None, None) => return Ok(()),
        (None, Some(_)) => return Err(SelectionError::EndWithoutStart),
        (Some(start), end) => (start, end),
    };

    if !bounds.contains(&start) {
        return Err(SelectionError::StartOutOfBounds { date: start });
    }

    let select_type = state.select_type();
    let Some(end) = end else {
        return match select_type {
            SelectType::OneDay => Err(SelectionError::InvalidOneDay),
            _ => Ok(()),
        };
    };

    if !bounds.contains(&end) {
        return Err(SelectionError::EndOutOfBounds { date: end });
    }
    if start > end {
        return Err(SelectionError::Reversed { start, end });
    }
    if select_type == SelectType::OneDay && start != end {
        return Err(SelectionError::InvalidOneDay);
    }
    if let Some(limit) = limit_exceeded_by(&select_type, &start, &end, &bounds, state.week_start()) {
        return Err(SelectionError::LimitExceeded {
            start,
            end,
            select_type: select_type.name(),
            limit,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn january_bounds(select_type: SelectType) -> ViewState {
        ViewState::new(select_type).with_bounds(DateBounds::new(
            Some(date(2024, 1, 1)),
            Some(date(2024, 1, 31)),
        ))
    }

    fn anchored(state: ViewState, anchor: CalendarDate) -> ViewState {
        state.replace_selection(SelectedDates::anchored(anchor))
    }

    #[test]
    fn dates_outside_bounds_are_not_selectable() {
        let state = january_bounds(SelectType::OneDay);

        assert_eq!(
            check_selectable(&date(2023, 12, 25), &state),
            Selectability::BeforeStartDate { bound: date(2024, 1, 1) }
        );
        assert_eq!(
            check_selectable(&date(2024, 2, 1), &state),
            Selectability::AfterEndDate { bound: date(2024, 1, 31) }
        );
        assert!(is_selectable(&date(2024, 1, 1), &state));
        assert!(is_selectable(&date(2024, 1, 31), &state));
    }

    #[test]
    fn bounds_compare_across_months() {
        let state = ViewState::default().with_start_date(Some(date(2024, 3, 15)));

        assert!(!is_selectable(&date(2024, 2, 20), &state));
        assert!(!is_selectable(&date(2024, 3, 14), &state));
        assert!(is_selectable(&date(2024, 3, 15), &state));
        assert!(is_selectable(&date(2024, 4, 1), &state));
    }

    #[test]
    fn day_limit_rejects_seven_day_span() {
        let state = anchored(ViewState::new(SelectType::day_range(Some(5))), date(2024, 1, 10));

        assert_eq!(
            check_selectable(&date(2024, 1, 16), &state),
            Selectability::LimitExceeded { anchor: date(2024, 1, 10), limit: 5 }
        );
        assert!(is_selectable(&date(2024, 1, 14), &state));
        assert!(is_selectable(&date(2024, 1, 6), &state));
        assert!(!is_selectable(&date(2024, 1, 5), &state));
    }

    #[test]
    fn no_limit_check_without_anchor() {
        let state = ViewState::new(SelectType::day_range(Some(1)));

        assert!(is_selectable(&date(2030, 1, 1), &state));
    }

    #[test]
    fn no_limit_check_for_complete_selection() {
        let state = ViewState::new(SelectType::day_range(Some(2)))
            .replace_selection(SelectedDates::range(date(2024, 1, 10), date(2024, 1, 11)));

        assert!(is_selectable(&date(2024, 3, 1), &state));
    }

    #[test]
    fn week_limit_uses_snapped_endpoint() {
        // anchor is the Sunday opening 2024-01-07..13
        let state = anchored(ViewState::new(SelectType::week_range(Some(2))), date(2024, 1, 7));

        assert!(is_selectable(&date(2024, 1, 14), &state));
        assert!(is_selectable(&date(2024, 1, 20), &state));
        assert!(!is_selectable(&date(2024, 1, 21), &state));
        assert!(is_selectable(&date(2023, 12, 31), &state));
        assert!(!is_selectable(&date(2023, 12, 30), &state));
    }

    #[test]
    fn month_limit_uses_snapped_endpoint() {
        let state = anchored(ViewState::new(SelectType::month_range(Some(2))), date(2024, 3, 1));

        assert!(is_selectable(&date(2024, 4, 30), &state));
        assert!(!is_selectable(&date(2024, 5, 1), &state));
        assert!(is_selectable(&date(2024, 2, 1), &state));
        assert!(!is_selectable(&date(2024, 1, 31), &state));
    }

    #[test]
    fn bounds_take_priority_over_limit() {
        let state = anchored(january_bounds(SelectType::day_range(Some(2))), date(2024, 1, 30));

        assert_eq!(
            check_selectable(&date(2024, 2, 10), &state),
            Selectability::AfterEndDate { bound: date(2024, 1, 31) }
        );
    }

    #[test]
    fn validates_end_without_start() {
        let state = ViewState::new(SelectType::day_range(None));

        let result = validate_selected_dates(&state, &SelectedDates::new(None, Some(date(2024, 1, 1))));

        assert_eq!(result, Err(SelectionError::EndWithoutStart));
    }

    #[test]
    fn validates_out_of_bounds_endpoints() {
        let state = january_bounds(SelectType::day_range(None));

        assert_eq!(
            validate_selected_dates(&state, &SelectedDates::anchored(date(2023, 12, 31))),
            Err(SelectionError::StartOutOfBounds { date: date(2023, 12, 31) })
        );
        assert_eq!(
            validate_selected_dates(
                &state,
                &SelectedDates::range(date(2024, 1, 2), date(2024, 2, 1))
            ),
            Err(SelectionError::EndOutOfBounds { date: date(2024, 2, 1) })
        );
    }

    #[test]
    fn validates_ordering() {
        let state = ViewState::new(SelectType::day_range(None));

        let result = validate_selected_dates(
            &state,
            &SelectedDates::range(date(2024, 1, 5), date(2024, 1, 2)),
        );

        assert!(matches!(result, Err(SelectionError::Reversed { .. })));
    }

    #[test]
    fn validates_limit() {
        let state = ViewState::new(SelectType::day_range(Some(3)));

        let result = validate_selected_dates(
            &state,
            &SelectedDates::range(date(2024, 1, 1), date(2024, 1, 4)),
        );

        assert_eq!(
            result,
            Err(SelectionError::LimitExceeded {
                start: date(2024, 1, 1),
                end: date(2024, 1, 4),
                select_type: "day_range",
                limit: 3,
            })
        );
        assert!(validate_selected_dates(
            &state,
            &SelectedDates::range(date(2024, 1, 1), date(2024, 1, 3))
        )
        .is_ok());
    }

    #[test]
    fn one_day_requires_single_date() {
        let state = ViewState::new(SelectType::OneDay);

        assert_eq!(
            validate_selected_dates(&state, &SelectedDates::anchored(date(2024, 1, 1))),
            Err(SelectionError::InvalidOneDay)
        );
        assert_eq!(
            validate_selected_dates(
                &state,
                &SelectedDates::range(date(2024, 1, 1), date(2024, 1, 2))
            ),
            Err(SelectionError::InvalidOneDay)
        );
        assert!(validate_selected_dates(&state, &SelectedDates::single(date(2024, 1, 1))).is_ok());
    }
}
