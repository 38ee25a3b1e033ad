use serde::{Deserialize, Serialize};

use super::date::CalendarDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectType {
    #[default]
    OneDay,
    DayRange { limit: Option<u32> },
    WeekRange { limit: Option<u32> },
    MonthRange { limit: Option<u32> },
}

impl SelectType {
    pub fn day_range(limit: Option<u32>) -> Self {
        Self::DayRange { limit: normalize_limit(limit) }
    }

    pub fn week_range(limit: Option<u32>) -> Self {
        Self::WeekRange { limit: normalize_limit(limit) }
    }

    pub fn month_range(limit: Option<u32>) -> Self {
        Self::MonthRange { limit: normalize_limit(limit) }
    }

    /// Configured span cap. A zero limit counts as no limit.
    pub fn limit(&self) -> Option<u32> {
        match self {
            Self::OneDay => None,
            Self::DayRange { limit } | Self::WeekRange { limit } | Self::MonthRange { limit } => {
                normalize_limit(*limit)
            }
        }
    }

    pub fn is_range(&self) -> bool {
        !matches!(self, Self::OneDay)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::OneDay => "one_day",
            Self::DayRange { .. } => "day_range",
            Self::WeekRange { .. } => "week_range",
            Self::MonthRange { .. } => "month_range",
        }
    }
}

fn normalize_limit(limit: Option<u32>) -> Option<u32> {
    limit.filter(|l| *l > 0)
}

/// Current selection. `{None, None}` is empty, `{Some, None}` is a range
/// waiting for its second tap, and `{Some, Some}` is complete with
/// `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectedDates {
    pub start: Option<CalendarDate>,
    pub end: Option<CalendarDate>,
}

impl SelectedDates {
    pub fn new(start: Option<CalendarDate>, end: Option<CalendarDate>) -> Self {
        Self { start, end }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn anchored(start: CalendarDate) -> Self {
        Self { start: Some(start), end: None }
    }

    pub fn range(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start: Some(start), end: Some(end) }
    }

    pub fn single(date: CalendarDate) -> Self {
        Self::range(date, date)
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Anchor of a selection still waiting for its second endpoint.
    pub fn in_progress(&self) -> Option<CalendarDate> {
        match (self.start, self.end) {
            (Some(start), None) => Some(start),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn contains(&self, date: &CalendarDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= *date && *date <= end,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn one_day_has_no_limit() {
        assert_eq!(SelectType::OneDay.limit(), None);
        assert!(!SelectType::OneDay.is_range());
    }

    #[test]
    fn zero_limit_means_unlimited() {
        assert_eq!(SelectType::day_range(Some(0)).limit(), None);
        assert_eq!(SelectType::DayRange { limit: Some(0) }.limit(), None);
        assert_eq!(SelectType::week_range(Some(3)).limit(), Some(3));
        assert_eq!(SelectType::month_range(None).limit(), None);
    }

    #[test]
    fn empty_selection() {
        let selected = SelectedDates::empty();

        assert!(selected.is_empty());
        assert!(!selected.is_complete());
        assert_eq!(selected.in_progress(), None);
    }

    #[test]
    fn anchored_selection_is_in_progress() {
        let selected = SelectedDates::anchored(date(2024, 1, 10));

        assert_eq!(selected.in_progress(), Some(date(2024, 1, 10)));
        assert!(!selected.contains(&date(2024, 1, 10)));
    }

    #[test]
    fn complete_range_contains_inner_days() {
        let selected = SelectedDates::range(date(2024, 1, 10), date(2024, 1, 15));

        assert!(selected.is_complete());
        assert!(selected.contains(&date(2024, 1, 10)));
        assert!(selected.contains(&date(2024, 1, 12)));
        assert!(selected.contains(&date(2024, 1, 15)));
        assert!(!selected.contains(&date(2024, 1, 16)));
    }

    #[test]
    fn select_type_serializes_with_kind_tag() {
        let json = serde_json::to_string(&SelectType::week_range(Some(2))).unwrap();

        assert_eq!(json, r#"{"kind":"week_range","limit":2}"#);
    }
}
