use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarDate, DateBounds, SelectType, SelectedDates};
use crate::selection::selectable::{SelectionError, validate_selected_dates};

/// Snapshot of everything the selection engine reads.
///
/// Snapshots are never edited in place: each `with_*` call returns a new
/// value, and changing the bounds, the select type or the week start drops
/// the current selection so it can never disagree with them. Deserializing
/// runs the same checks as [`ViewState::with_selected_dates`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedViewState")]
pub struct ViewState {
    start_date: Option<CalendarDate>,
    end_date: Option<CalendarDate>,
    today_selected: bool,
    select_type: SelectType,
    selected_dates: SelectedDates,
    #[serde(with = "weekday_name")]
    week_start: Weekday,
}

impl ViewState {
    pub fn new(select_type: SelectType) -> Self {
        Self {
            select_type,
            ..Self::default()
        }
    }

    pub fn start_date(&self) -> Option<CalendarDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<CalendarDate> {
        self.end_date
    }

    pub fn bounds(&self) -> DateBounds {
        DateBounds::new(self.start_date, self.end_date)
    }

    pub fn today_selected(&self) -> bool {
        self.today_selected
    }

    pub fn select_type(&self) -> SelectType {
        self.select_type
    }

    pub fn selected_dates(&self) -> SelectedDates {
        self.selected_dates
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn with_start_date(&self, start_date: Option<CalendarDate>) -> Self {
        Self {
            start_date,
            selected_dates: SelectedDates::empty(),
            ..self.clone()
        }
    }

    pub fn with_end_date(&self, end_date: Option<CalendarDate>) -> Self {
        Self {
            end_date,
            selected_dates: SelectedDates::empty(),
            ..self.clone()
        }
    }

    pub fn with_bounds(&self, bounds: DateBounds) -> Self {
        Self {
            start_date: bounds.start,
            end_date: bounds.end,
            selected_dates: SelectedDates::empty(),
            ..self.clone()
        }
    }

    pub fn with_select_type(&self, select_type: SelectType) -> Self {
        Self {
            select_type,
            selected_dates: SelectedDates::empty(),
            ..self.clone()
        }
    }

    pub fn with_week_start(&self, week_start: Weekday) -> Self {
        Self {
            week_start,
            selected_dates: SelectedDates::empty(),
            ..self.clone()
        }
    }

    pub fn with_today_selected(&self, today_selected: bool) -> Self {
        Self {
            today_selected,
            ..self.clone()
        }
    }

    /// Replaces the selection after checking it against the bounds, the
    /// select type and its limit.
    pub fn with_selected_dates(&self, selected_dates: SelectedDates) -> Result<Self, SelectionError> {
        validate_selected_dates(self, &selected_dates)?;
        Ok(self.replace_selection(selected_dates))
    }

    /// Unchecked replacement used once a tap has already been accepted.
    pub(crate) fn replace_selection(&self, selected_dates: SelectedDates) -> Self {
        Self {
            selected_dates,
            ..self.clone()
        }
    }

    pub fn clear_selection(&self) -> Self {
        self.replace_selection(SelectedDates::empty())
    }
}

#[derive(Deserialize)]
struct UncheckedViewState {
    start_date: Option<CalendarDate>,
    end_date: Option<CalendarDate>,
    today_selected: bool,
    select_type: SelectType,
    selected_dates: SelectedDates,
    #[serde(with = "weekday_name")]
    week_start: Weekday,
}

impl TryFrom<UncheckedViewState> for ViewState {
    type Error = SelectionError;

    fn try_from(raw: UncheckedViewState) -> Result<Self, Self::Error> {
        let state = Self {
            start_date: raw.start_date,
            end_date: raw.end_date,
            today_selected: raw.today_selected,
            select_type: raw.select_type,
            selected_dates: SelectedDates::empty(),
            week_start: raw.week_start,
        };
        state.with_selected_dates(raw.selected_dates)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            today_selected: true,
            select_type: SelectType::OneDay,
            selected_dates: SelectedDates::empty(),
            week_start: Weekday::Sun,
        }
    }
}

mod weekday_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&weekday.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse::<Weekday>().map_err(serde::de::Error::custom)
    }
}
