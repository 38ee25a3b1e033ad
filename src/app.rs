use chrono::Weekday;
use serde::Serialize;
use tokio::task::JoinHandle;

use crate::calendar::{CalendarDate, DateBounds, SelectType, SelectedDates};
use crate::dots::DotLoader;
use crate::selection::{Selectability, SelectionError, ViewState, check_selectable, transition};
use crate::ui::month_index;
use crate::ui::{MonthLayout, calculate_layout};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    SelectedDatesChanged {
        start: Option<CalendarDate>,
        end: Option<CalendarDate>,
        select_type: SelectType,
    },
    RangeCompleted {
        start: CalendarDate,
        end: CalendarDate,
        select_type: SelectType,
    },
    SelectLimitExceeded {
        start: CalendarDate,
        attempted: CalendarDate,
        select_type: SelectType,
        limit: u32,
    },
    SelectedBeforeStartDate {
        bound: CalendarDate,
        attempted: CalendarDate,
    },
    SelectedAfterEndDate {
        bound: CalendarDate,
        attempted: CalendarDate,
    },
}

impl SelectionEvent {
    /// Whether the event belongs to [`OutOfRangeListener`] rather than
    /// [`SelectionListener`].
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::SelectedBeforeStartDate { .. } | Self::SelectedAfterEndDate { .. }
        )
    }

    pub fn notify(&self, listener: &mut dyn SelectionListener) {
        match *self {
            Self::SelectedDatesChanged { start, end, select_type } => {
                listener.on_selected_dates_changed(start, end, select_type)
            }
            Self::RangeCompleted { start, end, select_type } => {
                listener.on_range_completed(start, end, select_type)
            }
            Self::SelectLimitExceeded { start, attempted, select_type, limit } => {
                listener.on_select_limit_exceed(start, attempted, select_type, limit)
            }
            Self::SelectedBeforeStartDate { .. } | Self::SelectedAfterEndDate { .. } => {}
        }
    }

    pub fn notify_out_of_range(&self, listener: &mut dyn OutOfRangeListener) {
        match *self {
            Self::SelectedBeforeStartDate { bound, attempted } => {
                listener.on_selected_before_start_date(bound, attempted)
            }
            Self::SelectedAfterEndDate { bound, attempted } => {
                listener.on_selected_after_end_date(bound, attempted)
            }
            _ => {}
        }
    }
}

/// Selection callbacks. Every method defaults to doing nothing.
#[cfg_attr(test, mockall::automock)]
pub trait SelectionListener {
    fn on_selected_dates_changed(
        &mut self,
        _start: Option<CalendarDate>,
        _end: Option<CalendarDate>,
        _select_type: SelectType,
    ) {
    }

    fn on_range_completed(&mut self, _start: CalendarDate, _end: CalendarDate, _select_type: SelectType) {}

    fn on_select_limit_exceed(
        &mut self,
        _start: CalendarDate,
        _attempted: CalendarDate,
        _select_type: SelectType,
        _limit: u32,
    ) {
    }
}

/// Taps outside the configured bounds.
#[cfg_attr(test, mockall::automock)]
pub trait OutOfRangeListener {
    fn on_selected_before_start_date(&mut self, _bound: CalendarDate, _attempted: CalendarDate) {}

    fn on_selected_after_end_date(&mut self, _bound: CalendarDate, _attempted: CalendarDate) {}
}

/// Owns the current [`ViewState`] snapshot and turns taps into selection
/// changes and notifications.
pub struct DatePicker {
    state: ViewState,
    today: CalendarDate,
    listeners: Vec<Box<dyn SelectionListener>>,
    out_of_range_listeners: Vec<Box<dyn OutOfRangeListener>>,
    dots: Option<DotLoader>,
}

impl DatePicker {
    pub fn new(state: ViewState) -> Self {
        Self {
            state,
            today: CalendarDate::today(),
            listeners: Vec::new(),
            out_of_range_listeners: Vec::new(),
            dots: None,
        }
    }

    pub fn with_today(mut self, today: CalendarDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_dot_loader(mut self, loader: DotLoader) -> Self {
        self.dots = Some(loader);
        self
    }

    pub fn add_listener(&mut self, listener: Box<dyn SelectionListener>) {
        self.listeners.push(listener);
    }

    pub fn add_out_of_range_listener(&mut self, listener: Box<dyn OutOfRangeListener>) {
        self.out_of_range_listeners.push(listener);
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    pub fn selected_dates(&self) -> SelectedDates {
        self.state.selected_dates()
    }

    pub fn set_start_date(&mut self, start_date: Option<CalendarDate>) {
        tracing::info!("Start date set to {:?}", start_date);
        self.state = self.state.with_start_date(start_date);
    }

    pub fn set_end_date(&mut self, end_date: Option<CalendarDate>) {
        tracing::info!("End date set to {:?}", end_date);
        self.state = self.state.with_end_date(end_date);
    }

    pub fn set_bounds(&mut self, bounds: DateBounds) {
        tracing::info!("Bounds set to {:?}..{:?}", bounds.start, bounds.end);
        self.state = self.state.with_bounds(bounds);
    }

    pub fn set_select_type(&mut self, select_type: SelectType) {
        tracing::info!("Select type set to {:?}", select_type);
        self.state = self.state.with_select_type(select_type);
    }

    pub fn set_week_start(&mut self, week_start: Weekday) {
        self.state = self.state.with_week_start(week_start);
    }

    pub fn set_today_selected(&mut self, today_selected: bool) {
        self.state = self.state.with_today_selected(today_selected);
    }

    /// Programmatic selection. On error the current selection is kept.
    pub fn set_selected_dates(&mut self, selected: SelectedDates) -> Result<(), SelectionError> {
        match self.state.with_selected_dates(selected) {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Rejected selection {:?}: {}", selected, e);
                Err(e)
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.state = self.state.clear_selection();
    }

    /// Handles a tap on `date` and returns the notifications it produced,
    /// after forwarding them to every listener.
    pub fn on_date_clicked(&mut self, date: CalendarDate) -> Vec<SelectionEvent> {
        let select_type = self.state.select_type();
        let events = match check_selectable(&date, &self.state) {
            Selectability::Selectable => self.apply_tap(date),
            Selectability::BeforeStartDate { bound } => {
                tracing::debug!("Tap on {} before start date {}", date, bound);
                vec![SelectionEvent::SelectedBeforeStartDate { bound, attempted: date }]
            }
            Selectability::AfterEndDate { bound } => {
                tracing::debug!("Tap on {} after end date {}", date, bound);
                vec![SelectionEvent::SelectedAfterEndDate { bound, attempted: date }]
            }
            Selectability::LimitExceeded { anchor, limit } => {
                tracing::debug!("Tap on {} exceeds limit {} from {}", date, limit, anchor);
                vec![SelectionEvent::SelectLimitExceeded {
                    start: anchor,
                    attempted: date,
                    select_type,
                    limit,
                }]
            }
        };

        for event in &events {
            if event.is_out_of_range() {
                for listener in &mut self.out_of_range_listeners {
                    event.notify_out_of_range(listener.as_mut());
                }
            } else {
                for listener in &mut self.listeners {
                    event.notify(listener.as_mut());
                }
            }
        }
        events
    }

    fn apply_tap(&mut self, date: CalendarDate) -> Vec<SelectionEvent> {
        let prev = self.state.selected_dates();
        let select_type = self.state.select_type();
        let next = transition(
            &prev,
            date,
            &select_type,
            &self.state.bounds(),
            self.state.week_start(),
        );

        if next == prev {
            return Vec::new();
        }

        self.state = self.state.replace_selection(next);
        tracing::info!("Selection changed to {:?}..{:?}", next.start, next.end);

        let mut events = vec![SelectionEvent::SelectedDatesChanged {
            start: next.start,
            end: next.end,
            select_type,
        }];
        if let (Some(start), Some(end), false) = (next.start, next.end, prev.is_complete()) {
            events.push(SelectionEvent::RangeCompleted { start, end, select_type });
        }
        events
    }

    pub fn month_count(&self) -> Option<usize> {
        month_index::month_count(&self.state.bounds())
    }

    pub fn month_at(&self, position: usize) -> Option<(i32, u32)> {
        month_index::month_at(position, &self.state.bounds())
    }

    pub fn position_of_date(&self, date: &CalendarDate) -> Option<usize> {
        month_index::position_of_date(date, &self.state.bounds())
    }

    /// Where a freshly shown picker should scroll to: the selection if there
    /// is one, otherwise today pulled inside the bounds.
    pub fn initial_position(&self) -> Option<usize> {
        let selected = self.state.selected_dates();
        let target = selected
            .start
            .or(selected.end)
            .unwrap_or_else(|| self.state.bounds().clamp(self.today));
        self.position_of_date(&target)
    }

    pub fn month_layout(&self, position: usize) -> Option<MonthLayout> {
        let (year, month) = self.month_at(position)?;
        Some(self.layout_for(year, month))
    }

    pub fn layout_for(&self, year: i32, month: u32) -> MonthLayout {
        calculate_layout(year, month, &self.state, &self.today, |date| {
            self.dots.as_ref().is_some_and(|dots| dots.has_dot(date))
        })
    }

    /// Kicks off a dot fetch for the year shown at `position` if that year
    /// has never been requested.
    ///
    /// # Panics
    ///
    /// Spawns on the current tokio runtime, so it panics when called outside
    /// one and a fetch is actually started.
    pub fn request_dots(&self, position: usize) -> Option<JoinHandle<()>> {
        let (year, _) = self.month_at(position)?;
        self.dots.as_ref()?.ensure(year)
    }
}

impl std::fmt::Debug for DatePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatePicker")
            .field("state", &self.state)
            .field("today", &self.today)
            .field("listeners", &self.listeners.len())
            .field("out_of_range_listeners", &self.out_of_range_listeners.len())
            .field("dots", &self.dots)
            .finish()
    }
}
