pub mod app;
pub mod calendar;
pub mod dots;
pub mod selection;
pub mod storage;
pub mod ui;

pub use app::{DatePicker, OutOfRangeListener, SelectionEvent, SelectionListener};
pub use calendar::{CalendarDate, DateBounds, SelectType, SelectedDates};
pub use selection::{DayState, ViewState};
