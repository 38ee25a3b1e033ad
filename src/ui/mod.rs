pub mod month_index;
pub mod month_view;

pub use month_view::{DayCell, MonthLayout, Week, calculate_layout};
