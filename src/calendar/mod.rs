pub mod date;
pub mod select_type;
pub mod span;

pub use date::{CalendarDate, DateError};
pub use select_type::{SelectType, SelectedDates};
pub use span::DateBounds;
