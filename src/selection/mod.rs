pub mod day_state;
pub mod selectable;
pub mod transition;
pub mod view_state;

pub use day_state::{DayState, DayType, Range, classify};
pub use selectable::{Selectability, SelectionError, check_selectable, is_selectable};
pub use transition::transition;
pub use view_state::ViewState;
